//! Character DTOs for API requests and responses
//!
//! The creation request mirrors the creation form: every field is optional
//! at the transport level so an incomplete submission reaches the validator
//! and comes back with the full error report instead of a parse failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{
    AnimalCompanion, BackgroundInstance, Character, CharacterSheet, ClassPayload, Crew,
    MoveInstance, SpecialPossessionInstance, TallTale,
};
use crate::domain::rules::CreationChoices;
use crate::domain::value_objects::StatAssignment;

// ============================================================================
// Request DTOs
// ============================================================================

/// Full creation submission for one class
#[derive(Debug, Default, Deserialize)]
pub struct CreateCharacterRequestDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub stats: StatAssignment,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub instinct: Option<String>,
    #[serde(default)]
    pub appearance1: Option<String>,
    #[serde(default)]
    pub appearance2: Option<String>,
    #[serde(default)]
    pub appearance3: Option<String>,
    #[serde(default)]
    pub appearance4: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub special_possessions: Vec<String>,
    #[serde(default)]
    pub detail_answers: Vec<String>,
    #[serde(default)]
    pub extra_choices: BTreeMap<String, String>,
}

impl CreateCharacterRequestDto {
    /// Convert the raw submission into typed creation choices.
    ///
    /// Unparseable ids become fresh random ids: they match no catalog entry
    /// and surface as "Select a valid choice." alongside the rest of the
    /// error report, rather than aborting the request at the parse step.
    pub fn into_choices(self) -> CreationChoices {
        CreationChoices {
            name: self.name,
            player: self.player,
            stats: self.stats,
            background_id: parse_selection(self.background),
            instinct_id: parse_selection(self.instinct),
            appearance_ids: [
                parse_selection(self.appearance1),
                parse_selection(self.appearance2),
                parse_selection(self.appearance3),
                parse_selection(self.appearance4),
            ],
            place_of_origin_id: parse_selection(self.place_of_origin),
            move_ids: self
                .moves
                .into_iter()
                .filter_map(|raw| parse_selection(Some(raw)))
                .collect(),
            special_possession_ids: self
                .special_possessions
                .into_iter()
                .filter_map(|raw| parse_selection(Some(raw)))
                .collect(),
            detail_answers: self.detail_answers,
            extra_choices: self.extra_choices,
        }
    }
}

/// Blank and whitespace selections count as not selected
fn parse_selection<T: From<Uuid>>(raw: Option<String>) -> Option<T> {
    raw.filter(|s| !s.trim().is_empty()).map(|s| {
        Uuid::parse_str(s.trim())
            .map(T::from)
            .unwrap_or_else(|_| T::from(Uuid::new_v4()))
    })
}

/// One tall tale for the Fox
#[derive(Debug, Deserialize)]
pub struct TallTaleRequestDto {
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub results: String,
}

impl From<TallTaleRequestDto> for TallTale {
    fn from(dto: TallTaleRequestDto) -> Self {
        Self {
            theme: dto.theme,
            details: dto.details,
            results: dto.results,
        }
    }
}

/// The Marshal's crew
#[derive(Debug, Deserialize)]
pub struct CrewRequestDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub instinct: String,
    #[serde(default)]
    pub cost: String,
}

impl From<CrewRequestDto> for Crew {
    fn from(dto: CrewRequestDto) -> Self {
        Self {
            name: dto.name,
            instinct: dto.instinct,
            cost: dto.cost,
        }
    }
}

/// The Ranger's animal companion
#[derive(Debug, Deserialize)]
pub struct CompanionRequestDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub traits: Vec<String>,
}

impl From<CompanionRequestDto> for AnimalCompanion {
    fn from(dto: CompanionRequestDto) -> Self {
        Self {
            name: dto.name,
            species: dto.species,
            traits: dto.traits,
        }
    }
}

/// The Seeker's initial arcana
#[derive(Debug, Deserialize)]
pub struct ArcanaRequestDto {
    #[serde(default)]
    pub arcana: Vec<String>,
}

/// The Lightbearer's chosen invocations
#[derive(Debug, Deserialize)]
pub struct InvocationsRequestDto {
    #[serde(default)]
    pub invocations: Vec<String>,
}

/// The Blessed's fellow initiates
#[derive(Debug, Deserialize)]
pub struct InitiatesRequestDto {
    #[serde(default)]
    pub initiates: Vec<String>,
}

/// The Would-Be Hero's background write-up
#[derive(Debug, Deserialize)]
pub struct BackgroundDetailsRequestDto {
    #[serde(default)]
    pub details: String,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Core character data
#[derive(Debug, Serialize)]
pub struct CharacterResponseDto {
    pub id: String,
    pub campaign_id: String,
    pub name: String,
    pub player: String,
    pub class: String,
    pub class_display_name: String,
    pub level: i32,
    pub stats: StatAssignment,
    pub instinct_id: String,
    pub appearance_ids: Vec<String>,
    pub place_of_origin_id: String,
    /// Class-unique fields, tagged by class
    pub payload: ClassPayload,
    pub created_at: String,
}

impl From<Character> for CharacterResponseDto {
    fn from(character: Character) -> Self {
        Self {
            id: character.id.to_string(),
            campaign_id: character.campaign_id.to_string(),
            name: character.name,
            player: character.player,
            class: character.class_kind.slug().to_string(),
            class_display_name: character.class_kind.display_name().to_string(),
            level: character.level,
            stats: character.stats,
            instinct_id: character.instinct_id.to_string(),
            appearance_ids: character
                .appearance_ids
                .iter()
                .map(|id| id.to_string())
                .collect(),
            place_of_origin_id: character.place_of_origin_id.to_string(),
            payload: character.payload,
            created_at: character.created_at.to_rfc3339(),
        }
    }
}

/// The character's chosen background with its charge state
#[derive(Debug, Serialize)]
pub struct BackgroundInstanceResponseDto {
    pub id: String,
    pub background_id: String,
    pub name: String,
    pub charges_used: Option<i32>,
    pub total_charges: Option<i32>,
}

impl From<BackgroundInstance> for BackgroundInstanceResponseDto {
    fn from(instance: BackgroundInstance) -> Self {
        Self {
            id: instance.id.to_string(),
            background_id: instance.background_id.to_string(),
            name: instance.background_name,
            charges_used: instance.charges_used,
            total_charges: instance.total_charges,
        }
    }
}

/// One move the character knows
#[derive(Debug, Serialize)]
pub struct MoveInstanceResponseDto {
    pub id: String,
    pub move_id: String,
    pub name: String,
    pub uses: Option<i32>,
    pub total_uses: Option<i32>,
    pub charges: Option<i32>,
    pub total_charges: Option<i32>,
    pub position: i32,
}

impl From<MoveInstance> for MoveInstanceResponseDto {
    fn from(instance: MoveInstance) -> Self {
        Self {
            id: instance.id.to_string(),
            move_id: instance.move_id.to_string(),
            name: instance.move_name,
            uses: instance.uses,
            total_uses: instance.total_uses,
            charges: instance.charges,
            total_charges: instance.total_charges,
            position: instance.position,
        }
    }
}

/// One special possession the character owns
#[derive(Debug, Serialize)]
pub struct SpecialPossessionInstanceResponseDto {
    pub id: String,
    pub possession_id: String,
    pub name: String,
    pub uses: Option<i32>,
    pub total_uses: Option<i32>,
    pub charges: Option<i32>,
    pub total_charges: Option<i32>,
    pub position: i32,
}

impl From<SpecialPossessionInstance> for SpecialPossessionInstanceResponseDto {
    fn from(instance: SpecialPossessionInstance) -> Self {
        Self {
            id: instance.id.to_string(),
            possession_id: instance.possession_id.to_string(),
            name: instance.possession_name,
            uses: instance.uses,
            total_uses: instance.total_uses,
            charges: instance.charges,
            total_charges: instance.total_charges,
            position: instance.position,
        }
    }
}

/// A character with everything it owns, resolved for display
#[derive(Debug, Serialize)]
pub struct CharacterSheetResponseDto {
    pub character: CharacterResponseDto,
    pub background: BackgroundInstanceResponseDto,
    pub moves: Vec<MoveInstanceResponseDto>,
    pub special_possessions: Vec<SpecialPossessionInstanceResponseDto>,
    pub instinct: String,
    pub appearance: Vec<String>,
    pub place_of_origin: String,
}

impl From<CharacterSheet> for CharacterSheetResponseDto {
    fn from(sheet: CharacterSheet) -> Self {
        Self {
            character: sheet.character.into(),
            background: sheet.background.into(),
            moves: sheet.moves.into_iter().map(Into::into).collect(),
            special_possessions: sheet.possessions.into_iter().map(Into::into).collect(),
            instinct: sheet.instinct,
            appearance: sheet.appearance.to_vec(),
            place_of_origin: sheet.place_of_origin,
        }
    }
}

/// Successful creation: the new sheet plus where the wizard goes next
#[derive(Debug, Serialize)]
pub struct CreationResponseDto {
    pub character: CharacterSheetResponseDto,
    /// Slug of the follow-up step, "home" when nothing remains
    pub next_step: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::BackgroundId;

    #[test]
    fn test_blank_selection_counts_as_missing() {
        assert_eq!(parse_selection::<BackgroundId>(None), None);
        assert_eq!(parse_selection::<BackgroundId>(Some("".to_string())), None);
        assert_eq!(parse_selection::<BackgroundId>(Some("  ".to_string())), None);
    }

    #[test]
    fn test_unparseable_selection_becomes_unmatchable_id() {
        let id = BackgroundId::new();
        let parsed: Option<BackgroundId> = parse_selection(Some("not-a-uuid".to_string()));

        // Still a selection, but one no catalog lookup will resolve
        assert!(parsed.is_some());
        assert_ne!(parsed, Some(id));
    }

    #[test]
    fn test_valid_selection_round_trips() {
        let id = BackgroundId::new();
        let parsed: Option<BackgroundId> = parse_selection(Some(id.to_string()));

        assert_eq!(parsed, Some(id));
    }

    #[test]
    fn test_empty_body_deserializes_to_blank_submission() {
        let dto: CreateCharacterRequestDto = serde_json::from_str("{}").unwrap();
        let choices = dto.into_choices();

        assert!(choices.name.is_empty());
        assert_eq!(choices.background_id, None);
        assert!(choices.move_ids.is_empty());
    }
}
