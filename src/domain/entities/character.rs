//! Character entity - A player character and its per-character instance records
//!
//! One `Character` row covers all nine classes: the `ClassKind` discriminant
//! plus a [`ClassPayload`] variant replace per-class tables. Templates the
//! player picked at creation are copied into instance records
//! ([`MoveInstance`], [`SpecialPossessionInstance`], [`BackgroundInstance`])
//! which carry the mutable play-time state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::playbook::{
    Background, MoveTemplate, SpecialPossession, APPEARANCE_SLOTS,
};
use crate::domain::value_objects::{
    AppearanceOptionId, BackgroundId, BackgroundInstanceId, CampaignId, CharacterId, ClassKind,
    InstinctId, MoveId, MoveInstanceId, PlaceOfOriginId, PossessionInstanceId,
    SpecialPossessionId, StatAssignment,
};

/// A player character in a campaign
#[derive(Debug, Clone)]
pub struct Character {
    pub id: CharacterId,
    pub campaign_id: CampaignId,
    /// Name of the player running this character
    pub player: String,
    pub name: String,
    pub class_kind: ClassKind,
    pub level: i32,
    pub stats: StatAssignment,

    // Descriptor choices; each references a template of the character's own class
    pub instinct_id: InstinctId,
    pub appearance_ids: [AppearanceOptionId; APPEARANCE_SLOTS],
    pub place_of_origin_id: PlaceOfOriginId,

    /// Class-unique fields (sacred pouch, war story, ...)
    pub payload: ClassPayload,
    pub created_at: DateTime<Utc>,
}

impl Character {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        campaign_id: CampaignId,
        player: impl Into<String>,
        name: impl Into<String>,
        class_kind: ClassKind,
        stats: StatAssignment,
        instinct_id: InstinctId,
        appearance_ids: [AppearanceOptionId; APPEARANCE_SLOTS],
        place_of_origin_id: PlaceOfOriginId,
        payload: ClassPayload,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            campaign_id,
            player: player.into(),
            name: name.into(),
            class_kind,
            level: 1,
            stats,
            instinct_id,
            appearance_ids,
            place_of_origin_id,
            payload,
            created_at: Utc::now(),
        }
    }

    /// Append a tall tale; false when the character is not a Fox
    pub fn add_tall_tale(&mut self, tale: TallTale) -> bool {
        match &mut self.payload {
            ClassPayload::Fox { tall_tales } => {
                tall_tales.push(tale);
                true
            }
            _ => false,
        }
    }

    /// Set or replace the Marshal's crew; false for other classes
    pub fn set_crew(&mut self, new_crew: Crew) -> bool {
        match &mut self.payload {
            ClassPayload::Marshal { crew, .. } => {
                *crew = Some(new_crew);
                true
            }
            _ => false,
        }
    }

    /// Set or replace the Ranger's animal companion; false for other classes
    pub fn set_companion(&mut self, new_companion: AnimalCompanion) -> bool {
        match &mut self.payload {
            ClassPayload::Ranger { companion, .. } => {
                *companion = Some(new_companion);
                true
            }
            _ => false,
        }
    }

    /// Replace the Lightbearer's chosen invocations; false for other classes
    pub fn set_invocations(&mut self, chosen: Vec<String>) -> bool {
        match &mut self.payload {
            ClassPayload::Lightbearer { invocations } => {
                *invocations = chosen;
                true
            }
            _ => false,
        }
    }

    /// Replace the Seeker's initial arcana; false for other classes
    pub fn set_initial_arcana(&mut self, chosen: Vec<String>) -> bool {
        match &mut self.payload {
            ClassPayload::Seeker { initial_arcana } => {
                *initial_arcana = chosen;
                true
            }
            _ => false,
        }
    }

    /// Replace the Blessed's fellow initiates; false for other classes
    pub fn set_initiates(&mut self, chosen: Vec<String>) -> bool {
        match &mut self.payload {
            ClassPayload::Blessed { initiates, .. } => {
                *initiates = chosen;
                true
            }
            _ => false,
        }
    }

    /// Update the Would-Be Hero's background write-up; false for other classes
    pub fn set_background_details(&mut self, details: impl Into<String>) -> bool {
        match &mut self.payload {
            ClassPayload::WouldBeHero { background_details } => {
                *background_details = details.into();
                true
            }
            _ => false,
        }
    }
}

/// Class-unique character fields, discriminated by class
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum ClassPayload {
    Blessed {
        sacred_pouch: SacredPouch,
        /// Fellow initiates of Danu, chosen in a follow-up wizard step
        initiates: Vec<String>,
    },
    Fox {
        tall_tales: Vec<TallTale>,
    },
    Heavy {},
    Judge {},
    Lightbearer {
        invocations: Vec<String>,
    },
    Marshal {
        /// Answers to the war-story questions, aligned with the class's
        /// question list; blank entries are unanswered
        war_story: Vec<String>,
        crew: Option<Crew>,
    },
    Ranger {
        something_wicked: Vec<String>,
        companion: Option<AnimalCompanion>,
    },
    Seeker {
        initial_arcana: Vec<String>,
    },
    WouldBeHero {
        background_details: String,
    },
}

impl ClassPayload {
    pub fn class_kind(&self) -> ClassKind {
        match self {
            ClassPayload::Blessed { .. } => ClassKind::Blessed,
            ClassPayload::Fox { .. } => ClassKind::Fox,
            ClassPayload::Heavy {} => ClassKind::Heavy,
            ClassPayload::Judge {} => ClassKind::Judge,
            ClassPayload::Lightbearer { .. } => ClassKind::Lightbearer,
            ClassPayload::Marshal { .. } => ClassKind::Marshal,
            ClassPayload::Ranger { .. } => ClassKind::Ranger,
            ClassPayload::Seeker { .. } => ClassKind::Seeker,
            ClassPayload::WouldBeHero { .. } => ClassKind::WouldBeHero,
        }
    }
}

/// The Blessed's sacred pouch, described at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SacredPouch {
    pub origin: String,
    pub material: String,
    pub aesthetics: String,
}

/// One of the Fox's tall tales
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallTale {
    /// "That time when I..."
    pub theme: String,
    pub details: String,
    /// What the village still believes came of it
    pub results: String,
}

/// The Marshal's crew
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crew {
    pub name: String,
    pub instinct: String,
    pub cost: String,
}

/// The Ranger's animal companion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalCompanion {
    pub name: String,
    pub species: String,
    pub traits: Vec<String>,
}

/// Per-character copy of the chosen background
#[derive(Debug, Clone)]
pub struct BackgroundInstance {
    pub id: BackgroundInstanceId,
    pub character_id: CharacterId,
    pub background_id: BackgroundId,
    pub background_name: String,
    /// Tracked only when the background template declares charges
    pub charges_used: Option<i32>,
    pub total_charges: Option<i32>,
}

impl BackgroundInstance {
    pub fn from_template(character_id: CharacterId, template: &Background) -> Self {
        Self {
            id: BackgroundInstanceId::new(),
            character_id,
            background_id: template.id,
            background_name: template.name.clone(),
            charges_used: template.total_charges.map(|_| 0),
            total_charges: template.total_charges,
        }
    }
}

/// Per-character copy of a move template
#[derive(Debug, Clone)]
pub struct MoveInstance {
    pub id: MoveInstanceId,
    pub character_id: CharacterId,
    pub move_id: MoveId,
    pub move_name: String,
    /// Uses spent; None when the template tracks no uses
    pub uses: Option<i32>,
    pub total_uses: Option<i32>,
    pub charges: Option<i32>,
    pub total_charges: Option<i32>,
    /// Position within the character's move list; player picks come before
    /// automatic grants
    pub position: i32,
}

impl MoveInstance {
    pub fn from_template(
        character_id: CharacterId,
        template: &MoveTemplate,
        position: i32,
    ) -> Self {
        Self {
            id: MoveInstanceId::new(),
            character_id,
            move_id: template.id,
            move_name: template.name.clone(),
            uses: template.total_uses.map(|_| 0),
            total_uses: template.total_uses,
            charges: template.total_charges.map(|_| 0),
            total_charges: template.total_charges,
            position,
        }
    }
}

/// Per-character copy of a special possession template
#[derive(Debug, Clone)]
pub struct SpecialPossessionInstance {
    pub id: PossessionInstanceId,
    pub character_id: CharacterId,
    pub possession_id: SpecialPossessionId,
    pub possession_name: String,
    pub uses: Option<i32>,
    pub total_uses: Option<i32>,
    pub charges: Option<i32>,
    pub total_charges: Option<i32>,
    pub position: i32,
}

impl SpecialPossessionInstance {
    pub fn from_template(
        character_id: CharacterId,
        template: &SpecialPossession,
        position: i32,
    ) -> Self {
        Self {
            id: PossessionInstanceId::new(),
            character_id,
            possession_id: template.id,
            possession_name: template.name.clone(),
            uses: template.total_uses.map(|_| 0),
            total_uses: template.total_uses,
            charges: template.total_charges.map(|_| 0),
            total_charges: template.total_charges,
            position,
        }
    }
}

/// A character together with everything it owns, as loaded for display
#[derive(Debug, Clone)]
pub struct CharacterSheet {
    pub character: Character,
    pub background: BackgroundInstance,
    pub moves: Vec<MoveInstance>,
    pub possessions: Vec<SpecialPossessionInstance>,
    /// Resolved descriptor names, in form order: instinct, four appearance
    /// slots, place of origin
    pub instinct: String,
    pub appearance: [String; APPEARANCE_SLOTS],
    pub place_of_origin: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_instance_copies_tracked_totals() {
        let template = MoveTemplate::new(ClassKind::Blessed, "BORROW POWER").with_uses(3);
        let instance = MoveInstance::from_template(CharacterId::new(), &template, 0);

        assert_eq!(instance.uses, Some(0));
        assert_eq!(instance.total_uses, Some(3));
        assert_eq!(instance.charges, None);
        assert_eq!(instance.total_charges, None);
    }

    #[test]
    fn test_move_instance_untracked_when_template_declares_nothing() {
        let template = MoveTemplate::new(ClassKind::Fox, "DANGER SENSE");
        let instance = MoveInstance::from_template(CharacterId::new(), &template, 2);

        assert_eq!(instance.uses, None);
        assert_eq!(instance.charges, None);
        assert_eq!(instance.position, 2);
    }

    #[test]
    fn test_background_instance_tracks_charges_only_when_declared() {
        let plain = Background::new(ClassKind::Fox, "THE NATURAL");
        let charged = Background::new(ClassKind::Blessed, "VESSEL").with_charges(3);
        let character_id = CharacterId::new();

        assert_eq!(
            BackgroundInstance::from_template(character_id, &plain).charges_used,
            None
        );
        assert_eq!(
            BackgroundInstance::from_template(character_id, &charged).charges_used,
            Some(0)
        );
    }

    #[test]
    fn test_payload_mutators_reject_wrong_class() {
        let mut payload_holder = Character::new(
            CampaignId::new(),
            "ada",
            "Rhianwen",
            ClassKind::Judge,
            StatAssignment {
                strength: 2,
                dexterity: 1,
                intelligence: 1,
                wisdom: 0,
                constitution: 0,
                charisma: -1,
            },
            InstinctId::new(),
            [
                AppearanceOptionId::new(),
                AppearanceOptionId::new(),
                AppearanceOptionId::new(),
                AppearanceOptionId::new(),
            ],
            PlaceOfOriginId::new(),
            ClassPayload::Judge {},
        );

        assert!(!payload_holder.add_tall_tale(TallTale {
            theme: "That time I outdrank the miller".into(),
            details: String::new(),
            results: String::new(),
        }));
        assert!(!payload_holder.set_crew(Crew {
            name: "The Ravens".into(),
            instinct: "To hold the line".into(),
            cost: "Wages and keep".into(),
        }));
    }
}
