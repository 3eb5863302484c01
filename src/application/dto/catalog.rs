//! Class and catalog DTOs for API responses
//!
//! The catalog response bundles everything a creation form needs for one
//! class: the candidate lists plus the rule hints (mandatory moves, detail
//! questions, extra choice fields) a client uses to guide the player.

use serde::Serialize;

use crate::domain::entities::{
    AppearanceOption, Background, Instinct, MoveTemplate, PlaceOfOrigin, SpecialPossession,
};
use crate::domain::rules::{appearance_field, ClassCatalog, ClassRules};
use crate::domain::value_objects::ClassKind;

// ============================================================================
// Class listing
// ============================================================================

/// One entry in the class list
#[derive(Debug, Serialize)]
pub struct ClassInfoDto {
    /// URL slug used in catalog and creation paths
    pub slug: String,
    pub display_name: String,
    /// The stat values this class assigns, e.g. "+2, +1, +1, 0, 0, -1"
    pub stat_array: String,
}

impl From<ClassKind> for ClassInfoDto {
    fn from(class: ClassKind) -> Self {
        let rules = crate::domain::rules::class_rules(class);
        Self {
            slug: class.slug().to_string(),
            display_name: class.display_name().to_string(),
            stat_array: rules.stat_array.to_string(),
        }
    }
}

// ============================================================================
// Catalog response
// ============================================================================

#[derive(Debug, Serialize)]
pub struct BackgroundOptionDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub total_charges: Option<i32>,
}

impl From<&Background> for BackgroundOptionDto {
    fn from(background: &Background) -> Self {
        Self {
            id: background.id.to_string(),
            name: background.name.clone(),
            description: background.description.clone(),
            total_charges: background.total_charges,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InstinctOptionDto {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<&Instinct> for InstinctOptionDto {
    fn from(instinct: &Instinct) -> Self {
        Self {
            id: instinct.id.to_string(),
            name: instinct.name.clone(),
            description: instinct.description.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AppearanceOptionDto {
    pub id: String,
    pub text: String,
}

impl From<&AppearanceOption> for AppearanceOptionDto {
    fn from(option: &AppearanceOption) -> Self {
        Self {
            id: option.id.to_string(),
            text: option.text.clone(),
        }
    }
}

/// One of the four appearance slots with its label and options
#[derive(Debug, Serialize)]
pub struct AppearanceSlotDto {
    /// Submission field key, "appearance1" through "appearance4"
    pub field: String,
    pub label: String,
    pub options: Vec<AppearanceOptionDto>,
}

#[derive(Debug, Serialize)]
pub struct PlaceOfOriginOptionDto {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<&PlaceOfOrigin> for PlaceOfOriginOptionDto {
    fn from(place: &PlaceOfOrigin) -> Self {
        Self {
            id: place.id.to_string(),
            name: place.name.clone(),
            description: place.description.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MoveOptionDto {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Another move that must be selected alongside this one
    pub required_move: Option<String>,
    pub total_uses: Option<i32>,
    pub total_charges: Option<i32>,
}

impl From<&MoveTemplate> for MoveOptionDto {
    fn from(template: &MoveTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            name: template.name.clone(),
            description: template.description.clone(),
            required_move: template.requirement.required_move.clone(),
            total_uses: template.total_uses,
            total_charges: template.total_charges,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SpecialPossessionOptionDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub total_uses: Option<i32>,
    pub total_charges: Option<i32>,
}

impl From<&SpecialPossession> for SpecialPossessionOptionDto {
    fn from(possession: &SpecialPossession) -> Self {
        Self {
            id: possession.id.to_string(),
            name: possession.name.clone(),
            description: possession.description.clone(),
            total_uses: possession.total_uses,
            total_charges: possession.total_charges,
        }
    }
}

/// Free-text question block with its minimum answer count
#[derive(Debug, Serialize)]
pub struct DetailSectionDto {
    pub field: String,
    pub label: String,
    pub questions: Vec<String>,
    pub min_answers: usize,
}

/// A one-of-N choice outside the catalog tables, e.g. sacred pouch origin
#[derive(Debug, Serialize)]
pub struct ExtraChoiceDto {
    pub field: String,
    pub options: Vec<String>,
}

/// A move that becomes required when a particular background is chosen
#[derive(Debug, Serialize)]
pub struct BackgroundMoveRequirementDto {
    pub background: String,
    #[serde(rename = "move")]
    pub move_name: String,
}

/// Everything a creation form needs for one class
#[derive(Debug, Serialize)]
pub struct CatalogResponseDto {
    pub class: ClassInfoDto,
    pub backgrounds: Vec<BackgroundOptionDto>,
    pub instincts: Vec<InstinctOptionDto>,
    pub appearance: Vec<AppearanceSlotDto>,
    pub places_of_origin: Vec<PlaceOfOriginOptionDto>,
    pub moves: Vec<MoveOptionDto>,
    pub special_possessions: Vec<SpecialPossessionOptionDto>,
    pub mandatory_moves: Vec<String>,
    /// Groups of which at least one move must be selected
    pub either_or_moves: Vec<Vec<String>>,
    pub background_required_moves: Vec<BackgroundMoveRequirementDto>,
    pub mandatory_possessions: Vec<String>,
    pub detail_section: Option<DetailSectionDto>,
    pub extra_choices: Vec<ExtraChoiceDto>,
}

impl CatalogResponseDto {
    pub fn from_catalog(catalog: &ClassCatalog, rules: &ClassRules) -> Self {
        let appearance = rules
            .appearance_labels
            .iter()
            .enumerate()
            .map(|(slot, label)| AppearanceSlotDto {
                field: appearance_field(slot),
                label: label.to_string(),
                options: catalog
                    .appearance_slot(slot)
                    .map(AppearanceOptionDto::from)
                    .collect(),
            })
            .collect();

        Self {
            class: ClassInfoDto::from(catalog.class_kind),
            backgrounds: catalog.backgrounds.iter().map(Into::into).collect(),
            instincts: catalog.instincts.iter().map(Into::into).collect(),
            appearance,
            places_of_origin: catalog.places_of_origin.iter().map(Into::into).collect(),
            moves: catalog.moves.iter().map(Into::into).collect(),
            special_possessions: catalog
                .special_possessions
                .iter()
                .map(Into::into)
                .collect(),
            mandatory_moves: rules.mandatory_moves.iter().map(|m| m.to_string()).collect(),
            either_or_moves: rules
                .either_or_moves
                .iter()
                .map(|group| group.iter().map(|m| m.to_string()).collect())
                .collect(),
            background_required_moves: rules
                .background_required_moves
                .iter()
                .map(|(background, mv)| BackgroundMoveRequirementDto {
                    background: background.to_string(),
                    move_name: mv.to_string(),
                })
                .collect(),
            mandatory_possessions: rules
                .mandatory_possessions
                .iter()
                .map(|p| p.to_string())
                .collect(),
            detail_section: rules.detail_section.map(|section| DetailSectionDto {
                field: section.field.to_string(),
                label: section.label.to_string(),
                questions: section.questions.iter().map(|q| q.to_string()).collect(),
                min_answers: section.min_answers,
            }),
            extra_choices: rules
                .extra_choices
                .iter()
                .map(|choice| ExtraChoiceDto {
                    field: choice.field.to_string(),
                    options: choice.options.iter().map(|o| o.to_string()).collect(),
                })
                .collect(),
        }
    }
}
