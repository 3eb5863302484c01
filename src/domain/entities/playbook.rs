//! Playbook template entities - Seeded reference data, read-only during play
//!
//! Backgrounds, instincts, appearance options, places of origin, moves, and
//! special possessions are all scoped to a single class. Characters never
//! mutate these rows; creation copies them into per-character instances.

use crate::domain::value_objects::{
    AppearanceOptionId, BackgroundId, ClassKind, InstinctId, MoveId, PlaceOfOriginId,
    SpecialPossessionId,
};

/// Number of appearance slots every class fills at creation
pub const APPEARANCE_SLOTS: usize = 4;

/// A narrative origin option for one class
#[derive(Debug, Clone)]
pub struct Background {
    pub id: BackgroundId,
    pub class_kind: ClassKind,
    pub name: String,
    pub description: String,
    /// When set, background instances track expendable charges
    pub total_charges: Option<i32>,
}

impl Background {
    pub fn new(class_kind: ClassKind, name: impl Into<String>) -> Self {
        Self {
            id: BackgroundId::new(),
            class_kind,
            name: name.into(),
            description: String::new(),
            total_charges: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_charges(mut self, total: i32) -> Self {
        self.total_charges = Some(total);
        self
    }
}

/// A class-scoped instinct option
#[derive(Debug, Clone)]
pub struct Instinct {
    pub id: InstinctId,
    pub class_kind: ClassKind,
    pub name: String,
    pub description: String,
}

impl Instinct {
    pub fn new(class_kind: ClassKind, name: impl Into<String>) -> Self {
        Self {
            id: InstinctId::new(),
            class_kind,
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One option for one of the four appearance slots
#[derive(Debug, Clone)]
pub struct AppearanceOption {
    pub id: AppearanceOptionId,
    pub class_kind: ClassKind,
    /// Slot index, 0-based, < [`APPEARANCE_SLOTS`]
    pub slot: usize,
    pub text: String,
}

impl AppearanceOption {
    pub fn new(class_kind: ClassKind, slot: usize, text: impl Into<String>) -> Self {
        Self {
            id: AppearanceOptionId::new(),
            class_kind,
            slot,
            text: text.into(),
        }
    }
}

/// Where a character of this class may hail from
#[derive(Debug, Clone)]
pub struct PlaceOfOrigin {
    pub id: PlaceOfOriginId,
    pub class_kind: ClassKind,
    pub name: String,
    pub description: String,
}

impl PlaceOfOrigin {
    pub fn new(class_kind: ClassKind, name: impl Into<String>) -> Self {
        Self {
            id: PlaceOfOriginId::new(),
            class_kind,
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Gate a move declares before it can be taken
#[derive(Debug, Clone, Default)]
pub struct MoveRequirement {
    /// Another move of the same class that must already be selected
    pub required_move: Option<String>,
    /// Minimum character level; moves with a level gate are never
    /// selectable at creation
    pub min_level: Option<i32>,
}

impl MoveRequirement {
    pub fn is_empty(&self) -> bool {
        self.required_move.is_none() && self.min_level.is_none()
    }
}

/// A named ability template for one class
#[derive(Debug, Clone)]
pub struct MoveTemplate {
    pub id: MoveId,
    pub class_kind: ClassKind,
    pub name: String,
    pub description: String,
    pub requirement: MoveRequirement,
    /// When set, instances track expendable uses
    pub total_uses: Option<i32>,
    /// When set, instances track charges
    pub total_charges: Option<i32>,
}

impl MoveTemplate {
    pub fn new(class_kind: ClassKind, name: impl Into<String>) -> Self {
        Self {
            id: MoveId::new(),
            class_kind,
            name: name.into(),
            description: String::new(),
            requirement: MoveRequirement::default(),
            total_uses: None,
            total_charges: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn requires_move(mut self, name: impl Into<String>) -> Self {
        self.requirement.required_move = Some(name.into());
        self
    }

    pub fn with_min_level(mut self, level: i32) -> Self {
        self.requirement.min_level = Some(level);
        self
    }

    pub fn with_uses(mut self, total: i32) -> Self {
        self.total_uses = Some(total);
        self
    }

    pub fn with_charges(mut self, total: i32) -> Self {
        self.total_charges = Some(total);
        self
    }

    /// Moves with a level gate only unlock on advancement
    pub fn selectable_at_creation(&self) -> bool {
        self.requirement.min_level.is_none()
    }
}

/// A starting-equipment template for one class
#[derive(Debug, Clone)]
pub struct SpecialPossession {
    pub id: SpecialPossessionId,
    pub class_kind: ClassKind,
    pub name: String,
    pub description: String,
    pub total_uses: Option<i32>,
    pub total_charges: Option<i32>,
}

impl SpecialPossession {
    pub fn new(class_kind: ClassKind, name: impl Into<String>) -> Self {
        Self {
            id: SpecialPossessionId::new(),
            class_kind,
            name: name.into(),
            description: String::new(),
            total_uses: None,
            total_charges: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_uses(mut self, total: i32) -> Self {
        self.total_uses = Some(total);
        self
    }

    pub fn with_charges(mut self, total: i32) -> Self {
        self.total_charges = Some(total);
        self
    }
}
