//! The character-creation rules engine
//!
//! Pure logic, no I/O: the per-class rules table, catalog assembly,
//! submission validation, instance materialization, and wizard routing.

mod catalog;
mod class_rules;
mod materialize;
mod validation;
mod wizard;

pub use catalog::ClassCatalog;
pub use class_rules::{
    class_rules, ChoiceField, ClassRules, DetailSection, HERO_STAT_ARRAY, STANDARD_STAT_ARRAY,
};
pub use materialize::{
    materialize, verify_rules_coverage, MaterializedCharacter, MissingTemplate, TemplateKind,
};
pub use validation::{
    appearance_field, validate, CreationChoices, ValidatedCreation, ValidationErrors,
    DUPLICATE_CHOICE, INVALID_CHOICE, REQUIRED_FIELD,
};
pub use wizard::{
    next_step, WizardStep, BLESSED_INITIATE, HERO_IMPETUOUS_YOUTH, RANGER_BEAST_BONDED,
};
