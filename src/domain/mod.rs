//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Campaign, Character, playbook templates
//! - Value Objects: Class kinds, stats, typed ids
//! - Rules: Per-class creation rules, validation, wizard routing

pub mod entities;
pub mod rules;
pub mod value_objects;
