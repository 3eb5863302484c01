//! Value objects - Immutable objects defined by their attributes

mod class_kind;
mod ids;
mod stats;

pub use class_kind::ClassKind;
pub use ids::*;
pub use stats::{
    format_modifier, StatArray, StatAssignment, StatKey, STAT_MAX, STAT_MIN,
};
