//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so the HTTP surface can serialize and
//! deserialize without leaking transport shapes into the domain model.

pub mod campaign;
pub mod catalog;
pub mod character;

pub use campaign::*;
pub use catalog::*;
pub use character::*;
