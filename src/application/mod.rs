//! Application layer - Use cases and API boundary types
//!
//! This layer contains:
//! - Services: use case implementations over the repository
//! - DTOs: request/response shapes for the HTTP surface

pub mod dto;
pub mod services;
