//! Application services - Use case implementations
//!
//! Each service accepts the repository and exposes one slice of the API's
//! use cases, returning domain entities for the HTTP layer to map into DTOs.

pub mod campaign_service;
pub mod catalog_service;
pub mod character_service;
pub mod creation_service;
pub mod wizard_service;

// Re-export campaign service types
pub use campaign_service::{CampaignService, CampaignServiceImpl, CreateCampaignRequest};

// Re-export catalog service types
pub use catalog_service::{CatalogService, CatalogServiceImpl};

// Re-export character service types
pub use character_service::{CharacterService, CharacterServiceImpl};

// Re-export creation service types
pub use creation_service::{
    CreationError, CreationOutcome, CreationService, CreationServiceImpl,
};

// Re-export wizard service types
pub use wizard_service::{WizardError, WizardService, WizardServiceImpl};
