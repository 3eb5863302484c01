//! Shared application state

use anyhow::Result;

use crate::application::services::{
    CampaignServiceImpl, CatalogServiceImpl, CharacterServiceImpl, CreationServiceImpl,
    WizardServiceImpl,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::{seed_catalog, SqliteRepository};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    // Application services
    pub campaign_service: CampaignServiceImpl,
    pub catalog_service: CatalogServiceImpl,
    pub creation_service: CreationServiceImpl,
    pub character_service: CharacterServiceImpl,
    pub wizard_service: WizardServiceImpl,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Initialize the SQLite repository and seed the playbook catalog
        let repository = SqliteRepository::new(&config.database_path).await?;
        seed_catalog(&repository).await?;

        // Initialize application services
        let campaign_service = CampaignServiceImpl::new(repository.clone());
        let catalog_service = CatalogServiceImpl::new(repository.clone());
        let creation_service = CreationServiceImpl::new(repository.clone());
        let character_service = CharacterServiceImpl::new(repository.clone());
        let wizard_service = WizardServiceImpl::new(repository.clone());

        Ok(Self {
            config,
            campaign_service,
            catalog_service,
            creation_service,
            character_service,
            wizard_service,
        })
    }
}
