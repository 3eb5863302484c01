//! SQLite persistence adapters
//!
//! This module implements the repository pattern for SQLite, providing
//! the campaign, playbook catalog, and character stores plus the startup
//! seed for the Stonetop playbooks.

mod campaign_repository;
mod catalog_repository;
mod character_repository;
mod connection;
mod seed;

pub use campaign_repository::CampaignRepository;
pub use catalog_repository::CatalogRepository;
pub use character_repository::CharacterRepository;
pub use seed::seed_catalog;

use anyhow::Result;
use sqlx::SqlitePool;

/// Combined repository providing access to all domain repositories
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_path: &str) -> Result<Self> {
        let pool = connection::connect(database_path).await?;
        connection::initialize_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// A throwaway private database, for tests
    pub async fn in_memory() -> Result<Self> {
        let pool = connection::connect_in_memory().await?;
        connection::initialize_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub fn campaigns(&self) -> CampaignRepository {
        CampaignRepository::new(self.pool.clone())
    }

    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.pool.clone())
    }

    pub fn characters(&self) -> CharacterRepository {
        CharacterRepository::new(self.pool.clone())
    }
}
