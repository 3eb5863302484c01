//! Catalog Service - Application service for class catalog lookup
//!
//! Serves the candidate lists a creation form presents for one class. The
//! raw template rows come from the seeded catalog tables; assembly applies
//! the class rules so hidden and level-gated templates never reach a client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::domain::rules::{class_rules, ClassCatalog};
use crate::domain::value_objects::ClassKind;
use crate::infrastructure::persistence::SqliteRepository;

/// Catalog service trait defining the application use cases
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// The creation catalog for one class
    async fn class_catalog(&self, class: ClassKind) -> Result<ClassCatalog>;
}

/// Default implementation of CatalogService using the SQLite repository
pub struct CatalogServiceImpl {
    repository: SqliteRepository,
}

impl CatalogServiceImpl {
    /// Create a new CatalogServiceImpl with the given repository
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    #[instrument(skip(self), fields(class = %class.slug()))]
    async fn class_catalog(&self, class: ClassKind) -> Result<ClassCatalog> {
        debug!("Assembling class catalog");

        let catalog = self
            .repository
            .catalog()
            .class_catalog(class_rules(class))
            .await
            .context("Failed to load class catalog from repository")?;

        Ok(catalog)
    }
}
