//! Character Service - Application service for character management
//!
//! Read and delete operations for characters that already exist. Creation
//! has its own service because it carries the whole validation and
//! materialization flow.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::domain::entities::{Character, CharacterSheet};
use crate::domain::value_objects::{CampaignId, CharacterId};
use crate::infrastructure::persistence::SqliteRepository;

/// Character service trait defining the application use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// Load a full character sheet
    async fn get_character(&self, id: CharacterId) -> Result<Option<CharacterSheet>>;

    /// List the characters in a campaign
    async fn list_characters(&self, campaign_id: CampaignId) -> Result<Vec<Character>>;

    /// Delete a character and everything it owns; false when nothing matched
    async fn delete_character(&self, id: CharacterId) -> Result<bool>;
}

/// Default implementation of CharacterService using the SQLite repository
pub struct CharacterServiceImpl {
    repository: SqliteRepository,
}

impl CharacterServiceImpl {
    /// Create a new CharacterServiceImpl with the given repository
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self))]
    async fn get_character(&self, id: CharacterId) -> Result<Option<CharacterSheet>> {
        debug!(character_id = %id, "Fetching character sheet");
        self.repository
            .characters()
            .sheet(id)
            .await
            .context("Failed to get character sheet from repository")
    }

    #[instrument(skip(self))]
    async fn list_characters(&self, campaign_id: CampaignId) -> Result<Vec<Character>> {
        debug!(campaign_id = %campaign_id, "Listing characters in campaign");
        self.repository
            .characters()
            .list(campaign_id)
            .await
            .context("Failed to list characters from repository")
    }

    #[instrument(skip(self))]
    async fn delete_character(&self, id: CharacterId) -> Result<bool> {
        let deleted = self
            .repository
            .characters()
            .delete(id)
            .await
            .context("Failed to delete character from repository")?;

        if deleted {
            info!(character_id = %id, "Deleted character and its instance records");
        } else {
            debug!(character_id = %id, "Delete matched no character");
        }
        Ok(deleted)
    }
}
