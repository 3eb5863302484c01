//! Creation Service - Application service for the character creation flow
//!
//! One call takes a raw submission through validation, materialization, and
//! persistence. Validation reports every problem at once; only a clean
//! submission reaches the repository, and the repository writes the whole
//! character in a single transaction.

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::domain::entities::CharacterSheet;
use crate::domain::rules::{
    class_rules, materialize, next_step, validate, CreationChoices, MaterializedCharacter,
    MissingTemplate, ValidationErrors, WizardStep,
};
use crate::domain::value_objects::{CampaignId, ClassKind};
use crate::infrastructure::persistence::SqliteRepository;

/// Why a creation attempt failed, split by who has to act on it
#[derive(Debug, Error)]
pub enum CreationError {
    /// The submission broke creation rules; the report carries every problem
    /// found, not just the first
    #[error("validation failed: {0}")]
    Invalid(ValidationErrors),
    #[error("Campaign not found: {0}")]
    CampaignNotFound(CampaignId),
    /// The seeded catalog is missing a template the class rules reference
    #[error(transparent)]
    Seed(#[from] MissingTemplate),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// A successful creation: the persisted sheet plus the follow-up wizard step
#[derive(Debug)]
pub struct CreationOutcome {
    pub sheet: CharacterSheet,
    pub next_step: WizardStep,
}

/// Creation service trait defining the application use cases
#[async_trait]
pub trait CreationService: Send + Sync {
    /// Validate a submission and, when it passes, persist the character with
    /// everything it owns
    async fn create_character(
        &self,
        campaign_id: CampaignId,
        class: ClassKind,
        choices: CreationChoices,
    ) -> Result<CreationOutcome, CreationError>;
}

/// Default implementation of CreationService using the SQLite repository
pub struct CreationServiceImpl {
    repository: SqliteRepository,
}

impl CreationServiceImpl {
    /// Create a new CreationServiceImpl with the given repository
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CreationService for CreationServiceImpl {
    #[instrument(
        skip(self, choices),
        fields(campaign_id = %campaign_id, class = %class.slug(), name = %choices.name)
    )]
    async fn create_character(
        &self,
        campaign_id: CampaignId,
        class: ClassKind,
        choices: CreationChoices,
    ) -> Result<CreationOutcome, CreationError> {
        let campaign = self
            .repository
            .campaigns()
            .get(campaign_id)
            .await
            .context("Failed to get campaign from repository")?;
        if campaign.is_none() {
            return Err(CreationError::CampaignNotFound(campaign_id));
        }

        let rules = class_rules(class);
        let catalog = self
            .repository
            .catalog()
            .class_catalog(rules)
            .await
            .context("Failed to load class catalog from repository")?;

        let valid = validate(rules, &catalog, &choices).map_err(CreationError::Invalid)?;

        // Automatic grants are hidden from the catalog, so materialization
        // works from the full template rows
        let all_moves = self
            .repository
            .catalog()
            .moves(class)
            .await
            .context("Failed to load move templates")?;
        let all_possessions = self
            .repository
            .catalog()
            .special_possessions(class)
            .await
            .context("Failed to load special possession templates")?;

        let materialized = materialize(campaign_id, rules, &valid, &all_moves, &all_possessions)
            .map_err(|e| {
                error!("Seeded catalog is missing a template: {e}");
                CreationError::Seed(e)
            })?;

        self.repository
            .characters()
            .create(&materialized)
            .await
            .context("Failed to persist character")?;

        let step = next_step(class, &valid.background.name);
        info!(
            character_id = %materialized.character.id,
            background = %valid.background.name,
            moves = materialized.moves.len(),
            next_step = %step,
            "Created character: {}",
            materialized.character.name
        );

        let MaterializedCharacter {
            character,
            background,
            moves,
            possessions,
        } = materialized;
        let sheet = CharacterSheet {
            character,
            background,
            moves,
            possessions,
            instinct: valid.instinct.name,
            appearance: valid.appearance.map(|option| option.text),
            place_of_origin: valid.place_of_origin.name,
        };

        Ok(CreationOutcome {
            sheet,
            next_step: step,
        })
    }
}
