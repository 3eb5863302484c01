//! Wizard Service - Application service for post-creation wizard steps
//!
//! After a character is created, some classes route through one more step
//! (tall tales, crew, companion, ...). Each step rewrites part of the
//! class payload. A step that does not apply to the character's class, or
//! to its background for background-routed steps, is rejected as a
//! conflict rather than a validation error.

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::entities::{AnimalCompanion, Character, Crew, TallTale};
use crate::domain::rules::{BLESSED_INITIATE, HERO_IMPETUOUS_YOUTH, RANGER_BEAST_BONDED};
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::persistence::SqliteRepository;

/// Why a wizard step was refused
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    /// The step exists but not for this character
    #[error("{0}")]
    StepNotApplicable(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Wizard service trait defining the application use cases
#[async_trait]
pub trait WizardService: Send + Sync {
    /// Append one of the Fox's tall tales
    async fn add_tall_tale(&self, id: CharacterId, tale: TallTale)
        -> Result<Character, WizardError>;

    /// Set or replace the Marshal's crew
    async fn set_crew(&self, id: CharacterId, crew: Crew) -> Result<Character, WizardError>;

    /// Set or replace the Ranger's animal companion; BEAST-BONDED only
    async fn set_companion(
        &self,
        id: CharacterId,
        companion: AnimalCompanion,
    ) -> Result<Character, WizardError>;

    /// Replace the Lightbearer's chosen invocations
    async fn set_invocations(
        &self,
        id: CharacterId,
        invocations: Vec<String>,
    ) -> Result<Character, WizardError>;

    /// Replace the Seeker's initial arcana
    async fn set_initial_arcana(
        &self,
        id: CharacterId,
        arcana: Vec<String>,
    ) -> Result<Character, WizardError>;

    /// Replace the Blessed's fellow initiates; INITIATE only
    async fn set_initiates(
        &self,
        id: CharacterId,
        initiates: Vec<String>,
    ) -> Result<Character, WizardError>;

    /// Update the Would-Be Hero's background write-up; IMPETUOUS YOUTH
    /// already comes written and skips this step
    async fn set_background_details(
        &self,
        id: CharacterId,
        details: String,
    ) -> Result<Character, WizardError>;
}

/// Default implementation of WizardService using the SQLite repository
pub struct WizardServiceImpl {
    repository: SqliteRepository,
}

impl WizardServiceImpl {
    /// Create a new WizardServiceImpl with the given repository
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }

    async fn load(&self, id: CharacterId) -> Result<Character, WizardError> {
        self.repository
            .characters()
            .get(id)
            .await
            .context("Failed to get character from repository")?
            .ok_or(WizardError::CharacterNotFound(id))
    }

    async fn background_name(&self, character: &Character) -> Result<String, WizardError> {
        let background = self
            .repository
            .characters()
            .background_instance(character.id)
            .await
            .context("Failed to get background instance")?
            .ok_or_else(|| {
                anyhow::anyhow!("Character {} has no background instance", character.id)
            })?;
        Ok(background.background_name)
    }

    /// Steps routed by background only exist for that background
    async fn require_background(
        &self,
        character: &Character,
        required: &str,
    ) -> Result<(), WizardError> {
        let name = self.background_name(character).await?;
        if name != required {
            return Err(WizardError::StepNotApplicable(format!(
                "This step requires the {} background, not {}",
                required, name
            )));
        }
        Ok(())
    }

    async fn save_payload(&self, character: &Character) -> Result<(), WizardError> {
        self.repository
            .characters()
            .update_payload(character)
            .await
            .context("Failed to update character payload")?;
        Ok(())
    }

    fn wrong_class(step: &str, character: &Character) -> WizardError {
        WizardError::StepNotApplicable(format!(
            "{} does not apply to {}",
            step, character.class_kind
        ))
    }
}

#[async_trait]
impl WizardService for WizardServiceImpl {
    #[instrument(skip(self, tale), fields(character_id = %id))]
    async fn add_tall_tale(
        &self,
        id: CharacterId,
        tale: TallTale,
    ) -> Result<Character, WizardError> {
        let mut character = self.load(id).await?;
        if !character.add_tall_tale(tale) {
            return Err(Self::wrong_class("The tall tales step", &character));
        }

        self.save_payload(&character).await?;
        debug!(character_id = %id, "Added tall tale for {}", character.name);
        Ok(character)
    }

    #[instrument(skip(self, crew), fields(character_id = %id))]
    async fn set_crew(&self, id: CharacterId, crew: Crew) -> Result<Character, WizardError> {
        let mut character = self.load(id).await?;
        if !character.set_crew(crew) {
            return Err(Self::wrong_class("The crew step", &character));
        }

        self.save_payload(&character).await?;
        debug!(character_id = %id, "Set crew for {}", character.name);
        Ok(character)
    }

    #[instrument(skip(self, companion), fields(character_id = %id))]
    async fn set_companion(
        &self,
        id: CharacterId,
        companion: AnimalCompanion,
    ) -> Result<Character, WizardError> {
        let mut character = self.load(id).await?;
        self.require_background(&character, RANGER_BEAST_BONDED)
            .await?;
        if !character.set_companion(companion) {
            return Err(Self::wrong_class("The animal companion step", &character));
        }

        self.save_payload(&character).await?;
        debug!(character_id = %id, "Set animal companion for {}", character.name);
        Ok(character)
    }

    #[instrument(skip(self, invocations), fields(character_id = %id))]
    async fn set_invocations(
        &self,
        id: CharacterId,
        invocations: Vec<String>,
    ) -> Result<Character, WizardError> {
        let mut character = self.load(id).await?;
        if !character.set_invocations(invocations) {
            return Err(Self::wrong_class("The invocations step", &character));
        }

        self.save_payload(&character).await?;
        debug!(character_id = %id, "Set invocations for {}", character.name);
        Ok(character)
    }

    #[instrument(skip(self, arcana), fields(character_id = %id))]
    async fn set_initial_arcana(
        &self,
        id: CharacterId,
        arcana: Vec<String>,
    ) -> Result<Character, WizardError> {
        let mut character = self.load(id).await?;
        if !character.set_initial_arcana(arcana) {
            return Err(Self::wrong_class("The arcana step", &character));
        }

        self.save_payload(&character).await?;
        debug!(character_id = %id, "Set initial arcana for {}", character.name);
        Ok(character)
    }

    #[instrument(skip(self, initiates), fields(character_id = %id))]
    async fn set_initiates(
        &self,
        id: CharacterId,
        initiates: Vec<String>,
    ) -> Result<Character, WizardError> {
        let mut character = self.load(id).await?;
        self.require_background(&character, BLESSED_INITIATE).await?;
        if !character.set_initiates(initiates) {
            return Err(Self::wrong_class("The initiates step", &character));
        }

        self.save_payload(&character).await?;
        debug!(character_id = %id, "Set initiates for {}", character.name);
        Ok(character)
    }

    #[instrument(skip(self, details), fields(character_id = %id))]
    async fn set_background_details(
        &self,
        id: CharacterId,
        details: String,
    ) -> Result<Character, WizardError> {
        let mut character = self.load(id).await?;
        if self.background_name(&character).await? == HERO_IMPETUOUS_YOUTH {
            return Err(WizardError::StepNotApplicable(format!(
                "The {} background skips the details step",
                HERO_IMPETUOUS_YOUTH
            )));
        }
        if !character.set_background_details(details) {
            return Err(Self::wrong_class("The background details step", &character));
        }

        self.save_payload(&character).await?;
        debug!(character_id = %id, "Set background details for {}", character.name);
        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::campaign_service::{
        CampaignService, CampaignServiceImpl, CreateCampaignRequest,
    };
    use crate::application::services::creation_service::{CreationService, CreationServiceImpl};
    use crate::domain::entities::ClassPayload;
    use crate::domain::rules::{class_rules, CreationChoices};
    use crate::domain::value_objects::{CampaignId, ClassKind, StatAssignment};
    use crate::infrastructure::persistence::{seed_catalog, SqliteRepository};

    async fn seeded_repository() -> SqliteRepository {
        let repository = SqliteRepository::in_memory().await.unwrap();
        seed_catalog(&repository).await.unwrap();
        repository
    }

    async fn test_campaign(repository: &SqliteRepository) -> CampaignId {
        let service = CampaignServiceImpl::new(repository.clone());
        service
            .create_campaign(CreateCampaignRequest {
                name: "Wizard Tests".to_string(),
                game_master: "gm".to_string(),
                description: None,
            })
            .await
            .unwrap()
            .id
    }

    fn legal_stats(class: ClassKind) -> StatAssignment {
        if class == ClassKind::WouldBeHero {
            StatAssignment {
                strength: 1,
                dexterity: 0,
                intelligence: 0,
                wisdom: 0,
                constitution: 0,
                charisma: -1,
            }
        } else {
            StatAssignment {
                strength: 2,
                dexterity: 1,
                intelligence: 1,
                wisdom: 0,
                constitution: 0,
                charisma: -1,
            }
        }
    }

    /// Create a character of the given class, picking catalog entries by name
    async fn create_character(
        repository: &SqliteRepository,
        class: ClassKind,
        background: &str,
        moves: &[&str],
        possessions: &[&str],
        detail_answers: Vec<String>,
    ) -> CharacterId {
        let campaign_id = test_campaign(repository).await;
        let catalog = repository
            .catalog()
            .class_catalog(class_rules(class))
            .await
            .unwrap();

        let choices = CreationChoices {
            name: "Test Character".to_string(),
            player: "casey".to_string(),
            stats: legal_stats(class),
            background_id: Some(
                catalog
                    .backgrounds
                    .iter()
                    .find(|b| b.name == background)
                    .expect("background should be seeded")
                    .id,
            ),
            instinct_id: Some(catalog.instincts[0].id),
            appearance_ids: std::array::from_fn(|slot| {
                catalog.appearance_slot(slot).next().map(|option| option.id)
            }),
            place_of_origin_id: Some(catalog.places_of_origin[0].id),
            move_ids: moves
                .iter()
                .map(|name| {
                    catalog
                        .moves
                        .iter()
                        .find(|m| m.name == *name)
                        .expect("move should be seeded")
                        .id
                })
                .collect(),
            special_possession_ids: possessions
                .iter()
                .map(|name| {
                    catalog
                        .special_possessions
                        .iter()
                        .find(|p| p.name == *name)
                        .expect("possession should be seeded")
                        .id
                })
                .collect(),
            detail_answers,
            ..CreationChoices::default()
        };

        let outcome = CreationServiceImpl::new(repository.clone())
            .create_character(campaign_id, class, choices)
            .await
            .unwrap();
        outcome.sheet.character.id
    }

    fn tale() -> TallTale {
        TallTale {
            theme: "That time when I stole the magistrate's seal".to_string(),
            details: "In and out of Marshedge before anyone woke".to_string(),
            results: "The village still blames a Hillfolk trader".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_tall_tale_persists_to_payload() {
        let repository = seeded_repository().await;
        let id = create_character(&repository, ClassKind::Fox, "THE NATURAL", &["AMBUSH"], &[], vec![])
            .await;
        let service = WizardServiceImpl::new(repository.clone());

        service.add_tall_tale(id, tale()).await.unwrap();
        service.add_tall_tale(id, tale()).await.unwrap();

        let stored = repository.characters().get(id).await.unwrap().unwrap();
        match stored.payload {
            ClassPayload::Fox { tall_tales } => assert_eq!(tall_tales.len(), 2),
            other => panic!("expected Fox payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_step_for_another_class_is_a_conflict() {
        let repository = seeded_repository().await;
        let id = create_character(&repository, ClassKind::Fox, "THE NATURAL", &["AMBUSH"], &[], vec![])
            .await;
        let service = WizardServiceImpl::new(repository.clone());

        let result = service
            .set_crew(
                id,
                Crew {
                    name: "The Gray Wolves".to_string(),
                    instinct: "To prove themselves".to_string(),
                    cost: "Discipline".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(WizardError::StepNotApplicable(_))));
    }

    #[tokio::test]
    async fn test_companion_requires_beast_bonded() {
        let repository = seeded_repository().await;
        let id = create_character(
            &repository,
            ClassKind::Ranger,
            "FAR WANDERER",
            &["EXPERT TRACKER"],
            &["Compound bow"],
            vec![
                "I saw it drag a grown aurochs into the dark".to_string(),
                "It left a trail of frost in high summer".to_string(),
                "No arrow I loosed ever found it".to_string(),
            ],
        )
        .await;
        let service = WizardServiceImpl::new(repository.clone());

        let result = service
            .set_companion(
                id,
                AnimalCompanion {
                    name: "Brock".to_string(),
                    species: "badger".to_string(),
                    traits: vec!["ferocious".to_string()],
                },
            )
            .await;

        match result {
            Err(WizardError::StepNotApplicable(message)) => {
                assert!(message.contains("BEAST-BONDED"));
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_impetuous_youth_skips_background_details() {
        let repository = seeded_repository().await;
        let service = WizardServiceImpl::new(repository.clone());

        let destined = create_character(
            &repository,
            ClassKind::WouldBeHero,
            "DESTINED",
            &["NEVER GONNA KEEP ME DOWN"],
            &[],
            vec![],
        )
        .await;
        let updated = service
            .set_background_details(destined, "Raised on tales of the Bright Sisters".to_string())
            .await
            .unwrap();
        match updated.payload {
            ClassPayload::WouldBeHero { background_details } => {
                assert_eq!(background_details, "Raised on tales of the Bright Sisters");
            }
            other => panic!("expected Would-Be Hero payload, got {other:?}"),
        }

        let impetuous = create_character(
            &repository,
            ClassKind::WouldBeHero,
            "IMPETUOUS YOUTH",
            &["NEVER GONNA KEEP ME DOWN"],
            &[],
            vec![],
        )
        .await;
        let result = service
            .set_background_details(impetuous, "should be refused".to_string())
            .await;
        assert!(matches!(result, Err(WizardError::StepNotApplicable(_))));
    }

    #[tokio::test]
    async fn test_unknown_character_is_not_found() {
        let repository = seeded_repository().await;
        let service = WizardServiceImpl::new(repository);

        let result = service.add_tall_tale(CharacterId::new(), tale()).await;

        assert!(matches!(result, Err(WizardError::CharacterNotFound(_))));
    }
}
