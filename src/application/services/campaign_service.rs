//! Campaign Service - Application service for campaign management
//!
//! Campaigns group characters under one game master. Players enroll with the
//! campaign's invite code rather than by id, so the code is the only part of
//! a campaign a GM has to share.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::domain::entities::{Campaign, CampaignMember};
use crate::domain::value_objects::CampaignId;
use crate::infrastructure::persistence::SqliteRepository;

/// Request to create a new campaign
#[derive(Debug, Clone)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub game_master: String,
    pub description: Option<String>,
}

/// Campaign service trait defining the application use cases
#[async_trait]
pub trait CampaignService: Send + Sync {
    /// Create a new campaign with a fresh invite code
    async fn create_campaign(&self, request: CreateCampaignRequest) -> Result<Campaign>;

    /// Get a campaign by ID
    async fn get_campaign(&self, id: CampaignId) -> Result<Option<Campaign>>;

    /// List all campaigns
    async fn list_campaigns(&self) -> Result<Vec<Campaign>>;

    /// Enroll a player by invite code; None when no campaign matches the code.
    /// Joining a campaign the player already belongs to succeeds unchanged.
    async fn join_campaign(&self, invite_code: &str, player: &str) -> Result<Option<Campaign>>;

    /// List the players enrolled in a campaign
    async fn list_members(&self, id: CampaignId) -> Result<Vec<CampaignMember>>;
}

/// Default implementation of CampaignService using the SQLite repository
pub struct CampaignServiceImpl {
    repository: SqliteRepository,
}

impl CampaignServiceImpl {
    /// Create a new CampaignServiceImpl with the given repository
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }

    /// Validate a campaign creation request
    fn validate_create_request(request: &CreateCampaignRequest) -> Result<()> {
        if request.name.trim().is_empty() {
            anyhow::bail!("Campaign name cannot be empty");
        }
        if request.name.len() > 255 {
            anyhow::bail!("Campaign name cannot exceed 255 characters");
        }
        if request.game_master.trim().is_empty() {
            anyhow::bail!("Game master name cannot be empty");
        }
        Ok(())
    }
}

#[async_trait]
impl CampaignService for CampaignServiceImpl {
    #[instrument(skip(self), fields(name = %request.name))]
    async fn create_campaign(&self, request: CreateCampaignRequest) -> Result<Campaign> {
        Self::validate_create_request(&request)?;

        let mut campaign = Campaign::new(&request.name, &request.game_master);
        if let Some(description) = request.description {
            campaign = campaign.with_description(description);
        }

        self.repository
            .campaigns()
            .create(&campaign)
            .await
            .context("Failed to create campaign in repository")?;

        info!(
            campaign_id = %campaign.id,
            invite_code = %campaign.invite_code,
            "Created campaign: {}",
            campaign.name
        );
        Ok(campaign)
    }

    #[instrument(skip(self))]
    async fn get_campaign(&self, id: CampaignId) -> Result<Option<Campaign>> {
        debug!(campaign_id = %id, "Fetching campaign");
        self.repository
            .campaigns()
            .get(id)
            .await
            .context("Failed to get campaign from repository")
    }

    #[instrument(skip(self))]
    async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        self.repository
            .campaigns()
            .list()
            .await
            .context("Failed to list campaigns from repository")
    }

    #[instrument(skip(self), fields(player = %player))]
    async fn join_campaign(&self, invite_code: &str, player: &str) -> Result<Option<Campaign>> {
        if player.trim().is_empty() {
            anyhow::bail!("Player name cannot be empty");
        }

        // Codes are stored uppercase; accept whatever casing the player typed
        let code = invite_code.trim().to_uppercase();
        let campaign = match self
            .repository
            .campaigns()
            .get_by_invite_code(&code)
            .await
            .context("Failed to look up invite code")?
        {
            Some(campaign) => campaign,
            None => {
                debug!(invite_code = %code, "Invite code matched no campaign");
                return Ok(None);
            }
        };

        let member = CampaignMember::new(campaign.id, player.trim());
        self.repository
            .campaigns()
            .add_member(&member)
            .await
            .context("Failed to enroll player in campaign")?;

        info!(
            campaign_id = %campaign.id,
            player = %member.player,
            "Player joined campaign: {}",
            campaign.name
        );
        Ok(Some(campaign))
    }

    #[instrument(skip(self))]
    async fn list_members(&self, id: CampaignId) -> Result<Vec<CampaignMember>> {
        debug!(campaign_id = %id, "Listing campaign members");
        self.repository
            .campaigns()
            .list_members(id)
            .await
            .context("Failed to list campaign members from repository")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_campaign_request_validation() {
        // Empty name should fail
        let request = CreateCampaignRequest {
            name: "".to_string(),
            game_master: "Rhianna".to_string(),
            description: None,
        };
        assert!(CampaignServiceImpl::validate_create_request(&request).is_err());

        // Empty game master should fail
        let request = CreateCampaignRequest {
            name: "Stonetop Rises".to_string(),
            game_master: "  ".to_string(),
            description: None,
        };
        assert!(CampaignServiceImpl::validate_create_request(&request).is_err());

        // Valid request should pass
        let request = CreateCampaignRequest {
            name: "Stonetop Rises".to_string(),
            game_master: "Rhianna".to_string(),
            description: Some("A year in the life of the village".to_string()),
        };
        assert!(CampaignServiceImpl::validate_create_request(&request).is_ok());
    }
}
