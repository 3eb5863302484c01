//! Campaign DTOs for API requests and responses

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Campaign, CampaignMember};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request to create a new campaign
#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequestDto {
    pub name: String,
    pub game_master: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to join a campaign by invite code
#[derive(Debug, Deserialize)]
pub struct JoinCampaignRequestDto {
    pub invite_code: String,
    pub player: String,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Campaign data returned by the API
#[derive(Debug, Serialize)]
pub struct CampaignResponseDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub game_master: String,
    pub invite_code: String,
    pub created_at: String,
}

impl From<Campaign> for CampaignResponseDto {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: campaign.id.to_string(),
            name: campaign.name,
            description: campaign.description,
            game_master: campaign.game_master,
            invite_code: campaign.invite_code,
            created_at: campaign.created_at.to_rfc3339(),
        }
    }
}

/// A player enrolled in a campaign
#[derive(Debug, Serialize)]
pub struct CampaignMemberResponseDto {
    pub player: String,
    pub joined_at: String,
}

impl From<CampaignMember> for CampaignMemberResponseDto {
    fn from(member: CampaignMember) -> Self {
        Self {
            player: member.player,
            joined_at: member.joined_at.to_rfc3339(),
        }
    }
}

/// Campaign together with its member roster
#[derive(Debug, Serialize)]
pub struct CampaignDetailResponseDto {
    pub campaign: CampaignResponseDto,
    pub members: Vec<CampaignMemberResponseDto>,
}
