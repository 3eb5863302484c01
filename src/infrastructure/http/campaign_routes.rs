//! Campaign API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::{
    CampaignDetailResponseDto, CampaignResponseDto, CreateCampaignRequestDto,
    JoinCampaignRequestDto,
};
use crate::application::services::{CampaignService, CreateCampaignRequest};
use crate::domain::value_objects::CampaignId;
use crate::infrastructure::state::AppState;

/// Create a new campaign with a fresh invite code
pub async fn create_campaign(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCampaignRequestDto>,
) -> Result<(StatusCode, Json<CampaignResponseDto>), (StatusCode, String)> {
    let campaign = state
        .campaign_service
        .create_campaign(CreateCampaignRequest {
            name: req.name,
            game_master: req.game_master,
            description: req.description,
        })
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(CampaignResponseDto::from(campaign)),
    ))
}

/// List all campaigns
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CampaignResponseDto>>, (StatusCode, String)> {
    let campaigns = state
        .campaign_service
        .list_campaigns()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(
        campaigns
            .into_iter()
            .map(CampaignResponseDto::from)
            .collect(),
    ))
}

/// Get a campaign together with its member roster
pub async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CampaignDetailResponseDto>, (StatusCode, String)> {
    let uuid = Uuid::parse_str(&id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid campaign ID".to_string()))?;
    let campaign_id = CampaignId::from_uuid(uuid);

    let campaign = state
        .campaign_service
        .get_campaign(campaign_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Campaign not found".to_string()))?;

    let members = state
        .campaign_service
        .list_members(campaign_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(CampaignDetailResponseDto {
        campaign: CampaignResponseDto::from(campaign),
        members: members.into_iter().map(Into::into).collect(),
    }))
}

/// Enroll a player in a campaign by invite code
pub async fn join_campaign(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JoinCampaignRequestDto>,
) -> Result<Json<CampaignResponseDto>, (StatusCode, String)> {
    let campaign = state
        .campaign_service
        .join_campaign(&req.invite_code, &req.player)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                "Invite code matched no campaign".to_string(),
            )
        })?;

    Ok(Json(CampaignResponseDto::from(campaign)))
}
