//! Character API routes
//!
//! Creation takes the whole submission in one POST and answers with either
//! the persisted sheet plus the next wizard step, or the full validation
//! report. Reads return the sheet with every instance resolved for display.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::{
    CharacterResponseDto, CharacterSheetResponseDto, CreateCharacterRequestDto,
    CreationResponseDto,
};
use crate::application::services::{CharacterService, CreationError, CreationService};
use crate::domain::value_objects::{CampaignId, CharacterId, ClassKind};
use crate::infrastructure::state::AppState;

/// Run a full creation submission for one class
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    Path((campaign_id, class)): Path<(String, String)>,
    Json(req): Json<CreateCharacterRequestDto>,
) -> Result<(StatusCode, Json<CreationResponseDto>), Response> {
    let campaign_uuid = Uuid::parse_str(&campaign_id).map_err(|_| {
        (StatusCode::BAD_REQUEST, "Invalid campaign ID".to_string()).into_response()
    })?;
    let class: ClassKind = class
        .parse()
        .map_err(|_| (StatusCode::NOT_FOUND, "Unknown class".to_string()).into_response())?;

    let outcome = state
        .creation_service
        .create_character(
            CampaignId::from_uuid(campaign_uuid),
            class,
            req.into_choices(),
        )
        .await
        .map_err(creation_error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(CreationResponseDto {
            character: CharacterSheetResponseDto::from(outcome.sheet),
            next_step: outcome.next_step.slug().to_string(),
        }),
    ))
}

/// Map a creation failure to its API status. A rejected submission carries
/// the whole error report as JSON so the form can annotate every field.
fn creation_error_response(error: CreationError) -> Response {
    match error {
        CreationError::Invalid(errors) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
        }
        CreationError::CampaignNotFound(_) => {
            (StatusCode::NOT_FOUND, "Campaign not found".to_string()).into_response()
        }
        CreationError::Seed(e) => {
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        CreationError::Storage(e) => {
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// List the characters in a campaign
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<String>,
) -> Result<Json<Vec<CharacterResponseDto>>, (StatusCode, String)> {
    let uuid = Uuid::parse_str(&campaign_id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid campaign ID".to_string()))?;

    let characters = state
        .character_service
        .list_characters(CampaignId::from_uuid(uuid))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(
        characters
            .into_iter()
            .map(CharacterResponseDto::from)
            .collect(),
    ))
}

/// Get a character sheet with every instance resolved
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CharacterSheetResponseDto>, (StatusCode, String)> {
    let uuid = Uuid::parse_str(&id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid character ID".to_string()))?;

    let sheet = state
        .character_service
        .get_character(CharacterId::from_uuid(uuid))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Character not found".to_string()))?;

    Ok(Json(CharacterSheetResponseDto::from(sheet)))
}

/// Delete a character and everything it owns
pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let uuid = Uuid::parse_str(&id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid character ID".to_string()))?;

    let deleted = state
        .character_service
        .delete_character(CharacterId::from_uuid(uuid))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Character not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
