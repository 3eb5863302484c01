//! Wizard step API routes
//!
//! Follow-up steps after creation. Each handler applies one rewrite to the
//! character's class payload and returns the updated character. A step that
//! does not apply to the character's class or background is a conflict, not
//! a validation failure.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::{
    ArcanaRequestDto, BackgroundDetailsRequestDto, CharacterResponseDto, CompanionRequestDto,
    CrewRequestDto, InitiatesRequestDto, InvocationsRequestDto, TallTaleRequestDto,
};
use crate::application::services::{WizardError, WizardService};
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::state::AppState;

fn parse_character_id(id: &str) -> Result<CharacterId, (StatusCode, String)> {
    Uuid::parse_str(id)
        .map(CharacterId::from_uuid)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid character ID".to_string()))
}

fn wizard_error_response(error: WizardError) -> (StatusCode, String) {
    match error {
        WizardError::CharacterNotFound(_) => {
            (StatusCode::NOT_FOUND, "Character not found".to_string())
        }
        WizardError::StepNotApplicable(message) => (StatusCode::CONFLICT, message),
        WizardError::Storage(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// Append one of the Fox's tall tales
pub async fn add_tall_tale(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<TallTaleRequestDto>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;

    let character = state
        .wizard_service
        .add_tall_tale(id, req.into())
        .await
        .map_err(wizard_error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Set or replace the Marshal's crew
pub async fn set_crew(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CrewRequestDto>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;

    let character = state
        .wizard_service
        .set_crew(id, req.into())
        .await
        .map_err(wizard_error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Set or replace the Ranger's animal companion
pub async fn set_companion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CompanionRequestDto>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;

    let character = state
        .wizard_service
        .set_companion(id, req.into())
        .await
        .map_err(wizard_error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Replace the Seeker's initial arcana
pub async fn set_initial_arcana(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ArcanaRequestDto>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;

    let character = state
        .wizard_service
        .set_initial_arcana(id, req.arcana)
        .await
        .map_err(wizard_error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Replace the Lightbearer's chosen invocations
pub async fn set_invocations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<InvocationsRequestDto>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;

    let character = state
        .wizard_service
        .set_invocations(id, req.invocations)
        .await
        .map_err(wizard_error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Replace the Blessed's fellow initiates
pub async fn set_initiates(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<InitiatesRequestDto>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;

    let character = state
        .wizard_service
        .set_initiates(id, req.initiates)
        .await
        .map_err(wizard_error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Update the Would-Be Hero's background write-up
pub async fn set_background_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<BackgroundDetailsRequestDto>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;

    let character = state
        .wizard_service
        .set_background_details(id, req.details)
        .await
        .map_err(wizard_error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}
