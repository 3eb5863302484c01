//! Class listing and catalog API routes
//!
//! The catalog endpoint returns everything a creation form needs for one
//! class: candidate lists straight from the seeded templates plus the rule
//! hints (mandatory moves, detail questions, extra choices) that steer the
//! player through the form.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{CatalogResponseDto, ClassInfoDto};
use crate::application::services::CatalogService;
use crate::domain::rules::class_rules;
use crate::domain::value_objects::ClassKind;
use crate::infrastructure::state::AppState;

/// List the nine playable classes
pub async fn list_classes() -> Json<Vec<ClassInfoDto>> {
    Json(
        ClassKind::ALL
            .iter()
            .copied()
            .map(ClassInfoDto::from)
            .collect(),
    )
}

/// Get the creation catalog for one class
pub async fn get_class_catalog(
    State(state): State<Arc<AppState>>,
    Path(class): Path<String>,
) -> Result<Json<CatalogResponseDto>, (StatusCode, String)> {
    let class: ClassKind = class
        .parse()
        .map_err(|_| (StatusCode::NOT_FOUND, "Unknown class".to_string()))?;

    let catalog = state
        .catalog_service
        .class_catalog(class)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(CatalogResponseDto::from_catalog(
        &catalog,
        class_rules(class),
    )))
}
