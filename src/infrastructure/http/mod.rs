//! HTTP REST API routes

mod campaign_routes;
mod character_routes;
mod class_routes;
mod wizard_routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use campaign_routes::*;
pub use character_routes::*;
pub use class_routes::*;
pub use wizard_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Campaign routes
        .route("/api/campaigns", get(campaign_routes::list_campaigns))
        .route("/api/campaigns", post(campaign_routes::create_campaign))
        .route("/api/campaigns/join", post(campaign_routes::join_campaign))
        .route("/api/campaigns/{id}", get(campaign_routes::get_campaign))
        // Class routes
        .route("/api/classes", get(class_routes::list_classes))
        .route(
            "/api/classes/{class}/catalog",
            get(class_routes::get_class_catalog),
        )
        // Character routes
        .route(
            "/api/campaigns/{campaign_id}/characters",
            get(character_routes::list_characters),
        )
        .route(
            "/api/campaigns/{campaign_id}/characters/{class}",
            post(character_routes::create_character),
        )
        .route("/api/characters/{id}", get(character_routes::get_character))
        .route(
            "/api/characters/{id}",
            delete(character_routes::delete_character),
        )
        // Wizard steps
        .route(
            "/api/characters/{id}/tall-tales",
            post(wizard_routes::add_tall_tale),
        )
        .route("/api/characters/{id}/crew", post(wizard_routes::set_crew))
        .route(
            "/api/characters/{id}/companion",
            post(wizard_routes::set_companion),
        )
        .route(
            "/api/characters/{id}/arcana",
            post(wizard_routes::set_initial_arcana),
        )
        .route(
            "/api/characters/{id}/invocations",
            post(wizard_routes::set_invocations),
        )
        .route(
            "/api/characters/{id}/initiates",
            post(wizard_routes::set_initiates),
        )
        .route(
            "/api/characters/{id}/background-details",
            post(wizard_routes::set_background_details),
        )
}
