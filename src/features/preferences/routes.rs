use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::preferences::handlers;
use crate::features::preferences::services::PreferenceService;

/// Preference routes for the authenticated user
pub fn routes(service: Arc<PreferenceService>) -> Router {
    Router::new()
        .route(
            "/api/notifications/preferences",
            get(handlers::list_preferences),
        )
        .route(
            "/api/notifications/preferences/toggle-category",
            post(handlers::toggle_category),
        )
        .with_state(service)
}
