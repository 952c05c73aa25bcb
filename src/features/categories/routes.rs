use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create admin routes for categories, nested under `/api/admin`
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/notification-categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/notification-categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::deactivate_category),
        )
        .with_state(service)
}
