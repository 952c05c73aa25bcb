use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::notifications::handlers::{self, InboxState};
use crate::features::notifications::services::{
    NotificationService, ReadTrackerService, VisibilityService,
};

/// Inbox routes for the authenticated user
pub fn routes(
    visibility_service: Arc<VisibilityService>,
    read_tracker_service: Arc<ReadTrackerService>,
) -> Router {
    let state = InboxState {
        visibility_service,
        read_tracker_service,
    };

    Router::new()
        .route("/api/notifications/state", get(handlers::get_state))
        .route("/api/notifications/unread", get(handlers::list_unread))
        .route("/api/notifications/{id}/read", post(handlers::mark_read))
        .with_state(state)
}

/// Admin notification routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<NotificationService>) -> Router {
    Router::new()
        .route(
            "/notifications",
            get(handlers::list_notifications).post(handlers::create_notification),
        )
        .route(
            "/notifications/{id}",
            get(handlers::get_notification)
                .put(handlers::update_notification)
                .delete(handlers::delete_notification),
        )
        .with_state(service)
}
