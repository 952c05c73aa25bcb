use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::{parse_id, Result};
use crate::features::notifications::dtos::{NotificationDto, NotificationStateDto};
use crate::features::notifications::services::{ReadTrackerService, VisibilityService};
use crate::features::users::model::CurrentUser;
use crate::shared::types::ApiResponse;

/// Shared state for the inbox routes
#[derive(Clone)]
pub struct InboxState {
    pub visibility_service: Arc<VisibilityService>,
    pub read_tracker_service: Arc<ReadTrackerService>,
}

/// Inbox page state: unread notifications and category preferences
#[utoipa::path(
    get,
    path = "/api/notifications/state",
    responses(
        (status = 200, description = "Page state", body = ApiResponse<NotificationStateDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_state(
    user: CurrentUser,
    State(state): State<InboxState>,
) -> Result<Json<ApiResponse<NotificationStateDto>>> {
    let page = state.visibility_service.page_state(user.id).await?;
    Ok(Json(ApiResponse::success(Some(page), None, None)))
}

/// Unread notifications the current user should see, newest first
#[utoipa::path(
    get,
    path = "/api/notifications/unread",
    responses(
        (status = 200, description = "Unread notifications", body = ApiResponse<Vec<NotificationDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_unread(
    user: CurrentUser,
    State(state): State<InboxState>,
) -> Result<Json<ApiResponse<Vec<NotificationDto>>>> {
    let unread = state.visibility_service.unread_visible(user.id).await?;
    let total = unread.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(unread),
        None,
        Some(crate::shared::types::Meta { total }),
    )))
}

/// Mark a notification read and return the refreshed unread list
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = String, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Remaining unread notifications", body = ApiResponse<Vec<NotificationDto>>),
        (status = 400, description = "Malformed notification id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notification not linked to this user")
    ),
    tag = "notifications",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn mark_read(
    user: CurrentUser,
    State(state): State<InboxState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<NotificationDto>>>> {
    let notification_id = parse_id(&id, "notification id")?;
    let unread = state
        .read_tracker_service
        .mark_read(user.id, notification_id)
        .await?;

    Ok(Json(ApiResponse::success(Some(unread), None, None)))
}
