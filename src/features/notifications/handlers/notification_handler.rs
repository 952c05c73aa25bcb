use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{parse_id, AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireNotificationAdmin;
use crate::features::notifications::dtos::{
    CreateNotificationDto, CreateNotificationResponseDto, NotificationDto, NotificationRecordDto,
    UpdateNotificationDto,
};
use crate::features::notifications::services::NotificationService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List all notifications, newest first (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/notifications",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of notifications", body = ApiResponse<Vec<NotificationDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Notification admin access required")
    ),
    tag = "admin-notifications",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_notifications(
    RequireNotificationAdmin(_user): RequireNotificationAdmin,
    State(service): State<Arc<NotificationService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<NotificationDto>>>> {
    let (items, total) = service.list(params.offset(), params.limit()).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Get a notification by id
#[utoipa::path(
    get,
    path = "/api/admin/notifications/{id}",
    params(
        ("id" = String, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification found", body = ApiResponse<NotificationRecordDto>),
        (status = 404, description = "Notification not found")
    ),
    tag = "admin-notifications",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_notification(
    RequireNotificationAdmin(_user): RequireNotificationAdmin,
    State(service): State<Arc<NotificationService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NotificationRecordDto>>> {
    let id = parse_id(&id, "notification id")?;
    let notification = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(notification), None, None)))
}

/// Create a notification and deliver it to every registered user
#[utoipa::path(
    post,
    path = "/api/admin/notifications",
    request_body = CreateNotificationDto,
    responses(
        (status = 201, description = "Notification created", body = ApiResponse<CreateNotificationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found")
    ),
    tag = "admin-notifications",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_notification(
    RequireNotificationAdmin(_user): RequireNotificationAdmin,
    State(service): State<Arc<NotificationService>>,
    AppJson(dto): AppJson<CreateNotificationDto>,
) -> Result<(StatusCode, Json<ApiResponse<CreateNotificationResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = service.create(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("Notification created".to_string()),
            None,
        )),
    ))
}

/// Update a notification
#[utoipa::path(
    put,
    path = "/api/admin/notifications/{id}",
    params(
        ("id" = String, Path, description = "Notification ID")
    ),
    request_body = UpdateNotificationDto,
    responses(
        (status = 200, description = "Notification updated", body = ApiResponse<NotificationRecordDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Notification or category not found")
    ),
    tag = "admin-notifications",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_notification(
    RequireNotificationAdmin(_user): RequireNotificationAdmin,
    State(service): State<Arc<NotificationService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateNotificationDto>,
) -> Result<Json<ApiResponse<NotificationRecordDto>>> {
    let id = parse_id(&id, "notification id")?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let notification = service.update(id, dto).await?;

    Ok(Json(ApiResponse::success(
        Some(notification),
        Some("Notification updated".to_string()),
        None,
    )))
}

/// Delete a notification and every user's link to it
#[utoipa::path(
    delete,
    path = "/api/admin/notifications/{id}",
    params(
        ("id" = String, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification deleted"),
        (status = 404, description = "Notification not found")
    ),
    tag = "admin-notifications",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_notification(
    RequireNotificationAdmin(_user): RequireNotificationAdmin,
    State(service): State<Arc<NotificationService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let id = parse_id(&id, "notification id")?;
    service.delete(id).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Notification deleted".to_string()),
        None,
    )))
}
