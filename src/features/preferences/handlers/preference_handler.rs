use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::{parse_id, Result};
use crate::core::extractor::AppJson;
use crate::features::preferences::dtos::{
    PreferenceResponseDto, ToggleCategoryDto, ToggleCategoryResponseDto,
};
use crate::features::preferences::services::PreferenceService;
use crate::features::users::model::CurrentUser;
use crate::shared::types::ApiResponse;

/// Hide or show a notification category for the current user
///
/// The first call hides the category; each later call flips it.
#[utoipa::path(
    post,
    path = "/api/notifications/preferences/toggle-category",
    request_body = ToggleCategoryDto,
    responses(
        (status = 200, description = "New hidden state", body = ApiResponse<ToggleCategoryResponseDto>),
        (status = 400, description = "Malformed category id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "notification-preferences",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_category(
    user: CurrentUser,
    State(service): State<Arc<PreferenceService>>,
    AppJson(dto): AppJson<ToggleCategoryDto>,
) -> Result<Json<ApiResponse<ToggleCategoryResponseDto>>> {
    let category_id = parse_id(&dto.category_id, "category id")?;
    let result = service.toggle_category(user.id, category_id).await?;

    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

/// List the current user's category preferences
#[utoipa::path(
    get,
    path = "/api/notifications/preferences",
    responses(
        (status = 200, description = "Preference rows", body = ApiResponse<Vec<PreferenceResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notification-preferences",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_preferences(
    user: CurrentUser,
    State(service): State<Arc<PreferenceService>>,
) -> Result<Json<ApiResponse<Vec<PreferenceResponseDto>>>> {
    let preferences = service.list(user.id).await?;
    Ok(Json(ApiResponse::success(Some(preferences), None, None)))
}
