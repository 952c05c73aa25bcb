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
use crate::features::categories::dtos::{CategoryResponseDto, UpsertCategoryDto};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List active notification categories (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/notification-categories",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of active categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Notification admin access required")
    ),
    tag = "notification-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_categories(
    RequireNotificationAdmin(_user): RequireNotificationAdmin,
    State(service): State<Arc<CategoryService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let (items, total) = service.list_active(params.offset(), params.limit()).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Get a notification category by id
#[utoipa::path(
    get,
    path = "/api/admin/notification-categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Category not found")
    ),
    tag = "notification-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_category(
    RequireNotificationAdmin(_user): RequireNotificationAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let id = parse_id(&id, "category id")?;
    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a notification category
#[utoipa::path(
    post,
    path = "/api/admin/notification-categories",
    request_body = UpsertCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Notification admin access required")
    ),
    tag = "notification-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    RequireNotificationAdmin(_user): RequireNotificationAdmin,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<UpsertCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some("Notification category created".to_string()),
            None,
        )),
    ))
}

/// Update a notification category
#[utoipa::path(
    put,
    path = "/api/admin/notification-categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    request_body = UpsertCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found")
    ),
    tag = "notification-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    RequireNotificationAdmin(_user): RequireNotificationAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpsertCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let id = parse_id(&id, "category id")?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;

    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Notification category updated".to_string()),
        None,
    )))
}

/// Deactivate a notification category
///
/// The category and its notifications are kept; its notifications stop being delivered.
#[utoipa::path(
    delete,
    path = "/api/admin/notification-categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deactivated", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "notification-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn deactivate_category(
    RequireNotificationAdmin(_user): RequireNotificationAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let id = parse_id(&id, "category id")?;
    let category = service.deactivate(id).await?;

    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Notification category deactivated".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::routes;
    use crate::modules::store::{MemoryNotificationStore, NotificationStore};
    use crate::shared::test_helpers::{admin_user, member_user, with_user};
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server(user: crate::features::auth::model::AuthenticatedUser) -> TestServer {
        let store: Arc<dyn NotificationStore> = Arc::new(MemoryNotificationStore::new());
        let service = Arc::new(CategoryService::new(Arc::clone(&store)));
        let app = Router::new().nest("/api/admin", routes::routes(service));
        TestServer::new(with_user(app, store, user)).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let server = server(admin_user());

        let created = server
            .post("/api/admin/notification-categories")
            .json(&json!({ "name": "Maintenance", "color": "#f59e0b" }))
            .await;
        created.assert_status(StatusCode::CREATED);

        let listed = server.get("/api/admin/notification-categories").await;
        listed.assert_status_ok();
        let body: Value = listed.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["name"], "Maintenance");
        assert_eq!(body["data"][0]["isActive"], true);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_color() {
        let server = server(admin_user());

        let response = server
            .post("/api/admin/notification-categories")
            .json(&json!({ "name": "Maintenance", "color": "orange" }))
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_member_is_forbidden() {
        let server = server(member_user("member-1"));

        let response = server.get("/api/admin/notification-categories").await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_delete_deactivates() {
        let server = server(admin_user());
        let created: Value = server
            .post("/api/admin/notification-categories")
            .json(&json!({ "name": "Old" }))
            .await
            .json();
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let deleted = server
            .delete(&format!("/api/admin/notification-categories/{}", id))
            .await;
        deleted.assert_status_ok();
        let body: Value = deleted.json();
        assert_eq!(body["data"]["isActive"], false);

        let fetched: Value = server
            .get(&format!("/api/admin/notification-categories/{}", id))
            .await
            .json();
        assert_eq!(fetched["data"]["isActive"], false);
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let server = server(admin_user());

        let response = server
            .put("/api/admin/notification-categories/not-a-uuid")
            .json(&json!({ "name": "X" }))
            .await;
        response.assert_status_bad_request();
    }
}
