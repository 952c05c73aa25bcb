use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
};
use crate::features::preferences::{dtos as preferences_dtos, handlers as preferences_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Inbox
        notifications_handlers::get_state,
        notifications_handlers::list_unread,
        notifications_handlers::mark_read,
        // Preferences
        preferences_handlers::toggle_category,
        preferences_handlers::list_preferences,
        // Admin: categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::deactivate_category,
        // Admin: notifications
        notifications_handlers::list_notifications,
        notifications_handlers::get_notification,
        notifications_handlers::create_notification,
        notifications_handlers::update_notification,
        notifications_handlers::delete_notification,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::UpsertCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategorySummaryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Notifications
            notifications_dtos::NotificationDto,
            notifications_dtos::NotificationRecordDto,
            notifications_dtos::CreateNotificationDto,
            notifications_dtos::UpdateNotificationDto,
            notifications_dtos::CreateNotificationResponseDto,
            notifications_dtos::NotificationStateDto,
            ApiResponse<Vec<notifications_dtos::NotificationDto>>,
            ApiResponse<notifications_dtos::NotificationRecordDto>,
            ApiResponse<notifications_dtos::CreateNotificationResponseDto>,
            ApiResponse<notifications_dtos::NotificationStateDto>,
            // Preferences
            preferences_dtos::ToggleCategoryDto,
            preferences_dtos::ToggleCategoryResponseDto,
            preferences_dtos::PreferenceResponseDto,
            ApiResponse<preferences_dtos::ToggleCategoryResponseDto>,
            ApiResponse<Vec<preferences_dtos::PreferenceResponseDto>>,
        )
    ),
    tags(
        (name = "notifications", description = "Unread notifications for the current user"),
        (name = "notification-preferences", description = "Per-user category muting"),
        (name = "notification-categories", description = "Category administration (notification admins only)"),
        (name = "admin-notifications", description = "Notification publishing (notification admins only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Notification Center API",
        version = "0.1.0",
        description = "Broadcast notifications with per-user read tracking and category muting",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
