use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::dtos::CategorySummaryDto;
use crate::features::notifications::models::{
    NewNotification, Notification, NotificationChanges, NotificationWithCategory,
};
use crate::features::preferences::dtos::PreferenceResponseDto;

/// Notification as handed to clients, with its category inlined
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub view_counter: i32,
    pub category_id: Uuid,
    pub category: CategorySummaryDto,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationWithCategory> for NotificationDto {
    fn from(row: NotificationWithCategory) -> Self {
        let n = row.notification;
        Self {
            id: n.id,
            title: n.title,
            text: n.text,
            view_counter: n.view_counter,
            category_id: n.category_id,
            category: CategorySummaryDto {
                id: n.category_id,
                name: row.category_name,
                color: row.category_color,
            },
            created_at: n.created_at,
        }
    }
}

/// Bare notification row returned by admin writes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecordDto {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub view_counter: i32,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Notification> for NotificationRecordDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title,
            text: n.text,
            view_counter: n.view_counter,
            category_id: n.category_id,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationDto {
    #[validate(
        length(min = 1, max = 240, message = "Title must be 1-240 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub title: String,

    #[validate(custom(function = "crate::shared::validation::not_blank"))]
    pub text: String,

    pub category_id: Uuid,
}

impl From<CreateNotificationDto> for NewNotification {
    fn from(dto: CreateNotificationDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            text: dto.text,
            category_id: dto.category_id,
        }
    }
}

/// Partial update; omitted title or text keep their current value
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationDto {
    #[validate(
        length(min = 1, max = 240, message = "Title must be 1-240 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub title: Option<String>,

    #[validate(custom(function = "crate::shared::validation::not_blank"))]
    pub text: Option<String>,

    pub category_id: Uuid,
}

impl From<UpdateNotificationDto> for NotificationChanges {
    fn from(dto: UpdateNotificationDto) -> Self {
        Self {
            title: dto.title.map(|t| t.trim().to_string()),
            text: dto.text,
            category_id: dto.category_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationResponseDto {
    pub notification: NotificationRecordDto,
    /// Users that received an unread link
    pub recipients: u64,
}

/// Everything the inbox page needs on load
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStateDto {
    pub unread_notifications: Vec<NotificationDto>,
    pub notification_preferences: Vec<PreferenceResponseDto>,
}
