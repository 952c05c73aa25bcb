use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{NewCategory, NotificationCategory};

/// Request DTO for creating or replacing a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCategoryDto {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    /// Hex display color such as `#3b82f6`
    #[validate(regex(
        path = "*crate::shared::validation::COLOR_REGEX",
        message = "Color must be a hex value like #3b82f6"
    ))]
    pub color: Option<String>,

    pub description: Option<String>,
}

impl From<UpsertCategoryDto> for NewCategory {
    fn from(dto: UpsertCategoryDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            color: dto.color,
            description: dto.description.filter(|d| !d.trim().is_empty()),
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NotificationCategory> for CategoryResponseDto {
    fn from(c: NotificationCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
            color: c.color,
            description: c.description,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Category fields embedded in each notification handed to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummaryDto {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
}
