use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::preferences::models::UserCategoryPreference;

/// Request body for toggling a category
///
/// `categoryId` is kept as a string so a malformed id is reported as a validation
/// error rather than a JSON decoding failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCategoryDto {
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCategoryResponseDto {
    pub category_id: Uuid,
    /// State after the toggle
    pub is_hidden: bool,
}

impl From<UserCategoryPreference> for ToggleCategoryResponseDto {
    fn from(p: UserCategoryPreference) -> Self {
        Self {
            category_id: p.category_id,
            is_hidden: p.is_hidden,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceResponseDto {
    pub id: Uuid,
    pub category_id: Uuid,
    pub is_hidden: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<UserCategoryPreference> for PreferenceResponseDto {
    fn from(p: UserCategoryPreference) -> Self {
        Self {
            id: p.id,
            category_id: p.category_id,
            is_hidden: p.is_hidden,
            updated_at: p.updated_at,
        }
    }
}
