use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-(user, category) mute flag. Absence of a row means visible.
#[derive(Debug, Clone, FromRow)]
pub struct UserCategoryPreference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
