use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a notification category
///
/// Categories are never removed through the API; retiring one flips
/// `is_active` so historical notifications keep a valid reference.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationCategory {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
}

/// Full replacement of the editable category fields
pub type CategoryChanges = NewCategory;
