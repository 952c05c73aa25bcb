use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a broadcast notification
#[derive(Debug, Clone, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    /// Incremented once per mark-read call, never decremented
    pub view_counter: i32,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Notification joined with the display fields of its category
#[derive(Debug, Clone, FromRow)]
pub struct NotificationWithCategory {
    #[sqlx(flatten)]
    pub notification: Notification,
    pub category_name: String,
    pub category_color: Option<String>,
}

/// Fields for a new notification
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub text: String,
    pub category_id: Uuid,
}

/// Partial update; `category_id` is always supplied
#[derive(Debug, Clone)]
pub struct NotificationChanges {
    pub title: Option<String>,
    pub text: Option<String>,
    pub category_id: Uuid,
}

/// Result of creating a notification and fanning it out
#[derive(Debug, Clone)]
pub struct CreatedNotification {
    pub notification: Notification,
    /// Number of link rows written, one per user registered at creation time
    pub recipients: u64,
}
