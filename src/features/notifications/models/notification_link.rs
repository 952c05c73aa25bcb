use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-(user, notification) link row; `read_at` is `None` while unread
#[derive(Debug, Clone, FromRow)]
pub struct UserNotificationLink {
    pub user_id: Uuid,
    pub notification_id: Uuid,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a mark-read call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadReceipt {
    pub notification_id: Uuid,
    pub read_at: DateTime<Utc>,
    pub view_counter: i32,
}
