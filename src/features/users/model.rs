use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Registered user; the set of these rows is the fan-out target for new notifications
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub account_id: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request-scoped identity resolved to the internal user id
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub account_id: String,
}

impl From<&UserRecord> for CurrentUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            account_id: record.account_id.clone(),
        }
    }
}
