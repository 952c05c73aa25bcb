//! Persistence for users, categories, notifications, link rows and preferences.
//!
//! The backend is selected at startup from `STORE_BACKEND`; services only see
//! `Arc<dyn NotificationStore>`.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::config::{Config, StoreBackend};
use crate::core::database;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{CategoryChanges, NewCategory, NotificationCategory};
use crate::features::notifications::models::{
    CreatedNotification, NewNotification, Notification, NotificationChanges,
    NotificationWithCategory, ReadReceipt,
};
use crate::features::preferences::models::UserCategoryPreference;
use crate::features::users::model::UserRecord;

pub use memory::MemoryNotificationStore;
pub use postgres::PgNotificationStore;

#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Find the user by account id, creating the row on first sight
    async fn ensure_user(&self, account_id: &str, display_name: Option<&str>)
        -> Result<UserRecord>;

    async fn create_category(&self, input: NewCategory) -> Result<NotificationCategory>;

    /// Replace name, color and description. `NotFound` if the category does not exist.
    async fn update_category(&self, id: Uuid, input: CategoryChanges)
        -> Result<NotificationCategory>;

    /// Soft delete: set `is_active = false`
    async fn deactivate_category(&self, id: Uuid) -> Result<NotificationCategory>;

    async fn find_category(&self, id: Uuid) -> Result<Option<NotificationCategory>>;

    /// Active categories ordered by name, with the total count
    async fn list_active_categories(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<NotificationCategory>, i64)>;

    /// Insert the notification with `view_counter = 0` and one unread link per
    /// registered user, atomically. `NotFound` if the category does not exist.
    async fn create_notification(&self, input: NewNotification) -> Result<CreatedNotification>;

    async fn update_notification(
        &self,
        id: Uuid,
        changes: NotificationChanges,
    ) -> Result<Notification>;

    /// Hard delete; link rows go with it
    async fn delete_notification(&self, id: Uuid) -> Result<()>;

    async fn find_notification(&self, id: Uuid) -> Result<Option<Notification>>;

    /// All notifications newest first, joined with their category
    async fn list_notifications(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<NotificationWithCategory>, i64)>;

    /// Unread, active-category, not-hidden notifications for the user, newest first
    async fn unread_visible(&self, user_id: Uuid) -> Result<Vec<NotificationWithCategory>>;

    /// Overwrite the link's read timestamp with `at` and add one to the view
    /// counter, whether or not the link was already read. `NotFound` when the
    /// link does not exist; nothing changes in that case.
    async fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<ReadReceipt>;

    /// Get-or-default (`is_hidden = false`), negate, persist, as one operation.
    /// `NotFound` if the category does not exist.
    async fn toggle_category(
        &self,
        user_id: Uuid,
        category_id: Uuid,
    ) -> Result<UserCategoryPreference>;

    async fn list_preferences(&self, user_id: Uuid) -> Result<Vec<UserCategoryPreference>>;
}

/// Build the store selected by configuration
pub async fn create_store(config: &Config) -> Result<Arc<dyn NotificationStore>> {
    let store: Arc<dyn NotificationStore> = match config.store.backend {
        StoreBackend::Postgres => {
            let db_config = config.database.as_ref().ok_or_else(|| {
                AppError::Internal("Postgres backend selected without database config".to_string())
            })?;
            let pool = database::create_pool(db_config).await?;
            tracing::info!("Using Postgres notification store");
            Arc::new(PgNotificationStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory notification store");
            Arc::new(MemoryNotificationStore::new())
        }
    };

    Ok(store)
}

pub(crate) fn category_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Notification category '{}' not found", id))
}

pub(crate) fn notification_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Notification '{}' not found", id))
}
