use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::Result;
use crate::features::notifications::dtos::{NotificationDto, NotificationStateDto};
use crate::modules::store::NotificationStore;

/// Read side of the inbox: what a user should be shown right now
pub struct VisibilityService {
    store: Arc<dyn NotificationStore>,
}

impl VisibilityService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Unread notifications in active, non-hidden categories, newest first
    pub async fn unread_visible(&self, user_id: Uuid) -> Result<Vec<NotificationDto>> {
        let rows = self.store.unread_visible(user_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Unread list plus the user's preference rows
    pub async fn page_state(&self, user_id: Uuid) -> Result<NotificationStateDto> {
        let unread_notifications = self.unread_visible(user_id).await?;
        let notification_preferences = self
            .store
            .list_preferences(user_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(NotificationStateDto {
            unread_notifications,
            notification_preferences,
        })
    }
}
