use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::notifications::dtos::NotificationDto;
use crate::features::notifications::services::VisibilityService;
use crate::modules::store::NotificationStore;

/// Records reads and hands back the refreshed inbox
pub struct ReadTrackerService {
    store: Arc<dyn NotificationStore>,
    visibility: Arc<VisibilityService>,
}

impl ReadTrackerService {
    pub fn new(store: Arc<dyn NotificationStore>, visibility: Arc<VisibilityService>) -> Self {
        Self { store, visibility }
    }

    /// Mark the notification read for `user_id`, then re-derive their unread list.
    ///
    /// Every call bumps the view counter, including repeat reads.
    pub async fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> Result<Vec<NotificationDto>> {
        let receipt = self
            .store
            .mark_read(user_id, notification_id, Utc::now())
            .await?;

        tracing::info!(
            "User {} read notification {} (view_counter={})",
            user_id,
            receipt.notification_id,
            receipt.view_counter
        );

        self.visibility.unread_visible(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::categories::models::NewCategory;
    use crate::features::notifications::models::NewNotification;
    use crate::modules::store::MemoryNotificationStore;

    #[tokio::test]
    async fn test_close_returns_remaining_unread() {
        let store: Arc<dyn NotificationStore> = Arc::new(MemoryNotificationStore::new());
        let user = store.ensure_user("acc", None).await.unwrap();
        let category = store
            .create_category(NewCategory {
                name: "General".to_string(),
                color: None,
                description: None,
            })
            .await
            .unwrap();

        let mut ids = Vec::new();
        for title in ["A", "B", "C"] {
            let created = store
                .create_notification(NewNotification {
                    title: title.to_string(),
                    text: "body".to_string(),
                    category_id: category.id,
                })
                .await
                .unwrap();
            ids.push(created.notification.id);
        }

        let visibility = Arc::new(VisibilityService::new(Arc::clone(&store)));
        let tracker = ReadTrackerService::new(Arc::clone(&store), Arc::clone(&visibility));

        let remaining = tracker.mark_read(user.id, ids[2]).await.unwrap();
        let titles: Vec<&str> = remaining.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);

        let state = visibility.page_state(user.id).await.unwrap();
        assert_eq!(state.unread_notifications.len(), 2);
        assert!(state.notification_preferences.is_empty());

        let read = store.find_notification(ids[2]).await.unwrap().unwrap();
        assert_eq!(read.view_counter, 1);
    }

    #[tokio::test]
    async fn test_unknown_link_is_not_found() {
        let store: Arc<dyn NotificationStore> = Arc::new(MemoryNotificationStore::new());
        let user = store.ensure_user("acc", None).await.unwrap();
        let visibility = Arc::new(VisibilityService::new(Arc::clone(&store)));
        let tracker = ReadTrackerService::new(store, visibility);

        let result = tracker.mark_read(user.id, Uuid::now_v7()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
