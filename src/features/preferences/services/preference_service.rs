use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::Result;
use crate::features::preferences::dtos::{PreferenceResponseDto, ToggleCategoryResponseDto};
use crate::modules::store::NotificationStore;

/// Per-user category mute settings
pub struct PreferenceService {
    store: Arc<dyn NotificationStore>,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Flip the hidden flag for `category_id`; the first call hides it
    pub async fn toggle_category(
        &self,
        user_id: Uuid,
        category_id: Uuid,
    ) -> Result<ToggleCategoryResponseDto> {
        let preference = self.store.toggle_category(user_id, category_id).await?;

        tracing::info!(
            "User {} set category {} hidden={}",
            user_id,
            category_id,
            preference.is_hidden
        );

        Ok(preference.into())
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<PreferenceResponseDto>> {
        let preferences = self.store.list_preferences(user_id).await?;
        Ok(preferences.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::categories::models::NewCategory;
    use crate::modules::store::MemoryNotificationStore;

    #[tokio::test]
    async fn test_toggle_alternates() {
        let store = Arc::new(MemoryNotificationStore::new());
        let user = store.ensure_user("acc", None).await.unwrap();
        let category = store
            .create_category(NewCategory {
                name: "Digest".to_string(),
                color: None,
                description: None,
            })
            .await
            .unwrap();
        let service = PreferenceService::new(store);

        let first = service.toggle_category(user.id, category.id).await.unwrap();
        let second = service.toggle_category(user.id, category.id).await.unwrap();

        assert!(first.is_hidden);
        assert!(!second.is_hidden);

        let listed = service.list(user.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].is_hidden);
    }

    #[tokio::test]
    async fn test_toggle_missing_category() {
        let store = Arc::new(MemoryNotificationStore::new());
        let user = store.ensure_user("acc", None).await.unwrap();
        let service = PreferenceService::new(store);

        let result = service.toggle_category(user.id, Uuid::now_v7()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
