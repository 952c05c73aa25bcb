use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notifications::dtos::{
    CreateNotificationDto, CreateNotificationResponseDto, NotificationDto, NotificationRecordDto,
    UpdateNotificationDto,
};
use crate::modules::store::NotificationStore;

/// Administrative notification operations
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// All notifications, newest first, regardless of category state
    pub async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<NotificationDto>, i64)> {
        let (rows, total) = self.store.list_notifications(offset, limit).await?;
        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> Result<NotificationRecordDto> {
        self.store
            .find_notification(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Notification '{}' not found", id)))
    }

    /// Create the notification and link it, unread, to every registered user
    pub async fn create(&self, dto: CreateNotificationDto) -> Result<CreateNotificationResponseDto> {
        let created = self.store.create_notification(dto.into()).await?;

        tracing::info!(
            "Created notification {} in category {} for {} users",
            created.notification.id,
            created.notification.category_id,
            created.recipients
        );

        Ok(CreateNotificationResponseDto {
            notification: created.notification.into(),
            recipients: created.recipients,
        })
    }

    pub async fn update(&self, id: Uuid, dto: UpdateNotificationDto) -> Result<NotificationRecordDto> {
        let notification = self.store.update_notification(id, dto.into()).await?;
        tracing::info!("Updated notification {}", notification.id);
        Ok(notification.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete_notification(id).await?;
        tracing::info!("Deleted notification {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::NewCategory;
    use crate::modules::store::MemoryNotificationStore;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    async fn setup() -> (Arc<dyn NotificationStore>, NotificationService, Uuid) {
        let store: Arc<dyn NotificationStore> = Arc::new(MemoryNotificationStore::new());
        let category = store
            .create_category(NewCategory {
                name: "General".to_string(),
                color: None,
                description: None,
            })
            .await
            .unwrap();
        let service = NotificationService::new(Arc::clone(&store));
        (store, service, category.id)
    }

    fn create_dto(category_id: Uuid) -> CreateNotificationDto {
        CreateNotificationDto {
            title: Sentence(2..4).fake(),
            text: Sentence(4..8).fake(),
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_fans_out() {
        let (store, service, category_id) = setup().await;
        store.ensure_user("a", None).await.unwrap();
        store.ensure_user("b", None).await.unwrap();

        let created = service.create(create_dto(category_id)).await.unwrap();

        assert_eq!(created.recipients, 2);
        assert_eq!(created.notification.view_counter, 0);
    }

    #[tokio::test]
    async fn test_create_unknown_category() {
        let (_store, service, _) = setup().await;

        let result = service.create(create_dto(Uuid::now_v7())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(service.list(0, 20).await.unwrap().1, 0);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let (_store, service, category_id) = setup().await;
        let created = service.create(create_dto(category_id)).await.unwrap();

        service.delete(created.notification.id).await.unwrap();

        let result = service.get(created.notification.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
