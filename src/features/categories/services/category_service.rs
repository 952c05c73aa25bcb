use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryResponseDto, UpsertCategoryDto};
use crate::modules::store::NotificationStore;

/// Service for the administrative category operations
pub struct CategoryService {
    store: Arc<dyn NotificationStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// List active categories ordered by name
    pub async fn list_active(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<CategoryResponseDto>, i64)> {
        let (categories, total) = self.store.list_active_categories(offset, limit).await?;
        Ok((categories.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryResponseDto> {
        self.store
            .find_category(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Notification category '{}' not found", id)))
    }

    pub async fn create(&self, dto: UpsertCategoryDto) -> Result<CategoryResponseDto> {
        let category = self.store.create_category(dto.into()).await?;
        tracing::info!("Created notification category {} ({})", category.id, category.name);
        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpsertCategoryDto) -> Result<CategoryResponseDto> {
        let category = self.store.update_category(id, dto.into()).await?;
        Ok(category.into())
    }

    /// Retire the category. Its notifications stay stored but stop being delivered.
    pub async fn deactivate(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category = self.store.deactivate_category(id).await?;
        tracing::info!("Deactivated notification category {}", category.id);
        Ok(category.into())
    }
}
