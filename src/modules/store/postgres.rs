use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{category_not_found, notification_not_found, NotificationStore};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{CategoryChanges, NewCategory, NotificationCategory};
use crate::features::notifications::models::{
    CreatedNotification, NewNotification, Notification, NotificationChanges,
    NotificationWithCategory, ReadReceipt,
};
use crate::features::preferences::models::UserCategoryPreference;
use crate::features::users::model::UserRecord;

const CATEGORY_COLUMNS: &str =
    "id, name, color, description, is_active, created_at, updated_at";

const NOTIFICATION_COLUMNS: &str =
    "id, title, text, view_counter, category_id, created_at, updated_at";

const PREFERENCE_COLUMNS: &str = "id, user_id, category_id, is_hidden, created_at, updated_at";

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("{}: {:?}", context, e);
        AppError::Database(e)
    }
}

/// Store backed by the Postgres tables in `migrations/`
pub struct PgNotificationStore {
    pool: PgPool,
}

impl PgNotificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn category_exists<'e, E>(executor: E, id: Uuid) -> Result<bool>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM notification_categories WHERE id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await
                .map_err(db_error("Failed to check category"))?;

        Ok(exists)
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn ensure_user(
        &self,
        account_id: &str,
        display_name: Option<&str>,
    ) -> Result<UserRecord> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, account_id, display_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id) DO UPDATE
                SET display_name = COALESCE(EXCLUDED.display_name, users.display_name)
            RETURNING id, account_id, display_name, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(account_id)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to register user"))
    }

    async fn create_category(&self, input: NewCategory) -> Result<NotificationCategory> {
        let sql = format!(
            r#"
            INSERT INTO notification_categories (id, name, color, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {CATEGORY_COLUMNS}
            "#
        );

        sqlx::query_as::<_, NotificationCategory>(&sql)
            .bind(Uuid::now_v7())
            .bind(&input.name)
            .bind(&input.color)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to create category"))
    }

    async fn update_category(
        &self,
        id: Uuid,
        input: CategoryChanges,
    ) -> Result<NotificationCategory> {
        let sql = format!(
            r#"
            UPDATE notification_categories
            SET name = $2, color = $3, description = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#
        );

        sqlx::query_as::<_, NotificationCategory>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(&input.description)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to update category"))?
            .ok_or_else(|| category_not_found(id))
    }

    async fn deactivate_category(&self, id: Uuid) -> Result<NotificationCategory> {
        let sql = format!(
            r#"
            UPDATE notification_categories
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#
        );

        sqlx::query_as::<_, NotificationCategory>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to deactivate category"))?
            .ok_or_else(|| category_not_found(id))
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<NotificationCategory>> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM notification_categories WHERE id = $1");

        sqlx::query_as::<_, NotificationCategory>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to get category"))
    }

    async fn list_active_categories(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<NotificationCategory>, i64)> {
        let sql = format!(
            r#"
            SELECT {CATEGORY_COLUMNS}
            FROM notification_categories
            WHERE is_active = TRUE
            ORDER BY name, id
            LIMIT $1 OFFSET $2
            "#
        );

        let categories = sqlx::query_as::<_, NotificationCategory>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list categories"))?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notification_categories WHERE is_active = TRUE")
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count categories"))?;

        Ok((categories, total))
    }

    async fn create_notification(&self, input: NewNotification) -> Result<CreatedNotification> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        if !Self::category_exists(&mut *tx, input.category_id).await? {
            return Err(category_not_found(input.category_id));
        }

        let sql = format!(
            r#"
            INSERT INTO notifications (id, title, text, view_counter, category_id)
            VALUES ($1, $2, $3, 0, $4)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        );
        let notification = sqlx::query_as::<_, Notification>(&sql)
            .bind(Uuid::now_v7())
            .bind(&input.title)
            .bind(&input.text)
            .bind(input.category_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("Failed to create notification"))?;

        let fan_out = sqlx::query(
            r#"
            INSERT INTO notification_user (user_id, notification_id)
            SELECT id, $1 FROM users
            "#,
        )
        .bind(notification.id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to link notification to users"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit notification"))?;

        Ok(CreatedNotification {
            notification,
            recipients: fan_out.rows_affected(),
        })
    }

    async fn update_notification(
        &self,
        id: Uuid,
        changes: NotificationChanges,
    ) -> Result<Notification> {
        if !Self::category_exists(&self.pool, changes.category_id).await? {
            return Err(category_not_found(changes.category_id));
        }

        let sql = format!(
            r#"
            UPDATE notifications
            SET title = COALESCE($2, title),
                text = COALESCE($3, text),
                category_id = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Notification>(&sql)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.text)
            .bind(changes.category_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to update notification"))?
            .ok_or_else(|| notification_not_found(id))
    }

    async fn delete_notification(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete notification"))?;

        if result.rows_affected() == 0 {
            return Err(notification_not_found(id));
        }

        Ok(())
    }

    async fn find_notification(&self, id: Uuid) -> Result<Option<Notification>> {
        let sql = format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1");

        sqlx::query_as::<_, Notification>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to get notification"))
    }

    async fn list_notifications(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<NotificationWithCategory>, i64)> {
        let notifications = sqlx::query_as::<_, NotificationWithCategory>(
            r#"
            SELECT n.id, n.title, n.text, n.view_counter, n.category_id,
                   n.created_at, n.updated_at,
                   c.name AS category_name, c.color AS category_color
            FROM notifications n
            JOIN notification_categories c ON c.id = n.category_id
            ORDER BY n.created_at DESC, n.id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list notifications"))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count notifications"))?;

        Ok((notifications, total))
    }

    async fn unread_visible(&self, user_id: Uuid) -> Result<Vec<NotificationWithCategory>> {
        sqlx::query_as::<_, NotificationWithCategory>(
            r#"
            WITH visible AS (
                SELECT notification_id AS id
                FROM notification_user
                WHERE user_id = $1 AND read_at IS NULL
                INTERSECT
                SELECT n.id
                FROM notifications n
                JOIN notification_categories c ON c.id = n.category_id
                WHERE c.is_active = TRUE
                INTERSECT
                SELECT n.id
                FROM notifications n
                WHERE n.category_id NOT IN (
                    SELECT category_id
                    FROM user_notification_preferences
                    WHERE user_id = $1 AND is_hidden = TRUE
                )
            )
            SELECT n.id, n.title, n.text, n.view_counter, n.category_id,
                   n.created_at, n.updated_at,
                   c.name AS category_name, c.color AS category_color
            FROM visible v
            JOIN notifications n ON n.id = v.id
            JOIN notification_categories c ON c.id = n.category_id
            ORDER BY n.created_at DESC, n.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load unread notifications"))
    }

    async fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<ReadReceipt> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let link = sqlx::query(
            r#"
            UPDATE notification_user
            SET read_at = $3, updated_at = $3
            WHERE user_id = $1 AND notification_id = $2
            "#,
        )
        .bind(user_id)
        .bind(notification_id)
        .bind(at)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to mark notification read"))?;

        if link.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Notification '{}' is not linked to this user",
                notification_id
            )));
        }

        let view_counter: i32 = sqlx::query_scalar(
            r#"
            UPDATE notifications
            SET view_counter = view_counter + 1
            WHERE id = $1
            RETURNING view_counter
            "#,
        )
        .bind(notification_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to increment view counter"))?
        .ok_or_else(|| notification_not_found(notification_id))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit read receipt"))?;

        Ok(ReadReceipt {
            notification_id,
            read_at: at,
            view_counter,
        })
    }

    async fn toggle_category(
        &self,
        user_id: Uuid,
        category_id: Uuid,
    ) -> Result<UserCategoryPreference> {
        if !Self::category_exists(&self.pool, category_id).await? {
            return Err(category_not_found(category_id));
        }

        // A first toggle inserts the negation of the default `false`
        let sql = format!(
            r#"
            INSERT INTO user_notification_preferences (id, user_id, category_id, is_hidden)
            VALUES ($1, $2, $3, TRUE)
            ON CONFLICT (user_id, category_id) DO UPDATE
                SET is_hidden = NOT user_notification_preferences.is_hidden,
                    updated_at = NOW()
            RETURNING {PREFERENCE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, UserCategoryPreference>(&sql)
            .bind(Uuid::now_v7())
            .bind(user_id)
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to toggle category preference"))
    }

    async fn list_preferences(&self, user_id: Uuid) -> Result<Vec<UserCategoryPreference>> {
        let sql = format!(
            r#"
            SELECT {PREFERENCE_COLUMNS}
            FROM user_notification_preferences
            WHERE user_id = $1
            ORDER BY created_at
            "#
        );

        sqlx::query_as::<_, UserCategoryPreference>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list preferences"))
    }
}
