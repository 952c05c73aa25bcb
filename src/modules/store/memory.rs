use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{category_not_found, notification_not_found, NotificationStore};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{CategoryChanges, NewCategory, NotificationCategory};
use crate::features::notifications::models::{
    CreatedNotification, NewNotification, Notification, NotificationChanges,
    NotificationWithCategory, ReadReceipt, UserNotificationLink,
};
use crate::features::notifications::visibility::{visible_ids, VisibilityInputs};
use crate::features::preferences::models::UserCategoryPreference;
use crate::features::users::model::UserRecord;

struct StoredNotification {
    row: Notification,
    /// Insertion order, breaks ties between equal `created_at` values
    seq: u64,
}

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, UserRecord>,
    users_by_account: HashMap<String, Uuid>,
    categories: HashMap<Uuid, NotificationCategory>,
    notifications: HashMap<Uuid, StoredNotification>,
    /// user id -> notification id -> link
    links: HashMap<Uuid, HashMap<Uuid, UserNotificationLink>>,
    /// (user id, category id) -> preference
    preferences: HashMap<(Uuid, Uuid), UserCategoryPreference>,
    next_seq: u64,
}

impl Tables {
    fn with_category(&self, stored: &StoredNotification) -> Option<NotificationWithCategory> {
        let category = self.categories.get(&stored.row.category_id)?;
        Some(NotificationWithCategory {
            notification: stored.row.clone(),
            category_name: category.name.clone(),
            category_color: category.color.clone(),
        })
    }

    /// Stored notifications among `ids`, newest first
    fn newest_first<'a>(&'a self, ids: &HashSet<Uuid>) -> Vec<&'a StoredNotification> {
        let mut rows: Vec<&StoredNotification> = ids
            .iter()
            .filter_map(|id| self.notifications.get(id))
            .collect();
        rows.sort_by(|a, b| {
            b.row
                .created_at
                .cmp(&a.row.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        rows
    }

    fn visibility_inputs(&self, user_id: Uuid) -> VisibilityInputs {
        let unread = self
            .links
            .get(&user_id)
            .map(|links| {
                links
                    .values()
                    .filter(|link| link.read_at.is_none())
                    .map(|link| link.notification_id)
                    .collect()
            })
            .unwrap_or_default();

        let active_categories = self
            .categories
            .values()
            .filter(|c| c.is_active)
            .map(|c| c.id)
            .collect();

        let hidden_categories = self
            .preferences
            .values()
            .filter(|p| p.user_id == user_id && p.is_hidden)
            .map(|p| p.category_id)
            .collect();

        VisibilityInputs {
            unread,
            active_categories,
            hidden_categories,
        }
    }
}

/// Store over indexed in-process maps; contents are lost on restart
#[derive(Default)]
pub struct MemoryNotificationStore {
    tables: RwLock<Tables>,
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn ensure_user(
        &self,
        account_id: &str,
        display_name: Option<&str>,
    ) -> Result<UserRecord> {
        let mut tables = self.tables.write().await;

        if let Some(id) = tables.users_by_account.get(account_id).copied() {
            let user = tables
                .users
                .get_mut(&id)
                .ok_or_else(|| AppError::Internal(format!("User index out of sync for {}", id)))?;
            if display_name.is_some() {
                user.display_name = display_name.map(String::from);
            }
            return Ok(user.clone());
        }

        let user = UserRecord {
            id: Uuid::now_v7(),
            account_id: account_id.to_string(),
            display_name: display_name.map(String::from),
            created_at: Utc::now(),
        };
        tables
            .users_by_account
            .insert(user.account_id.clone(), user.id);
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn create_category(&self, input: NewCategory) -> Result<NotificationCategory> {
        let now = Utc::now();
        let category = NotificationCategory {
            id: Uuid::now_v7(),
            name: input.name,
            color: input.color,
            description: input.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.tables
            .write()
            .await
            .categories
            .insert(category.id, category.clone());

        Ok(category)
    }

    async fn update_category(
        &self,
        id: Uuid,
        input: CategoryChanges,
    ) -> Result<NotificationCategory> {
        let mut tables = self.tables.write().await;
        let category = tables
            .categories
            .get_mut(&id)
            .ok_or_else(|| category_not_found(id))?;

        category.name = input.name;
        category.color = input.color;
        category.description = input.description;
        category.updated_at = Utc::now();

        Ok(category.clone())
    }

    async fn deactivate_category(&self, id: Uuid) -> Result<NotificationCategory> {
        let mut tables = self.tables.write().await;
        let category = tables
            .categories
            .get_mut(&id)
            .ok_or_else(|| category_not_found(id))?;

        category.is_active = false;
        category.updated_at = Utc::now();

        Ok(category.clone())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<NotificationCategory>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn list_active_categories(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<NotificationCategory>, i64)> {
        let tables = self.tables.read().await;
        let mut active: Vec<&NotificationCategory> =
            tables.categories.values().filter(|c| c.is_active).collect();
        active.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let total = active.len() as i64;
        let page = active
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn create_notification(&self, input: NewNotification) -> Result<CreatedNotification> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&input.category_id) {
            return Err(category_not_found(input.category_id));
        }

        let now = Utc::now();
        let notification = Notification {
            id: Uuid::now_v7(),
            title: input.title,
            text: input.text,
            view_counter: 0,
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
        };

        let seq = tables.next_seq;
        tables.next_seq += 1;
        tables.notifications.insert(
            notification.id,
            StoredNotification {
                row: notification.clone(),
                seq,
            },
        );

        let user_ids: Vec<Uuid> = tables.users.keys().copied().collect();
        for user_id in &user_ids {
            tables.links.entry(*user_id).or_default().insert(
                notification.id,
                UserNotificationLink {
                    user_id: *user_id,
                    notification_id: notification.id,
                    read_at: None,
                    created_at: now,
                    updated_at: now,
                },
            );
        }

        Ok(CreatedNotification {
            notification,
            recipients: user_ids.len() as u64,
        })
    }

    async fn update_notification(
        &self,
        id: Uuid,
        changes: NotificationChanges,
    ) -> Result<Notification> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&changes.category_id) {
            return Err(category_not_found(changes.category_id));
        }

        let stored = tables
            .notifications
            .get_mut(&id)
            .ok_or_else(|| notification_not_found(id))?;

        if let Some(title) = changes.title {
            stored.row.title = title;
        }
        if let Some(text) = changes.text {
            stored.row.text = text;
        }
        stored.row.category_id = changes.category_id;
        stored.row.updated_at = Utc::now();

        Ok(stored.row.clone())
    }

    async fn delete_notification(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.notifications.remove(&id).is_none() {
            return Err(notification_not_found(id));
        }

        for links in tables.links.values_mut() {
            links.remove(&id);
        }

        Ok(())
    }

    async fn find_notification(&self, id: Uuid) -> Result<Option<Notification>> {
        Ok(self
            .tables
            .read()
            .await
            .notifications
            .get(&id)
            .map(|stored| stored.row.clone()))
    }

    async fn list_notifications(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<NotificationWithCategory>, i64)> {
        let tables = self.tables.read().await;
        let all: HashSet<Uuid> = tables.notifications.keys().copied().collect();
        let ordered = tables.newest_first(&all);

        let total = ordered.len() as i64;
        let page = ordered
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .filter_map(|stored| tables.with_category(stored))
            .collect();

        Ok((page, total))
    }

    async fn unread_visible(&self, user_id: Uuid) -> Result<Vec<NotificationWithCategory>> {
        let tables = self.tables.read().await;
        let inputs = tables.visibility_inputs(user_id);

        let candidates: Vec<&Notification> = inputs
            .unread
            .iter()
            .filter_map(|id| tables.notifications.get(id))
            .map(|stored| &stored.row)
            .collect();
        let visible = visible_ids(&candidates, &inputs);

        Ok(tables
            .newest_first(&visible)
            .into_iter()
            .filter_map(|stored| tables.with_category(stored))
            .collect())
    }

    async fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<ReadReceipt> {
        let mut tables = self.tables.write().await;

        if !tables.notifications.contains_key(&notification_id) {
            return Err(notification_not_found(notification_id));
        }

        let link = tables
            .links
            .get_mut(&user_id)
            .and_then(|links| links.get_mut(&notification_id))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Notification '{}' is not linked to this user",
                    notification_id
                ))
            })?;
        link.read_at = Some(at);
        link.updated_at = at;

        let stored = tables
            .notifications
            .get_mut(&notification_id)
            .ok_or_else(|| notification_not_found(notification_id))?;
        stored.row.view_counter += 1;

        Ok(ReadReceipt {
            notification_id,
            read_at: at,
            view_counter: stored.row.view_counter,
        })
    }

    async fn toggle_category(
        &self,
        user_id: Uuid,
        category_id: Uuid,
    ) -> Result<UserCategoryPreference> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&category_id) {
            return Err(category_not_found(category_id));
        }

        let now = Utc::now();
        let preference = tables
            .preferences
            .entry((user_id, category_id))
            .or_insert_with(|| UserCategoryPreference {
                id: Uuid::now_v7(),
                user_id,
                category_id,
                is_hidden: false,
                created_at: now,
                updated_at: now,
            });
        preference.is_hidden = !preference.is_hidden;
        preference.updated_at = now;

        Ok(preference.clone())
    }

    async fn list_preferences(&self, user_id: Uuid) -> Result<Vec<UserCategoryPreference>> {
        let tables = self.tables.read().await;
        let mut preferences: Vec<UserCategoryPreference> = tables
            .preferences
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        preferences.sort_by_key(|p| p.created_at);

        Ok(preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    async fn category(store: &MemoryNotificationStore, name: &str) -> NotificationCategory {
        store
            .create_category(NewCategory {
                name: name.to_string(),
                color: Some("#3b82f6".to_string()),
                description: None,
            })
            .await
            .unwrap()
    }

    async fn notify(store: &MemoryNotificationStore, category_id: Uuid, title: &str) -> Uuid {
        store
            .create_notification(NewNotification {
                title: title.to_string(),
                text: format!("{} body", title),
                category_id,
            })
            .await
            .unwrap()
            .notification
            .id
    }

    fn titles(list: &[NotificationWithCategory]) -> Vec<String> {
        list.iter().map(|n| n.notification.title.clone()).collect()
    }

    #[tokio::test]
    async fn test_ensure_user_is_idempotent() {
        let store = MemoryNotificationStore::new();
        let first = store.ensure_user("acc-1", Some("Ada")).await.unwrap();
        let second = store.ensure_user("acc-1", None).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.display_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_fan_out_reaches_registered_users_only() {
        let store = MemoryNotificationStore::new();
        let early = store.ensure_user("early", None).await.unwrap();
        let cat = category(&store, "General").await;

        let created = store
            .create_notification(NewNotification {
                title: "Hello".to_string(),
                text: "World".to_string(),
                category_id: cat.id,
            })
            .await
            .unwrap();
        assert_eq!(created.recipients, 1);
        assert_eq!(created.notification.view_counter, 0);

        let late = store.ensure_user("late", None).await.unwrap();

        assert_eq!(store.unread_visible(early.id).await.unwrap().len(), 1);
        assert!(store.unread_visible(late.id).await.unwrap().is_empty());

        let result = store
            .mark_read(late.id, created.notification.id, Utc::now())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let unchanged = store
            .find_notification(created.notification.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.view_counter, 0);
    }

    #[tokio::test]
    async fn test_unread_visible_newest_first() {
        let store = MemoryNotificationStore::new();
        let user = store.ensure_user("acc", None).await.unwrap();
        let cat = category(&store, "General").await;

        notify(&store, cat.id, "A").await;
        notify(&store, cat.id, "B").await;
        notify(&store, cat.id, "C").await;

        let list = store.unread_visible(user.id).await.unwrap();
        assert_eq!(titles(&list), vec!["C", "B", "A"]);
        assert_eq!(list[0].category_name, "General");
    }

    #[tokio::test]
    async fn test_mark_read_increments_counter_every_call() {
        let store = MemoryNotificationStore::new();
        let user = store.ensure_user("acc", None).await.unwrap();
        let cat = category(&store, "General").await;
        let id = notify(&store, cat.id, "A").await;

        let first = store.mark_read(user.id, id, Utc::now()).await.unwrap();
        assert_eq!(first.view_counter, 1);
        assert!(store.unread_visible(user.id).await.unwrap().is_empty());

        let second = store.mark_read(user.id, id, Utc::now()).await.unwrap();
        assert_eq!(second.view_counter, 2);
        assert!(second.read_at >= first.read_at);
    }

    #[tokio::test]
    async fn test_mark_read_unknown_notification() {
        let store = MemoryNotificationStore::new();
        let user = store.ensure_user("acc", None).await.unwrap();

        assert_err!(store.mark_read(user.id, Uuid::now_v7(), Utc::now()).await);
    }

    #[tokio::test]
    async fn test_toggle_alternates_and_filters() {
        let store = MemoryNotificationStore::new();
        let user = store.ensure_user("acc", None).await.unwrap();
        let muted = category(&store, "Muted").await;
        let other = category(&store, "Other").await;
        notify(&store, muted.id, "M1").await;
        notify(&store, muted.id, "M2").await;
        notify(&store, other.id, "O1").await;

        for round in 1..=4 {
            let pref = store.toggle_category(user.id, muted.id).await.unwrap();
            assert_eq!(pref.is_hidden, round % 2 == 1);

            let list = store.unread_visible(user.id).await.unwrap();
            if pref.is_hidden {
                assert_eq!(titles(&list), vec!["O1"]);
            } else {
                assert_eq!(titles(&list), vec!["O1", "M2", "M1"]);
            }
        }

        assert_eq!(store.list_preferences(user.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_unknown_category() {
        let store = MemoryNotificationStore::new();
        let user = store.ensure_user("acc", None).await.unwrap();

        let result = store.toggle_category(user.id, Uuid::now_v7()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(store.list_preferences(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deactivated_category_hides_unread() {
        let store = MemoryNotificationStore::new();
        let user = store.ensure_user("acc", None).await.unwrap();
        let cat = category(&store, "Retiring").await;
        notify(&store, cat.id, "X").await;
        notify(&store, cat.id, "Y").await;
        assert_eq!(store.unread_visible(user.id).await.unwrap().len(), 2);

        assert_ok!(store.deactivate_category(cat.id).await);

        assert!(store.unread_visible(user.id).await.unwrap().is_empty());
        assert!(store.list_preferences(user.id).await.unwrap().is_empty());
        let (active, total) = store.list_active_categories(0, 20).await.unwrap();
        assert!(active.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_delete_notification_removes_links() {
        let store = MemoryNotificationStore::new();
        let user = store.ensure_user("acc", None).await.unwrap();
        let cat = category(&store, "General").await;
        let id = notify(&store, cat.id, "Gone").await;

        store.delete_notification(id).await.unwrap();

        assert!(store.unread_visible(user.id).await.unwrap().is_empty());
        assert_err!(store.mark_read(user.id, id, Utc::now()).await);
        assert_err!(store.delete_notification(id).await);
    }

    #[tokio::test]
    async fn test_update_notification_moves_category() {
        let store = MemoryNotificationStore::new();
        let user = store.ensure_user("acc", None).await.unwrap();
        let from = category(&store, "From").await;
        let to = category(&store, "To").await;
        let id = notify(&store, from.id, "Moving").await;

        store.toggle_category(user.id, to.id).await.unwrap();
        let updated = store
            .update_notification(
                id,
                NotificationChanges {
                    title: None,
                    text: Some("new body".to_string()),
                    category_id: to.id,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Moving");
        assert_eq!(updated.text, "new body");
        assert!(store.unread_visible(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_notifications_paginates_newest_first() {
        let store = MemoryNotificationStore::new();
        let cat = category(&store, "General").await;
        for title in ["1", "2", "3"] {
            notify(&store, cat.id, title).await;
        }

        let (page, total) = store.list_notifications(1, 1).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(titles(&page), vec!["2"]);
    }
}
