//! Visibility filter stages.
//!
//! A notification is visible to a user when all three stages admit it:
//!
//! 1. **unread** – the user has a link row with no read timestamp,
//! 2. **active** – its category is active,
//! 3. **not hidden** – the user has no `is_hidden = true` preference for its category.
//!
//! Each stage is computed independently as a set of notification ids and the
//! result is their intersection. The in-memory store calls [`visible_ids`]
//! directly; the Postgres store expresses the same stages as `INTERSECT`ed
//! sub-selects.

use std::collections::HashSet;

use uuid::Uuid;

use crate::features::notifications::models::Notification;

/// Snapshot of the per-user inputs the stages are computed from
#[derive(Debug, Default, Clone)]
pub struct VisibilityInputs {
    /// Notification ids linked to the user with `read_at IS NULL`
    pub unread: HashSet<Uuid>,
    /// Category ids with `is_active = true`
    pub active_categories: HashSet<Uuid>,
    /// Category ids the user has hidden
    pub hidden_categories: HashSet<Uuid>,
}

pub fn active_stage<'a, I>(notifications: I, inputs: &VisibilityInputs) -> HashSet<Uuid>
where
    I: IntoIterator<Item = &'a Notification>,
{
    notifications
        .into_iter()
        .filter(|n| inputs.active_categories.contains(&n.category_id))
        .map(|n| n.id)
        .collect()
}

pub fn not_hidden_stage<'a, I>(notifications: I, inputs: &VisibilityInputs) -> HashSet<Uuid>
where
    I: IntoIterator<Item = &'a Notification>,
{
    notifications
        .into_iter()
        .filter(|n| !inputs.hidden_categories.contains(&n.category_id))
        .map(|n| n.id)
        .collect()
}

/// Ids of the notifications admitted by every stage
pub fn visible_ids(notifications: &[&Notification], inputs: &VisibilityInputs) -> HashSet<Uuid> {
    let active = active_stage(notifications.iter().copied(), inputs);
    let not_hidden = not_hidden_stage(notifications.iter().copied(), inputs);

    inputs
        .unread
        .intersection(&active)
        .filter(|id| not_hidden.contains(id))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn notification(category_id: Uuid) -> Notification {
        let now = Utc::now();
        Notification {
            id: Uuid::now_v7(),
            title: "title".to_string(),
            text: "text".to_string(),
            view_counter: 0,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_all_stages_admit() {
        let category = Uuid::now_v7();
        let n = notification(category);
        let inputs = VisibilityInputs {
            unread: HashSet::from([n.id]),
            active_categories: HashSet::from([category]),
            hidden_categories: HashSet::new(),
        };

        assert_eq!(visible_ids(&[&n], &inputs), HashSet::from([n.id]));
    }

    #[test]
    fn test_read_notification_excluded() {
        let category = Uuid::now_v7();
        let n = notification(category);
        let inputs = VisibilityInputs {
            unread: HashSet::new(),
            active_categories: HashSet::from([category]),
            hidden_categories: HashSet::new(),
        };

        assert!(visible_ids(&[&n], &inputs).is_empty());
    }

    #[test]
    fn test_inactive_category_excluded_even_if_unread() {
        let category = Uuid::now_v7();
        let a = notification(category);
        let b = notification(category);
        let inputs = VisibilityInputs {
            unread: HashSet::from([a.id, b.id]),
            active_categories: HashSet::new(),
            hidden_categories: HashSet::new(),
        };

        assert!(visible_ids(&[&a, &b], &inputs).is_empty());
    }

    #[test]
    fn test_hidden_category_excluded_others_kept() {
        let muted = Uuid::now_v7();
        let other = Uuid::now_v7();
        let a = notification(muted);
        let b = notification(other);
        let inputs = VisibilityInputs {
            unread: HashSet::from([a.id, b.id]),
            active_categories: HashSet::from([muted, other]),
            hidden_categories: HashSet::from([muted]),
        };

        assert_eq!(visible_ids(&[&a, &b], &inputs), HashSet::from([b.id]));
    }

    #[test]
    fn test_unread_id_without_notification_row_is_dropped() {
        let category = Uuid::now_v7();
        let n = notification(category);
        let inputs = VisibilityInputs {
            unread: HashSet::from([n.id, Uuid::now_v7()]),
            active_categories: HashSet::from([category]),
            hidden_categories: HashSet::new(),
        };

        assert_eq!(visible_ids(&[&n], &inputs), HashSet::from([n.id]));
    }
}
