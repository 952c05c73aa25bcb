use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::model::UserRecord;
use crate::modules::store::NotificationStore;

/// Keeps the registered-user set in step with authenticated callers
pub struct UserService {
    store: Arc<dyn NotificationStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Register the caller on first sight; later calls return the existing row.
    ///
    /// Users registered after a notification was created never receive a link
    /// to it, so they will not see that notification.
    pub async fn ensure_registered(&self, user: &AuthenticatedUser) -> Result<UserRecord> {
        self.store
            .ensure_user(&user.account_id, user.name.as_deref())
            .await
    }
}
