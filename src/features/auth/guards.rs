//! Role guards for the administrative notification flows.
//!
//! Regular members only need a valid token; creating, editing and retiring
//! notifications or categories requires `super_admin` or `notification_admin`.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for notification administration.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireNotificationAdmin(user): RequireNotificationAdmin) { ... }
/// ```
pub struct RequireNotificationAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireNotificationAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.can_manage_notifications() {
            return Err(AppError::Forbidden(
                "Notification admin access required".to_string(),
            ));
        }

        Ok(RequireNotificationAdmin(user.clone()))
    }
}
