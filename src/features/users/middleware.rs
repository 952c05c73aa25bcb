use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::model::CurrentUser;
use crate::features::users::services::UserService;

/// Resolve the authenticated caller to a registered user and attach `CurrentUser`.
///
/// Must run after `auth_middleware`.
pub async fn register_user_middleware(
    State(service): State<Arc<UserService>>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let user = req
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    let record = service.ensure_registered(&user).await?;
    req.extensions_mut().insert(CurrentUser::from(&record));

    Ok(next.run(req).await)
}
