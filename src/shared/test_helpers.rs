use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{from_fn_with_state, Next},
    response::Response,
    Router,
};

use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::middleware::register_user_middleware;
use crate::features::users::UserService;
use crate::modules::store::NotificationStore;
use crate::shared::constants::ROLE_NOTIFICATION_ADMIN;

pub fn admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        account_id: "test-admin".to_string(),
        name: Some("Test Admin".to_string()),
        roles: vec![ROLE_NOTIFICATION_ADMIN.to_string()],
    }
}

pub fn member_user(account_id: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        account_id: account_id.to_string(),
        name: None,
        roles: vec![],
    }
}

async fn inject_user_middleware(
    State(user): State<AuthenticatedUser>,
    mut request: Request,
    next: Next,
) -> Response {
    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Wrap `router` so every request is authenticated as `user` and registered in `store`
pub fn with_user(
    router: Router,
    store: Arc<dyn NotificationStore>,
    user: AuthenticatedUser,
) -> Router {
    let user_service = Arc::new(UserService::new(store));

    router
        .layer(from_fn_with_state(user_service, register_user_middleware))
        .layer(from_fn_with_state(user, inject_user_middleware))
}
