use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ROLE_NOTIFICATION_ADMIN, ROLE_SUPER_ADMIN};

/// Identity carried by a validated bearer token issued by the host application
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Stable account identifier (`sub` claim)
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_super_admin(&self) -> bool {
        self.has_role(ROLE_SUPER_ADMIN)
    }

    /// May create, edit and retire notifications and categories
    pub fn can_manage_notifications(&self) -> bool {
        self.is_super_admin() || self.has_role(ROLE_NOTIFICATION_ADMIN)
    }
}
