/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Global admin
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Can create, edit and retire notifications and their categories
pub const ROLE_NOTIFICATION_ADMIN: &str = "notification_admin";
