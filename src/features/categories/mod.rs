//! Notification categories.
//!
//! Categories group notifications and are the unit users mute. Administrators
//! manage them; deleting one only deactivates it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/notification-categories` | List active categories (paginated) |
//! | GET | `/api/admin/notification-categories/{id}` | Get a category |
//! | POST | `/api/admin/notification-categories` | Create a category |
//! | PUT | `/api/admin/notification-categories/{id}` | Replace a category |
//! | DELETE | `/api/admin/notification-categories/{id}` | Deactivate a category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
