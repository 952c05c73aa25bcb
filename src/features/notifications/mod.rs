//! Broadcast notifications.
//!
//! Administrators publish notifications into categories; each one is linked,
//! unread, to every user registered at that moment. Users see the unread ones
//! whose category is active and not hidden by them (see [`visibility`]).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/notifications/state` | Unread list plus preferences |
//! | GET | `/api/notifications/unread` | Unread list only |
//! | POST | `/api/notifications/{id}/read` | Mark read, returns the refreshed list |
//! | GET | `/api/admin/notifications` | All notifications (paginated) |
//! | POST | `/api/admin/notifications` | Create and fan out |
//! | GET | `/api/admin/notifications/{id}` | Get one |
//! | PUT | `/api/admin/notifications/{id}` | Update |
//! | DELETE | `/api/admin/notifications/{id}` | Delete |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod visibility;

pub use services::{NotificationService, ReadTrackerService, VisibilityService};
