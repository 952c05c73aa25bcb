//! Per-user notification category preferences.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/notifications/preferences` | List the caller's preference rows |
//! | POST | `/api/notifications/preferences/toggle-category` | Flip a category's hidden flag |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PreferenceService;
