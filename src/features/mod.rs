pub mod auth;
pub mod categories;
pub mod delivery;
pub mod notifications;
pub mod preferences;
pub mod users;
