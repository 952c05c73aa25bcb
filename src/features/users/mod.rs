//! User registration.
//!
//! Authentication lives in the host application; this feature only records
//! which accounts exist so new notifications can be fanned out to them.

pub mod middleware;
pub mod model;
pub mod services;

pub use services::UserService;
