//! Modules layer - Infrastructure components
//!
//! Contains the persistence backends behind the notification store.

pub mod store;
