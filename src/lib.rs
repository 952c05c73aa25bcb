//! Broadcast notification center: admin publishing, per-user read tracking,
//! category muting and a client-side toast delivery queue.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
