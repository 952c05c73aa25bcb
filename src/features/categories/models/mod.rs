mod category;

pub use category::{CategoryChanges, NewCategory, NotificationCategory};
