mod notification;
mod notification_link;

pub use notification::{
    CreatedNotification, NewNotification, Notification, NotificationChanges,
    NotificationWithCategory,
};
pub use notification_link::{ReadReceipt, UserNotificationLink};
