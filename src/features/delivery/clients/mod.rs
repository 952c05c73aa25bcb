mod notification_api_client;

pub use notification_api_client::{ClientError, HttpNotificationApi, NotificationApi};
