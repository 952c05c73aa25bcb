pub mod inbox_handler;
pub mod notification_handler;

pub use inbox_handler::{
    __path_get_state, __path_list_unread, __path_mark_read, get_state, list_unread, mark_read,
    InboxState,
};
pub use notification_handler::{
    __path_create_notification, __path_delete_notification, __path_get_notification,
    __path_list_notifications, __path_update_notification, create_notification,
    delete_notification, get_notification, list_notifications, update_notification,
};
