mod notification_service;
mod read_tracker_service;
mod visibility_service;

pub use notification_service::NotificationService;
pub use read_tracker_service::ReadTrackerService;
pub use visibility_service::VisibilityService;
