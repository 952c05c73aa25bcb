mod notification_dto;

pub use notification_dto::{
    CreateNotificationDto, CreateNotificationResponseDto, NotificationDto, NotificationRecordDto,
    NotificationStateDto, UpdateNotificationDto,
};
