pub mod messages;
pub mod models;

pub use models::{NewNotification, Notification, NotificationStatus, NotificationType};
