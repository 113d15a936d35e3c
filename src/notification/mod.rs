pub mod notification_center;
pub mod notification_dto;
pub mod notification_handlers;
pub mod notification_hub;
pub mod notification_models;
pub mod routes;

pub use notification_center::NotificationCenter;
pub use notification_hub::NotificationHub;
pub use notification_models::{Notification, NotificationEvent};
