use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::notification_models::Notification;
use crate::websocket::ConnectionState;

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationList {
    pub items: Vec<Notification>,
    pub unread_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationStatus {
    pub connection: ConnectionState,
    pub is_connected: bool,
    /// No further reconnect attempts will be made.
    pub terminal: bool,
    pub unread_count: usize,
    pub total: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TestMessageRequest {
    #[validate(length(min = 1, max = 500, message = "Message must be 1 to 500 characters"))]
    pub body: String,
}
