use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::websocket::ConnectionState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    #[serde(alias = "message")]
    pub body: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

fn default_kind() -> String {
    "info".to_string()
}

/// What the browser stream carries.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NotificationEvent {
    Notification { notification: Notification },
    Read { notification_id: Uuid },
    Connection { connection: ConnectionState },
}

impl NotificationEvent {
    pub fn name(&self) -> &'static str {
        match self {
            NotificationEvent::Notification { .. } => "notification",
            NotificationEvent::Read { .. } => "read",
            NotificationEvent::Connection { .. } => "connection",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_accepts_legacy_field_names() {
        let notification: Notification = serde_json::from_value(json!({
            "id": "5d3c1f0e-8c43-4b8e-9b0e-2b0c6f0f6a11",
            "title": "Tax due",
            "message": "Vehicle tax expires tomorrow",
            "timestamp": "2024-03-01T08:30:00Z"
        }))
        .unwrap();

        assert_eq!(notification.body, "Vehicle tax expires tomorrow");
        assert_eq!(notification.kind, "info");
        assert!(!notification.is_read);
    }
}
