use axum::{
    routing::{get, post},
    Router,
};

use super::notification_handlers;
use crate::state::AppState;

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notification_handlers::list_notifications))
        .route("/status", get(notification_handlers::notification_status))
        .route("/stream", get(notification_handlers::notification_stream))
        .route("/test", post(notification_handlers::send_test_message))
        .route(
            "/:id/read",
            post(notification_handlers::mark_notification_read),
        )
}
