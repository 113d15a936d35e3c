use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Sse,
    },
    Json,
};
use futures::stream::Stream;
use std::{convert::Infallible, sync::Arc};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use uuid::Uuid;
use validator::Validate;

use super::{
    notification_dto::{NotificationList, NotificationStatus, TestMessageRequest},
    notification_hub::NotificationChannel,
    notification_models::{Notification, NotificationEvent},
};
use crate::{
    auth::auth_dto::MessageResponse,
    error::{AppError, Result},
    middleware::Session,
    state::AppState,
};

fn channel(state: &AppState, session: &Session) -> Arc<NotificationChannel> {
    state
        .notification_hub
        .ensure(&session.key(), session.token())
}

/// Notifications received on this session's socket
#[utoipa::path(
    get,
    path = "/dashboard/notifications",
    responses((status = 200, description = "Newest first", body = NotificationList)),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    session: Session,
) -> Json<NotificationList> {
    let center = channel(&state, &session).center().clone();
    Json(NotificationList {
        items: center.list(),
        unread_count: center.unread_count(),
    })
}

/// Socket connection state
#[utoipa::path(
    get,
    path = "/dashboard/notifications/status",
    responses((status = 200, description = "Connection state", body = NotificationStatus)),
    tag = "notifications"
)]
pub async fn notification_status(
    State(state): State<AppState>,
    session: Session,
) -> Json<NotificationStatus> {
    let center = channel(&state, &session).center().clone();
    let connection = center.state();
    Json(NotificationStatus {
        is_connected: connection.is_connected(),
        terminal: connection.is_terminal(),
        connection,
        unread_count: center.unread_count(),
        total: center.len(),
    })
}

/// Mark a notification as read
#[utoipa::path(
    post,
    path = "/dashboard/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked read locally; server informed", body = Notification),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications"
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>> {
    channel(&state, &session)
        .mark_read(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))
}

/// Send a test message over the socket
#[utoipa::path(
    post,
    path = "/dashboard/notifications/test",
    request_body = TestMessageRequest,
    responses(
        (status = 202, description = "Queued on the socket", body = MessageResponse),
        (status = 422, description = "Validation error")
    ),
    tag = "notifications"
)]
pub async fn send_test_message(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<TestMessageRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    channel(&state, &session).send_test_message(payload.body);

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "Test message sent".to_string(),
        }),
    ))
}

/// Live notifications and connection changes via Server-Sent Events
#[utoipa::path(
    get,
    path = "/dashboard/notifications/stream",
    responses((status = 200, description = "SSE stream of notification events")),
    tag = "notifications"
)]
pub async fn notification_stream(
    State(state): State<AppState>,
    session: Session,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let center = channel(&state, &session).center().clone();

    let current = NotificationEvent::Connection {
        connection: center.state(),
    };
    let updates = BroadcastStream::new(center.subscribe()).filter_map(|msg| match msg {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!("Notification stream lagged: {}", e);
            None
        }
    });

    let stream = tokio_stream::once(current)
        .chain(updates)
        .filter_map(|event| to_sse(&event).map(Ok));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn to_sse(event: &NotificationEvent) -> Option<Event> {
    match Event::default().event(event.name()).json_data(event) {
        Ok(sse) => Some(sse),
        Err(e) => {
            tracing::error!("Failed to encode notification event: {}", e);
            None
        }
    }
}
