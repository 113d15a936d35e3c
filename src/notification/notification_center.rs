use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use uuid::Uuid;

use super::notification_models::{Notification, NotificationEvent};
use crate::websocket::{ConnectionState, ServerMessage};

/// In-memory notification list and connection status for one session.
#[derive(Clone)]
pub struct NotificationCenter {
    items: Arc<DashMap<Uuid, Notification>>,
    state: Arc<watch::Sender<ConnectionState>>,
    events: broadcast::Sender<NotificationEvent>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ConnectionState::Connecting);
        let (events, _) = broadcast::channel(100);

        Self {
            items: Arc::new(DashMap::new()),
            state: Arc::new(state),
            events,
        }
    }

    /// Parses one server frame. Unknown shapes are logged and dropped.
    pub fn handle_frame(&self, text: &str) {
        match serde_json::from_str::<ServerMessage>(text) {
            Ok(ServerMessage::Notification { notification }) => self.push(notification),
            Err(e) => tracing::error!("Ignoring unrecognised notification frame ({}): {}", e, text),
        }
    }

    pub fn push(&self, notification: Notification) {
        tracing::debug!("Notification received: {}", notification.title);
        self.items.insert(notification.id, notification.clone());
        let _ = self
            .events
            .send(NotificationEvent::Notification { notification });
    }

    /// Flips `is_read` locally without waiting for the server.
    pub fn mark_read(&self, id: Uuid) -> Option<Notification> {
        let updated = self.items.get_mut(&id).map(|mut entry| {
            entry.is_read = true;
            entry.clone()
        })?;

        let _ = self.events.send(NotificationEvent::Read { notification_id: id });
        Some(updated)
    }

    /// Newest first.
    pub fn list(&self) -> Vec<Notification> {
        let mut items: Vec<Notification> = self.items.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|e| !e.is_read).count()
    }

    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state.borrow().is_connected()
    }

    pub fn set_state(&self, state: ConnectionState) {
        self.state.send_replace(state.clone());
        let _ = self
            .events
            .send(NotificationEvent::Connection { connection: state });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
