use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};
use uuid::Uuid;

use super::{notification_center::NotificationCenter, notification_models::Notification};
use crate::websocket::{
    Backoff, ClientMessage, ConnectionState, Connector, NotificationSocket, OutgoingSender,
};

/// A signed-in session's notification socket and its local state.
pub struct NotificationChannel {
    center: NotificationCenter,
    outgoing: OutgoingSender,
    task: JoinHandle<()>,
    /// Access token the socket authenticates with.
    token: String,
}

impl NotificationChannel {
    pub fn center(&self) -> &NotificationCenter {
        &self.center
    }

    /// Optimistically marks the notification read, then tells the server.
    pub fn mark_read(&self, id: Uuid) -> Option<Notification> {
        let updated = self.center.mark_read(id)?;
        self.send(ClientMessage::MarkRead { notification_id: id });
        Some(updated)
    }

    pub fn send_test_message(&self, body: String) {
        self.send(ClientMessage::TestMessage { body });
    }

    fn send(&self, message: ClientMessage) {
        if self.outgoing.send(message).is_err() {
            tracing::warn!(
                "Notification socket is no longer running ({:?}); message dropped",
                self.center.state()
            );
        }
    }
}

/// Registry of notification channels keyed by session owner.
#[derive(Clone)]
pub struct NotificationHub {
    channels: Arc<DashMap<String, Arc<NotificationChannel>>>,
    ws_base_url: String,
    backoff: Backoff,
    connector: Arc<dyn Connector>,
}

impl NotificationHub {
    pub fn new(ws_base_url: String, backoff: Backoff, connector: Arc<dyn Connector>) -> Self {
        Self {
            channels: Arc::new(DashMap::new()),
            ws_base_url,
            backoff,
            connector,
        }
    }

    pub fn socket_url(&self, token: &str) -> String {
        format!("{}/ws/notifications/?token={}", self.ws_base_url, token)
    }

    /// Returns the session's channel, opening the socket on first use.
    ///
    /// A different access token (refresh or a new sign-in) replaces the socket.
    /// Notifications already received are kept.
    pub fn ensure(&self, key: &str, token: &str) -> Arc<NotificationChannel> {
        match self.channels.entry(key.to_string()) {
            Entry::Occupied(mut slot) => {
                if slot.get().token == token {
                    return slot.get().clone();
                }

                tracing::info!(
                    "Access token changed, reopening notification socket for session {}",
                    key
                );
                slot.get().task.abort();
                let channel = Arc::new(self.open(token, slot.get().center.clone()));
                slot.insert(channel.clone());
                channel
            }
            Entry::Vacant(slot) => {
                tracing::info!("Opening notification socket for session {}", key);
                let channel = Arc::new(self.open(token, NotificationCenter::new()));
                slot.insert(channel.clone());
                channel
            }
        }
    }

    fn open(&self, token: &str, center: NotificationCenter) -> NotificationChannel {
        center.set_state(ConnectionState::Connecting);
        let (outgoing, rx) = mpsc::unbounded_channel();
        let socket = NotificationSocket::new(
            self.socket_url(token),
            self.connector.clone(),
            self.backoff.clone(),
            center.clone(),
        );
        let task = tokio::spawn(socket.run(rx));

        NotificationChannel {
            center,
            outgoing,
            task,
            token: token.to_string(),
        }
    }

    pub fn close(&self, key: &str) {
        if let Some((_, channel)) = self.channels.remove(key) {
            channel.task.abort();
            channel.center.set_state(ConnectionState::Closed);
            tracing::info!(
                "Closed notification socket for session {} ({} still open)",
                key,
                self.open_count()
            );
        }
    }

    pub fn open_count(&self) -> usize {
        self.channels.len()
    }
}
