use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::notification::NotificationCenter;

use super::{
    backoff::Backoff,
    connector::{Connector, Transport},
    types::{ClientMessage, ConnectionState},
};

pub type OutgoingSender = mpsc::UnboundedSender<ClientMessage>;

enum ServeEnd {
    Disconnected,
    SessionClosed,
}

/// One notification socket: connects, pumps frames, reconnects with backoff until the cap.
pub struct NotificationSocket {
    url: String,
    connector: Arc<dyn Connector>,
    backoff: Backoff,
    center: NotificationCenter,
}

impl NotificationSocket {
    pub fn new(
        url: String,
        connector: Arc<dyn Connector>,
        backoff: Backoff,
        center: NotificationCenter,
    ) -> Self {
        Self {
            url,
            connector,
            backoff,
            center,
        }
    }

    /// Runs until the reconnect budget is spent or `outgoing` is closed by the owner.
    pub async fn run(self, mut outgoing: mpsc::UnboundedReceiver<ClientMessage>) {
        let mut failures: u32 = 0;

        loop {
            self.center.set_state(ConnectionState::Connecting);

            match self.connector.connect(&self.url).await {
                Ok(transport) => {
                    failures = 0;
                    self.center.set_state(ConnectionState::Connected);
                    tracing::info!("Notification socket connected");

                    if let ServeEnd::SessionClosed = self.serve(transport, &mut outgoing).await {
                        self.center.set_state(ConnectionState::Closed);
                        return;
                    }
                    tracing::warn!("Notification socket disconnected");
                }
                Err(e) => {
                    tracing::warn!("Notification socket connect failed: {}", e);
                }
            }

            failures += 1;
            match self.backoff.delay(failures) {
                Some(delay) => {
                    tracing::debug!(
                        "Reconnecting notification socket in {:?} (attempt {}/{})",
                        delay,
                        failures,
                        self.backoff.max_attempts()
                    );
                    self.center.set_state(ConnectionState::Reconnecting {
                        attempt: failures,
                        delay_ms: delay.as_millis() as u64,
                    });
                    tokio::time::sleep(delay).await;
                }
                None => {
                    let attempts = failures - 1;
                    tracing::error!(
                        "Giving up on notification socket after {} reconnect attempts",
                        attempts
                    );
                    self.center.set_state(ConnectionState::GaveUp { attempts });
                    return;
                }
            }
        }
    }

    async fn serve(
        &self,
        transport: Transport,
        outgoing: &mut mpsc::UnboundedReceiver<ClientMessage>,
    ) -> ServeEnd {
        let Transport {
            mut incoming,
            outgoing: mut sink,
        } = transport;

        loop {
            tokio::select! {
                frame = incoming.next() => match frame {
                    Some(Ok(text)) => self.center.handle_frame(&text),
                    Some(Err(e)) => {
                        tracing::warn!("Notification socket error: {}", e);
                        return ServeEnd::Disconnected;
                    }
                    None => return ServeEnd::Disconnected,
                },
                message = outgoing.recv() => match message {
                    Some(message) => {
                        let json = match serde_json::to_string(&message) {
                            Ok(json) => json,
                            Err(e) => {
                                tracing::error!("Failed to encode {:?}: {}", message, e);
                                continue;
                            }
                        };
                        if let Err(e) = sink.send(json).await {
                            tracing::warn!("Failed to send on notification socket: {}", e);
                            return ServeEnd::Disconnected;
                        }
                    }
                    None => {
                        let _ = sink.close().await;
                        return ServeEnd::SessionClosed;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{channel_transport, ScriptedConnector};
    use crate::websocket::types::ChannelError;
    use serde_json::json;
    use std::time::Duration;
    use uuid::Uuid;

    fn fast_backoff(max_attempts: u32) -> Backoff {
        Backoff::new(Duration::from_millis(1), Duration::from_millis(4), max_attempts)
    }

    #[tokio::test]
    async fn test_gives_up_after_five_reconnect_attempts() {
        let connector = Arc::new(ScriptedConnector::new(Vec::new()));
        let center = NotificationCenter::new();
        let socket = NotificationSocket::new(
            "ws://fleet.test/ws/notifications/?token=t".into(),
            connector.clone(),
            fast_backoff(5),
            center.clone(),
        );
        let (_tx, rx) = mpsc::unbounded_channel();

        tokio::time::timeout(Duration::from_secs(5), socket.run(rx))
            .await
            .expect("socket loop should stop on its own");

        // The initial attempt plus five reconnects.
        assert_eq!(connector.calls(), 6);
        assert_eq!(center.state(), ConnectionState::GaveUp { attempts: 5 });
        assert!(!center.is_connected());
    }

    #[tokio::test]
    async fn test_pushes_notifications_and_sends_mark_read() {
        let (transport, server_tx, mut client_rx) = channel_transport();
        let connector = Arc::new(ScriptedConnector::new(vec![transport]));
        let center = NotificationCenter::new();
        let socket = NotificationSocket::new(
            "ws://fleet.test/ws/notifications/?token=t".into(),
            connector.clone(),
            fast_backoff(0),
            center.clone(),
        );
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(socket.run(out_rx));

        let id = Uuid::new_v4();
        let frame = json!({
            "type": "notification",
            "notification": {
                "id": id,
                "title": "Walkaround failed",
                "body": "AB12 CDE failed its walkaround",
                "type": "alert",
                "is_read": false,
                "created_at": "2024-05-01T09:00:00Z"
            }
        });
        server_tx.unbounded_send(Ok(frame.to_string())).unwrap();
        server_tx
            .unbounded_send(Ok(r#"{"type":"presence"}"#.to_string()))
            .unwrap();

        out_tx
            .send(ClientMessage::MarkRead { notification_id: id })
            .unwrap();
        let sent = tokio::time::timeout(Duration::from_secs(2), client_rx.next())
            .await
            .unwrap()
            .unwrap();
        let sent: serde_json::Value = serde_json::from_str(&sent).unwrap();
        assert_eq!(sent, json!({ "type": "mark_read", "notification_id": id }));

        for _ in 0..100 {
            if center.len() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(center.len(), 1);
        assert!(center.is_connected());

        drop(out_tx);
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(center.state(), ConnectionState::Closed);
    }

    #[tokio::test]
    async fn test_reconnects_after_server_close() {
        let (first, first_server, _first_client) = channel_transport();
        let (second, _second_server, _second_client) = channel_transport();
        let connector = Arc::new(ScriptedConnector::new(vec![first, second]));
        let center = NotificationCenter::new();
        let socket = NotificationSocket::new(
            "ws://fleet.test/ws/notifications/?token=t".into(),
            connector.clone(),
            fast_backoff(5),
            center.clone(),
        );
        let (_out_tx, out_rx) = mpsc::unbounded_channel();
        let _handle = tokio::spawn(socket.run(out_rx));

        first_server.unbounded_send(Err(ChannelError::Closed)).unwrap();

        for _ in 0..100 {
            if connector.calls() == 2 && center.is_connected() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(connector.calls(), 2);
        assert!(center.is_connected());
    }
}
