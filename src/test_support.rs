//! Helpers shared by the unit tests: an in-process fake of the fleet API and token minting.

use axum::Router;
use chrono::{Duration, Utc, Weekday};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use std::sync::Arc;

use crate::{
    notification::NotificationHub,
    state::{AppState, Config},
    websocket::{Backoff, ChannelError, Connector, Transport},
};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// HS256 token expiring `expires_in_secs` from now (negative for already expired).
pub fn mint_token(expires_in_secs: i64, secret: &str) -> String {
    let exp = (Utc::now() + Duration::seconds(expires_in_secs)).timestamp();
    encode(
        &Header::default(),
        &json!({ "exp": exp, "user_id": 42, "role": "manager", "token_type": "access" }),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn test_config(api_base_url: &str) -> Config {
    Config {
        api_base_url: api_base_url.to_string(),
        ws_base_url: "ws://127.0.0.1:9".to_string(),
        jwt_secret: None,
        cookie_secure: false,
        ws_max_reconnect_attempts: 5,
        ws_reconnect_base: std::time::Duration::from_millis(1),
        ws_reconnect_max: std::time::Duration::from_millis(5),
        week_start: Weekday::Mon,
        currency_symbol: "£".to_string(),
    }
}

/// Connector that never reaches a server.
pub struct RefusingConnector;

#[async_trait::async_trait]
impl Connector for RefusingConnector {
    async fn connect(&self, _url: &str) -> Result<Transport, ChannelError> {
        Err(ChannelError::Connect("connection refused".to_string()))
    }
}

/// App state wired to a fake upstream, with notification sockets that never connect.
pub fn test_state(api_base_url: &str) -> AppState {
    let config = test_config(api_base_url);
    let mut state = AppState::new(config.clone()).unwrap();
    state.notification_hub = NotificationHub::new(
        config.ws_base_url.clone(),
        Backoff::new(
            std::time::Duration::from_millis(1),
            std::time::Duration::from_millis(2),
            0,
        ),
        Arc::new(RefusingConnector),
    );
    state
}

/// Connector that hands out pre-built transports in order, then refuses.
pub struct ScriptedConnector {
    transports: std::sync::Mutex<std::collections::VecDeque<Transport>>,
    calls: std::sync::atomic::AtomicU32,
}

impl ScriptedConnector {
    pub fn new(transports: Vec<Transport>) -> Self {
        Self {
            transports: std::sync::Mutex::new(transports.into()),
            calls: std::sync::atomic::AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self, _url: &str) -> Result<Transport, ChannelError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.transports
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ChannelError::Connect("connection refused".to_string()))
    }
}

/// In-memory transport: frames pushed on the returned sender arrive as server frames,
/// frames the client sends come out of the returned receiver.
pub fn channel_transport() -> (
    Transport,
    futures::channel::mpsc::UnboundedSender<Result<String, ChannelError>>,
    futures::channel::mpsc::UnboundedReceiver<String>,
) {
    use futures::{SinkExt, StreamExt};

    let (server_tx, server_rx) = futures::channel::mpsc::unbounded();
    let (client_tx, client_rx) = futures::channel::mpsc::unbounded::<String>();

    let transport = Transport {
        incoming: server_rx.boxed(),
        outgoing: Box::pin(client_tx.sink_map_err(|e| ChannelError::Transport(e.to_string()))),
    };

    (transport, server_tx, client_rx)
}
