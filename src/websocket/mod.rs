pub mod backoff;
pub mod client;
pub mod connector;
pub mod types;

pub use backoff::Backoff;
pub use client::{NotificationSocket, OutgoingSender};
pub use connector::{Connector, Transport, TungsteniteConnector};
pub use types::{ChannelError, ClientMessage, ConnectionState, ServerMessage};
