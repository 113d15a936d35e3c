use async_trait::async_trait;
use futures::{
    sink::{Sink, SinkExt},
    stream::{BoxStream, StreamExt},
};
use std::pin::Pin;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::types::ChannelError;

pub type FrameSink = Pin<Box<dyn Sink<String, Error = ChannelError> + Send>>;

/// An open socket reduced to text frames in both directions.
pub struct Transport {
    pub incoming: BoxStream<'static, Result<String, ChannelError>>,
    pub outgoing: FrameSink,
}

#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self, url: &str) -> Result<Transport, ChannelError>;
}

/// Production connector backed by tokio-tungstenite.
pub struct TungsteniteConnector;

#[async_trait]
impl Connector for TungsteniteConnector {
    async fn connect(&self, url: &str) -> Result<Transport, ChannelError> {
        let (socket, _response) = connect_async(url)
            .await
            .map_err(|e| ChannelError::Connect(e.to_string()))?;

        let (sink, stream) = socket.split();

        let incoming = stream
            .filter_map(|frame| async move {
                match frame {
                    Ok(Message::Text(text)) => Some(Ok(text)),
                    Ok(Message::Close(_)) => Some(Err(ChannelError::Closed)),
                    Ok(_) => None,
                    Err(e) => Some(Err(ChannelError::Transport(e.to_string()))),
                }
            })
            .boxed();

        let outgoing = sink
            .with(|text: String| async move {
                Ok::<_, tokio_tungstenite::tungstenite::Error>(Message::Text(text))
            })
            .sink_map_err(|e| ChannelError::Transport(e.to_string()));

        Ok(Transport {
            incoming,
            outgoing: Box::pin(outgoing),
        })
    }
}
