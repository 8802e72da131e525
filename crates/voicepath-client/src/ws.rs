//! WebSocket contribution transport.

use std::time::Duration;

use async_trait::async_trait;
use futures::SinkExt;
use serde::Serialize;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};
use voicepath_protocols::{ContributionMessage, Transport, TransportError};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Frame shape: the message fields plus a `type` discriminator.
#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    message: &'a ContributionMessage,
}

/// Sends each contribution as one text frame over a lazily opened socket.
///
/// A failed send drops the socket; the next send reconnects.
pub struct WsTransport {
    url: String,
    connect_timeout: Duration,
    send_timeout: Duration,
    socket: Mutex<Option<WsStream>>,
}

impl WsTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout: Duration::from_secs(10),
            send_timeout: Duration::from_secs(10),
            socket: Mutex::new(None),
        }
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, send_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.send_timeout = send_timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn is_connected(&self) -> bool {
        self.socket.lock().await.is_some()
    }

    /// Close the socket if open. The next send reconnects.
    pub async fn close(&self) {
        if let Some(mut stream) = self.socket.lock().await.take() {
            if let Err(e) = stream.close(None).await {
                debug!("Error closing contribution socket: {}", e);
            }
        }
    }

    async fn connect(&self) -> Result<WsStream, TransportError> {
        let (stream, _) = tokio::time::timeout(self.connect_timeout, connect_async(self.url.as_str()))
            .await
            .map_err(|_| TransportError::Timeout(self.connect_timeout.as_millis() as u64))?
            .map_err(|e| TransportError::ConnectionFailed(format!("{}: {}", self.url, e)))?;
        info!("Contribution socket connected to {}", self.url);
        Ok(stream)
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(&self, message: &ContributionMessage) -> Result<(), TransportError> {
        let payload = serde_json::to_string(&Envelope {
            kind: "contribution",
            message,
        })?;

        let mut socket = self.socket.lock().await;
        if socket.is_none() {
            *socket = Some(self.connect().await?);
        }
        let Some(stream) = socket.as_mut() else {
            return Err(TransportError::Disconnected("socket unavailable".to_string()));
        };

        let sent = tokio::time::timeout(self.send_timeout, stream.send(Message::Text(payload.into()))).await;
        match sent {
            Ok(Ok(())) => {
                debug!(
                    "Sent contribution frame for session {} ({} steps)",
                    message.session_id,
                    message.steps.len()
                );
                Ok(())
            }
            Ok(Err(e)) => {
                *socket = None;
                warn!("Contribution socket send failed, dropping connection: {}", e);
                Err(TransportError::Disconnected(e.to_string()))
            }
            Err(_) => {
                *socket = None;
                warn!("Contribution socket send timed out, dropping connection");
                Err(TransportError::Timeout(self.send_timeout.as_millis() as u64))
            }
        }
    }
}

#[cfg(test)]
#[path = "ws_tests.rs"]
mod tests;
