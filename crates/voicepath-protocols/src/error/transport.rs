//! Transport collaborator errors.

use thiserror::Error;

/// Failures reported by a [`Transport`](crate::Transport) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not establish the connection.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// An established socket dropped.
    #[error("Socket disconnected: {0}")]
    Disconnected(String),

    /// The send did not complete in time.
    #[error("Send timed out after {0}ms")]
    Timeout(u64),

    /// The server rejected the message.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The message could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other failure.
    #[error("Send failed: {0}")]
    SendFailed(String),
}
