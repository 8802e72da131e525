//! API client errors.

use thiserror::Error;
use voicepath_protocols::TransportError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Server rejected the request: {0}")]
    Rejected(String),
}

impl From<ApiError> for TransportError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Status { status, body } => TransportError::Server {
                status,
                message: body,
            },
            ApiError::Timeout(ms) => TransportError::Timeout(ms),
            ApiError::Request(err) if err.is_connect() => {
                TransportError::ConnectionFailed(err.to_string())
            }
            other => TransportError::SendFailed(other.to_string()),
        }
    }
}
