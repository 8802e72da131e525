//! # VoicePath Client
//!
//! Network collaborators for the VoicePath backend:
//!
//! - [`PathApiClient`] - REST client for saving and searching paths
//! - [`WsTransport`] - WebSocket [`Transport`](voicepath_protocols::Transport)
//!   for contribution batches

mod api;
mod error;
mod ws;

pub use api::PathApiClient;
pub use error::ApiError;
pub use ws::WsTransport;
