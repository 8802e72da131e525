//! # VoicePath Protocols
//!
//! Shared data model and collaborator traits for the VoicePath workspace.
//! Contains only types and interface definitions, no implementations.
//!
//! ## Core Types
//!
//! - [`Step`] / [`Path`] - a replayable sequence of browser actions
//! - [`UserProfile`] - the user context consulted by auto-fill
//! - [`RecordedStep`] - one observed interaction captured while recording
//!
//! ## Collaborator Traits
//!
//! - [`BrowserControl`] - the live browser session steps are replayed against
//! - [`Transport`] - the async channel contributions are sent through

pub mod browser;
pub mod error;
pub mod transport;
pub mod types;
pub mod wire;

pub use browser::BrowserControl;
pub use error::{BrowserError, TransportError};
pub use transport::Transport;
pub use types::*;
pub use wire::{
    ContributionMessage, SavePathRequest, SavePathResponse, SearchResponse, WirePath, WireStep,
};
