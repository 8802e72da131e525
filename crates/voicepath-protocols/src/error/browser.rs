//! Browser-control collaborator errors.

use thiserror::Error;

/// Failures reported by a [`BrowserControl`](crate::BrowserControl) implementation.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The control channel to the browser dropped.
    #[error("Browser connection lost: {0}")]
    ConnectionLost(String),

    /// No element matched the selector.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Navigation did not complete.
    #[error("Navigation failed for {url}: {message}")]
    NavigationFailed { url: String, message: String },

    /// The operation exceeded its deadline.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The browser process exited.
    #[error("Browser process crashed: {0}")]
    Crashed(String),

    /// JavaScript evaluation failed.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// The collaborator has not been initialized.
    #[error("Browser not initialized")]
    NotInitialized,

    /// Any other collaborator-specific failure.
    #[error("Browser action failed: {0}")]
    ActionFailed(String),
}
