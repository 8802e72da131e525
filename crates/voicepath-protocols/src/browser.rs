//! Browser-control collaborator trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::BrowserError;

/// A live browser session that steps are replayed against.
///
/// Implementations do not have to support concurrent operations on one
/// browser context; callers serialize through the executor.
#[async_trait]
pub trait BrowserControl: Send + Sync {
    /// Prepare the session (launch or connect). Called once by the host.
    async fn init(&self) -> Result<(), BrowserError> {
        Ok(())
    }

    /// Release the session. Called once by the host.
    async fn shutdown(&self) -> Result<(), BrowserError> {
        Ok(())
    }

    /// Navigate the current page to `url`.
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), BrowserError>;

    /// Replace the value of the input matching `selector`.
    async fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError>;

    /// Wait until an element matching `selector` is attached.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration)
    -> Result<(), BrowserError>;

    /// Evaluate a script in the page and return its JSON result.
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, BrowserError>;
}
