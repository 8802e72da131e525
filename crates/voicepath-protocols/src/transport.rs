//! Contribution transport trait.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::wire::ContributionMessage;

/// Async channel that carries contribution batches to the backend.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, message: &ContributionMessage) -> Result<(), TransportError>;
}
