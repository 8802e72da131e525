//! Recorder errors.

use thiserror::Error;
use voicepath_protocols::TransportError;

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("A recording session is already active")]
    AlreadyActive,

    #[error("{0} step(s) from the previous session are unsent; retry or reset first")]
    UnsentSteps(usize),

    #[error("Task description is empty after sanitization")]
    EmptyTask,

    #[error("No active recording session")]
    NotActive,

    #[error("Invalid step: {0}")]
    InvalidStep(String),

    #[error("Nothing to retry: last transmission did not fail")]
    NothingToRetry,

    #[error("Contribution transmission failed after {attempts} attempt(s)")]
    Transmission {
        attempts: u32,
        #[source]
        source: TransportError,
    },
}
