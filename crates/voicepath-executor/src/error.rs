//! Step failures.

use std::time::Duration;

use thiserror::Error;
use voicepath_protocols::BrowserError;

/// A step failed after every fallback tier was tried.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Navigation to {url} failed")]
    Navigation {
        url: String,
        #[source]
        source: BrowserError,
    },

    #[error("Click failed after {attempts} attempt(s)")]
    ClickExhausted {
        attempts: usize,
        #[source]
        source: BrowserError,
    },

    #[error("Input failed after {attempts} attempt(s)")]
    InputExhausted {
        attempts: usize,
        #[source]
        source: BrowserError,
    },

    #[error("No confirmation within {0:?}")]
    WaitTimedOut(Duration),

    #[error("Wait for user was cancelled")]
    WaitCancelled,
}
