//! Execution results.

use serde::Serialize;
use voicepath_recovery::ErrorRecord;

/// Outcome of one `execute` call. Failures are reported here, never raised.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub steps_completed: usize,
    pub total_steps: usize,
    /// Index of the step that failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_record: Option<ErrorRecord>,
}

impl ExecutionResult {
    pub(crate) fn completed(total_steps: usize) -> Self {
        Self {
            success: true,
            steps_completed: total_steps,
            total_steps,
            failed_at: None,
            error: None,
            error_record: None,
        }
    }

    pub(crate) fn failed(index: usize, total_steps: usize, error: String, record: ErrorRecord) -> Self {
        Self {
            success: false,
            steps_completed: index,
            total_steps,
            failed_at: Some(index),
            error: Some(error),
            error_record: Some(record),
        }
    }

    pub(crate) fn rejected(total_steps: usize) -> Self {
        Self {
            success: false,
            steps_completed: 0,
            total_steps,
            failed_at: None,
            error: Some("another path is executing".to_string()),
            error_record: None,
        }
    }
}
