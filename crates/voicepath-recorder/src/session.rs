//! Recording session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use voicepath_protocols::RecordedStep;

/// One recording session and every step committed to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSession {
    pub id: String,
    pub task: String,
    pub started_at: DateTime<Utc>,
    /// Cleared once the session ends, before its final transmission.
    pub is_active: bool,
    /// Steps committed so far, including ones already transmitted.
    pub step_count: usize,
    pub steps: Vec<RecordedStep>,
}

impl ContributionSession {
    pub(crate) fn new(task: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            task,
            started_at: Utc::now(),
            is_active: true,
            step_count: 0,
            steps: Vec::new(),
        }
    }

    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}
