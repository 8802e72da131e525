//! Recorder lifecycle state.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecorderState {
    #[default]
    Inactive,
    Recording,
    Sending,
    Completed,
    /// The final transmission exhausted its retries; steps are still buffered.
    Error,
}

impl RecorderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Recording => "recording",
            Self::Sending => "sending",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
