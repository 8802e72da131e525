//! Recorder configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::transmit::RetrySchedule;

/// Batching, timing and validation limits for the recorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Buffered steps that trigger a background partial send.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Quiet period before a pending typing step is committed, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Sessions end automatically after this long, in seconds.
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,

    /// Delays between send retries, in milliseconds. The last entry repeats.
    #[serde(default = "default_retry_delays_ms")]
    pub retry_delays_ms: Vec<u64>,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_max_task_length")]
    pub max_task_length: usize,

    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    #[serde(default = "default_max_url_length")]
    pub max_url_length: usize,

    #[serde(default = "default_max_selectors")]
    pub max_selectors: usize,

    #[serde(default = "default_max_selector_length")]
    pub max_selector_length: usize,

    #[serde(default = "default_max_attributes")]
    pub max_attributes: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            debounce_ms: default_debounce_ms(),
            session_timeout_secs: default_session_timeout_secs(),
            retry_delays_ms: default_retry_delays_ms(),
            max_retries: default_max_retries(),
            max_task_length: default_max_task_length(),
            max_text_length: default_max_text_length(),
            max_url_length: default_max_url_length(),
            max_selectors: default_max_selectors(),
            max_selector_length: default_max_selector_length(),
            max_attributes: default_max_attributes(),
        }
    }
}

impl RecorderConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }

    pub fn retry_schedule(&self) -> RetrySchedule {
        RetrySchedule::new(
            self.retry_delays_ms
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
            self.max_retries,
        )
    }
}

fn default_batch_size() -> usize {
    10
}

fn default_debounce_ms() -> u64 {
    800
}

fn default_session_timeout_secs() -> u64 {
    30 * 60
}

fn default_retry_delays_ms() -> Vec<u64> {
    vec![1000, 2000, 5000]
}

fn default_max_retries() -> u32 {
    3
}

fn default_max_task_length() -> usize {
    500
}

fn default_max_text_length() -> usize {
    1000
}

fn default_max_url_length() -> usize {
    2048
}

fn default_max_selectors() -> usize {
    10
}

fn default_max_selector_length() -> usize {
    500
}

fn default_max_attributes() -> usize {
    50
}
