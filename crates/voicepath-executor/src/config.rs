//! Executor configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing knobs for path replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Settle delay after every step, in milliseconds.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,

    /// How long a wait step may stay suspended, in seconds.
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// How long to wait for the page body after a navigation, in milliseconds.
    #[serde(default = "default_selector_timeout_ms")]
    pub selector_timeout_ms: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
            wait_timeout_secs: default_wait_timeout_secs(),
            selector_timeout_ms: default_selector_timeout_ms(),
        }
    }
}

impl ExecutorConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }
}

fn default_step_delay_ms() -> u64 {
    500
}

fn default_wait_timeout_secs() -> u64 {
    300
}

fn default_selector_timeout_ms() -> u64 {
    5_000
}
