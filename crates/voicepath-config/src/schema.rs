//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use voicepath_browser::PlaywrightConfig;
use voicepath_executor::ExecutorConfig;
use voicepath_protocols::UserProfile;
use voicepath_recorder::RecorderConfig;

/// Root configuration. Every section may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub recorder: RecorderConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub browser: PlaywrightConfig,

    #[serde(default)]
    pub profile: UserProfile,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// REST base URL for path search and save.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// WebSocket endpoint receiving contribution batches.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Candidates fetched per search.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ws_url: default_ws_url(),
            timeout_secs: default_timeout_secs(),
            search_limit: default_search_limit(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_ws_url() -> String {
    "ws://localhost:8000/ws/contribution".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_search_limit() -> usize {
    5
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for the daily log files. `~` is expanded.
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: default_log_dir(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "~/.voicepath/logs".to_string()
}
