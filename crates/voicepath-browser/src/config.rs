//! Bridge configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaywrightConfig {
    /// Node.js executable. Looked up on `PATH` when unset.
    #[serde(default)]
    pub node_path: Option<PathBuf>,

    /// Bridge script to run instead of the embedded one.
    #[serde(default)]
    pub bridge_script_path: Option<PathBuf>,

    /// Show the browser window. Replays are usually watched by the user.
    #[serde(default)]
    pub headless: bool,

    /// Upper bound on any single bridge round trip, in milliseconds.
    #[serde(default = "default_response_timeout_ms")]
    pub response_timeout_ms: u64,

    /// Playwright timeout for click and fill, in milliseconds.
    #[serde(default = "default_action_timeout_ms")]
    pub action_timeout_ms: u64,

    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            node_path: None,
            bridge_script_path: None,
            headless: false,
            response_timeout_ms: default_response_timeout_ms(),
            action_timeout_ms: default_action_timeout_ms(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
        }
    }
}

fn default_response_timeout_ms() -> u64 {
    45_000
}

fn default_action_timeout_ms() -> u64 {
    5_000
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}
