//! # VoicePath Browser
//!
//! [`BrowserControl`](voicepath_protocols::BrowserControl) over Playwright.
//!
//! ```text
//! PlaywrightBrowser --JSON lines on stdin--> node bridge_script.js --> Chromium
//!                   <--JSON lines on stdout--
//! ```
//!
//! Requires Node.js >= 18 with the `playwright` package resolvable from the
//! working directory.

mod bridge;
mod browser;
mod config;
mod error;

pub use bridge::PlaywrightBridge;
pub use browser::PlaywrightBrowser;
pub use config::PlaywrightConfig;
pub use error::PlaywrightError;
