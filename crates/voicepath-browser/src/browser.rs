//! [`BrowserControl`] implementation on top of the bridge.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use tracing::{debug, info};
use voicepath_protocols::{BrowserControl, BrowserError};

use crate::bridge::PlaywrightBridge;
use crate::config::PlaywrightConfig;
use crate::error::PlaywrightError;

#[derive(Debug, Default, Clone)]
struct Handles {
    browser_id: Option<String>,
    page_id: Option<String>,
}

/// One Chromium window with a single page, driven through the bridge.
pub struct PlaywrightBrowser {
    bridge: PlaywrightBridge,
    handles: Mutex<Handles>,
}

impl PlaywrightBrowser {
    pub fn new(config: PlaywrightConfig) -> Self {
        Self {
            bridge: PlaywrightBridge::new(config),
            handles: Mutex::new(Handles::default()),
        }
    }

    fn page_id(&self) -> Result<String, BrowserError> {
        self.handles
            .lock()
            .page_id
            .clone()
            .ok_or(BrowserError::NotInitialized)
    }

    fn action_timeout(&self) -> u64 {
        self.bridge.config().action_timeout_ms
    }

    async fn string_call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<String, PlaywrightError> {
        let result = self.bridge.call(method, params).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| PlaywrightError::BrowserLaunchFailed(format!("Invalid {} response", method)))
    }
}

/// Playwright reports a missing element as a locator timeout.
fn element_error(selector: &str, e: PlaywrightError) -> BrowserError {
    match e {
        PlaywrightError::Timeout(_) => BrowserError::ElementNotFound(selector.to_string()),
        other => other.into(),
    }
}

#[async_trait]
impl BrowserControl for PlaywrightBrowser {
    async fn init(&self) -> Result<(), BrowserError> {
        self.bridge.start().await?;
        let headless = self.bridge.config().headless;
        let browser_id = self
            .string_call("launchBrowser", json!({ "headless": headless, "args": [] }))
            .await?;
        let page_id = self
            .string_call("newPage", json!({ "browserId": browser_id }))
            .await?;

        info!("Browser {} ready with page {}", browser_id, page_id);
        *self.handles.lock() = Handles {
            browser_id: Some(browser_id),
            page_id: Some(page_id),
        };
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), BrowserError> {
        let handles = std::mem::take(&mut *self.handles.lock());
        if let Some(browser_id) = handles.browser_id {
            if let Err(e) = self
                .bridge
                .call("closeBrowser", json!({ "browserId": browser_id }))
                .await
            {
                debug!("closeBrowser failed during shutdown: {}", e);
            }
        }
        self.bridge.stop().await?;
        Ok(())
    }

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let page_id = self.page_id()?;
        let timeout = self.bridge.config().navigation_timeout_ms;
        self.bridge
            .call(
                "navigate",
                json!({
                    "pageId": page_id,
                    "url": url,
                    "waitUntil": "domcontentloaded",
                    "timeout": timeout
                }),
            )
            .await
            .map_err(|e| match e {
                PlaywrightError::BridgeError(message) | PlaywrightError::Timeout(message) => {
                    BrowserError::NavigationFailed {
                        url: url.to_string(),
                        message,
                    }
                }
                other => other.into(),
            })?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        let page_id = self.page_id()?;
        self.bridge
            .call(
                "click",
                json!({
                    "pageId": page_id,
                    "selector": selector,
                    "timeout": self.action_timeout()
                }),
            )
            .await
            .map_err(|e| element_error(selector, e))?;
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError> {
        let page_id = self.page_id()?;
        self.bridge
            .call(
                "fill",
                json!({
                    "pageId": page_id,
                    "selector": selector,
                    "value": value,
                    "timeout": self.action_timeout()
                }),
            )
            .await
            .map_err(|e| element_error(selector, e))?;
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let page_id = self.page_id()?;
        self.bridge
            .call(
                "waitForSelector",
                json!({
                    "pageId": page_id,
                    "selector": selector,
                    "timeout": timeout.as_millis() as u64,
                    "state": "attached"
                }),
            )
            .await
            .map_err(|e| element_error(selector, e))?;
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, BrowserError> {
        let page_id = self.page_id()?;
        self.bridge
            .call("evaluate", json!({ "pageId": page_id, "script": script }))
            .await
            .map_err(|e| match e {
                PlaywrightError::BridgeError(message) => BrowserError::JavaScript(message),
                other => other.into(),
            })
    }
}
