use async_trait::async_trait;
use voicepath_protocols::{BrowserError, Step};

use super::{StepContext, StepOutcome, StepStrategy};
use crate::error::StepError;
use crate::selector::{extract_absolute_urls, extract_hrefs, href_selector, to_native_selector};

/// Clicks through three tiers: recorded selectors, synthesized link
/// selectors, then direct navigation to any absolute URL in the selectors.
pub(crate) struct ClickStrategy;

#[async_trait]
impl StepStrategy for ClickStrategy {
    async fn run(&self, step: &Step, ctx: &StepContext<'_>) -> Result<StepOutcome, StepError> {
        let selectors = step.selectors();
        let total = selectors.len();
        let mut attempts = 0;
        let mut last_error: Option<BrowserError> = None;

        for (i, raw) in selectors.iter().enumerate() {
            let selector = to_native_selector(raw);
            attempts += 1;
            match ctx.browser.click(&selector).await {
                Ok(()) => {
                    ctx.log
                        .info(format!("Clicked selector {}/{}: {}", i + 1, total, selector));
                    return Ok(StepOutcome::Completed);
                }
                Err(e) => {
                    ctx.log
                        .debug(format!("Selector {}/{} failed: {} ({})", i + 1, total, selector, e));
                    last_error = Some(e);
                }
            }
        }

        for href in extract_hrefs(selectors) {
            let selector = href_selector(&href);
            attempts += 1;
            match ctx.browser.click(&selector).await {
                Ok(()) => {
                    ctx.log.info(format!("Clicked link fallback: {}", selector));
                    return Ok(StepOutcome::Completed);
                }
                Err(e) => {
                    ctx.log.debug(format!("Link fallback failed: {} ({})", selector, e));
                    last_error = Some(e);
                }
            }
        }

        for url in extract_absolute_urls(selectors) {
            attempts += 1;
            match ctx.browser.navigate(&url).await {
                Ok(()) => {
                    ctx.log.info(format!("Navigated directly to {}", url));
                    return Ok(StepOutcome::Completed);
                }
                Err(e) => {
                    ctx.log.debug(format!("Direct navigation failed: {} ({})", url, e));
                    last_error = Some(e);
                }
            }
        }

        Err(StepError::ClickExhausted {
            attempts,
            source: last_error
                .unwrap_or_else(|| BrowserError::ElementNotFound(selectors.join(", "))),
        })
    }
}
