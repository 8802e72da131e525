use async_trait::async_trait;
use voicepath_protocols::{BrowserError, Step};

use super::{StepContext, StepOutcome, StepStrategy};
use crate::autofill::AutoFillResolver;
use crate::error::StepError;
use crate::selector::to_native_selector;

pub(crate) struct InputStrategy;

impl InputStrategy {
    async fn resolve_value(step: &Step, ctx: &StepContext<'_>) -> Option<String> {
        if let Some(profile) = &ctx.hooks.user_context {
            if let Some(value) = AutoFillResolver::resolve(step, profile) {
                if let Some(family) = AutoFillResolver::detect_family(step) {
                    ctx.log.info(format!("Auto-filled {:?} from user profile", family));
                }
                return Some(value);
            }
        }
        match &ctx.hooks.value_provider {
            Some(provider) => provider.value_for(step).await,
            None => None,
        }
    }
}

#[async_trait]
impl StepStrategy for InputStrategy {
    async fn run(&self, step: &Step, ctx: &StepContext<'_>) -> Result<StepOutcome, StepError> {
        let Some(value) = Self::resolve_value(step, ctx)
            .await
            .filter(|value| !value.is_empty())
        else {
            let reason = format!("No value available for input '{}'", step.display_label());
            ctx.log.warn(format!("{}, skipping", reason));
            return Ok(StepOutcome::Skipped(reason));
        };

        let selectors = step.selectors();
        let total = selectors.len();
        let mut last_error: Option<BrowserError> = None;

        for (i, raw) in selectors.iter().enumerate() {
            let selector = to_native_selector(raw);
            match ctx.browser.fill(&selector, &value).await {
                Ok(()) => {
                    ctx.log
                        .info(format!("Filled selector {}/{}: {}", i + 1, total, selector));
                    return Ok(StepOutcome::Completed);
                }
                Err(e) => {
                    ctx.log
                        .debug(format!("Selector {}/{} failed: {} ({})", i + 1, total, selector, e));
                    last_error = Some(e);
                }
            }
        }

        Err(StepError::InputExhausted {
            attempts: total,
            source: last_error
                .unwrap_or_else(|| BrowserError::ElementNotFound(selectors.join(", "))),
        })
    }
}
