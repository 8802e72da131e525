use async_trait::async_trait;
use voicepath_protocols::Step;

use super::{StepContext, StepOutcome, StepStrategy};
use crate::error::StepError;

pub(crate) struct NavigateStrategy;

#[async_trait]
impl StepStrategy for NavigateStrategy {
    async fn run(&self, step: &Step, ctx: &StepContext<'_>) -> Result<StepOutcome, StepError> {
        ctx.browser
            .navigate(step.url())
            .await
            .map_err(|source| StepError::Navigation {
                url: step.url().to_string(),
                source,
            })?;
        ctx.log.info(format!("Navigated to {}", step.url()));
        Ok(StepOutcome::Completed)
    }
}
