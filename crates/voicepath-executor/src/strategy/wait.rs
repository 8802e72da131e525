use async_trait::async_trait;
use voicepath_protocols::Step;

use super::{StepContext, StepOutcome, StepStrategy};
use crate::error::StepError;
use crate::wait_gate::WaitResult;

/// Suspends replay until the user confirms through the executor.
pub(crate) struct WaitStrategy;

#[async_trait]
impl StepStrategy for WaitStrategy {
    async fn run(&self, step: &Step, ctx: &StepContext<'_>) -> Result<StepOutcome, StepError> {
        let message = step.wait_message().unwrap_or_else(|| step.display_label());
        let waiter = ctx.gate.register(message);
        ctx.log.info(format!("Waiting for user: {}", message));
        if let Some(on_wait) = &ctx.hooks.on_wait_for_user {
            on_wait(message);
        }

        let timeout = ctx.config.wait_timeout();
        match waiter.wait(timeout).await {
            WaitResult::Confirmed => {
                ctx.log.info("User confirmed, resuming");
                Ok(StepOutcome::Completed)
            }
            WaitResult::TimedOut => Err(StepError::WaitTimedOut(timeout)),
            WaitResult::Cancelled => Err(StepError::WaitCancelled),
        }
    }
}
