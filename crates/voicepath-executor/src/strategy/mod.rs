//! Per-action step strategies.

mod click;
mod input;
mod navigate;
mod wait;

use async_trait::async_trait;
use voicepath_protocols::{ActionKind, BrowserControl, Step};

use crate::config::ExecutorConfig;
use crate::error::StepError;
use crate::hooks::{ExecutionHooks, LogSink};
use crate::wait_gate::WaitGate;

/// Everything a strategy may touch while running one step.
pub(crate) struct StepContext<'a> {
    pub browser: &'a dyn BrowserControl,
    pub hooks: &'a ExecutionHooks,
    pub log: &'a LogSink,
    pub gate: &'a WaitGate,
    pub config: &'a ExecutorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    Completed,
    /// The step was not applicable; replay continues.
    Skipped(String),
}

#[async_trait]
pub(crate) trait StepStrategy: Send + Sync {
    async fn run(&self, step: &Step, ctx: &StepContext<'_>) -> Result<StepOutcome, StepError>;
}

static NAVIGATE: navigate::NavigateStrategy = navigate::NavigateStrategy;
static CLICK: click::ClickStrategy = click::ClickStrategy;
static INPUT: input::InputStrategy = input::InputStrategy;
static WAIT: wait::WaitStrategy = wait::WaitStrategy;

pub(crate) fn strategy_for(action: ActionKind) -> &'static dyn StepStrategy {
    match action {
        ActionKind::Navigate => &NAVIGATE,
        ActionKind::Click => &CLICK,
        ActionKind::Input => &INPUT,
        ActionKind::Wait => &WAIT,
    }
}
