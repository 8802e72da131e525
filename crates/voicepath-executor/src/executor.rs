//! Path executor.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::warn;
use voicepath_protocols::{ActionKind, BrowserControl, Path, SENTINEL_SELECTOR};
use voicepath_recovery::classify;

use crate::config::ExecutorConfig;
use crate::error::StepError;
use crate::hooks::{ExecutionHooks, LogSink};
use crate::navigation::needs_navigation;
use crate::result::ExecutionResult;
use crate::strategy::{StepContext, StepOutcome, strategy_for};
use crate::wait_gate::WaitGate;

const CLASSIFY_CONTEXT: &str = "path execution";

#[derive(Default)]
struct ExecutionState {
    path: Option<Arc<Path>>,
    current_step_index: usize,
}

/// Point-in-time view of the executor for UIs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExecutionSnapshot {
    pub is_executing: bool,
    pub task_intent: Option<String>,
    pub current_step_index: usize,
    pub total_steps: usize,
    pub is_waiting: bool,
    pub wait_message: Option<String>,
}

/// Replays paths against one browser session, one path at a time.
pub struct PathExecutor {
    browser: Arc<dyn BrowserControl>,
    config: ExecutorConfig,
    busy: AtomicBool,
    state: Mutex<ExecutionState>,
    gate: WaitGate,
}

/// Clears the busy flag and execution state on every exit path.
struct BusyGuard<'a> {
    executor: &'a PathExecutor,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.executor.gate.cancel();
        *self.executor.state.lock() = ExecutionState::default();
        self.executor.busy.store(false, Ordering::Release);
    }
}

impl PathExecutor {
    pub fn new(browser: Arc<dyn BrowserControl>, config: ExecutorConfig) -> Self {
        Self {
            browser,
            config,
            busy: AtomicBool::new(false),
            state: Mutex::new(ExecutionState::default()),
            gate: WaitGate::new(),
        }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Replay `path` step by step.
    ///
    /// Never returns an error: failures, including a rejected concurrent
    /// call, are reported in the [`ExecutionResult`].
    pub async fn execute(&self, path: Path, hooks: ExecutionHooks) -> ExecutionResult {
        let total = path.len();
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(
                "Rejected path '{}': another path is executing",
                path.task_intent()
            );
            return ExecutionResult::rejected(total);
        }
        let _guard = BusyGuard { executor: self };

        let path = Arc::new(path);
        *self.state.lock() = ExecutionState {
            path: Some(Arc::clone(&path)),
            current_step_index: 0,
        };

        let log = LogSink::new(hooks.on_log.clone());
        log.info(format!(
            "Executing path '{}' ({} steps)",
            path.task_intent(),
            total
        ));

        let mut previous_url: Option<&str> = None;
        for (index, step) in path.steps().iter().enumerate() {
            self.state.lock().current_step_index = index;
            log.debug(format!(
                "Step {}/{}: {} ({})",
                index + 1,
                total,
                step.display_label(),
                step.action()
            ));

            if step.action() != ActionKind::Navigate
                && needs_navigation(index, step.url(), previous_url)
            {
                if let Err(source) = self.browser.navigate(step.url()).await {
                    let error = StepError::Navigation {
                        url: step.url().to_string(),
                        source,
                    };
                    return self.fail(&log, index, total, error);
                }
                log.info(format!("Navigated to {}", step.url()));
                self.wait_for_page(&log).await;
            }

            let ctx = StepContext {
                browser: self.browser.as_ref(),
                hooks: &hooks,
                log: &log,
                gate: &self.gate,
                config: &self.config,
            };
            match strategy_for(step.action()).run(step, &ctx).await {
                Ok(StepOutcome::Completed) => {}
                Ok(StepOutcome::Skipped(_)) => {}
                Err(error) => return self.fail(&log, index, total, error),
            }

            tokio::time::sleep(self.config.step_delay()).await;
            if let Some(on_step_complete) = &hooks.on_step_complete {
                on_step_complete(index, total, step.display_label());
            }
            if !step.url().trim().is_empty() {
                previous_url = Some(step.url());
            }
        }

        log.info(format!("Path '{}' completed", path.task_intent()));
        ExecutionResult::completed(total)
    }

    /// Release a pending wait step. Returns `false` when nothing is waiting.
    pub fn confirm(&self) -> bool {
        self.gate.confirm()
    }

    pub fn is_waiting(&self) -> bool {
        self.gate.is_waiting()
    }

    pub fn wait_message(&self) -> Option<String> {
        self.gate.message()
    }

    pub fn is_executing(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> ExecutionSnapshot {
        let state = self.state.lock();
        ExecutionSnapshot {
            is_executing: self.is_executing(),
            task_intent: state.path.as_ref().map(|p| p.task_intent().to_string()),
            current_step_index: state.current_step_index,
            total_steps: state.path.as_ref().map_or(0, |p| p.len()),
            is_waiting: self.gate.is_waiting(),
            wait_message: self.gate.message(),
        }
    }

    async fn wait_for_page(&self, log: &LogSink) {
        if let Err(e) = self
            .browser
            .wait_for_selector(SENTINEL_SELECTOR, self.config.selector_timeout())
            .await
        {
            log.warn(format!("Page did not settle after navigation: {}", e));
        }
    }

    fn fail(&self, log: &LogSink, index: usize, total: usize, error: StepError) -> ExecutionResult {
        let record = classify(&error, CLASSIFY_CONTEXT);
        log.error(format!(
            "Step {}/{} failed [{}]: {}",
            index + 1,
            total,
            record.error_code(),
            error
        ));
        ExecutionResult::failed(index, total, error.to_string(), record)
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
