//! Caller-supplied hooks for one execution.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use voicepath_protocols::{Step, UserProfile};

/// Severity of an [`ExecutionLog`] line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// One progress line mirrored to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionLog {
    pub level: LogLevel,
    pub message: String,
}

/// Supplies input values the profile could not.
///
/// Typically backed by a voice prompt or a form in the host UI.
#[async_trait]
pub trait InputValueProvider: Send + Sync {
    async fn value_for(&self, step: &Step) -> Option<String>;
}

pub type StepCompleteFn = Arc<dyn Fn(usize, usize, &str) + Send + Sync>;
pub type LogFn = Arc<dyn Fn(&ExecutionLog) + Send + Sync>;
pub type WaitForUserFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Per-execution options and callbacks.
#[derive(Clone, Default)]
pub struct ExecutionHooks {
    pub user_context: Option<UserProfile>,
    /// Called with `(index, total, label)` after each step settles.
    pub on_step_complete: Option<StepCompleteFn>,
    pub on_log: Option<LogFn>,
    /// Called with the wait message when a wait step suspends.
    pub on_wait_for_user: Option<WaitForUserFn>,
    pub value_provider: Option<Arc<dyn InputValueProvider>>,
}

impl ExecutionHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_context(mut self, profile: UserProfile) -> Self {
        self.user_context = Some(profile);
        self
    }

    pub fn on_step_complete(mut self, f: impl Fn(usize, usize, &str) + Send + Sync + 'static) -> Self {
        self.on_step_complete = Some(Arc::new(f));
        self
    }

    pub fn on_log(mut self, f: impl Fn(&ExecutionLog) + Send + Sync + 'static) -> Self {
        self.on_log = Some(Arc::new(f));
        self
    }

    pub fn on_wait_for_user(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_wait_for_user = Some(Arc::new(f));
        self
    }

    pub fn with_value_provider(mut self, provider: Arc<dyn InputValueProvider>) -> Self {
        self.value_provider = Some(provider);
        self
    }
}

impl fmt::Debug for ExecutionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionHooks")
            .field("user_context", &self.user_context.is_some())
            .field("on_step_complete", &self.on_step_complete.is_some())
            .field("on_log", &self.on_log.is_some())
            .field("on_wait_for_user", &self.on_wait_for_user.is_some())
            .field("value_provider", &self.value_provider.is_some())
            .finish()
    }
}

/// Writes to tracing and mirrors the line to the caller's `on_log`.
pub(crate) struct LogSink {
    on_log: Option<LogFn>,
}

impl LogSink {
    pub(crate) fn new(on_log: Option<LogFn>) -> Self {
        Self { on_log }
    }

    pub(crate) fn debug(&self, message: impl Into<String>) {
        let message = message.into();
        debug!("{}", message);
        self.emit(LogLevel::Debug, message);
    }

    pub(crate) fn info(&self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.emit(LogLevel::Info, message);
    }

    pub(crate) fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.emit(LogLevel::Warn, message);
    }

    pub(crate) fn error(&self, message: impl Into<String>) {
        let message = message.into();
        error!("{}", message);
        self.emit(LogLevel::Error, message);
    }

    fn emit(&self, level: LogLevel, message: String) {
        if let Some(on_log) = &self.on_log {
            on_log(&ExecutionLog { level, message });
        }
    }
}
