//! # VoicePath Executor
//!
//! Replays a [`Path`](voicepath_protocols::Path) against a live
//! [`BrowserControl`](voicepath_protocols::BrowserControl) session.
//!
//! ## Fallback tiers
//!
//! ```text
//! click:  selectors in order -> a[href=...] from href hints -> direct navigation
//! input:  profile auto-fill  -> caller value provider        -> skip step
//! wait:   user confirm()     -> timeout fails the step
//! ```
//!
//! Only one path executes at a time; a second `execute` call is rejected
//! immediately rather than queued.

pub mod autofill;
mod config;
mod error;
mod executor;
mod hooks;
pub mod navigation;
mod result;
pub mod selector;
mod strategy;
mod wait_gate;

pub use autofill::{AutoFillResolver, FieldFamily};
pub use config::ExecutorConfig;
pub use error::StepError;
pub use executor::{ExecutionSnapshot, PathExecutor};
pub use hooks::{ExecutionHooks, ExecutionLog, InputValueProvider, LogLevel};
pub use result::ExecutionResult;
pub use wait_gate::{WaitGate, WaitResult};
