//! # VoicePath Recorder
//!
//! Captures a live interaction stream into contribution messages.
//!
//! ```text
//! Inactive --start_session--> Recording --end_session--> Sending --+--> Completed
//!     ^                                                            |
//!     |                                                            +--> Error --retry_transmission--> Sending
//!     +------------------------ reset_session (from anywhere) -----+
//! ```
//!
//! Typing events are debounced into a single step, full batches are sent
//! in the background while recording continues, and failed transmissions
//! keep their steps buffered for a later retry.

mod config;
mod error;
mod recorder;
pub mod sanitize;
mod session;
mod state;
mod transmit;

pub use config::RecorderConfig;
pub use error::RecorderError;
pub use recorder::{ContributionRecorder, StepDisposition};
pub use session::ContributionSession;
pub use state::RecorderState;
pub use transmit::{RetrySchedule, send_with_retry};
