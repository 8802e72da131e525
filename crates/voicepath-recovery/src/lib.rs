//! # VoicePath Recovery
//!
//! Classifies failures into a closed taxonomy and decides how to recover:
//! retry automatically, publish a dialog for the user, or give up.
//!
//! - [`classify`] turns any error into an [`ErrorRecord`]
//! - [`policy_for`] looks up the static [`RecoveryPolicy`] for a kind
//! - [`ExceptionHandler`] runs the retry loop and publishes [`DialogState`]

mod classify;
mod dialog;
mod handler;
mod kind;
mod policy;
mod record;

pub use classify::classify;
pub use dialog::{recovery_action, BoxError, DialogAction, DialogState, RecoveryAction};
pub use handler::{ExceptionHandler, RecoveryOutcome};
pub use kind::{BrowserFault, ContributionFault, ErrorKind, NetworkFault, SystemFault};
pub use policy::{policy_for, RecoveryPolicy, DEFAULT_POLICY, MAX_BACKOFF};
pub use record::ErrorRecord;
