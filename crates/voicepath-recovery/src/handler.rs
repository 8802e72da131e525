//! Recovery engine.

use std::error::Error;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::classify::classify;
use crate::dialog::{DialogState, RecoveryAction};
use crate::policy::policy_for;
use crate::record::ErrorRecord;

/// What [`ExceptionHandler::handle`] decided.
#[derive(Debug)]
pub enum RecoveryOutcome {
    /// The recovery action succeeded on attempt `attempts`.
    Recovered { record: ErrorRecord, attempts: u32 },
    /// A dialog was published and the caller decides what happens next.
    DialogRequested(DialogState),
    /// Automatic recovery was exhausted and the policy wants no dialog.
    Failed { record: ErrorRecord, attempts: u32 },
}

impl RecoveryOutcome {
    pub fn record(&self) -> &ErrorRecord {
        match self {
            Self::Recovered { record, .. } | Self::Failed { record, .. } => record,
            Self::DialogRequested(dialog) => &dialog.record,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }
}

/// Classifies failures, retries what can be retried and publishes dialogs.
///
/// The handler never renders anything; subscribers receive the current
/// [`DialogState`] through a watch channel.
pub struct ExceptionHandler {
    dialog_tx: watch::Sender<Option<DialogState>>,
}

impl ExceptionHandler {
    pub fn new() -> Self {
        let (dialog_tx, _) = watch::channel(None);
        Self { dialog_tx }
    }

    /// Receive every dialog published from now on.
    pub fn subscribe(&self) -> watch::Receiver<Option<DialogState>> {
        self.dialog_tx.subscribe()
    }

    pub fn current_dialog(&self) -> Option<DialogState> {
        self.dialog_tx.borrow().clone()
    }

    /// Clear the published dialog.
    pub fn dismiss(&self) {
        self.dialog_tx.send_replace(None);
    }

    /// Decide how to recover from `error`.
    ///
    /// With an auto-recovering policy and a retryable record the action runs
    /// up to `max_retries + 1` times with exponential backoff before each run.
    /// Otherwise, or once retries are exhausted on a policy that wants one, a
    /// dialog carrying the action is published.
    pub async fn handle(
        &self,
        error: &(dyn Error + 'static),
        context: &str,
        recovery_action: Option<RecoveryAction>,
    ) -> RecoveryOutcome {
        let record = classify(error, context);
        let policy = policy_for(record.kind());
        warn!(
            "Handling {} in '{}': {}",
            record.error_code(),
            context,
            record.detail()
        );

        if policy.auto_recover && record.is_retryable() {
            if let Some(action) = recovery_action.as_ref() {
                let max_attempts = policy.max_attempts();
                for attempt in 0..max_attempts {
                    let delay = policy.delay_for_attempt(attempt);
                    info!(
                        "Recovery attempt {}/{} for {} in {:?}",
                        attempt + 1,
                        max_attempts,
                        record.error_code(),
                        delay
                    );
                    sleep(delay).await;

                    match action().await {
                        Ok(()) => {
                            info!("Recovered from {} after {} attempt(s)", record.error_code(), attempt + 1);
                            return RecoveryOutcome::Recovered {
                                record,
                                attempts: attempt + 1,
                            };
                        }
                        Err(e) => {
                            warn!("Recovery attempt {}/{} failed: {}", attempt + 1, max_attempts, e);
                        }
                    }
                }

                if !policy.show_user_dialog {
                    error!("Recovery exhausted for {}", record.error_code());
                    return RecoveryOutcome::Failed {
                        record,
                        attempts: max_attempts,
                    };
                }
            }
        }

        let dialog = DialogState::for_record(record, recovery_action);
        info!("Publishing dialog: {} ({})", dialog.title, dialog.error_code);
        self.dialog_tx.send_replace(Some(dialog.clone()));
        RecoveryOutcome::DialogRequested(dialog)
    }
}

impl Default for ExceptionHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
