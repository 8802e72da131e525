//! Dialog state handed to the UI.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;

use crate::record::ErrorRecord;

/// Boxed error returned by recovery actions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Re-runnable recovery callback.
pub type RecoveryAction = Arc<dyn Fn() -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// Wrap an async closure as a [`RecoveryAction`].
pub fn recovery_action<F, Fut>(f: F) -> RecoveryAction
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    Arc::new(move || Box::pin(f()))
}

/// Button the UI should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogAction {
    Retry,
    Dismiss,
}

/// Structured description of a dialog. Rendering is up to the caller.
#[derive(Clone)]
pub struct DialogState {
    pub title: String,
    pub message: String,
    pub error_code: &'static str,
    pub actions: Vec<DialogAction>,
    pub record: ErrorRecord,
    retry: Option<RecoveryAction>,
}

impl DialogState {
    pub(crate) fn for_record(record: ErrorRecord, retry: Option<RecoveryAction>) -> Self {
        let mut actions = Vec::with_capacity(2);
        if retry.is_some() {
            actions.push(DialogAction::Retry);
        }
        actions.push(DialogAction::Dismiss);

        Self {
            title: record.kind().title().to_string(),
            message: record.user_message().to_string(),
            error_code: record.error_code(),
            actions,
            record,
            retry,
        }
    }

    pub fn can_retry(&self) -> bool {
        self.retry.is_some()
    }

    /// Run the carried recovery action once.
    pub async fn retry(&self) -> Result<(), BoxError> {
        match &self.retry {
            Some(action) => action().await,
            None => Err("no recovery action attached to this dialog".into()),
        }
    }
}

impl fmt::Debug for DialogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogState")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("error_code", &self.error_code)
            .field("actions", &self.actions)
            .field("can_retry", &self.can_retry())
            .finish()
    }
}
