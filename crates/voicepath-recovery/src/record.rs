//! Classified error record.

use serde::Serialize;

use crate::kind::ErrorKind;

/// The outcome of classifying a failure.
///
/// Records are only produced by [`classify`](crate::classify) and never change
/// afterwards; there is no public constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    kind: ErrorKind,
    is_retryable: bool,
    user_message: String,
    error_code: &'static str,
    detail: String,
    context: String,
}

impl ErrorRecord {
    pub(crate) fn new(kind: ErrorKind, detail: String, context: &str) -> Self {
        Self {
            is_retryable: kind.is_retryable(),
            user_message: kind.user_message(),
            error_code: kind.code(),
            kind,
            detail,
            context: context.to_string(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_retryable(&self) -> bool {
        self.is_retryable
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    pub fn error_code(&self) -> &'static str {
        self.error_code
    }

    /// The raw error text the record was classified from.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Where the failure was observed.
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl std::fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error_code, self.user_message)
    }
}
