//! Failure classification.
//!
//! Ordered heuristics: a typed match on the error or anything in its source
//! chain, then substring sniffing on the message, then on the context. Errors
//! nothing recognizes become [`SystemFault::Unknown`] instead of being dropped.

use std::error::Error;
use std::io;

use voicepath_protocols::{BrowserError, TransportError};

use crate::kind::{BrowserFault, ContributionFault, ErrorKind, NetworkFault, SystemFault};
use crate::record::ErrorRecord;

/// Classify `error`, observed while doing `context`, into an [`ErrorRecord`].
pub fn classify(error: &(dyn Error + 'static), context: &str) -> ErrorRecord {
    let detail = error.to_string();
    let kind = typed_kind(error)
        .or_else(|| message_kind(&detail))
        .or_else(|| context_kind(context))
        .unwrap_or(ErrorKind::System(SystemFault::Unknown));
    ErrorRecord::new(kind, detail, context)
}

fn typed_kind(error: &(dyn Error + 'static)) -> Option<ErrorKind> {
    let mut current: Option<&(dyn Error + 'static)> = Some(error);
    while let Some(err) = current {
        if let Some(e) = err.downcast_ref::<BrowserError>() {
            if let Some(kind) = browser_kind(e) {
                return Some(kind);
            }
        } else if let Some(e) = err.downcast_ref::<TransportError>() {
            return Some(transport_kind(e));
        } else if let Some(e) = err.downcast_ref::<io::Error>() {
            return Some(io_kind(e));
        } else if let Some(e) = err.downcast_ref::<serde_json::Error>() {
            return Some(ErrorKind::Contribution(ContributionFault::InvalidData {
                reason: e.to_string(),
            }));
        }
        current = err.source();
    }
    None
}

fn browser_kind(error: &BrowserError) -> Option<ErrorKind> {
    let kind = match error {
        BrowserError::ConnectionLost(_) | BrowserError::NotInitialized => {
            ErrorKind::Browser(BrowserFault::ControlChannelLost)
        }
        BrowserError::ElementNotFound(selector) => {
            ErrorKind::Browser(BrowserFault::ElementNotFound {
                selector: selector.clone(),
            })
        }
        BrowserError::NavigationFailed { url, message } => {
            if is_timeout_text(&message.to_lowercase()) {
                ErrorKind::Browser(BrowserFault::PageLoadTimeout {
                    url: Some(url.clone()),
                })
            } else {
                ErrorKind::Network(NetworkFault::ConnectionFailed)
            }
        }
        BrowserError::Timeout(_) => ErrorKind::Browser(BrowserFault::PageLoadTimeout { url: None }),
        BrowserError::Crashed(_) => ErrorKind::Browser(BrowserFault::ProcessCrash),
        // Generic collaborator failures carry no structure; let the message decide.
        BrowserError::JavaScript(_) | BrowserError::ActionFailed(_) => return None,
    };
    Some(kind)
}

fn transport_kind(error: &TransportError) -> ErrorKind {
    match error {
        TransportError::ConnectionFailed(_) => ErrorKind::Network(NetworkFault::ConnectionFailed),
        TransportError::Disconnected(_) => ErrorKind::Network(NetworkFault::SocketDisconnected),
        TransportError::Timeout(_) => ErrorKind::Network(NetworkFault::Timeout),
        TransportError::Server { status, .. } => {
            ErrorKind::Network(NetworkFault::ServerError { status: *status })
        }
        TransportError::Serialization(e) => {
            ErrorKind::Contribution(ContributionFault::InvalidData {
                reason: e.to_string(),
            })
        }
        TransportError::SendFailed(_) => {
            ErrorKind::Contribution(ContributionFault::TransmissionFailed)
        }
    }
}

fn io_kind(error: &io::Error) -> ErrorKind {
    match error.kind() {
        io::ErrorKind::OutOfMemory => ErrorKind::System(SystemFault::OutOfMemory),
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected => ErrorKind::Network(NetworkFault::ConnectionFailed),
        io::ErrorKind::BrokenPipe => ErrorKind::Network(NetworkFault::SocketDisconnected),
        io::ErrorKind::TimedOut => ErrorKind::Network(NetworkFault::Timeout),
        _ => ErrorKind::System(SystemFault::FileSystem {
            detail: error.to_string(),
        }),
    }
}

fn message_kind(detail: &str) -> Option<ErrorKind> {
    let lower = detail.to_lowercase();
    if lower.contains("connection") {
        Some(ErrorKind::Network(NetworkFault::ConnectionFailed))
    } else if is_timeout_text(&lower) {
        Some(ErrorKind::Network(NetworkFault::Timeout))
    } else if lower.contains("playwright") {
        Some(ErrorKind::Browser(BrowserFault::ControlChannelLost))
    } else if lower.contains("memory") || lower.contains("heap") {
        Some(ErrorKind::System(SystemFault::OutOfMemory))
    } else {
        None
    }
}

fn context_kind(context: &str) -> Option<ErrorKind> {
    context
        .to_lowercase()
        .contains("contribution")
        .then_some(ErrorKind::Contribution(ContributionFault::TransmissionFailed))
}

fn is_timeout_text(lower: &str) -> bool {
    lower.contains("timeout") || lower.contains("timed out")
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
