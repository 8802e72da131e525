//! Error kinds.
//!
//! Four categories, each a closed set of subkinds with a fixed retryability,
//! error code and user-facing message.

use std::fmt;

use serde::Serialize;

/// Network-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NetworkFault {
    ConnectionFailed,
    SocketDisconnected,
    Timeout,
    ServerError { status: u16 },
}

/// Browser-control failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BrowserFault {
    ControlChannelLost,
    ElementNotFound { selector: String },
    PageLoadTimeout { url: Option<String> },
    ProcessCrash,
}

/// Contribution-pipeline failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContributionFault {
    TransmissionFailed,
    InvalidData { reason: String },
    SessionExpired,
}

/// Host-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SystemFault {
    OutOfMemory,
    FileSystem { detail: String },
    Unknown,
}

/// Classified kind of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "category", content = "fault", rename_all = "snake_case")]
pub enum ErrorKind {
    Network(NetworkFault),
    Browser(BrowserFault),
    Contribution(ContributionFault),
    System(SystemFault),
}

impl ErrorKind {
    /// Whether automatic retry can plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(NetworkFault::ServerError { status }) => {
                *status == 429 || (500..600).contains(status)
            }
            Self::Network(_) => true,
            Self::Browser(BrowserFault::ElementNotFound { .. }) => false,
            Self::Browser(_) => true,
            Self::Contribution(ContributionFault::TransmissionFailed) => true,
            Self::Contribution(_) => false,
            Self::System(_) => false,
        }
    }

    /// Stable code reported to users and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(NetworkFault::ConnectionFailed) => "NET_001",
            Self::Network(NetworkFault::SocketDisconnected) => "NET_002",
            Self::Network(NetworkFault::Timeout) => "NET_003",
            Self::Network(NetworkFault::ServerError { .. }) => "NET_004",
            Self::Browser(BrowserFault::ControlChannelLost) => "BRW_001",
            Self::Browser(BrowserFault::ElementNotFound { .. }) => "BRW_002",
            Self::Browser(BrowserFault::PageLoadTimeout { .. }) => "BRW_003",
            Self::Browser(BrowserFault::ProcessCrash) => "BRW_004",
            Self::Contribution(ContributionFault::TransmissionFailed) => "CTB_001",
            Self::Contribution(ContributionFault::InvalidData { .. }) => "CTB_002",
            Self::Contribution(ContributionFault::SessionExpired) => "CTB_003",
            Self::System(SystemFault::OutOfMemory) => "SYS_001",
            Self::System(SystemFault::FileSystem { .. }) => "SYS_002",
            Self::System(SystemFault::Unknown) => "SYS_999",
        }
    }

    /// Dialog title for the category.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Network(_) => "Network Error",
            Self::Browser(_) => "Browser Error",
            Self::Contribution(_) => "Contribution Error",
            Self::System(_) => "System Error",
        }
    }

    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(NetworkFault::ConnectionFailed) => {
                "Could not connect to the server. Check your network connection.".to_string()
            }
            Self::Network(NetworkFault::SocketDisconnected) => {
                "The connection to the server was interrupted. Reconnecting...".to_string()
            }
            Self::Network(NetworkFault::Timeout) => {
                "The server took too long to respond.".to_string()
            }
            Self::Network(NetworkFault::ServerError { status }) => {
                format!("The server returned an error (HTTP {}).", status)
            }
            Self::Browser(BrowserFault::ControlChannelLost) => {
                "Lost control of the browser. Restarting the browser session.".to_string()
            }
            Self::Browser(BrowserFault::ElementNotFound { selector }) => {
                format!("Could not find the expected element on the page ({}).", selector)
            }
            Self::Browser(BrowserFault::PageLoadTimeout { url }) => match url {
                Some(url) => format!("The page took too long to load: {}", url),
                None => "The page took too long to load.".to_string(),
            },
            Self::Browser(BrowserFault::ProcessCrash) => {
                "The browser stopped unexpectedly.".to_string()
            }
            Self::Contribution(ContributionFault::TransmissionFailed) => {
                "Recorded steps could not be sent. They are kept for a later retry.".to_string()
            }
            Self::Contribution(ContributionFault::InvalidData { reason }) => {
                format!("The recorded data is invalid: {}", reason)
            }
            Self::Contribution(ContributionFault::SessionExpired) => {
                "The recording session has expired. Start a new one.".to_string()
            }
            Self::System(SystemFault::OutOfMemory) => {
                "The system is running out of memory.".to_string()
            }
            Self::System(SystemFault::FileSystem { detail }) => {
                format!("A file operation failed: {}", detail)
            }
            Self::System(SystemFault::Unknown) => {
                "An unexpected error occurred.".to_string()
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title(), self.code())
    }
}
