//! Playwright bridge errors.

use thiserror::Error;
use voicepath_protocols::BrowserError;

#[derive(Debug, Error)]
pub enum PlaywrightError {
    #[error("Bridge failed to start: {0}")]
    BridgeStartFailed(String),

    #[error("Bridge process died: {0}")]
    BridgeDied(String),

    #[error("Bridge communication error: {0}")]
    CommunicationError(String),

    /// Error raised by Playwright inside the bridge.
    #[error("Bridge error: {0}")]
    BridgeError(String),

    #[error("Browser launch failed: {0}")]
    BrowserLaunchFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Browser not initialized")]
    NotInitialized,

    #[error("Node.js not found. Please install Node.js >= 18")]
    NodeNotFound,
}

impl From<std::io::Error> for PlaywrightError {
    fn from(e: std::io::Error) -> Self {
        PlaywrightError::CommunicationError(e.to_string())
    }
}

impl From<serde_json::Error> for PlaywrightError {
    fn from(e: serde_json::Error) -> Self {
        PlaywrightError::CommunicationError(format!("JSON error: {}", e))
    }
}

impl From<PlaywrightError> for BrowserError {
    fn from(e: PlaywrightError) -> Self {
        match e {
            PlaywrightError::NotInitialized => BrowserError::NotInitialized,
            PlaywrightError::BridgeDied(msg) => BrowserError::Crashed(msg),
            PlaywrightError::BridgeStartFailed(msg) | PlaywrightError::CommunicationError(msg) => {
                BrowserError::ConnectionLost(msg)
            }
            PlaywrightError::NodeNotFound => {
                BrowserError::ConnectionLost(PlaywrightError::NodeNotFound.to_string())
            }
            PlaywrightError::BrowserLaunchFailed(msg) => BrowserError::Crashed(msg),
            PlaywrightError::Timeout(msg) => BrowserError::Timeout(msg),
            PlaywrightError::BridgeError(msg) => BrowserError::ActionFailed(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_error_mapping() {
        assert!(matches!(
            BrowserError::from(PlaywrightError::NotInitialized),
            BrowserError::NotInitialized
        ));
        assert!(matches!(
            BrowserError::from(PlaywrightError::BridgeDied("exit 1".into())),
            BrowserError::Crashed(_)
        ));
        assert!(matches!(
            BrowserError::from(PlaywrightError::Timeout("30000ms".into())),
            BrowserError::Timeout(_)
        ));
        assert!(matches!(
            BrowserError::from(PlaywrightError::NodeNotFound),
            BrowserError::ConnectionLost(msg) if msg.contains("Node.js")
        ));
    }

    #[test]
    fn test_io_error_from() {
        let err = PlaywrightError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));
        assert!(err.to_string().contains("pipe closed"));
    }
}
