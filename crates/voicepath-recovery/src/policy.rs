//! Static recovery policies.

use std::time::Duration;

use crate::kind::{BrowserFault, ContributionFault, ErrorKind, NetworkFault};

/// Upper bound on any single backoff delay.
pub const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// How to react to a classified failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryPolicy {
    /// Retries after the failure that was reported.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub retry_delay_base: Duration,
    /// Factor applied to the delay for every further retry.
    pub backoff_multiplier: f64,
    /// Publish a dialog when automatic recovery is not possible or exhausted.
    pub show_user_dialog: bool,
    /// Run the recovery action automatically.
    pub auto_recover: bool,
}

/// Policy for kinds without a dedicated entry.
pub const DEFAULT_POLICY: RecoveryPolicy = RecoveryPolicy {
    max_retries: 3,
    retry_delay_base: Duration::from_secs(1),
    backoff_multiplier: 2.0,
    show_user_dialog: false,
    auto_recover: true,
};

impl RecoveryPolicy {
    const fn new(
        max_retries: u32,
        base_ms: u64,
        backoff_multiplier: f64,
        show_user_dialog: bool,
        auto_recover: bool,
    ) -> Self {
        Self {
            max_retries,
            retry_delay_base: Duration::from_millis(base_ms),
            backoff_multiplier,
            show_user_dialog,
            auto_recover,
        }
    }

    /// Backoff before retry number `attempt` (zero-based), capped at [`MAX_BACKOFF`].
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.retry_delay_base.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);
        let delay = delay.min(MAX_BACKOFF.as_millis() as f64);
        Duration::from_millis(delay as u64)
    }

    /// Total number of times the recovery action may run.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// Look up the policy for a kind. Payload fields do not affect the result.
pub fn policy_for(kind: &ErrorKind) -> RecoveryPolicy {
    match kind {
        ErrorKind::Network(NetworkFault::SocketDisconnected) => {
            RecoveryPolicy::new(5, 1_000, 2.0, false, true)
        }
        ErrorKind::Network(NetworkFault::ConnectionFailed) => {
            RecoveryPolicy::new(3, 2_000, 2.0, true, true)
        }
        ErrorKind::Network(NetworkFault::Timeout) => RecoveryPolicy::new(2, 1_000, 1.5, true, true),
        ErrorKind::Network(NetworkFault::ServerError { .. }) => {
            RecoveryPolicy::new(2, 3_000, 2.0, true, true)
        }
        ErrorKind::Browser(BrowserFault::ControlChannelLost) => {
            RecoveryPolicy::new(2, 2_000, 2.0, true, true)
        }
        ErrorKind::Browser(BrowserFault::ElementNotFound { .. }) => {
            RecoveryPolicy::new(0, 0, 1.0, true, false)
        }
        ErrorKind::Browser(BrowserFault::PageLoadTimeout { .. }) => {
            RecoveryPolicy::new(1, 2_000, 2.0, true, true)
        }
        ErrorKind::Browser(BrowserFault::ProcessCrash) => {
            RecoveryPolicy::new(1, 3_000, 2.0, true, true)
        }
        ErrorKind::Contribution(ContributionFault::TransmissionFailed) => {
            RecoveryPolicy::new(3, 1_000, 2.0, true, true)
        }
        ErrorKind::Contribution(ContributionFault::InvalidData { .. })
        | ErrorKind::Contribution(ContributionFault::SessionExpired) => {
            RecoveryPolicy::new(0, 0, 1.0, true, false)
        }
        _ => DEFAULT_POLICY,
    }
}
