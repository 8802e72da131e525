//! Contribution transmission with a fixed retry schedule.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};
use voicepath_protocols::{ContributionMessage, Transport, TransportError};

/// Escalating delays between retries. Retries past the end of the list
/// reuse its last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySchedule {
    delays: Vec<Duration>,
    max_retries: u32,
}

impl RetrySchedule {
    pub fn new(delays: Vec<Duration>, max_retries: u32) -> Self {
        Self { delays, max_retries }
    }

    /// Delay before retry number `retry` (zero-based).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let index = (retry as usize).min(self.delays.len().saturating_sub(1));
        self.delays.get(index).copied().unwrap_or_default()
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// The initial attempt plus every retry.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// Send `message`, retrying on any transport error until the schedule is
/// exhausted. The last error is returned.
pub async fn send_with_retry(
    transport: &dyn Transport,
    message: &ContributionMessage,
    schedule: &RetrySchedule,
) -> Result<(), TransportError> {
    let mut retry = 0;
    loop {
        match transport.send(message).await {
            Ok(()) => {
                if retry > 0 {
                    info!(
                        "Contribution for session {} sent after {} retries",
                        message.session_id, retry
                    );
                } else {
                    debug!(
                        "Contribution for session {} sent ({} steps)",
                        message.session_id,
                        message.steps.len()
                    );
                }
                return Ok(());
            }
            Err(e) if retry < schedule.max_retries() => {
                let delay = schedule.delay_for_retry(retry);
                warn!(
                    "Contribution send failed (attempt {}/{}): {}. Retrying in {:?}",
                    retry + 1,
                    schedule.max_attempts(),
                    e,
                    delay
                );
                sleep(delay).await;
                retry += 1;
            }
            Err(e) => {
                warn!(
                    "Contribution send failed after {} attempts: {}",
                    schedule.max_attempts(),
                    e
                );
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> RetrySchedule {
        RetrySchedule::new(
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(5),
            ],
            5,
        )
    }

    #[test]
    fn test_delay_caps_at_last_entry() {
        let schedule = schedule();
        assert_eq!(schedule.delay_for_retry(0), Duration::from_secs(1));
        assert_eq!(schedule.delay_for_retry(1), Duration::from_secs(2));
        assert_eq!(schedule.delay_for_retry(2), Duration::from_secs(5));
        assert_eq!(schedule.delay_for_retry(4), Duration::from_secs(5));
        assert_eq!(schedule.max_attempts(), 6);
    }

    #[test]
    fn test_empty_schedule_retries_immediately() {
        let schedule = RetrySchedule::new(Vec::new(), 2);
        assert_eq!(schedule.delay_for_retry(0), Duration::ZERO);
        assert_eq!(schedule.delay_for_retry(7), Duration::ZERO);
    }
}
