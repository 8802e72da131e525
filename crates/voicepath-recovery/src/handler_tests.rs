use super::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use voicepath_protocols::{BrowserError, TransportError};

use crate::dialog::{recovery_action, BoxError, DialogAction};
use crate::kind::{ErrorKind, NetworkFault, SystemFault};

/// Action that fails `fail_times` times, then succeeds.
fn flaky_action(fail_times: u32) -> (RecoveryAction, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let action = recovery_action(move || {
        let counter = counter.clone();
        async move {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n < fail_times {
                Err::<(), BoxError>("still down".into())
            } else {
                Ok(())
            }
        }
    });
    (action, calls)
}

#[tokio::test(start_paused = true)]
async fn test_retryable_error_recovers_silently() {
    let handler = ExceptionHandler::new();
    let (action, calls) = flaky_action(2);
    let err = TransportError::ConnectionFailed("refused".to_string());

    let outcome = handler.handle(&err, "path search", Some(action)).await;

    match outcome {
        RecoveryOutcome::Recovered { record, attempts } => {
            assert_eq!(attempts, 3);
            assert_eq!(record.kind(), &ErrorKind::Network(NetworkFault::ConnectionFailed));
        }
        other => panic!("expected recovery, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(handler.current_dialog().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_without_dialog_fails() {
    let handler = ExceptionHandler::new();
    let (action, calls) = flaky_action(u32::MAX);
    let err = TransportError::Disconnected("closed".to_string());

    let outcome = handler.handle(&err, "socket", Some(action)).await;

    // Socket policy: 5 retries, no dialog.
    match outcome {
        RecoveryOutcome::Failed { attempts, .. } => assert_eq!(attempts, 6),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 6);
    assert!(handler.current_dialog().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_falls_through_to_dialog() {
    let handler = ExceptionHandler::new();
    let mut rx = handler.subscribe();
    let (action, calls) = flaky_action(u32::MAX);
    let err = TransportError::ConnectionFailed("refused".to_string());

    let outcome = handler.handle(&err, "path search", Some(action)).await;

    assert!(matches!(outcome, RecoveryOutcome::DialogRequested(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert!(rx.has_changed().unwrap());
    let dialog = rx.borrow_and_update().clone().unwrap();
    assert_eq!(dialog.title, "Network Error");
    assert_eq!(dialog.actions, vec![DialogAction::Retry, DialogAction::Dismiss]);
}

#[tokio::test(start_paused = true)]
async fn test_non_retryable_goes_straight_to_dialog() {
    let handler = ExceptionHandler::new();
    let (action, calls) = flaky_action(0);
    let err = BrowserError::ElementNotFound("#buy".to_string());

    let outcome = handler.handle(&err, "replay", Some(action)).await;

    let dialog = match outcome {
        RecoveryOutcome::DialogRequested(dialog) => dialog,
        other => panic!("expected dialog, got {:?}", other),
    };
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(dialog.error_code, "BRW_002");
    assert!(dialog.message.contains("#buy"));

    // The UI decides when to run the carried action.
    assert!(dialog.retry().await.is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_error_without_action_is_dialog_worthy() {
    let handler = ExceptionHandler::new();
    let err = std::io::Error::other("mystery");

    let outcome = handler.handle(&err, "replay", None).await;

    assert_eq!(
        outcome.record().kind(),
        &ErrorKind::System(SystemFault::FileSystem {
            detail: "mystery".to_string()
        })
    );
    let dialog = handler.current_dialog().unwrap();
    assert_eq!(dialog.actions, vec![DialogAction::Dismiss]);
    assert!(dialog.retry().await.is_err());

    handler.dismiss();
    assert!(handler.current_dialog().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_backoff_is_applied_between_attempts() {
    let handler = ExceptionHandler::new();
    let (action, _) = flaky_action(1);
    let err = TransportError::Timeout(100);
    let start = tokio::time::Instant::now();

    let outcome = handler.handle(&err, "send", Some(action)).await;

    assert!(outcome.is_recovered());
    // Timeout policy: 1s, then 1.5s.
    assert_eq!(start.elapsed(), std::time::Duration::from_millis(2_500));
}
