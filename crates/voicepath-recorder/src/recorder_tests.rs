use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use voicepath_protocols::{ContributionMessage, RecordedStep, Transport, TransportError};

use super::*;

/// Transport double that fails the first `failures` sends.
#[derive(Default)]
struct MockTransport {
    failures: AtomicUsize,
    attempts: AtomicUsize,
    sent: Mutex<Vec<ContributionMessage>>,
}

impl MockTransport {
    fn failing(failures: usize) -> Self {
        Self {
            failures: AtomicUsize::new(failures),
            ..Default::default()
        }
    }

    fn sent(&self) -> Vec<ContributionMessage> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, message: &ContributionMessage) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(TransportError::ConnectionFailed("socket closed".into()));
        }
        self.sent.lock().push(message.clone());
        Ok(())
    }
}

/// Transport double that holds every send until the gate is opened.
#[derive(Default)]
struct GatedTransport {
    gate: tokio::sync::Notify,
    sent: Mutex<Vec<ContributionMessage>>,
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, message: &ContributionMessage) -> Result<(), TransportError> {
        self.gate.notified().await;
        self.sent.lock().push(message.clone());
        Ok(())
    }
}

const PAGE: &str = "https://booking.example.com/form";

fn typing(value: &str) -> RecordedStep {
    RecordedStep::new("type", PAGE)
        .with_selector("#query")
        .with_value(value)
}

fn click(selector: &str) -> RecordedStep {
    RecordedStep::new("click", PAGE).with_selector(selector)
}

fn recorder(transport: Arc<MockTransport>, config: RecorderConfig) -> ContributionRecorder {
    ContributionRecorder::new(transport, config)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn test_typing_is_debounced_into_one_step() {
    let transport = Arc::new(MockTransport::default());
    let recorder = recorder(transport.clone(), RecorderConfig::default());
    recorder.start_session("식당 예약").unwrap();

    for value in ["h", "he", "hel", "hello"] {
        assert_eq!(
            recorder.record_step(typing(value)).unwrap(),
            StepDisposition::Debounced
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(recorder.snapshot().unwrap().step_count, 0);

    tokio::time::sleep(Duration::from_millis(800)).await;

    let session = recorder.snapshot().unwrap();
    assert_eq!(session.step_count, 1);
    assert_eq!(session.steps[0].value.as_deref(), Some("hello"));
}

#[tokio::test(start_paused = true)]
async fn test_enter_flushes_pending_then_appends_itself() {
    let transport = Arc::new(MockTransport::default());
    let recorder = recorder(transport.clone(), RecorderConfig::default());
    recorder.start_session("search").unwrap();

    recorder.record_step(typing("hell")).unwrap();
    recorder.record_step(typing("hello")).unwrap();
    let enter = typing("hello").with_attribute("keyCode", json!(13));
    assert_eq!(
        recorder.record_step(enter).unwrap(),
        StepDisposition::Appended
    );

    let session = recorder.snapshot().unwrap();
    assert_eq!(session.step_count, 2);
    assert!(!session.steps[0].is_enter_key());
    assert_eq!(session.steps[0].value.as_deref(), Some("hello"));
    assert!(session.steps[1].is_enter_key());

    // the aborted debounce timer must not commit anything later
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(recorder.snapshot().unwrap().step_count, 2);
}

#[tokio::test(start_paused = true)]
async fn test_click_flushes_pending_typing_first() {
    let transport = Arc::new(MockTransport::default());
    let recorder = recorder(transport, RecorderConfig::default());
    recorder.start_session("login").unwrap();

    recorder.record_step(typing("kim")).unwrap();
    recorder.record_step(click("#submit")).unwrap();

    let steps = recorder.snapshot().unwrap().steps;
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].action, "type");
    assert_eq!(steps[1].action, "click");
}

#[tokio::test(start_paused = true)]
async fn test_full_batch_sends_partial_in_background() {
    let transport = Arc::new(MockTransport::default());
    let config = RecorderConfig {
        batch_size: 3,
        ..Default::default()
    };
    let recorder = recorder(transport.clone(), config);
    let id = recorder.start_session("checkout").unwrap();

    for selector in ["#a", "#b", "#c"] {
        recorder.record_step(click(selector)).unwrap();
    }
    settle().await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].session_id, id);
    assert!(sent[0].is_partial);
    assert!(!sent[0].is_complete);
    assert_eq!(sent[0].steps.len(), 3);
    assert_eq!(recorder.buffered_steps(), 0);
    assert_eq!(recorder.state(), RecorderState::Recording);

    recorder.record_step(click("#d")).unwrap();
    recorder.end_session().await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[1].is_complete);
    assert_eq!(sent[1].steps.len(), 1);
    assert_eq!(sent[1].total_steps, 4);
    assert_eq!(recorder.state(), RecorderState::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_failed_partial_send_keeps_steps_for_final() {
    let transport = Arc::new(MockTransport::failing(4));
    let config = RecorderConfig {
        batch_size: 2,
        ..Default::default()
    };
    let recorder = recorder(transport.clone(), config);
    recorder.start_session("book train").unwrap();
    recorder.record_step(click("#from")).unwrap();
    recorder.record_step(click("#to")).unwrap();

    tokio::time::sleep(Duration::from_secs(9)).await;

    assert_eq!(transport.attempts.load(Ordering::SeqCst), 4);
    assert!(transport.sent().is_empty());
    assert_eq!(recorder.state(), RecorderState::Recording);
    assert!(recorder.is_recording());
    assert_eq!(recorder.buffered_steps(), 2);

    recorder.end_session().await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].is_complete);
    let selectors: Vec<_> = sent[0].steps.iter().map(|s| s.selectors[0].as_str()).collect();
    assert_eq!(selectors, vec!["#from", "#to"]);
    assert_eq!(sent[0].total_steps, 2);
    assert_eq!(recorder.buffered_steps(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_end_session_commits_pending_typing() {
    let transport = Arc::new(MockTransport::default());
    let recorder = recorder(transport.clone(), RecorderConfig::default());
    recorder.start_session("memo").unwrap();

    recorder.record_step(click("#memo")).unwrap();
    recorder.record_step(typing("잘 부탁드립니다")).unwrap();
    recorder.end_session().await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].steps.len(), 2);
    assert_eq!(sent[0].steps[1].value.as_deref(), Some("잘 부탁드립니다"));
    assert!(!recorder.is_recording());
    assert!(matches!(
        recorder.record_step(click("#late")),
        Err(RecorderError::NotActive)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_retry_exhaustion_preserves_buffer() {
    let transport = Arc::new(MockTransport::failing(usize::MAX));
    let recorder = recorder(transport.clone(), RecorderConfig::default());
    let mut states = recorder.subscribe();
    recorder.start_session("renew passport").unwrap();
    recorder.record_step(click("#a")).unwrap();
    recorder.record_step(click("#b")).unwrap();

    let start = tokio::time::Instant::now();
    let err = recorder.end_session().await.unwrap_err();

    assert!(matches!(err, RecorderError::Transmission { attempts: 4, .. }));
    assert_eq!(transport.attempts.load(Ordering::SeqCst), 4);
    assert_eq!(start.elapsed(), Duration::from_secs(1 + 2 + 5));
    assert_eq!(recorder.state(), RecorderState::Error);
    assert_eq!(recorder.buffered_steps(), 2);
    assert!(states.has_changed().unwrap());
    assert_eq!(*states.borrow_and_update(), RecorderState::Error);

    transport.failures.store(0, Ordering::SeqCst);
    recorder.retry_transmission().await.unwrap();

    assert_eq!(recorder.state(), RecorderState::Completed);
    assert_eq!(recorder.buffered_steps(), 0);
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].steps.len(), 2);
    assert!(matches!(
        recorder.retry_transmission().await,
        Err(RecorderError::NothingToRetry)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_start_refused_while_failed_steps_are_unsent() {
    let transport = Arc::new(MockTransport::failing(usize::MAX));
    let recorder = recorder(transport.clone(), RecorderConfig::default());
    let first = recorder.start_session("renew passport").unwrap();
    recorder.record_step(click("#a")).unwrap();
    recorder.end_session().await.unwrap_err();

    assert!(matches!(
        recorder.start_session("order lunch"),
        Err(RecorderError::UnsentSteps(1))
    ));
    assert_eq!(recorder.state(), RecorderState::Error);
    assert_eq!(recorder.buffered_steps(), 1);
    assert_eq!(recorder.snapshot().unwrap().id, first);

    transport.failures.store(0, Ordering::SeqCst);
    recorder.retry_transmission().await.unwrap();
    assert_eq!(transport.sent()[0].session_id, first);

    let second = recorder.start_session("order lunch").unwrap();
    assert_ne!(second, first);
    assert_eq!(recorder.state(), RecorderState::Recording);
}

#[tokio::test(start_paused = true)]
async fn test_reset_discards_unsent_steps_and_allows_start() {
    let transport = Arc::new(MockTransport::failing(usize::MAX));
    let recorder = recorder(transport, RecorderConfig::default());
    recorder.start_session("renew passport").unwrap();
    recorder.record_step(click("#a")).unwrap();
    recorder.end_session().await.unwrap_err();

    recorder.reset_session();

    assert_eq!(recorder.buffered_steps(), 0);
    recorder.start_session("order lunch").unwrap();
    assert_eq!(recorder.state(), RecorderState::Recording);
}

#[tokio::test(start_paused = true)]
async fn test_start_rejected_while_final_send_is_in_flight() {
    let transport = Arc::new(GatedTransport::default());
    let recorder = Arc::new(ContributionRecorder::new(
        transport.clone(),
        RecorderConfig::default(),
    ));
    let first = recorder.start_session("pay rent").unwrap();
    recorder.record_step(click("#pay")).unwrap();
    assert!(recorder.snapshot().unwrap().is_active);

    let ending = {
        let recorder = Arc::clone(&recorder);
        tokio::spawn(async move { recorder.end_session().await })
    };
    settle().await;

    assert_eq!(recorder.state(), RecorderState::Sending);
    assert!(!recorder.is_recording());
    assert!(matches!(
        recorder.start_session("next"),
        Err(RecorderError::AlreadyActive)
    ));
    let snapshot = recorder.snapshot().unwrap();
    assert_eq!(snapshot.id, first);
    assert!(!snapshot.is_active);

    transport.gate.notify_one();
    ending.await.unwrap().unwrap();

    assert_eq!(recorder.state(), RecorderState::Completed);
    assert_eq!(transport.sent.lock().len(), 1);
    recorder.start_session("next").unwrap();
    assert!(recorder.snapshot().unwrap().is_active);
}

#[tokio::test(start_paused = true)]
async fn test_transient_failure_recovers_within_schedule() {
    let transport = Arc::new(MockTransport::failing(2));
    let recorder = recorder(transport.clone(), RecorderConfig::default());
    recorder.start_session("pay bill").unwrap();
    recorder.record_step(click("#pay")).unwrap();

    recorder.end_session().await.unwrap();

    assert_eq!(transport.attempts.load(Ordering::SeqCst), 3);
    assert_eq!(recorder.state(), RecorderState::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_session_times_out_and_ends_itself() {
    let transport = Arc::new(MockTransport::default());
    let config = RecorderConfig {
        session_timeout_secs: 60,
        ..Default::default()
    };
    let recorder = recorder(transport.clone(), config);
    recorder.start_session("idle").unwrap();
    recorder.record_step(click("#only")).unwrap();

    tokio::time::sleep(Duration::from_secs(61)).await;

    assert_eq!(recorder.state(), RecorderState::Completed);
    assert!(!recorder.is_recording());
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].is_complete);
}

#[tokio::test(start_paused = true)]
async fn test_start_rejections() {
    let transport = Arc::new(MockTransport::default());
    let recorder = recorder(transport, RecorderConfig::default());

    assert!(matches!(
        recorder.start_session("<script>alert(1)</script>"),
        Err(RecorderError::EmptyTask)
    ));
    assert_eq!(recorder.state(), RecorderState::Inactive);

    recorder.start_session("first").unwrap();
    assert!(matches!(
        recorder.start_session("second"),
        Err(RecorderError::AlreadyActive)
    ));
    assert_eq!(recorder.snapshot().unwrap().task, "first");
}

#[tokio::test(start_paused = true)]
async fn test_invalid_steps_are_discarded() {
    let transport = Arc::new(MockTransport::default());
    let recorder = recorder(transport, RecorderConfig::default());
    recorder.start_session("form").unwrap();

    let result = recorder.record_step(RecordedStep::new("click", "javascript:void(0)"));
    assert!(matches!(result, Err(RecorderError::InvalidStep(_))));
    assert_eq!(recorder.snapshot().unwrap().step_count, 0);
}

#[tokio::test(start_paused = true)]
async fn test_reset_returns_to_inactive() {
    let transport = Arc::new(MockTransport::default());
    let recorder = recorder(transport.clone(), RecorderConfig::default());
    recorder.start_session("abandon").unwrap();
    recorder.record_step(click("#x")).unwrap();
    recorder.record_step(typing("pending")).unwrap();

    recorder.reset_session();

    assert_eq!(recorder.state(), RecorderState::Inactive);
    assert!(recorder.snapshot().is_none());
    assert_eq!(recorder.buffered_steps(), 0);

    tokio::time::sleep(Duration::from_secs(3600)).await;
    assert!(transport.sent().is_empty());

    recorder.start_session("again").unwrap();
    assert_eq!(recorder.state(), RecorderState::Recording);
}
