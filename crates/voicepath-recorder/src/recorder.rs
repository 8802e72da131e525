//! Contribution recorder.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use voicepath_protocols::{ContributionMessage, RecordedStep, Transport};

use crate::config::RecorderConfig;
use crate::error::RecorderError;
use crate::sanitize::{sanitize_text, validate_step};
use crate::session::ContributionSession;
use crate::state::RecorderState;
use crate::transmit::send_with_retry;

/// What happened to a step handed to [`ContributionRecorder::record_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDisposition {
    /// Held as the pending typing step until the debounce window closes.
    Debounced,
    /// Committed to the session and the send buffer.
    Appended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndTrigger {
    Caller,
    Timeout,
}

#[derive(Default)]
struct SessionState {
    session: Option<ContributionSession>,
    active: bool,
    pending_typing: Option<RecordedStep>,
    debounce_generation: u64,
    debounce_task: Option<JoinHandle<()>>,
    timeout_task: Option<JoinHandle<()>>,
    /// Committed steps not yet acknowledged by the transport.
    buffer: Vec<RecordedStep>,
    partial_in_flight: bool,
}

impl SessionState {
    fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.id.as_str())
    }

    fn abort_tasks(&mut self) {
        if let Some(task) = self.debounce_task.take() {
            task.abort();
        }
        if let Some(task) = self.timeout_task.take() {
            task.abort();
        }
    }
}

struct Inner {
    transport: Arc<dyn Transport>,
    config: RecorderConfig,
    session: Mutex<SessionState>,
    state_tx: watch::Sender<RecorderState>,
    /// Serializes partial and final sends so steps leave in order.
    send_lock: tokio::sync::Mutex<()>,
}

/// Records one contribution session at a time and streams it to a
/// [`Transport`].
///
/// Must be used from within a Tokio runtime: debounce, batch sends and the
/// session timeout run as spawned tasks.
pub struct ContributionRecorder {
    inner: Arc<Inner>,
}

impl ContributionRecorder {
    pub fn new(transport: Arc<dyn Transport>, config: RecorderConfig) -> Self {
        let (state_tx, _) = watch::channel(RecorderState::Inactive);
        Self {
            inner: Arc::new(Inner {
                transport,
                config,
                session: Mutex::new(SessionState::default()),
                state_tx,
                send_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Begin a session for `task` and return its id.
    pub fn start_session(&self, task: &str) -> Result<String, RecorderError> {
        let task = sanitize_text(task, self.inner.config.max_task_length);
        let mut state = self.inner.session.lock();
        if state.active || self.state() == RecorderState::Sending {
            warn!("Ignoring start_session: a session is already active");
            return Err(RecorderError::AlreadyActive);
        }
        if self.state() == RecorderState::Error && !state.buffer.is_empty() {
            warn!(
                "Ignoring start_session: {} steps of session {} are unsent",
                state.buffer.len(),
                state.session_id().unwrap_or_default()
            );
            return Err(RecorderError::UnsentSteps(state.buffer.len()));
        }
        if task.is_empty() {
            warn!("Ignoring start_session: task is empty");
            return Err(RecorderError::EmptyTask);
        }

        state.abort_tasks();
        let session = ContributionSession::new(task);
        let id = session.id.clone();
        *state = SessionState {
            session: Some(session),
            active: true,
            ..Default::default()
        };
        state.timeout_task = Some(self.inner.spawn_timeout(id.clone()));
        drop(state);

        self.inner.set_state(RecorderState::Recording);
        info!("Recording session {} started", id);
        Ok(id)
    }

    /// Feed one observed interaction into the session.
    pub fn record_step(&self, step: RecordedStep) -> Result<StepDisposition, RecorderError> {
        let mut state = self.inner.session.lock();
        if !state.active {
            debug!("Dropping step '{}': no active session", step.action);
            return Err(RecorderError::NotActive);
        }
        let step = validate_step(step, &self.inner.config).map_err(|reason| {
            warn!("Discarding invalid step: {}", reason);
            RecorderError::InvalidStep(reason)
        })?;

        if step.is_enter_key() {
            self.inner.flush_pending(&mut state);
            self.inner.append(&mut state, step);
            return Ok(StepDisposition::Appended);
        }

        if step.is_typing() {
            state.pending_typing = Some(step);
            state.debounce_generation += 1;
            if let Some(task) = state.debounce_task.take() {
                task.abort();
            }
            state.debounce_task = Some(self.inner.spawn_debounce(state.debounce_generation));
            return Ok(StepDisposition::Debounced);
        }

        self.inner.flush_pending(&mut state);
        self.inner.append(&mut state, step);
        Ok(StepDisposition::Appended)
    }

    /// Commit pending typing and send everything still buffered as the final,
    /// complete message.
    pub async fn end_session(&self) -> Result<(), RecorderError> {
        self.inner.end(EndTrigger::Caller).await
    }

    /// Re-send the preserved buffer after a failed final transmission.
    pub async fn retry_transmission(&self) -> Result<(), RecorderError> {
        let guard = self.inner.session.lock();
        let claimed = self.inner.state_tx.send_if_modified(|state| {
            if *state == RecorderState::Error {
                *state = RecorderState::Sending;
                true
            } else {
                false
            }
        });
        drop(guard);
        if !claimed {
            return Err(RecorderError::NothingToRetry);
        }
        info!("Retrying contribution transmission");
        self.inner.transmit_final().await
    }

    /// Drop the session and its buffer and return to `Inactive`.
    ///
    /// This is the only way to discard steps left behind by a failed
    /// transmission.
    pub fn reset_session(&self) {
        let mut state = self.inner.session.lock();
        state.abort_tasks();
        if let Some(id) = state.session_id() {
            info!("Recording session {} reset", id);
        }
        *state = SessionState::default();
        drop(state);
        self.inner.set_state(RecorderState::Inactive);
    }

    pub fn state(&self) -> RecorderState {
        *self.inner.state_tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<RecorderState> {
        self.inner.state_tx.subscribe()
    }

    /// Copy of the current or most recent session.
    pub fn snapshot(&self) -> Option<ContributionSession> {
        self.inner.session.lock().session.clone()
    }

    /// Steps committed but not yet acknowledged by the transport.
    pub fn buffered_steps(&self) -> usize {
        self.inner.session.lock().buffer.len()
    }

    pub fn is_recording(&self) -> bool {
        self.inner.session.lock().active
    }
}

impl Drop for ContributionRecorder {
    fn drop(&mut self) {
        self.inner.session.lock().abort_tasks();
    }
}

impl Inner {
    fn set_state(&self, state: RecorderState) {
        let previous = self.state_tx.send_replace(state);
        if previous != state {
            debug!("Recorder state {} -> {}", previous, state);
        }
    }

    fn spawn_debounce(self: &Arc<Self>, generation: u64) -> JoinHandle<()> {
        let inner = Arc::clone(self);
        let delay = self.config.debounce();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            inner.flush_debounced(generation);
        })
    }

    fn spawn_timeout(self: &Arc<Self>, session_id: String) -> JoinHandle<()> {
        let inner = Arc::clone(self);
        let timeout = self.config.session_timeout();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let current = inner.session.lock().session_id() == Some(session_id.as_str());
            if !current {
                return;
            }
            info!("Recording session {} timed out, ending", session_id);
            if let Err(e) = inner.end(EndTrigger::Timeout).await {
                warn!("Automatic end of session {} failed: {}", session_id, e);
            }
        })
    }

    fn flush_debounced(self: &Arc<Self>, generation: u64) {
        let mut state = self.session.lock();
        if !state.active || state.debounce_generation != generation {
            return;
        }
        state.debounce_task = None;
        if let Some(step) = state.pending_typing.take() {
            debug!("Debounce window closed, committing typing step");
            self.append(&mut state, step);
        }
    }

    fn flush_pending(self: &Arc<Self>, state: &mut SessionState) {
        if let Some(task) = state.debounce_task.take() {
            task.abort();
        }
        if let Some(step) = state.pending_typing.take() {
            self.append(state, step);
        }
    }

    fn commit(state: &mut SessionState, step: RecordedStep) {
        if let Some(session) = state.session.as_mut() {
            session.step_count += 1;
            session.steps.push(step.clone());
        }
        state.buffer.push(step);
    }

    fn append(self: &Arc<Self>, state: &mut SessionState, step: RecordedStep) {
        Self::commit(state, step);
        if state.buffer.len() >= self.config.batch_size && !state.partial_in_flight {
            state.partial_in_flight = true;
            let inner = Arc::clone(self);
            tokio::spawn(async move { inner.send_partial().await });
        }
    }

    async fn send_partial(self: Arc<Self>) {
        let _send = self.send_lock.lock().await;
        let message = {
            let mut state = self.session.lock();
            if !state.active {
                state.partial_in_flight = false;
                return;
            }
            match Self::message(&state, true) {
                Some(message) => message,
                None => {
                    state.partial_in_flight = false;
                    return;
                }
            }
        };

        let result = send_with_retry(
            self.transport.as_ref(),
            &message,
            &self.config.retry_schedule(),
        )
        .await;

        let mut state = self.session.lock();
        state.partial_in_flight = false;
        if state.session_id() != Some(message.session_id.as_str()) {
            return;
        }
        match result {
            Ok(()) => {
                let sent = message.steps.len().min(state.buffer.len());
                state.buffer.drain(..sent);
                info!(
                    "Partial contribution sent ({} steps, {} recorded)",
                    sent, message.total_steps
                );
            }
            Err(e) => warn!(
                "Partial contribution failed, {} steps stay buffered: {}",
                state.buffer.len(),
                e
            ),
        }
    }

    async fn end(self: &Arc<Self>, trigger: EndTrigger) -> Result<(), RecorderError> {
        {
            let mut state = self.session.lock();
            if !state.active {
                return Err(RecorderError::NotActive);
            }
            if let Some(task) = state.debounce_task.take() {
                task.abort();
            }
            if let Some(step) = state.pending_typing.take() {
                Self::commit(&mut state, step);
            }
            // the timeout task must not abort itself
            if let Some(task) = state.timeout_task.take() {
                if trigger == EndTrigger::Caller {
                    task.abort();
                }
            }
            state.active = false;
            if let Some(session) = state.session.as_mut() {
                session.is_active = false;
            }
            // published under the lock so start_session cannot slip in
            self.set_state(RecorderState::Sending);
        }
        self.transmit_final().await
    }

    async fn transmit_final(self: &Arc<Self>) -> Result<(), RecorderError> {
        let _send = self.send_lock.lock().await;
        let message = {
            let state = self.session.lock();
            Self::message(&state, false)
        };
        let Some(message) = message else {
            self.set_state(RecorderState::Inactive);
            return Err(RecorderError::NotActive);
        };

        let schedule = self.config.retry_schedule();
        let result = send_with_retry(self.transport.as_ref(), &message, &schedule).await;

        let mut state = self.session.lock();
        if state.session_id() != Some(message.session_id.as_str()) {
            // reset while sending; the session is gone
            return result.map_err(|source| RecorderError::Transmission {
                attempts: schedule.max_attempts(),
                source,
            });
        }
        match result {
            Ok(()) => {
                let sent = message.steps.len().min(state.buffer.len());
                state.buffer.drain(..sent);
                self.set_state(RecorderState::Completed);
                drop(state);
                info!(
                    "Contribution {} completed ({} steps)",
                    message.session_id, message.total_steps
                );
                Ok(())
            }
            Err(source) => {
                let kept = state.buffer.len();
                self.set_state(RecorderState::Error);
                drop(state);
                error!(
                    "Contribution {} failed, {} steps kept for retry: {}",
                    message.session_id, kept, source
                );
                Err(RecorderError::Transmission {
                    attempts: schedule.max_attempts(),
                    source,
                })
            }
        }
    }

    fn message(state: &SessionState, partial: bool) -> Option<ContributionMessage> {
        let session = state.session.as_ref()?;
        Some(ContributionMessage {
            session_id: session.id.clone(),
            task: session.task.clone(),
            steps: state.buffer.clone(),
            is_partial: partial,
            is_complete: !partial,
            total_steps: session.step_count,
        })
    }
}

#[cfg(test)]
#[path = "recorder_tests.rs"]
mod tests;
