//! Single-slot confirmation gate for wait steps.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitResult {
    Confirmed,
    TimedOut,
    /// The slot was taken over or cleared before anyone confirmed.
    Cancelled,
}

struct Pending {
    id: u64,
    message: String,
    tx: oneshot::Sender<()>,
}

/// Holds at most one pending wait. Registering a new wait cancels the old one.
#[derive(Default)]
pub struct WaitGate {
    slot: Mutex<Option<Pending>>,
    next_id: AtomicU64,
}

impl WaitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the gate. The returned [`Waiter`] must be awaited to block.
    ///
    /// Registration happens before any caller notification so a confirmation
    /// issued from inside the notification is not lost.
    pub fn register(&self, message: impl Into<String>) -> Waiter<'_> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        *self.slot.lock() = Some(Pending {
            id,
            message: message.into(),
            tx,
        });
        Waiter { gate: self, id, rx }
    }

    /// Release the pending wait. Returns `false` when nothing was waiting.
    pub fn confirm(&self) -> bool {
        match self.slot.lock().take() {
            Some(pending) => pending.tx.send(()).is_ok(),
            None => false,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.slot.lock().is_some()
    }

    pub fn message(&self) -> Option<String> {
        self.slot.lock().as_ref().map(|pending| pending.message.clone())
    }

    /// Drop the pending wait, waking its waiter with [`WaitResult::Cancelled`].
    pub fn cancel(&self) {
        self.slot.lock().take();
    }
}

/// Receiving half of one registered wait. Dropping it clears the slot.
pub struct Waiter<'a> {
    gate: &'a WaitGate,
    id: u64,
    rx: oneshot::Receiver<()>,
}

impl Waiter<'_> {
    pub async fn wait(mut self, timeout: Duration) -> WaitResult {
        match tokio::time::timeout(timeout, &mut self.rx).await {
            Ok(Ok(())) => WaitResult::Confirmed,
            Ok(Err(_)) => WaitResult::Cancelled,
            Err(_) => WaitResult::TimedOut,
        }
    }
}

impl Drop for Waiter<'_> {
    fn drop(&mut self) {
        let mut slot = self.gate.slot.lock();
        if slot.as_ref().is_some_and(|pending| pending.id == self.id) {
            slot.take();
        }
    }
}
