//! Cancel-on-reschedule debouncing.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delivers a value once no newer value arrived for a quiet period.
///
/// Every [`push`](Self::push) aborts the pending timer and starts a new one,
/// so a burst of values yields only the last. Fired values are delivered on
/// the receiver returned by [`Debouncer::new`].
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer and the receiver its fired values arrive on.
    pub fn new(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                quiet,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Schedules `value`, replacing any value still waiting.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            // receiver gone means the owner is shutting down
            let _ = tx.send(value);
        }));
    }

    /// Drops the waiting value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while a value is waiting for its quiet period to pass.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
