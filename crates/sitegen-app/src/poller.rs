//! Cancellation handle for the preview poll timer.

use std::sync::Arc;

use tokio::sync::watch;

/// Owner-side handle of a periodic poll task.
///
/// The task holds the matching `watch::Receiver` and exits once the value
/// flips to `true`. Stopping is synchronous, so the TEA update function can
/// cancel a timer before it creates the next one.
#[derive(Debug, Clone)]
pub struct PollHandle {
    // Arc because Message/UpdateAction derive Clone and watch::Sender does not.
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl PollHandle {
    /// Create a running handle and the receiver for its task.
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (
            Self {
                shutdown_tx: Arc::new(tx),
            },
            rx,
        )
    }

    /// Stop the timer. Idempotent, and safe after the task has already exited.
    pub fn stop(&self) {
        self.shutdown_tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.shutdown_tx.borrow()
    }
}
