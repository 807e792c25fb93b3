//! Cooperative cancellation of send bursts.

use std::sync::Arc;

use tokio::sync::watch;

/// A shared cancellation flag.
///
/// Cancellation is sticky: once triggered, every burst using this handle
/// stops at its next repeat boundary until [`CancelHandle::reset`] is called.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelHandle {
    /// Creates a handle that is not cancelled.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    /// Clears a previous cancellation.
    pub fn reset(&self) {
        let _ = self.tx.send(false);
    }

    /// Returns true if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Completes once cancellation is requested.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Unreachable while `self` holds the sender.
                std::future::pending::<()>().await;
            }
        }
    }
}
