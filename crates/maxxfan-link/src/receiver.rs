//! Receive path: decode, discard noise, collapse repeats.

use std::sync::Arc;
use std::time::Duration;

use maxxfan_protocol::ProtocolFilter;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, trace};

use crate::cancel::CancelHandle;
use crate::config::LinkConfig;
use crate::dedup::Deduplicator;
use crate::error::LinkResult;
use crate::event::CommandEvent;
use crate::transport::Capture;

/// Turns captures into command events.
#[derive(Debug, Clone)]
pub struct Receiver {
    filter: ProtocolFilter,
    dedup: Deduplicator,
}

impl Receiver {
    /// Creates a receiver for the protocols and window in `config`.
    pub fn new(config: &LinkConfig) -> LinkResult<Self> {
        config.validate()?;
        Ok(Self {
            filter: config.protocol,
            dedup: Deduplicator::new(config.dedup_window()),
        })
    }

    pub fn filter(&self) -> ProtocolFilter {
        self.filter
    }

    /// Handles one capture.
    ///
    /// Returns an event for a newly decoded command, or `None` for noise,
    /// foreign frames and repeats of the last command.
    pub fn on_capture(&mut self, capture: &Capture) -> Option<CommandEvent> {
        let (protocol, command) = match self.filter.decode(capture.pulses.pulses()) {
            Ok(decoded) => decoded,
            Err(e) => {
                trace!(
                    error = %e,
                    kind = e.kind(),
                    pulses = capture.pulses.len(),
                    "Discarded capture"
                );
                return None;
            }
        };

        let airtime = Duration::from_micros(capture.pulses.total_duration_us());
        if !self.dedup.admit(protocol, &command, capture.at, airtime) {
            return None;
        }

        info!(protocol = %protocol, command = %command, "Command received");
        Some(CommandEvent::new(protocol, command, capture.at))
    }

    /// Forgets the last received command.
    pub fn reset(&mut self) {
        self.dedup.clear();
    }
}

/// A receiver shared between concurrent capture sources.
///
/// One mutex guards the whole decode-and-admit step, so two sources racing
/// on repeats of the same burst still produce a single event.
#[derive(Debug, Clone)]
pub struct SharedReceiver {
    inner: Arc<Mutex<Receiver>>,
}

impl SharedReceiver {
    pub fn new(receiver: Receiver) -> Self {
        Self {
            inner: Arc::new(Mutex::new(receiver)),
        }
    }

    /// Handles one capture under the lock.
    pub async fn on_capture(&self, capture: &Capture) -> Option<CommandEvent> {
        self.inner.lock().await.on_capture(capture)
    }

    pub async fn reset(&self) {
        self.inner.lock().await.reset();
    }
}

impl From<Receiver> for SharedReceiver {
    fn from(receiver: Receiver) -> Self {
        Self::new(receiver)
    }
}

/// Delivers events for incoming captures until the capture channel closes,
/// the event consumer goes away, or `cancel` fires.
///
/// Returns the number of events delivered.
pub async fn run_receive_loop(
    receiver: SharedReceiver,
    mut captures: mpsc::Receiver<Capture>,
    events: mpsc::Sender<CommandEvent>,
    cancel: CancelHandle,
) -> usize {
    let mut delivered = 0;
    debug!("Receive loop started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!(delivered, "Receive loop cancelled");
                break;
            }
            capture = captures.recv() => {
                let Some(capture) = capture else {
                    debug!(delivered, "Capture channel closed");
                    break;
                };
                let Some(event) = receiver.on_capture(&capture).await else {
                    continue;
                };
                if events.send(event).await.is_err() {
                    debug!(delivered, "Event consumer gone");
                    break;
                }
                delivered += 1;
            }
        }
    }

    delivered
}
