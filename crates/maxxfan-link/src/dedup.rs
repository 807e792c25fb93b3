//! Receive-side deduplication of repeat bursts.

use std::time::Duration;

use maxxfan_core::Command;
use maxxfan_protocol::ProtocolKind;
use tokio::time::Instant;
use tracing::debug;

/// Collapses repeated identical decodes into one.
///
/// Holds the last admitted command and the arrival time of its most recent
/// repeat. Arrivals are spaced by one frame's airtime plus the silence
/// between frames, so a repeat is suppressed when it arrives within `window`
/// plus its own airtime of the previous one. Each suppressed repeat moves the
/// timestamp forward, so a burst of any length yields a single admission as
/// long as the silence between its frames stays within the window.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    window: Duration,
    last: Option<(ProtocolKind, Command, Instant)>,
}

impl Deduplicator {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns true if `command` is a new logical event.
    ///
    /// `airtime` is how long the frame carrying `command` took on the channel.
    pub fn admit(
        &mut self,
        protocol: ProtocolKind,
        command: &Command,
        at: Instant,
        airtime: Duration,
    ) -> bool {
        if let Some((last_protocol, last_command, last_at)) = &mut self.last
            && *last_protocol == protocol
            && last_command == command
            && at.saturating_duration_since(*last_at) <= self.window.saturating_add(airtime)
        {
            *last_at = at;
            debug!(protocol = %protocol, "Suppressed repeated frame");
            return false;
        }

        self.last = Some((protocol, *command, at));
        true
    }

    /// Forgets the last command.
    pub fn clear(&mut self) {
        self.last = None;
    }
}
