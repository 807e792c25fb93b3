//! Events delivered to the host automation layer.

use chrono::{DateTime, Utc};
use maxxfan_core::Command;
use maxxfan_protocol::ProtocolKind;
use serde::Serialize;
use tokio::time::Instant;

/// One logical command received over the link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandEvent {
    /// Protocol the frame decoded as.
    pub protocol: ProtocolKind,
    /// The decoded command.
    pub command: Command,
    /// Arrival of the first frame of the burst (monotonic clock).
    #[serde(skip)]
    pub received_at: Instant,
    /// Wall-clock time the event was produced.
    pub timestamp: DateTime<Utc>,
}

impl CommandEvent {
    pub fn new(protocol: ProtocolKind, command: Command, received_at: Instant) -> Self {
        Self {
            protocol,
            command,
            received_at,
            timestamp: Utc::now(),
        }
    }
}
