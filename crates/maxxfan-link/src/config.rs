//! Link configuration.

use std::time::Duration;

use maxxfan_protocol::ProtocolFilter;
use serde::{Deserialize, Serialize};

use crate::error::{LinkError, LinkResult};

/// Transmissions per command.
pub const DEFAULT_REPEAT_COUNT: u32 = 4;
/// Silence between two transmissions of a burst.
pub const DEFAULT_INTER_FRAME_GAP_MS: u64 = 50;
/// Window in which identical decodes collapse into one event.
pub const DEFAULT_DEDUP_WINDOW_MS: u64 = 150;

/// Repeat and deduplication policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    /// Protocol used to send, and accepted on receive (`"any"` accepts all
    /// registered protocols and sends the default one).
    pub protocol: ProtocolFilter,

    /// Number of times each frame is transmitted.
    pub repeat_count: u32,

    /// Gap between repeats, in milliseconds.
    pub inter_frame_gap_ms: u64,

    /// Deduplication window, in milliseconds.
    pub dedup_window_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            protocol: ProtocolFilter::default(),
            repeat_count: DEFAULT_REPEAT_COUNT,
            inter_frame_gap_ms: DEFAULT_INTER_FRAME_GAP_MS,
            dedup_window_ms: DEFAULT_DEDUP_WINDOW_MS,
        }
    }
}

impl LinkConfig {
    /// Builder: set the protocol.
    pub fn with_protocol(mut self, protocol: impl Into<ProtocolFilter>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Builder: set the repeat count.
    pub fn with_repeat_count(mut self, repeat_count: u32) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    /// Builder: set the inter-frame gap.
    pub fn with_inter_frame_gap(mut self, gap: Duration) -> Self {
        self.inter_frame_gap_ms = duration_ms(gap);
        self
    }

    /// Builder: set the deduplication window.
    pub fn with_dedup_window(mut self, window: Duration) -> Self {
        self.dedup_window_ms = duration_ms(window);
        self
    }

    pub fn inter_frame_gap(&self) -> Duration {
        Duration::from_millis(self.inter_frame_gap_ms)
    }

    pub fn dedup_window(&self) -> Duration {
        Duration::from_millis(self.dedup_window_ms)
    }

    /// Checks the values a link cannot run with.
    pub fn validate(&self) -> LinkResult<()> {
        if self.repeat_count == 0 {
            return Err(LinkError::config("repeat_count must be at least 1"));
        }
        if self.dedup_window_ms == 0 {
            return Err(LinkError::config("dedup_window_ms must be greater than 0"));
        }
        Ok(())
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
