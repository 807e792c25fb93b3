//! Decode rejections.

use maxxfan_core::CommandError;
use thiserror::Error;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Reasons a pulse train is not a valid frame of a protocol.
///
/// None of these are fatal: noise and foreign transmissions on a shared
/// channel are expected, and the receive path drops them silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A duration or level does not fit the protocol timing.
    #[error("no match at pulse {index}: {reason}")]
    NoMatch {
        /// Index of the offending pulse.
        index: usize,
        /// What was expected there.
        reason: &'static str,
    },

    /// The capture ended before the frame was complete.
    ///
    /// Counts are pulses for the pulse-distance protocol and bits for the
    /// serial protocol.
    #[error("frame truncated: needed {expected} symbols, got {received}")]
    Truncated { expected: usize, received: usize },

    /// The transmitted checksum disagrees with the payload.
    #[error("checksum mismatch: computed {expected:#04x}, received {actual:#04x}")]
    ChecksumFailed { expected: u8, actual: u8 },

    /// The frame carried a field value no command can hold.
    #[error("decoded field out of range: {0}")]
    InvalidField(#[from] CommandError),
}

impl DecodeError {
    /// Creates a no-match rejection.
    pub fn no_match(index: usize, reason: &'static str) -> Self {
        Self::NoMatch { index, reason }
    }

    /// Short machine-friendly name of the rejection kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoMatch { .. } => "no_match",
            Self::Truncated { .. } => "truncated",
            Self::ChecksumFailed { .. } => "checksum_failed",
            Self::InvalidField(_) => "invalid_field",
        }
    }
}

/// An unknown protocol identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown protocol: {0}")]
pub struct ParseProtocolError(pub String);
