//! Link error types.

use std::io;

use maxxfan_core::CommandError;
use thiserror::Error;

/// Result type for link operations.
pub type LinkResult<T> = Result<T, LinkError>;

/// Errors that can occur while sending.
///
/// Decode failures never surface here; the receive path drops them.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Invalid link configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The transmitter failed to emit a frame.
    #[error("Transmit failed: {message}")]
    Transmit { message: String },

    /// A command template resolved to an invalid command.
    #[error("Invalid command: {0}")]
    Command(#[from] CommandError),

    /// IO error from a transmitter backend.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl LinkError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a transmit error.
    pub fn transmit(message: impl Into<String>) -> Self {
        Self::Transmit {
            message: message.into(),
        }
    }
}
