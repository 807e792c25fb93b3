//! CLI error types.

use std::io;

use maxxfan_core::CommandError;
use maxxfan_link::LinkError;
use maxxfan_protocol::{DecodeError, ParsePulseError};
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors reported by the `maxxfan` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The command flags or `[command]` table do not form a valid command.
    #[error("invalid command: {0}")]
    Command(#[from] CommandError),

    /// The input is not a pulse list.
    #[error("invalid pulse list: {0}")]
    Input(#[from] ParsePulseError),

    /// The pulse train is not a frame of the selected protocol.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Sending failed.
    #[error("link error: {0}")]
    Link(#[from] LinkError),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
