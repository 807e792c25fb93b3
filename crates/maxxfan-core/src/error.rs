//! Command construction errors.

use thiserror::Error;

/// Result type for command construction.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors raised while building a [`Command`](crate::Command).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A field value lies outside its declared range or step.
    #[error("invalid {field}: {value} (expected {expected})")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: u8,
        /// Human-readable description of the accepted values.
        expected: &'static str,
    },
}

impl CommandError {
    /// Creates an invalid field error.
    pub fn invalid_field(field: &'static str, value: u8, expected: &'static str) -> Self {
        Self::InvalidField {
            field,
            value,
            expected,
        }
    }

    /// Returns the name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidField { field, .. } => field,
        }
    }
}
