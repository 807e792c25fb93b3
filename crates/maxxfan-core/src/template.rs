//! Deferred command field values.
//!
//! Automation layers may supply each command field either as a literal or as
//! a closure computed per invocation (for example from a sensor reading). A
//! [`CommandTemplate`] holds one [`Templatable`] per field and resolves all of
//! them, exactly once each, right before a command is encoded.

use std::fmt;
use std::sync::Arc;

use crate::command::{Command, DEFAULT_AUTO_TEMPERATURE, DEFAULT_FAN_SPEED};
use crate::error::CommandResult;

/// A value that is either fixed or computed at resolution time.
pub enum Templatable<T> {
    /// A fixed value.
    Literal(T),
    /// A value computed each time it is resolved.
    Computed(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T: Clone> Templatable<T> {
    /// Wraps a closure as a computed value.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Resolves the value. Computed values call their closure once.
    pub fn value(&self) -> T {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Computed(f) => f(),
        }
    }

    /// Returns true if the value is fixed.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl<T> From<T> for Templatable<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

impl<T: Clone> Clone for Templatable<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(value) => Self::Literal(value.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Templatable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A command whose fields may be computed at send time.
#[derive(Debug, Clone)]
pub struct CommandTemplate {
    pub fan_on: Templatable<bool>,
    pub fan_speed: Templatable<u8>,
    pub fan_exhaust: Templatable<bool>,
    pub cover_open: Templatable<bool>,
    pub auto_mode: Templatable<bool>,
    pub auto_temperature: Templatable<u8>,
    pub special: Templatable<bool>,
    pub warn: Templatable<bool>,
}

impl Default for CommandTemplate {
    fn default() -> Self {
        Self {
            fan_on: false.into(),
            fan_speed: DEFAULT_FAN_SPEED.into(),
            fan_exhaust: false.into(),
            cover_open: false.into(),
            auto_mode: false.into(),
            auto_temperature: DEFAULT_AUTO_TEMPERATURE.into(),
            special: false.into(),
            warn: false.into(),
        }
    }
}

impl From<Command> for CommandTemplate {
    fn from(command: Command) -> Self {
        Self {
            fan_on: command.fan_on().into(),
            fan_speed: command.fan_speed().into(),
            fan_exhaust: command.fan_exhaust().into(),
            cover_open: command.cover_open().into(),
            auto_mode: command.auto_mode().into(),
            auto_temperature: command.auto_temperature().into(),
            special: command.special().into(),
            warn: command.warn().into(),
        }
    }
}

impl CommandTemplate {
    /// Evaluates every field once and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidField`](crate::CommandError::InvalidField)
    /// if a computed value falls outside its range.
    pub fn resolve(&self) -> CommandResult<Command> {
        Command::builder()
            .fan_on(self.fan_on.value())
            .fan_speed(self.fan_speed.value())
            .fan_exhaust(self.fan_exhaust.value())
            .cover_open(self.cover_open.value())
            .auto_mode(self.auto_mode.value())
            .auto_temperature(self.auto_temperature.value())
            .special(self.special.value())
            .warn(self.warn.value())
            .build()
    }
}
