//! Command model for the Maxxfan remote-control protocol.
//!
//! A [`Command`] is the validated, immutable payload of one remote-control
//! transmission: fan power, speed and direction, cover position, the
//! automatic-climate mode with its target temperature, and two auxiliary
//! flags. Every codec in `maxxfan-protocol` consumes and produces this type.
//!
//! # Example
//!
//! ```rust
//! use maxxfan_core::Command;
//!
//! let command = Command::builder().fan_on(true).fan_speed(30).build().unwrap();
//! assert_eq!(command.fan_speed(), 30);
//! assert_eq!(command.auto_temperature(), 78);
//! ```

pub mod command;
pub mod error;
pub mod template;
pub mod tracing;

pub use command::{
    AUTO_TEMPERATURE_MAX, AUTO_TEMPERATURE_MIN, Command, CommandBuilder, DEFAULT_AUTO_TEMPERATURE,
    DEFAULT_FAN_SPEED, FAN_SPEED_MAX, FAN_SPEED_MIN, FAN_SPEED_STEP,
};
pub use error::{CommandError, CommandResult};
pub use template::{CommandTemplate, Templatable};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
