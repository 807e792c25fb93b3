//! The validated remote command.
//!
//! [`Command`] is a closed value: every instance satisfies the range and
//! step invariants of its numeric fields, so codecs never re-check them
//! before packing. The only ways to obtain one are [`CommandBuilder::build`],
//! [`Command::default`] and deserialisation, all of which validate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CommandError, CommandResult};

/// Lowest accepted fan speed (percent).
pub const FAN_SPEED_MIN: u8 = 10;
/// Highest accepted fan speed (percent).
pub const FAN_SPEED_MAX: u8 = 100;
/// Fan speed granularity (percent).
pub const FAN_SPEED_STEP: u8 = 10;
/// Lowest accepted automatic-mode temperature (°F).
pub const AUTO_TEMPERATURE_MIN: u8 = 29;
/// Highest accepted automatic-mode temperature (°F).
pub const AUTO_TEMPERATURE_MAX: u8 = 99;

/// Fan speed used when none is supplied.
pub const DEFAULT_FAN_SPEED: u8 = 10;
/// Automatic-mode temperature used when none is supplied.
pub const DEFAULT_AUTO_TEMPERATURE: u8 = 78;

/// A single Maxxfan remote command.
///
/// `auto_temperature` is carried even when `auto_mode` is off and
/// `fan_speed` even when the fan is off; both survive an encode/decode
/// round trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CommandBuilder")]
pub struct Command {
    fan_on: bool,
    fan_speed: u8,
    fan_exhaust: bool,
    cover_open: bool,
    auto_mode: bool,
    auto_temperature: u8,
    special: bool,
    warn: bool,
}

impl Command {
    /// Returns a builder pre-filled with the protocol defaults.
    pub fn builder() -> CommandBuilder {
        CommandBuilder::default()
    }

    /// Whether the fan is running.
    pub fn fan_on(&self) -> bool {
        self.fan_on
    }

    /// Fan speed in percent, a multiple of 10 in `10..=100`.
    pub fn fan_speed(&self) -> u8 {
        self.fan_speed
    }

    /// `true` for exhaust, `false` for intake.
    pub fn fan_exhaust(&self) -> bool {
        self.fan_exhaust
    }

    /// Whether the cover is open.
    pub fn cover_open(&self) -> bool {
        self.cover_open
    }

    /// Whether the fan regulates itself against `auto_temperature`.
    pub fn auto_mode(&self) -> bool {
        self.auto_mode
    }

    /// Target temperature in °F, in `29..=99`.
    pub fn auto_temperature(&self) -> u8 {
        self.auto_temperature
    }

    /// Auxiliary flag (cover override on the physical remote).
    pub fn special(&self) -> bool {
        self.special
    }

    /// Auxiliary flag set by the remote when a value hits its range limit.
    pub fn warn(&self) -> bool {
        self.warn
    }

    /// Returns a builder initialised from this command.
    pub fn to_builder(&self) -> CommandBuilder {
        CommandBuilder {
            fan_on: self.fan_on,
            fan_speed: self.fan_speed,
            fan_exhaust: self.fan_exhaust,
            cover_open: self.cover_open,
            auto_mode: self.auto_mode,
            auto_temperature: self.auto_temperature,
            special: self.special,
            warn: self.warn,
        }
    }
}

impl Default for Command {
    fn default() -> Self {
        Self {
            fan_on: false,
            fan_speed: DEFAULT_FAN_SPEED,
            fan_exhaust: false,
            cover_open: false,
            auto_mode: false,
            auto_temperature: DEFAULT_AUTO_TEMPERATURE,
            special: false,
            warn: false,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fan_on={}, fan_speed={}, fan_exhaust={}, cover_open={}, auto_mode={}, \
             auto_temperature={}, special={}, warn={}",
            self.fan_on,
            self.fan_speed,
            self.fan_exhaust,
            self.cover_open,
            self.auto_mode,
            self.auto_temperature,
            self.special,
            self.warn
        )
    }
}

/// Builder for [`Command`].
///
/// Unset fields keep the protocol defaults. The builder also doubles as the
/// serde representation of a command, so configuration tables may omit any
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandBuilder {
    fan_on: bool,
    fan_speed: u8,
    fan_exhaust: bool,
    cover_open: bool,
    auto_mode: bool,
    auto_temperature: u8,
    special: bool,
    warn: bool,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Command::default().to_builder()
    }
}

impl CommandBuilder {
    /// Sets the fan power state.
    #[must_use]
    pub fn fan_on(mut self, on: bool) -> Self {
        self.fan_on = on;
        self
    }

    /// Sets the fan speed in percent.
    #[must_use]
    pub fn fan_speed(mut self, speed: u8) -> Self {
        self.fan_speed = speed;
        self
    }

    /// Sets the fan direction (`true` = exhaust).
    #[must_use]
    pub fn fan_exhaust(mut self, exhaust: bool) -> Self {
        self.fan_exhaust = exhaust;
        self
    }

    /// Sets the cover position.
    #[must_use]
    pub fn cover_open(mut self, open: bool) -> Self {
        self.cover_open = open;
        self
    }

    /// Enables or disables automatic mode.
    #[must_use]
    pub fn auto_mode(mut self, auto: bool) -> Self {
        self.auto_mode = auto;
        self
    }

    /// Sets the automatic-mode temperature in °F.
    #[must_use]
    pub fn auto_temperature(mut self, temperature: u8) -> Self {
        self.auto_temperature = temperature;
        self
    }

    /// Sets the special flag.
    #[must_use]
    pub fn special(mut self, special: bool) -> Self {
        self.special = special;
        self
    }

    /// Sets the warn flag.
    #[must_use]
    pub fn warn(mut self, warn: bool) -> Self {
        self.warn = warn;
        self
    }

    /// Validates the fields and produces a [`Command`].
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidField`] when `fan_speed` is not a
    /// multiple of 10 in `10..=100` or `auto_temperature` is outside
    /// `29..=99`.
    pub fn build(self) -> CommandResult<Command> {
        if !(FAN_SPEED_MIN..=FAN_SPEED_MAX).contains(&self.fan_speed)
            || self.fan_speed % FAN_SPEED_STEP != 0
        {
            return Err(CommandError::invalid_field(
                "fan_speed",
                self.fan_speed,
                "a multiple of 10 in 10..=100",
            ));
        }

        if !(AUTO_TEMPERATURE_MIN..=AUTO_TEMPERATURE_MAX).contains(&self.auto_temperature) {
            return Err(CommandError::invalid_field(
                "auto_temperature",
                self.auto_temperature,
                "a value in 29..=99",
            ));
        }

        Ok(Command {
            fan_on: self.fan_on,
            fan_speed: self.fan_speed,
            fan_exhaust: self.fan_exhaust,
            cover_open: self.cover_open,
            auto_mode: self.auto_mode,
            auto_temperature: self.auto_temperature,
            special: self.special,
            warn: self.warn,
        })
    }
}

impl TryFrom<CommandBuilder> for Command {
    type Error = CommandError;

    fn try_from(builder: CommandBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let command = Command::default();
        assert!(!command.fan_on());
        assert_eq!(command.fan_speed(), 10);
        assert!(!command.fan_exhaust());
        assert!(!command.cover_open());
        assert!(!command.auto_mode());
        assert_eq!(command.auto_temperature(), 78);
        assert!(!command.special());
        assert!(!command.warn());
        assert_eq!(Command::builder().build().unwrap(), command);
    }

    #[test]
    fn builder_sets_every_field() {
        let command = Command::builder()
            .fan_on(true)
            .fan_speed(100)
            .fan_exhaust(true)
            .cover_open(true)
            .auto_mode(true)
            .auto_temperature(29)
            .special(true)
            .warn(true)
            .build()
            .unwrap();

        assert!(command.fan_on());
        assert_eq!(command.fan_speed(), 100);
        assert!(command.fan_exhaust());
        assert!(command.cover_open());
        assert!(command.auto_mode());
        assert_eq!(command.auto_temperature(), 29);
        assert!(command.special());
        assert!(command.warn());
        assert_eq!(command.to_builder().build().unwrap(), command);
    }

    #[test]
    fn accepts_every_speed_step() {
        for speed in (10..=100).step_by(10) {
            let command = Command::builder().fan_speed(speed).build().unwrap();
            assert_eq!(command.fan_speed(), speed);
        }
    }

    #[test]
    fn rejects_bad_speed() {
        for speed in [0, 5, 35, 99, 110, 255] {
            let err = Command::builder().fan_speed(speed).build().unwrap_err();
            assert!(matches!(
                err,
                CommandError::InvalidField { field: "fan_speed", value, .. } if value == speed
            ));
        }
    }

    #[test]
    fn temperature_bounds() {
        assert!(Command::builder().auto_temperature(29).build().is_ok());
        assert!(Command::builder().auto_temperature(99).build().is_ok());

        for temperature in [0, 28, 100, 200] {
            let err = Command::builder()
                .auto_temperature(temperature)
                .build()
                .unwrap_err();
            assert_eq!(err.field(), "auto_temperature");
        }
    }

    #[test]
    fn display_dump() {
        let command = Command::builder().fan_on(true).fan_speed(30).build().unwrap();
        insta::assert_snapshot!(
            command.to_string(),
            @"fan_on=true, fan_speed=30, fan_exhaust=false, cover_open=false, auto_mode=false, auto_temperature=78, special=false, warn=false"
        );
    }

    #[test]
    fn deserialize_fills_defaults() {
        let command: Command = serde_json::from_str(r#"{"fan_on": true, "fan_speed": 60}"#).unwrap();
        assert!(command.fan_on());
        assert_eq!(command.fan_speed(), 60);
        assert_eq!(command.auto_temperature(), 78);
    }

    #[test]
    fn deserialize_validates() {
        let result: Result<Command, _> = serde_json::from_str(r#"{"auto_temperature": 120}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("auto_temperature"));

        let result: Result<Command, _> = serde_json::from_str(r#"{"fan_sped": 20}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serialize_roundtrip() {
        let command = Command::builder()
            .auto_mode(true)
            .auto_temperature(64)
            .build()
            .unwrap();
        let json = serde_json::to_string(&command).unwrap();
        let decoded: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, command);
    }
}
