//! Mark/space pulse trains.
//!
//! Transports exchange pulse trains as signed microsecond durations:
//! positive values are marks, negative values are spaces. [`PulseTrain`]
//! converts to and from that form and keeps an explicit [`Level`] per pulse
//! internally.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Signal level of a pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Carrier active.
    Mark,
    /// Carrier idle.
    Space,
}

/// A single timed interval of the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pulse {
    pub level: Level,
    pub duration_us: u32,
}

impl Pulse {
    /// Creates a mark of the given duration.
    pub const fn mark(duration_us: u32) -> Self {
        Self {
            level: Level::Mark,
            duration_us,
        }
    }

    /// Creates a space of the given duration.
    pub const fn space(duration_us: u32) -> Self {
        Self {
            level: Level::Space,
            duration_us,
        }
    }

    /// Converts a signed duration; zero carries no level and yields `None`.
    pub fn from_signed(value: i32) -> Option<Self> {
        match value {
            0 => None,
            v if v > 0 => Some(Self::mark(v.unsigned_abs())),
            v => Some(Self::space(v.unsigned_abs())),
        }
    }

    /// Returns the signed form (marks positive, spaces negative).
    pub fn to_signed(self) -> i32 {
        let magnitude = i32::try_from(self.duration_us).unwrap_or(i32::MAX);
        match self.level {
            Level::Mark => magnitude,
            Level::Space => -magnitude,
        }
    }

    pub fn is_mark(&self) -> bool {
        self.level == Level::Mark
    }
}

/// An ordered, finite sequence of pulses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<i32>", from = "Vec<i32>")]
pub struct PulseTrain {
    pulses: Vec<Pulse>,
}

impl PulseTrain {
    /// Creates an empty train.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty train with room for `capacity` pulses.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pulses: Vec::with_capacity(capacity),
        }
    }

    /// Appends a mark.
    pub fn mark(&mut self, duration_us: u32) {
        self.pulses.push(Pulse::mark(duration_us));
    }

    /// Appends a space.
    pub fn space(&mut self, duration_us: u32) {
        self.pulses.push(Pulse::space(duration_us));
    }

    /// Appends a pulse, extending the last one if it has the same level.
    pub fn push_merged(&mut self, pulse: Pulse) {
        match self.pulses.last_mut() {
            Some(last) if last.level == pulse.level => {
                last.duration_us = last.duration_us.saturating_add(pulse.duration_us);
            }
            _ => self.pulses.push(pulse),
        }
    }

    /// Builds a train from signed durations, merging same-level neighbours
    /// and skipping zero entries.
    pub fn from_signed(values: &[i32]) -> Self {
        let mut train = Self::with_capacity(values.len());
        for pulse in values.iter().copied().filter_map(Pulse::from_signed) {
            train.push_merged(pulse);
        }
        train
    }

    /// Returns the signed-duration form.
    pub fn to_signed(&self) -> Vec<i32> {
        self.pulses.iter().map(|p| p.to_signed()).collect()
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Sum of all pulse durations.
    pub fn total_duration_us(&self) -> u64 {
        self.pulses.iter().map(|p| u64::from(p.duration_us)).sum()
    }

    /// Drops pulses past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.pulses.truncate(len);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pulse> {
        self.pulses.iter()
    }
}

impl AsRef<[Pulse]> for PulseTrain {
    fn as_ref(&self) -> &[Pulse] {
        &self.pulses
    }
}

impl From<Vec<Pulse>> for PulseTrain {
    fn from(pulses: Vec<Pulse>) -> Self {
        Self { pulses }
    }
}

impl From<Vec<i32>> for PulseTrain {
    fn from(values: Vec<i32>) -> Self {
        Self::from_signed(&values)
    }
}

impl From<PulseTrain> for Vec<i32> {
    fn from(train: PulseTrain) -> Self {
        train.to_signed()
    }
}

impl<'a> IntoIterator for &'a PulseTrain {
    type Item = &'a Pulse;
    type IntoIter = std::slice::Iter<'a, Pulse>;

    fn into_iter(self) -> Self::IntoIter {
        self.pulses.iter()
    }
}

impl fmt::Display for PulseTrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, pulse) in self.pulses.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", pulse.to_signed())?;
        }
        f.write_str("]")
    }
}

/// Errors from parsing a textual pulse list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePulseError {
    /// A token is not a signed integer.
    #[error("invalid duration {token:?} at position {position}")]
    InvalidDuration { token: String, position: usize },

    /// The list holds no durations.
    #[error("pulse list is empty")]
    Empty,
}

impl FromStr for PulseTrain {
    type Err = ParsePulseError;

    /// Parses durations separated by commas and/or whitespace, optionally
    /// wrapped in square brackets, e.g. `[3200, -1600, 400]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim();
        let body = body.strip_prefix('[').unwrap_or(body);
        let body = body.strip_suffix(']').unwrap_or(body);

        let mut values = Vec::new();
        for (position, token) in body
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .enumerate()
        {
            let value = token
                .parse::<i32>()
                .map_err(|_| ParsePulseError::InvalidDuration {
                    token: token.to_string(),
                    position,
                })?;
            values.push(value);
        }

        if values.is_empty() {
            return Err(ParsePulseError::Empty);
        }
        Ok(Self::from_signed(&values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_conversion() {
        assert_eq!(Pulse::from_signed(400), Some(Pulse::mark(400)));
        assert_eq!(Pulse::from_signed(-1200), Some(Pulse::space(1200)));
        assert_eq!(Pulse::from_signed(0), None);
        assert_eq!(Pulse::space(800).to_signed(), -800);
        assert_eq!(Pulse::mark(u32::MAX).to_signed(), i32::MAX);
    }

    #[test]
    fn from_signed_merges_neighbours() {
        let train = PulseTrain::from_signed(&[400, 100, -300, 0, -500, 200]);
        assert_eq!(
            train.pulses(),
            &[Pulse::mark(500), Pulse::space(800), Pulse::mark(200)]
        );
        assert_eq!(train.total_duration_us(), 1500);
    }

    #[test]
    fn push_merged_extends_same_level() {
        let mut train = PulseTrain::new();
        train.push_merged(Pulse::mark(800));
        train.push_merged(Pulse::mark(800));
        train.push_merged(Pulse::space(800));
        assert_eq!(train.to_signed(), vec![1600, -800]);
    }

    #[test]
    fn display_is_signed_list() {
        let mut train = PulseTrain::new();
        train.mark(3200);
        train.space(1600);
        train.mark(400);
        assert_eq!(train.to_string(), "[3200, -1600, 400]");
    }

    #[test]
    fn parse_accepts_common_layouts() {
        let expected = vec![3200, -1600, 400];
        for text in [
            "[3200, -1600, 400]",
            "3200 -1600 400",
            "3200,-1600,\n400\n",
            "  [3200,-1600,400]  ",
        ] {
            let train: PulseTrain = text.parse().unwrap();
            assert_eq!(train.to_signed(), expected, "input {:?}", text);
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "400, -x, 400".parse::<PulseTrain>().unwrap_err();
        assert_eq!(
            err,
            ParsePulseError::InvalidDuration {
                token: "-x".to_string(),
                position: 1
            }
        );
        assert_eq!("[ ]".parse::<PulseTrain>(), Err(ParsePulseError::Empty));
    }

    #[test]
    fn serde_uses_signed_form() {
        let train = PulseTrain::from_signed(&[400, -400]);
        assert_eq!(serde_json::to_string(&train).unwrap(), "[400,-400]");
        let decoded: PulseTrain = serde_json::from_str("[400,-400]").unwrap();
        assert_eq!(decoded, train);
    }
}
