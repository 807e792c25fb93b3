//! Registered protocol variants.

use std::fmt;
use std::str::FromStr;

use maxxfan_core::Command;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{DecodeResult, ParseProtocolError};
use crate::pulse::{Pulse, PulseTrain};
use crate::{codec, serial};

/// A protocol variant with its encode/decode pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolKind {
    /// Pulse-distance frame with an additive checksum.
    #[default]
    Maxxfan,
    /// Asynchronous-serial frame of the stock IR remote.
    MaxxfanSerial,
}

impl ProtocolKind {
    /// Every registered variant, in the order `decode_any` tries them.
    pub const ALL: [ProtocolKind; 2] = [ProtocolKind::Maxxfan, ProtocolKind::MaxxfanSerial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maxxfan => "maxxfan",
            Self::MaxxfanSerial => "maxxfan-serial",
        }
    }

    /// Encodes `command` as one frame of this protocol.
    pub fn encode(&self, command: &Command) -> PulseTrain {
        match self {
            Self::Maxxfan => codec::encode(command),
            Self::MaxxfanSerial => serial::encode(command),
        }
    }

    /// Decodes one frame of this protocol.
    pub fn decode(&self, pulses: &[Pulse]) -> DecodeResult<Command> {
        match self {
            Self::Maxxfan => codec::decode(pulses),
            Self::MaxxfanSerial => serial::decode(pulses),
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolKind {
    type Err = ParseProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseProtocolError(s.to_string()))
    }
}

/// Tries every registered protocol in order and returns the first match.
///
/// # Errors
///
/// Returns the rejection of the first protocol when none matches.
pub fn decode_any(pulses: &[Pulse]) -> DecodeResult<(ProtocolKind, Command)> {
    let [first, rest @ ..] = ProtocolKind::ALL;
    let first_error = match first.decode(pulses) {
        Ok(command) => return Ok((first, command)),
        Err(err) => err,
    };
    trace!(protocol = %first, error = %first_error, "Protocol rejected capture");

    for kind in rest {
        match kind.decode(pulses) {
            Ok(command) => return Ok((kind, command)),
            Err(err) => trace!(protocol = %kind, error = %err, "Protocol rejected capture"),
        }
    }
    Err(first_error)
}

/// Which protocols a receiver accepts.
///
/// Serialises as `"any"` or a protocol identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProtocolFilter {
    /// Every registered protocol, tried in order.
    Any,
    /// A single protocol.
    Only(ProtocolKind),
}

impl ProtocolFilter {
    /// Decodes `pulses` with the accepted protocols.
    pub fn decode(&self, pulses: &[Pulse]) -> DecodeResult<(ProtocolKind, Command)> {
        match self {
            Self::Any => decode_any(pulses),
            Self::Only(kind) => kind.decode(pulses).map(|command| (*kind, command)),
        }
    }

    /// The protocol used for transmitting; `Any` sends the default one.
    pub fn sending_protocol(&self) -> ProtocolKind {
        match self {
            Self::Any => ProtocolKind::default(),
            Self::Only(kind) => *kind,
        }
    }
}

impl Default for ProtocolFilter {
    fn default() -> Self {
        Self::Only(ProtocolKind::default())
    }
}

impl From<ProtocolKind> for ProtocolFilter {
    fn from(kind: ProtocolKind) -> Self {
        Self::Only(kind)
    }
}

impl fmt::Display for ProtocolFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Only(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

impl FromStr for ProtocolFilter {
    type Err = ParseProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("any") {
            return Ok(Self::Any);
        }
        s.parse().map(Self::Only)
    }
}

impl TryFrom<String> for ProtocolFilter {
    type Error = ParseProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProtocolFilter> for String {
    fn from(filter: ProtocolFilter) -> Self {
        filter.to_string()
    }
}
