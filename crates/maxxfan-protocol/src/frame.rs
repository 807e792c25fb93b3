//! Bit layout of the pulse-distance frame.
//!
//! ```text
//!  byte 0: state flags     | b0 fan_on | b1 special | b2 fan_exhaust | b3 cover_open
//!                          | b4 auto_mode | b5 warn | b6-7 reserved
//!  byte 1: fan speed       | b0-3 speed/10 - 1 | b4-7 reserved
//!  byte 2: auto temperature| b0-6 temperature - 29 | b7 reserved
//!  byte 3: checksum        | !(byte0 + byte1 + byte2)
//! ```
//!
//! Bytes go out in order, each least-significant bit first, so bit `n` of
//! the little-endian frame word is the `n`-th bit on the wire. Both packing
//! and unpacking walk [`FRAME_LAYOUT`]; nothing else knows the offsets.

use std::fmt;

use maxxfan_core::{AUTO_TEMPERATURE_MIN, Command, CommandBuilder, FAN_SPEED_STEP};
use tracing::debug;

use crate::error::{DecodeError, DecodeResult};

/// Payload bytes covered by the checksum.
pub(crate) const PAYLOAD_BYTES: usize = 3;
/// Total frame size in bytes.
pub(crate) const FRAME_BYTES: usize = PAYLOAD_BYTES + 1;
/// Total frame size in bits.
pub const FRAME_BITS: usize = FRAME_BYTES * 8;

/// A command field carried in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FanOn,
    Special,
    FanExhaust,
    CoverOpen,
    AutoMode,
    Warn,
    FanSpeed,
    AutoTemperature,
}

/// Placement of one field inside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    /// Bit offset from the start of the frame.
    pub offset: u8,
    /// Width in bits.
    pub width: u8,
}

const fn spec(field: Field, offset: u8, width: u8) -> FieldSpec {
    FieldSpec {
        field,
        offset,
        width,
    }
}

/// The payload layout. Offsets and widths are fixed by the receiver.
pub const FRAME_LAYOUT: [FieldSpec; 8] = [
    spec(Field::FanOn, 0, 1),
    spec(Field::Special, 1, 1),
    spec(Field::FanExhaust, 2, 1),
    spec(Field::CoverOpen, 3, 1),
    spec(Field::AutoMode, 4, 1),
    spec(Field::Warn, 5, 1),
    spec(Field::FanSpeed, 8, 4),
    spec(Field::AutoTemperature, 16, 7),
];

impl FieldSpec {
    fn mask(&self) -> u32 {
        ((1u32 << self.width) - 1) << self.offset
    }

    fn read(&self, word: u32) -> u8 {
        // Widths never exceed 7 bits.
        ((word & self.mask()) >> self.offset) as u8
    }

    fn write(&self, word: &mut u32, raw: u8) {
        debug_assert!(u32::from(raw) < (1u32 << self.width), "{:?} overflows", self.field);
        *word |= (u32::from(raw) << self.offset) & self.mask();
    }
}

impl Field {
    /// Packed representation of this field of `command`.
    fn pack(self, command: &Command) -> u8 {
        match self {
            Self::FanOn => u8::from(command.fan_on()),
            Self::Special => u8::from(command.special()),
            Self::FanExhaust => u8::from(command.fan_exhaust()),
            Self::CoverOpen => u8::from(command.cover_open()),
            Self::AutoMode => u8::from(command.auto_mode()),
            Self::Warn => u8::from(command.warn()),
            Self::FanSpeed => command.fan_speed() / FAN_SPEED_STEP - 1,
            Self::AutoTemperature => command.auto_temperature() - AUTO_TEMPERATURE_MIN,
        }
    }

    /// Applies a packed value to `builder`. Range checks happen in `build`.
    fn unpack(self, builder: CommandBuilder, raw: u8) -> CommandBuilder {
        match self {
            Self::FanOn => builder.fan_on(raw != 0),
            Self::Special => builder.special(raw != 0),
            Self::FanExhaust => builder.fan_exhaust(raw != 0),
            Self::CoverOpen => builder.cover_open(raw != 0),
            Self::AutoMode => builder.auto_mode(raw != 0),
            Self::Warn => builder.warn(raw != 0),
            Self::FanSpeed => builder.fan_speed((raw + 1) * FAN_SPEED_STEP),
            Self::AutoTemperature => builder.auto_temperature(raw + AUTO_TEMPERATURE_MIN),
        }
    }

    fn is_flag(self) -> bool {
        !matches!(self, Self::FanSpeed | Self::AutoTemperature)
    }
}

/// Additive checksum: complement of the byte sum modulo 256.
pub(crate) fn checksum(payload: &[u8]) -> u8 {
    !payload.iter().fold(0u8, |sum, byte| sum.wrapping_add(*byte))
}

/// Bits of the payload not claimed by any field.
fn reserved_mask() -> u32 {
    let used = FRAME_LAYOUT.iter().fold(0u32, |mask, spec| mask | spec.mask());
    !used & ((1u32 << (PAYLOAD_BYTES * 8)) - 1)
}

/// The state flags byte, shared with the serial protocol's state field.
pub(crate) fn state_byte(command: &Command) -> u8 {
    let mut word = 0u32;
    for spec in FRAME_LAYOUT.iter().filter(|s| s.field.is_flag()) {
        spec.write(&mut word, spec.field.pack(command));
    }
    word as u8
}

/// Applies a state flags byte to `builder`.
pub(crate) fn apply_state_byte(builder: CommandBuilder, state: u8) -> CommandBuilder {
    FRAME_LAYOUT
        .iter()
        .filter(|s| s.field.is_flag())
        .fold(builder, |builder, spec| {
            spec.field.unpack(builder, spec.read(u32::from(state)))
        })
}

/// A packed frame: three payload bytes and the checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    bytes: [u8; FRAME_BYTES],
}

impl Frame {
    /// Packs `command` and appends its checksum.
    pub(crate) fn pack(command: &Command) -> Self {
        let mut word = 0u32;
        for spec in &FRAME_LAYOUT {
            spec.write(&mut word, spec.field.pack(command));
        }

        let mut bytes = word.to_le_bytes();
        bytes[PAYLOAD_BYTES] = checksum(&bytes[..PAYLOAD_BYTES]);
        Self { bytes }
    }

    /// Reassembles a frame from bits in wire order.
    pub(crate) fn from_bits(bits: &[bool; FRAME_BITS]) -> Self {
        let word = bits
            .iter()
            .enumerate()
            .fold(0u32, |word, (i, bit)| word | (u32::from(*bit) << i));
        Self {
            bytes: word.to_le_bytes(),
        }
    }

    /// Bit `index` in wire order.
    pub(crate) fn bit(&self, index: usize) -> bool {
        (self.bytes[index / 8] >> (index % 8)) & 1 == 1
    }

    #[cfg(test)]
    pub(crate) fn bytes(&self) -> [u8; FRAME_BYTES] {
        self.bytes
    }

    fn word(&self) -> u32 {
        u32::from_le_bytes(self.bytes)
    }

    /// Checks the transmitted checksum against the payload.
    pub(crate) fn verify(&self) -> DecodeResult<()> {
        let expected = checksum(&self.bytes[..PAYLOAD_BYTES]);
        let actual = self.bytes[PAYLOAD_BYTES];
        if expected != actual {
            return Err(DecodeError::ChecksumFailed { expected, actual });
        }
        Ok(())
    }

    /// Unpacks the payload into a validated command.
    pub(crate) fn unpack(&self) -> DecodeResult<Command> {
        let word = self.word();

        let reserved = word & reserved_mask();
        if reserved != 0 {
            debug!(reserved, "Frame has reserved bits set");
        }

        let builder = FRAME_LAYOUT
            .iter()
            .fold(Command::builder(), |builder, spec| {
                spec.field.unpack(builder, spec.read(word))
            });
        Ok(builder.build()?)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
