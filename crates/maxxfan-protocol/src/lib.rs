//! Pulse-train codecs for the Maxxfan remote-control protocol.
//!
//! A remote command travels over the air as a train of marks (carrier on)
//! and spaces (carrier off). This crate translates a validated
//! [`Command`](maxxfan_core::Command) into such a train and back.
//!
//! # Protocols
//!
//! - [`ProtocolKind::Maxxfan`]: pulse-distance frame. A leader pair, 32 data
//!   bits (three payload bytes and an additive checksum, each byte LSB
//!   first), then a terminating mark. Every bit is a fixed mark followed by
//!   a short (0) or long (1) space.
//! - [`ProtocolKind::MaxxfanSerial`]: the asynchronous-serial frame emitted
//!   by the stock Maxxfan IR remote, 16 bytes at 800 µs per bit.
//!
//! # Example
//!
//! ```rust
//! use maxxfan_core::Command;
//! use maxxfan_protocol::ProtocolKind;
//!
//! let command = Command::builder().fan_on(true).fan_speed(30).build().unwrap();
//! let train = ProtocolKind::Maxxfan.encode(&command);
//! let decoded = ProtocolKind::Maxxfan.decode(train.pulses()).unwrap();
//! assert_eq!(decoded, command);
//! ```

mod codec;
mod error;
mod frame;
mod pulse;
mod registry;
mod serial;
pub mod timing;

pub use codec::{
    BIT_MARK_US, FRAME_PULSES, LEADER_MARK_US, LEADER_SPACE_US, ONE_SPACE_US, TRAILER_MARK_US,
    ZERO_SPACE_US, decode, encode,
};
pub use error::{DecodeError, DecodeResult, ParseProtocolError};
pub use frame::{FRAME_BITS, FRAME_LAYOUT, Field, FieldSpec};
pub use pulse::{Level, ParsePulseError, Pulse, PulseTrain};
pub use registry::{ProtocolFilter, ProtocolKind, decode_any};
pub use serial::{SERIAL_BIT_US, SERIAL_PACKET_LEN, SERIAL_PREAMBLE};
