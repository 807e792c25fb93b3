//! Asynchronous-serial frame of the stock Maxxfan IR remote.
//!
//! The remote clocks bytes out like a UART at 800 µs per bit: one start bit
//! (0), eight data bits least-significant first, two stop bits (1). A mark
//! is a 0 bit and a space is a 1 bit, so runs of equal bits merge into one
//! long pulse on the wire.
//!
//! ```text
//!  5a a5 80 7f 40 bf 20 df 10 cc   preamble
//!  ss                              state flags (same bits as the pulse-distance frame)
//!  pp                              fan speed, percent
//!  tt                              auto temperature, °F
//!  ff 23                           constant, purpose unknown
//!  cc                              XOR of the previous five bytes
//! ```
//!
//! Bits are recovered from run lengths: a run yields a bit while more than
//! two thirds of a period remains, a leftover between one and two thirds of
//! a period is malformed, and anything shorter is jitter.

use maxxfan_core::Command;
use tracing::{debug, trace};

use crate::error::{DecodeError, DecodeResult};
use crate::frame::{apply_state_byte, state_byte};
use crate::pulse::{Level, Pulse, PulseTrain};

/// Duration of one bit period.
pub const SERIAL_BIT_US: u32 = 800;
/// Bytes per packet.
pub const SERIAL_PACKET_LEN: usize = 16;
/// Fixed leading bytes of every packet.
pub const SERIAL_PREAMBLE: [u8; 10] = [0x5a, 0xa5, 0x80, 0x7f, 0x40, 0xbf, 0x20, 0xdf, 0x10, 0xcc];

const STATE_INDEX: usize = 10;
const SPEED_INDEX: usize = 11;
const TEMPERATURE_INDEX: usize = 12;
const CONSTANT_A_INDEX: usize = 13;
const CONSTANT_B_INDEX: usize = 14;
const CHECKSUM_INDEX: usize = 15;

const CONSTANT_A: u8 = 0xff;
const CONSTANT_B: u8 = 0x23;
const STATE_UNUSED_BITS: u8 = 0xc0;

/// Start bit, eight data bits, two stop bits.
const BITS_PER_BYTE: usize = 11;
/// Idle periods appended after the last stop bits when encoding.
const IDLE_BITS: usize = 8;
/// Bits a decoder must recover: every framed byte plus one idle bit.
const PACKET_BITS: usize = SERIAL_PACKET_LEN * BITS_PER_BYTE + 1;

fn xor_checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

fn packet_for(command: &Command) -> [u8; SERIAL_PACKET_LEN] {
    let mut packet = [0u8; SERIAL_PACKET_LEN];
    packet[..SERIAL_PREAMBLE.len()].copy_from_slice(&SERIAL_PREAMBLE);
    packet[STATE_INDEX] = state_byte(command);
    packet[SPEED_INDEX] = command.fan_speed();
    packet[TEMPERATURE_INDEX] = command.auto_temperature();
    packet[CONSTANT_A_INDEX] = CONSTANT_A;
    packet[CONSTANT_B_INDEX] = CONSTANT_B;
    packet[CHECKSUM_INDEX] = xor_checksum(&packet[STATE_INDEX..CHECKSUM_INDEX]);
    packet
}

/// Encodes `command` in the serial format.
pub fn encode(command: &Command) -> PulseTrain {
    let packet = packet_for(command);
    let mut train = PulseTrain::new();
    let mut emit = |one: bool| {
        train.push_merged(if one {
            Pulse::space(SERIAL_BIT_US)
        } else {
            Pulse::mark(SERIAL_BIT_US)
        });
    };

    for byte in packet {
        emit(false);
        for k in 0..8 {
            emit((byte >> k) & 1 == 1);
        }
        emit(true);
        emit(true);
    }
    for _ in 0..IDLE_BITS {
        emit(true);
    }

    train
}

/// Decodes a serial packet from `pulses`.
///
/// # Errors
///
/// - [`DecodeError::NoMatch`] on a malformed bit, a missing start/stop bit,
///   or a preamble mismatch
/// - [`DecodeError::Truncated`] if the capture runs out of bits
/// - [`DecodeError::ChecksumFailed`] if the XOR checksum disagrees
/// - [`DecodeError::InvalidField`] if speed or temperature is not a valid
///   command value
pub fn decode(pulses: &[Pulse]) -> DecodeResult<Command> {
    let mut reader = BitReader::new(pulses);
    let mut packet = [0u8; SERIAL_PACKET_LEN];

    for slot in packet.iter_mut() {
        if reader.next_bit()? {
            return Err(DecodeError::no_match(reader.index, "missing start bit"));
        }
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte >> 1) | if reader.next_bit()? { 0x80 } else { 0x00 };
        }
        if !reader.next_bit()? || !reader.next_bit()? {
            return Err(DecodeError::no_match(reader.index, "missing stop bits"));
        }
        *slot = byte;
    }
    if !reader.next_bit()? {
        return Err(DecodeError::no_match(reader.index, "missing end of transmission"));
    }

    trace!(packet = ?packet, "Serial packet framed");

    if packet[..SERIAL_PREAMBLE.len()] != SERIAL_PREAMBLE {
        return Err(DecodeError::no_match(0, "preamble mismatch"));
    }

    let expected = xor_checksum(&packet[STATE_INDEX..CHECKSUM_INDEX]);
    let actual = packet[CHECKSUM_INDEX];
    if expected != actual {
        return Err(DecodeError::ChecksumFailed { expected, actual });
    }

    let state = packet[STATE_INDEX];
    if packet[CONSTANT_A_INDEX] != CONSTANT_A
        || packet[CONSTANT_B_INDEX] != CONSTANT_B
        || state & STATE_UNUSED_BITS != 0
    {
        debug!(
            constant_a = packet[CONSTANT_A_INDEX],
            constant_b = packet[CONSTANT_B_INDEX],
            state,
            "Serial packet carries unexpected values"
        );
    }

    let command = apply_state_byte(Command::builder(), state)
        .fan_speed(packet[SPEED_INDEX])
        .auto_temperature(packet[TEMPERATURE_INDEX])
        .build()?;
    Ok(command)
}

/// Recovers bits from run-length encoded pulses.
struct BitReader<'a> {
    pulses: &'a [Pulse],
    index: usize,
    consumed: u32,
    bits: usize,
}

impl<'a> BitReader<'a> {
    fn new(pulses: &'a [Pulse]) -> Self {
        Self {
            pulses,
            index: 0,
            consumed: 0,
            bits: 0,
        }
    }

    /// Returns the next bit (`true` = 1 = space).
    fn next_bit(&mut self) -> DecodeResult<bool> {
        loop {
            let pulse = self.pulses.get(self.index).ok_or(DecodeError::Truncated {
                expected: PACKET_BITS,
                received: self.bits,
            })?;

            let remaining = pulse.duration_us.saturating_sub(self.consumed);
            if remaining > SERIAL_BIT_US * 2 / 3 {
                self.consumed += SERIAL_BIT_US;
                self.bits += 1;
                return Ok(pulse.level == Level::Space);
            }
            if remaining > SERIAL_BIT_US / 3 {
                return Err(DecodeError::no_match(self.index, "malformed bit"));
            }

            self.index += 1;
            self.consumed = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_to_train(bits: &str) -> PulseTrain {
        let mut train = PulseTrain::new();
        for c in bits.chars().filter(|c| !c.is_whitespace()) {
            train.push_merged(if c == '1' {
                Pulse::space(SERIAL_BIT_US)
            } else {
                Pulse::mark(SERIAL_BIT_US)
            });
        }
        train
    }

    /// Bit image of a packet captured from the stock remote.
    const CAPTURED: &str = "
        0 01011010 11  0 10100101 11  0 00000001 11  0 11111110 11
        0 00000010 11  0 11111101 11  0 00000100 11  0 11111011 11
        0 00001000 11  0 00110011 11
        0 00100100 11  0 00100110 11  0 00100010 11  0 11111111 11
        0 11000100 11  0 00011011 11
        11111111";

    #[test]
    fn decodes_captured_packet() {
        let train = bits_to_train(CAPTURED);
        let command = decode(train.pulses()).unwrap();

        assert!(!command.fan_on());
        assert!(command.fan_exhaust());
        assert!(!command.cover_open());
        assert!(command.warn());
        assert_eq!(command.fan_speed(), 100);
        assert_eq!(command.auto_temperature(), 68);
    }

    #[test]
    fn encode_matches_capture() {
        let command = decode(bits_to_train(CAPTURED).pulses()).unwrap();
        assert_eq!(encode(&command), bits_to_train(CAPTURED));
    }

    #[test]
    fn roundtrip() {
        let command = Command::builder()
            .fan_on(true)
            .fan_speed(40)
            .auto_mode(true)
            .auto_temperature(72)
            .special(true)
            .build()
            .unwrap();
        let train = encode(&command);
        assert!(train.pulses()[0].is_mark());
        assert_eq!(decode(train.pulses()).unwrap(), command);
    }

    #[test]
    fn tolerates_run_jitter() {
        let signed: Vec<i32> = encode(&Command::default())
            .to_signed()
            .into_iter()
            .map(|d| if d > 0 { d + 150 } else { d - 150 })
            .collect();
        let train = PulseTrain::from_signed(&signed);
        assert_eq!(decode(train.pulses()).unwrap(), Command::default());
    }

    #[test]
    fn malformed_run_is_no_match() {
        let mut signed = encode(&Command::default()).to_signed();
        // First run is the start bit of 0x5a followed by a 0 data bit: 1600 µs.
        signed[0] = 1200;
        let train = PulseTrain::from_signed(&signed);
        assert_eq!(
            decode(train.pulses()),
            Err(DecodeError::no_match(0, "malformed bit"))
        );
    }

    #[test]
    fn preamble_mismatch_is_no_match() {
        let other = CAPTURED.replacen("01011010", "01011011", 1);
        let train = bits_to_train(&other);
        assert_eq!(
            decode(train.pulses()),
            Err(DecodeError::no_match(0, "preamble mismatch"))
        );
    }

    #[test]
    fn bad_xor_is_checksum_failure() {
        // Flip the fan-on bit in the state byte.
        let other = CAPTURED.replacen("0 00100100 11", "0 10100100 11", 1);
        let train = bits_to_train(&other);
        assert_eq!(
            decode(train.pulses()),
            Err(DecodeError::ChecksumFailed {
                expected: 0xd9,
                actual: 0xd8
            })
        );
    }

    #[test]
    fn missing_idle_is_truncated() {
        let mut train = encode(&Command::default());
        let len = train.len();
        train.truncate(len - 1);
        assert!(matches!(
            decode(train.pulses()),
            Err(DecodeError::Truncated { expected: PACKET_BITS, .. })
        ));
    }

    #[test]
    fn zero_speed_is_invalid_field() {
        let mut packet = packet_for(&Command::default());
        packet[SPEED_INDEX] = 0;
        packet[CHECKSUM_INDEX] = xor_checksum(&packet[STATE_INDEX..CHECKSUM_INDEX]);

        let mut bits = String::new();
        for byte in packet {
            bits.push('0');
            for k in 0..8 {
                bits.push(if (byte >> k) & 1 == 1 { '1' } else { '0' });
            }
            bits.push_str("11");
        }
        bits.push('1');

        let train = bits_to_train(&bits);
        assert!(matches!(
            decode(train.pulses()),
            Err(DecodeError::InvalidField(_))
        ));
    }
}
