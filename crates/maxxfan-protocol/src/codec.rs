//! Pulse-distance encoding of the Maxxfan frame.
//!
//! ```text
//!  ┌──────────┬─────────┬──────┬─────────────┬──────┬─────────────┬─────┬─────────┐
//!  │ mark     │ space   │ mark │ space       │ mark │ space       │ ... │ mark    │
//!  │ 3200 µs  │ 1600 µs │ 400  │ 400 (0) or  │ 400  │ ...         │     │ 400 µs  │
//!  │          │         │      │ 1200 (1)    │      │             │     │         │
//!  └──────────┴─────────┴──────┴─────────────┴──────┴─────────────┴─────┴─────────┘
//!    leader               bit 0                bit 1        ...  bit 31  trailer
//! ```

use maxxfan_core::Command;
use tracing::trace;

use crate::error::{DecodeError, DecodeResult};
use crate::frame::{FRAME_BITS, Frame};
use crate::pulse::{Level, Pulse, PulseTrain};
use crate::timing::{Symbol, classify, matches};

/// Leader mark duration.
pub const LEADER_MARK_US: u32 = 3200;
/// Leader space duration.
pub const LEADER_SPACE_US: u32 = 1600;
/// Mark preceding every bit.
pub const BIT_MARK_US: u32 = 400;
/// Space encoding a 0 bit.
pub const ZERO_SPACE_US: u32 = 400;
/// Space encoding a 1 bit.
pub const ONE_SPACE_US: u32 = 1200;
/// Terminating mark.
pub const TRAILER_MARK_US: u32 = 400;

/// Pulses in one frame: leader pair, one pair per bit, trailer mark.
pub const FRAME_PULSES: usize = 2 + FRAME_BITS * 2 + 1;

/// Encodes `command` as one frame.
///
/// The output is a pure function of the command.
pub fn encode(command: &Command) -> PulseTrain {
    let frame = Frame::pack(command);
    let mut train = PulseTrain::with_capacity(FRAME_PULSES);

    train.mark(LEADER_MARK_US);
    train.space(LEADER_SPACE_US);

    for index in 0..FRAME_BITS {
        train.mark(BIT_MARK_US);
        train.space(if frame.bit(index) {
            ONE_SPACE_US
        } else {
            ZERO_SPACE_US
        });
    }

    train.mark(TRAILER_MARK_US);
    train
}

/// Decodes one frame from the start of `pulses`.
///
/// Pulses past the trailer are ignored.
///
/// # Errors
///
/// - [`DecodeError::NoMatch`] if the leader, a mark or a space falls outside
///   its tolerance window, or a level is out of place
/// - [`DecodeError::Truncated`] if the capture ends before the trailer
/// - [`DecodeError::ChecksumFailed`] if the checksum byte disagrees
/// - [`DecodeError::InvalidField`] if a field decodes out of range
pub fn decode(pulses: &[Pulse]) -> DecodeResult<Command> {
    let mut reader = PulseReader::new(pulses);

    let leader_mark = reader.next(Level::Mark)?;
    if !matches(leader_mark, LEADER_MARK_US) {
        return Err(DecodeError::no_match(0, "leader mark out of tolerance"));
    }
    let leader_space = reader.next(Level::Space)?;
    if !matches(leader_space, LEADER_SPACE_US) {
        return Err(DecodeError::no_match(1, "leader space out of tolerance"));
    }

    let mut bits = [false; FRAME_BITS];
    for bit in bits.iter_mut() {
        let mark = reader.next(Level::Mark)?;
        if !matches(mark, BIT_MARK_US) {
            return Err(DecodeError::no_match(
                reader.position(),
                "bit mark out of tolerance",
            ));
        }

        let space = reader.next(Level::Space)?;
        *bit = match classify(space, ZERO_SPACE_US, ONE_SPACE_US) {
            Symbol::Short => false,
            Symbol::Long => true,
            Symbol::Unrecognized => {
                return Err(DecodeError::no_match(
                    reader.position(),
                    "bit space out of tolerance",
                ));
            }
        };
    }

    let trailer = reader.next(Level::Mark)?;
    if !matches(trailer, TRAILER_MARK_US) {
        return Err(DecodeError::no_match(
            reader.position(),
            "trailer mark out of tolerance",
        ));
    }

    let frame = Frame::from_bits(&bits);
    trace!(frame = %frame, "Frame timing matched");
    frame.verify()?;
    frame.unpack()
}

/// Sequential reader enforcing mark/space alternation.
struct PulseReader<'a> {
    pulses: &'a [Pulse],
    next: usize,
}

impl<'a> PulseReader<'a> {
    fn new(pulses: &'a [Pulse]) -> Self {
        Self { pulses, next: 0 }
    }

    /// Index of the pulse most recently read.
    fn position(&self) -> usize {
        self.next.saturating_sub(1)
    }

    fn next(&mut self, level: Level) -> DecodeResult<u32> {
        let pulse = self
            .pulses
            .get(self.next)
            .ok_or(DecodeError::Truncated {
                expected: FRAME_PULSES,
                received: self.pulses.len(),
            })?;

        if pulse.level != level {
            return Err(DecodeError::no_match(
                self.next,
                match level {
                    Level::Mark => "expected a mark",
                    Level::Space => "expected a space",
                },
            ));
        }

        self.next += 1;
        Ok(pulse.duration_us)
    }
}
