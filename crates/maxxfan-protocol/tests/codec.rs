use maxxfan_core::Command;
use maxxfan_protocol::{
    DecodeError, FRAME_BITS, FRAME_PULSES, ProtocolKind, PulseTrain, decode, decode_any, encode,
};

fn all_commands() -> impl Iterator<Item = Command> {
    (0u16..64).flat_map(|flags| {
        (1u8..=10).flat_map(move |step| {
            (29u8..=99).map(move |temperature| {
                let bit = |n: u16| flags & (1 << n) != 0;
                Command::builder()
                    .fan_on(bit(0))
                    .special(bit(1))
                    .fan_exhaust(bit(2))
                    .cover_open(bit(3))
                    .auto_mode(bit(4))
                    .warn(bit(5))
                    .fan_speed(step * 10)
                    .auto_temperature(temperature)
                    .build()
                    .unwrap()
            })
        })
    })
}

fn scenario() -> Command {
    Command::builder()
        .fan_on(true)
        .fan_speed(30)
        .auto_temperature(78)
        .build()
        .unwrap()
}

/// Rescales every duration by `percent` of nominal.
fn scaled(train: &PulseTrain, percent: i64) -> PulseTrain {
    let signed: Vec<i32> = train
        .to_signed()
        .into_iter()
        .map(|d| i32::try_from(i64::from(d) * percent / 100).unwrap())
        .collect();
    PulseTrain::from_signed(&signed)
}

#[test]
fn every_command_roundtrips() {
    let mut count = 0;
    for command in all_commands() {
        let train = encode(&command);
        assert_eq!(train.len(), FRAME_PULSES);
        assert_eq!(decode(train.pulses()), Ok(command), "{command}");
        count += 1;
    }
    assert_eq!(count, 64 * 10 * 71);
}

#[test]
fn every_command_roundtrips_serial() {
    for command in all_commands().step_by(7) {
        let train = ProtocolKind::MaxxfanSerial.encode(&command);
        assert_eq!(
            ProtocolKind::MaxxfanSerial.decode(train.pulses()),
            Ok(command),
            "{command}"
        );
    }
}

#[test]
fn any_single_bit_flip_is_rejected() {
    let signed = encode(&scenario()).to_signed();
    for bit in 0..FRAME_BITS {
        let index = 3 + bit * 2;
        let mut corrupted = signed.clone();
        corrupted[index] = if corrupted[index] == -400 { -1200 } else { -400 };
        let train = PulseTrain::from_signed(&corrupted);
        let result = decode(train.pulses());
        assert!(
            matches!(result, Err(DecodeError::ChecksumFailed { .. })),
            "bit {bit}: {result:?}"
        );
    }
}

#[test]
fn tolerance_boundary() {
    let train = encode(&scenario());

    for percent in [75, 80, 100, 120, 125] {
        assert_eq!(
            decode(scaled(&train, percent).pulses()),
            Ok(scenario()),
            "scaled to {percent}%"
        );
    }

    for percent in [74, 126] {
        let result = decode(scaled(&train, percent).pulses());
        assert!(
            matches!(result, Err(DecodeError::NoMatch { index: 0, .. })),
            "scaled to {percent}%: {result:?}"
        );
    }
}

/// Replaces every bit space of `nominal` with `replacement`, leaving the
/// leader and marks untouched.
fn with_spaces(train: &PulseTrain, nominal: i32, replacement: i32) -> PulseTrain {
    let signed: Vec<i32> = train
        .to_signed()
        .into_iter()
        .enumerate()
        .map(|(i, d)| if i >= 2 && d == nominal { replacement } else { d })
        .collect();
    PulseTrain::from_signed(&signed)
}

#[test]
fn bit_space_tolerance_edges() {
    let train = encode(&scenario());
    let signed = train.to_signed();

    for (nominal, edges) in [(-400, [-300, -500]), (-1200, [-900, -1500])] {
        for edge in edges {
            assert_eq!(
                decode(with_spaces(&train, nominal, edge).pulses()),
                Ok(scenario()),
                "{nominal} as {edge}"
            );
        }
    }

    for (nominal, outside) in [(-400, [-299, -501]), (-1200, [-899, -1501])] {
        let first = signed
            .iter()
            .skip(2)
            .position(|&d| d == nominal)
            .unwrap()
            + 2;
        assert_ne!(first, 0);
        for duration in outside {
            assert_eq!(
                decode(with_spaces(&train, nominal, duration).pulses()),
                Err(DecodeError::no_match(first, "bit space out of tolerance")),
                "{nominal} as {duration}"
            );
        }
    }
}

#[test]
fn truncation_never_yields_a_command() {
    let train = encode(&scenario());
    for len in 0..FRAME_PULSES {
        let mut short = train.clone();
        short.truncate(len);
        assert_eq!(
            decode(short.pulses()),
            Err(DecodeError::Truncated {
                expected: FRAME_PULSES,
                received: len
            })
        );
    }
}

#[test]
fn scenario_through_text_form() {
    let text = encode(&scenario()).to_string();
    assert!(text.starts_with("[3200, -1600, 400, -1200, 400, -400"));

    let parsed: PulseTrain = text.parse().unwrap();
    assert_eq!(decode_any(parsed.pulses()), Ok((ProtocolKind::Maxxfan, scenario())));
}

#[test]
fn scenario_dump() {
    let decoded = decode(encode(&scenario()).pulses()).unwrap();
    insta::assert_snapshot!(
        decoded.to_string(),
        @"fan_on=true, fan_speed=30, fan_exhaust=false, cover_open=false, auto_mode=false, auto_temperature=78, special=false, warn=false"
    );
}
