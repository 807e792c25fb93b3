//! Tolerance-window timing classification.
//!
//! Receivers see durations skewed by oscillator drift and demodulator
//! debounce. Every duration check in the pulse-distance decoder goes through
//! [`matches`] or [`classify`], so the tolerance is defined in one place.

use std::ops::RangeInclusive;

/// Accepted deviation from a nominal duration, in percent (inclusive).
pub const TOLERANCE_PERCENT: u32 = 25;

/// Classification of a space duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Within tolerance of the short nominal.
    Short,
    /// Within tolerance of the long nominal.
    Long,
    /// Matches neither nominal.
    Unrecognized,
}

/// Returns true if `duration` lies within the tolerance window of `nominal`.
pub fn matches(duration: u32, nominal: u32) -> bool {
    u64::from(duration.abs_diff(nominal)) * 100
        <= u64::from(nominal) * u64::from(TOLERANCE_PERCENT)
}

/// Classifies `duration` against a short and a long nominal.
///
/// The windows must not overlap; the short window is tried first.
pub fn classify(duration: u32, nominal_short: u32, nominal_long: u32) -> Symbol {
    if matches(duration, nominal_short) {
        Symbol::Short
    } else if matches(duration, nominal_long) {
        Symbol::Long
    } else {
        Symbol::Unrecognized
    }
}

/// Inclusive window of durations accepted for `nominal`.
pub fn window(nominal: u32) -> RangeInclusive<u32> {
    let slack = u32::try_from(u64::from(nominal) * u64::from(TOLERANCE_PERCENT) / 100)
        .unwrap_or(u32::MAX);
    nominal.saturating_sub(slack)..=nominal.saturating_add(slack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_edges_are_inclusive() {
        assert!(matches(400, 400));
        assert!(matches(300, 400));
        assert!(matches(500, 400));
        assert!(!matches(299, 400));
        assert!(!matches(501, 400));
    }

    #[test]
    fn window_range() {
        assert_eq!(window(400), 300..=500);
        assert_eq!(window(1200), 900..=1500);
        assert_eq!(window(1600), 1200..=2000);
    }

    #[test]
    fn classify_short_long() {
        assert_eq!(classify(420, 400, 1200), Symbol::Short);
        assert_eq!(classify(1100, 400, 1200), Symbol::Long);
        assert_eq!(classify(700, 400, 1200), Symbol::Unrecognized);
        assert_eq!(classify(1600, 400, 1200), Symbol::Unrecognized);
        assert_eq!(classify(0, 400, 1200), Symbol::Unrecognized);
    }

    #[test]
    fn windows_agree_with_matches() {
        for nominal in [400u32, 1200, 1600, 3200] {
            let range = window(nominal);
            assert!(matches(*range.start(), nominal));
            assert!(matches(*range.end(), nominal));
            assert!(!matches(range.start() - 1, nominal));
            assert!(!matches(range.end() + 1, nominal));
        }
    }
}
