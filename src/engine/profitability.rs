//! Red/Green Line profitability gate.
//!
//! Classified from the current aggregate numbers at every evaluation point
//! (save, display, approval); never stored, so it cannot go stale after a
//! late edit.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::results::Classification;

const GREEN_FACTOR: Decimal = dec!(1.30);

/// Classify an aggregate charged price against the aggregate minimum floor.
///
/// A zero minimum means there is no floor, so any price is green.
pub fn classify(original: Decimal, minimum: Decimal) -> Classification {
    if minimum <= Decimal::ZERO {
        return Classification::Green;
    }
    if original <= minimum {
        Classification::Red
    } else if original >= minimum * GREEN_FACTOR {
        Classification::Green
    } else {
        Classification::Neutral
    }
}

/// Dollar increase needed to reach the green threshold; `None` unless the
/// quote is neutral.
pub fn gap_to_green(original: Decimal, minimum: Decimal) -> Option<Decimal> {
    match classify(original, minimum) {
        Classification::Neutral => Some(minimum * GREEN_FACTOR - original),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_behavior() {
        assert_eq!(classify(dec!(100), dec!(100)), Classification::Red);
        assert_eq!(classify(dec!(130), dec!(100)), Classification::Green);
        assert_eq!(classify(dec!(129.99), dec!(100)), Classification::Neutral);
        assert_eq!(classify(dec!(99), dec!(100)), Classification::Red);
    }

    #[test]
    fn zero_minimum_is_always_green() {
        assert_eq!(classify(dec!(1), dec!(0)), Classification::Green);
        assert_eq!(classify(dec!(0), dec!(0)), Classification::Green);
        assert_eq!(classify(dec!(10000), dec!(0)), Classification::Green);
    }

    #[test]
    fn gap_reported_only_in_the_neutral_band() {
        assert_eq!(gap_to_green(dec!(104), dec!(100)), Some(dec!(26.00)));
        assert_eq!(gap_to_green(dec!(130), dec!(100)), None);
        assert_eq!(gap_to_green(dec!(100), dec!(100)), None);
    }
}
