//! Money and percentage helpers
//!
//! Amounts stay `Decimal` end to end; only ratios leave as `f64`.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to 2 decimal places
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `100 * actual / target`, 0 when the target is zero or negative
///
/// Not rounded: bonus resolution compares against exact thresholds.
pub fn percent_of(actual: Decimal, target: Decimal) -> f64 {
    if target <= Decimal::ZERO {
        return 0.0;
    }
    actual
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(target))
        .and_then(|ratio| ratio.to_f64())
        .unwrap_or_else(|| {
            // Out of Decimal range: fall back to float arithmetic
            let actual = actual.to_f64().unwrap_or_default();
            let target = target.to_f64().unwrap_or(1.0);
            actual * 100.0 / target
        })
}

/// Percent change from `previous` to `current`
///
/// A zero baseline yields 100 when there is new activity, otherwise 0.
pub fn delta_percent(current: Decimal, previous: Decimal) -> f64 {
    if previous.is_zero() {
        return if current > Decimal::ZERO { 100.0 } else { 0.0 };
    }
    (current - previous)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(previous.abs()))
        .and_then(|ratio| ratio.to_f64())
        .unwrap_or_default()
}

/// Percentage of `base` (e.g. bonus percent of a commission), rounded to cents
pub fn apply_percent(base: Decimal, percent: f64) -> Decimal {
    let pct = Decimal::from_f64(percent).unwrap_or_default();
    round_money(base * pct / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(50), dec!(200)), 25.0);
        assert_eq!(percent_of(dec!(300), dec!(200)), 150.0);
        assert_eq!(percent_of(dec!(10), Decimal::ZERO), 0.0);
        assert_eq!(percent_of(Decimal::ZERO, dec!(10)), 0.0);
    }

    #[test]
    fn test_delta_percent_zero_baseline() {
        assert_eq!(delta_percent(dec!(50), Decimal::ZERO), 100.0);
        assert_eq!(delta_percent(Decimal::ZERO, Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_delta_percent_signed() {
        assert_eq!(delta_percent(dec!(150), dec!(100)), 50.0);
        assert_eq!(delta_percent(dec!(75), dec!(100)), -25.0);
    }

    #[test]
    fn test_apply_percent() {
        assert_eq!(apply_percent(dec!(30), 10.0), dec!(3.00));
        assert_eq!(apply_percent(dec!(33.33), 5.0), dec!(1.67));
        assert_eq!(apply_percent(dec!(100), 0.0), dec!(0));
    }
}
