//! Shared numeric helpers for schedule arithmetic.

use rust_decimal::Decimal;

/// Rounds a value to two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use depr_core::schedule::common::round_to_cents;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_to_cents(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_to_cents(dec!(123.455)), dec!(123.46));
/// ```
pub fn round_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value at zero from below.
pub fn clamp_non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
