//! Common utility functions for pricing calculations.

use rust_decimal::Decimal;

/// Rounds a decimal value to the nearest whole number using half-up rounding.
///
/// Estimate bounds and hour counts are always whole numbers; values at
/// exactly .5 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimator_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(4156.25)), dec!(4156));
/// assert_eq!(round_half_up(dec!(4462.5)), dec!(4463));
/// assert_eq!(round_half_up(dec!(43.8)), dec!(44));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
