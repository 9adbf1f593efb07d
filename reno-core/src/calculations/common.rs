//! Common rounding helpers for price calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds `value` to the nearest multiple of `increment`, halves rounding
/// away from zero.
///
/// Prices are never negative, so for every value the estimator produces this
/// is the familiar round-half-up.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use reno_core::calculations::common::round_to_increment;
///
/// assert_eq!(round_to_increment(dec!(1249), dec!(500)), dec!(1000));
/// assert_eq!(round_to_increment(dec!(1250), dec!(500)), dec!(1500));
/// ```
pub fn round_to_increment(
    value: Decimal,
    increment: Decimal,
) -> Decimal {
    if increment.is_zero() {
        return value;
    }
    (value / increment).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) * increment
}

/// Rounds a price to the nearest thousand.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use reno_core::calculations::common::round_to_nearest_thousand;
///
/// assert_eq!(round_to_nearest_thousand(dec!(63750)), dec!(64000));
/// assert_eq!(round_to_nearest_thousand(dec!(20400)), dec!(20000));
/// assert_eq!(round_to_nearest_thousand(dec!(25500)), dec!(26000));
/// ```
pub fn round_to_nearest_thousand(value: Decimal) -> Decimal {
    round_to_increment(value, Decimal::ONE_THOUSAND)
}
