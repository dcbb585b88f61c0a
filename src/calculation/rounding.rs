//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a value to cents, half-up away from zero, with a fixed scale of 2.
///
/// Every named sub-computation in the engine rounds through this function at
/// the point it is produced; totals are sums of already rounded parts.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(round_money(dec("93.202")), dec("93.20"));
/// assert_eq!(round_money(dec("0.125")), dec("0.13"));
/// assert_eq!(round_money(dec("1500")).to_string(), "1500.00");
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
