//! Hourly rate, overtime pay and night premium.

use rust_decimal::Decimal;

use crate::config::RuleTable;
use crate::error::{EngineError, EngineResult};

use super::rounding::round_money;

/// Derives the hourly rate from a period base salary.
///
/// `base_salary / (standard_days_per_period * standard_hours_per_day)`,
/// carried unrounded into the pay computations that use it.
pub fn hourly_rate(base_salary: Decimal, rules: &RuleTable) -> Decimal {
    let premiums = rules.premiums();
    let standard_hours = Decimal::from(premiums.standard_days_per_period)
        * Decimal::from(premiums.standard_hours_per_day);
    base_salary / standard_hours
}

/// Computes overtime pay: `hourly_rate * hours * overtime_multiplier`.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::calculation::compute_overtime_pay;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/sv").unwrap();
/// let pay = compute_overtime_pay(Decimal::new(625, 2), Decimal::new(4, 0), loader.rule_table())?;
/// assert_eq!(pay, Decimal::new(5000, 2)); // 6.25 * 4 * 2
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`] if the product exceeds the
/// decimal range.
pub fn compute_overtime_pay(
    hourly_rate: Decimal,
    hours: Decimal,
    rules: &RuleTable,
) -> EngineResult<Decimal> {
    premium(hourly_rate, hours, rules.premiums().overtime_multiplier, "overtime pay")
}

/// Computes the night premium: `hourly_rate * hours * night_premium_rate`.
///
/// The premium is paid on top of the regular or overtime pay for the same
/// hours; it does not replace it. Fails with [`EngineError::AmountOverflow`]
/// like [`compute_overtime_pay`].
pub fn compute_night_premium(
    hourly_rate: Decimal,
    hours: Decimal,
    rules: &RuleTable,
) -> EngineResult<Decimal> {
    premium(hourly_rate, hours, rules.premiums().night_premium_rate, "night premium")
}

fn premium(
    hourly_rate: Decimal,
    hours: Decimal,
    factor: Decimal,
    operation: &str,
) -> EngineResult<Decimal> {
    hourly_rate
        .checked_mul(hours)
        .and_then(|pay| pay.checked_mul(factor))
        .map(round_money)
        .ok_or_else(|| EngineError::AmountOverflow {
            operation: operation.to_string(),
        })
}
