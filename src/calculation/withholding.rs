//! Employee withholdings and the gravable base.
//!
//! Social security (ISSS) is withheld on the salary up to the withholding
//! cap; pension (AFP) is withheld on the whole salary. What remains after
//! both is the base for the progressive income tax.

use rust_decimal::Decimal;

use crate::config::RuleTable;

use super::rounding::round_money;

/// Computes the capped employee social security withholding.
///
/// `min(gross, cap) * employee_isss_rate`, rounded to cents.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::calculation::compute_employee_withholding;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/sv").unwrap();
/// let isss = compute_employee_withholding(Decimal::new(150000, 2), loader.rule_table());
/// assert_eq!(isss, Decimal::new(3000, 2)); // capped at 1000.00 * 3%
/// ```
pub fn compute_employee_withholding(gross: Decimal, rules: &RuleTable) -> Decimal {
    let contributions = rules.contributions();
    let capped = gross.min(contributions.withholding_cap);
    round_money(capped * contributions.employee.isss_rate)
}

/// Computes the uncapped employee pension withholding.
pub fn compute_pension_withholding(gross: Decimal, rules: &RuleTable) -> Decimal {
    round_money(gross * rules.contributions().employee.pension_rate)
}

/// Computes the income subject to progressive tax.
///
/// Gross minus both rounded withholdings, rounded again.
pub fn compute_gravable_base(gross: Decimal, rules: &RuleTable) -> Decimal {
    let isss = compute_employee_withholding(gross, rules);
    let pension = compute_pension_withholding(gross, rules);
    round_money(gross - isss - pension)
}
