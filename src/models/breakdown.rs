//! Payroll breakdown models.
//!
//! A [`PayrollBreakdown`] is the gross-to-net result for one employee and
//! one pay period, with the employer-side contributions alongside.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employer-paid contributions, not deducted from the employee's pay.
///
/// # Example
///
/// ```
/// use payroll_engine::models::EmployerContributions;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let contributions = EmployerContributions {
///     employer_isss: Decimal::from_str("75.00").unwrap(),
///     employer_pension: Decimal::from_str("131.25").unwrap(),
///     training_levy: Decimal::ZERO,
///     total: Decimal::from_str("206.25").unwrap(),
/// };
/// assert_eq!(
///     contributions.total,
///     contributions.employer_isss + contributions.employer_pension + contributions.training_levy
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Employer social security (ISSS), capped.
    pub employer_isss: Decimal,
    /// Employer pension (AFP), uncapped.
    pub employer_pension: Decimal,
    /// Training-fund levy (INSAFORP); zero at or below the headcount threshold.
    pub training_levy: Decimal,
    /// Sum of the three contributions.
    pub total: Decimal,
}

/// The complete payroll breakdown for one employee and period.
///
/// Invariants, each side rounded to cents independently:
/// - `total_income = base_salary + overtime_pay + night_premium + bonuses`
/// - `total_deductions = employee_isss + employee_pension + income_tax + other_deductions`
/// - `net_pay = total_income - total_deductions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// Base salary for the period.
    pub base_salary: Decimal,
    /// Overtime hours paid.
    pub overtime_hours: Decimal,
    /// Pay for the overtime hours.
    pub overtime_pay: Decimal,
    /// Night hours paid a premium.
    pub night_hours: Decimal,
    /// Premium for the night hours.
    pub night_premium: Decimal,
    /// Bonuses, passed through unvalidated.
    pub bonuses: Decimal,
    /// Gross income; all deductions and contributions are computed on it.
    pub total_income: Decimal,

    /// Employee social security (ISSS), capped.
    pub employee_isss: Decimal,
    /// Employee pension (AFP), uncapped.
    pub employee_pension: Decimal,
    /// Income subject to the progressive tax.
    pub gravable_base: Decimal,
    /// Progressive income tax (ISR).
    pub income_tax: Decimal,
    /// Other deductions, passed through unvalidated.
    pub other_deductions: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,

    /// Take-home pay.
    pub net_pay: Decimal,

    /// Employer-side contributions.
    pub employer_contributions: EmployerContributions,
}
