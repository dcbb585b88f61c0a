//! Employer-side contributions.
//!
//! Employer social security shares the employee-side cap, employer pension
//! is uncapped, and the training-fund levy only applies to employers whose
//! headcount exceeds the configured threshold.

use rust_decimal::Decimal;

use crate::config::RuleTable;
use crate::models::EmployerContributions;

use super::rounding::round_money;

/// Computes the employer contributions for a gross salary.
///
/// # Arguments
///
/// * `gross` - The employee's gross income for the period
/// * `headcount` - The employer's total number of employees
/// * `rules` - The rule table
///
/// # Example
///
/// ```no_run
/// use payroll_engine::calculation::compute_employer_contributions;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/sv").unwrap();
/// let result = compute_employer_contributions(Decimal::new(150000, 2), 5, loader.rule_table());
/// assert_eq!(result.training_levy, Decimal::ZERO); // 5 employees is under the threshold
/// ```
pub fn compute_employer_contributions(
    gross: Decimal,
    headcount: u32,
    rules: &RuleTable,
) -> EmployerContributions {
    let contributions = rules.contributions();
    let rates = &contributions.employer;

    let capped = gross.min(contributions.withholding_cap);
    let employer_isss = round_money(capped * rates.isss_rate);
    let employer_pension = round_money(gross * rates.pension_rate);

    let training_levy = if headcount > contributions.training_levy_min_headcount {
        round_money(gross * rates.training_levy_rate)
    } else {
        round_money(Decimal::ZERO)
    };

    EmployerContributions {
        employer_isss,
        employer_pension,
        training_levy,
        total: round_money(employer_isss + employer_pension + training_levy),
    }
}
