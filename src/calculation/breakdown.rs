//! Gross-to-net payroll breakdown assembly.
//!
//! Combines the hourly premiums, withholdings, progressive tax and employer
//! contributions into one [`PayrollBreakdown`]. Every component is rounded
//! where it is computed, so the totals are exact sums of cent values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RuleTable;
use crate::error::{EngineError, EngineResult};
use crate::models::PayrollBreakdown;

use super::employer::compute_employer_contributions;
use super::premiums::{compute_night_premium, compute_overtime_pay, hourly_rate};
use super::progressive_tax::compute_progressive_tax;
use super::rounding::round_money;
use super::withholding::{
    compute_employee_withholding, compute_gravable_base, compute_pension_withholding,
};

/// Inputs to a payroll breakdown.
///
/// Negative bonuses or deductions are not rejected; they flow through the
/// arithmetic unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownInput {
    /// Base salary for the period.
    pub base_salary: Decimal,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Hours worked inside the night window.
    #[serde(default)]
    pub night_hours: Decimal,
    /// Bonuses added to gross income.
    #[serde(default)]
    pub bonuses: Decimal,
    /// Deductions beyond the statutory ones.
    #[serde(default)]
    pub other_deductions: Decimal,
}

impl BreakdownInput {
    /// Creates an input with only a base salary.
    pub fn with_base_salary(base_salary: Decimal) -> Self {
        Self {
            base_salary,
            ..Self::default()
        }
    }
}

/// Assembles the full payroll breakdown for one employee and period.
///
/// # Arguments
///
/// * `input` - Base salary, attendance-derived hours, bonuses and other deductions
/// * `headcount` - The employer's total number of employees (drives the training levy)
/// * `rules` - The rule table
///
/// # Errors
///
/// Returns [`EngineError::NoMatchingBracket`] if the tax bracket lookup
/// fails, which a validated rule table never allows, and
/// [`EngineError::AmountOverflow`] if an input magnitude pushes a premium or
/// total outside the decimal range.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::calculation::{assemble_breakdown, BreakdownInput};
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/sv").unwrap();
/// let input = BreakdownInput::with_base_salary(Decimal::from_str("1500.00").unwrap());
/// let breakdown = assemble_breakdown(&input, 5, loader.rule_table()).unwrap();
///
/// assert_eq!(breakdown.net_pay, Decimal::from_str("1208.05").unwrap());
/// ```
pub fn assemble_breakdown(
    input: &BreakdownInput,
    headcount: u32,
    rules: &RuleTable,
) -> EngineResult<PayrollBreakdown> {
    let rate = hourly_rate(input.base_salary, rules);

    let overtime_pay = compute_overtime_pay(rate, input.overtime_hours, rules)?;
    let night_premium = compute_night_premium(rate, input.night_hours, rules)?;

    let total_income = checked_sum(
        &[input.base_salary, overtime_pay, night_premium, input.bonuses],
        "total income",
    )?;

    let employee_isss = compute_employee_withholding(total_income, rules);
    let employee_pension = compute_pension_withholding(total_income, rules);
    let gravable_base = compute_gravable_base(total_income, rules);
    let income_tax = compute_progressive_tax(gravable_base, rules)?;

    let total_deductions = checked_sum(
        &[employee_isss, employee_pension, income_tax, input.other_deductions],
        "total deductions",
    )?;
    let net_pay = total_income
        .checked_sub(total_deductions)
        .map(round_money)
        .ok_or_else(|| overflow("net pay"))?;

    let employer_contributions = compute_employer_contributions(total_income, headcount, rules);

    Ok(PayrollBreakdown {
        base_salary: input.base_salary,
        overtime_hours: input.overtime_hours,
        overtime_pay,
        night_hours: input.night_hours,
        night_premium,
        bonuses: input.bonuses,
        total_income,
        employee_isss,
        employee_pension,
        gravable_base,
        income_tax,
        other_deductions: input.other_deductions,
        total_deductions,
        net_pay,
        employer_contributions,
    })
}

fn checked_sum(amounts: &[Decimal], operation: &str) -> EngineResult<Decimal> {
    amounts
        .iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(*amount))
        .map(round_money)
        .ok_or_else(|| overflow(operation))
}

fn overflow(operation: &str) -> EngineError {
    EngineError::AmountOverflow {
        operation: operation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rules() -> RuleTable {
        ConfigLoader::load("./config/sv").unwrap().into_rule_table()
    }

    #[test]
    fn test_reference_breakdown_bracket_three() {
        let input = BreakdownInput::with_base_salary(dec("1500.00"));
        let result = assemble_breakdown(&input, 5, &rules()).unwrap();

        assert_eq!(result.total_income, dec("1500.00"));
        assert_eq!(result.employee_isss, dec("30.00"));
        assert_eq!(result.employee_pension, dec("108.75"));
        assert_eq!(result.gravable_base, dec("1361.25"));
        assert_eq!(result.income_tax, dec("153.20"));
        assert_eq!(result.total_deductions, dec("291.95"));
        assert_eq!(result.net_pay, dec("1208.05"));

        assert_eq!(result.employer_contributions.employer_isss, dec("75.00"));
        assert_eq!(result.employer_contributions.employer_pension, dec("131.25"));
        assert_eq!(result.employer_contributions.training_levy, Decimal::ZERO);
        assert_eq!(result.employer_contributions.total, dec("206.25"));
    }

    #[test]
    fn test_breakdown_with_hours_bonus_and_deductions() {
        let input = BreakdownInput {
            base_salary: dec("1000.00"),
            overtime_hours: dec("5"),
            night_hours: dec("4"),
            bonuses: dec("50.00"),
            other_deductions: dec("20.00"),
        };
        let result = assemble_breakdown(&input, 12, &rules()).unwrap();

        assert_eq!(result.overtime_pay, dec("41.67"));
        assert_eq!(result.night_premium, dec("4.17"));
        assert_eq!(result.total_income, dec("1095.84"));
        assert_eq!(result.employee_isss, dec("30.00"));
        assert_eq!(result.employee_pension, dec("79.45"));
        assert_eq!(result.gravable_base, dec("986.39"));
        assert_eq!(result.income_tax, dec("78.23"));
        assert_eq!(result.total_deductions, dec("207.68"));
        assert_eq!(result.net_pay, dec("888.16"));

        assert_eq!(result.employer_contributions.employer_pension, dec("95.89"));
        assert_eq!(result.employer_contributions.training_levy, dec("10.96"));
        assert_eq!(result.employer_contributions.total, dec("181.85"));
    }

    #[test]
    fn test_exempt_salary_owes_no_tax() {
        let input = BreakdownInput::with_base_salary(dec("365.00"));
        let result = assemble_breakdown(&input, 3, &rules()).unwrap();

        assert_eq!(result.income_tax, Decimal::ZERO);
        // 365.00 - 10.95 - 26.46
        assert_eq!(result.net_pay, dec("327.59"));
    }

    #[test]
    fn test_net_plus_deductions_equals_income() {
        let input = BreakdownInput {
            base_salary: dec("2733.33"),
            overtime_hours: dec("7.5"),
            night_hours: dec("3.25"),
            bonuses: dec("125.10"),
            other_deductions: dec("43.21"),
        };
        let result = assemble_breakdown(&input, 40, &rules()).unwrap();

        assert_eq!(result.net_pay + result.total_deductions, result.total_income);
    }

    #[test]
    fn test_negative_inputs_pass_through() {
        let input = BreakdownInput {
            base_salary: dec("800.00"),
            bonuses: dec("-100.00"),
            other_deductions: dec("-10.00"),
            ..BreakdownInput::default()
        };
        let result = assemble_breakdown(&input, 0, &rules()).unwrap();

        assert_eq!(result.total_income, dec("700.00"));
        assert_eq!(result.other_deductions, dec("-10.00"));
        assert_eq!(result.net_pay + result.total_deductions, result.total_income);
    }

    #[test]
    fn test_absurd_magnitudes_fail_instead_of_panicking() {
        let rules = rules();
        let huge_overtime = BreakdownInput {
            overtime_hours: dec("1000000"),
            ..BreakdownInput::with_base_salary(dec("7000000000000000000000000000"))
        };
        match assemble_breakdown(&huge_overtime, 5, &rules) {
            Err(EngineError::AmountOverflow { operation }) => assert_eq!(operation, "overtime pay"),
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }

        let huge_bonus = BreakdownInput {
            bonuses: Decimal::MAX,
            ..BreakdownInput::with_base_salary(Decimal::MAX)
        };
        match assemble_breakdown(&huge_bonus, 5, &rules) {
            Err(EngineError::AmountOverflow { operation }) => assert_eq!(operation, "total income"),
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let rules = rules();
        let input = BreakdownInput {
            base_salary: dec("1234.56"),
            overtime_hours: dec("2.5"),
            night_hours: dec("1.75"),
            bonuses: dec("10"),
            other_deductions: dec("5"),
        };

        let first = assemble_breakdown(&input, 15, &rules).unwrap();
        let second = assemble_breakdown(&input, 15, &rules).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_input_deserializes_with_defaults() {
        let input: BreakdownInput = serde_json::from_str(r#"{"base_salary": "900.00"}"#).unwrap();
        assert_eq!(input, BreakdownInput::with_base_salary(dec("900.00")));
    }
}
