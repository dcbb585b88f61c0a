//! Payroll runs: attendance summaries composed with the salary calculator.
//!
//! Each employee's overtime and night hours come from their attendance
//! summary and are valued at the hourly rate derived from their base salary.
//! Records are processed in employee-id order and a failure on one record
//! never aborts the others.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculation::{BreakdownInput, assemble_breakdown};
use crate::config::RuleTable;
use crate::error::EngineResult;
use crate::models::{AttendanceSummary, PayrollBreakdown};

/// Pay inputs for one employee that do not come from attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayInput {
    /// The employee's identifier; joins against attendance summaries.
    pub employee_id: String,
    /// Base salary for the period.
    pub base_salary: Decimal,
    /// Bonuses for the period.
    #[serde(default)]
    pub bonuses: Decimal,
    /// Non-statutory deductions for the period.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Cost center used by the accounting export; empty when unassigned.
    #[serde(default)]
    pub cost_center: String,
}

/// A successfully computed breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeBreakdown {
    /// The employee.
    pub employee_id: String,
    /// The employee's cost center.
    pub cost_center: String,
    /// The computed breakdown.
    pub breakdown: PayrollBreakdown,
}

/// A record that could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollFailure {
    /// The employee.
    pub employee_id: String,
    /// The error message.
    pub message: String,
}

/// Totals across the successful records of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Number of breakdowns summed.
    pub employees: u32,
    /// Sum of gross income.
    pub total_income: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub net_pay: Decimal,
    /// Sum of employer contributions.
    pub employer_contributions: Decimal,
}

/// The outcome of a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Successful breakdowns, in employee-id order.
    pub breakdowns: Vec<EmployeeBreakdown>,
    /// Records that failed, in employee-id order.
    pub failures: Vec<PayrollFailure>,
    /// Totals over `breakdowns`.
    pub totals: RunTotals,
}

/// Computes one employee's breakdown from their pay inputs and attendance.
///
/// A missing summary contributes zero overtime and night hours.
pub fn breakdown_from_attendance(
    input: &EmployeePayInput,
    summary: Option<&AttendanceSummary>,
    headcount: u32,
    rules: &RuleTable,
) -> EngineResult<PayrollBreakdown> {
    let breakdown_input = BreakdownInput {
        base_salary: input.base_salary,
        overtime_hours: summary.map_or(Decimal::ZERO, |s| s.total_overtime_hours),
        night_hours: summary.map_or(Decimal::ZERO, |s| s.total_night_hours),
        bonuses: input.bonuses,
        other_deductions: input.other_deductions,
    };

    assemble_breakdown(&breakdown_input, headcount, rules)
}

/// Runs payroll for a set of employees.
///
/// # Arguments
///
/// * `inputs` - Pay inputs, one per employee
/// * `summaries` - Attendance summaries, matched to inputs by employee id
/// * `headcount` - The employer's total number of employees
/// * `rules` - The rule table
///
/// A record whose breakdown fails, for example on an amount overflow, is
/// listed in `failures` and left out of the totals.
pub fn run_payroll(
    inputs: &[EmployeePayInput],
    summaries: &[AttendanceSummary],
    headcount: u32,
    rules: &RuleTable,
) -> PayrollRun {
    let mut by_employee: HashMap<&str, &AttendanceSummary> = HashMap::new();
    for summary in summaries {
        by_employee.entry(summary.employee_id.as_str()).or_insert(summary);
    }

    let mut ordered: Vec<&EmployeePayInput> = inputs.iter().collect();
    ordered.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));

    let mut run = PayrollRun {
        breakdowns: Vec::new(),
        failures: Vec::new(),
        totals: RunTotals::default(),
    };

    for input in ordered {
        let summary = by_employee.get(input.employee_id.as_str()).copied();

        match breakdown_from_attendance(input, summary, headcount, rules) {
            Ok(breakdown) => {
                run.totals.employees += 1;
                run.totals.total_income += breakdown.total_income;
                run.totals.total_deductions += breakdown.total_deductions;
                run.totals.net_pay += breakdown.net_pay;
                run.totals.employer_contributions += breakdown.employer_contributions.total;

                run.breakdowns.push(EmployeeBreakdown {
                    employee_id: input.employee_id.clone(),
                    cost_center: input.cost_center.clone(),
                    breakdown,
                });
            }
            Err(err) => {
                warn!(
                    employee_id = %input.employee_id,
                    error = %err,
                    "Payroll breakdown failed"
                );
                run.failures.push(PayrollFailure {
                    employee_id: input.employee_id.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    run
}
