//! Request types for the payroll engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::BreakdownInput;
use crate::ledger::PayrollTotals;
use crate::models::RawPunch;

/// Request body for `POST /breakdown`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownRequest {
    /// The employee the breakdown is for.
    pub employee_id: String,
    /// Base salary for the period.
    pub base_salary: Decimal,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Hours worked in the night window.
    #[serde(default)]
    pub night_hours: Decimal,
    /// Bonuses for the period.
    #[serde(default)]
    pub bonuses: Decimal,
    /// Non-statutory deductions.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Employer's total number of employees.
    #[serde(default)]
    pub headcount: u32,
}

impl From<&BreakdownRequest> for BreakdownInput {
    fn from(request: &BreakdownRequest) -> Self {
        BreakdownInput {
            base_salary: request.base_salary,
            overtime_hours: request.overtime_hours,
            night_hours: request.night_hours,
            bonuses: request.bonuses,
            other_deductions: request.other_deductions,
        }
    }
}

/// Request body for `POST /attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// Employee to summarize.
    pub employee_id: String,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// The closed batch of raw punches.
    pub punches: Vec<RawPunch>,
}

/// Request body for `POST /journal-entry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryRequest {
    /// Period label, e.g. "2026-03".
    pub period: String,
    /// Entry reference; defaults to `PAYROLL-{period}`.
    #[serde(default)]
    pub reference: Option<String>,
    /// Posting date.
    pub reference_date: NaiveDate,
    /// Totals to post.
    pub totals: Vec<PayrollTotals>,
}
