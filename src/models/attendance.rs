//! Derived attendance records.
//!
//! [`DailyAttendance`] is the classification of one employee-day and
//! [`AttendanceSummary`] aggregates those days over a pay period. Both are
//! recomputed on demand and owned by the caller.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Terminal classification of an employee-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Both a clock-in and a clock-out were recorded.
    Complete,
    /// A clock-in was recorded without a clock-out.
    MissingExit,
    /// A clock-out was recorded without a clock-in.
    MissingEntry,
    /// The last clock-out precedes the first clock-in.
    ExitBeforeEntry,
    /// The day was classified from an empty punch list.
    NoPunches,
}

impl DayStatus {
    /// Returns the reviewer-facing reason for a defective day.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            DayStatus::Complete => None,
            DayStatus::MissingExit => Some("Clock-in without a recorded clock-out"),
            DayStatus::MissingEntry => Some("Clock-out without a recorded clock-in"),
            DayStatus::ExitBeforeEntry => Some("Last clock-out precedes first clock-in"),
            DayStatus::NoPunches => Some("No clock events recorded"),
        }
    }
}

/// One employee's attendance for one calendar date.
///
/// Invariant: any status other than [`DayStatus::Complete`] carries zero
/// hours, `has_inconsistency == true` and a non-empty reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAttendance {
    /// The employee the day belongs to.
    pub employee_id: String,
    /// The calendar date of the punches.
    pub date: NaiveDate,
    /// Timestamp of the first clock-in, if any.
    pub clock_in: Option<NaiveDateTime>,
    /// Timestamp of the last clock-out, if any.
    pub clock_out: Option<NaiveDateTime>,
    /// Hours up to the daily regular threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the daily regular threshold.
    pub overtime_hours: Decimal,
    /// Hours inside the night window; these overlap regular/overtime hours.
    pub night_hours: Decimal,
    /// The day's classification.
    pub status: DayStatus,
    /// True when the day needs human review.
    pub has_inconsistency: bool,
    /// Why the day needs review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inconsistency_reason: Option<String>,
}

impl DailyAttendance {
    /// Returns true when both a clock-in and a clock-out bound the day.
    pub fn is_complete(&self) -> bool {
        self.status == DayStatus::Complete
    }
}

/// A flagged day surfaced in a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inconsistency {
    /// The defective date.
    pub date: NaiveDate,
    /// Why it was flagged.
    pub reason: String,
}

/// Attendance totals for one employee over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The employee summarized.
    pub employee_id: String,
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// Days with both a clock-in and a clock-out.
    pub total_days_worked: u32,
    /// Sum of regular hours.
    pub total_regular_hours: Decimal,
    /// Sum of overtime hours.
    pub total_overtime_hours: Decimal,
    /// Sum of night hours.
    pub total_night_hours: Decimal,
    /// Every flagged day, in date order.
    pub inconsistencies: Vec<Inconsistency>,
}
