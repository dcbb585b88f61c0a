//! Period summaries and batch processing.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::AttendanceRules;
use crate::models::{AttendanceSummary, DailyAttendance, Inconsistency, RawPunch};

use super::classify::classify_day;
use super::grouping::group_by_employee_day;

/// Groups and classifies a batch of punches.
///
/// Returns one record per employee-day, ordered by employee id then date.
pub fn process_punches(punches: &[RawPunch], rules: &AttendanceRules) -> Vec<DailyAttendance> {
    group_by_employee_day(punches)
        .into_iter()
        .map(|((employee_id, date), day_punches)| {
            classify_day(&employee_id, date, &day_punches, rules)
        })
        .collect()
}

/// Summarizes one employee's day records.
///
/// Only records for `employee_id` are considered; the period bounds label the
/// summary and do not filter. `total_days_worked` counts complete days,
/// while hour totals and inconsistencies accumulate over every record.
pub fn summarize(
    employee_id: &str,
    days: &[DailyAttendance],
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> AttendanceSummary {
    let mut employee_days: Vec<&DailyAttendance> = days
        .iter()
        .filter(|d| d.employee_id == employee_id)
        .collect();
    employee_days.sort_by_key(|d| d.date);

    let mut summary = AttendanceSummary {
        employee_id: employee_id.to_string(),
        period_start,
        period_end,
        total_days_worked: 0,
        total_regular_hours: Decimal::ZERO,
        total_overtime_hours: Decimal::ZERO,
        total_night_hours: Decimal::ZERO,
        inconsistencies: Vec::new(),
    };

    for day in employee_days {
        if day.is_complete() {
            summary.total_days_worked += 1;
        }

        summary.total_regular_hours += day.regular_hours;
        summary.total_overtime_hours += day.overtime_hours;
        summary.total_night_hours += day.night_hours;

        if day.has_inconsistency {
            summary.inconsistencies.push(Inconsistency {
                date: day.date,
                reason: day
                    .inconsistency_reason
                    .clone()
                    .unwrap_or_else(|| "Inconsistency detected".to_string()),
            });
        }
    }

    summary
}
