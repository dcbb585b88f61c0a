//! Classification of a single employee-day.
//!
//! A day is classified from its first clock-in and last clock-out. Only a
//! complete day carries hours; every other outcome is recorded as a flagged
//! record with zero hours so the batch can finish and a reviewer can act.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::round_money;
use crate::config::AttendanceRules;
use crate::models::{DailyAttendance, DayStatus, PunchDirection, RawPunch};

use super::night::night_minutes;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Regular, overtime and night hours for a complete day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DayHours {
    regular: Decimal,
    overtime: Decimal,
    night: Decimal,
}

/// Classifies one employee-day from its punches.
///
/// The punches are sorted by timestamp; the clock-in is the first `IN` punch
/// and the clock-out the last `OUT` punch. Intermediate punches are ignored.
///
/// # Arguments
///
/// * `employee_id` - The employee the punches belong to
/// * `date` - The calendar date of the bucket
/// * `punches` - The day's punches, in any order
/// * `rules` - Regular-hours threshold and night window
///
/// # Returns
///
/// A [`DailyAttendance`] in one of the terminal states of [`DayStatus`].
/// This function never fails.
///
/// # Example
///
/// ```
/// use payroll_engine::attendance::classify_day;
/// use payroll_engine::config::AttendanceRules;
/// use payroll_engine::models::{DayStatus, PunchDirection, PunchSource, RawPunch};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punches = vec![
///     RawPunch {
///         employee_id: "emp_001".to_string(),
///         timestamp: at("2026-03-02 18:30:00"),
///         direction: PunchDirection::In,
///         source: PunchSource::Fingerprint,
///     },
///     RawPunch {
///         employee_id: "emp_001".to_string(),
///         timestamp: at("2026-03-02 19:30:00"),
///         direction: PunchDirection::Out,
///         source: PunchSource::Fingerprint,
///     },
/// ];
///
/// let day = classify_day(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     &punches,
///     &AttendanceRules::default(),
/// );
/// assert_eq!(day.status, DayStatus::Complete);
/// assert_eq!(day.regular_hours, Decimal::new(100, 2));
/// assert_eq!(day.night_hours, Decimal::new(50, 2));
/// ```
pub fn classify_day(
    employee_id: &str,
    date: NaiveDate,
    punches: &[RawPunch],
    rules: &AttendanceRules,
) -> DailyAttendance {
    let mut sorted: Vec<&RawPunch> = punches.iter().collect();
    sorted.sort_by_key(|p| p.timestamp);

    let clock_in = sorted
        .iter()
        .find(|p| p.direction == PunchDirection::In)
        .map(|p| p.timestamp);
    let clock_out = sorted
        .iter()
        .rev()
        .find(|p| p.direction == PunchDirection::Out)
        .map(|p| p.timestamp);

    let status = match (clock_in, clock_out) {
        (Some(entry), Some(exit)) if exit >= entry => DayStatus::Complete,
        (Some(_), Some(_)) => DayStatus::ExitBeforeEntry,
        (Some(_), None) => DayStatus::MissingExit,
        (None, Some(_)) => DayStatus::MissingEntry,
        (None, None) => DayStatus::NoPunches,
    };

    let hours = match (status, clock_in, clock_out) {
        (DayStatus::Complete, Some(entry), Some(exit)) => compute_hours(entry, exit, rules),
        _ => DayHours {
            regular: round_money(Decimal::ZERO),
            overtime: round_money(Decimal::ZERO),
            night: round_money(Decimal::ZERO),
        },
    };

    let reason = status.reason();
    if let Some(reason) = reason {
        debug!(
            employee_id = %employee_id,
            date = %date,
            reason = reason,
            "Attendance inconsistency detected"
        );
    }

    DailyAttendance {
        employee_id: employee_id.to_string(),
        date,
        clock_in,
        clock_out,
        regular_hours: hours.regular,
        overtime_hours: hours.overtime,
        night_hours: hours.night,
        status,
        has_inconsistency: reason.is_some(),
        inconsistency_reason: reason.map(str::to_string),
    }
}

/// Splits the elapsed time into regular and overtime, and counts night time.
///
/// Night hours overlap the other two buckets.
fn compute_hours(clock_in: NaiveDateTime, clock_out: NaiveDateTime, rules: &AttendanceRules) -> DayHours {
    let elapsed_millis = (clock_out - clock_in).num_milliseconds();
    let total_hours = Decimal::from(elapsed_millis) / Decimal::from(MILLIS_PER_HOUR);

    let regular = total_hours.min(rules.regular_hours_per_day);
    let overtime = (total_hours - rules.regular_hours_per_day).max(Decimal::ZERO);
    let night = Decimal::from(night_minutes(clock_in, clock_out, rules)) / Decimal::from(60);

    DayHours {
        regular: round_money(regular),
        overtime: round_money(overtime),
        night: round_money(night),
    }
}
