//! Grouping raw punches into employee-days.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::RawPunch;

/// Key of an employee-day bucket.
pub type DayKey = (String, NaiveDate);

/// Groups punches by employee and calendar date of their timestamp.
///
/// Buckets are keyed solely by the punch's date, not by shift: a shift that
/// crosses midnight lands in two buckets. Each bucket is sorted by timestamp
/// ascending, and buckets iterate in employee-id then date order.
///
/// # Example
///
/// ```
/// use payroll_engine::attendance::group_by_employee_day;
/// use payroll_engine::models::{PunchDirection, PunchSource, RawPunch};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punch = |ts: &str, direction| RawPunch {
///     employee_id: "emp_001".to_string(),
///     timestamp: at(ts),
///     direction,
///     source: PunchSource::Fingerprint,
/// };
///
/// let groups = group_by_employee_day(&[
///     punch("2026-03-02 17:00:00", PunchDirection::Out),
///     punch("2026-03-02 08:00:00", PunchDirection::In),
///     punch("2026-03-03 08:00:00", PunchDirection::In),
/// ]);
/// assert_eq!(groups.len(), 2);
/// ```
pub fn group_by_employee_day(punches: &[RawPunch]) -> BTreeMap<DayKey, Vec<RawPunch>> {
    let mut grouped: BTreeMap<DayKey, Vec<RawPunch>> = BTreeMap::new();

    for punch in punches {
        grouped
            .entry((punch.employee_id.clone(), punch.date()))
            .or_default()
            .push(punch.clone());
    }

    for day_punches in grouped.values_mut() {
        day_punches.sort_by_key(|p| p.timestamp);
    }

    grouped
}
