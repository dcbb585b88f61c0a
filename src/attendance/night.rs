//! Night-window accumulation.
//!
//! A minute counts as night time when the wall-clock hour at which it starts
//! falls in the night window (by default `[19:00, 24:00) ∪ [00:00, 06:00)`).
//! Minutes are stepped from clock-in, so the count is the number of instants
//! `clock_in + k minutes` strictly before clock-out that land in the window.
//! The count is computed as interval overlap per calendar day rather than by
//! stepping through every minute.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::config::AttendanceRules;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Counts the minute-steps between `clock_in` and `clock_out` that start
/// inside the night window.
///
/// Returns zero when `clock_out <= clock_in`.
///
/// # Example
///
/// ```
/// use payroll_engine::attendance::night_minutes;
/// use payroll_engine::config::AttendanceRules;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let minutes = night_minutes(
///     at("2026-03-02 18:30:00"),
///     at("2026-03-02 19:30:00"),
///     &AttendanceRules::default(),
/// );
/// assert_eq!(minutes, 30);
/// ```
pub fn night_minutes(
    clock_in: NaiveDateTime,
    clock_out: NaiveDateTime,
    rules: &AttendanceRules,
) -> i64 {
    if clock_out <= clock_in {
        return 0;
    }

    let mut total = 0;
    let mut day = clock_in.date();
    let last_day = clock_out.date();

    while day <= last_day {
        let midnight = day.and_time(NaiveTime::MIN);
        let morning_end = midnight + Duration::hours(i64::from(rules.night_end_hour));
        let evening_start = midnight + Duration::hours(i64::from(rules.night_start_hour));
        let next_midnight = midnight + Duration::days(1);

        total += steps_within(clock_in, clock_out, midnight, morning_end);
        total += steps_within(clock_in, clock_out, evening_start, next_midnight);

        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    total
}

/// Number of `k >= 0` with `clock_in + k min` in `[start, end)` and before `clock_out`.
fn steps_within(
    clock_in: NaiveDateTime,
    clock_out: NaiveDateTime,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> i64 {
    let from = start.max(clock_in);
    let to = end.min(clock_out);
    if to <= from {
        return 0;
    }

    let first = ceil_minutes((from - clock_in).num_milliseconds());
    let past_last = ceil_minutes((to - clock_in).num_milliseconds());
    past_last - first
}

fn ceil_minutes(millis: i64) -> i64 {
    (millis + MILLIS_PER_MINUTE - 1).div_euclid(MILLIS_PER_MINUTE)
}
