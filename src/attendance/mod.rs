//! Attendance processing for the payroll engine.
//!
//! Turns a closed batch of raw clock events into per employee-day records
//! with regular, overtime and night hours, and summarizes those records over
//! a pay period. Defective days (unpaired punches) are never errors: they are
//! returned as flagged records so the whole batch can be reviewed.

mod classify;
mod grouping;
mod night;
mod summary;

pub use classify::classify_day;
pub use grouping::{DayKey, group_by_employee_day};
pub use night::night_minutes;
pub use summary::{process_punches, summarize};
