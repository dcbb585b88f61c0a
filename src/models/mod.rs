//! Core data models for the payroll engine.
//!
//! This module contains the value objects exchanged with callers: raw
//! punches in, attendance records and payroll breakdowns out.

mod attendance;
mod breakdown;
mod punch;

pub use attendance::{AttendanceSummary, DailyAttendance, DayStatus, Inconsistency};
pub use breakdown::{EmployerContributions, PayrollBreakdown};
pub use punch::{PunchDirection, PunchSource, RawPunch};
