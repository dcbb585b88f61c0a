//! Salary calculation logic for the payroll engine.
//!
//! This module contains the pure functions that turn a gross salary into
//! statutory withholdings, a gravable base, progressive income tax and
//! employer contributions, plus the overtime and night premiums derived from
//! attendance hours, and the assembly of all of them into one breakdown.
//! Every function borrows an immutable [`crate::config::RuleTable`].

mod breakdown;
mod employer;
mod premiums;
mod progressive_tax;
mod rounding;
mod withholding;

pub use breakdown::{BreakdownInput, assemble_breakdown};
pub use employer::compute_employer_contributions;
pub use premiums::{compute_night_premium, compute_overtime_pay, hourly_rate};
pub use progressive_tax::{BracketInfo, compute_progressive_tax, describe_bracket};
pub use rounding::round_money;
pub use withholding::{
    compute_employee_withholding, compute_gravable_base, compute_pension_withholding,
};
