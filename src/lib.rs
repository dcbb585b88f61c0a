//! Payroll and attendance engine for the El Salvador statutory regime.
//!
//! This crate computes per-employee payroll breakdowns (statutory
//! withholdings, progressive income tax, premiums and employer
//! contributions) from a versioned rule table, and turns raw clock events
//! into daily attendance records and period summaries.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::calculation::{BreakdownInput, assemble_breakdown};
//! use payroll_engine::config::ConfigLoader;
//! use rust_decimal::Decimal;
//!
//! let rules = ConfigLoader::load("./config/sv")?.into_rule_table();
//! let input = BreakdownInput::with_base_salary(Decimal::new(150000, 2));
//! let breakdown = assemble_breakdown(&input, 5, &rules)?;
//! assert_eq!(breakdown.net_pay, Decimal::new(120805, 2));
//! # Ok::<(), payroll_engine::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod attendance;
pub mod calculation;
pub mod config;
pub mod entitlement;
pub mod error;
pub mod ledger;
pub mod models;
pub mod payroll;
