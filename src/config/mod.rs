//! Configuration loading and management for the payroll engine.
//!
//! This module loads the statutory rule table (withholding rates, caps,
//! progressive tax brackets, premiums and attendance thresholds) from YAML
//! files and validates it once, up front.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/sv").unwrap();
//! println!("Loaded regime: {}", config.regime().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceRules, ContributionsConfig, EmployeeRates, EmployerRates, PremiumsConfig,
    RegimeMetadata, RuleTable, TaxBracket, TaxBracketsConfig,
};
