//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Attendance data-quality problems are deliberately absent here: defective
//! days are reported as flagged records, never as errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/regime.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/regime.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The rule table loaded but failed validation.
    #[error("Invalid rule table: {message}")]
    InvalidRuleTable {
        /// What made the table invalid.
        message: String,
    },

    /// No tax bracket covers the given gravable base.
    ///
    /// Only a malformed rule table can produce this; employee data never can.
    #[error("No tax bracket matches gravable base {gravable_base}")]
    NoMatchingBracket {
        /// The gravable base that fell outside every bracket.
        gravable_base: Decimal,
    },

    /// An amount left the range a decimal can represent.
    ///
    /// Only absurd input magnitudes produce this.
    #[error("Amount overflow computing {operation}")]
    AmountOverflow {
        /// The quantity being computed.
        operation: String,
    },

    /// The entitlement gate refused a mutating operation.
    #[error("Operation not permitted: {reason}")]
    EntitlementDenied {
        /// Why the operation was refused.
        reason: String,
    },
}

impl EngineError {
    /// Returns true for errors caused by the rule table rather than by input data.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
                | EngineError::InvalidRuleTable { .. }
                | EngineError::NoMatchingBracket { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_no_matching_bracket_displays_base() {
        let error = EngineError::NoMatchingBracket {
            gravable_base: Decimal::from_str("5000.00").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "No tax bracket matches gravable base 5000.00"
        );
    }

    #[test]
    fn test_entitlement_denied_displays_reason() {
        let error = EngineError::EntitlementDenied {
            reason: "license expired".to_string(),
        };
        assert_eq!(error.to_string(), "Operation not permitted: license expired");
    }

    #[test]
    fn test_configuration_errors_are_classified() {
        assert!(
            EngineError::NoMatchingBracket {
                gravable_base: Decimal::ZERO
            }
            .is_configuration_error()
        );
        assert!(
            EngineError::InvalidRuleTable {
                message: "gap".to_string()
            }
            .is_configuration_error()
        );
        assert!(
            !EngineError::EntitlementDenied {
                reason: "limit".to_string()
            }
            .is_configuration_error()
        );
        assert!(
            !EngineError::AmountOverflow {
                operation: "net pay".to_string()
            }
            .is_configuration_error()
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_table() -> EngineResult<()> {
            Err(EngineError::InvalidRuleTable {
                message: "no brackets".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_table()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
