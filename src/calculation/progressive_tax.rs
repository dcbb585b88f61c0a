//! Progressive income tax (ISR) calculation.
//!
//! The tax is read from an ordered bracket table: the zero-rate bracket owes
//! nothing, every other bracket owes its fixed quota plus its marginal rate
//! on the amount above its excess base.
//!
//! # Boundary membership
//!
//! Brackets are published as closed intervals whose bounds differ by one
//! cent. A gravable base equal to a bracket's upper bound belongs to that
//! bracket. Real-valued bases falling strictly between one bracket's upper
//! bound and the next bracket's lower bound belong to the next bracket, so
//! every value matches exactly one bracket and the lowest index wins.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{RuleTable, TaxBracket};
use crate::error::{EngineError, EngineResult};

use super::rounding::round_money;

/// Identification of the bracket a gravable base falls in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketInfo {
    /// 1-based bracket number.
    pub bracket: usize,
    /// Human-readable description of how the bracket taxes.
    pub description: String,
}

fn matching_bracket(gravable_base: Decimal, rules: &RuleTable) -> EngineResult<(usize, &TaxBracket)> {
    rules
        .find_bracket(gravable_base)
        .ok_or(EngineError::NoMatchingBracket { gravable_base })
}

/// Computes the progressive income tax for a gravable base.
///
/// # Errors
///
/// Returns [`EngineError::NoMatchingBracket`] if the table does not cover the
/// base. A [`RuleTable`] that passed validation always ends with an
/// open-ended bracket, so this only happens with a malformed table.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::calculation::compute_progressive_tax;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/sv").unwrap();
/// let tax = compute_progressive_tax(Decimal::from_str("1361.25").unwrap(), loader.rule_table()).unwrap();
/// // 60.00 + (1361.25 - 895.24) * 0.20
/// assert_eq!(tax, Decimal::from_str("153.20").unwrap());
/// ```
pub fn compute_progressive_tax(gravable_base: Decimal, rules: &RuleTable) -> EngineResult<Decimal> {
    let (_, bracket) = matching_bracket(gravable_base, rules)?;

    if bracket.is_exempt() {
        return Ok(round_money(Decimal::ZERO));
    }

    let excess = gravable_base - bracket.excess_base;
    Ok(round_money(bracket.fixed_quota + excess * bracket.rate))
}

/// Describes the bracket a gravable base falls in.
///
/// # Errors
///
/// Returns [`EngineError::NoMatchingBracket`] under the same conditions as
/// [`compute_progressive_tax`].
pub fn describe_bracket(gravable_base: Decimal, rules: &RuleTable) -> EngineResult<BracketInfo> {
    let (index, bracket) = matching_bracket(gravable_base, rules)?;

    let description = if bracket.is_exempt() {
        "Exempt".to_string()
    } else {
        format!(
            "{}% over excess of ${}",
            (bracket.rate * Decimal::ONE_HUNDRED).normalize(),
            bracket.excess_base
        )
    };

    Ok(BracketInfo {
        bracket: index + 1,
        description,
    })
}
