//! Configuration types for the payroll regime.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`RuleTable`] that every calculation reads from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The smallest monetary step between adjacent brackets.
const ONE_CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Metadata about the statutory regime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeMetadata {
    /// Short identifier of the regime (e.g., "SV-2024").
    pub code: String,
    /// The human-readable name of the regime.
    pub name: String,
    /// The version or effective date of the tables.
    pub version: String,
    /// URL to the official publication.
    pub source_url: String,
}

/// Withholding percentages deducted from the employee's pay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRates {
    /// Social security (ISSS) rate, applied up to the withholding cap.
    pub isss_rate: Decimal,
    /// Pension (AFP) rate, uncapped.
    pub pension_rate: Decimal,
}

/// Contribution percentages paid by the employer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerRates {
    /// Social security (ISSS) rate, applied up to the withholding cap.
    pub isss_rate: Decimal,
    /// Pension (AFP) rate, uncapped.
    pub pension_rate: Decimal,
    /// Training-fund levy (INSAFORP) rate.
    pub training_levy_rate: Decimal,
}

/// Contributions configuration from contributions.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionsConfig {
    /// Salary ceiling for the capped (ISSS) contributions.
    pub withholding_cap: Decimal,
    /// Employee-side withholding rates.
    pub employee: EmployeeRates,
    /// Employer-side contribution rates.
    pub employer: EmployerRates,
    /// The training levy applies only when headcount exceeds this value.
    pub training_levy_min_headcount: u32,
}

/// A single progressive income tax bracket.
///
/// Brackets are closed intervals `[lower_bound, upper_bound]`; the last
/// bracket has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The inclusive lower bound.
    pub lower_bound: Decimal,
    /// The inclusive upper bound, `None` for the open-ended top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate applied over the excess base.
    pub rate: Decimal,
    /// Fixed amount owed on entering the bracket.
    pub fixed_quota: Decimal,
    /// The amount the marginal rate is measured from.
    pub excess_base: Decimal,
}

impl TaxBracket {
    /// Returns true when the bracket carries no tax.
    pub fn is_exempt(&self) -> bool {
        self.rate.is_zero()
    }
}

/// Tax bracket file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracketsConfig {
    /// Brackets in ascending order.
    pub brackets: Vec<TaxBracket>,
}

/// Thresholds used when classifying a day of attendance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRules {
    /// Hours per day counted as regular time; the remainder is overtime.
    pub regular_hours_per_day: Decimal,
    /// Hour of day the night window opens (inclusive).
    pub night_start_hour: u32,
    /// Hour of day the night window closes (exclusive), on the following morning.
    pub night_end_hour: u32,
}

impl Default for AttendanceRules {
    fn default() -> Self {
        Self {
            regular_hours_per_day: Decimal::new(8, 0),
            night_start_hour: 19,
            night_end_hour: 6,
        }
    }
}

/// Premium configuration from premiums.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumsConfig {
    /// Multiplier applied to the hourly rate for overtime hours.
    pub overtime_multiplier: Decimal,
    /// Additive premium on the hourly rate for night hours.
    pub night_premium_rate: Decimal,
    /// Days in a standard pay period, used to derive the hourly rate.
    pub standard_days_per_period: u32,
    /// Hours in a standard working day, used to derive the hourly rate.
    pub standard_hours_per_day: u32,
    /// Attendance classification thresholds.
    #[serde(default)]
    pub attendance: AttendanceRules,
}

/// The complete, validated rule table.
///
/// Immutable after construction and safe to share across threads; every
/// calculation in the crate borrows one.
#[derive(Debug, Clone)]
pub struct RuleTable {
    metadata: RegimeMetadata,
    contributions: ContributionsConfig,
    brackets: Vec<TaxBracket>,
    premiums: PremiumsConfig,
}

impl RuleTable {
    /// Creates a rule table from its component parts, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRuleTable`] when the brackets are empty,
    /// overlapping, leave a gap wider than one cent, or do not end with an
    /// unbounded bracket, or when a rate or threshold is out of range.
    pub fn new(
        metadata: RegimeMetadata,
        contributions: ContributionsConfig,
        brackets: Vec<TaxBracket>,
        premiums: PremiumsConfig,
    ) -> EngineResult<Self> {
        validate_brackets(&brackets)?;
        validate_contributions(&contributions)?;
        validate_premiums(&premiums)?;

        Ok(Self {
            metadata,
            contributions,
            brackets,
            premiums,
        })
    }

    /// Returns the regime metadata.
    pub fn metadata(&self) -> &RegimeMetadata {
        &self.metadata
    }

    /// Returns the contribution rates and cap.
    pub fn contributions(&self) -> &ContributionsConfig {
        &self.contributions
    }

    /// Returns the tax brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the premium configuration.
    pub fn premiums(&self) -> &PremiumsConfig {
        &self.premiums
    }

    /// Returns the attendance classification thresholds.
    pub fn attendance(&self) -> &AttendanceRules {
        &self.premiums.attendance
    }

    /// Finds the bracket covering a gravable base.
    ///
    /// Returns the zero-based index of the first bracket whose upper bound is
    /// at or above `base`. A value equal to a bracket's upper bound therefore
    /// belongs to that bracket, a value inside the sub-cent gap before the
    /// next lower bound belongs to the next bracket, and anything below the
    /// first lower bound belongs to the first bracket.
    pub fn find_bracket(&self, base: Decimal) -> Option<(usize, &TaxBracket)> {
        self.brackets
            .iter()
            .enumerate()
            .find(|(_, b)| b.upper_bound.is_none_or(|upper| base <= upper))
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidRuleTable {
        message: message.into(),
    }
}

fn validate_rate(name: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid(format!("{} must be between 0 and 1, got {}", name, rate)));
    }
    Ok(())
}

fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    let first = brackets
        .first()
        .ok_or_else(|| invalid("at least one tax bracket is required"))?;

    if first.lower_bound > ONE_CENT {
        return Err(invalid(format!(
            "first bracket must start at or below {}, starts at {}",
            ONE_CENT, first.lower_bound
        )));
    }

    if !first.is_exempt() {
        return Err(invalid(format!(
            "first bracket must be exempt, has rate {}",
            first.rate
        )));
    }

    for (index, bracket) in brackets.iter().enumerate() {
        validate_rate(&format!("bracket {} rate", index + 1), bracket.rate)?;

        if let Some(upper) = bracket.upper_bound.filter(|u| *u < bracket.lower_bound) {
            return Err(invalid(format!(
                "bracket {} upper bound {} is below its lower bound {}",
                index + 1,
                upper,
                bracket.lower_bound
            )));
        }
    }

    for (index, pair) in brackets.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        let upper = current.upper_bound.ok_or_else(|| {
            invalid(format!(
                "only the last bracket may be unbounded, bracket {} is not last",
                index + 1
            ))
        })?;

        if next.lower_bound <= upper {
            return Err(invalid(format!(
                "bracket {} overlaps bracket {} at {}",
                index + 2,
                index + 1,
                next.lower_bound
            )));
        }
        if next.lower_bound - upper > ONE_CENT {
            return Err(invalid(format!(
                "gap between {} and {} leaves gravable bases uncovered",
                upper, next.lower_bound
            )));
        }
    }

    // Exhaustive coverage of [0, +inf) needs an open-ended top bracket.
    if brackets.last().is_some_and(|b| b.upper_bound.is_some()) {
        return Err(invalid("last tax bracket must have no upper bound"));
    }

    Ok(())
}

fn validate_contributions(contributions: &ContributionsConfig) -> EngineResult<()> {
    if contributions.withholding_cap < Decimal::ZERO {
        return Err(invalid("withholding cap cannot be negative"));
    }
    validate_rate("employee ISSS rate", contributions.employee.isss_rate)?;
    validate_rate("employee pension rate", contributions.employee.pension_rate)?;
    validate_rate("employer ISSS rate", contributions.employer.isss_rate)?;
    validate_rate("employer pension rate", contributions.employer.pension_rate)?;
    validate_rate(
        "training levy rate",
        contributions.employer.training_levy_rate,
    )
}

fn validate_premiums(premiums: &PremiumsConfig) -> EngineResult<()> {
    if premiums.overtime_multiplier < Decimal::ZERO {
        return Err(invalid("overtime multiplier cannot be negative"));
    }
    if premiums.night_premium_rate < Decimal::ZERO {
        return Err(invalid("night premium rate cannot be negative"));
    }
    if premiums.standard_days_per_period == 0 || premiums.standard_hours_per_day == 0 {
        return Err(invalid("standard period must have at least one day and one hour"));
    }

    let attendance = &premiums.attendance;
    if attendance.regular_hours_per_day <= Decimal::ZERO {
        return Err(invalid("regular hours per day must be positive"));
    }
    if !(1..=23).contains(&attendance.night_start_hour) {
        return Err(invalid(format!(
            "night window must open between 01:00 and 23:00, got {}:00",
            attendance.night_start_hour
        )));
    }
    if attendance.night_end_hour >= attendance.night_start_hour {
        return Err(invalid("night window must close on the following morning"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(lower: &str, upper: Option<&str>, rate: &str) -> TaxBracket {
        TaxBracket {
            lower_bound: dec(lower),
            upper_bound: upper.map(dec),
            rate: dec(rate),
            fixed_quota: Decimal::ZERO,
            excess_base: Decimal::ZERO,
        }
    }

    fn metadata() -> RegimeMetadata {
        RegimeMetadata {
            code: "TEST".to_string(),
            name: "Test regime".to_string(),
            version: "1".to_string(),
            source_url: "https://example.test".to_string(),
        }
    }

    fn contributions() -> ContributionsConfig {
        ContributionsConfig {
            withholding_cap: dec("1000.00"),
            employee: EmployeeRates {
                isss_rate: dec("0.03"),
                pension_rate: dec("0.0725"),
            },
            employer: EmployerRates {
                isss_rate: dec("0.075"),
                pension_rate: dec("0.0875"),
                training_levy_rate: dec("0.01"),
            },
            training_levy_min_headcount: 10,
        }
    }

    fn premiums() -> PremiumsConfig {
        PremiumsConfig {
            overtime_multiplier: dec("2"),
            night_premium_rate: dec("0.25"),
            standard_days_per_period: 30,
            standard_hours_per_day: 8,
            attendance: AttendanceRules::default(),
        }
    }

    fn table(brackets: Vec<TaxBracket>) -> EngineResult<RuleTable> {
        RuleTable::new(metadata(), contributions(), brackets, premiums())
    }

    fn valid_brackets() -> Vec<TaxBracket> {
        vec![
            bracket("0.01", Some("472.00"), "0"),
            bracket("472.01", Some("895.24"), "0.10"),
            bracket("895.25", None, "0.20"),
        ]
    }

    fn expect_invalid(result: EngineResult<RuleTable>, fragment: &str) {
        match result {
            Err(EngineError::InvalidRuleTable { message }) => {
                assert!(
                    message.contains(fragment),
                    "expected '{}' in '{}'",
                    fragment,
                    message
                );
            }
            other => panic!("Expected InvalidRuleTable, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_valid_table_is_accepted() {
        assert!(table(valid_brackets()).is_ok());
    }

    #[test]
    fn test_empty_brackets_rejected() {
        expect_invalid(table(vec![]), "at least one");
    }

    #[test]
    fn test_bounded_last_bracket_rejected() {
        let mut brackets = valid_brackets();
        brackets[2].upper_bound = Some(dec("5000.00"));
        expect_invalid(table(brackets), "last tax bracket");
    }

    #[test]
    fn test_unbounded_middle_bracket_rejected() {
        let mut brackets = valid_brackets();
        brackets[1].upper_bound = None;
        expect_invalid(table(brackets), "only the last bracket");
    }

    #[test]
    fn test_overlapping_brackets_rejected() {
        let mut brackets = valid_brackets();
        brackets[1].lower_bound = dec("472.00");
        expect_invalid(table(brackets), "overlaps");
    }

    #[test]
    fn test_gap_wider_than_a_cent_rejected() {
        let mut brackets = valid_brackets();
        brackets[1].lower_bound = dec("480.00");
        expect_invalid(table(brackets), "gap");
    }

    #[test]
    fn test_first_bracket_must_start_at_zero() {
        let mut brackets = valid_brackets();
        brackets[0].lower_bound = dec("100.00");
        expect_invalid(table(brackets), "first bracket");
    }

    #[test]
    fn test_taxed_first_bracket_rejected() {
        let mut brackets = valid_brackets();
        brackets[0].rate = dec("0.05");
        expect_invalid(table(brackets), "first bracket must be exempt");
    }

    #[test]
    fn test_rate_above_one_rejected() {
        let mut brackets = valid_brackets();
        brackets[2].rate = dec("1.5");
        expect_invalid(table(brackets), "bracket 3 rate");
    }

    #[test]
    fn test_night_window_must_wrap_midnight() {
        let mut premiums = premiums();
        premiums.attendance.night_end_hour = 20;
        let result = RuleTable::new(metadata(), contributions(), valid_brackets(), premiums);
        expect_invalid(result, "following morning");
    }

    #[test]
    fn test_find_bracket_upper_bound_belongs_to_lower_bracket() {
        let rules = table(valid_brackets()).unwrap();
        assert_eq!(rules.find_bracket(dec("472.00")).map(|(i, _)| i), Some(0));
        assert_eq!(rules.find_bracket(dec("472.01")).map(|(i, _)| i), Some(1));
    }

    #[test]
    fn test_find_bracket_sub_cent_gap_goes_to_next_bracket() {
        let rules = table(valid_brackets()).unwrap();
        assert_eq!(rules.find_bracket(dec("472.005")).map(|(i, _)| i), Some(1));
    }

    #[test]
    fn test_find_bracket_below_first_lower_bound() {
        let rules = table(valid_brackets()).unwrap();
        assert_eq!(rules.find_bracket(Decimal::ZERO).map(|(i, _)| i), Some(0));
        assert_eq!(rules.find_bracket(dec("-50")).map(|(i, _)| i), Some(0));
    }

    #[test]
    fn test_find_bracket_top_bracket_is_open_ended() {
        let rules = table(valid_brackets()).unwrap();
        assert_eq!(
            rules.find_bracket(dec("99999999.99")).map(|(i, _)| i),
            Some(2)
        );
    }
}
