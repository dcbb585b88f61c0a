//! Accounting export: payroll provision journal entries.
//!
//! A run's totals are posted per cost center as a balanced journal entry in
//! the ERP's service-layer shape. Field names follow the ERP (PascalCase)
//! and amounts are serialized as JSON numbers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::round_money;
use crate::models::PayrollBreakdown;
use crate::payroll::EmployeeBreakdown;

/// Chart-of-accounts codes used by the provision entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMapping {
    /// Salary expense (debit, gross).
    pub salary_expense: String,
    /// Employee social security withheld (credit).
    pub isss_withholding: String,
    /// Employee pension withheld (credit).
    pub pension_withholding: String,
    /// Income tax withheld (credit).
    pub income_tax_withholding: String,
    /// Net salaries payable (credit).
    pub salaries_payable: String,
    /// Employer social security expense (debit).
    pub employer_isss_expense: String,
    /// Employer pension expense (debit).
    pub employer_pension_expense: String,
    /// Training levy expense (debit).
    pub training_levy_expense: String,
    /// Employer social security provision (credit).
    pub employer_isss_provision: String,
    /// Employer pension provision (credit).
    pub employer_pension_provision: String,
    /// Training levy provision (credit).
    pub training_levy_provision: String,
    /// Other deductions payable (credit).
    pub other_deductions_payable: String,
}

impl Default for AccountMapping {
    fn default() -> Self {
        Self {
            salary_expense: "5101".to_string(),
            isss_withholding: "2101".to_string(),
            pension_withholding: "2102".to_string(),
            income_tax_withholding: "2103".to_string(),
            salaries_payable: "2104".to_string(),
            employer_isss_expense: "5102".to_string(),
            employer_pension_expense: "5103".to_string(),
            training_levy_expense: "5104".to_string(),
            employer_isss_provision: "2105".to_string(),
            employer_pension_provision: "2106".to_string(),
            training_levy_provision: "2107".to_string(),
            other_deductions_payable: "2108".to_string(),
        }
    }
}

/// Amounts posted for one employee or one cost center.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Gross income.
    pub gross_salary: Decimal,
    /// Employee social security.
    pub employee_isss: Decimal,
    /// Employee pension.
    pub employee_pension: Decimal,
    /// Income tax withheld.
    pub income_tax: Decimal,
    /// Non-statutory deductions.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Net pay.
    pub net_salary: Decimal,
    /// Employer social security.
    pub employer_isss: Decimal,
    /// Employer pension.
    pub employer_pension: Decimal,
    /// Training levy.
    pub training_levy: Decimal,
    /// Cost center; empty when unassigned.
    #[serde(default)]
    pub cost_center: String,
}

impl PayrollTotals {
    /// Sets the cost center.
    pub fn with_cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.cost_center = cost_center.into();
        self
    }

    fn add(&mut self, other: &PayrollTotals) {
        self.gross_salary += other.gross_salary;
        self.employee_isss += other.employee_isss;
        self.employee_pension += other.employee_pension;
        self.income_tax += other.income_tax;
        self.other_deductions += other.other_deductions;
        self.net_salary += other.net_salary;
        self.employer_isss += other.employer_isss;
        self.employer_pension += other.employer_pension;
        self.training_levy += other.training_levy;
    }
}

impl From<&PayrollBreakdown> for PayrollTotals {
    fn from(breakdown: &PayrollBreakdown) -> Self {
        Self {
            gross_salary: breakdown.total_income,
            employee_isss: breakdown.employee_isss,
            employee_pension: breakdown.employee_pension,
            income_tax: breakdown.income_tax,
            other_deductions: breakdown.other_deductions,
            net_salary: breakdown.net_pay,
            employer_isss: breakdown.employer_contributions.employer_isss,
            employer_pension: breakdown.employer_contributions.employer_pension,
            training_levy: breakdown.employer_contributions.training_levy,
            cost_center: String::new(),
        }
    }
}

impl From<&EmployeeBreakdown> for PayrollTotals {
    fn from(record: &EmployeeBreakdown) -> Self {
        PayrollTotals::from(&record.breakdown).with_cost_center(record.cost_center.clone())
    }
}

/// One line of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JournalEntryLine {
    /// Account code.
    pub account_code: String,
    /// Debit amount.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub debit: Option<Decimal>,
    /// Credit amount.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub credit: Option<Decimal>,
    /// Cost center, on expense lines only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costing_code: Option<String>,
    /// Line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_memo: Option<String>,
}

impl JournalEntryLine {
    /// Posts `amount` as a debit; a negative amount posts its magnitude as a credit.
    fn debit(account: &str, amount: Decimal, costing_code: Option<&str>, memo: String) -> Self {
        let (debit, credit) = if amount.is_sign_negative() {
            (None, Some(-amount))
        } else {
            (Some(amount), None)
        };
        Self {
            account_code: account.to_string(),
            debit,
            credit,
            costing_code: costing_code.map(str::to_string),
            line_memo: Some(memo),
        }
    }

    /// Posts `amount` as a credit; a negative amount posts its magnitude as a debit.
    fn credit(account: &str, amount: Decimal, memo: String) -> Self {
        let (debit, credit) = if amount.is_sign_negative() {
            (Some(-amount), None)
        } else {
            (None, Some(amount))
        };
        Self {
            account_code: account.to_string(),
            debit,
            credit,
            costing_code: None,
            line_memo: Some(memo),
        }
    }
}

/// A journal entry in the ERP's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JournalEntry {
    /// Posting date.
    pub reference_date: NaiveDate,
    /// Entry description.
    pub memo: String,
    /// Entry reference.
    pub reference: String,
    /// Secondary reference: the payroll period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference2: Option<String>,
    /// Lines, grouped by cost center.
    pub journal_entry_lines: Vec<JournalEntryLine>,
}

/// Result of a balance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceCheck {
    /// True when debits equal credits.
    pub valid: bool,
    /// Debits minus credits, rounded to cents.
    pub difference: Decimal,
}

/// Builds the payroll provision entry for a period.
///
/// Totals are aggregated per cost center, in cost-center order. For each
/// center: the gross salary expense is debited; each non-zero withholding
/// and other deductions are credited; net salaries payable are credited; and
/// each non-zero employer contribution posts an expense debit with a matching
/// provision credit. A negative amount is posted on the opposite side, so the
/// entry balances for any breakdown. Expense lines carry the cost center.
///
/// # Arguments
///
/// * `period` - Period label, e.g. "2026-03"
/// * `totals` - Per-employee or per-center totals
/// * `reference` - Entry reference; defaults to `PAYROLL-{period}`
/// * `reference_date` - Posting date
/// * `mapping` - Account codes
pub fn generate_journal_entry(
    period: &str,
    totals: &[PayrollTotals],
    reference: Option<&str>,
    reference_date: NaiveDate,
    mapping: &AccountMapping,
) -> JournalEntry {
    let mut by_center: BTreeMap<&str, PayrollTotals> = BTreeMap::new();
    for item in totals {
        by_center
            .entry(item.cost_center.as_str())
            .or_insert_with(|| PayrollTotals::default().with_cost_center(item.cost_center.clone()))
            .add(item);
    }

    let mut lines = Vec::new();
    for (center, data) in &by_center {
        let costing_code = Some(*center).filter(|c| !c.is_empty());

        lines.push(JournalEntryLine::debit(
            &mapping.salary_expense,
            data.gross_salary,
            costing_code,
            format!("Salaries {}", period),
        ));

        let withholdings = [
            (&mapping.isss_withholding, data.employee_isss, "ISSS withheld"),
            (&mapping.pension_withholding, data.employee_pension, "AFP withheld"),
            (&mapping.income_tax_withholding, data.income_tax, "ISR withheld"),
            (&mapping.other_deductions_payable, data.other_deductions, "Other deductions"),
        ];
        for (account, amount, label) in withholdings {
            if !amount.is_zero() {
                lines.push(JournalEntryLine::credit(
                    account,
                    amount,
                    format!("{} {}", label, period),
                ));
            }
        }

        lines.push(JournalEntryLine::credit(
            &mapping.salaries_payable,
            data.net_salary,
            format!("Salaries payable {}", period),
        ));

        let employer = [
            (
                &mapping.employer_isss_expense,
                &mapping.employer_isss_provision,
                data.employer_isss,
                "Employer ISSS",
            ),
            (
                &mapping.employer_pension_expense,
                &mapping.employer_pension_provision,
                data.employer_pension,
                "Employer AFP",
            ),
            (
                &mapping.training_levy_expense,
                &mapping.training_levy_provision,
                data.training_levy,
                "INSAFORP",
            ),
        ];
        for (expense, provision, amount, label) in employer {
            if !amount.is_zero() {
                lines.push(JournalEntryLine::debit(
                    expense,
                    amount,
                    costing_code,
                    format!("{} {}", label, period),
                ));
                lines.push(JournalEntryLine::credit(
                    provision,
                    amount,
                    format!("{} provision {}", label, period),
                ));
            }
        }
    }

    debug!(
        period,
        cost_centers = by_center.len(),
        lines = lines.len(),
        "Generated journal entry"
    );

    JournalEntry {
        reference_date,
        memo: format!("Payroll provision {}", period),
        reference: reference
            .map(str::to_string)
            .unwrap_or_else(|| format!("PAYROLL-{}", period)),
        reference2: Some(period.to_string()),
        journal_entry_lines: lines,
    }
}

/// Checks that an entry's debits equal its credits.
pub fn validate_journal_entry(entry: &JournalEntry) -> BalanceCheck {
    let (debits, credits) = entry.journal_entry_lines.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(debits, credits), line| {
            (
                debits + line.debit.unwrap_or_default(),
                credits + line.credit.unwrap_or_default(),
            )
        },
    );

    let difference = round_money(debits - credits);
    BalanceCheck {
        valid: difference.is_zero(),
        difference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{BreakdownInput, assemble_breakdown};
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
    }

    fn totals_for(base: &str, other: &str, headcount: u32, center: &str) -> PayrollTotals {
        let rules = ConfigLoader::load("./config/sv").unwrap().into_rule_table();
        let input = BreakdownInput {
            other_deductions: dec(other),
            ..BreakdownInput::with_base_salary(dec(base))
        };
        let breakdown = assemble_breakdown(&input, headcount, &rules).unwrap();
        PayrollTotals::from(&breakdown).with_cost_center(center)
    }

    #[test]
    fn test_entry_for_single_center_balances() {
        let totals = vec![totals_for("1500.00", "0", 5, "ADM")];
        let entry =
            generate_journal_entry("2026-03", &totals, None, date(), &AccountMapping::default());

        assert_eq!(entry.reference, "PAYROLL-2026-03");
        assert_eq!(entry.reference2.as_deref(), Some("2026-03"));
        assert_eq!(entry.reference_date, date());

        let accounts: Vec<_> = entry
            .journal_entry_lines
            .iter()
            .map(|l| l.account_code.as_str())
            .collect();
        // No training levy with five employees
        assert_eq!(
            accounts,
            vec!["5101", "2101", "2102", "2103", "2104", "5102", "2105", "5103", "2106"]
        );

        let check = validate_journal_entry(&entry);
        assert!(check.valid);
        assert_eq!(check.difference, Decimal::ZERO);
    }

    #[test]
    fn test_centers_are_aggregated_in_order() {
        let totals = vec![
            totals_for("900.00", "0", 12, "SALES"),
            totals_for("1500.00", "0", 12, "ADM"),
            totals_for("1100.00", "0", 12, "SALES"),
        ];
        let entry =
            generate_journal_entry("2026-03", &totals, Some("RUN-7"), date(), &AccountMapping::default());

        assert_eq!(entry.reference, "RUN-7");

        let expense_lines: Vec<_> = entry
            .journal_entry_lines
            .iter()
            .filter(|l| l.account_code == "5101")
            .collect();
        assert_eq!(expense_lines.len(), 2);
        assert_eq!(expense_lines[0].costing_code.as_deref(), Some("ADM"));
        assert_eq!(expense_lines[1].costing_code.as_deref(), Some("SALES"));
        assert_eq!(expense_lines[1].debit, Some(dec("2000.00")));

        assert!(validate_journal_entry(&entry).valid);
    }

    #[test]
    fn test_other_deductions_keep_entry_balanced() {
        let totals = vec![totals_for("1000.00", "20.00", 12, "")];
        let entry =
            generate_journal_entry("2026-03", &totals, None, date(), &AccountMapping::default());

        let other = entry
            .journal_entry_lines
            .iter()
            .find(|l| l.account_code == "2108")
            .unwrap();
        assert_eq!(other.credit, Some(dec("20.00")));
        assert!(validate_journal_entry(&entry).valid);
    }

    #[test]
    fn test_negative_other_deductions_keep_entry_balanced() {
        let totals = vec![totals_for("800.00", "-10.00", 5, "OPS")];
        let entry =
            generate_journal_entry("2026-03", &totals, None, date(), &AccountMapping::default());

        let other = entry
            .journal_entry_lines
            .iter()
            .find(|l| l.account_code == "2108")
            .unwrap();
        assert_eq!(other.debit, Some(dec("10.00")));
        assert_eq!(other.credit, None);

        let check = validate_journal_entry(&entry);
        assert!(check.valid, "difference {}", check.difference);
    }

    #[test]
    fn test_negative_gross_keeps_entry_balanced() {
        let totals = vec![totals_for("-200.00", "0", 12, "OPS")];
        let entry =
            generate_journal_entry("2026-03", &totals, None, date(), &AccountMapping::default());

        let expense = &entry.journal_entry_lines[0];
        assert_eq!(expense.account_code, "5101");
        assert_eq!(expense.credit, Some(dec("200.00")));
        assert_eq!(expense.costing_code.as_deref(), Some("OPS"));
        assert!(
            entry
                .journal_entry_lines
                .iter()
                .all(|l| l.debit.is_none_or(|d| d >= Decimal::ZERO)
                    && l.credit.is_none_or(|c| c >= Decimal::ZERO))
        );
        assert!(validate_journal_entry(&entry).valid);
    }

    #[test]
    fn test_unassigned_center_has_no_costing_code() {
        let totals = vec![totals_for("1500.00", "0", 5, "")];
        let entry =
            generate_journal_entry("2026-03", &totals, None, date(), &AccountMapping::default());

        assert!(entry.journal_entry_lines.iter().all(|l| l.costing_code.is_none()));
    }

    #[test]
    fn test_unbalanced_entry_reports_difference() {
        let mut entry = generate_journal_entry(
            "2026-03",
            &[totals_for("1500.00", "0", 5, "ADM")],
            None,
            date(),
            &AccountMapping::default(),
        );
        entry.journal_entry_lines[0].debit = Some(dec("1500.10"));

        let check = validate_journal_entry(&entry);
        assert!(!check.valid);
        assert_eq!(check.difference, dec("0.10"));
    }

    #[test]
    fn test_serializes_with_erp_field_names() {
        let entry = generate_journal_entry(
            "2026-03",
            &[totals_for("1500.00", "0", 5, "ADM")],
            None,
            date(),
            &AccountMapping::default(),
        );
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["ReferenceDate"], "2026-03-31");
        assert_eq!(json["Reference2"], "2026-03");
        let first = &json["JournalEntryLines"][0];
        assert_eq!(first["AccountCode"], "5101");
        assert_eq!(first["Debit"], 1500.0);
        assert_eq!(first["CostingCode"], "ADM");
        assert!(first.get("Credit").is_none());
    }
}
