//! License entitlement gate.
//!
//! Decides whether mutating operations (adding employees, editing data) are
//! allowed under the current license. The gate is consulted by callers
//! before they request a breakdown for a new employee; the calculators never
//! consult it themselves. Time is always supplied by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Days ahead of expiry at which the validation message turns into a warning.
const EXPIRY_WARNING_DAYS: i64 = 7;

/// Administrative state of a license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseStatus {
    /// In good standing.
    Active,
    /// Marked expired by the issuer.
    Expired,
    /// Suspended by the issuer.
    Suspended,
}

impl LicenseStatus {
    fn label(&self) -> &'static str {
        match self {
            LicenseStatus::Active => "active",
            LicenseStatus::Expired => "expired",
            LicenseStatus::Suspended => "suspended",
        }
    }
}

/// A company license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// License identifier.
    pub id: String,
    /// Licensed company.
    pub company_name: String,
    /// Company tax identification number (NIT).
    pub company_nit: String,
    /// Maximum number of active employees.
    pub employee_limit: u32,
    /// Instant after which the license is expired.
    pub expiration_date: DateTime<Utc>,
    /// Administrative state.
    pub status: LicenseStatus,
    /// Commercial plan name.
    pub plan_name: String,
}

/// Outcome of an entitlement check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Entitlement {
    /// The operation may proceed.
    Allowed,
    /// The operation is refused.
    Denied {
        /// Why.
        reason: String,
    },
}

impl Entitlement {
    /// Returns true if the operation may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Entitlement::Allowed)
    }
}

/// Full license state for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseValidation {
    /// Active and not past its expiration.
    pub is_valid: bool,
    /// Valid and under the employee limit.
    pub can_add_employees: bool,
    /// Same as `is_valid`.
    pub can_edit_data: bool,
    /// Inverse of `is_valid`.
    pub is_read_only: bool,
    /// Status line for the user.
    pub message: String,
    /// Whole days until expiration, rounded up, never negative.
    pub days_until_expiration: i64,
    /// Active employees counted against the license.
    pub employees_used: u32,
    /// Employees that may still be added.
    pub employees_remaining: u32,
}

/// Checks operations against a license and the current employee count.
#[derive(Debug, Clone)]
pub struct EntitlementGate {
    license: Option<License>,
    employee_count: u32,
}

impl EntitlementGate {
    /// Creates a gate for an optional license and the active employee count.
    pub fn new(license: Option<License>, employee_count: u32) -> Self {
        Self {
            license,
            employee_count,
        }
    }

    /// Returns the license, if any.
    pub fn license(&self) -> Option<&License> {
        self.license.as_ref()
    }

    /// Decides whether a new employee may be created.
    ///
    /// Checks, in order: a license exists, it has not expired, its status is
    /// active, and the employee count is under its limit.
    pub fn can_create_employee(&self, now: DateTime<Utc>) -> Entitlement {
        let Some(license) = &self.license else {
            return denied("No active license");
        };

        if now > license.expiration_date {
            return denied("License has expired. Historical data is read-only.");
        }

        if license.status != LicenseStatus::Active {
            return denied(format!(
                "License {}. Contact support.",
                license.status.label()
            ));
        }

        if self.employee_count >= license.employee_limit {
            return denied(format!(
                "Employee limit reached: {} employees. Upgrade your plan.",
                license.employee_limit
            ));
        }

        Entitlement::Allowed
    }

    /// Returns true when data may only be read.
    pub fn is_read_only(&self, now: DateTime<Utc>) -> bool {
        match &self.license {
            None => true,
            Some(license) => !is_active(license, now),
        }
    }

    /// Builds the full license state for display.
    pub fn validation(&self, now: DateTime<Utc>) -> LicenseValidation {
        let Some(license) = &self.license else {
            return LicenseValidation {
                is_valid: false,
                can_add_employees: false,
                can_edit_data: false,
                is_read_only: true,
                message: "No active license".to_string(),
                days_until_expiration: 0,
                employees_used: 0,
                employees_remaining: 0,
            };
        };

        let days_until = ceil_days((license.expiration_date - now).num_milliseconds());
        let is_valid = is_active(license, now);
        let under_limit = self.employee_count < license.employee_limit;

        let message = if now > license.expiration_date {
            let days_since = ceil_days((now - license.expiration_date).num_milliseconds());
            format!("License expired {} days ago", days_since)
        } else if license.status != LicenseStatus::Active {
            format!("License {}", license.status.label())
        } else if days_until <= EXPIRY_WARNING_DAYS {
            format!("Warning: license expires in {} days", days_until)
        } else if !under_limit {
            format!("Employee limit of {} reached", license.employee_limit)
        } else {
            format!("License active - {}", license.plan_name)
        };

        LicenseValidation {
            is_valid,
            can_add_employees: is_valid && under_limit,
            can_edit_data: is_valid,
            is_read_only: !is_valid,
            message,
            days_until_expiration: days_until.max(0),
            employees_used: self.employee_count,
            employees_remaining: license.employee_limit.saturating_sub(self.employee_count),
        }
    }

    /// Fails with [`EngineError::EntitlementDenied`] unless an employee may be created.
    pub fn assert_can_create_employee(&self, now: DateTime<Utc>) -> EngineResult<()> {
        match self.can_create_employee(now) {
            Entitlement::Allowed => Ok(()),
            Entitlement::Denied { reason } => Err(EngineError::EntitlementDenied { reason }),
        }
    }

    /// Fails with [`EngineError::EntitlementDenied`] when data is read-only.
    pub fn assert_not_read_only(&self, now: DateTime<Utc>) -> EngineResult<()> {
        if self.is_read_only(now) {
            return Err(EngineError::EntitlementDenied {
                reason: "System is read-only. Renew your license to continue.".to_string(),
            });
        }
        Ok(())
    }
}

fn denied(reason: impl Into<String>) -> Entitlement {
    Entitlement::Denied {
        reason: reason.into(),
    }
}

fn is_active(license: &License, now: DateTime<Utc>) -> bool {
    license.status == LicenseStatus::Active && now <= license.expiration_date
}

fn ceil_days(millis: i64) -> i64 {
    let whole = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        whole
    } else {
        whole + 1
    }
}
