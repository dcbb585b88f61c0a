//! Response types for the payroll engine API.
//!
//! This module defines the success payloads and the error response
//! structures returned by the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::ledger::{BalanceCheck, JournalEntry};
use crate::models::{AttendanceSummary, DailyAttendance, PayrollBreakdown};

/// Response body for `POST /breakdown`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Rule table the result was computed under.
    pub regime: String,
    /// The employee.
    pub employee_id: String,
    /// The computed breakdown.
    #[serde(flatten)]
    pub breakdown: PayrollBreakdown,
}

/// Response body for `POST /attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceResponse {
    /// One record per employee-day in the batch.
    pub days: Vec<DailyAttendance>,
    /// The requested employee's period summary.
    pub summary: AttendanceSummary,
}

/// Response body for `POST /journal-entry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryResponse {
    /// The generated entry, in the ERP's field names.
    pub entry: JournalEntry,
    /// Balance check of `entry`.
    pub validation: BalanceCheck,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidRuleTable { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::NoMatchingBracket { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    message,
                    "The tax bracket table does not cover this amount",
                ),
            },
            EngineError::AmountOverflow { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "AMOUNT_OUT_OF_RANGE",
                    message,
                    "Request amounts are too large to compute",
                ),
            },
            EngineError::EntitlementDenied { reason } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("ENTITLEMENT_DENIED", reason),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::InvalidRuleTable {
            message: "no brackets".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
        assert!(api_error.error.details.unwrap().contains("no brackets"));

        let api_error: ApiErrorResponse = EngineError::NoMatchingBracket {
            gravable_base: Decimal::new(-1, 2),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_amount_overflow_is_a_bad_request() {
        let api_error: ApiErrorResponse = EngineError::AmountOverflow {
            operation: "overtime pay".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "AMOUNT_OUT_OF_RANGE");
        assert!(api_error.error.message.contains("overtime pay"));
    }

    #[test]
    fn test_entitlement_denial_is_forbidden() {
        let api_error: ApiErrorResponse = EngineError::EntitlementDenied {
            reason: "No active license".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::FORBIDDEN);
        assert_eq!(api_error.error.code, "ENTITLEMENT_DENIED");
        assert_eq!(api_error.error.message, "No active license");
    }
}
