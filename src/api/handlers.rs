//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::attendance::{process_punches, summarize};
use crate::calculation::{BreakdownInput, assemble_breakdown};
use crate::ledger::{AccountMapping, generate_journal_entry, validate_journal_entry};

use super::request::{AttendanceRequest, BreakdownRequest, JournalEntryRequest};
use super::response::{
    ApiError, ApiErrorResponse, AttendanceResponse, BreakdownResponse, JournalEntryResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/breakdown", post(breakdown_handler))
        .route("/attendance", post(attendance_handler))
        .route("/journal-entry", post(journal_entry_handler))
        .with_state(state)
}

/// Handler for POST /breakdown.
///
/// Computes one employee's payroll breakdown for a period.
async fn breakdown_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakdownRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing breakdown request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let rules = state.rules();
    let start_time = Instant::now();
    let input = BreakdownInput::from(&request);

    match assemble_breakdown(&input, request.headcount, rules) {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                total_income = %breakdown.total_income,
                net_pay = %breakdown.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Breakdown completed successfully"
            );
            json_response(
                StatusCode::OK,
                BreakdownResponse {
                    calculation_id: correlation_id,
                    timestamp: Utc::now(),
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    regime: rules.metadata().code.clone(),
                    employee_id: request.employee_id,
                    breakdown,
                },
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Breakdown failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /attendance.
///
/// Classifies a batch of punches and summarizes one employee's period.
async fn attendance_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if request.period_end < request.period_start {
        warn!(
            correlation_id = %correlation_id,
            period_start = %request.period_start,
            period_end = %request.period_end,
            "Inverted attendance period"
        );
        return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
            "period_end must not be before period_start",
        )));
    }

    let days = process_punches(&request.punches, state.rules().attendance());
    let summary = summarize(
        &request.employee_id,
        &days,
        request.period_start,
        request.period_end,
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        punches = request.punches.len(),
        days = days.len(),
        inconsistencies = summary.inconsistencies.len(),
        "Attendance processed"
    );

    json_response(StatusCode::OK, AttendanceResponse { days, summary })
}

/// Handler for POST /journal-entry.
///
/// Builds the payroll provision entry with the default account mapping.
async fn journal_entry_handler(
    payload: Result<Json<JournalEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing journal entry request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let entry = generate_journal_entry(
        &request.period,
        &request.totals,
        request.reference.as_deref(),
        request.reference_date,
        &AccountMapping::default(),
    );
    let validation = validate_journal_entry(&entry);

    if !validation.valid {
        warn!(
            correlation_id = %correlation_id,
            period = %request.period,
            difference = %validation.difference,
            "Journal entry does not balance"
        );
    }

    json_response(StatusCode::OK, JournalEntryResponse { entry, validation })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    error_response(ApiErrorResponse::bad_request(error))
}
