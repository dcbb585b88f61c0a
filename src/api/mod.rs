//! HTTP API module for the payroll engine.
//!
//! This module provides REST endpoints for payroll breakdowns, attendance
//! processing and accounting export. No server is started here: embedders
//! build the router with [`create_router`] and serve it themselves.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AttendanceRequest, BreakdownRequest, JournalEntryRequest};
pub use response::{
    ApiError, ApiErrorResponse, AttendanceResponse, BreakdownResponse, JournalEntryResponse,
};
pub use state::AppState;
