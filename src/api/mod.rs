//! HTTP API module for the attendance rule engine.
//!
//! This module exposes the attendance, break and payroll rules as JSON
//! endpoints so the dashboard can check records before rendering them.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceRecordRequest, AttendanceStatusRequest, BreakValidationRequest,
    PayrollBreakdownRequest, PayrollVerifyRequest, StatusConsistencyRequest,
};
pub use response::{ApiError, ApiErrorResponse, StatusConsistency};
pub use state::AppState;
