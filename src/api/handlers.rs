//! HTTP request handlers for the evaluation API.
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
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{BreakRecord, EvaluationResult};
use crate::rules::{
    calculate_payroll_breakdown, evaluate_attendance, status_for_record, validate_breaks,
    verify_payroll,
};

use super::request::{
    AttendanceStatusRequest, BreakValidationRequest, PayrollBreakdownRequest,
    PayrollVerifyRequest, StatusConsistencyRequest,
};
use super::response::{ApiError, ApiErrorResponse, StatusConsistency};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/status", post(attendance_status_handler))
        .route("/attendance/consistency", post(status_consistency_handler))
        .route("/breaks/validate", post(break_validation_handler))
        .route("/payroll/breakdown", post(payroll_breakdown_handler))
        .route("/payroll/verify", post(payroll_verify_handler))
        .with_state(state)
}

/// Unwraps a JSON payload, turning serde failures into a 400 response.
fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
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
            Err(ApiErrorResponse::bad_request(error))
        }
    }
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /attendance/status.
///
/// Evaluates one attendance record with the company's grace periods.
async fn attendance_status_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceStatusRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance status request");

    let request = parse_payload(payload, correlation_id)?;
    let settings = state.company(&request.company_id).inspect_err(|_| {
        warn!(
            correlation_id = %correlation_id,
            company_id = %request.company_id,
            "Company not found"
        );
    })?;

    let start_time = Instant::now();
    let record = request.record.into_record(&settings.schedule);
    let evaluation = evaluate_attendance(&record, &settings.attendance, &request.breaks, 1);
    let duration_us = start_time.elapsed().as_micros() as u64;

    if let Some(data_error) = &evaluation.data_error {
        warn!(
            correlation_id = %correlation_id,
            record_id = %record.id,
            error = %data_error,
            "Attendance record has unreadable times"
        );
    }
    info!(
        correlation_id = %correlation_id,
        company_id = %request.company_id,
        record_id = %record.id,
        status = ?evaluation.status,
        duration_us,
        "Attendance status evaluated"
    );

    Ok(json_ok(EvaluationResult::new(
        Some(request.company_id),
        evaluation,
        duration_us,
    )))
}

/// Handler for POST /attendance/consistency.
///
/// Recomputes the status and compares it with the one being displayed.
async fn status_consistency_handler(
    State(state): State<AppState>,
    payload: Result<Json<StatusConsistencyRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing status consistency request");

    let request = parse_payload(payload, correlation_id)?;
    let settings = state.company(&request.company_id)?;

    let start_time = Instant::now();
    let record = request.record.into_record(&settings.schedule);
    let expected = status_for_record(&record, &settings.attendance);
    let consistent = expected == request.displayed_status;
    let duration_us = start_time.elapsed().as_micros() as u64;

    if !consistent {
        warn!(
            correlation_id = %correlation_id,
            record_id = %record.id,
            expected = ?expected,
            displayed = ?request.displayed_status,
            "Displayed attendance status drifted from record"
        );
    }

    Ok(json_ok(EvaluationResult::new(
        Some(request.company_id),
        StatusConsistency {
            record_id: record.id,
            consistent,
            expected,
            displayed: request.displayed_status,
        },
        duration_us,
    )))
}

/// Handler for POST /breaks/validate.
///
/// Runs every break check against the company's break ceiling.
async fn break_validation_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakValidationRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing break validation request");

    let request = parse_payload(payload, correlation_id)?;
    let settings = state.company(&request.company_id)?;
    let breaks: &[BreakRecord] = &request.breaks;

    let start_time = Instant::now();
    let report = validate_breaks(breaks, &settings.breaks, 1).inspect_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Break validation rejected"
        );
    })?;
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        company_id = %request.company_id,
        breaks_count = breaks.len(),
        is_valid = report.is_valid,
        overlaps = report.overlapping_pairs.len(),
        duration_us,
        "Breaks validated"
    );

    Ok(json_ok(EvaluationResult::new(
        Some(request.company_id),
        report,
        duration_us,
    )))
}

/// Handler for POST /payroll/breakdown.
///
/// Derives gross and net salary from the components.
async fn payroll_breakdown_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollBreakdownRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll breakdown request");

    let request = parse_payload(payload, correlation_id)?;
    let currency = match &request.company_id {
        Some(company_id) => Some(state.company(company_id)?.currency.clone()),
        None => None,
    };

    let start_time = Instant::now();
    let input = request.to_input()?;
    let mut breakdown = calculate_payroll_breakdown(&input).inspect_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Payroll breakdown rejected"
        );
    })?;
    breakdown.currency = currency;
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        gross_salary = %breakdown.gross_salary,
        net_salary = %breakdown.net_salary,
        duration_us,
        "Payroll breakdown calculated"
    );

    Ok(json_ok(EvaluationResult::new(
        request.company_id,
        breakdown,
        duration_us,
    )))
}

/// Handler for POST /payroll/verify.
///
/// Checks a stored breakdown's totals against its components.
async fn payroll_verify_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollVerifyRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll verification request");

    let request = parse_payload(payload, correlation_id)?;
    if let Some(company_id) = &request.company_id {
        state.company(company_id)?;
    }

    let start_time = Instant::now();
    let verification = verify_payroll(&request.breakdown, 1)?;
    let duration_us = start_time.elapsed().as_micros() as u64;

    if verification.is_valid {
        info!(
            correlation_id = %correlation_id,
            net_salary = %request.breakdown.net_salary,
            duration_us,
            "Payroll breakdown verified"
        );
    } else {
        warn!(
            correlation_id = %correlation_id,
            discrepancies = verification.discrepancies.len(),
            duration_us,
            "Payroll breakdown does not add up"
        );
    }

    Ok(json_ok(EvaluationResult::new(
        request.company_id,
        verification,
        duration_us,
    )))
}
