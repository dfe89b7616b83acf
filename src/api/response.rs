//! Response types for the evaluation API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API, plus the few response bodies that are not rule output.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::AttendanceStatus;

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

    /// Creates a company not found error response.
    pub fn company_not_found(company_id: &str) -> Self {
        Self::with_details(
            "COMPANY_NOT_FOUND",
            format!("Company not found: {}", company_id),
            format!("No settings are loaded for company '{}'", company_id),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Wraps an error body with `400 Bad Request`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidTimeFormat { value } => ApiErrorResponse::bad_request(
                ApiError::with_details("INVALID_TIME", message, format!("'{}' is not HH:mm", value)),
            ),
            EngineError::InvalidBreakNumber { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_BREAK_NUMBER",
                    message,
                    "Break numbers are 1-based",
                ),
            ),
            EngineError::NegativeAmount { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "NEGATIVE_AMOUNT",
                    message,
                    "Payroll components must be zero or positive",
                ),
            ),
            EngineError::AmountOverflow { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("AMOUNT_OVERFLOW", message))
            }
            EngineError::CompanyNotFound { company_id } => {
                ApiErrorResponse::bad_request(ApiError::company_not_found(&company_id))
            }
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
        }
    }
}

/// Response body for `POST /attendance/consistency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConsistency {
    /// The record that was checked.
    pub record_id: String,
    /// True when the displayed status matches the recomputed one.
    pub consistent: bool,
    /// The status recomputed from the record.
    pub expected: AttendanceStatus,
    /// The status that was displayed.
    pub displayed: AttendanceStatus,
}
