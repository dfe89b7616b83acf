//! Error types for the attendance rule engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every contract violation the rule modules and the settings loader
//! can report.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the attendance rule engine.
///
/// Contract violations (malformed times, zero break numbers, negative
/// amounts) are rejected with one of these values rather than clamped.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimeFormat {
///     value: "25:00".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time '25:00': expected HH:mm");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A time-of-day string did not match `HH:mm`.
    #[error("Invalid time '{value}': expected HH:mm")]
    InvalidTimeFormat {
        /// The text that failed to parse.
        value: String,
    },

    /// A break record carried a break number outside the 1-based sequence.
    #[error("Invalid break number {number}: break numbers start at 1")]
    InvalidBreakNumber {
        /// The offending break number.
        number: u32,
    },

    /// A payroll component was negative.
    #[error("Payroll component '{field}' must not be negative, got {amount}")]
    NegativeAmount {
        /// The component name (e.g. "base_salary").
        field: String,
        /// The rejected amount.
        amount: Decimal,
    },

    /// A payroll total exceeded the representable range.
    #[error("Payroll total '{field}' overflowed")]
    AmountOverflow {
        /// The total being computed (e.g. "gross_salary").
        field: String,
    },

    /// Settings directory or file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Settings file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Settings parsed but violated a constraint.
    #[error("Invalid configuration for company '{company_id}': {message}")]
    InvalidConfig {
        /// The company whose settings are invalid.
        company_id: String,
        /// What was wrong.
        message: String,
    },

    /// No settings were loaded for the requested company.
    #[error("Company not found: {company_id}")]
    CompanyNotFound {
        /// The company id that was requested.
        company_id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
