//! Evaluation result models.
//!
//! This module contains the audit structures every rule evaluation records,
//! and the [`EvaluationResult`] envelope the API wraps rule output in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single step in an evaluation, recording one rule decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "attendance_status".to_string(),
///     rule_name: "Attendance Status".to_string(),
///     input: serde_json::json!({"check_in": "09:11", "late_grace_minutes": 10}),
///     output: serde_json::json!({"status": "late"}),
///     reasoning: "Check-in 09:11 is after 09:10".to_string(),
/// };
/// assert_eq!(step.rule_id, "attendance_status");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during evaluation.
///
/// Warnings flag data that is arithmetically valid but worth a second look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The envelope returned for every evaluation request.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceStatus, EvaluationResult};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let result = EvaluationResult {
///     evaluation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     company_id: Some("acme".to_string()),
///     result: AttendanceStatus::OnTime,
///     duration_us: 12,
/// };
/// assert_eq!(result.result, AttendanceStatus::OnTime);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult<T> {
    /// Unique identifier for this evaluation.
    pub evaluation_id: Uuid,
    /// When the evaluation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the evaluation.
    pub engine_version: String,
    /// The company whose settings were applied, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    /// The rule output.
    pub result: T,
    /// How long the evaluation took in microseconds.
    pub duration_us: u64,
}

impl<T> EvaluationResult<T> {
    /// Wraps a rule output with a fresh id, the current time and the crate version.
    pub fn new(company_id: Option<String>, result: T, duration_us: u64) -> Self {
        Self {
            evaluation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            company_id,
            result,
            duration_us,
        }
    }
}
