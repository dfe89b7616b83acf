//! Request types for the evaluation API.
//!
//! This module defines the JSON request bodies for each endpoint and their
//! conversion into domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::WorkSchedule;
use crate::models::{
    AttendanceRecord, AttendanceStatus, BreakRecord, PayrollBreakdown, PayrollInput, PayrollItem,
};

use super::response::{ApiError, ApiErrorResponse};

/// An attendance record in a request.
///
/// Scheduled times may be omitted, in which case the company's default
/// schedule is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecordRequest {
    /// Unique identifier for the attendance record.
    pub id: String,
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The attendance day.
    pub date: NaiveDate,
    /// Scheduled start as `HH:mm`.
    #[serde(default)]
    pub scheduled_start: Option<String>,
    /// Scheduled end as `HH:mm`.
    #[serde(default)]
    pub scheduled_end: Option<String>,
    /// Check-in as `HH:mm`.
    #[serde(default)]
    pub check_in: Option<String>,
    /// Check-out as `HH:mm`.
    #[serde(default)]
    pub check_out: Option<String>,
}

impl AttendanceRecordRequest {
    /// Converts into a domain record, filling the schedule from the company default.
    pub fn into_record(self, schedule: &WorkSchedule) -> AttendanceRecord {
        AttendanceRecord {
            id: self.id,
            employee_id: self.employee_id,
            date: self.date,
            scheduled_start: self
                .scheduled_start
                .unwrap_or_else(|| schedule.start.to_string()),
            scheduled_end: self
                .scheduled_end
                .unwrap_or_else(|| schedule.end.to_string()),
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }
}

/// Request body for `POST /attendance/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceStatusRequest {
    /// The company whose settings apply.
    pub company_id: String,
    /// The attendance record to evaluate.
    pub record: AttendanceRecordRequest,
    /// Breaks taken that day.
    #[serde(default)]
    pub breaks: Vec<BreakRecord>,
}

/// Request body for `POST /attendance/consistency`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConsistencyRequest {
    /// The company whose settings apply.
    pub company_id: String,
    /// The attendance record the status was derived from.
    pub record: AttendanceRecordRequest,
    /// The status currently shown for the record.
    pub displayed_status: AttendanceStatus,
}

/// Request body for `POST /breaks/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakValidationRequest {
    /// The company whose break ceiling applies.
    pub company_id: String,
    /// All breaks of one attendance day.
    pub breaks: Vec<BreakRecord>,
}

/// Request body for `POST /payroll/breakdown`.
///
/// Allowances and deductions can each be given as a total or as items,
/// but not both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollBreakdownRequest {
    /// Company whose currency labels the result.
    #[serde(default)]
    pub company_id: Option<String>,
    /// Base salary for the period.
    pub base_salary: Decimal,
    /// Total overtime pay for the period.
    #[serde(default)]
    pub overtime_pay: Decimal,
    /// Total allowances.
    #[serde(default)]
    pub allowances: Option<Decimal>,
    /// Total deductions.
    #[serde(default)]
    pub deductions: Option<Decimal>,
    /// Itemized allowances.
    #[serde(default)]
    pub allowance_items: Vec<PayrollItem>,
    /// Itemized deductions.
    #[serde(default)]
    pub deduction_items: Vec<PayrollItem>,
}

impl PayrollBreakdownRequest {
    /// Builds the payroll input, summing items where totals are absent.
    pub fn to_input(&self) -> Result<PayrollInput, ApiErrorResponse> {
        if self.allowances.is_some() && !self.allowance_items.is_empty() {
            return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
                "provide either allowances or allowance_items, not both",
            )));
        }
        if self.deductions.is_some() && !self.deduction_items.is_empty() {
            return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
                "provide either deductions or deduction_items, not both",
            )));
        }

        let itemized = PayrollInput::from_items(
            self.base_salary,
            self.overtime_pay,
            &self.allowance_items,
            &self.deduction_items,
        )?;

        Ok(PayrollInput {
            allowances: self.allowances.unwrap_or(itemized.allowances),
            deductions: self.deductions.unwrap_or(itemized.deductions),
            ..itemized
        })
    }
}

/// Request body for `POST /payroll/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollVerifyRequest {
    /// Company the breakdown belongs to.
    #[serde(default)]
    pub company_id: Option<String>,
    /// The stored breakdown to check.
    pub breakdown: PayrollBreakdown,
}
