//! Core data models for the attendance rule engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod break_record;
mod evaluation_result;
mod payroll;
mod time_of_day;

pub use attendance::{AttendanceRecord, AttendanceStatus, AttendanceTimes};
pub use break_record::{BreakOverlap, BreakRecord, InProgressConflict};
pub use evaluation_result::{AuditStep, AuditWarning, EvaluationResult};
pub use payroll::{PayrollBreakdown, PayrollInput, PayrollItem};
pub use time_of_day::{MINUTES_PER_DAY, TimeOfDay};
