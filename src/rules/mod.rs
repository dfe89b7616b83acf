//! Domain rules for the attendance rule engine.
//!
//! This module contains the attendance status evaluation (late arrival and
//! early departure against grace periods), break session validation
//! (overlap, numbering, timeline order and the per-day ceiling), and payroll
//! breakdown arithmetic (gross and net salary identities).
//!
//! Every function here is pure: inputs are borrowed, never mutated, and
//! equal inputs give equal outputs.

mod attendance_status;
mod break_validation;
mod payroll_breakdown;

pub use attendance_status::{
    AttendanceEvaluation, calculate_attendance_status, early_departure_minutes,
    evaluate_attendance, is_attendance_status_consistent, is_early_departure, is_late,
    late_minutes, parse_time_to_minutes, status_for_record, worked_minutes,
};
pub use break_validation::{
    BreakValidationReport, can_add_new_break, can_start_break, check_time_overlap,
    find_in_progress_conflicts, find_overlapping_breaks, has_break_overlap,
    is_break_number_sequential, is_break_timeline_ordered, is_within_max_breaks,
    ongoing_break_count, sort_breaks_by_number, total_break_minutes, validate_breaks,
};
pub use payroll_breakdown::{
    PayrollDiscrepancy, PayrollVerification, calculate_payroll_breakdown,
    find_payroll_discrepancies, verify_payroll, verify_payroll_breakdown_sum,
};
