//! Attendance status evaluation.
//!
//! This module derives whether an attendance day is late, has an early
//! departure, or is compliant, from the check-in/out times and the
//! company's grace periods.

use serde::{Deserialize, Serialize};

use crate::config::AttendancePolicy;
use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, AttendanceStatus, AttendanceTimes, AuditStep, BreakRecord, TimeOfDay,
};

use super::break_validation::total_break_minutes;

/// Parses `HH:mm` text into a minute offset within the day.
///
/// # Examples
///
/// ```
/// use attendance_engine::rules::parse_time_to_minutes;
///
/// assert_eq!(parse_time_to_minutes("09:10").unwrap(), 550);
/// assert!(parse_time_to_minutes("9:10").is_err());
/// assert!(parse_time_to_minutes("23:60").is_err());
/// ```
pub fn parse_time_to_minutes(text: &str) -> EngineResult<u16> {
    TimeOfDay::parse(text).map(TimeOfDay::minutes)
}

/// Latest check-in, in minutes, that is still on time. May exceed the day.
fn late_threshold(times: &AttendanceTimes, policy: &AttendancePolicy) -> i64 {
    i64::from(times.scheduled_start.minutes()) + i64::from(policy.late_grace_minutes)
}

/// Earliest check-out, in minutes, that is not an early departure. May be negative.
fn early_threshold(times: &AttendanceTimes, policy: &AttendancePolicy) -> i64 {
    i64::from(times.scheduled_end.minutes()) - i64::from(policy.early_departure_grace_minutes)
}

/// Returns true when the check-in is strictly after `scheduled_start + late_grace`.
///
/// A day without a check-in is never late.
pub fn is_late(times: &AttendanceTimes, policy: &AttendancePolicy) -> bool {
    times
        .check_in
        .is_some_and(|check_in| i64::from(check_in.minutes()) > late_threshold(times, policy))
}

/// Returns true when the check-out is strictly before `scheduled_end - early_grace`.
///
/// A day without a check-out cannot be assessed and is never flagged.
pub fn is_early_departure(times: &AttendanceTimes, policy: &AttendancePolicy) -> bool {
    times
        .check_out
        .is_some_and(|check_out| i64::from(check_out.minutes()) < early_threshold(times, policy))
}

/// Derives the attendance status of a day.
///
/// - No check-in: `Incomplete`.
/// - Late and early departure: `LateAndEarlyDeparture`.
/// - Only one flag: `Late` or `EarlyDeparture`.
/// - Neither flag: `OnTime` when checked out, `Incomplete` while the day is open.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::models::{AttendanceStatus, AttendanceTimes, TimeOfDay};
/// use attendance_engine::rules::calculate_attendance_status;
///
/// let policy = AttendancePolicy {
///     late_grace_minutes: 10,
///     early_departure_grace_minutes: 0,
/// };
/// let mut times = AttendanceTimes {
///     scheduled_start: TimeOfDay::from_hm(9, 0).unwrap(),
///     scheduled_end: TimeOfDay::from_hm(18, 0).unwrap(),
///     check_in: TimeOfDay::from_hm(9, 9),
///     check_out: TimeOfDay::from_hm(18, 0),
/// };
/// assert_eq!(calculate_attendance_status(&times, &policy), AttendanceStatus::OnTime);
///
/// times.check_in = TimeOfDay::from_hm(9, 11);
/// assert_eq!(calculate_attendance_status(&times, &policy), AttendanceStatus::Late);
/// ```
pub fn calculate_attendance_status(
    times: &AttendanceTimes,
    policy: &AttendancePolicy,
) -> AttendanceStatus {
    if times.check_in.is_none() {
        return AttendanceStatus::Incomplete;
    }

    AttendanceStatus::from_flags(
        is_late(times, policy),
        is_early_departure(times, policy),
        times.check_out.is_some(),
    )
}

/// Derives the status of a raw record.
///
/// Any unreadable time is a data-integrity violation and yields `Incomplete`.
pub fn status_for_record(record: &AttendanceRecord, policy: &AttendancePolicy) -> AttendanceStatus {
    match record.times() {
        Ok(times) => calculate_attendance_status(&times, policy),
        Err(_) => AttendanceStatus::Incomplete,
    }
}

/// Checks a displayed status against the one recomputed from the record.
///
/// Any caller that caches or derives a status label on its own must agree
/// with this recomputation.
pub fn is_attendance_status_consistent(
    record: &AttendanceRecord,
    policy: &AttendancePolicy,
    displayed: AttendanceStatus,
) -> bool {
    status_for_record(record, policy) == displayed
}

/// Minutes between the scheduled start and a late check-in. Zero when not late.
pub fn late_minutes(times: &AttendanceTimes, policy: &AttendancePolicy) -> u32 {
    match times.check_in {
        Some(check_in) if is_late(times, policy) => {
            times.scheduled_start.minutes_until(check_in).max(0) as u32
        }
        _ => 0,
    }
}

/// Minutes between an early check-out and the scheduled end. Zero when not early.
pub fn early_departure_minutes(times: &AttendanceTimes, policy: &AttendancePolicy) -> u32 {
    match times.check_out {
        Some(check_out) if is_early_departure(times, policy) => {
            check_out.minutes_until(times.scheduled_end).max(0) as u32
        }
        _ => 0,
    }
}

/// Minutes worked between check-in and check-out, less completed breaks.
///
/// Break intervals are clipped to the punch window and merged, so
/// overlapping breaks count once and breaks outside the window not at all.
/// `None` until both punches exist. Never negative.
pub fn worked_minutes(times: &AttendanceTimes, breaks: &[BreakRecord]) -> Option<u32> {
    let (check_in, check_out) = (times.check_in?, times.check_out?);
    let present = check_in.minutes_until(check_out).max(0) as u32;
    Some(present.saturating_sub(break_minutes_within(check_in, check_out, breaks)))
}

/// Minutes of `[from, to)` covered by at least one completed break.
fn break_minutes_within(from: TimeOfDay, to: TimeOfDay, breaks: &[BreakRecord]) -> u32 {
    let (from, to) = (from.minutes(), to.minutes());
    let mut spans: Vec<(u16, u16)> = breaks
        .iter()
        .filter_map(BreakRecord::interval)
        .map(|(start, end)| (start.minutes().max(from), end.minutes().min(to)))
        .filter(|(start, end)| start < end)
        .collect();
    spans.sort_unstable();

    let mut covered = 0u32;
    let mut covered_until = from;
    for (start, end) in spans {
        let start = start.max(covered_until);
        if end > start {
            covered += u32::from(end - start);
            covered_until = end;
        }
    }
    covered
}

/// The full evaluation of one attendance day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvaluation {
    /// The attendance record that was evaluated.
    pub record_id: String,
    /// The derived status.
    pub status: AttendanceStatus,
    /// Minutes late past the scheduled start, 0 when on time.
    pub late_minutes: u32,
    /// Minutes left before the scheduled end, 0 when not early.
    pub early_departure_minutes: u32,
    /// Minutes worked net of completed breaks, once checked out.
    pub worked_minutes: Option<u32>,
    /// Total minutes of completed breaks.
    pub break_minutes: u32,
    /// Set when a time could not be read; the status is then `Incomplete`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_error: Option<String>,
    /// The audit step recording this evaluation.
    pub audit_step: AuditStep,
}

/// Evaluates an attendance record with its breaks.
pub fn evaluate_attendance(
    record: &AttendanceRecord,
    policy: &AttendancePolicy,
    breaks: &[BreakRecord],
    step_number: u32,
) -> AttendanceEvaluation {
    let input = serde_json::json!({
        "record_id": record.id,
        "scheduled_start": record.scheduled_start,
        "scheduled_end": record.scheduled_end,
        "check_in": record.check_in,
        "check_out": record.check_out,
        "late_grace_minutes": policy.late_grace_minutes,
        "early_departure_grace_minutes": policy.early_departure_grace_minutes
    });
    let break_minutes = total_break_minutes(breaks);

    let times = match record.times() {
        Ok(times) => times,
        Err(err) => {
            let message = err.to_string();
            return AttendanceEvaluation {
                record_id: record.id.clone(),
                status: AttendanceStatus::Incomplete,
                late_minutes: 0,
                early_departure_minutes: 0,
                worked_minutes: None,
                break_minutes,
                data_error: Some(message.clone()),
                audit_step: AuditStep {
                    step_number,
                    rule_id: "attendance_status".to_string(),
                    rule_name: "Attendance Status".to_string(),
                    input,
                    output: serde_json::json!({
                        "status": AttendanceStatus::Incomplete,
                        "data_error": message
                    }),
                    reasoning: format!("Record cannot be assessed: {}", message),
                },
            };
        }
    };

    let status = calculate_attendance_status(&times, policy);
    let late = late_minutes(&times, policy);
    let early = early_departure_minutes(&times, policy);
    let worked = worked_minutes(&times, breaks);

    let reasoning = match (times.check_in, times.check_out) {
        (None, _) => "No check-in recorded; lateness cannot be assessed".to_string(),
        (Some(check_in), check_out) => {
            let mut parts = vec![format!(
                "Check-in {} against threshold {} + {} min: {}",
                check_in,
                times.scheduled_start,
                policy.late_grace_minutes,
                if status.is_late() { "late" } else { "on time" }
            )];
            match check_out {
                Some(check_out) => parts.push(format!(
                    "check-out {} against threshold {} - {} min: {}",
                    check_out,
                    times.scheduled_end,
                    policy.early_departure_grace_minutes,
                    if status.is_early_departure() {
                        "early departure"
                    } else {
                        "compliant"
                    }
                )),
                None => parts.push("no check-out yet".to_string()),
            }
            parts.join("; ")
        }
    };

    AttendanceEvaluation {
        record_id: record.id.clone(),
        status,
        late_minutes: late,
        early_departure_minutes: early,
        worked_minutes: worked,
        break_minutes,
        data_error: None,
        audit_step: AuditStep {
            step_number,
            rule_id: "attendance_status".to_string(),
            rule_name: "Attendance Status".to_string(),
            input,
            output: serde_json::json!({
                "status": status,
                "late_minutes": late,
                "early_departure_minutes": early,
                "worked_minutes": worked
            }),
            reasoning,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(text: &str) -> TimeOfDay {
        TimeOfDay::parse(text).unwrap()
    }

    fn policy(late: u32, early: u32) -> AttendancePolicy {
        AttendancePolicy {
            late_grace_minutes: late,
            early_departure_grace_minutes: early,
        }
    }

    fn times(check_in: Option<&str>, check_out: Option<&str>) -> AttendanceTimes {
        AttendanceTimes {
            scheduled_start: t("09:00"),
            scheduled_end: t("18:00"),
            check_in: check_in.map(t),
            check_out: check_out.map(t),
        }
    }

    fn record(check_in: Option<&str>, check_out: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            id: "att_001".to_string(),
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            scheduled_start: "09:00".to_string(),
            scheduled_end: "18:00".to_string(),
            check_in: check_in.map(str::to_string),
            check_out: check_out.map(str::to_string),
        }
    }

    #[test]
    fn test_check_in_within_grace_is_not_late() {
        let status = calculate_attendance_status(&times(Some("09:09"), Some("18:00")), &policy(10, 0));
        assert_eq!(status, AttendanceStatus::OnTime);
    }

    #[test]
    fn test_check_in_past_grace_is_late() {
        let status = calculate_attendance_status(&times(Some("09:11"), Some("18:00")), &policy(10, 0));
        assert_eq!(status, AttendanceStatus::Late);
    }

    #[test]
    fn test_late_boundary_is_strict() {
        let p = policy(10, 0);
        assert!(!is_late(&times(Some("09:10"), None), &p));
        assert!(is_late(&times(Some("09:11"), None), &p));
    }

    #[test]
    fn test_early_departure_boundary_is_strict() {
        let p = policy(0, 15);
        assert!(!is_early_departure(&times(Some("09:00"), Some("17:45")), &p));
        assert!(is_early_departure(&times(Some("09:00"), Some("17:44")), &p));
    }

    #[test]
    fn test_missing_check_in_is_incomplete() {
        let p = policy(0, 0);
        assert_eq!(
            calculate_attendance_status(&times(None, None), &p),
            AttendanceStatus::Incomplete
        );
        assert_eq!(
            calculate_attendance_status(&times(None, Some("12:00")), &p),
            AttendanceStatus::Incomplete
        );
    }

    #[test]
    fn test_open_day_on_time_is_incomplete() {
        let status = calculate_attendance_status(&times(Some("08:55"), None), &policy(0, 0));
        assert_eq!(status, AttendanceStatus::Incomplete);
    }

    #[test]
    fn test_open_day_late_is_late() {
        let status = calculate_attendance_status(&times(Some("09:30"), None), &policy(5, 0));
        assert_eq!(status, AttendanceStatus::Late);
    }

    #[test]
    fn test_late_and_early_departure() {
        let status =
            calculate_attendance_status(&times(Some("09:30"), Some("16:00")), &policy(5, 5));
        assert_eq!(status, AttendanceStatus::LateAndEarlyDeparture);
    }

    #[test]
    fn test_early_departure_only() {
        let status =
            calculate_attendance_status(&times(Some("08:50"), Some("16:00")), &policy(5, 5));
        assert_eq!(status, AttendanceStatus::EarlyDeparture);
    }

    #[test]
    fn test_grace_longer_than_day_never_flags() {
        let p = policy(5000, 5000);
        let status = calculate_attendance_status(&times(Some("23:59"), Some("00:00")), &p);
        assert_eq!(status, AttendanceStatus::OnTime);
    }

    #[test]
    fn test_unparseable_record_is_incomplete() {
        let status = status_for_record(&record(Some("9:30am"), Some("18:00")), &policy(0, 0));
        assert_eq!(status, AttendanceStatus::Incomplete);
    }

    #[test]
    fn test_consistency_check_detects_drift() {
        let r = record(Some("09:20"), Some("18:00"));
        let p = policy(10, 0);
        assert!(is_attendance_status_consistent(&r, &p, AttendanceStatus::Late));
        assert!(!is_attendance_status_consistent(&r, &p, AttendanceStatus::OnTime));
    }

    #[test]
    fn test_late_and_early_minutes() {
        let p = policy(10, 5);
        let tm = times(Some("09:25"), Some("17:30"));
        assert_eq!(late_minutes(&tm, &p), 25);
        assert_eq!(early_departure_minutes(&tm, &p), 30);

        let tm = times(Some("09:05"), Some("17:58"));
        assert_eq!(late_minutes(&tm, &p), 0);
        assert_eq!(early_departure_minutes(&tm, &p), 0);
    }

    #[test]
    fn test_worked_minutes_subtracts_completed_breaks() {
        let breaks = vec![
            BreakRecord::completed(1, t("12:00"), t("13:00")),
            BreakRecord::completed(2, t("15:00"), t("15:15")),
        ];
        let worked = worked_minutes(&times(Some("09:00"), Some("18:00")), &breaks);
        assert_eq!(worked, Some(540 - 75));
    }

    #[test]
    fn test_worked_minutes_counts_overlapping_breaks_once() {
        let breaks = vec![
            BreakRecord::completed(1, t("12:00"), t("12:30")),
            BreakRecord::completed(2, t("12:15"), t("12:45")),
        ];
        let worked = worked_minutes(&times(Some("09:00"), Some("18:00")), &breaks);
        assert_eq!(worked, Some(540 - 45));
    }

    #[test]
    fn test_worked_minutes_ignores_breaks_outside_punches() {
        let breaks = vec![
            BreakRecord::completed(1, t("07:00"), t("08:00")),
            BreakRecord::completed(2, t("17:30"), t("18:30")),
            BreakRecord::ongoing(3, t("12:00")),
        ];
        let worked = worked_minutes(&times(Some("09:00"), Some("18:00")), &breaks);
        assert_eq!(worked, Some(540 - 30));
    }

    #[test]
    fn test_worked_minutes_requires_both_punches() {
        assert_eq!(worked_minutes(&times(Some("09:00"), None), &[]), None);
        assert_eq!(worked_minutes(&times(None, Some("18:00")), &[]), None);
    }

    #[test]
    fn test_worked_minutes_never_negative() {
        let breaks = vec![BreakRecord::completed(1, t("08:00"), t("12:00"))];
        assert_eq!(
            worked_minutes(&times(Some("09:00"), Some("10:00")), &breaks),
            Some(0)
        );
    }

    #[test]
    fn test_evaluate_attendance_fills_audit_step() {
        let evaluation = evaluate_attendance(
            &record(Some("09:11"), Some("18:00")),
            &policy(10, 0),
            &[BreakRecord::completed(1, t("12:00"), t("12:30"))],
            4,
        );

        assert_eq!(evaluation.status, AttendanceStatus::Late);
        assert_eq!(evaluation.late_minutes, 11);
        assert_eq!(evaluation.worked_minutes, Some(529 - 30));
        assert_eq!(evaluation.break_minutes, 30);
        assert!(evaluation.data_error.is_none());
        assert_eq!(evaluation.audit_step.step_number, 4);
        assert_eq!(evaluation.audit_step.rule_id, "attendance_status");
        assert_eq!(evaluation.audit_step.output["status"], "late");
        assert!(evaluation.audit_step.reasoning.contains("09:11"));
    }

    #[test]
    fn test_evaluate_attendance_reports_data_error() {
        let evaluation =
            evaluate_attendance(&record(Some("25:00"), None), &policy(10, 0), &[], 1);

        assert_eq!(evaluation.status, AttendanceStatus::Incomplete);
        assert!(evaluation.data_error.unwrap().contains("25:00"));
        assert_eq!(evaluation.audit_step.output["status"], "incomplete");
    }
}
