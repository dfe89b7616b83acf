//! Break session validation.
//!
//! This module checks the break records of one attendance day: overlap
//! between completed breaks, numbering, timeline order, and the company's
//! per-day ceiling.
//!
//! Completed breaks are half-open intervals `[start, end)`, so a break that
//! ends exactly when the next one starts does not overlap it.

use serde::{Deserialize, Serialize};

use crate::config::BreakPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, BreakOverlap, BreakRecord, InProgressConflict};

/// Returns true when two completed breaks share at least one minute.
///
/// Ongoing breaks and empty or inverted intervals never overlap anything.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::{BreakRecord, TimeOfDay};
/// use attendance_engine::rules::check_time_overlap;
///
/// let t = |s: &str| TimeOfDay::parse(s).unwrap();
/// let first = BreakRecord::completed(1, t("10:00"), t("10:15"));
/// let second = BreakRecord::completed(2, t("10:10"), t("10:20"));
/// let third = BreakRecord::completed(3, t("10:20"), t("10:30"));
///
/// assert!(check_time_overlap(&first, &second));
/// assert!(!check_time_overlap(&second, &third));
/// ```
pub fn check_time_overlap(a: &BreakRecord, b: &BreakRecord) -> bool {
    match (a.interval(), b.interval()) {
        (Some((a_start, a_end)), Some((b_start, b_end))) => {
            a_start < a_end && b_start < b_end && a_start < b_end && b_start < a_end
        }
        _ => false,
    }
}

/// Returns every pair of completed breaks that overlap.
///
/// Pairs are reported in break-number order, lower number first.
pub fn find_overlapping_breaks(breaks: &[BreakRecord]) -> Vec<BreakOverlap> {
    let sorted = sort_breaks_by_number(breaks);
    let mut overlaps = Vec::new();

    for (i, a) in sorted.iter().enumerate() {
        for b in &sorted[i + 1..] {
            if check_time_overlap(a, b) {
                overlaps.push(BreakOverlap {
                    first: a.break_number,
                    second: b.break_number,
                });
            }
        }
    }

    overlaps
}

/// Returns true when any two completed breaks overlap.
pub fn has_break_overlap(breaks: &[BreakRecord]) -> bool {
    breaks
        .iter()
        .enumerate()
        .any(|(i, a)| breaks[i + 1..].iter().any(|b| check_time_overlap(a, b)))
}

/// Returns a copy of the breaks sorted by break number.
///
/// The sort is stable, so breaks sharing a number keep their input order.
pub fn sort_breaks_by_number(breaks: &[BreakRecord]) -> Vec<BreakRecord> {
    let mut sorted = breaks.to_vec();
    sorted.sort_by_key(|b| b.break_number);
    sorted
}

/// Returns true when start times never decrease in break-number order.
pub fn is_break_timeline_ordered(breaks: &[BreakRecord]) -> bool {
    sort_breaks_by_number(breaks)
        .windows(2)
        .all(|pair| pair[0].start_time <= pair[1].start_time)
}

/// Returns true when the sorted break numbers are exactly `1, 2, ..., N`.
pub fn is_break_number_sequential(breaks: &[BreakRecord]) -> bool {
    sort_breaks_by_number(breaks)
        .iter()
        .zip(1u32..)
        .all(|(b, expected)| b.break_number == expected)
}

/// Returns true when the day holds no more than `max_breaks_per_day` breaks.
pub fn is_within_max_breaks(breaks: &[BreakRecord], max_breaks_per_day: u32) -> bool {
    breaks.len() as u64 <= u64::from(max_breaks_per_day)
}

/// Returns true when one more break would still be within the ceiling.
pub fn can_add_new_break(breaks: &[BreakRecord], max_breaks_per_day: u32) -> bool {
    (breaks.len() as u64) < u64::from(max_breaks_per_day)
}

/// Number of breaks that have not ended.
pub fn ongoing_break_count(breaks: &[BreakRecord]) -> usize {
    breaks.iter().filter(|b| !b.is_completed()).count()
}

/// Returns true when a new break may be started now.
///
/// Requires room under the ceiling and no break already in progress.
pub fn can_start_break(breaks: &[BreakRecord], max_breaks_per_day: u32) -> bool {
    can_add_new_break(breaks, max_breaks_per_day) && ongoing_break_count(breaks) == 0
}

/// Total minutes of completed breaks. Ongoing breaks do not count yet.
pub fn total_break_minutes(breaks: &[BreakRecord]) -> u32 {
    breaks.iter().filter_map(BreakRecord::duration_minutes).sum()
}

/// Finds ongoing breaks that start before an earlier break has ended.
///
/// An ongoing break is not checked for overlap, but it still may not start
/// inside or before a lower-numbered completed break.
pub fn find_in_progress_conflicts(breaks: &[BreakRecord]) -> Vec<InProgressConflict> {
    let sorted = sort_breaks_by_number(breaks);
    let mut conflicts = Vec::new();

    for ongoing in sorted.iter().filter(|b| !b.is_completed()) {
        for prior in sorted
            .iter()
            .filter(|b| b.break_number < ongoing.break_number)
        {
            if prior.end_time.is_some_and(|end| ongoing.start_time < end) {
                conflicts.push(InProgressConflict {
                    ongoing: ongoing.break_number,
                    prior: prior.break_number,
                });
            }
        }
    }

    conflicts
}

/// The outcome of validating all breaks of one attendance day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakValidationReport {
    /// Number of break records checked.
    pub break_count: usize,
    /// The ceiling the breaks were checked against.
    pub max_breaks_per_day: u32,
    /// Break numbers are exactly 1..N.
    pub is_sequential: bool,
    /// Start times follow break-number order.
    pub is_timeline_ordered: bool,
    /// The day is within the ceiling.
    pub within_max_breaks: bool,
    /// Another break could be recorded.
    pub can_add_break: bool,
    /// A break could be started right now.
    pub can_start_break: bool,
    /// Number of breaks still in progress.
    pub ongoing_breaks: usize,
    /// Every overlapping pair of completed breaks.
    pub overlapping_pairs: Vec<BreakOverlap>,
    /// Ongoing breaks that start before an earlier break ended.
    pub in_progress_conflicts: Vec<InProgressConflict>,
    /// Completed breaks whose end precedes their start.
    pub inverted_breaks: Vec<u32>,
    /// Total minutes of completed breaks.
    pub total_break_minutes: u32,
    /// True when no check failed.
    pub is_valid: bool,
    /// One audit step per check.
    pub audit_steps: Vec<AuditStep>,
}

/// Runs every break check for one attendance day.
///
/// A break number of 0 is a caller contract violation and is rejected with
/// `InvalidBreakNumber` before any check runs.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::BreakPolicy;
/// use attendance_engine::models::{BreakRecord, TimeOfDay};
/// use attendance_engine::rules::validate_breaks;
///
/// let t = |s: &str| TimeOfDay::parse(s).unwrap();
/// let breaks = vec![
///     BreakRecord::completed(1, t("10:00"), t("10:15")),
///     BreakRecord::completed(2, t("10:10"), t("10:20")),
/// ];
/// let report = validate_breaks(&breaks, &BreakPolicy { max_breaks_per_day: 3 }, 1).unwrap();
///
/// assert!(!report.is_valid);
/// assert_eq!(report.overlapping_pairs.len(), 1);
/// ```
pub fn validate_breaks(
    breaks: &[BreakRecord],
    policy: &BreakPolicy,
    first_step: u32,
) -> EngineResult<BreakValidationReport> {
    if let Some(bad) = breaks.iter().find(|b| b.break_number == 0) {
        return Err(EngineError::InvalidBreakNumber {
            number: bad.break_number,
        });
    }

    let max = policy.max_breaks_per_day;
    let numbers: Vec<u32> = sort_breaks_by_number(breaks)
        .iter()
        .map(|b| b.break_number)
        .collect();

    let is_sequential = is_break_number_sequential(breaks);
    let is_timeline_ordered = is_break_timeline_ordered(breaks);
    let within_max_breaks = is_within_max_breaks(breaks, max);
    let can_add_break = can_add_new_break(breaks, max);
    let can_start = can_start_break(breaks, max);
    let ongoing_breaks = ongoing_break_count(breaks);
    let overlapping_pairs = find_overlapping_breaks(breaks);
    let in_progress_conflicts = find_in_progress_conflicts(breaks);
    let inverted_breaks: Vec<u32> = breaks
        .iter()
        .filter(|b| b.is_inverted())
        .map(|b| b.break_number)
        .collect();
    let total_minutes = total_break_minutes(breaks);

    let audit_steps = vec![
        AuditStep {
            step_number: first_step,
            rule_id: "break_numbering".to_string(),
            rule_name: "Break Numbering".to_string(),
            input: serde_json::json!({ "break_numbers": numbers }),
            output: serde_json::json!({ "is_sequential": is_sequential }),
            reasoning: if is_sequential {
                format!("Break numbers run 1..{} without gaps", breaks.len())
            } else {
                format!(
                    "Break numbers {:?} are not the sequence 1..{}",
                    numbers,
                    breaks.len()
                )
            },
        },
        AuditStep {
            step_number: first_step.saturating_add(1),
            rule_id: "break_timeline".to_string(),
            rule_name: "Break Timeline Order".to_string(),
            input: serde_json::json!({ "break_count": breaks.len() }),
            output: serde_json::json!({
                "is_timeline_ordered": is_timeline_ordered,
                "inverted_breaks": inverted_breaks
            }),
            reasoning: if is_timeline_ordered {
                "Start times follow break-number order".to_string()
            } else {
                "A later-numbered break starts before an earlier one".to_string()
            },
        },
        AuditStep {
            step_number: first_step.saturating_add(2),
            rule_id: "break_overlap".to_string(),
            rule_name: "Break Overlap".to_string(),
            input: serde_json::json!({
                "completed_breaks": breaks.len() - ongoing_breaks,
                "ongoing_breaks": ongoing_breaks
            }),
            output: serde_json::json!({
                "overlapping_pairs": overlapping_pairs,
                "in_progress_conflicts": in_progress_conflicts
            }),
            reasoning: format!(
                "{} overlapping pair(s), {} in-progress conflict(s)",
                overlapping_pairs.len(),
                in_progress_conflicts.len()
            ),
        },
        AuditStep {
            step_number: first_step.saturating_add(3),
            rule_id: "break_limit".to_string(),
            rule_name: "Maximum Breaks Per Day".to_string(),
            input: serde_json::json!({
                "break_count": breaks.len(),
                "max_breaks_per_day": max
            }),
            output: serde_json::json!({
                "within_max_breaks": within_max_breaks,
                "can_add_break": can_add_break,
                "can_start_break": can_start
            }),
            reasoning: format!("{} of {} breaks used", breaks.len(), max),
        },
    ];

    let is_valid = is_sequential
        && is_timeline_ordered
        && within_max_breaks
        && ongoing_breaks <= 1
        && overlapping_pairs.is_empty()
        && in_progress_conflicts.is_empty()
        && inverted_breaks.is_empty();

    Ok(BreakValidationReport {
        break_count: breaks.len(),
        max_breaks_per_day: max,
        is_sequential,
        is_timeline_ordered,
        within_max_breaks,
        can_add_break,
        can_start_break: can_start,
        ongoing_breaks,
        overlapping_pairs,
        in_progress_conflicts,
        inverted_breaks,
        total_break_minutes: total_minutes,
        is_valid,
        audit_steps,
    })
}
