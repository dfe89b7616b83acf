//! Attendance record model and status type.
//!
//! Records arrive from the remote API with textual times. The typed
//! [`AttendanceTimes`] view is obtained by parsing them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::TimeOfDay;

/// The derived attendance status of a single attendance day.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceStatus;
///
/// let status = AttendanceStatus::LateAndEarlyDeparture;
/// assert!(status.is_late());
/// assert!(status.is_early_departure());
/// assert_eq!(
///     serde_json::to_string(&status).unwrap(),
///     "\"late_and_early_departure\""
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Checked in and out within the grace periods.
    OnTime,
    /// Checked in after the late grace period.
    Late,
    /// Checked out before the early-departure grace period.
    EarlyDeparture,
    /// Both late and left early.
    LateAndEarlyDeparture,
    /// Not enough data to assess: no check-in, an open day, or unreadable times.
    Incomplete,
}

impl AttendanceStatus {
    /// Builds a status from the two flags.
    ///
    /// `checked_out` only matters when neither flag is set: an open day with
    /// no violation so far is `Incomplete`, not `OnTime`.
    pub fn from_flags(late: bool, early_departure: bool, checked_out: bool) -> Self {
        match (late, early_departure) {
            (true, true) => AttendanceStatus::LateAndEarlyDeparture,
            (true, false) => AttendanceStatus::Late,
            (false, true) => AttendanceStatus::EarlyDeparture,
            (false, false) if checked_out => AttendanceStatus::OnTime,
            (false, false) => AttendanceStatus::Incomplete,
        }
    }

    /// Returns true when the status carries the late flag.
    pub fn is_late(self) -> bool {
        matches!(
            self,
            AttendanceStatus::Late | AttendanceStatus::LateAndEarlyDeparture
        )
    }

    /// Returns true when the status carries the early-departure flag.
    pub fn is_early_departure(self) -> bool {
        matches!(
            self,
            AttendanceStatus::EarlyDeparture | AttendanceStatus::LateAndEarlyDeparture
        )
    }
}

/// An attendance record as received from the remote API.
///
/// Times are kept as the raw `HH:mm` strings so a malformed value can be
/// reported as a data-integrity problem instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the attendance record.
    pub id: String,
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The attendance day.
    pub date: NaiveDate,
    /// Scheduled start of the working day.
    pub scheduled_start: String,
    /// Scheduled end of the working day.
    pub scheduled_end: String,
    /// Actual check-in, absent until the employee checks in.
    #[serde(default)]
    pub check_in: Option<String>,
    /// Actual check-out, absent until the employee checks out.
    #[serde(default)]
    pub check_out: Option<String>,
}

impl AttendanceRecord {
    /// Parses the record's times into an [`AttendanceTimes`] view.
    ///
    /// Fails with `InvalidTimeFormat` on the first unreadable time.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::AttendanceRecord;
    /// use chrono::NaiveDate;
    ///
    /// let record = AttendanceRecord {
    ///     id: "att_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     scheduled_start: "09:00".to_string(),
    ///     scheduled_end: "18:00".to_string(),
    ///     check_in: Some("09:04".to_string()),
    ///     check_out: None,
    /// };
    /// let times = record.times().unwrap();
    /// assert_eq!(times.check_in.unwrap().minutes(), 544);
    /// assert!(times.check_out.is_none());
    /// ```
    pub fn times(&self) -> EngineResult<AttendanceTimes> {
        Ok(AttendanceTimes {
            scheduled_start: TimeOfDay::parse(&self.scheduled_start)?,
            scheduled_end: TimeOfDay::parse(&self.scheduled_end)?,
            check_in: self.check_in.as_deref().map(TimeOfDay::parse).transpose()?,
            check_out: self.check_out.as_deref().map(TimeOfDay::parse).transpose()?,
        })
    }
}

/// The parsed times of an attendance day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceTimes {
    /// Scheduled start of the working day.
    pub scheduled_start: TimeOfDay,
    /// Scheduled end of the working day.
    pub scheduled_end: TimeOfDay,
    /// Actual check-in, if any.
    pub check_in: Option<TimeOfDay>,
    /// Actual check-out, if any.
    pub check_out: Option<TimeOfDay>,
}
