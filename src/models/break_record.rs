//! Break session model.

use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// One rest interval within an attendance day.
///
/// Breaks are numbered from 1 in the order they were taken. A break with no
/// end time is still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRecord {
    /// 1-based sequence number within the attendance day.
    pub break_number: u32,
    /// When the break started.
    pub start_time: TimeOfDay,
    /// When the break ended, absent while the break is ongoing.
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
}

impl BreakRecord {
    /// Creates a completed break.
    pub fn completed(break_number: u32, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            break_number,
            start_time,
            end_time: Some(end_time),
        }
    }

    /// Creates a break that has not ended yet.
    pub fn ongoing(break_number: u32, start_time: TimeOfDay) -> Self {
        Self {
            break_number,
            start_time,
            end_time: None,
        }
    }

    /// Returns true when the break has both a start and an end.
    pub fn is_completed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Returns the `[start, end)` interval of a completed break.
    pub fn interval(&self) -> Option<(TimeOfDay, TimeOfDay)> {
        self.end_time.map(|end| (self.start_time, end))
    }

    /// Returns true when a completed break ends before it starts.
    pub fn is_inverted(&self) -> bool {
        self.end_time.is_some_and(|end| end < self.start_time)
    }

    /// Returns the duration of a completed break in minutes.
    ///
    /// `None` while the break is ongoing. An inverted break counts as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{BreakRecord, TimeOfDay};
    ///
    /// let start = TimeOfDay::from_hm(12, 0).unwrap();
    /// let end = TimeOfDay::from_hm(12, 45).unwrap();
    /// assert_eq!(BreakRecord::completed(1, start, end).duration_minutes(), Some(45));
    /// assert_eq!(BreakRecord::ongoing(2, start).duration_minutes(), None);
    /// ```
    pub fn duration_minutes(&self) -> Option<u32> {
        self.end_time
            .map(|end| end.minutes().saturating_sub(self.start_time.minutes()) as u32)
    }
}

/// A pair of completed breaks whose intervals share at least one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakOverlap {
    /// The break number of the first break in the pair.
    pub first: u32,
    /// The break number of the second break in the pair.
    pub second: u32,
}

/// An ongoing break that started before an earlier break ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InProgressConflict {
    /// The break number of the ongoing break.
    pub ongoing: u32,
    /// The break number of the earlier completed break it cuts into.
    pub prior: u32,
}
