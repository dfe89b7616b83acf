//! Time-of-day model.
//!
//! Attendance and break times are same-day values, so they are kept as a
//! minute offset within the day rather than as full timestamps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of minutes in a day; valid minute offsets are `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A minute offset within a single day, parsed from `HH:mm`.
///
/// Serializes to and from the `HH:mm` string.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::TimeOfDay;
///
/// let time: TimeOfDay = "09:30".parse().unwrap();
/// assert_eq!(time.minutes(), 570);
/// assert_eq!(time.to_string(), "09:30");
/// assert!("24:00".parse::<TimeOfDay>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight, the start of the day.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Creates a time from a minute offset, or `None` if it is not within the day.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Creates a time from hour and minute components.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self(hour * 60 + minute))
    }

    /// Parses strict `HH:mm` text.
    ///
    /// Both components must be exactly two ASCII digits, with the hour in
    /// `00..=23` and the minute in `00..=59`.
    pub fn parse(text: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidTimeFormat {
            value: text.to_string(),
        };

        let bytes = text.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }

        let digit = |b: u8| b.is_ascii_digit().then(|| u16::from(b - b'0'));
        let (Some(h1), Some(h2), Some(m1), Some(m2)) =
            (digit(bytes[0]), digit(bytes[1]), digit(bytes[3]), digit(bytes[4]))
        else {
            return Err(invalid());
        };

        Self::from_hm(h1 * 10 + h2, m1 * 10 + m2).ok_or_else(invalid)
    }

    /// Returns the minute offset within the day.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Returns the hour component.
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Returns the minute component.
    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Signed minutes from `self` to `later`. Negative when `later` is earlier.
    pub fn minutes_until(self, later: TimeOfDay) -> i32 {
        i32::from(later.0) - i32::from(self.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
