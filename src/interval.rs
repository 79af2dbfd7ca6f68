use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DateError, MonthDay, RANGE_SEPARATOR, consts::DAYS_IN_COMMON_YEAR, prelude::*};

/// A recurring yearly span of days: start inclusive, end exclusive.
///
/// When `end` does not come after `start` the interval wraps across the
/// year boundary (e.g. December 17 up to January 20).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateInterval {
    start:         MonthDay,
    end:           MonthDay,
    duration_days: u16,
}

/// Error type for date interval operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    /// Start and end are the same day, so the interval covers nothing.
    #[error("Empty date interval: start and end are both {0}")]
    Empty(MonthDay),

    /// The interval only covers February 29, which a common year lacks.
    #[error("Date interval {0}/{1} covers no day of a common year")]
    LeapDayOnly(MonthDay, MonthDay),

    /// Error parsing a bound.
    #[error(transparent)]
    DateError(#[from] DateError),

    /// Invalid interval format.
    #[error("Invalid interval format: {0}")]
    InvalidFormat(String),
}

impl DateInterval {
    /// Creates a new interval, computing its length in a common year.
    ///
    /// # Errors
    /// Returns `IntervalError::Empty` if start == end, and
    /// `IntervalError::LeapDayOnly` for `02-29/03-01`.
    pub fn new(start: MonthDay, end: MonthDay) -> Result<Self, IntervalError> {
        if start == end {
            return Err(IntervalError::Empty(start));
        }
        if start < end && start.common_ordinal0() == end.common_ordinal0() {
            return Err(IntervalError::LeapDayOnly(start, end));
        }
        Ok(Self::from_table(start, end))
    }

    /// Constructor for compile-time tables.
    pub(crate) const fn from_table(start: MonthDay, end: MonthDay) -> Self {
        let from = start.common_ordinal0();
        let to = end.common_ordinal0();
        // Feb 29 and Mar 1 share a common ordinal, so wrapping is decided on
        // leap ordinals.
        let duration_days = if end.leap_ordinal0() > start.leap_ordinal0() {
            to - from
        } else {
            DAYS_IN_COMMON_YEAR - from + to
        };
        Self {
            start,
            end,
            duration_days,
        }
    }

    /// Returns the first day of the interval
    pub const fn start(&self) -> MonthDay {
        self.start
    }

    /// Returns the first day after the interval
    pub const fn end(&self) -> MonthDay {
        self.end
    }

    /// Number of days covered in a common year
    pub const fn duration_days(&self) -> u16 {
        self.duration_days
    }

    /// True when the interval crosses December 31
    pub fn wraps(&self) -> bool {
        self.end <= self.start
    }

    /// Checks whether a day falls inside the interval.
    /// The start day is included and the end day is not.
    pub fn contains(&self, date: MonthDay) -> bool {
        if self.wraps() {
            date >= self.start || date < self.end
        } else {
            (self.start..self.end).contains(&date)
        }
    }
}

impl FromStr for DateInterval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(IntervalError::InvalidFormat(format!(
                "No interval separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    IntervalError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.trim().parse::<MonthDay>()?;
                let end = end_str.trim().parse::<MonthDay>()?;

                Self::new(start, end)
            },
            _ => Err(IntervalError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateInterval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
