use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    GREGORIAN_MONTH_NAMES, LEAP_YEAR_CYCLE, MAX_MONTH, MIN_DAY, MONTH_DAY_SEPARATOR,
};
use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::num::NonZeroU8;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {month:02}")]
    InvalidDay { month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

/// A year-agnostic calendar position (month and day of month).
///
/// Any day that exists in some Gregorian year is valid, so February 29 is
/// accepted. Ordering is chronological within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: NonZeroU8,
    day:   NonZeroU8,
}

impl MonthDay {
    /// Creates a new `MonthDay`, validating the month and the day against the
    /// longest form of that month.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` or `DateError::InvalidDay`.
    pub fn new(month: u8, day: u8) -> Result<Self, DateError> {
        let month_nz = NonZeroU8::new(month).ok_or(DateError::InvalidMonth(month))?;
        if month > MAX_MONTH {
            return Err(DateError::InvalidMonth(month));
        }
        let day_nz = NonZeroU8::new(day).ok_or(DateError::InvalidDay { month, day })?;
        if day > max_days_in_month(month) {
            return Err(DateError::InvalidDay { month, day });
        }
        Ok(Self {
            month: month_nz,
            day:   day_nz,
        })
    }

    /// Constructor for compile-time tables. Invalid input fails const evaluation.
    pub(crate) const fn from_table(month: u8, day: u8) -> Self {
        assert!(month != 0, "table month must be non-zero");
        assert!(month <= MAX_MONTH, "table month out of range");
        assert!(day >= MIN_DAY, "table day must be non-zero");
        assert!(day <= max_days_in_month(month), "table day out of range");
        match (NonZeroU8::new(month), NonZeroU8::new(day)) {
            (Some(month), Some(day)) => Self { month, day },
            _ => panic!("table month/day must be non-zero"),
        }
    }

    /// Extracts the month and day of any chrono date-like value.
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        // chrono guarantees month in 1..=12 and a valid day for that month
        Self::from_table(date.month() as u8, date.day() as u8)
    }

    /// Returns the month (1-12)
    #[inline]
    pub const fn month(self) -> u8 {
        self.month.get()
    }

    /// Returns the day of month
    #[inline]
    pub const fn day(self) -> u8 {
        self.day.get()
    }

    /// Returns true for February 29
    pub const fn is_leap_day(self) -> bool {
        self.month.get() == FEBRUARY && self.day.get() == FEBRUARY_DAYS_LEAP
    }

    /// Materializes this position in a concrete year.
    /// Returns `None` for February 29 in a common year.
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, u32::from(self.month()), u32::from(self.day()))
    }

    /// Zero-based day offset from January 1 in a common year.
    /// February 29 shares its offset with March 1.
    pub const fn common_ordinal0(self) -> u16 {
        let month = self.month.get();
        let mut offset = 0u16;
        let mut m = 1u8;
        while m < month {
            offset += DAYS_IN_MONTH[m as usize] as u16;
            m += 1;
        }
        let day = if self.is_leap_day() {
            FEBRUARY_DAYS_LEAP
        } else {
            self.day.get()
        };
        offset + day as u16 - 1
    }

    /// Zero-based day offset from January 1 in a leap year.
    /// Every `MonthDay` gets a distinct offset here.
    pub const fn leap_ordinal0(self) -> u16 {
        let month = self.month.get();
        let mut offset = 0u16;
        let mut m = 1u8;
        while m < month {
            offset += max_days_in_month(m) as u16;
            m += 1;
        }
        offset + self.day.get() as u16 - 1
    }

    /// English form, e.g. "March 20"
    pub fn long_name(self) -> String {
        format!("{} {}", GREGORIAN_MONTH_NAMES[self.month() as usize], self.day())
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{MONTH_DAY_SEPARATOR}{:02}", self.month(), self.day())
    }
}

impl FromStr for MonthDay {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let (month_str, day_str) = trimmed
            .split_once(MONTH_DAY_SEPARATOR)
            .ok_or_else(|| DateError::InvalidFormat(trimmed.to_owned()))?;
        let month = month_str
            .trim()
            .parse::<u8>()
            .map_err(|_| DateError::InvalidFormat(trimmed.to_owned()))?;
        let day = day_str
            .trim()
            .parse::<u8>()
            .map_err(|_| DateError::InvalidFormat(trimmed.to_owned()))?;

        Self::new(month, day)
    }
}

impl serde::Serialize for MonthDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for MonthDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Longest length a month can have in any year
const fn max_days_in_month(month: u8) -> u8 {
    if month == FEBRUARY {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
