use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use serde::Serialize;
use tracing::{trace, warn};

use crate::{
    DAYS_PER_SOLAR_MONTH, DAYS_PER_SOLAR_WEEK, LEAP_DAY_CUTOFF_HOUR, MonthDay, SOLAR_MONTHS, is_leap_year,
    prelude::*,
};

/// Identifies a record in the [`MonthTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonthKey {
    /// One of the thirteen 28-day months (1-13)
    #[display(fmt = "month {_0}")]
    Regular(u8),
    /// New Year, March 20
    #[display(fmt = "year day")]
    YearDay,
    /// Last day of the year, March 19
    #[display(fmt = "festival day")]
    FestivalDay,
    /// Replaces the Festival Day from noon UTC on March 19 of leap years
    #[display(fmt = "leap day")]
    LeapDay,
}

impl MonthKey {
    pub const fn is_special(self) -> bool {
        !matches!(self, Self::Regular(_))
    }
}

/// Error type for month table operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Month number outside 1-13.
    #[error("Invalid month number: {0} (must be 1-{max})", max = SOLAR_MONTHS)]
    InvalidMonth(u8),

    /// Month names cannot be blank.
    #[error("Month name must not be empty")]
    EmptyName,
}

/// One named period of the solar calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthRecord {
    key:    MonthKey,
    name:   String,
    start:  MonthDay,
    days:   u8,
    symbol: &'static str,
}

impl MonthRecord {
    fn regular(number: u8, name: &str, month: u8, day: u8, symbol: &'static str) -> Self {
        Self {
            key: MonthKey::Regular(number),
            name: name.to_owned(),
            start: MonthDay::from_table(month, day),
            days: DAYS_PER_SOLAR_MONTH,
            symbol,
        }
    }

    fn special(key: MonthKey, name: &str, month: u8, day: u8, symbol: &'static str) -> Self {
        Self {
            key,
            name: name.to_owned(),
            start: MonthDay::from_table(month, day),
            days: 1,
            symbol,
        }
    }

    pub const fn key(&self) -> MonthKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Anchor day
    pub const fn start(&self) -> MonthDay {
        self.start
    }

    /// Nominal length: 28 for regular months, 1 for special days
    pub const fn days(&self) -> u8 {
        self.days
    }

    pub const fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Month number for regular months
    pub const fn number(&self) -> Option<u8> {
        match self.key {
            MonthKey::Regular(n) => Some(n),
            MonthKey::YearDay | MonthKey::FestivalDay | MonthKey::LeapDay => None,
        }
    }

    /// Human-readable span, e.g. "March 21 - April 17".
    pub fn span_label(&self) -> String {
        if self.days <= 1 {
            return self.start.long_name();
        }
        // Year 2001 is a fixed common year, so spans never include February 29
        let last = NaiveDate::from_ymd_opt(2001, u32::from(self.start.month()), u32::from(self.start.day()))
            .and_then(|d| d.checked_add_days(chrono::Days::new(u64::from(self.days) - 1)))
            .map(|d| MonthDay::from_date(&d));
        match last {
            Some(last) => format!("{} - {}", self.start.long_name(), last.long_name()),
            None => self.start.long_name(),
        }
    }
}

/// Where an instant sits inside its solar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthPosition {
    pub record:       MonthRecord,
    /// 1-based day counted from the month's anchor
    pub day_of_month: u16,
    /// 1-7 inside the seven-day week of the 28-day month
    pub weekday:      u8,
}

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

impl MonthPosition {
    pub fn weekday_name(&self) -> &'static str {
        WEEKDAY_NAMES[usize::from(self.weekday.saturating_sub(1)) % WEEKDAY_NAMES.len()]
    }
}

const YEAR_DAY: MonthDay = MonthDay::from_table(3, 20);
const YEAR_END: MonthDay = MonthDay::from_table(3, 19);

/// Month number returned when the anchor scan finds nothing.
pub const DEFAULT_MONTH: u8 = SOLAR_MONTHS;

/// The thirteen-month calendar: 13 regular months plus the special days.
///
/// Records are kept in display order: Year Day, months 1 through 13,
/// Festival Day, Leap Day. Only month names can change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTable {
    records: Vec<MonthRecord>,
}

impl Default for MonthTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl MonthTable {
    #[rustfmt::skip]
    pub fn standard() -> Self {
        Self {
            records: vec![
                MonthRecord::special(MonthKey::YearDay, "Year Day (New Year)", 3, 20, "🌟"),
                MonthRecord::regular(1,  "Aurora",   3,  21, "🌅"),
                MonthRecord::regular(2,  "Blossom",  4,  18, "🌸"),
                MonthRecord::regular(3,  "Zephyr",   5,  16, "🌊"),
                MonthRecord::regular(4,  "Solis",    6,  13, "☀️"),
                MonthRecord::regular(5,  "Radiance", 7,  11, "🔆"),
                MonthRecord::regular(6,  "Ember",    8,  8,  "🔥"),
                MonthRecord::regular(7,  "Harvest",  9,  5,  "🌾"),
                MonthRecord::regular(8,  "Equinox",  10, 3,  "⚖️"),
                MonthRecord::regular(9,  "Frost",    10, 31, "❄️"),
                MonthRecord::regular(10, "Yule",     11, 28, "🎄"),
                MonthRecord::regular(11, "Hearth",   12, 26, "🏠"),
                MonthRecord::regular(12, "Twilight", 1,  23, "🌙"),
                MonthRecord::regular(13, "Eclipse",  2,  20, "🌑"),
                MonthRecord::special(MonthKey::FestivalDay, "Year End (Festival Day)", 3, 19, "🎉"),
                MonthRecord::special(MonthKey::LeapDay, "Leap Day", 3, 19, "⏳"),
            ],
        }
    }

    /// Resolves an instant to its month record.
    ///
    /// The instant is normalized to UTC first. March 20 is always Year Day.
    /// March 19 is Leap Day in a leap year from 12:00 UTC on, otherwise the
    /// Festival Day. Every other day belongs to the regular month whose anchor
    /// is the latest one not after it.
    pub fn resolve<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> &MonthRecord {
        let utc = instant.with_timezone(&Utc);
        let key = self.key_for(&utc);
        trace!(%utc, %key, "month lookup");
        self.lookup(key)
    }

    /// The record for a key, if present.
    pub fn record(&self, key: MonthKey) -> Option<&MonthRecord> {
        self.records.iter().find(|r| r.key == key)
    }

    pub fn records(&self) -> &[MonthRecord] {
        &self.records
    }

    /// Regular months in order 1 through 13.
    pub fn regular(&self) -> impl Iterator<Item = &MonthRecord> + '_ {
        self.records.iter().filter(|r| !r.key.is_special())
    }

    /// Renames a regular month.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` for numbers outside 1-13 and
    /// `CalendarError::EmptyName` for blank names.
    pub fn rename(&mut self, number: u8, name: &str) -> Result<(), CalendarError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CalendarError::EmptyName);
        }
        let record = self
            .records
            .iter_mut()
            .find(|r| r.key == MonthKey::Regular(number))
            .ok_or(CalendarError::InvalidMonth(number))?;
        name.clone_into(&mut record.name);
        Ok(())
    }

    /// Locates an instant inside its month: day count from the anchor and the
    /// weekday of the 28-day month. Special days are always day 1.
    pub fn position<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> MonthPosition {
        let utc = instant.with_timezone(&Utc);
        let record = self.lookup(self.key_for(&utc)).clone();
        let date = utc.date_naive();

        let day_of_month = if record.key.is_special() {
            1
        } else {
            anchor_on_or_before(record.start, date)
                .map_or(1, |anchor| u16::try_from((date - anchor).num_days() + 1).unwrap_or(1))
        };
        let weekday = u8::try_from((day_of_month - 1) % u16::from(DAYS_PER_SOLAR_WEEK) + 1).unwrap_or(1);

        MonthPosition {
            record,
            day_of_month,
            weekday,
        }
    }

    fn key_for(&self, utc: &DateTime<Utc>) -> MonthKey {
        let md = MonthDay::from_date(utc);
        if md == YEAR_DAY {
            return MonthKey::YearDay;
        }
        if md == YEAR_END {
            return if is_leap_year(utc.year()) && utc.hour() >= LEAP_DAY_CUTOFF_HOUR {
                MonthKey::LeapDay
            } else {
                MonthKey::FestivalDay
            };
        }

        let target = year_offset(md);
        self.regular()
            .filter(|r| year_offset(r.start) <= target)
            .last()
            .map_or_else(
                || {
                    warn!(date = %md, fallback = DEFAULT_MONTH, "no month anchor matched");
                    MonthKey::Regular(DEFAULT_MONTH)
                },
                |r| r.key,
            )
    }

    fn lookup(&self, key: MonthKey) -> &MonthRecord {
        // The standard table carries every key; fall back to the first record otherwise
        self.record(key).unwrap_or(&self.records[0])
    }
}

/// Offset from the first month's anchor (March 21) counted on leap-year
/// ordinals, so February 29 gets its own slot and the order wraps at year end.
fn year_offset(md: MonthDay) -> u16 {
    const FIRST_ANCHOR: MonthDay = MonthDay::from_table(3, 21);
    const LEAP_YEAR_DAYS: u16 = 366;
    (md.leap_ordinal0() + LEAP_YEAR_DAYS - FIRST_ANCHOR.leap_ordinal0()) % LEAP_YEAR_DAYS
}

/// The concrete date of `anchor` on or before `date`.
fn anchor_on_or_before(anchor: MonthDay, date: NaiveDate) -> Option<NaiveDate> {
    let this_year = anchor.in_year(date.year())?;
    if this_year <= date {
        Some(this_year)
    } else {
        anchor.in_year(date.year() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("valid UTC timestamp")
    }

    #[test]
    fn test_special_day_cases() {
        struct TestCase {
            instant:     DateTime<Utc>,
            expected:    MonthKey,
            description: &'static str,
        }

        let cases = [
            TestCase {
                instant:     utc(2023, 3, 20, 0),
                expected:    MonthKey::YearDay,
                description: "Year Day in a common year",
            },
            TestCase {
                instant:     utc(2024, 3, 20, 23),
                expected:    MonthKey::YearDay,
                description: "Year Day in a leap year",
            },
            TestCase {
                instant:     utc(2023, 3, 19, 15),
                expected:    MonthKey::FestivalDay,
                description: "common year afternoon stays Festival Day",
            },
            TestCase {
                instant:     utc(2024, 3, 19, 11),
                expected:    MonthKey::FestivalDay,
                description: "leap year morning is still Festival Day",
            },
            TestCase {
                instant:     utc(2024, 3, 19, 12),
                expected:    MonthKey::LeapDay,
                description: "leap year noon becomes Leap Day",
            },
            TestCase {
                instant:     utc(1900, 3, 19, 18),
                expected:    MonthKey::FestivalDay,
                description: "1900 is not a leap year",
            },
        ];

        let table = MonthTable::standard();
        for case in &cases {
            assert_eq!(table.resolve(&case.instant).key(), case.expected, "{}", case.description);
        }
    }

    #[test]
    fn test_regular_month_cases() {
        struct TestCase {
            instant:  DateTime<Utc>,
            expected: u8,
        }

        let cases = [
            TestCase {
                instant:  utc(2025, 3, 21, 0),
                expected: 1,
            },
            TestCase {
                instant:  utc(2025, 4, 17, 0),
                expected: 1,
            },
            TestCase {
                instant:  utc(2025, 4, 18, 0),
                expected: 2,
            },
            TestCase {
                instant:  utc(2025, 12, 25, 0),
                expected: 10,
            },
            TestCase {
                instant:  utc(2025, 12, 26, 0),
                expected: 11,
            },
            TestCase {
                instant:  utc(2026, 1, 1, 0),
                expected: 11,
            },
            TestCase {
                instant:  utc(2026, 1, 23, 0),
                expected: 12,
            },
            TestCase {
                instant:  utc(2024, 2, 29, 0),
                expected: 13,
            },
            TestCase {
                instant:  utc(2025, 3, 18, 0),
                expected: 13,
            },
        ];

        let table = MonthTable::standard();
        for case in &cases {
            assert_eq!(
                table.resolve(&case.instant).number(),
                Some(case.expected),
                "{}",
                case.instant
            );
        }
    }

    #[test]
    fn test_timezone_is_normalized_to_utc() {
        let table = MonthTable::standard();
        // 2024-03-19 20:00 at UTC-10 is 2024-03-20 06:00 UTC
        let honolulu = FixedOffset::west_opt(10 * 3600).expect("valid offset");
        let local = honolulu
            .with_ymd_and_hms(2024, 3, 19, 20, 0, 0)
            .single()
            .expect("valid local time");
        assert_eq!(table.resolve(&local).key(), MonthKey::YearDay);

        // 2024-03-19 09:00 at UTC+5 is 04:00 UTC, before the cutoff
        let east = FixedOffset::east_opt(5 * 3600).expect("valid offset");
        let local = east
            .with_ymd_and_hms(2024, 3, 19, 9, 0, 0)
            .single()
            .expect("valid local time");
        assert_eq!(table.resolve(&local).key(), MonthKey::FestivalDay);
    }

    #[test]
    fn test_every_day_resolves() {
        let table = MonthTable::standard();
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let mut counts = std::collections::HashMap::new();
        while date.year() == 2024 {
            let instant = date.and_hms_opt(0, 0, 0).expect("valid time").and_utc();
            *counts.entry(table.resolve(&instant).key()).or_insert(0u32) += 1;
            date = date.succ_opt().expect("date in range");
        }

        for number in 1..=12 {
            assert_eq!(counts.get(&MonthKey::Regular(number)), Some(&28), "month {number}");
        }
        assert_eq!(counts.get(&MonthKey::Regular(13)), Some(&28), "leap year Eclipse");
        assert_eq!(counts.get(&MonthKey::YearDay), Some(&1));
        assert_eq!(counts.get(&MonthKey::FestivalDay), Some(&1));
    }

    #[test]
    fn test_rename() {
        let mut table = MonthTable::standard();
        table.rename(4, "Zenith").expect("failed to rename month");
        assert_eq!(
            table.record(MonthKey::Regular(4)).map(MonthRecord::name),
            Some("Zenith")
        );

        assert_eq!(table.rename(0, "Nope"), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(table.rename(14, "Nope"), Err(CalendarError::InvalidMonth(14)));
        assert_eq!(table.rename(3, "   "), Err(CalendarError::EmptyName));
    }

    #[test]
    fn test_position() {
        let table = MonthTable::standard();

        let position = table.position(&utc(2025, 3, 21, 8));
        assert_eq!(position.record.number(), Some(1));
        assert_eq!(position.day_of_month, 1);
        assert_eq!(position.weekday, 1);
        assert_eq!(position.weekday_name(), "Monday");

        let position = table.position(&utc(2025, 4, 17, 8));
        assert_eq!(position.day_of_month, 28);
        assert_eq!(position.weekday, 7);

        let position = table.position(&utc(2026, 1, 1, 0));
        assert_eq!(position.record.number(), Some(11));
        assert_eq!(position.day_of_month, 7);

        let position = table.position(&utc(2024, 3, 18, 0));
        assert_eq!(position.day_of_month, 28, "leap year Eclipse includes February 29");

        let position = table.position(&utc(2025, 3, 20, 0));
        assert_eq!(position.record.key(), MonthKey::YearDay);
        assert_eq!(position.day_of_month, 1);
    }

    #[test]
    fn test_span_label() {
        let table = MonthTable::standard();
        let aurora = table.record(MonthKey::Regular(1)).expect("month 1 exists");
        assert_eq!(aurora.span_label(), "March 21 - April 17");

        let year_day = table.record(MonthKey::YearDay).expect("year day exists");
        assert_eq!(year_day.span_label(), "March 20");
    }

    #[test]
    fn test_records_order() {
        let table = MonthTable::standard();
        assert_eq!(table.records().len(), 16);
        assert_eq!(table.records()[0].key(), MonthKey::YearDay);
        assert_eq!(table.records()[15].key(), MonthKey::LeapDay);
        let numbers: Vec<u8> = table.regular().filter_map(MonthRecord::number).collect();
        assert_eq!(numbers, (1..=13).collect::<Vec<_>>());
    }
}
