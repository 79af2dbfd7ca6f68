use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::{DateInterval, MonthDay, prelude::*};

/// The thirteen constellations of the sidereal zodiac, Ophiuchus included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Constellation {
    Scorpius,
    Ophiuchus,
    Sagittarius,
    Capricornus,
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
}

/// Error returned when a name is not one of the thirteen constellations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown constellation: {0}")]
pub struct UnknownConstellation(pub String);

impl Constellation {
    /// All constellations in table order, starting with Scorpius.
    pub const ALL: [Self; 13] = [
        Self::Scorpius,
        Self::Ophiuchus,
        Self::Sagittarius,
        Self::Capricornus,
        Self::Aquarius,
        Self::Pisces,
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Scorpius => "Scorpius",
            Self::Ophiuchus => "Ophiuchus",
            Self::Sagittarius => "Sagittarius",
            Self::Capricornus => "Capricornus",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
        }
    }
}

impl FromStr for Constellation {
    type Err = UnknownConstellation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownConstellation(trimmed.to_owned()))
    }
}

/// Returned by [`ConstellationTable::resolve`] when no interval matches.
pub const DEFAULT_CONSTELLATION: Constellation = Constellation::Scorpius;

#[rustfmt::skip]
static STANDARD_TABLE: [(Constellation, DateInterval); 13] = [
    (Constellation::Scorpius,    DateInterval::from_table(MonthDay::from_table(11, 23), MonthDay::from_table(11, 29))),
    (Constellation::Ophiuchus,   DateInterval::from_table(MonthDay::from_table(11, 29), MonthDay::from_table(12, 17))),
    (Constellation::Sagittarius, DateInterval::from_table(MonthDay::from_table(12, 17), MonthDay::from_table(1, 20))),
    (Constellation::Capricornus, DateInterval::from_table(MonthDay::from_table(1, 20),  MonthDay::from_table(2, 16))),
    (Constellation::Aquarius,    DateInterval::from_table(MonthDay::from_table(2, 16),  MonthDay::from_table(3, 11))),
    (Constellation::Pisces,      DateInterval::from_table(MonthDay::from_table(3, 11),  MonthDay::from_table(4, 18))),
    (Constellation::Aries,       DateInterval::from_table(MonthDay::from_table(4, 18),  MonthDay::from_table(5, 13))),
    (Constellation::Taurus,      DateInterval::from_table(MonthDay::from_table(5, 13),  MonthDay::from_table(6, 21))),
    (Constellation::Gemini,      DateInterval::from_table(MonthDay::from_table(6, 21),  MonthDay::from_table(7, 20))),
    (Constellation::Cancer,      DateInterval::from_table(MonthDay::from_table(7, 20),  MonthDay::from_table(8, 10))),
    (Constellation::Leo,         DateInterval::from_table(MonthDay::from_table(8, 10),  MonthDay::from_table(9, 16))),
    (Constellation::Virgo,       DateInterval::from_table(MonthDay::from_table(9, 16),  MonthDay::from_table(10, 30))),
    (Constellation::Libra,       DateInterval::from_table(MonthDay::from_table(10, 30), MonthDay::from_table(11, 23))),
];

/// Ordered mapping from constellation to its yearly date interval.
///
/// The intervals partition the year: every day falls in exactly one of them.
/// Only Sagittarius crosses the December/January boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstellationTable {
    entries: Vec<(Constellation, DateInterval)>,
}

impl Default for ConstellationTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ConstellationTable {
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_TABLE.to_vec(),
        }
    }

    /// Resolves a month/day to its constellation.
    ///
    /// The boundary day belongs to the constellation starting on it. Falls back
    /// to [`DEFAULT_CONSTELLATION`] if the table leaves a gap.
    pub fn resolve(&self, date: MonthDay) -> Constellation {
        self.try_resolve(date).unwrap_or_else(|| {
            warn!(%date, fallback = %DEFAULT_CONSTELLATION, "no constellation interval matched");
            DEFAULT_CONSTELLATION
        })
    }

    /// Resolves without a fallback.
    pub fn try_resolve(&self, date: MonthDay) -> Option<Constellation> {
        let found = self
            .entries
            .iter()
            .find(|(_, interval)| interval.contains(date))
            .map(|(constellation, _)| *constellation);
        trace!(%date, ?found, "constellation lookup");
        found
    }

    pub fn resolve_date<D: Datelike>(&self, date: &D) -> Constellation {
        self.resolve(MonthDay::from_date(date))
    }

    pub fn interval(&self, constellation: Constellation) -> Option<DateInterval> {
        self.entries
            .iter()
            .find(|(c, _)| *c == constellation)
            .map(|(_, interval)| *interval)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Constellation, DateInterval)> + '_ {
        self.entries.iter().copied()
    }

    /// The constellation before this one in table order (wrapping).
    pub fn previous(&self, constellation: Constellation) -> Option<Constellation> {
        let idx = self.position(constellation)?;
        let len = self.entries.len();
        Some(self.entries[(idx + len - 1) % len].0)
    }

    /// The constellation after this one in table order (wrapping).
    pub fn next(&self, constellation: Constellation) -> Option<Constellation> {
        let idx = self.position(constellation)?;
        Some(self.entries[(idx + 1) % self.entries.len()].0)
    }

    /// Concrete start date of every constellation in `year`, in date order.
    pub fn transitions(&self, year: i32) -> Vec<(Constellation, NaiveDate)> {
        let mut dates: Vec<_> = self
            .entries
            .iter()
            .filter_map(|(c, interval)| interval.start().in_year(year).map(|d| (*c, d)))
            .collect();
        dates.sort_by_key(|(_, date)| *date);
        dates
    }

    fn position(&self, constellation: Constellation) -> Option<usize> {
        self.entries.iter().position(|(c, _)| *c == constellation)
    }
}
