//! Equinoxes and solstices.
//!
//! The [`SeasonalEventProvider`] trait is the seam between the calendar and
//! whatever computes the yearly seasonal markers. [`MeeusProvider`] is the
//! built-in implementation, following Jean Meeus, *Astronomical Algorithms*
//! (2nd ed.), chapter 27.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::prelude::*;

/// The four astronomical season boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
pub enum Season {
    #[display(fmt = "Spring Equinox")]
    SpringEquinox,
    #[display(fmt = "Summer Solstice")]
    SummerSolstice,
    #[display(fmt = "Autumn Equinox")]
    AutumnEquinox,
    #[display(fmt = "Winter Solstice")]
    WinterSolstice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum EventKind {
    Equinox,
    Solstice,
}

impl Season {
    pub const ALL: [Self; 4] = [
        Self::SpringEquinox,
        Self::SummerSolstice,
        Self::AutumnEquinox,
        Self::WinterSolstice,
    ];

    pub const fn kind(self) -> EventKind {
        match self {
            Self::SpringEquinox | Self::AutumnEquinox => EventKind::Equinox,
            Self::SummerSolstice | Self::WinterSolstice => EventKind::Solstice,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SpringEquinox => "Spring Equinox",
            Self::SummerSolstice => "Summer Solstice",
            Self::AutumnEquinox => "Autumn Equinox",
            Self::WinterSolstice => "Winter Solstice",
        }
    }
}

/// A single equinox or solstice instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SeasonalEvent {
    pub timestamp: DateTime<Utc>,
    pub season:    Season,
}

impl SeasonalEvent {
    pub const fn kind(&self) -> EventKind {
        self.season.kind()
    }

    pub const fn label(&self) -> &'static str {
        self.season.label()
    }
}

/// The four seasonal markers of one year, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SeasonalMarkers {
    pub spring_equinox:  DateTime<Utc>,
    pub summer_solstice: DateTime<Utc>,
    pub autumn_equinox:  DateTime<Utc>,
    pub winter_solstice: DateTime<Utc>,
}

impl SeasonalMarkers {
    pub const fn get(&self, season: Season) -> DateTime<Utc> {
        match season {
            Season::SpringEquinox => self.spring_equinox,
            Season::SummerSolstice => self.summer_solstice,
            Season::AutumnEquinox => self.autumn_equinox,
            Season::WinterSolstice => self.winter_solstice,
        }
    }

    /// The four events in season order (spring first).
    pub fn events(&self) -> [SeasonalEvent; 4] {
        Season::ALL.map(|season| SeasonalEvent {
            timestamp: self.get(season),
            season,
        })
    }
}

/// Error type for seasonal event providers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// The provider has no data for this year.
    #[error("Year {year} is outside the supported range {min}..={max}")]
    UnsupportedYear { year: i32, min: i32, max: i32 },

    /// The computed instant cannot be represented as a UTC timestamp.
    #[error("Julian day {0} cannot be represented as a UTC timestamp")]
    Timestamp(f64),

    /// Any other provider-specific failure.
    #[error("Seasonal event provider failed: {0}")]
    Other(String),
}

/// Source of the yearly equinox and solstice instants.
pub trait SeasonalEventProvider {
    /// Returns the four seasonal markers of `year` in UTC.
    ///
    /// # Errors
    /// Returns a `ProviderError` if the year is unsupported or the
    /// computation fails.
    fn equinox_solstice(&self, year: i32) -> Result<SeasonalMarkers, ProviderError>;
}

impl<P: SeasonalEventProvider + ?Sized> SeasonalEventProvider for &P {
    fn equinox_solstice(&self, year: i32) -> Result<SeasonalMarkers, ProviderError> {
        (**self).equinox_solstice(year)
    }
}

/// Earliest year [`MeeusProvider`] accepts.
pub const MEEUS_MIN_YEAR: i32 = -1000;
/// Latest year [`MeeusProvider`] accepts.
pub const MEEUS_MAX_YEAR: i32 = 3000;

/// Equinox and solstice calculator after Meeus, chapter 27.
///
/// Mean instants come from the table 27.A/27.B polynomials, corrected by the
/// 24 periodic terms of table 27.C, then shifted from Terrestrial Time to UTC
/// with the Espenak-Meeus ΔT polynomials. Accuracy is better than a minute
/// for recent centuries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeeusProvider;

impl MeeusProvider {
    pub const fn new() -> Self {
        Self
    }

    /// Instant of one seasonal marker as a Julian Ephemeris Day (TT).
    ///
    /// # Errors
    /// Returns `ProviderError::UnsupportedYear` outside -1000..=3000.
    pub fn julian_ephemeris_day(year: i32, season: Season) -> Result<f64, ProviderError> {
        if !(MEEUS_MIN_YEAR..=MEEUS_MAX_YEAR).contains(&year) {
            return Err(ProviderError::UnsupportedYear {
                year,
                min: MEEUS_MIN_YEAR,
                max: MEEUS_MAX_YEAR,
            });
        }

        let jde0 = mean_jde(year, season);
        let t = (jde0 - J2000) / DAYS_PER_JULIAN_CENTURY;
        let w = (35_999.373f64.mul_add(t, -2.47)).to_radians();
        let delta_lambda = 0.0007f64.mul_add((2.0 * w).cos(), 0.0334f64.mul_add(w.cos(), 1.0));
        let s: f64 = PERIODIC_TERMS
            .iter()
            .map(|&(a, b, c)| a * c.mul_add(t, b).to_radians().cos())
            .sum();

        Ok(jde0 + (0.00001 * s) / delta_lambda)
    }
}

impl SeasonalEventProvider for MeeusProvider {
    fn equinox_solstice(&self, year: i32) -> Result<SeasonalMarkers, ProviderError> {
        debug!(year, "computing equinoxes and solstices");
        let instant = |season| Self::julian_ephemeris_day(year, season).and_then(|jde| jde_to_utc(jde, year));

        Ok(SeasonalMarkers {
            spring_equinox:  instant(Season::SpringEquinox)?,
            summer_solstice: instant(Season::SummerSolstice)?,
            autumn_equinox:  instant(Season::AutumnEquinox)?,
            winter_solstice: instant(Season::WinterSolstice)?,
        })
    }
}

const J2000: f64 = 2_451_545.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Mean equinox/solstice polynomials in Y, tables 27.A (years -1000..1000,
/// Y = year/1000) and 27.B (years 1000..3000, Y = (year-2000)/1000).
#[rustfmt::skip]
static MEAN_TERMS_BEFORE_1000: [[f64; 5]; 4] = [
    [1_721_139.29189, 365_242.137_40,  0.061_34,  0.001_11, -0.000_71],
    [1_721_233.25401, 365_241.725_62, -0.053_23,  0.009_07,  0.000_25],
    [1_721_325.70455, 365_242.495_58, -0.116_77, -0.002_97,  0.000_74],
    [1_721_414.39987, 365_242.882_57, -0.007_69, -0.009_33, -0.000_06],
];

#[rustfmt::skip]
static MEAN_TERMS_FROM_1000: [[f64; 5]; 4] = [
    [2_451_623.80984, 365_242.374_04,  0.051_69, -0.004_11, -0.000_57],
    [2_451_716.56767, 365_241.626_03,  0.003_25,  0.008_88, -0.000_30],
    [2_451_810.21715, 365_242.017_67, -0.115_75,  0.003_37,  0.000_78],
    [2_451_900.05952, 365_242.740_49, -0.062_23, -0.008_23,  0.000_32],
];

/// Periodic terms (A, B, C) of table 27.C; each contributes A·cos(B + C·T)
/// with B and C in degrees.
#[rustfmt::skip]
static PERIODIC_TERMS: [(f64, f64, f64); 24] = [
    (485.0, 324.96,  1_934.136),
    (203.0, 337.23, 32_964.467),
    (199.0, 342.08,     20.186),
    (182.0,  27.85, 445_267.112),
    (156.0,  73.14, 45_036.886),
    (136.0, 171.52, 22_518.443),
    ( 77.0, 222.54, 65_928.934),
    ( 74.0, 296.72,  3_034.906),
    ( 70.0, 243.58,  9_037.513),
    ( 58.0, 119.81, 33_718.147),
    ( 52.0, 297.17,    150.678),
    ( 50.0,  21.02,  2_281.226),
    ( 45.0, 247.54, 29_929.562),
    ( 44.0, 325.15, 31_555.956),
    ( 29.0,  60.93,  4_443.417),
    ( 18.0, 155.12, 67_555.328),
    ( 17.0, 288.79,  4_562.452),
    ( 16.0, 198.04, 62_894.029),
    ( 14.0, 199.76, 31_436.921),
    ( 12.0,  95.39, 14_577.848),
    ( 12.0, 287.11, 31_931.756),
    ( 12.0, 320.81, 34_777.259),
    (  9.0, 227.73,  1_222.114),
    (  8.0,  15.45, 16_859.074),
];

fn mean_jde(year: i32, season: Season) -> f64 {
    let index = season as usize;
    let (coefficients, y) = if year < 1000 {
        (&MEAN_TERMS_BEFORE_1000[index], f64::from(year) / 1000.0)
    } else {
        (&MEAN_TERMS_FROM_1000[index], f64::from(year - 2000) / 1000.0)
    };
    coefficients.iter().rev().fold(0.0, |acc, &c| acc.mul_add(y, c))
}

/// ΔT = TT − UT in seconds, Espenak-Meeus polynomial fits.
fn delta_t_seconds(year: i32) -> f64 {
    let y = f64::from(year);
    match year {
        2005..=2049 => {
            let t = y - 2000.0;
            0.005_589f64.mul_add(t * t, 0.322_17f64.mul_add(t, 62.92))
        },
        1986..=2004 => {
            let t = y - 2000.0;
            let t2 = t * t;
            let t3 = t2 * t;
            63.86 + 0.3345 * t - 0.060_374 * t2 + 0.001_727_5 * t3 + 0.000_651_814 * t2 * t2
                + 0.000_023_735_99 * t3 * t2
        },
        1961..=1985 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t * t / 260.0 - t * t * t / 718.0
        },
        2050..=2149 => {
            let u = (y - 1820.0) / 100.0;
            0.5628f64.mul_add(-(2150.0 - y), 32.0f64.mul_add(u * u, -20.0))
        },
        _ => {
            let u = (y - 1820.0) / 100.0;
            32.0f64.mul_add(u * u, -20.0)
        },
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn jde_to_utc(jde: f64, year: i32) -> Result<DateTime<Utc>, ProviderError> {
    let jd_ut = jde - delta_t_seconds(year) / SECONDS_PER_DAY;
    let unix = (jd_ut - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
    let secs = unix.floor();
    let nanos = ((unix - secs) * 1e9).round().min(999_999_999.0);
    DateTime::<Utc>::from_timestamp(secs as i64, nanos as u32).ok_or(ProviderError::Timestamp(jd_ut))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_meeus_example_27a() {
        // Meeus example 27.a: June solstice 1962 at JDE 2437837.39245
        let jde = MeeusProvider::julian_ephemeris_day(1962, Season::SummerSolstice)
            .expect("failed to compute solstice");
        assert!((jde - 2_437_837.392_45).abs() < 0.002, "got {jde}");
    }

    #[test]
    fn test_2024_dates() {
        struct TestCase {
            season: Season,
            month:  u32,
            day:    u32,
            hour:   u32,
        }

        // Published UTC instants: Mar 20 03:06, Jun 20 20:51, Sep 22 12:44, Dec 21 09:20
        let cases = [
            TestCase {
                season: Season::SpringEquinox,
                month:  3,
                day:    20,
                hour:   3,
            },
            TestCase {
                season: Season::SummerSolstice,
                month:  6,
                day:    20,
                hour:   20,
            },
            TestCase {
                season: Season::AutumnEquinox,
                month:  9,
                day:    22,
                hour:   12,
            },
            TestCase {
                season: Season::WinterSolstice,
                month:  12,
                day:    21,
                hour:   9,
            },
        ];

        let markers = MeeusProvider::new().equinox_solstice(2024).expect("failed to compute 2024 markers");
        for case in &cases {
            let instant = markers.get(case.season);
            assert_eq!(instant.year(), 2024);
            assert_eq!(instant.month(), case.month, "{}", case.season);
            assert_eq!(instant.day(), case.day, "{}", case.season);
            assert_eq!(instant.hour(), case.hour, "{}", case.season);
        }
    }

    #[test]
    fn test_markers_are_ordered() {
        let provider = MeeusProvider::new();
        for year in [-500, 1000, 1582, 1900, 2000, 2100, 2999] {
            let markers = provider.equinox_solstice(year).expect("failed to compute markers");
            assert!(markers.spring_equinox < markers.summer_solstice, "{year}");
            assert!(markers.summer_solstice < markers.autumn_equinox, "{year}");
            assert!(markers.autumn_equinox < markers.winter_solstice, "{year}");
        }
    }

    #[test]
    fn test_unsupported_year() {
        let provider = MeeusProvider::new();
        assert!(matches!(
            provider.equinox_solstice(3001),
            Err(ProviderError::UnsupportedYear { year: 3001, .. })
        ));
        assert!(matches!(
            provider.equinox_solstice(-1001),
            Err(ProviderError::UnsupportedYear { year: -1001, .. })
        ));
    }

    #[test]
    fn test_events_and_labels() {
        let markers = MeeusProvider::new().equinox_solstice(2025).expect("failed to compute markers");
        let events = markers.events();
        assert_eq!(events[0].season, Season::SpringEquinox);
        assert_eq!(events[0].kind(), EventKind::Equinox);
        assert_eq!(events[1].label(), "Summer Solstice");
        assert_eq!(events[3].kind(), EventKind::Solstice);
        assert_eq!(Season::AutumnEquinox.to_string(), "Autumn Equinox");
    }

    #[test]
    fn test_delta_t_is_continuous_enough() {
        assert!((delta_t_seconds(2000) - 63.86).abs() < 0.01);
        assert!((delta_t_seconds(2005) - delta_t_seconds(2004)).abs() < 1.0);
        assert!(delta_t_seconds(1000) > 1000.0, "ΔT grows to many minutes in the past");
    }
}
