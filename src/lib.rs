//! A thirteen-month solar calendar with a thirteen-constellation zodiac.
//!
//! Given a date, the crate resolves:
//! - the solar month (thirteen 28-day months plus Year Day, Festival Day and
//!   a Leap Day in leap years),
//! - the constellation whose fixed yearly interval contains the date,
//! - the position inside the precession Great Year,
//! - the surrounding equinoxes, solstices and cross-quarter festivals.
//!
//! [`SolarCalendar`] is the usual entry point.
//!
//! ```
//! use chrono::NaiveDate;
//! use solar_calendar::{Constellation, SolarCalendar};
//!
//! let calendar = SolarCalendar::new();
//! let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
//! assert_eq!(calendar.constellation_on(&date), Constellation::Sagittarius);
//! ```

mod calendar;
mod config;
mod consts;
mod constellation;
mod interval;
mod month;
mod prelude;
mod types;

pub mod cross_quarter;
pub mod precession;
pub mod seasons;
pub mod tarot;

pub use calendar::{CalendarEvent, SolarCalendar};
pub use config::{CalendarConfig, ConfigError, MonthRename};
pub use consts::*;
pub use constellation::{Constellation, ConstellationTable, DEFAULT_CONSTELLATION, UnknownConstellation};
pub use cross_quarter::{CrossQuarter, CrossQuarterEvent, CrossQuarterMode};
pub use interval::{DateInterval, IntervalError};
pub use month::{CalendarError, DEFAULT_MONTH, MonthKey, MonthPosition, MonthRecord, MonthTable};
pub use precession::PrecessionState;
pub use seasons::{EventKind, MeeusProvider, ProviderError, Season, SeasonalEvent, SeasonalEventProvider, SeasonalMarkers};
pub use types::{DateError, MonthDay, days_in_month, is_leap_year};
