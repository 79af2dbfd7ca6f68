use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    CalendarConfig, CalendarError, Constellation, ConstellationTable, CrossQuarterEvent, CrossQuarterMode,
    DAYS_PER_SOLAR_MONTH,
    MARCH, MeeusProvider, MonthKey, MonthPosition, MonthRecord, MonthTable, PrecessionState, ProviderError,
    SOLAR_MONTHS, SeasonalEventProvider, SeasonalMarkers, cross_quarter, precession,
    tarot::{Marker, Reading, SpecialCard, special_card},
};

/// An equinox, solstice or cross-quarter festival at a concrete instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarEvent {
    pub timestamp: DateTime<Utc>,
    pub marker:    Marker,
}

impl CalendarEvent {
    pub const fn special_card(&self) -> SpecialCard {
        special_card(self.marker)
    }
}

/// Entry point tying the resolvers, the seasonal provider and configuration
/// together.
///
/// Apart from [`SolarCalendar::rename_month`], nothing here mutates state, so
/// repeated calls with the same input give the same answer.
#[derive(Debug, Clone)]
pub struct SolarCalendar<P = MeeusProvider> {
    constellations: ConstellationTable,
    months:         MonthTable,
    provider:       P,
    config:         CalendarConfig,
}

impl Default for SolarCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl SolarCalendar {
    /// Standard tables, default configuration and the Meeus provider.
    pub fn new() -> Self {
        Self::with_provider(MeeusProvider::new())
    }

    /// Standard tables with the Meeus provider and the given configuration.
    ///
    /// # Errors
    /// Returns a `CalendarError` if a configured rename is invalid.
    pub fn with_config(config: CalendarConfig) -> Result<Self, CalendarError> {
        Self::from_parts(ConstellationTable::standard(), MonthTable::standard(), MeeusProvider::new(), config)
    }
}

impl<P: SeasonalEventProvider> SolarCalendar<P> {
    pub fn with_provider(provider: P) -> Self {
        Self {
            constellations: ConstellationTable::standard(),
            months: MonthTable::standard(),
            provider,
            config: CalendarConfig::default(),
        }
    }

    /// Assembles a calendar and applies the configured month renames.
    ///
    /// # Errors
    /// Returns a `CalendarError` if a configured rename is invalid.
    pub fn from_parts(
        constellations: ConstellationTable,
        mut months: MonthTable,
        provider: P,
        config: CalendarConfig,
    ) -> Result<Self, CalendarError> {
        for rename in &config.renames {
            months.rename(rename.month, &rename.name)?;
        }
        Ok(Self {
            constellations,
            months,
            provider,
            config,
        })
    }

    pub const fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub const fn constellations(&self) -> &ConstellationTable {
        &self.constellations
    }

    /// All month records: Year Day, months 1-13, Festival Day, Leap Day.
    pub fn months(&self) -> &[MonthRecord] {
        self.months.records()
    }

    pub fn current_month(&self) -> &MonthRecord {
        self.month_at(&Utc::now())
    }

    pub fn month_at<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> &MonthRecord {
        self.months.resolve(instant)
    }

    pub fn month_position<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> MonthPosition {
        self.months.position(instant)
    }

    pub fn current_constellation(&self) -> Constellation {
        self.constellation_on(&Utc::now())
    }

    pub fn constellation_on<D: Datelike>(&self, date: &D) -> Constellation {
        self.constellations.resolve_date(date)
    }

    /// The 28 consecutive dates of a regular month.
    ///
    /// `year` is the solar year, which begins in March: months anchored in
    /// January or February fall in `year + 1`. Returns an empty list for
    /// month numbers outside 1-13 and for dates chrono cannot represent.
    pub fn month_dates(&self, year: i32, month: u8) -> Vec<NaiveDate> {
        if !(1..=SOLAR_MONTHS).contains(&month) {
            return Vec::new();
        }
        let Some(record) = self.months.record(MonthKey::Regular(month)) else {
            return Vec::new();
        };

        let anchor = record.start();
        let year = if anchor.month() < MARCH { year.checked_add(1) } else { Some(year) };
        year.and_then(|y| anchor.in_year(y)).map_or_else(Vec::new, |start| {
            start.iter_days().take(usize::from(DAYS_PER_SOLAR_MONTH)).collect()
        })
    }

    /// # Errors
    /// Propagates the provider's error.
    pub fn equinox_solstice_dates(&self, year: i32) -> Result<SeasonalMarkers, ProviderError> {
        self.provider.equinox_solstice(year)
    }

    /// Cross-quarter festivals of `year`, paired according to the configured
    /// [`CrossQuarterMode`](crate::CrossQuarterMode).
    ///
    /// # Errors
    /// Propagates the provider's error.
    pub fn cross_quarter_dates(&self, year: i32) -> Result<Vec<CrossQuarterEvent>, ProviderError> {
        cross_quarter::compute(&self.provider, year, self.config.cross_quarter_mode)
    }

    pub fn constellation_era<D: Datelike>(&self, date: &D) -> PrecessionState {
        precession::compute_date(date)
    }

    pub fn current_era(&self) -> PrecessionState {
        self.constellation_era(&Utc::now())
    }

    /// Renames a regular month for the lifetime of this calendar.
    ///
    /// # Errors
    /// See [`MonthTable::rename`].
    pub fn rename_month(&mut self, number: u8, name: &str) -> Result<(), CalendarError> {
        self.months.rename(number, name)
    }

    /// Equinoxes, solstices and cross-quarters within `from..=from + days_ahead`,
    /// sorted by time.
    ///
    /// # Errors
    /// Propagates the provider's error.
    #[instrument(level = "debug", skip(self))]
    pub fn upcoming_events(&self, from: DateTime<Utc>, days_ahead: u32) -> Result<Vec<CalendarEvent>, ProviderError> {
        let until = from
            .checked_add_days(Days::new(u64::from(days_ahead)))
            .ok_or_else(|| ProviderError::Other(format!("{days_ahead} days after {from} is out of range")))?;

        // Following-year Imbolc of the previous year lands in this February
        let first_year = match self.config.cross_quarter_mode {
            CrossQuarterMode::SameYear => from.year(),
            CrossQuarterMode::FollowingYear => from.year() - 1,
        };

        let mut events = Vec::new();
        for year in first_year..=until.year() {
            let markers = self.provider.equinox_solstice(year)?;
            events.extend(markers.events().into_iter().map(|e| CalendarEvent {
                timestamp: e.timestamp,
                marker:    Marker::Season(e.season),
            }));
            events.extend(self.cross_quarter_dates(year)?.into_iter().map(|e| CalendarEvent {
                timestamp: e.timestamp,
                marker:    Marker::CrossQuarter(e.festival),
            }));
        }

        events.retain(|e| from <= e.timestamp && e.timestamp <= until);
        events.sort_by_key(|e| e.timestamp);
        events.dedup();
        debug!(count = events.len(), "collected upcoming events");
        Ok(events)
    }

    /// [`Self::upcoming_events`] from now over the configured window.
    ///
    /// # Errors
    /// Propagates the provider's error.
    pub fn upcoming(&self) -> Result<Vec<CalendarEvent>, ProviderError> {
        self.upcoming_events(Utc::now(), self.config.upcoming_days)
    }

    /// Seasonal events within the configured window on either side of
    /// `instant`, paired with their special cards.
    ///
    /// # Errors
    /// Propagates the provider's error.
    pub fn special_cards_near(&self, instant: DateTime<Utc>) -> Result<Vec<(CalendarEvent, SpecialCard)>, ProviderError> {
        let window = self.config.special_card_window_days;
        let span = window
            .checked_mul(2)
            .ok_or_else(|| ProviderError::Other(format!("special card window of {window} days is too large")))?;
        let from = instant
            .checked_sub_days(Days::new(u64::from(window)))
            .ok_or_else(|| ProviderError::Other(format!("{window} days before {instant} is out of range")))?;
        Ok(self
            .upcoming_events(from, span)?
            .into_iter()
            .map(|event| (event, event.special_card()))
            .collect())
    }

    /// Constellation Path reading for a date.
    pub fn reading_at<D: Datelike>(&self, date: &D) -> Reading {
        Reading::around(&self.constellations, self.constellation_on(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CrossQuarter, Season};

    struct FixedProvider;

    impl SeasonalEventProvider for FixedProvider {
        fn equinox_solstice(&self, year: i32) -> Result<SeasonalMarkers, ProviderError> {
            let at = |month, day| {
                Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
                    .single()
                    .ok_or_else(|| ProviderError::Other(format!("bad date {year}-{month}-{day}")))
            };
            Ok(SeasonalMarkers {
                spring_equinox:  at(3, 20)?,
                summer_solstice: at(6, 21)?,
                autumn_equinox:  at(9, 22)?,
                winter_solstice: at(12, 21)?,
            })
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .expect("valid UTC timestamp")
    }

    #[test]
    fn test_month_dates() {
        let calendar = SolarCalendar::with_provider(FixedProvider);

        let aurora = calendar.month_dates(2025, 1);
        assert_eq!(aurora.len(), 28);
        assert_eq!(aurora[0], date(2025, 3, 21));
        assert_eq!(aurora[27], date(2025, 4, 17));

        let twilight = calendar.month_dates(2025, 12);
        assert_eq!(twilight[0], date(2026, 1, 23), "January anchors roll into the next year");

        let hearth = calendar.month_dates(2025, 11);
        assert_eq!(hearth[0], date(2025, 12, 26));
        assert_eq!(hearth[27], date(2026, 1, 22));
    }

    #[test]
    fn test_month_dates_out_of_range() {
        let calendar = SolarCalendar::with_provider(FixedProvider);
        assert!(calendar.month_dates(2025, 0).is_empty());
        assert!(calendar.month_dates(2025, 14).is_empty());
    }

    #[test]
    fn test_month_dates_extreme_years() {
        let calendar = SolarCalendar::with_provider(FixedProvider);
        for month in [1, 11, 12, 13] {
            assert!(calendar.month_dates(i32::MAX, month).is_empty(), "month {month}");
            assert!(calendar.month_dates(i32::MIN, month).is_empty(), "month {month}");
        }
    }

    #[test]
    fn test_month_dates_agree_with_resolver() {
        let calendar = SolarCalendar::with_provider(FixedProvider);
        for month in 1..=12 {
            for day in calendar.month_dates(2023, month) {
                let instant = day.and_hms_opt(0, 0, 0).expect("valid time").and_utc();
                assert_eq!(calendar.month_at(&instant).number(), Some(month), "{day}");
            }
        }
    }

    #[test]
    fn test_rename_from_config() {
        let config = CalendarConfig::from_toml_str(
            r#"
            [[rename]]
            month = 1
            name = "Dawn"
            "#,
        )
        .expect("failed to parse config");
        let calendar = SolarCalendar::from_parts(
            ConstellationTable::standard(),
            MonthTable::standard(),
            FixedProvider,
            config,
        )
        .expect("failed to build calendar");
        assert_eq!(calendar.month_at(&utc(2025, 4, 1)).name(), "Dawn");

        let bad = CalendarConfig::from_toml_str(
            r#"
            [[rename]]
            month = 20
            name = "Nowhere"
            "#,
        )
        .expect("failed to parse config");
        assert!(matches!(
            SolarCalendar::with_config(bad),
            Err(CalendarError::InvalidMonth(20))
        ));
    }

    #[test]
    fn test_upcoming_events_window() {
        let calendar = SolarCalendar::with_provider(FixedProvider);
        let events = calendar
            .upcoming_events(utc(2025, 3, 1), 30)
            .expect("failed to collect events");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].marker, Marker::Season(Season::SpringEquinox));

        let events = calendar
            .upcoming_events(utc(2025, 3, 1), 120)
            .expect("failed to collect events");
        let markers: Vec<_> = events.iter().map(|e| e.marker).collect();
        assert_eq!(
            markers,
            vec![
                Marker::Season(Season::SpringEquinox),
                Marker::CrossQuarter(CrossQuarter::Beltane),
                Marker::Season(Season::SummerSolstice),
            ]
        );
        assert!(events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_special_cards_near() {
        let calendar = SolarCalendar::with_provider(FixedProvider);
        let cards = calendar
            .special_cards_near(utc(2025, 6, 22))
            .expect("failed to collect cards");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].1.title, "The Summer Solstice");

        let cards = calendar
            .special_cards_near(utc(2025, 7, 10))
            .expect("failed to collect cards");
        assert!(cards.is_empty());
    }

    #[test]
    fn test_special_card_window_out_of_range() {
        for window in [3_000_000_000u32, 200_000_000] {
            let config = CalendarConfig {
                special_card_window_days: window,
                ..CalendarConfig::default()
            };
            let calendar =
                SolarCalendar::from_parts(ConstellationTable::standard(), MonthTable::standard(), FixedProvider, config)
                    .expect("failed to build calendar");
            assert!(
                matches!(calendar.special_cards_near(utc(2025, 6, 1)), Err(ProviderError::Other(_))),
                "window {window}"
            );
        }
    }

    /// Markers only for 2025 onwards.
    struct BoundedProvider;

    impl SeasonalEventProvider for BoundedProvider {
        fn equinox_solstice(&self, year: i32) -> Result<SeasonalMarkers, ProviderError> {
            if year < 2025 {
                return Err(ProviderError::UnsupportedYear {
                    year,
                    min: 2025,
                    max: i32::MAX,
                });
            }
            FixedProvider.equinox_solstice(year)
        }
    }

    #[test]
    fn test_upcoming_events_at_provider_lower_bound() {
        let calendar = SolarCalendar::with_provider(BoundedProvider);
        let events = calendar
            .upcoming_events(utc(2025, 1, 1), 90)
            .expect("failed to collect events");
        let markers: Vec<_> = events.iter().map(|e| e.marker).collect();
        assert_eq!(markers, vec![Marker::Season(Season::SpringEquinox)]);

        let config = CalendarConfig {
            cross_quarter_mode: CrossQuarterMode::FollowingYear,
            ..CalendarConfig::default()
        };
        let following =
            SolarCalendar::from_parts(ConstellationTable::standard(), MonthTable::standard(), BoundedProvider, config)
                .expect("failed to build calendar");
        assert!(matches!(
            following.upcoming_events(utc(2025, 1, 1), 90),
            Err(ProviderError::UnsupportedYear { year: 2024, .. })
        ));
    }

    #[test]
    fn test_reading_and_era() {
        let calendar = SolarCalendar::with_provider(FixedProvider);
        let reading = calendar.reading_at(&date(2025, 1, 10));
        assert_eq!(reading.present.constellation, Constellation::Sagittarius);
        assert_eq!(reading.past.constellation, Constellation::Ophiuchus);
        assert_eq!(reading.future.constellation, Constellation::Capricornus);

        let era = calendar.constellation_era(&date(1950, 1, 1));
        assert_eq!(era.era_year, 0);
    }

    #[test]
    fn test_resolvers_are_idempotent() {
        let calendar = SolarCalendar::with_provider(FixedProvider);
        let instant = utc(2024, 3, 19);
        assert_eq!(calendar.month_at(&instant), calendar.month_at(&instant));
        assert_eq!(calendar.constellation_on(&instant), calendar.constellation_on(&instant));
        assert_eq!(
            calendar.cross_quarter_dates(2024).expect("failed to compute"),
            calendar.cross_quarter_dates(2024).expect("failed to compute")
        );
    }
}
