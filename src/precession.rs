use chrono::Datelike;
use serde::Serialize;

use crate::{AQUARIUS_EPOCH, Constellation, GREAT_YEAR_CYCLE, YEARS_PER_AGE};

/// Largest percentage reported; rounding never reaches a full 100.
const MAX_AGE_PERCENTAGE: f64 = 99.99;

/// Position of a year inside the Great Year precession cycle.
///
/// The current age is always Aquarius. The cycle position keeps advancing,
/// and `ages_elapsed` reports how many whole ages separate the year from the
/// start of the Aquarian age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrecessionState {
    /// Years since the Aquarius epoch (negative before 1950)
    pub era_year:        i64,
    /// Non-negative position inside the 25,772-year cycle
    pub cycle_position:  i64,
    pub current_age:     Constellation,
    pub years_into_age:  f64,
    pub years_remaining: f64,
    /// Percentage through the current age, two decimals, in `[0, 100)`
    pub age_percentage:  f64,
    pub ages_elapsed:    u32,
    pub cycle_total:     i64,
}

/// Computes the precession state for a calendar year.
pub fn compute(year: i32) -> PrecessionState {
    let era_year = i64::from(year) - i64::from(AQUARIUS_EPOCH);
    let cycle_position = era_year.rem_euclid(GREAT_YEAR_CYCLE);

    #[allow(clippy::cast_precision_loss)]
    let position = cycle_position as f64;
    let years_into_age = position % YEARS_PER_AGE;
    let years_remaining = YEARS_PER_AGE - years_into_age;
    let age_percentage = round2(100.0 * years_into_age / YEARS_PER_AGE).min(MAX_AGE_PERCENTAGE);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let ages_elapsed = (position / YEARS_PER_AGE).floor() as u32;

    PrecessionState {
        era_year,
        cycle_position,
        current_age: Constellation::Aquarius,
        years_into_age,
        years_remaining,
        age_percentage,
        ages_elapsed,
        cycle_total: GREAT_YEAR_CYCLE,
    }
}

/// [`compute`] for the year of any date-like value.
pub fn compute_date<D: Datelike>(date: &D) -> PrecessionState {
    compute(date.year())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
