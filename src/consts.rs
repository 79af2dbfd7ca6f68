/// Maximum valid Gregorian month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for March
pub const MARCH: u8 = 3;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// English Gregorian month names (index 0 is unused)
pub const GREGORIAN_MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Days in a common (non-leap) year
pub const DAYS_IN_COMMON_YEAR: u16 = 365;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Number of regular months in the solar calendar
pub const SOLAR_MONTHS: u8 = 13;
/// Length of every regular solar month
pub const DAYS_PER_SOLAR_MONTH: u8 = 28;
/// Length of the solar calendar week
pub const DAYS_PER_SOLAR_WEEK: u8 = 7;

/// UTC hour from which March 19 of a leap year becomes Leap Day
pub const LEAP_DAY_CUTOFF_HOUR: u32 = 12;

/// Years in one full precession cycle (the Great Year)
pub const GREAT_YEAR_CYCLE: i64 = 25_772;
/// Years per constellation age (`GREAT_YEAR_CYCLE` / 13)
pub const YEARS_PER_AGE: f64 = 1982.46;
/// Approximate start of the Age of Aquarius
pub const AQUARIUS_EPOCH: i32 = 1950;

/// Month/day separator used by the `MM-DD` text form
pub const MONTH_DAY_SEPARATOR: char = '-';
/// Separator between interval bounds (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
