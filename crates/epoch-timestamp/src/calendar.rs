//! Proleptic-Gregorian calendar math.
//!
//! Pure functions over absolute day counts, where day 0 is 1970-01-01. The
//! Gregorian leap rule is applied to every integer year, including year 0 and
//! negative years, so `-0001-12-31` is immediately followed by `0000-01-01`.
//!
//! The public entry points normalize their inputs first: month 13 is January
//! of the next year, day 0 is the last day of the previous month, and so on.
//! Years are expected to stay within ±[`MAX_YEAR`]; [`crate::fields`] enforces
//! that bound before calling in.

use serde::{Deserialize, Serialize};

use crate::unit::{DAYS_PER_WEEK, MONTHS_PER_YEAR};

pub const EPOCH_YEAR: i64 = 1970;
pub const DAYS_PER_YEAR: i64 = 365;
pub const DAYS_PER_LEAP_YEAR: i64 = DAYS_PER_YEAR + 1;
/// Days in one 400-year Gregorian cycle.
pub const DAYS_PER_CYCLE: i64 = 146_097;
/// Largest year whose instants fit in i64 seconds.
pub const MAX_YEAR: i64 = 292_277_026_596;

/// Month lengths of the epoch year (a common year).
const DAYS_IN_MONTHS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days of a common year elapsed before the first of each month.
const DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// A normalized calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i64,
    /// 1..=12
    pub month: i64,
    /// 1..=days_in_month(year, month)
    pub day: i64,
}

impl CalendarDate {
    /// A date exactly as given. Use [`normalize_date`] to resolve overflow.
    pub fn new(year: i64, month: i64, day: i64) -> Self {
        CalendarDate { year, month, day }
    }
}

// ── Years ───────────────────────────────────────────────────────────────────

/// Whether `year` has a February 29 under the Gregorian rule, applied
/// proleptically to year 0 and negative years.
///
/// # Examples
///
/// ```
/// use epoch_timestamp::calendar::is_leap_year;
///
/// assert!(is_leap_year(2024));
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(is_leap_year(0));
/// assert!(is_leap_year(-4));
/// ```
pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && year % 100 != 0 || year % 400 == 0
}

/// 365 or 366.
pub fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) {
        DAYS_PER_LEAP_YEAR
    } else {
        DAYS_PER_YEAR
    }
}

/// Absolute day count of January 1 of `year`.
///
/// ```
/// use epoch_timestamp::calendar::year_to_days;
///
/// assert_eq!(year_to_days(1970), 0);
/// assert_eq!(year_to_days(1971), 365);
/// assert_eq!(year_to_days(1969), -365);
/// ```
pub const fn year_to_days(year: i64) -> i64 {
    (year - EPOCH_YEAR) * DAYS_PER_YEAR + (year - 1969).div_euclid(4)
        - (year - 1901).div_euclid(100)
        + (year - 1601).div_euclid(400)
}

/// First guess for [`days_to_year`], within one year of the answer.
fn estimate_year(days: i64) -> i64 {
    (days as i128 * 400).div_euclid(DAYS_PER_CYCLE as i128) as i64 + EPOCH_YEAR
}

/// The year containing absolute day `days`. Inverse of [`year_to_days`]
/// for every day of the year.
pub fn days_to_year(days: i64) -> i64 {
    let mut year = estimate_year(days);
    while year_to_days(year) > days {
        year -= 1;
    }
    while year_to_days(year + 1) <= days {
        year += 1;
    }
    year
}

// ── Months ──────────────────────────────────────────────────────────────────

/// Fold a month outside 1..=12 into the year. Month 0 is December of the
/// previous year.
pub fn normalize_year_month(year: i64, month: i64) -> (i64, i64) {
    if (1..=MONTHS_PER_YEAR).contains(&month) {
        return (year, month);
    }
    let offset = month - 1;
    (
        year + offset.div_euclid(MONTHS_PER_YEAR),
        offset.rem_euclid(MONTHS_PER_YEAR) + 1,
    )
}

/// Month lengths for `year`.
pub fn days_in_months(year: i64) -> [i64; 12] {
    let mut months = DAYS_IN_MONTHS;
    if is_leap_year(year) {
        months[1] += 1;
    }
    months
}

fn month_length(year: i64, month: i64) -> i64 {
    let days = DAYS_IN_MONTHS[(month - 1) as usize];
    if month == 2 && is_leap_year(year) {
        days + 1
    } else {
        days
    }
}

/// Number of days in a month; the month is normalized first.
///
/// # Examples
///
/// ```
/// use epoch_timestamp::calendar::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2), 29);
/// assert_eq!(days_in_month(2023, 2), 28);
/// // Month 14 of 2023 is February 2024.
/// assert_eq!(days_in_month(2023, 14), 29);
/// ```
pub fn days_in_month(year: i64, month: i64) -> i64 {
    let (year, month) = normalize_year_month(year, month);
    month_length(year, month)
}

// ── Days ────────────────────────────────────────────────────────────────────

/// Requires a normalized month; `day` may overflow the month.
fn ordinal(year: i64, month: i64, day: i64) -> i64 {
    let ordinal = DAYS_BEFORE_MONTH[(month - 1) as usize] + day;
    if month > 2 && is_leap_year(year) {
        ordinal + 1
    } else {
        ordinal
    }
}

fn days_from_ymd(year: i64, month: i64, day: i64) -> i64 {
    year_to_days(year) + ordinal(year, month, day) - 1
}

/// Absolute day count of a date. The month is normalized; the day may run
/// past either end of the month.
pub fn date_to_days(year: i64, month: i64, day: i64) -> i64 {
    let (year, month) = normalize_year_month(year, month);
    days_from_ymd(year, month, day)
}

/// 1-based day of the year, after normalizing the date.
pub fn day_of_year(year: i64, month: i64, day: i64) -> i64 {
    let date = normalize_date(year, month, day);
    ordinal(date.year, date.month, date.day)
}

/// Month and day for a 1-based ordinal within `year`.
fn ordinal_to_date(year: i64, ordinal: i64) -> CalendarDate {
    let leap = is_leap_year(year);
    // February 29 is the 60th day of a leap year.
    let leap_day = DAYS_BEFORE_MONTH[2] + 1;
    if leap && ordinal == leap_day {
        return CalendarDate::new(year, 2, 29);
    }
    let common = if leap && ordinal > leap_day {
        ordinal - 1
    } else {
        ordinal
    };
    let month = DAYS_BEFORE_MONTH
        .iter()
        .rposition(|&before| before < common)
        .unwrap_or(0);
    CalendarDate::new(year, month as i64 + 1, common - DAYS_BEFORE_MONTH[month])
}

/// The normalized date at absolute day `days`.
pub fn days_to_date(days: i64) -> CalendarDate {
    let mut year = days_to_year(days);
    let mut ordinal = days - year_to_days(year) + 1;
    if ordinal < 1 {
        year -= 1;
        ordinal += days_in_year(year);
    }
    ordinal_to_date(year, ordinal)
}

/// The date of the `day_of_year`-th day of `year`; out-of-range ordinals roll
/// into neighbouring years.
pub fn day_of_year_to_date(year: i64, day_of_year: i64) -> CalendarDate {
    days_to_date(year_to_days(year) + day_of_year - 1)
}

/// ISO weekday of a date: 1 = Monday … 7 = Sunday.
pub fn day_of_week(year: i64, month: i64, day: i64) -> i64 {
    // 1970-01-01 was a Thursday.
    let weekday = (date_to_days(year, month, day) + 4).rem_euclid(DAYS_PER_WEEK);
    if weekday == 0 {
        DAYS_PER_WEEK
    } else {
        weekday
    }
}

/// Resolve any (year, month, day) triple to the one date it denotes.
///
/// # Examples
///
/// ```
/// use epoch_timestamp::calendar::{normalize_date, CalendarDate};
///
/// assert_eq!(normalize_date(2023, 2, 31), CalendarDate::new(2023, 3, 3));
/// assert_eq!(normalize_date(2024, 1, 0), CalendarDate::new(2023, 12, 31));
/// ```
pub fn normalize_date(year: i64, month: i64, day: i64) -> CalendarDate {
    days_to_date(date_to_days(year, month, day))
}
