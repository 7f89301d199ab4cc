//! Time units and rounding modes.
//!
//! Every unit has a fixed length in nanoseconds. Calendar-sized units use the
//! mean Gregorian year (365.2425 days), so a month is one twelfth of that and a
//! quarter is three months. None of them consult the calendar.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimestampError;

pub const NANOSECONDS_PER_MICROSECOND: i128 = 1_000;
pub const NANOSECONDS_PER_MILLISECOND: i128 = 1_000_000;
pub const NANOSECONDS_PER_SECOND: i128 = 1_000_000_000;
pub const SECONDS_PER_MINUTE: i128 = 60;
pub const SECONDS_PER_HOUR: i128 = 3_600;
pub const SECONDS_PER_DAY: i128 = 86_400;
pub const DAYS_PER_WEEK: i64 = 7;
pub const MONTHS_PER_YEAR: i64 = 12;
/// 365.2425 days.
pub const SECONDS_PER_YEAR: i128 = 31_556_952;

/// A time unit, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Unit {
    pub const ALL: [Unit; 11] = [
        Unit::Nanosecond,
        Unit::Microsecond,
        Unit::Millisecond,
        Unit::Second,
        Unit::Minute,
        Unit::Hour,
        Unit::Day,
        Unit::Week,
        Unit::Month,
        Unit::Quarter,
        Unit::Year,
    ];

    /// Position of the unit in [`Unit::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Length of one unit in nanoseconds.
    pub fn nanoseconds(self) -> i128 {
        match self {
            Unit::Nanosecond => 1,
            Unit::Microsecond => NANOSECONDS_PER_MICROSECOND,
            Unit::Millisecond => NANOSECONDS_PER_MILLISECOND,
            Unit::Second => NANOSECONDS_PER_SECOND,
            Unit::Minute => SECONDS_PER_MINUTE * NANOSECONDS_PER_SECOND,
            Unit::Hour => SECONDS_PER_HOUR * NANOSECONDS_PER_SECOND,
            Unit::Day => SECONDS_PER_DAY * NANOSECONDS_PER_SECOND,
            Unit::Week => DAYS_PER_WEEK as i128 * SECONDS_PER_DAY * NANOSECONDS_PER_SECOND,
            Unit::Month => SECONDS_PER_YEAR / MONTHS_PER_YEAR as i128 * NANOSECONDS_PER_SECOND,
            Unit::Quarter => SECONDS_PER_YEAR / 4 * NANOSECONDS_PER_SECOND,
            Unit::Year => SECONDS_PER_YEAR * NANOSECONDS_PER_SECOND,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Nanosecond => "nanosecond",
            Unit::Microsecond => "microsecond",
            Unit::Millisecond => "millisecond",
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Week => "week",
            Unit::Month => "month",
            Unit::Quarter => "quarter",
            Unit::Year => "year",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_lowercase().as_str() {
            "nanosecond" | "nanoseconds" | "nanos" | "ns" => Unit::Nanosecond,
            "microsecond" | "microseconds" | "micros" | "us" | "µs" => Unit::Microsecond,
            "millisecond" | "milliseconds" | "millis" | "ms" => Unit::Millisecond,
            "second" | "seconds" | "sec" | "secs" | "s" => Unit::Second,
            "minute" | "minutes" | "min" | "mins" | "m" => Unit::Minute,
            "hour" | "hours" | "hr" | "hrs" | "h" => Unit::Hour,
            "day" | "days" | "d" => Unit::Day,
            "week" | "weeks" | "wk" | "wks" | "w" => Unit::Week,
            "month" | "months" | "mo" => Unit::Month,
            "quarter" | "quarters" | "q" => Unit::Quarter,
            "year" | "years" | "yr" | "yrs" | "y" => Unit::Year,
            _ => {
                return Err(TimestampError::InvalidShape(format!(
                    "unrecognized unit '{}'",
                    s.trim()
                )))
            }
        };
        Ok(unit)
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Rounding ────────────────────────────────────────────────────────────────

/// How a quotient is rounded when it does not divide evenly.
///
/// Names follow the Temporal proposal. `Floor` is the default everywhere in
/// this crate, so instants before the epoch round toward the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    Ceil,
    #[default]
    Floor,
    Expand,
    Trunc,
    HalfCeil,
    HalfFloor,
    HalfExpand,
    HalfTrunc,
    HalfEven,
}

impl RoundingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RoundingMode::Ceil => "ceil",
            RoundingMode::Floor => "floor",
            RoundingMode::Expand => "expand",
            RoundingMode::Trunc => "trunc",
            RoundingMode::HalfCeil => "halfCeil",
            RoundingMode::HalfFloor => "halfFloor",
            RoundingMode::HalfExpand => "halfExpand",
            RoundingMode::HalfTrunc => "halfTrunc",
            RoundingMode::HalfEven => "halfEven",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMode {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        let mode = match normalized.as_str() {
            "ceil" => RoundingMode::Ceil,
            "floor" => RoundingMode::Floor,
            "expand" => RoundingMode::Expand,
            "trunc" => RoundingMode::Trunc,
            "halfceil" => RoundingMode::HalfCeil,
            "halffloor" => RoundingMode::HalfFloor,
            "halfexpand" | "round" => RoundingMode::HalfExpand,
            "halftrunc" => RoundingMode::HalfTrunc,
            "halfeven" => RoundingMode::HalfEven,
            _ => {
                return Err(TimestampError::InvalidShape(format!(
                    "unrecognized rounding mode '{}'",
                    s.trim()
                )))
            }
        };
        Ok(mode)
    }
}

impl Serialize for RoundingMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoundingMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Divide `value` by a positive `divisor`, rounding the quotient per `mode`.
pub fn round_div(value: i128, divisor: i128, mode: RoundingMode) -> i128 {
    debug_assert!(divisor > 0);
    let floor = value.div_euclid(divisor);
    let remainder = value.rem_euclid(divisor);
    if remainder == 0 {
        return floor;
    }
    let ceil = floor + 1;
    let negative = value < 0;
    let toward_zero = if negative { ceil } else { floor };
    let away_from_zero = if negative { floor } else { ceil };

    match mode {
        RoundingMode::Floor => floor,
        RoundingMode::Ceil => ceil,
        RoundingMode::Trunc => toward_zero,
        RoundingMode::Expand => away_from_zero,
        _ => match (remainder * 2).cmp(&divisor) {
            Ordering::Less => floor,
            Ordering::Greater => ceil,
            Ordering::Equal => match mode {
                RoundingMode::HalfFloor => floor,
                RoundingMode::HalfCeil => ceil,
                RoundingMode::HalfTrunc => toward_zero,
                RoundingMode::HalfExpand => away_from_zero,
                _ => {
                    if floor.rem_euclid(2) == 0 {
                        floor
                    } else {
                        ceil
                    }
                }
            },
        },
    }
}

/// Round `value` to the nearest multiple of `increment` per `mode`.
pub fn round_to_increment(value: i128, increment: i128, mode: RoundingMode) -> i128 {
    round_div(value, increment, mode) * increment
}
