//! The immutable `Timestamp` value and its polymorphic input.
//!
//! A `Timestamp` wraps exactly one normalized [`Slots`] pair relative to
//! `1970-01-01T00:00:00Z`. Every operation returns a new value.
//!
//! # Example
//!
//! ```
//! use epoch_timestamp::{Timestamp, Unit};
//!
//! let t: Timestamp = "2026-03-15T14:00:00Z".parse().unwrap();
//! let later = t.add(90.0, Unit::Minute).unwrap();
//! assert_eq!(later.to_string(), "2026-03-15T15:30:00.000000000Z");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::calendar;
use crate::duration::{self, ConvertOptions, Duration, PartsOptions, Slots};
use crate::error::{Result, TimestampError};
use crate::fields::{self, Fields, FieldsOptions};
use crate::parse;
use crate::unit::{
    round_div, RoundingMode, Unit, NANOSECONDS_PER_MILLISECOND, NANOSECONDS_PER_SECOND,
    SECONDS_PER_DAY,
};

/// Unit assumed by [`now_in`] and [`to_timestamp`] callers that have no
/// preference, matching the platform clock's resolution.
pub const DEFAULT_UNIT: Unit = Unit::Millisecond;

/// Largest absolute year a [`Timestamp`] may fall in. The text grammars
/// read at most nine year digits, so every timestamp prints as text that
/// parses back to it.
pub const MAX_TIMESTAMP_YEAR: i64 = 999_999_999;

/// First nanosecond of year `-MAX_TIMESTAMP_YEAR`.
const MIN_NANOS: i128 =
    calendar::year_to_days(-MAX_TIMESTAMP_YEAR) as i128 * SECONDS_PER_DAY * NANOSECONDS_PER_SECOND;

/// First nanosecond past year `MAX_TIMESTAMP_YEAR`.
const END_NANOS: i128 = calendar::year_to_days(MAX_TIMESTAMP_YEAR + 1) as i128
    * SECONDS_PER_DAY
    * NANOSECONDS_PER_SECOND;

// ── Options ─────────────────────────────────────────────────────────────────

/// Options for [`Timestamp::round`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundOptions {
    pub smallest_unit: Unit,
    pub rounding_mode: RoundingMode,
}

impl Default for RoundOptions {
    fn default() -> Self {
        RoundOptions {
            smallest_unit: Unit::Nanosecond,
            rounding_mode: RoundingMode::Floor,
        }
    }
}

impl RoundOptions {
    /// Floor to `smallest_unit`.
    pub fn to(smallest_unit: Unit) -> Self {
        RoundOptions {
            smallest_unit,
            ..Default::default()
        }
    }

    /// # Errors
    ///
    /// [`TimestampError::InvalidShape`] for a non-object or an unknown
    /// unit or mode name.
    pub fn from_json(value: &Value) -> Result<RoundOptions> {
        fields::options_from_json(value)
    }
}

/// Options for [`Timestamp::to_time_string`] and
/// [`Timestamp::to_date_time_string`].
///
/// Output always reaches at least the minute; coarser units are treated as
/// minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    pub smallest_unit: Unit,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            smallest_unit: Unit::Second,
        }
    }
}

impl FormatOptions {
    pub fn from_json(value: &Value) -> Result<FormatOptions> {
        fields::options_from_json(value)
    }
}

// ── Input ───────────────────────────────────────────────────────────────────

/// Everything a timestamp can be built from.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampInput {
    Timestamp(Timestamp),
    Duration(Duration),
    Date(DateTime<Utc>),
    Fields(Fields),
    /// Parsed as text, or failing that, as a number of seconds.
    Text(String),
    /// Seconds since the epoch.
    Number(f64),
}

impl TimestampInput {
    /// Interpret a JSON value: strings and numbers map directly, objects are
    /// read as [`Fields`].
    pub fn from_json(value: &Value) -> Result<TimestampInput> {
        match value {
            Value::String(s) => Ok(TimestampInput::Text(s.clone())),
            Value::Number(n) => n
                .as_f64()
                .map(TimestampInput::Number)
                .ok_or_else(|| TimestampError::not_finite("timestamp")),
            Value::Object(_) => Fields::from_json(value).map(TimestampInput::Fields),
            _ => Err(TimestampError::InvalidShape(
                "The input must be a string, a number or a fields object".into(),
            )),
        }
    }

    /// Resolve the input to slots. No year bound is applied here; that
    /// happens when a [`Timestamp`] is built.
    ///
    /// # Errors
    ///
    /// [`TimestampError::InvalidMagnitude`] for unreadable text, non-finite
    /// numbers and fields outside the calendar range.
    pub fn to_slots(&self) -> Result<Slots> {
        match self {
            TimestampInput::Timestamp(t) => Ok(t.slots),
            TimestampInput::Duration(d) => Ok(d.to_slots()),
            TimestampInput::Date(date) => Ok(duration::date_to_slots(date)),
            TimestampInput::Fields(f) => fields::fields_to_slots(f),
            TimestampInput::Text(s) => text_to_slots(s),
            TimestampInput::Number(n) => duration::convert_to_slots(*n, Unit::Second),
        }
    }

    /// The instant as an amount of `unit` since the epoch.
    pub fn to_amount(&self, unit: Unit, options: &ConvertOptions) -> Result<f64> {
        Ok(duration::slots_to_duration(self.to_slots()?, unit, options))
    }
}

fn text_to_slots(s: &str) -> Result<Slots> {
    if let Some(fields) = parse::parse_to_fields(s) {
        return fields::fields_to_slots(&fields);
    }
    tracing::debug!(input = s, "no text format matched, reading as epoch seconds");
    let seconds = s
        .trim()
        .parse::<f64>()
        .map_err(|_| TimestampError::not_finite("timestamp"))?;
    duration::convert_to_slots(seconds, Unit::Second)
}

impl From<Timestamp> for TimestampInput {
    fn from(t: Timestamp) -> Self {
        TimestampInput::Timestamp(t)
    }
}

impl From<Duration> for TimestampInput {
    fn from(d: Duration) -> Self {
        TimestampInput::Duration(d)
    }
}

impl From<DateTime<Utc>> for TimestampInput {
    fn from(date: DateTime<Utc>) -> Self {
        TimestampInput::Date(date)
    }
}

impl From<Fields> for TimestampInput {
    fn from(f: Fields) -> Self {
        TimestampInput::Fields(f)
    }
}

impl From<&str> for TimestampInput {
    fn from(s: &str) -> Self {
        TimestampInput::Text(s.to_string())
    }
}

impl From<String> for TimestampInput {
    fn from(s: String) -> Self {
        TimestampInput::Text(s)
    }
}

impl From<f64> for TimestampInput {
    fn from(n: f64) -> Self {
        TimestampInput::Number(n)
    }
}

// ── Timestamp ───────────────────────────────────────────────────────────────

/// An instant on the proleptic Gregorian UTC timeline, at nanosecond
/// precision. Ordering and equality are defined on the underlying slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    slots: Slots,
}

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp { slots: Slots::ZERO };

    /// The current instant from the system clock, at millisecond resolution.
    pub fn now() -> Timestamp {
        let millis = Utc::now().timestamp_millis();
        Timestamp {
            slots: Slots {
                seconds: millis / 1_000,
                nanoseconds: (millis % 1_000) * NANOSECONDS_PER_MILLISECOND as i64,
            },
        }
    }

    /// Normalize a (seconds, nanoseconds) pair into a timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::InvalidMagnitude`] when the instant falls
    /// outside years ±[`MAX_TIMESTAMP_YEAR`].
    ///
    /// # Examples
    ///
    /// ```
    /// use epoch_timestamp::Timestamp;
    ///
    /// let t = Timestamp::new(1, -1).unwrap();
    /// assert_eq!((t.seconds(), t.nanoseconds()), (0, 999_999_999));
    /// assert!(Timestamp::new(i64::MAX, 0).is_err());
    /// ```
    pub fn new(seconds: i64, nanoseconds: i64) -> Result<Timestamp> {
        Timestamp::bounded(duration::wrap_slots(seconds, nanoseconds)?)
    }

    /// Wrap slots, rejecting instants outside the supported years.
    fn bounded(slots: Slots) -> Result<Timestamp> {
        let total = slots.total_nanos();
        if !(MIN_NANOS..END_NANOS).contains(&total) {
            return Err(TimestampError::InvalidMagnitude(format!(
                "The timestamp must be within years ±{MAX_TIMESTAMP_YEAR}"
            )));
        }
        Ok(Timestamp { slots })
    }

    /// `amount` of `unit` after the epoch.
    ///
    /// # Errors
    ///
    /// Fails with [`TimestampError::InvalidMagnitude`] when `amount` is not
    /// finite or lands outside the supported years.
    pub fn of(amount: f64, unit: Unit) -> Result<Timestamp> {
        Timestamp::bounded(duration::convert_to_slots(amount, unit)?)
    }

    pub fn of_nanos(amount: f64) -> Result<Timestamp> {
        Timestamp::of(amount, Unit::Nanosecond)
    }

    pub fn of_micros(amount: f64) -> Result<Timestamp> {
        Timestamp::of(amount, Unit::Microsecond)
    }

    pub fn of_millis(amount: f64) -> Result<Timestamp> {
        Timestamp::of(amount, Unit::Millisecond)
    }

    /// The instant named by calendar fields. Out-of-range fields roll over
    /// into the next larger field.
    ///
    /// # Errors
    ///
    /// Fails with [`TimestampError::InvalidMagnitude`] when the normalized
    /// date lies outside years ±[`MAX_TIMESTAMP_YEAR`].
    pub fn from_fields(fields: &Fields) -> Result<Timestamp> {
        Timestamp::bounded(fields::fields_to_slots(fields)?)
    }

    /// Build a timestamp from anything [`TimestampInput`] covers. Text is
    /// tried against the timestamp, date-time, date and time grammars in
    /// turn, then read as a number of seconds.
    ///
    /// # Errors
    ///
    /// Unreadable text and out-of-range instants are
    /// [`TimestampError::InvalidMagnitude`].
    ///
    /// # Examples
    ///
    /// ```
    /// use epoch_timestamp::Timestamp;
    ///
    /// let from_text = Timestamp::from_input("1970-01-02").unwrap();
    /// let from_number = Timestamp::from_input(86_400.0).unwrap();
    /// assert_eq!(from_text, from_number);
    /// assert!(Timestamp::from_input("next tuesday").is_err());
    /// ```
    pub fn from_input(input: impl Into<TimestampInput>) -> Result<Timestamp> {
        Timestamp::bounded(input.into().to_slots()?)
    }

    /// Whole seconds since the epoch, sharing the sign of [`nanoseconds`](Self::nanoseconds).
    pub fn seconds(&self) -> i64 {
        self.slots.seconds
    }

    pub fn nanoseconds(&self) -> i64 {
        self.slots.nanoseconds
    }

    pub fn is_zero(&self) -> bool {
        self.slots.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.slots.is_negative()
    }

    pub fn sign(&self) -> i8 {
        self.slots.sign()
    }

    pub fn to_slots(&self) -> Slots {
        self.slots
    }

    /// A copy with the seconds slot replaced, renormalized.
    ///
    /// # Errors
    ///
    /// Same as [`Timestamp::new`].
    pub fn with_seconds(&self, seconds: i64) -> Result<Timestamp> {
        Timestamp::new(seconds, self.slots.nanoseconds)
    }

    pub fn with_nanoseconds(&self, nanoseconds: i64) -> Result<Timestamp> {
        Timestamp::new(self.slots.seconds, nanoseconds)
    }

    // ── Arithmetic ──────────────────────────────────────────────────────

    /// Shift forward by `amount` of `unit`. Months, quarters and years are
    /// fixed lengths, not calendar-aware.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::InvalidMagnitude`] when `amount` is not
    /// finite or the result leaves years ±[`MAX_TIMESTAMP_YEAR`].
    ///
    /// # Examples
    ///
    /// ```
    /// use epoch_timestamp::{Timestamp, Unit};
    ///
    /// let t = Timestamp::EPOCH.add(1.5, Unit::Day).unwrap();
    /// assert_eq!(t.to_string(), "1970-01-02T12:00:00.000000000Z");
    /// assert!(t.add(f64::NAN, Unit::Day).is_err());
    /// ```
    pub fn add(&self, amount: f64, unit: Unit) -> Result<Timestamp> {
        self.shift(duration::convert_to_slots(amount, unit)?)
    }

    /// Shift backward; see [`Timestamp::add`].
    pub fn subtract(&self, amount: f64, unit: Unit) -> Result<Timestamp> {
        self.shift(duration::convert_to_slots(-amount, unit)?)
    }

    pub fn add_duration(&self, d: &Duration) -> Result<Timestamp> {
        self.shift(d.to_slots())
    }

    pub fn subtract_duration(&self, d: &Duration) -> Result<Timestamp> {
        self.shift((-*d).to_slots())
    }

    fn shift(&self, by: Slots) -> Result<Timestamp> {
        Timestamp::bounded(self.slots.checked_add(by)?)
    }

    /// Round to a multiple of the smallest unit, counted from the epoch.
    ///
    /// # Errors
    ///
    /// Fails with [`TimestampError::InvalidMagnitude`] when rounding away
    /// from zero crosses the last supported year.
    ///
    /// # Examples
    ///
    /// ```
    /// use epoch_timestamp::{RoundOptions, Timestamp, Unit};
    ///
    /// let t = Timestamp::new(-1, -500_000_000).unwrap();
    /// let rounded = t.round(&RoundOptions::to(Unit::Second)).unwrap();
    /// assert_eq!(rounded.seconds(), -2);
    /// ```
    pub fn round(&self, options: &RoundOptions) -> Result<Timestamp> {
        let parts = duration::slots_to_parts(
            self.slots,
            &PartsOptions {
                largest_unit: Unit::Day,
                smallest_unit: options.smallest_unit,
                rounding_mode: options.rounding_mode,
            },
        )?;
        Timestamp::bounded(duration::parts_to_slots(&parts)?)
    }

    // ── Comparison ──────────────────────────────────────────────────────

    /// Same as [`Ord::cmp`].
    pub fn compare(&self, other: &Timestamp) -> Ordering {
        self.cmp(other)
    }

    /// Signed elapsed time from `self` to `other`.
    ///
    /// # Errors
    ///
    /// Never fails for two in-range timestamps; the `Result` comes from the
    /// slot arithmetic.
    pub fn between(&self, other: &Timestamp) -> Result<Duration> {
        Duration::from_slots(other.slots.checked_sub(self.slots)?)
    }

    // ── Conversion ──────────────────────────────────────────────────────

    /// The instant as an amount of `unit` since the epoch.
    pub fn convert_to(&self, unit: Unit, options: &ConvertOptions) -> f64 {
        duration::slots_to_duration(self.slots, unit, options)
    }

    /// Calendar fields at the requested precision. Instants before the
    /// epoch still get a non-negative time of day.
    ///
    /// # Errors
    ///
    /// See [`fields::slots_to_fields`].
    pub fn to_fields(&self, options: &FieldsOptions) -> Result<Fields> {
        fields::slots_to_fields(self.slots, options)
    }

    pub fn to_duration(&self) -> Duration {
        Duration::from_normalized(self.slots)
    }

    /// The instant as a native date. Digits below the millisecond are
    /// truncated toward zero, matching [`Timestamp::to_milliseconds`] with
    /// [`RoundingMode::Trunc`].
    ///
    /// # Errors
    ///
    /// Fails with [`TimestampError::InvalidMagnitude`] when the instant is
    /// outside the range `chrono` can represent.
    pub fn to_date(&self) -> Result<DateTime<Utc>> {
        let millis = round_div(
            self.slots.total_nanos(),
            NANOSECONDS_PER_MILLISECOND,
            RoundingMode::Trunc,
        );
        i64::try_from(millis)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or_else(|| TimestampError::out_of_range("date"))
    }

    /// Seconds since the epoch as a float.
    pub fn to_f64(&self) -> f64 {
        self.slots.seconds as f64 + self.slots.nanoseconds as f64 / 1e9
    }

    // ── Formatting ──────────────────────────────────────────────────────

    /// `[±]YYYY-MM-DD`.
    pub fn to_date_string(&self) -> Result<String> {
        let fields = self.to_fields(&FieldsOptions {
            smallest_unit: Unit::Day,
            rounding_mode: RoundingMode::Floor,
        })?;
        Ok(format_date(&fields))
    }

    /// `HH:MM[:SS[.mmm[uuu[nnn]]]]`.
    pub fn to_time_string(&self, options: &FormatOptions) -> Result<String> {
        let fields = self.format_fields(options)?;
        Ok(format_time(&fields))
    }

    /// `[±]YYYY-MM-DDTHH:MM[:SS[.mmm[uuu[nnn]]]]`, without an offset marker.
    pub fn to_date_time_string(&self, options: &FormatOptions) -> Result<String> {
        let fields = self.format_fields(options)?;
        Ok(format!("{}T{}", format_date(&fields), format_time(&fields)))
    }

    fn format_fields(&self, options: &FormatOptions) -> Result<Fields> {
        self.to_fields(&FieldsOptions {
            smallest_unit: options.smallest_unit.min(Unit::Minute),
            rounding_mode: RoundingMode::Floor,
        })
    }
}

macro_rules! unit_sugar {
    ($($unit:ident: $of:ident, $add:ident, $subtract:ident, $to:ident;)*) => {
        impl Timestamp {
            $(
                pub fn $of(amount: f64) -> Result<Timestamp> {
                    Timestamp::of(amount, Unit::$unit)
                }

                pub fn $add(&self, amount: f64) -> Result<Timestamp> {
                    self.add(amount, Unit::$unit)
                }

                pub fn $subtract(&self, amount: f64) -> Result<Timestamp> {
                    self.subtract(amount, Unit::$unit)
                }

                pub fn $to(&self, options: &ConvertOptions) -> f64 {
                    self.convert_to(Unit::$unit, options)
                }
            )*
        }
    };
}

unit_sugar! {
    Nanosecond: of_nanoseconds, add_nanoseconds, subtract_nanoseconds, to_nanoseconds;
    Microsecond: of_microseconds, add_microseconds, subtract_microseconds, to_microseconds;
    Millisecond: of_milliseconds, add_milliseconds, subtract_milliseconds, to_milliseconds;
    Second: of_seconds, add_seconds, subtract_seconds, to_seconds;
    Minute: of_minutes, add_minutes, subtract_minutes, to_minutes;
    Hour: of_hours, add_hours, subtract_hours, to_hours;
    Day: of_days, add_days, subtract_days, to_days;
    Week: of_weeks, add_weeks, subtract_weeks, to_weeks;
    Month: of_months, add_months, subtract_months, to_months;
    Quarter: of_quarters, add_quarters, subtract_quarters, to_quarters;
    Year: of_years, add_years, subtract_years, to_years;
}

fn format_date(fields: &Fields) -> String {
    let year = if fields.year < 0 {
        format!("-{:04}", -fields.year)
    } else {
        format!("{:04}", fields.year)
    };
    format!("{year}-{:02}-{:02}", fields.month, fields.day)
}

fn format_time(fields: &Fields) -> String {
    let mut out = format!(
        "{:02}:{:02}",
        fields.hour.unwrap_or(0),
        fields.minute.unwrap_or(0)
    );
    let Some(second) = fields.second else {
        return out;
    };
    out.push_str(&format!(":{second:02}"));
    if let Some(ms) = fields.millisecond {
        out.push_str(&format!(".{ms:03}"));
        if let Some(us) = fields.microsecond {
            out.push_str(&format!("{us:03}"));
            if let Some(ns) = fields.nanosecond {
                out.push_str(&format!("{ns:03}"));
            }
        }
    }
    out
}

/// `[±]YYYY-MM-DDTHH:MM:SS.mmmuuunnnZ`, always with nine fraction digits.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .to_fields(&FieldsOptions::default())
            .map_err(|_| fmt::Error)?;
        write!(
            f,
            "{}T{}Z",
            format_date(&fields),
            format_time(&fields)
        )
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self> {
        Timestamp::from_input(s)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(date: DateTime<Utc>) -> Self {
        Timestamp {
            slots: duration::date_to_slots(&date),
        }
    }
}

impl From<Timestamp> for f64 {
    fn from(t: Timestamp) -> f64 {
        t.to_f64()
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a timestamp string or a number of seconds")
    }

    fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<Timestamp, E> {
        s.parse().map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> std::result::Result<Timestamp, E> {
        Timestamp::of_seconds(n).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<Timestamp, E> {
        Timestamp::new(n, 0).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<Timestamp, E> {
        let seconds = i64::try_from(n).map_err(|_| E::custom(TimestampError::out_of_range("timestamp")))?;
        Timestamp::new(seconds, 0).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

// ── Free functions ──────────────────────────────────────────────────────────

/// The current instant as an amount of `unit` since the epoch.
pub fn now_in(unit: Unit, options: &ConvertOptions) -> f64 {
    Timestamp::now().convert_to(unit, options)
}

/// Any input as an amount of `unit` since the epoch.
///
/// # Errors
///
/// Fails if the input cannot be resolved; see [`TimestampInput::to_slots`].
pub fn to_timestamp(
    input: impl Into<TimestampInput>,
    unit: Unit,
    options: &ConvertOptions,
) -> Result<f64> {
    input.into().to_amount(unit, options)
}

/// Order two inputs by the instants they denote.
///
/// # Errors
///
/// Fails if either input cannot be resolved; see [`TimestampInput::to_slots`].
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use epoch_timestamp::compare;
///
/// assert_eq!(compare("1970-01-01T00:00:01Z", 1.0).unwrap(), Ordering::Equal);
/// assert_eq!(compare("1969-12-31", 0.0).unwrap(), Ordering::Less);
/// ```
pub fn compare(a: impl Into<TimestampInput>, b: impl Into<TimestampInput>) -> Result<Ordering> {
    Ok(a.into().to_slots()?.cmp(&b.into().to_slots()?))
}

/// Signed elapsed time from `from` to `to`, as an amount of `unit`.
pub fn between(
    from: impl Into<TimestampInput>,
    to: impl Into<TimestampInput>,
    unit: Unit,
    options: &ConvertOptions,
) -> Result<f64> {
    let elapsed = to.into().to_slots()?.checked_sub(from.into().to_slots()?)?;
    Ok(duration::slots_to_duration(elapsed, unit, options))
}
