//! Translation between calendar fields and (seconds, nanoseconds) slots.
//!
//! The date portion goes through [`crate::calendar`]; the time-of-day portion
//! goes through [`crate::duration`]. Field amounts are not range-checked:
//! `hour: 36` or `day: 0` simply fold into the absolute day count.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::calendar::{self, CalendarDate, MAX_YEAR};
use crate::duration::{self, ConvertOptions, Parts, PartsOptions, Slots};
use crate::error::{Result, TimestampError};
use crate::unit::{RoundingMode, Unit};

/// A calendar date with an optional time of day.
///
/// Time components are present only when they were supplied, or, on output,
/// when they are at or above the requested smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Fields {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub millisecond: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microsecond: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nanosecond: Option<i64>,
}

impl Fields {
    /// A date with no time-of-day components.
    pub fn new(year: i64, month: i64, day: i64) -> Self {
        Fields {
            year,
            month,
            day,
            ..Default::default()
        }
    }

    /// Set hour, minute and second.
    pub fn at(mut self, hour: i64, minute: i64, second: i64) -> Self {
        self.hour = Some(hour);
        self.minute = Some(minute);
        self.second = Some(second);
        self
    }

    /// Set millisecond, microsecond and nanosecond.
    pub fn with_fraction(mut self, millisecond: i64, microsecond: i64, nanosecond: i64) -> Self {
        self.millisecond = Some(millisecond);
        self.microsecond = Some(microsecond);
        self.nanosecond = Some(nanosecond);
        self
    }

    /// The date portion, as given.
    pub fn date(&self) -> CalendarDate {
        CalendarDate::new(self.year, self.month, self.day)
    }

    /// Read fields from a JSON object.
    ///
    /// `year`, `month` and `day` are required. Every amount must be a finite
    /// number or a numeric string. Fractional years, months and nanoseconds
    /// are truncated toward zero. A fractional day through microsecond
    /// carries into the finer fields, so `hour: 1.5` reads as hour 1 plus
    /// 30 minutes.
    ///
    /// # Errors
    ///
    /// [`TimestampError::InvalidShape`] when `value` is not an object, and
    /// [`TimestampError::InvalidMagnitude`] for a missing, non-numeric or
    /// out-of-range amount.
    ///
    /// # Examples
    ///
    /// ```
    /// use epoch_timestamp::Fields;
    /// use serde_json::json;
    ///
    /// let fields = Fields::from_json(&json!({ "year": 1970, "month": 1, "day": 1.5 })).unwrap();
    /// assert_eq!(fields.day, 1);
    /// assert_eq!(fields.hour, Some(12));
    /// ```
    pub fn from_json(value: &Value) -> Result<Fields> {
        let map = value
            .as_object()
            .ok_or_else(|| TimestampError::InvalidShape("The fields must be a plain object".into()))?;
        let year = required_whole(map, "year")?;
        let month = required_whole(map, "month")?;

        let mut carry = Slots::ZERO;
        let mut carried = |name: &str, unit: Unit| -> Result<Option<i64>> {
            let Some(amount) = optional_amount(map, name)? else {
                return Ok(None);
            };
            let whole = amount.trunc();
            carry = carry.checked_add(duration::convert_to_slots(amount - whole, unit)?)?;
            to_whole(whole, name).map(Some)
        };
        let day = carried("day", Unit::Day)?;
        let hour = carried("hour", Unit::Hour)?;
        let minute = carried("minute", Unit::Minute)?;
        let second = carried("second", Unit::Second)?;
        let millisecond = carried("millisecond", Unit::Millisecond)?;
        let microsecond = carried("microsecond", Unit::Microsecond)?;

        let mut fields = Fields {
            year,
            month,
            day: day.ok_or_else(|| TimestampError::not_finite("day"))?,
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            nanosecond: optional_amount(map, "nanosecond")?
                .map(|amount| to_whole(amount.trunc(), "nanosecond"))
                .transpose()?,
        };
        fields.add_carry(carry)?;
        Ok(fields)
    }

    /// Spread a sub-day carry over hour..nanosecond, creating absent fields
    /// only where the carry is nonzero.
    fn add_carry(&mut self, carry: Slots) -> Result<()> {
        if carry.is_zero() {
            return Ok(());
        }
        let parts = duration::slots_to_parts(
            carry,
            &PartsOptions {
                largest_unit: Unit::Hour,
                ..Default::default()
            },
        )?;
        for (field, part, name) in [
            (&mut self.hour, parts.hours, "hour"),
            (&mut self.minute, parts.minutes, "minute"),
            (&mut self.second, parts.seconds, "second"),
            (&mut self.millisecond, parts.milliseconds, "millisecond"),
            (&mut self.microsecond, parts.microseconds, "microsecond"),
            (&mut self.nanosecond, parts.nanoseconds, "nanosecond"),
        ] {
            let Some(part) = part.filter(|part| *part != 0) else {
                continue;
            };
            let total = field
                .unwrap_or(0)
                .checked_add(part)
                .ok_or_else(|| TimestampError::out_of_range(name))?;
            *field = Some(total);
        }
        Ok(())
    }

    fn time_parts(&self, days: i128) -> Result<Parts> {
        let days = i64::try_from(days).map_err(|_| TimestampError::out_of_range("day"))?;
        Ok(Parts {
            days: Some(days),
            hours: self.hour,
            minutes: self.minute,
            seconds: self.second,
            milliseconds: self.millisecond,
            microseconds: self.microsecond,
            nanoseconds: self.nanosecond,
        })
    }
}

fn to_amount(value: &Value, name: &str) -> Result<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|amount| amount.is_finite())
    .ok_or_else(|| TimestampError::not_finite(name))
}

fn to_whole(whole: f64, name: &str) -> Result<i64> {
    if whole.abs() >= 9.2e18 {
        return Err(TimestampError::out_of_range(name));
    }
    Ok(whole as i64)
}

fn required_whole(map: &Map<String, Value>, name: &str) -> Result<i64> {
    match map.get(name) {
        Some(value) => to_whole(to_amount(value, name)?.trunc(), name),
        None => Err(TimestampError::not_finite(name)),
    }
}

fn optional_amount(map: &Map<String, Value>, name: &str) -> Result<Option<f64>> {
    map.get(name).map(|value| to_amount(value, name)).transpose()
}

/// The time-of-day portion of a parsed time-only string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeFields {
    pub hour: i64,
    pub minute: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub millisecond: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microsecond: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nanosecond: Option<i64>,
}

impl TimeFields {
    /// A parts breakdown with no day component.
    pub fn to_parts(&self) -> Parts {
        Parts {
            days: None,
            hours: Some(self.hour),
            minutes: Some(self.minute),
            seconds: self.second,
            milliseconds: self.millisecond,
            microseconds: self.microsecond,
            nanoseconds: self.nanosecond,
        }
    }
}

/// Options for [`slots_to_fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldsOptions {
    /// Components below this unit are left out. Anything above an hour
    /// yields a bare date.
    pub smallest_unit: Unit,
    pub rounding_mode: RoundingMode,
}

impl Default for FieldsOptions {
    fn default() -> Self {
        FieldsOptions {
            smallest_unit: Unit::Nanosecond,
            rounding_mode: RoundingMode::Floor,
        }
    }
}

impl FieldsOptions {
    /// Read options from a JSON object; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`TimestampError::InvalidShape`] when `value` is not an object or
    /// names an unknown unit or rounding mode.
    pub fn from_json(value: &Value) -> Result<FieldsOptions> {
        options_from_json(value)
    }
}

/// Deserialize an options struct, insisting on a JSON object.
pub(crate) fn options_from_json<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T> {
    if !value.is_object() {
        return Err(TimestampError::InvalidShape(
            "The options must be a plain object".into(),
        ));
    }
    T::deserialize(value).map_err(|e| TimestampError::InvalidShape(e.to_string()))
}

// ── Fields → slots ──────────────────────────────────────────────────────────

fn fields_to_parts(fields: &Fields) -> Result<Parts> {
    let (year, month) = normalize_month_checked(fields.year, fields.month)?;
    // The day is added separately so an enormous day amount cannot overflow
    // the calendar arithmetic.
    let days = calendar::date_to_days(year, month, 1) as i128 + fields.day as i128 - 1;
    fields.time_parts(days)
}

fn normalize_month_checked(year: i64, month: i64) -> Result<(i64, i64)> {
    let carry = (month as i128 - 1).div_euclid(12);
    let normalized_year = year as i128 + carry;
    if normalized_year.abs() > MAX_YEAR as i128 {
        return Err(TimestampError::InvalidMagnitude(format!(
            "The year must be within ±{MAX_YEAR}"
        )));
    }
    Ok(calendar::normalize_year_month(year, month))
}

/// Fold calendar fields into slots.
///
/// # Errors
///
/// Returns [`TimestampError::InvalidMagnitude`] when the year after month
/// normalization leaves ±[`MAX_YEAR`], or when the day and time amounts
/// overflow the slot range.
///
/// # Examples
///
/// ```
/// use epoch_timestamp::{fields_to_slots, Fields};
///
/// let slots = fields_to_slots(&Fields::new(1970, 1, 2).at(0, 0, 1)).unwrap();
/// assert_eq!(slots.seconds, 86_401);
/// ```
pub fn fields_to_slots(fields: &Fields) -> Result<Slots> {
    let parts = fields_to_parts(fields)?;
    duration::parts_to_slots(&parts)
}

/// Fold calendar fields directly into an amount of `unit`.
///
/// # Errors
///
/// Same as [`fields_to_slots`].
pub fn fields_to_timestamp(fields: &Fields, unit: Unit, options: &ConvertOptions) -> Result<f64> {
    let parts = fields_to_parts(fields)?;
    duration::parts_to_duration(&parts, unit, options)
}

// ── Slots → fields ──────────────────────────────────────────────────────────

/// Break slots into calendar fields at the requested precision.
///
/// Instants before the epoch borrow a day so the time of day comes out
/// non-negative: -1.5 s is 1969-12-31T23:59:58.5, not 1970-01-01T00:00:-1.-500.
///
/// # Errors
///
/// Returns [`TimestampError::InvalidMagnitude`] if rounding pushes the
/// instant out of the slot range.
pub fn slots_to_fields(slots: Slots, options: &FieldsOptions) -> Result<Fields> {
    let smallest_unit = if options.smallest_unit > Unit::Hour {
        Unit::Day
    } else {
        options.smallest_unit
    };
    let parts_options = PartsOptions {
        largest_unit: Unit::Day,
        smallest_unit,
        rounding_mode: options.rounding_mode,
    };
    let mut parts = duration::slots_to_parts(slots, &parts_options)?;
    let mut days = parts.days.unwrap_or(0);

    if slots.is_negative() {
        days -= 1;
        let time_of_day = duration::parts_to_slots(&Parts {
            days: Some(1),
            ..parts
        })?;
        parts = duration::slots_to_parts(time_of_day, &parts_options)?;
        days += parts.days.unwrap_or(0);
    }

    let date = calendar::days_to_date(days);
    Ok(Fields {
        year: date.year,
        month: date.month,
        day: date.day,
        hour: parts.hours,
        minute: parts.minutes,
        second: parts.seconds,
        millisecond: parts.milliseconds,
        microsecond: parts.microseconds,
        nanosecond: parts.nanoseconds,
    })
}

/// Resolve overflowing fields into their canonical form.
pub fn normalize_fields(fields: &Fields) -> Result<Fields> {
    let slots = fields_to_slots(fields)?;
    slots_to_fields(slots, &FieldsOptions::default())
}
