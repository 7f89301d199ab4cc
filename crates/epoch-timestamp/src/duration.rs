//! Elapsed-time arithmetic over (seconds, nanoseconds) slots.
//!
//! This module owns unit conversion, rounding-mode application and slot
//! normalization. The calendar-aware code in [`crate::fields`] and
//! [`crate::timestamp`] only ever reaches time-of-day arithmetic through the
//! functions here.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::Neg;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimestampError};
use crate::unit::{round_div, round_to_increment, RoundingMode, Unit, NANOSECONDS_PER_SECOND};

// ── Slots ───────────────────────────────────────────────────────────────────

/// A signed (seconds, nanoseconds) pair.
///
/// Values built through [`Slots::wrap`] or [`Slots::from_nanos`] are
/// sign-consistent and keep `|nanoseconds| < 1_000_000_000`. Equality,
/// ordering and hashing all go through the total nanosecond count, so an
/// unnormalized pair equals its normalized form.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Slots {
    pub seconds: i64,
    pub nanoseconds: i64,
}

impl Slots {
    pub const ZERO: Slots = Slots {
        seconds: 0,
        nanoseconds: 0,
    };

    /// Normalize an arbitrary pair, carrying whole seconds out of
    /// `nanoseconds` and making both components share one sign.
    pub fn wrap(seconds: i64, nanoseconds: i64) -> Result<Slots> {
        Slots::from_nanos(seconds as i128 * NANOSECONDS_PER_SECOND + nanoseconds as i128)
    }

    /// Split a total nanosecond count into normalized slots.
    pub fn from_nanos(total: i128) -> Result<Slots> {
        let seconds = i64::try_from(total / NANOSECONDS_PER_SECOND)
            .ok()
            .filter(|seconds| *seconds != i64::MIN)
            .ok_or_else(|| TimestampError::out_of_range("instant"))?;
        let nanoseconds = (total % NANOSECONDS_PER_SECOND) as i64;
        Ok(Slots {
            seconds,
            nanoseconds,
        })
    }

    pub fn total_nanos(&self) -> i128 {
        self.seconds as i128 * NANOSECONDS_PER_SECOND + self.nanoseconds as i128
    }

    pub fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanoseconds == 0
    }

    pub fn is_negative(&self) -> bool {
        self.seconds < 0 || self.nanoseconds < 0
    }

    pub fn sign(&self) -> i8 {
        if self.seconds > 0 || self.nanoseconds > 0 {
            1
        } else if self.is_negative() {
            -1
        } else {
            0
        }
    }

    pub fn checked_add(self, other: Slots) -> Result<Slots> {
        Slots::from_nanos(self.total_nanos() + other.total_nanos())
    }

    pub fn checked_sub(self, other: Slots) -> Result<Slots> {
        Slots::from_nanos(self.total_nanos() - other.total_nanos())
    }
}

impl PartialEq for Slots {
    fn eq(&self, other: &Self) -> bool {
        self.total_nanos() == other.total_nanos()
    }
}

impl Eq for Slots {}

impl Hash for Slots {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.total_nanos().hash(state);
    }
}

impl PartialOrd for Slots {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slots {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_nanos().cmp(&other.total_nanos())
    }
}

// ── Parts ───────────────────────────────────────────────────────────────────

/// A days-to-nanoseconds breakdown. Absent components were outside the
/// requested unit range; present ones all carry the sign of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milliseconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microseconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nanoseconds: Option<i64>,
}

impl Parts {
    fn slot_mut(&mut self, unit: Unit) -> &mut Option<i64> {
        match unit {
            Unit::Nanosecond => &mut self.nanoseconds,
            Unit::Microsecond => &mut self.microseconds,
            Unit::Millisecond => &mut self.milliseconds,
            Unit::Second => &mut self.seconds,
            Unit::Minute => &mut self.minutes,
            Unit::Hour => &mut self.hours,
            _ => &mut self.days,
        }
    }

    fn entries(&self) -> [(Option<i64>, Unit); 7] {
        [
            (self.days, Unit::Day),
            (self.hours, Unit::Hour),
            (self.minutes, Unit::Minute),
            (self.seconds, Unit::Second),
            (self.milliseconds, Unit::Millisecond),
            (self.microseconds, Unit::Microsecond),
            (self.nanoseconds, Unit::Nanosecond),
        ]
    }

    /// Sum of every present component, in nanoseconds.
    pub fn total_nanos(&self) -> i128 {
        self.entries()
            .iter()
            .map(|(value, unit)| value.unwrap_or(0) as i128 * unit.nanoseconds())
            .sum()
    }
}

/// Options for [`slots_to_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartsOptions {
    /// Largest component to produce. Anything above a day is treated as a day.
    pub largest_unit: Unit,
    /// The total is rounded to a multiple of this unit first.
    pub smallest_unit: Unit,
    pub rounding_mode: RoundingMode,
}

impl Default for PartsOptions {
    fn default() -> Self {
        PartsOptions {
            largest_unit: Unit::Day,
            smallest_unit: Unit::Nanosecond,
            rounding_mode: RoundingMode::default(),
        }
    }
}

/// Options for amount conversions. Without a rounding mode the result is the
/// exact (fractional) quotient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    pub rounding_mode: Option<RoundingMode>,
}

impl ConvertOptions {
    pub fn rounded(mode: RoundingMode) -> Self {
        ConvertOptions {
            rounding_mode: Some(mode),
        }
    }
}

// ── Conversions ─────────────────────────────────────────────────────────────

/// Normalize a pair into sign-consistent slots.
pub fn wrap_slots(seconds: i64, nanoseconds: i64) -> Result<Slots> {
    Slots::wrap(seconds, nanoseconds)
}

/// Convert a numeric amount of `unit` into slots.
///
/// The integral part is multiplied exactly; the fractional part is rounded to
/// the nearest nanosecond.
pub fn convert_to_slots(amount: f64, unit: Unit) -> Result<Slots> {
    if !amount.is_finite() {
        return Err(TimestampError::not_finite(unit.as_str()));
    }
    let whole = amount.trunc();
    // Beyond 2^63 the amount cannot fit any instant anyway.
    if whole.abs() >= 9.2e18 {
        return Err(TimestampError::out_of_range(unit.as_str()));
    }
    let fraction = amount - whole;
    let per_unit = unit.nanoseconds();
    let total = whole as i64 as i128 * per_unit + (fraction * per_unit as f64).round() as i128;
    Slots::from_nanos(total)
}

/// Express slots as an amount of `unit`.
pub fn slots_to_duration(slots: Slots, unit: Unit, options: &ConvertOptions) -> f64 {
    nanos_to_amount(slots.total_nanos(), unit, options)
}

fn nanos_to_amount(total: i128, unit: Unit, options: &ConvertOptions) -> f64 {
    let per_unit = unit.nanoseconds();
    match options.rounding_mode {
        Some(mode) => round_div(total, per_unit, mode) as f64,
        None => {
            let quotient = total / per_unit;
            let remainder = total % per_unit;
            quotient as f64 + remainder as f64 / per_unit as f64
        }
    }
}

/// Convert an amount between units.
pub fn convert(amount: f64, from: Unit, to: Unit, options: &ConvertOptions) -> Result<f64> {
    let slots = convert_to_slots(amount, from)?;
    Ok(slots_to_duration(slots, to, options))
}

/// Round slots to the smallest unit and break them into days…nanoseconds.
pub fn slots_to_parts(slots: Slots, options: &PartsOptions) -> Result<Parts> {
    let step = options.smallest_unit.nanoseconds();
    let total = round_to_increment(slots.total_nanos(), step, options.rounding_mode);

    let lowest = options.smallest_unit.min(Unit::Day);
    let highest = options.largest_unit.clamp(lowest, Unit::Day);

    let mut parts = Parts::default();
    let mut remainder = total;
    for unit in Unit::ALL[lowest.index()..=highest.index()].iter().rev() {
        let per_unit = unit.nanoseconds();
        let value = remainder / per_unit;
        remainder -= value * per_unit;
        let value = i64::try_from(value).map_err(|_| TimestampError::out_of_range("duration"))?;
        *parts.slot_mut(*unit) = Some(value);
    }
    Ok(parts)
}

/// Fold a parts breakdown back into slots.
pub fn parts_to_slots(parts: &Parts) -> Result<Slots> {
    Slots::from_nanos(parts.total_nanos())
}

/// Express a parts breakdown as an amount of `unit`.
pub fn parts_to_duration(parts: &Parts, unit: Unit, options: &ConvertOptions) -> Result<f64> {
    let slots = parts_to_slots(parts)?;
    Ok(slots_to_duration(slots, unit, options))
}

/// Slots of a native UTC datetime, at its full nanosecond precision.
pub fn date_to_slots(date: &DateTime<Utc>) -> Slots {
    let seconds = date.timestamp();
    let nanoseconds = date.timestamp_subsec_nanos() as i64;
    // chrono keeps the subsecond part non-negative; flip it for pre-epoch instants.
    if seconds < 0 && nanoseconds > 0 {
        Slots {
            seconds: seconds + 1,
            nanoseconds: nanoseconds - NANOSECONDS_PER_SECOND as i64,
        }
    } else {
        Slots {
            seconds,
            nanoseconds,
        }
    }
}

// ── Duration ────────────────────────────────────────────────────────────────

/// A signed span of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    slots: Slots,
}

impl Duration {
    pub const ZERO: Duration = Duration { slots: Slots::ZERO };

    pub fn new(seconds: i64, nanoseconds: i64) -> Result<Duration> {
        Ok(Duration {
            slots: Slots::wrap(seconds, nanoseconds)?,
        })
    }

    pub fn of(amount: f64, unit: Unit) -> Result<Duration> {
        Ok(Duration {
            slots: convert_to_slots(amount, unit)?,
        })
    }

    pub fn from_slots(slots: Slots) -> Result<Duration> {
        Duration::new(slots.seconds, slots.nanoseconds)
    }

    /// Caller guarantees `slots` is already normalized.
    pub(crate) const fn from_normalized(slots: Slots) -> Duration {
        Duration { slots }
    }

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

    pub fn convert_to(&self, unit: Unit, options: &ConvertOptions) -> f64 {
        slots_to_duration(self.slots, unit, options)
    }

    pub fn to_parts(&self, options: &PartsOptions) -> Result<Parts> {
        slots_to_parts(self.slots, options)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        // Slots::from_nanos never yields i64::MIN seconds.
        Duration {
            slots: Slots {
                seconds: -self.slots.seconds,
                nanoseconds: -self.slots.nanoseconds,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    // ── Slots ───────────────────────────────────────────────────────────

    #[test]
    fn test_wrap_carries_nanoseconds() {
        let slots = Slots::wrap(1, 2_500_000_000).unwrap();
        assert_eq!(slots, Slots { seconds: 3, nanoseconds: 500_000_000 });
    }

    #[test]
    fn test_wrap_makes_signs_consistent() {
        let slots = Slots::wrap(1, -1_500_000_000).unwrap();
        assert_eq!(slots, Slots { seconds: 0, nanoseconds: -500_000_000 });

        let slots = Slots::wrap(-2, 300_000_000).unwrap();
        assert_eq!(slots, Slots { seconds: -1, nanoseconds: -700_000_000 });
    }

    #[test]
    fn test_wrap_overflow_is_magnitude_error() {
        let err = Slots::wrap(i64::MAX, 1_000_000_000).unwrap_err();
        assert!(matches!(err, TimestampError::InvalidMagnitude(_)));
    }

    #[test]
    fn test_unnormalized_pair_equals_normalized() {
        let raw = Slots { seconds: 1, nanoseconds: -1 };
        let normalized = Slots { seconds: 0, nanoseconds: 999_999_999 };
        assert_eq!(raw, normalized);
        assert_eq!(raw.cmp(&normalized), Ordering::Equal);

        let hash = |slots: &Slots| {
            let mut hasher = DefaultHasher::new();
            slots.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&raw), hash(&normalized));

        let mut seen = HashSet::new();
        seen.insert(raw);
        assert!(seen.contains(&normalized));
        assert_ne!(raw, Slots { seconds: 0, nanoseconds: 999_999_998 });
    }

    #[test]
    fn test_sign() {
        assert_eq!(Slots::ZERO.sign(), 0);
        assert_eq!(Slots::wrap(0, 1).unwrap().sign(), 1);
        assert_eq!(Slots::wrap(0, -1).unwrap().sign(), -1);
        assert!(Slots::wrap(-1, 0).unwrap().is_negative());
    }

    // ── Amount conversion ───────────────────────────────────────────────

    #[test]
    fn test_convert_to_slots_fractional() {
        let slots = convert_to_slots(1.5, Unit::Second).unwrap();
        assert_eq!(slots, Slots { seconds: 1, nanoseconds: 500_000_000 });

        let slots = convert_to_slots(-0.25, Unit::Minute).unwrap();
        assert_eq!(slots, Slots { seconds: -15, nanoseconds: 0 });
    }

    #[test]
    fn test_convert_to_slots_rejects_non_finite() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = convert_to_slots(amount, Unit::Hour).unwrap_err();
            assert!(err.to_string().contains("The hour must be a finite number"), "got: {err}");
        }
    }

    #[test]
    fn test_convert_to_slots_rejects_huge_amounts() {
        assert!(convert_to_slots(1e300, Unit::Second).is_err());
        assert!(convert_to_slots(1e12, Unit::Year).is_err());
    }

    #[test]
    fn test_convert_between_units() {
        let hours = convert(90.0, Unit::Minute, Unit::Hour, &ConvertOptions::default()).unwrap();
        assert_eq!(hours, 1.5);
        let floored =
            convert(90.0, Unit::Minute, Unit::Hour, &ConvertOptions::rounded(RoundingMode::Floor))
                .unwrap();
        assert_eq!(floored, 1.0);
        let weeks = convert(14.0, Unit::Day, Unit::Week, &ConvertOptions::default()).unwrap();
        assert_eq!(weeks, 2.0);
    }

    #[test]
    fn test_slots_to_duration_negative_rounding() {
        let slots = Slots::wrap(-1, -500_000_000).unwrap();
        let floor = slots_to_duration(slots, Unit::Second, &ConvertOptions::rounded(RoundingMode::Floor));
        assert_eq!(floor, -2.0);
        let trunc = slots_to_duration(slots, Unit::Second, &ConvertOptions::rounded(RoundingMode::Trunc));
        assert_eq!(trunc, -1.0);
        let exact = slots_to_duration(slots, Unit::Millisecond, &ConvertOptions::default());
        assert_eq!(exact, -1500.0);
    }

    // ── Parts ───────────────────────────────────────────────────────────

    #[test]
    fn test_slots_to_parts_full_breakdown() {
        let slots = Slots::wrap(90_061, 1_002_003).unwrap();
        let parts = slots_to_parts(slots, &PartsOptions::default()).unwrap();
        assert_eq!(parts.days, Some(1));
        assert_eq!(parts.hours, Some(1));
        assert_eq!(parts.minutes, Some(1));
        assert_eq!(parts.seconds, Some(1));
        assert_eq!(parts.milliseconds, Some(1));
        assert_eq!(parts.microseconds, Some(2));
        assert_eq!(parts.nanoseconds, Some(3));
    }

    #[test]
    fn test_slots_to_parts_smallest_unit_drops_lower_parts() {
        let slots = Slots::wrap(3_599, 999_999_999).unwrap();
        let options = PartsOptions {
            smallest_unit: Unit::Minute,
            ..Default::default()
        };
        let parts = slots_to_parts(slots, &options).unwrap();
        assert_eq!(parts.hours, Some(0));
        assert_eq!(parts.minutes, Some(59));
        assert_eq!(parts.seconds, None);
        assert_eq!(parts.nanoseconds, None);
    }

    #[test]
    fn test_slots_to_parts_negative_is_sign_consistent() {
        let slots = Slots::wrap(-3_661, 0).unwrap();
        let parts = slots_to_parts(slots, &PartsOptions::default()).unwrap();
        assert_eq!(parts.days, Some(0));
        assert_eq!(parts.hours, Some(-1));
        assert_eq!(parts.minutes, Some(-1));
        assert_eq!(parts.seconds, Some(-1));
    }

    #[test]
    fn test_slots_to_parts_largest_unit() {
        let slots = Slots::wrap(90_000, 0).unwrap();
        let options = PartsOptions {
            largest_unit: Unit::Hour,
            smallest_unit: Unit::Second,
            ..Default::default()
        };
        let parts = slots_to_parts(slots, &options).unwrap();
        assert_eq!(parts.days, None);
        assert_eq!(parts.hours, Some(25));
    }

    #[test]
    fn test_slots_to_parts_week_rounds_then_reports_days() {
        let slots = Slots::wrap(10 * 86_400, 0).unwrap();
        let options = PartsOptions {
            smallest_unit: Unit::Week,
            ..Default::default()
        };
        let parts = slots_to_parts(slots, &options).unwrap();
        assert_eq!(parts.days, Some(7));
        assert_eq!(parts.hours, None);
    }

    #[test]
    fn test_parts_to_slots_sums_components() {
        let parts = Parts {
            days: Some(1),
            hours: Some(-1),
            nanoseconds: Some(5),
            ..Default::default()
        };
        let slots = parts_to_slots(&parts).unwrap();
        assert_eq!(slots, Slots { seconds: 82_800, nanoseconds: 5 });
        let minutes = parts_to_duration(&parts, Unit::Minute, &ConvertOptions::rounded(RoundingMode::Floor)).unwrap();
        assert_eq!(minutes, 1_380.0);
    }

    // ── Native dates ────────────────────────────────────────────────────

    #[test]
    fn test_date_to_slots_pre_epoch() {
        let date = Utc.timestamp_opt(-2, 250_000_000).single().unwrap();
        let slots = date_to_slots(&date);
        assert_eq!(slots, Slots { seconds: -1, nanoseconds: -750_000_000 });
    }

    #[test]
    fn test_date_to_slots_post_epoch() {
        let date = Utc.with_ymd_and_hms(2026, 3, 15, 14, 0, 0).single().unwrap();
        let slots = date_to_slots(&date);
        assert_eq!(slots.seconds, 1_773_583_200);
        assert_eq!(slots.nanoseconds, 0);
    }

    // ── Duration ────────────────────────────────────────────────────────

    #[test]
    fn test_duration_of_and_convert() {
        let d = Duration::of(2.5, Unit::Hour).unwrap();
        assert_eq!(d.seconds(), 9_000);
        assert_eq!(d.convert_to(Unit::Minute, &ConvertOptions::default()), 150.0);
        assert_eq!((-d).seconds(), -9_000);
        assert!((-d).is_negative());
    }

    #[test]
    fn test_duration_ordering() {
        let short = Duration::new(0, 999_999_999).unwrap();
        let long = Duration::new(1, 0).unwrap();
        assert!(short < long);
        assert!(-long < -short);
    }
}
