//! Fixed-grammar text matchers.
//!
//! Each matcher either recovers fields from the whole input or reports a miss
//! with `None`. Nothing here returns an error; callers chain formats with
//! `or_else` and decide what a total miss means.
//!
//! # Grammars
//!
//! - timestamp: `[±]YYYY-MM-DDTHH:MM:SS[.fraction]Z`
//! - date: `[±]YYYY-MM-DD`
//! - time: `HH:MM[:SS[.fraction]]`
//! - date-time: `[±]YYYY-MM-DDTHH:MM[:SS[.fraction]]`
//!
//! Years have 4 to 9 digits. A fraction has 1 to 9 digits, read as three
//! groups of three (millisecond, microsecond, nanosecond), each padded with
//! zeros on the right, so `.5` is 500 milliseconds. Only ASCII digits are
//! accepted anywhere.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::duration::{self, ConvertOptions};
use crate::fields::{self, Fields, TimeFields};
use crate::unit::Unit;

const DATE: &str = r"([+-]?[0-9]{4,9})-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])";
const FRACTION: &str = r"(?:\.([0-9]{1,3})([0-9]{1,3})?([0-9]{1,3})?)?";

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{DATE}T([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9]){FRACTION}Z$")).unwrap()
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(&format!(r"^{DATE}$")).unwrap());

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^([01][0-9]|2[0-3]):([0-5][0-9])(?::([0-5][0-9]){FRACTION})?$")).unwrap()
});

static DATE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{DATE}T([01][0-9]|2[0-3]):([0-5][0-9])(?::([0-5][0-9]){FRACTION})?$"
    ))
    .unwrap()
});

// ── Capture helpers ─────────────────────────────────────────────────────────

/// A captured run of at most nine ASCII digits, optionally signed.
fn number(caps: &Captures<'_>, index: usize) -> Option<i64> {
    caps.get(index).and_then(|m| m.as_str().parse().ok())
}

/// A fraction group, right-padded with zeros to three digits.
fn fraction_group(caps: &Captures<'_>, index: usize) -> Option<i64> {
    caps.get(index)
        .and_then(|m| format!("{:0<3}", m.as_str()).parse().ok())
}

fn date_fields(caps: &Captures<'_>) -> Option<Fields> {
    Some(Fields::new(number(caps, 1)?, number(caps, 2)?, number(caps, 3)?))
}

fn with_time(mut fields: Fields, caps: &Captures<'_>, first: usize) -> Option<Fields> {
    fields.hour = Some(number(caps, first)?);
    fields.minute = Some(number(caps, first + 1)?);
    fields.second = number(caps, first + 2);
    fields.millisecond = fraction_group(caps, first + 3);
    fields.microsecond = fraction_group(caps, first + 4);
    fields.nanosecond = fraction_group(caps, first + 5);
    Some(fields)
}

// ── Field matchers ──────────────────────────────────────────────────────────

/// Match `[±]YYYY-MM-DDTHH:MM:SS[.fraction]Z`.
pub fn parse_timestamp_to_fields(s: &str) -> Option<Fields> {
    let caps = TIMESTAMP_RE.captures(s)?;
    with_time(date_fields(&caps)?, &caps, 4)
}

/// Match `[±]YYYY-MM-DD`.
pub fn parse_date_to_fields(s: &str) -> Option<Fields> {
    let caps = DATE_RE.captures(s)?;
    date_fields(&caps)
}

/// Match `HH:MM[:SS[.fraction]]`.
pub fn parse_time_to_fields(s: &str) -> Option<TimeFields> {
    let caps = TIME_RE.captures(s)?;
    Some(TimeFields {
        hour: number(&caps, 1)?,
        minute: number(&caps, 2)?,
        second: number(&caps, 3),
        millisecond: fraction_group(&caps, 4),
        microsecond: fraction_group(&caps, 5),
        nanosecond: fraction_group(&caps, 6),
    })
}

/// Match `[±]YYYY-MM-DDTHH:MM[:SS[.fraction]]`, without an offset marker.
pub fn parse_date_time_to_fields(s: &str) -> Option<Fields> {
    let caps = DATE_TIME_RE.captures(s)?;
    with_time(date_fields(&caps)?, &caps, 4)
}

/// Try timestamp, then date, then date-time.
pub fn parse_to_fields(s: &str) -> Option<Fields> {
    let fields = parse_timestamp_to_fields(s)
        .or_else(|| parse_date_to_fields(s))
        .or_else(|| parse_date_time_to_fields(s));
    if fields.is_none() {
        tracing::trace!(input = s, "no text format matched");
    }
    fields
}

// ── Amount parsers ──────────────────────────────────────────────────────────

fn fields_to_amount(fields: Option<Fields>, unit: Unit, options: &ConvertOptions) -> Option<f64> {
    fields::fields_to_timestamp(&fields?, unit, options).ok()
}

/// Parse a timestamp string into an amount of `unit` since the epoch.
pub fn parse_timestamp(s: &str, unit: Unit, options: &ConvertOptions) -> Option<f64> {
    fields_to_amount(parse_timestamp_to_fields(s), unit, options)
}

/// Parse a date string into an amount of `unit` since the epoch.
pub fn parse_date(s: &str, unit: Unit, options: &ConvertOptions) -> Option<f64> {
    fields_to_amount(parse_date_to_fields(s), unit, options)
}

/// Parse a time-only string into an amount of `unit` since midnight.
pub fn parse_time(s: &str, unit: Unit, options: &ConvertOptions) -> Option<f64> {
    let parts = parse_time_to_fields(s)?.to_parts();
    duration::parts_to_duration(&parts, unit, options).ok()
}

/// Parse a date-time string into an amount of `unit` since the epoch.
pub fn parse_date_time(s: &str, unit: Unit, options: &ConvertOptions) -> Option<f64> {
    fields_to_amount(parse_date_time_to_fields(s), unit, options)
}

/// Try timestamp, then date, then date-time, yielding an amount of `unit`.
pub fn parse(s: &str, unit: Unit, options: &ConvertOptions) -> Option<f64> {
    parse_timestamp(s, unit, options)
        .or_else(|| parse_date(s, unit, options))
        .or_else(|| parse_date_time(s, unit, options))
}
