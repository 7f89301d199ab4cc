//! # epoch-timestamp
//!
//! Proleptic-Gregorian calendar math and an immutable nanosecond `Timestamp`.
//!
//! Every instant is held as a sign-consistent (seconds, nanoseconds) pair
//! relative to `1970-01-01T00:00:00Z`. The crate converts that pair to and
//! from calendar fields, fixed-format UTC text, native `chrono` dates, and
//! numeric amounts in any supported unit.
//!
//! ## Modules
//!
//! - [`calendar`] — Day-count ↔ (year, month, day), leap years, weekday, normalization
//! - [`fields`] — Calendar fields ↔ (seconds, nanoseconds) slots, negative-time borrow
//! - [`parse`] — Timestamp, date, time and date-time text matchers
//! - [`timestamp`] — The `Timestamp` value type, its input union, and free-function helpers
//! - [`duration`] — Slot normalization, unit conversion, parts breakdown, `Duration`
//! - [`unit`] — Time units, rounding modes, rounding division
//! - [`error`] — Error types

pub mod calendar;
pub mod duration;
pub mod error;
pub mod fields;
pub mod parse;
pub mod timestamp;
pub mod unit;

pub use calendar::{
    date_to_days, day_of_week, day_of_year, day_of_year_to_date, days_in_month, days_in_months,
    days_in_year, days_to_date, days_to_year, is_leap_year, normalize_date, normalize_year_month,
    year_to_days, CalendarDate,
};
pub use duration::{
    convert, convert_to_slots, date_to_slots, parts_to_duration, parts_to_slots,
    slots_to_duration, slots_to_parts, wrap_slots, ConvertOptions, Duration, Parts, PartsOptions,
    Slots,
};
pub use error::{Result, TimestampError};
pub use fields::{
    fields_to_slots, fields_to_timestamp, normalize_fields, slots_to_fields, Fields,
    FieldsOptions, TimeFields,
};
pub use parse::{
    parse, parse_date, parse_date_time, parse_date_time_to_fields, parse_date_to_fields,
    parse_time, parse_time_to_fields, parse_timestamp, parse_timestamp_to_fields,
    parse_to_fields,
};
pub use timestamp::{
    between, compare, now_in, to_timestamp, FormatOptions, RoundOptions, Timestamp,
    TimestampInput, DEFAULT_UNIT, MAX_TIMESTAMP_YEAR,
};
pub use unit::{RoundingMode, Unit};
