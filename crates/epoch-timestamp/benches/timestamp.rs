use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use epoch_timestamp::{calendar, parse_to_fields, Timestamp, Unit};

fn bench_calendar(c: &mut Criterion) {
    c.bench_function("days_to_date", |b| {
        b.iter(|| calendar::days_to_date(black_box(20_527)))
    });
    c.bench_function("date_to_days", |b| {
        b.iter(|| calendar::date_to_days(black_box(2026), black_box(3), black_box(15)))
    });
    c.bench_function("days_to_date_far_past", |b| {
        b.iter(|| calendar::days_to_date(black_box(-100_000_000_000)))
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_to_fields_timestamp", |b| {
        b.iter(|| parse_to_fields(black_box("2026-03-15T14:05:06.123456789Z")))
    });
    c.bench_function("parse_to_fields_date_time", |b| {
        b.iter(|| parse_to_fields(black_box("2026-03-15T14:05")))
    });
    c.bench_function("timestamp_from_str_numeric_fallback", |b| {
        b.iter(|| black_box("1773583200.5").parse::<Timestamp>())
    });
}

fn bench_format(c: &mut Criterion) {
    let t = Timestamp::new(1_773_583_506, 123_456_789).unwrap();
    let before_epoch = Timestamp::new(-1, -500_000_000).unwrap();
    c.bench_function("display", |b| b.iter(|| black_box(t).to_string()));
    c.bench_function("display_before_epoch", |b| {
        b.iter(|| black_box(before_epoch).to_string())
    });
    c.bench_function("add_days", |b| b.iter(|| black_box(t).add(black_box(1.5), Unit::Day)));
}

criterion_group!(benches, bench_calendar, bench_parse, bench_format);
criterion_main!(benches);
