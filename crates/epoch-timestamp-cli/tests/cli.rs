use assert_cmd::Command;
use predicates::prelude::*;

fn epochts() -> Command {
    assert_cmd::cargo_bin_cmd!("epochts")
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── format ──────────────────────────────────────────────────────────────────

#[test]
fn test_format_full() {
    epochts()
        .args(["format", "2026-03-15"])
        .assert()
        .success()
        .stdout("2026-03-15T00:00:00.000000000Z\n");
}

#[test]
fn test_format_numeric_seconds_before_epoch() {
    epochts()
        .args(["format", "-1.5"])
        .assert()
        .success()
        .stdout("1969-12-31T23:59:58.500000000Z\n");
}

#[test]
fn test_format_styles() {
    epochts()
        .args(["format", "2026-03-15T14:05:06.123456789Z", "--style", "date"])
        .assert()
        .success()
        .stdout("2026-03-15\n");

    epochts()
        .args([
            "format",
            "2026-03-15T14:05:06.123456789Z",
            "--style",
            "time",
            "--smallest-unit",
            "ms",
        ])
        .assert()
        .success()
        .stdout("14:05:06.123\n");

    epochts()
        .args(["format", "2026-03-15T14:05:06Z", "--style", "date-time"])
        .assert()
        .success()
        .stdout("2026-03-15T14:05:06\n");
}

#[test]
fn test_format_negative_year() {
    epochts()
        .args(["format", "-0044-03-15", "--style", "date"])
        .assert()
        .success()
        .stdout("-0044-03-15\n");
}

#[test]
fn test_format_json() {
    let value = stdout_json(epochts().args(["--format", "json", "format", "1970-01-02"]));
    assert_eq!(value["formatted"], "1970-01-02T00:00:00.000000000Z");
    assert_eq!(value["input"], "1970-01-02");
}

// ── fields ──────────────────────────────────────────────────────────────────

#[test]
fn test_fields_output() {
    let value = stdout_json(epochts().args(["fields", "2024-02-29T12:30:00Z", "--smallest-unit", "minute"]));
    assert_eq!(value["year"], 2024);
    assert_eq!(value["month"], 2);
    assert_eq!(value["day"], 29);
    assert_eq!(value["hour"], 12);
    assert_eq!(value["minute"], 30);
    assert!(value.get("second").is_none());
}

// ── arithmetic ──────────────────────────────────────────────────────────────

#[test]
fn test_add_hours() {
    epochts()
        .args(["add", "2026-03-15T14:00:00Z", "10.5", "hours"])
        .assert()
        .success()
        .stdout("2026-03-16T00:30:00.000000000Z\n");
}

#[test]
fn test_subtract_negative_amount() {
    epochts()
        .args(["subtract", "1970-01-01", "-1", "day"])
        .assert()
        .success()
        .stdout("1970-01-02T00:00:00.000000000Z\n");
}

#[test]
fn test_add_json() {
    let value = stdout_json(epochts().args(["--format", "json", "add", "0", "1.5", "s"]));
    assert_eq!(value["timestamp"], "1970-01-01T00:00:01.500000000Z");
    assert_eq!(value["seconds"], 1);
    assert_eq!(value["nanoseconds"], 500_000_000);
}

#[test]
fn test_round() {
    epochts()
        .args(["round", "1970-01-01T00:01:30Z", "--smallest-unit", "minute", "--rounding-mode", "half-expand"])
        .assert()
        .success()
        .stdout("1970-01-01T00:02:00.000000000Z\n");

    epochts()
        .args(["round", "1970-01-01T00:01:30Z", "--smallest-unit", "minute"])
        .assert()
        .success()
        .stdout("1970-01-01T00:01:00.000000000Z\n");
}

// ── conversion ──────────────────────────────────────────────────────────────

#[test]
fn test_convert() {
    epochts()
        .args(["convert", "1970-01-02T12:00", "--unit", "day"])
        .assert()
        .success()
        .stdout("1.5\n");

    epochts()
        .args(["convert", "1970-01-02T12:00", "--unit", "day", "--rounding-mode", "floor"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_between() {
    epochts()
        .args(["between", "2026-03-15", "2026-03-16T06:00", "--unit", "hour"])
        .assert()
        .success()
        .stdout("30\n");

    epochts()
        .args(["between", "1970-01-01T00:01", "1970-01-01"])
        .assert()
        .success()
        .stdout("-60\n");
}

#[test]
fn test_now() {
    let value = stdout_json(epochts().args(["--format", "json", "now", "--unit", "second"]));
    assert_eq!(value["unit"], "second");
    assert!(value["amount"].as_f64().unwrap() > 1.7e9);
}

// ── calendar ────────────────────────────────────────────────────────────────

#[test]
fn test_calendar_text() {
    epochts()
        .args(["calendar", "2024", "2", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("date: 2024-03-01"))
        .stdout(predicate::str::contains("weekday: 5"))
        .stdout(predicate::str::contains("day of year: 61"))
        .stdout(predicate::str::contains("days in month: 31"))
        .stdout(predicate::str::contains("leap year: true"));
}

#[test]
fn test_calendar_json() {
    let value = stdout_json(epochts().args(["--format", "json", "calendar", "1970", "1", "1"]));
    assert_eq!(value["weekday"], 4);
    assert_eq!(value["dayOfYear"], 1);
    assert_eq!(value["daysInYear"], 365);
    assert_eq!(value["leapYear"], false);
}

// ── errors ──────────────────────────────────────────────────────────────────

#[test]
fn test_unreadable_input_exits_2() {
    epochts()
        .args(["format", "next tuesday"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("error:"))
        .stderr(predicate::str::contains("next tuesday"));
}

#[test]
fn test_unknown_unit_is_rejected() {
    epochts()
        .args(["add", "0", "1", "fortnight"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("fortnight"));
}

#[test]
fn test_out_of_range_calendar_date() {
    epochts()
        .args(["calendar", "300000000000", "1", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_calendar_year_past_timestamp_range() {
    epochts()
        .args(["calendar", "1000000000", "1", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("within years"));

    epochts()
        .args(["calendar", "999999999", "12", "31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("date: 999999999-12-31"));
}

#[test]
fn test_verbose_logs_fallback() {
    epochts()
        .args(["-v", "format", "86400"])
        .assert()
        .success()
        .stdout("1970-01-02T00:00:00.000000000Z\n")
        .stderr(predicate::str::contains("epoch seconds"));
}
