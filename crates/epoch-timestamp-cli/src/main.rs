mod cli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use cli::{Cli, Command, Format, Style};
use epoch_timestamp::{
    calendar, now_in, ConvertOptions, Fields, FieldsOptions, FormatOptions, RoundOptions,
    RoundingMode, Timestamp, Unit, DEFAULT_UNIT,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        process::exit(2);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Now { unit } => {
            let unit = unit.unwrap_or(DEFAULT_UNIT);
            let amount = now_in(unit, &ConvertOptions::rounded(RoundingMode::Floor));
            print_amount(cli.format, amount, unit)
        }
        Command::Format {
            input,
            style,
            smallest_unit,
        } => cmd_format(cli.format, &input, style, smallest_unit),
        Command::Fields {
            input,
            smallest_unit,
            rounding_mode,
        } => {
            let t = read_timestamp(&input)?;
            let defaults = FieldsOptions::default();
            let options = FieldsOptions {
                smallest_unit: smallest_unit.unwrap_or(defaults.smallest_unit),
                rounding_mode: rounding_mode.unwrap_or(defaults.rounding_mode),
            };
            let fields = t.to_fields(&options)?;
            println!("{}", serde_json::to_string_pretty(&fields)?);
            Ok(())
        }
        Command::Add {
            input,
            amount,
            unit,
        } => {
            let t = read_timestamp(&input)?;
            let shifted = t
                .add(amount, unit)
                .with_context(|| format!("cannot add {amount} {unit} to {input}"))?;
            print_timestamp(cli.format, &shifted)
        }
        Command::Subtract {
            input,
            amount,
            unit,
        } => {
            let t = read_timestamp(&input)?;
            let shifted = t
                .subtract(amount, unit)
                .with_context(|| format!("cannot subtract {amount} {unit} from {input}"))?;
            print_timestamp(cli.format, &shifted)
        }
        Command::Round {
            input,
            smallest_unit,
            rounding_mode,
        } => {
            let t = read_timestamp(&input)?;
            let options = RoundOptions {
                smallest_unit,
                rounding_mode: rounding_mode.unwrap_or_default(),
            };
            print_timestamp(cli.format, &t.round(&options)?)
        }
        Command::Convert {
            input,
            unit,
            rounding_mode,
        } => {
            let t = read_timestamp(&input)?;
            let amount = t.convert_to(unit, &ConvertOptions { rounding_mode });
            print_amount(cli.format, amount, unit)
        }
        Command::Between {
            from,
            to,
            unit,
            rounding_mode,
        } => {
            let from = read_timestamp(&from)?;
            let to = read_timestamp(&to)?;
            let elapsed = from.between(&to)?;
            let amount = elapsed.convert_to(unit, &ConvertOptions { rounding_mode });
            print_amount(cli.format, amount, unit)
        }
        Command::Calendar { year, month, day } => cmd_calendar(cli.format, year, month, day),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn read_timestamp(input: &str) -> Result<Timestamp> {
    tracing::debug!(input, "reading timestamp");
    input
        .parse()
        .with_context(|| format!("cannot read '{input}' as a timestamp"))
}

fn cmd_format(format: Format, input: &str, style: Style, smallest_unit: Option<Unit>) -> Result<()> {
    let t = read_timestamp(input)?;
    let options = smallest_unit
        .map(|smallest_unit| FormatOptions { smallest_unit })
        .unwrap_or_default();
    let text = match style {
        Style::Full => t.to_string(),
        Style::Date => t.to_date_string()?,
        Style::Time => t.to_time_string(&options)?,
        Style::DateTime => t.to_date_time_string(&options)?,
    };
    match format {
        Format::Text => println!("{text}"),
        Format::Json => println!("{}", json!({ "input": input, "formatted": text })),
    }
    Ok(())
}

fn cmd_calendar(format: Format, year: i64, month: i64, day: i64) -> Result<()> {
    // Going through a timestamp range-checks the year before any calendar math.
    let t = Timestamp::from_fields(&Fields::new(year, month, day))
        .with_context(|| format!("date {year}-{month}-{day} is out of range"))?;
    let text = t.to_date_string()?;
    let date = calendar::normalize_date(year, month, day);
    let weekday = calendar::day_of_week(date.year, date.month, date.day);
    let day_of_year = calendar::day_of_year(date.year, date.month, date.day);
    let days_in_month = calendar::days_in_month(date.year, date.month);
    let days_in_year = calendar::days_in_year(date.year);
    let leap_year = calendar::is_leap_year(date.year);

    match format {
        Format::Text => {
            println!("date: {text}");
            println!("weekday: {weekday}");
            println!("day of year: {day_of_year}");
            println!("days in month: {days_in_month}");
            println!("days in year: {days_in_year}");
            println!("leap year: {leap_year}");
        }
        Format::Json => {
            let value = json!({
                "date": text,
                "year": date.year,
                "month": date.month,
                "day": date.day,
                "weekday": weekday,
                "dayOfYear": day_of_year,
                "daysInMonth": days_in_month,
                "daysInYear": days_in_year,
                "leapYear": leap_year,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

fn print_timestamp(format: Format, t: &Timestamp) -> Result<()> {
    match format {
        Format::Text => println!("{t}"),
        Format::Json => println!(
            "{}",
            json!({
                "timestamp": t,
                "seconds": t.seconds(),
                "nanoseconds": t.nanoseconds(),
            })
        ),
    }
    Ok(())
}

fn print_amount(format: Format, amount: f64, unit: Unit) -> Result<()> {
    match format {
        Format::Text => println!("{amount}"),
        Format::Json => println!("{}", json!({ "amount": amount, "unit": unit })),
    }
    Ok(())
}
