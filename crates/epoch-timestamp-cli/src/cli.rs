use clap::{Parser, Subcommand, ValueEnum};
use epoch_timestamp::{RoundingMode, Unit};

#[derive(Parser)]
#[command(
    name = "epochts",
    version,
    about = "Parse, format, shift and convert UTC timestamps"
)]
pub struct Cli {
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: Format,

    /// Log parser fallbacks and coercions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    Full,
    Date,
    Time,
    DateTime,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the current instant as an amount of a unit since the epoch
    Now {
        #[arg(long)]
        unit: Option<Unit>,
    },

    /// Print an instant in one of the canonical text formats
    Format {
        #[arg(allow_hyphen_values = true)]
        input: String,

        #[arg(long, value_enum, default_value = "full")]
        style: Style,

        #[arg(long)]
        smallest_unit: Option<Unit>,
    },

    /// Print the calendar fields of an instant as JSON
    Fields {
        #[arg(allow_hyphen_values = true)]
        input: String,

        #[arg(long)]
        smallest_unit: Option<Unit>,

        #[arg(long)]
        rounding_mode: Option<RoundingMode>,
    },

    /// Shift an instant forward
    Add {
        #[arg(allow_hyphen_values = true)]
        input: String,

        #[arg(allow_hyphen_values = true)]
        amount: f64,

        unit: Unit,
    },

    /// Shift an instant backward
    Subtract {
        #[arg(allow_hyphen_values = true)]
        input: String,

        #[arg(allow_hyphen_values = true)]
        amount: f64,

        unit: Unit,
    },

    /// Round an instant to a multiple of a unit
    Round {
        #[arg(allow_hyphen_values = true)]
        input: String,

        #[arg(long)]
        smallest_unit: Unit,

        #[arg(long)]
        rounding_mode: Option<RoundingMode>,
    },

    /// Express an instant as an amount of a unit since the epoch
    Convert {
        #[arg(allow_hyphen_values = true)]
        input: String,

        #[arg(long)]
        unit: Unit,

        #[arg(long)]
        rounding_mode: Option<RoundingMode>,
    },

    /// Elapsed time between two instants
    Between {
        #[arg(allow_hyphen_values = true)]
        from: String,

        #[arg(allow_hyphen_values = true)]
        to: String,

        #[arg(long, default_value = "second")]
        unit: Unit,

        #[arg(long)]
        rounding_mode: Option<RoundingMode>,
    },

    /// Normalize a date and describe its place in the calendar
    Calendar {
        #[arg(allow_hyphen_values = true)]
        year: i64,

        #[arg(allow_hyphen_values = true)]
        month: i64,

        #[arg(allow_hyphen_values = true)]
        day: i64,
    },
}
