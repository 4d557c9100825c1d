//! CLI argument definitions for quantkit.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `code` | Canonicalize instrument codes |
//! | `head` | Print the grouping head of codes |
//! | `calendar is` | Check whether a date is a trading date |
//! | `calendar prev` / `next` | Step through trading dates |
//! | `calendar range` | List trading dates between two dates |
//! | `calendar window` | Natural-time window of a trading date |
//! | `calendar session` | Trading date a timestamp is booked under |
//!
//! # Examples
//!
//! ```bash
//! quantkit code rb401 000001.SZ SHF.RB2401
//! quantkit code RB888 --exchange SHF
//! quantkit calendar next 2024-01-05 -n 2
//! quantkit calendar range 2024-01-01 2024-01-31 --repr text --format %Y/%m/%d
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use quantkit_codes::FailurePolicy;

#[derive(Debug, Parser)]
#[command(
    name = "quantkit",
    version,
    about = "Instrument code canonicalization and trading calendar queries"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Canonicalize instrument codes to SYMBOL.EXCHANGE
    Code(CodeArgs),
    /// Print the grouping head (product root or leading digits) of codes
    Head(HeadArgs),
    /// Trading calendar queries
    Calendar(CalendarArgs),
}

#[derive(Debug, Args)]
pub struct CodeArgs {
    /// Raw codes in any supported vendor spelling
    #[arg(required = true)]
    pub codes: Vec<String>,

    /// Exchange applied to every code, overriding any suffix
    #[arg(long)]
    pub exchange: Option<String>,

    /// What to do with codes that cannot be converted (defaults to QK_ON_FAILURE)
    #[arg(long, value_enum)]
    pub on_failure: Option<OnFailure>,
}

#[derive(Debug, Args)]
pub struct HeadArgs {
    #[arg(required = true)]
    pub codes: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Market to query (defaults to QK_CALENDAR_MARKET)
    #[arg(long, global = true)]
    pub market: Option<String>,

    #[command(subcommand)]
    pub command: CalendarCommand,
}

#[derive(Debug, Subcommand)]
pub enum CalendarCommand {
    /// Whether DATE is a trading date
    Is { date: String },
    /// The N-th trading date before DATE
    Prev {
        date: String,
        #[arg(short, long, default_value_t = 1)]
        n: usize,
    },
    /// The N-th trading date after DATE
    Next {
        date: String,
        #[arg(short, long, default_value_t = 1)]
        n: usize,
    },
    /// Trading dates from START to END, both included
    Range {
        start: String,
        end: String,
        #[arg(long, value_enum, default_value_t = RangeRepr::Int)]
        repr: RangeRepr,
        /// strftime pattern used with `--repr text`
        #[arg(long, default_value = "%Y-%m-%d")]
        format: String,
    },
    /// Natural-time window of the trading date in effect on DATE
    Window { date: String },
    /// Trading date a timestamp such as "2024-01-05 21:30:00" is booked under
    Session { timestamp: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnFailure {
    /// Fail the command
    Raise,
    /// Print the input unchanged and log a warning
    Original,
}

impl From<OnFailure> for FailurePolicy {
    fn from(value: OnFailure) -> Self {
        match value {
            OnFailure::Raise => FailurePolicy::Raise,
            OnFailure::Original => FailurePolicy::ReturnOriginal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangeRepr {
    Int,
    Date,
    Datetime,
    Text,
}
