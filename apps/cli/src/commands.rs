//! Command execution. Every command renders a JSON value for stdout.

use anyhow::{anyhow, Context};
use chrono::NaiveDateTime;
use quantkit_calendar::convert::int_to_datetime;
use quantkit_calendar::{DateRepr, TradingCalendar};
use quantkit_codes::{code_head, FailurePolicy};
use serde_json::{json, Value};

use crate::cli::{CalendarArgs, CalendarCommand, CodeArgs, Command, HeadArgs, RangeRepr};
use crate::main_lib::AppState;

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y%m%d %H:%M:%S",
];

pub fn run(command: &Command, state: &AppState) -> anyhow::Result<Value> {
    match command {
        Command::Code(args) => run_code(args, state),
        Command::Head(args) => run_head(args),
        Command::Calendar(args) => run_calendar(args, state),
    }
}

fn run_code(args: &CodeArgs, state: &AppState) -> anyhow::Result<Value> {
    let policy: FailurePolicy = args.on_failure.map(Into::into).unwrap_or(state.on_failure);
    let canonicalizer = state.codes.load();

    let rows = args
        .codes
        .iter()
        .map(|raw| {
            let code =
                canonicalizer.canonicalize_with_policy(raw, args.exchange.as_deref(), policy)?;
            Ok(json!({ "input": raw, "code": code }))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Value::Array(rows))
}

fn run_head(args: &HeadArgs) -> anyhow::Result<Value> {
    let rows = args
        .codes
        .iter()
        .map(|code| Ok(json!({ "code": code, "head": code_head(code)? })))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Value::Array(rows))
}

fn run_calendar(args: &CalendarArgs, state: &AppState) -> anyhow::Result<Value> {
    let market = args.market.as_deref().unwrap_or(&state.calendar_market);
    calendar_query(&state.calendar, market, &args.command)
        .with_context(|| format!("Calendar query on market '{}' failed", market))
}

fn calendar_query(
    calendar: &TradingCalendar,
    market: &str,
    command: &CalendarCommand,
) -> anyhow::Result<Value> {
    let value = match command {
        CalendarCommand::Is { date } => json!({
            "date": date,
            "is_trading_date": calendar.is_trading_date(market, date)?,
        }),
        CalendarCommand::Prev { date, n } => {
            json!({ "date": calendar.previous_trading_date(market, date, *n)? })
        }
        CalendarCommand::Next { date, n } => {
            json!({ "date": calendar.next_trading_date(market, date, *n)? })
        }
        CalendarCommand::Range {
            start,
            end,
            repr,
            format,
        } => {
            let repr = match repr {
                RangeRepr::Int => DateRepr::Int,
                RangeRepr::Date => DateRepr::Date,
                RangeRepr::Datetime => DateRepr::DateTime,
                RangeRepr::Text => DateRepr::Formatted(format.clone()),
            };
            serde_json::to_value(calendar.dates_in_range_as(market, start, end, &repr)?)?
        }
        CalendarCommand::Window { date } => {
            serde_json::to_value(calendar.trading_date_to_natural_window(market, date)?)?
        }
        CalendarCommand::Session { timestamp } => {
            let parsed = parse_timestamp(timestamp)?;
            json!({
                "timestamp": parsed,
                "trading_date": calendar.current_trading_date(market, parsed)?,
            })
        }
    };
    Ok(value)
}

fn parse_timestamp(text: &str) -> anyhow::Result<NaiveDateTime> {
    let text = text.trim();
    if let Ok(number) = text.parse::<i64>() {
        return int_to_datetime(number).map_err(Into::into);
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .ok_or_else(|| anyhow!("Unrecognized timestamp: {}", text))
}
