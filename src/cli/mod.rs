//! Command-line parsing for the market data fetchers.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fetching/reporting code; `app` turns these structs into pipeline calls.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{Importance, YieldSource};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mkt", version, about = "Economic calendar, indicator and bond yield fetcher")]
pub struct Cli {
    /// Output root directory (overrides MARKET_OUTPUT_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// HTTP timeout in seconds (overrides MARKET_HTTP_TIMEOUT_SECS).
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Latest US indicators from FRED.
    Indicators,
    /// Indicators for the US, Japan, the euro area and China (FRED / OECD / World Bank).
    Global,
    /// FRED release calendar: today, tomorrow and the rest of the week.
    Releases,
    /// Trading Economics calendar over a date range.
    Calendar(CalendarArgs),
    /// Upcoming events that carry a forecast (Trading Economics).
    Forecast(ForecastArgs),
    /// Investing.com calendar for yesterday, today and tomorrow.
    Investing(InvestingArgs),
    /// Government bond yield curves.
    Yields(YieldsArgs),
    /// Treasury yields, equity indices and commodities from Yahoo Finance.
    Markets,
    /// List government bonds known to the TradingView scanner.
    Bonds,
    /// Check connectivity to the data sources.
    Check,
}

#[derive(Debug, Args, Clone)]
pub struct CalendarArgs {
    /// First day (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date, conflicts_with_all = ["month", "days"])]
    pub start: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD); defaults to start + 7 days.
    #[arg(long, value_parser = parse_date, requires = "start")]
    pub end: Option<NaiveDate>,

    /// Whole calendar month (YYYY-MM).
    #[arg(long, value_name = "YYYY-MM", conflicts_with = "days")]
    pub month: Option<String>,

    /// From today through today + N days.
    #[arg(long)]
    pub days: Option<u32>,

    /// Trading Economics country name (e.g. "united states").
    #[arg(long)]
    pub country: Option<String>,

    #[arg(long, value_enum)]
    pub importance: Option<Importance>,
}

#[derive(Debug, Args, Clone)]
pub struct ForecastArgs {
    /// Seven-day outlook per major economy instead of today/tomorrow.
    #[arg(long)]
    pub major: bool,

    /// Country for the today/tomorrow view.
    #[arg(long, default_value = "united states", conflicts_with = "major")]
    pub country: String,
}

#[derive(Debug, Args, Clone)]
pub struct InvestingArgs {
    /// Investing.com country names to include (repeatable); defaults to Japan, UK and US.
    #[arg(long = "country")]
    pub countries: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct YieldsArgs {
    #[arg(long, value_enum, default_value_t = YieldSource::Yahoo)]
    pub source: YieldSource,

    /// Restrict to these countries (repeatable), e.g. --country japan.
    #[arg(long = "country")]
    pub countries: Vec<String>,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mkt", "yields", "--source", "tradingview", "--out-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.out_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Command::Yields(args) => assert_eq!(args.source, YieldSource::Tradingview),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn calendar_range_flags() {
        let cli = Cli::try_parse_from(["mkt", "calendar", "--start", "2026-02-01", "--end", "2026-02-10", "--importance", "high"])
            .unwrap();
        let Command::Calendar(args) = cli.command else {
            panic!("expected calendar");
        };
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2026, 2, 1));
        assert_eq!(args.importance, Some(Importance::High));
    }

    #[test]
    fn conflicting_calendar_flags_are_rejected() {
        assert!(Cli::try_parse_from(["mkt", "calendar", "--start", "2026-02-01", "--days", "3"]).is_err());
        assert!(Cli::try_parse_from(["mkt", "calendar", "--end", "2026-02-01"]).is_err());
        assert!(Cli::try_parse_from(["mkt", "calendar", "--start", "02/01/2026"]).is_err());
    }

    #[test]
    fn forecast_defaults() {
        let cli = Cli::try_parse_from(["mkt", "forecast"]).unwrap();
        let Command::Forecast(args) = cli.command else {
            panic!("expected forecast");
        };
        assert!(!args.major);
        assert_eq!(args.country, "united states");
    }
}
