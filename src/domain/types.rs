//! Shared domain types.
//!
//! These types are intentionally flat and serializable so they can be:
//!
//! - built directly from a source response
//! - written to the JSON output files as-is
//! - rendered to Markdown without further lookups

use chrono::{DateTime, Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One calendar row: a scheduled or published release of an indicator.
///
/// Values stay textual (`"3.2%"`, `"215K"`, `""`) exactly as the source
/// published them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicEvent {
    pub date: NaiveDate,
    /// Source-local clock time (`"08:30"`), `"All Day"`, or empty.
    pub time: String,
    pub country: String,
    pub event: String,
    pub importance: String,
    pub actual: String,
    pub forecast: String,
    pub previous: String,
}

impl EconomicEvent {
    pub fn new(date: NaiveDate, event: impl Into<String>) -> Self {
        Self {
            date,
            time: String::new(),
            country: String::new(),
            event: event.into(),
            importance: String::new(),
            actual: String::new(),
            forecast: String::new(),
            previous: String::new(),
        }
    }

    pub fn has_forecast(&self) -> bool {
        !self.forecast.trim().is_empty()
    }
}

/// Calendar importance filter accepted by Trading Economics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl Importance {
    /// Numeric level used by the Trading Economics `importance` parameter.
    pub fn level(self) -> u8 {
        match self {
            Importance::Low => 1,
            Importance::Medium => 2,
            Importance::High => 3,
        }
    }
}

/// A dated textual observation (FRED style, `"."` means missing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: String,
}

/// Latest and previous observation of one indicator series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReading {
    pub series_id: String,
    pub latest: Observation,
    pub previous: Option<Observation>,
    pub change_percent: Option<f64>,
}

/// A single latest value of a country-level indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub name: String,
    pub value: Option<String>,
    /// Period label as published (`"2024"`, `"2024-Q3"`, `"2025-01-01"`).
    pub period: Option<String>,
}

/// One government bond yield observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondYield {
    /// Maturity in years.
    pub period: u32,
    pub name: String,
    /// Identifier that actually produced the data (primary or alias).
    pub symbol: String,
    #[serde(rename = "yield")]
    pub yield_pct: Option<f64>,
    pub previous_yield: Option<f64>,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
    pub date: Option<NaiveDate>,
}

/// Yield curve of one country at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCurve {
    pub country: String,
    pub country_name: String,
    pub country_name_ja: String,
    pub fetch_date: DateTime<Local>,
    /// Sorted by `period`.
    pub bonds: Vec<BondYield>,
}

/// Latest/previous close of a market instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub symbol: String,
    pub name: String,
    pub latest: f64,
    pub previous: Option<f64>,
    pub change_percent: Option<f64>,
    pub date: Option<NaiveDate>,
}

/// One row of the TradingView government bond scanner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScannerBond {
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub close: Option<f64>,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
    /// Maturity in years, when the description names one.
    pub period: Option<u32>,
    /// `BOND_COUNTRIES` key, when a keyword matched.
    pub country: Option<&'static str>,
}

/// Which source the yield-curve command reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum YieldSource {
    /// Yahoo Finance chart/quote endpoints with alternative tickers.
    Yahoo,
    /// Investing.com bond pages with alternative page slugs.
    Investing,
    /// TradingView scanner (single request, no aliases).
    Tradingview,
}

impl YieldSource {
    pub fn display_name(self) -> &'static str {
        match self {
            YieldSource::Yahoo => "Yahoo Finance",
            YieldSource::Investing => "Investing.com",
            YieldSource::Tradingview => "TradingView",
        }
    }
}
