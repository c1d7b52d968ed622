//! Per-command run results: what gets serialized to JSON and rendered to Markdown.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use crate::calendar::{ThreeDayBuckets, WeekBuckets};
use crate::domain::{CountryCurve, EconomicEvent, Importance, IndicatorValue, MarketQuote, ScannerBond, SeriesReading, YieldSource};

/// `mkt indicators`.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorsRun {
    pub timestamp: DateTime<Local>,
    pub source: &'static str,
    pub indicators: Vec<SeriesReading>,
}

/// One region of `mkt global`.
#[derive(Debug, Clone, Serialize)]
pub struct RegionIndicators {
    pub region: String,
    pub source: &'static str,
    pub indicators: Vec<IndicatorValue>,
}

/// `mkt global`.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalRun {
    pub timestamp: DateTime<Local>,
    pub regions: Vec<RegionIndicators>,
}

/// `mkt releases`.
#[derive(Debug, Clone, Serialize)]
pub struct ReleasesRun {
    pub timestamp: DateTime<Local>,
    pub reference_date: NaiveDate,
    #[serde(flatten)]
    pub buckets: WeekBuckets,
}

/// `mkt calendar`.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarRangeRun {
    pub timestamp: DateTime<Local>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub country: Option<String>,
    pub importance: Option<Importance>,
    pub events: Vec<EconomicEvent>,
}

/// A titled list of events (`"Today"`, `"USA"`).
#[derive(Debug, Clone, Serialize)]
pub struct EventSection {
    pub title: String,
    pub events: Vec<EconomicEvent>,
}

/// `mkt forecast`.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastRun {
    pub timestamp: DateTime<Local>,
    pub sections: Vec<EventSection>,
}

/// One country of `mkt investing`.
#[derive(Debug, Clone, Serialize)]
pub struct CountryCalendar {
    pub country: String,
    pub code: String,
    #[serde(flatten)]
    pub days: ThreeDayBuckets,
}

/// `mkt investing`.
#[derive(Debug, Clone, Serialize)]
pub struct InvestingRun {
    pub timestamp: DateTime<Local>,
    pub reference_date: NaiveDate,
    pub countries: Vec<CountryCalendar>,
}

/// `mkt yields`.
#[derive(Debug, Clone, Serialize)]
pub struct YieldCurveRun {
    pub timestamp: DateTime<Local>,
    pub source: YieldSource,
    pub curves: Vec<CountryCurve>,
}

/// One instrument group of `mkt markets`.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSection {
    pub key: &'static str,
    pub title: &'static str,
    pub is_rate: bool,
    pub quotes: Vec<MarketQuote>,
}

/// `mkt markets`.
#[derive(Debug, Clone, Serialize)]
pub struct MarketsRun {
    pub timestamp: DateTime<Local>,
    pub sections: Vec<MarketSection>,
}

/// `mkt bonds`.
#[derive(Debug, Clone, Serialize)]
pub struct BondListRun {
    pub timestamp: DateTime<Local>,
    pub total: usize,
    /// Country key -> bonds, sorted by maturity.
    pub by_country: BTreeMap<String, Vec<ScannerBond>>,
    /// Rows whose description matched no known country.
    pub unclassified: Vec<ScannerBond>,
}
