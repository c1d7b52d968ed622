//! TradingView scanner: government bond listing in a single request.
//!
//! The scanner returns every `gov_bond` instrument with a free-text
//! description (`"Japan 10Y"`, `"United States 2 Yr"`). Maturity and country
//! are recovered from that text.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::blocking::Client;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::data::http::check_status;
use crate::domain::ScannerBond;
use crate::domain::instruments::{BOND_COUNTRIES, CountryBonds};
use crate::error::AppError;

const SCAN_URL: &str = "https://scanner.tradingview.com/global/scan";
const COLUMNS: [&str; 5] = ["name", "description", "close", "change", "Change%"];

pub struct TradingViewClient {
    client: Client,
}

impl TradingViewClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn scan_gov_bonds(&self, limit: usize) -> Result<Vec<ScannerBond>, AppError> {
        let payload = json!({
            "filter": [{ "left": "type", "operation": "in", "right": ["gov_bond"] }],
            "options": { "lang": "en" },
            "symbols": { "query": { "types": [] }, "tickers": [] },
            "columns": COLUMNS,
            "sort": { "sortBy": "name", "sortOrder": "asc" },
            "range": [0, limit],
        });
        debug!(url = SCAN_URL, "POST");
        let resp = self
            .client
            .post(SCAN_URL)
            .json(&payload)
            .send()
            .map_err(|e| AppError::network(format!("TradingView scan request failed: {e}")))?;
        let body: Value = check_status(resp, "TradingView scan")?
            .json()
            .map_err(|e| AppError::parse(format!("Failed to parse TradingView scan response: {e}")))?;

        let rows = parse_scan(&body)?;
        info!(n = rows.len(), "government bonds listed");
        Ok(rows)
    }
}

fn parse_scan(body: &Value) -> Result<Vec<ScannerBond>, AppError> {
    let data = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::parse("TradingView scan response has no data array"))?;

    let rows = data
        .iter()
        .filter_map(|item| {
            let symbol = item.get("s")?.as_str()?.to_string();
            let v = item.get("d")?.as_array()?;
            if v.len() < COLUMNS.len() {
                return None;
            }
            let text = |i: usize| v[i].as_str().unwrap_or_default().to_string();
            let name = text(0);
            let description = text(1);
            Some(ScannerBond {
                period: period_from_description(&description).or_else(|| period_from_description(&name)),
                country: country_from_description(&description).map(|c| c.key),
                symbol,
                name,
                description,
                close: v[2].as_f64(),
                change: v[3].as_f64(),
                change_pct: v[4].as_f64(),
            })
        })
        .collect();
    Ok(rows)
}

static PERIOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})\s*(?:-\s*)?(?:y|yr|yrs|year|years)\b").expect("valid regex"));

/// `"Japan 10Y"`, `"US 10 Yr"`, `"Germany 10-Year"` -> 10.
pub fn period_from_description(text: &str) -> Option<u32> {
    PERIOD_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .filter(|p| *p > 0)
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    let is_word = |c: char| c.is_ascii_alphanumeric();
    haystack.match_indices(needle).any(|(start, m)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + m.len()..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}

/// First country in table order whose keyword appears as a whole word.
pub fn country_from_description(text: &str) -> Option<&'static CountryBonds> {
    BOND_COUNTRIES
        .iter()
        .find(|c| c.keywords.iter().any(|k| contains_word(text, k)))
}
