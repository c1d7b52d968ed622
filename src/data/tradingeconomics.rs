//! Trading Economics calendar endpoint.

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::data::http::get_json;
use crate::domain::{EconomicEvent, Importance};
use crate::error::AppError;

const BASE_URL: &str = "https://api.tradingeconomics.com";

/// Query for one calendar request.
#[derive(Debug, Clone)]
pub struct CalendarQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub country: Option<String>,
    pub importance: Option<Importance>,
}

impl CalendarQuery {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            country: None,
            importance: None,
        }
    }

    fn params(&self, api_key: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("c", format!("guest:{api_key}")),
            ("f", "json".to_string()),
            ("start", self.start.to_string()),
            ("end", self.end.to_string()),
        ];
        if let Some(country) = &self.country {
            params.push(("country", country.clone()));
        }
        if let Some(importance) = self.importance {
            params.push(("importance", importance.level().to_string()));
        }
        params
    }
}

pub struct TradingEconomicsClient {
    client: Client,
    api_key: String,
}

impl TradingEconomicsClient {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    pub fn calendar(&self, query: &CalendarQuery) -> Result<Vec<EconomicEvent>, AppError> {
        let body: Value = get_json(
            &self.client,
            &format!("{BASE_URL}/calendar"),
            &query.params(&self.api_key),
            "Trading Economics calendar",
        )?;
        let events = parse_calendar(&body)?;
        info!(
            start = %query.start,
            end = %query.end,
            country = query.country.as_deref().unwrap_or("all"),
            n = events.len(),
            "calendar events"
        );
        Ok(events)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawEvent {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    importance: Option<Value>,
    #[serde(default)]
    actual: Option<Value>,
    #[serde(default)]
    forecast: Option<Value>,
    #[serde(default)]
    previous: Option<Value>,
}

/// Numbers and strings both appear in the value fields; nulls become empty text.
fn text(v: &Option<Value>) -> String {
    match v {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Split `2026-02-05T13:30:00` into a date and `HH:MM`.
fn split_timestamp(raw: &str) -> Option<(NaiveDate, String)> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some((dt.date(), dt.format("%H:%M").to_string()));
    }
    // Some rows carry fractional seconds or only a date.
    let date_part = raw.get(..10)?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    let time = raw
        .get(11..16)
        .filter(|t| t.as_bytes().get(2) == Some(&b':'))
        .map(str::to_string)
        .unwrap_or_default();
    Some((date, time))
}

fn parse_calendar(body: &Value) -> Result<Vec<EconomicEvent>, AppError> {
    let rows = body
        .as_array()
        .ok_or_else(|| AppError::parse(format!("Trading Economics calendar is not an array: {}", short(body))))?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let raw: RawEvent = match serde_json::from_value(row.clone()) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "skipping malformed calendar row");
                continue;
            }
        };
        let Some((date, time)) = raw.date.as_deref().and_then(split_timestamp) else {
            warn!(event = raw.event.as_deref().unwrap_or(""), "skipping calendar row without a usable date");
            continue;
        };
        let mut ev = EconomicEvent::new(date, raw.event.unwrap_or_default());
        ev.time = time;
        ev.country = raw.country.unwrap_or_default();
        ev.importance = text(&raw.importance);
        ev.actual = text(&raw.actual);
        ev.forecast = text(&raw.forecast);
        ev.previous = text(&raw.previous);
        out.push(ev);
    }
    Ok(out)
}

fn short(v: &Value) -> String {
    v.to_string().chars().take(120).collect()
}
