//! Yahoo Finance chart and quote endpoints.

use chrono::{DateTime, Local, NaiveDate};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::data::http::get_json;
use crate::error::AppError;
use crate::math::change::{change, change_percent};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const QUOTE_URL: &str = "https://query1.finance.yahoo.com/v6/finance/quote";

/// Latest close of one symbol with the previous close when known.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    pub close: f64,
    pub previous: Option<f64>,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
    pub date: Option<NaiveDate>,
}

pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Chart endpoint over the last five sessions.
    pub fn chart(&self, symbol: &str) -> Result<Option<PriceSnapshot>, AppError> {
        let body: Value = get_json(
            &self.client,
            &format!("{CHART_URL}/{symbol}"),
            &[("interval", "1d".to_string()), ("range", "5d".to_string())],
            "Yahoo chart",
        )?;
        Ok(parse_chart(&body))
    }

    pub fn quote(&self, symbol: &str) -> Result<Option<PriceSnapshot>, AppError> {
        let body: Value = get_json(&self.client, QUOTE_URL, &[("symbols", symbol.to_string())], "Yahoo quote")?;
        Ok(parse_quote(&body))
    }

    /// Chart first, quote endpoint when the chart is empty or fails.
    pub fn snapshot(&self, symbol: &str) -> Result<Option<PriceSnapshot>, AppError> {
        match self.chart(symbol) {
            Ok(Some(s)) => Ok(Some(s)),
            Ok(None) => self.quote(symbol),
            Err(chart_err) => match self.quote(symbol) {
                Ok(Some(s)) => Ok(Some(s)),
                Ok(None) => Err(chart_err),
                Err(e) => Err(e),
            },
        }
    }
}

fn local_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.with_timezone(&Local).date_naive())
}

fn parse_chart(body: &Value) -> Option<PriceSnapshot> {
    let result = body.pointer("/chart/result/0")?;
    let timestamps = result.get("timestamp").and_then(Value::as_array);
    let closes = result.pointer("/indicators/quote/0/close")?.as_array()?;

    // Closes can contain nulls for sessions without trades.
    let valid: Vec<(usize, f64)> = closes
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.as_f64().filter(|x| x.is_finite()).map(|x| (i, x)))
        .collect();

    let &(last_idx, close) = valid.last()?;
    let previous = valid.len().checked_sub(2).map(|i| valid[i].1);

    let date = timestamps
        .and_then(|ts| ts.get(last_idx))
        .and_then(Value::as_i64)
        .and_then(local_date)
        .or_else(|| result.pointer("/meta/regularMarketTime").and_then(Value::as_i64).and_then(local_date));

    Some(PriceSnapshot {
        close,
        previous,
        change: change(Some(close), previous),
        change_pct: change_percent(Some(close), previous),
        date,
    })
}

fn parse_quote(body: &Value) -> Option<PriceSnapshot> {
    let quote = body.pointer("/quoteResponse/result/0")?;
    let close = quote.get("regularMarketPrice")?.as_f64()?;
    let previous = quote
        .get("regularMarketPreviousClose")
        .or_else(|| quote.get("previousClose"))
        .and_then(Value::as_f64);

    Some(PriceSnapshot {
        close,
        previous,
        change: quote
            .get("regularMarketChange")
            .and_then(Value::as_f64)
            .or_else(|| change(Some(close), previous)),
        change_pct: quote
            .get("regularMarketChangePercent")
            .and_then(Value::as_f64)
            .or_else(|| change_percent(Some(close), previous)),
        date: quote.get("regularMarketTime").and_then(Value::as_i64).and_then(local_date),
    })
}
