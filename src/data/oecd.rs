//! OECD SDMX-JSON endpoint.
//!
//! Only the first series of the first dataset is read. Observations are keyed
//! by their index into the observation dimension (`"0"`, `"1"`, ...); the
//! highest index is the latest period.

use reqwest::blocking::Client;
use serde_json::Value;

use crate::data::http::get_json;
use crate::domain::IndicatorValue;
use crate::error::AppError;

const BASE_URL: &str = "https://stats.oecd.org/SDMX-JSON/data";

pub struct OecdClient {
    client: Client,
}

impl OecdClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn latest(&self, country: &str, dataset: &str, name: &str) -> Result<Option<IndicatorValue>, AppError> {
        let body: Value = get_json(&self.client, &format!("{BASE_URL}/{dataset}/{country}/all"), &[], "OECD")?;
        Ok(parse_latest(&body, name))
    }
}

fn parse_latest(body: &Value, name: &str) -> Option<IndicatorValue> {
    let series = body.pointer("/dataSets/0/series")?.as_object()?;
    let (_, first) = series.iter().next()?;
    let observations = first.get("observations")?.as_object()?;

    let (idx, obs) = observations
        .iter()
        .filter_map(|(k, v)| k.parse::<usize>().ok().map(|i| (i, v)))
        .max_by_key(|(i, _)| *i)?;

    // Observations are arrays: value first, then attribute indices.
    let raw = match obs {
        Value::Array(items) => items.first()?,
        other => other,
    };
    let value = match raw {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };

    Some(IndicatorValue {
        name: name.to_string(),
        value: Some(value),
        period: Some(period_label(body, idx)),
    })
}

/// Map an observation index to its period id (`2024-Q3`), falling back to the index.
fn period_label(body: &Value, idx: usize) -> String {
    body.pointer("/structure/dimensions/observation/0/values")
        .and_then(Value::as_array)
        .and_then(|values| values.get(idx))
        .and_then(|v| v.get("id").or_else(|| v.get("name")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| idx.to_string())
}
