//! World Bank indicators API.

use chrono::{Datelike, Local};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::data::http::get_json;
use crate::domain::IndicatorValue;
use crate::error::AppError;

const BASE_URL: &str = "https://api.worldbank.org/v2/country";

pub struct WorldBankClient {
    client: Client,
}

impl WorldBankClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Latest non-null value of `indicator` for `country` (ISO2, e.g. `CN`) over the last few years.
    pub fn latest(&self, country: &str, indicator: &str, name: &str) -> Result<Option<IndicatorValue>, AppError> {
        let year = Local::now().year();
        let body: Value = get_json(
            &self.client,
            &format!("{BASE_URL}/{country}/indicator/{indicator}"),
            &[
                ("format", "json".to_string()),
                ("per_page", "5".to_string()),
                ("date", format!("{}:{}", year - 3, year)),
            ],
            "World Bank",
        )?;
        parse_latest(&body, name)
    }
}

/// The response is `[paging, rows]`; rows are newest first and may carry `null` values.
fn parse_latest(body: &Value, name: &str) -> Result<Option<IndicatorValue>, AppError> {
    let arr = body
        .as_array()
        .ok_or_else(|| AppError::parse("World Bank response is not an array"))?;

    // An error payload is `[{"message": [...]}]` with no second element.
    if let Some(msg) = arr.first().and_then(|p| p.get("message")) {
        return Err(AppError::status(format!("World Bank error: {msg}")));
    }

    let Some(rows) = arr.get(1).and_then(Value::as_array) else {
        return Ok(None);
    };

    let found = rows.iter().find_map(|row| {
        let value = row.get("value")?;
        let value = match value {
            Value::Number(n) => n.to_string(),
            Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => return None,
        };
        let period = row.get("date").and_then(Value::as_str).map(str::to_string);
        Some(IndicatorValue {
            name: name.to_string(),
            value: Some(value),
            period,
        })
    });
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skips_null_years() {
        let body = json!([
            { "page": 1, "pages": 1, "per_page": 5, "total": 3 },
            [
                { "date": "2025", "value": null },
                { "date": "2024", "value": 4.98 },
                { "date": "2023", "value": 5.25 }
            ]
        ]);
        let v = parse_latest(&body, "GDP Growth").unwrap().unwrap();
        assert_eq!(v.value.as_deref(), Some("4.98"));
        assert_eq!(v.period.as_deref(), Some("2024"));
    }

    #[test]
    fn missing_rows_is_empty() {
        let body = json!([{ "page": 0, "pages": 0, "total": 0 }, null]);
        assert!(parse_latest(&body, "x").unwrap().is_none());
    }

    #[test]
    fn error_payload_is_reported() {
        let body = json!([{ "message": [{ "id": "120", "value": "Invalid value" }] }]);
        let err = parse_latest(&body, "x").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Status);
    }
}
