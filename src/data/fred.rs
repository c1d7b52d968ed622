//! FRED API integration: series observations and release dates.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::data::http::get_json;
use crate::domain::{Observation, SeriesReading};
use crate::error::AppError;
use crate::math::change::change_percent_text;

const BASE_URL: &str = "https://api.stlouisfed.org/fred";

pub struct FredClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl FredClient {
    /// `api_key = None` makes every call return an empty result without a request.
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            warn!("FRED client created without an API key; requests will be skipped");
        }
        Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    fn key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Latest two observations of `series_id` with the change between them.
    ///
    /// `Ok(None)` when the key is missing or the series has no observations.
    pub fn latest_reading(&self, series_id: &str) -> Result<Option<SeriesReading>, AppError> {
        let Some(api_key) = self.key() else {
            return Ok(None);
        };

        let body: ObservationsResponse = get_json(
            &self.client,
            &format!("{}/series/observations", self.base_url),
            &[
                ("series_id", series_id.to_string()),
                ("api_key", api_key.to_string()),
                ("file_type", "json".to_string()),
                ("sort_order", "desc".to_string()),
                ("limit", "2".to_string()),
            ],
            "FRED observations",
        )?;

        reading_from_observations(series_id, body.observations)
    }

    /// Scheduled release dates for `release_id` in `[from, to]`, ascending.
    pub fn release_dates(&self, release_id: u32, from: NaiveDate, to: NaiveDate) -> Result<Vec<NaiveDate>, AppError> {
        let Some(api_key) = self.key() else {
            return Ok(Vec::new());
        };

        let body: ReleaseDatesResponse = get_json(
            &self.client,
            &format!("{}/release/dates", self.base_url),
            &[
                ("release_id", release_id.to_string()),
                ("api_key", api_key.to_string()),
                ("file_type", "json".to_string()),
                ("realtime_start", from.to_string()),
                ("realtime_end", "9999-12-31".to_string()),
                ("include_release_dates_with_no_data", "true".to_string()),
                ("sort_order", "asc".to_string()),
                ("order_by", "release_date".to_string()),
                ("limit", "10".to_string()),
            ],
            "FRED release dates",
        )?;

        let dates = parse_release_dates(&body.release_dates, from, to);
        info!(release_id, n = dates.len(), "release dates in window");
        Ok(dates)
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct ReleaseDatesResponse {
    #[serde(default)]
    release_dates: Vec<RawReleaseDate>,
}

#[derive(Debug, Deserialize)]
struct RawReleaseDate {
    date: String,
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::parse(format!("Invalid FRED date '{raw}': {e}")))
}

/// Observations arrive newest first; the first is `latest`, the second `previous`.
fn reading_from_observations(series_id: &str, observations: Vec<RawObservation>) -> Result<Option<SeriesReading>, AppError> {
    let mut iter = observations.into_iter();
    let Some(latest) = iter.next() else {
        return Ok(None);
    };
    let latest = Observation {
        date: parse_date(&latest.date)?,
        value: latest.value,
    };
    let previous = match iter.next() {
        Some(p) => Some(Observation {
            date: parse_date(&p.date)?,
            value: p.value,
        }),
        None => None,
    };

    let change_percent = previous
        .as_ref()
        .and_then(|p| change_percent_text(&latest.value, &p.value));

    Ok(Some(SeriesReading {
        series_id: series_id.to_string(),
        latest,
        previous,
        change_percent,
    }))
}

fn parse_release_dates(raw: &[RawReleaseDate], from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let mut out: Vec<NaiveDate> = raw
        .iter()
        .filter_map(|r| parse_date(&r.date).ok())
        .filter(|d| *d >= from && *d <= to)
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(date: &str, value: &str) -> RawObservation {
        RawObservation {
            date: date.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn reading_uses_first_two_observations() {
        let r = reading_from_observations("UNRATE", vec![obs("2025-02-01", "4.2"), obs("2025-01-01", "4.0")])
            .unwrap()
            .unwrap();
        assert_eq!(r.latest.value, "4.2");
        assert_eq!(r.previous.as_ref().unwrap().value, "4.0");
        assert!((r.change_percent.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn missing_previous_value_has_no_change() {
        let r = reading_from_observations("GDP", vec![obs("2025-02-01", "100"), obs("2025-01-01", ".")])
            .unwrap()
            .unwrap();
        assert!(r.previous.is_some());
        assert_eq!(r.change_percent, None);

        let single = reading_from_observations("GDP", vec![obs("2025-02-01", "100")]).unwrap().unwrap();
        assert!(single.previous.is_none());
        assert_eq!(single.change_percent, None);
    }

    #[test]
    fn empty_observations_is_none() {
        assert!(reading_from_observations("GDP", Vec::new()).unwrap().is_none());
    }

    #[test]
    fn bad_date_is_a_parse_error() {
        let err = reading_from_observations("GDP", vec![obs("02/01/2025", "1")]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
    }

    #[test]
    fn observations_response_tolerates_missing_field() {
        let body: ObservationsResponse = serde_json::from_str(r#"{"error_code": 400}"#).unwrap();
        assert!(body.observations.is_empty());
    }

    #[test]
    fn release_dates_are_windowed_and_sorted() {
        let raw: ReleaseDatesResponse = serde_json::from_value(serde_json::json!({
            "release_dates": [
                { "release_id": 10, "date": "2026-03-12" },
                { "release_id": 10, "date": "2026-02-11" },
                { "release_id": 10, "date": "2026-02-11" },
                { "release_id": 10, "date": "2026-01-13" }
            ]
        }))
        .unwrap();
        let from = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let dates = parse_release_dates(&raw.release_dates, from, to);
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2026, 2, 11).unwrap()]);
    }

    #[test]
    fn missing_key_skips_requests() {
        let client = FredClient::new(Client::new(), None);
        assert!(client.latest_reading("GDP").unwrap().is_none());
        let d = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(client.release_dates(10, d, d).unwrap().is_empty());
    }
}
