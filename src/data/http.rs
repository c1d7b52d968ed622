//! Blocking HTTP plumbing shared by every source.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

pub const BROWSER_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the client used for a whole run.
pub fn build_client(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .user_agent(BROWSER_UA)
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))
}

/// Map a non-success status to `AppError::status`, keeping a short body excerpt.
pub fn check_status(resp: Response, what: &str) -> Result<Response, AppError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let excerpt: String = body.chars().take(200).collect();
    Err(AppError::status(format!("{what} request failed with status {status}: {excerpt}")))
}

/// GET `url` with `query` and decode the JSON body into `T`.
pub fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
    what: &str,
) -> Result<T, AppError> {
    debug!(url, what, "GET");
    let resp = client
        .get(url)
        .query(query)
        .send()
        .map_err(|e| AppError::network(format!("{what} request failed: {e}")))?;
    let resp = check_status(resp, what)?;
    resp.json::<T>()
        .map_err(|e| AppError::parse(format!("Failed to parse {what} response: {e}")))
}

/// GET `url` with `query` and return the body as text (HTML pages).
pub fn get_text(client: &Client, url: &str, query: &[(&str, String)], what: &str) -> Result<String, AppError> {
    debug!(url, what, "GET");
    let resp = client
        .get(url)
        .query(query)
        .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .send()
        .map_err(|e| AppError::network(format!("{what} request failed: {e}")))?;
    let resp = check_status(resp, what)?;
    resp.text()
        .map_err(|e| AppError::parse(format!("Failed to read {what} body: {e}")))
}
