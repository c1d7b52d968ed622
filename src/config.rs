//! Run settings resolved from the environment (and `.env`) plus CLI overrides.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::AppError;

const DEFAULT_OUTPUT_DIR: &str = "market";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TE_KEY: &str = "guest";

#[derive(Debug, Clone)]
pub struct Settings {
    /// `None` when `FRED_API_KEY` is unset or blank.
    pub fred_api_key: Option<String>,
    pub te_api_key: String,
    /// Root of the output tree (`daily/`, `data/...`).
    pub output_root: PathBuf,
    pub http_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let fred_api_key = std::env::var("FRED_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let te_api_key = std::env::var("TRADING_ECONOMICS_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| DEFAULT_TE_KEY.to_string());

        let output_root = std::env::var("MARKET_OUTPUT_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let http_timeout = match std::env::var("MARKET_HTTP_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            fred_api_key,
            te_api_key,
            output_root,
            http_timeout,
        })
    }

    /// Apply `--out-dir` / `--timeout` on top of the environment.
    pub fn with_overrides(mut self, out_dir: Option<PathBuf>, timeout_secs: Option<u64>) -> Result<Self, AppError> {
        if let Some(dir) = out_dir {
            self.output_root = dir;
        }
        if let Some(secs) = timeout_secs {
            if secs == 0 {
                return Err(AppError::config("--timeout must be at least 1 second."));
            }
            self.http_timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    pub fn daily_dir(&self) -> PathBuf {
        self.output_root.join("daily")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.output_root.join("data")
    }

    /// Log the resolved settings without leaking key material.
    pub fn log_redacted(&self) {
        match &self.fred_api_key {
            Some(key) => info!(key_len = key.len(), "FRED API key configured"),
            None => warn!("FRED_API_KEY not set; FRED-backed sections will be empty"),
        }
        info!(
            output_root = %self.output_root.display(),
            timeout_secs = self.http_timeout.as_secs(),
            te_key_is_guest = self.te_api_key == DEFAULT_TE_KEY,
            "settings resolved"
        );
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, AppError> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::config(format!("MARKET_HTTP_TIMEOUT_SECS must be a whole number, got '{raw}'.")))?;
    if secs == 0 {
        return Err(AppError::config("MARKET_HTTP_TIMEOUT_SECS must be at least 1."));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
impl Settings {
    pub fn for_tests(output_root: PathBuf) -> Self {
        Self {
            fred_api_key: None,
            te_api_key: DEFAULT_TE_KEY.to_string(),
            output_root,
            http_timeout: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_parsing() {
        assert_eq!(parse_timeout(" 12 ").unwrap(), Duration::from_secs(12));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn overrides_replace_env_values() {
        let s = Settings::for_tests(PathBuf::from("market"))
            .with_overrides(Some(PathBuf::from("/tmp/out")), Some(5))
            .unwrap();
        assert_eq!(s.output_root, PathBuf::from("/tmp/out"));
        assert_eq!(s.http_timeout, Duration::from_secs(5));
        assert_eq!(s.daily_dir(), PathBuf::from("/tmp/out/daily"));

        let err = Settings::for_tests(PathBuf::from("m")).with_overrides(None, Some(0));
        assert!(err.is_err());
    }
}
