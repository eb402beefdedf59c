use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_HISTORY_PATH: &str = "prediction_history.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub history_path: PathBuf,
    /// `None` keeps the HTTP client's defaults.
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Reads `PREDICTOR_BASE_URL`, `HISTORY_PATH` and `REQUEST_TIMEOUT_SECS`,
    /// all optional. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| {
                        format!("REQUEST_TIMEOUT_SECS is not a whole number of seconds: {raw}")
                    })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            base_url: lookup("PREDICTOR_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            history_path: lookup("HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH)),
            request_timeout,
        })
    }
}
