//! Client configuration sourced from the environment.
//!
//! Recognized variables: `BASE_URL`, `TIMEOUT` (milliseconds, `0` for no
//! limit) and `LOG_LEVEL`.
//! A `.env` file in the working directory is read first when present; values
//! already set in the process environment take precedence over it.

use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use tracing::level_filters::LevelFilter;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

/// Immutable settings shared by every call an `ApiClient` makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Bound on a whole exchange. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub log_level: LevelFilter,
    /// Sent with every request. Per-call headers of the same name win.
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_millis(DEFAULT_TIMEOUT_MS)),
            log_level: DEFAULT_LOG_LEVEL,
            headers: default_headers(),
        }
    }
}

impl ClientConfig {
    /// Defaults pointed at `base_url`, typically a locally spawned fixture.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the common case.
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or blank keys fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(base_url) = read("BASE_URL") {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(raw) = read("TIMEOUT") {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?;
            config.timeout = (millis > 0).then_some(Duration::from_millis(millis));
        }
        if let Some(level) = read("LOG_LEVEL") {
            config.log_level = parse_log_level(&level)?;
        }

        Ok(config)
    }

    /// A zero duration removes the limit, same as `TIMEOUT=0`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Add or replace a default header after checking it is valid on the wire.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ConfigError> {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ConfigError::InvalidHeader(format!("{name}: {e}")))?;
        HeaderValue::from_str(value)
            .map_err(|e| ConfigError::InvalidHeader(format!("{name}: {e}")))?;

        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        Ok(self)
    }
}

/// Accepts the `tracing` level names plus the npm-style `verbose`, `http` and
/// `silly`, case-insensitively.
pub fn parse_log_level(raw: &str) -> Result<LevelFilter, ConfigError> {
    let level = raw.trim().to_ascii_lowercase();
    let canonical = match level.as_str() {
        "verbose" | "http" => "debug",
        "silly" => "trace",
        "warning" => "warn",
        other => other,
    };
    canonical
        .parse::<LevelFilter>()
        .map_err(|_| ConfigError::InvalidLogLevel {
            value: raw.to_string(),
        })
}

fn default_headers() -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ]
}
