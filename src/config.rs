//! Runtime configuration
//!
//! Read from the environment, after loading a `.env` file if one exists.

use std::time::Duration;

use thiserror::Error;

/// Default base path of the food classification API
pub const DEFAULT_API_BASE: &str = "/api";

/// Origin a relative API base is resolved against
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `FITCALC_API_BASE`, absolute URL or path
    pub api_base: String,
    /// `FITCALC_ORIGIN`
    pub origin: String,
    /// `FITCALC_TIMEOUT_SECS`; `None` leaves the transport default in place
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: None,
        }
    }
}

impl Config {
    /// Load from the process environment (and `.env`)
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout = match non_empty("FITCALC_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    name: "FITCALC_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_base: non_empty("FITCALC_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            origin: non_empty("FITCALC_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
            timeout,
        })
    }

    /// Full URL of the classify endpoint
    pub fn classify_url(&self) -> String {
        let base = self.api_base.trim().trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            return format!("{}/classify", base);
        }

        let origin = self.origin.trim().trim_end_matches('/');
        if base.is_empty() {
            format!("{}/classify", origin)
        } else if base.starts_with('/') {
            format!("{}{}/classify", origin, base)
        } else {
            format!("{}/{}/classify", origin, base)
        }
    }
}
