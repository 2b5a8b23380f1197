//! Client configuration.
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ELEVATIONS_API_URL` | Endpoint that requests are posted to | [`DEFAULT_API_URL`] |
//! | `ELEVATIONS_TIMEOUT_SECS` | Request timeout in whole seconds | None |

use std::time::Duration;

use crate::error::{ElevationsError, Result};

/// Endpoint of the hosted elevations API.
pub const DEFAULT_API_URL: &str =
    "https://europe-west1-windeurope72-private.cloudfunctions.net/elevations-api";

/// Environment variable overriding the API endpoint.
pub const API_URL_ENV: &str = "ELEVATIONS_API_URL";

/// Environment variable setting a request timeout in seconds.
pub const TIMEOUT_ENV: &str = "ELEVATIONS_TIMEOUT_SECS";

/// Settings for an [`ElevationsClient`](crate::ElevationsClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL that requests are posted to.
    pub api_url: String,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `ELEVATIONS_TIMEOUT_SECS` isn't a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable source.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV).filter(|s| !s.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }

        if let Some(timeout) = lookup(TIMEOUT_ENV).filter(|s| !s.trim().is_empty()) {
            let secs: u64 = timeout.trim().parse().map_err(|_| ElevationsError::Config {
                message: format!("{TIMEOUT_ENV} must be a whole number of seconds, got {timeout:?}"),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Check that the configuration can be used to make requests.
    pub fn validate(&self) -> Result<()> {
        let valid = reqwest::Url::parse(&self.api_url).is_ok_and(|url| {
            matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
        });
        if !valid {
            return Err(ElevationsError::Config {
                message: format!("API URL must be an http(s) URL, got {:?}", self.api_url),
            });
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(ElevationsError::Config {
                message: "timeout must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
