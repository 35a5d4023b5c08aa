//! Configuration types for the search adapter.

use std::env;
use std::time::Duration;

use url::Url;

use crate::errors::SearchIndexError;

/// Environment variable holding the backend URL.
pub const URL_ENV: &str = "OPENSEARCH_URL";
/// Environment variable holding the basic-auth username.
pub const USERNAME_ENV: &str = "OPENSEARCH_USERNAME";
/// Environment variable holding the basic-auth password.
pub const PASSWORD_ENV: &str = "OPENSEARCH_PASSWORD";
/// Environment variable holding the per-request timeout in seconds.
pub const TIMEOUT_ENV: &str = "OPENSEARCH_TIMEOUT_SECS";

/// Connection settings for the search backend.
///
/// Only the origin of `url` is used to build resource paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAdapterConfig {
    /// The backend URL (e.g., "http://localhost:9200").
    pub url: Url,
    /// Basic-auth username.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Per-request timeout applied by the transport. `None` leaves it to the
    /// transport default.
    pub timeout: Option<Duration>,
}

impl SearchAdapterConfig {
    /// Create a config for `url` without credentials or timeout.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchAdapterConfig)` - If `url` parses
    /// * `Err(SearchIndexError::ValidationError)` - Otherwise
    pub fn new(url: &str) -> Result<Self, SearchIndexError> {
        let url = Url::parse(url)
            .map_err(|e| SearchIndexError::validation(format!("Invalid backend URL: {}", e)))?;

        Ok(Self {
            url,
            username: None,
            password: None,
            timeout: None,
        })
    }

    /// Set basic-auth credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load the config from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: Backend URL (required)
    /// - `OPENSEARCH_USERNAME`: Basic-auth username (optional)
    /// - `OPENSEARCH_PASSWORD`: Basic-auth password (optional)
    /// - `OPENSEARCH_TIMEOUT_SECS`: Per-request timeout in seconds (optional)
    pub fn from_env() -> Result<Self, SearchIndexError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SearchIndexError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SearchIndexError::validation(format!("{} is required", URL_ENV)))?;

        let mut config = Self::new(&url)?;
        config.username = lookup(USERNAME_ENV).filter(|v| !v.is_empty());
        config.password = lookup(PASSWORD_ENV).filter(|v| !v.is_empty());

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                SearchIndexError::validation(format!("Invalid {}: {}", TIMEOUT_ENV, e))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Username and password, when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}
