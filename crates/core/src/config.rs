//! Connection settings for the remote Odoo instance.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory.

use std::time::Duration;

use crate::error::{SalesError, SalesResult};

pub const ENV_URL: &str = "ODOO_URL";
pub const ENV_DB: &str = "ODOO_DB";
pub const ENV_USERNAME: &str = "ODOO_USERNAME";
pub const ENV_API_KEY: &str = "ODOO_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "ODOO_TIMEOUT_SECS";

/// Transport timeout used when `ODOO_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials and endpoint of one Odoo database.
#[derive(Clone, PartialEq, Eq)]
pub struct OdooConfig {
    pub url: String,
    pub db: String,
    pub username: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl OdooConfig {
    pub fn new(
        url: impl Into<String>,
        db: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            db: db.into(),
            username: username.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from the environment after applying any `.env` file.
    pub fn from_env() -> SalesResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "failed to read .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> SalesResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> SalesResult<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(SalesError::configuration(format!(
                    "Missing required environment variable: {key}"
                ))),
            }
        };

        let config = Self::new(
            require(ENV_URL)?,
            require(ENV_DB)?,
            require(ENV_USERNAME)?,
            require(ENV_API_KEY)?,
        );

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    SalesError::configuration(format!(
                        "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {raw:?}"
                    ))
                })?;
                Duration::from_secs(secs)
            }
            _ => DEFAULT_TIMEOUT,
        };

        Ok(config.with_timeout(timeout))
    }

    /// Name of the first credential that is blank, if any.
    pub fn missing_credential(&self) -> Option<&'static str> {
        [
            (ENV_URL, &self.url),
            (ENV_DB, &self.db),
            (ENV_USERNAME, &self.username),
            (ENV_API_KEY, &self.api_key),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
    }
}

impl core::fmt::Debug for OdooConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OdooConfig")
            .field("url", &self.url)
            .field("db", &self.db)
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
