use std::time::Duration;

/// Default API base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local API. Override via the
/// environment (or a `.env` file loaded by the binary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL (default: `http://localhost:8000`).
    pub api_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Previously issued bearer token used to restore a session.
    pub token: Option<String>,
}

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            token: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                 |
    /// |-----------------------------------|-------------------------|
    /// | `SCENEVAULT_API_URL`              | `http://localhost:8000` |
    /// | `SCENEVAULT_REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `SCENEVAULT_TOKEN`                | unset                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("SCENEVAULT_API_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());

        let request_timeout_secs = match lookup("SCENEVAULT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "SCENEVAULT_REQUEST_TIMEOUT_SECS",
                expected: "u64",
                value: raw,
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let token = lookup("SCENEVAULT_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            api_url,
            request_timeout_secs,
            token,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
