//! Client configuration.
//!
//! The API base URL and request timeout, loaded from the environment or
//! built up with the builder methods.

use std::time::Duration;

use crate::error::PeerlinkError;

/// Default API base URL when `PEERLINK_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "PEERLINK_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "PEERLINK_TIMEOUT_SECS";

/// Configuration shared by the gateway and the HTTP adapter.
///
/// # Example
///
/// ```
/// use peerlink::config::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_api_base_url("https://api.example.com/api/")
///     .with_request_timeout(Duration::from_secs(3));
/// assert_eq!(config.api_base_url, "https://api.example.com/api");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to (no trailing slash)
    pub api_base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL. Trailing slashes are stripped.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = normalize_base_url(&url.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load configuration from `PEERLINK_API_URL` and `PEERLINK_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, PeerlinkError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if url.trim().is_empty() {
                return Err(PeerlinkError::Config(format!("{} is empty", API_URL_ENV)));
            }
            config = config.with_api_base_url(url.trim());
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                PeerlinkError::Config(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
            })?;
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        tracing::debug!(api_base_url = %config.api_base_url, "Loaded client config");
        Ok(config)
    }

    /// Join an endpoint path onto the base URL with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
