//! Client configuration.
//!
//! The library never reads the environment; callers build a [`ClientConfig`]
//! directly or deserialize one from whatever source they use.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CorganizeError, Result};

/// Parameters used to construct a [`CorganizeClient`](crate::CorganizeClient).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use corganize::ClientConfig;
///
/// let config = ClientConfig::new("https://corganize.example.com/api", "my-key")
///     .with_timeout(Duration::from_secs(30));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `https://corganize.example.com/api`.
    pub base_url: String,

    /// API key sent in the `apikey` header.
    pub api_key: String,

    /// Per-request timeout in milliseconds. `None` keeps the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Overrides the default `User-Agent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Create a config with the two required parameters.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_ms: None,
            user_agent: None,
        }
    }

    /// Set a per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Set a custom `User-Agent`.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Check that both required parameters are present.
    ///
    /// # Errors
    ///
    /// Returns [`CorganizeError::InvalidConfig`] if the base URL or API key
    /// is blank, or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(CorganizeError::InvalidConfig(
                "base URL is empty".to_string(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(CorganizeError::InvalidConfig("API key is empty".to_string()));
        }
        if self.timeout_ms == Some(0) {
            return Err(CorganizeError::InvalidConfig(
                "timeout must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }
}
