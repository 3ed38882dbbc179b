//! Configuration structures for Paperspace clients.
//!
//! [`Config`] carries the API key. [`ClientSettings`] describes where and how
//! requests are sent and is validated before a client is built.

use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default Paperspace API endpoint. The trailing slash is required.
pub const DEFAULT_BASE_URL: &str = "https://api.paperspace.io/";

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("paperspace/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Authorization settings for the Paperspace API.
///
/// Immutable once built. The key is kept in a [`SecretString`] so it never
/// shows up in `Debug` output or logs.
pub struct Config {
    api_key: SecretString,
}

impl Config {
    /// Create a configuration holding the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
        }
    }

    /// The API key sent in the `x-api-key` header.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Transport-level settings for a Paperspace client.
#[derive(Debug, Clone, Validate)]
pub struct ClientSettings {
    /// Base URL all endpoint paths are resolved against
    #[validate(url)]
    pub base_url: String,

    /// Value of the `User-Agent` header
    #[validate(length(min = 1))]
    pub user_agent: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[validate(range(min = 1, max = 60))]
    pub connect_timeout_secs: u64,

    /// Whether gzip response compression is negotiated
    pub enable_compression: bool,
}

impl ClientSettings {
    /// Create settings with the default endpoint and timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            enable_compression: true,
        }
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Set connect timeout in seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout_secs = seconds;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate the settings and parse the base URL.
    ///
    /// A base URL without a trailing slash still parses here; requests built
    /// against it are rejected later by the request builder.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        self.validate()
            .map_err(|e| Error::Config(format!("Invalid client settings: {e}")))?;
        Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidUrl(format!("Invalid base URL `{}`: {e}", self.base_url)))
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::new()
    }
}
