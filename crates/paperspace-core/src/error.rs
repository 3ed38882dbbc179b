//! Error types for Paperspace API calls.
//!
//! Every failure a call can hit lands in [`Error`]: malformed URLs, JSON
//! encoding and decoding, transport failures and non-2xx API responses.
//! Nothing is retried; errors propagate to the caller as soon as they occur.

use serde::Deserialize;
use thiserror::Error;

/// Main error type for Paperspace operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Base URL or request path could not be parsed or resolved
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Resource identifier is not usable in an endpoint path
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Client configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request body could not be encoded as JSON
    #[error("Failed to serialize request body: {0}")]
    Serialization(String),

    /// Response body could not be decoded into the expected shape
    #[error("Failed to decode response body: {0}")]
    Deserialization(String),

    /// The HTTP transport failed before a response was received
    #[error("HTTP transport failed: {0}")]
    Transport(String),

    /// The HTTP transport gave up waiting for the server
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The server answered with a status outside 200-299
    #[error("Request failed with status code {}{}", .status, format_message(.message))]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Message extracted from the error body, when the server sent one
        message: Option<String>,
    },
}

fn format_message(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Specialized result type for Paperspace operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::InvalidId(_) => "INVALID_ID",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Deserialization(_) => "DESERIALIZATION_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Api { .. } => "API_ERROR",
        }
    }

    /// Status code of an API error, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Builds an API error from a non-2xx status and the raw response body.
    ///
    /// The body is inspected for a server-provided message in either the
    /// `{"error": {"message": ...}}` or the flat `{"message": ...}` shape.
    /// Bodies that are not JSON are ignored; the status code alone is kept.
    #[must_use]
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message);
        Self::Api { status, message }
    }
}

/// Error body as Paperspace returns it on failed requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error
            .and_then(|detail| detail.message)
            .or(self.message)
            .filter(|m| !m.is_empty())
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::Config(format!("Invalid header value: {err}"))
    }
}
