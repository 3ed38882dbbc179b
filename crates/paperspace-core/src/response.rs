//! Decoded API responses.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::ops::Deref;

/// Header carrying the request quota for the current window.
pub const HEADER_RATE_LIMIT: &str = "RateLimit-Limit";

/// Header carrying the requests left in the current window.
pub const HEADER_RATE_REMAINING: &str = "RateLimit-Remaining";

/// Header carrying the time until the window resets.
pub const HEADER_RATE_RESET: &str = "RateLimit-Reset";

/// Rate-limit values reported by the server. Read-only; the client does not
/// throttle on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rate {
    /// Requests allowed per window
    pub limit: Option<u64>,
    /// Requests remaining in the window
    pub remaining: Option<u64>,
    /// Seconds until the window resets
    pub reset: Option<u64>,
}

/// A successful API response: status, headers and the decoded payload.
///
/// Derefs to the payload, so fields can be read directly.
#[derive(Debug, Clone)]
pub struct Response<T> {
    status: StatusCode,
    headers: HeaderMap,
    data: T,
}

impl<T> Response<T> {
    /// Assemble a response.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, data: T) -> Self {
        Self {
            status,
            headers,
            data,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Borrow the decoded payload.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Take the decoded payload, dropping status and headers.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Rate-limit headers, when the server sent them.
    #[must_use]
    pub fn rate(&self) -> Rate {
        Rate {
            limit: self.header_u64(HEADER_RATE_LIMIT),
            remaining: self.header_u64(HEADER_RATE_REMAINING),
            reset: self.header_u64(HEADER_RATE_RESET),
        }
    }

    fn header_u64(&self, name: &str) -> Option<u64> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
    }
}

impl<T> Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}
