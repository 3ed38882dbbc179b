//! HTTP transport seam.
//!
//! [`ApiRequest`] and [`RawResponse`] describe one exchange as plain data.
//! A [`Transport`] executes the exchange; the default one is a blocking
//! `reqwest` client, and callers may plug in their own (for instance one
//! configured with a proxy or a tighter deadline).

use crate::config::ClientSettings;
use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

/// A fully built request, ready to be executed by a [`Transport`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute request URL
    pub url: Url,
    /// Request headers, including authentication
    pub headers: HeaderMap,
    /// JSON-encoded body, if any
    pub body: Option<Vec<u8>>,
}

/// A response as returned by the transport, body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Build a response with no headers.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Executes one HTTP exchange.
///
/// Implementations must read the response body completely before
/// returning. No retries are expected at this layer.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    /// Send the request and return the status, headers and body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be sent or the body could
    /// not be read.
    fn execute(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// Default transport backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a transport from client settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .connect_timeout(settings.connect_timeout())
            .gzip(settings.enable_compression)
            .build()
            .map_err(|err| Error::Config(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self { http })
    }

    /// Wrap an already configured `reqwest` client.
    #[must_use]
    pub const fn from_client(http: reqwest::blocking::Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .map_err(|err| Error::Transport(format!("Failed to read response body: {err}")))?
            .to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
