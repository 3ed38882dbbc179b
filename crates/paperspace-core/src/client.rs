//! Request construction and dispatch shared by all resource services.
//!
//! [`ApiClient`] turns an endpoint path and an optional payload into an
//! authenticated [`ApiRequest`], hands it to the [`Transport`], checks the
//! status and decodes the JSON body. Each call is one blocking round trip;
//! nothing is retried.

use crate::config::{ClientSettings, Config};
use crate::error::{Error, Result};
use crate::response::Response;
use crate::transport::{ApiRequest, RawResponse, ReqwestTransport, Transport};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Media type of request and response bodies.
pub const MEDIA_TYPE: &str = "application/json";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Builds and dispatches Paperspace API requests.
///
/// Holds no mutable state; share it between services and threads with
/// an `Arc`.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    user_agent: String,
    config: Config,
}

impl ApiClient {
    /// Create a client using the default blocking `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid, the base URL is
    /// malformed, or the HTTP client cannot be built.
    pub fn new(config: Config, settings: &ClientSettings) -> Result<Self> {
        let transport = ReqwestTransport::new(settings)?;
        Self::with_transport(config, settings, Arc::new(transport))
    }

    /// Create a client that sends requests through the given transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the base URL is
    /// malformed.
    pub fn with_transport(
        config: Config,
        settings: &ClientSettings,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let base_url = settings.parse_base_url()?;
        Ok(Self {
            transport,
            base_url,
            user_agent: settings.user_agent.clone(),
            config,
        })
    }

    /// Access the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Access the user agent.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Access the authorization config.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build an authenticated request for `path`, resolved against the base URL.
    ///
    /// Leading slashes on `path` are stripped so it always resolves below the
    /// base URL; absolute URLs and paths escaping the base are rejected. When
    /// `body` is given it is JSON encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not end with `/`, if `path`
    /// is absolute or cannot be resolved below the base URL, if `body` cannot be serialized, or if the API key
    /// or user agent are not valid header values.
    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<ApiRequest>
    where
        B: Serialize + ?Sized,
    {
        if !self.base_url.path().ends_with('/') {
            return Err(Error::InvalidUrl(format!(
                "Base URL must have a trailing slash, but `{}` does not",
                self.base_url
            )));
        }

        let relative = path.trim_start_matches('/');
        if Url::parse(relative).is_ok() {
            return Err(Error::InvalidUrl(format!(
                "Endpoint path `{path}` must be relative to the base URL"
            )));
        }
        let url = self
            .base_url
            .join(relative)
            .map_err(|err| Error::InvalidUrl(format!("Invalid endpoint path `{path}`: {err}")))?;
        if url.origin() != self.base_url.origin()
            || !url.path().starts_with(self.base_url.path())
        {
            return Err(Error::InvalidUrl(format!(
                "Endpoint path `{path}` resolves outside the base URL"
            )));
        }

        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|err| Error::Serialization(err.to_string()))?;

        Ok(ApiRequest {
            method,
            url,
            headers: self.default_headers()?,
            body,
        })
    }

    /// Execute a request and decode the JSON body into `T`.
    ///
    /// An empty or 204 body decodes as JSON `null`, so `()` and `Option`
    /// targets accept it.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails, the status is outside
    /// 200-299 (the body is then never decoded into `T`), or decoding fails.
    pub fn send<T>(&self, request: ApiRequest) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let path = request.url.path().to_string();
        let raw = self.dispatch(request)?;
        let data = decode_body(&path, &raw)?;
        Ok(Response::new(raw.status, raw.headers, data))
    }

    /// Execute a request without decoding the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or the status is outside
    /// 200-299.
    pub fn execute(&self, request: ApiRequest) -> Result<Response<()>> {
        let raw = self.dispatch(request)?;
        Ok(Response::new(raw.status, raw.headers, ()))
    }

    /// `GET path` and decode the result.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new_request`] and [`ApiClient::send`].
    pub fn get<T>(&self, path: &str) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let request = self.new_request::<()>(Method::GET, path, None)?;
        self.send(request)
    }

    /// `POST path` with a JSON body and decode the result.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new_request`] and [`ApiClient::send`].
    pub fn post<B, T>(&self, path: &str, body: &B) -> Result<Response<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.new_request(Method::POST, path, Some(body))?;
        self.send(request)
    }

    /// `POST path` without a body, ignoring the response payload.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new_request`] and [`ApiClient::execute`].
    pub fn post_empty(&self, path: &str) -> Result<Response<()>> {
        let request = self.new_request::<()>(Method::POST, path, None)?;
        self.execute(request)
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut api_key = HeaderValue::from_str(self.config.api_key())?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        Ok(headers)
    }

    fn dispatch(&self, request: ApiRequest) -> Result<RawResponse> {
        let method = request.method.clone();
        let path = request.url.path().to_string();
        info!(%method, %path, "Paperspace request");

        let raw = self.transport.execute(request)?;
        debug!(%method, %path, status = raw.status.as_u16(), "Paperspace response");

        if let Err(err) = check_response(&raw) {
            warn!(%method, %path, error = %err, "Paperspace request failed");
            return Err(err);
        }
        Ok(raw)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Reject any status outside 200-299.
///
/// # Errors
///
/// Returns [`Error::Api`] carrying the status code and any server message.
pub fn check_response(response: &RawResponse) -> Result<()> {
    if response.status.is_success() {
        return Ok(());
    }
    Err(Error::from_status(response.status.as_u16(), &response.body))
}

fn decode_body<T>(path: &str, response: &RawResponse) -> Result<T>
where
    T: DeserializeOwned,
{
    if response.status == StatusCode::NO_CONTENT || response.body.is_empty() {
        serde_json::from_value(serde_json::Value::Null).map_err(|err| {
            Error::Deserialization(format!("Empty response for `{path}`: {err}"))
        })
    } else {
        serde_json::from_slice(&response.body).map_err(|err| {
            Error::Deserialization(format!("Failed to parse response for `{path}`: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde::Deserialize;
    use serde_json::json;

    const BASE: &str = "https://api.paperspace.io/";

    #[derive(Debug, Deserialize, PartialEq)]
    struct Availability {
        available: bool,
    }

    fn client_with(base_url: &str, transport: MockTransport) -> ApiClient {
        let settings = ClientSettings::new().with_base_url(base_url);
        ApiClient::with_transport(Config::new("secret-key"), &settings, Arc::new(transport))
            .unwrap()
    }

    fn client(base_url: &str) -> ApiClient {
        client_with(base_url, MockTransport::new())
    }

    fn header<'a>(request: &'a ApiRequest, name: &str) -> &'a str {
        request.headers.get(name).unwrap().to_str().unwrap()
    }

    #[test]
    fn new_rejects_malformed_base_url() {
        let settings = ClientSettings::new().with_base_url("::not a url::");
        let err = ApiClient::with_transport(
            Config::new("k"),
            &settings,
            Arc::new(MockTransport::new()),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn new_request_resolves_path_and_sets_headers() {
        let client = client(BASE);
        let request = client
            .new_request::<()>(Method::GET, "machines/getMachines", None)
            .unwrap();

        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url.as_str(),
            "https://api.paperspace.io/machines/getMachines"
        );
        assert_eq!(header(&request, "x-api-key"), "secret-key");
        assert!(request.headers.get("x-api-key").unwrap().is_sensitive());
        assert_eq!(header(&request, "content-type"), "application/json");
        assert_eq!(header(&request, "accept"), "application/json");
        assert_eq!(header(&request, "user-agent"), client.user_agent());
        assert!(request.body.is_none());
    }

    #[test]
    fn new_request_strips_leading_slashes() {
        let client = client("https://api.example.com/v1/");
        for path in ["scripts/getScripts", "/scripts/getScripts", "///scripts/getScripts"] {
            let request = client.new_request::<()>(Method::GET, path, None).unwrap();
            assert_eq!(
                request.url.as_str(),
                "https://api.example.com/v1/scripts/getScripts"
            );
        }
    }

    #[test]
    fn new_request_keeps_query_string() {
        let client = client(BASE);
        let request = client
            .new_request::<()>(Method::GET, "machines/getAvailability?region=NY2", None)
            .unwrap();
        assert_eq!(request.url.query(), Some("region=NY2"));
    }

    #[test]
    fn new_request_rejects_absolute_urls() {
        let client = client(BASE);
        for path in ["https://other.host/x", "/https://other.host/x", "mailto:ops@example.com"] {
            let err = client.new_request::<()>(Method::GET, path, None).unwrap_err();
            assert!(matches!(err, Error::InvalidUrl(_)), "{path}");
        }
    }

    #[test]
    fn new_request_rejects_paths_escaping_base() {
        let client = client("https://api.example.com/v1/");
        for path in ["../admin", "machines/../../admin", "\\\\other.host/x"] {
            let err = client.new_request::<()>(Method::GET, path, None).unwrap_err();
            assert!(matches!(err, Error::InvalidUrl(_)), "{path}");
        }
        let request = client
            .new_request::<()>(Method::GET, "machines/../scripts/getScripts", None)
            .unwrap();
        assert_eq!(request.url.as_str(), "https://api.example.com/v1/scripts/getScripts");
    }

    #[test]
    fn new_request_requires_trailing_slash() {
        let client = client("https://api.example.com/v1");
        for path in ["machines/getMachines", "", "/x", "networks/getNetworks?x=1"] {
            let err = client
                .new_request::<()>(Method::GET, path, None)
                .unwrap_err();
            assert!(matches!(err, Error::InvalidUrl(_)), "path {path:?}");
        }
    }

    #[test]
    fn new_request_encodes_body() {
        let client = client(BASE);
        let body = json!({"scriptName": "boot", "runOnce": true});
        let request = client
            .new_request(Method::POST, "scripts/createScript", Some(&body))
            .unwrap();

        let sent: serde_json::Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn new_request_reports_serialization_failure() {
        struct Unserializable;

        impl Serialize for Unserializable {
            fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("refusing to serialize"))
            }
        }

        let err = client(BASE)
            .new_request(Method::POST, "scripts/createScript", Some(&Unserializable))
            .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn new_request_rejects_invalid_api_key_header() {
        let settings = ClientSettings::new();
        let client = ApiClient::with_transport(
            Config::new("bad\nkey"),
            &settings,
            Arc::new(MockTransport::new()),
        )
        .unwrap();
        let err = client
            .new_request::<()>(Method::GET, "networks/getNetworks", None)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn send_decodes_success_body() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|request| {
                request.method == Method::GET
                    && request.url.as_str()
                        == "https://api.paperspace.io/machines/getAvailability"
            })
            .times(1)
            .returning(|_| Ok(RawResponse::new(StatusCode::OK, r#"{"available": true}"#)));

        let client = client_with(BASE, transport);
        let response: Response<Availability> = client.get("machines/getAvailability").unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*response.data(), Availability { available: true });
    }

    #[test]
    fn send_rejects_non_success_without_decoding() {
        for status in [199, 300, 400, 404, 500, 503] {
            let mut transport = MockTransport::new();
            transport.expect_execute().times(1).returning(move |_| {
                Ok(RawResponse::new(
                    StatusCode::from_u16(status).unwrap(),
                    "definitely not json",
                ))
            });

            let client = client_with(BASE, transport);
            let err = client
                .get::<Availability>("machines/getAvailability")
                .unwrap_err();
            assert_eq!(
                err,
                Error::Api {
                    status,
                    message: None
                }
            );
        }
    }

    #[test]
    fn send_surfaces_server_error_message() {
        let mut transport = MockTransport::new();
        transport.expect_execute().returning(|_| {
            Ok(RawResponse::new(
                StatusCode::BAD_REQUEST,
                r#"{"error":{"name":"Error","message":"Invalid region","status":400}}"#,
            ))
        });

        let err = client_with(BASE, transport)
            .get::<Availability>("machines/getAvailability")
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("Invalid region"));
    }

    #[test]
    fn send_reports_decode_failure() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .returning(|_| Ok(RawResponse::new(StatusCode::OK, r#"{"available": "maybe"}"#)));

        let err = client_with(BASE, transport)
            .get::<Availability>("machines/getAvailability")
            .unwrap_err();
        assert!(matches!(err, Error::Deserialization(_)));
    }

    #[test]
    fn send_accepts_empty_body_for_unit() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .returning(|_| Ok(RawResponse::new(StatusCode::NO_CONTENT, Vec::new())));

        let response: Response<()> = client_with(BASE, transport)
            .get("machines/ps123/stop")
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn send_propagates_transport_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .returning(|_| Err(Error::Transport("connection refused".into())));

        let err = client_with(BASE, transport)
            .get::<Availability>("machines/getAvailability")
            .unwrap_err();
        assert_eq!(err, Error::Transport("connection refused".into()));
    }

    #[test]
    fn post_empty_ignores_body() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|request| request.method == Method::POST && request.body.is_none())
            .returning(|_| Ok(RawResponse::new(StatusCode::OK, "not json at all")));

        let response = client_with(BASE, transport)
            .post_empty("machines/ps123/destroyMachine")
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn post_sends_json_body() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|request| request.body.as_deref() == Some(br#"{"scriptName":"boot"}"#.as_slice()))
            .returning(|_| Ok(RawResponse::new(StatusCode::OK, r#"{"available": false}"#)));

        let response: Response<Availability> = client_with(BASE, transport)
            .post("scripts/createScript", &json!({"scriptName": "boot"}))
            .unwrap();
        assert!(!response.available);
    }

    #[test]
    fn debug_does_not_leak_key() {
        let debug = format!("{:?}", client(BASE));
        assert!(!debug.contains("secret-key"));
    }
}
