//! Entry point bundling the resource services.

use crate::machines::MachinesService;
use crate::networks::NetworksService;
use crate::scripts::ScriptsService;
use crate::Result;
use paperspace_core::{ApiClient, ClientSettings, Config, ReqwestTransport, Transport};
use std::sync::Arc;

/// Builder for [`Client`].
#[derive(Clone)]
pub struct ClientBuilder {
    api_key: String,
    settings: ClientSettings,
    transport: Option<Arc<dyn Transport>>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("settings", &self.settings)
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Start a builder for the given API key with default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            settings: ClientSettings::default(),
            transport: None,
        }
    }

    /// Override the base URL. It must end with `/`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.settings = self.settings.with_base_url(base_url);
        self
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.settings = self.settings.with_user_agent(user_agent);
        self
    }

    /// Override the request timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.settings = self.settings.with_timeout(seconds);
        self
    }

    /// Replace all client settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ClientSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Send requests through a custom transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Send requests through an already configured `reqwest` client.
    #[must_use]
    pub fn with_http_client(self, http: reqwest::blocking::Client) -> Self {
        self.with_transport(Arc::new(ReqwestTransport::from_client(http)))
    }

    /// Build the client instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid, the base URL is
    /// malformed, or the default HTTP client cannot be built.
    pub fn build(self) -> Result<Client> {
        let config = Config::new(self.api_key);
        let api = match self.transport {
            Some(transport) => ApiClient::with_transport(config, &self.settings, transport)?,
            None => ApiClient::new(config, &self.settings)?,
        };
        Ok(Client::from_api(Arc::new(api)))
    }
}

/// Blocking client for the Paperspace API.
///
/// Every service shares one [`ApiClient`]; the client holds no other state
/// and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Client {
    api: Arc<ApiClient>,
    machines: MachinesService,
    scripts: ScriptsService,
    networks: NetworksService,
}

impl Client {
    /// Create a client for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Start a [`ClientBuilder`].
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Wrap an existing request client.
    #[must_use]
    pub fn from_api(api: Arc<ApiClient>) -> Self {
        Self {
            machines: MachinesService::new(Arc::clone(&api)),
            scripts: ScriptsService::new(Arc::clone(&api)),
            networks: NetworksService::new(Arc::clone(&api)),
            api,
        }
    }

    /// The shared request client, for endpoints without a service method.
    #[must_use]
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// Machine operations.
    #[must_use]
    pub fn machines(&self) -> &MachinesService {
        &self.machines
    }

    /// Script operations.
    #[must_use]
    pub fn scripts(&self) -> &ScriptsService {
        &self.scripts
    }

    /// Network operations.
    #[must_use]
    pub fn networks(&self) -> &NetworksService {
        &self.networks
    }
}
