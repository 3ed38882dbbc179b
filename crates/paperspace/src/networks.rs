//! Private network listing.

use crate::models::Network;
use crate::Result;
use paperspace_core::{ApiClient, Response};
use std::sync::Arc;

/// Operations on `networks/*` endpoints.
#[derive(Debug, Clone)]
pub struct NetworksService {
    api: Arc<ApiClient>,
}

impl NetworksService {
    /// Create the service on top of a shared request client.
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// List private networks available to the user or team.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub fn list(&self) -> Result<Response<Vec<Network>>> {
        self.api.get("networks/getNetworks")
    }
}
