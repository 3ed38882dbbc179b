//! Startup script management.

use crate::models::{CreateScriptRequest, Script};
use crate::Result;
use paperspace_core::id::ScriptId;
use paperspace_core::{add_options, ApiClient, QueryOptions, QueryParams, Response};
use std::sync::Arc;

/// Operations on `scripts/*` endpoints.
#[derive(Debug, Clone)]
pub struct ScriptsService {
    api: Arc<ApiClient>,
}

struct ScriptLookup<'a>(&'a ScriptId);

impl QueryOptions for ScriptLookup<'_> {
    fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("scriptId", self.0);
        params
    }
}

impl ScriptsService {
    /// Create the service on top of a shared request client.
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Create a script.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub fn create(&self, request: &CreateScriptRequest) -> Result<Response<Script>> {
        self.api.post("scripts/createScript", request)
    }

    /// List scripts owned by the user or team.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub fn list(&self) -> Result<Response<Vec<Script>>> {
        self.api.get("scripts/getScripts")
    }

    /// Fetch one script.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is not usable in a path, the request fails
    /// or the server rejects it.
    pub fn show(&self, script_id: &ScriptId) -> Result<Response<Script>> {
        script_id.validate()?;
        let path = add_options("scripts/getScript", Some(&ScriptLookup(script_id)))?;
        self.api.get(&path)
    }

    /// Delete a script.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is not usable in a path, the request fails
    /// or the server rejects it.
    pub fn destroy(&self, script_id: &ScriptId) -> Result<Response<()>> {
        script_id.validate()?;
        self.api.post_empty(&format!("scripts/{script_id}/destroy"))
    }
}
