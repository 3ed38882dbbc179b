//! Machine provisioning and lifecycle operations.

use crate::models::{Availability, AvailabilityOptions, CreateMachineRequest, Machine, MachineListOptions};
use crate::Result;
use paperspace_core::id::MachineId;
use paperspace_core::{add_options, ApiClient, QueryOptions, QueryParams, Response};
use std::sync::Arc;
use tracing::debug;

/// Operations on `machines/*` endpoints.
#[derive(Debug, Clone)]
pub struct MachinesService {
    api: Arc<ApiClient>,
}

/// `machineId` lookup for `machines/getMachinePublic`.
struct MachineLookup<'a>(&'a MachineId);

impl QueryOptions for MachineLookup<'_> {
    fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("machineId", self.0);
        params
    }
}

impl MachinesService {
    /// Create the service on top of a shared request client.
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Check whether a machine type can be provisioned in a region.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub fn availability(
        &self,
        options: Option<&AvailabilityOptions>,
    ) -> Result<Response<Availability>> {
        let path = add_options("machines/getAvailability", options)?;
        self.api.get(&path)
    }

    /// Create a single machine.
    ///
    /// Region, machine type and template are not checked locally; invalid
    /// values come back as API errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub fn create(&self, request: &CreateMachineRequest) -> Result<Response<Machine>> {
        debug!(name = %request.machine_name, region = %request.region, "creating machine");
        self.api.post("machines/createSingleMachinePublic", request)
    }

    /// Destroy a machine. The response carries no payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is not usable in a path, the request fails
    /// or the server rejects it.
    pub fn destroy(&self, machine_id: &MachineId) -> Result<Response<()>> {
        machine_id.validate()?;
        self.api
            .post_empty(&format!("machines/{machine_id}/destroyMachine"))
    }

    /// List machines visible to the API key, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub fn list(&self, options: Option<&MachineListOptions>) -> Result<Response<Vec<Machine>>> {
        let path = add_options("machines/getMachines", options)?;
        self.api.get(&path)
    }

    /// Fetch one machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is not usable in a path, the request fails
    /// or the server rejects it.
    pub fn show(&self, machine_id: &MachineId) -> Result<Response<Machine>> {
        machine_id.validate()?;
        let path = add_options("machines/getMachinePublic", Some(&MachineLookup(machine_id)))?;
        self.api.get(&path)
    }

    /// Power on a machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is not usable in a path, the request fails
    /// or the server rejects it.
    pub fn start(&self, machine_id: &MachineId) -> Result<Response<()>> {
        machine_id.validate()?;
        self.api.post_empty(&format!("machines/{machine_id}/start"))
    }

    /// Power off a machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is not usable in a path, the request fails
    /// or the server rejects it.
    pub fn stop(&self, machine_id: &MachineId) -> Result<Response<()>> {
        machine_id.validate()?;
        self.api.post_empty(&format!("machines/{machine_id}/stop"))
    }

    /// Restart a machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is not usable in a path, the request fails
    /// or the server rejects it.
    pub fn restart(&self, machine_id: &MachineId) -> Result<Response<()>> {
        machine_id.validate()?;
        self.api.post_empty(&format!("machines/{machine_id}/restart"))
    }
}
