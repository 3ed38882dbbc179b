//! Paperspace data models for machines, scripts and networks.
//!
//! Records mirror the server JSON (camelCase). Every field the server may
//! leave out or send as `null` is an `Option`.

use chrono::{DateTime, Utc};
use paperspace_core::id::{MachineId, NetworkId, ScriptId, TeamId, TemplateId, UserId};
use paperspace_core::{QueryOptions, QueryParams};
use serde::{Deserialize, Serialize};

/// A Paperspace virtual machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Machine identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MachineId>,
    /// Machine identifier as echoed by creation calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<MachineId>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Operating system label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    /// Memory in bytes, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    /// GPU model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<String>,
    /// CPU count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpus: Option<u32>,
    /// Total storage in bytes, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_total: Option<String>,
    /// Used storage in bytes, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_used: Option<String>,
    /// Billing rate label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_rate: Option<String>,
    /// Hours of inactivity before automatic shutdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutdown_timeout_in_hours: Option<u32>,
    /// Whether the shutdown timeout forces a power-off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutdown_timeout_forces: Option<bool>,
    /// Whether automatic snapshots are taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perform_auto_snapshot: Option<bool>,
    /// Automatic snapshot frequency (`hour`, `day`, `week`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_snapshot_frequency: Option<String>,
    /// Number of automatic snapshots kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_snapshot_save_count: Option<u32>,
    /// Agent flavour installed on the machine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
    /// Lifecycle state (`off`, `starting`, `ready`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Whether OS updates are pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updates_pending: Option<bool>,
    /// Private network the machine is attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<NetworkId>,
    /// Private IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_ip_address: Option<String>,
    /// Public IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<String>,
    /// Whether the public IP is reassigned on each start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_public_ip: Option<bool>,
    /// Region name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Owning user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Owning team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    /// Startup script attached to the machine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_id: Option<ScriptId>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt_created: Option<DateTime<Utc>>,
    /// Last start timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt_last_run: Option<DateTime<Utc>>,
}

/// Result of an availability check.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Availability {
    /// Whether the machine type can currently be provisioned in the region.
    #[serde(default)]
    pub available: bool,
}

/// Query filters for `machines/getAvailability`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityOptions {
    /// Region name, e.g. `East Coast (NY2)`.
    pub region: Option<String>,
    /// Machine type, e.g. `GPU+`.
    pub machine_type: Option<String>,
}

impl AvailabilityOptions {
    /// Filters for one region and machine type.
    #[must_use]
    pub fn new(region: impl Into<String>, machine_type: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            machine_type: Some(machine_type.into()),
        }
    }
}

impl QueryOptions for AvailabilityOptions {
    fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_non_empty("region", self.region.as_deref());
        params.push_non_empty("machineType", self.machine_type.as_deref());
        params
    }
}

/// Query filters for `machines/getMachines`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineListOptions {
    /// Filter by machine identifier.
    pub machine_id: Option<MachineId>,
    /// Filter by name.
    pub name: Option<String>,
    /// Filter by operating system.
    pub os: Option<String>,
    /// Filter by GPU model.
    pub gpu: Option<String>,
    /// Filter by agent type.
    pub agent_type: Option<String>,
    /// Filter by lifecycle state.
    pub state: Option<String>,
    /// Filter by region.
    pub region: Option<String>,
    /// Filter by private network.
    pub network_id: Option<NetworkId>,
    /// Filter by owning user.
    pub user_id: Option<UserId>,
    /// Filter by owning team.
    pub team_id: Option<TeamId>,
}

impl QueryOptions for MachineListOptions {
    fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_non_empty("machineId", self.machine_id.as_ref());
        params.push_non_empty("name", self.name.as_deref());
        params.push_non_empty("os", self.os.as_deref());
        params.push_non_empty("gpu", self.gpu.as_deref());
        params.push_non_empty("agentType", self.agent_type.as_deref());
        params.push_non_empty("state", self.state.as_deref());
        params.push_non_empty("region", self.region.as_deref());
        params.push_non_empty("networkId", self.network_id.as_ref());
        params.push_non_empty("userId", self.user_id.as_ref());
        params.push_non_empty("teamId", self.team_id.as_ref());
        params
    }
}

/// Payload for `machines/createSingleMachinePublic`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateMachineRequest {
    /// Region name.
    pub region: String,
    /// Machine type, e.g. `GPU+`.
    pub machine_type: String,
    /// Storage size in GB.
    pub size: u32,
    /// `hourly` or `monthly`.
    pub billing_type: String,
    /// Display name.
    pub machine_name: String,
    /// Template the machine is built from.
    pub template_id: TemplateId,
    /// Assign a public IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign_public_ip: Option<bool>,
    /// Reassign the public IP on each start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_public_ip: Option<bool>,
    /// Attach to a private network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<NetworkId>,
    /// Create the machine for a team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    /// Assign the machine to an existing user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Email of a new user to create for the machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Password of the new user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// First name of the new user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name of the new user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Address notified once the machine is ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    /// Startup script to run on the machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_id: Option<ScriptId>,
}

impl CreateMachineRequest {
    /// Request with the required fields set.
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        machine_type: impl Into<String>,
        size: u32,
        billing_type: impl Into<String>,
        machine_name: impl Into<String>,
        template_id: impl Into<TemplateId>,
    ) -> Self {
        Self {
            region: region.into(),
            machine_type: machine_type.into(),
            size,
            billing_type: billing_type.into(),
            machine_name: machine_name.into(),
            template_id: template_id.into(),
            ..Self::default()
        }
    }
}

/// A startup script.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Script identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ScriptId>,
    /// Script name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `user` or `team`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_type: Option<String>,
    /// Identifier of the owning user or team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt_created: Option<DateTime<Utc>>,
    /// Whether the script runs at boot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    /// Whether the script runs only on first boot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_once: Option<bool>,
}

/// Payload for `scripts/createScript`. Set one of `script_file` or
/// `script_text`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateScriptRequest {
    /// Script name.
    pub script_name: String,
    /// Path of a local file holding the script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_file: Option<String>,
    /// Inline script body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_text: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_description: Option<String>,
    /// Run at boot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    /// Run only on first boot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_once: Option<bool>,
    /// Attach the script to this machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<MachineId>,
}

impl CreateScriptRequest {
    /// Request for an inline script.
    #[must_use]
    pub fn inline(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            script_name: name.into(),
            script_text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// A private network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    /// Network identifier.
    pub id: NetworkId,
    /// Network name.
    pub name: String,
    /// Region name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt_created: Option<DateTime<Utc>>,
    /// Network address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Netmask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    /// Owning team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
}
