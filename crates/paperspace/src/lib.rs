//! Blocking client for the Paperspace API.
//!
//! Provides typed models and services for machines, startup scripts and
//! private networks. Each call is a single HTTP round trip; there are no
//! retries, pagination or caching.
//!
//! ```no_run
//! use paperspace::{AvailabilityOptions, Client};
//!
//! let client = Client::new("my-api-key")?;
//! let options = AvailabilityOptions::new("East Coast (NY2)", "GPU+");
//! let availability = client.machines().availability(Some(&options))?;
//! println!("available: {}", availability.available);
//! # Ok::<(), paperspace::Error>(())
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod machines;
pub mod models;
pub mod networks;
pub mod scripts;

pub use client::{Client, ClientBuilder};
pub use machines::MachinesService;
pub use models::{
    Availability, AvailabilityOptions, CreateMachineRequest, CreateScriptRequest, Machine,
    MachineListOptions, Network, Script,
};
pub use networks::NetworksService;
pub use paperspace_core::id::{MachineId, NetworkId, ScriptId, TeamId, TemplateId, UserId};
pub use paperspace_core::{Error, Rate, Response};
pub use scripts::ScriptsService;

/// Convenient result alias sharing the `paperspace-core` error type.
pub type Result<T> = paperspace_core::Result<T>;
