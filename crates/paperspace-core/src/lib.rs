//! # paperspace-core
//!
//! Request plumbing shared by the Paperspace API services.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and HTTP status mapping
//! - [`config`] - API key and client settings
//! - [`client`] - Request construction and dispatch
//! - [`transport`] - Pluggable HTTP transport, blocking `reqwest` by default
//! - [`response`] - Decoded responses and rate-limit headers
//! - [`query`] - Query-string encoding for optional filters
//! - [`id`] - Strongly-typed resource identifiers

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod id;
pub mod query;
pub mod response;
pub mod transport;

// Re-export commonly used types
pub use client::ApiClient;
pub use config::{ClientSettings, Config};
pub use error::{Error, Result};
pub use query::{add_options, QueryOptions, QueryParams};
pub use response::{Rate, Response};
pub use transport::{ApiRequest, RawResponse, ReqwestTransport, Transport};
