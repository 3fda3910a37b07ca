//! Registry client and node record cache for the Wharf Protocol.
//!
//! Nodes find each other through a central registry service. This crate
//! provides the HTTP client for that service and [`RegistryManager`], a
//! background cache that keeps one record map per tracked role fresh and
//! answers lookups without touching the network.

pub mod client;
pub mod error;
pub mod manager;
pub mod records;

pub use client::{RegistryClient, RegistrySource};
pub use error::RegistryError;
pub use manager::{RegistryConfig, RegistryManager, DEFAULT_REFRESH_INTERVAL};
pub use records::{GatewayRecord, ProviderRecord, RegisteredNode};
