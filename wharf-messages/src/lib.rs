//! Versioned message envelope and codecs for the Wharf Protocol.
//!
//! Every message exchanged between clients, gateways, providers, and their
//! admin counterparts travels as an [`Envelope`]: a type tag, the sender's
//! protocol version and supported range, and a kind-specific JSON body.
//! Per-kind encode/decode pairs live in the family modules ([`client`],
//! [`provider`], [`gateway`], [`gateway_admin`], [`provider_admin`],
//! [`protocol_errors`]). All of them construct envelopes through a
//! [`ProtocolConfig`], so one process stamps one version policy on
//! everything it sends.

pub mod client;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod gateway_admin;
pub mod offer;
pub mod protocol;
pub mod protocol_errors;
pub mod provider;
pub mod provider_admin;
pub mod types;

pub use envelope::Envelope;
pub use error::MessageError;
pub use gateway_admin::GatewayEnrollment;
pub use offer::{GroupOfferEntry, SingleOfferEntry};
pub use protocol::{ProtocolConfig, PROTOCOL_SUPPORTED, PROTOCOL_VERSION};
pub use provider_admin::ProviderEnrollment;
pub use types::MessageType;
