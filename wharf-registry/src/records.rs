//! Node records served by the registry.

use serde::{Deserialize, Serialize};
use wharf_crypto::{CryptoError, Keypair};
use wharf_types::NodeId;

/// Capability surface shared by the two record shapes.
///
/// Key accessors resolve the stored hex text into verification-only
/// keypairs. Endpoint accessors answer `None` when the record lacks that
/// channel or the field is empty.
pub trait RegisteredNode {
    fn node_id(&self) -> &NodeId;
    fn address(&self) -> &str;
    fn region_code(&self) -> &str;
    /// Long-term identity key.
    fn root_signing_key(&self) -> Result<Keypair, CryptoError>;
    /// Current message signing key.
    fn signing_key(&self) -> Result<Keypair, CryptoError>;
    fn gateway_endpoint(&self) -> Option<&str>;
    fn provider_endpoint(&self) -> Option<&str>;
    fn client_endpoint(&self) -> Option<&str>;
    fn admin_endpoint(&self) -> Option<&str>;
}

/// A gateway's registry entry.
///
/// Identity never changes after creation; the registry replaces whole
/// records on update. Field names follow the registry service's camelCase
/// JSON convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRecord {
    pub node_id: NodeId,
    pub address: String,
    pub root_signing_key: String,
    pub signing_key: String,
    pub region_code: String,
    #[serde(default)]
    pub network_info_gateway: String,
    #[serde(default)]
    pub network_info_provider: String,
    #[serde(default)]
    pub network_info_client: String,
    #[serde(default)]
    pub network_info_admin: String,
}

/// A provider's registry entry. Providers serve no provider-facing
/// channel, so the endpoint set is one shorter than a gateway's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    pub node_id: NodeId,
    pub address: String,
    pub root_signing_key: String,
    pub signing_key: String,
    pub region_code: String,
    #[serde(default)]
    pub network_info_gateway: String,
    #[serde(default)]
    pub network_info_client: String,
    #[serde(default)]
    pub network_info_admin: String,
}

fn optional(text: &str) -> Option<&str> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

impl RegisteredNode for GatewayRecord {
    fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn region_code(&self) -> &str {
        &self.region_code
    }

    fn root_signing_key(&self) -> Result<Keypair, CryptoError> {
        Keypair::decode_public_key(&self.root_signing_key)
    }

    fn signing_key(&self) -> Result<Keypair, CryptoError> {
        Keypair::decode_public_key(&self.signing_key)
    }

    fn gateway_endpoint(&self) -> Option<&str> {
        optional(&self.network_info_gateway)
    }

    fn provider_endpoint(&self) -> Option<&str> {
        optional(&self.network_info_provider)
    }

    fn client_endpoint(&self) -> Option<&str> {
        optional(&self.network_info_client)
    }

    fn admin_endpoint(&self) -> Option<&str> {
        optional(&self.network_info_admin)
    }
}

impl RegisteredNode for ProviderRecord {
    fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn region_code(&self) -> &str {
        &self.region_code
    }

    fn root_signing_key(&self) -> Result<Keypair, CryptoError> {
        Keypair::decode_public_key(&self.root_signing_key)
    }

    fn signing_key(&self) -> Result<Keypair, CryptoError> {
        Keypair::decode_public_key(&self.signing_key)
    }

    fn gateway_endpoint(&self) -> Option<&str> {
        optional(&self.network_info_gateway)
    }

    fn provider_endpoint(&self) -> Option<&str> {
        None
    }

    fn client_endpoint(&self) -> Option<&str> {
        optional(&self.network_info_client)
    }

    fn admin_endpoint(&self) -> Option<&str> {
        optional(&self.network_info_admin)
    }
}
