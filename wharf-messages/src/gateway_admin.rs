//! Gateway administration message codecs (4xx).

use serde::{Deserialize, Serialize};
use wharf_types::NodeId;

use crate::envelope::{decode_body, encode_body, Envelope};
use crate::error::MessageError;
use crate::protocol::ProtocolConfig;
use crate::types::MessageType;

/// Identity, key material, and endpoint set a gateway enrolls with.
///
/// Key fields carry hex-encoded public keys; endpoint fields are listener
/// addresses for each channel the gateway serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayEnrollment {
    pub node_id: NodeId,
    pub address: String,
    pub root_signing_key: String,
    pub signing_key: String,
    pub region_code: String,
    pub network_info_gateway: String,
    pub network_info_provider: String,
    pub network_info_client: String,
    pub network_info_admin: String,
}

#[derive(Serialize, Deserialize)]
struct GetReputationChallenge {
    client_id: NodeId,
    nonce: i64,
}

/// Encode an admin query for a client's reputation.
pub fn encode_get_reputation_challenge(
    config: &ProtocolConfig,
    client_id: NodeId,
    nonce: i64,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminGetReputationChallenge,
        &GetReputationChallenge { client_id, nonce },
    )
}

/// Decode a reputation query into `(client_id, nonce)`.
pub fn decode_get_reputation_challenge(
    envelope: &Envelope,
) -> Result<(NodeId, i64), MessageError> {
    let body: GetReputationChallenge =
        decode_body(envelope, MessageType::GatewayAdminGetReputationChallenge)?;
    Ok((body.client_id, body.nonce))
}

#[derive(Serialize, Deserialize)]
struct GetReputationResponse {
    client_id: NodeId,
    reputation: i64,
    nonce: i64,
}

/// Encode the gateway's answer to a reputation query.
pub fn encode_get_reputation_response(
    config: &ProtocolConfig,
    client_id: NodeId,
    reputation: i64,
    nonce: i64,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminGetReputationResponse,
        &GetReputationResponse {
            client_id,
            reputation,
            nonce,
        },
    )
}

/// Decode a reputation answer into `(client_id, reputation, nonce)`.
pub fn decode_get_reputation_response(
    envelope: &Envelope,
) -> Result<(NodeId, i64, i64), MessageError> {
    let body: GetReputationResponse =
        decode_body(envelope, MessageType::GatewayAdminGetReputationResponse)?;
    Ok((body.client_id, body.reputation, body.nonce))
}

#[derive(Serialize, Deserialize)]
struct SetReputationChallenge {
    client_id: NodeId,
    reputation: i64,
    nonce: i64,
}

/// Encode an admin command setting a client's reputation.
pub fn encode_set_reputation_challenge(
    config: &ProtocolConfig,
    client_id: NodeId,
    reputation: i64,
    nonce: i64,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminSetReputationChallenge,
        &SetReputationChallenge {
            client_id,
            reputation,
            nonce,
        },
    )
}

/// Decode a set-reputation command into `(client_id, reputation, nonce)`.
pub fn decode_set_reputation_challenge(
    envelope: &Envelope,
) -> Result<(NodeId, i64, i64), MessageError> {
    let body: SetReputationChallenge =
        decode_body(envelope, MessageType::GatewayAdminSetReputationChallenge)?;
    Ok((body.client_id, body.reputation, body.nonce))
}

#[derive(Serialize, Deserialize)]
struct SetReputationResponse {
    client_id: NodeId,
    reputation: i64,
    applied: bool,
    nonce: i64,
}

/// Encode the gateway's confirmation of a set-reputation command.
pub fn encode_set_reputation_response(
    config: &ProtocolConfig,
    client_id: NodeId,
    reputation: i64,
    applied: bool,
    nonce: i64,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminSetReputationResponse,
        &SetReputationResponse {
            client_id,
            reputation,
            applied,
            nonce,
        },
    )
}

/// Decode a set-reputation confirmation into
/// `(client_id, reputation, applied, nonce)`.
pub fn decode_set_reputation_response(
    envelope: &Envelope,
) -> Result<(NodeId, i64, bool, i64), MessageError> {
    let body: SetReputationResponse =
        decode_body(envelope, MessageType::GatewayAdminSetReputationResponse)?;
    Ok((body.client_id, body.reputation, body.applied, body.nonce))
}

/// Encode a gateway enrollment submission.
pub fn encode_enroll_gateway_request(
    config: &ProtocolConfig,
    enrollment: &GatewayEnrollment,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminEnrollGatewayRequest,
        enrollment,
    )
}

/// Decode a gateway enrollment submission.
pub fn decode_enroll_gateway_request(
    envelope: &Envelope,
) -> Result<GatewayEnrollment, MessageError> {
    decode_body(envelope, MessageType::GatewayAdminEnrollGatewayRequest)
}

#[derive(Serialize, Deserialize)]
struct EnrollGatewayResponse {
    enrolled: bool,
}

/// Encode the enrollment outcome.
pub fn encode_enroll_gateway_response(
    config: &ProtocolConfig,
    enrolled: bool,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminEnrollGatewayResponse,
        &EnrollGatewayResponse { enrolled },
    )
}

/// Decode the enrollment outcome.
pub fn decode_enroll_gateway_response(envelope: &Envelope) -> Result<bool, MessageError> {
    let body: EnrollGatewayResponse =
        decode_body(envelope, MessageType::GatewayAdminEnrollGatewayResponse)?;
    Ok(body.enrolled)
}

#[derive(Serialize, Deserialize)]
struct InitialiseKeyRequest {
    private_key: String,
    key_version: u32,
}

/// Encode an admin command installing a signing key on the gateway.
///
/// `private_key` is the hex form produced by the key encoding in
/// `wharf-crypto`.
pub fn encode_initialise_key_request(
    config: &ProtocolConfig,
    private_key: &str,
    key_version: u32,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminInitialiseKeyRequest,
        &InitialiseKeyRequest {
            private_key: private_key.to_string(),
            key_version,
        },
    )
}

/// Decode a key installation command into `(private_key, key_version)`.
pub fn decode_initialise_key_request(
    envelope: &Envelope,
) -> Result<(String, u32), MessageError> {
    let body: InitialiseKeyRequest =
        decode_body(envelope, MessageType::GatewayAdminInitialiseKeyRequest)?;
    Ok((body.private_key, body.key_version))
}

#[derive(Serialize, Deserialize)]
struct InitialiseKeyResponse {
    success: bool,
}

/// Encode the key installation outcome.
pub fn encode_initialise_key_response(
    config: &ProtocolConfig,
    success: bool,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminInitialiseKeyResponse,
        &InitialiseKeyResponse { success },
    )
}

/// Decode the key installation outcome.
pub fn decode_initialise_key_response(envelope: &Envelope) -> Result<bool, MessageError> {
    let body: InitialiseKeyResponse =
        decode_body(envelope, MessageType::GatewayAdminInitialiseKeyResponse)?;
    Ok(body.success)
}

#[derive(Serialize, Deserialize)]
struct ListDhtOfferRequest {
    refresh: bool,
}

/// Encode an admin request listing the gateway's held DHT offers.
pub fn encode_list_dht_offer_request(
    config: &ProtocolConfig,
    refresh: bool,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminListDhtOfferRequest,
        &ListDhtOfferRequest { refresh },
    )
}

/// Decode a DHT offer listing request into its refresh flag.
pub fn decode_list_dht_offer_request(envelope: &Envelope) -> Result<bool, MessageError> {
    let body: ListDhtOfferRequest =
        decode_body(envelope, MessageType::GatewayAdminListDhtOfferRequest)?;
    Ok(body.refresh)
}

#[derive(Serialize, Deserialize)]
struct ListDhtOfferResponse {
    offers: Vec<Envelope>,
}

/// Encode the gateway's held DHT offers, one nested envelope each.
pub fn encode_list_dht_offer_response(
    config: &ProtocolConfig,
    offers: Vec<Envelope>,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminListDhtOfferResponse,
        &ListDhtOfferResponse { offers },
    )
}

/// Decode a DHT offer listing into its envelopes.
pub fn decode_list_dht_offer_response(
    envelope: &Envelope,
) -> Result<Vec<Envelope>, MessageError> {
    let body: ListDhtOfferResponse =
        decode_body(envelope, MessageType::GatewayAdminListDhtOfferResponse)?;
    Ok(body.offers)
}

#[derive(Serialize, Deserialize)]
struct UpdateOfferSupportRequest {
    gateway_id: NodeId,
    group_offers_supported: bool,
}

/// Encode an admin command toggling group offer support on a gateway.
pub fn encode_update_offer_support_request(
    config: &ProtocolConfig,
    gateway_id: NodeId,
    group_offers_supported: bool,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminUpdateOfferSupportRequest,
        &UpdateOfferSupportRequest {
            gateway_id,
            group_offers_supported,
        },
    )
}

/// Decode an offer support toggle into `(gateway_id, group_offers_supported)`.
pub fn decode_update_offer_support_request(
    envelope: &Envelope,
) -> Result<(NodeId, bool), MessageError> {
    let body: UpdateOfferSupportRequest =
        decode_body(envelope, MessageType::GatewayAdminUpdateOfferSupportRequest)?;
    Ok((body.gateway_id, body.group_offers_supported))
}

#[derive(Serialize, Deserialize)]
struct UpdateOfferSupportResponse {
    accepted: bool,
}

/// Encode the outcome of an offer support toggle.
pub fn encode_update_offer_support_response(
    config: &ProtocolConfig,
    accepted: bool,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayAdminUpdateOfferSupportResponse,
        &UpdateOfferSupportResponse { accepted },
    )
}

/// Decode the outcome of an offer support toggle.
pub fn decode_update_offer_support_response(envelope: &Envelope) -> Result<bool, MessageError> {
    let body: UpdateOfferSupportResponse =
        decode_body(envelope, MessageType::GatewayAdminUpdateOfferSupportResponse)?;
    Ok(body.accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProtocolConfig {
        ProtocolConfig::default()
    }

    fn sample_enrollment() -> GatewayEnrollment {
        GatewayEnrollment {
            node_id: NodeId::from_hex("3").expect("parse failed"),
            address: "wharf1qexample".to_string(),
            root_signing_key: "aa".repeat(32),
            signing_key: "bb".repeat(32),
            region_code: "EU".to_string(),
            network_info_gateway: "gw.example.com:9012".to_string(),
            network_info_provider: "gw.example.com:9011".to_string(),
            network_info_client: "gw.example.com:9010".to_string(),
            network_info_admin: "gw.example.com:9013".to_string(),
        }
    }

    #[test]
    fn test_enrollment_roundtrip() {
        let enrollment = sample_enrollment();
        let envelope =
            encode_enroll_gateway_request(&config(), &enrollment).expect("encode failed");
        let decoded = decode_enroll_gateway_request(&envelope).expect("decode failed");
        assert_eq!(decoded, enrollment);
    }

    #[test]
    fn test_set_reputation_roundtrip() {
        let client = NodeId::from_hex("9").expect("parse failed");
        let envelope =
            encode_set_reputation_response(&config(), client, -50, true, 8).expect("encode failed");
        let (client_id, reputation, applied, nonce) =
            decode_set_reputation_response(&envelope).expect("decode failed");
        assert_eq!(client_id, client);
        assert_eq!(reputation, -50);
        assert!(applied);
        assert_eq!(nonce, 8);
    }

    #[test]
    fn test_enrollment_decode_rejects_response_kind() {
        let envelope = encode_enroll_gateway_response(&config(), true).expect("encode failed");
        assert!(matches!(
            decode_enroll_gateway_request(&envelope),
            Err(MessageError::TypeMismatch { .. })
        ));
    }
}
