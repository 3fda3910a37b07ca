//! Provider administration message codecs (5xx).

use serde::{Deserialize, Serialize};
use wharf_types::{ContentId, NodeId};

use crate::envelope::{decode_body, encode_body, Envelope};
use crate::error::MessageError;
use crate::offer::GroupOfferEntry;
use crate::protocol::ProtocolConfig;
use crate::types::MessageType;

/// Identity, key material, and endpoint set a provider enrolls with.
///
/// Providers serve no provider-facing channel, so the endpoint set is one
/// shorter than a gateway's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEnrollment {
    pub node_id: NodeId,
    pub address: String,
    pub root_signing_key: String,
    pub signing_key: String,
    pub region_code: String,
    pub network_info_gateway: String,
    pub network_info_client: String,
    pub network_info_admin: String,
}

#[derive(Serialize, Deserialize)]
struct GetGroupOfferRequest {
    gateway_id: NodeId,
}

/// Encode an admin query for the group offers published to one gateway.
pub fn encode_get_group_offer_request(
    config: &ProtocolConfig,
    gateway_id: NodeId,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderAdminGetGroupOfferRequest,
        &GetGroupOfferRequest { gateway_id },
    )
}

/// Decode a group offer query into the gateway id it targets.
pub fn decode_get_group_offer_request(envelope: &Envelope) -> Result<NodeId, MessageError> {
    let body: GetGroupOfferRequest =
        decode_body(envelope, MessageType::ProviderAdminGetGroupOfferRequest)?;
    Ok(body.gateway_id)
}

#[derive(Serialize, Deserialize)]
struct GetGroupOfferResponse {
    found: bool,
    offers: Vec<GroupOfferEntry>,
}

/// Encode the provider's record of group offers for the queried gateway.
pub fn encode_get_group_offer_response(
    config: &ProtocolConfig,
    found: bool,
    offers: Vec<GroupOfferEntry>,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderAdminGetGroupOfferResponse,
        &GetGroupOfferResponse { found, offers },
    )
}

/// Decode a group offer record into `(found, offers)`.
pub fn decode_get_group_offer_response(
    envelope: &Envelope,
) -> Result<(bool, Vec<GroupOfferEntry>), MessageError> {
    let body: GetGroupOfferResponse =
        decode_body(envelope, MessageType::ProviderAdminGetGroupOfferResponse)?;
    Ok((body.found, body.offers))
}

#[derive(Serialize, Deserialize)]
struct PublishGroupOfferRequest {
    piece_cids: Vec<ContentId>,
    price_per_byte: u64,
    expiry_date: i64,
    qos: u64,
}

/// Encode an admin command publishing a group offer for a batch of pieces.
pub fn encode_publish_group_offer_request(
    config: &ProtocolConfig,
    piece_cids: Vec<ContentId>,
    price_per_byte: u64,
    expiry_date: i64,
    qos: u64,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderAdminPublishGroupOfferRequest,
        &PublishGroupOfferRequest {
            piece_cids,
            price_per_byte,
            expiry_date,
            qos,
        },
    )
}

/// Decode a group offer command into
/// `(piece_cids, price_per_byte, expiry_date, qos)`.
pub fn decode_publish_group_offer_request(
    envelope: &Envelope,
) -> Result<(Vec<ContentId>, u64, i64, u64), MessageError> {
    let body: PublishGroupOfferRequest =
        decode_body(envelope, MessageType::ProviderAdminPublishGroupOfferRequest)?;
    Ok((
        body.piece_cids,
        body.price_per_byte,
        body.expiry_date,
        body.qos,
    ))
}

#[derive(Serialize, Deserialize)]
struct PublishDhtOfferRequest {
    piece_cids: Vec<ContentId>,
    price_per_byte: u64,
    expiry_date: i64,
    qos: u64,
}

/// Encode an admin command publishing per-piece offers to the DHT ring.
pub fn encode_publish_dht_offer_request(
    config: &ProtocolConfig,
    piece_cids: Vec<ContentId>,
    price_per_byte: u64,
    expiry_date: i64,
    qos: u64,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderAdminPublishDhtOfferRequest,
        &PublishDhtOfferRequest {
            piece_cids,
            price_per_byte,
            expiry_date,
            qos,
        },
    )
}

/// Decode a DHT offer command into
/// `(piece_cids, price_per_byte, expiry_date, qos)`.
pub fn decode_publish_dht_offer_request(
    envelope: &Envelope,
) -> Result<(Vec<ContentId>, u64, i64, u64), MessageError> {
    let body: PublishDhtOfferRequest =
        decode_body(envelope, MessageType::ProviderAdminPublishDhtOfferRequest)?;
    Ok((
        body.piece_cids,
        body.price_per_byte,
        body.expiry_date,
        body.qos,
    ))
}

#[derive(Serialize, Deserialize)]
struct PublishOfferAck {
    published: bool,
}

/// Encode the provider's acknowledgement of a publish command.
pub fn encode_publish_offer_ack(
    config: &ProtocolConfig,
    published: bool,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderAdminPublishOfferAck,
        &PublishOfferAck { published },
    )
}

/// Decode a publish acknowledgement.
pub fn decode_publish_offer_ack(envelope: &Envelope) -> Result<bool, MessageError> {
    let body: PublishOfferAck = decode_body(envelope, MessageType::ProviderAdminPublishOfferAck)?;
    Ok(body.published)
}

#[derive(Serialize, Deserialize)]
struct InitialiseKeyRequest {
    private_key: String,
    key_version: u32,
}

/// Encode an admin command installing a signing key on the provider.
pub fn encode_initialise_key_request(
    config: &ProtocolConfig,
    private_key: &str,
    key_version: u32,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderAdminInitialiseKeyRequest,
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
        decode_body(envelope, MessageType::ProviderAdminInitialiseKeyRequest)?;
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
        MessageType::ProviderAdminInitialiseKeyResponse,
        &InitialiseKeyResponse { success },
    )
}

/// Decode the key installation outcome.
pub fn decode_initialise_key_response(envelope: &Envelope) -> Result<bool, MessageError> {
    let body: InitialiseKeyResponse =
        decode_body(envelope, MessageType::ProviderAdminInitialiseKeyResponse)?;
    Ok(body.success)
}

/// Encode a provider enrollment submission.
pub fn encode_enroll_provider_request(
    config: &ProtocolConfig,
    enrollment: &ProviderEnrollment,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderAdminEnrollProviderRequest,
        enrollment,
    )
}

/// Decode a provider enrollment submission.
pub fn decode_enroll_provider_request(
    envelope: &Envelope,
) -> Result<ProviderEnrollment, MessageError> {
    decode_body(envelope, MessageType::ProviderAdminEnrollProviderRequest)
}

#[derive(Serialize, Deserialize)]
struct EnrollProviderResponse {
    enrolled: bool,
}

/// Encode the enrollment outcome.
pub fn encode_enroll_provider_response(
    config: &ProtocolConfig,
    enrolled: bool,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderAdminEnrollProviderResponse,
        &EnrollProviderResponse { enrolled },
    )
}

/// Decode the enrollment outcome.
pub fn decode_enroll_provider_response(envelope: &Envelope) -> Result<bool, MessageError> {
    let body: EnrollProviderResponse =
        decode_body(envelope, MessageType::ProviderAdminEnrollProviderResponse)?;
    Ok(body.enrolled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProtocolConfig {
        ProtocolConfig::default()
    }

    #[test]
    fn test_enrollment_roundtrip() {
        let enrollment = ProviderEnrollment {
            node_id: NodeId::from_hex("c0ffee").expect("parse failed"),
            address: "wharf1qprovider".to_string(),
            root_signing_key: "cc".repeat(32),
            signing_key: "dd".repeat(32),
            region_code: "US".to_string(),
            network_info_gateway: "prov.example.com:9032".to_string(),
            network_info_client: "prov.example.com:9030".to_string(),
            network_info_admin: "prov.example.com:9033".to_string(),
        };
        let envelope =
            encode_enroll_provider_request(&config(), &enrollment).expect("encode failed");
        let decoded = decode_enroll_provider_request(&envelope).expect("decode failed");
        assert_eq!(decoded, enrollment);
    }

    #[test]
    fn test_publish_group_offer_roundtrip() {
        let pieces = vec![
            ContentId::from_hex("0a").expect("parse failed"),
            ContentId::from_hex("0b").expect("parse failed"),
        ];
        let envelope = encode_publish_group_offer_request(
            &config(),
            pieces.clone(),
            4,
            1_750_000_000,
            2,
        )
        .expect("encode failed");
        let (piece_cids, price, expiry, qos) =
            decode_publish_group_offer_request(&envelope).expect("decode failed");
        assert_eq!(piece_cids, pieces);
        assert_eq!(price, 4);
        assert_eq!(expiry, 1_750_000_000);
        assert_eq!(qos, 2);
    }

    #[test]
    fn test_group_and_dht_publish_stay_distinct() {
        // 502 and 503 share a schema; the tag keeps them apart.
        let envelope =
            encode_publish_group_offer_request(&config(), Vec::new(), 1, 1, 1)
                .expect("encode failed");
        assert!(matches!(
            decode_publish_dht_offer_request(&envelope),
            Err(MessageError::TypeMismatch { .. })
        ));
    }
}
