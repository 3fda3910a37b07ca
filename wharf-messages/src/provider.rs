//! Provider-to-gateway message codecs (2xx).

use serde::{Deserialize, Serialize};
use wharf_types::{ContentId, NodeId};

use crate::envelope::{decode_body, encode_body, Envelope};
use crate::error::MessageError;
use crate::offer::SingleOfferEntry;
use crate::protocol::ProtocolConfig;
use crate::types::MessageType;

#[derive(Serialize, Deserialize)]
struct PublishGroupOfferRequest {
    nonce: i64,
    provider_id: NodeId,
    price_per_byte: u64,
    expiry_date: i64,
    qos: u64,
    piece_cids: Vec<ContentId>,
    signature: String,
}

/// Encode a provider's group offer covering a batch of pieces at one price.
#[allow(clippy::too_many_arguments)]
pub fn encode_publish_group_offer_request(
    config: &ProtocolConfig,
    nonce: i64,
    provider_id: NodeId,
    price_per_byte: u64,
    expiry_date: i64,
    qos: u64,
    piece_cids: Vec<ContentId>,
    signature: &str,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderPublishGroupOfferRequest,
        &PublishGroupOfferRequest {
            nonce,
            provider_id,
            price_per_byte,
            expiry_date,
            qos,
            piece_cids,
            signature: signature.to_string(),
        },
    )
}

/// Decode a group offer publication into
/// `(nonce, provider_id, price_per_byte, expiry_date, qos, piece_cids, signature)`.
#[allow(clippy::type_complexity)]
pub fn decode_publish_group_offer_request(
    envelope: &Envelope,
) -> Result<(i64, NodeId, u64, i64, u64, Vec<ContentId>, String), MessageError> {
    let body: PublishGroupOfferRequest =
        decode_body(envelope, MessageType::ProviderPublishGroupOfferRequest)?;
    Ok((
        body.nonce,
        body.provider_id,
        body.price_per_byte,
        body.expiry_date,
        body.qos,
        body.piece_cids,
        body.signature,
    ))
}

#[derive(Serialize, Deserialize)]
struct PublishGroupOfferResponse {
    nonce: i64,
    signature: String,
}

/// Encode the gateway's signed acceptance of a group offer.
pub fn encode_publish_group_offer_response(
    config: &ProtocolConfig,
    nonce: i64,
    signature: &str,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderPublishGroupOfferResponse,
        &PublishGroupOfferResponse {
            nonce,
            signature: signature.to_string(),
        },
    )
}

/// Decode a group offer acceptance into `(nonce, signature)`.
pub fn decode_publish_group_offer_response(
    envelope: &Envelope,
) -> Result<(i64, String), MessageError> {
    let body: PublishGroupOfferResponse =
        decode_body(envelope, MessageType::ProviderPublishGroupOfferResponse)?;
    Ok((body.nonce, body.signature))
}

#[derive(Serialize, Deserialize)]
struct PublishDhtOfferRequest {
    nonce: i64,
    provider_id: NodeId,
    offers: Vec<SingleOfferEntry>,
}

/// Encode a provider's per-piece offers destined for the DHT ring.
pub fn encode_publish_dht_offer_request(
    config: &ProtocolConfig,
    nonce: i64,
    provider_id: NodeId,
    offers: Vec<SingleOfferEntry>,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderPublishDhtOfferRequest,
        &PublishDhtOfferRequest {
            nonce,
            provider_id,
            offers,
        },
    )
}

/// Decode a DHT offer publication into `(nonce, provider_id, offers)`.
pub fn decode_publish_dht_offer_request(
    envelope: &Envelope,
) -> Result<(i64, NodeId, Vec<SingleOfferEntry>), MessageError> {
    let body: PublishDhtOfferRequest =
        decode_body(envelope, MessageType::ProviderPublishDhtOfferRequest)?;
    Ok((body.nonce, body.provider_id, body.offers))
}

#[derive(Serialize, Deserialize)]
struct PublishDhtOfferAck {
    nonce: i64,
    signature: String,
}

/// Encode the gateway's signed acknowledgement of a DHT offer publication.
pub fn encode_publish_dht_offer_ack(
    config: &ProtocolConfig,
    nonce: i64,
    signature: &str,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProviderPublishDhtOfferAck,
        &PublishDhtOfferAck {
            nonce,
            signature: signature.to_string(),
        },
    )
}

/// Decode a DHT offer acknowledgement into `(nonce, signature)`.
pub fn decode_publish_dht_offer_ack(envelope: &Envelope) -> Result<(i64, String), MessageError> {
    let body: PublishDhtOfferAck = decode_body(envelope, MessageType::ProviderPublishDhtOfferAck)?;
    Ok((body.nonce, body.signature))
}
