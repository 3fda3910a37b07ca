//! Client-to-gateway message codecs (1xx).

use serde::{Deserialize, Serialize};
use wharf_types::{ContentId, NodeId};

use crate::envelope::{decode_body, encode_body, Envelope};
use crate::error::MessageError;
use crate::offer::GroupOfferEntry;
use crate::protocol::ProtocolConfig;
use crate::types::MessageType;

#[derive(Serialize, Deserialize)]
struct EstablishmentRequest {
    challenge: String,
    ttl: i64,
}

/// Encode a client establishment request.
pub fn encode_establishment_request(
    config: &ProtocolConfig,
    challenge: &str,
    ttl: i64,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ClientEstablishmentRequest,
        &EstablishmentRequest {
            challenge: challenge.to_string(),
            ttl,
        },
    )
}

/// Decode a client establishment request into `(challenge, ttl)`.
pub fn decode_establishment_request(envelope: &Envelope) -> Result<(String, i64), MessageError> {
    let body: EstablishmentRequest =
        decode_body(envelope, MessageType::ClientEstablishmentRequest)?;
    Ok((body.challenge, body.ttl))
}

#[derive(Serialize, Deserialize)]
struct EstablishmentResponse {
    challenge: String,
}

/// Encode a gateway's establishment response, echoing the challenge.
pub fn encode_establishment_response(
    config: &ProtocolConfig,
    challenge: &str,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ClientEstablishmentResponse,
        &EstablishmentResponse {
            challenge: challenge.to_string(),
        },
    )
}

/// Decode an establishment response into the echoed challenge.
pub fn decode_establishment_response(envelope: &Envelope) -> Result<String, MessageError> {
    let body: EstablishmentResponse =
        decode_body(envelope, MessageType::ClientEstablishmentResponse)?;
    Ok(body.challenge)
}

#[derive(Serialize, Deserialize)]
struct StandardDiscoverRequest {
    piece_cid: ContentId,
    nonce: i64,
    ttl: i64,
}

/// Encode a standard (direct) content discovery request.
pub fn encode_standard_discover_request(
    config: &ProtocolConfig,
    piece_cid: ContentId,
    nonce: i64,
    ttl: i64,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ClientStandardDiscoverRequest,
        &StandardDiscoverRequest {
            piece_cid,
            nonce,
            ttl,
        },
    )
}

/// Decode a standard discovery request into `(piece_cid, nonce, ttl)`.
pub fn decode_standard_discover_request(
    envelope: &Envelope,
) -> Result<(ContentId, i64, i64), MessageError> {
    let body: StandardDiscoverRequest =
        decode_body(envelope, MessageType::ClientStandardDiscoverRequest)?;
    Ok((body.piece_cid, body.nonce, body.ttl))
}

#[derive(Serialize, Deserialize)]
struct StandardDiscoverResponse {
    piece_cid: ContentId,
    nonce: i64,
    found: bool,
    offers: Vec<GroupOfferEntry>,
}

/// Encode a standard discovery response carrying the gateway's known offers.
pub fn encode_standard_discover_response(
    config: &ProtocolConfig,
    piece_cid: ContentId,
    nonce: i64,
    found: bool,
    offers: Vec<GroupOfferEntry>,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ClientStandardDiscoverResponse,
        &StandardDiscoverResponse {
            piece_cid,
            nonce,
            found,
            offers,
        },
    )
}

/// Decode a standard discovery response into
/// `(piece_cid, nonce, found, offers)`.
pub fn decode_standard_discover_response(
    envelope: &Envelope,
) -> Result<(ContentId, i64, bool, Vec<GroupOfferEntry>), MessageError> {
    let body: StandardDiscoverResponse =
        decode_body(envelope, MessageType::ClientStandardDiscoverResponse)?;
    Ok((body.piece_cid, body.nonce, body.found, body.offers))
}

#[derive(Serialize, Deserialize)]
struct DhtDiscoverRequest {
    piece_cid: ContentId,
    nonce: i64,
    ttl: i64,
    num_dht: i64,
    incremental: bool,
}

/// Encode a DHT discovery request fanned out across `num_dht` gateways.
pub fn encode_dht_discover_request(
    config: &ProtocolConfig,
    piece_cid: ContentId,
    nonce: i64,
    ttl: i64,
    num_dht: i64,
    incremental: bool,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ClientDhtDiscoverRequest,
        &DhtDiscoverRequest {
            piece_cid,
            nonce,
            ttl,
            num_dht,
            incremental,
        },
    )
}

/// Decode a DHT discovery request into
/// `(piece_cid, nonce, ttl, num_dht, incremental)`.
pub fn decode_dht_discover_request(
    envelope: &Envelope,
) -> Result<(ContentId, i64, i64, i64, bool), MessageError> {
    let body: DhtDiscoverRequest = decode_body(envelope, MessageType::ClientDhtDiscoverRequest)?;
    Ok((
        body.piece_cid,
        body.nonce,
        body.ttl,
        body.num_dht,
        body.incremental,
    ))
}

#[derive(Serialize, Deserialize)]
struct DhtDiscoverResponse {
    contacted: Vec<NodeId>,
    responses: Vec<Envelope>,
    uncontactable: Vec<NodeId>,
    nonce: i64,
}

/// Encode a DHT discovery response.
///
/// `responses` holds one nested envelope per contacted gateway, each
/// independently decodable as that gateway's discovery response.
pub fn encode_dht_discover_response(
    config: &ProtocolConfig,
    contacted: Vec<NodeId>,
    responses: Vec<Envelope>,
    uncontactable: Vec<NodeId>,
    nonce: i64,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ClientDhtDiscoverResponse,
        &DhtDiscoverResponse {
            contacted,
            responses,
            uncontactable,
            nonce,
        },
    )
}

/// Decode a DHT discovery response into
/// `(contacted, responses, uncontactable, nonce)`.
pub fn decode_dht_discover_response(
    envelope: &Envelope,
) -> Result<(Vec<NodeId>, Vec<Envelope>, Vec<NodeId>, i64), MessageError> {
    let body: DhtDiscoverResponse = decode_body(envelope, MessageType::ClientDhtDiscoverResponse)?;
    Ok((
        body.contacted,
        body.responses,
        body.uncontactable,
        body.nonce,
    ))
}

#[derive(Serialize, Deserialize)]
struct DhtOfferAckRequest {
    piece_cid: ContentId,
    gateway_id: NodeId,
}

/// Encode a request asking a gateway for its DHT-offer acknowledgement.
pub fn encode_dht_offer_ack_request(
    config: &ProtocolConfig,
    piece_cid: ContentId,
    gateway_id: NodeId,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ClientDhtOfferAckRequest,
        &DhtOfferAckRequest {
            piece_cid,
            gateway_id,
        },
    )
}

/// Decode a DHT-offer acknowledgement request into `(piece_cid, gateway_id)`.
pub fn decode_dht_offer_ack_request(
    envelope: &Envelope,
) -> Result<(ContentId, NodeId), MessageError> {
    let body: DhtOfferAckRequest = decode_body(envelope, MessageType::ClientDhtOfferAckRequest)?;
    Ok((body.piece_cid, body.gateway_id))
}

#[derive(Serialize, Deserialize)]
struct DhtOfferAckResponse {
    piece_cid: ContentId,
    gateway_id: NodeId,
    found: bool,
    publish: Option<Envelope>,
    publish_ack: Option<Envelope>,
}

/// Encode a DHT-offer acknowledgement response.
///
/// When `found`, `publish` and `publish_ack` carry the provider's original
/// publish envelope and the gateway's acknowledgement of it.
pub fn encode_dht_offer_ack_response(
    config: &ProtocolConfig,
    piece_cid: ContentId,
    gateway_id: NodeId,
    found: bool,
    publish: Option<Envelope>,
    publish_ack: Option<Envelope>,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ClientDhtOfferAckResponse,
        &DhtOfferAckResponse {
            piece_cid,
            gateway_id,
            found,
            publish,
            publish_ack,
        },
    )
}

/// Decode a DHT-offer acknowledgement response into
/// `(piece_cid, gateway_id, found, publish, publish_ack)`.
pub fn decode_dht_offer_ack_response(
    envelope: &Envelope,
) -> Result<(ContentId, NodeId, bool, Option<Envelope>, Option<Envelope>), MessageError> {
    let body: DhtOfferAckResponse = decode_body(envelope, MessageType::ClientDhtOfferAckResponse)?;
    Ok((
        body.piece_cid,
        body.gateway_id,
        body.found,
        body.publish,
        body.publish_ack,
    ))
}
