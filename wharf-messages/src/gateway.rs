//! Gateway-to-gateway message codecs (3xx).

use serde::{Deserialize, Serialize};
use wharf_types::{ContentId, NodeId};

use crate::envelope::{decode_body, encode_body, Envelope};
use crate::error::MessageError;
use crate::offer::{GroupOfferEntry, SingleOfferEntry};
use crate::protocol::ProtocolConfig;
use crate::types::MessageType;

#[derive(Serialize, Deserialize)]
struct SingleOfferPublishRequest {
    nonce: i64,
    provider_id: NodeId,
    offers: Vec<SingleOfferEntry>,
}

/// Encode a forwarded batch of per-piece offers for another gateway.
pub fn encode_single_offer_publish_request(
    config: &ProtocolConfig,
    nonce: i64,
    provider_id: NodeId,
    offers: Vec<SingleOfferEntry>,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewaySingleOfferPublishRequest,
        &SingleOfferPublishRequest {
            nonce,
            provider_id,
            offers,
        },
    )
}

/// Decode a forwarded offer batch into `(nonce, provider_id, offers)`.
pub fn decode_single_offer_publish_request(
    envelope: &Envelope,
) -> Result<(i64, NodeId, Vec<SingleOfferEntry>), MessageError> {
    let body: SingleOfferPublishRequest =
        decode_body(envelope, MessageType::GatewaySingleOfferPublishRequest)?;
    Ok((body.nonce, body.provider_id, body.offers))
}

#[derive(Serialize, Deserialize)]
struct SingleOfferPublishResponse {
    acks: Vec<Envelope>,
}

/// Encode the per-offer acknowledgements for a forwarded batch.
///
/// One nested envelope per accepted offer; an empty batch is valid and
/// yields an empty list.
pub fn encode_single_offer_publish_response(
    config: &ProtocolConfig,
    acks: Vec<Envelope>,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewaySingleOfferPublishResponse,
        &SingleOfferPublishResponse { acks },
    )
}

/// Decode a forwarded-batch response into its acknowledgement envelopes.
pub fn decode_single_offer_publish_response(
    envelope: &Envelope,
) -> Result<Vec<Envelope>, MessageError> {
    let body: SingleOfferPublishResponse =
        decode_body(envelope, MessageType::GatewaySingleOfferPublishResponse)?;
    Ok(body.acks)
}

#[derive(Serialize, Deserialize)]
struct SingleOfferPublishAck {
    nonce: i64,
    acknowledged: bool,
}

/// Encode a single acknowledgement within a forwarded batch.
pub fn encode_single_offer_publish_ack(
    config: &ProtocolConfig,
    nonce: i64,
    acknowledged: bool,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewaySingleOfferPublishAck,
        &SingleOfferPublishAck { nonce, acknowledged },
    )
}

/// Decode a single acknowledgement into `(nonce, acknowledged)`.
pub fn decode_single_offer_publish_ack(
    envelope: &Envelope,
) -> Result<(i64, bool), MessageError> {
    let body: SingleOfferPublishAck =
        decode_body(envelope, MessageType::GatewaySingleOfferPublishAck)?;
    Ok((body.nonce, body.acknowledged))
}

#[derive(Serialize, Deserialize)]
struct DhtDiscoverRequest {
    piece_cid: ContentId,
    nonce: i64,
    ttl: i64,
}

/// Encode a gateway-to-gateway discovery probe for one piece.
pub fn encode_dht_discover_request(
    config: &ProtocolConfig,
    piece_cid: ContentId,
    nonce: i64,
    ttl: i64,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayDhtDiscoverRequest,
        &DhtDiscoverRequest {
            piece_cid,
            nonce,
            ttl,
        },
    )
}

/// Decode a discovery probe into `(piece_cid, nonce, ttl)`.
pub fn decode_dht_discover_request(
    envelope: &Envelope,
) -> Result<(ContentId, i64, i64), MessageError> {
    let body: DhtDiscoverRequest = decode_body(envelope, MessageType::GatewayDhtDiscoverRequest)?;
    Ok((body.piece_cid, body.nonce, body.ttl))
}

#[derive(Serialize, Deserialize)]
struct DhtDiscoverResponse {
    piece_cid: ContentId,
    nonce: i64,
    found: bool,
    offers: Vec<GroupOfferEntry>,
}

/// Encode the probed gateway's answer with any offers it holds.
pub fn encode_dht_discover_response(
    config: &ProtocolConfig,
    piece_cid: ContentId,
    nonce: i64,
    found: bool,
    offers: Vec<GroupOfferEntry>,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayDhtDiscoverResponse,
        &DhtDiscoverResponse {
            piece_cid,
            nonce,
            found,
            offers,
        },
    )
}

/// Decode a probe answer into `(piece_cid, nonce, found, offers)`.
pub fn decode_dht_discover_response(
    envelope: &Envelope,
) -> Result<(ContentId, i64, bool, Vec<GroupOfferEntry>), MessageError> {
    let body: DhtDiscoverResponse =
        decode_body(envelope, MessageType::GatewayDhtDiscoverResponse)?;
    Ok((body.piece_cid, body.nonce, body.found, body.offers))
}

#[derive(Serialize, Deserialize)]
struct ListDhtOfferAck {
    acks: Vec<Envelope>,
}

/// Encode the collected acknowledgements for a DHT offer listing.
pub fn encode_list_dht_offer_ack(
    config: &ProtocolConfig,
    acks: Vec<Envelope>,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::GatewayListDhtOfferAck,
        &ListDhtOfferAck { acks },
    )
}

/// Decode a DHT offer listing acknowledgement into its envelopes.
pub fn decode_list_dht_offer_ack(envelope: &Envelope) -> Result<Vec<Envelope>, MessageError> {
    let body: ListDhtOfferAck = decode_body(envelope, MessageType::GatewayListDhtOfferAck)?;
    Ok(body.acks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProtocolConfig {
        ProtocolConfig::default()
    }

    #[test]
    fn test_empty_ack_batch_roundtrip() {
        let envelope =
            encode_single_offer_publish_response(&config(), Vec::new()).expect("encode failed");
        let acks = decode_single_offer_publish_response(&envelope).expect("decode failed");
        assert!(acks.is_empty());
    }

    #[test]
    fn test_ack_batch_preserves_nested_envelopes() {
        let ack_one = encode_single_offer_publish_ack(&config(), 1, true).expect("encode failed");
        let ack_two = encode_single_offer_publish_ack(&config(), 2, false).expect("encode failed");

        let envelope =
            encode_single_offer_publish_response(&config(), vec![ack_one.clone(), ack_two.clone()])
                .expect("encode failed");
        let acks = decode_single_offer_publish_response(&envelope).expect("decode failed");
        assert_eq!(acks, vec![ack_one, ack_two]);

        let (nonce, acknowledged) =
            decode_single_offer_publish_ack(&acks[1]).expect("inner decode failed");
        assert_eq!(nonce, 2);
        assert!(!acknowledged);
    }

    #[test]
    fn test_identical_body_shapes_stay_distinct() {
        // 301 and 305 share a schema; decoding across them must fail on the tag.
        let envelope =
            encode_single_offer_publish_response(&config(), Vec::new()).expect("encode failed");
        let result = decode_list_dht_offer_ack(&envelope);
        match result {
            Err(MessageError::TypeMismatch { expected, actual }) => {
                assert_eq!(expected, MessageType::GatewayListDhtOfferAck.code());
                assert_eq!(
                    actual,
                    MessageType::GatewaySingleOfferPublishResponse.code()
                );
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_dht_discover_roundtrip() {
        let cid = ContentId::from_hex("beef").expect("parse failed");
        let envelope =
            encode_dht_discover_request(&config(), cid, 21, 120).expect("encode failed");
        let (got_cid, nonce, ttl) =
            decode_dht_discover_request(&envelope).expect("decode failed");
        assert_eq!(got_cid, cid);
        assert_eq!(nonce, 21);
        assert_eq!(ttl, 120);
    }
}
