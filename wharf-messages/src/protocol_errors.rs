//! Protocol-level error message codecs (9xx).
//!
//! Any peer may answer any request with one of these kinds in place of the
//! expected response.

use serde::{Deserialize, Serialize};

use crate::envelope::{decode_body, encode_body, Envelope};
use crate::error::MessageError;
use crate::protocol::ProtocolConfig;
use crate::types::MessageType;

// Braced so the wire body is `{}` rather than `null`.
#[derive(Serialize, Deserialize)]
struct EmptyBody {}

/// Encode the reply sent when a request could not be understood.
pub fn encode_invalid_message_response(
    config: &ProtocolConfig,
) -> Result<Envelope, MessageError> {
    encode_body(config, MessageType::InvalidMessageResponse, &EmptyBody {})
}

/// Decode an invalid-message reply. Succeeds on the tag alone.
pub fn decode_invalid_message_response(envelope: &Envelope) -> Result<(), MessageError> {
    let _: EmptyBody = decode_body(envelope, MessageType::InvalidMessageResponse)?;
    Ok(())
}

#[derive(Serialize, Deserialize)]
struct InsufficientFundsResponse {
    payment_channel_id: i64,
}

/// Encode the reply sent when a payment channel lacks funds.
pub fn encode_insufficient_funds_response(
    config: &ProtocolConfig,
    payment_channel_id: i64,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::InsufficientFundsResponse,
        &InsufficientFundsResponse { payment_channel_id },
    )
}

/// Decode an insufficient-funds reply into the exhausted channel id.
pub fn decode_insufficient_funds_response(envelope: &Envelope) -> Result<i64, MessageError> {
    let body: InsufficientFundsResponse =
        decode_body(envelope, MessageType::InsufficientFundsResponse)?;
    Ok(body.payment_channel_id)
}

#[derive(Serialize, Deserialize)]
struct ProtocolChangeResponse {
    desired_version: i32,
}

/// Encode a request that the peer switch to another protocol version.
pub fn encode_protocol_change_response(
    config: &ProtocolConfig,
    desired_version: i32,
) -> Result<Envelope, MessageError> {
    encode_body(
        config,
        MessageType::ProtocolChangeResponse,
        &ProtocolChangeResponse { desired_version },
    )
}

/// Decode a version-change request into the desired version.
pub fn decode_protocol_change_response(envelope: &Envelope) -> Result<i32, MessageError> {
    let body: ProtocolChangeResponse =
        decode_body(envelope, MessageType::ProtocolChangeResponse)?;
    Ok(body.desired_version)
}

/// Encode the reply sent when no common protocol version exists.
pub fn encode_protocol_mismatch_response(
    config: &ProtocolConfig,
) -> Result<Envelope, MessageError> {
    encode_body(config, MessageType::ProtocolMismatchResponse, &EmptyBody {})
}

/// Decode a protocol-mismatch reply. Succeeds on the tag alone.
pub fn decode_protocol_mismatch_response(envelope: &Envelope) -> Result<(), MessageError> {
    let _: EmptyBody = decode_body(envelope, MessageType::ProtocolMismatchResponse)?;
    Ok(())
}
