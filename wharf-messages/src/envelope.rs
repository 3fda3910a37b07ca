use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MessageError;
use crate::protocol::ProtocolConfig;
use crate::types::MessageType;

/// The self-describing wire unit wrapping every protocol message.
///
/// Wire form (field names are stable):
///
/// ```json
/// {
///   "message_type": 102,
///   "protocol_version": 1,
///   "protocol_supported": [1, 1],
///   "message_body": { "...kind-specific object..." }
/// }
/// ```
///
/// The type tag is immutable once the envelope is created. An envelope is
/// fully self-contained: decoding needs no context beyond which kind the
/// caller expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    message_type: i32,
    protocol_version: i32,
    protocol_supported: [i32; 2],
    message_body: Value,
}

impl Envelope {
    pub(crate) fn new(
        message_type: i32,
        protocol_version: i32,
        protocol_supported: [i32; 2],
        message_body: Value,
    ) -> Self {
        Self {
            message_type,
            protocol_version,
            protocol_supported,
            message_body,
        }
    }

    /// The integer code identifying this message's kind.
    pub fn message_type(&self) -> i32 {
        self.message_type
    }

    /// The protocol version the sender encoded with.
    pub fn protocol_version(&self) -> i32 {
        self.protocol_version
    }

    /// The `[min, max]` versions the sender accepts in response.
    pub fn protocol_supported(&self) -> [i32; 2] {
        self.protocol_supported
    }

    /// The kind-specific body.
    pub fn body(&self) -> &Value {
        &self.message_body
    }

    /// Serialize to the JSON wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MessageError> {
        serde_json::to_vec(self).map_err(|e| MessageError::Encode {
            reason: e.to_string(),
        })
    }

    /// Parse an envelope from the JSON wire form.
    ///
    /// Unknown `message_type` values parse fine here; rejecting them is the
    /// per-kind decoders' job, since only a decode call knows which kind
    /// was expected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MessageError> {
        serde_json::from_slice(bytes).map_err(|e| MessageError::Decode {
            reason: e.to_string(),
        })
    }
}

// ─── Codec helpers ──────────────────────────────────────────────────────────

/// Serialize a typed body and wrap it in an envelope of the given kind.
pub(crate) fn encode_body<T: Serialize>(
    config: &ProtocolConfig,
    message_type: MessageType,
    body: &T,
) -> Result<Envelope, MessageError> {
    let value = serde_json::to_value(body).map_err(|e| MessageError::Encode {
        reason: e.to_string(),
    })?;
    Ok(config.envelope(message_type, value))
}

/// Check an envelope's type tag, then deserialize its body.
///
/// The tag check runs before any body parsing, so a mismatched envelope is
/// rejected without touching the payload.
pub(crate) fn decode_body<T: serde::de::DeserializeOwned>(
    envelope: &Envelope,
    expected: MessageType,
) -> Result<T, MessageError> {
    if envelope.message_type() != expected.code() {
        return Err(MessageError::TypeMismatch {
            expected: expected.code(),
            actual: envelope.message_type(),
        });
    }
    serde_json::from_value(envelope.body().clone()).map_err(|e| MessageError::Decode {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{PROTOCOL_SUPPORTED, PROTOCOL_VERSION};
    use serde_json::json;

    fn sample_envelope() -> Envelope {
        ProtocolConfig::default().envelope(
            MessageType::ClientStandardDiscoverRequest,
            json!({ "nonce": 42 }),
        )
    }

    #[test]
    fn test_wire_field_names_are_stable() {
        let bytes = sample_envelope().to_bytes().expect("serialize failed");
        let value: Value = serde_json::from_slice(&bytes).expect("parse failed");

        assert_eq!(
            value["message_type"],
            json!(MessageType::ClientStandardDiscoverRequest.code())
        );
        assert_eq!(value["protocol_version"], json!(PROTOCOL_VERSION));
        assert_eq!(value["protocol_supported"], json!(PROTOCOL_SUPPORTED));
        assert_eq!(value["message_body"], json!({ "nonce": 42 }));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let envelope = sample_envelope();
        let bytes = envelope.to_bytes().expect("serialize failed");
        let back = Envelope::from_bytes(&bytes).expect("parse failed");
        assert_eq!(back, envelope);
    }

    #[test]
    fn test_from_bytes_accepts_unknown_type() {
        let wire = br#"{
            "message_type": 777,
            "protocol_version": 1,
            "protocol_supported": [1, 1],
            "message_body": {}
        }"#;
        let envelope = Envelope::from_bytes(wire).expect("parse failed");
        assert_eq!(envelope.message_type(), 777);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(matches!(
            Envelope::from_bytes(b"not json"),
            Err(MessageError::Decode { .. })
        ));
    }

    #[test]
    fn test_decode_body_checks_tag_first() {
        // The body would decode fine for either kind; only the tag differs.
        let envelope = sample_envelope();
        let result: Result<Value, _> =
            decode_body(&envelope, MessageType::ClientDhtDiscoverRequest);
        match result {
            Err(MessageError::TypeMismatch { expected, actual }) => {
                assert_eq!(expected, MessageType::ClientDhtDiscoverRequest.code());
                assert_eq!(actual, MessageType::ClientStandardDiscoverRequest.code());
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }
}
