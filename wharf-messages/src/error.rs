use thiserror::Error;

/// Errors from encoding and decoding protocol messages.
///
/// Codec errors are returned to the caller and never logged here; the
/// caller decides whether to surface, retry, or drop.
#[derive(Debug, Error)]
pub enum MessageError {
    /// A decoder was handed an envelope of a different kind. Recoverable;
    /// usually a routing bug or a misbehaving peer.
    #[error("message type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: i32, actual: i32 },

    /// A message body could not be serialized.
    #[error("failed to encode message body: {reason}")]
    Encode { reason: String },

    /// A message body could not be deserialized into the expected shape.
    #[error("failed to decode message body: {reason}")]
    Decode { reason: String },
}
