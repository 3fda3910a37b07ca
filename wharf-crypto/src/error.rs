use thiserror::Error;

/// Errors from key handling and signature operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key material could not be decoded into a usable key.
    #[error("invalid key material: {reason}")]
    InvalidKey { reason: String },

    /// A signature's text form could not be decoded.
    #[error("malformed signature: {reason}")]
    MalformedSignature { reason: String },

    /// The signature does not verify against the message and key.
    #[error("signature verification failed")]
    BadSignature,

    /// The operation needs a private key but only the public half is held.
    #[error("keypair holds no private key")]
    MissingPrivateKey,
}
