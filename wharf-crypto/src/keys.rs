use ed25519_dalek::{Signer, Verifier};

use crate::error::CryptoError;

/// Length in bytes of an ed25519 public key or private seed.
pub const KEY_LENGTH: usize = 32;

/// Length in bytes of an ed25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Wrapper around an Ed25519 key, holding either a full signing keypair or
/// only the public verification half.
///
/// Node records and admin messages carry key material as hex text;
/// [`Keypair::decode_public_key`] is the boundary that resolves that text
/// into a usable verification key. Decoding failures are errors, never
/// panics.
pub struct Keypair {
    inner: KeyMaterial,
}

enum KeyMaterial {
    Full(ed25519_dalek::SigningKey),
    Public(ed25519_dalek::VerifyingKey),
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        let signing_key = ed25519_dalek::SigningKey::generate(&mut csprng);
        Self {
            inner: KeyMaterial::Full(signing_key),
        }
    }

    /// Create a keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; KEY_LENGTH]) -> Self {
        Self {
            inner: KeyMaterial::Full(ed25519_dalek::SigningKey::from_bytes(seed)),
        }
    }

    /// Decode a private key from its hex text form (the 32-byte seed).
    pub fn decode_private_key(text: &str) -> Result<Self, CryptoError> {
        let seed = decode_key_bytes(text)?;
        Ok(Self::from_seed(&seed))
    }

    /// Decode a public key from its hex text form into a verification-only
    /// keypair. Fails if the bytes are not a valid curve point.
    pub fn decode_public_key(text: &str) -> Result<Self, CryptoError> {
        let bytes = decode_key_bytes(text)?;
        let verifying_key =
            ed25519_dalek::VerifyingKey::from_bytes(&bytes).map_err(|e| CryptoError::InvalidKey {
                reason: e.to_string(),
            })?;
        Ok(Self {
            inner: KeyMaterial::Public(verifying_key),
        })
    }

    /// Whether this keypair holds the private half and can sign.
    pub fn has_private_key(&self) -> bool {
        matches!(self.inner, KeyMaterial::Full(_))
    }

    /// The public key bytes.
    pub fn public_key(&self) -> [u8; KEY_LENGTH] {
        match &self.inner {
            KeyMaterial::Full(signing_key) => signing_key.verifying_key().to_bytes(),
            KeyMaterial::Public(verifying_key) => verifying_key.to_bytes(),
        }
    }

    /// Hex text form of the public key.
    pub fn encode_public_key(&self) -> String {
        hex::encode(self.public_key())
    }

    /// Hex text form of the private seed. Fails on a verification-only
    /// keypair.
    pub fn encode_private_key(&self) -> Result<String, CryptoError> {
        match &self.inner {
            KeyMaterial::Full(signing_key) => Ok(hex::encode(signing_key.to_bytes())),
            KeyMaterial::Public(_) => Err(CryptoError::MissingPrivateKey),
        }
    }

    /// Sign a message, returning the hex text form of the 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> Result<String, CryptoError> {
        match &self.inner {
            KeyMaterial::Full(signing_key) => Ok(hex::encode(signing_key.sign(message).to_bytes())),
            KeyMaterial::Public(_) => Err(CryptoError::MissingPrivateKey),
        }
    }

    /// Verify a hex-encoded signature over a message.
    ///
    /// Signature text that does not decode to 64 bytes is
    /// [`CryptoError::MalformedSignature`]; a well-formed signature that
    /// does not verify is [`CryptoError::BadSignature`].
    pub fn verify(&self, message: &[u8], signature: &str) -> Result<(), CryptoError> {
        let raw = hex::decode(signature).map_err(|e| CryptoError::MalformedSignature {
            reason: e.to_string(),
        })?;
        let raw: [u8; SIGNATURE_LENGTH] =
            raw.try_into()
                .map_err(|_| CryptoError::MalformedSignature {
                    reason: format!("signature must be {} bytes", SIGNATURE_LENGTH),
                })?;
        let sig = ed25519_dalek::Signature::from_bytes(&raw);

        let verifying_key = match &self.inner {
            KeyMaterial::Full(signing_key) => signing_key.verifying_key(),
            KeyMaterial::Public(verifying_key) => *verifying_key,
        };
        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::BadSignature)
    }
}

// Note: SigningKey with the "zeroize" feature implements ZeroizeOnDrop,
// so private key material is wiped when Keypair is dropped.

/// Decode a hex key string into exactly 32 bytes.
fn decode_key_bytes(text: &str) -> Result<[u8; KEY_LENGTH], CryptoError> {
    let raw = hex::decode(text).map_err(|e| CryptoError::InvalidKey {
        reason: e.to_string(),
    })?;
    raw.try_into().map_err(|_| CryptoError::InvalidKey {
        reason: format!("key must be {} bytes", KEY_LENGTH),
    })
}
