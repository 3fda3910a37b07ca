//! Cryptographic primitives for the Wharf Protocol.
//!
//! Ed25519 keypairs with hex text codecs for the key material carried in
//! node records and admin messages. Records store keys as text; resolving
//! that text into a usable verification key happens here.

pub mod error;
pub mod keys;

pub use error::CryptoError;
pub use keys::{Keypair, KEY_LENGTH, SIGNATURE_LENGTH};
