use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Length in bytes of a node or content identifier.
pub const ID_LENGTH: usize = 32;

/// Errors from parsing an identifier's text form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    /// The input has more hex digits than a 32-byte identifier can hold.
    #[error("identifier too long: {len} hex digits (max {max})", max = ID_LENGTH * 2)]
    TooLong { len: usize },

    /// The input contains non-hexadecimal characters.
    #[error("invalid hex in identifier: {reason}")]
    InvalidHex { reason: String },
}

/// A 32-byte node identity.
///
/// The canonical text form is 64 lowercase hex digits. Parsing accepts
/// shorter input and left-pads with zeros, so `"7"` names the identifier
/// `0x00..07`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId([u8; ID_LENGTH]);

impl NodeId {
    /// Create an identifier from raw bytes.
    pub const fn from_bytes(bytes: [u8; ID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse an identifier from its hex text form.
    pub fn from_hex(text: &str) -> Result<Self, IdError> {
        decode_padded_hex(text).map(Self)
    }

    /// The raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; ID_LENGTH] {
        &self.0
    }

    /// The canonical text form: 64 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.to_hex())
    }
}

impl FromStr for NodeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// A 32-byte content identifier (piece CID).
///
/// Same text contract as [`NodeId`], but the two identifier spaces are
/// distinct types and never interchangeable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId([u8; ID_LENGTH]);

impl ContentId {
    /// Create an identifier from raw bytes.
    pub const fn from_bytes(bytes: [u8; ID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse an identifier from its hex text form.
    pub fn from_hex(text: &str) -> Result<Self, IdError> {
        decode_padded_hex(text).map(Self)
    }

    /// The raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; ID_LENGTH] {
        &self.0
    }

    /// The canonical text form: 64 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.to_hex())
    }
}

impl FromStr for ContentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Decode a hex string into 32 bytes, left-padding short input with zeros.
fn decode_padded_hex(text: &str) -> Result<[u8; ID_LENGTH], IdError> {
    if text.is_empty() {
        return Err(IdError::InvalidHex {
            reason: "empty string".to_string(),
        });
    }
    if text.len() > ID_LENGTH * 2 {
        return Err(IdError::TooLong { len: text.len() });
    }
    let mut padded = String::with_capacity(ID_LENGTH * 2);
    for _ in text.len()..ID_LENGTH * 2 {
        padded.push('0');
    }
    padded.push_str(text);

    let raw = hex::decode(&padded).map_err(|e| IdError::InvalidHex {
        reason: e.to_string(),
    })?;
    let mut bytes = [0u8; ID_LENGTH];
    bytes.copy_from_slice(&raw);
    Ok(bytes)
}
