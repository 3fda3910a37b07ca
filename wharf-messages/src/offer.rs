use serde::{Deserialize, Serialize};
use wharf_types::{ContentId, NodeId};

/// One provider's offer covering a group of content pieces.
///
/// The Merkle fields are opaque text produced and checked by the external
/// Merkle-proof library; this crate only carries them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOfferEntry {
    pub provider_id: NodeId,
    pub price_per_byte: u64,
    pub expiry_date: i64,
    pub qos: u64,
    pub signature: String,
    pub merkle_root: String,
    pub merkle_proof: String,
    pub funded_payment_channel: bool,
}

/// An offer covering a single content piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleOfferEntry {
    pub piece_cid: ContentId,
    pub price_per_byte: u64,
    pub expiry_date: i64,
    pub qos: u64,
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_offer_serde_roundtrip() {
        let offer = GroupOfferEntry {
            provider_id: NodeId::from_hex("a1").expect("parse failed"),
            price_per_byte: 42,
            expiry_date: 1_700_000_000,
            qos: 5,
            signature: "sig".to_string(),
            merkle_root: "root".to_string(),
            merkle_proof: "proof".to_string(),
            funded_payment_channel: true,
        };
        let json = serde_json::to_string(&offer).expect("serialize failed");
        let back: GroupOfferEntry = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(back, offer);
    }

    #[test]
    fn test_single_offer_serde_roundtrip() {
        let offer = SingleOfferEntry {
            piece_cid: ContentId::from_hex("beef").expect("parse failed"),
            price_per_byte: 7,
            expiry_date: 1_700_000_000,
            qos: 1,
            signature: "sig".to_string(),
        };
        let json = serde_json::to_string(&offer).expect("serialize failed");
        let back: SingleOfferEntry = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(back, offer);
    }
}
