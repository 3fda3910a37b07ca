/// Integer codes identifying every message kind.
///
/// Codes are stable across protocol versions and namespaced by hundreds:
/// 1xx client, 2xx provider, 3xx gateway, 4xx gateway admin, 5xx provider
/// admin, 9xx protocol-level errors. A code is never reused for a
/// different kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum MessageType {
    // Client (1xx)
    ClientEstablishmentRequest = 100,
    ClientEstablishmentResponse = 101,
    ClientStandardDiscoverRequest = 102,
    ClientStandardDiscoverResponse = 103,
    ClientDhtDiscoverRequest = 104,
    ClientDhtDiscoverResponse = 105,
    ClientDhtOfferAckRequest = 106,
    ClientDhtOfferAckResponse = 107,

    // Provider (2xx)
    ProviderPublishGroupOfferRequest = 200,
    ProviderPublishGroupOfferResponse = 201,
    ProviderPublishDhtOfferRequest = 202,
    ProviderPublishDhtOfferAck = 203,

    // Gateway (3xx)
    GatewaySingleOfferPublishRequest = 300,
    GatewaySingleOfferPublishResponse = 301,
    GatewaySingleOfferPublishAck = 302,
    GatewayDhtDiscoverRequest = 303,
    GatewayDhtDiscoverResponse = 304,
    GatewayListDhtOfferAck = 305,

    // Gateway admin (4xx)
    GatewayAdminGetReputationChallenge = 400,
    GatewayAdminGetReputationResponse = 401,
    GatewayAdminSetReputationChallenge = 402,
    GatewayAdminSetReputationResponse = 403,
    GatewayAdminEnrollGatewayRequest = 404,
    GatewayAdminEnrollGatewayResponse = 405,
    GatewayAdminInitialiseKeyRequest = 406,
    GatewayAdminInitialiseKeyResponse = 407,
    GatewayAdminListDhtOfferRequest = 408,
    GatewayAdminListDhtOfferResponse = 409,
    GatewayAdminUpdateOfferSupportRequest = 410,
    GatewayAdminUpdateOfferSupportResponse = 411,

    // Provider admin (5xx)
    ProviderAdminGetGroupOfferRequest = 500,
    ProviderAdminGetGroupOfferResponse = 501,
    ProviderAdminPublishGroupOfferRequest = 502,
    ProviderAdminPublishDhtOfferRequest = 503,
    ProviderAdminPublishOfferAck = 504,
    ProviderAdminInitialiseKeyRequest = 505,
    ProviderAdminInitialiseKeyResponse = 506,
    ProviderAdminEnrollProviderRequest = 507,
    ProviderAdminEnrollProviderResponse = 508,

    // Protocol-level errors (9xx)
    InvalidMessageResponse = 900,
    InsufficientFundsResponse = 901,
    ProtocolChangeResponse = 902,
    ProtocolMismatchResponse = 903,
}

impl MessageType {
    /// The wire code for this kind.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Look up a kind from its wire code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            100 => Some(MessageType::ClientEstablishmentRequest),
            101 => Some(MessageType::ClientEstablishmentResponse),
            102 => Some(MessageType::ClientStandardDiscoverRequest),
            103 => Some(MessageType::ClientStandardDiscoverResponse),
            104 => Some(MessageType::ClientDhtDiscoverRequest),
            105 => Some(MessageType::ClientDhtDiscoverResponse),
            106 => Some(MessageType::ClientDhtOfferAckRequest),
            107 => Some(MessageType::ClientDhtOfferAckResponse),
            200 => Some(MessageType::ProviderPublishGroupOfferRequest),
            201 => Some(MessageType::ProviderPublishGroupOfferResponse),
            202 => Some(MessageType::ProviderPublishDhtOfferRequest),
            203 => Some(MessageType::ProviderPublishDhtOfferAck),
            300 => Some(MessageType::GatewaySingleOfferPublishRequest),
            301 => Some(MessageType::GatewaySingleOfferPublishResponse),
            302 => Some(MessageType::GatewaySingleOfferPublishAck),
            303 => Some(MessageType::GatewayDhtDiscoverRequest),
            304 => Some(MessageType::GatewayDhtDiscoverResponse),
            305 => Some(MessageType::GatewayListDhtOfferAck),
            400 => Some(MessageType::GatewayAdminGetReputationChallenge),
            401 => Some(MessageType::GatewayAdminGetReputationResponse),
            402 => Some(MessageType::GatewayAdminSetReputationChallenge),
            403 => Some(MessageType::GatewayAdminSetReputationResponse),
            404 => Some(MessageType::GatewayAdminEnrollGatewayRequest),
            405 => Some(MessageType::GatewayAdminEnrollGatewayResponse),
            406 => Some(MessageType::GatewayAdminInitialiseKeyRequest),
            407 => Some(MessageType::GatewayAdminInitialiseKeyResponse),
            408 => Some(MessageType::GatewayAdminListDhtOfferRequest),
            409 => Some(MessageType::GatewayAdminListDhtOfferResponse),
            410 => Some(MessageType::GatewayAdminUpdateOfferSupportRequest),
            411 => Some(MessageType::GatewayAdminUpdateOfferSupportResponse),
            500 => Some(MessageType::ProviderAdminGetGroupOfferRequest),
            501 => Some(MessageType::ProviderAdminGetGroupOfferResponse),
            502 => Some(MessageType::ProviderAdminPublishGroupOfferRequest),
            503 => Some(MessageType::ProviderAdminPublishDhtOfferRequest),
            504 => Some(MessageType::ProviderAdminPublishOfferAck),
            505 => Some(MessageType::ProviderAdminInitialiseKeyRequest),
            506 => Some(MessageType::ProviderAdminInitialiseKeyResponse),
            507 => Some(MessageType::ProviderAdminEnrollProviderRequest),
            508 => Some(MessageType::ProviderAdminEnrollProviderResponse),
            900 => Some(MessageType::InvalidMessageResponse),
            901 => Some(MessageType::InsufficientFundsResponse),
            902 => Some(MessageType::ProtocolChangeResponse),
            903 => Some(MessageType::ProtocolMismatchResponse),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_from_code_roundtrip() {
        for code in [100, 107, 203, 301, 305, 404, 411, 508, 900, 903] {
            let kind = MessageType::from_code(code).expect("known code");
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn test_unknown_codes_rejected() {
        for code in [0, 99, 108, 600, 777, 904, -1] {
            assert_eq!(MessageType::from_code(code), None);
        }
    }

    #[test]
    fn test_family_namespacing() {
        assert_eq!(MessageType::ClientEstablishmentRequest.code() / 100, 1);
        assert_eq!(MessageType::ProviderPublishDhtOfferAck.code() / 100, 2);
        assert_eq!(MessageType::GatewayDhtDiscoverRequest.code() / 100, 3);
        assert_eq!(MessageType::GatewayAdminEnrollGatewayRequest.code() / 100, 4);
        assert_eq!(MessageType::ProviderAdminPublishOfferAck.code() / 100, 5);
        assert_eq!(MessageType::ProtocolMismatchResponse.code() / 100, 9);
    }
}
