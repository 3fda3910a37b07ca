use serde_json::Value;

use crate::envelope::Envelope;
use crate::types::MessageType;

/// Current protocol version stamped on outgoing messages.
pub const PROTOCOL_VERSION: i32 = 1;

/// Versions this build can accept in response, as `[min, max]`.
pub const PROTOCOL_SUPPORTED: [i32; 2] = [1, 1];

/// Immutable protocol-version policy for one process.
///
/// Every codec constructs envelopes through [`ProtocolConfig::envelope`],
/// the single choke point that stamps the version and supported range.
/// Threading the config explicitly, instead of reading global state, lets
/// one test process simulate several protocol versions side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolConfig {
    version: i32,
    supported: [i32; 2],
}

impl ProtocolConfig {
    /// Create a policy with an explicit version and supported range.
    pub const fn new(version: i32, supported: [i32; 2]) -> Self {
        Self { version, supported }
    }

    /// The version stamped on outgoing envelopes.
    pub fn version(&self) -> i32 {
        self.version
    }

    /// The `[min, max]` range accepted in responses.
    pub fn supported(&self) -> [i32; 2] {
        self.supported
    }

    /// Build an envelope of the given kind around a serialized body.
    ///
    /// The only constructor for outbound envelopes: the type tag is fixed
    /// here and the version fields come from this config, never from the
    /// individual codec.
    pub(crate) fn envelope(&self, message_type: MessageType, body: Value) -> Envelope {
        Envelope::new(message_type.code(), self.version, self.supported, body)
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self::new(PROTOCOL_VERSION, PROTOCOL_SUPPORTED)
    }
}
