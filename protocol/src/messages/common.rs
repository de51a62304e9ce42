//! Envelope, payload and header messages shared by every message kind.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::types::HeaderType;

/// Wall-clock instant: seconds since the Unix epoch plus a nanosecond
/// remainder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timestamp {
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            seconds: now.timestamp(),
            // subsec nanos stay below 2e9 even across a leap second
            nanos: now.timestamp_subsec_nanos() as i32,
        }
    }
}

/// Identifies the message kind and its routing context.
///
/// `Option` fields distinguish "absent" from "empty"; builders never store
/// an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupHeader {
    /// Wire value of a [`HeaderType`]. Kept raw so unknown kinds decode.
    pub header_type: i32,
    pub version: i32,
    pub timestamp: Option<Timestamp>,
    pub group_id: Option<String>,
    pub tx_id: Option<String>,
    pub epoch: u64,
    /// Kind-specific extension, e.g. an encoded smart-contract header extension.
    pub extension: Option<Vec<u8>>,
}

impl GroupHeader {
    /// The declared header type, if it is one this node knows.
    pub fn kind(&self) -> Option<HeaderType> {
        HeaderType::try_from(self.header_type).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureHeader {
    /// Serialized identity of the signer.
    pub creator: Option<Vec<u8>>,
    /// Anti-replay nonce, unique per signed message.
    pub nonce: Option<Vec<u8>>,
}

/// Both sub-headers, each frozen as the bytes produced at construction.
/// Empty bytes mean the sub-header is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub group_header: Vec<u8>,
    pub signature_header: Vec<u8>,
}

/// The signable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub header: Option<Header>,
    pub data: Vec<u8>,
}

/// Top-level wire unit. `signature` covers exactly `payload`; an empty
/// signature means "unsigned", not "invalid".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
}

impl Envelope {
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }
}
