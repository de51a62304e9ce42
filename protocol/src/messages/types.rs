//! Discriminants carried inside wire messages.
//!
//! [`HeaderType`] travels as a raw `i32` inside [`GroupHeader`] so that a
//! node can still decode (and then reject) a header type it does not know.
//! [`PayloadData`] is the typed view of `Payload.data`, selected by that
//! header type.
//!
//! [`GroupHeader`]: super::GroupHeader

use std::fmt;

use super::configtx::{ConfigEnvelope, ConfigUpdateEnvelope};
use super::transaction::Transaction;
use crate::codec::{self, CodecError};

// ---------------------------------------------------------------------------
// HeaderType
// ---------------------------------------------------------------------------

/// The kind of message a group header announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderType {
    /// Free-form signed message.
    Message,
    /// Full group configuration.
    Config,
    /// Proposed change to a group configuration.
    ConfigUpdate,
    /// Client transaction carrying endorsements.
    EndorserTransaction,
    /// Consenter-internal transaction.
    ConsenterTransaction,
    /// Block delivery request.
    DeliverSeekInfo,
    /// Smart-contract installation package.
    SmartContractPackage,
    /// Node resource-tree update.
    NodeResourceUpdate,
}

impl HeaderType {
    pub const ALL: [HeaderType; 8] = [
        Self::Message,
        Self::Config,
        Self::ConfigUpdate,
        Self::EndorserTransaction,
        Self::ConsenterTransaction,
        Self::DeliverSeekInfo,
        Self::SmartContractPackage,
        Self::NodeResourceUpdate,
    ];

    /// Wire value stored in `GroupHeader::header_type`.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Message => 0,
            Self::Config => 1,
            Self::ConfigUpdate => 2,
            Self::EndorserTransaction => 3,
            Self::ConsenterTransaction => 4,
            Self::DeliverSeekInfo => 5,
            Self::SmartContractPackage => 6,
            Self::NodeResourceUpdate => 7,
        }
    }

    /// Human-readable name for any wire value, known or not. Used when
    /// reporting a header type that failed a semantic check.
    pub fn describe(value: i32) -> String {
        match HeaderType::try_from(value) {
            Ok(kind) => kind.to_string(),
            Err(raw) => format!("Unknown({})", raw),
        }
    }
}

impl TryFrom<i32> for HeaderType {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_i32() == value)
            .ok_or(value)
    }
}

impl From<HeaderType> for i32 {
    fn from(kind: HeaderType) -> Self {
        kind.as_i32()
    }
}

impl fmt::Display for HeaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message => write!(f, "Message"),
            Self::Config => write!(f, "Config"),
            Self::ConfigUpdate => write!(f, "ConfigUpdate"),
            Self::EndorserTransaction => write!(f, "EndorserTransaction"),
            Self::ConsenterTransaction => write!(f, "ConsenterTransaction"),
            Self::DeliverSeekInfo => write!(f, "DeliverSeekInfo"),
            Self::SmartContractPackage => write!(f, "SmartContractPackage"),
            Self::NodeResourceUpdate => write!(f, "NodeResourceUpdate"),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadData
// ---------------------------------------------------------------------------

/// Typed body of a payload. Which variant is legal is decided by the
/// payload's group header type, never by inspecting the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadData {
    Transaction(Transaction),
    Config(ConfigEnvelope),
    ConfigUpdate(ConfigUpdateEnvelope),
}

impl PayloadData {
    /// The header type a payload must declare to carry this body.
    pub fn header_type(&self) -> HeaderType {
        match self {
            Self::Transaction(_) => HeaderType::EndorserTransaction,
            Self::Config(_) => HeaderType::Config,
            Self::ConfigUpdate(_) => HeaderType::ConfigUpdate,
        }
    }

    /// Wire bytes of the inner message, as stored in `Payload::data`.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Transaction(tx) => codec::encode(tx),
            Self::Config(env) => codec::encode(env),
            Self::ConfigUpdate(env) => codec::encode(env),
        }
    }

    /// Decodes `bytes` as the body `kind` calls for. Returns `Ok(None)` for
    /// header types that carry no typed body.
    pub fn decode(kind: HeaderType, bytes: &[u8]) -> Result<Option<Self>, CodecError> {
        let data = match kind {
            HeaderType::EndorserTransaction => Self::Transaction(codec::decode(bytes)?),
            HeaderType::Config => Self::Config(codec::decode(bytes)?),
            HeaderType::ConfigUpdate => Self::ConfigUpdate(codec::decode(bytes)?),
            _ => return Ok(None),
        };
        Ok(Some(data))
    }

    /// Short name for logs and CLI summaries.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Transaction(_) => "transaction",
            Self::Config(_) => "config",
            Self::ConfigUpdate(_) => "config_update",
        }
    }
}

impl From<Transaction> for PayloadData {
    fn from(tx: Transaction) -> Self {
        Self::Transaction(tx)
    }
}

impl From<ConfigEnvelope> for PayloadData {
    fn from(env: ConfigEnvelope) -> Self {
        Self::Config(env)
    }
}

impl From<ConfigUpdateEnvelope> for PayloadData {
    fn from(env: ConfigUpdateEnvelope) -> Self {
        Self::ConfigUpdate(env)
    }
}
