//! Configuration tree and configuration-transaction messages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::common::Envelope;

/// Which tree a [`Config`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigType {
    /// Group (channel) configuration.
    Group,
    /// Resource tree (contracts, node policies, APIs).
    Resource,
}

impl ConfigType {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Group => 0,
            Self::Resource => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValue {
    pub version: u64,
    pub value: Vec<u8>,
    pub mod_policy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub policy_type: i32,
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPolicy {
    pub version: u64,
    pub policy: Option<Policy>,
    pub mod_policy: String,
}

/// One node of the hierarchical configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigTree {
    pub version: u64,
    pub children: BTreeMap<String, ConfigTree>,
    pub values: BTreeMap<String, ConfigValue>,
    pub policies: BTreeMap<String, ConfigPolicy>,
    pub mod_policy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub sequence: u64,
    pub group_tree: Option<ConfigTree>,
    pub config_type: i32,
}

/// Read and write sets describing a configuration change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub group_id: String,
    pub read_set: Option<ConfigTree>,
    pub write_set: Option<ConfigTree>,
    pub config_type: i32,
    /// Data that travels with the update but is not part of the tree.
    pub isolated_data: BTreeMap<String, Vec<u8>>,
}

/// One admin's signature over a config update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSignature {
    /// Encoded `SignatureHeader` of the co-signer.
    pub signature_header: Vec<u8>,
    /// Signature over `signature_header ‖ config_update`.
    pub signature: Vec<u8>,
}

/// Body of a `ConfigUpdate` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdateEnvelope {
    /// Encoded [`ConfigUpdate`].
    pub config_update: Vec<u8>,
    pub signatures: Vec<ConfigSignature>,
}

/// Body of a `Config` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEnvelope {
    pub config: Option<Config>,
    pub last_update: Option<Envelope>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorNode {
    pub host: String,
    pub port: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorNodes {
    pub anchor_nodes: Vec<AnchorNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consortium {
    pub name: String,
}
