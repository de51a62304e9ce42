//! # Protocol Configuration & Constants
//!
//! Every fixed value the envelope layer relies on lives here: nonce sizing,
//! header versions, endorsement status codes, and the well-known key names
//! of the group configuration tree.
//!
//! Most of these are wire-visible. Changing a key name or the nonce length
//! after nodes are deployed splits the fleet, so treat this file as part of
//! the protocol, not as tuning knobs.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Crate-level protocol version string, reported by the CLI.
pub const PROTOCOL_VERSION: &str = "0.1.0";

/// Header version stamped on proposals and on the config transactions this
/// layer originates. Carried verbatim when a config update is re-wrapped.
pub const DEFAULT_HEADER_VERSION: i32 = 0;

/// Epoch used for proposals and freshly created config transactions.
pub const DEFAULT_EPOCH: u64 = 0;

// ---------------------------------------------------------------------------
// Anti-Replay
// ---------------------------------------------------------------------------

/// Length of the random nonce placed in every signature header, in bytes.
pub const NONCE_LENGTH: usize = 24;

// ---------------------------------------------------------------------------
// Endorsement
// ---------------------------------------------------------------------------

/// Status an endorser reports when simulation succeeded.
pub const STATUS_OK: i32 = 200;

/// Status left unset by endorsers that predate explicit status codes.
/// Treated as success.
pub const STATUS_UNSET: i32 = 0;

/// Returns `true` when an endorser status counts as a successful simulation.
pub fn is_success_status(status: i32) -> bool {
    status == STATUS_OK || status == STATUS_UNSET
}

// ---------------------------------------------------------------------------
// Codec Limits
// ---------------------------------------------------------------------------

/// Upper bound on any single encoded message. Decoding rejects length
/// prefixes that would exceed it instead of trying to allocate.
pub const MAX_MESSAGE_SIZE: u64 = 64 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Group Configuration Tree Keys
// ---------------------------------------------------------------------------

/// Child of the group tree holding application organizations.
pub const APPLICATION_GROUP_KEY: &str = "Application";

/// Value holding the consortium a group belongs to.
pub const CONSORTIUM_KEY: &str = "Consortium";

/// Value holding an organization's MSP definition.
pub const MSP_KEY: &str = "MSP";

/// Value holding an organization's anchor nodes.
pub const ANCHOR_NODES_KEY: &str = "AnchorNodes";

/// Policy names every organization subtree carries.
pub const READERS_POLICY_KEY: &str = "Readers";
pub const WRITERS_POLICY_KEY: &str = "Writers";
pub const ADMINS_POLICY_KEY: &str = "Admins";

/// Default modification policy for the application resources tree when the
/// profile does not name one.
pub const GROUP_APPLICATION_ADMINS_POLICY: &str = "/Group/Application/Admins";

// ---------------------------------------------------------------------------
// Resources Tree
// ---------------------------------------------------------------------------

/// Isolated-data key under which the seed resources config is shipped in a
/// group-creation update.
pub const RESOURCE_CONFIG_SEED_DATA_KEY: &str = "resource_config_seed_data";

/// Children of the resources tree.
pub const SMART_CONTRACTS_KEY: &str = "SmartContracts";
pub const NODE_POLICIES_KEY: &str = "NodePolicies";
pub const APIS_KEY: &str = "APIs";

/// Application capability that turns on the resources tree.
pub const RESOURCES_TREE_CAPABILITY: &str = "V1_1_RESOURCETREE_EXPERIMENTAL";
