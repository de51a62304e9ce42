//! # Config Transactions
//!
//! Creating groups and changing their configuration.
//!
//! ```text
//! profile.rs   Group-creation profiles (JSON)
//! provider.rs  The config-tree service this module delegates to
//! builders.rs  Group-creation and anchor-node update transactions
//! guard.rs     Sanity checks and co-signing of incoming config updates
//! ```
//!
//! A config update travels as a `ConfigUpdateEnvelope`: the encoded
//! [`ConfigUpdate`](crate::messages::ConfigUpdate) plus one
//! [`ConfigSignature`](crate::messages::ConfigSignature) per administrator
//! that approved it. Each administrator co-signs the same update bytes, then
//! re-wraps the result in an envelope signed with their own identity.

pub mod builders;
pub mod guard;
pub mod profile;
pub mod provider;

pub use builders::{
    build_config_update, make_anchor_node_update, make_anchor_node_update_tx,
    make_anchor_node_update_tx_with_identity, make_group_create_tx,
    make_group_create_tx_with_identity, make_resources_config,
};
pub use guard::{
    sanity_check_and_sign, sanity_check_and_sign_with_identity, sign_config_update_envelope,
    sign_config_update_envelope_with_identity,
};
pub use profile::{ApplicationProfile, OrganizationProfile, Profile, ResourcesProfile};
pub use provider::{ConfigTreeError, ConfigTreeProvider};
