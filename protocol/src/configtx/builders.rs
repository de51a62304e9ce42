//! Construction of configuration transactions.
//!
//! Group creation delegates the tree work to a [`ConfigTreeProvider`] and
//! then stamps the parts this layer owns: the group id, the consortium
//! values, and resource-tree seed data. Anchor-node updates need no differ
//! at all; only one leaf value changes, so their read/write sets have a
//! fixed shape.

use tracing::debug;

use super::guard::sign_config_update_envelope_with_identity;
use super::profile::Profile;
use super::provider::ConfigTreeProvider;
use crate::codec;
use crate::config::{
    ADMINS_POLICY_KEY, ANCHOR_NODES_KEY, APIS_KEY, APPLICATION_GROUP_KEY, CONSORTIUM_KEY,
    DEFAULT_EPOCH, DEFAULT_HEADER_VERSION, GROUP_APPLICATION_ADMINS_POLICY, MSP_KEY,
    NODE_POLICIES_KEY, READERS_POLICY_KEY, RESOURCE_CONFIG_SEED_DATA_KEY, SMART_CONTRACTS_KEY,
    WRITERS_POLICY_KEY,
};
use crate::envelope::nonce::NonceSource;
use crate::envelope::signer::{build_signed_envelope, seal_as};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::identity::{LocalSigner, SigningIdentity};
use crate::messages::{
    AnchorNode, AnchorNodes, Config, ConfigPolicy, ConfigTree, ConfigType, ConfigUpdate,
    ConfigUpdateEnvelope, ConfigValue, Consortium, Envelope, HeaderType, PayloadData,
};

// ---------------------------------------------------------------------------
// Group creation
// ---------------------------------------------------------------------------

/// Computes the config update that creates `group_id` from `profile`.
///
/// `seed_tree` (the consenter system group's tree) is accepted for call
/// compatibility and not consulted.
pub fn build_config_update(
    group_id: &str,
    _seed_tree: Option<&ConfigTree>,
    profile: &Profile,
    provider: &dyn ConfigTreeProvider,
) -> EnvelopeResult<ConfigUpdate> {
    let application = profile
        .application
        .as_ref()
        .ok_or_else(|| EnvelopeError::InvalidArgument("profile has no application section".into()))?;
    let consortium = profile
        .consortium
        .as_deref()
        .ok_or_else(|| EnvelopeError::InvalidArgument("profile names no consortium".into()))?;

    let app_tree = provider.build_application_tree(application)?;

    let mut pending_root = ConfigTree::default();
    pending_root
        .children
        .insert(APPLICATION_GROUP_KEY.to_string(), app_tree.clone());
    let pending = Config {
        group_tree: Some(pending_root),
        ..Default::default()
    };

    let mut original_app = app_tree;
    original_app.values.clear();
    original_app.policies.clear();
    let mut original_root = ConfigTree::default();
    original_root
        .children
        .insert(APPLICATION_GROUP_KEY.to_string(), original_app);
    let original = Config {
        group_tree: Some(original_root),
        ..Default::default()
    };

    let mut update = provider.compute_update(&original, &pending)?;
    update.group_id = group_id.to_string();

    update
        .read_set
        .get_or_insert_with(ConfigTree::default)
        .values
        .insert(CONSORTIUM_KEY.to_string(), ConfigValue::default());
    update
        .write_set
        .get_or_insert_with(ConfigTree::default)
        .values
        .insert(
            CONSORTIUM_KEY.to_string(),
            ConfigValue {
                value: codec::encode(&Consortium {
                    name: consortium.to_string(),
                })?,
                ..Default::default()
            },
        );

    if application.has_resources_tree() {
        let mod_policy = application
            .resources
            .as_ref()
            .map(|r| r.default_mod_policy.as_str())
            .filter(|policy| !policy.is_empty())
            .unwrap_or(GROUP_APPLICATION_ADMINS_POLICY);
        update.isolated_data.insert(
            RESOURCE_CONFIG_SEED_DATA_KEY.to_string(),
            codec::encode(&make_resources_config(mod_policy))?,
        );
    }

    Ok(update)
}

/// The initial resource tree: empty `SmartContracts`, `NodePolicies` and
/// `APIs` subtrees, all governed by `mod_policy`.
pub fn make_resources_config(mod_policy: &str) -> Config {
    let governed = || ConfigTree {
        mod_policy: mod_policy.to_string(),
        ..Default::default()
    };
    let mut root = governed();
    for key in [SMART_CONTRACTS_KEY, NODE_POLICIES_KEY, APIS_KEY] {
        root.children.insert(key.to_string(), governed());
    }
    Config {
        config_type: ConfigType::Resource.as_i32(),
        group_tree: Some(root),
        ..Default::default()
    }
}

/// Builds the envelope that creates `group_id`.
///
/// With an identity the update is co-signed and the envelope signed by that
/// identity, with nonces drawn from the paired source. Without one the
/// envelope carries only a group header and stays unsigned.
pub fn make_group_create_tx_with_identity(
    group_id: &str,
    identity: Option<(&dyn SigningIdentity, &NonceSource)>,
    seed_tree: Option<&ConfigTree>,
    profile: &Profile,
    provider: &dyn ConfigTreeProvider,
) -> EnvelopeResult<Envelope> {
    let update = build_config_update(group_id, seed_tree, profile, provider)?;
    let update_envelope = ConfigUpdateEnvelope {
        config_update: codec::encode(&update)?,
        signatures: Vec::new(),
    };
    debug!(group_id = %group_id, signed = identity.is_some(), "group creation tx built");

    match identity {
        Some((identity, nonces)) => {
            let co_signed =
                sign_config_update_envelope_with_identity(&update_envelope, identity, nonces)?;
            seal_as(
                HeaderType::ConfigUpdate,
                DEFAULT_HEADER_VERSION,
                group_id,
                identity,
                nonces,
                Some(&PayloadData::ConfigUpdate(co_signed)),
                DEFAULT_EPOCH,
            )
        }
        None => build_signed_envelope(
            HeaderType::ConfigUpdate,
            DEFAULT_HEADER_VERSION,
            group_id,
            None,
            Some(&PayloadData::ConfigUpdate(update_envelope)),
            DEFAULT_EPOCH,
        ),
    }
}

/// [`make_group_create_tx_with_identity`] for an optional [`LocalSigner`].
pub fn make_group_create_tx(
    group_id: &str,
    signer: Option<&LocalSigner>,
    seed_tree: Option<&ConfigTree>,
    profile: &Profile,
    provider: &dyn ConfigTreeProvider,
) -> EnvelopeResult<Envelope> {
    make_group_create_tx_with_identity(
        group_id,
        signer.map(|s| (s.identity(), s.nonces())),
        seed_tree,
        profile,
        provider,
    )
}

// ---------------------------------------------------------------------------
// Anchor-node updates
// ---------------------------------------------------------------------------

/// Organization subtree as referenced by an anchor-node update: MSP value
/// and the three standard policies present but unset.
fn org_skeleton() -> ConfigTree {
    let mut org = ConfigTree::default();
    org.values.insert(MSP_KEY.to_string(), ConfigValue::default());
    for policy in [READERS_POLICY_KEY, WRITERS_POLICY_KEY, ADMINS_POLICY_KEY] {
        org.policies.insert(policy.to_string(), ConfigPolicy::default());
    }
    org
}

/// Wraps `org` as `Application/<org_name>`, with Application at version 1.
fn under_application(org_name: &str, org: ConfigTree) -> ConfigTree {
    let mut application = ConfigTree {
        version: 1,
        mod_policy: ADMINS_POLICY_KEY.to_string(),
        ..Default::default()
    };
    application.children.insert(org_name.to_string(), org);

    let mut root = ConfigTree::default();
    root.children
        .insert(APPLICATION_GROUP_KEY.to_string(), application);
    root
}

/// Config update replacing the anchor nodes of `org_name` in `group_id`.
pub fn make_anchor_node_update(
    group_id: &str,
    org_name: &str,
    anchor_nodes: &[AnchorNode],
) -> EnvelopeResult<ConfigUpdate> {
    if org_name.trim().is_empty() {
        return Err(EnvelopeError::InvalidArgument(
            "organization name is empty".into(),
        ));
    }

    let read_set = under_application(org_name, org_skeleton());

    let mut org = org_skeleton();
    org.version = 1;
    org.mod_policy = ADMINS_POLICY_KEY.to_string();
    org.values.insert(
        ANCHOR_NODES_KEY.to_string(),
        ConfigValue {
            value: codec::encode(&AnchorNodes {
                anchor_nodes: anchor_nodes.to_vec(),
            })?,
            mod_policy: ADMINS_POLICY_KEY.to_string(),
            ..Default::default()
        },
    );
    let write_set = under_application(org_name, org);

    Ok(ConfigUpdate {
        group_id: group_id.to_string(),
        read_set: Some(read_set),
        write_set: Some(write_set),
        ..Default::default()
    })
}

/// [`make_anchor_node_update`] wrapped for submission: co-signed by
/// `identity` and sealed in a `ConfigUpdate` envelope it signs.
pub fn make_anchor_node_update_tx_with_identity(
    group_id: &str,
    org_name: &str,
    anchor_nodes: &[AnchorNode],
    identity: &dyn SigningIdentity,
    nonces: &NonceSource,
) -> EnvelopeResult<Envelope> {
    let update = make_anchor_node_update(group_id, org_name, anchor_nodes)?;
    let update_envelope = sign_config_update_envelope_with_identity(
        &ConfigUpdateEnvelope {
            config_update: codec::encode(&update)?,
            signatures: Vec::new(),
        },
        identity,
        nonces,
    )?;
    seal_as(
        HeaderType::ConfigUpdate,
        DEFAULT_HEADER_VERSION,
        group_id,
        identity,
        nonces,
        Some(&PayloadData::ConfigUpdate(update_envelope)),
        DEFAULT_EPOCH,
    )
}

/// [`make_anchor_node_update_tx_with_identity`] for a [`LocalSigner`].
pub fn make_anchor_node_update_tx(
    group_id: &str,
    org_name: &str,
    anchor_nodes: &[AnchorNode],
    signer: &LocalSigner,
) -> EnvelopeResult<Envelope> {
    make_anchor_node_update_tx_with_identity(
        group_id,
        org_name,
        anchor_nodes,
        signer.identity(),
        signer.nonces(),
    )
}
