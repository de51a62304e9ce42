//! Group-creation profiles.
//!
//! A profile names the consortium a new group belongs to and describes its
//! application section. Profiles are authored as JSON:
//!
//! ```json
//! {
//!   "consortium": "SampleConsortium",
//!   "application": {
//!     "organizations": [
//!       { "name": "Org1", "msp_id": "Org1MSP",
//!         "anchor_nodes": [{ "host": "node0.org1", "port": 7051 }] }
//!     ],
//!     "capabilities": { "V1_1_RESOURCETREE_EXPERIMENTAL": true },
//!     "resources": { "default_mod_policy": "/Group/Application/Admins" }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::RESOURCES_TREE_CAPABILITY;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::messages::AnchorNode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub consortium: Option<String>,
    #[serde(default)]
    pub application: Option<ApplicationProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationProfile {
    #[serde(default)]
    pub organizations: Vec<OrganizationProfile>,
    /// Capability name to enabled flag.
    #[serde(default)]
    pub capabilities: BTreeMap<String, bool>,
    #[serde(default)]
    pub resources: Option<ResourcesProfile>,
}

impl ApplicationProfile {
    /// Whether the application opts into the resource tree.
    pub fn has_resources_tree(&self) -> bool {
        self.capabilities
            .get(RESOURCES_TREE_CAPABILITY)
            .copied()
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    pub name: String,
    pub msp_id: String,
    #[serde(default)]
    pub anchor_nodes: Vec<AnchorNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcesProfile {
    pub default_mod_policy: String,
}

impl Profile {
    pub fn from_json(json: &str) -> EnvelopeResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| EnvelopeError::InvalidArgument(format!("invalid profile: {}", e)))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> EnvelopeResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| EnvelopeError::IoUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "consortium": "SampleConsortium",
        "application": {
            "organizations": [
                { "name": "Org1", "msp_id": "Org1MSP",
                  "anchor_nodes": [{ "host": "node0.org1", "port": 7051 }] }
            ],
            "capabilities": { "V1_1_RESOURCETREE_EXPERIMENTAL": true },
            "resources": { "default_mod_policy": "/Group/Application/Writers" }
        }
    }"#;

    #[test]
    fn parses_full_profile() {
        let profile = Profile::from_json(SAMPLE).unwrap();
        assert_eq!(profile.consortium.as_deref(), Some("SampleConsortium"));
        let app = profile.application.unwrap();
        assert!(app.has_resources_tree());
        assert_eq!(app.organizations[0].anchor_nodes[0].port, 7051);
        assert_eq!(
            app.resources.unwrap().default_mod_policy,
            "/Group/Application/Writers"
        );
    }

    #[test]
    fn missing_sections_default() {
        let profile = Profile::from_json(r#"{ "application": {} }"#).unwrap();
        assert_eq!(profile.consortium, None);
        let app = profile.application.unwrap();
        assert!(app.organizations.is_empty());
        assert!(!app.has_resources_tree());
    }

    #[test]
    fn disabled_capability_is_off() {
        let mut app = ApplicationProfile::default();
        app.capabilities
            .insert(RESOURCES_TREE_CAPABILITY.to_string(), false);
        assert!(!app.has_resources_tree());
    }

    #[test]
    fn invalid_json_is_invalid_argument() {
        match Profile::from_json("{ nope") {
            Err(EnvelopeError::InvalidArgument(msg)) => assert!(msg.contains("profile")),
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, SAMPLE).unwrap();
        assert!(Profile::from_json_file(&path).unwrap().application.is_some());
        assert!(matches!(
            Profile::from_json_file(dir.path().join("missing.json")),
            Err(EnvelopeError::IoUnavailable { .. })
        ));
    }
}
