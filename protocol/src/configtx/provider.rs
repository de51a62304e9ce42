//! The config-tree collaborator.
//!
//! Building an application subtree from a profile and diffing two config
//! snapshots into read/write sets both belong to the config-tree service.
//! This crate only supplies the inputs and consumes the result.

use thiserror::Error;

use super::profile::ApplicationProfile;
use crate::messages::{Config, ConfigTree, ConfigUpdate};

/// Errors raised by a [`ConfigTreeProvider`].
#[derive(Debug, Error)]
pub enum ConfigTreeError {
    /// The profile could not be turned into a tree.
    #[error("cannot build application tree: {0}")]
    Build(String),

    /// The two snapshots could not be diffed.
    #[error("cannot compute config update: {0}")]
    Compute(String),
}

/// Tree construction and differencing, as consumed by group creation.
pub trait ConfigTreeProvider: Send + Sync {
    /// The `Application` subtree described by `profile`.
    fn build_application_tree(&self, profile: &ApplicationProfile)
        -> Result<ConfigTree, ConfigTreeError>;

    /// Read/write sets that turn `original` into `pending`.
    fn compute_update(&self, original: &Config, pending: &Config)
        -> Result<ConfigUpdate, ConfigTreeError>;
}
