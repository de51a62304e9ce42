//! Error types for the envelope layer.
//!
//! Every construction, assembly and sanity-check operation returns an
//! [`EnvelopeError`]. Collaborator failures (CSP, identity, config tree,
//! codec) have their own error types and are wrapped here at the boundary
//! so callers match on one enum.

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::CodecError;
use crate::configtx::ConfigTreeError;
use crate::crypto::CspError;
use crate::identity::IdentityError;

/// Convenience alias used throughout the crate.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// Failures of the envelope layer.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// A required input is absent or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The proposal, or one of its nested messages, does not decode.
    #[error("malformed proposal: {0}")]
    MalformedProposal(String),

    /// The envelope or its payload does not decode.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// A group or signature header does not decode.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The payload data is not a config update envelope.
    #[error("malformed config update: {0}")]
    MalformedConfigUpdate(String),

    /// The envelope carries no payload bytes.
    #[error("envelope is missing its payload")]
    MissingPayload,

    /// The payload carries no header, or the header has no group header.
    #[error("payload is missing its header")]
    MissingHeader,

    /// The group header declares a different message type than required.
    #[error("wrong header type: expected {expected}, got {actual}")]
    WrongHeaderType { expected: String, actual: String },

    /// The group header names a different (or no) group.
    #[error("group id mismatch: expected {expected:?}, got {actual:?}")]
    GroupIdMismatch { expected: String, actual: String },

    /// The proposal's creator is not the identity assembling the transaction.
    #[error("signature header creator does not match the assembling identity")]
    CreatorMismatch,

    /// An endorser reported a non-success status.
    #[error("endorser {index} rejected the proposal: status {status} ({message})")]
    EndorserRejected {
        index: usize,
        status: i32,
        message: String,
    },

    /// An endorser's response payload differs from the first endorser's.
    #[error("endorsement {index} disagrees with the first endorsement's response payload")]
    EndorsementMismatch { index: usize },

    /// The CSP could not produce randomness or a hash.
    #[error("crypto provider unavailable: {0}")]
    CryptoUnavailable(String),

    /// The signing identity refused or failed to sign.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// The envelope is unsigned, or its signature does not verify.
    #[error("invalid envelope signature: {0}")]
    SignatureInvalid(String),

    /// The identity could not be serialized.
    #[error("identity unavailable: {0}")]
    IdentityUnavailable(String),

    /// The byte source could not be read.
    #[error("cannot read {path}: {source}")]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A message could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] CodecError),

    /// The config-tree collaborator failed.
    #[error("config tree error: {0}")]
    ConfigTree(#[from] ConfigTreeError),
}

impl From<CspError> for EnvelopeError {
    fn from(err: CspError) -> Self {
        EnvelopeError::CryptoUnavailable(err.to_string())
    }
}

impl EnvelopeError {
    /// Maps a signing-path identity failure: serialization problems are
    /// `IdentityUnavailable`, everything else is `SigningFailed`.
    pub(crate) fn from_signing(err: IdentityError) -> Self {
        match err {
            IdentityError::Serialization(reason) => EnvelopeError::IdentityUnavailable(reason),
            other => EnvelopeError::SigningFailed(other.to_string()),
        }
    }

    /// Maps an identity failure raised while resolving the creator bytes.
    pub(crate) fn from_identity(err: IdentityError) -> Self {
        EnvelopeError::IdentityUnavailable(err.to_string())
    }
}
