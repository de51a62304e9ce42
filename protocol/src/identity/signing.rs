//! Collaborator contracts for the membership service.
//!
//! The envelope layer only needs three things from an identity: its
//! serialized form (the `creator` bytes stamped into signature headers), a
//! signature over exact bytes, and, on the receiving side, a way to check
//! such a signature given the creator bytes.

use thiserror::Error;

/// Errors raised by identity implementations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The identity could not be turned into creator bytes.
    #[error("identity serialization failed: {0}")]
    Serialization(String),

    /// Creator bytes do not describe an identity this verifier understands.
    #[error("unrecognized identity: {0}")]
    Deserialization(String),

    /// The signer refused or failed to produce a signature.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Key material could not be parsed.
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// The signature does not verify for the given identity and message.
    #[error("signature verification failed")]
    Verification,
}

/// An identity that can sign on behalf of this node or client.
///
/// Implementations must be deterministic in [`serialize_identity`]: the
/// assembler compares these bytes against the proposal's creator field
/// byte-for-byte.
///
/// [`serialize_identity`]: SigningIdentity::serialize_identity
pub trait SigningIdentity: Send + Sync {
    /// The identity's wire form, used as `creator` and `endorser` bytes.
    fn serialize_identity(&self) -> Result<Vec<u8>, IdentityError>;

    /// Signs exactly `message`.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, IdentityError>;
}

/// Checks signatures produced by a [`SigningIdentity`], given only the
/// serialized identity that claims to have produced them.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, creator: &[u8], message: &[u8], signature: &[u8])
        -> Result<(), IdentityError>;
}
