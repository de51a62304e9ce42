//! Legacy signer shim.
//!
//! Older call sites pass a "signer" that can both mint a signature header
//! and sign bytes. [`LocalSigner`] provides exactly that on top of a
//! [`SigningIdentity`] and a [`NonceSource`], so those call sites go through
//! the same identity path as everything else.

use std::fmt;
use std::sync::Arc;

use super::signing::SigningIdentity;
use crate::envelope::header::build_signature_header;
use crate::envelope::nonce::NonceSource;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::messages::SignatureHeader;

/// An identity plus the nonce source used for its signature headers.
#[derive(Clone)]
pub struct LocalSigner {
    identity: Arc<dyn SigningIdentity>,
    nonces: NonceSource,
}

impl LocalSigner {
    pub fn new(identity: Arc<dyn SigningIdentity>, nonces: NonceSource) -> Self {
        Self { identity, nonces }
    }

    pub fn identity(&self) -> &dyn SigningIdentity {
        self.identity.as_ref()
    }

    pub fn nonces(&self) -> &NonceSource {
        &self.nonces
    }

    /// A signature header carrying this signer's creator bytes and a fresh
    /// nonce. Every call draws a new nonce.
    pub fn new_signature_header(&self) -> EnvelopeResult<SignatureHeader> {
        let creator = self
            .identity
            .serialize_identity()
            .map_err(EnvelopeError::from_identity)?;
        let nonce = self.nonces.generate_nonce()?;
        Ok(build_signature_header(Some(&creator), Some(&nonce)))
    }

    /// Signs exactly `message`.
    pub fn sign(&self, message: &[u8]) -> EnvelopeResult<Vec<u8>> {
        self.identity
            .sign(message)
            .map_err(EnvelopeError::from_signing)
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner").finish_non_exhaustive()
    }
}
