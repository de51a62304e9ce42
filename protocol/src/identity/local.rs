//! # Local Ed25519 Identity
//!
//! The in-process identity a node or client uses when it is not backed by
//! an external membership service: an MSP id plus an Ed25519 signing key.
//!
//! The serialized form is a [`SerializedIdentity`] (MSP id, raw public key)
//! encoded with the wire codec. That is the byte string that ends up in
//! every `creator` field this identity produces, so it must never change
//! shape for an existing key.
//!
//! Secret key bytes are never logged and never appear in `Debug` output.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::signing::{IdentityError, SignatureVerifier, SigningIdentity};
use crate::codec;

/// Wire form of an identity: which MSP vouches for it and its public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedIdentity {
    pub msp_id: String,
    pub id_bytes: Vec<u8>,
}

impl SerializedIdentity {
    /// Decodes creator bytes produced by [`LocalIdentity::serialize_identity`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IdentityError> {
        codec::decode(bytes).map_err(|e| IdentityError::Deserialization(e.to_string()))
    }
}

/// An MSP-scoped Ed25519 signing identity.
pub struct LocalIdentity {
    msp_id: String,
    signing_key: SigningKey,
}

impl LocalIdentity {
    /// Generates a fresh identity from the OS RNG.
    pub fn generate(msp_id: impl Into<String>) -> Self {
        Self {
            msp_id: msp_id.into(),
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Builds an identity from a 32-byte Ed25519 seed.
    pub fn from_seed(msp_id: impl Into<String>, seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            msp_id: msp_id.into(),
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Builds an identity from a hex-encoded seed, as stored in key files.
    /// Surrounding whitespace is ignored.
    pub fn from_hex(msp_id: impl Into<String>, seed_hex: &str) -> Result<Self, IdentityError> {
        let bytes = hex::decode(seed_hex.trim())
            .map_err(|e| IdentityError::InvalidKey(format!("seed is not hex: {}", e)))?;
        let seed: [u8; SECRET_KEY_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
            IdentityError::InvalidKey(format!(
                "seed must be {} bytes, got {}",
                SECRET_KEY_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self::from_seed(msp_id, &seed))
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    /// Raw 32-byte public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Hex-encoded seed, for writing key files. Handle with care.
    pub fn seed_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }
}

impl Clone for LocalIdentity {
    fn clone(&self) -> Self {
        Self {
            msp_id: self.msp_id.clone(),
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for LocalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LocalIdentity(msp={}, pub={})",
            self.msp_id,
            hex::encode(self.public_key_bytes())
        )
    }
}

impl SigningIdentity for LocalIdentity {
    fn serialize_identity(&self) -> Result<Vec<u8>, IdentityError> {
        let wire = SerializedIdentity {
            msp_id: self.msp_id.clone(),
            id_bytes: self.public_key_bytes().to_vec(),
        };
        codec::encode(&wire).map_err(|e| IdentityError::Serialization(e.to_string()))
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, IdentityError> {
        Ok(self.signing_key.sign(message).to_bytes().to_vec())
    }
}

/// Verifies signatures from [`LocalIdentity`] creators.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        creator: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), IdentityError> {
        let identity = SerializedIdentity::from_bytes(creator)?;
        let key_bytes: [u8; 32] = identity.id_bytes.as_slice().try_into().map_err(|_| {
            IdentityError::Deserialization(format!(
                "public key must be 32 bytes, got {}",
                identity.id_bytes.len()
            ))
        })?;
        let key = VerifyingKey::from_bytes(&key_bytes)
            .map_err(|e| IdentityError::Deserialization(e.to_string()))?;
        let sig_bytes: [u8; 64] = signature
            .try_into()
            .map_err(|_| IdentityError::Verification)?;
        key.verify(message, &Signature::from_bytes(&sig_bytes))
            .map_err(|_| IdentityError::Verification)
    }
}
