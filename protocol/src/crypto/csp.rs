//! # Cryptographic Service Provider
//!
//! The envelope layer never reaches for randomness or digests directly.
//! Everything goes through the [`Csp`] trait so that nodes backed by an HSM
//! or a national-algorithm provider can plug in their own implementation.
//!
//! [`SoftwareCsp`] is the in-process default: `OsRng` for randomness and
//! the digests from [`super::hash`].

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hash::{digest, HashAlgorithm};

/// Errors raised by a crypto provider.
#[derive(Debug, Error)]
pub enum CspError {
    #[error("random number generation failed: {0}")]
    Rng(String),

    #[error("hashing failed: {0}")]
    Hash(String),

    #[error("unsupported option: {0}")]
    Unsupported(String),
}

/// Options for [`Csp::rng`]. Empty today; kept so the call shape matches
/// providers that accept entropy-source hints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RngOpts;

/// Options for [`Csp::hash`]. `None` fields fall back to the provider default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashOpts {
    pub algorithm: Option<HashAlgorithm>,
}

impl HashOpts {
    pub fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm: Some(algorithm),
        }
    }
}

/// Randomness and hashing, as consumed by the envelope layer.
///
/// Implementations must be safe to share across threads and must guarantee
/// that concurrent `rng` calls never hand out the same bytes.
pub trait Csp: Send + Sync {
    /// Returns `length` cryptographically secure random bytes.
    fn rng(&self, length: usize, opts: Option<&RngOpts>) -> Result<Vec<u8>, CspError>;

    /// Hashes `data`.
    fn hash(&self, data: &[u8], opts: Option<&HashOpts>) -> Result<Vec<u8>, CspError>;
}

/// Provider configuration, loadable from the node's JSON config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CspConfig {
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,
}

/// Software provider: OS randomness plus SHA-256/BLAKE3.
#[derive(Debug, Clone, Default)]
pub struct SoftwareCsp {
    default_hash: HashAlgorithm,
}

impl SoftwareCsp {
    pub fn new(config: &CspConfig) -> Self {
        Self {
            default_hash: config.hash_algorithm,
        }
    }

    /// The algorithm used when a call passes no [`HashOpts`].
    pub fn default_hash(&self) -> HashAlgorithm {
        self.default_hash
    }
}

impl Csp for SoftwareCsp {
    fn rng(&self, length: usize, _opts: Option<&RngOpts>) -> Result<Vec<u8>, CspError> {
        if length == 0 {
            return Err(CspError::Unsupported("zero-length random request".into()));
        }
        let mut out = vec![0u8; length];
        OsRng
            .try_fill_bytes(&mut out)
            .map_err(|e| CspError::Rng(e.to_string()))?;
        Ok(out)
    }

    fn hash(&self, data: &[u8], opts: Option<&HashOpts>) -> Result<Vec<u8>, CspError> {
        let algorithm = opts
            .and_then(|o| o.algorithm)
            .unwrap_or(self.default_hash);
        Ok(digest(algorithm, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::sha256;

    #[test]
    fn rng_returns_requested_length() {
        let csp = SoftwareCsp::default();
        assert_eq!(csp.rng(24, None).unwrap().len(), 24);
        assert_eq!(csp.rng(1, Some(&RngOpts)).unwrap().len(), 1);
    }

    #[test]
    fn rng_rejects_zero_length() {
        let csp = SoftwareCsp::default();
        match csp.rng(0, None) {
            Err(CspError::Unsupported(_)) => {}
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    #[test]
    fn consecutive_rng_calls_differ() {
        let csp = SoftwareCsp::default();
        assert_ne!(csp.rng(24, None).unwrap(), csp.rng(24, None).unwrap());
    }

    #[test]
    fn hash_defaults_to_configured_algorithm() {
        let csp = SoftwareCsp::default();
        assert_eq!(csp.hash(b"quill", None).unwrap(), sha256(b"quill"));

        let blake = SoftwareCsp::new(&CspConfig {
            hash_algorithm: HashAlgorithm::Blake3,
        });
        assert_eq!(blake.default_hash(), HashAlgorithm::Blake3);
        assert_ne!(blake.hash(b"quill", None).unwrap(), sha256(b"quill"));
    }

    #[test]
    fn hash_opts_override_default() {
        let csp = SoftwareCsp::new(&CspConfig {
            hash_algorithm: HashAlgorithm::Blake3,
        });
        let opts = HashOpts::with_algorithm(HashAlgorithm::Sha256);
        assert_eq!(csp.hash(b"quill", Some(&opts)).unwrap(), sha256(b"quill"));
    }

    #[test]
    fn blake3_provider_matches_known_vector() {
        let csp = SoftwareCsp::new(&CspConfig {
            hash_algorithm: HashAlgorithm::Blake3,
        });
        assert_eq!(
            hex::encode(csp.hash(b"", None).unwrap()),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn config_parses_from_json() {
        let cfg: CspConfig = serde_json::from_str(r#"{"hash_algorithm":"blake3"}"#).unwrap();
        assert_eq!(cfg.hash_algorithm, HashAlgorithm::Blake3);
        let empty: CspConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, CspConfig::default());
    }
}
