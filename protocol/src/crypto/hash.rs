//! # Hashing Utilities
//!
//! The digests the software CSP can produce. Two algorithms, no more:
//!
//! - **SHA-256**: the default. Transaction ids derived from it are what
//!   every other node in the fleet recomputes.
//! - **BLAKE3**: available for deployments that configure it fleet-wide.
//!   Mixing algorithms inside one network makes every txid disagree, so the
//!   choice is a network parameter, not a per-call preference.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Digest algorithm selector used by [`super::HashOpts`] and [`super::CspConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => write!(f, "sha256"),
            Self::Blake3 => write!(f, "blake3"),
        }
    }
}

/// Hash a single buffer with the given algorithm. Backs [`super::Csp::hash`]
/// on the software provider.
pub fn digest(algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    hash_parts(algorithm, &[data])
}

/// Hash several byte slices as if they were concatenated, without
/// allocating the concatenation.
///
/// `hash_parts(alg, &[a, b]) == digest(alg, a ‖ b)` for both algorithms.
fn hash_parts(algorithm: HashAlgorithm, parts: &[&[u8]]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            for part in parts {
                hasher.update(part);
            }
            hasher.finalize().to_vec()
        }
        HashAlgorithm::Blake3 => {
            let mut hasher = blake3::Hasher::new();
            for part in parts {
                hasher.update(part);
            }
            hasher.finalize().as_bytes().to_vec()
        }
    }
}

/// SHA-256 shorthand for expected values in tests.
#[cfg(test)]
pub(crate) fn sha256(data: &[u8]) -> Vec<u8> {
    digest(HashAlgorithm::Sha256, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash, expected);
    }

    #[test]
    fn blake3_known_vector() {
        let hash = digest(HashAlgorithm::Blake3, b"");
        assert_eq!(
            hex::encode(hash),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn hash_parts_matches_concatenation() {
        let joined = b"nonce-bytescreator-bytes";
        for alg in [HashAlgorithm::Sha256, HashAlgorithm::Blake3] {
            assert_eq!(
                hash_parts(alg, &[b"nonce-bytes", b"creator-bytes"]),
                digest(alg, joined),
                "{} streaming must equal one-shot",
                alg
            );
        }
    }

    #[test]
    fn algorithms_disagree() {
        assert_ne!(
            digest(HashAlgorithm::Sha256, b"quill"),
            digest(HashAlgorithm::Blake3, b"quill")
        );
    }

    #[test]
    fn default_algorithm_is_sha256() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Sha256);
    }

    #[test]
    fn algorithm_serde_uses_lowercase() {
        let json = serde_json::to_string(&HashAlgorithm::Blake3).unwrap();
        assert_eq!(json, "\"blake3\"");
        let parsed: HashAlgorithm = serde_json::from_str("\"sha256\"").unwrap();
        assert_eq!(parsed, HashAlgorithm::Sha256);
    }
}
