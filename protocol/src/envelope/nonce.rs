//! Anti-replay nonces and transaction ids.
//!
//! A transaction id is `hex(hash(nonce ‖ creator))`. It is always recomputed
//! from the pair that ends up in the signature header, so a header can never
//! carry an id that disagrees with its own nonce and creator.

use std::fmt;
use std::sync::Arc;

use crate::config::NONCE_LENGTH;
use crate::crypto::Csp;
use crate::error::EnvelopeResult;

/// Nonce and tx-id source backed by a crypto provider.
#[derive(Clone)]
pub struct NonceSource {
    csp: Arc<dyn Csp>,
}

impl NonceSource {
    pub fn new(csp: Arc<dyn Csp>) -> Self {
        Self { csp }
    }

    pub fn csp(&self) -> &dyn Csp {
        self.csp.as_ref()
    }

    /// Fresh `NONCE_LENGTH` random bytes. Never cached.
    pub fn generate_nonce(&self) -> EnvelopeResult<Vec<u8>> {
        Ok(self.csp.rng(NONCE_LENGTH, None)?)
    }

    /// `hex(hash(nonce ‖ creator))`. Deterministic in its inputs.
    pub fn compute_tx_id(&self, creator: &[u8], nonce: &[u8]) -> EnvelopeResult<String> {
        let mut preimage = Vec::with_capacity(nonce.len() + creator.len());
        preimage.extend_from_slice(nonce);
        preimage.extend_from_slice(creator);
        let digest = self.csp.hash(&preimage, None)?;
        Ok(hex::encode(digest))
    }
}

impl fmt::Debug for NonceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonceSource").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::sha256;
    use crate::crypto::{CspError, HashOpts, RngOpts, SoftwareCsp};
    use crate::error::EnvelopeError;

    fn source() -> NonceSource {
        NonceSource::new(Arc::new(SoftwareCsp::default()))
    }

    struct BrokenCsp;

    impl Csp for BrokenCsp {
        fn rng(&self, _: usize, _: Option<&RngOpts>) -> Result<Vec<u8>, CspError> {
            Err(CspError::Rng("entropy pool closed".into()))
        }

        fn hash(&self, _: &[u8], _: Option<&HashOpts>) -> Result<Vec<u8>, CspError> {
            Err(CspError::Hash("hasher offline".into()))
        }
    }

    #[test]
    fn nonce_has_fixed_length() {
        assert_eq!(source().generate_nonce().unwrap().len(), NONCE_LENGTH);
    }

    #[test]
    fn nonces_are_not_reused() {
        let src = source();
        assert_ne!(src.generate_nonce().unwrap(), src.generate_nonce().unwrap());
    }

    #[test]
    fn tx_id_is_hex_of_hash_of_nonce_then_creator() {
        let tx_id = source().compute_tx_id(b"creator", b"nonce").unwrap();
        assert_eq!(tx_id, hex::encode(sha256(b"noncecreator")));
    }

    #[test]
    fn tx_id_is_deterministic() {
        let src = source();
        let nonce = src.generate_nonce().unwrap();
        assert_eq!(
            src.compute_tx_id(b"alice", &nonce).unwrap(),
            src.compute_tx_id(b"alice", &nonce).unwrap()
        );
    }

    #[test]
    fn single_bit_flip_changes_tx_id() {
        let src = source();
        let creator = b"alice@Org1MSP".to_vec();
        let nonce = vec![0x55u8; NONCE_LENGTH];
        let base = src.compute_tx_id(&creator, &nonce).unwrap();

        let mut flipped_nonce = nonce.clone();
        flipped_nonce[7] ^= 0x01;
        assert_ne!(base, src.compute_tx_id(&creator, &flipped_nonce).unwrap());

        let mut flipped_creator = creator.clone();
        flipped_creator[0] ^= 0x80;
        assert_ne!(base, src.compute_tx_id(&flipped_creator, &nonce).unwrap());
    }

    #[test]
    fn provider_failures_are_crypto_unavailable() {
        let src = NonceSource::new(Arc::new(BrokenCsp));
        match src.generate_nonce() {
            Err(EnvelopeError::CryptoUnavailable(msg)) => assert!(msg.contains("entropy")),
            other => panic!("expected CryptoUnavailable, got {:?}", other),
        }
        match src.compute_tx_id(b"c", b"n") {
            Err(EnvelopeError::CryptoUnavailable(_)) => {}
            other => panic!("expected CryptoUnavailable, got {:?}", other),
        }
    }
}
