//! # Cryptographic Service Provider Interface
//!
//! Randomness and hashing for the envelope layer. The layer itself owns no
//! cryptographic algorithm: it asks a [`Csp`] for nonces and digests and an
//! identity (see [`crate::identity`]) for signatures.

pub mod csp;
pub mod hash;

pub use csp::{Csp, CspConfig, CspError, HashOpts, RngOpts, SoftwareCsp};
pub use hash::HashAlgorithm;
