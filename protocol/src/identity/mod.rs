//! # Identity Module
//!
//! Who signs, and how a receiver checks it. The envelope layer consumes
//! identities through two narrow traits and ships one default backend.
//!
//! ```text
//! signing.rs SigningIdentity / SignatureVerifier contracts, IdentityError
//! local.rs   LocalIdentity (MSP id + Ed25519 key), Ed25519Verifier
//! signer.rs  LocalSigner: an identity bundled with a nonce source
//! ```
//!
//! There is no process-wide default identity. The node binary loads one at
//! startup and hands it to every call that needs it.

pub mod local;
pub mod signer;
pub mod signing;

pub use local::{Ed25519Verifier, LocalIdentity, SerializedIdentity};
pub use signer::LocalSigner;
pub use signing::{IdentityError, SignatureVerifier, SigningIdentity};
