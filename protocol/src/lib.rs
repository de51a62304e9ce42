// Copyright (c) 2026 Quill Ledger Contributors. MIT License.
// See LICENSE for details.

//! # Quill Protocol: Transaction Envelopes
//!
//! The client-side envelope layer of a Quill ledger node. Everything that
//! crosses the wire between clients, endorsers and the ordering service is
//! built, signed and checked here.
//!
//! ## Architecture
//!
//! - **codec**: Canonical binary encoding of every wire message.
//! - **crypto**: The crypto service provider (randomness and hashing).
//! - **identity**: Signing identities and signature verification.
//! - **messages**: Wire message types.
//! - **envelope**: Headers, payloads and signed envelopes.
//! - **proposal**: Smart-contract invocation proposals.
//! - **transaction**: Endorsements and transaction assembly.
//! - **configtx**: Group creation, anchor-node updates and co-signing.
//! - **config**: Protocol constants and well-known config keys.
//!
//! ## Ground Rules
//!
//! 1. Bytes that are signed are never re-encoded. Signatures always cover
//!    the exact buffer that travels.
//! 2. Decoding fails closed. A header type that disagrees with its body is
//!    an error, never a best guess.
//! 3. Nothing here talks to the network or to disk beyond reading envelope
//!    and profile files.

pub mod codec;
pub mod config;
pub mod configtx;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod identity;
pub mod messages;
pub mod proposal;
pub mod transaction;

pub use error::{EnvelopeError, EnvelopeResult};
