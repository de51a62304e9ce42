//! # Transaction Module
//!
//! Turning endorsed proposals into committable transactions.
//!
//! ```text
//! endorsement.rs Endorsement production and verification
//! assembler.rs   Proposal + N responses into one signed transaction envelope
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Propose**: the client builds and signs a proposal
//!    (see [`crate::proposal`]).
//! 2. **Endorse**: each endorser simulates it and returns a response with
//!    an [`endorse`]ment.
//! 3. **Assemble**: the client calls [`assemble_transaction`] once every
//!    response is in.
//! 4. **Submit**: the resulting envelope goes to ordering, outside this crate.
//!
//! ## Design Decisions
//!
//! - The transaction action header is the proposal's signature header,
//!   copied byte for byte. Creator, nonce and tx id stay linked from proposal
//!   to committed transaction.
//! - The transient map never reaches the committed transaction.
//! - Status `0` (unset) and `200` (OK) are the only accepted endorser
//!   statuses.

pub mod assembler;
pub mod endorsement;

pub use assembler::assemble_transaction;
pub use endorsement::{endorse, verify_endorsement};
