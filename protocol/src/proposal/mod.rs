//! # Proposal Module
//!
//! Unsigned smart-contract invocation proposals, their signed wire form,
//! and read access to their parts for endorsers and the assembler.

pub mod builder;
pub mod decode;

pub use builder::{
    build_proposal_payload, build_signed_proposal, build_smart_contract_proposal,
    create_proposal_from_invocation_spec, create_proposal_with_transient, TransientMap,
};
pub use decode::verify_signed_proposal;
