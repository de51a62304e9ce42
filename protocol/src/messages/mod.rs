//! # Wire Messages
//!
//! Every structure this layer puts on the wire. All of them encode through
//! [`crate::codec`]; field order is part of the protocol and must not change.
//!
//! Wherever an outer signature has to cover an inner message verbatim, the
//! outer message holds the inner one as bytes (`Header::group_header`,
//! `Proposal::payload`, `Envelope::payload`, ...). Those bytes are produced
//! once and never re-derived.
//!
//! ```text
//! common.rs      Timestamp, GroupHeader, SignatureHeader, Header, Payload, Envelope
//! types.rs       HeaderType, PayloadData
//! proposal.rs    invocation specs, Proposal, SignedProposal
//! transaction.rs ProposalResponse, endorsements, Transaction
//! configtx.rs    config tree, ConfigUpdate(Envelope), anchor nodes
//! ```

pub mod common;
pub mod configtx;
pub mod proposal;
pub mod transaction;
pub mod types;

pub use common::{Envelope, GroupHeader, Header, Payload, SignatureHeader, Timestamp};
pub use configtx::{
    AnchorNode, AnchorNodes, Config, ConfigEnvelope, ConfigPolicy, ConfigSignature, ConfigTree,
    ConfigType, ConfigUpdate, ConfigUpdateEnvelope, ConfigValue, Consortium, Policy,
};
pub use proposal::{
    Proposal, SignedProposal, SmartContractHeaderExtension, SmartContractId, SmartContractInput,
    SmartContractInvocationSpec, SmartContractProposalPayload, SmartContractSpec,
};
pub use transaction::{
    Endorsement, ProposalResponse, Response, SmartContractActionPayload,
    SmartContractEndorsedAction, Transaction, TransactionAction,
};
pub use types::{HeaderType, PayloadData};
