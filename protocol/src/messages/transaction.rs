//! Endorsement responses and the committed transaction they assemble into.

use serde::{Deserialize, Serialize};

use super::common::Timestamp;

/// Result of simulating a proposal on one endorser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: i32,
    pub message: String,
    pub payload: Vec<u8>,
}

/// An endorser's signature over its response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endorsement {
    /// Serialized identity of the endorser.
    pub endorser: Vec<u8>,
    pub signature: Vec<u8>,
}

/// What one endorser returns for a proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub version: i32,
    pub timestamp: Option<Timestamp>,
    pub response: Option<Response>,
    pub endorsement: Option<Endorsement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractEndorsedAction {
    /// Response payload every endorser agreed on.
    pub proposal_response_payload: Vec<u8>,
    /// Endorsements in the order the responses were supplied.
    pub endorsements: Vec<Endorsement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractActionPayload {
    /// Encoded proposal payload with its transient map cleared.
    pub smart_contract_proposal_payload: Vec<u8>,
    pub action: Option<SmartContractEndorsedAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAction {
    /// Signature header bytes copied from the originating proposal.
    pub header: Vec<u8>,
    /// Encoded [`SmartContractActionPayload`].
    pub payload: Vec<u8>,
}

/// Body of an `EndorserTransaction` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub actions: Vec<TransactionAction>,
}
