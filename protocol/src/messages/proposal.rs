//! Smart-contract invocation and proposal messages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Names a deployed smart contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractId {
    pub name: String,
    pub version: String,
    pub path: String,
}

/// Arguments for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractInput {
    pub args: Vec<Vec<u8>>,
    pub decorations: BTreeMap<String, Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractSpec {
    /// Runtime kind of the contract (0 = undefined).
    pub contract_type: i32,
    pub smart_contract_id: Option<SmartContractId>,
    pub input: Option<SmartContractInput>,
    pub timeout: i32,
}

/// Client invocation intent, carried verbatim as the proposal input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractInvocationSpec {
    pub smart_contract_spec: Option<SmartContractSpec>,
}

impl SmartContractInvocationSpec {
    /// Convenience for the common case: call `name` with string arguments.
    pub fn invoke<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        Self {
            smart_contract_spec: Some(SmartContractSpec {
                smart_contract_id: Some(SmartContractId {
                    name: name.into(),
                    ..Default::default()
                }),
                input: Some(SmartContractInput {
                    args: args.into_iter().map(|a| a.as_ref().to_vec()).collect(),
                    decorations: BTreeMap::new(),
                }),
                ..Default::default()
            }),
        }
    }

    /// The target contract, if the spec names one.
    pub fn smart_contract_id(&self) -> Option<&SmartContractId> {
        self.smart_contract_spec
            .as_ref()
            .and_then(|spec| spec.smart_contract_id.as_ref())
    }
}

/// Group-header extension for smart-contract messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractHeaderExtension {
    pub smart_contract_id: Option<SmartContractId>,
}

/// Proposal body. The transient map is client-private and never committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractProposalPayload {
    /// Encoded [`SmartContractInvocationSpec`].
    pub input: Vec<u8>,
    pub transient_map: BTreeMap<String, Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Encoded `Header`.
    pub header: Vec<u8>,
    /// Encoded [`SmartContractProposalPayload`].
    pub payload: Vec<u8>,
}

/// Wire form sent to endorsers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedProposal {
    pub proposal_bytes: Vec<u8>,
    pub signature: Vec<u8>,
}
