//! Read access to the parts of a proposal.
//!
//! Every failure here is `MalformedProposal`: once a proposal has left its
//! creator, any part that does not decode means the proposal as a whole is
//! unusable.

use tracing::error;

use crate::codec;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::identity::SignatureVerifier;
use crate::messages::{
    GroupHeader, Header, Proposal, SignatureHeader, SignedProposal, SmartContractHeaderExtension,
    SmartContractProposalPayload,
};

fn malformed<T: serde::de::DeserializeOwned>(bytes: &[u8], part: &str) -> EnvelopeResult<T> {
    codec::decode(bytes).map_err(|e| {
        error!(part = part, error = %e, "proposal part does not decode");
        EnvelopeError::MalformedProposal(format!("{}: {}", part, e))
    })
}

impl Proposal {
    pub fn decode_header(&self) -> EnvelopeResult<Header> {
        malformed(&self.header, "header")
    }

    pub fn group_header(&self) -> EnvelopeResult<GroupHeader> {
        malformed(&self.decode_header()?.group_header, "group header")
    }

    pub fn signature_header(&self) -> EnvelopeResult<SignatureHeader> {
        malformed(&self.decode_header()?.signature_header, "signature header")
    }

    pub fn decode_payload(&self) -> EnvelopeResult<SmartContractProposalPayload> {
        malformed(&self.payload, "payload")
    }

    /// The smart-contract extension of the group header. A header without
    /// one is malformed for a contract proposal.
    pub fn header_extension(&self) -> EnvelopeResult<SmartContractHeaderExtension> {
        let extension = self.group_header()?.extension.ok_or_else(|| {
            EnvelopeError::MalformedProposal("group header carries no extension".into())
        })?;
        malformed(&extension, "header extension")
    }

    /// The tx id stamped in the group header, if any.
    pub fn tx_id(&self) -> EnvelopeResult<Option<String>> {
        Ok(self.group_header()?.tx_id)
    }
}

impl SignedProposal {
    pub fn decode_proposal(&self) -> EnvelopeResult<Proposal> {
        malformed(&self.proposal_bytes, "proposal bytes")
    }
}

/// Checks a signed proposal against the creator in its own signature
/// header and returns the decoded proposal.
pub fn verify_signed_proposal(
    signed: &SignedProposal,
    verifier: &dyn SignatureVerifier,
) -> EnvelopeResult<Proposal> {
    let proposal = signed.decode_proposal()?;
    let creator = proposal.signature_header()?.creator.ok_or_else(|| {
        EnvelopeError::MalformedProposal("signature header names no creator".into())
    })?;
    verifier
        .verify(&creator, &signed.proposal_bytes, &signed.signature)
        .map_err(|e| EnvelopeError::SignatureInvalid(e.to_string()))?;
    Ok(proposal)
}
