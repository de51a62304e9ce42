//! Transaction assembly.
//!
//! [`assemble_transaction`] is the join point after endorsement collection:
//! one proposal plus the responses of every endorser that simulated it,
//! folded into a single signed `EndorserTransaction` envelope.
//!
//! Endorsers that ran the same proposal must report bit-identical response
//! payloads. Any divergence, any rejecting endorser, or any malformed part
//! aborts assembly; nothing is returned half-built and nothing is retried.

use tracing::{debug, warn};

use crate::codec;
use crate::config::is_success_status;
use crate::envelope::signer::sign;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::identity::SigningIdentity;
use crate::messages::{
    Envelope, Payload, Proposal, ProposalResponse, SmartContractActionPayload,
    SmartContractEndorsedAction, Transaction, TransactionAction,
};

/// Folds `responses` into a transaction for `proposal` and signs it with
/// `identity`, which must be the proposal's creator.
///
/// Endorsements keep the order of `responses`.
pub fn assemble_transaction(
    proposal: &Proposal,
    identity: &dyn SigningIdentity,
    responses: &[ProposalResponse],
) -> EnvelopeResult<Envelope> {
    if responses.is_empty() {
        return Err(EnvelopeError::InvalidArgument(
            "at least one proposal response is required".into(),
        ));
    }
    if proposal.header.is_empty() || proposal.payload.is_empty() {
        return Err(EnvelopeError::InvalidArgument(
            "proposal carries no header or payload".into(),
        ));
    }

    let header = proposal.decode_header()?;
    let signature_header = proposal.signature_header()?;
    let tx_id = proposal.group_header()?.tx_id.unwrap_or_default();

    let own_identity = identity
        .serialize_identity()
        .map_err(EnvelopeError::from_identity)?;
    if signature_header.creator.as_deref() != Some(own_identity.as_slice()) {
        warn!("assembling identity is not the proposal creator");
        return Err(EnvelopeError::CreatorMismatch);
    }

    let mut proposal_payload = proposal.decode_payload()?;
    // Only checked for presence and shape; the contract id is already bound
    // into the header bytes copied below.
    proposal.header_extension()?;

    let action = collect_endorsements(responses)?;

    proposal_payload.transient_map.clear();
    let action_payload = SmartContractActionPayload {
        smart_contract_proposal_payload: codec::encode(&proposal_payload)?,
        action: Some(action),
    };

    let transaction = Transaction {
        actions: vec![TransactionAction {
            header: header.signature_header.clone(),
            payload: codec::encode(&action_payload)?,
        }],
    };

    let payload = Payload {
        header: Some(header),
        data: codec::encode(&transaction)?,
    };
    let envelope = sign(&payload, Some(identity))?;

    debug!(
        tx_id = %tx_id,
        endorsements = responses.len(),
        "transaction assembled"
    );
    Ok(envelope)
}

/// Checks every response and gathers the endorsed action.
fn collect_endorsements(responses: &[ProposalResponse]) -> EnvelopeResult<SmartContractEndorsedAction> {
    let mut action = SmartContractEndorsedAction::default();

    for (index, proposal_response) in responses.iter().enumerate() {
        let response = proposal_response.response.as_ref().ok_or_else(|| {
            EnvelopeError::InvalidArgument(format!("proposal response {} has no response", index))
        })?;
        let endorsement = proposal_response.endorsement.as_ref().ok_or_else(|| {
            EnvelopeError::InvalidArgument(format!("proposal response {} has no endorsement", index))
        })?;

        if !is_success_status(response.status) {
            warn!(
                index,
                status = response.status,
                message = %response.message,
                "endorser rejected proposal"
            );
            return Err(EnvelopeError::EndorserRejected {
                index,
                status: response.status,
                message: response.message.clone(),
            });
        }

        if index == 0 {
            action.proposal_response_payload = response.payload.clone();
        } else if response.payload != action.proposal_response_payload {
            warn!(index, "endorsement payload diverges from the first endorser");
            return Err(EnvelopeError::EndorsementMismatch { index });
        }

        action.endorsements.push(endorsement.clone());
    }

    Ok(action)
}
