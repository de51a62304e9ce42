//! Endorsement production and checking.
//!
//! An endorser signs `response_payload ‖ endorser`, binding its simulation
//! result to its own identity. [`endorse`] is what a local endorser (or a
//! test harness standing in for one) returns for a proposal it accepted.

use tracing::debug;

use crate::config::STATUS_OK;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::identity::{SignatureVerifier, SigningIdentity};
use crate::messages::{Endorsement, ProposalResponse, Response, Timestamp};

/// Version stamped on proposal responses produced here.
pub const PROPOSAL_RESPONSE_VERSION: i32 = 1;

fn endorsed_bytes(response_payload: &[u8], endorser: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(response_payload.len() + endorser.len());
    message.extend_from_slice(response_payload);
    message.extend_from_slice(endorser);
    message
}

/// A successful proposal response carrying `response_payload`, endorsed by
/// `identity`.
pub fn endorse(
    identity: &dyn SigningIdentity,
    response_payload: &[u8],
) -> EnvelopeResult<ProposalResponse> {
    let endorser = identity
        .serialize_identity()
        .map_err(EnvelopeError::from_identity)?;
    let signature = identity
        .sign(&endorsed_bytes(response_payload, &endorser))
        .map_err(EnvelopeError::from_signing)?;
    debug!(payload_len = response_payload.len(), "proposal endorsed");

    Ok(ProposalResponse {
        version: PROPOSAL_RESPONSE_VERSION,
        timestamp: Some(Timestamp::now()),
        response: Some(Response {
            status: STATUS_OK,
            message: String::new(),
            payload: response_payload.to_vec(),
        }),
        endorsement: Some(Endorsement {
            endorser,
            signature,
        }),
    })
}

/// Checks that `endorsement` signs `response_payload` for its endorser.
pub fn verify_endorsement(
    endorsement: &Endorsement,
    response_payload: &[u8],
    verifier: &dyn SignatureVerifier,
) -> EnvelopeResult<()> {
    verifier
        .verify(
            &endorsement.endorser,
            &endorsed_bytes(response_payload, &endorsement.endorser),
            &endorsement.signature,
        )
        .map_err(|e| EnvelopeError::SignatureInvalid(e.to_string()))
}
