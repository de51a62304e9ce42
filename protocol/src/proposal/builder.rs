//! Proposal construction and signing.
//!
//! The normal client entry point is [`create_proposal_with_transient`]: it
//! draws the nonce and derives the tx id itself, so the two can never drift
//! apart. [`build_smart_contract_proposal`] exists for callers that already
//! hold a matching (tx id, nonce) pair.

use std::collections::BTreeMap;

use tracing::debug;

use crate::codec;
use crate::config::{DEFAULT_EPOCH, DEFAULT_HEADER_VERSION};
use crate::envelope::header::build_header;
use crate::envelope::nonce::NonceSource;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::identity::SigningIdentity;
use crate::messages::{
    HeaderType, Proposal, SignedProposal, SmartContractHeaderExtension,
    SmartContractInvocationSpec, SmartContractProposalPayload,
};

/// Client-private name/bytes pairs passed to an invocation.
pub type TransientMap = BTreeMap<String, Vec<u8>>;

/// Wraps an invocation spec (encoded verbatim as `input`) and an optional
/// transient map.
pub fn build_proposal_payload(
    invocation_spec: &SmartContractInvocationSpec,
    transient_map: Option<&TransientMap>,
) -> EnvelopeResult<SmartContractProposalPayload> {
    Ok(SmartContractProposalPayload {
        input: codec::encode(invocation_spec)?,
        transient_map: transient_map.cloned().unwrap_or_default(),
    })
}

/// Builds an unsigned proposal from a caller-supplied tx id and nonce.
///
/// The group header carries a [`SmartContractHeaderExtension`] naming the
/// target contract; version and epoch are the protocol defaults.
pub fn build_smart_contract_proposal(
    header_type: HeaderType,
    group_id: &str,
    tx_id: &str,
    invocation_spec: &SmartContractInvocationSpec,
    nonce: &[u8],
    creator: &[u8],
    transient_map: Option<&TransientMap>,
) -> EnvelopeResult<Proposal> {
    let extension = SmartContractHeaderExtension {
        smart_contract_id: invocation_spec.smart_contract_id().cloned(),
    };
    let header = build_header(
        header_type,
        DEFAULT_HEADER_VERSION,
        group_id,
        tx_id,
        DEFAULT_EPOCH,
        Some(codec::encode(&extension)?),
        Some(creator),
        Some(nonce),
    )?;
    let payload = build_proposal_payload(invocation_spec, transient_map)?;

    Ok(Proposal {
        header: codec::encode(&header)?,
        payload: codec::encode(&payload)?,
    })
}

/// Builds an unsigned proposal with a fresh nonce and the tx id derived
/// from it.
pub fn create_proposal_with_transient(
    header_type: HeaderType,
    group_id: &str,
    invocation_spec: &SmartContractInvocationSpec,
    creator: &[u8],
    transient_map: Option<&TransientMap>,
    nonces: &NonceSource,
) -> EnvelopeResult<Proposal> {
    if creator.is_empty() {
        return Err(EnvelopeError::InvalidArgument(
            "proposal creator is empty".into(),
        ));
    }
    let nonce = nonces.generate_nonce()?;
    let tx_id = nonces.compute_tx_id(creator, &nonce)?;
    debug!(tx_id = %tx_id, group_id = %group_id, "creating proposal");
    build_smart_contract_proposal(
        header_type,
        group_id,
        &tx_id,
        invocation_spec,
        &nonce,
        creator,
        transient_map,
    )
}

/// [`create_proposal_with_transient`] without transient data.
pub fn create_proposal_from_invocation_spec(
    header_type: HeaderType,
    group_id: &str,
    invocation_spec: &SmartContractInvocationSpec,
    creator: &[u8],
    nonces: &NonceSource,
) -> EnvelopeResult<Proposal> {
    create_proposal_with_transient(header_type, group_id, invocation_spec, creator, None, nonces)
}

/// Signs the encoded proposal.
pub fn build_signed_proposal(
    proposal: &Proposal,
    identity: &dyn SigningIdentity,
) -> EnvelopeResult<SignedProposal> {
    let proposal_bytes = codec::encode(proposal)?;
    let signature = identity
        .sign(&proposal_bytes)
        .map_err(EnvelopeError::from_signing)?;
    Ok(SignedProposal {
        proposal_bytes,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NONCE_LENGTH;
    use crate::crypto::SoftwareCsp;
    use crate::identity::{Ed25519Verifier, IdentityError, LocalIdentity, SignatureVerifier};
    use crate::messages::SmartContractId;
    use std::sync::Arc;

    fn nonces() -> NonceSource {
        NonceSource::new(Arc::new(SoftwareCsp::default()))
    }

    fn spec() -> SmartContractInvocationSpec {
        SmartContractInvocationSpec::invoke("mycc", ["invoke", "a", "b", "10"])
    }

    fn transient() -> TransientMap {
        let mut map = TransientMap::new();
        map.insert("secret".into(), b"shh".to_vec());
        map.insert("price".into(), vec![0, 1, 2]);
        map
    }

    #[test]
    fn payload_copies_spec_and_transient_entries() {
        let payload = build_proposal_payload(&spec(), Some(&transient())).unwrap();
        let decoded: SmartContractInvocationSpec = codec::decode(&payload.input).unwrap();
        assert_eq!(decoded, spec());
        assert_eq!(payload.transient_map, transient());
    }

    #[test]
    fn payload_without_transient_has_empty_map() {
        let payload = build_proposal_payload(&spec(), None).unwrap();
        assert!(payload.transient_map.is_empty());
    }

    #[test]
    fn transient_insertion_order_does_not_matter() {
        let mut reversed = TransientMap::new();
        reversed.insert("price".into(), vec![0, 1, 2]);
        reversed.insert("secret".into(), b"shh".to_vec());
        assert_eq!(
            codec::encode(&build_proposal_payload(&spec(), Some(&transient())).unwrap()).unwrap(),
            codec::encode(&build_proposal_payload(&spec(), Some(&reversed)).unwrap()).unwrap()
        );
    }

    #[test]
    fn proposal_header_names_contract_and_keeps_tx_id() {
        let proposal = build_smart_contract_proposal(
            HeaderType::EndorserTransaction,
            "mygroup",
            "tx-1",
            &spec(),
            b"nonce",
            b"creator",
            None,
        )
        .unwrap();

        let gh = proposal.group_header().unwrap();
        assert_eq!(gh.kind(), Some(HeaderType::EndorserTransaction));
        assert_eq!(gh.version, DEFAULT_HEADER_VERSION);
        assert_eq!(gh.epoch, DEFAULT_EPOCH);
        assert_eq!(gh.tx_id.as_deref(), Some("tx-1"));

        let ext = proposal.header_extension().unwrap();
        assert_eq!(
            ext.smart_contract_id,
            Some(SmartContractId {
                name: "mycc".into(),
                ..Default::default()
            })
        );

        let sh = proposal.signature_header().unwrap();
        assert_eq!(sh.creator.as_deref(), Some(&b"creator"[..]));
        assert_eq!(sh.nonce.as_deref(), Some(&b"nonce"[..]));
    }

    #[test]
    fn created_proposal_tx_id_matches_its_nonce_and_creator() {
        let nonces = nonces();
        let creator = LocalIdentity::generate("Org1MSP").serialize_identity().unwrap();
        let proposal = create_proposal_with_transient(
            HeaderType::EndorserTransaction,
            "mygroup",
            &spec(),
            &creator,
            Some(&transient()),
            &nonces,
        )
        .unwrap();

        let sh = proposal.signature_header().unwrap();
        let nonce = sh.nonce.unwrap();
        assert_eq!(nonce.len(), NONCE_LENGTH);
        let expected = nonces.compute_tx_id(&creator, &nonce).unwrap();
        assert_eq!(proposal.tx_id().unwrap(), Some(expected));
        assert_eq!(proposal.decode_payload().unwrap().transient_map, transient());
    }

    #[test]
    fn each_created_proposal_has_its_own_tx_id() {
        let nonces = nonces();
        let a = create_proposal_from_invocation_spec(
            HeaderType::EndorserTransaction,
            "g",
            &spec(),
            b"creator",
            &nonces,
        )
        .unwrap();
        let b = create_proposal_from_invocation_spec(
            HeaderType::EndorserTransaction,
            "g",
            &spec(),
            b"creator",
            &nonces,
        )
        .unwrap();
        assert_ne!(a.tx_id().unwrap(), b.tx_id().unwrap());
    }

    #[test]
    fn empty_creator_is_rejected() {
        match create_proposal_from_invocation_spec(
            HeaderType::EndorserTransaction,
            "g",
            &spec(),
            b"",
            &nonces(),
        ) {
            Err(EnvelopeError::InvalidArgument(_)) => {}
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn signed_proposal_verifies() {
        let identity = LocalIdentity::generate("Org1MSP");
        let creator = identity.serialize_identity().unwrap();
        let proposal = create_proposal_from_invocation_spec(
            HeaderType::EndorserTransaction,
            "g",
            &spec(),
            &creator,
            &nonces(),
        )
        .unwrap();
        let signed = build_signed_proposal(&proposal, &identity).unwrap();
        assert_eq!(signed.proposal_bytes, codec::encode(&proposal).unwrap());
        assert!(Ed25519Verifier
            .verify(&creator, &signed.proposal_bytes, &signed.signature)
            .is_ok());
    }

    struct LockedIdentity;

    impl SigningIdentity for LockedIdentity {
        fn serialize_identity(&self) -> Result<Vec<u8>, IdentityError> {
            Ok(b"locked".to_vec())
        }

        fn sign(&self, _: &[u8]) -> Result<Vec<u8>, IdentityError> {
            Err(IdentityError::Signing("key revoked".into()))
        }
    }

    #[test]
    fn signing_refusal_is_signing_failed() {
        match build_signed_proposal(&Proposal::default(), &LockedIdentity) {
            Err(EnvelopeError::SigningFailed(msg)) => assert!(msg.contains("revoked")),
            other => panic!("expected SigningFailed, got {:?}", other),
        }
    }
}
