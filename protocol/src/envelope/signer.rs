//! Envelope signing, verification and reading.
//!
//! Signing freezes a payload: it is encoded once, the identity signs those
//! exact bytes, and the envelope keeps the same buffer. Nothing downstream
//! re-encodes a payload that has already been signed.

use std::path::Path;

use tracing::{debug, error, warn};

use super::header::GroupHeaderBuilder;
use super::nonce::NonceSource;
use super::payload::{build_payload, check_body_matches, decode_payload};
use crate::codec;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::identity::{LocalSigner, SignatureVerifier, SigningIdentity};
use crate::messages::{
    ConfigEnvelope, ConfigUpdateEnvelope, Envelope, Header, HeaderType, Payload, PayloadData,
};

/// Encodes `payload` and signs the encoded bytes.
///
/// Without an identity the envelope comes back unsigned (empty signature).
/// Callers treat that as "unsigned", never as "verification failed".
pub fn sign(payload: &Payload, identity: Option<&dyn SigningIdentity>) -> EnvelopeResult<Envelope> {
    let payload_bytes = codec::encode(payload)?;
    let signature = match identity {
        Some(identity) => identity
            .sign(&payload_bytes)
            .map_err(EnvelopeError::from_signing)?,
        None => {
            warn!("no identity supplied, envelope left unsigned");
            Vec::new()
        }
    };
    debug!(
        payload_len = payload_bytes.len(),
        signed = !signature.is_empty(),
        "envelope sealed"
    );
    Ok(Envelope {
        payload: payload_bytes,
        signature,
    })
}

/// Builds and signs an envelope on behalf of a [`LocalSigner`].
///
/// With a signer this is [`seal_as`] with the signer's identity and nonce
/// source. Without one the payload carries only
/// a group header and the envelope is unsigned.
pub fn build_signed_envelope(
    header_type: HeaderType,
    version: i32,
    group_id: &str,
    signer: Option<&LocalSigner>,
    data: Option<&PayloadData>,
    epoch: u64,
) -> EnvelopeResult<Envelope> {
    match signer {
        Some(signer) => seal_as(
            header_type,
            version,
            group_id,
            signer.identity(),
            signer.nonces(),
            data,
            epoch,
        ),
        None => {
            if let Some(body) = data {
                check_body_matches(header_type, body)?;
            }
            let group_header = GroupHeaderBuilder::new(header_type)
                .version(version)
                .group_id(group_id)
                .epoch(epoch)
                .build();
            let payload = Payload {
                header: Some(Header {
                    group_header: codec::encode(&group_header)?,
                    signature_header: Vec::new(),
                }),
                data: data.map(PayloadData::encode).transpose()?.unwrap_or_default(),
            };
            sign(&payload, None)
        }
    }
}

/// Builds a payload whose signature header names `identity` (with a fresh
/// nonce from `nonces`) and signs it with that same identity.
pub fn seal_as(
    header_type: HeaderType,
    version: i32,
    group_id: &str,
    identity: &dyn SigningIdentity,
    nonces: &NonceSource,
    data: Option<&PayloadData>,
    epoch: u64,
) -> EnvelopeResult<Envelope> {
    let payload = build_payload(
        header_type,
        version,
        group_id,
        Some(identity),
        data,
        epoch,
        nonces,
    )?;
    sign(&payload, Some(identity))
}

/// Replaces the signature of `envelope` with one from `identity`. The
/// payload bytes are carried over untouched.
pub fn re_sign(envelope: &Envelope, identity: &dyn SigningIdentity) -> EnvelopeResult<Envelope> {
    if envelope.payload.is_empty() {
        return Err(EnvelopeError::MissingPayload);
    }
    let signature = identity
        .sign(&envelope.payload)
        .map_err(EnvelopeError::from_signing)?;
    Ok(Envelope {
        payload: envelope.payload.clone(),
        signature,
    })
}

/// Checks the envelope signature against the creator named in its own
/// signature header.
pub fn verify_envelope(envelope: &Envelope, verifier: &dyn SignatureVerifier) -> EnvelopeResult<()> {
    if !envelope.is_signed() {
        return Err(EnvelopeError::SignatureInvalid("envelope is unsigned".into()));
    }
    let payload = decode_payload(&envelope.payload)?;
    let creator = payload
        .signature_header()?
        .creator
        .ok_or_else(|| EnvelopeError::SignatureInvalid("signature header names no creator".into()))?;
    verifier
        .verify(&creator, &envelope.payload, &envelope.signature)
        .map_err(|e| {
            warn!(error = %e, "envelope signature rejected");
            EnvelopeError::SignatureInvalid(e.to_string())
        })
}

/// Decodes an envelope from wire bytes.
pub fn read_envelope_from_bytes(bytes: &[u8]) -> EnvelopeResult<Envelope> {
    codec::decode(bytes).map_err(|e| {
        error!(error = %e, len = bytes.len(), "envelope does not decode");
        EnvelopeError::MalformedEnvelope(e.to_string())
    })
}

/// Reads and decodes an envelope file.
pub fn read_envelope_from_file(path: impl AsRef<Path>) -> EnvelopeResult<Envelope> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| {
        error!(path = %path.display(), error = %source, "cannot read envelope file");
        EnvelopeError::IoUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    read_envelope_from_bytes(&bytes)
}

fn typed_body(envelope: &Envelope, expected: HeaderType) -> EnvelopeResult<PayloadData> {
    if envelope.payload.is_empty() {
        return Err(EnvelopeError::MissingPayload);
    }
    let payload = decode_payload(&envelope.payload)?;
    let group_header = payload.group_header()?;
    if group_header.kind() != Some(expected) {
        return Err(EnvelopeError::WrongHeaderType {
            expected: expected.to_string(),
            actual: HeaderType::describe(group_header.header_type),
        });
    }
    payload.decode_data()
}

/// Extracts the [`ConfigEnvelope`] body of a `Config` envelope.
pub fn config_envelope_from(envelope: &Envelope) -> EnvelopeResult<ConfigEnvelope> {
    match typed_body(envelope, HeaderType::Config)? {
        PayloadData::Config(body) => Ok(body),
        other => Err(EnvelopeError::WrongHeaderType {
            expected: HeaderType::Config.to_string(),
            actual: other.header_type().to_string(),
        }),
    }
}

/// Extracts the [`ConfigUpdateEnvelope`] body of a `ConfigUpdate` envelope.
pub fn config_update_envelope_from(envelope: &Envelope) -> EnvelopeResult<ConfigUpdateEnvelope> {
    match typed_body(envelope, HeaderType::ConfigUpdate)? {
        PayloadData::ConfigUpdate(body) => Ok(body),
        other => Err(EnvelopeError::WrongHeaderType {
            expected: HeaderType::ConfigUpdate.to_string(),
            actual: other.header_type().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SoftwareCsp;
    use crate::identity::{Ed25519Verifier, IdentityError, LocalIdentity};
    use crate::messages::{Config, Transaction};
    use std::io::Write;
    use std::sync::Arc;

    fn nonces() -> NonceSource {
        NonceSource::new(Arc::new(SoftwareCsp::default()))
    }

    fn local_signer(identity: &LocalIdentity) -> LocalSigner {
        LocalSigner::new(Arc::new(identity.clone()), nonces())
    }

    struct RefusingIdentity;

    impl SigningIdentity for RefusingIdentity {
        fn serialize_identity(&self) -> Result<Vec<u8>, IdentityError> {
            Ok(b"refuser".to_vec())
        }

        fn sign(&self, _: &[u8]) -> Result<Vec<u8>, IdentityError> {
            Err(IdentityError::Signing("hsm locked".into()))
        }
    }

    fn signed_envelope(identity: &LocalIdentity) -> Envelope {
        let payload = build_payload(
            HeaderType::Message,
            0,
            "mygroup",
            Some(identity),
            None,
            0,
            &nonces(),
        )
        .unwrap();
        sign(&payload, Some(identity)).unwrap()
    }

    #[test]
    fn signature_covers_exact_payload_bytes() {
        let identity = LocalIdentity::generate("Org1MSP");
        let env = signed_envelope(&identity);
        let creator = identity.serialize_identity().unwrap();
        assert!(Ed25519Verifier
            .verify(&creator, &env.payload, &env.signature)
            .is_ok());
    }

    #[test]
    fn seal_as_names_and_signs_with_the_same_identity() {
        let identity = LocalIdentity::generate("Org1MSP");
        let env = seal_as(HeaderType::Message, 2, "g", &identity, &nonces(), None, 9).unwrap();
        assert!(verify_envelope(&env, &Ed25519Verifier).is_ok());

        let payload = decode_payload(&env.payload).unwrap();
        let group_header = payload.group_header().unwrap();
        assert_eq!((group_header.version, group_header.epoch), (2, 9));
        assert_eq!(
            payload.signature_header().unwrap().creator,
            Some(identity.serialize_identity().unwrap())
        );
    }

    #[test]
    fn no_identity_means_unsigned() {
        let payload = Payload::default();
        let env = sign(&payload, None).unwrap();
        assert!(!env.is_signed());
        assert_eq!(env.payload, codec::encode(&payload).unwrap());
    }

    #[test]
    fn signer_refusal_is_signing_failed() {
        match sign(&Payload::default(), Some(&RefusingIdentity)) {
            Err(EnvelopeError::SigningFailed(msg)) => assert!(msg.contains("hsm locked")),
            other => panic!("expected SigningFailed, got {:?}", other),
        }
    }

    #[test]
    fn wire_round_trip_preserves_payload_bytes() {
        let identity = LocalIdentity::generate("Org1MSP");
        let env = signed_envelope(&identity);
        let wire = codec::encode(&env).unwrap();
        let back = read_envelope_from_bytes(&wire).unwrap();
        assert_eq!(back.payload, env.payload);
        assert_eq!(back.signature, env.signature);
    }

    #[test]
    fn read_from_file_round_trip() {
        let identity = LocalIdentity::generate("Org1MSP");
        let env = signed_envelope(&identity);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&codec::encode(&env).unwrap()).unwrap();
        assert_eq!(read_envelope_from_file(file.path()).unwrap(), env);
    }

    #[test]
    fn missing_file_is_io_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.env");
        match read_envelope_from_file(&missing) {
            Err(EnvelopeError::IoUnavailable { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected IoUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn garbage_bytes_are_malformed_envelope() {
        match read_envelope_from_bytes(b"definitely not an envelope") {
            Err(EnvelopeError::MalformedEnvelope(_)) => {}
            other => panic!("expected MalformedEnvelope, got {:?}", other),
        }
    }

    #[test]
    fn verify_accepts_own_signature_and_rejects_tampering() {
        let identity = LocalIdentity::generate("Org1MSP");
        let env = signed_envelope(&identity);
        assert!(verify_envelope(&env, &Ed25519Verifier).is_ok());

        let mut tampered = env.clone();
        tampered.signature[0] ^= 0x01;
        match verify_envelope(&tampered, &Ed25519Verifier) {
            Err(EnvelopeError::SignatureInvalid(_)) => {}
            other => panic!("expected SignatureInvalid, got {:?}", other),
        }
    }

    #[test]
    fn verify_rejects_unsigned() {
        let env = sign(&Payload::default(), None).unwrap();
        match verify_envelope(&env, &Ed25519Verifier) {
            Err(EnvelopeError::SignatureInvalid(msg)) => assert!(msg.contains("unsigned")),
            other => panic!("expected SignatureInvalid, got {:?}", other),
        }
    }

    #[test]
    fn re_sign_keeps_payload_and_swaps_signer() {
        let alice = LocalIdentity::generate("Org1MSP");
        let bob = LocalIdentity::generate("Org2MSP");
        let env = signed_envelope(&alice);
        let resigned = re_sign(&env, &bob).unwrap();
        assert_eq!(resigned.payload, env.payload);
        assert_ne!(resigned.signature, env.signature);

        let bob_creator = bob.serialize_identity().unwrap();
        assert!(Ed25519Verifier
            .verify(&bob_creator, &resigned.payload, &resigned.signature)
            .is_ok());
    }

    #[test]
    fn re_sign_rejects_empty_payload() {
        let identity = LocalIdentity::generate("Org1MSP");
        match re_sign(&Envelope::default(), &identity) {
            Err(EnvelopeError::MissingPayload) => {}
            other => panic!("expected MissingPayload, got {:?}", other),
        }
    }

    #[test]
    fn legacy_signer_envelope_is_signed_and_typed() {
        let identity = LocalIdentity::generate("Org1MSP");
        let signer = local_signer(&identity);
        let body = PayloadData::from(ConfigUpdateEnvelope {
            config_update: vec![1],
            signatures: Vec::new(),
        });
        let env = build_signed_envelope(
            HeaderType::ConfigUpdate,
            0,
            "mygroup",
            Some(&signer),
            Some(&body),
            0,
        )
        .unwrap();
        assert!(verify_envelope(&env, &Ed25519Verifier).is_ok());
        assert_eq!(config_update_envelope_from(&env).unwrap().config_update, vec![1]);
    }

    #[test]
    fn legacy_path_without_signer_has_no_signature_header() {
        let env = build_signed_envelope(HeaderType::Message, 0, "g", None, None, 0).unwrap();
        assert!(!env.is_signed());
        let payload = decode_payload(&env.payload).unwrap();
        assert!(payload.header.unwrap().signature_header.is_empty());
    }

    #[test]
    fn typed_extraction_checks_header_type() {
        let identity = LocalIdentity::generate("Org1MSP");
        let signer = local_signer(&identity);
        let body = PayloadData::from(crate::messages::ConfigEnvelope {
            config: Some(Config::default()),
            last_update: None,
        });
        let env =
            build_signed_envelope(HeaderType::Config, 0, "g", Some(&signer), Some(&body), 0).unwrap();
        assert!(config_envelope_from(&env).unwrap().config.is_some());
        match config_update_envelope_from(&env) {
            Err(EnvelopeError::WrongHeaderType { expected, actual }) => {
                assert_eq!(expected, "ConfigUpdate");
                assert_eq!(actual, "Config");
            }
            other => panic!("expected WrongHeaderType, got {:?}", other),
        }

        let tx_body = PayloadData::from(Transaction::default());
        let tx_env = build_signed_envelope(
            HeaderType::EndorserTransaction,
            0,
            "g",
            Some(&signer),
            Some(&tx_body),
            0,
        )
        .unwrap();
        assert!(config_envelope_from(&tx_env).is_err());
    }
}
