//! Co-signing of config updates.
//!
//! An administrator receiving a config update from someone else runs it
//! through [`sanity_check_and_sign`] before adding their signature. The
//! checks run in a fixed order and stop at the first failure, so a rejected
//! envelope never gains a signature.

use tracing::{debug, info, warn};

use crate::codec;
use crate::envelope::header::build_signature_header;
use crate::envelope::nonce::NonceSource;
use crate::envelope::payload::decode_payload;
use crate::envelope::signer::seal_as;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::identity::{LocalSigner, SigningIdentity};
use crate::messages::{ConfigSignature, ConfigUpdateEnvelope, Envelope, HeaderType, PayloadData};

/// Appends `identity`'s signature over the enclosed config update.
///
/// The signature covers the encoded signature header (creator plus a fresh
/// nonce from `nonces`) followed by the `config_update` bytes, whatever they
/// are. Existing signatures are kept in order.
pub fn sign_config_update_envelope_with_identity(
    update_envelope: &ConfigUpdateEnvelope,
    identity: &dyn SigningIdentity,
    nonces: &NonceSource,
) -> EnvelopeResult<ConfigUpdateEnvelope> {
    let creator = identity
        .serialize_identity()
        .map_err(EnvelopeError::from_identity)?;
    let nonce = nonces.generate_nonce()?;
    let signature_header = codec::encode(&build_signature_header(Some(&creator), Some(&nonce)))?;

    let mut message =
        Vec::with_capacity(signature_header.len() + update_envelope.config_update.len());
    message.extend_from_slice(&signature_header);
    message.extend_from_slice(&update_envelope.config_update);
    let signature = identity
        .sign(&message)
        .map_err(EnvelopeError::from_signing)?;

    let mut signed = update_envelope.clone();
    signed.signatures.push(ConfigSignature {
        signature_header,
        signature,
    });
    debug!(signatures = signed.signatures.len(), "config update co-signed");
    Ok(signed)
}

/// [`sign_config_update_envelope_with_identity`] for a [`LocalSigner`].
pub fn sign_config_update_envelope(
    update_envelope: &ConfigUpdateEnvelope,
    signer: &LocalSigner,
) -> EnvelopeResult<ConfigUpdateEnvelope> {
    sign_config_update_envelope_with_identity(update_envelope, signer.identity(), signer.nonces())
}

/// Checks that `envelope` is a config update for `expected_group_id`, adds
/// `identity`'s co-signature and re-wraps it in an envelope signed by
/// `identity`.
///
/// The new envelope keeps the original group header's version and epoch
/// but gets a fresh signature header naming `identity`.
pub fn sanity_check_and_sign_with_identity(
    envelope: &Envelope,
    expected_group_id: &str,
    identity: &dyn SigningIdentity,
    nonces: &NonceSource,
) -> EnvelopeResult<Envelope> {
    if envelope.payload.is_empty() {
        return Err(EnvelopeError::MissingPayload);
    }
    let payload = decode_payload(&envelope.payload)?;
    let group_header = payload.group_header()?;

    if group_header.kind() != Some(HeaderType::ConfigUpdate) {
        warn!(header_type = group_header.header_type, "refusing to co-sign non config update");
        return Err(EnvelopeError::WrongHeaderType {
            expected: HeaderType::ConfigUpdate.to_string(),
            actual: HeaderType::describe(group_header.header_type),
        });
    }

    let actual_group = group_header.group_id.clone().unwrap_or_default();
    if actual_group.trim().is_empty() || actual_group != expected_group_id {
        warn!(
            expected = %expected_group_id,
            actual = %actual_group,
            "refusing to co-sign config update for another group"
        );
        return Err(EnvelopeError::GroupIdMismatch {
            expected: expected_group_id.to_string(),
            actual: actual_group,
        });
    }

    let update_envelope = match payload.decode_data()? {
        PayloadData::ConfigUpdate(update_envelope) => update_envelope,
        other => {
            return Err(EnvelopeError::MalformedConfigUpdate(format!(
                "payload decoded as {}",
                other.kind_name()
            )))
        }
    };

    let co_signed = sign_config_update_envelope_with_identity(&update_envelope, identity, nonces)?;
    info!(
        group_id = %expected_group_id,
        signatures = co_signed.signatures.len(),
        "config update sanity checked and co-signed"
    );

    seal_as(
        HeaderType::ConfigUpdate,
        group_header.version,
        expected_group_id,
        identity,
        nonces,
        Some(&PayloadData::ConfigUpdate(co_signed)),
        group_header.epoch,
    )
}

/// [`sanity_check_and_sign_with_identity`] for a [`LocalSigner`].
pub fn sanity_check_and_sign(
    envelope: &Envelope,
    expected_group_id: &str,
    signer: &LocalSigner,
) -> EnvelopeResult<Envelope> {
    sanity_check_and_sign_with_identity(
        envelope,
        expected_group_id,
        signer.identity(),
        signer.nonces(),
    )
}
