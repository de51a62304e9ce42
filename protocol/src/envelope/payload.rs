//! Payload construction and typed access to payload contents.

use tracing::{error, warn};

use super::header::{decode_group_header, decode_signature_header, HeaderBuilder};
use super::nonce::NonceSource;
use crate::codec;
use crate::config::{DEFAULT_EPOCH, DEFAULT_HEADER_VERSION};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::identity::SigningIdentity;
use crate::messages::{GroupHeader, HeaderType, Payload, PayloadData, SignatureHeader};

// ---------------------------------------------------------------------------
// PayloadBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a signable [`Payload`].
///
/// Each `build()` draws a fresh nonce from the [`NonceSource`] and, when an
/// identity is set, stamps its serialized form as the creator. The data body
/// must match the header type: a config update body under a transaction
/// header is rejected rather than encoded.
pub struct PayloadBuilder<'a> {
    header_type: HeaderType,
    header: HeaderBuilder,
    nonces: &'a NonceSource,
    identity: Option<&'a dyn SigningIdentity>,
    data: Option<&'a PayloadData>,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(header_type: HeaderType, nonces: &'a NonceSource) -> Self {
        Self {
            header_type,
            header: HeaderBuilder::new(header_type),
            nonces,
            identity: None,
            data: None,
        }
    }

    pub fn version(mut self, version: i32) -> Self {
        self.header = self.header.version(version);
        self
    }

    pub fn group_id(mut self, group_id: &str) -> Self {
        self.header = self.header.group_id(group_id);
        self
    }

    /// Stamps a caller-chosen transaction id. Omitted by default.
    pub fn tx_id(mut self, tx_id: &str) -> Self {
        self.header = self.header.tx_id(tx_id);
        self
    }

    pub fn epoch(mut self, epoch: u64) -> Self {
        self.header = self.header.epoch(epoch);
        self
    }

    pub fn extension(mut self, extension: Vec<u8>) -> Self {
        self.header = self.header.extension(extension);
        self
    }

    pub fn identity(mut self, identity: &'a dyn SigningIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn data(mut self, data: &'a PayloadData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn build(self) -> EnvelopeResult<Payload> {
        let data = match self.data {
            Some(body) => {
                check_body_matches(self.header_type, body)?;
                body.encode()?
            }
            None => Vec::new(),
        };

        let mut header = self.header;
        match self.identity {
            Some(identity) => {
                let creator = identity
                    .serialize_identity()
                    .map_err(EnvelopeError::from_identity)?;
                header = header.creator(&creator);
            }
            None => warn!(header_type = %self.header_type, "building payload without an identity"),
        }
        let nonce = self.nonces.generate_nonce()?;
        header = header.nonce(&nonce);

        Ok(Payload {
            header: Some(header.build()?),
            data,
        })
    }
}

pub(crate) fn check_body_matches(header_type: HeaderType, body: &PayloadData) -> EnvelopeResult<()> {
    if body.header_type() == header_type {
        Ok(())
    } else {
        Err(EnvelopeError::InvalidArgument(format!(
            "{} body cannot travel under a {} header",
            body.kind_name(),
            header_type
        )))
    }
}

/// Positional form of [`PayloadBuilder`] without tx id or extension.
pub fn build_payload(
    header_type: HeaderType,
    version: i32,
    group_id: &str,
    identity: Option<&dyn SigningIdentity>,
    data: Option<&PayloadData>,
    epoch: u64,
    nonces: &NonceSource,
) -> EnvelopeResult<Payload> {
    let mut builder = PayloadBuilder::new(header_type, nonces)
        .version(version)
        .group_id(group_id)
        .epoch(epoch);
    if let Some(identity) = identity {
        builder = builder.identity(identity);
    }
    if let Some(data) = data {
        builder = builder.data(data);
    }
    builder.build()
}

/// A header-only payload: default version and epoch, no body.
pub fn build_header_only_payload(
    header_type: HeaderType,
    group_id: &str,
    identity: &dyn SigningIdentity,
    nonces: &NonceSource,
) -> EnvelopeResult<Payload> {
    build_payload(
        header_type,
        DEFAULT_HEADER_VERSION,
        group_id,
        Some(identity),
        None,
        DEFAULT_EPOCH,
        nonces,
    )
}

// ---------------------------------------------------------------------------
// Reading payloads
// ---------------------------------------------------------------------------

/// Decodes payload bytes taken from an envelope.
pub fn decode_payload(bytes: &[u8]) -> EnvelopeResult<Payload> {
    codec::decode(bytes).map_err(|e| {
        error!(error = %e, "payload does not decode");
        EnvelopeError::MalformedEnvelope(e.to_string())
    })
}

impl Payload {
    /// The decoded group header. `MissingHeader` when the header or its
    /// group header bytes are absent.
    pub fn group_header(&self) -> EnvelopeResult<GroupHeader> {
        match &self.header {
            Some(header) if !header.group_header.is_empty() => {
                decode_group_header(&header.group_header)
            }
            _ => Err(EnvelopeError::MissingHeader),
        }
    }

    /// The decoded signature header. An absent signature header decodes as
    /// the empty header (no creator, no nonce).
    pub fn signature_header(&self) -> EnvelopeResult<SignatureHeader> {
        match &self.header {
            Some(header) if !header.signature_header.is_empty() => {
                decode_signature_header(&header.signature_header)
            }
            Some(_) => Ok(SignatureHeader::default()),
            None => Err(EnvelopeError::MissingHeader),
        }
    }

    /// Decodes `data` as the body the group header declares.
    ///
    /// Fails closed: an unknown header type, a header type without a typed
    /// body, or bytes that do not decode as the declared body are all errors.
    pub fn decode_data(&self) -> EnvelopeResult<PayloadData> {
        let group_header = self.group_header()?;
        let kind = group_header.kind().ok_or_else(|| EnvelopeError::WrongHeaderType {
            expected: "a known header type".into(),
            actual: HeaderType::describe(group_header.header_type),
        })?;
        match PayloadData::decode(kind, &self.data) {
            Ok(Some(body)) => Ok(body),
            Ok(None) => Err(EnvelopeError::WrongHeaderType {
                expected: "EndorserTransaction, Config or ConfigUpdate".into(),
                actual: kind.to_string(),
            }),
            Err(e) => {
                error!(header_type = %kind, error = %e, "payload data does not match its header type");
                Err(match kind {
                    HeaderType::ConfigUpdate => EnvelopeError::MalformedConfigUpdate(e.to_string()),
                    _ => EnvelopeError::MalformedEnvelope(e.to_string()),
                })
            }
        }
    }
}
