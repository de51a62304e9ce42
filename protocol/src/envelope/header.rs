//! Header construction.
//!
//! A [`Header`] is two independently encoded sub-headers. Each is encoded
//! exactly once, here, and from then on only ever travels as bytes.
//!
//! Absent and empty are different things on the wire. The builders below
//! never store a blank string or an empty byte field; they leave the field
//! `None` instead.

use tracing::error;

use crate::codec;
use crate::config::{DEFAULT_EPOCH, DEFAULT_HEADER_VERSION};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::messages::{GroupHeader, Header, HeaderType, SignatureHeader, Timestamp};

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn non_empty(bytes: Option<&[u8]>) -> Option<Vec<u8>> {
    bytes.filter(|b| !b.is_empty()).map(<[u8]>::to_vec)
}

/// Builds a signature header, omitting absent or empty fields.
pub fn build_signature_header(creator: Option<&[u8]>, nonce: Option<&[u8]>) -> SignatureHeader {
    SignatureHeader {
        creator: non_empty(creator),
        nonce: non_empty(nonce),
    }
}

// ---------------------------------------------------------------------------
// GroupHeaderBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`GroupHeader`].
///
/// ```
/// use quill_protocol::envelope::header::GroupHeaderBuilder;
/// use quill_protocol::messages::HeaderType;
///
/// let gh = GroupHeaderBuilder::new(HeaderType::ConfigUpdate)
///     .group_id("mygroup")
///     .tx_id("")
///     .build();
/// assert_eq!(gh.group_id.as_deref(), Some("mygroup"));
/// assert_eq!(gh.tx_id, None);
/// ```
///
/// The timestamp defaults to the wall clock at `build()` time.
#[derive(Debug, Clone)]
pub struct GroupHeaderBuilder {
    header_type: HeaderType,
    version: i32,
    timestamp: Option<Timestamp>,
    group_id: Option<String>,
    tx_id: Option<String>,
    epoch: u64,
    extension: Option<Vec<u8>>,
}

impl GroupHeaderBuilder {
    pub fn new(header_type: HeaderType) -> Self {
        Self {
            header_type,
            version: DEFAULT_HEADER_VERSION,
            timestamp: None,
            group_id: None,
            tx_id: None,
            epoch: DEFAULT_EPOCH,
            extension: None,
        }
    }

    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Pins the timestamp instead of reading the clock at build time.
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Blank ids are treated as absent.
    pub fn group_id(mut self, group_id: &str) -> Self {
        self.group_id = non_blank(group_id);
        self
    }

    /// Blank ids are treated as absent.
    pub fn tx_id(mut self, tx_id: &str) -> Self {
        self.tx_id = non_blank(tx_id);
        self
    }

    pub fn epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    /// Empty extensions are treated as absent.
    pub fn extension(mut self, extension: Vec<u8>) -> Self {
        self.extension = non_empty(Some(&extension));
        self
    }

    pub fn build(self) -> GroupHeader {
        GroupHeader {
            header_type: self.header_type.as_i32(),
            version: self.version,
            timestamp: Some(self.timestamp.unwrap_or_else(Timestamp::now)),
            group_id: self.group_id,
            tx_id: self.tx_id,
            epoch: self.epoch,
            extension: self.extension,
        }
    }
}

// ---------------------------------------------------------------------------
// HeaderBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for the composite [`Header`]: group header fields plus
/// the creator and nonce of the signature header.
#[derive(Debug, Clone)]
pub struct HeaderBuilder {
    group: GroupHeaderBuilder,
    creator: Option<Vec<u8>>,
    nonce: Option<Vec<u8>>,
}

impl HeaderBuilder {
    pub fn new(header_type: HeaderType) -> Self {
        Self {
            group: GroupHeaderBuilder::new(header_type),
            creator: None,
            nonce: None,
        }
    }

    pub fn version(mut self, version: i32) -> Self {
        self.group = self.group.version(version);
        self
    }

    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.group = self.group.timestamp(timestamp);
        self
    }

    pub fn group_id(mut self, group_id: &str) -> Self {
        self.group = self.group.group_id(group_id);
        self
    }

    pub fn tx_id(mut self, tx_id: &str) -> Self {
        self.group = self.group.tx_id(tx_id);
        self
    }

    pub fn epoch(mut self, epoch: u64) -> Self {
        self.group = self.group.epoch(epoch);
        self
    }

    pub fn extension(mut self, extension: Vec<u8>) -> Self {
        self.group = self.group.extension(extension);
        self
    }

    pub fn creator(mut self, creator: &[u8]) -> Self {
        self.creator = non_empty(Some(creator));
        self
    }

    pub fn nonce(mut self, nonce: &[u8]) -> Self {
        self.nonce = non_empty(Some(nonce));
        self
    }

    /// Encodes both sub-headers into the header's byte fields.
    pub fn build(self) -> EnvelopeResult<Header> {
        let group_header = self.group.build();
        let signature_header =
            build_signature_header(self.creator.as_deref(), self.nonce.as_deref());
        Ok(Header {
            group_header: codec::encode(&group_header)?,
            signature_header: codec::encode(&signature_header)?,
        })
    }
}

/// Positional form of [`HeaderBuilder`], for call sites that already hold
/// every field.
#[allow(clippy::too_many_arguments)]
pub fn build_header(
    header_type: HeaderType,
    version: i32,
    group_id: &str,
    tx_id: &str,
    epoch: u64,
    extension: Option<Vec<u8>>,
    creator: Option<&[u8]>,
    nonce: Option<&[u8]>,
) -> EnvelopeResult<Header> {
    let mut builder = HeaderBuilder::new(header_type)
        .version(version)
        .group_id(group_id)
        .tx_id(tx_id)
        .epoch(epoch);
    if let Some(extension) = extension {
        builder = builder.extension(extension);
    }
    if let Some(creator) = creator {
        builder = builder.creator(creator);
    }
    if let Some(nonce) = nonce {
        builder = builder.nonce(nonce);
    }
    builder.build()
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

pub fn decode_group_header(bytes: &[u8]) -> EnvelopeResult<GroupHeader> {
    codec::decode(bytes).map_err(|e| {
        error!(error = %e, "group header does not decode");
        EnvelopeError::MalformedHeader(e.to_string())
    })
}

pub fn decode_signature_header(bytes: &[u8]) -> EnvelopeResult<SignatureHeader> {
    codec::decode(bytes).map_err(|e| {
        error!(error = %e, "signature header does not decode");
        EnvelopeError::MalformedHeader(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_header_omits_empty_fields() {
        let sh = build_signature_header(Some(b""), None);
        assert_eq!(sh, SignatureHeader::default());

        let sh = build_signature_header(Some(b"me"), Some(b"n"));
        assert_eq!(sh.creator.as_deref(), Some(&b"me"[..]));
        assert_eq!(sh.nonce.as_deref(), Some(&b"n"[..]));
    }

    #[test]
    fn group_header_defaults() {
        let gh = GroupHeaderBuilder::new(HeaderType::Message).build();
        assert_eq!(gh.header_type, 0);
        assert_eq!(gh.version, DEFAULT_HEADER_VERSION);
        assert_eq!(gh.epoch, DEFAULT_EPOCH);
        assert!(gh.timestamp.is_some());
        assert_eq!(gh.group_id, None);
        assert_eq!(gh.tx_id, None);
        assert_eq!(gh.extension, None);
    }

    #[test]
    fn blank_strings_are_absent_not_empty() {
        let gh = GroupHeaderBuilder::new(HeaderType::Config)
            .group_id("   ")
            .tx_id("")
            .extension(Vec::new())
            .build();
        assert_eq!(gh.group_id, None);
        assert_eq!(gh.tx_id, None);
        assert_eq!(gh.extension, None);
    }

    #[test]
    fn explicit_timestamp_is_kept() {
        let ts = Timestamp {
            seconds: 1_700_000_000,
            nanos: 42,
        };
        let gh = GroupHeaderBuilder::new(HeaderType::Config)
            .timestamp(ts)
            .build();
        assert_eq!(gh.timestamp, Some(ts));
    }

    #[test]
    fn header_sub_fields_decode_back() {
        let header = build_header(
            HeaderType::EndorserTransaction,
            1,
            "mygroup",
            "abc123",
            7,
            Some(vec![9, 9]),
            Some(b"creator"),
            Some(b"nonce"),
        )
        .unwrap();

        let gh = decode_group_header(&header.group_header).unwrap();
        assert_eq!(gh.kind(), Some(HeaderType::EndorserTransaction));
        assert_eq!(gh.version, 1);
        assert_eq!(gh.group_id.as_deref(), Some("mygroup"));
        assert_eq!(gh.tx_id.as_deref(), Some("abc123"));
        assert_eq!(gh.epoch, 7);
        assert_eq!(gh.extension, Some(vec![9, 9]));

        let sh = decode_signature_header(&header.signature_header).unwrap();
        assert_eq!(sh.creator.as_deref(), Some(&b"creator"[..]));
        assert_eq!(sh.nonce.as_deref(), Some(&b"nonce"[..]));
    }

    #[test]
    fn garbage_header_bytes_are_malformed() {
        match decode_group_header(&[0xff; 3]) {
            Err(EnvelopeError::MalformedHeader(_)) => {}
            other => panic!("expected MalformedHeader, got {:?}", other),
        }
        match decode_signature_header(&[0x02]) {
            Err(EnvelopeError::MalformedHeader(_)) => {}
            other => panic!("expected MalformedHeader, got {:?}", other),
        }
    }
}
