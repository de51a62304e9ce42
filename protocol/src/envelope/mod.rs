//! # Envelope Module
//!
//! Construction of signed wire envelopes, leaves first:
//!
//! 1. **Nonce**: [`NonceSource`] draws anti-replay nonces and derives tx ids.
//! 2. **Header**: [`HeaderBuilder`] encodes the group and signature headers.
//! 3. **Payload**: [`PayloadBuilder`] joins a header and a typed body.
//! 4. **Sign**: [`sign`] encodes the payload once and signs those bytes.
//!
//! The read side ([`read_envelope_from_bytes`], [`verify_envelope`],
//! [`config_update_envelope_from`], ...) decodes in the opposite order and
//! fails closed whenever a declared header type and the body disagree.

pub mod header;
pub mod nonce;
pub mod payload;
pub mod signer;

pub use header::{build_header, build_signature_header, GroupHeaderBuilder, HeaderBuilder};
pub use nonce::NonceSource;
pub use payload::{build_payload, decode_payload, PayloadBuilder};
pub use signer::{
    build_signed_envelope, config_envelope_from, config_update_envelope_from,
    read_envelope_from_bytes, read_envelope_from_file, re_sign, seal_as, sign, verify_envelope,
};
