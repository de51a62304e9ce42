//! # Wire Codec
//!
//! Every message this layer puts on the wire goes through exactly one
//! encoding profile: bincode with fixed-width integers, a hard size limit,
//! and trailing bytes rejected.
//!
//! The profile is deterministic for a given set of field values. Signatures
//! elsewhere in the fleet are checked against these bytes, so nothing in
//! the crate is allowed to hand-roll its own encoding of a wire message.
//! All maps inside messages are `BTreeMap`s for the same reason: iteration
//! order, and therefore byte order, must not depend on insertion order.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::MAX_MESSAGE_SIZE;

/// Errors raised while encoding or decoding a wire message.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value could not be serialized (typically: over the size limit).
    #[error("failed to encode {message}: {reason}")]
    Encode {
        message: &'static str,
        reason: String,
    },

    /// The bytes are not a valid encoding of the requested message.
    #[error("failed to decode {message}: {reason}")]
    Decode {
        message: &'static str,
        reason: String,
    },
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(MAX_MESSAGE_SIZE)
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Short, log-friendly name of a message type (`Envelope`, not the full path).
fn message_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Encodes a message into its canonical wire bytes.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    options()
        .serialize(value)
        .map_err(|e| CodecError::Encode {
            message: message_name::<T>(),
            reason: e.to_string(),
        })
}

/// Decodes a message from wire bytes. The whole buffer must be consumed.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    options()
        .deserialize(bytes)
        .map_err(|e| CodecError::Decode {
            message: message_name::<T>(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: Option<String>,
        blob: Vec<u8>,
        map: BTreeMap<String, Vec<u8>>,
    }

    fn sample() -> Sample {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), vec![2]);
        map.insert("a".to_string(), vec![1]);
        Sample {
            name: Some("quill".to_string()),
            blob: vec![0xde, 0xad],
            map,
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(encode(&sample()).unwrap(), encode(&sample()).unwrap());
    }

    #[test]
    fn map_order_does_not_depend_on_insertion() {
        let mut reversed = BTreeMap::new();
        reversed.insert("a".to_string(), vec![1]);
        reversed.insert("b".to_string(), vec![2]);
        let other = Sample {
            map: reversed,
            ..sample()
        };
        assert_eq!(encode(&sample()).unwrap(), encode(&other).unwrap());
    }

    #[test]
    fn absent_and_empty_strings_encode_differently() {
        let absent = Sample {
            name: None,
            ..sample()
        };
        let empty = Sample {
            name: Some(String::new()),
            ..sample()
        };
        assert_ne!(encode(&absent).unwrap(), encode(&empty).unwrap());
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = encode(&sample()).unwrap();
        bytes.push(0x00);
        match decode::<Sample>(&bytes) {
            Err(CodecError::Decode { message, .. }) => assert_eq!(message, "Sample"),
            other => panic!("expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_truncated_input() {
        let bytes = encode(&sample()).unwrap();
        assert!(decode::<Sample>(&bytes[..bytes.len() - 1]).is_err());
        assert!(decode::<Sample>(&[]).is_err());
    }

    #[test]
    fn rejects_oversized_length_prefix() {
        // A Vec<u8> claiming u64::MAX elements must fail cleanly, not allocate.
        let bytes = u64::MAX.to_le_bytes();
        assert!(decode::<Vec<u8>>(&bytes).is_err());
    }
}
