// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for registry construction, encoding and decoding.
//!
//! Construction errors ([`ConfigError`]) are fatal: the registry is never
//! produced and the misconfiguration has to be fixed in code. Encode and
//! decode errors are returned synchronously to the caller; the registry
//! never retries and never falls back to a different serializer.

use crate::serializer::SerializerId;
use crate::wire::{Namespace, Tag};
use thiserror::Error;

/// Registry construction failures.
///
/// Each variant names the namespace it was detected in, so a collision in
/// the core set is never confused with one in the custom set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 0xFF announces the custom namespace on the wire and can never be a
    /// registered tag.
    #[error("Tag 0xff is reserved as the custom-namespace marker ({namespace} set)")]
    ReservedTag { namespace: Namespace },

    /// The same tag was bound twice within one namespace.
    #[error("Tag {tag:#04x} registered twice in the {namespace} set")]
    DuplicateTag { namespace: Namespace, tag: Tag },

    /// One serializer identity was bound to two tags within one namespace,
    /// which would leave the encoder with no single tag to emit.
    #[error(
        "Serializer {id} registered under both {first_tag:#04x} and {second_tag:#04x} in the {namespace} set"
    )]
    DuplicateSerializer {
        namespace: Namespace,
        id: SerializerId,
        first_tag: Tag,
        second_tag: Tag,
    },
}

/// Failures reported by a serializer itself while writing or parsing a
/// payload. The registry wraps these with the serializer id that produced
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The payload ends before the serializer's layout is complete.
    #[error("Payload truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    /// `serialize` was handed a message of a different concrete type.
    #[error("Message is not a {expected}")]
    UnexpectedMessage { expected: &'static str },

    /// The payload bytes are structurally invalid for this serializer.
    #[error("Invalid payload: {0}")]
    Invalid(String),
}

/// Encode-side failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The message's serializer carries an id no tag is bound to, in either
    /// namespace.
    #[error("Serializer {0} is not registered under any tag")]
    UnregisteredSerializer(SerializerId),

    /// The serializer refused the message.
    #[error("Serializer {id} failed to write the payload: {source}")]
    Payload {
        id: SerializerId,
        #[source]
        source: PayloadError,
    },
}

/// Decode-side failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Zero input bytes, so there is no tag to dispatch on.
    #[error("Empty input: expected at least one tag byte")]
    EmptyInput,

    /// The frame is exactly the custom marker with no tag byte behind it.
    #[error("Custom marker 0xff without a following tag byte")]
    MissingCustomTag,

    /// No core serializer is bound to this tag. Usually means encoder and
    /// decoder were built from different registrations.
    #[error("Unknown core tag {0:#04x}")]
    UnknownCoreTag(Tag),

    /// No custom serializer is bound to this tag.
    #[error("Unknown custom tag {0:#04x}")]
    UnknownCustomTag(Tag),

    /// The selected serializer rejected the payload bytes.
    #[error("Serializer {id} rejected the payload: {source}")]
    Payload {
        id: SerializerId,
        #[source]
        source: PayloadError,
    },

    /// Typed decoding produced a message of a different concrete type.
    #[error("Decoded message is not a {expected}")]
    UnexpectedType { expected: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ReservedTag {
            namespace: Namespace::Custom,
        };
        assert_eq!(
            err.to_string(),
            "Tag 0xff is reserved as the custom-namespace marker (custom set)"
        );

        let err = ConfigError::DuplicateTag {
            namespace: Namespace::Core,
            tag: 0x0A,
        };
        assert_eq!(err.to_string(), "Tag 0x0a registered twice in the core set");

        let err = ConfigError::DuplicateSerializer {
            namespace: Namespace::Core,
            id: 42,
            first_tag: 0x01,
            second_tag: 0x02,
        };
        assert_eq!(
            err.to_string(),
            "Serializer 42 registered under both 0x01 and 0x02 in the core set"
        );
    }

    #[test]
    fn test_decode_error_display() {
        assert_eq!(
            DecodeError::EmptyInput.to_string(),
            "Empty input: expected at least one tag byte"
        );
        assert_eq!(
            DecodeError::UnknownCoreTag(0xFE).to_string(),
            "Unknown core tag 0xfe"
        );
        assert_eq!(
            DecodeError::UnknownCustomTag(0x05).to_string(),
            "Unknown custom tag 0x05"
        );
    }

    #[test]
    fn test_payload_error_is_carried_as_source() {
        use std::error::Error;

        let err = DecodeError::Payload {
            id: 9,
            source: PayloadError::Truncated {
                expected: 8,
                found: 3,
            },
        };
        assert_eq!(
            err.to_string(),
            "Serializer 9 rejected the payload: Payload truncated: expected 8 bytes, found 3"
        );
        assert!(err.source().is_some());
    }
}
