// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tag-prefix wire layer.
//!
//! Every encoded frame opens with a one- or two-byte prefix naming the
//! serializer that produced the payload:
//!
//! ```text
//! core form:    +-----+~~~~~~~~~+
//!               | tag | payload |      tag in 0x00..=0xFE
//!               +-----+~~~~~~~~~+
//!
//! custom form:  +------+-----+~~~~~~~~~+
//!               | 0xFF | tag | payload |  tag in 0x00..=0xFE
//!               +------+-----+~~~~~~~~~+
//! ```
//!
//! The payload is exactly what the serializer wrote. The prefix carries no
//! length field, no checksum and no padding, so the payload boundary is
//! simply "everything after the prefix".
//!
//! [`WireTag::read`] is deliberately permissive about tag VALUES: it will
//! happily return `Custom(0xFF)` for the frame `[0xFF, 0xFF]`. Registration
//! is where 0xFF is rejected, so such a frame can never match a serializer
//! and decoding reports an unknown tag instead.

use crate::error::DecodeError;
use std::fmt;

/// One-byte serializer tag within a namespace.
pub type Tag = u8;

/// Reserved first byte announcing that the next byte is a custom-namespace
/// tag. Never a registrable tag in either namespace.
pub const CUSTOM_MARKER: Tag = 0xFF;

/// The two disjoint tag namespaces.
///
/// Core tags are the closed set chosen when the registry is built; custom
/// tags are the escape hatch for types added later. The same numeric tag
/// can exist in both namespaces and select different serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Core,
    Custom,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Core => write!(f, "core"),
            Namespace::Custom => write!(f, "custom"),
        }
    }
}

/// A tag prefix as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireTag {
    /// One-byte form: the tag itself.
    Core(Tag),
    /// Two-byte form: [`CUSTOM_MARKER`] followed by the tag.
    Custom(Tag),
}

impl WireTag {
    /// Split a frame into its tag prefix and payload.
    ///
    /// Fails on an empty frame and on a lone [`CUSTOM_MARKER`] with no tag
    /// byte behind it. A zero-length payload is valid.
    pub fn read(bytes: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        match bytes {
            [] => Err(DecodeError::EmptyInput),
            [CUSTOM_MARKER] => Err(DecodeError::MissingCustomTag),
            [CUSTOM_MARKER, tag, payload @ ..] => Ok((WireTag::Custom(*tag), payload)),
            [tag, payload @ ..] => Ok((WireTag::Core(*tag), payload)),
        }
    }

    /// Append the prefix bytes for this tag to `out`.
    pub fn write(&self, out: &mut Vec<u8>) {
        match *self {
            WireTag::Core(tag) => out.push(tag),
            WireTag::Custom(tag) => {
                out.push(CUSTOM_MARKER);
                out.push(tag);
            }
        }
    }

    /// Tag value within its namespace.
    pub const fn tag(&self) -> Tag {
        match *self {
            WireTag::Core(tag) | WireTag::Custom(tag) => tag,
        }
    }

    /// Namespace this prefix selects.
    pub const fn namespace(&self) -> Namespace {
        match self {
            WireTag::Core(_) => Namespace::Core,
            WireTag::Custom(_) => Namespace::Custom,
        }
    }

    /// Number of prefix bytes on the wire: 1 for core, 2 for custom.
    pub const fn encoded_len(&self) -> usize {
        match self {
            WireTag::Core(_) => 1,
            WireTag::Custom(_) => 2,
        }
    }
}

impl fmt::Display for WireTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} tag {:#04x}", self.namespace(), self.tag())
    }
}
