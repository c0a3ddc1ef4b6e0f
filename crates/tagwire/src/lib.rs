// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tag-dispatched binary serialization registry.
//!
//! `tagwire` routes heterogeneous messages through one encode/decode
//! surface. Each message type brings its own [`Serializer`]; the registry
//! assigns every serializer a one-byte tag, prefixes encoded payloads with
//! that tag and dispatches incoming frames on it:
//!
//! ```text
//! core frame:    [tag][payload...]          tag in 0x00..=0xFE
//! custom frame:  [0xFF][tag][payload...]    tag in 0x00..=0xFE
//! ```
//!
//! Tags live in two independent namespaces. The core set is the closed,
//! first-party vocabulary fixed when the registry is built; the custom set
//! is the extension space for types added later, at the cost of one extra
//! prefix byte. The same numeric tag may appear in both sets and selects a
//! different serializer in each.
//!
//! A registry is validated once at construction and immutable afterwards,
//! so encode and decode are plain `&self` calls, safe to share across
//! threads behind an `Arc`.
//!
//! # Quick Start
//!
//! ```rust
//! use std::any::Any;
//! use tagwire::{Message, PayloadError, Serializer, SerializerId, SerializerRegistry};
//!
//! #[derive(Debug, PartialEq)]
//! struct Ping(u32);
//!
//! struct PingSerializer;
//!
//! impl Serializer for PingSerializer {
//!     fn id(&self) -> SerializerId {
//!         1
//!     }
//!
//!     fn serialize(&self, message: &dyn Message, out: &mut Vec<u8>) -> Result<(), PayloadError> {
//!         let ping = message
//!             .as_any()
//!             .downcast_ref::<Ping>()
//!             .ok_or(PayloadError::UnexpectedMessage { expected: "Ping" })?;
//!         out.extend_from_slice(&ping.0.to_le_bytes());
//!         Ok(())
//!     }
//!
//!     fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Message>, PayloadError> {
//!         let raw: [u8; 4] = bytes.try_into().map_err(|_| PayloadError::Truncated {
//!             expected: 4,
//!             found: bytes.len(),
//!         })?;
//!         Ok(Box::new(Ping(u32::from_le_bytes(raw))))
//!     }
//! }
//!
//! impl Message for Ping {
//!     fn serializer(&self) -> &dyn Serializer {
//!         &PingSerializer
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!
//!     fn into_any(self: Box<Self>) -> Box<dyn Any> {
//!         self
//!     }
//! }
//!
//! let registry = SerializerRegistry::builder().core(0x01, PingSerializer).build()?;
//!
//! let frame = registry.encode(&Ping(7))?;
//! assert_eq!(frame[0], 0x01);
//!
//! let back: Ping = registry.decode_as(&frame)?;
//! assert_eq!(back, Ping(7));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Decoding never trusts its input: malformed framing, unknown tags and
//! payloads the selected serializer rejects all surface as [`DecodeError`].

/// Error types for construction, encoding and decoding.
pub mod error;
/// Registry construction and tag dispatch.
pub mod registry;
/// Serializer and message traits.
pub mod serializer;
/// Tag prefix encoding and parsing.
pub mod wire;

pub use error::{ConfigError, DecodeError, EncodeError, PayloadError};
pub use registry::{RegistryBuilder, SerializerRegistry};
pub use serializer::{DynSerializer, Message, Serializer, SerializerId};
pub use wire::{Namespace, Tag, WireTag, CUSTOM_MARKER};
