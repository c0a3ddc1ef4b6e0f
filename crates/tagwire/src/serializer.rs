// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serializer and message contracts.
//!
//! A [`Serializer`] bundles the write and parse halves for one concrete
//! message type and carries a stable [`SerializerId`]. Identity is the id,
//! not the instance: two instances reporting the same id are the same
//! serializer as far as the registry is concerned, and registering both
//! under different tags in one namespace is a configuration error.
//!
//! Ids never appear on the wire. The registry maps them to one-byte tags at
//! build time and only the tags travel.

use crate::error::PayloadError;
use std::any::Any;
use std::sync::Arc;

/// Stable, application-assigned identity of a serializer.
pub type SerializerId = u32;

/// Shared handle to a registered serializer.
pub type DynSerializer = Arc<dyn Serializer>;

/// Paired write/parse logic for one message type.
///
/// Implementations are typically stateless unit structs. They must be
/// usable from multiple threads at once; the registry takes shared
/// references only.
pub trait Serializer: Send + Sync {
    /// Identity used to look up this serializer's tag at encode time.
    fn id(&self) -> SerializerId;

    /// Append the payload bytes for `message` to `out`.
    ///
    /// Implementations downcast via [`Message::as_any`] and return
    /// [`PayloadError::UnexpectedMessage`] when handed a message of a
    /// different concrete type.
    fn serialize(&self, message: &dyn Message, out: &mut Vec<u8>) -> Result<(), PayloadError>;

    /// Rebuild a message from payload bytes, i.e. everything after the tag
    /// prefix. Whether trailing garbage is tolerated is up to the
    /// serializer; the registry does not inspect the payload.
    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Message>, PayloadError>;
}

/// A value that can travel through the registry.
///
/// A message names its own serializer; the registry derives the wire tag
/// from that serializer's id. The `Any` plumbing is what lets stateless
/// serializers and [`SerializerRegistry::decode_as`] recover the concrete
/// type behind the trait object.
///
/// [`SerializerRegistry::decode_as`]: crate::registry::SerializerRegistry::decode_as
pub trait Message: Any + Send + Sync {
    /// The serializer responsible for this message.
    fn serializer(&self) -> &dyn Serializer;

    /// Borrow as [`Any`], for downcasting inside [`Serializer::serialize`].
    fn as_any(&self) -> &dyn Any;

    /// Consume as [`Any`], for typed decoding.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}
