// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tag-dispatch registry.
//!
//! [`SerializerRegistry`] is the front door of the crate. It owns two
//! bidirectional tag tables, one per [`Namespace`], prefixes every encoded
//! payload with the owning serializer's tag and routes every incoming frame
//! to the serializer its prefix names.
//!
//! The registry is frozen at construction: both tables are validated once
//! (no reserved tag, no duplicate tag, no serializer id under two tags)
//! and never mutated afterwards. Encode and decode therefore take `&self`
//! and are safe to call from many threads without locks.

use crate::error::{ConfigError, DecodeError, EncodeError};
use crate::serializer::{DynSerializer, Message, Serializer, SerializerId};
use crate::wire::{Namespace, Tag, WireTag, CUSTOM_MARKER};
use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// One namespace's bidirectional tag table.
///
/// `by_tag` drives decoding, `by_id` drives encoding. Both are filled in
/// lockstep at build time, so each registered serializer has exactly one
/// tag and each tag exactly one serializer.
struct TagSpace {
    by_tag: HashMap<Tag, DynSerializer>,
    by_id: HashMap<SerializerId, Tag>,
}

impl TagSpace {
    fn build(
        namespace: Namespace,
        entries: impl IntoIterator<Item = (Tag, DynSerializer)>,
    ) -> Result<Self, ConfigError> {
        let mut by_tag: HashMap<Tag, DynSerializer> = HashMap::new();
        let mut by_id: HashMap<SerializerId, Tag> = HashMap::new();

        for (tag, serializer) in entries {
            if tag == CUSTOM_MARKER {
                return Err(ConfigError::ReservedTag { namespace });
            }
            let id = serializer.id();
            if by_tag.insert(tag, serializer).is_some() {
                return Err(ConfigError::DuplicateTag { namespace, tag });
            }
            if let Some(first_tag) = by_id.insert(id, tag) {
                return Err(ConfigError::DuplicateSerializer {
                    namespace,
                    id,
                    first_tag,
                    second_tag: tag,
                });
            }
        }

        // Inserts above keep both maps in lockstep; equal sizes is the
        // bijection invariant.
        debug_assert_eq!(by_tag.len(), by_id.len());
        Ok(Self { by_tag, by_id })
    }

    fn serializer(&self, tag: Tag) -> Option<&DynSerializer> {
        self.by_tag.get(&tag)
    }

    fn tag_of(&self, id: SerializerId) -> Option<Tag> {
        self.by_id.get(&id).copied()
    }

    fn len(&self) -> usize {
        self.by_tag.len()
    }
}

/// Immutable two-namespace dispatch table for encode and decode.
///
/// Built once via [`SerializerRegistry::new`] or
/// [`SerializerRegistry::builder`], then shared (typically behind an `Arc`)
/// by every encoder and decoder in the process.
pub struct SerializerRegistry {
    core: TagSpace,
    custom: TagSpace,
}

impl SerializerRegistry {
    /// Build a registry from one tag map per namespace.
    ///
    /// Validation fails if any tag is the reserved [`CUSTOM_MARKER`] or if
    /// two tags within one namespace map to serializers reporting the same
    /// id. Duplicate ids across namespaces are allowed; see
    /// [`tag_of`](Self::tag_of) for how encoding disambiguates them.
    pub fn new(
        core: HashMap<Tag, DynSerializer>,
        custom: HashMap<Tag, DynSerializer>,
    ) -> Result<Self, ConfigError> {
        Self::from_entries(core, custom)
    }

    /// Start an empty [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    fn from_entries(
        core: impl IntoIterator<Item = (Tag, DynSerializer)>,
        custom: impl IntoIterator<Item = (Tag, DynSerializer)>,
    ) -> Result<Self, ConfigError> {
        let core = TagSpace::build(Namespace::Core, core)?;
        let custom = TagSpace::build(Namespace::Custom, custom)?;
        log::debug!(
            "[SerializerRegistry] built with {} core and {} custom serializers",
            core.len(),
            custom.len()
        );
        Ok(Self { core, custom })
    }

    /// Encode `message` into a tag-prefixed frame.
    ///
    /// The message's serializer writes the payload; the registry only
    /// contributes the prefix. Fails if the serializer's id is not bound to
    /// any tag, or if the serializer itself rejects the message.
    pub fn encode(&self, message: &dyn Message) -> Result<Vec<u8>, EncodeError> {
        let serializer = message.serializer();
        let id = serializer.id();
        let wire_tag = self
            .tag_of(id)
            .ok_or(EncodeError::UnregisteredSerializer(id))?;

        let mut out = Vec::new();
        wire_tag.write(&mut out);
        serializer
            .serialize(message, &mut out)
            .map_err(|source| EncodeError::Payload { id, source })?;
        Ok(out)
    }

    /// Decode a tag-prefixed frame into a boxed message.
    ///
    /// The prefix selects the namespace and serializer; everything after it
    /// is handed to that serializer untouched. Input is untrusted: bad
    /// framing, unknown tags and rejected payloads all come back as
    /// [`DecodeError`], never as a panic.
    pub fn decode(&self, bytes: &[u8]) -> Result<Box<dyn Message>, DecodeError> {
        let (wire_tag, payload) = WireTag::read(bytes)?;
        let serializer = match wire_tag {
            WireTag::Core(tag) => self
                .core
                .serializer(tag)
                .ok_or(DecodeError::UnknownCoreTag(tag))?,
            WireTag::Custom(tag) => self
                .custom
                .serializer(tag)
                .ok_or(DecodeError::UnknownCustomTag(tag))?,
        };
        serializer.parse(payload).map_err(|source| DecodeError::Payload {
            id: serializer.id(),
            source,
        })
    }

    /// Decode a frame and downcast it to the concrete message type `M`.
    ///
    /// Fails with [`DecodeError::UnexpectedType`] when the frame's tag
    /// selects a serializer that produces some other type.
    pub fn decode_as<M: Message>(&self, bytes: &[u8]) -> Result<M, DecodeError> {
        let message = self.decode(bytes)?;
        match message.into_any().downcast::<M>() {
            Ok(boxed) => Ok(*boxed),
            Err(_) => Err(DecodeError::UnexpectedType {
                expected: type_name::<M>(),
            }),
        }
    }

    /// Wire tag a serializer id would be encoded under, if any.
    ///
    /// The core namespace is consulted first, so an id registered in both
    /// namespaces always encodes in the shorter core form.
    pub fn tag_of(&self, id: SerializerId) -> Option<WireTag> {
        if let Some(tag) = self.core.tag_of(id) {
            return Some(WireTag::Core(tag));
        }
        self.custom.tag_of(id).map(WireTag::Custom)
    }

    /// Number of serializers in the core namespace.
    pub fn core_len(&self) -> usize {
        self.core.len()
    }

    /// Number of serializers in the custom namespace.
    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// True when neither namespace has a registration.
    pub fn is_empty(&self) -> bool {
        self.core.len() == 0 && self.custom.len() == 0
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("core", &self.core.len())
            .field("custom", &self.custom.len())
            .finish()
    }
}

/// Incremental construction of a [`SerializerRegistry`].
///
/// Registration order is preserved, so when a misconfiguration involves two
/// entries the reported error names them in the order they were added.
#[derive(Default)]
pub struct RegistryBuilder {
    core: Vec<(Tag, DynSerializer)>,
    custom: Vec<(Tag, DynSerializer)>,
}

impl RegistryBuilder {
    /// Register `serializer` under `tag` in the core namespace.
    pub fn core<S>(mut self, tag: Tag, serializer: S) -> Self
    where
        S: Serializer + 'static,
    {
        self.core.push((tag, Arc::new(serializer)));
        self
    }

    /// Register `serializer` under `tag` in the custom namespace.
    pub fn custom<S>(mut self, tag: Tag, serializer: S) -> Self
    where
        S: Serializer + 'static,
    {
        self.custom.push((tag, Arc::new(serializer)));
        self
    }

    /// Validate all registrations and freeze the registry.
    pub fn build(self) -> Result<SerializerRegistry, ConfigError> {
        SerializerRegistry::from_entries(self.core, self.custom)
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("core", &self.core.len())
            .field("custom", &self.custom.len())
            .finish()
    }
}
