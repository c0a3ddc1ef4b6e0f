// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::any::Any;
use std::sync::OnceLock;
use tagwire::{Message, PayloadError, Serializer, SerializerId, SerializerRegistry, WireTag};

/// Strict fixed-size payload, exercises the payload-rejection path.
#[derive(Debug)]
struct Word(u32);

struct WordSerializer;

impl Serializer for WordSerializer {
    fn id(&self) -> SerializerId {
        1
    }

    fn serialize(&self, message: &dyn Message, out: &mut Vec<u8>) -> Result<(), PayloadError> {
        let word = message
            .as_any()
            .downcast_ref::<Word>()
            .ok_or(PayloadError::UnexpectedMessage { expected: "Word" })?;
        out.extend_from_slice(&word.0.to_le_bytes());
        Ok(())
    }

    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Message>, PayloadError> {
        let raw: [u8; 4] = bytes.try_into().map_err(|_| PayloadError::Truncated {
            expected: 4,
            found: bytes.len(),
        })?;
        Ok(Box::new(Word(u32::from_le_bytes(raw))))
    }
}

impl Message for Word {
    fn serializer(&self) -> &dyn Serializer {
        &WordSerializer
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Accepts any payload, exercises the success path.
#[derive(Debug)]
struct Raw(Vec<u8>);

struct RawSerializer;

impl Serializer for RawSerializer {
    fn id(&self) -> SerializerId {
        2
    }

    fn serialize(&self, message: &dyn Message, out: &mut Vec<u8>) -> Result<(), PayloadError> {
        let raw = message
            .as_any()
            .downcast_ref::<Raw>()
            .ok_or(PayloadError::UnexpectedMessage { expected: "Raw" })?;
        out.extend_from_slice(&raw.0);
        Ok(())
    }

    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Message>, PayloadError> {
        Ok(Box::new(Raw(bytes.to_vec())))
    }
}

impl Message for Raw {
    fn serializer(&self) -> &dyn Serializer {
        &RawSerializer
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

fn registry() -> &'static SerializerRegistry {
    static REGISTRY: OnceLock<SerializerRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        SerializerRegistry::builder()
            .core(0x00, WordSerializer)
            .core(0x01, RawSerializer)
            .custom(0x00, WordSerializer)
            .build()
            .expect("valid fuzz registry")
    })
}

fuzz_target!(|data: &[u8]| {
    // Framing layer must never panic on arbitrary input
    let _ = WireTag::read(data);

    // Full dispatch must never panic; anything that decodes re-encodes
    if let Ok(message) = registry().decode(data) {
        let _ = registry().encode(message.as_ref());
    }
});
