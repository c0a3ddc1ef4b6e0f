// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// End-to-end registry tests against realistic message fixtures.
//
// Two message types share the numeric tag 0x01, one per namespace, so the
// suite continuously proves that the marker byte alone separates them.
// Frame layouts are asserted byte-exactly; decode paths are exercised with
// matching, mismatched and corrupted registries.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::any::Any;
use std::io::Cursor;
use std::sync::Arc;
use std::thread;
use tagwire::{
    DecodeError, Message, PayloadError, Serializer, SerializerId, SerializerRegistry,
};

const SENSOR_READING_ID: SerializerId = 0x10;
const LOG_LINE_ID: SerializerId = 0x20;

/// Fixed-size payload: u16 sensor id + i64 value, little endian.
#[derive(Debug, Clone, PartialEq)]
struct SensorReading {
    sensor: u16,
    value: i64,
}

struct SensorReadingSerializer;

impl Serializer for SensorReadingSerializer {
    fn id(&self) -> SerializerId {
        SENSOR_READING_ID
    }

    fn serialize(&self, message: &dyn Message, out: &mut Vec<u8>) -> Result<(), PayloadError> {
        let reading = message
            .as_any()
            .downcast_ref::<SensorReading>()
            .ok_or(PayloadError::UnexpectedMessage {
                expected: "SensorReading",
            })?;
        out.write_u16::<LittleEndian>(reading.sensor).expect("vec write");
        out.write_i64::<LittleEndian>(reading.value).expect("vec write");
        Ok(())
    }

    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Message>, PayloadError> {
        if bytes.len() < 10 {
            return Err(PayloadError::Truncated {
                expected: 10,
                found: bytes.len(),
            });
        }
        if bytes.len() > 10 {
            return Err(PayloadError::Invalid(format!(
                "expected 10 payload bytes, got {}",
                bytes.len()
            )));
        }
        let mut r = Cursor::new(bytes);
        let sensor = r.read_u16::<LittleEndian>().expect("length checked");
        let value = r.read_i64::<LittleEndian>().expect("length checked");
        Ok(Box::new(SensorReading { sensor, value }))
    }
}

impl Message for SensorReading {
    fn serializer(&self) -> &dyn Serializer {
        &SensorReadingSerializer
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Variable-size payload: u8 level + u32 byte length + UTF-8 text.
#[derive(Debug, Clone, PartialEq)]
struct LogLine {
    level: u8,
    text: String,
}

struct LogLineSerializer;

impl Serializer for LogLineSerializer {
    fn id(&self) -> SerializerId {
        LOG_LINE_ID
    }

    fn serialize(&self, message: &dyn Message, out: &mut Vec<u8>) -> Result<(), PayloadError> {
        let line = message
            .as_any()
            .downcast_ref::<LogLine>()
            .ok_or(PayloadError::UnexpectedMessage { expected: "LogLine" })?;
        out.write_u8(line.level).expect("vec write");
        out.write_u32::<LittleEndian>(line.text.len() as u32)
            .expect("vec write");
        out.extend_from_slice(line.text.as_bytes());
        Ok(())
    }

    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Message>, PayloadError> {
        if bytes.len() < 5 {
            return Err(PayloadError::Truncated {
                expected: 5,
                found: bytes.len(),
            });
        }
        let mut r = Cursor::new(bytes);
        let level = r.read_u8().expect("length checked");
        let text_len = r.read_u32::<LittleEndian>().expect("length checked") as usize;
        let text_bytes = &bytes[5..];
        if text_bytes.len() != text_len {
            return Err(PayloadError::Invalid(format!(
                "text length field says {text_len}, payload carries {}",
                text_bytes.len()
            )));
        }
        let text = std::str::from_utf8(text_bytes)
            .map_err(|e| PayloadError::Invalid(e.to_string()))?
            .to_string();
        Ok(Box::new(LogLine { level, text }))
    }
}

impl Message for LogLine {
    fn serializer(&self) -> &dyn Serializer {
        &LogLineSerializer
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Core tag 0x01 -> SensorReading, custom tag 0x01 -> LogLine.
fn registry() -> SerializerRegistry {
    SerializerRegistry::builder()
        .core(0x01, SensorReadingSerializer)
        .custom(0x01, LogLineSerializer)
        .build()
        .expect("valid registry")
}

#[test]
fn test_core_frame_layout() {
    let frame = registry()
        .encode(&SensorReading {
            sensor: 2,
            value: 42,
        })
        .expect("encode");

    assert_eq!(frame.len(), 11, "1 tag byte + 10 payload bytes");
    assert_eq!(frame[0], 0x01, "core tag, no marker");
    assert_eq!(&frame[1..3], &2u16.to_le_bytes());
    assert_eq!(&frame[3..], &42i64.to_le_bytes());
}

#[test]
fn test_custom_frame_layout() {
    let frame = registry()
        .encode(&LogLine {
            level: 3,
            text: "boot".to_string(),
        })
        .expect("encode");

    assert_eq!(&frame[..2], &[0xFF, 0x01], "marker byte then custom tag");
    assert_eq!(frame[2], 3, "level");
    assert_eq!(&frame[3..7], &4u32.to_le_bytes(), "text length");
    assert_eq!(&frame[7..], b"boot");
}

#[test]
fn test_round_trip_both_namespaces() {
    let registry = registry();

    let reading = SensorReading {
        sensor: 7,
        value: -123_456_789,
    };
    let back: SensorReading = registry
        .decode_as(&registry.encode(&reading).expect("encode"))
        .expect("decode");
    assert_eq!(back, reading);

    let line = LogLine {
        level: 1,
        text: "температура".to_string(),
    };
    let back: LogLine = registry
        .decode_as(&registry.encode(&line).expect("encode"))
        .expect("decode");
    assert_eq!(back, line);
}

#[test]
fn test_same_tag_resolves_per_namespace() {
    let registry = registry();

    let core_frame = registry
        .encode(&SensorReading { sensor: 1, value: 1 })
        .expect("encode");
    let custom_frame = registry
        .encode(&LogLine {
            level: 1,
            text: "x".to_string(),
        })
        .expect("encode");

    // Identical tag byte, different namespace, different type out.
    assert_eq!(core_frame[0], custom_frame[1]);

    let core = registry.decode(&core_frame).expect("core frame");
    assert!(core.as_any().downcast_ref::<SensorReading>().is_some());

    let custom = registry.decode(&custom_frame).expect("custom frame");
    assert!(custom.as_any().downcast_ref::<LogLine>().is_some());
}

#[test]
fn test_mismatched_registries() {
    let full = registry();
    let core_only = SerializerRegistry::builder()
        .core(0x01, SensorReadingSerializer)
        .build()
        .expect("valid registry");
    let custom_only = SerializerRegistry::builder()
        .custom(0x01, LogLineSerializer)
        .build()
        .expect("valid registry");

    let sensor_frame = full
        .encode(&SensorReading { sensor: 1, value: 2 })
        .expect("encode");
    let log_frame = full
        .encode(&LogLine {
            level: 0,
            text: "late".to_string(),
        })
        .expect("encode");

    // A decoder built without the peer's registrations reports the tag, not
    // a parse failure.
    let err = core_only.decode(&log_frame).err().expect("unknown custom");
    assert_eq!(err, DecodeError::UnknownCustomTag(0x01));

    let err = custom_only
        .decode(&sensor_frame)
        .err()
        .expect("unknown core");
    assert_eq!(err, DecodeError::UnknownCoreTag(0x01));

    // Encoding is equally strict: no registration, no frame.
    assert!(core_only
        .encode(&LogLine {
            level: 0,
            text: String::new(),
        })
        .is_err());
}

#[test]
fn test_trailing_garbage_rejected() {
    let registry = registry();

    let mut frame = registry
        .encode(&SensorReading { sensor: 9, value: 9 })
        .expect("encode");
    frame.push(0xAB);

    let err = registry.decode(&frame).err().expect("trailing byte");
    assert!(matches!(
        err,
        DecodeError::Payload {
            id: SENSOR_READING_ID,
            source: PayloadError::Invalid(_),
        }
    ));
}

#[test]
fn test_randomized_round_trips() {
    fastrand::seed(0x5EED_CAFE);
    let registry = registry();

    for _ in 0..200 {
        if fastrand::bool() {
            let reading = SensorReading {
                sensor: fastrand::u16(..),
                value: fastrand::i64(..),
            };
            let back: SensorReading = registry
                .decode_as(&registry.encode(&reading).expect("encode"))
                .expect("decode");
            assert_eq!(back, reading);
        } else {
            let len = fastrand::usize(0..64);
            let line = LogLine {
                level: fastrand::u8(..),
                text: (0..len).map(|_| fastrand::alphanumeric()).collect(),
            };
            let back: LogLine = registry
                .decode_as(&registry.encode(&line).expect("encode"))
                .expect("decode");
            assert_eq!(back, line);
        }
    }
}

#[test]
fn test_concurrent_round_trips() {
    let registry = Arc::new(registry());

    let handles: Vec<_> = (0..4u16)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..500u16 {
                    let reading = SensorReading {
                        sensor: worker,
                        value: i64::from(i),
                    };
                    let back: SensorReading = registry
                        .decode_as(&registry.encode(&reading).expect("encode"))
                        .expect("decode");
                    assert_eq!(back, reading);

                    let line = LogLine {
                        level: worker as u8,
                        text: format!("worker {worker} line {i}"),
                    };
                    let back: LogLine = registry
                        .decode_as(&registry.encode(&line).expect("encode"))
                        .expect("decode");
                    assert_eq!(back, line);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
}
