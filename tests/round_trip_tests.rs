// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Round-trip integration tests.
//!
//! Tests cover:
//! - Scalar boundaries, non-finite floats and empty text
//! - Value types and user composites
//! - Open enums through both the dynamic and the typed paths
//! - Sharing one codec across threads

use std::sync::Arc;
use std::thread;

use gamewire::types::{Color, Color32, Decimal, Quaternion, Rect, Vector2, Vector3, Vector4};
use gamewire::{
    from_bytes, open_enum, to_bytes, CodecError, CompositeLayout, EnumType, GameCodec,
    ScalarType, TypeDescriptor, TypeRegistry, Value, ValueTypeKind,
};

fn round_trip(codec: &GameCodec, value: &Value) -> Value {
    let ty = value.descriptor().expect("typed value");
    let bytes = codec.serialize(value).expect("serialize");
    codec.deserialize(&bytes, &ty).expect("deserialize")
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn test_integer_boundaries() {
    let codec = GameCodec::new();
    let values = [
        Value::UInt8(u8::MAX),
        Value::Int8(i8::MIN),
        Value::Int16(i16::MIN),
        Value::UInt16(u16::MAX),
        Value::Int32(i32::MIN),
        Value::Int32(i32::MAX),
        Value::UInt32(u32::MAX),
        Value::Int64(i64::MIN),
        Value::UInt64(u64::MAX),
    ];
    for value in values {
        assert_eq!(round_trip(&codec, &value), value);
    }
}

#[test]
fn test_little_endian_layout() {
    let codec = GameCodec::new();
    assert_eq!(
        codec.serialize(&Value::Int32(1)).unwrap(),
        vec![0x01, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        codec.serialize(&Value::UInt16(0x1234)).unwrap(),
        vec![0x34, 0x12]
    );
    assert_eq!(codec.serialize(&Value::Bool(true)).unwrap(), vec![1]);
}

#[test]
fn test_non_finite_floats() {
    let codec = GameCodec::new();
    for f in [f32::INFINITY, f32::NEG_INFINITY, f32::MIN_POSITIVE, -0.0] {
        let back = round_trip(&codec, &Value::Float32(f));
        assert_eq!(back.as_f64().map(f64::to_bits), Some(f64::from(f).to_bits()));
    }
    let Value::Float64(back) = round_trip(&codec, &Value::Float64(f64::NAN)) else {
        panic!("expected a double");
    };
    assert!(back.is_nan());
}

#[test]
fn test_strings() {
    let codec = GameCodec::new();
    assert!(codec.serialize(&Value::from("")).unwrap().is_empty());
    assert_eq!(
        codec
            .deserialize(&[], &ScalarType::String.into())
            .unwrap(),
        Value::from("")
    );

    let bytes = codec.serialize(&Value::from("Hi")).unwrap();
    assert_eq!(bytes, vec![b'H', 0, b'i', 0]);

    // Surrogate pairs survive
    let value = Value::from("dragon \u{1F409}");
    assert_eq!(round_trip(&codec, &value), value);
}

#[test]
fn test_decimal() {
    let codec = GameCodec::new();
    let zero = Value::Decimal(Decimal::ZERO);
    assert_eq!(codec.serialize(&zero).unwrap(), vec![0u8; 16]);
    assert_eq!(round_trip(&codec, &zero), zero);

    let price = Value::Decimal(Decimal::new(-12345, 2).unwrap());
    assert_eq!(round_trip(&codec, &price), price);
}

#[test]
fn test_truncated_scalar() {
    let codec = GameCodec::new();
    let err = codec
        .deserialize(&[1, 2], &ScalarType::Int32.into())
        .unwrap_err();
    assert!(err.is_malformed());
}

// ============================================================================
// Value types and composites
// ============================================================================

#[test]
fn test_value_types() {
    let codec = GameCodec::new();
    let values = [
        Value::Vector2(Vector2::new(1.0, -2.0)),
        Value::Vector3(Vector3::new(1.5, 2.5, 3.5)),
        Value::Vector4(Vector4::new(1.0, 2.0, 3.0, 4.0)),
        Value::Quaternion(Quaternion::IDENTITY),
        Value::Rect(Rect::new(0.0, 0.0, 640.0, 480.0)),
        Value::Color(Color::new(1.0, 0.5, 0.25, 1.0)),
        Value::Color32(Color32::new(255, 128, 0, 255)),
    ];
    for value in values {
        assert_eq!(round_trip(&codec, &value), value);
    }
}

#[test]
fn test_value_type_sizes() {
    let codec = GameCodec::new();
    let sizes = [
        (ValueTypeKind::Vector2, 8),
        (ValueTypeKind::Vector3, 12),
        (ValueTypeKind::Vector4, 16),
        (ValueTypeKind::Quaternion, 16),
        (ValueTypeKind::Rect, 16),
        (ValueTypeKind::Color, 16),
        (ValueTypeKind::Color32, 4),
    ];
    for (kind, size) in sizes {
        assert_eq!(codec.stride_of(&kind.into()).unwrap(), size, "{kind:?}");
    }
}

#[test]
fn test_composite() {
    let layout = CompositeLayout::new(
        "GridPos",
        [("x", ScalarType::Int16), ("y", ScalarType::Int16)],
    )
    .unwrap();
    let codec = GameCodec::with_registry(
        TypeRegistry::builder()
            .with_builtins()
            .register_composite(layout)
            .unwrap()
            .build(),
    );
    let value = Value::Composite {
        type_name: "GridPos".into(),
        fields: vec![Value::Int16(-3), Value::Int16(7)],
    };
    let bytes = codec.serialize(&value).unwrap();
    assert_eq!(bytes, vec![0xFD, 0xFF, 0x07, 0x00]);
    assert_eq!(round_trip(&codec, &value), value);
}

// ============================================================================
// Enums
// ============================================================================

open_enum! {
    /// Team allegiance.
    pub enum Faction: i32 {
        Neutral = 0,
        Red = 1,
        Blue = 2,
    }
}

#[test]
fn test_enum_dynamic() {
    let codec = GameCodec::new();
    let faction = Arc::new(Faction::enum_type());
    let value = Value::enumeration(&faction, 2);
    let bytes = codec.serialize(&value).unwrap();
    assert_eq!(bytes, vec![2, 0, 0, 0]);
    assert_eq!(round_trip(&codec, &value), value);
}

#[test]
fn test_enum_undeclared_value_survives() {
    let codec = GameCodec::new();
    let faction = Arc::new(Faction::enum_type());
    let bytes = codec.serialize(&Value::Int32(99)).unwrap();
    let Value::Enum(e) = codec
        .deserialize(&bytes, &TypeDescriptor::Enum(faction))
        .unwrap()
    else {
        panic!("expected an enum");
    };
    assert_eq!(e.raw, 99);
    assert!(!e.is_declared());
}

#[test]
fn test_enum_typed() {
    let bytes = to_bytes(&Faction::Blue).unwrap();
    assert_eq!(bytes, vec![2, 0, 0, 0]);
    assert_eq!(from_bytes::<Faction>(&bytes).unwrap(), Faction::Blue);

    let odd = from_bytes::<Faction>(&[7, 0, 0, 0]).unwrap();
    assert_eq!(odd.raw(), 7);
    assert_eq!(odd.name(), None);
}

#[test]
fn test_enum_unsupported_underlying() {
    let codec = GameCodec::with_registry(
        TypeRegistry::builder()
            .with_scalar(ScalarType::UInt8)
            .build(),
    );
    let rank = Arc::new(EnumType::new("Rank", ScalarType::Int64).unwrap());
    let err = codec.serialize(&Value::enumeration(&rank, 1)).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedType { .. }));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_codec_across_threads() {
    let codec = GameCodec::new();
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let codec = codec.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let value = Value::list(
                        ScalarType::Int32.into(),
                        (0..i).map(|n| Value::Int32(n * t)).collect(),
                    );
                    let bytes = codec.serialize(&value).unwrap();
                    let ty = TypeDescriptor::list(ScalarType::Int32.into());
                    assert_eq!(codec.deserialize(&bytes, &ty).unwrap(), value);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
