// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar codec.
//!
//! Every multi-byte scalar is written little-endian through
//! `byteorder::LittleEndian`, so the wire layout does not depend on the host.
//!
//! | Type        | Bytes | Layout                                    |
//! |-------------|-------|-------------------------------------------|
//! | bool        | 1     | 0 or 1 (any non-zero decodes as true)     |
//! | uint8/int8  | 1     | raw byte                                  |
//! | char        | 1     | low byte of the code point (<= U+00FF)    |
//! | int16/uint16| 2     | little-endian                             |
//! | int32/uint32| 4     | little-endian                             |
//! | int64/uint64| 8     | little-endian                             |
//! | float32/64  | 4 / 8 | IEEE-754 bits, little-endian              |
//! | decimal     | 16    | lo, mid, hi, flags (u32 little-endian)    |
//! | string      | 2n    | UTF-16LE code units, no prefix/terminator |

use std::num::NonZeroU8;

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{CodecError, RegistryEntry, Result, ScalarType, Value};
use crate::types::Decimal;

/// Fixed-width little-endian scalar.
pub trait LeScalar: Copy {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Append the little-endian encoding.
    fn write_le(self, out: &mut Vec<u8>);

    /// Read from the first `WIDTH` bytes of `data`.
    fn read_le(data: &[u8]) -> Result<Self>;
}

/// First `len` bytes of `data`, or a truncation error.
#[inline]
pub(crate) fn fixed_span(data: &[u8], len: usize) -> Result<&[u8]> {
    data.get(..len)
        .ok_or_else(|| CodecError::truncated(0, len, data.len()))
}

macro_rules! impl_le_scalar {
    ($($ty:ty => $write:ident, $read:ident);+ $(;)?) => {
        $(
            impl LeScalar for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn write_le(self, out: &mut Vec<u8>) {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    LittleEndian::$write(&mut buf, self);
                    out.extend_from_slice(&buf);
                }

                #[inline]
                fn read_le(data: &[u8]) -> Result<Self> {
                    Ok(LittleEndian::$read(fixed_span(data, Self::WIDTH)?))
                }
            }
        )+
    };
}

impl_le_scalar!(
    u16 => write_u16, read_u16;
    i16 => write_i16, read_i16;
    u32 => write_u32, read_u32;
    i32 => write_i32, read_i32;
    u64 => write_u64, read_u64;
    i64 => write_i64, read_i64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
);

impl LeScalar for u8 {
    const WIDTH: usize = 1;

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.push(self);
    }

    #[inline]
    fn read_le(data: &[u8]) -> Result<Self> {
        Ok(fixed_span(data, 1)?[0])
    }
}

impl LeScalar for i8 {
    const WIDTH: usize = 1;

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.push(self as u8);
    }

    #[inline]
    fn read_le(data: &[u8]) -> Result<Self> {
        Ok(fixed_span(data, 1)?[0] as i8)
    }
}

impl LeScalar for bool {
    const WIDTH: usize = 1;

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.push(self as u8);
    }

    #[inline]
    fn read_le(data: &[u8]) -> Result<Self> {
        Ok(fixed_span(data, 1)?[0] != 0)
    }
}

impl LeScalar for Decimal {
    const WIDTH: usize = 16;

    fn write_le(self, out: &mut Vec<u8>) {
        for word in self.to_words() {
            word.write_le(out);
        }
    }

    fn read_le(data: &[u8]) -> Result<Self> {
        let span = fixed_span(data, Self::WIDTH)?;
        let mut words = [0u32; 4];
        LittleEndian::read_u32_into(span, &mut words);
        Decimal::from_words(words).map_err(|e| match e {
            CodecError::InvalidValue { reason, .. } => CodecError::malformed(12, reason),
            other => other,
        })
    }
}

/// Encode a char as its single low byte.
pub fn encode_char(c: char, out: &mut Vec<u8>) -> Result<()> {
    let byte = u8::try_from(c as u32).map_err(|_| {
        CodecError::invalid_value(
            "char",
            format!("U+{:04X} does not fit in one byte", c as u32),
        )
    })?;
    out.push(byte);
    Ok(())
}

/// Decode a one-byte char.
pub fn decode_char(data: &[u8]) -> Result<char> {
    Ok(char::from(fixed_span(data, 1)?[0]))
}

/// Encode text as UTF-16LE code units.
pub fn encode_str(s: &str, out: &mut Vec<u8>) {
    out.reserve(s.len() * 2);
    for unit in s.encode_utf16() {
        unit.write_le(out);
    }
}

/// Decode UTF-16LE text spanning the whole buffer.
pub fn decode_str(data: &[u8]) -> Result<String> {
    if data.len() % 2 != 0 {
        return Err(CodecError::malformed(
            data.len() - 1,
            format!("UTF-16 text has odd byte length {}", data.len()),
        ));
    }
    let mut units = vec![0u16; data.len() / 2];
    LittleEndian::read_u16_into(data, &mut units);
    String::from_utf16(&units).map_err(|_| CodecError::malformed(0, "invalid UTF-16 text"))
}

/// Encode `value` as scalar type `ty`.
pub fn encode_scalar(ty: ScalarType, value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match (ty, value) {
        (ScalarType::Bool, Value::Bool(v)) => v.write_le(out),
        (ScalarType::UInt8, Value::UInt8(v)) => v.write_le(out),
        (ScalarType::Int8, Value::Int8(v)) => v.write_le(out),
        (ScalarType::Char, Value::Char(c)) => encode_char(*c, out)?,
        (ScalarType::Int16, Value::Int16(v)) => v.write_le(out),
        (ScalarType::UInt16, Value::UInt16(v)) => v.write_le(out),
        (ScalarType::Int32, Value::Int32(v)) => v.write_le(out),
        (ScalarType::UInt32, Value::UInt32(v)) => v.write_le(out),
        (ScalarType::Int64, Value::Int64(v)) => v.write_le(out),
        (ScalarType::UInt64, Value::UInt64(v)) => v.write_le(out),
        (ScalarType::Float32, Value::Float32(v)) => v.write_le(out),
        (ScalarType::Float64, Value::Float64(v)) => v.write_le(out),
        (ScalarType::Decimal, Value::Decimal(v)) => v.write_le(out),
        (ScalarType::String, Value::String(s)) => encode_str(s, out),
        (ty, other) => {
            return Err(CodecError::invalid_value(
                ty.name(),
                format!("cannot encode a {} value", other.type_name()),
            ))
        }
    }
    Ok(())
}

/// Decode a scalar of type `ty` from the start of `data`.
pub fn decode_scalar(ty: ScalarType, data: &[u8]) -> Result<Value> {
    Ok(match ty {
        ScalarType::Bool => Value::Bool(bool::read_le(data)?),
        ScalarType::UInt8 => Value::UInt8(u8::read_le(data)?),
        ScalarType::Int8 => Value::Int8(i8::read_le(data)?),
        ScalarType::Char => Value::Char(decode_char(data)?),
        ScalarType::Int16 => Value::Int16(i16::read_le(data)?),
        ScalarType::UInt16 => Value::UInt16(u16::read_le(data)?),
        ScalarType::Int32 => Value::Int32(i32::read_le(data)?),
        ScalarType::UInt32 => Value::UInt32(u32::read_le(data)?),
        ScalarType::Int64 => Value::Int64(i64::read_le(data)?),
        ScalarType::UInt64 => Value::UInt64(u64::read_le(data)?),
        ScalarType::Float32 => Value::Float32(f32::read_le(data)?),
        ScalarType::Float64 => Value::Float64(f64::read_le(data)?),
        ScalarType::Decimal => Value::Decimal(Decimal::read_le(data)?),
        ScalarType::String => Value::String(decode_str(data)?),
    })
}

/// Registry entry for a scalar type.
pub(crate) fn entry(ty: ScalarType) -> RegistryEntry {
    let encoder = move |value: &Value, out: &mut Vec<u8>| encode_scalar(ty, value, out);
    let decoder = move |data: &[u8]| decode_scalar(ty, data);
    match ty.fixed_len().and_then(NonZeroU8::new) {
        Some(len) => RegistryEntry::fixed(len, encoder, decoder),
        None => RegistryEntry::variable(encoder, decoder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: Value) -> Vec<u8> {
        let ty = match value.descriptor() {
            Some(crate::core::TypeDescriptor::Scalar(ty)) => ty,
            other => panic!("not a scalar: {other:?}"),
        };
        let mut out = Vec::new();
        encode_scalar(ty, &value, &mut out).unwrap();
        out
    }

    #[test]
    fn test_int32_minus_one() {
        assert_eq!(encode(Value::Int32(-1)), vec![0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_integer_byte_order() {
        assert_eq!(encode(Value::UInt16(0x1234)), vec![0x34, 0x12]);
        assert_eq!(encode(Value::Int32(0x0102_0304)), vec![4, 3, 2, 1]);
        assert_eq!(
            encode(Value::UInt64(0x0102_0304_0506_0708)),
            vec![8, 7, 6, 5, 4, 3, 2, 1]
        );
        assert_eq!(encode(Value::Int8(-2)), vec![0xFE]);
    }

    #[test]
    fn test_integer_bounds_round_trip() {
        let values = [
            Value::Int8(i8::MIN),
            Value::Int8(i8::MAX),
            Value::UInt8(u8::MAX),
            Value::Int16(i16::MIN),
            Value::UInt16(u16::MAX),
            Value::Int32(i32::MIN),
            Value::Int32(i32::MAX),
            Value::UInt32(u32::MAX),
            Value::Int64(i64::MIN),
            Value::Int64(i64::MAX),
            Value::UInt64(u64::MAX),
        ];
        for value in values {
            let bytes = encode(value.clone());
            let Some(crate::core::TypeDescriptor::Scalar(ty)) = value.descriptor() else {
                unreachable!()
            };
            assert_eq!(bytes.len(), ty.fixed_len().unwrap() as usize);
            assert_eq!(decode_scalar(ty, &bytes).unwrap(), value);
        }
    }

    #[test]
    fn test_float_bits_are_little_endian() {
        // 1.5f32 is 0x3FC0_0000, -0.25f64 is 0xBFD0_0000_0000_0000
        assert_eq!(encode(Value::Float32(1.5)), vec![0x00, 0x00, 0xC0, 0x3F]);
        assert_eq!(
            encode(Value::Float64(-0.25)),
            vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xD0, 0xBF]
        );
        assert_eq!(
            decode_scalar(ScalarType::Float32, &[0x00, 0x00, 0xC0, 0x3F]).unwrap(),
            Value::Float32(1.5)
        );
    }

    #[test]
    fn test_float_special_values() {
        for v in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -0.0, f32::MIN_POSITIVE] {
            let bytes = encode(Value::Float32(v));
            let Value::Float32(back) = decode_scalar(ScalarType::Float32, &bytes).unwrap() else {
                panic!("wrong variant");
            };
            assert_eq!(back.to_bits(), v.to_bits());
        }
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let bytes = encode(Value::Float64(v));
            let Value::Float64(back) = decode_scalar(ScalarType::Float64, &bytes).unwrap() else {
                panic!("wrong variant");
            };
            assert_eq!(back.to_bits(), v.to_bits());
        }
    }

    #[test]
    fn test_bool_lenient_decode() {
        assert_eq!(encode(Value::Bool(true)), vec![1]);
        assert_eq!(decode_scalar(ScalarType::Bool, &[0]).unwrap(), Value::Bool(false));
        assert_eq!(decode_scalar(ScalarType::Bool, &[7]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_char_single_byte() {
        assert_eq!(encode(Value::Char('A')), vec![0x41]);
        assert_eq!(encode(Value::Char('é')), vec![0xE9]);
        assert_eq!(decode_scalar(ScalarType::Char, &[0xE9]).unwrap(), Value::Char('é'));

        let mut out = Vec::new();
        let err = encode_scalar(ScalarType::Char, &Value::Char('€'), &mut out).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_string_utf16() {
        assert_eq!(encode(Value::from("Hi")), vec![0x48, 0x00, 0x69, 0x00]);
        assert!(encode(Value::from("")).is_empty());

        let text = "héllo wörld 🎮";
        let bytes = encode(Value::from(text));
        assert_eq!(bytes.len() % 2, 0);
        assert_eq!(decode_str(&bytes).unwrap(), text);
    }

    #[test]
    fn test_string_malformed() {
        assert!(decode_str(&[0x48, 0x00, 0x69]).unwrap_err().is_malformed());
        // Lone high surrogate
        assert!(decode_str(&[0x00, 0xD8]).unwrap_err().is_malformed());
    }

    #[test]
    fn test_decimal_layout() {
        let d = Decimal::new(-12345, 3).unwrap();
        let bytes = encode(Value::Decimal(d));
        assert_eq!(
            bytes,
            vec![0x39, 0x30, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x03, 0x80]
        );
        assert_eq!(
            decode_scalar(ScalarType::Decimal, &bytes).unwrap(),
            Value::Decimal(d)
        );
        assert_eq!(encode(Value::Decimal(Decimal::ZERO)), vec![0; 16]);
    }

    #[test]
    fn test_decimal_bad_flags_malformed() {
        let mut bytes = vec![0u8; 16];
        bytes[12] = 1;
        assert!(decode_scalar(ScalarType::Decimal, &bytes)
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn test_short_buffer_malformed() {
        let err = decode_scalar(ScalarType::Int32, &[0xFF, 0xFF, 0xFF]).unwrap_err();
        assert!(err.is_malformed());
        assert!(decode_scalar(ScalarType::Int64, &[0; 7]).is_err());
        assert!(decode_scalar(ScalarType::Bool, &[]).is_err());
    }

    #[test]
    fn test_type_mismatch() {
        let mut out = Vec::new();
        let err = encode_scalar(ScalarType::Int32, &Value::Int64(1), &mut out).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { .. }));
    }
}
