// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Enum codec.
//!
//! Enums travel as their underlying integer, encoded by the registry entry of
//! that integer type. Decoding is open: any integer the representation can
//! hold comes back as an [`EnumValue`], declared member or not.

use std::sync::Arc;

use crate::core::{CodecError, EnumType, EnumValue, Result, TypeKey, TypeRegistry, Value};

/// Encode an enum value through its underlying integer entry.
pub fn encode_enum(
    registry: &TypeRegistry,
    enum_type: &EnumType,
    value: &Value,
    out: &mut Vec<u8>,
) -> Result<()> {
    let entry = registry.require(&TypeKey::Scalar(enum_type.underlying()))?;
    let raw = match value {
        Value::Enum(e) if *e.enum_type == *enum_type => e.raw,
        other => {
            return Err(CodecError::invalid_value(
                enum_type.name(),
                format!("cannot encode a {} value", other.type_name()),
            ))
        }
    };
    let repr = Value::integer(enum_type.underlying(), raw).ok_or_else(|| {
        CodecError::invalid_value(
            enum_type.name(),
            format!("{raw} does not fit in {}", enum_type.underlying().name()),
        )
    })?;
    entry.encode(enum_type.name(), &repr, out)
}

/// Decode an enum value; the integer is not checked against the members.
pub fn decode_enum(
    registry: &TypeRegistry,
    enum_type: &Arc<EnumType>,
    data: &[u8],
) -> Result<Value> {
    let entry = registry.require(&TypeKey::Scalar(enum_type.underlying()))?;
    let raw = entry.decode(data)?.as_i128().ok_or_else(|| {
        CodecError::malformed(
            0,
            format!(
                "{} representation did not decode to an integer",
                enum_type.name()
            ),
        )
    })?;
    Ok(Value::Enum(EnumValue::new(enum_type.clone(), raw)))
}
