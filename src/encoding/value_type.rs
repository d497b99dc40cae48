// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Value-type codec.
//!
//! A value type is a fixed tuple of scalars written back to back in field
//! order with no prefix or padding. Built-in kinds use f32 fields (Color32
//! uses u8 fields); user composites take their field list from a
//! [`CompositeLayout`].

use std::num::NonZeroU8;
use std::sync::Arc;

use super::scalar::{decode_scalar, encode_scalar, fixed_span, LeScalar};
use crate::core::{CodecError, CompositeLayout, RegistryEntry, Result, Value, ValueTypeKind};
use crate::types::{Color, Color32, Quaternion, Rect, Vector2, Vector3, Vector4};

macro_rules! impl_le_struct {
    ($($ty:ident : $field_ty:ty { $($field:ident),+ });+ $(;)?) => {
        $(
            impl LeScalar for $ty {
                const WIDTH: usize = [$(stringify!($field)),+].len()
                    * std::mem::size_of::<$field_ty>();

                fn write_le(self, out: &mut Vec<u8>) {
                    $( self.$field.write_le(out); )+
                }

                fn read_le(data: &[u8]) -> Result<Self> {
                    let span = fixed_span(data, Self::WIDTH)?;
                    let mut fields = span.chunks_exact(std::mem::size_of::<$field_ty>());
                    $(
                        let $field = <$field_ty>::read_le(fields.next().unwrap_or_default())?;
                    )+
                    Ok($ty { $($field),+ })
                }
            }
        )+
    };
}

impl_le_struct!(
    Vector2: f32 { x, y };
    Vector3: f32 { x, y, z };
    Vector4: f32 { x, y, z, w };
    Quaternion: f32 { x, y, z, w };
    Rect: f32 { x, y, width, height };
    Color: f32 { r, g, b, a };
    Color32: u8 { r, g, b, a };
);

/// Encode `value` as built-in value type `kind`.
pub fn encode_value_type(kind: ValueTypeKind, value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match (kind, value) {
        (ValueTypeKind::Vector2, Value::Vector2(v)) => v.write_le(out),
        (ValueTypeKind::Vector3, Value::Vector3(v)) => v.write_le(out),
        (ValueTypeKind::Vector4, Value::Vector4(v)) => v.write_le(out),
        (ValueTypeKind::Quaternion, Value::Quaternion(v)) => v.write_le(out),
        (ValueTypeKind::Rect, Value::Rect(v)) => v.write_le(out),
        (ValueTypeKind::Color, Value::Color(v)) => v.write_le(out),
        (ValueTypeKind::Color32, Value::Color32(v)) => v.write_le(out),
        (kind, other) => {
            return Err(CodecError::invalid_value(
                kind.name(),
                format!("cannot encode a {} value", other.type_name()),
            ))
        }
    }
    Ok(())
}

/// Decode built-in value type `kind` from the start of `data`.
pub fn decode_value_type(kind: ValueTypeKind, data: &[u8]) -> Result<Value> {
    Ok(match kind {
        ValueTypeKind::Vector2 => Value::Vector2(Vector2::read_le(data)?),
        ValueTypeKind::Vector3 => Value::Vector3(Vector3::read_le(data)?),
        ValueTypeKind::Vector4 => Value::Vector4(Vector4::read_le(data)?),
        ValueTypeKind::Quaternion => Value::Quaternion(Quaternion::read_le(data)?),
        ValueTypeKind::Rect => Value::Rect(Rect::read_le(data)?),
        ValueTypeKind::Color => Value::Color(Color::read_le(data)?),
        ValueTypeKind::Color32 => Value::Color32(Color32::read_le(data)?),
    })
}

/// Encode a composite value against its layout.
pub fn encode_composite(layout: &CompositeLayout, value: &Value, out: &mut Vec<u8>) -> Result<()> {
    let Value::Composite { type_name, fields } = value else {
        return Err(CodecError::invalid_value(
            layout.name(),
            format!("cannot encode a {} value", value.type_name()),
        ));
    };
    if type_name != layout.name() {
        return Err(CodecError::invalid_value(
            layout.name(),
            format!("cannot encode a {type_name} value"),
        ));
    }
    if fields.len() != layout.fields().len() {
        return Err(CodecError::invalid_value(
            layout.name(),
            format!(
                "expected {} fields, got {}",
                layout.fields().len(),
                fields.len()
            ),
        ));
    }
    for (field, value) in layout.fields().iter().zip(fields) {
        encode_scalar(field.ty, value, out).map_err(|e| match e {
            CodecError::InvalidValue { reason, .. } => CodecError::invalid_value(
                format!("{}.{}", layout.name(), field.name),
                reason,
            ),
            other => other,
        })?;
    }
    Ok(())
}

/// Decode a composite value against its layout.
pub fn decode_composite(layout: &CompositeLayout, data: &[u8]) -> Result<Value> {
    let mut offset = 0usize;
    let mut fields = Vec::with_capacity(layout.fields().len());
    for field in layout.fields() {
        // Composite fields are always fixed-width
        let len = field.ty.fixed_len().unwrap_or(0) as usize;
        let span = data
            .get(offset..)
            .ok_or_else(|| CodecError::truncated(offset, len, 0))?;
        fields.push(decode_scalar(field.ty, span).map_err(|e| e.at_offset(offset))?);
        offset += len;
    }
    Ok(Value::Composite {
        type_name: layout.name().to_string(),
        fields,
    })
}

/// Registry entry for a built-in value type.
pub(crate) fn entry(kind: ValueTypeKind) -> RegistryEntry {
    let encoder = move |value: &Value, out: &mut Vec<u8>| encode_value_type(kind, value, out);
    let decoder = move |data: &[u8]| decode_value_type(kind, data);
    match NonZeroU8::new(kind.byte_len()) {
        Some(len) => RegistryEntry::fixed(len, encoder, decoder),
        None => RegistryEntry::variable(encoder, decoder),
    }
}

/// Registry entry for a user composite.
pub(crate) fn composite_entry(layout: Arc<CompositeLayout>) -> RegistryEntry {
    let enc_layout = layout.clone();
    let dec_layout = layout.clone();
    let encoder =
        move |value: &Value, out: &mut Vec<u8>| encode_composite(&enc_layout, value, out);
    let decoder = move |data: &[u8]| decode_composite(&dec_layout, data);
    match NonZeroU8::new(layout.byte_len()) {
        Some(len) => RegistryEntry::fixed(len, encoder, decoder),
        None => RegistryEntry::variable(encoder, decoder),
    }
}
