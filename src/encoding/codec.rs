// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Top-level codec entry points.
//!
//! [`GameCodec`] dispatches on the runtime type of a [`Value`] (or on the
//! caller's [`TypeDescriptor`] when decoding) to one of five strategies:
//! scalar, value type, enum, array or list. Containers recurse back into the
//! codec for each element, so nesting works at any depth.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use gamewire::{GameCodec, ScalarType, TypeDescriptor, Value};
//!
//! let codec = GameCodec::new();
//! let scores = Value::list(
//!     ScalarType::Int32.into(),
//!     vec![Value::Int32(1), Value::Int32(2), Value::Int32(3)],
//! );
//! let bytes = codec.serialize(&scores)?;
//! assert_eq!(bytes.len(), 4 + 1 + 3 * 4);
//!
//! let back = codec.deserialize(&bytes, &TypeDescriptor::list(ScalarType::Int32.into()))?;
//! assert_eq!(back, scores);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use super::{enums, sequence};
use crate::core::{
    CodecError, RegistryEntry, Result, TypeDescriptor, TypeKey, TypeRegistry, Value,
};

/// Encoder/decoder bound to a frozen type registry.
///
/// Cloning is cheap and clones share the registry, so one codec can serve
/// any number of threads.
#[derive(Debug, Clone)]
pub struct GameCodec {
    registry: Arc<TypeRegistry>,
}

impl Default for GameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl GameCodec {
    /// Codec over every scalar and built-in value type.
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::with_builtins())
    }

    /// Codec over a custom registry.
    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Codec over an already shared registry.
    pub fn from_shared(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    /// Get the registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    // =========================================================================
    // Dynamic entry points
    // =========================================================================

    /// Serialize a value; `Null` yields an empty buffer.
    pub fn serialize(&self, value: &Value) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.serialize_into(value, &mut out)?;
        Ok(out)
    }

    /// Serialize a value, appending to `out`.
    ///
    /// On error `out` keeps its original length.
    pub fn serialize_into(&self, value: &Value, out: &mut Vec<u8>) -> Result<()> {
        match value {
            Value::Null => Ok(()),
            Value::Enum(e) => enums::encode_enum(&self.registry, &e.enum_type, value, out),
            Value::Array { element, items } | Value::List { element, items } => {
                sequence::encode_sequence(self, element, items, out)
            }
            other => {
                let key = other
                    .descriptor()
                    .and_then(|ty| ty.registry_key())
                    .ok_or_else(|| CodecError::unsupported(other.type_name()))?;
                self.registry
                    .require(&key)?
                    .encode(&key.to_string(), other, out)
            }
        }
    }

    /// Deserialize a value of type `ty`.
    ///
    /// An empty buffer yields the default value of `ty` once `ty` is known to
    /// be supported.
    pub fn deserialize(&self, data: &[u8], ty: &TypeDescriptor) -> Result<Value> {
        if data.is_empty() {
            return self.default_for(ty);
        }
        match ty {
            TypeDescriptor::Enum(e) => enums::decode_enum(&self.registry, e, data),
            TypeDescriptor::Array(element) => Ok(Value::array(
                (**element).clone(),
                sequence::decode_sequence(self, element, data)?,
            )),
            TypeDescriptor::List(element) => Ok(Value::list(
                (**element).clone(),
                sequence::decode_sequence(self, element, data)?,
            )),
            _ => self.require(ty)?.decode(data),
        }
    }

    /// Serialize an array value.
    pub fn serialize_array(&self, value: &Value) -> Result<Vec<u8>> {
        match value {
            Value::Array { .. } | Value::Null => self.serialize(value),
            other => Err(CodecError::invalid_value(
                other.type_name(),
                "expected an array value",
            )),
        }
    }

    /// Deserialize the elements of an array of `element`.
    pub fn deserialize_array(&self, data: &[u8], element: &TypeDescriptor) -> Result<Vec<Value>> {
        sequence::decode_sequence(self, element, data)
    }

    /// Serialize a list value.
    pub fn serialize_list(&self, value: &Value) -> Result<Vec<u8>> {
        match value {
            Value::List { .. } | Value::Null => self.serialize(value),
            other => Err(CodecError::invalid_value(
                other.type_name(),
                "expected a list value",
            )),
        }
    }

    /// Deserialize the elements of a list of `element`.
    pub fn deserialize_list(&self, data: &[u8], element: &TypeDescriptor) -> Result<Vec<Value>> {
        sequence::decode_sequence(self, element, data)
    }

    // =========================================================================
    // Type queries
    // =========================================================================

    /// Stride written for sequences of `ty` (0 = variable length).
    ///
    /// Fails with `UnsupportedType` if `ty`, a nested element type, or an
    /// enum's underlying type is not registered.
    pub fn stride_of(&self, ty: &TypeDescriptor) -> Result<u8> {
        match ty {
            TypeDescriptor::Enum(e) => {
                self.registry
                    .require(&TypeKey::Scalar(e.underlying()))?;
                Ok(0)
            }
            TypeDescriptor::Array(element) | TypeDescriptor::List(element) => {
                self.stride_of(element)?;
                Ok(0)
            }
            _ => Ok(self.require(ty)?.stride()),
        }
    }

    /// Check whether values of `ty` can be encoded and decoded.
    pub fn supports(&self, ty: &TypeDescriptor) -> bool {
        self.stride_of(ty).is_ok()
    }

    /// Default value of `ty`, as decoded from an empty buffer.
    pub fn default_for(&self, ty: &TypeDescriptor) -> Result<Value> {
        self.stride_of(ty)?;
        if let Some(value) = Value::default_for(ty) {
            return Ok(value);
        }
        let TypeDescriptor::Composite(name) = ty else {
            return Err(CodecError::unsupported(ty.to_string()));
        };
        match self.registry.composite(name) {
            Some(layout) => Ok(Value::Composite {
                type_name: name.clone(),
                fields: layout
                    .fields()
                    .iter()
                    .map(|field| Value::scalar_default(field.ty))
                    .collect(),
            }),
            // Entry registered without a layout: decode all-zero bytes
            None => {
                let entry = self.require(ty)?;
                let zeros = vec![0u8; usize::from(entry.stride())];
                entry.decode(&zeros)
            }
        }
    }

    fn require(&self, ty: &TypeDescriptor) -> Result<&RegistryEntry> {
        let key = ty
            .registry_key()
            .ok_or_else(|| CodecError::unsupported(ty.to_string()))?;
        self.registry.require(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CompositeLayout, EnumType, ScalarType, ValueTypeKind};
    use crate::types::{Vector2, Vector3};

    #[test]
    fn test_serialize_null() {
        let codec = GameCodec::new();
        assert!(codec.serialize(&Value::Null).unwrap().is_empty());
        assert!(codec.serialize_array(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_empty_buffer_defaults() {
        let codec = GameCodec::new();
        assert_eq!(
            codec.deserialize(&[], &ScalarType::Int32.into()).unwrap(),
            Value::Int32(0)
        );
        assert_eq!(
            codec.deserialize(&[], &ScalarType::String.into()).unwrap(),
            Value::from("")
        );
        assert_eq!(
            codec
                .deserialize(&[], &ValueTypeKind::Vector3.into())
                .unwrap(),
            Value::Vector3(Vector3::default())
        );
        assert_eq!(
            codec
                .deserialize(&[], &TypeDescriptor::array(ScalarType::Int32.into()))
                .unwrap(),
            Value::array(ScalarType::Int32.into(), vec![])
        );
    }

    #[test]
    fn test_empty_buffer_unsupported_type() {
        let codec = GameCodec::with_registry(
            TypeRegistry::builder()
                .with_scalar(ScalarType::Int32)
                .build(),
        );
        assert!(codec
            .deserialize(&[], &ScalarType::Int64.into())
            .unwrap_err()
            .is_unsupported());
        assert!(codec
            .deserialize(&[], &TypeDescriptor::list(ScalarType::Int64.into()))
            .unwrap_err()
            .is_unsupported());
    }

    #[test]
    fn test_unregistered_value_type() {
        let codec = GameCodec::with_registry(
            TypeRegistry::builder()
                .with_scalar(ScalarType::Float32)
                .build(),
        );
        let err = codec
            .serialize(&Value::Vector2(Vector2::new(1.0, 2.0)))
            .unwrap_err();
        assert_eq!(err, CodecError::unsupported("vector2"));
    }

    #[test]
    fn test_unregistered_composite() {
        let codec = GameCodec::new();
        let value = Value::Composite {
            type_name: "GridPos".into(),
            fields: vec![Value::Int16(1)],
        };
        assert!(codec.serialize(&value).unwrap_err().is_unsupported());
        assert!(codec
            .deserialize(&[1, 0], &TypeDescriptor::Composite("GridPos".into()))
            .unwrap_err()
            .is_unsupported());
    }

    #[test]
    fn test_stride_of() {
        let codec = GameCodec::new();
        assert_eq!(codec.stride_of(&ScalarType::Int32.into()).unwrap(), 4);
        assert_eq!(codec.stride_of(&ScalarType::String.into()).unwrap(), 0);
        assert_eq!(codec.stride_of(&ValueTypeKind::Color32.into()).unwrap(), 4);
        let faction = EnumType::new("Faction", ScalarType::Int32).unwrap();
        assert_eq!(
            codec
                .stride_of(&TypeDescriptor::enumeration(faction))
                .unwrap(),
            0
        );
        assert_eq!(
            codec
                .stride_of(&TypeDescriptor::list(ScalarType::Int32.into()))
                .unwrap(),
            0
        );
        assert!(!codec.supports(&TypeDescriptor::array(TypeDescriptor::Composite(
            "Missing".into()
        ))));
    }

    #[test]
    fn test_composite_default() {
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
        assert_eq!(
            codec
                .default_for(&TypeDescriptor::Composite("GridPos".into()))
                .unwrap(),
            Value::Composite {
                type_name: "GridPos".into(),
                fields: vec![Value::Int16(0), Value::Int16(0)],
            }
        );
    }

    #[test]
    fn test_serialize_array_rejects_list() {
        let codec = GameCodec::new();
        let list = Value::list(ScalarType::Int32.into(), vec![]);
        assert!(codec.serialize_array(&list).is_err());
        assert!(codec.serialize_list(&list).is_ok());
        assert!(codec.serialize_list(&Value::Int32(1)).is_err());
    }

    #[test]
    fn test_codec_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<GameCodec>();
    }
}
