// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type registry: encoder, decoder and fixed byte length per leaf type.
//!
//! The registry is assembled with [`TypeRegistryBuilder`] and frozen by
//! [`TypeRegistryBuilder::build`]. A built [`TypeRegistry`] exposes read
//! methods only, so one instance can be shared across threads behind an `Arc`
//! without locking.
//!
//! # Example
//!
//! ```
//! use gamewire::core::{CompositeLayout, ScalarType, TypeKey, TypeRegistry};
//!
//! let layout = CompositeLayout::new(
//!     "GridPos",
//!     [("x", ScalarType::Int16), ("y", ScalarType::Int16)],
//! )?;
//! let registry = TypeRegistry::builder()
//!     .with_builtins()
//!     .register_composite(layout)?
//!     .build();
//!
//! assert_eq!(registry.stride(&TypeKey::Composite("GridPos".into())), Some(4));
//! # Ok::<(), gamewire::CodecError>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU8;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::descriptor::{ScalarType, TypeKey, ValueTypeKind};
use super::error::{CodecError, Result};
use super::value::Value;
use crate::encoding::{scalar, value_type};

/// Encoder: appends the encoding of a value to the output buffer.
pub type EncodeFn = Arc<dyn Fn(&Value, &mut Vec<u8>) -> Result<()> + Send + Sync>;

/// Decoder: rebuilds a value from its encoding.
pub type DecodeFn = Arc<dyn Fn(&[u8]) -> Result<Value> + Send + Sync>;

/// Encoder, decoder and fixed length for one type.
///
/// When `fixed_length` is set, the encoder must always produce exactly that
/// many bytes and the decoder is handed exactly that many bytes.
#[derive(Clone)]
pub struct RegistryEntry {
    encoder: EncodeFn,
    decoder: DecodeFn,
    fixed_length: Option<NonZeroU8>,
}

impl RegistryEntry {
    /// Entry for a type whose encoding length depends on the value.
    pub fn variable<E, D>(encoder: E, decoder: D) -> Self
    where
        E: Fn(&Value, &mut Vec<u8>) -> Result<()> + Send + Sync + 'static,
        D: Fn(&[u8]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            encoder: Arc::new(encoder),
            decoder: Arc::new(decoder),
            fixed_length: None,
        }
    }

    /// Entry for a type that always encodes to `length` bytes.
    pub fn fixed<E, D>(length: NonZeroU8, encoder: E, decoder: D) -> Self
    where
        E: Fn(&Value, &mut Vec<u8>) -> Result<()> + Send + Sync + 'static,
        D: Fn(&[u8]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            encoder: Arc::new(encoder),
            decoder: Arc::new(decoder),
            fixed_length: Some(length),
        }
    }

    /// Fixed encoded length, if any.
    pub fn fixed_length(&self) -> Option<NonZeroU8> {
        self.fixed_length
    }

    /// Stride byte for sequences of this type (0 = variable length).
    pub fn stride(&self) -> u8 {
        self.fixed_length.map_or(0, NonZeroU8::get)
    }

    /// Encode `value`, enforcing the fixed-length contract.
    pub fn encode(&self, type_name: &str, value: &Value, out: &mut Vec<u8>) -> Result<()> {
        let start = out.len();
        if let Err(e) = (self.encoder)(value, out) {
            out.truncate(start);
            return Err(e);
        }
        if let Some(len) = self.fixed_length {
            let written = out.len() - start;
            if written != len.get() as usize {
                out.truncate(start);
                return Err(CodecError::invalid_value(
                    type_name,
                    format!("encoder wrote {written} bytes, registered length is {len}"),
                ));
            }
        }
        Ok(())
    }

    /// Decode a value; fixed-length decoders see exactly their span.
    pub fn decode(&self, data: &[u8]) -> Result<Value> {
        match self.fixed_length {
            Some(len) => {
                let len = len.get() as usize;
                if data.len() < len {
                    return Err(CodecError::truncated(0, len, data.len()));
                }
                (self.decoder)(&data[..len])
            }
            None => (self.decoder)(data),
        }
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("fixed_length", &self.fixed_length)
            .finish_non_exhaustive()
    }
}

/// A named field of a composite value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeField {
    pub name: String,
    pub ty: ScalarType,
}

/// Layout of a user-defined fixed-width value type.
///
/// Fields are encoded back to back in declaration order with no prefixes, so
/// every field must be a fixed-width scalar and the total must fit the
/// one-byte stride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeLayout {
    name: String,
    fields: Vec<CompositeField>,
    byte_len: u8,
}

impl CompositeLayout {
    /// Create and validate a layout.
    pub fn new<N, I, F>(name: N, fields: I) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (F, ScalarType)>,
        F: Into<String>,
    {
        let name = name.into();
        let fields: Vec<CompositeField> = fields
            .into_iter()
            .map(|(field, ty)| CompositeField {
                name: field.into(),
                ty,
            })
            .collect();

        if fields.is_empty() {
            return Err(CodecError::invalid_schema(name, "composite has no fields"));
        }

        let mut total = 0usize;
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(CodecError::invalid_schema(
                    name,
                    format!("duplicate field '{}'", field.name),
                ));
            }
            let Some(len) = field.ty.fixed_len() else {
                return Err(CodecError::invalid_schema(
                    name,
                    format!("field '{}' is variable-length", field.name),
                ));
            };
            total += len as usize;
        }

        let byte_len = u8::try_from(total).map_err(|_| {
            CodecError::invalid_schema(
                name.clone(),
                format!("encoded width {total} exceeds the 255-byte stride limit"),
            )
        })?;

        Ok(Self {
            name,
            fields,
            byte_len,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[CompositeField] {
        &self.fields
    }

    /// Total encoded width in bytes.
    pub fn byte_len(&self) -> u8 {
        self.byte_len
    }
}

/// Frozen table of supported leaf types.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<TypeKey, RegistryEntry>,
    composites: HashMap<String, Arc<CompositeLayout>>,
}

impl TypeRegistry {
    /// Start building a registry.
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Registry with every scalar and built-in value type.
    pub fn with_builtins() -> Self {
        Self::builder().with_builtins().build()
    }

    /// Look up an entry.
    pub fn get(&self, key: &TypeKey) -> Option<&RegistryEntry> {
        self.entries.get(key)
    }

    /// Look up an entry or fail with `UnsupportedType`.
    pub fn require(&self, key: &TypeKey) -> Result<&RegistryEntry> {
        self.entries
            .get(key)
            .ok_or_else(|| CodecError::unsupported(key.to_string()))
    }

    /// Check if a type is registered.
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Stride of a registered type (0 = variable length).
    pub fn stride(&self, key: &TypeKey) -> Option<u8> {
        self.entries.get(key).map(RegistryEntry::stride)
    }

    /// Layout of a registered composite.
    pub fn composite(&self, name: &str) -> Option<&Arc<CompositeLayout>> {
        self.composites.get(name)
    }

    /// All registered keys, sorted.
    pub fn keys(&self) -> Vec<&TypeKey> {
        let mut keys: Vec<&TypeKey> = self.entries.keys().collect();
        keys.sort();
        keys
    }

    /// Get the number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`TypeRegistry`].
#[derive(Debug, Clone, Default)]
pub struct TypeRegistryBuilder {
    registry: TypeRegistry,
}

impl TypeRegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every scalar and built-in value type.
    pub fn with_builtins(mut self) -> Self {
        for ty in ScalarType::ALL {
            self = self.register(TypeKey::Scalar(ty), scalar::entry(ty));
        }
        for kind in ValueTypeKind::ALL {
            self = self.register(TypeKey::ValueType(kind), value_type::entry(kind));
        }
        self
    }

    /// Register one scalar type.
    pub fn with_scalar(self, ty: ScalarType) -> Self {
        self.register(TypeKey::Scalar(ty), scalar::entry(ty))
    }

    /// Register an entry, replacing any previous entry for `key`.
    pub fn register(mut self, key: TypeKey, entry: RegistryEntry) -> Self {
        debug!(
            type_name = %key,
            fixed_length = entry.stride(),
            "registering codec type"
        );
        if self.registry.entries.insert(key.clone(), entry).is_some() {
            debug!(type_name = %key, "replaced existing registry entry");
        }
        self
    }

    /// Register a composite value type.
    ///
    /// Fails if the name collides with a scalar or built-in value type name.
    pub fn register_composite(mut self, layout: CompositeLayout) -> Result<Self> {
        let name = layout.name().to_string();
        if ScalarType::try_from_str(&name).is_some() || ValueTypeKind::try_from_str(&name).is_some()
        {
            return Err(CodecError::invalid_schema(
                name,
                "name collides with a built-in type",
            ));
        }
        let layout = Arc::new(layout);
        let entry = value_type::composite_entry(layout.clone());
        self.registry.composites.insert(name.clone(), layout);
        Ok(self.register(TypeKey::Composite(name), entry))
    }

    /// Freeze the registry.
    pub fn build(self) -> TypeRegistry {
        debug!(types = self.registry.len(), "type registry built");
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        let registry = TypeRegistry::with_builtins();
        assert_eq!(
            registry.len(),
            ScalarType::ALL.len() + ValueTypeKind::ALL.len()
        );
        assert_eq!(registry.stride(&TypeKey::Scalar(ScalarType::Int32)), Some(4));
        assert_eq!(registry.stride(&TypeKey::Scalar(ScalarType::Decimal)), Some(16));
        assert_eq!(registry.stride(&TypeKey::Scalar(ScalarType::String)), Some(0));
        assert_eq!(
            registry.stride(&TypeKey::ValueType(ValueTypeKind::Vector3)),
            Some(12)
        );
    }

    #[test]
    fn test_builtin_lengths_match_descriptors() {
        let registry = TypeRegistry::with_builtins();
        for ty in ScalarType::ALL {
            assert_eq!(
                registry.stride(&TypeKey::Scalar(ty)),
                Some(ty.fixed_len().unwrap_or(0))
            );
        }
        for kind in ValueTypeKind::ALL {
            assert_eq!(
                registry.stride(&TypeKey::ValueType(kind)),
                Some(kind.byte_len())
            );
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = TypeRegistry::builder().build();
        assert!(registry.is_empty());
        let err = registry
            .require(&TypeKey::Scalar(ScalarType::Int32))
            .unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_with_scalar_only() {
        let registry = TypeRegistry::builder()
            .with_scalar(ScalarType::Int32)
            .build();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&TypeKey::Scalar(ScalarType::Int32)));
        assert!(!registry.contains(&TypeKey::Scalar(ScalarType::Int64)));
    }

    #[test]
    fn test_composite_layout_validation() {
        let ok = CompositeLayout::new(
            "GridPos",
            [("x", ScalarType::Int16), ("y", ScalarType::Int16)],
        )
        .unwrap();
        assert_eq!(ok.byte_len(), 4);

        let empty: [(&str, ScalarType); 0] = [];
        assert!(CompositeLayout::new("Empty", empty).is_err());
        assert!(CompositeLayout::new("Named", [("name", ScalarType::String)]).is_err());
        assert!(CompositeLayout::new(
            "Dup",
            [("x", ScalarType::Int16), ("x", ScalarType::Int16)]
        )
        .is_err());

        let wide: Vec<(String, ScalarType)> = (0..16)
            .map(|i| (format!("d{i}"), ScalarType::Decimal))
            .collect();
        let err = CompositeLayout::new("Wide", wide).unwrap_err();
        assert!(matches!(err, CodecError::InvalidSchema { .. }));
    }

    #[test]
    fn test_composite_name_collision() {
        let layout = CompositeLayout::new("vector2", [("x", ScalarType::Int32)]).unwrap();
        assert!(TypeRegistry::builder().register_composite(layout).is_err());
    }

    #[test]
    fn test_fixed_entry_rejects_wrong_width() {
        let bad = RegistryEntry::fixed(
            NonZeroU8::new(4).unwrap(),
            |_, out| {
                out.push(1);
                Ok(())
            },
            |_| Ok(Value::Null),
        );
        let mut out = vec![9];
        let err = bad.encode("bad", &Value::Null, &mut out).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { .. }));
        assert_eq!(out, vec![9]);
    }

    #[test]
    fn test_fixed_entry_checks_input_length() {
        let registry = TypeRegistry::with_builtins();
        let entry = registry
            .require(&TypeKey::Scalar(ScalarType::Int32))
            .unwrap();
        assert!(entry.decode(&[1, 2, 3]).unwrap_err().is_malformed());
        assert_eq!(entry.decode(&[1, 0, 0, 0, 9]).unwrap(), Value::Int32(1));
    }

    #[test]
    fn test_registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeRegistry>();
    }
}
