// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Runtime type descriptors.
//!
//! A [`TypeDescriptor`] names the target of an encode or decode call. The wire
//! format is not self-describing, so the caller always supplies one.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::{CodecError, Result};

/// Primitive types with a dedicated scalar encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScalarType {
    /// Boolean (1 byte)
    Bool,
    /// 8-bit unsigned integer
    UInt8,
    /// 8-bit signed integer
    Int8,
    /// Character, low byte of the code point
    Char,
    /// 16-bit signed integer
    Int16,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit signed integer
    Int32,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// 128-bit decimal (four 32-bit words)
    Decimal,
    /// UTF-16 text, variable length
    String,
}

impl ScalarType {
    /// Every scalar type, in registration order.
    pub const ALL: [ScalarType; 14] = [
        ScalarType::Bool,
        ScalarType::UInt8,
        ScalarType::Int8,
        ScalarType::Char,
        ScalarType::Int16,
        ScalarType::UInt16,
        ScalarType::Int32,
        ScalarType::UInt32,
        ScalarType::Int64,
        ScalarType::UInt64,
        ScalarType::Float32,
        ScalarType::Float64,
        ScalarType::Decimal,
        ScalarType::String,
    ];

    /// Get the encoded size in bytes, if fixed.
    pub fn fixed_len(self) -> Option<u8> {
        match self {
            ScalarType::Bool | ScalarType::UInt8 | ScalarType::Int8 | ScalarType::Char => Some(1),
            ScalarType::Int16 | ScalarType::UInt16 => Some(2),
            ScalarType::Int32 | ScalarType::UInt32 | ScalarType::Float32 => Some(4),
            ScalarType::Int64 | ScalarType::UInt64 | ScalarType::Float64 => Some(8),
            ScalarType::Decimal => Some(16),
            ScalarType::String => None,
        }
    }

    /// Check if this is an integer type usable as an enum representation.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ScalarType::UInt8
                | ScalarType::Int8
                | ScalarType::Int16
                | ScalarType::UInt16
                | ScalarType::Int32
                | ScalarType::UInt32
                | ScalarType::Int64
                | ScalarType::UInt64
        )
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::UInt8 => "uint8",
            ScalarType::Int8 => "int8",
            ScalarType::Char => "char",
            ScalarType::Int16 => "int16",
            ScalarType::UInt16 => "uint16",
            ScalarType::Int32 => "int32",
            ScalarType::UInt32 => "uint32",
            ScalarType::Int64 => "int64",
            ScalarType::UInt64 => "uint64",
            ScalarType::Float32 => "float32",
            ScalarType::Float64 => "float64",
            ScalarType::Decimal => "decimal",
            ScalarType::String => "string",
        }
    }

    /// Parse a scalar type name, accepting common aliases.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" | "boolean" => Some(ScalarType::Bool),
            "uint8" | "byte" | "u8" => Some(ScalarType::UInt8),
            "int8" | "sbyte" | "i8" => Some(ScalarType::Int8),
            "char" => Some(ScalarType::Char),
            "int16" | "short" | "i16" => Some(ScalarType::Int16),
            "uint16" | "ushort" | "u16" => Some(ScalarType::UInt16),
            "int32" | "int" | "i32" => Some(ScalarType::Int32),
            "uint32" | "uint" | "u32" => Some(ScalarType::UInt32),
            "int64" | "long" | "i64" => Some(ScalarType::Int64),
            "uint64" | "ulong" | "u64" => Some(ScalarType::UInt64),
            "float32" | "float" | "f32" => Some(ScalarType::Float32),
            "float64" | "double" | "f64" => Some(ScalarType::Float64),
            "decimal" => Some(ScalarType::Decimal),
            "string" => Some(ScalarType::String),
            _ => None,
        }
    }
}

/// Built-in fixed-width value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueTypeKind {
    Vector2,
    Vector3,
    Vector4,
    Quaternion,
    Rect,
    Color,
    Color32,
}

impl ValueTypeKind {
    /// Every built-in value type, in registration order.
    pub const ALL: [ValueTypeKind; 7] = [
        ValueTypeKind::Vector2,
        ValueTypeKind::Vector3,
        ValueTypeKind::Vector4,
        ValueTypeKind::Quaternion,
        ValueTypeKind::Rect,
        ValueTypeKind::Color,
        ValueTypeKind::Color32,
    ];

    /// Encoded size in bytes.
    pub fn byte_len(self) -> u8 {
        match self {
            ValueTypeKind::Vector2 => 8,
            ValueTypeKind::Vector3 => 12,
            ValueTypeKind::Vector4
            | ValueTypeKind::Quaternion
            | ValueTypeKind::Rect
            | ValueTypeKind::Color => 16,
            ValueTypeKind::Color32 => 4,
        }
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            ValueTypeKind::Vector2 => "vector2",
            ValueTypeKind::Vector3 => "vector3",
            ValueTypeKind::Vector4 => "vector4",
            ValueTypeKind::Quaternion => "quaternion",
            ValueTypeKind::Rect => "rect",
            ValueTypeKind::Color => "color",
            ValueTypeKind::Color32 => "color32",
        }
    }

    /// Parse a value type name (case-insensitive).
    pub fn try_from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
    }
}

/// A declared enum member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i128,
}

/// An enum type: a name, an integer representation, and informational members.
///
/// Members are used for display only. Decoding never checks that a value is a
/// declared member. Two enum types are equal when their names and underlying
/// types match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumType {
    name: String,
    underlying: ScalarType,
    members: Vec<EnumMember>,
}

impl EnumType {
    /// Create an enum type over an integer representation.
    pub fn new(name: impl Into<String>, underlying: ScalarType) -> Result<Self> {
        let name = name.into();
        if !underlying.is_integer() {
            return Err(CodecError::invalid_schema(
                name,
                format!("enum representation must be an integer, got {}", underlying.name()),
            ));
        }
        Ok(Self {
            name,
            underlying,
            members: Vec::new(),
        })
    }

    /// Build from parts already known to be valid.
    pub(crate) fn from_parts(
        name: impl Into<String>,
        underlying: ScalarType,
        members: Vec<EnumMember>,
    ) -> Self {
        debug_assert!(underlying.is_integer());
        Self {
            name: name.into(),
            underlying,
            members,
        }
    }

    /// Add a named member.
    pub fn with_member(mut self, name: impl Into<String>, value: i128) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn underlying(&self) -> ScalarType {
        self.underlying
    }

    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    /// Name of the first member declared with `value`.
    pub fn member_name(&self, value: i128) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.value == value)
            .map(|m| m.name.as_str())
    }

    /// Value of the member called `name`.
    pub fn member_value(&self, name: &str) -> Option<i128> {
        self.members.iter().find(|m| m.name == name).map(|m| m.value)
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.underlying == other.underlying
    }
}

impl Eq for EnumType {}

impl Hash for EnumType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.underlying.hash(state);
    }
}

/// Identifies a codec target type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// Primitive scalar
    Scalar(ScalarType),
    /// Built-in fixed-width value type
    ValueType(ValueTypeKind),
    /// User-registered fixed-width value type, by name
    Composite(String),
    /// Enum encoded through its integer representation
    Enum(Arc<EnumType>),
    /// Array of elements
    Array(Box<TypeDescriptor>),
    /// Ordered list of elements
    List(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Shorthand for `Array(element)`.
    pub fn array(element: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(element))
    }

    /// Shorthand for `List(element)`.
    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(element))
    }

    /// Shorthand for `Enum(Arc::new(ty))`.
    pub fn enumeration(ty: EnumType) -> Self {
        TypeDescriptor::Enum(Arc::new(ty))
    }

    /// Key of the registry entry that encodes this type directly.
    ///
    /// Enums, arrays and lists have no entry of their own.
    pub fn registry_key(&self) -> Option<TypeKey> {
        match self {
            TypeDescriptor::Scalar(s) => Some(TypeKey::Scalar(*s)),
            TypeDescriptor::ValueType(v) => Some(TypeKey::ValueType(*v)),
            TypeDescriptor::Composite(name) => Some(TypeKey::Composite(name.clone())),
            TypeDescriptor::Enum(_) | TypeDescriptor::Array(_) | TypeDescriptor::List(_) => None,
        }
    }

    /// Element type of an array or list.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self {
            TypeDescriptor::Array(e) | TypeDescriptor::List(e) => Some(e),
            _ => None,
        }
    }

    /// Check if this is an array or list.
    pub fn is_sequence(&self) -> bool {
        matches!(self, TypeDescriptor::Array(_) | TypeDescriptor::List(_))
    }
}

impl From<ScalarType> for TypeDescriptor {
    fn from(s: ScalarType) -> Self {
        TypeDescriptor::Scalar(s)
    }
}

impl From<ValueTypeKind> for TypeDescriptor {
    fn from(v: ValueTypeKind) -> Self {
        TypeDescriptor::ValueType(v)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Scalar(s) => f.write_str(s.name()),
            TypeDescriptor::ValueType(v) => f.write_str(v.name()),
            TypeDescriptor::Composite(name) => f.write_str(name),
            TypeDescriptor::Enum(e) => f.write_str(e.name()),
            TypeDescriptor::Array(e) => write!(f, "array<{e}>"),
            TypeDescriptor::List(e) => write!(f, "list<{e}>"),
        }
    }
}

/// Key of a registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKey {
    Scalar(ScalarType),
    ValueType(ValueTypeKind),
    Composite(String),
}

impl TypeKey {
    /// Descriptor naming this key.
    pub fn descriptor(&self) -> TypeDescriptor {
        match self {
            TypeKey::Scalar(s) => TypeDescriptor::Scalar(*s),
            TypeKey::ValueType(v) => TypeDescriptor::ValueType(*v),
            TypeKey::Composite(name) => TypeDescriptor::Composite(name.clone()),
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKey::Scalar(s) => f.write_str(s.name()),
            TypeKey::ValueType(v) => f.write_str(v.name()),
            TypeKey::Composite(name) => f.write_str(name),
        }
    }
}
