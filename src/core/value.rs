// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec value type system.
//!
//! [`Value`] is the runtime value handed to the dynamic `serialize` entry point
//! and produced by `deserialize`. All variants are serde-serializable so tools
//! can render decoded payloads.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::descriptor::{EnumType, ScalarType, TypeDescriptor, ValueTypeKind};
use crate::types::{Color, Color32, Decimal, Quaternion, Rect, Vector2, Vector3, Vector4};

/// An enum value: the enum type plus the raw integer it carries.
///
/// The raw integer need not match a declared member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub enum_type: Arc<EnumType>,
    pub raw: i128,
}

impl EnumValue {
    pub fn new(enum_type: Arc<EnumType>, raw: i128) -> Self {
        Self { enum_type, raw }
    }

    /// Name of the declared member with this value, if any.
    pub fn member_name(&self) -> Option<&str> {
        self.enum_type.member_name(self.raw)
    }

    /// Check whether the raw value matches a declared member.
    pub fn is_declared(&self) -> bool {
        self.member_name().is_some()
    }
}

/// Dynamically typed codec value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    // Scalars
    Bool(bool),
    UInt8(u8),
    Int8(i8),
    Char(char),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    String(String),

    // Built-in value types
    Vector2(Vector2),
    Vector3(Vector3),
    Vector4(Vector4),
    Quaternion(Quaternion),
    Rect(Rect),
    Color(Color),
    Color32(Color32),

    /// User-registered value type; fields in layout order
    Composite {
        type_name: String,
        fields: Vec<Value>,
    },

    Enum(EnumValue),

    /// Array; `element` fixes the stride independently of the items
    Array {
        element: TypeDescriptor,
        items: Vec<Value>,
    },

    /// Ordered list, same wire framing as an array
    List {
        element: TypeDescriptor,
        items: Vec<Value>,
    },

    /// Absent value; serializes to an empty buffer
    Null,
}

impl Value {
    // ========================================================================
    // Type Information
    // ========================================================================

    /// Runtime type of this value, or `None` for `Null`.
    pub fn descriptor(&self) -> Option<TypeDescriptor> {
        let scalar = |s: ScalarType| Some(TypeDescriptor::Scalar(s));
        let value_type = |v: ValueTypeKind| Some(TypeDescriptor::ValueType(v));
        match self {
            Value::Bool(_) => scalar(ScalarType::Bool),
            Value::UInt8(_) => scalar(ScalarType::UInt8),
            Value::Int8(_) => scalar(ScalarType::Int8),
            Value::Char(_) => scalar(ScalarType::Char),
            Value::Int16(_) => scalar(ScalarType::Int16),
            Value::UInt16(_) => scalar(ScalarType::UInt16),
            Value::Int32(_) => scalar(ScalarType::Int32),
            Value::UInt32(_) => scalar(ScalarType::UInt32),
            Value::Int64(_) => scalar(ScalarType::Int64),
            Value::UInt64(_) => scalar(ScalarType::UInt64),
            Value::Float32(_) => scalar(ScalarType::Float32),
            Value::Float64(_) => scalar(ScalarType::Float64),
            Value::Decimal(_) => scalar(ScalarType::Decimal),
            Value::String(_) => scalar(ScalarType::String),
            Value::Vector2(_) => value_type(ValueTypeKind::Vector2),
            Value::Vector3(_) => value_type(ValueTypeKind::Vector3),
            Value::Vector4(_) => value_type(ValueTypeKind::Vector4),
            Value::Quaternion(_) => value_type(ValueTypeKind::Quaternion),
            Value::Rect(_) => value_type(ValueTypeKind::Rect),
            Value::Color(_) => value_type(ValueTypeKind::Color),
            Value::Color32(_) => value_type(ValueTypeKind::Color32),
            Value::Composite { type_name, .. } => Some(TypeDescriptor::Composite(type_name.clone())),
            Value::Enum(e) => Some(TypeDescriptor::Enum(e.enum_type.clone())),
            Value::Array { element, .. } => Some(TypeDescriptor::array(element.clone())),
            Value::List { element, .. } => Some(TypeDescriptor::list(element.clone())),
            Value::Null => None,
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> String {
        self.descriptor()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "null".to_string())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is an array or list.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Array { .. } | Value::List { .. })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Integer payload widened to i128 (integer scalars and enums only).
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::UInt8(v) => Some(*v as i128),
            Value::Int8(v) => Some(*v as i128),
            Value::Int16(v) => Some(*v as i128),
            Value::UInt16(v) => Some(*v as i128),
            Value::Int32(v) => Some(*v as i128),
            Value::UInt32(v) => Some(*v as i128),
            Value::Int64(v) => Some(*v as i128),
            Value::UInt64(v) => Some(*v as i128),
            Value::Enum(e) => Some(e.raw),
            _ => None,
        }
    }

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            other => other.as_i128().map(|v| v as f64),
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Items of an array or list.
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Array { items, .. } | Value::List { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Consume an array or list and return its items.
    pub fn into_items(self) -> Option<Vec<Value>> {
        match self {
            Value::Array { items, .. } | Value::List { items, .. } => Some(items),
            _ => None,
        }
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    /// Build an array value.
    pub fn array(element: TypeDescriptor, items: Vec<Value>) -> Self {
        Value::Array { element, items }
    }

    /// Build a list value.
    pub fn list(element: TypeDescriptor, items: Vec<Value>) -> Self {
        Value::List { element, items }
    }

    /// Build an enum value.
    pub fn enumeration(enum_type: &Arc<EnumType>, raw: i128) -> Self {
        Value::Enum(EnumValue::new(enum_type.clone(), raw))
    }

    /// Build a scalar value from an integer, checking that it fits.
    pub fn integer(ty: ScalarType, raw: i128) -> Option<Self> {
        match ty {
            ScalarType::UInt8 => u8::try_from(raw).ok().map(Value::UInt8),
            ScalarType::Int8 => i8::try_from(raw).ok().map(Value::Int8),
            ScalarType::Int16 => i16::try_from(raw).ok().map(Value::Int16),
            ScalarType::UInt16 => u16::try_from(raw).ok().map(Value::UInt16),
            ScalarType::Int32 => i32::try_from(raw).ok().map(Value::Int32),
            ScalarType::UInt32 => u32::try_from(raw).ok().map(Value::UInt32),
            ScalarType::Int64 => i64::try_from(raw).ok().map(Value::Int64),
            ScalarType::UInt64 => u64::try_from(raw).ok().map(Value::UInt64),
            _ => None,
        }
    }

    /// Zero value of a scalar type.
    pub fn scalar_default(ty: ScalarType) -> Self {
        match ty {
            ScalarType::Bool => Value::Bool(false),
            ScalarType::UInt8 => Value::UInt8(0),
            ScalarType::Int8 => Value::Int8(0),
            ScalarType::Char => Value::Char('\0'),
            ScalarType::Int16 => Value::Int16(0),
            ScalarType::UInt16 => Value::UInt16(0),
            ScalarType::Int32 => Value::Int32(0),
            ScalarType::UInt32 => Value::UInt32(0),
            ScalarType::Int64 => Value::Int64(0),
            ScalarType::UInt64 => Value::UInt64(0),
            ScalarType::Float32 => Value::Float32(0.0),
            ScalarType::Float64 => Value::Float64(0.0),
            ScalarType::Decimal => Value::Decimal(Decimal::ZERO),
            ScalarType::String => Value::String(String::new()),
        }
    }

    /// Zero value of a built-in value type.
    pub fn value_type_default(kind: ValueTypeKind) -> Self {
        match kind {
            ValueTypeKind::Vector2 => Value::Vector2(Vector2::default()),
            ValueTypeKind::Vector3 => Value::Vector3(Vector3::default()),
            ValueTypeKind::Vector4 => Value::Vector4(Vector4::default()),
            ValueTypeKind::Quaternion => Value::Quaternion(Quaternion::default()),
            ValueTypeKind::Rect => Value::Rect(Rect::default()),
            ValueTypeKind::Color => Value::Color(Color::default()),
            ValueTypeKind::Color32 => Value::Color32(Color32::default()),
        }
    }

    /// Default value of `ty`.
    ///
    /// Composites need their layout, so they return `None` here; see
    /// `GameCodec::default_for`.
    pub fn default_for(ty: &TypeDescriptor) -> Option<Self> {
        match ty {
            TypeDescriptor::Scalar(s) => Some(Value::scalar_default(*s)),
            TypeDescriptor::ValueType(v) => Some(Value::value_type_default(*v)),
            TypeDescriptor::Enum(e) => Some(Value::enumeration(e, 0)),
            TypeDescriptor::Array(e) => Some(Value::array((**e).clone(), Vec::new())),
            TypeDescriptor::List(e) => Some(Value::list((**e).clone(), Vec::new())),
            TypeDescriptor::Composite(_) => None,
        }
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )+
    };
}

impl_from_for_value!(
    bool => Bool,
    u8 => UInt8,
    i8 => Int8,
    char => Char,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    Decimal => Decimal,
    String => String,
    Vector2 => Vector2,
    Vector3 => Vector3,
    Vector4 => Vector4,
    Quaternion => Quaternion,
    Rect => Rect,
    Color => Color,
    Color32 => Color32,
    EnumValue => Enum,
);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::UInt8(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "'{v}'"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}m"),
            Value::String(v) => write!(f, "\"{v}\""),
            Value::Vector2(v) => write!(f, "({}, {})", v.x, v.y),
            Value::Vector3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Value::Vector4(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
            Value::Quaternion(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
            Value::Rect(v) => write!(
                f,
                "(x:{}, y:{}, width:{}, height:{})",
                v.x, v.y, v.width, v.height
            ),
            Value::Color(v) => write!(f, "RGBA({}, {}, {}, {})", v.r, v.g, v.b, v.a),
            Value::Color32(v) => write!(f, "RGBA({}, {}, {}, {})", v.r, v.g, v.b, v.a),
            Value::Composite { type_name, fields } => {
                write!(f, "{type_name}{{{} fields}}", fields.len())
            }
            Value::Enum(e) => match e.member_name() {
                Some(name) => write!(f, "{}::{name}", e.enum_type.name()),
                None => write!(f, "{}({})", e.enum_type.name(), e.raw),
            },
            Value::Array { items, .. } => write!(f, "[{} elements]", items.len()),
            Value::List { items, .. } => write!(f, "[{} elements]", items.len()),
            Value::Null => write!(f, "null"),
        }
    }
}
