// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Statically typed codec path.
//!
//! When the element type is known at compile time, [`Wire`] resolves the
//! encoder, decoder and stride without touching the runtime registry. The
//! bytes are identical to what [`GameCodec`](super::codec::GameCodec)
//! produces for the corresponding [`Value`](crate::Value).
//!
//! `Vec<T>` uses list framing and `Box<[T]>` array framing; both nest.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use gamewire::types::Vector3;
//!
//! let path = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 2.0)];
//! let bytes = gamewire::serialize_list(&path)?;
//! assert_eq!(bytes[4], 12);
//! assert_eq!(gamewire::deserialize_list::<Vector3>(&bytes)?, path);
//! # Ok(())
//! # }
//! ```

use std::num::NonZeroU8;

use super::scalar::{decode_char, decode_str, encode_char, encode_str, LeScalar};
use super::sequence;
use crate::core::{EnumMember, EnumType, Result, ScalarType, TypeDescriptor, ValueTypeKind};
use crate::types::{Color, Color32, Decimal, Quaternion, Rect, Vector2, Vector3, Vector4};

/// A type with a compile-time wire encoding.
pub trait Wire: Sized + Default {
    /// Fixed encoded length; `None` for variable-length types.
    const FIXED_LEN: Option<NonZeroU8>;

    /// Runtime descriptor of this type.
    fn descriptor() -> TypeDescriptor;

    /// Append the encoding of `self`.
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()>;

    /// Decode from a non-empty buffer.
    fn decode(data: &[u8]) -> Result<Self>;
}

/// Integer types usable as an enum representation.
pub trait IntegerWire: Wire + Copy {
    const SCALAR: ScalarType;

    fn to_i128(self) -> i128;
}

/// Stride byte for sequences of `T`.
pub fn stride_of<T: Wire>() -> u8 {
    T::FIXED_LEN.map_or(0, NonZeroU8::get)
}

macro_rules! impl_wire_le {
    ($($ty:ty => $desc:expr),+ $(,)?) => {
        $(
            impl Wire for $ty {
                const FIXED_LEN: Option<NonZeroU8> =
                    NonZeroU8::new(<$ty as LeScalar>::WIDTH as u8);

                fn descriptor() -> TypeDescriptor {
                    $desc
                }

                #[inline]
                fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
                    (*self).write_le(out);
                    Ok(())
                }

                #[inline]
                fn decode(data: &[u8]) -> Result<Self> {
                    <$ty as LeScalar>::read_le(data)
                }
            }
        )+
    };
}

impl_wire_le!(
    bool => TypeDescriptor::Scalar(ScalarType::Bool),
    u8 => TypeDescriptor::Scalar(ScalarType::UInt8),
    i8 => TypeDescriptor::Scalar(ScalarType::Int8),
    i16 => TypeDescriptor::Scalar(ScalarType::Int16),
    u16 => TypeDescriptor::Scalar(ScalarType::UInt16),
    i32 => TypeDescriptor::Scalar(ScalarType::Int32),
    u32 => TypeDescriptor::Scalar(ScalarType::UInt32),
    i64 => TypeDescriptor::Scalar(ScalarType::Int64),
    u64 => TypeDescriptor::Scalar(ScalarType::UInt64),
    f32 => TypeDescriptor::Scalar(ScalarType::Float32),
    f64 => TypeDescriptor::Scalar(ScalarType::Float64),
    Decimal => TypeDescriptor::Scalar(ScalarType::Decimal),
    Vector2 => TypeDescriptor::ValueType(ValueTypeKind::Vector2),
    Vector3 => TypeDescriptor::ValueType(ValueTypeKind::Vector3),
    Vector4 => TypeDescriptor::ValueType(ValueTypeKind::Vector4),
    Quaternion => TypeDescriptor::ValueType(ValueTypeKind::Quaternion),
    Rect => TypeDescriptor::ValueType(ValueTypeKind::Rect),
    Color => TypeDescriptor::ValueType(ValueTypeKind::Color),
    Color32 => TypeDescriptor::ValueType(ValueTypeKind::Color32),
);

macro_rules! impl_integer_wire {
    ($($ty:ty => $scalar:ident),+ $(,)?) => {
        $(
            impl IntegerWire for $ty {
                const SCALAR: ScalarType = ScalarType::$scalar;

                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }
            }
        )+
    };
}

impl_integer_wire!(
    u8 => UInt8,
    i8 => Int8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
);

impl Wire for char {
    const FIXED_LEN: Option<NonZeroU8> = NonZeroU8::new(1);

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarType::Char)
    }

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        encode_char(*self, out)
    }

    fn decode(data: &[u8]) -> Result<Self> {
        decode_char(data)
    }
}

impl Wire for String {
    const FIXED_LEN: Option<NonZeroU8> = None;

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarType::String)
    }

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        encode_str(self, out);
        Ok(())
    }

    fn decode(data: &[u8]) -> Result<Self> {
        decode_str(data)
    }
}

impl<T: Wire> Wire for Vec<T> {
    const FIXED_LEN: Option<NonZeroU8> = None;

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::list(T::descriptor())
    }

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        encode_frame(self, out)
    }

    fn decode(data: &[u8]) -> Result<Self> {
        decode_frame(data)
    }
}

impl<T: Wire> Wire for Box<[T]> {
    const FIXED_LEN: Option<NonZeroU8> = None;

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        encode_frame(self, out)
    }

    fn decode(data: &[u8]) -> Result<Self> {
        decode_frame(data).map(Vec::into_boxed_slice)
    }
}

fn encode_frame<T: Wire>(items: &[T], out: &mut Vec<u8>) -> Result<()> {
    let element = T::descriptor().to_string();
    sequence::write_frame(out, &element, stride_of::<T>(), items, T::encode_into)
}

fn decode_frame<T: Wire>(data: &[u8]) -> Result<Vec<T>> {
    let element = T::descriptor().to_string();
    sequence::read_frame(data, &element, stride_of::<T>(), from_bytes::<T>)
}

// =============================================================================
// Entry points
// =============================================================================

/// Serialize a statically typed value.
pub fn to_bytes<T: Wire>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    value.encode_into(&mut out)?;
    Ok(out)
}

/// Deserialize a statically typed value; an empty buffer yields `T::default()`.
pub fn from_bytes<T: Wire>(data: &[u8]) -> Result<T> {
    if data.is_empty() {
        return Ok(T::default());
    }
    T::decode(data)
}

/// Serialize a slice with array framing.
pub fn serialize_array<T: Wire>(items: &[T]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_frame(items, &mut out)?;
    Ok(out)
}

/// Deserialize an array; an empty buffer yields an empty array.
pub fn deserialize_array<T: Wire>(data: &[u8]) -> Result<Box<[T]>> {
    from_bytes(data)
}

/// Serialize a slice with list framing.
pub fn serialize_list<T: Wire>(items: &[T]) -> Result<Vec<u8>> {
    serialize_array(items)
}

/// Deserialize a list; an empty buffer yields an empty list.
pub fn deserialize_list<T: Wire>(data: &[u8]) -> Result<Vec<T>> {
    from_bytes(data)
}

/// Enum type for an [`open_enum!`](crate::open_enum) declaration.
#[doc(hidden)]
pub fn open_enum_type<I: IntegerWire>(
    name: &str,
    members: impl IntoIterator<Item = (&'static str, I)>,
) -> EnumType {
    let members = members
        .into_iter()
        .map(|(name, value)| EnumMember {
            name: name.to_string(),
            value: value.to_i128(),
        })
        .collect();
    EnumType::from_parts(name, I::SCALAR, members)
}

/// Declare an open enum: a newtype over an integer with named constants.
///
/// Any value of the integer type is a valid instance, so decoding never fails
/// on an undeclared value.
///
/// ```
/// gamewire::open_enum! {
///     /// Team affiliation.
///     pub enum Faction: i32 {
///         Neutral = 0,
///         Red = 1,
///         Blue = 2,
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = gamewire::to_bytes(&Faction::Blue)?;
/// assert_eq!(bytes, [2, 0, 0, 0]);
///
/// let unknown: Faction = gamewire::from_bytes(&[9, 0, 0, 0])?;
/// assert_eq!(unknown.raw(), 9);
/// assert!(!unknown.is_declared());
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ty {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[repr(transparent)]
        $vis struct $name(pub $repr);

        #[allow(non_upper_case_globals, dead_code)]
        impl $name {
            $($(#[$vmeta])* pub const $variant: $name = $name($value);)*

            /// Declared members, in declaration order.
            pub const MEMBERS: &'static [(&'static str, $name)] =
                &[$((stringify!($variant), $name($value))),*];

            /// Underlying integer.
            pub const fn raw(self) -> $repr {
                self.0
            }

            /// Name of the declared member with this value, if any.
            pub fn name(self) -> ::std::option::Option<&'static str> {
                Self::MEMBERS
                    .iter()
                    .find(|(_, member)| *member == self)
                    .map(|(name, _)| *name)
            }

            /// Check whether the value matches a declared member.
            pub fn is_declared(self) -> bool {
                self.name().is_some()
            }

            /// Runtime enum type for the dynamic codec.
            pub fn enum_type() -> $crate::core::EnumType {
                $crate::encoding::typed::open_enum_type::<$repr>(
                    stringify!($name),
                    Self::MEMBERS.iter().map(|(name, member)| (*name, member.0)),
                )
            }
        }

        impl $crate::encoding::typed::Wire for $name {
            const FIXED_LEN: ::std::option::Option<::std::num::NonZeroU8> = None;

            fn descriptor() -> $crate::core::TypeDescriptor {
                $crate::core::TypeDescriptor::enumeration(Self::enum_type())
            }

            fn encode_into(&self, out: &mut ::std::vec::Vec<u8>) -> $crate::core::Result<()> {
                <$repr as $crate::encoding::typed::Wire>::encode_into(&self.0, out)
            }

            fn decode(data: &[u8]) -> $crate::core::Result<Self> {
                <$repr as $crate::encoding::typed::Wire>::decode(data).map($name)
            }
        }

        impl ::std::convert::From<$name> for $crate::core::Value {
            fn from(value: $name) -> Self {
                $crate::core::Value::Enum($crate::core::EnumValue::new(
                    ::std::sync::Arc::new($name::enum_type()),
                    <$repr as $crate::encoding::typed::IntegerWire>::to_i128(value.0),
                ))
            }
        }
    };
}
