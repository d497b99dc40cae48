// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Gamewire
//!
//! Compact, endianness-normalized binary codec for game-state data.
//!
//! Values are encoded without tags: the caller supplies the target type when
//! decoding. Scalars are little-endian, text is UTF-16LE, and arrays and lists
//! share one frame layout that drops per-element lengths when the element type
//! has a fixed width:
//!
//! ```text
//! [count: i32 LE][stride: u8][elements...]
//! ```
//!
//! ## Architecture
//!
//! - `core/` - Type descriptors, dynamic values, errors, the type registry
//! - `types/` - Decimal and the built-in geometry/color value types
//! - `encoding/` - Scalar, value-type, enum and sequence codecs
//! - `schema/` - Type expressions and TOML schema files
//!
//! ## Example: Dynamic values
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use gamewire::{GameCodec, ScalarType, TypeDescriptor, Value};
//!
//! let codec = GameCodec::new();
//! let names = Value::array(
//!     ScalarType::String.into(),
//!     vec![Value::from("ada"), Value::from("bo")],
//! );
//! let bytes = codec.serialize(&names)?;
//! assert_eq!(bytes[4], 0); // variable-length elements
//!
//! let ty: TypeDescriptor = "string[]".parse()?;
//! assert_eq!(codec.deserialize(&bytes, &ty)?, names);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Static types
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = gamewire::serialize_list(&[1i32, 2, 3])?;
//! assert_eq!(
//!     bytes,
//!     [3, 0, 0, 0, 4, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0]
//! );
//! assert_eq!(gamewire::deserialize_list::<i32>(&bytes)?, vec![1, 2, 3]);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{
    CodecError, CompositeLayout, EnumType, EnumValue, Result, ScalarType, TypeDescriptor,
    TypeKey, TypeRegistry, Value, ValueTypeKind,
};

// Encoding/decoding
pub mod encoding;

pub use encoding::{
    deserialize_array, deserialize_list, from_bytes, serialize_array, serialize_list, to_bytes,
    GameCodec, Wire,
};

// Type expressions and schema files
pub mod schema;

pub use schema::SchemaConfig;

// Decimal and value types
pub mod types;
