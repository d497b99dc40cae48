// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire encoding and decoding.
//!
//! - [`scalar`] - Primitive scalars (little-endian, UTF-16LE text)
//! - [`value_type`] - Fixed-width value types and user composites
//! - [`enums`] - Enums through their integer representation
//! - [`sequence`] - Array and list frames (fixed stride or length-prefixed)
//! - [`codec`] - [`GameCodec`], the dynamic entry point
//! - [`typed`] - [`Wire`], the compile-time entry point
//! - [`json`] - JSON rendering for tooling

pub mod codec;
pub mod cursor;
pub mod enums;
pub mod json;
pub mod scalar;
pub mod sequence;
pub mod typed;
pub mod value_type;

pub use codec::GameCodec;
pub use cursor::FrameCursor;
pub use sequence::{inspect_frame, FrameHeader, FrameLayout};
pub use typed::{
    deserialize_array, deserialize_list, from_bytes, serialize_array, serialize_list, to_bytes,
    IntegerWire, Wire,
};
