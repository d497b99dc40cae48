// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout gamewire.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error handling
//! - [`TypeDescriptor`] - Runtime type identifiers
//! - [`Value`] - Dynamic value representation
//! - [`TypeRegistry`] - Frozen encoder/decoder table

pub mod descriptor;
pub mod error;
pub mod registry;
pub mod value;

pub use descriptor::{EnumMember, EnumType, ScalarType, TypeDescriptor, TypeKey, ValueTypeKind};
pub use error::{CodecError, Result};
pub use registry::{
    CompositeField, CompositeLayout, DecodeFn, EncodeFn, RegistryEntry, TypeRegistry,
    TypeRegistryBuilder,
};
pub use value::{EnumValue, Value};
