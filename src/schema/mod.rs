// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type expressions and schema files.
//!
//! This module provides:
//! - [`expr`] - Pest parser for type expressions (`list<vector3>`, `int16[]`)
//! - [`config`] - TOML schema files declaring composites and enums

pub mod config;
pub mod expr;

pub use config::{CompositeConfig, EnumConfig, SchemaConfig};
pub use expr::{parse_type_expr, resolve_type_expr, TypeExpr};
