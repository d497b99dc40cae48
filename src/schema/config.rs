// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! TOML schema configuration.
//!
//! A schema file declares user composites and enum types:
//!
//! ```toml
//! [[composite]]
//! name = "GridPos"
//! fields = [["x", "int16"], ["y", "int16"]]
//!
//! [[enum]]
//! name = "Faction"
//! underlying = "int32"
//! members = { Neutral = 0, Red = 1, Blue = 2 }
//! ```
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use gamewire::schema::SchemaConfig;
//!
//! let schema = SchemaConfig::from_toml_str(r#"
//!     [[composite]]
//!     name = "GridPos"
//!     fields = [["x", "int16"], ["y", "int16"]]
//! "#)?;
//! let codec = schema.build_codec()?;
//! let ty = schema.resolve("list<GridPos>")?;
//! assert_eq!(codec.stride_of(ty.element().unwrap())?, 4);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::expr::parse_type_expr;
use crate::core::{
    CodecError, CompositeLayout, EnumType, Result, ScalarType, TypeDescriptor, TypeRegistry,
};
use crate::encoding::GameCodec;

fn default_underlying() -> String {
    "int32".to_string()
}

/// A `[[composite]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeConfig {
    pub name: String,
    /// `[field name, scalar type]` pairs in wire order
    pub fields: Vec<(String, String)>,
}

impl CompositeConfig {
    /// Validate into a layout.
    pub fn layout(&self) -> Result<CompositeLayout> {
        let fields = self
            .fields
            .iter()
            .map(|(field, ty)| {
                ScalarType::try_from_str(ty)
                    .map(|ty| (field.clone(), ty))
                    .ok_or_else(|| {
                        CodecError::invalid_schema(
                            self.name.clone(),
                            format!("field '{field}' has unknown scalar type '{ty}'"),
                        )
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        CompositeLayout::new(self.name.clone(), fields)
    }
}

/// An `[[enum]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumConfig {
    pub name: String,
    #[serde(default = "default_underlying")]
    pub underlying: String,
    #[serde(default)]
    pub members: BTreeMap<String, i64>,
}

impl EnumConfig {
    /// Validate into an enum type. Members are ordered by value.
    pub fn enum_type(&self) -> Result<EnumType> {
        let underlying = ScalarType::try_from_str(&self.underlying).ok_or_else(|| {
            CodecError::invalid_schema(
                self.name.clone(),
                format!("unknown enum representation '{}'", self.underlying),
            )
        })?;
        let mut members: Vec<(&String, i64)> =
            self.members.iter().map(|(name, v)| (name, *v)).collect();
        members.sort_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));

        let mut ty = EnumType::new(self.name.clone(), underlying)?;
        for (name, value) in members {
            ty = ty.with_member(name.clone(), i128::from(value));
        }
        Ok(ty)
    }
}

/// Parsed schema file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(default, rename = "composite")]
    pub composites: Vec<CompositeConfig>,
    #[serde(default, rename = "enum")]
    pub enums: Vec<EnumConfig>,
}

impl SchemaConfig {
    /// Parse a schema from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SchemaConfig = toml::from_str(text)
            .map_err(|e| CodecError::invalid_schema("schema", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a schema file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CodecError::invalid_schema(path.display().to_string(), e.to_string())
        })?;
        debug!(path = %path.display(), "loading schema file");
        Self::from_toml_str(&text)
    }

    /// Check names and build every declared type once.
    ///
    /// A name declared twice in the same section keeps its last definition. A
    /// name declared as both a composite and an enum is rejected.
    pub fn validate(&self) -> Result<()> {
        let mut composite_names = HashSet::new();
        for composite in &self.composites {
            if !composite_names.insert(composite.name.as_str()) {
                warn!(name = %composite.name, "composite declared more than once; last wins");
            }
            composite.layout()?;
        }
        let mut enum_names = HashSet::new();
        for e in &self.enums {
            if !enum_names.insert(e.name.as_str()) {
                warn!(name = %e.name, "enum declared more than once; last wins");
            }
            if composite_names.contains(e.name.as_str()) {
                return Err(CodecError::invalid_schema(
                    e.name.clone(),
                    "declared as both a composite and an enum",
                ));
            }
            e.enum_type()?;
        }
        Ok(())
    }

    /// Registry with the builtins plus the declared composites.
    pub fn build_registry(&self) -> Result<TypeRegistry> {
        let mut builder = TypeRegistry::builder().with_builtins();
        for composite in &self.composites {
            builder = builder.register_composite(composite.layout()?)?;
        }
        Ok(builder.build())
    }

    /// Codec over [`build_registry`](Self::build_registry).
    pub fn build_codec(&self) -> Result<GameCodec> {
        Ok(GameCodec::with_registry(self.build_registry()?))
    }

    /// Declared enum type by name.
    pub fn enum_type(&self, name: &str) -> Option<Arc<EnumType>> {
        self.enums
            .iter()
            .rev()
            .find(|e| e.name == name)
            .and_then(|e| e.enum_type().ok())
            .map(Arc::new)
    }

    /// Parse a type expression, binding names declared in this schema.
    pub fn resolve(&self, expr: &str) -> Result<TypeDescriptor> {
        let lookup = |name: &str| {
            if let Some(e) = self.enum_type(name) {
                Some(TypeDescriptor::Enum(e))
            } else if self.composites.iter().any(|c| c.name == name) {
                Some(TypeDescriptor::Composite(name.to_string()))
            } else {
                None
            }
        };
        parse_type_expr(expr)?.resolve(&lookup)
    }
}
