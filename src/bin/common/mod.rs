// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::Context as _;
use gamewire::{GameCodec, SchemaConfig, TypeDescriptor};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Codec plus the schema used to resolve type names.
pub struct Context {
    pub codec: GameCodec,
    pub schema: SchemaConfig,
}

impl Context {
    /// Load the optional schema file and build the codec.
    pub fn load(schema: Option<&Path>) -> Result<Self> {
        let schema = match schema {
            Some(path) => SchemaConfig::from_path(path)
                .with_context(|| format!("failed to load schema {}", path.display()))?,
            None => SchemaConfig::default(),
        };
        let codec = schema.build_codec()?;
        Ok(Self { codec, schema })
    }

    /// Resolve a type expression against the schema.
    pub fn resolve(&self, expr: &str) -> Result<TypeDescriptor> {
        let ty = self
            .schema
            .resolve(expr)
            .with_context(|| format!("invalid type '{expr}'"))?;
        Ok(ty)
    }
}

/// Parse hex input, ignoring whitespace, `_`, `:` and a leading `0x`.
pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != ':')
        .collect();
    hex::decode(&digits).with_context(|| format!("invalid hex input '{input}'"))
}

/// Format bytes as space-separated hex pairs.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
