// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Types command - list registered types.

use std::path::PathBuf;

use clap::Args;
use gamewire::TypeKey;

use crate::common::{Context, Result};

/// List registered types.
#[derive(Args, Clone, Debug)]
pub struct TypesCmd {
    /// TOML schema declaring composites and enums
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,
}

impl TypesCmd {
    pub fn run(self) -> Result<()> {
        let ctx = Context::load(self.schema.as_deref())?;
        let registry = ctx.codec.registry();

        println!("{:<16} {:<10} LENGTH", "TYPE", "KIND");
        for key in registry.keys() {
            let kind = match key {
                TypeKey::Scalar(_) => "scalar",
                TypeKey::ValueType(_) => "value",
                TypeKey::Composite(_) => "composite",
            };
            let length = match registry.stride(key) {
                Some(0) | None => "variable".to_string(),
                Some(n) => n.to_string(),
            };
            println!("{:<16} {:<10} {length}", key.to_string(), kind);
        }

        for e in &ctx.schema.enums {
            let Some(ty) = ctx.schema.enum_type(&e.name) else {
                continue;
            };
            println!(
                "{:<16} {:<10} variable ({}, {} members)",
                ty.name(),
                "enum",
                ty.underlying().name(),
                ty.members().len()
            );
        }
        Ok(())
    }
}
