// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - hex payload to JSON.

use std::path::PathBuf;

use clap::Args;
use gamewire::encoding::json::value_to_json;

use crate::common::{parse_hex, Context, Result};

/// Decode a hex payload.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Target type expression (e.g. `int32`, `vector3[]`, `list<string>`)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    ty: String,

    /// TOML schema declaring composites and enums
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Print JSON on one line
    #[arg(long)]
    compact: bool,

    /// Payload as hex (whitespace allowed)
    #[arg(value_name = "HEX")]
    payload: String,
}

impl DecodeCmd {
    pub fn run(self) -> Result<()> {
        let ctx = Context::load(self.schema.as_deref())?;
        let ty = ctx.resolve(&self.ty)?;
        let bytes = parse_hex(&self.payload)?;

        let value = ctx.codec.deserialize(&bytes, &ty)?;
        let json = value_to_json(&value, ctx.codec.registry());

        if self.compact {
            println!("{}", serde_json::to_string(&json)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Ok(())
    }
}
