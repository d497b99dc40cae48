// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode command - JSON value to hex payload.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use gamewire::encoding::json::value_from_json;

use crate::common::{format_hex, Context, Result};

/// Encode a JSON value.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// Target type expression (e.g. `int32`, `vector3[]`, `list<string>`)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    ty: String,

    /// TOML schema declaring composites and enums
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Print bytes as space-separated pairs
    #[arg(long)]
    spaced: bool,

    /// Value as JSON
    #[arg(value_name = "JSON")]
    value: String,
}

impl EncodeCmd {
    pub fn run(self) -> Result<()> {
        let ctx = Context::load(self.schema.as_deref())?;
        let ty = ctx.resolve(&self.ty)?;

        let json: serde_json::Value =
            serde_json::from_str(&self.value).context("value is not valid JSON")?;
        let value = value_from_json(&json, &ty, ctx.codec.registry())?;
        let bytes = ctx.codec.serialize(&value)?;

        if self.spaced {
            println!("{}", format_hex(&bytes));
        } else {
            println!("{}", hex::encode(&bytes));
        }
        Ok(())
    }
}
