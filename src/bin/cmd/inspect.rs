// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show the frame layout of a sequence payload.

use std::path::PathBuf;

use clap::Args;
use gamewire::encoding::inspect_frame;
use gamewire::encoding::json::value_to_json;

use crate::common::{format_hex, parse_hex, Context, Result};

/// Inspect a sequence frame.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Element type; when given, each element is decoded
    #[arg(short = 't', long = "element", value_name = "TYPE")]
    element: Option<String>,

    /// TOML schema declaring composites and enums
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Payload as hex (whitespace allowed)
    #[arg(value_name = "HEX")]
    payload: String,
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        let bytes = parse_hex(&self.payload)?;
        let layout = inspect_frame(&bytes)?;

        let ctx = Context::load(self.schema.as_deref())?;
        let element = match &self.element {
            Some(expr) => Some(ctx.resolve(expr)?),
            None => None,
        };

        let header = layout.header;
        println!("=== Sequence frame ({} bytes) ===", bytes.len());
        println!("Count:    {}", header.count);
        if header.is_fixed() {
            println!("Stride:   {} (fixed-width elements)", header.stride);
        } else {
            println!("Stride:   0 (length-prefixed elements)");
        }
        if let Some(ty) = &element {
            let expected = ctx.codec.stride_of(ty)?;
            if expected != header.stride {
                println!("Warning:  {ty} expects stride {expected}");
            }
        }

        println!();
        for (index, span) in layout.elements.iter().enumerate() {
            let data = &bytes[span.clone()];
            println!(
                "  [{index}] {}..{} ({} bytes) {}",
                span.start,
                span.end,
                data.len(),
                format_hex(data)
            );
            if let Some(ty) = &element {
                match ctx.codec.deserialize(data, ty) {
                    Ok(value) => println!(
                        "      {}",
                        value_to_json(&value, ctx.codec.registry())
                    ),
                    Err(e) => println!("      <{e}>"),
                }
            }
        }

        if layout.trailing > 0 {
            println!();
            println!("Trailing: {} bytes (ignored)", layout.trailing);
        }
        Ok(())
    }
}
