// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Gamewire CLI
//!
//! Encode, decode and inspect gamewire payloads from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON as a typed payload (prints hex)
//! gamewire encode --type 'list<int32>' '[1, 2, 3]'
//!
//! # Decode a hex payload as JSON
//! gamewire decode --type 'list<int32>' 0300000004010000000200000003000000
//!
//! # Show the frame layout of a sequence payload
//! gamewire inspect '03000000 04 01000000 02000000 03000000'
//!
//! # List registered types, including a schema file
//! gamewire types --schema game.toml
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DecodeCmd, EncodeCmd, InspectCmd, TypesCmd};
use common::Result;

/// Gamewire - binary codec toolkit for game-state data
///
/// Payloads are not self-describing, so encode and decode take the
/// target type as a type expression such as `int32`, `vector3[]`,
/// `list<string>` or a name declared in a schema file.
#[derive(Parser, Clone)]
#[command(name = "gamewire")]
#[command(about = "Binary codec toolkit for game-state data", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Encode a JSON value and print the payload as hex
    Encode(EncodeCmd),

    /// Decode a hex payload and print it as JSON
    Decode(DecodeCmd),

    /// Show the count, stride and element spans of a sequence payload
    Inspect(InspectCmd),

    /// List registered types and their fixed lengths
    Types(TypesCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(cmd) => cmd.run(),
        Commands::Decode(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Types(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
