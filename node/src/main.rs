// Copyright (c) 2026 Quill Ledger Contributors. MIT License.
// See LICENSE for details.

//! # Quill Node Operator Tool
//!
//! Entry point for the `quill-node` binary. Parses CLI arguments,
//! initializes logging, loads the identity a command needs, and dispatches:
//!
//! - `keygen`, `identity`: key management
//! - `propose`, `endorse`, `assemble`: the endorsement flow
//! - `sign-config`, `anchor-update`: config updates
//! - `inspect`, `version`: diagnostics

mod cli;
mod commands;
mod keys;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{Commands, QuillNodeCli};

fn main() -> Result<()> {
    let cli = QuillNodeCli::parse();
    logging::init_logging(cli.log.as_deref(), cli.command.log_level(), cli.log_format);

    match cli.command {
        Commands::Keygen(args) => commands::keygen(args),
        Commands::Identity(args) => commands::identity(args),
        Commands::Propose(args) => {
            let tx_id = commands::propose(args)?;
            println!("{}", tx_id);
            Ok(())
        }
        Commands::Endorse(args) => commands::endorse_proposal(args),
        Commands::Assemble(args) => commands::assemble(args),
        Commands::SignConfig(args) => commands::sign_config(args),
        Commands::AnchorUpdate(args) => commands::anchor_update(args),
        Commands::Inspect(args) => commands::inspect(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Prints version information to stdout.
fn print_version() {
    println!("quill-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol   {}", quill_protocol::config::PROTOCOL_VERSION);
    println!("rustc      {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
