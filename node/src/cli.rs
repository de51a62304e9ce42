//! # CLI Interface
//!
//! Defines the command-line argument structure for `quill-node` using
//! `clap` derive. Every subcommand reads and writes files; envelopes,
//! proposals and responses are stored in wire encoding.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Quill node operator tool.
///
/// Builds and signs smart-contract proposals, endorses them for local
/// testing, assembles endorsed transactions, and prepares or co-signs
/// group config updates.
#[derive(Parser, Debug)]
#[command(
    name = "quill-node",
    about = "Quill node operator tool",
    version,
    propagate_version = true
)]
pub struct QuillNodeCli {
    /// Log filter directives. Takes precedence over `RUST_LOG`.
    #[arg(long, global = true, env = "QUILL_LOG")]
    pub log: Option<String>,

    /// Log line format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh Ed25519 key and write its hex seed to a file.
    Keygen(KeygenArgs),
    /// Print the serialized identity for a key.
    Identity(IdentityArgs),
    /// Build and sign a smart-contract proposal.
    Propose(ProposeArgs),
    /// Endorse a signed proposal with a fixed response payload.
    Endorse(EndorseArgs),
    /// Assemble a proposal and its endorsements into a signed transaction.
    Assemble(AssembleArgs),
    /// Sanity check a config update envelope and add a co-signature.
    SignConfig(SignConfigArgs),
    /// Build a signed anchor-node update for one organization.
    AnchorUpdate(AnchorUpdateArgs),
    /// Print a JSON summary of an envelope.
    Inspect(InspectArgs),
    /// Print version information and exit.
    Version,
}

impl Commands {
    /// Level used when no filter is configured. Commands whose stdout is the
    /// whole result only log warnings.
    pub fn log_level(&self) -> &'static str {
        match self {
            Commands::Identity(_) | Commands::Inspect(_) | Commands::Version => "warn",
            _ => "info",
        }
    }
}

/// The signing identity: a key file plus the MSP it belongs to.
#[derive(Args, Debug, Clone)]
pub struct IdentityArgs {
    /// File holding the hex-encoded Ed25519 seed.
    #[arg(long, env = "QUILL_KEY")]
    pub key: PathBuf,

    /// MSP id the key is enrolled under.
    #[arg(long, env = "QUILL_MSP_ID")]
    pub msp_id: String,
}

#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Where to write the key.
    #[arg(long)]
    pub out: PathBuf,

    /// Overwrite an existing key file.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ProposeArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Group the proposal targets.
    #[arg(long)]
    pub group: String,

    /// Smart contract name.
    #[arg(long)]
    pub contract: String,

    /// Invocation argument, repeatable. The first one is the function name.
    #[arg(long = "arg")]
    pub args: Vec<String>,

    /// Transient entry as `key=hex`, repeatable. Never committed.
    #[arg(long = "transient")]
    pub transient: Vec<String>,

    /// Where to write the signed proposal.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct EndorseArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Signed proposal to endorse.
    #[arg(long)]
    pub proposal: PathBuf,

    /// Response payload (hex) the endorsement vouches for.
    #[arg(long)]
    pub payload_hex: String,

    /// Where to write the proposal response.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct AssembleArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Signed proposal the responses answer.
    #[arg(long)]
    pub proposal: PathBuf,

    /// Proposal response file, repeatable, in endorsement order.
    #[arg(long = "response", required = true)]
    pub responses: Vec<PathBuf>,

    /// Where to write the transaction envelope.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct SignConfigArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Group the update must target.
    #[arg(long)]
    pub group: String,

    /// Incoming config update envelope.
    #[arg(long)]
    pub envelope: PathBuf,

    /// Where to write the co-signed envelope.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct AnchorUpdateArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    #[arg(long)]
    pub group: String,

    /// Organization whose anchor nodes are replaced.
    #[arg(long)]
    pub org: String,

    /// Anchor node as `host:port`, repeatable.
    #[arg(long = "anchor")]
    pub anchors: Vec<String>,

    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Envelope to summarize.
    #[arg(long)]
    pub envelope: PathBuf,
}
