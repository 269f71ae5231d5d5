use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::DEFAULT_OUTDIR;

/// Command-line arguments for the rust-acquire tool.
///
/// The default invocation performs an acquisition: exactly one source
/// (`--input` or `--device-package`) plus the custody metadata fields.
/// `--consent` is a mandatory human-acknowledgment gate, checked before
/// anything else happens.
#[derive(Parser, Debug)]
#[clap(
    name = "rust-acquire",
    about = "Forensic acquisition tool: copy a backup folder or device pull into a hashed evidence workspace"
)]
pub struct Args {
    /// Path to the source backup folder to acquire
    #[clap(short, long)]
    pub input: Option<PathBuf>,

    /// Application package to pull from a connected device via adb
    /// (e.g. com.example.chat)
    #[clap(long)]
    pub device_package: Option<String>,

    /// Base output directory for acquisition workspaces
    #[clap(short, long, default_value = DEFAULT_OUTDIR)]
    pub outdir: PathBuf,

    /// Case ID for the chain-of-custody record
    #[clap(long, default_value = "CASE-UNKNOWN")]
    pub case_id: String,

    /// Name of the person collecting the evidence
    #[clap(long, default_value = "Collector-Unknown")]
    pub collector: String,

    /// Reason / notes for the chain-of-custody record
    #[clap(long, default_value = "Forensic acquisition")]
    pub reason: String,

    /// Create a zip archive of the finished workspace and record its hash
    #[clap(long)]
    pub zip: bool,

    /// Confirm you have legal consent / authorization to acquire this data
    #[clap(long)]
    pub consent: bool,

    /// Verbose logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-hash every acquired file in a workspace against its manifest
    Verify {
        /// Path to the acquisition workspace to verify
        workspace: PathBuf,
    },
}
