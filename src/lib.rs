//! # rust-acquire
//!
//! A forensic acquisition pipeline for a chat application's local storage:
//! copy a backup folder (or a device pull) into an immutable, timestamped
//! evidence workspace, hash every copied file, and write a manifest plus
//! chain-of-custody and summary records describing the collection event.
//!
//! ## Overview
//!
//! One acquisition run is sequential and single-threaded by design: the
//! integrity guarantees rest on deterministic step ordering (workspace
//! allocated exactly once, manifest durable before the custody record,
//! both durable before any archive), not on throughput. The only
//! concurrency guard is the fail-if-exists workspace allocation.
//!
//! ## Guarantees
//!
//! - **Integrity**: every copied file is hashed with streaming SHA-256,
//!   computed from the copy — the manifest attests to what the workspace
//!   holds, not to what existed at the source.
//! - **Atomicity**: every durable record (and the optional archive) is
//!   written to a temporary sibling and renamed into place; no observer
//!   ever sees a partial document at the final path.
//! - **Partial-failure tolerance**: unreadable files are recorded and
//!   skipped; the rest of the tree is still acquired.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::PathBuf;
//! use rust_acquire::acquisition::{run_acquisition, AcquisitionOptions};
//!
//! # fn main() -> anyhow::Result<()> {
//! let outcome = run_acquisition(&AcquisitionOptions {
//!     input: Some(PathBuf::from("/backups/chat")),
//!     device_package: None,
//!     outdir: PathBuf::from("./acquisitions"),
//!     case_id: "CASE-1".to_string(),
//!     collector: "Tester".to_string(),
//!     reason: "Forensic acquisition".to_string(),
//!     archive: false,
//! })?;
//!
//! println!("Acquired {} files into {}", outcome.total_files, outcome.workspace.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`models`]: Durable record schemas (manifest, custody, summary)
//! - [`acquisition`]: The pipeline (source, workspace, copier, orchestrator, verify)
//! - [`utils`]: Hashing, atomic writes, archiving, summary aggregation
//! - [`errors`]: Fatal error taxonomy and exit codes
//! - [`constants`]: Application-wide constants

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Durable record schemas
pub mod models;

/// The acquisition pipeline
pub mod acquisition;

/// Hashing, atomic writes, archiving, and summary utilities
pub mod utils;

/// Fatal error taxonomy and process exit codes
pub mod errors;

/// Application constants
pub mod constants;
