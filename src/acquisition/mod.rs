//! The acquisition pipeline.
//!
//! One run moves through a fixed sequence: resolve the source, allocate an
//! exclusive workspace, copy the tree while hashing every file, write the
//! manifest / chain-of-custody / summary records, and optionally archive
//! the finished workspace. All state is confined to one workspace; runs
//! never share or resume anything.

/// Source specification validation and device pulls
pub mod source;

/// One-shot workspace allocation
pub mod workspace;

/// Recursive tree replication with per-file hashing
pub mod copier;

/// Top-level control flow for one run
pub mod orchestrator;

/// Post-hoc re-verification of a workspace against its manifest
pub mod verify;

pub use orchestrator::{run_acquisition, AcquisitionOptions, AcquisitionOutcome};
pub use verify::{verify_workspace, VerifyReport};
