//! Fatal error taxonomy and process exit codes.
//!
//! Per-file copy problems are not represented here: they are recovered
//! locally by the tree copier and surface only as a failure count. The
//! variants below are the errors that terminate a run, each mapped to a
//! distinct exit status so callers can tell outcomes apart.

use std::path::PathBuf;

use thiserror::Error;

/// Exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status when `--consent` was not given.
pub const EXIT_CONSENT_NOT_GIVEN: i32 = 1;
/// Exit status for an invalid request or unreachable source.
pub const EXIT_SOURCE: i32 = 2;
/// Exit status when the workspace path already exists.
pub const EXIT_WORKSPACE_COLLISION: i32 = 3;
/// Exit status when a durable record could not be written.
pub const EXIT_SERIALIZATION: i32 = 4;
/// Exit status when archive creation failed.
pub const EXIT_ARCHIVE: i32 = 5;
/// Exit status when workspace verification found mismatches.
pub const EXIT_VERIFY_FAILED: i32 = 6;
/// Exit status for unclassified fatal errors.
pub const EXIT_FAILURE: i32 = 10;

/// Fatal errors that abort an acquisition run.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// Missing or ambiguous source specification.
    #[error("invalid acquisition request: {0}")]
    Configuration(String),

    /// Source path missing, not a directory, or device unreachable after
    /// exhausting all candidate locations.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// The target workspace path already exists. Never silently reused.
    #[error("workspace already exists: {}", .0.display())]
    WorkspaceCollision(PathBuf),

    /// A durable record (manifest, custody, summary, archive info) could
    /// not be written to its final path.
    #[error("failed to write {record}: {cause}")]
    Serialization { record: String, cause: String },

    /// Archive creation failed. Does not invalidate an already-durable
    /// manifest/custody pair.
    #[error("archive creation failed: {0}")]
    Archive(String),
}

impl AcquireError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AcquireError::Configuration(_) | AcquireError::SourceUnavailable(_) => EXIT_SOURCE,
            AcquireError::WorkspaceCollision(_) => EXIT_WORKSPACE_COLLISION,
            AcquireError::Serialization { .. } => EXIT_SERIALIZATION,
            AcquireError::Archive(_) => EXIT_ARCHIVE,
        }
    }
}

/// Map any fatal error onto a process exit status, using the typed
/// classification when one is present in the chain.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AcquireError>() {
        Some(e) => e.exit_code(),
        None => EXIT_FAILURE,
    }
}
