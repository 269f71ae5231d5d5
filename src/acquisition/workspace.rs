use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;

use crate::constants::{WORKSPACE_PREFIX, WORKSPACE_TIMESTAMP_FORMAT};
use crate::errors::AcquireError;

/// Build the workspace directory name for a subject at a point in time:
/// `acq_{subject_id}_{YYYYMMDD_HHMMSS}` (UTC, second granularity).
fn workspace_name(subject_id: &str, now: &DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}",
        WORKSPACE_PREFIX,
        subject_id,
        now.format(WORKSPACE_TIMESTAMP_FORMAT)
    )
}

/// Allocate a fresh workspace directory for one acquisition run.
///
/// The base directory is created if needed; the workspace itself is created
/// with fail-if-exists semantics. Two acquisitions of the same subject
/// within the same second collide explicitly instead of silently merging —
/// this is the only concurrency guard the pipeline has, and it is
/// deliberate: the workspace is owned exclusively by one run.
pub fn allocate_workspace(base_dir: &Path, subject_id: &str) -> Result<PathBuf> {
    allocate_workspace_at(base_dir, subject_id, &Utc::now())
}

/// Allocation with an explicit timestamp, split out so collision semantics
/// are testable without racing the wall clock.
pub fn allocate_workspace_at(
    base_dir: &Path,
    subject_id: &str,
    now: &DateTime<Utc>,
) -> Result<PathBuf> {
    fs::create_dir_all(base_dir)
        .with_context(|| format!("Failed to create base directory {}", base_dir.display()))?;

    let workspace = base_dir.join(workspace_name(subject_id, now));
    match fs::create_dir(&workspace) {
        Ok(()) => {
            info!("Created workspace {}", workspace.display());
            Ok(workspace)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(AcquireError::WorkspaceCollision(workspace).into())
        }
        Err(e) => Err(e).with_context(|| {
            format!("Failed to create workspace under {}", base_dir.display())
        }),
    }
}
