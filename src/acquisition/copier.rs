use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use filetime::FileTime;
use log::{debug, warn};
use walkdir::WalkDir;

use crate::errors::AcquireError;
use crate::models::ManifestEntry;
use crate::utils::hash::sha256_file;

/// One file the copier could not acquire. Recorded and skipped; never
/// aborts the walk.
#[derive(Debug, Clone)]
pub struct CopyFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Result of replicating one source tree into the workspace.
#[derive(Debug, Default)]
pub struct CopyOutcome {
    /// Manifest entries in discovery order
    pub entries: Vec<ManifestEntry>,
    /// Files skipped due to per-file errors (permission denied, read errors)
    pub failures: Vec<CopyFailure>,
    /// Symlinks skipped; links are never dereferenced
    pub skipped_symlinks: u64,
}

/// Recursively replicate `source_root` under `dest_root`, hashing every
/// copy.
///
/// Directory structure is mirrored (idempotent creation), file content and
/// filesystem metadata (mtime, atime, permission bits) are preserved, and
/// each destination copy is hashed after the copy completes. Size and
/// mtime in the returned entries come from the destination's post-copy
/// stat: the manifest describes what the workspace holds.
///
/// A missing or non-directory `source_root` fails the whole operation
/// before anything is copied. Per-file problems are collected in the
/// outcome and the walk continues; a failed file never leaves a partial
/// copy behind, so the destination tree always matches the entry list.
pub fn copy_tree(source_root: &Path, dest_root: &Path) -> Result<CopyOutcome> {
    let root_meta = fs::metadata(source_root).map_err(|e| {
        AcquireError::SourceUnavailable(format!("{}: {}", source_root.display(), e))
    })?;
    if !root_meta.is_dir() {
        return Err(AcquireError::SourceUnavailable(format!(
            "{} is not a directory",
            source_root.display()
        ))
        .into());
    }

    fs::create_dir_all(dest_root)
        .with_context(|| format!("Failed to create {}", dest_root.display()))?;

    let mut outcome = CopyOutcome::default();

    for entry in WalkDir::new(source_root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // Unreadable directory or similar: record and keep walking
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| source_root.to_path_buf());
                warn!("Skipping {}: {}", path.display(), e);
                outcome.failures.push(CopyFailure {
                    path,
                    error: e.to_string(),
                });
                continue;
            }
        };

        let rel_path = match entry.path().strip_prefix(source_root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => continue, // the root itself
        };

        if entry.path_is_symlink() {
            // Never dereference: a link pointing back up the tree would
            // recurse forever, and a broken one has no content to hash.
            warn!("Skipping symlink {}", entry.path().display());
            outcome.skipped_symlinks += 1;
            continue;
        }

        let dest = dest_root.join(&rel_path);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)
                .with_context(|| format!("Failed to create {}", dest.display()))?;
            continue;
        }
        if !entry.file_type().is_file() {
            debug!("Skipping special file {}", entry.path().display());
            continue;
        }

        match copy_one(entry.path(), &dest, &rel_path) {
            Ok(manifest_entry) => outcome.entries.push(manifest_entry),
            Err(e) => {
                warn!("Failed to copy {}: {:#}", entry.path().display(), e);
                // A failure after the destination was created would leave a
                // partial, unhashed file in the data tree; drop it so the
                // tree stays in bijection with the manifest entries
                if dest.is_file() {
                    let _ = fs::remove_file(&dest);
                }
                outcome.failures.push(CopyFailure {
                    path: entry.path().to_path_buf(),
                    error: format!("{:#}", e),
                });
            }
        }
    }

    Ok(outcome)
}

/// Copy one file, restore its timestamps, hash the destination, and build
/// its manifest entry from the destination's stat.
fn copy_one(src: &Path, dest: &Path, rel_path: &Path) -> Result<ManifestEntry> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let src_meta = fs::metadata(src)
        .with_context(|| format!("Failed to stat {}", src.display()))?;

    // fs::copy carries the permission bits; timestamps are restored below
    fs::copy(src, dest)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
    filetime::set_file_times(
        dest,
        FileTime::from_last_access_time(&src_meta),
        FileTime::from_last_modification_time(&src_meta),
    )
    .with_context(|| format!("Failed to restore timestamps on {}", dest.display()))?;

    // Hash the copy, not the source: the manifest attests to what is held
    let sha256 = sha256_file(dest)?;

    let dest_meta = fs::metadata(dest)
        .with_context(|| format!("Failed to stat {}", dest.display()))?;
    let mtime: DateTime<Utc> = dest_meta
        .modified()
        .with_context(|| format!("Failed to read mtime of {}", dest.display()))?
        .into();

    Ok(ManifestEntry {
        original_path: src.display().to_string(),
        acquired_path: dest.display().to_string(),
        rel_path: rel_path.to_string_lossy().replace('\\', "/"),
        size: dest_meta.len(),
        mtime: mtime.to_rfc3339_opts(SecondsFormat::Micros, true),
        sha256,
    })
}
