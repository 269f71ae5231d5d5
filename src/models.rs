//! Core data models for acquisition records.
//!
//! Field names are the wire names of the durable JSON formats; changing
//! them breaks every previously written workspace.

use serde::{Deserialize, Serialize};

/// One acquired file, as recorded in `manifest.json`.
///
/// `size`, `mtime` and `sha256` are always taken from the copy under the
/// workspace, never from the source file: the manifest proves what is held
/// now, not what existed at the source.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ManifestEntry {
    /// Absolute path of the source file at copy time
    pub original_path: String,
    /// Absolute path of the copy inside the workspace
    pub acquired_path: String,
    /// Path relative to the acquisition root, `/`-separated
    pub rel_path: String,
    /// Byte length of the copy, read post-copy
    pub size: u64,
    /// Last-modified timestamp of the copy, UTC ISO-8601
    pub mtime: String,
    /// Hex-encoded SHA-256 digest of the copy's bytes
    pub sha256: String,
}

/// Full record of one acquisition run, written as `manifest.json`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Manifest {
    pub acquisition_id: String,
    pub created_at: String,
    /// Root path that was acquired
    pub source: String,
    /// Entries in directory-walk order
    pub items: Vec<ManifestEntry>,
}

/// Provenance record for one run, written as `chain_of_custody.json`.
/// Created once right after the workspace is allocated and never mutated.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChainOfCustodyRecord {
    pub acquisition_id: String,
    pub case_id: String,
    pub collector: String,
    pub collected_at: String,
    pub reason: String,
    pub source: String,
    pub workspace: String,
    /// Hostname of the machine that performed the collection
    pub host: String,
}

/// Aggregate of the manifest, written as `summary.json`. Pure function of
/// the copy outcome; carries no independent truth.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AcquisitionSummary {
    pub summary_created_at: String,
    pub total_files: u64,
    pub total_bytes: u64,
    /// Files that could not be copied (permission denied, read errors)
    pub failed_files: u64,
}

/// Side record for an optional workspace archive, written as
/// `archive_info.json`. Kept out of the manifest so the archive never has
/// to contain its own hash.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ArchiveInfo {
    pub archive: String,
    pub archive_sha256: String,
}
