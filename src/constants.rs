//! Global constants for the rust-acquire application.
//!
//! This module centralizes all hardcoded values to improve maintainability
//! and make configuration changes easier.

// Buffer size constants
/// Chunk size for streaming hash computation (8KB)
pub const HASH_CHUNK_SIZE: usize = 8 * 1024;

/// Chunk size for archive compression operations (512KB)
pub const COMPRESSION_CHUNK_SIZE: usize = 512 * 1024;

/// Large file threshold for compression decisions (100MB)
pub const LARGE_FILE_COMPRESSION_THRESHOLD: u64 = 100 * 1024 * 1024;

// Workspace layout
/// Prefix for acquisition workspace directory names
pub const WORKSPACE_PREFIX: &str = "acq";

/// Timestamp format used in workspace directory names (UTC, second granularity)
pub const WORKSPACE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Subdirectory of the workspace holding the copied source tree
pub const DATA_DIR_NAME: &str = "data";

// Durable record file names
pub const MANIFEST_FILE_NAME: &str = "manifest.json";
pub const CUSTODY_FILE_NAME: &str = "chain_of_custody.json";
pub const SUMMARY_FILE_NAME: &str = "summary.json";
pub const ARCHIVE_INFO_FILE_NAME: &str = "archive_info.json";

// Device acquisition
/// Remote directories tried, in order, when pulling an application package
/// from a connected device. Pulling `/data/data` requires root or a backup
/// grant; the sdcard mirror is the fallback.
pub const DEVICE_PULL_CANDIDATES: &[&str] = &["/data/data", "/sdcard/Android/data"];

/// Default base directory for acquisition workspaces
pub const DEFAULT_OUTDIR: &str = "./acquisitions";

// Common file extensions that are already compressed and gain little from
// a higher deflate level
pub const COMPRESSED_EXTENSIONS: &[&str] = &[
    "zip", "gz", "xz", "bz2", "7z", "rar", "jpg", "jpeg", "png", "gif", "mp3", "mp4", "avi", "mov",
    "mpg", "mpeg",
];
