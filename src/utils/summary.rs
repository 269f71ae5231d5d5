use chrono::{SecondsFormat, Utc};

use crate::models::{AcquisitionSummary, ManifestEntry};

/// Fold the manifest entries into the run summary.
///
/// The summary carries no independent truth: `total_files` and
/// `total_bytes` are derived entirely from the manifest, plus the count of
/// files the copier had to skip.
pub fn summarize(items: &[ManifestEntry], failed_files: u64) -> AcquisitionSummary {
    AcquisitionSummary {
        summary_created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        total_files: items.len() as u64,
        total_bytes: items.iter().map(|item| item.size).sum(),
        failed_files,
    }
}
