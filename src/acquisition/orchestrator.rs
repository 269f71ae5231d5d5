use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::acquisition::copier::copy_tree;
use crate::acquisition::source::resolve_source;
use crate::acquisition::workspace::allocate_workspace;
use crate::constants::{
    ARCHIVE_INFO_FILE_NAME, CUSTODY_FILE_NAME, DATA_DIR_NAME, MANIFEST_FILE_NAME,
    SUMMARY_FILE_NAME,
};
use crate::errors::AcquireError;
use crate::models::{ArchiveInfo, ChainOfCustodyRecord, Manifest};
use crate::utils::atomic::write_json_atomic;
use crate::utils::compress::build_archive;
use crate::utils::summary::summarize;

/// Everything one acquisition run needs to know up front.
#[derive(Debug, Clone)]
pub struct AcquisitionOptions {
    /// Local source folder; mutually exclusive with `device_package`
    pub input: Option<PathBuf>,
    /// Application package to pull from a connected device
    pub device_package: Option<String>,
    /// Base directory under which the workspace is allocated
    pub outdir: PathBuf,
    pub case_id: String,
    pub collector: String,
    pub reason: String,
    /// Package the finished workspace into a hashed zip archive
    pub archive: bool,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct AcquisitionOutcome {
    pub workspace: PathBuf,
    pub total_files: u64,
    pub total_bytes: u64,
    pub failed_files: u64,
    pub skipped_symlinks: u64,
    pub archive: Option<ArchiveInfo>,
}

/// Run one acquisition end to end.
///
/// The steps are strictly ordered: resolve source, allocate workspace,
/// copy into `data/`, write manifest, write custody record, write summary,
/// then optionally archive. Source resolution runs first so an invalid
/// request never creates a workspace. Per-file copy failures are counted
/// but do not fail the run; every fatal error is classified for a distinct
/// exit status.
pub fn run_acquisition(options: &AcquisitionOptions) -> Result<AcquisitionOutcome> {
    let source = resolve_source(
        options.input.as_deref(),
        options.device_package.as_deref(),
    )?;
    let workspace = allocate_workspace(&options.outdir, &source.subject_id)?;

    let acquisition_id = Uuid::new_v4().to_string();
    info!(
        "Acquisition {} of {} into {}",
        acquisition_id,
        source.root.display(),
        workspace.display()
    );

    info!("Copying files and computing hashes...");
    let copy_outcome = copy_tree(&source.root, &workspace.join(DATA_DIR_NAME))?;
    let failed_files = copy_outcome.failures.len() as u64;
    if failed_files > 0 {
        warn!("{} files could not be copied; see warnings above", failed_files);
    }

    // Manifest first: it must be durable before anything references it
    let manifest = Manifest {
        acquisition_id: acquisition_id.clone(),
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        source: source.root.display().to_string(),
        items: copy_outcome.entries,
    };
    write_record(&workspace.join(MANIFEST_FILE_NAME), &manifest, "manifest")?;

    let custody = ChainOfCustodyRecord {
        acquisition_id,
        case_id: options.case_id.clone(),
        collector: options.collector.clone(),
        collected_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        reason: options.reason.clone(),
        source: source.root.display().to_string(),
        workspace: workspace.display().to_string(),
        host: collection_host(),
    };
    write_record(&workspace.join(CUSTODY_FILE_NAME), &custody, "chain-of-custody record")?;

    let summary = summarize(&manifest.items, failed_files);
    write_record(&workspace.join(SUMMARY_FILE_NAME), &summary, "summary")?;
    info!(
        "Summary: {} files, {} bytes, {} failed",
        summary.total_files, summary.total_bytes, summary.failed_files
    );

    let archive = if options.archive {
        // Workspace is fully self-describing at this point; the archive
        // lands next to it, never inside it
        let archive_base = options.outdir.join(
            workspace
                .file_name()
                .unwrap_or_else(|| workspace.as_os_str()),
        );
        let (archive_path, archive_sha256) = build_archive(&workspace, &archive_base)
            .map_err(|e| AcquireError::Archive(format!("{:#}", e)))?;
        info!("Archive SHA256: {}", archive_sha256);

        let info = ArchiveInfo {
            archive: archive_path.display().to_string(),
            archive_sha256,
        };
        write_record(&workspace.join(ARCHIVE_INFO_FILE_NAME), &info, "archive record")?;
        Some(info)
    } else {
        None
    };

    Ok(AcquisitionOutcome {
        workspace,
        total_files: summary.total_files,
        total_bytes: summary.total_bytes,
        failed_files,
        skipped_symlinks: copy_outcome.skipped_symlinks,
        archive,
    })
}

/// Write one durable record, classifying any failure as a serialization
/// error so the run surfaces it with its own exit status.
fn write_record<T: Serialize>(path: &Path, value: &T, record: &str) -> Result<()> {
    write_json_atomic(path, value).map_err(|e| AcquireError::Serialization {
        record: record.to_string(),
        cause: format!("{:#}", e),
    })?;
    info!("Wrote {} to {}", record, path.display());
    Ok(())
}

fn collection_host() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
