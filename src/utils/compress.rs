use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};
use walkdir::WalkDir;
use zip::{write::FileOptions, ZipWriter};

use crate::constants::{
    COMPRESSED_EXTENSIONS, COMPRESSION_CHUNK_SIZE, LARGE_FILE_COMPRESSION_THRESHOLD,
};
use crate::utils::hash::sha256_file;

/// Determine compression options based on file type and size.
///
/// Already-compressed payloads (media files, archives — the bulk of a chat
/// backup) and very large files use the fastest deflate level; everything
/// else gets the default level.
pub fn get_compression_options(path: &Path) -> FileOptions {
    let low_compression = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => COMPRESSED_EXTENSIONS.contains(&ext),
        _ => false,
    };

    let large_file = matches!(
        fs::metadata(path),
        Ok(metadata) if metadata.len() > LARGE_FILE_COMPRESSION_THRESHOLD
    );

    if low_compression || large_file {
        FileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .compression_level(Some(1))
            .unix_permissions(0o644)
    } else {
        FileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .compression_level(Some(6))
            .unix_permissions(0o644)
    }
}

/// Package a completed workspace into a single zip archive and hash it.
///
/// The archive is written to `<archive_base>.zip.tmp` and renamed onto
/// `<archive_base>.zip` only after it is fully flushed, so no partial
/// archive ever sits at the final path. Must run after the manifest and
/// custody records are durable: the archive contains them, making it
/// self-describing. Returns the final archive path and its SHA-256 hex
/// digest.
///
/// The archive hash is recorded by the caller in a side file, never in the
/// manifest — the archive cannot contain its own hash.
pub fn build_archive(workspace_dir: &Path, archive_base: &Path) -> Result<(PathBuf, String)> {
    let start = Instant::now();

    // Append rather than with_extension: a subject id may contain dots
    let archive_path = {
        let mut name = archive_base.as_os_str().to_os_string();
        name.push(".zip");
        PathBuf::from(name)
    };
    let tmp_path = {
        let mut name = archive_path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    };

    info!("Compressing workspace {}...", workspace_dir.display());

    let zip_file = File::create(&tmp_path)
        .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
    let mut zip = ZipWriter::new(zip_file);
    let mut buffer = vec![0u8; COMPRESSION_CHUNK_SIZE];

    for entry in WalkDir::new(workspace_dir).follow_links(false) {
        let entry = entry.with_context(|| {
            format!("Failed to walk workspace {}", workspace_dir.display())
        })?;
        let rel_path = entry
            .path()
            .strip_prefix(workspace_dir)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        if rel_path.is_empty() {
            continue;
        }

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", rel_path), FileOptions::default())
                .with_context(|| format!("Failed to add directory entry {}", rel_path))?;
        } else if entry.file_type().is_file() {
            let options = get_compression_options(entry.path());
            zip.start_file(rel_path.clone(), options)
                .with_context(|| format!("Failed to start archive entry {}", rel_path))?;

            // Stream in chunks so large evidence files never sit in memory
            let file = File::open(entry.path())
                .with_context(|| format!("Failed to open {}", entry.path().display()))?;
            let mut reader = BufReader::new(file);
            loop {
                let bytes_read = reader
                    .read(&mut buffer)
                    .with_context(|| format!("Failed to read {}", entry.path().display()))?;
                if bytes_read == 0 {
                    break;
                }
                zip.write_all(&buffer[..bytes_read])
                    .with_context(|| format!("Failed to write archive entry {}", rel_path))?;
            }
            debug!("Archived {}", rel_path);
        }
    }

    let zip_file = zip
        .finish()
        .context("Failed to finalize workspace archive")?;
    zip_file
        .sync_all()
        .with_context(|| format!("Failed to sync {}", tmp_path.display()))?;

    fs::rename(&tmp_path, &archive_path).with_context(|| {
        format!(
            "Failed to move archive into place at {}",
            archive_path.display()
        )
    })?;

    let archive_sha256 = sha256_file(&archive_path)?;

    info!(
        "Archived workspace to {} in {:?}",
        archive_path.display(),
        start.elapsed()
    );
    Ok((archive_path, archive_sha256))
}
