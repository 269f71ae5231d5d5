use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use log::{info, warn};
use tempfile::TempDir;

use crate::constants::DEVICE_PULL_CANDIDATES;
use crate::errors::AcquireError;

/// A validated acquisition source: the directory tree to copy and the
/// subject identifier used in the workspace name.
#[derive(Debug)]
pub struct ResolvedSource {
    /// Root of the tree to acquire
    pub root: PathBuf,
    /// Identifier for the workspace name (folder name or package name)
    pub subject_id: String,
    // Staging directory backing a device pull. Held so the pulled tree
    // outlives the copy step and is removed when the run finishes.
    _staging: Option<TempDir>,
}

/// Validate the source specification and make the source tree reachable.
///
/// Exactly one of `input` (local folder) and `device_package` (pull over
/// adb) must be given; anything else is a configuration error. Resolution
/// has no side effects on the output directory — a failed device pull
/// leaves only its own temporary staging area, which is cleaned up.
pub fn resolve_source(
    input: Option<&Path>,
    device_package: Option<&str>,
) -> Result<ResolvedSource> {
    match (input, device_package) {
        (Some(_), Some(_)) => Err(AcquireError::Configuration(
            "--input and --device-package are mutually exclusive".to_string(),
        )
        .into()),
        (None, None) => Err(AcquireError::Configuration(
            "either --input or --device-package is required".to_string(),
        )
        .into()),
        (Some(path), None) => resolve_local(path),
        (None, Some(package)) => pull_device_package(package),
    }
}

fn resolve_local(path: &Path) -> Result<ResolvedSource> {
    let root = path.canonicalize().map_err(|e| {
        AcquireError::SourceUnavailable(format!("{}: {}", path.display(), e))
    })?;
    if !root.is_dir() {
        return Err(AcquireError::SourceUnavailable(format!(
            "{} is not a directory",
            root.display()
        ))
        .into());
    }
    let subject_id = root
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "root".to_string());

    Ok(ResolvedSource {
        root,
        subject_id,
        _staging: None,
    })
}

/// Pull an application package from a connected device, trying each known
/// remote location in order. The first successful candidate wins; a failed
/// candidate leaves nothing outside its own staging subdirectory.
fn pull_device_package(package: &str) -> Result<ResolvedSource> {
    let staging = TempDir::new().context("Failed to create device-pull staging directory")?;
    let mut causes = Vec::new();

    for (index, base) in DEVICE_PULL_CANDIDATES.iter().enumerate() {
        let remote = format!("{}/{}", base, package);
        let dest = staging.path().join(format!("candidate_{}", index));
        fs::create_dir(&dest)
            .with_context(|| format!("Failed to create {}", dest.display()))?;

        info!("Pulling {} from device (may fail without permission)...", remote);
        let status = Command::new("adb")
            .arg("pull")
            .arg(&remote)
            .arg(&dest)
            .status();

        match status {
            Ok(status) if status.success() => {
                info!("Pulled {} successfully", remote);
                return Ok(ResolvedSource {
                    root: dest,
                    subject_id: package.replace('.', "_"),
                    _staging: Some(staging),
                });
            }
            Ok(status) => {
                warn!("adb pull {} exited with {}", remote, status);
                causes.push(format!("{}: exit {}", remote, status));
            }
            Err(e) => {
                warn!("Failed to run adb: {}", e);
                causes.push(format!("{}: {}", remote, e));
            }
        }
    }

    Err(AcquireError::SourceUnavailable(format!(
        "adb pull failed for all candidate paths of {} ({})",
        package,
        causes.join("; ")
    ))
    .into())
}
