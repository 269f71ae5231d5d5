use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::constants::{DATA_DIR_NAME, MANIFEST_FILE_NAME};
use crate::models::Manifest;
use crate::utils::hash::sha256_file;

/// Outcome of re-verifying a workspace against its manifest.
#[derive(Debug, Default)]
pub struct VerifyReport {
    pub total: u64,
    pub matched: u64,
    /// Relative paths whose recomputed hash differs from the manifest
    pub mismatched: Vec<String>,
    /// Relative paths whose copy is gone from the workspace
    pub missing: Vec<String>,
    /// Relative paths that are present but could not be read for hashing
    pub unreadable: Vec<String>,
}

impl VerifyReport {
    /// True when every manifest entry matched.
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty() && self.missing.is_empty() && self.unreadable.is_empty()
    }
}

/// Re-hash every acquired file in a workspace and compare against the
/// manifest.
///
/// This is the independent half of the integrity guarantee: anyone holding
/// the workspace can prove, at any later time, that the copies are
/// unaltered since acquisition. Entries are resolved by their recorded
/// `acquired_path` first, falling back to `data/<rel_path>` so a workspace
/// that was moved wholesale still verifies.
pub fn verify_workspace(workspace: &Path) -> Result<VerifyReport> {
    let manifest_path = workspace.join(MANIFEST_FILE_NAME);
    let raw = fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
    let manifest: Manifest = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;

    let mut report = VerifyReport {
        total: manifest.items.len() as u64,
        ..VerifyReport::default()
    };

    for item in &manifest.items {
        let recorded = Path::new(&item.acquired_path);
        let path = if recorded.is_file() {
            recorded.to_path_buf()
        } else {
            workspace.join(DATA_DIR_NAME).join(&item.rel_path)
        };

        if !path.is_file() {
            warn!("Missing acquired file {}", item.rel_path);
            report.missing.push(item.rel_path.clone());
            continue;
        }

        match sha256_file(&path) {
            Ok(hash) if hash == item.sha256 => {
                debug!("Verified {}", item.rel_path);
                report.matched += 1;
            }
            Ok(_) => {
                warn!("Hash mismatch for {}", item.rel_path);
                report.mismatched.push(item.rel_path.clone());
            }
            Err(e) => {
                warn!("Could not hash {}: {:#}", item.rel_path, e);
                report.unreadable.push(item.rel_path.clone());
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::orchestrator::{run_acquisition, AcquisitionOptions};
    use tempfile::TempDir;

    fn acquire_fixture() -> (TempDir, std::path::PathBuf) {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("a.txt"), b"alpha").unwrap();
        fs::create_dir(source.path().join("sub")).unwrap();
        fs::write(source.path().join("sub/b.txt"), b"beta").unwrap();

        let outdir = TempDir::new().unwrap();
        let outcome = run_acquisition(&AcquisitionOptions {
            input: Some(source.path().to_path_buf()),
            device_package: None,
            outdir: outdir.path().to_path_buf(),
            case_id: "CASE-V".to_string(),
            collector: "Verifier".to_string(),
            reason: "verify test".to_string(),
            archive: false,
        })
        .unwrap();
        (outdir, outcome.workspace)
    }

    #[test]
    fn test_untouched_workspace_verifies_clean() {
        let (_outdir, workspace) = acquire_fixture();
        let report = verify_workspace(&workspace).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.total, 2);
        assert_eq!(report.matched, 2);
    }

    #[test]
    fn test_modified_copy_is_reported_as_mismatch() {
        let (_outdir, workspace) = acquire_fixture();
        fs::write(workspace.join(DATA_DIR_NAME).join("a.txt"), b"tampered").unwrap();

        let report = verify_workspace(&workspace).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.mismatched, vec!["a.txt".to_string()]);
        assert_eq!(report.matched, 1);
    }

    #[test]
    fn test_deleted_copy_is_reported_as_missing() {
        let (_outdir, workspace) = acquire_fixture();
        fs::remove_file(workspace.join(DATA_DIR_NAME).join("sub/b.txt")).unwrap();

        let report = verify_workspace(&workspace).unwrap();
        assert_eq!(report.missing, vec!["sub/b.txt".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_copy_is_reported_separately_from_missing() {
        use std::os::unix::fs::PermissionsExt;

        let (_outdir, workspace) = acquire_fixture();
        let copy = workspace.join(DATA_DIR_NAME).join("a.txt");
        fs::set_permissions(&copy, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users bypass mode bits entirely; nothing to assert then
        if fs::File::open(&copy).is_ok() {
            return;
        }

        let report = verify_workspace(&workspace).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.unreadable, vec!["a.txt".to_string()]);
        assert!(report.missing.is_empty());
        assert!(report.mismatched.is_empty());
        assert_eq!(report.matched, 1);
    }

    #[test]
    fn test_workspace_without_manifest_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(verify_workspace(dir.path()).is_err());
    }
}
