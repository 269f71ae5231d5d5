use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;

/// Serialize `value` as pretty-printed JSON and write it to `path` with
/// atomic-replace semantics.
///
/// The document is written to a sibling `<name>.tmp` file, flushed and
/// synced, then renamed over the final path. An interruption before the
/// rename leaves the final path holding whatever complete document it held
/// before (or nothing); a stale `.tmp` may remain but is never mistaken
/// for a finished record. Output is UTF-8 and non-ASCII text is written
/// byte-exact, not escaped.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)
        .with_context(|| format!("Failed to serialize record for {}", path.display()))?;

    let tmp_path = temp_sibling(path);
    {
        let mut file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
        file.write_all(&json)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        file.sync_all()
            .with_context(|| format!("Failed to sync {}", tmp_path.display()))?;
    }

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "Failed to move {} into place at {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    debug!("Wrote {} ({} bytes)", path.display(), json.len());
    Ok(())
}

/// Temporary sibling path used during an atomic write: `x.json` ->
/// `x.json.tmp`. Same directory as the target so the rename never crosses
/// a filesystem boundary.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
