use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::Snapshot;

/// Load the snapshot persisted by the previous run.
///
/// A first run has nothing on disk and an interrupted run may have left
/// garbage; both come back as an empty snapshot so the pipeline treats
/// every live slot as new rather than aborting.
pub fn load(path: &Path) -> Snapshot {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            info!("No previous snapshot at {} ({e}), starting fresh", path.display());
            return Snapshot::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Ignoring unreadable snapshot {}: {e}", path.display());
            Snapshot::default()
        }
    }
}

/// Persist `snapshot` as the new baseline, replacing the old one.
///
/// Written to a sibling temp file first and renamed into place, so a
/// failed write leaves the previous document untouched. There is no
/// backup generation: once this returns Ok the old baseline is gone.
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)
        .with_context(|| format!("failed to write snapshot to {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace snapshot {}", path.display()))?;
    Ok(())
}
