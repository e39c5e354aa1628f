//! Write-to-temp-then-rename file replacement.

use crate::mesh_error::MeshOrderError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Removes the temporary file unless the write was committed.
struct TempGuard {
    path: PathBuf,
    committed: bool,
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn temp_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

/// Write `target` through `fill`, replacing any existing file only once
/// `fill` has succeeded and the data has been flushed to disk.
///
/// Readers of `target` observe either the old contents or the new ones,
/// never a partial file. The temporary sibling is removed on every error
/// path.
pub fn write_atomic<F>(target: &Path, fill: F) -> Result<(), MeshOrderError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), MeshOrderError>,
{
    let tmp = temp_path(target);
    let mut guard = TempGuard {
        path: tmp.clone(),
        committed: false,
    };
    let file = File::create(&tmp).map_err(|e| {
        MeshOrderError::Io(format!("cannot create {}: {e}", tmp.display()))
    })?;
    let mut writer = BufWriter::new(file);
    if let Err(err) = fill(&mut writer) {
        log::error!("writing {} failed: {err}", target.display());
        return Err(err);
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| MeshOrderError::Io(e.error().to_string()))?
        .sync_all()?;
    fs::rename(&tmp, target).map_err(|e| {
        MeshOrderError::Io(format!(
            "cannot move {} onto {}: {e}",
            tmp.display(),
            target.display()
        ))
    })?;
    guard.committed = true;
    Ok(())
}
