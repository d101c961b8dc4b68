//! Writing the finished document.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{ExportError, Result};
use crate::select::SelectionEngine;

/// Make sure the output's parent directory exists, asking before creating it.
pub fn ensure_output_dir(output: &Path, engine: &mut SelectionEngine<'_>) -> Result<()> {
    let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    if dir.is_dir() {
        return Ok(());
    }

    let prompt = format!("Output directory {} does not exist. Create it?", dir.display());
    if !engine.confirm(&prompt) {
        tracing::info!("User chose not to create output directory {}", dir.display());
        return Err(ExportError::OutputDirMissing(dir.to_path_buf()));
    }
    fs::create_dir_all(dir).map_err(|e| ExportError::write(dir, e))?;
    tracing::info!("Created output directory: {}", dir.display());
    Ok(())
}

/// Write `content` to a temporary file beside `output`, then rename it into
/// place. Readers never observe a partial document.
pub fn write_atomic(output: &Path, content: &str) -> Result<()> {
    let dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ExportError::write(dir, e))?;
    tmp.write_all(content.as_bytes()).map_err(|e| ExportError::write(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| ExportError::write(tmp.path(), e))?;
    tmp.persist(output).map_err(|e| ExportError::write(output, e.error))?;

    tracing::info!("Wrote {} bytes to {}", content.len(), output.display());
    Ok(())
}
