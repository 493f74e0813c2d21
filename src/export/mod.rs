//! Exporters for finished paths: SVG for previewing, THR for sand tables.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;

/// Trait to convert a path into an SVG document.
pub mod svg;

/// Continuous polar (theta, rho) output for sand tables.
pub mod thr;

/// Write `contents` next to `path` first, then move it into place, so a
/// failed export never leaves a truncated file behind.
pub(crate) fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let tmp_path = path.with_extension(format!("{}.tmp", extension));
    {
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
