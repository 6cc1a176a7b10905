//! Flat CSV table helpers shared by the record store and the ranked table

use serde::Serialize;
use std::path::Path;

/// Create the parent directory of `path` if it has one
pub(crate) fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Overwrite `path` with a header row followed by `rows`
///
/// The header comes from the first serialized row, so an empty slice
/// produces an empty file.
pub(crate) fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), csv::Error> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
