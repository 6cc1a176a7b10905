//! Image archiver: copies a submitted image into the managed directory
//!
//! The archived name is `<remark><original extension>` when a remark is
//! given, otherwise the original base name. The source file is never moved
//! or modified.

use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Where an image ended up after archiving
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchivedImage {
    /// File name inside the managed directory; this becomes the image reference
    pub name: String,
    pub path: PathBuf,
}

/// Longest file name most filesystems accept, in bytes
pub const MAX_FILE_NAME_BYTES: usize = 255;

/// Reject remarks that cannot become a file name inside the managed directory
pub fn validate_remark(remark: &str) -> Result<()> {
    if remark.contains(['/', '\\', '\0']) || remark == "." || remark == ".." {
        return Err(Error::Validation(format!(
            "remark {:?} cannot be used as a file name",
            remark
        )));
    }
    Ok(())
}

/// Check that `source` is an existing, readable regular file
pub fn ensure_source(source: &Path) -> Result<()> {
    if source.as_os_str().is_empty() || !source.is_file() {
        return Err(Error::ImageNotFound(source.to_path_buf()));
    }
    File::open(source).map_err(|_| Error::ImageNotFound(source.to_path_buf()))?;
    Ok(())
}

/// Archived file name for `source`, see module docs
///
/// An empty or whitespace-only remark counts as no remark.
pub fn target_name(source: &Path, remark: Option<&str>) -> Result<String> {
    match remark.map(str::trim).filter(|r| !r.is_empty()) {
        Some(remark) => {
            validate_remark(remark)?;
            let ext = source
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            let name = format!("{}{}", remark, ext);
            if name.len() > MAX_FILE_NAME_BYTES {
                return Err(Error::Validation(format!(
                    "remark is too long: file name would be {} bytes, limit is {}",
                    name.len(),
                    MAX_FILE_NAME_BYTES
                )));
            }
            Ok(name)
        }
        None => source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::ImageNotFound(source.to_path_buf())),
    }
}

/// Copies images into one managed directory
#[derive(Debug, Clone)]
pub struct ImageArchiver {
    dir: PathBuf,
}

impl ImageArchiver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy `source` into the managed directory under its target name
    ///
    /// Creates the directory on first use. An existing file with the same
    /// name is overwritten.
    pub fn archive(&self, source: &Path, remark: Option<&str>) -> Result<ArchivedImage> {
        ensure_source(source)?;
        let name = target_name(source, remark)?;
        let target = self.dir.join(&name);

        std::fs::create_dir_all(&self.dir).map_err(|e| Error::ArchiveWrite {
            target: self.dir.clone(),
            source: e,
        })?;

        if is_same_file(source, &target) {
            debug!("{} is already archived in place", target.display());
            return Ok(ArchivedImage { name, path: target });
        }

        if target.exists() {
            warn!("Overwriting existing archived image {}", target.display());
        }

        std::fs::copy(source, &target).map_err(|e| Error::ArchiveWrite {
            target: target.clone(),
            source: e,
        })?;

        info!("Archived {} as {}", source.display(), target.display());
        Ok(ArchivedImage { name, path: target })
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
