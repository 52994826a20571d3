//! Enumeration of source files below a directory

use crate::{Error, HostPath, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Every regular file below `root`, sorted by path.
///
/// A missing `root` yields an empty list. Any other traversal failure is an
/// error.
pub fn source_files(root: impl AsRef<Path>) -> Result<Vec<HostPath>> {
    let root = root.as_ref();
    if !root.exists() {
        tracing::debug!(root = %root.display(), "source root does not exist");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, e.into())
        })?;
        if entry.file_type().is_file() {
            files.push(HostPath::from(entry.path()));
        }
    }
    Ok(files)
}
