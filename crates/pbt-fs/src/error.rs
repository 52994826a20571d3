//! Error types for pbt-fs

use std::path::PathBuf;

/// Result type for pbt-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pbt-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A host path string could not be repaired into a canonical form.
    #[error("Cannot resolve path {raw:?}: {reason}")]
    PathResolution { raw: String, reason: String },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn path_resolution(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PathResolution {
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}
