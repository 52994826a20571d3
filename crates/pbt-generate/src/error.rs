//! Error types for pbt-generate

use std::path::PathBuf;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a generator reports before exiting with a failure status
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from pbt-fs while writing outputs
    #[error(transparent)]
    Fs(#[from] pbt_fs::Error),

    /// An input could not be read; nothing was written
    #[error("Cannot read input {path}: {source}")]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input of the resource generator does not end in `.in`
    #[error("Not a resource input: {input}")]
    NotAResource { input: String },

    #[error("usage: {program} {usage}")]
    Usage { program: String, usage: String },

    /// The input's stem yields no usable test function name
    #[error("Cannot derive a test name from {input}")]
    InvalidTestName { input: String },

    #[error("Inputs {first} and {second} both generate test function '{name}'")]
    DuplicateTestName {
        name: String,
        first: String,
        second: String,
    },
}
