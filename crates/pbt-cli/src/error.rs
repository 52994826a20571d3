//! Error types for pbt-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from pbt-core
    #[error(transparent)]
    Core(#[from] pbt_core::Error),

    /// Error from pbt-fs
    #[error(transparent)]
    Fs(#[from] pbt_fs::Error),

    #[error("Cannot render commands as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
