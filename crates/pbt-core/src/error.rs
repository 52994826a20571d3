//! Error types for pbt-core

/// Result type for pbt-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while planning build commands
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem error from pbt-fs, including unrepairable paths
    #[error(transparent)]
    Fs(#[from] pbt_fs::Error),

    /// No toolchain launcher to stage a generator with
    #[error("Cannot stage product '{product}': no {launcher} found on {variable}")]
    ToolchainNotFound {
        product: String,
        launcher: String,
        variable: String,
    },

    /// A product locator names a tool the host did not resolve for this plugin
    #[error("Tool '{name}' is not declared as a build-time dependency of this plugin")]
    ToolNotDeclared { name: String },

    /// A pre-installed executable must be given as an absolute path
    #[error("Pre-installed executable {path:?} is not an absolute path")]
    RelativeExecutable { path: String },

    #[error("Product '{name}' is not defined in the package")]
    UnknownProduct { name: String },

    #[error("Target '{name}' is not defined in the package")]
    UnknownTarget { name: String },

    /// One or more commands of a target could not be built
    #[error("{} command(s) for target '{target}' could not be built:{}", .failures.len(), render_failures(.failures))]
    CommandsFailed {
        target: String,
        failures: Vec<CommandFailure>,
    },
}

impl Error {
    /// Whether this error stops planning of the whole target rather than a
    /// single command.
    pub fn is_fatal_for_target(&self) -> bool {
        matches!(self, Self::ToolchainNotFound { .. })
    }

    /// Whether this error comes from a path that could not be repaired.
    pub fn is_path_resolution(&self) -> bool {
        matches!(self, Self::Fs(pbt_fs::Error::PathResolution { .. }))
    }
}

/// A command that failed to build, with the reason.
#[derive(Debug)]
pub struct CommandFailure {
    /// Display name of the command, or its executable locator
    pub command: String,
    pub error: Error,
}

fn render_failures(failures: &[CommandFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("\n  - {}: {}", f.command, f.error))
        .collect()
}
