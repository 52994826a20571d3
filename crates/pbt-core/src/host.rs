//! Commands in the form the host build graph registers them

use pbt_fs::NormalizedPath;
use serde::Serialize;
use std::collections::BTreeMap;

/// A command registered into the host build graph.
///
/// Every path has been repaired; the host runs the command as described
/// without further interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostCommand {
    /// Runs when a declared output is missing or older than an input.
    Build {
        display_name: Option<String>,
        executable: NormalizedPath,
        arguments: Vec<String>,
        environment: BTreeMap<String, String>,
        working_directory: Option<NormalizedPath>,
        input_files: Vec<NormalizedPath>,
        output_files: Vec<NormalizedPath>,
    },
    /// Runs before every build; outputs are whatever ends up in
    /// `output_files_directory`.
    Prebuild {
        display_name: Option<String>,
        executable: NormalizedPath,
        arguments: Vec<String>,
        environment: BTreeMap<String, String>,
        working_directory: Option<NormalizedPath>,
        /// Ordering preconditions only; they never decide whether it runs
        input_files: Vec<NormalizedPath>,
        output_files_directory: NormalizedPath,
    },
}

impl HostCommand {
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Build { display_name, .. } | Self::Prebuild { display_name, .. } => {
                display_name.as_deref()
            }
        }
    }

    pub fn executable(&self) -> &NormalizedPath {
        match self {
            Self::Build { executable, .. } | Self::Prebuild { executable, .. } => executable,
        }
    }

    pub fn arguments(&self) -> &[String] {
        match self {
            Self::Build { arguments, .. } | Self::Prebuild { arguments, .. } => arguments,
        }
    }

    pub fn input_files(&self) -> &[NormalizedPath] {
        match self {
            Self::Build { input_files, .. } | Self::Prebuild { input_files, .. } => input_files,
        }
    }

    pub fn working_directory(&self) -> Option<&NormalizedPath> {
        match self {
            Self::Build {
                working_directory, ..
            }
            | Self::Prebuild {
                working_directory, ..
            } => working_directory.as_ref(),
        }
    }

    /// Declared outputs; empty for prebuild commands.
    pub fn output_files(&self) -> &[NormalizedPath] {
        match self {
            Self::Build { output_files, .. } => output_files,
            Self::Prebuild { .. } => &[],
        }
    }

    pub fn is_prebuild(&self) -> bool {
        matches!(self, Self::Prebuild { .. })
    }
}
