//! Runtime description of the host platform
//!
//! Everything that differs between POSIX and Windows hosts is captured once
//! in a [`PlatformCapabilities`] value and passed explicitly to the resolver
//! and the normalizer. Tests build virtual platforms with
//! [`PlatformCapabilities::posix`] and [`PlatformCapabilities::windows`]
//! instead of depending on the OS they run on.

use pbt_fs::{PathNormalizer, PathStyle};

use crate::error::Result;

/// The executable search path as seen at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    /// Name of the environment variable (`PATH`, `Path`)
    pub variable: String,
    /// Separator between entries (`:`, `;`)
    pub separator: char,
    /// The variable's value, if it was set
    pub value: Option<String>,
}

impl SearchPath {
    /// Non-empty entries in order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.value
            .as_deref()
            .unwrap_or("")
            .split(self.separator)
            .filter(|entry| !entry.is_empty())
    }
}

/// Platform facts the command builder depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCapabilities {
    pub path_style: PathStyle,
    /// Whether host path strings must be repaired before use
    pub repair_paths: bool,
    /// Whether a plugin may depend on a generator product directly.
    ///
    /// When false, product locators are satisfied by staging the product
    /// out of process (the degraded path).
    pub direct_tool_linkage: bool,
    /// Suffix appended to executable names (`""`, `".exe"`)
    pub executable_suffix: String,
    /// Directory relative host paths are resolved against
    pub current_dir: String,
    pub search_path: SearchPath,
}

impl PlatformCapabilities {
    /// A POSIX host: paths used as given, products linked directly.
    pub fn posix(current_dir: impl Into<String>, search_path: Option<String>) -> Self {
        Self {
            path_style: PathStyle::Posix,
            repair_paths: false,
            direct_tool_linkage: true,
            executable_suffix: String::new(),
            current_dir: current_dir.into(),
            search_path: SearchPath {
                variable: "PATH".to_string(),
                separator: ':',
                value: search_path,
            },
        }
    }

    /// A Windows host: paths repaired, generator products staged.
    ///
    /// Depending on an executable product from a build-tool plugin makes
    /// every test target that transitively consumes the plugin's output fail
    /// to link with duplicate entry points, so products are built out of
    /// process instead.
    pub fn windows(current_dir: impl Into<String>, search_path: Option<String>) -> Self {
        Self {
            path_style: PathStyle::Windows,
            repair_paths: true,
            direct_tool_linkage: false,
            executable_suffix: ".exe".to_string(),
            current_dir: current_dir.into(),
            search_path: SearchPath {
                variable: "Path".to_string(),
                separator: ';',
                value: search_path,
            },
        }
    }

    /// Capabilities of the running process.
    ///
    /// Reads the working directory and the search-path variable once; nothing
    /// downstream consults the environment again.
    pub fn detect() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| pbt_fs::Error::io(".", e))?;
        let cwd = dunce::simplified(&cwd).to_string_lossy().into_owned();

        let mut capabilities = if cfg!(windows) {
            Self::windows(cwd, None)
        } else {
            Self::posix(cwd, None)
        };
        capabilities.search_path.value = std::env::var(&capabilities.search_path.variable).ok();

        tracing::debug!(
            style = ?capabilities.path_style,
            direct_tool_linkage = capabilities.direct_tool_linkage,
            "detected platform capabilities"
        );
        Ok(capabilities)
    }

    /// Replace the search path value.
    pub fn with_search_path(mut self, value: impl Into<String>) -> Self {
        self.search_path.value = Some(value.into());
        self
    }

    /// The path normalizer for this platform.
    pub fn normalizer(&self) -> PathNormalizer {
        PathNormalizer::new(
            self.path_style,
            self.repair_paths,
            Some(self.current_dir.clone()),
        )
    }

    /// File name of the executable called `stem` on this platform.
    pub fn executable_name(&self, stem: &str) -> String {
        format!("{stem}{}", self.executable_suffix)
    }
}
