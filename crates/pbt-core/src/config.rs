//! Plugin configuration
//!
//! All fields have defaults, so an absent or empty configuration file
//! describes the standard toolchain layout.

use pbt_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::Result;

/// Configuration shared by all plugins of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Targets whose generator commands run as discovery (prebuild) commands
    pub discovery_targets: BTreeSet<String>,
    pub toolchain: ToolchainConfig,
    pub staging: StagingConfig,
}

/// Where to find the toolchain launcher used to stage generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Launcher executable name, without platform suffix
    pub launcher: String,
    /// Trailing components of the search-path entry the host adds for
    /// plugins; the launcher lives in the `bin` directory next to them
    pub layout_suffix: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            launcher: "swift".to_string(),
            layout_suffix: ["lib", "swift", "pm", "PluginAPI"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// How staged generators are built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Build configuration passed to the launcher
    pub configuration: String,
    /// Directory below the plugin work directory holding staging scratch areas
    pub scratch_dir: String,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            configuration: "debug".to_string(),
            scratch_dir: "ToolScratch".to_string(),
        }
    }
}

impl PluginConfig {
    /// Load the configuration from a TOML, JSON or YAML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    /// Whether `target` is configured for discovery commands.
    pub fn uses_discovery(&self, target: &str) -> bool {
        self.discovery_targets.contains(target)
    }
}
