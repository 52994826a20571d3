//! Resolution of executable locators into concrete invocations
//!
//! On hosts with direct tool linkage a product locator is simply the path
//! the host resolved for the plugin's declared tool dependency. Without it,
//! the product is staged: a toolchain launcher found on the search path
//! builds the product out of process into an isolated scratch directory,
//! and the generator is then run through the same launcher.

use pbt_fs::{NormalizedPath, PathNormalizer};
use std::fmt;

use crate::config::PluginConfig;
use crate::context::PluginContext;
use crate::error::{Error, Result};
use crate::intent::ExecutableLocator;
use crate::platform::PlatformCapabilities;
use crate::scratch::ScratchArea;

/// Answers whether a candidate path is an executable file.
pub trait ExecutableProbe: fmt::Debug + Send + Sync {
    fn is_executable(&self, path: &NormalizedPath) -> bool;
}

/// Probes the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl ExecutableProbe for FsProbe {
    fn is_executable(&self, path: &NormalizedPath) -> bool {
        path.to_native().is_file()
    }
}

/// A concrete way to run an executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub executable: NormalizedPath,
    /// Arguments that precede the command's own arguments
    pub argument_prefix: Vec<String>,
    pub working_directory: Option<NormalizedPath>,
}

impl Invocation {
    pub fn direct(executable: NormalizedPath) -> Self {
        Self {
            executable,
            argument_prefix: Vec::new(),
            working_directory: None,
        }
    }
}

/// The out-of-process build that stages a generator product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePlan {
    pub product: String,
    pub launcher: NormalizedPath,
    pub arguments: Vec<String>,
    pub working_directory: NormalizedPath,
    /// Source files of the product, for invalidation
    pub input_files: Vec<NormalizedPath>,
    /// The executable the staging build produces
    pub staged_executable: NormalizedPath,
}

/// Outcome of resolving a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Direct(Invocation),
    /// The invocation only works after `stage` ran.
    Staged { stage: StagePlan, invocation: Invocation },
}

/// Resolves [`ExecutableLocator`]s for one platform.
#[derive(Debug)]
pub struct ExecutableResolver {
    platform: PlatformCapabilities,
    config: PluginConfig,
    normalizer: PathNormalizer,
    probe: Box<dyn ExecutableProbe>,
}

impl ExecutableResolver {
    pub fn new(platform: PlatformCapabilities, config: PluginConfig) -> Self {
        let normalizer = platform.normalizer();
        Self {
            platform,
            config,
            normalizer,
            probe: Box::new(FsProbe),
        }
    }

    /// Replace the filesystem probe used to find the launcher.
    pub fn with_probe(mut self, probe: impl ExecutableProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn platform(&self) -> &PlatformCapabilities {
        &self.platform
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &PathNormalizer {
        &self.normalizer
    }

    /// Resolve `locator` for a plugin running in `context`.
    pub fn resolve(&self, locator: &ExecutableLocator, context: &PluginContext) -> Result<Resolution> {
        match locator {
            ExecutableLocator::Preinstalled(path) => {
                let executable = self.normalizer.normalize(path)?;
                if !executable.is_absolute() {
                    return Err(Error::RelativeExecutable {
                        path: path.as_str().to_string(),
                    });
                }
                Ok(Resolution::Direct(Invocation::direct(executable)))
            }
            ExecutableLocator::Product(name) if self.platform.direct_tool_linkage => {
                let path = context.tool(name).ok_or_else(|| Error::ToolNotDeclared {
                    name: name.clone(),
                })?;
                let executable = self.normalizer.normalize(path)?;
                tracing::debug!(product = %name, executable = %executable, "resolved product directly");
                Ok(Resolution::Direct(Invocation::direct(executable)))
            }
            ExecutableLocator::Product(name) => self.stage(name, context),
        }
    }

    /// Find the toolchain launcher on the search path.
    ///
    /// Entries ending in the toolchain layout suffix point at the launcher's
    /// `bin` directory and are tried first, wherever they appear in the
    /// search path; the plain entries follow in their original order.
    pub fn find_launcher(&self, product: &str) -> Result<NormalizedPath> {
        let launcher = self.platform.executable_name(&self.config.toolchain.launcher);

        for directory in self.launcher_directories() {
            let candidate = directory.join(&launcher);
            if self.probe.is_executable(&candidate) {
                tracing::debug!(launcher = %candidate, "found toolchain launcher");
                return Ok(candidate);
            }
        }

        Err(Error::ToolchainNotFound {
            product: product.to_string(),
            launcher,
            variable: self.platform.search_path.variable.clone(),
        })
    }

    fn launcher_directories(&self) -> Vec<NormalizedPath> {
        let entries: Vec<NormalizedPath> = self
            .platform
            .search_path
            .entries()
            .filter_map(|entry| match self.normalizer.normalize_str(entry) {
                Ok(path) => Some(path),
                Err(err) => {
                    tracing::warn!(entry, error = %err, "skipping unusable search path entry");
                    None
                }
            })
            .collect();

        let suffix = &self.config.toolchain.layout_suffix;
        let toolchain_bins = entries
            .iter()
            .filter_map(|entry| entry.strip_component_suffix(suffix))
            .map(|root| root.join("bin"));

        toolchain_bins.chain(entries.iter().cloned()).collect()
    }

    fn stage(&self, product: &str, context: &PluginContext) -> Result<Resolution> {
        let launcher = self.find_launcher(product)?;
        let package_directory = self.normalizer.normalize(&context.package.directory)?;
        let work_directory = self.normalizer.normalize(&context.plugin_work_directory)?;

        let staging = &self.config.staging;
        let scratch = ScratchArea::new(&work_directory, &staging.scratch_dir).for_product(product);
        let staged_executable = scratch
            .join(&staging.configuration)
            .join(&self.platform.executable_name(product));

        let sources = context.package.source_dependencies(product)?;
        let input_files = self.normalizer.normalize_all(sources.iter())?;

        // Nested sandboxes are forbidden, and the host may already run us in one
        let shared = vec![
            "--disable-sandbox".to_string(),
            "--package-path".to_string(),
            package_directory.to_string(),
            "--scratch-path".to_string(),
            scratch.to_string(),
            "--configuration".to_string(),
            staging.configuration.clone(),
        ];

        let mut stage_arguments = vec!["build".to_string()];
        stage_arguments.extend(shared.iter().cloned());
        stage_arguments.extend(["--product".to_string(), product.to_string()]);

        let mut argument_prefix = vec!["run".to_string(), "--skip-build".to_string()];
        argument_prefix.extend(shared);
        argument_prefix.push(product.to_string());

        tracing::debug!(
            product,
            launcher = %launcher,
            scratch = %scratch,
            "staging product out of process"
        );

        Ok(Resolution::Staged {
            stage: StagePlan {
                product: product.to_string(),
                launcher: launcher.clone(),
                arguments: stage_arguments,
                working_directory: package_directory.clone(),
                input_files,
                staged_executable,
            },
            invocation: Invocation {
                executable: launcher,
                argument_prefix,
                working_directory: Some(package_directory),
            },
        })
    }
}
