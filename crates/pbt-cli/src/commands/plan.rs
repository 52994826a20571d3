//! Planning a target's build commands

use pbt_core::{
    CommandBuilder, ExecutableResolver, HostCommand, PlatformCapabilities, PluginConfig,
    PluginContext, create_build_commands,
};
use pbt_fs::{ConfigStore, NormalizedPath, PathNormalizer};
use pbt_plugins::PluginRegistry;
use std::path::{Path, PathBuf};

use crate::cli::PlatformArg;
use crate::error::{CliError, Result};

/// Everything `pbt plan` was asked to do.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub plugin: String,
    pub context: PathBuf,
    pub target: String,
    pub config: Option<PathBuf>,
    pub platform: PlatformArg,
    pub search_path: Option<String>,
    pub current_dir: Option<String>,
}

pub fn run_plan(request: &PlanRequest) -> Result<()> {
    let commands = plan(request)?;
    println!("{}", serde_json::to_string_pretty(&commands)?);
    Ok(())
}

/// Plan the commands for the request without printing them.
pub fn plan(request: &PlanRequest) -> Result<Vec<HostCommand>> {
    let config = match &request.config {
        Some(path) => PluginConfig::load(&local_path(path)?)?,
        None => PluginConfig::default(),
    };
    let context: PluginContext = ConfigStore::new().load(&local_path(&request.context)?)?;
    let platform = platform(request)?;

    let registry = PluginRegistry::with_builtins(&config);
    let plugin = registry.get(&request.plugin).ok_or_else(|| {
        CliError::user(format!(
            "Unknown plugin '{}'. Available: {}",
            request.plugin,
            registry.names().join(", ")
        ))
    })?;
    let target = context.target(&request.target)?;

    tracing::debug!(
        plugin = %request.plugin,
        target_name = %request.target,
        style = ?platform.path_style,
        "planning"
    );
    let builder = CommandBuilder::new(ExecutableResolver::new(platform, config));
    Ok(create_build_commands(plugin, &context, target, &builder)?)
}

fn platform(request: &PlanRequest) -> Result<PlatformCapabilities> {
    let mut platform = match request.platform {
        PlatformArg::Host => {
            let mut detected = PlatformCapabilities::detect()?;
            if let Some(dir) = &request.current_dir {
                detected.current_dir = dir.clone();
            }
            detected
        }
        PlatformArg::Posix => PlatformCapabilities::posix(
            request.current_dir.clone().unwrap_or_else(|| "/".to_string()),
            None,
        ),
        PlatformArg::Windows => PlatformCapabilities::windows(
            request.current_dir.clone().unwrap_or_else(|| r"C:\".to_string()),
            None,
        ),
    };
    if let Some(search_path) = &request.search_path {
        platform = platform.with_search_path(search_path.clone());
    }
    Ok(platform)
}

/// A file named on the command line, in the form pbt-fs reads from.
fn local_path(path: &Path) -> Result<NormalizedPath> {
    Ok(PathNormalizer::native().normalize_str(&path.to_string_lossy())?)
}
