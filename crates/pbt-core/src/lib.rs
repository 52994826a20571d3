//! Portable build commands for build-tool plugins
//!
//! Plugins describe the commands they want in platform-agnostic terms
//! ([`CommandIntent`]). A [`CommandBuilder`] turns each intent into the
//! [`HostCommand`]s the host registers, repairing every path and resolving
//! executables for the platform at hand.
//!
//! When the host cannot link a plugin's tool dependency directly, the tool
//! is staged: built out of process with the toolchain launcher found on the
//! search path, then run through that launcher.

pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod intent;
pub mod logging;
pub mod platform;
pub mod plugin;
pub mod resolver;
pub mod scratch;

pub use builder::CommandBuilder;
pub use config::{PluginConfig, StagingConfig, ToolchainConfig};
pub use context::{Package, PluginContext, Product, SourceModule, Target, TargetModule};
pub use error::{CommandFailure, Error, Result};
pub use host::HostCommand;
pub use intent::{
    CommandArgument, CommandIntent, DiscoveryCommand, ExecutableLocator, ImmediateCommand,
};
pub use platform::{PlatformCapabilities, SearchPath};
pub use plugin::{
    BuildToolPlugin, DiscoveryCommandProducer, ImmediateCommandProducer, Producer,
    create_build_commands,
};
pub use resolver::{
    ExecutableProbe, ExecutableResolver, FsProbe, Invocation, Resolution, StagePlan,
};
pub use scratch::ScratchArea;
