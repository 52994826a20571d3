//! The plugin contract and the driver that plans a target's commands

use std::path::PathBuf;

use crate::builder::CommandBuilder;
use crate::context::{PluginContext, SourceModule, Target};
use crate::error::{CommandFailure, Error, Result};
use crate::host::HostCommand;
use crate::intent::CommandIntent;

/// A plugin whose commands are known before the build starts.
pub trait ImmediateCommandProducer {
    fn immediate_commands(
        &self,
        context: &PluginContext,
        module: &SourceModule<'_>,
    ) -> Result<Vec<CommandIntent>>;
}

/// A plugin whose outputs are only known after its commands ran.
pub trait DiscoveryCommandProducer {
    fn discovery_commands(
        &self,
        context: &PluginContext,
        module: &SourceModule<'_>,
    ) -> Result<Vec<CommandIntent>>;
}

/// Which kind of commands a plugin produces for a target.
pub enum Producer<'a> {
    Immediate(&'a dyn ImmediateCommandProducer),
    Discovery(&'a dyn DiscoveryCommandProducer),
}

/// A build-tool plugin.
pub trait BuildToolPlugin {
    /// Name the plugin is registered under
    fn name(&self) -> &str;

    /// Directory holding the plugin's own sources. Commands built for the
    /// plugin depend on every file below it.
    fn source_root(&self) -> Option<PathBuf> {
        None
    }

    fn producer(&self, target: &Target) -> Producer<'_>;

    /// The intents for `target`. Targets without sources get none.
    fn intents(&self, context: &PluginContext, target: &Target) -> Result<Vec<CommandIntent>> {
        let Some(module) = target.source_module() else {
            tracing::debug!(plugin = self.name(), target_name = %target.name, "target has no sources");
            return Ok(Vec::new());
        };
        match self.producer(target) {
            Producer::Immediate(producer) => producer.immediate_commands(context, &module),
            Producer::Discovery(producer) => producer.discovery_commands(context, &module),
        }
    }
}

/// Plan every host command `plugin` needs for `target`.
///
/// A missing toolchain stops planning at once. Any other failure only
/// affects its own command; planning continues and all such failures are
/// reported together as [`Error::CommandsFailed`].
pub fn create_build_commands(
    plugin: &dyn BuildToolPlugin,
    context: &PluginContext,
    target: &Target,
    builder: &CommandBuilder,
) -> Result<Vec<HostCommand>> {
    let plugin_sources = match plugin.source_root() {
        Some(root) => pbt_fs::discovery::source_files(root)?,
        None => Vec::new(),
    };
    let intents = plugin.intents(context, target)?;

    let mut commands: Vec<HostCommand> = Vec::new();
    let mut failures = Vec::new();
    for intent in &intents {
        match builder.build(intent, context, &plugin_sources) {
            Ok(built) => {
                // Intents sharing a staged product each carry the same stage command
                for command in built {
                    if !commands.contains(&command) {
                        commands.push(command);
                    }
                }
            }
            Err(err) if err.is_fatal_for_target() => return Err(err),
            Err(err) => {
                tracing::warn!(command = %intent.label(), error = %err, "command could not be built");
                failures.push(CommandFailure {
                    command: intent.label(),
                    error: err,
                });
            }
        }
    }

    if !failures.is_empty() {
        return Err(Error::CommandsFailed {
            target: target.name.clone(),
            failures,
        });
    }

    tracing::info!(
        plugin = plugin.name(),
        target_name = %target.name,
        commands = commands.len(),
        "planned build commands"
    );
    Ok(commands)
}
