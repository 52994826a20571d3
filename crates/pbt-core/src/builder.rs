//! Turning command intents into host commands

use pbt_fs::{HostPath, NormalizedPath, PathNormalizer};

use crate::context::PluginContext;
use crate::error::Result;
use crate::host::HostCommand;
use crate::intent::{CommandArgument, CommandIntent, DiscoveryCommand, ImmediateCommand};
use crate::resolver::{ExecutableResolver, Invocation, Resolution, StagePlan};

/// Builds the host commands for one intent.
///
/// Output depends only on the intent, the context, the platform and the
/// plugin's own sources: building the same intent twice yields identical
/// commands.
#[derive(Debug)]
pub struct CommandBuilder {
    resolver: ExecutableResolver,
}

impl CommandBuilder {
    pub fn new(resolver: ExecutableResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &ExecutableResolver {
        &self.resolver
    }

    fn normalizer(&self) -> &PathNormalizer {
        self.resolver.normalizer()
    }

    /// Build the commands for `intent`.
    ///
    /// Yields the command itself, preceded by the command that stages its
    /// executable when the executable has to be built first.
    /// `plugin_sources` are the plugin's own source files; a change to the
    /// plugin invalidates the outputs of every immediate command it emits.
    pub fn build(
        &self,
        intent: &CommandIntent,
        context: &PluginContext,
        plugin_sources: &[HostPath],
    ) -> Result<Vec<HostCommand>> {
        let resolution = self.resolver.resolve(intent.locator(), context)?;
        let (stage, invocation) = match resolution {
            Resolution::Direct(invocation) => (None, invocation),
            Resolution::Staged { stage, invocation } => (Some(stage), invocation),
        };
        let staged_executable = stage.as_ref().map(|s| s.staged_executable.clone());
        let plugin_sources = self.normalizer().normalize_all(plugin_sources)?;

        let command = match intent {
            CommandIntent::Immediate(cmd) => {
                self.immediate(cmd, invocation, staged_executable, &plugin_sources)?
            }
            CommandIntent::Discovery(cmd) => self.discovery(cmd, invocation, staged_executable)?,
        };

        let mut commands = Vec::with_capacity(2);
        if let Some(stage) = stage {
            commands.push(stage_command(stage, plugin_sources));
        }
        commands.push(command);
        Ok(commands)
    }

    fn immediate(
        &self,
        cmd: &ImmediateCommand,
        invocation: Invocation,
        staged_executable: Option<NormalizedPath>,
        plugin_sources: &[NormalizedPath],
    ) -> Result<HostCommand> {
        let mut input_files = self.normalizer().normalize_all(&cmd.input_files)?;
        input_files.extend(staged_executable);
        input_files.extend(plugin_sources.iter().cloned());

        Ok(HostCommand::Build {
            display_name: cmd.display_name.clone(),
            arguments: self.arguments(&invocation, &cmd.arguments)?,
            executable: invocation.executable,
            environment: cmd.environment.clone(),
            working_directory: invocation.working_directory,
            input_files: dedup(input_files),
            output_files: dedup(self.normalizer().normalize_all(&cmd.output_files)?),
        })
    }

    fn discovery(
        &self,
        cmd: &DiscoveryCommand,
        invocation: Invocation,
        staged_executable: Option<NormalizedPath>,
    ) -> Result<HostCommand> {
        Ok(HostCommand::Prebuild {
            display_name: cmd.display_name.clone(),
            arguments: self.arguments(&invocation, &cmd.arguments)?,
            executable: invocation.executable,
            environment: cmd.environment.clone(),
            working_directory: invocation.working_directory,
            input_files: staged_executable.into_iter().collect(),
            output_files_directory: self.normalizer().normalize(&cmd.output_files_directory)?,
        })
    }

    fn arguments(&self, invocation: &Invocation, arguments: &[CommandArgument]) -> Result<Vec<String>> {
        let mut rendered = invocation.argument_prefix.clone();
        for argument in arguments {
            rendered.push(match argument {
                CommandArgument::Text(text) => text.clone(),
                CommandArgument::Path(path) => self.normalizer().normalize(path)?.to_string(),
            });
        }
        Ok(rendered)
    }
}

fn stage_command(stage: StagePlan, plugin_sources: Vec<NormalizedPath>) -> HostCommand {
    let mut input_files = stage.input_files;
    input_files.extend(plugin_sources);
    HostCommand::Build {
        display_name: Some(format!("Staging {}", stage.product)),
        executable: stage.launcher,
        arguments: stage.arguments,
        environment: Default::default(),
        working_directory: Some(stage.working_directory),
        input_files: dedup(input_files),
        output_files: vec![stage.staged_executable],
    }
}

/// Drop repeated paths, keeping the first occurrence.
fn dedup(paths: Vec<NormalizedPath>) -> Vec<NormalizedPath> {
    let mut seen = std::collections::HashSet::with_capacity(paths.len());
    paths
        .into_iter()
        .filter(|p| seen.insert(p.as_str().to_string()))
        .collect()
}
