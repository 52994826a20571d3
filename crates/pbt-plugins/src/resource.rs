//! Resource generator plugin

use pbt_core::{
    BuildToolPlugin, CommandIntent, DiscoveryCommand, DiscoveryCommandProducer, ExecutableLocator,
    ImmediateCommand, ImmediateCommandProducer, PluginContext, Producer, Result, SourceModule,
    Target,
};
use pbt_fs::HostPath;
use pbt_generate::resource::{INPUT_SUFFIX, output_name};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Product name of the converter executable
pub const GENERATOR: &str = "generate-resource";
/// Directory below the plugin work directory receiving the resources
pub const OUTPUT_DIRECTORY: &str = "GeneratedResources";

/// Converts each `name.in` of a target into `GeneratedResources/name.out`.
///
/// One command handles all inputs of a target. Targets listed in
/// `discovery_targets` get a discovery command instead, whose outputs are
/// whatever the converter leaves in the output directory.
#[derive(Debug, Clone, Default)]
pub struct ResourceGeneratorPlugin {
    discovery_targets: BTreeSet<String>,
}

impl ResourceGeneratorPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_discovery_targets(discovery_targets: BTreeSet<String>) -> Self {
        Self { discovery_targets }
    }

    fn inputs<'a>(module: &SourceModule<'a>) -> Vec<&'a HostPath> {
        module.source_files_with_suffix(INPUT_SUFFIX)
    }

    fn output_directory(context: &PluginContext) -> HostPath {
        context.plugin_work_directory.join(OUTPUT_DIRECTORY)
    }
}

impl ImmediateCommandProducer for ResourceGeneratorPlugin {
    fn immediate_commands(
        &self,
        context: &PluginContext,
        module: &SourceModule<'_>,
    ) -> Result<Vec<CommandIntent>> {
        let inputs = Self::inputs(module);
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let output_directory = Self::output_directory(context);
        let outputs: Vec<HostPath> = inputs
            .iter()
            .filter_map(|input| input.file_name().and_then(output_name))
            .map(|name| output_directory.join(&name))
            .collect();

        let command = ImmediateCommand::new(ExecutableLocator::product(GENERATOR))
            .with_display_name("Running converter")
            .with_arguments(inputs.iter().copied())
            .with_arguments([&output_directory])
            .with_input_files(inputs.into_iter().cloned())
            .with_output_files(outputs);
        tracing::debug!(
            module = module.name(),
            inputs = command.input_files.len(),
            "planned resource conversion"
        );
        Ok(vec![command.into()])
    }
}

impl DiscoveryCommandProducer for ResourceGeneratorPlugin {
    fn discovery_commands(
        &self,
        context: &PluginContext,
        module: &SourceModule<'_>,
    ) -> Result<Vec<CommandIntent>> {
        let inputs = Self::inputs(module);
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let output_directory = Self::output_directory(context);
        let command = DiscoveryCommand::new(
            ExecutableLocator::product(GENERATOR),
            output_directory.clone(),
        )
        .with_display_name("Running converter")
        .with_arguments(inputs)
        .with_arguments([&output_directory]);
        Ok(vec![command.into()])
    }
}

impl BuildToolPlugin for ResourceGeneratorPlugin {
    fn name(&self) -> &str {
        "resource-generator"
    }

    fn source_root(&self) -> Option<PathBuf> {
        Some(crate::plugin_source_root())
    }

    fn producer(&self, target: &Target) -> Producer<'_> {
        if self.discovery_targets.contains(&target.name) {
            Producer::Discovery(self)
        } else {
            Producer::Immediate(self)
        }
    }
}
