//! Test-stub generator plugin

use pbt_core::{
    BuildToolPlugin, CommandIntent, ExecutableLocator, ImmediateCommand, ImmediateCommandProducer,
    PluginContext, Producer, Result, SourceModule, Target,
};
use std::path::PathBuf;

/// Product name of the stub generator executable
pub const GENERATOR: &str = "generate-tests";
/// File below the plugin work directory receiving the generated tests
pub const OUTPUT_FILE: &str = "GeneratedTests.rs";
const INPUT_SUFFIX: &str = ".testgen";

/// Generates one test function per `.testgen` file of a target, all into a
/// single source file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestGeneratorPlugin;

impl TestGeneratorPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl ImmediateCommandProducer for TestGeneratorPlugin {
    fn immediate_commands(
        &self,
        context: &PluginContext,
        module: &SourceModule<'_>,
    ) -> Result<Vec<CommandIntent>> {
        let inputs = module.source_files_with_suffix(INPUT_SUFFIX);
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        let output = context.plugin_work_directory.join(OUTPUT_FILE);
        let stems: Vec<&str> = inputs.iter().filter_map(|input| input.file_stem()).collect();
        tracing::debug!(module = module.name(), ?stems, "planned test stub generation");

        let command = ImmediateCommand::new(ExecutableLocator::product(GENERATOR))
            .with_display_name(format!(
                "Generating test stubs for [{}] into {output}",
                stems.join(", ")
            ))
            .with_arguments(inputs.iter().copied())
            .with_arguments([&output])
            .with_input_files(inputs.into_iter().cloned())
            .with_output_files([output.clone()]);
        Ok(vec![command.into()])
    }
}

impl BuildToolPlugin for TestGeneratorPlugin {
    fn name(&self) -> &str {
        "test-generator"
    }

    fn source_root(&self) -> Option<PathBuf> {
        Some(crate::plugin_source_root())
    }

    fn producer(&self, _target: &Target) -> Producer<'_> {
        Producer::Immediate(self)
    }
}
