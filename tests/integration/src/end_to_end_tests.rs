//! End-to-end tests: plan a target's commands, then run them the way a host
//! would, dispatching each executable to the generator library.

use pbt_core::{
    BuildToolPlugin, CommandBuilder, ExecutableResolver, HostCommand, PluginConfig,
    create_build_commands,
};
use pbt_fs::NormalizedPath;
use pbt_generate::{resource, split_arguments, testgen};
use pbt_plugins::{ResourceGeneratorPlugin, TestGeneratorPlugin};
use pbt_test_utils::{StaticProbe, TestPackage, virtual_posix, virtual_windows, windows_package_context};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn posix_builder() -> CommandBuilder {
    CommandBuilder::new(ExecutableResolver::new(virtual_posix(), PluginConfig::default()))
}

/// Run a planned build command in process.
fn execute(command: &HostCommand) -> pbt_generate::Result<()> {
    let program = command.executable().file_name().unwrap_or_default().to_string();
    let (inputs, output) = split_arguments(&program, "", command.arguments())?;
    match program.as_str() {
        "generate-resource" => resource::convert(&inputs, &output).map(|_| ()),
        "generate-tests" => testgen::generate(&inputs, &output),
        other => panic!("no generator called {other}"),
    }
}

fn plan(plugin: &dyn BuildToolPlugin, package: &TestPackage, target: &str) -> Vec<HostCommand> {
    let context = package.context();
    let target = context.target(target).unwrap();
    create_build_commands(plugin, &context, target, &posix_builder()).unwrap()
}

fn existing_files(dir: &std::path::Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn resource_outputs_match_declared_outputs() {
    let mut package = TestPackage::new();
    package
        .add_target("Lib", &[("Test1.in", "payload one"), ("Test2.in", "payload two"), ("lib.rs", "")])
        .add_tool("generate-resource", "/opt/bin/generate-resource");

    let commands = plan(&ResourceGeneratorPlugin::new(), &package, "Lib");
    assert_eq!(commands.len(), 1);
    execute(&commands[0]).unwrap();

    let declared: BTreeSet<String> = commands[0]
        .output_files()
        .iter()
        .map(|p| p.file_name().unwrap().to_string())
        .collect();
    let produced = existing_files(&package.work_dir().join("GeneratedResources"));
    assert_eq!(produced, declared);
    assert_eq!(
        produced,
        BTreeSet::from(["Test1.out".to_string(), "Test2.out".to_string()])
    );
    let content =
        std::fs::read_to_string(package.work_dir().join("GeneratedResources/Test2.out")).unwrap();
    assert_eq!(content, "payload two");
}

#[test]
fn test_stubs_are_generated_in_input_order() {
    let mut package = TestPackage::new();
    package
        .add_target("Tests", &[("alpha.testgen", ""), ("beta.testgen", "")])
        .add_tool("generate-tests", "/opt/bin/generate-tests");

    let commands = plan(&TestGeneratorPlugin::new(), &package, "Tests");
    assert_eq!(commands.len(), 1);
    execute(&commands[0]).unwrap();

    let source = std::fs::read_to_string(package.work_dir().join("GeneratedTests.rs")).unwrap();
    let alpha = source.find("fn test_alpha()").unwrap();
    let beta = source.find("fn test_beta()").unwrap();
    assert!(alpha < beta);
}

#[test]
fn unreadable_input_leaves_no_outputs() {
    let mut package = TestPackage::new();
    package
        .add_target("Lib", &[("Test1.in", "payload")])
        .add_tool("generate-resource", "/opt/bin/generate-resource");
    std::fs::remove_file(package.source("Lib", "Test1.in")).unwrap();

    let commands = plan(&ResourceGeneratorPlugin::new(), &package, "Lib");
    let err = execute(&commands[0]).unwrap_err();

    assert!(matches!(err, pbt_generate::Error::UnreadableInput { .. }));
    assert!(existing_files(&package.work_dir().join("GeneratedResources")).is_empty());
}

#[test]
fn windows_plan_stages_before_running_and_keeps_outputs_apart() {
    let context = windows_package_context();
    let target = context.target("LibWithResource").unwrap();
    let builder = CommandBuilder::new(
        ExecutableResolver::new(virtual_windows(), PluginConfig::default())
            .with_probe(StaticProbe::windows_toolchain()),
    );

    let commands =
        create_build_commands(&ResourceGeneratorPlugin::new(), &context, target, &builder).unwrap();

    assert_eq!(commands.len(), 2);
    let (stage, run) = (&commands[0], &commands[1]);
    let staged = &stage.output_files()[0];
    assert!(run.input_files().contains(staged));
    assert!(
        run.output_files()
            .iter()
            .all(|out| !out.as_str().contains("ToolScratch"))
    );

    let all_paths: Vec<&NormalizedPath> = commands
        .iter()
        .flat_map(|c| c.input_files().iter().chain(c.output_files()))
        .collect();
    assert!(all_paths.iter().all(|p| p.is_absolute()));
    assert!(all_paths.iter().all(|p| !p.as_str().contains('/')));
}

#[test]
fn planning_twice_yields_identical_commands() {
    let context = windows_package_context();
    let target = context.target("LibWithTests").unwrap();
    let builder = CommandBuilder::new(
        ExecutableResolver::new(virtual_windows(), PluginConfig::default())
            .with_probe(StaticProbe::windows_toolchain()),
    );
    let plugin = TestGeneratorPlugin::new();

    let first = create_build_commands(&plugin, &context, target, &builder).unwrap();
    let second = create_build_commands(&plugin, &context, target, &builder).unwrap();
    assert_eq!(first, second);
}

/// `.in` file names, including leading-dot and multi-dot ones.
fn resource_file_names() -> impl Strategy<Value = BTreeSet<String>> {
    let name = ("\\.?", "[a-z0-9]{0,4}", "(\\.[a-z0-9]{1,3}){0,2}")
        .prop_map(|(dot, stem, extra)| format!("{dot}{stem}{extra}.in"));
    prop::collection::btree_set(name, 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn produced_resources_are_exactly_the_declared_outputs(names in resource_file_names()) {
        let files: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), n.as_str())).collect();
        let mut package = TestPackage::new();
        package
            .add_target("Lib", &files)
            .add_tool("generate-resource", "/opt/bin/generate-resource");

        let commands = plan(&ResourceGeneratorPlugin::new(), &package, "Lib");
        prop_assert_eq!(commands.len(), 1);
        execute(&commands[0]).unwrap();

        let declared: BTreeSet<String> = commands[0]
            .output_files()
            .iter()
            .map(|p| p.file_name().unwrap().to_string())
            .collect();
        let produced = existing_files(&package.work_dir().join("GeneratedResources"));
        prop_assert_eq!(declared.len(), names.len());
        prop_assert_eq!(produced, declared);
    }
}
