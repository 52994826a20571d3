//! Integration tests for building host commands on a staging platform.

use pbt_core::{
    CommandBuilder, CommandIntent, DiscoveryCommand, ExecutableLocator, ExecutableProbe,
    ExecutableResolver, HostCommand, ImmediateCommand, Package, PlatformCapabilities,
    PluginConfig, PluginContext, Product, Target, TargetModule,
};
use pbt_fs::{HostPath, NormalizedPath};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

#[derive(Debug)]
struct LauncherProbe;

impl ExecutableProbe for LauncherProbe {
    fn is_executable(&self, path: &NormalizedPath) -> bool {
        path.as_str() == r"C:\tc\usr\bin\swift.exe"
    }
}

const STAGED: &str = r"C:\work\ToolScratch\gen\debug\gen.exe";

fn context() -> PluginContext {
    PluginContext {
        plugin_work_directory: HostPath::new("/C:/work"),
        package: Package {
            directory: HostPath::new("/C:/pkg"),
            products: vec![Product {
                name: "gen".into(),
                targets: vec!["Gen".into()],
            }],
            targets: vec![Target {
                name: "Gen".into(),
                dependencies: vec![],
                module: TargetModule::SourceModule {
                    source_files: vec![HostPath::new("/C:/pkg/Gen/main.rs")],
                },
            }],
        },
        tools: BTreeMap::new(),
    }
}

fn builder() -> CommandBuilder {
    let platform = PlatformCapabilities::windows(
        r"C:\pkg",
        Some(r"C:\tc\usr\lib\swift\pm\PluginAPI".to_string()),
    );
    CommandBuilder::new(
        ExecutableResolver::new(platform, PluginConfig::default()).with_probe(LauncherProbe),
    )
}

fn paths(files: &[NormalizedPath]) -> Vec<&str> {
    files.iter().map(NormalizedPath::as_str).collect()
}

fn immediate() -> CommandIntent {
    ImmediateCommand::new(ExecutableLocator::product("gen"))
        .with_display_name("Running converter")
        .with_arguments([HostPath::new("/C:/pkg/Lib/a.in"), HostPath::new("/C:/work/out")])
        .with_input_files([HostPath::new("/C:/pkg/Lib/a.in")])
        .with_output_files([HostPath::new("/C:/work/out/a.out")])
        .into()
}

#[test]
fn test_staged_command_is_preceded_by_stage_command() {
    let commands = builder().build(&immediate(), &context(), &[]).unwrap();

    assert_eq!(commands.len(), 2);
    let stage = &commands[0];
    let run = &commands[1];

    assert_eq!(stage.display_name(), Some("Staging gen"));
    assert_eq!(stage.executable().as_str(), r"C:\tc\usr\bin\swift.exe");
    assert_eq!(paths(stage.output_files()), vec![STAGED]);
    assert_eq!(paths(stage.input_files()), vec![r"C:\pkg\Gen\main.rs"]);

    assert_eq!(run.display_name(), Some("Running converter"));
    assert_eq!(run.executable(), stage.executable());
    assert_eq!(run.working_directory().unwrap().as_str(), r"C:\pkg");
    assert!(run.output_files().iter().all(|out| !stage.output_files().contains(out)));
}

#[test]
fn test_staged_command_arguments_follow_invocation_prefix() {
    let commands = builder().build(&immediate(), &context(), &[]).unwrap();
    let arguments = commands[1].arguments();

    assert_eq!(&arguments[..2], ["run", "--skip-build"]);
    assert_eq!(arguments[arguments.len() - 3], "gen");
    assert_eq!(
        &arguments[arguments.len() - 2..],
        [r"C:\pkg\Lib\a.in", r"C:\work\out"]
    );
}

#[test]
fn test_immediate_inputs_are_intent_then_staged_then_plugin_sources() {
    let plugin_sources = [
        HostPath::new("/C:/plugins/Resource/plugin.rs"),
        HostPath::new("/C:/pkg/Lib/a.in"),
    ];
    let commands = builder()
        .build(&immediate(), &context(), &plugin_sources)
        .unwrap();

    assert_eq!(
        paths(commands[1].input_files()),
        vec![r"C:\pkg\Lib\a.in", STAGED, r"C:\plugins\Resource\plugin.rs"]
    );
    assert_eq!(paths(commands[1].output_files()), vec![r"C:\work\out\a.out"]);
    assert_eq!(
        paths(commands[0].input_files()),
        vec![
            r"C:\pkg\Gen\main.rs",
            r"C:\plugins\Resource\plugin.rs",
            r"C:\pkg\Lib\a.in"
        ]
    );
}

#[test]
fn test_discovery_becomes_prebuild_with_staged_precondition() {
    let intent: CommandIntent =
        DiscoveryCommand::new(ExecutableLocator::product("gen"), HostPath::new("/C:/work/out"))
            .with_arguments(["--all"])
            .with_env("GEN_MODE", "discover")
            .into();

    let commands = builder()
        .build(&intent, &context(), &[HostPath::new("/C:/plugins/plugin.rs")])
        .unwrap();

    assert_eq!(commands.len(), 2);
    match &commands[1] {
        HostCommand::Prebuild {
            input_files,
            output_files_directory,
            environment,
            arguments,
            ..
        } => {
            assert_eq!(paths(input_files), vec![STAGED]);
            assert_eq!(output_files_directory.as_str(), r"C:\work\out");
            assert_eq!(environment.get("GEN_MODE").map(String::as_str), Some("discover"));
            assert_eq!(arguments.last().map(String::as_str), Some("--all"));
        }
        other => panic!("expected a prebuild command, got {other:?}"),
    }
}

#[test]
fn test_build_is_deterministic() {
    let builder = builder();
    let context = context();
    let sources = [HostPath::new("/C:/plugins/plugin.rs")];

    let first = builder.build(&immediate(), &context, &sources).unwrap();
    let second = builder.build(&immediate(), &context, &sources).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_bad_output_path_fails_the_command() {
    let intent: CommandIntent = ImmediateCommand::new(ExecutableLocator::product("gen"))
        .with_output_files([HostPath::new("C:/work/bad*name")])
        .into();

    let err = builder().build(&intent, &context(), &[]).unwrap_err();
    assert!(err.is_path_resolution());
}
