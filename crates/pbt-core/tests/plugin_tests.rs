//! Integration tests for planning a target's commands through a plugin.

use pbt_core::{
    BuildToolPlugin, CommandBuilder, CommandIntent, Error, ExecutableLocator, ExecutableProbe,
    ExecutableResolver, ImmediateCommand, ImmediateCommandProducer, Package,
    PlatformCapabilities, PluginConfig, PluginContext, Producer, Product, SourceModule, Target,
    TargetModule, create_build_commands,
};
use pbt_fs::{HostPath, NormalizedPath};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Emits one command per `.in` file, each running `locator`.
struct EchoPlugin {
    locator: ExecutableLocator,
    source_root: Option<PathBuf>,
}

impl EchoPlugin {
    fn new(locator: ExecutableLocator) -> Self {
        Self {
            locator,
            source_root: None,
        }
    }
}

impl ImmediateCommandProducer for EchoPlugin {
    fn immediate_commands(
        &self,
        _context: &PluginContext,
        module: &SourceModule<'_>,
    ) -> pbt_core::Result<Vec<CommandIntent>> {
        Ok(module
            .source_files_with_suffix(".in")
            .into_iter()
            .map(|input| {
                CommandIntent::from(
                    ImmediateCommand::new(self.locator.clone())
                        .with_display_name(format!("Echo {input}"))
                        .with_arguments([input])
                        .with_input_files([input.clone()]),
                )
            })
            .collect())
    }
}

impl BuildToolPlugin for EchoPlugin {
    fn name(&self) -> &str {
        "echo"
    }

    fn source_root(&self) -> Option<PathBuf> {
        self.source_root.clone()
    }

    fn producer(&self, _target: &Target) -> Producer<'_> {
        Producer::Immediate(self)
    }
}

#[derive(Debug)]
struct NoLauncher;

impl ExecutableProbe for NoLauncher {
    fn is_executable(&self, _path: &NormalizedPath) -> bool {
        false
    }
}

#[derive(Debug)]
struct AnyLauncher;

impl ExecutableProbe for AnyLauncher {
    fn is_executable(&self, path: &NormalizedPath) -> bool {
        path.file_name() == Some("swift.exe")
    }
}

fn context(files: &[&str]) -> PluginContext {
    PluginContext {
        plugin_work_directory: HostPath::new("/C:/work"),
        package: Package {
            directory: HostPath::new("/C:/pkg"),
            products: vec![Product {
                name: "echo-tool".into(),
                targets: vec!["EchoTool".into()],
            }],
            targets: vec![
                Target {
                    name: "Lib".into(),
                    dependencies: vec![],
                    module: TargetModule::SourceModule {
                        source_files: files.iter().map(|f| HostPath::new(*f)).collect(),
                    },
                },
                Target {
                    name: "EchoTool".into(),
                    dependencies: vec![],
                    module: TargetModule::SourceModule {
                        source_files: vec![HostPath::new("/C:/pkg/EchoTool/main.rs")],
                    },
                },
                Target {
                    name: "Prebuilt".into(),
                    dependencies: vec![],
                    module: TargetModule::Other,
                },
            ],
        },
        tools: BTreeMap::new(),
    }
}

fn windows_builder(probe: impl ExecutableProbe + 'static) -> CommandBuilder {
    let platform = PlatformCapabilities::windows(r"C:\pkg", Some(r"C:\tools".to_string()));
    CommandBuilder::new(ExecutableResolver::new(platform, PluginConfig::default()).with_probe(probe))
}

#[test]
fn test_shared_stage_command_is_emitted_once() {
    let context = context(&["/C:/pkg/Lib/a.in", "/C:/pkg/Lib/b.in"]);
    let plugin = EchoPlugin::new(ExecutableLocator::product("echo-tool"));
    let target = context.target("Lib").unwrap();

    let commands =
        create_build_commands(&plugin, &context, target, &windows_builder(AnyLauncher)).unwrap();

    let names: Vec<_> = commands.iter().filter_map(|c| c.display_name()).collect();
    assert_eq!(
        names,
        vec!["Staging echo-tool", "Echo /C:/pkg/Lib/a.in", "Echo /C:/pkg/Lib/b.in"]
    );
}

#[test]
fn test_missing_toolchain_is_fatal_for_target() {
    let context = context(&["/C:/pkg/Lib/a.in"]);
    let plugin = EchoPlugin::new(ExecutableLocator::product("echo-tool"));
    let target = context.target("Lib").unwrap();

    let err =
        create_build_commands(&plugin, &context, target, &windows_builder(NoLauncher)).unwrap_err();
    assert!(matches!(err, Error::ToolchainNotFound { .. }));
}

#[test]
fn test_path_failures_are_collected_per_command() {
    let context = context(&["/C:/pkg/Lib/ok.in", "C:/pkg/Lib/bad|name.in", "C:/pkg/Lib/wild*.in"]);
    let plugin = EchoPlugin::new(ExecutableLocator::preinstalled("C:/tools/echo.exe"));
    let target = context.target("Lib").unwrap();

    let err =
        create_build_commands(&plugin, &context, target, &windows_builder(NoLauncher)).unwrap_err();

    match err {
        Error::CommandsFailed { target, failures } => {
            assert_eq!(target, "Lib");
            assert_eq!(failures.len(), 2);
            assert_eq!(failures[0].command, "Echo C:/pkg/Lib/bad|name.in");
            assert!(failures.iter().all(|f| f.error.is_path_resolution()));
        }
        other => panic!("expected CommandsFailed, got {other:?}"),
    }
}

#[test]
fn test_target_without_sources_yields_no_commands() {
    let context = context(&[]);
    let plugin = EchoPlugin::new(ExecutableLocator::product("echo-tool"));
    let target = context.target("Prebuilt").unwrap();

    let commands =
        create_build_commands(&plugin, &context, target, &windows_builder(NoLauncher)).unwrap();
    assert!(commands.is_empty());
}

#[test]
fn test_plugin_sources_become_inputs() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("nested")).unwrap();
    fs::write(temp.path().join("plugin.rs"), "").unwrap();
    fs::write(temp.path().join("nested/util.rs"), "").unwrap();

    let plugin = EchoPlugin {
        locator: ExecutableLocator::preinstalled("/usr/bin/echo"),
        source_root: Some(temp.path().to_path_buf()),
    };
    let mut context = context(&["/pkg/Lib/a.in"]);
    context.plugin_work_directory = HostPath::new("/work");
    context.package.directory = HostPath::new("/pkg");
    let target = context.target("Lib").unwrap();

    let platform = PlatformCapabilities::posix("/pkg", None);
    let builder = CommandBuilder::new(ExecutableResolver::new(platform, PluginConfig::default()));
    let commands = create_build_commands(&plugin, &context, target, &builder).unwrap();

    assert_eq!(commands.len(), 1);
    let inputs: Vec<_> = commands[0].input_files().iter().map(NormalizedPath::as_str).collect();
    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs[0], "/pkg/Lib/a.in");
    assert!(inputs[1].ends_with("nested/util.rs"));
    assert!(inputs[2].ends_with("plugin.rs"));
}
