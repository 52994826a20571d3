use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pbt_core::{
    CommandBuilder, CommandIntent, ExecutableLocator, ExecutableProbe, ExecutableResolver,
    ImmediateCommand, Package, PlatformCapabilities, PluginConfig, PluginContext, Product, Target,
    TargetModule,
};
use pbt_fs::{HostPath, NormalizedPath};
use std::collections::BTreeMap;

#[derive(Debug)]
struct ToolchainProbe;

impl ExecutableProbe for ToolchainProbe {
    fn is_executable(&self, path: &NormalizedPath) -> bool {
        path.as_str().ends_with(r"\usr\bin\swift.exe")
    }
}

fn staged_build_benchmark(c: &mut Criterion) {
    let search_path = (0..20)
        .map(|i| format!(r"C:\tools\t{i}"))
        .chain([r"C:\tc\usr\lib\swift\pm\PluginAPI".to_string()])
        .collect::<Vec<_>>()
        .join(";");
    let platform = PlatformCapabilities::windows(r"C:\pkg", Some(search_path));
    let builder = CommandBuilder::new(
        ExecutableResolver::new(platform, PluginConfig::default()).with_probe(ToolchainProbe),
    );

    let context = PluginContext {
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
                    source_files: (0..50)
                        .map(|i| HostPath::new(format!("/C:/pkg/Gen/file{i}.rs")))
                        .collect(),
                },
            }],
        },
        tools: BTreeMap::new(),
    };
    let intent: CommandIntent = ImmediateCommand::new(ExecutableLocator::product("gen"))
        .with_arguments([HostPath::new("/C:/pkg/Lib/a.in")])
        .with_input_files([HostPath::new("/C:/pkg/Lib/a.in")])
        .with_output_files([HostPath::new("/C:/work/out/a.out")])
        .into();

    c.bench_function("builder::staged", |b| {
        b.iter(|| builder.build(black_box(&intent), &context, &[]).unwrap())
    });
}

criterion_group!(benches, staged_build_benchmark);
criterion_main!(benches);
