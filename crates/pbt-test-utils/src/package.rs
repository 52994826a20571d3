//! [`TestPackage`] builder for plugin test scenarios.

use pbt_core::{Package, PluginContext, Product, Target, TargetModule};
use pbt_fs::HostPath;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A package laid out in a temporary directory.
///
/// Source files are written under `pkg/Sources/<target>/`; the plugin work
/// directory is `work/`. Paths in the produced context are the host's
/// native strings.
///
/// # Example
///
/// ```rust,no_run
/// use pbt_test_utils::TestPackage;
///
/// let mut package = TestPackage::new();
/// package.add_target("Lib", &[("Test1.in", "one"), ("Test2.in", "two")]);
/// let context = package.context();
/// assert_eq!(context.package.targets.len(), 1);
/// ```
pub struct TestPackage {
    temp_dir: TempDir,
    targets: Vec<Target>,
    products: Vec<Product>,
    tools: BTreeMap<String, HostPath>,
}

impl Default for TestPackage {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPackage {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("pkg")).unwrap();
        fs::create_dir_all(temp_dir.path().join("work")).unwrap();
        Self {
            temp_dir,
            targets: Vec::new(),
            products: Vec::new(),
            tools: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn package_dir(&self) -> PathBuf {
        self.root().join("pkg")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root().join("work")
    }

    /// Write `files` (name, content) for a new source target.
    pub fn add_target(&mut self, name: &str, files: &[(&str, &str)]) -> &mut Self {
        let dir = self.package_dir().join("Sources").join(name);
        fs::create_dir_all(&dir).unwrap();
        let source_files = files
            .iter()
            .map(|(file, content)| {
                let path = dir.join(file);
                fs::write(&path, content).unwrap();
                HostPath::from(path)
            })
            .collect();
        self.targets.push(Target {
            name: name.to_string(),
            dependencies: Vec::new(),
            module: TargetModule::SourceModule { source_files },
        });
        self
    }

    /// Add a target without sources.
    pub fn add_binary_target(&mut self, name: &str) -> &mut Self {
        self.targets.push(Target {
            name: name.to_string(),
            dependencies: Vec::new(),
            module: TargetModule::Other,
        });
        self
    }

    pub fn add_dependency(&mut self, target: &str, dependency: &str) -> &mut Self {
        if let Some(t) = self.targets.iter_mut().find(|t| t.name == target) {
            t.dependencies.push(dependency.to_string());
        }
        self
    }

    pub fn add_product(&mut self, name: &str, targets: &[&str]) -> &mut Self {
        self.products.push(Product {
            name: name.to_string(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
        });
        self
    }

    /// Declare a tool the host resolved for the plugin.
    pub fn add_tool(&mut self, name: &str, path: impl AsRef<Path>) -> &mut Self {
        self.tools
            .insert(name.to_string(), HostPath::from(path.as_ref()));
        self
    }

    /// Path of a source file written by [`add_target`](Self::add_target).
    pub fn source(&self, target: &str, file: &str) -> PathBuf {
        self.package_dir().join("Sources").join(target).join(file)
    }

    pub fn context(&self) -> PluginContext {
        PluginContext {
            plugin_work_directory: HostPath::from(self.work_dir()),
            package: Package {
                directory: HostPath::from(self.package_dir()),
                products: self.products.clone(),
                targets: self.targets.clone(),
            },
            tools: self.tools.clone(),
        }
    }

    /// Serialize the context as JSON into the temporary directory.
    pub fn write_context(&self, file_name: &str) -> PathBuf {
        let path = self.root().join(file_name);
        let json = serde_json::to_string_pretty(&self.context()).unwrap();
        fs::write(&path, json).unwrap();
        path
    }

    /// Write an arbitrary file relative to the temporary root.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

/// A context as a Windows host hands it over, with `/C:/...` path strings.
///
/// Target `LibWithResource` has `Test1.in`, `Test2.in` and a Rust file;
/// `LibWithTests` has `alpha.testgen` and `beta.testgen`; product
/// `generate-resource` is built from target `GenerateResource`.
pub fn windows_package_context() -> PluginContext {
    fn source_target(name: &str, files: &[&str]) -> Target {
        Target {
            name: name.to_string(),
            dependencies: Vec::new(),
            module: TargetModule::SourceModule {
                source_files: files
                    .iter()
                    .map(|f| HostPath::new(format!("/C:/pkg/Sources/{name}/{f}")))
                    .collect(),
            },
        }
    }

    PluginContext {
        plugin_work_directory: HostPath::new("/C:/build/plugins/outputs/pkg/LibWithResource/plugin"),
        package: Package {
            directory: HostPath::new("/C:/pkg"),
            products: vec![
                Product {
                    name: "generate-resource".into(),
                    targets: vec!["GenerateResource".into()],
                },
                Product {
                    name: "generate-tests".into(),
                    targets: vec!["GenerateTests".into()],
                },
            ],
            targets: vec![
                source_target("LibWithResource", &["Test1.in", "Test2.in", "lib.rs"]),
                source_target("LibWithTests", &["alpha.testgen", "beta.testgen"]),
                source_target("GenerateResource", &["main.rs"]),
                source_target("GenerateTests", &["main.rs"]),
                Target {
                    name: "Prebuilt".into(),
                    dependencies: Vec::new(),
                    module: TargetModule::Other,
                },
            ],
        },
        tools: BTreeMap::new(),
    }
}
