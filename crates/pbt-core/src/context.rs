//! What the host tells a plugin about the package being built

use pbt_fs::HostPath;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// Information the host passes to a plugin invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginContext {
    /// Scratch directory owned by the plugin; generated files go below it
    pub plugin_work_directory: HostPath,
    pub package: Package,
    /// Build-time tool dependencies of the plugin, already resolved by the host
    #[serde(default)]
    pub tools: BTreeMap<String, HostPath>,
}

impl PluginContext {
    /// Path of a declared tool dependency.
    pub fn tool(&self, name: &str) -> Option<&HostPath> {
        self.tools.get(name)
    }

    pub fn target(&self, name: &str) -> Result<&Target> {
        self.package.target(name).ok_or_else(|| Error::UnknownTarget {
            name: name.to_string(),
        })
    }
}

/// The package a plugin runs for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub directory: HostPath,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Package {
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// The source files of every target the product depends on, directly or
    /// transitively. Each target is visited once.
    pub fn source_dependencies(&self, product: &str) -> Result<BTreeSet<HostPath>> {
        let product = self.product(product).ok_or_else(|| Error::UnknownProduct {
            name: product.to_string(),
        })?;

        let mut sources = BTreeSet::new();
        let mut visited = BTreeSet::new();
        let mut pending: Vec<&str> = product.targets.iter().rev().map(String::as_str).collect();

        while let Some(name) = pending.pop() {
            if !visited.insert(name) {
                continue;
            }
            let target = self.target(name).ok_or_else(|| Error::UnknownTarget {
                name: name.to_string(),
            })?;
            if let Some(module) = target.source_module() {
                sources.extend(module.source_files().iter().cloned());
            }
            pending.extend(target.dependencies.iter().rev().map(String::as_str));
        }
        Ok(sources)
    }
}

/// A product of the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Names of the targets the product is built from
    #[serde(default)]
    pub targets: Vec<String>,
}

/// A target of the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    /// Names of the targets this one depends on
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub module: TargetModule,
}

/// What kind of module a target builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetModule {
    /// A module compiled from source files
    SourceModule { source_files: Vec<HostPath> },
    /// Binary artifacts, system libraries and anything else without sources
    #[default]
    Other,
}

impl Target {
    /// The target as a source module, if it is one.
    pub fn source_module(&self) -> Option<SourceModule<'_>> {
        match &self.module {
            TargetModule::SourceModule { source_files } => Some(SourceModule {
                target: self,
                source_files,
            }),
            TargetModule::Other => None,
        }
    }
}

/// Borrowed view of a target that has source files.
#[derive(Debug, Clone, Copy)]
pub struct SourceModule<'a> {
    target: &'a Target,
    source_files: &'a [HostPath],
}

impl<'a> SourceModule<'a> {
    pub fn name(&self) -> &'a str {
        &self.target.name
    }

    pub fn target(&self) -> &'a Target {
        self.target
    }

    pub fn source_files(&self) -> &'a [HostPath] {
        self.source_files
    }

    /// Source files whose name ends with `suffix`, in declaration order.
    pub fn source_files_with_suffix(&self, suffix: &str) -> Vec<&'a HostPath> {
        self.source_files
            .iter()
            .filter(|f| f.has_suffix(suffix))
            .collect()
    }
}
