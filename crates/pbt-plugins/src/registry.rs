//! Lookup of plugins by name

use pbt_core::{BuildToolPlugin, PluginConfig};

use crate::resource::ResourceGeneratorPlugin;
use crate::testgen::TestGeneratorPlugin;

/// The plugins available to the host, configured for one invocation.
pub struct PluginRegistry {
    plugins: Vec<Box<dyn BuildToolPlugin>>,
}

impl PluginRegistry {
    /// All plugins of this crate, configured from `config`.
    pub fn with_builtins(config: &PluginConfig) -> Self {
        let plugins: Vec<Box<dyn BuildToolPlugin>> = vec![
            Box::new(ResourceGeneratorPlugin::with_discovery_targets(
                config.discovery_targets.clone(),
            )),
            Box::new(TestGeneratorPlugin::new()),
        ];
        Self { plugins }
    }

    pub fn get(&self, name: &str) -> Option<&dyn BuildToolPlugin> {
        self.plugins
            .iter()
            .find(|plugin| plugin.name() == name)
            .map(|plugin| plugin.as_ref())
    }

    /// Registered plugin names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.plugins.iter().map(|plugin| plugin.name()).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
