//! Listing of registered plugins

use pbt_core::PluginConfig;
use pbt_plugins::PluginRegistry;

use crate::error::Result;

pub fn run_plugins() -> Result<()> {
    let registry = PluginRegistry::with_builtins(&PluginConfig::default());
    for name in registry.names() {
        println!("{name}");
    }
    Ok(())
}
