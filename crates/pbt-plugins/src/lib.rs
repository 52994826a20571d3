//! Build-tool plugins shipped with this workspace.
//!
//! - [`ResourceGeneratorPlugin`] turns every `.in` file of a target into a
//!   `.out` resource with the `generate-resource` generator.
//! - [`TestGeneratorPlugin`] collects a target's `.testgen` files into one
//!   generated test source with the `generate-tests` generator.
//!
//! [`PluginRegistry`] looks plugins up by name for the host entry point.

pub mod registry;
pub mod resource;
pub mod testgen;

pub use registry::PluginRegistry;
pub use resource::ResourceGeneratorPlugin;
pub use testgen::TestGeneratorPlugin;

use std::path::PathBuf;

/// Where the sources of the plugins in this crate live.
pub(crate) fn plugin_source_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src")
}
