//! Filesystem layer for portable build-tool plugins
//!
//! Provides the two path representations used across the workspace
//! ([`HostPath`] as handed over by the host, [`NormalizedPath`] after repair),
//! the [`PathNormalizer`] that turns one into the other, atomic I/O for
//! generator outputs, and format-agnostic configuration loading.

pub mod config;
pub mod discovery;
pub mod error;
pub mod io;
pub mod normalize;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use normalize::PathNormalizer;
pub use path::{HostPath, NormalizedPath, PathStyle};
