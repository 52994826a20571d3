//! Shared test utilities for the pbt workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`package`]: [`TestPackage`] builder for packages on disk, plus a
//!   virtual Windows package that never touches the filesystem
//! - [`platform`]: virtual platforms and [`StaticProbe`]

pub mod package;
pub mod platform;

pub use package::{TestPackage, windows_package_context};
pub use platform::{StaticProbe, virtual_posix, virtual_windows};
