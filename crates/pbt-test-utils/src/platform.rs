//! Virtual platforms and executable probes.

use pbt_core::{ExecutableProbe, PlatformCapabilities};
use pbt_fs::NormalizedPath;
use std::collections::BTreeSet;

/// The toolchain directory of [`virtual_windows`].
pub const WINDOWS_TOOLCHAIN_BIN: &str = r"C:\toolchain\usr\bin";

/// A Windows host whose search path holds a decoy launcher directory
/// before the toolchain's plugin API directory.
pub fn virtual_windows() -> PlatformCapabilities {
    PlatformCapabilities::windows(
        r"C:\pkg",
        Some(r"C:\Windows\system32;C:\decoy;C:\toolchain\usr\lib\swift\pm\PluginAPI".to_string()),
    )
}

pub fn virtual_posix() -> PlatformCapabilities {
    PlatformCapabilities::posix("/pkg", Some("/usr/local/bin:/usr/bin".to_string()))
}

/// Treats exactly the listed paths as executables.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    executables: BTreeSet<String>,
}

impl StaticProbe {
    pub fn new<I, S>(executables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            executables: executables.into_iter().map(Into::into).collect(),
        }
    }

    /// Launchers in both the decoy and the toolchain directory of
    /// [`virtual_windows`].
    pub fn windows_toolchain() -> Self {
        Self::new([
            r"C:\decoy\swift.exe".to_string(),
            format!(r"{WINDOWS_TOOLCHAIN_BIN}\swift.exe"),
        ])
    }
}

impl ExecutableProbe for StaticProbe {
    fn is_executable(&self, path: &NormalizedPath) -> bool {
        self.executables.contains(path.as_str())
    }
}
