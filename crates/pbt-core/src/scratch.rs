//! Scratch directories for staged generator builds

use pbt_fs::NormalizedPath;

/// Allocates isolated scratch directories below the plugin work directory.
///
/// A staged build writes its intermediate artifacts here, away from the
/// generated-output directories the host collects outputs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchArea {
    root: NormalizedPath,
}

impl ScratchArea {
    pub fn new(work_directory: &NormalizedPath, scratch_dir: &str) -> Self {
        Self {
            root: work_directory.join(scratch_dir),
        }
    }

    /// The scratch directory for staging `product`. Same product, same directory.
    pub fn for_product(&self, product: &str) -> NormalizedPath {
        self.root.join(product)
    }
}
