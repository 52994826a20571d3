//! Code generators invoked by the build-tool plugins
//!
//! Both generators take their inputs first and their output last on the
//! command line, read every input before writing anything and replace
//! outputs atomically. They exit with status 1 on any failure.

pub mod error;
pub mod resource;
pub mod testgen;

pub use error::{Error, Result};

use colored::Colorize;
use pbt_fs::{NormalizedPath, PathNormalizer};

/// Split `args` (program name excluded) into inputs and the final output.
///
/// Arguments were repaired by the command that invokes the generator, so
/// they are taken as given.
pub fn split_arguments(
    program: &str,
    usage: &str,
    args: &[String],
) -> Result<(Vec<NormalizedPath>, NormalizedPath)> {
    let Some((output, inputs)) = args.split_last().filter(|(_, inputs)| !inputs.is_empty()) else {
        return Err(Error::Usage {
            program: program.to_string(),
            usage: usage.to_string(),
        });
    };
    let normalizer = PathNormalizer::native();
    let inputs = inputs
        .iter()
        .map(|arg| normalizer.normalize_str(arg))
        .collect::<pbt_fs::Result<Vec<_>>>()?;
    Ok((inputs, normalizer.normalize_str(output)?))
}

/// Read one generator input, reporting failures against its path.
pub(crate) fn read_input(input: &NormalizedPath) -> Result<Vec<u8>> {
    let path = input.to_native();
    std::fs::read(&path).map_err(|source| Error::UnreadableInput { path, source })
}

/// Entry point shared by the generator binaries.
pub fn main_with<F>(program: &str, usage: &str, generate: F)
where
    F: FnOnce(&[NormalizedPath], &NormalizedPath) -> Result<()>,
{
    let _ = pbt_core::logging::init(false);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = split_arguments(program, usage, &args)
        .and_then(|(inputs, output)| generate(&inputs, &output));

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}
