//! Resource conversion: every `name.in` becomes `name.out`

use pbt_fs::{NormalizedPath, io};

use crate::error::{Error, Result};

/// Suffix an input must carry to be converted
pub const INPUT_SUFFIX: &str = ".in";
/// Suffix the converted resource gets in place of [`INPUT_SUFFIX`]
pub const OUTPUT_SUFFIX: &str = ".out";

/// File name of the resource converted from the input called `file_name`.
///
/// `Test1.in` becomes `Test1.out` and `.in` becomes `.out`. Names without the
/// input suffix have no resource.
pub fn output_name(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(INPUT_SUFFIX)?;
    Some(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// A converted resource, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Read every input and convert it in memory.
///
/// The payload is carried over byte for byte. Fails on the first input that
/// is not a `.in` file or cannot be read.
pub fn read_resources(inputs: &[NormalizedPath]) -> Result<Vec<Resource>> {
    inputs
        .iter()
        .map(|input| {
            let file_name = input
                .file_name()
                .and_then(output_name)
                .ok_or_else(|| Error::NotAResource {
                    input: input.to_string(),
                })?;
            Ok(Resource {
                file_name,
                content: crate::read_input(input)?,
            })
        })
        .collect()
}

/// Convert `inputs` into `output_directory`, returning the written files.
///
/// All inputs are read before the first output is written, so an unreadable
/// input leaves the output directory untouched.
pub fn convert(inputs: &[NormalizedPath], output_directory: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let resources = read_resources(inputs)?;

    let mut written = Vec::with_capacity(resources.len());
    for resource in resources {
        let output = output_directory.join(&resource.file_name);
        io::write_atomic(&output, &resource.content)?;
        tracing::debug!(output = %output, bytes = resource.content.len(), "wrote resource");
        written.push(output);
    }
    Ok(written)
}
