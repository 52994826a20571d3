//! Test-stub generation: one test function per input file

use pbt_fs::{NormalizedPath, io};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Name of the test function generated for an input with file stem `stem`.
///
/// Characters that cannot appear in an identifier become `_`.
pub fn test_name(stem: &str) -> Option<String> {
    if stem.is_empty() {
        return None;
    }
    let escaped: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    Some(format!("test_{escaped}"))
}

/// Render the test source for `inputs`, in input order.
pub fn render(inputs: &[NormalizedPath]) -> Result<String> {
    let mut source = String::from("// Generated by generate-tests. Do not edit.\n");
    let mut seen: HashMap<String, &str> = HashMap::new();

    for input in inputs {
        let file_name = input.file_name().unwrap_or_default();
        let name = input
            .file_stem()
            .and_then(test_name)
            .ok_or_else(|| Error::InvalidTestName {
                input: input.to_string(),
            })?;
        if let Some(first) = seen.insert(name.clone(), input.as_str()) {
            return Err(Error::DuplicateTestName {
                name,
                first: first.to_string(),
                second: input.to_string(),
            });
        }

        source.push_str(&format!(
            "\n#[test]\nfn {name}() {{\n    assert!(true, {file_name:?});\n}}\n"
        ));
    }
    Ok(source)
}

/// Render the tests for `inputs` and write them atomically to `output`.
///
/// Every input must be readable, although only its name is used. Nothing is
/// written otherwise.
pub fn generate(inputs: &[NormalizedPath], output: &NormalizedPath) -> Result<()> {
    for input in inputs {
        crate::read_input(input)?;
    }
    let source = render(inputs)?;
    io::write_text(output, &source)?;
    tracing::debug!(output = %output, tests = inputs.len(), "wrote test stubs");
    Ok(())
}
