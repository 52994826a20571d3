//! Writes one test function per input into a single Rust source file.

use pbt_generate::testgen;

fn main() {
    pbt_generate::main_with(
        "generate-tests",
        "<input.testgen>... <output-file>",
        testgen::generate,
    );
}
