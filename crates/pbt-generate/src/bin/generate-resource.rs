//! Converts `name.in` inputs into `name.out` files in an output directory.

use pbt_generate::resource;

fn main() {
    pbt_generate::main_with(
        "generate-resource",
        "<input.in>... <output-directory>",
        |inputs, output| resource::convert(inputs, output).map(|_| ()),
    );
}
