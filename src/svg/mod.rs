//! SVG output and SVG tooling.
//!
//! [`element`] is the serializer every drawing goes through. The remaining
//! submodules read existing SVG files: inspecting their size and extent,
//! converting pixel documents to millimetres, splitting a sheet in half,
//! and loading artwork to inset into a composed page.

pub mod convert;
pub mod details;
pub mod element;
pub mod inset;
pub mod parse;
pub mod split;
mod tokens;

pub use convert::{convert_file, convert_px_to_mm};
pub use details::{inspect_file, inspect_str, JsonFormat, SvgDetails};
pub use element::{Element, Node};
pub use inset::InsetContent;
pub use parse::{parse_svg, parse_svg_file};
pub use split::{split_file, split_halves};
pub(crate) use tokens::numbers;

use std::path::{Path, PathBuf};

/// `dir/stem.svg` becomes `dir/stem{suffix}.svg`.
pub(crate) fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.svg", stem, suffix))
}

/// Format a number for an SVG attribute.
///
/// At most four decimals, trailing zeros trimmed, no `-0`, and non-finite
/// values written as `0`, so identical input always gives identical text.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{:.4}", v);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}
