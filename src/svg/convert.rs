//! Converting pixel-based SVGs to millimetre units.
//!
//! Image tracers emit documents in CSS pixels. Plotting works in
//! millimetres, so every length the document carries is rescaled by
//! [`MM_PER_PX`] and written with three decimals.

use std::fs;
use std::path::{Path, PathBuf};

use super::element::Element;
use super::parse::parse_svg_file;
use super::tokens::{numbers, PathToken, PathTokens};
use crate::error::Result;
use crate::units::{parse_length, Ingest, MM_PER_PX};

/// Per-element attributes holding a single length.
const LENGTH_ATTRS: [&str; 14] = [
    "x",
    "y",
    "x1",
    "y1",
    "x2",
    "y2",
    "cx",
    "cy",
    "r",
    "rx",
    "ry",
    "width",
    "height",
    "stroke-width",
];

fn px(v: f64) -> String {
    format!("{:.3}", v * MM_PER_PX)
}

/// Rescale a parsed document from pixels to millimetres in place.
///
/// On the root: `viewBox`, `width`/`height` (written with an `mm` suffix)
/// and `enable-background`. On every descendant: the attributes in
/// [`LENGTH_ATTRS`], path data and point lists. Values that cannot be read
/// are logged and left untouched.
pub fn convert_px_to_mm(svg: &mut Element) {
    if let Some(view_box) = svg.get_attr("viewBox") {
        let scaled: Vec<String> = numbers(view_box).into_iter().map(px).collect();
        svg.set_attr("viewBox", scaled.join(" "));
    }

    for key in ["width", "height"] {
        let Some(raw) = svg.get_attr(key) else {
            continue;
        };
        match parse_length(raw, Ingest::Conversion) {
            Ok(len) => svg.set_attr(key, format!("{:.3}mm", len.as_mm())),
            Err(e) => log::warn!("Leaving root {} unchanged: {}", key, e),
        }
    }

    if let Some(bg) = svg.get_attr("enable-background") {
        let values = numbers(bg);
        if !values.is_empty() {
            let mut parts = vec!["new".to_string()];
            parts.extend(values.into_iter().map(px));
            svg.set_attr("enable-background", parts.join(" "));
        }
    }

    for child in svg.element_children_mut() {
        child.for_each_mut(&mut convert_element);
    }
}

fn convert_element(e: &mut Element) {
    for key in LENGTH_ATTRS {
        let Some(raw) = e.get_attr(key) else {
            continue;
        };
        if raw.trim_end().ends_with('%') {
            continue;
        }
        match parse_length(raw, Ingest::Conversion) {
            Ok(len) => {
                let mm = format!("{:.3}", len.as_mm());
                e.set_attr(key, mm);
            }
            Err(err) => log::warn!("Leaving <{}> {} unchanged: {}", e.name, key, err),
        }
    }

    if e.name == "path" {
        if let Some(d) = e.get_attr("d") {
            let scaled = scale_path_data(d);
            e.set_attr("d", scaled);
        }
    }

    if matches!(e.name.as_str(), "polygon" | "polyline") {
        if let Some(points) = e.get_attr("points") {
            let coords = numbers(points);
            let pairs: Vec<String> = coords
                .chunks(2)
                .map(|p| p.iter().map(|v| px(*v)).collect::<Vec<_>>().join(","))
                .collect();
            e.set_attr("points", pairs.join(" "));
        }
    }
}

/// Scale every coordinate in path data, keeping arc rotation and flags.
fn scale_path_data(d: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut command = ' ';
    let mut arg = 0usize;

    for token in PathTokens::new(d) {
        match token {
            PathToken::Command(c) => {
                command = c;
                arg = 0;
                out.push(c.to_string());
            }
            PathToken::Number(v) => {
                let keep = matches!(command, 'A' | 'a') && (2..=4).contains(&(arg % 7));
                if keep {
                    out.push(super::fmt_num(v));
                } else {
                    out.push(px(v));
                }
                arg += 1;
            }
        }
    }

    out.join(" ")
}

/// Convert an SVG file, writing `<stem>_converted.svg` next to it.
///
/// Returns the path written.
pub fn convert_file<P: AsRef<Path>>(input: P) -> Result<PathBuf> {
    let input = input.as_ref();
    let mut svg = parse_svg_file(input)?;
    convert_px_to_mm(&mut svg);

    let output = super::sibling_path(input, "_converted");
    fs::write(&output, svg.to_document_string())?;
    log::debug!("Converted {} -> {}", input.display(), output.display());
    Ok(output)
}
