//! Splitting a drawing into upper and lower halves.
//!
//! Used to plot a sheet larger than the machine's bed in two passes. Each
//! top-level element is assigned by a single representative y coordinate,
//! so an element straddling the middle lands wholly in one half.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use super::element::{Element, Node};
use super::parse::parse_svg_file;
use super::tokens::{numbers, PathToken, PathTokens};
use crate::error::{Error, Result};

fn re_translate_y() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r"translate\(\s*[^,\s)]+[\s,]+([+-]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][+-]?\d+)?)")
            .expect("translate pattern is valid")
    })
}

/// Representative y of an element: its `y`, the y of a path's first
/// move-to, or the y of a `translate` transform.
fn representative_y(e: &Element) -> Option<f64> {
    if let Some(y) = e.get_attr("y") {
        return match y.trim().parse() {
            Ok(y) => Some(y),
            Err(_) => {
                log::warn!("Unreadable y {:?} on <{}>, copying it into both halves", y, e.name);
                None
            }
        };
    }
    if e.name == "path" {
        return e.get_attr("d").and_then(first_move_y);
    }
    let transform = e.get_attr("transform")?;
    let caps = re_translate_y().captures(transform)?;
    caps[1].parse().ok()
}

fn first_move_y(d: &str) -> Option<f64> {
    let mut tokens = PathTokens::new(d)
        .skip_while(|t| !matches!(t, PathToken::Command('M' | 'm')))
        .skip(1);
    match (tokens.next(), tokens.next()) {
        (Some(PathToken::Number(_)), Some(PathToken::Number(y))) => Some(y),
        _ => None,
    }
}

/// Split a document around the vertical middle of its view box.
///
/// Elements above the middle go to the first document, the rest to the
/// second. Elements without a usable y are copied into both. Both halves
/// keep the root's attributes.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] when the root has no usable `viewBox`.
pub fn split_halves(svg: &Element) -> Result<(Element, Element)> {
    let view_box = svg
        .get_attr("viewBox")
        .ok_or_else(|| Error::malformed("<svg>", "a viewBox is required to split"))?;
    let values = numbers(view_box);
    let [_, min_y, _, height] = values.as_slice() else {
        return Err(Error::malformed(
            "<svg>",
            format!("viewBox {:?} does not have four values", view_box),
        ));
    };
    let mid_y = *min_y + *height / 2.0;
    log::debug!("Splitting at y = {}", mid_y);

    let mut upper = Element {
        children: Vec::new(),
        ..svg.clone()
    };
    let mut lower = upper.clone();

    for child in &svg.children {
        let Node::Element(e) = child else {
            continue;
        };
        match representative_y(e) {
            Some(y) if y < mid_y => upper.children.push(child.clone()),
            Some(_) => lower.children.push(child.clone()),
            None => {
                upper.children.push(child.clone());
                lower.children.push(child.clone());
            }
        }
    }

    Ok((upper, lower))
}

/// Split an SVG file into `<stem>_upper.svg` and `<stem>_lower.svg`.
///
/// Returns the two paths written, upper first.
pub fn split_file<P: AsRef<Path>>(input: P) -> Result<(PathBuf, PathBuf)> {
    let input = input.as_ref();
    let svg = parse_svg_file(input)?;
    let (upper, lower) = split_halves(&svg).map_err(|e| match e {
        Error::MalformedInput { reason, .. } => Error::malformed(input.display().to_string(), reason),
        other => other,
    })?;

    let upper_path = super::sibling_path(input, "_upper");
    let lower_path = super::sibling_path(input, "_lower");
    fs::write(&upper_path, upper.to_document_string())?;
    fs::write(&lower_path, lower.to_document_string())?;
    Ok((upper_path, lower_path))
}
