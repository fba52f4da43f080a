//! Inspecting an existing SVG: physical size, view box and content extent.

use std::path::Path;

use serde::Serialize;

use super::element::Element;
use super::parse::{parse_svg, parse_svg_file};
use crate::bbox::{elements_from_tree, infer_bbox};
use crate::error::{Error, Result};
use crate::model::BoundingBox;
use crate::units::{length_or_zero, Ingest};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Summary of an SVG document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgDetails {
    /// Width in millimetres, rounded to 2 decimals
    pub width: f64,
    /// Height in millimetres, rounded to 2 decimals
    pub height: f64,
    /// Raw `viewBox` attribute
    #[serde(rename = "viewBox")]
    pub view_box: Option<String>,
    /// Inferred extent of the content, if any coordinates were found
    pub bounding_box: Option<BoundingBox>,
    /// Serialized children of the root element
    pub content: String,
}

impl SvgDetails {
    /// Summarize an already parsed document.
    pub fn from_element(svg: &Element) -> Self {
        let dimension = |key: &str| {
            let raw = svg.get_attr(key).unwrap_or("0");
            round2(length_or_zero(raw, Ingest::Inspection).as_mm())
        };

        let content: String = svg
            .element_children()
            .map(Element::to_fragment_string)
            .collect();

        Self {
            width: dimension("width"),
            height: dimension("height"),
            view_box: svg.get_attr("viewBox").map(str::to_string),
            bounding_box: infer_bbox(&elements_from_tree(svg)),
            content: content.trim().to_string(),
        }
    }

    /// Serialize as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let result = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
            JsonFormat::Compact => serde_json::to_string(self),
        };

        result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
    }
}

/// Inspect an SVG file.
pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<SvgDetails> {
    let svg = parse_svg_file(path)?;
    Ok(SvgDetails::from_element(&svg))
}

/// Inspect SVG source text.
pub fn inspect_str(src: &str) -> Result<SvgDetails> {
    let svg = parse_svg(src)?;
    Ok(SvgDetails::from_element(&svg))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
