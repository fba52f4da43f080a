//! Bounding-box inference over heterogeneous vector elements.
//!
//! Extraction is pattern based: positioned primitives contribute their
//! `x`/`y`, point lists their vertices, and paths whatever numbers their
//! command string holds. Nothing here evaluates curves or transforms, so
//! the result is an axis-aligned estimate of where content sits in the
//! document's own coordinates.

use crate::error::{Error, Result};
use crate::model::BoundingBox;
use crate::svg::{numbers, Element};
use crate::units::{parse_length, Ingest};

/// A vector element reduced to the coordinates it carries.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorElement {
    /// A primitive placed by explicit `x`/`y`
    Positioned {
        /// X position
        x: f64,
        /// Y position
        y: f64,
    },
    /// A `polygon` or `polyline` vertex list
    Points(Vec<(f64, f64)>),
    /// A `path` with its raw `d` command string
    Path(String),
}

impl VectorElement {
    /// Coordinates this element contributes to a bounding box.
    pub fn bbox(&self) -> Option<BoundingBox> {
        match self {
            VectorElement::Positioned { x, y } => Some(BoundingBox::at(*x, *y)),
            VectorElement::Points(points) => BoundingBox::from_points(points.iter().copied()),
            VectorElement::Path(d) => approximate_bbox_from_path(d),
        }
    }
}

/// Overall bounding box of `elements`.
///
/// Elements contributing no coordinates are skipped. Returns `None` when
/// nothing contributed, so callers must check before using the box.
pub fn infer_bbox(elements: &[VectorElement]) -> Option<BoundingBox> {
    elements
        .iter()
        .filter_map(VectorElement::bbox)
        .reduce(|acc, b| acc.union(&b))
}

/// Approximate the extent of path data.
///
/// Command letters act as separators and the remaining numbers are read as
/// one flat x,y stream, two at a time. This is not a path evaluator:
///
/// - curve control points count as if they were end points, so curved
///   paths are over-estimated;
/// - `H`/`V` take a single argument, which shifts the pairing of every
///   number after them;
/// - relative commands are read as absolute;
/// - arc radii and flags are read as coordinates.
///
/// A trailing unpaired number is ignored. Use it for rough placement only.
pub fn approximate_bbox_from_path(d: &str) -> Option<BoundingBox> {
    let coords = numbers(d);
    BoundingBox::from_points(coords.chunks_exact(2).map(|pair| (pair[0], pair[1])))
}

/// Parse a `points` attribute such as `"0,0 10,5 20,0"`.
///
/// # Errors
///
/// Returns [`Error::UnresolvableBoundingBox`] when the numbers do not pair
/// up.
pub fn parse_points(s: &str) -> Result<Vec<(f64, f64)>> {
    let coords = numbers(s);
    if coords.len() % 2 != 0 {
        return Err(Error::UnresolvableBoundingBox(format!(
            "odd coordinate count in points {:?}",
            s
        )));
    }
    Ok(coords.chunks_exact(2).map(|p| (p[0], p[1])).collect())
}

/// Reduce a parsed SVG tree to vector elements.
///
/// Each element (the root included) is classified by the first of these it
/// carries: both `x` and `y`, then `points`, then `d`. Elements with none
/// are skipped. A malformed element is logged and skipped.
pub fn elements_from_tree(root: &Element) -> Vec<VectorElement> {
    root.descendants()
        .into_iter()
        .filter_map(|e| match classify(e) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("Skipping <{}>: {}", e.name, err);
                None
            }
        })
        .collect()
}

fn classify(e: &Element) -> Result<Option<VectorElement>> {
    if let (Some(x), Some(y)) = (e.get_attr("x"), e.get_attr("y")) {
        return Ok(Some(VectorElement::Positioned {
            x: coordinate(x)?,
            y: coordinate(y)?,
        }));
    }
    if let Some(points) = e.get_attr("points") {
        return parse_points(points).map(|p| Some(VectorElement::Points(p)));
    }
    if let Some(d) = e.get_attr("d") {
        return Ok(Some(VectorElement::Path(d.to_string())));
    }
    Ok(None)
}

fn coordinate(raw: &str) -> Result<f64> {
    parse_length(raw, Ingest::Inspection)
        .map(|l| l.value)
        .map_err(|_| Error::UnresolvableBoundingBox(format!("bad coordinate {:?}", raw)))
}
