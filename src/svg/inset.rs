//! Loading external artwork for insetting into a composed page.

use std::path::Path;

use super::element::{Element, Node};
use super::parse::parse_svg_file;
use super::tokens::numbers;
use crate::bbox::{elements_from_tree, infer_bbox};
use crate::error::{Error, Result};
use crate::model::BoundingBox;
use crate::units::{parse_length, Ingest, MM_PER_PX};

/// Artwork ready to be placed: its native extent and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct InsetContent {
    /// Native extent in the artwork's own user units
    pub extent: BoundingBox,
    /// Root children, embedded verbatim
    pub children: Vec<Node>,
}

impl InsetContent {
    /// Load artwork from an SVG file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let svg = parse_svg_file(path)?;
        Self::from_element(&svg).map_err(|e| match e {
            Error::UnresolvableBoundingBox(reason) => {
                Error::UnresolvableBoundingBox(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })
    }

    /// Take artwork from a parsed document.
    ///
    /// The native extent comes from the `viewBox`, then `width`/`height`
    /// (bare numbers are pixels), then the inferred bounding box of the
    /// content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvableBoundingBox`] when none of these yields
    /// a positive size. A candidate with zero or negative size is skipped
    /// in favour of the next one.
    pub fn from_element(svg: &Element) -> Result<Self> {
        let extent = usable(view_box_extent(svg), "viewBox")
            .or_else(|| usable(size_extent(svg), "width/height"))
            .or_else(|| usable(infer_bbox(&elements_from_tree(svg)), "content"))
            .ok_or_else(|| Error::UnresolvableBoundingBox("artwork has no usable size".into()))?;

        Ok(Self {
            extent,
            children: svg.children.clone(),
        })
    }

    /// Native width.
    pub fn width(&self) -> f64 {
        self.extent.width()
    }

    /// Native height.
    pub fn height(&self) -> f64 {
        self.extent.height()
    }

    /// Child elements, for embedding in a group.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e.clone()),
            Node::Text(_) => None,
        })
    }
}

fn usable(extent: Option<BoundingBox>, source: &str) -> Option<BoundingBox> {
    let extent = extent?;
    if extent.width() > 0.0 && extent.height() > 0.0 {
        return Some(extent);
    }
    log::warn!(
        "Ignoring artwork {} extent of {} x {}",
        source,
        extent.width(),
        extent.height()
    );
    None
}

fn view_box_extent(svg: &Element) -> Option<BoundingBox> {
    let values = numbers(svg.get_attr("viewBox")?);
    let [min_x, min_y, w, h] = values.as_slice() else {
        log::warn!("Ignoring viewBox with {} values", values.len());
        return None;
    };
    Some(BoundingBox {
        min_x: *min_x,
        min_y: *min_y,
        max_x: min_x + w,
        max_y: min_y + h,
    })
}

fn size_extent(svg: &Element) -> Option<BoundingBox> {
    let user_units = |key: &str| -> Option<f64> {
        let raw = svg.get_attr(key)?;
        match parse_length(raw, Ingest::Conversion) {
            Ok(len) => Some(len.as_mm() / MM_PER_PX),
            Err(e) => {
                log::warn!("Ignoring artwork {}: {}", key, e);
                None
            }
        }
    };
    let w = user_units("width")?;
    let h = user_units("height")?;
    Some(BoundingBox {
        min_x: 0.0,
        min_y: 0.0,
        max_x: w,
        max_y: h,
    })
}
