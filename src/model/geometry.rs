//! Geometry primitives shared by metrics, inference and layout.

use serde::{Deserialize, Serialize};

/// A single stroke: a sequence of (x, y) vertices drawn pen-down.
pub type Polyline = Vec<(f64, f64)>;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum x
    pub min_x: f64,
    /// Minimum y
    pub min_y: f64,
    /// Maximum x
    pub max_x: f64,
    /// Maximum y
    pub max_y: f64,
}

impl BoundingBox {
    /// A degenerate box around one point.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grow the box to include a point.
    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Union with another box.
    pub fn union(mut self, other: &BoundingBox) -> Self {
        self.include(other.min_x, other.min_y);
        self.include(other.max_x, other.max_y);
        self
    }

    /// Box width.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Box height.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Fold points into a box; `None` when there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points.into_iter().fold(None, |acc, (x, y)| match acc {
            None => Some(BoundingBox::at(x, y)),
            Some(mut b) => {
                b.include(x, y);
                Some(b)
            }
        })
    }
}

/// Placement of a sub-element: where its native content goes and at what
/// uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBox {
    /// Translation x in page millimetres
    pub x: f64,
    /// Translation y in page millimetres
    pub y: f64,
    /// Placed width in page millimetres
    pub width: f64,
    /// Placed height in page millimetres
    pub height: f64,
    /// Uniform scale applied to native content
    pub scale: f64,
}

impl LayoutBox {
    /// SVG `transform` value placing native content at this box.
    pub fn transform(&self) -> String {
        format!(
            "translate({}, {}) scale({})",
            crate::svg::fmt_num(self.x),
            crate::svg::fmt_num(self.y),
            crate::svg::fmt_num(self.scale)
        )
    }

    /// Right edge in page millimetres.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}
