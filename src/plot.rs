//! Plot time and pen travel estimation.
//!
//! [`PlotEstimator`] is the plotter collaborator: given a finished drawing
//! it reports how long the plot takes and how far the pen draws. The
//! bundled [`StrokeEstimator`] resolves the document with `usvg`, flattens
//! every path with `lyon`, and walks the result the way a pen plotter
//! would, with constant speeds and a fixed cost per pen lift.

use std::path::Path;

use lyon::math::point;
use lyon::path::iterator::PathIterator;
use lyon::path::Event;
use usvg::tiny_skia_path::{self, PathSegment};

use crate::error::{Error, Result};
use crate::model::Polyline;
use crate::svg::{parse_svg_file, Element};
use crate::units::MM_PER_PX;

/// Feet per metre.
pub const FEET_PER_METER: f64 = 3.28084;

/// Result of a plot estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlotEstimate {
    /// Total plot time, pen lifts included
    pub draw_time_seconds: f64,
    /// Distance drawn with the pen down
    pub pen_travel_meters: f64,
}

impl PlotEstimate {
    /// Draw time as `"1h 2m 3s"`, or `"2m 3s"` under an hour.
    pub fn draw_time(&self) -> String {
        let total = self.draw_time_seconds.max(0.0) as u64;
        let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);
        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else {
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Pen travel as `"12.3 ft / 3.7 m"`.
    pub fn pen_travel(&self) -> String {
        format!(
            "{:.1} ft / {:.1} m",
            self.pen_travel_meters * FEET_PER_METER,
            self.pen_travel_meters
        )
    }
}

/// Something that can estimate how a drawing plots.
pub trait PlotEstimator {
    /// Estimate a parsed drawing.
    fn estimate(&self, svg: &Element) -> Result<PlotEstimate>;

    /// Estimate an SVG file.
    fn estimate_file(&self, path: &Path) -> Result<PlotEstimate> {
        let svg = parse_svg_file(path)?;
        self.estimate(&svg)
    }
}

/// Maximum carriage speed, mm/s.
const MAX_SPEED: f64 = 250.0;

/// Curve flattening tolerance, in canvas pixels.
const FLATTEN_TOLERANCE: f32 = 0.05;

/// Estimates by walking every stroke of the document.
///
/// Every drawable shape counts, under any transform; curves and arcs are
/// measured along their flattened length. Hidden or unpainted paths and
/// `defs` content are not drawn. The pen starts and finishes at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeEstimator {
    /// Pen-down speed, mm/s
    pub pen_down_speed: f64,
    /// Pen-up speed, mm/s
    pub pen_up_speed: f64,
    /// Seconds per pen lift
    pub lift_time: f64,
}

impl Default for StrokeEstimator {
    fn default() -> Self {
        Self {
            pen_down_speed: MAX_SPEED * 0.3,
            pen_up_speed: MAX_SPEED * 0.5,
            lift_time: 0.25,
        }
    }
}

impl StrokeEstimator {
    /// Create an estimator with default speeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pen-down speed in mm/s.
    pub fn with_pen_down_speed(mut self, speed: f64) -> Self {
        self.pen_down_speed = speed;
        self
    }

    /// Set the pen-up speed in mm/s.
    pub fn with_pen_up_speed(mut self, speed: f64) -> Self {
        self.pen_up_speed = speed;
        self
    }

    /// Set the time per pen lift in seconds.
    pub fn with_lift_time(mut self, seconds: f64) -> Self {
        self.lift_time = seconds;
        self
    }

    /// All strokes of the document, in millimetres, in document order.
    pub fn strokes(&self, svg: &Element) -> Result<Vec<Polyline>> {
        let tree = usvg::Tree::from_str(&svg.to_document_string(), &usvg::Options::default())
            .map_err(|e| Error::Plotter(format!("cannot resolve drawing: {}", e)))?;

        let mut out = Vec::new();
        collect_strokes(tree.root(), &mut out);
        Ok(out)
    }
}

impl PlotEstimator for StrokeEstimator {
    fn estimate(&self, svg: &Element) -> Result<PlotEstimate> {
        if self.pen_down_speed <= 0.0 || self.pen_up_speed <= 0.0 {
            return Err(Error::Plotter(format!(
                "speeds must be positive (down {}, up {})",
                self.pen_down_speed, self.pen_up_speed
            )));
        }

        let mut pos = (0.0, 0.0);
        let (mut down, mut up, mut lifts) = (0.0, 0.0, 0u32);
        for stroke in self.strokes(svg)? {
            let Some(&start) = stroke.first() else {
                continue;
            };
            up += distance(pos, start);
            down += stroke.windows(2).map(|w| distance(w[0], w[1])).sum::<f64>();
            lifts += 1;
            pos = stroke[stroke.len() - 1];
        }
        up += distance(pos, (0.0, 0.0));

        let seconds =
            down / self.pen_down_speed + up / self.pen_up_speed + f64::from(lifts) * self.lift_time;
        log::debug!(
            "Plot estimate: {:.1} mm down, {:.1} mm up, {} lifts, {:.1} s",
            down,
            up,
            lifts,
            seconds
        );
        Ok(PlotEstimate {
            draw_time_seconds: seconds,
            pen_travel_meters: down / 1000.0,
        })
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (b.0 - a.0).hypot(b.1 - a.1)
}

fn collect_strokes(group: &usvg::Group, out: &mut Vec<Polyline>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(g) => collect_strokes(g, out),
            usvg::Node::Path(p) if p.is_visible() => {
                match p.data().clone().transform(p.abs_transform()) {
                    Some(data) => out.extend(flatten(&data)),
                    None => log::warn!("Skipping path {:?}: degenerate transform", p.id()),
                }
            }
            _ => {}
        }
    }
}

/// Canvas path data as millimetre polylines, one per subpath.
fn flatten(data: &tiny_skia_path::Path) -> Vec<Polyline> {
    let mut builder = lyon::path::Path::builder();
    let mut open = false;
    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                if open {
                    builder.end(false);
                }
                builder.begin(point(p.x, p.y));
                open = true;
            }
            PathSegment::LineTo(p) if open => {
                builder.line_to(point(p.x, p.y));
            }
            PathSegment::QuadTo(c, p) if open => {
                builder.quadratic_bezier_to(point(c.x, c.y), point(p.x, p.y));
            }
            PathSegment::CubicTo(c1, c2, p) if open => {
                builder.cubic_bezier_to(point(c1.x, c1.y), point(c2.x, c2.y), point(p.x, p.y));
            }
            PathSegment::Close if open => {
                builder.end(true);
                open = false;
            }
            _ => {}
        }
    }
    if open {
        builder.end(false);
    }

    let to_mm = |p: lyon::math::Point| (f64::from(p.x) * MM_PER_PX, f64::from(p.y) * MM_PER_PX);
    let mut strokes = Vec::new();
    let mut current: Polyline = Vec::new();
    for event in builder.build().iter().flattened(FLATTEN_TOLERANCE) {
        match event {
            Event::Begin { at } => current = vec![to_mm(at)],
            Event::Line { to, .. } => current.push(to_mm(to)),
            Event::End { first, close, .. } => {
                if close {
                    current.push(to_mm(first));
                }
                if current.len() > 1 {
                    strokes.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }
    strokes
}
