//! Stroke fonts and text metrics.
//!
//! Text is never rendered from outlines. A [`StrokeFont`] turns a string
//! into pen strokes, and every measurement in this module is taken
//! directly from those strokes, so what is measured is exactly what the
//! plotter draws.
//!
//! Metrics are in the font's native coordinate space (unscaled). Hershey
//! fonts put y downwards with capitals spanning roughly -12..9, so the
//! origin sits near the vertical middle of a capital letter.

pub mod hershey;

pub use hershey::{HersheyFace, HersheyFont};

use crate::model::{BoundingBox, Polyline};

/// Glyph used to measure baseline height for vertical centering.
///
/// Capitals have no descenders, so lowercase tails (`g`, `y`) in the live
/// string never move centred text.
pub const REFERENCE_GLYPH: &str = "R";

/// A source of stroke geometry for text.
pub trait StrokeFont {
    /// Font name, for diagnostics.
    fn name(&self) -> &str;

    /// Render `text` as pen-down polylines in native font units.
    ///
    /// Characters the font has no glyph for are skipped.
    fn lines_for_text(&self, text: &str) -> Vec<Polyline>;
}

impl<T: StrokeFont + ?Sized> StrokeFont for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lines_for_text(&self, text: &str) -> Vec<Polyline> {
        (**self).lines_for_text(text)
    }
}

impl<T: StrokeFont + ?Sized> StrokeFont for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lines_for_text(&self, text: &str) -> Vec<Polyline> {
        (**self).lines_for_text(text)
    }
}

/// Axis-aligned extent of rendered text, in native font units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBoundingBox {
    /// Leftmost vertex
    pub min_x: f64,
    /// Rightmost vertex
    pub max_x: f64,
    /// Topmost vertex
    pub min_y: f64,
    /// Bottommost vertex
    pub max_y: f64,
    /// `max_x - min_x`
    pub width: f64,
    /// `max_y - min_y`
    pub height: f64,
}

impl TextBoundingBox {
    /// Whether the text produced no strokes at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

impl From<BoundingBox> for TextBoundingBox {
    fn from(b: BoundingBox) -> Self {
        Self {
            min_x: b.min_x,
            max_x: b.max_x,
            min_y: b.min_y,
            max_y: b.max_y,
            width: b.width(),
            height: b.height(),
        }
    }
}

/// Measure the strokes of `text`.
///
/// Text that renders nothing (the empty string, or only unknown
/// characters) yields a zero box rather than infinite extents.
pub fn bounding_box<F: StrokeFont + ?Sized>(text: &str, font: &F) -> TextBoundingBox {
    let lines = font.lines_for_text(text);
    BoundingBox::from_points(lines.iter().flatten().copied())
        .map(TextBoundingBox::from)
        .unwrap_or_default()
}

/// Height of [`REFERENCE_GLYPH`], used for vertical centering.
pub fn reference_height<F: StrokeFont + ?Sized>(font: &F) -> f64 {
    bounding_box(REFERENCE_GLYPH, font).height
}

/// Widest of several strings, or zero when there are none.
pub fn max_width<'a, F, I>(texts: I, font: &F) -> f64
where
    F: StrokeFont + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .map(|t| bounding_box(t, font).width)
        .fold(0.0, f64::max)
}
