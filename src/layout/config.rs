//! Layout constants per paper-size class.

use crate::model::SizeClass;

/// Horizontal offset of legend text from its column's left edge, in mm.
pub const LEGEND_TEXT_OFFSET: f64 = 2.0;

/// Stroke widths, in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeWidths {
    /// Title and subtitle glyphs
    pub title: f64,
    /// Legend text glyphs
    pub text: f64,
    /// Page border
    pub border: f64,
    /// Legend grid
    pub legend: f64,
}

impl Default for StrokeWidths {
    fn default() -> Self {
        Self {
            title: 0.75,
            text: 0.9,
            border: 0.8,
            legend: 0.6,
        }
    }
}

/// Spacing and scale constants for one page build.
///
/// Resolved once per build from the paper's [`SizeClass`]. Lengths are in
/// millimetres; scales multiply native font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Margin from each page edge to the border
    pub border_inset: f64,

    /// Gap between the border and content inside it
    pub internal_padding: f64,

    /// Height of one legend row
    pub legend_cell_height: f64,

    /// Padding added to each legend column's text width
    pub legend_padding: f64,

    /// Scale of legend text
    pub text_scale: f64,

    /// Scale of the title
    pub title_scale: f64,

    /// Scale of the subtitle
    pub subtitle_scale: f64,

    /// Stroke widths
    pub strokes: StrokeWidths,
}

impl LayoutConfig {
    /// Constants for a size class.
    pub fn for_class(class: SizeClass) -> Self {
        match class {
            SizeClass::Large => Self::large(),
            SizeClass::Small => Self::small(),
        }
    }

    /// A3 and Tabloid.
    pub fn large() -> Self {
        Self {
            border_inset: 10.0,
            internal_padding: 8.0,
            legend_cell_height: 8.0,
            legend_padding: 10.0,
            text_scale: 0.13,
            title_scale: 0.5,
            subtitle_scale: 0.35,
            strokes: StrokeWidths::default(),
        }
    }

    /// A4 and Letter.
    pub fn small() -> Self {
        Self {
            border_inset: 8.0,
            internal_padding: 6.0,
            legend_cell_height: 6.0,
            legend_padding: 8.0,
            text_scale: 0.1,
            title_scale: 0.3,
            subtitle_scale: 0.2,
            strokes: StrokeWidths::default(),
        }
    }

    /// The project label: large constants with a wider margin.
    pub fn label() -> Self {
        Self::large().with_border_inset(12.0)
    }

    /// Set the border inset.
    pub fn with_border_inset(mut self, inset: f64) -> Self {
        self.border_inset = inset;
        self
    }

    /// Set the internal padding.
    pub fn with_internal_padding(mut self, padding: f64) -> Self {
        self.internal_padding = padding;
        self
    }

    /// Set the legend row height.
    pub fn with_legend_cell_height(mut self, height: f64) -> Self {
        self.legend_cell_height = height;
        self
    }

    /// Set the legend column padding.
    pub fn with_legend_padding(mut self, padding: f64) -> Self {
        self.legend_padding = padding;
        self
    }

    /// Set the legend text scale.
    pub fn with_text_scale(mut self, scale: f64) -> Self {
        self.text_scale = scale;
        self
    }

    /// Set the title scale.
    pub fn with_title_scale(mut self, scale: f64) -> Self {
        self.title_scale = scale;
        self
    }

    /// Set the subtitle scale.
    pub fn with_subtitle_scale(mut self, scale: f64) -> Self {
        self.subtitle_scale = scale;
        self
    }

    /// Set the stroke widths.
    pub fn with_strokes(mut self, strokes: StrokeWidths) -> Self {
        self.strokes = strokes;
        self
    }

    /// Distance from the page's right edge to the end of right-aligned text.
    pub fn title_right_margin(&self) -> f64 {
        self.border_inset + self.internal_padding + 1.0
    }

    /// Top-left corner of content inside the border.
    pub fn content_origin(&self) -> (f64, f64) {
        let o = self.border_inset + self.internal_padding;
        (o, o)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::small()
    }
}
