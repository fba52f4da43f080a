//! # drawscape
//!
//! Plotter-ready technical drawings as pure line art.
//!
//! This library composes SVG pages (border, specification legend,
//! right-aligned title and subtitle, optional inset artwork) from
//! structured input. All text is drawn with a stroke font, so every glyph
//! is a polyline a pen plotter can follow directly.
//!
//! ## Quick Start
//!
//! ```no_run
//! use drawscape::{blueprint_file, ComposeOptions};
//!
//! fn main() -> drawscape::Result<()> {
//!     let svg = blueprint_file("sloop.json", &ComposeOptions::default())?;
//!     std::fs::write("blueprint.svg", svg)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Stroke text**: Hershey fonts, measured from the strokes themselves
//! - **Paper sizes**: A3, A4, Letter and Tabloid in either orientation
//! - **Deterministic output**: identical input gives byte-identical SVG
//! - **SVG tooling**: inspect, px to mm conversion, splitting, insetting
//! - **Plotting helpers**: plot time estimates and `vpype` optimization

pub mod bbox;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod optimize;
pub mod plot;
pub mod svg;
pub mod units;

// Re-export commonly used types
pub use bbox::{approximate_bbox_from_path, infer_bbox, VectorElement};
pub use error::{Error, Result};
pub use font::{bounding_box, HersheyFace, HersheyFont, StrokeFont, TextBoundingBox};
pub use layout::{ComposeOptions, Composer, Drawing, Group, LayoutConfig, StrokeWidths};
pub use model::{
    BlueprintData, BoundingBox, LayoutBox, LegendRow, Orientation, PaperProfile, PaperSize,
    Polyline, ShippingData, SizeClass,
};
pub use optimize::PathOptimizer;
pub use plot::{PlotEstimate, PlotEstimator, StrokeEstimator};
pub use svg::{Element, JsonFormat, SvgDetails};
pub use units::{parse_length, to_mm, Ingest, Length, Unit};

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// Compose a blueprint with the built-in font.
///
/// # Example
///
/// ```
/// use drawscape::{compose, BlueprintData, ComposeOptions};
///
/// let data = BlueprintData::new("Sloop").with_row("LOA", "32ft");
/// let drawing = compose(&data, &ComposeOptions::default()).unwrap();
/// assert_eq!(drawing.width, 210.0);
/// ```
pub fn compose(data: &BlueprintData, options: &ComposeOptions) -> Result<Drawing> {
    Composer::futural().compose(data, options)
}

/// Compose a blueprint from a JSON file and serialize it.
///
/// # Arguments
///
/// * `path` - Path to the JSON input record
/// * `options` - Overrides for paper, orientation and inset
///
/// # Example
///
/// ```no_run
/// use drawscape::{blueprint_file, ComposeOptions, PaperSize};
///
/// let options = ComposeOptions::new().with_paper_size(PaperSize::A3).landscape();
/// let svg = blueprint_file("sloop.json", &options).unwrap();
/// ```
pub fn blueprint_file<P: AsRef<Path>>(path: P, options: &ComposeOptions) -> Result<String> {
    let data = BlueprintData::from_file(path)?;
    Ok(compose(&data, options)?.to_svg())
}

/// Builder for composing every page variant with one font.
///
/// # Example
///
/// ```
/// use drawscape::{BlueprintData, Drawscape, PaperSize};
///
/// let svg = Drawscape::new()
///     .with_paper_size(PaperSize::Letter)
///     .landscape()
///     .blueprint(&BlueprintData::new("Sloop"))?
///     .to_svg();
/// assert!(svg.contains(r#"width="279mm""#));
/// # Ok::<(), drawscape::Error>(())
/// ```
pub struct Drawscape<F = HersheyFont> {
    composer: Composer<F>,
    options: ComposeOptions,
}

impl Drawscape<HersheyFont> {
    /// Create a builder using the built-in futural font.
    pub fn new() -> Self {
        Self::with_font(HersheyFont::futural())
    }
}

impl Default for Drawscape<HersheyFont> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: StrokeFont> Drawscape<F> {
    /// Create a builder using `font`.
    pub fn with_font(font: F) -> Self {
        Self {
            composer: Composer::new(font),
            options: ComposeOptions::default(),
        }
    }

    /// Set the paper size.
    pub fn with_paper_size(mut self, size: PaperSize) -> Self {
        self.options = self.options.with_paper_size(size);
        self
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.options = self.options.with_orientation(orientation);
        self
    }

    /// Landscape orientation.
    pub fn landscape(mut self) -> Self {
        self.options = self.options.landscape();
        self
    }

    /// Set the inset artwork.
    pub fn with_inset(mut self, path: impl Into<PathBuf>) -> Self {
        self.options = self.options.with_inset(path);
        self
    }

    /// Set explicit layout constants.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.options = self.options.with_config(config);
        self
    }

    /// The composer.
    pub fn composer(&self) -> &Composer<F> {
        &self.composer
    }

    /// Compose a blueprint.
    pub fn blueprint(&self, data: &BlueprintData) -> Result<Drawing> {
        self.composer.compose(data, &self.options)
    }

    /// Compose a blueprint from a JSON file.
    pub fn blueprint_file<P: AsRef<Path>>(&self, path: P) -> Result<Drawing> {
        let data = BlueprintData::from_file(path)?;
        self.blueprint(&data)
    }

    /// Compose a border-only template for the configured paper.
    pub fn template(&self) -> Drawing {
        let paper = self.options.paper_for(&BlueprintData::default());
        self.composer.compose_template(&paper)
    }

    /// Compose a project label, with plot figures when `estimate` is given.
    pub fn label(&self, date: NaiveDate, data: &BlueprintData, estimate: Option<&PlotEstimate>) -> Drawing {
        let rows = layout::label_rows(date, data, estimate);
        self.composer.compose_label(&rows)
    }

    /// Compose a shipping label.
    pub fn shipping(&self, data: &ShippingData) -> Drawing {
        self.composer.compose_shipping(data)
    }
}
