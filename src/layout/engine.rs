//! Page composition: border, legend, title, subtitle and inset.
//!
//! Every position is derived from the paper profile, the size-class
//! constants and stroke-font metrics, in one pass. Groups are independent:
//! leaving one out never moves another.

use std::path::Path;

use super::config::{LayoutConfig, LEGEND_TEXT_OFFSET};
use super::options::ComposeOptions;
use crate::error::{Error, Result};
use crate::font::{bounding_box, max_width, reference_height, HersheyFont, StrokeFont};
use crate::model::{BlueprintData, BoundingBox, LayoutBox, LegendRow, PaperProfile, Polyline};
use crate::svg::element::SVG_NAMESPACE;
use crate::svg::{fmt_num, Element, InsetContent};

/// One named, self-contained group of a drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Group id (`borders`, `legend`, `title`, `subtitle`, `inset`, ...)
    pub id: String,
    /// The `<g>` element
    pub element: Element,
}

/// A composed page, ready to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    /// Page width in millimetres
    pub width: f64,
    /// Page height in millimetres
    pub height: f64,
    /// Groups in build order
    pub groups: Vec<Group>,
}

impl Drawing {
    /// An empty page.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            groups: Vec::new(),
        }
    }

    /// An empty page sized to a paper profile.
    pub fn for_paper(paper: &PaperProfile) -> Self {
        Self::new(paper.width, paper.height)
    }

    /// Append a `<g>` element, taking its id as the group id.
    pub fn push(&mut self, element: Element) {
        let id = element.id().unwrap_or_default().to_string();
        self.groups.push(Group { id, element });
    }

    /// Look up a group by id.
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Whether a group is present.
    pub fn has_group(&self, id: &str) -> bool {
        self.group(id).is_some()
    }

    /// Group ids in build order.
    pub fn group_ids(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.id.as_str()).collect()
    }

    /// The root `<svg>` element, with a 1:1 millimetre coordinate space.
    ///
    /// `xmlns:xlink` is declared when inset artwork brings `xlink:` references.
    pub fn to_element(&self) -> Element {
        let (w, h) = (fmt_num(self.width), fmt_num(self.height));
        let mut svg = Element::new("svg")
            .attr("width", format!("{w}mm"))
            .attr("height", format!("{h}mm"))
            .attr("viewBox", format!("0 0 {w} {h}"))
            .attr("xmlns", SVG_NAMESPACE)
            .children(self.groups.iter().map(|g| g.element.clone()));
        svg.declare_xlink();
        svg
    }

    /// Serialize the page as an SVG document.
    pub fn to_svg(&self) -> String {
        self.to_element().to_document_string()
    }
}

/// The border rectangle: the page inset by `border_inset` on every side.
pub fn border_box(paper: &PaperProfile, config: &LayoutConfig) -> LayoutBox {
    let i = config.border_inset;
    LayoutBox {
        x: i,
        y: i,
        width: paper.width - 2.0 * i,
        height: paper.height - 2.0 * i,
        scale: 1.0,
    }
}

/// The `borders` group: the border traced clockwise and again
/// counter-clockwise, so a plotter can run it in either direction.
pub fn border_group(paper: &PaperProfile, config: &LayoutConfig) -> Element {
    let b = border_box(paper, config);
    let (x0, y0) = (fmt_num(b.x), fmt_num(b.y));
    let (x1, y1) = (fmt_num(b.x + b.width), fmt_num(b.y + b.height));
    let stroke = fmt_num(config.strokes.border);

    let path = |id: &str, d: String| {
        Element::new("path")
            .attr("id", id)
            .attr("d", d)
            .attr("fill", "none")
            .attr("stroke", "black")
            .attr("stroke-width", &stroke)
    };

    Element::new("g")
        .attr("id", "borders")
        .child(path(
            "border",
            format!("M {x0} {y0} H {x1} V {y1} H {x0} Z"),
        ))
        .child(path(
            "border-reversed",
            format!("M {x0} {y0} V {y1} H {x1} V {y0} Z"),
        ))
}

/// Where the inset artwork goes: uniformly scaled to fit inside the border
/// less `internal_padding` on every side, and centred on the page.
///
/// `extent` is the artwork's native box; its origin is compensated so the
/// content itself, not its coordinate origin, is centred. Returns `None`
/// when the fit is degenerate.
pub fn inset_box(paper: &PaperProfile, config: &LayoutConfig, extent: &BoundingBox) -> Option<LayoutBox> {
    let border = border_box(paper, config);
    let avail_w = border.width - 2.0 * config.internal_padding;
    let avail_h = border.height - 2.0 * config.internal_padding;
    let scale = (avail_w / extent.width()).min(avail_h / extent.height());
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }

    let width = extent.width() * scale;
    let height = extent.height() * scale;
    Some(LayoutBox {
        x: (paper.width - width) / 2.0 - extent.min_x * scale,
        y: (paper.height - height) / 2.0 - extent.min_y * scale,
        width,
        height,
        scale,
    })
}

/// Measured geometry of a two-column legend table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendLayout {
    /// Left edge of the table
    pub x: f64,
    /// Top edge of the table
    pub y: f64,
    /// Name column width
    pub name_width: f64,
    /// Detail column width
    pub detail_width: f64,
    /// Row height
    pub cell_height: f64,
    /// Number of rows
    pub rows: usize,
    /// Text scale
    pub text_scale: f64,
}

impl LegendLayout {
    /// Size the table for `rows`.
    ///
    /// Each column is as wide as its widest scaled text plus
    /// `legend_padding`, so an all-empty column is still `legend_padding`
    /// wide.
    pub fn measure<F: StrokeFont + ?Sized>(rows: &[LegendRow], font: &F, config: &LayoutConfig) -> Self {
        let name_max = max_width(rows.iter().map(|r| r.name.as_str()), font);
        let detail_max = max_width(rows.iter().map(|r| r.detail.as_str()), font);
        let (x, y) = config.content_origin();

        Self {
            x,
            y,
            name_width: name_max * config.text_scale + config.legend_padding,
            detail_width: detail_max * config.text_scale + config.legend_padding,
            cell_height: config.legend_cell_height,
            rows: rows.len(),
            text_scale: config.text_scale,
        }
    }

    /// Table width.
    pub fn width(&self) -> f64 {
        self.name_width + self.detail_width
    }

    /// Table height.
    pub fn height(&self) -> f64 {
        self.rows as f64 * self.cell_height
    }

    /// x of the column divider.
    pub fn divider_x(&self) -> f64 {
        self.x + self.name_width
    }

    /// Top edge of row `i`.
    pub fn row_top(&self, i: usize) -> f64 {
        self.y + i as f64 * self.cell_height
    }

    /// Placement of row `i`'s name text, vertically centred in the row.
    pub fn name_box(&self, i: usize) -> LayoutBox {
        self.text_box(self.x, i)
    }

    /// Placement of row `i`'s detail text, just right of the divider.
    pub fn detail_box(&self, i: usize) -> LayoutBox {
        self.text_box(self.divider_x(), i)
    }

    fn text_box(&self, column_x: f64, i: usize) -> LayoutBox {
        LayoutBox {
            x: column_x + LEGEND_TEXT_OFFSET,
            y: self.row_top(i) + self.cell_height / 2.0,
            width: 0.0,
            height: self.cell_height,
            scale: self.text_scale,
        }
    }
}

fn line(id: String, x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
    Element::new("line")
        .attr("id", id)
        .attr("x1", fmt_num(x1))
        .attr("y1", fmt_num(y1))
        .attr("x2", fmt_num(x2))
        .attr("y2", fmt_num(y2))
}

/// Path data for one stroke: `M x,y L x,y ...`.
fn stroke_path_data(stroke: &Polyline) -> String {
    let points: Vec<String> = stroke
        .iter()
        .map(|&(x, y)| format!("{},{}", fmt_num(x), fmt_num(y)))
        .collect();
    format!("M{}", points.join(" L"))
}

/// Composes drawings with an owned stroke font.
///
/// ```
/// use drawscape::{BlueprintData, ComposeOptions, Composer};
///
/// let composer = Composer::futural();
/// let data = BlueprintData::new("Sloop").with_row("LOA", "32ft");
/// let drawing = composer.compose(&data, &ComposeOptions::default()).unwrap();
/// assert_eq!(drawing.group_ids(), vec!["borders", "legend", "title"]);
/// ```
#[derive(Debug, Clone)]
pub struct Composer<F> {
    font: F,
}

impl Composer<HersheyFont> {
    /// A composer using the built-in futural face.
    pub fn futural() -> Self {
        Self::new(HersheyFont::futural())
    }
}

impl<F: StrokeFont> Composer<F> {
    /// Create a composer that owns `font`.
    pub fn new(font: F) -> Self {
        Self { font }
    }

    /// The font used for every metric and every glyph.
    pub fn font(&self) -> &F {
        &self.font
    }

    /// Compose a blueprint page.
    ///
    /// Missing optional input (no subtitle, no rows, no inset) leaves the
    /// matching group out. An inset that is missing or has no usable size
    /// is logged and left out too.
    ///
    /// # Errors
    ///
    /// Fails only when inset artwork exists but cannot be parsed.
    pub fn compose(&self, data: &BlueprintData, options: &ComposeOptions) -> Result<Drawing> {
        let paper = options.paper_for(data);
        let config = options.config_for(&paper);
        log::debug!(
            "Composing {:?} on {} {:?} ({} x {} mm)",
            data.title,
            paper.size,
            paper.orientation,
            paper.width,
            paper.height
        );

        let mut drawing = Drawing::for_paper(&paper);
        drawing.push(border_group(&paper, &config));

        if !data.specifications.is_empty() {
            drawing.push(self.legend_group(&data.specifications, &config, None));
        }

        let title = data.title.to_uppercase();
        let title_box = self.title_box(&title, &paper, &config);
        drawing.push(self.text_group("title", &title, &title_box, config.strokes.title));

        if let Some(subtitle) = data.subtitle() {
            let subtitle_box = self.subtitle_box(subtitle, &paper, &config);
            drawing.push(self.text_group("subtitle", subtitle, &subtitle_box, config.strokes.title));
        }

        if let Some(path) = options.inset_for(data) {
            if let Some(inset) = self.inset_group(path, &paper, &config)? {
                drawing.push(inset);
            }
        }

        Ok(drawing)
    }

    /// A page with only the border, for drawing into by hand.
    pub fn compose_template(&self, paper: &PaperProfile) -> Drawing {
        let config = LayoutConfig::for_class(paper.size_class());
        let mut drawing = Drawing::for_paper(paper);
        drawing.push(border_group(paper, &config));
        drawing
    }

    /// Title placement: right-aligned, vertically centred on the line
    /// `internal_padding` inside the border.
    pub fn title_box(&self, title: &str, paper: &PaperProfile, config: &LayoutConfig) -> LayoutBox {
        let ref_h = reference_height(&self.font);
        self.right_aligned(
            title,
            paper,
            config,
            config.title_scale,
            (ref_h / 2.0) * config.title_scale + config.border_inset + config.internal_padding,
        )
    }

    /// Subtitle placement: right-aligned, one padding below the title's
    /// reference height.
    pub fn subtitle_box(&self, subtitle: &str, paper: &PaperProfile, config: &LayoutConfig) -> LayoutBox {
        let ref_h = reference_height(&self.font);
        self.right_aligned(
            subtitle,
            paper,
            config,
            config.subtitle_scale,
            (ref_h / 2.0) * config.subtitle_scale
                + ref_h * config.title_scale
                + config.border_inset
                + 2.0 * config.internal_padding,
        )
    }

    fn right_aligned(&self, text: &str, paper: &PaperProfile, config: &LayoutConfig, scale: f64, y: f64) -> LayoutBox {
        let width = bounding_box(text, &self.font).width * scale;
        let x = paper.width - width - config.title_right_margin();
        log::debug!("{:?}: width {} at ({}, {})", text, width, x, y);
        LayoutBox {
            x,
            y,
            width,
            height: reference_height(&self.font) * scale,
            scale,
        }
    }

    /// A `<g>` holding `text` as strokes, placed by `placement`.
    ///
    /// Each stroke is a `<path>` with id `{id}-stroke-{n}`.
    pub fn text_group(&self, id: &str, text: &str, placement: &LayoutBox, stroke_width: f64) -> Element {
        let stroke_width = fmt_num(stroke_width);
        let strokes = self
            .font
            .lines_for_text(text)
            .iter()
            .enumerate()
            .map(|(n, stroke)| {
                Element::new("path")
                    .attr("id", format!("{}-stroke-{}", id, n))
                    .attr("d", stroke_path_data(stroke))
                    .attr("fill", "none")
                    .attr("stroke", "black")
                    .attr("stroke-width", &stroke_width)
            })
            .collect::<Vec<_>>();

        Element::new("g")
            .attr("id", id)
            .attr("transform", placement.transform())
            .children(strokes)
    }

    /// The `legend` group for `rows`, optionally with a `<title>`.
    pub fn legend_group(&self, rows: &[LegendRow], config: &LayoutConfig, title: Option<&str>) -> Element {
        let legend = LegendLayout::measure(rows, &self.font, config);
        log::debug!(
            "Legend: {} rows, columns {} + {} mm",
            legend.rows,
            legend.name_width,
            legend.detail_width
        );

        let mut g = Element::new("g")
            .attr("id", "legend")
            .attr("fill", "none")
            .attr("stroke", "black")
            .attr("stroke-width", fmt_num(config.strokes.legend));
        if let Some(title) = title {
            g = g.child(Element::new("title").text(title));
        }

        g = g
            .child(
                Element::new("rect")
                    .attr("id", "legend-border")
                    .attr("x", fmt_num(legend.x))
                    .attr("y", fmt_num(legend.y))
                    .attr("width", fmt_num(legend.width()))
                    .attr("height", fmt_num(legend.height())),
            )
            .child(line(
                "legend-column-divider".to_string(),
                legend.divider_x(),
                legend.y,
                legend.divider_x(),
                legend.y + legend.height(),
            ));

        for (i, row) in rows.iter().enumerate() {
            let bottom = legend.row_top(i) + legend.cell_height;
            g = g
                .child(line(
                    format!("legend-row-divider-{}", i),
                    legend.x,
                    bottom,
                    legend.x + legend.width(),
                    bottom,
                ))
                .child(self.text_group(
                    &format!("legend-label-{}-name", i),
                    &row.name,
                    &legend.name_box(i),
                    config.strokes.text,
                ))
                .child(self.text_group(
                    &format!("legend-label-{}-detail", i),
                    &row.detail,
                    &legend.detail_box(i),
                    config.strokes.text,
                ));
        }

        g
    }

    fn inset_group(&self, path: &Path, paper: &PaperProfile, config: &LayoutConfig) -> Result<Option<Element>> {
        let inset = match InsetContent::load(path) {
            Ok(inset) => inset,
            Err(e @ (Error::InputNotFound(_) | Error::UnresolvableBoundingBox(_))) => {
                log::warn!("Inset omitted: {}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let Some(placement) = inset_box(paper, config, &inset.extent) else {
            log::warn!("Inset omitted: {} does not fit the page", path.display());
            return Ok(None);
        };
        log::debug!("Inset {} at scale {}", path.display(), placement.scale);

        Ok(Some(
            Element::new("g")
                .attr("id", "inset")
                .attr("transform", placement.transform())
                .children(inset.elements()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Orientation, PaperSize};

    /// Every character is a 10-wide, 20-tall box; spaces advance only.
    struct BoxFont;

    impl StrokeFont for BoxFont {
        fn name(&self) -> &str {
            "box"
        }

        fn lines_for_text(&self, text: &str) -> Vec<Polyline> {
            text.chars()
                .enumerate()
                .filter(|(_, c)| !c.is_whitespace())
                .map(|(i, _)| {
                    let x = i as f64 * 12.0;
                    vec![(x, -10.0), (x + 10.0, -10.0), (x + 10.0, 10.0), (x, 10.0)]
                })
                .collect()
        }
    }

    fn a4() -> PaperProfile {
        PaperProfile::new(PaperSize::A4, Orientation::Portrait)
    }

    #[test]
    fn test_border_box() {
        let config = LayoutConfig::small();
        let b = border_box(&a4(), &config);
        assert_eq!((b.x, b.y, b.width, b.height), (8.0, 8.0, 194.0, 281.0));

        let g = border_group(&a4(), &config);
        let border = g.find_by_id("border").unwrap();
        assert_eq!(border.get_attr("d"), Some("M 8 8 H 202 V 289 H 8 Z"));
        let reversed = g.find_by_id("border-reversed").unwrap();
        assert_eq!(reversed.get_attr("d"), Some("M 8 8 V 289 H 202 V 8 Z"));
        assert_eq!(border.get_attr("stroke-width"), Some("0.8"));
    }

    #[test]
    fn test_legend_measure() {
        let config = LayoutConfig::small();
        let rows = vec![LegendRow::new("AB", "ABC"), LegendRow::new("A", "")];
        let legend = LegendLayout::measure(&rows, &BoxFont, &config);

        // "AB" is 22 wide, "ABC" 34.
        assert!((legend.name_width - (22.0 * 0.1 + 8.0)).abs() < 1e-9);
        assert!((legend.detail_width - (34.0 * 0.1 + 8.0)).abs() < 1e-9);
        assert_eq!(legend.height(), 12.0);
        assert_eq!((legend.x, legend.y), (14.0, 14.0));

        let name = legend.name_box(1);
        assert_eq!((name.x, name.y), (16.0, 23.0));
        let detail = legend.detail_box(0);
        assert!((detail.x - (14.0 + legend.name_width + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_columns_keep_padding() {
        let config = LayoutConfig::large();
        let legend = LegendLayout::measure(&[LegendRow::new("", "")], &BoxFont, &config);
        assert_eq!(legend.name_width, 10.0);
        assert_eq!(legend.detail_width, 10.0);
    }

    #[test]
    fn test_title_right_alignment() {
        let composer = Composer::new(BoxFont);
        let config = LayoutConfig::small();
        let paper = a4();
        for title in ["", "A", "SLOOP", "A LONGER TITLE"] {
            let b = composer.title_box(title, &paper, &config);
            let right = b.x + b.width + config.title_right_margin();
            assert!((right - paper.width).abs() < 1e-9, "{title}");
            // Reference height 20 at scale 0.3, centred 14 mm down.
            assert!((b.y - 17.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_subtitle_below_title() {
        let composer = Composer::new(BoxFont);
        let config = LayoutConfig::large();
        let paper = PaperProfile::new(PaperSize::A3, Orientation::Portrait);
        let title = composer.title_box("X", &paper, &config);
        let subtitle = composer.subtitle_box("x", &paper, &config);
        // 10 * 0.35 + 20 * 0.5 + 10 + 16
        assert!((subtitle.y - 39.5).abs() < 1e-9);
        assert!(subtitle.y - subtitle.height / 2.0 > title.y + title.height / 2.0);
    }

    #[test]
    fn test_inset_box_centres_content() {
        let config = LayoutConfig::small();
        let extent = BoundingBox {
            min_x: 100.0,
            min_y: 50.0,
            max_x: 200.0,
            max_y: 150.0,
        };
        let b = inset_box(&a4(), &config, &extent).unwrap();
        // Available: 194 - 12 = 182 wide, 281 - 12 = 269 tall.
        assert!((b.scale - 1.82).abs() < 1e-9);
        let left = b.x + extent.min_x * b.scale;
        let top = b.y + extent.min_y * b.scale;
        assert!((left + b.width / 2.0 - 105.0).abs() < 1e-9);
        assert!((top + b.height / 2.0 - 148.5).abs() < 1e-9);
    }

    #[test]
    fn test_inset_box_degenerate() {
        let config = LayoutConfig::small();
        assert!(inset_box(&a4(), &config, &BoundingBox::at(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_text_group_ids() {
        let composer = Composer::new(BoxFont);
        let placement = LayoutBox {
            x: 1.0,
            y: 2.0,
            scale: 0.5,
            ..LayoutBox::default()
        };
        let g = composer.text_group("title", "A B", &placement, 0.75);
        assert_eq!(g.get_attr("transform"), Some("translate(1, 2) scale(0.5)"));
        let ids: Vec<_> = g.element_children().filter_map(Element::id).collect();
        assert_eq!(ids, vec!["title-stroke-0", "title-stroke-1"]);
        let first = g.element_children().next().unwrap();
        assert_eq!(first.get_attr("d"), Some("M0,-10 L10,-10 L10,10 L0,10"));
    }

    #[test]
    fn test_compose_groups_in_order() {
        let composer = Composer::new(BoxFont);
        let data = BlueprintData::new("Sloop")
            .with_subtitle("gaff")
            .with_row("LOA", "32ft");
        let drawing = composer.compose(&data, &ComposeOptions::default()).unwrap();
        assert_eq!(drawing.group_ids(), vec!["borders", "legend", "title", "subtitle"]);

        let bare = composer
            .compose(&BlueprintData::new("Sloop"), &ComposeOptions::default())
            .unwrap();
        assert_eq!(bare.group_ids(), vec!["borders", "title"]);
        assert_eq!(bare.group("title"), drawing.group("title"));
    }

    #[test]
    fn test_missing_inset_is_omitted() {
        let composer = Composer::new(BoxFont);
        let options = ComposeOptions::new().with_inset("/nonexistent/art.svg");
        let drawing = composer.compose(&BlueprintData::new("X"), &options).unwrap();
        assert!(!drawing.has_group("inset"));
    }

    #[test]
    fn test_template() {
        let composer = Composer::new(BoxFont);
        let paper = PaperProfile::new(PaperSize::Tabloid, Orientation::Landscape);
        let drawing = composer.compose_template(&paper);
        assert_eq!(drawing.group_ids(), vec!["borders"]);
        let svg = drawing.to_svg();
        assert!(svg.contains(r#"width="431.8mm" height="279.4mm" viewBox="0 0 431.8 279.4""#));
        assert!(svg.contains("M 10 10 H 421.8 V 269.4 H 10 Z"));
    }
}
