//! Project labels: a legend-only page summarizing a finished drawing.

use chrono::NaiveDate;

use super::config::LayoutConfig;
use super::engine::{Composer, Drawing};
use crate::font::StrokeFont;
use crate::model::{BlueprintData, LegendRow, Orientation, PaperProfile, PaperSize};
use crate::plot::PlotEstimate;

/// Value of the "Designed By" row.
pub const DESIGNED_BY: &str = "Drawscape Inc.";

/// Value of the "Website" row.
pub const WEBSITE: &str = "https://drawscape.io";

/// `"TITLE - subtitle"`, or just the upper-cased title.
pub fn project_name(data: &BlueprintData) -> String {
    let title = data.title.to_uppercase();
    match data.subtitle() {
        Some(subtitle) => format!("{} - {}", title, subtitle),
        None => title,
    }
}

/// The label's legend rows.
///
/// Draw time and pen travel only appear when an estimate is available.
pub fn label_rows(date: NaiveDate, data: &BlueprintData, estimate: Option<&PlotEstimate>) -> Vec<LegendRow> {
    let mut rows = vec![
        LegendRow::new("Date", date.format("%Y-%m-%d").to_string()),
        LegendRow::new("Project", project_name(data)),
    ];
    if let Some(estimate) = estimate {
        rows.push(LegendRow::new("Draw Time", estimate.draw_time()));
        rows.push(LegendRow::new("Pen Travel Distance", estimate.pen_travel()));
    }
    rows.push(LegendRow::new("Designed By", DESIGNED_BY));
    rows.push(LegendRow::new("Website", WEBSITE));
    rows
}

impl<F: StrokeFont> Composer<F> {
    /// Compose a label: a portrait Tabloid page holding only the legend.
    pub fn compose_label(&self, rows: &[LegendRow]) -> Drawing {
        let paper = PaperProfile::new(PaperSize::Tabloid, Orientation::Portrait);
        let config = LayoutConfig::label();
        let mut drawing = Drawing::for_paper(&paper);
        if !rows.is_empty() {
            drawing.push(self.legend_group(rows, &config, Some("Legend")));
        }
        drawing
    }
}
