//! Drawing composition.
//!
//! [`Composer`] lays out every page variant: blueprints (border, legend,
//! title, subtitle, inset), bare templates, project labels and shipping
//! labels. Constants come from [`LayoutConfig`], resolved once per build
//! from the paper's size class.

pub mod config;
pub mod engine;
pub mod label;
pub mod options;
pub mod shipping;

pub use config::{LayoutConfig, StrokeWidths, LEGEND_TEXT_OFFSET};
pub use engine::{border_box, border_group, inset_box, Composer, Drawing, Group, LegendLayout};
pub use label::{label_rows, project_name};
pub use options::ComposeOptions;
