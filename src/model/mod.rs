//! Data model for drawing composition.
//!
//! Input records come in through serde, the page is resolved into a
//! [`PaperProfile`] once per build, and the geometry types carry every
//! derived measurement between the metrics, inference and layout stages.

mod data;
mod geometry;
mod paper;

pub use data::{BlueprintData, LegendRow, ShippingData};
pub use geometry::{BoundingBox, LayoutBox, Polyline};
pub use paper::{Orientation, PaperProfile, PaperSize, SizeClass};
