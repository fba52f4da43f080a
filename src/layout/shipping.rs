//! Shipping labels for finished plots.

use super::engine::{Composer, Drawing};
use crate::font::{bounding_box, StrokeFont};
use crate::model::{LayoutBox, ShippingData};

/// Label width (11.5 in), mm.
pub const LABEL_WIDTH: f64 = 292.1;
/// Label height (8.5 in), mm.
pub const LABEL_HEIGHT: f64 = 215.9;

const PADDING: f64 = 10.0;
const RETURN_SCALE: f64 = 0.13;
const RETURN_LINE_SPACING: f64 = 7.0;
const RECIPIENT_SCALE: f64 = 0.25;
const RECIPIENT_LINE_SPACING: f64 = 10.0;
const STROKE_WIDTH: f64 = 1.0;

/// Return address, top to bottom.
pub const RETURN_ADDRESS: [&str; 3] = [
    "Drawscape, Inc",
    "10266 Truckee Airport Rd Suite C",
    "Truckee, CA 96161",
];

impl<F: StrokeFont> Composer<F> {
    /// Compose a landscape shipping label.
    ///
    /// The return address sits in the top-left corner; recipient lines are
    /// centred horizontally and start just below the middle of the page.
    /// Groups are `return-address-{i}` and `recipient-{i}`.
    pub fn compose_shipping(&self, data: &ShippingData) -> Drawing {
        let mut drawing = Drawing::new(LABEL_WIDTH, LABEL_HEIGHT);

        for (i, text) in RETURN_ADDRESS.iter().enumerate() {
            let placement = LayoutBox {
                x: PADDING,
                y: RETURN_LINE_SPACING * (i + 1) as f64 + PADDING,
                scale: RETURN_SCALE,
                ..LayoutBox::default()
            };
            drawing.push(self.text_group(&format!("return-address-{}", i), text, &placement, STROKE_WIDTH));
        }

        for (i, text) in data.recipient_lines().iter().enumerate() {
            let width = bounding_box(text, self.font()).width * RECIPIENT_SCALE;
            let placement = LayoutBox {
                x: LABEL_WIDTH / 2.0 - width / 2.0,
                y: LABEL_HEIGHT / 2.0 + RECIPIENT_LINE_SPACING * (i + 1) as f64,
                width,
                scale: RECIPIENT_SCALE,
                ..LayoutBox::default()
            };
            drawing.push(self.text_group(&format!("recipient-{}", i), text, &placement, STROKE_WIDTH));
        }

        drawing
    }
}
