// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clickable buttons built from a rect and a label.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use storyviz_core::{Action, HoverStyle, Mark, MarkId, TextBaseline};

use crate::color::rgb_hex;
use crate::measure::TextMeasurer;
use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A push button: a filled rect that emits an [`Action`] on click, with a centered label.
///
/// Ids: `id_base` for the rect, `id_base + 1` for the label.
#[derive(Clone, Debug)]
pub struct ButtonSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Label text.
    pub label: String,
    /// Action emitted on click.
    pub action: Action,
    /// Label font size.
    pub font_size: f64,
    /// Horizontal padding around the label.
    pub padding_x: f64,
    /// Vertical padding around the label.
    pub padding_y: f64,
    /// Background fill.
    pub fill: Brush,
    /// Background fill while hovered.
    pub hover_fill: Brush,
    /// Label paint.
    pub text_fill: Brush,
}

impl ButtonSpec {
    /// Creates a button with a light grey background.
    pub fn new(id_base: u64, label: impl Into<String>, action: Action) -> Self {
        Self {
            id_base,
            label: label.into(),
            action,
            font_size: 13.0,
            padding_x: 12.0,
            padding_y: 6.0,
            fill: rgb_hex(0xefefef).into(),
            hover_fill: rgb_hex(0xdddddd).into(),
            text_fill: rgb_hex(0x222222).into(),
        }
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Returns the button's outer size.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> (f64, f64) {
        let (w, h) = measurer.measure(&self.label, self.font_size);
        (w + 2.0 * self.padding_x, h + 2.0 * self.padding_y)
    }

    /// Generates the button marks with the top-left corner at `(x, y)`.
    pub fn marks(&self, measurer: &dyn TextMeasurer, x: f64, y: f64) -> Vec<Mark> {
        let (w, h) = self.measure(measurer);
        let rect = Rect::new(x, y, x + w, y + h);
        let background = RectMarkSpec::new(MarkId::from_raw(self.id_base), rect)
            .with_fill(self.fill.clone())
            .with_stroke(rgb_hex(0x767676), 1.0)
            .with_hover(HoverStyle::default().with_fill(self.hover_fill.clone()))
            .with_action(self.action)
            .with_z_index(z_order::CONTROLS)
            .mark();
        let label = TextMarkSpec::new(
            MarkId::from_raw(self.id_base + 1),
            rect.center(),
            self.label.clone(),
        )
        .with_font_size(self.font_size)
        .with_fill(self.text_fill.clone())
        .with_anchor(storyviz_core::TextAnchor::Middle)
        .with_baseline(TextBaseline::Middle)
        .with_z_index(z_order::CONTROLS + 1)
        .mark();
        alloc::vec![background, label]
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Point;
    use storyviz_core::Scene;

    use super::*;
    use crate::HeuristicTextMeasurer;

    #[test]
    fn click_on_label_reaches_the_button_action() {
        let button = ButtonSpec::new(500, "Next", Action(3)).with_font_size(10.0);
        let marks = button.marks(&HeuristicTextMeasurer, 10.0, 10.0);
        assert_eq!(marks.len(), 2);
        let mut scene = Scene::new();
        scene.tick(marks);
        // Label center sits inside the rect; the label itself is inert.
        let (w, h) = button.measure(&HeuristicTextMeasurer);
        let center = Point::new(10.0 + 0.5 * w, 10.0 + 0.5 * h);
        assert_eq!(scene.click(center), Some(Action(3)));
        assert_eq!(scene.click(Point::new(0.0, 0.0)), None);
    }
}
