// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart titles.
//!
//! Titles participate in chart layout (they reserve a strip above the plot in
//! [`crate::ChartLayout`]) but are rendered as ordinary text marks.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use storyviz_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::color::rgb_hex;
use crate::measure::TextMeasurer;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A chart-level title.
#[derive(Clone, Debug)]
pub struct TitleSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Title text (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Bold when `true`.
    pub bold: bool,
    /// Fill paint.
    pub fill: Brush,
    /// Extra vertical padding around the title text, applied above and below.
    pub padding: f64,
    /// Horizontal anchor within the title rectangle.
    pub anchor: TextAnchor,
    /// Rendering order hint.
    pub z_index: i32,
}

impl TitleSpec {
    /// Creates a bold 20px dark-grey title, centered.
    pub fn new(id: MarkId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            font_size: 20.0,
            bold: true,
            fill: rgb_hex(0x444444).into(),
            padding: 8.0,
            anchor: TextAnchor::Middle,
            z_index: z_order::TITLES,
        }
    }

    /// Returns the thickness (height) reserved by this title in chart layout.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let (_, h) = measurer.measure(&self.text, self.font_size);
        (2.0 * self.padding.max(0.0) + h).max(0.0)
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the vertical padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the horizontal anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Emits the title mark placed within `title_rect`.
    pub fn marks(&self, title_rect: Rect) -> Vec<Mark> {
        let x = match self.anchor {
            TextAnchor::Start => title_rect.x0,
            TextAnchor::Middle => 0.5 * (title_rect.x0 + title_rect.x1),
            TextAnchor::End => title_rect.x1,
        };
        let y = 0.5 * (title_rect.y0 + title_rect.y1);
        let mut spec = TextMarkSpec::new(self.id, (x, y).into(), self.text.clone())
            .with_font_size(self.font_size)
            .with_fill(self.fill.clone())
            .with_anchor(self.anchor)
            .with_baseline(TextBaseline::Middle)
            .with_z_index(self.z_index);
        if self.bold {
            spec = spec.bold();
        }
        alloc::vec![spec.mark()]
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use storyviz_core::MarkPayload;

    use super::*;
    use crate::HeuristicTextMeasurer;

    #[test]
    fn title_is_centered_in_its_strip() {
        let title = TitleSpec::new(MarkId::from_raw(10), "Title");
        let h = title.measure(&HeuristicTextMeasurer);
        assert_eq!(h, 36.0);
        let marks = title.marks(Rect::new(0.0, 0.0, 800.0, h));
        let MarkPayload::Text(t) = &marks[0].payload else {
            panic!("expected text");
        };
        assert_eq!(t.pos, kurbo::Point::new(400.0, 18.0));
        assert_eq!(t.font_weight, 700);
    }
}
