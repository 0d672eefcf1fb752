// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! Two legend shapes: a list of color swatches with labels, and a continuous color ramp
//! with a tick axis underneath.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::color::palette::css;
use peniko::{Brush, Color};
use storyviz_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::axis::AxisSpec;
use crate::color::ScaleLinearColor;
use crate::layout::Size;
use crate::measure::TextMeasurer;
use crate::rect_mark::RectMarkSpec;
use crate::scale::ScaleLinearSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A simple legend row item.
#[derive(Clone, Debug)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// A vertical list of color swatches with text labels.
///
/// Use with a measure/arrange layout pass: [`LegendSwatchesSpec::measure`] gives the desired
/// size, [`LegendSwatchesSpec::marks`] places it once the origin is known.
///
/// Ids: `id_base + i` for swatches, `id_base + 1000 + i` for labels.
#[derive(Clone, Debug)]
pub struct LegendSwatchesSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Which side of the swatch the label sits on: `Start` puts it on the right,
    /// `End` on the left.
    pub label_anchor: TextAnchor,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatchesSpec {
    /// Creates a new legend specification with defaults.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            swatch_size: 10.0,
            row_gap: 10.0,
            label_dx: 6.0,
            label_anchor: TextAnchor::Start,
            font_size: 12.0,
            text_fill: css::BLACK.into(),
            items,
        }
    }

    /// Places labels left of the swatches, right-aligned.
    pub fn with_labels_left(mut self) -> Self {
        self.label_anchor = TextAnchor::End;
        self
    }

    /// Set the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    fn row_height(&self) -> f64 {
        self.swatch_size.max(self.font_size)
    }

    fn label_width(&self, measurer: &dyn TextMeasurer) -> f64 {
        self.items
            .iter()
            .map(|item| measurer.measure(&item.label, self.font_size).0)
            .fold(0.0_f64, f64::max)
    }

    /// Measures the desired legend size (width/height).
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        if self.items.is_empty() {
            return Size::default();
        }
        let n = self.items.len() as f64;
        Size {
            width: self.swatch_size + self.label_dx + self.label_width(measurer),
            height: n * self.row_height() + (n - 1.0) * self.row_gap,
        }
    }

    /// Generates legend marks with the legend's top-left corner at `(x, y)`.
    pub fn marks(&self, measurer: &dyn TextMeasurer, x: f64, y: f64) -> Vec<Mark> {
        let mut out = Vec::new();
        let row_height = self.row_height();
        let label_w = self.label_width(measurer);
        let (swatch_x, label_x) = match self.label_anchor {
            TextAnchor::End => (x + label_w + self.label_dx, x + label_w),
            _ => (x, x + self.swatch_size + self.label_dx),
        };

        for (i, item) in self.items.iter().enumerate() {
            let row_y = y + i as f64 * (row_height + self.row_gap);
            let swatch_y = row_y + 0.5 * (row_height - self.swatch_size);
            out.push(
                RectMarkSpec::new(
                    MarkId::from_raw(self.id_base + i as u64),
                    Rect::new(
                        swatch_x,
                        swatch_y,
                        swatch_x + self.swatch_size,
                        swatch_y + self.swatch_size,
                    ),
                )
                .with_fill(item.fill.clone())
                .with_z_index(z_order::LEGEND_SWATCHES)
                .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    (label_x, row_y + 0.5 * row_height).into(),
                    item.label.clone(),
                )
                .with_font_size(self.font_size)
                .with_fill(self.text_fill.clone())
                .with_anchor(self.label_anchor)
                .with_baseline(TextBaseline::Middle)
                .with_z_index(z_order::LEGEND_LABELS)
                .mark(),
            );
        }
        out
    }
}

/// A continuous color legend: the ramp drawn as thin solid slices over a bottom axis.
///
/// Ids: `id_base + i` for slices, `id_base + 2000` onward for the axis.
#[derive(Clone, Debug)]
pub struct GradientLegendSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// The color scale being explained.
    pub color: ScaleLinearColor,
    /// Ramp width.
    pub width: f64,
    /// Ramp height.
    pub height: f64,
    /// Number of solid slices approximating the ramp.
    pub slices: usize,
    /// Approximate number of axis ticks.
    pub tick_count: usize,
}

impl GradientLegendSpec {
    /// Creates a 200 × 20 legend for `color`.
    pub fn new(id_base: u64, color: ScaleLinearColor) -> Self {
        Self {
            id_base,
            color,
            width: 200.0,
            height: 20.0,
            slices: 50,
            tick_count: 5,
        }
    }

    fn axis(&self) -> AxisSpec {
        AxisSpec::bottom(self.id_base + 2000, ScaleLinearSpec::new(self.color.domain()))
            .with_tick_count(self.tick_count)
    }

    /// Measures the desired legend size (ramp plus axis).
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        Size {
            width: self.width,
            height: self.height + self.axis().measure(measurer),
        }
    }

    /// Generates legend marks with the ramp's top-left corner at `(x, y)`.
    pub fn marks(&self, measurer: &dyn TextMeasurer, x: f64, y: f64) -> Vec<Mark> {
        let slices = self.slices.max(1);
        let slice_w = self.width / slices as f64;
        let (d0, d1) = self.color.domain();
        let mut out = Vec::with_capacity(slices + 16);
        for i in 0..slices {
            let t = (i as f64 + 0.5) / slices as f64;
            let x0 = x + i as f64 * slice_w;
            out.push(
                RectMarkSpec::new(
                    MarkId::from_raw(self.id_base + i as u64),
                    Rect::new(x0, y, x0 + slice_w, y + self.height),
                )
                .with_fill(self.color.map(d0 + t * (d1 - d0)))
                .with_z_index(z_order::LEGEND_SWATCHES)
                .mark(),
            );
        }
        let ramp = Rect::new(x, y, x + self.width, y + self.height);
        let axis = self.axis();
        let axis_rect = Rect::new(ramp.x0, ramp.y1, ramp.x1, ramp.y1 + axis.measure(measurer));
        out.extend(axis.marks(ramp, axis_rect));
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use storyviz_core::MarkPayload;

    use super::*;
    use crate::HeuristicTextMeasurer;
    use crate::color::rgb_hex;

    #[test]
    fn swatch_measure_matches_marks() {
        let items = vec![
            LegendItem::solid("Listings", css::ORANGE),
            LegendItem::solid("Hosts", css::GREEN),
        ];
        let spec = LegendSwatchesSpec::new(1, items);
        let size = spec.measure(&HeuristicTextMeasurer);
        // 10 + 6 + "Listings" at 12px (57.6).
        assert!((size.width - 73.6).abs() < 1e-9);
        assert_eq!(size.height, 34.0);
        let marks = spec.marks(&HeuristicTextMeasurer, 0.0, 0.0);
        assert_eq!(marks.len(), 4);
        assert_eq!(marks[2].payload.bounds(), Some(Rect::new(0.0, 22.0, 10.0, 32.0)));
    }

    #[test]
    fn labels_left_are_right_aligned_before_swatches() {
        let spec = LegendSwatchesSpec::new(1, vec![LegendItem::solid("AB", css::RED)])
            .with_labels_left();
        let marks = spec.marks(&HeuristicTextMeasurer, 100.0, 0.0);
        let MarkPayload::Text(t) = &marks[1].payload else {
            panic!("expected label");
        };
        assert_eq!(t.anchor, TextAnchor::End);
        assert!((t.pos.x - 114.4).abs() < 1e-9);
        let swatch = marks[0].payload.bounds().expect("swatch");
        assert!((swatch.x0 - 120.4).abs() < 1e-9);
    }

    #[test]
    fn gradient_runs_from_low_to_high_color() {
        let color = ScaleLinearColor::new((0.0, 100.0), rgb_hex(0x000000), rgb_hex(0xffffff));
        let spec = GradientLegendSpec::new(10_000, color);
        let marks = spec.marks(&HeuristicTextMeasurer, 20.0, 20.0);
        let fill = |m: &Mark| match &m.payload {
            MarkPayload::Rect(r) => r.fill.clone(),
            _ => panic!("expected slice"),
        };
        assert_ne!(fill(&marks[0]), fill(&marks[49]));
        let last = marks[49].payload.bounds().expect("slice");
        assert!((last.x1 - 220.0).abs() < 1e-9);
        assert!(spec.measure(&HeuristicTextMeasurer).height > 20.0);
    }
}
