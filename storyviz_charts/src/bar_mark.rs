// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use storyviz_core::{HoverStyle, Mark, MarkId};

use crate::rect_mark::RectMarkSpec;
use crate::scale::ScaleLinear;

/// Which way bars grow from the baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarOrient {
    /// Bars sit on a horizontal band axis and grow upward.
    Vertical,
    /// Bars sit on a vertical band axis and grow rightward.
    Horizontal,
}

/// One bar: its band slot, value, and paint.
#[derive(Clone, Debug)]
pub struct BarDatum {
    /// Stable key for mark identity within the spec's namespace.
    pub row_key: u64,
    /// Band start along the categorical axis.
    pub band_start: f64,
    /// Band width along the categorical axis.
    pub band_width: f64,
    /// Value along the continuous axis.
    pub value: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Tooltip shown on hover.
    pub tooltip: Option<String>,
}

/// Bars with a shared value scale and baseline.
///
/// Generates one rect mark per datum. Mark identity is `(namespace, row_key)` so a bar keeps
/// its id across re-renders.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Id namespace for the generated marks.
    pub namespace: u64,
    /// Bar direction.
    pub orient: BarOrient,
    /// Scale for the continuous axis.
    pub value_scale: ScaleLinear,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Optional hover style for every bar.
    pub hover: Option<HoverStyle>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl BarMarkSpec {
    /// Creates a bar mark spec with `baseline = 0`.
    pub fn new(namespace: u64, orient: BarOrient, value_scale: ScaleLinear) -> Self {
        Self {
            namespace,
            orient,
            value_scale,
            baseline: 0.0,
            hover: None,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in data units.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets a hover style for every bar.
    pub fn with_hover(mut self, hover: HoverStyle) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Geometry of one bar.
    pub fn bar_rect(&self, datum: &BarDatum) -> Rect {
        let v0 = self.value_scale.map(self.baseline);
        let v1 = self.value_scale.map(datum.value);
        match self.orient {
            BarOrient::Vertical => Rect::new(
                datum.band_start,
                v0.min(v1),
                datum.band_start + datum.band_width,
                v0.max(v1),
            ),
            BarOrient::Horizontal => Rect::new(
                v0.min(v1),
                datum.band_start,
                v0.max(v1),
                datum.band_start + datum.band_width,
            ),
        }
    }

    /// Generates marks for `data`.
    pub fn marks(&self, data: &[BarDatum]) -> Vec<Mark> {
        data.iter()
            .map(|d| {
                let mut spec =
                    RectMarkSpec::new(MarkId::for_row(self.namespace, d.row_key), self.bar_rect(d))
                        .with_fill(d.fill.clone())
                        .with_z_index(self.z_index);
                spec.tooltip = d.tooltip.clone();
                spec.hover = self.hover.clone();
                spec.mark()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::color::palette::css;
    use storyviz_core::MarkPayload;

    use super::*;

    fn datum(row_key: u64, band_start: f64, value: f64) -> BarDatum {
        BarDatum {
            row_key,
            band_start,
            band_width: 10.0,
            value,
            fill: css::STEEL_BLUE.into(),
            tooltip: Some(alloc::format!("v={value}")),
        }
    }

    #[test]
    fn vertical_bars_grow_up_from_baseline() {
        let y = ScaleLinear::new((0.0, 100.0), (200.0, 0.0));
        let spec = BarMarkSpec::new(7, BarOrient::Vertical, y);
        let marks = spec.marks(&[datum(1, 0.0, 50.0)]);
        let MarkPayload::Rect(r) = &marks[0].payload else {
            panic!("expected rect");
        };
        assert_eq!(r.rect, Rect::new(0.0, 100.0, 10.0, 200.0));
        assert_eq!(marks[0].interaction.tooltip.as_deref(), Some("v=50"));
        assert_eq!(marks[0].id, MarkId::for_row(7, 1));
    }

    #[test]
    fn horizontal_bars_grow_right() {
        let x = ScaleLinear::new((0.0, 100.0), (0.0, 400.0));
        let spec = BarMarkSpec::new(7, BarOrient::Horizontal, x);
        let r = spec.bar_rect(&datum(1, 30.0, 25.0));
        assert_eq!(r, Rect::new(0.0, 30.0, 100.0, 40.0));
        assert_eq!(spec.marks(&vec![datum(1, 0.0, 1.0), datum(2, 10.0, 2.0)]).len(), 2);
    }
}
