// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] is measured (for layout) and then arranged against a plot rectangle to
//! generate marks. Bottom and left orientations are supported, over a linear or a
//! category scale.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use storyviz_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::format::format_tick_with_step;
use crate::measure::TextMeasurer;
use crate::rule_mark::rule_mark;
use crate::scale::{ScaleCategory, ScaleLinear, ScaleSpec};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis below the plot area.
    Bottom,
    /// A vertical axis left of the plot area.
    Left,
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Paint for the domain line and ticks.
    pub rule: Brush,
    /// Width of the domain line and ticks.
    pub rule_width: f64,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            rule: css::BLACK.into(),
            rule_width: 1.0,
            label_fill: css::BLACK.into(),
            label_font_size: 10.0,
            title_fill: css::BLACK.into(),
            title_font_size: 16.0,
        }
    }
}

/// Tick label formatter: `(value, tick_step) -> label`.
pub type TickFormatter = Arc<dyn Fn(f64, f64) -> String + Send + Sync>;

/// An axis specification.
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// The axis scale specification.
    pub scale: ScaleSpec,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks (linear scales only).
    pub tick_count: usize,
    /// Tick line length.
    pub tick_size: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Gridline paint, if gridlines should span the plot.
    pub grid: Option<Brush>,
    /// Optional axis title text.
    pub title: Option<String>,
    /// Distance from tick labels to the title.
    pub title_offset: f64,
    /// Optional tick label formatter (linear scales only).
    ///
    /// An empty label suppresses the label mark but keeps the tick.
    pub tick_formatter: Option<TickFormatter>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("style", &self.style)
            .field("grid", &self.grid)
            .field("title", &self.title)
            .field("title_offset", &self.title_offset)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

/// One resolved tick: position along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
struct Tick {
    pos: f64,
    label: String,
}

impl AxisSpec {
    /// Creates an axis with 10 ticks, tick size 6, and tick padding 3.
    pub fn new(id_base: u64, scale: impl Into<ScaleSpec>, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
            grid: None,
            title: None,
            title_offset: 12.0,
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(
        mut self,
        f: impl Fn(f64, f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Enable gridlines with the given paint.
    pub fn with_grid(mut self, stroke: impl Into<Brush>) -> Self {
        self.grid = Some(stroke.into());
        self
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn range(&self, plot: Rect) -> (f64, f64) {
        match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y1, plot.y0),
        }
    }

    /// Returns the linear scale this axis maps through, or `None` for a category axis.
    pub fn scale_linear(&self, plot: Rect) -> Option<ScaleLinear> {
        match &self.scale {
            ScaleSpec::Linear(s) => Some(s.instantiate(self.range(plot), self.tick_count)),
            ScaleSpec::Category(_) => None,
        }
    }

    /// Returns the category scale this axis maps through, or `None` for a linear axis.
    pub fn scale_category(&self, plot: Rect) -> Option<ScaleCategory> {
        match &self.scale {
            ScaleSpec::Category(s) => Some(s.instantiate(self.range(plot))),
            ScaleSpec::Linear(_) => None,
        }
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    fn labels(&self) -> Vec<String> {
        match &self.scale {
            ScaleSpec::Linear(s) => {
                let (d0, d1) = s.resolved_domain(self.tick_count);
                let values = ScaleLinear::new((d0, d1), (0.0, 1.0)).ticks(self.tick_count);
                let step = tick_step(&values);
                values.iter().map(|v| self.format_tick(*v, step)).collect()
            }
            ScaleSpec::Category(s) => s.categories.clone(),
        }
    }

    fn ticks(&self, plot: Rect) -> Vec<Tick> {
        match &self.scale {
            ScaleSpec::Linear(_) => {
                let Some(scale) = self.scale_linear(plot) else {
                    return Vec::new();
                };
                let values = scale.ticks(self.tick_count);
                let step = tick_step(&values);
                values
                    .iter()
                    .map(|v| Tick {
                        pos: scale.map(*v),
                        label: self.format_tick(*v, step),
                    })
                    .collect()
            }
            ScaleSpec::Category(_) => {
                let Some(scale) = self.scale_category(plot) else {
                    return Vec::new();
                };
                let half = 0.5 * scale.band_width();
                scale
                    .categories()
                    .iter()
                    .filter_map(|c| {
                        let (start, _) = scale.band(c)?;
                        Some(Tick {
                            pos: start + half,
                            label: c.clone(),
                        })
                    })
                    .collect()
            }
        }
    }

    /// Measure the thickness this axis needs along its normal direction.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let labels = self.labels();
        let font_size = self.style.label_font_size;
        let label_extent = labels
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| {
                let (w, h) = measurer.measure(l, font_size);
                match self.orient {
                    AxisOrient::Bottom => h,
                    AxisOrient::Left => w,
                }
            })
            .fold(0.0_f64, f64::max);
        let mut out = self.tick_size.abs() + self.tick_padding.max(0.0) + label_extent;
        if self.title.is_some() {
            out += self.title_offset.max(0.0) + self.style.title_font_size;
        }
        out
    }

    /// Generate axis marks for the given plot rectangle and arranged axis rectangle.
    ///
    /// `axis_rect` is the reserved strip for this axis, adjacent to `plot`; the title sits at
    /// its outer edge.
    ///
    /// Ids: `id_base` is the domain line, `id_base + 1 + i` the ticks, `id_base + 1000 + i`
    /// the labels, `id_base + 9000` the title, and `id_base - 5000 + i` the gridlines.
    pub fn marks(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let ticks = self.ticks(plot);
        let tick_size = self.tick_size.abs();
        let label_gap = tick_size + self.tick_padding.max(0.0);
        let mut out = Vec::new();

        let rule = &self.style.rule;
        let rule_width = self.style.rule_width;
        let (from, to) = match self.orient {
            AxisOrient::Bottom => (Point::new(plot.x0, plot.y1), Point::new(plot.x1, plot.y1)),
            AxisOrient::Left => (Point::new(plot.x0, plot.y0), Point::new(plot.x0, plot.y1)),
        };
        out.push(rule_mark(
            MarkId::from_raw(self.id_base),
            from,
            to,
            rule,
            rule_width,
            z_order::AXIS_RULES,
        ));

        for (i, tick) in ticks.iter().enumerate() {
            let i = i as u64;
            let (tick_from, tick_to, label_pos, anchor, baseline) = match self.orient {
                AxisOrient::Bottom => (
                    Point::new(tick.pos, plot.y1),
                    Point::new(tick.pos, plot.y1 + tick_size),
                    (tick.pos, plot.y1 + label_gap),
                    TextAnchor::Middle,
                    TextBaseline::Hanging,
                ),
                AxisOrient::Left => (
                    Point::new(plot.x0 - tick_size, tick.pos),
                    Point::new(plot.x0, tick.pos),
                    (plot.x0 - label_gap, tick.pos),
                    TextAnchor::End,
                    TextBaseline::Middle,
                ),
            };
            out.push(rule_mark(
                MarkId::from_raw(self.id_base + 1 + i),
                tick_from,
                tick_to,
                rule,
                rule_width,
                z_order::AXIS_RULES,
            ));

            if let Some(grid) = &self.grid {
                let (from, to) = match self.orient {
                    AxisOrient::Bottom => {
                        (Point::new(tick.pos, plot.y0), Point::new(tick.pos, plot.y1))
                    }
                    AxisOrient::Left => {
                        (Point::new(plot.x0, tick.pos), Point::new(plot.x1, tick.pos))
                    }
                };
                out.push(rule_mark(
                    MarkId::from_raw(self.id_base.wrapping_sub(5_000) + i),
                    from,
                    to,
                    grid,
                    1.0,
                    z_order::GRID_LINES,
                ));
            }

            if tick.label.is_empty() {
                continue;
            }
            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1000 + i),
                    label_pos.into(),
                    tick.label.clone(),
                )
                .with_font_size(self.style.label_font_size)
                .with_fill(self.style.label_fill.clone())
                .with_anchor(anchor)
                .with_baseline(baseline)
                .with_z_index(z_order::AXIS_LABELS)
                .mark(),
            );
        }

        if let Some(title) = &self.title {
            let half = 0.5 * self.style.title_font_size;
            let (pos, angle) = match self.orient {
                AxisOrient::Bottom => ((0.5 * (plot.x0 + plot.x1), axis_rect.y1 - half), 0.0),
                AxisOrient::Left => ((axis_rect.x0 + half, 0.5 * (plot.y0 + plot.y1)), -90.0),
            };
            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 9000),
                    pos.into(),
                    title.clone(),
                )
                .with_font_size(self.style.title_font_size)
                .with_fill(self.style.title_fill.clone())
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Middle)
                .with_angle(angle)
                .with_z_index(z_order::AXIS_TITLES)
                .mark(),
            );
        }

        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use storyviz_core::MarkPayload;

    use super::*;
    use crate::HeuristicTextMeasurer;
    use crate::scale::{ScaleCategorySpec, ScaleLinearSpec};

    fn texts(marks: &[Mark]) -> Vec<(MarkId, String, kurbo::Point, f64)> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some((m.id, t.text.clone(), t.pos, t.angle)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bottom_linear_axis_labels_every_tick() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis = AxisSpec::bottom(100, ScaleLinearSpec::new((0.0, 10.0))).with_tick_count(5);
        let marks = axis.marks(plot, Rect::new(0.0, 50.0, 100.0, 70.0));
        let labels = texts(&marks);
        let text: Vec<&str> = labels.iter().map(|l| l.1.as_str()).collect();
        assert_eq!(text, ["0", "2", "4", "6", "8", "10"]);
        assert_eq!(labels[0].0, MarkId::from_raw(1100));
        assert_eq!(labels[5].2, kurbo::Point::new(100.0, 59.0));
        // Domain line + 6 ticks + 6 labels.
        assert_eq!(marks.len(), 13);
    }

    #[test]
    fn empty_labels_are_skipped_but_ticks_remain() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis = AxisSpec::bottom(1, ScaleLinearSpec::new((0.0, 10.0)))
            .with_tick_count(5)
            .with_tick_formatter(|v, _| {
                if v > 0.0 {
                    alloc::format!("{v}")
                } else {
                    String::new()
                }
            });
        let marks = axis.marks(plot, Rect::new(0.0, 50.0, 100.0, 70.0));
        let labels = texts(&marks);
        assert_eq!(labels.len(), 5);
        assert_eq!(labels[0].1, "2");
        assert_eq!(marks.len(), 12);
    }

    #[test]
    fn left_category_axis_centers_labels_on_bands() {
        let plot = Rect::new(50.0, 0.0, 150.0, 100.0);
        let axis = AxisSpec::left(1, ScaleCategorySpec::new(vec!["CA", "NY"])).with_title("State");
        let measured = axis.measure(&HeuristicTextMeasurer);
        // tick 6 + padding 3 + "CA" at 10px (12) + title offset 12 + 16.
        assert!((measured - 49.0).abs() < 1e-9);
        let marks = axis.marks(plot, Rect::new(50.0 - measured, 0.0, 50.0, 100.0));
        let labels = texts(&marks);
        assert_eq!(labels[0].1, "CA");
        assert_eq!(labels[0].2, kurbo::Point::new(41.0, 25.0));
        assert_eq!(labels[1].2, kurbo::Point::new(41.0, 75.0));
        let title = labels.last().expect("title");
        assert_eq!(title.1, "State");
        assert_eq!(title.3, -90.0);
        assert!((title.2.x - (1.0 + 8.0)).abs() < 1e-9);
    }

    #[test]
    fn gridlines_span_the_plot() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis = AxisSpec::left(10_000, ScaleLinearSpec::new((0.0, 1.0)))
            .with_tick_count(2)
            .with_grid(css::LIGHT_GRAY);
        let marks = axis.marks(plot, Rect::new(-30.0, 0.0, 0.0, 50.0));
        let grid: Vec<&Mark> = marks
            .iter()
            .filter(|m| m.z_index == z_order::GRID_LINES)
            .collect();
        assert_eq!(grid.len(), 3);
        let b = grid[0].payload.bounds().expect("rule bounds");
        assert_eq!((b.x0, b.x1), (0.0, 100.0));
    }
}
