// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart composition.
//!
//! A [`ChartSpec`] owns the guides of one chart (title, axes, legend) and its layout
//! inputs. Scene code supplies the series marks through a closure that receives the
//! resolved plot rectangle.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use storyviz_core::Mark;

use crate::{
    AxisSpec, ChartLayout, ChartLayoutSpec, GradientLegendSpec, LegendPlacement,
    LegendSwatchesSpec, Size, TextMeasurer, TitleSpec,
};

/// A legend of either shape.
#[derive(Clone, Debug)]
pub enum LegendSpec {
    /// Color swatches with labels.
    Swatches(LegendSwatchesSpec),
    /// A continuous color ramp with an axis.
    Gradient(GradientLegendSpec),
}

impl LegendSpec {
    /// Measures the desired legend size.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        match self {
            Self::Swatches(s) => s.measure(measurer),
            Self::Gradient(g) => g.measure(measurer),
        }
    }

    /// Generates legend marks with the top-left corner at `(x, y)`.
    pub fn marks(&self, measurer: &dyn TextMeasurer, x: f64, y: f64) -> Vec<Mark> {
        match self {
            Self::Swatches(s) => s.marks(measurer, x, y),
            Self::Gradient(g) => g.marks(measurer, x, y),
        }
    }
}

impl From<LegendSwatchesSpec> for LegendSpec {
    fn from(value: LegendSwatchesSpec) -> Self {
        Self::Swatches(value)
    }
}

impl From<GradientLegendSpec> for LegendSpec {
    fn from(value: GradientLegendSpec) -> Self {
        Self::Gradient(value)
    }
}

/// A composed chart description that owns guide specs and layout inputs.
#[derive(Clone, Debug, Default)]
pub struct ChartSpec {
    /// Optional title.
    pub title: Option<TitleSpec>,
    /// Layout options; guide thicknesses are filled in by [`ChartSpec::layout`].
    pub layout: ChartLayoutSpec,
    /// Optional left axis.
    pub axis_left: Option<AxisSpec>,
    /// Optional bottom axis.
    pub axis_bottom: Option<AxisSpec>,
    /// Optional legend.
    pub legend: Option<(LegendSpec, LegendPlacement)>,
}

impl ChartSpec {
    /// Creates an empty chart with the given outer size.
    pub fn new(view_size: Size) -> Self {
        Self {
            layout: ChartLayoutSpec {
                view_size,
                outer_padding: 10.0,
                ..ChartLayoutSpec::default()
            },
            ..Self::default()
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: TitleSpec) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the left axis.
    pub fn with_axis_left(mut self, axis: AxisSpec) -> Self {
        self.axis_left = Some(axis);
        self
    }

    /// Sets the bottom axis.
    pub fn with_axis_bottom(mut self, axis: AxisSpec) -> Self {
        self.axis_bottom = Some(axis);
        self
    }

    /// Sets the legend.
    pub fn with_legend(
        mut self,
        legend: impl Into<LegendSpec>,
        placement: LegendPlacement,
    ) -> Self {
        self.legend = Some((legend.into(), placement));
        self
    }

    /// Reserves a strip between the title and the plot (for buttons).
    pub fn with_header(mut self, height: f64) -> Self {
        self.layout.header = height;
        self
    }

    /// Computes layout for this chart.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> ChartLayout {
        let mut layout = self.layout;
        layout.title_top = self.title.as_ref().map(|t| t.measure(measurer));
        layout.axis_left = self.axis_left.as_ref().map(|a| a.measure(measurer));
        layout.axis_bottom = self.axis_bottom.as_ref().map(|a| a.measure(measurer));
        layout.legend = self
            .legend
            .as_ref()
            .map(|(spec, placement)| (spec.measure(measurer), *placement));
        ChartLayout::arrange(&layout)
    }

    /// Generates marks for title, axes, and legend given a computed layout.
    pub fn guide_marks(&self, measurer: &dyn TextMeasurer, layout: &ChartLayout) -> Vec<Mark> {
        let mut out = Vec::new();
        if let (Some(title), Some(rect)) = (self.title.as_ref(), layout.title_top) {
            out.extend(title.marks(rect));
        }
        if let (Some(axis), Some(rect)) = (self.axis_bottom.as_ref(), layout.axis_bottom) {
            out.extend(axis.marks(layout.plot, rect));
        }
        if let (Some(axis), Some(rect)) = (self.axis_left.as_ref(), layout.axis_left) {
            out.extend(axis.marks(layout.plot, rect));
        }
        if let (Some((legend, _)), Some(rect)) = (self.legend.as_ref(), layout.legend) {
            out.extend(legend.marks(measurer, rect.x0, rect.y0));
        }
        out
    }

    /// Produces the full mark list: series marks followed by guide marks.
    ///
    /// `build_series` is invoked with the resolved layout.
    pub fn marks(
        &self,
        measurer: &dyn TextMeasurer,
        build_series: impl FnOnce(&Self, &ChartLayout) -> Vec<Mark>,
    ) -> (ChartLayout, Vec<Mark>) {
        let layout = self.layout(measurer);
        let mut marks = build_series(self, &layout);
        marks.extend(self.guide_marks(measurer, &layout));
        (layout, marks)
    }

    /// The plot rectangle this chart will use.
    pub fn plot(&self, measurer: &dyn TextMeasurer) -> Rect {
        self.layout(measurer).plot
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use storyviz_core::MarkId;

    use super::*;
    use crate::scale::{ScaleCategorySpec, ScaleLinearSpec};
    use crate::{HeuristicTextMeasurer, LegendItem, LegendOrient};

    #[test]
    fn series_see_the_same_plot_as_the_axes() {
        let chart = ChartSpec::new(Size::new(800.0, 600.0))
            .with_title(TitleSpec::new(MarkId::from_raw(1), "Rooms"))
            .with_axis_bottom(AxisSpec::bottom(100, ScaleCategorySpec::new(vec!["a", "b"])))
            .with_axis_left(AxisSpec::left(200_000, ScaleLinearSpec::new((0.0, 50.0))))
            .with_legend(
                LegendSwatchesSpec::new(
                    300_000,
                    vec![LegendItem::solid("a", peniko::color::palette::css::RED)],
                ),
                LegendPlacement::new(LegendOrient::TopRight),
            );
        let mut seen = None;
        let (layout, marks) = chart.marks(&HeuristicTextMeasurer, |_, layout| {
            seen = Some(layout.plot);
            Vec::new()
        });
        assert_eq!(seen, Some(layout.plot));
        assert!(layout.plot.x0 > 10.0);
        assert!(layout.plot.y0 > 10.0);
        assert!(marks.iter().any(|m| m.id == MarkId::from_raw(1)));
        assert!(marks.iter().any(|m| m.id == MarkId::from_raw(300_000)));
        assert_eq!(chart.plot(&HeuristicTextMeasurer), layout.plot);
    }
}
