// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small measure/arrange layout helper for charts.
//!
//! - **Measure**: guides (title, axes, legend) report their desired thickness.
//! - **Arrange**: the plot rectangle takes whatever the view has left, and guides are
//!   placed around it.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Where a legend goes relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendOrient {
    /// Outside the plot, to the right of it.
    Right,
    /// Outside the plot, below the bottom axis.
    Bottom,
    /// Inside the upper-right corner of the plot.
    TopRight,
    /// Explicit coordinates.
    None,
}

/// Legend placement options (orientation + offset).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendPlacement {
    /// Legend orientation.
    pub orient: LegendOrient,
    /// Offset away from the plot and axes (or inward for corners).
    pub offset: f64,
    /// Explicit x position, used only when `orient` is `None`.
    pub x: f64,
    /// Explicit y position, used only when `orient` is `None`.
    pub y: f64,
}

impl Default for LegendPlacement {
    fn default() -> Self {
        Self {
            orient: LegendOrient::Right,
            offset: 18.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl LegendPlacement {
    /// A placement with the given orientation and the default offset.
    pub fn new(orient: LegendOrient) -> Self {
        Self {
            orient,
            ..Self::default()
        }
    }

    /// An explicit placement at `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            orient: LegendOrient::None,
            offset: 0.0,
            x,
            y,
        }
    }

    /// Sets the offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

/// Layout inputs for a single chart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayoutSpec {
    /// Chart title thickness, reserved above the plot.
    pub title_top: Option<f64>,
    /// Outer chart bounds; the plot gets what remains after guides and padding.
    pub view_size: Size,
    /// Padding around the whole chart (applied on all sides).
    pub outer_padding: f64,
    /// Left axis thickness, if any.
    pub axis_left: Option<f64>,
    /// Bottom axis thickness, if any.
    pub axis_bottom: Option<f64>,
    /// Extra space reserved above the plot (below the title), for controls.
    pub header: f64,
    /// An optional legend, given by its desired size and placement.
    pub legend: Option<(Size, LegendPlacement)>,
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// Reserved rectangle for the chart title (if any).
    pub title_top: Option<Rect>,
    /// Reserved rectangle for controls between title and plot (empty if none).
    pub header: Rect,
    /// The plot (data) rectangle.
    pub plot: Rect,
    /// Reserved rectangle for the left axis (if any).
    pub axis_left: Option<Rect>,
    /// Reserved rectangle for the bottom axis (if any).
    pub axis_bottom: Option<Rect>,
    /// Legend placement rectangle (if any).
    pub legend: Option<Rect>,
}

impl ChartLayout {
    /// Computes a layout from the provided specification.
    pub fn arrange(spec: &ChartLayoutSpec) -> Self {
        let pad = spec.outer_padding.max(0.0);
        let title_h = spec.title_top.unwrap_or(0.0).max(0.0);
        let header_h = spec.header.max(0.0);
        let axis_left_w = spec.axis_left.unwrap_or(0.0).max(0.0);
        let axis_bottom_h = spec.axis_bottom.unwrap_or(0.0).max(0.0);

        let margin_left = pad + axis_left_w;
        let mut margin_right = pad;
        let margin_top = pad + title_h + header_h;
        let mut margin_bottom = pad + axis_bottom_h;

        if let Some((size, placement)) = spec.legend {
            match placement.orient {
                LegendOrient::Right => {
                    margin_right += size.width.max(0.0) + placement.offset.max(0.0);
                }
                LegendOrient::Bottom => {
                    margin_bottom += size.height.max(0.0) + placement.offset.max(0.0);
                }
                LegendOrient::TopRight | LegendOrient::None => {}
            }
        }

        let view = Rect::new(
            0.0,
            0.0,
            spec.view_size.width.max(0.0),
            spec.view_size.height.max(0.0),
        );
        let plot_w = (view.width() - margin_left - margin_right).max(0.0);
        let plot_h = (view.height() - margin_top - margin_bottom).max(0.0);
        let plot = Rect::new(
            margin_left,
            margin_top,
            margin_left + plot_w,
            margin_top + plot_h,
        );

        let axis_left = (axis_left_w > 0.0)
            .then(|| Rect::new(plot.x0 - axis_left_w, plot.y0, plot.x0, plot.y1));
        let axis_bottom = (axis_bottom_h > 0.0)
            .then(|| Rect::new(plot.x0, plot.y1, plot.x1, plot.y1 + axis_bottom_h));

        let legend = spec.legend.map(|(size, placement)| {
            let w = size.width.max(0.0);
            let h = size.height.max(0.0);
            let offset = placement.offset.max(0.0);
            match placement.orient {
                LegendOrient::Right => {
                    Rect::new(plot.x1 + offset, plot.y0, plot.x1 + offset + w, plot.y0 + h)
                }
                LegendOrient::Bottom => {
                    let y0 = plot.y1 + axis_bottom_h + offset;
                    Rect::new(plot.x0, y0, plot.x0 + w, y0 + h)
                }
                LegendOrient::TopRight => Rect::new(
                    plot.x1 - offset - w,
                    plot.y0 + offset,
                    plot.x1 - offset,
                    plot.y0 + offset + h,
                ),
                LegendOrient::None => {
                    Rect::new(placement.x, placement.y, placement.x + w, placement.y + h)
                }
            }
        });

        let title_top =
            (title_h > 0.0).then(|| Rect::new(0.0, pad, view.x1, pad + title_h));
        let header = Rect::new(plot.x0, pad + title_h, plot.x1, pad + title_h + header_h);

        Self {
            view,
            title_top,
            header,
            plot,
            axis_left,
            axis_bottom,
            legend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guides_take_space_from_the_view() {
        let spec = ChartLayoutSpec {
            title_top: Some(20.0),
            view_size: Size::new(800.0, 600.0),
            outer_padding: 10.0,
            axis_left: Some(30.0),
            axis_bottom: Some(18.0),
            header: 0.0,
            legend: Some((
                Size::new(50.0, 40.0),
                LegendPlacement::new(LegendOrient::Right).with_offset(5.0),
            )),
        };
        let layout = ChartLayout::arrange(&spec);
        let title = layout.title_top.expect("missing title rect");
        assert_eq!((title.y0, title.y1), (10.0, 30.0));
        assert_eq!(layout.plot, Rect::new(40.0, 30.0, 735.0, 572.0));
        assert_eq!(layout.axis_bottom, Some(Rect::new(40.0, 572.0, 735.0, 590.0)));
        assert_eq!(layout.legend, Some(Rect::new(740.0, 30.0, 790.0, 70.0)));
    }

    #[test]
    fn corner_legend_sits_inside_the_plot() {
        let spec = ChartLayoutSpec {
            view_size: Size::new(200.0, 100.0),
            legend: Some((
                Size::new(20.0, 10.0),
                LegendPlacement::new(LegendOrient::TopRight).with_offset(4.0),
            )),
            ..ChartLayoutSpec::default()
        };
        let layout = ChartLayout::arrange(&spec);
        assert_eq!(layout.plot, Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(layout.legend, Some(Rect::new(176.0, 4.0, 196.0, 14.0)));
        assert!(layout.title_top.is_none());
    }
}
