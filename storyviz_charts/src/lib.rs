// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `storyviz` scenes.
//!
//! This crate sits between the aggregations in `storyviz_transforms` and the mark tree in
//! `storyviz_core`:
//! - **Scales** map data values into screen coordinates, and **color encodings** map them
//!   into paints.
//! - **Guides** (axes, legends, titles, buttons) and **series** (bars, points, regions)
//!   are generated as `storyviz_core::Mark`s with stable ids, so re-rendering a scene
//!   reconciles into small diffs.
//!
//! Text shaping is out of scope; text marks store unshaped strings and layout uses a
//! [`TextMeasurer`] for rough extents.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod axis;
mod bar_mark;
mod button;
mod chart_spec;
mod color;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod geo;
mod layout;
mod legend;
mod measure;
mod point_mark;
mod rect_mark;
mod rule_mark;
mod scale;
mod symbol;
mod text_mark;
mod title;
mod z_order;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, TickFormatter};
pub use bar_mark::{BarDatum, BarMarkSpec, BarOrient};
pub use button::ButtonSpec;
pub use chart_spec::{ChartSpec, LegendSpec};
pub use color::{
    BLUES, CATEGORY10, Interpolator, ScaleLinearColor, ScaleOrdinal, ScaleSequential, rgb_hex,
};
pub use format::{
    format_count, format_fixed, format_grouped, format_tick_with_step, precision_for_step,
};
pub use geo::{AlbersUsa, Polygon, RegionDatum, RegionMarkSpec, UsaPanel};
pub use layout::{ChartLayout, ChartLayoutSpec, LegendOrient, LegendPlacement, Size};
pub use legend::{GradientLegendSpec, LegendItem, LegendSwatchesSpec};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use point_mark::{PointDatum, PointMarkSpec};
pub use rect_mark::RectMarkSpec;
pub use scale::{
    ScaleBand, ScaleBandSpec, ScaleCategory, ScaleCategorySpec, ScaleLinear, ScaleLinearSpec,
    ScaleSpec,
};
pub use symbol::Symbol;
pub use text_mark::{TextMarkSpec, wrap_text};
pub use title::TitleSpec;
pub use z_order::*;
