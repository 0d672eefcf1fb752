// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-index layers of chart marks, back to front.
//!
//! Hit-testing prefers higher layers, so interactive series sit above regions and controls
//! above everything.

/// Gridlines drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Filled regions (choropleth states).
pub const REGIONS: i32 = -10;
/// Filled series marks (bars).
pub const SERIES_FILL: i32 = 0;
/// Point series marks drawn above bars and rules.
pub const SERIES_POINTS: i32 = 20;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;

/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
/// Chart-level titles and narrative text.
pub const TITLES: i32 = 80;
/// Navigation controls.
pub const CONTROLS: i32 = 90;
