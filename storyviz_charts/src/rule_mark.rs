// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight stroked segments: axis domain lines, ticks, and gridlines.

use kurbo::{BezPath, Point};
use peniko::{Brush, Color};
use storyviz_core::{Mark, MarkId};

/// A segment from `from` to `to`, stroked with `stroke` and never filled.
pub(crate) fn rule_mark(
    id: MarkId,
    from: Point,
    to: Point,
    stroke: &Brush,
    stroke_width: f64,
    z_index: i32,
) -> Mark {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    Mark::builder(id)
        .path()
        .geometry(path)
        .z_index(z_index)
        .fill(Color::TRANSPARENT)
        .stroke(stroke.clone())
        .stroke_width(stroke_width)
        .build()
}
