// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbol helpers for point-like marks.

use kurbo::{BezPath, Circle, Rect, Shape};

/// Point glyph shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// An axis-aligned square.
    Square,
    /// A circle.
    Circle,
}

impl Symbol {
    /// Returns a path for this symbol centered at `cx, cy`, using `size` as the diameter/side.
    pub fn path(self, cx: f64, cy: f64, size: f64) -> BezPath {
        let half = size * 0.5;
        match self {
            Self::Square => Rect::new(cx - half, cy - half, cx + half, cy + half).to_path(0.1),
            Self::Circle => Circle::new((cx, cy), half).to_path(0.1),
        }
    }
}
