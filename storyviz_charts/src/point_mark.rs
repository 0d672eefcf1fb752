// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Brush;
use storyviz_core::{HoverStyle, Mark, MarkId};

use crate::scale::ScaleLinear;
use crate::symbol::Symbol;

/// One point in data units.
#[derive(Clone, Debug)]
pub struct PointDatum {
    /// Stable key for mark identity within the spec's namespace.
    pub row_key: u64,
    /// Data x.
    pub x: f64,
    /// Data y.
    pub y: f64,
    /// Glyph fill.
    pub fill: Brush,
    /// Tooltip shown on hover.
    pub tooltip: Option<String>,
}

/// A scatter of point glyphs.
///
/// Generates one mark per datum: a [`storyviz_core::MarkKind::Rect`] for
/// [`Symbol::Square`], a path otherwise.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Id namespace for the generated marks.
    pub namespace: u64,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleLinear,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleLinear,
    /// Glyph size (diameter or side) in scene coordinates.
    pub size: f64,
    /// The point glyph shape.
    pub symbol: Symbol,
    /// Optional hover style for every point.
    pub hover: Option<HoverStyle>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a point mark spec with circles of size 6.
    pub fn new(namespace: u64, x_scale: ScaleLinear, y_scale: ScaleLinear) -> Self {
        Self {
            namespace,
            x_scale,
            y_scale,
            size: 6.0,
            symbol: Symbol::Circle,
            hover: None,
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Sets the glyph size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Sets the symbol shape.
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = symbol;
        self
    }

    /// Sets a hover style for every point.
    pub fn with_hover(mut self, hover: HoverStyle) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates marks for `data`.
    pub fn marks(&self, data: &[PointDatum]) -> Vec<Mark> {
        let half = 0.5 * self.size;
        data.iter()
            .map(|d| {
                let x = self.x_scale.map(d.x);
                let y = self.y_scale.map(d.y);
                let b = Mark::builder(MarkId::for_row(self.namespace, d.row_key))
                    .z_index(self.z_index)
                    .fill(d.fill.clone());
                let mut b = match self.symbol {
                    Symbol::Square => b
                        .rect()
                        .x(x - half)
                        .y(y - half)
                        .w(self.size)
                        .h(self.size),
                    Symbol::Circle => b.path().geometry(self.symbol.path(x, y, self.size)),
                };
                if let Some(t) = &d.tooltip {
                    b = b.tooltip(t.clone());
                }
                if let Some(h) = &self.hover {
                    b = b.hover(h.clone());
                }
                b.build()
            })
            .collect()
    }
}
