// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle mark generation.

extern crate alloc;

use alloc::string::String;

use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;
use storyviz_core::{Action, HoverStyle, Mark, MarkId};

/// A rectangle mark spec.
#[derive(Clone, Debug)]
pub struct RectMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Rectangle geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint and width.
    pub stroke: Option<(Brush, f64)>,
    /// Tooltip shown on hover.
    pub tooltip: Option<String>,
    /// Style applied on hover.
    pub hover: Option<HoverStyle>,
    /// Command emitted on click.
    pub action: Option<Action>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl RectMarkSpec {
    /// Creates a new rectangle mark spec.
    pub fn new(id: MarkId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            fill: css::BLACK.into(),
            stroke: None,
            tooltip: None,
            hover: None,
            action: None,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        self.stroke = Some((stroke.into(), width));
        self
    }

    /// Attaches a tooltip.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Attaches a hover style.
    pub fn with_hover(mut self, hover: HoverStyle) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Attaches a click action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mut b = Mark::builder(self.id)
            .rect()
            .z_index(self.z_index)
            .rect_geometry(self.rect)
            .fill(self.fill.clone());
        if let Some((stroke, width)) = &self.stroke {
            b = b.stroke(stroke.clone()).stroke_width(*width);
        }
        if let Some(t) = &self.tooltip {
            b = b.tooltip(t.clone());
        }
        if let Some(h) = &self.hover {
            b = b.hover(h.clone());
        }
        if let Some(a) = self.action {
            b = b.action(a);
        }
        b.build()
    }
}
