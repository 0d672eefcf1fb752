// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks and their resolved payloads.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};

use crate::MarkId;
use crate::interaction::{Action, HoverStyle, Interaction};

/// The kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// An axis-aligned rectangle.
    Rect,
    /// A single line of unshaped text.
    Text,
    /// An arbitrary path (lines, symbols, regions).
    Path,
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor point is the vertical middle of the line.
    Middle,
    /// The anchor point is the alphabetic baseline.
    Alphabetic,
    /// The anchor point is the top of the line.
    Hanging,
    /// The anchor point is the ideographic baseline.
    Ideographic,
}

/// Resolved rectangle payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// Resolved text payload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Font weight (`400` normal, `700` bold).
    pub font_weight: u16,
    /// Fill paint.
    pub fill: Brush,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Rotation in degrees about `pos`.
    pub angle: f64,
}

/// Resolved path payload.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// A resolved mark payload.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// Rectangle.
    Rect(RectPayload),
    /// Text.
    Text(TextPayload),
    /// Path.
    Path(PathPayload),
}

impl MarkPayload {
    /// Returns the mark kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Text(_) => MarkKind::Text,
            Self::Path(_) => MarkKind::Path,
        }
    }

    /// Returns approximate bounds in scene coordinates.
    ///
    /// Text bounds use a 0.6em average glyph width; empty paths have no bounds.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect.abs()),
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    None
                } else {
                    Some(p.path.bounding_box())
                }
            }
            Self::Text(t) => Some(estimate_text_bounds(t)),
        }
    }

    /// Returns `true` if `pt` lies inside the painted area of this payload.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Rect(r) => r.rect.abs().contains(pt),
            Self::Path(p) => p.path.contains(pt),
            Self::Text(t) => estimate_text_bounds(t).contains(pt),
        }
    }
}

fn estimate_text_bounds(t: &TextPayload) -> Rect {
    let width = 0.6 * t.font_size * t.text.chars().count() as f64;
    let half_height = 0.5 * t.font_size;
    let y_mid = match t.baseline {
        TextBaseline::Middle => t.pos.y,
        TextBaseline::Alphabetic => t.pos.y - 0.3 * t.font_size,
        TextBaseline::Hanging => t.pos.y + 0.3 * t.font_size,
        TextBaseline::Ideographic => t.pos.y - 0.2 * t.font_size,
    };
    let (x0, x1) = match t.anchor {
        TextAnchor::Start => (t.pos.x, t.pos.x + width),
        TextAnchor::Middle => (t.pos.x - 0.5 * width, t.pos.x + 0.5 * width),
        TextAnchor::End => (t.pos.x - width, t.pos.x),
    };
    Rect::new(x0, y_mid - half_height, x1, y_mid + half_height)
}

/// A mark: identity, paint order, payload, and pointer bindings.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Paint order; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Resolved geometry and paint.
    pub payload: MarkPayload,
    /// Hover and click bindings.
    pub interaction: Interaction,
}

impl Mark {
    /// Starts building a mark with the given id.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder::new(id)
    }

    /// Returns the mark kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}

/// Fluent builder for [`Mark`].
///
/// The kind defaults to [`MarkKind::Rect`]; setters that do not apply to the chosen kind are
/// ignored by [`MarkBuilder::build`].
#[derive(Clone, Debug)]
pub struct MarkBuilder {
    id: MarkId,
    kind: MarkKind,
    z_index: i32,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    text: String,
    font_size: f64,
    font_weight: u16,
    anchor: TextAnchor,
    baseline: TextBaseline,
    angle: f64,
    path: BezPath,
    fill: Brush,
    stroke: Brush,
    stroke_width: f64,
    interaction: Interaction,
}

impl MarkBuilder {
    fn new(id: MarkId) -> Self {
        Self {
            id,
            kind: MarkKind::Rect,
            z_index: 0,
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
            text: String::new(),
            font_size: 12.0,
            font_weight: 400,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            angle: 0.0,
            path: BezPath::new(),
            fill: Brush::Solid(Color::BLACK),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
            interaction: Interaction::default(),
        }
    }

    /// Builds a rectangle mark.
    pub fn rect(mut self) -> Self {
        self.kind = MarkKind::Rect;
        self
    }

    /// Builds a text mark.
    pub fn text(mut self) -> Self {
        self.kind = MarkKind::Text;
        self
    }

    /// Builds a path mark.
    pub fn path(mut self) -> Self {
        self.kind = MarkKind::Path;
        self
    }

    /// Sets the paint order.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets x (rect origin or text anchor).
    pub fn x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Sets y (rect origin or text anchor).
    pub fn y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Sets the rect width.
    pub fn w(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    /// Sets the rect height.
    pub fn h(mut self, h: f64) -> Self {
        self.h = h;
        self
    }

    /// Sets the rect geometry in one go.
    pub fn rect_geometry(self, rect: Rect) -> Self {
        self.x(rect.x0).y(rect.y0).w(rect.width()).h(rect.height())
    }

    /// Sets the text content.
    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the font size.
    pub fn font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the font weight.
    pub fn font_weight(mut self, weight: u16) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the horizontal text anchor.
    pub fn text_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Shorthand for [`TextAnchor::Middle`].
    pub fn text_anchor_middle(self) -> Self {
        self.text_anchor(TextAnchor::Middle)
    }

    /// Sets the vertical text baseline.
    pub fn text_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the text rotation in degrees.
    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the path geometry.
    pub fn geometry(mut self, path: BezPath) -> Self {
        self.path = path;
        self
    }

    /// Sets the fill paint.
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the stroke paint.
    pub fn stroke(mut self, stroke: impl Into<Brush>) -> Self {
        self.stroke = stroke.into();
        self
    }

    /// Sets the stroke width.
    pub fn stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Attaches a tooltip.
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.interaction.tooltip = Some(tooltip.into());
        self
    }

    /// Attaches a hover style.
    pub fn hover(mut self, hover: HoverStyle) -> Self {
        self.interaction.hover = Some(hover);
        self
    }

    /// Attaches a click action.
    pub fn action(mut self, action: Action) -> Self {
        self.interaction.action = Some(action);
        self
    }

    /// Replaces all pointer bindings.
    pub fn interaction(mut self, interaction: Interaction) -> Self {
        self.interaction = interaction;
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        let payload = match self.kind {
            MarkKind::Rect => MarkPayload::Rect(RectPayload {
                rect: Rect::new(self.x, self.y, self.x + self.w, self.y + self.h),
                fill: self.fill,
                stroke: self.stroke,
                stroke_width: self.stroke_width,
            }),
            MarkKind::Text => MarkPayload::Text(TextPayload {
                pos: Point::new(self.x, self.y),
                text: self.text,
                font_size: self.font_size,
                font_weight: self.font_weight,
                fill: self.fill,
                anchor: self.anchor,
                baseline: self.baseline,
                angle: self.angle,
            }),
            MarkKind::Path => MarkPayload::Path(PathPayload {
                path: self.path,
                fill: self.fill,
                stroke: self.stroke,
                stroke_width: self.stroke_width,
            }),
        };
        Mark {
            id: self.id,
            z_index: self.z_index,
            payload,
            interaction: self.interaction,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn rect_builder_resolves_geometry_and_bounds() {
        let m = Mark::builder(MarkId(1))
            .rect()
            .x(10.0)
            .y(20.0)
            .w(30.0)
            .h(40.0)
            .build();
        assert_eq!(m.kind(), MarkKind::Rect);
        assert_eq!(m.payload.bounds(), Some(Rect::new(10.0, 20.0, 40.0, 60.0)));
        assert!(m.payload.contains(Point::new(15.0, 25.0)));
        assert!(!m.payload.contains(Point::new(5.0, 25.0)));
    }

    #[test]
    fn middle_anchored_text_bounds_are_centered() {
        let m = Mark::builder(MarkId(2))
            .text()
            .x(100.0)
            .y(50.0)
            .label("abcd")
            .font_size(10.0)
            .text_anchor_middle()
            .text_baseline(TextBaseline::Middle)
            .build();
        let b = m.payload.bounds().unwrap();
        assert!((b.center().x - 100.0).abs() < 1e-9);
        assert!((b.width() - 24.0).abs() < 1e-9);
    }
}
