// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative pointer bindings carried by marks.

extern crate alloc;

use alloc::string::String;

use kurbo::{Affine, Point};
use peniko::Brush;

use crate::mark::MarkPayload;

/// An opaque click command.
///
/// The chart layer attaches actions to marks (navigation buttons, for example); the owner of
/// the [`crate::Scene`] decides what an action means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Action(pub u32);

/// Visual override applied while the pointer is over a mark.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverStyle {
    /// Replacement fill.
    pub fill: Option<Brush>,
    /// Uniform scale factor about the mark's center (`1.0` keeps the size).
    pub grow: f64,
}

impl Default for HoverStyle {
    fn default() -> Self {
        Self {
            fill: None,
            grow: 1.0,
        }
    }
}

impl HoverStyle {
    /// Sets the replacement fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Sets the grow factor.
    pub fn with_grow(mut self, grow: f64) -> Self {
        self.grow = grow;
        self
    }

    /// Returns `payload` with this style applied.
    pub fn apply(&self, payload: &MarkPayload) -> MarkPayload {
        let mut out = payload.clone();
        let center = payload.bounds().map(|b| b.center());
        match &mut out {
            MarkPayload::Rect(r) => {
                if let Some(fill) = &self.fill {
                    r.fill = fill.clone();
                }
                if self.grow != 1.0 {
                    let c = r.rect.center();
                    let hw = 0.5 * r.rect.width() * self.grow;
                    let hh = 0.5 * r.rect.height() * self.grow;
                    r.rect = kurbo::Rect::new(c.x - hw, c.y - hh, c.x + hw, c.y + hh);
                }
            }
            MarkPayload::Path(p) => {
                if let Some(fill) = &self.fill {
                    p.fill = fill.clone();
                }
                if let (Some(c), true) = (center, self.grow != 1.0) {
                    let about = Affine::translate(c.to_vec2())
                        * Affine::scale(self.grow)
                        * Affine::translate(-c.to_vec2());
                    p.path.apply_affine(about);
                }
            }
            MarkPayload::Text(t) => {
                if let Some(fill) = &self.fill {
                    t.fill = fill.clone();
                }
                if self.grow != 1.0 {
                    t.font_size *= self.grow;
                }
            }
        }
        out
    }
}

/// Pointer bindings for a single mark.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interaction {
    /// Tooltip text shown while hovering. Lines are separated by `\n`.
    pub tooltip: Option<String>,
    /// Style override while hovering.
    pub hover: Option<HoverStyle>,
    /// Command emitted on click.
    pub action: Option<Action>,
}

impl Interaction {
    /// Returns `true` if the mark has no pointer bindings and is skipped by hit-testing.
    pub fn is_inert(&self) -> bool {
        self.tooltip.is_none() && self.hover.is_none() && self.action.is_none()
    }
}

/// The resolved hover target after a pointer move.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverState {
    /// The mark under the pointer.
    pub mark: crate::MarkId,
    /// Tooltip text, if the mark has one.
    pub tooltip: Option<String>,
    /// Where the tooltip box is anchored: the pointer position shifted up by 28 units.
    pub anchor: Point,
}
