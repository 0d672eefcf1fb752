// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained mark tree for `storyviz`.
//!
//! Chart code produces a flat list of [`Mark`]s every time a scene renders. A [`Scene`]
//! remembers the previous list and turns the new one into keyed [`MarkDiff`]s:
//! - **Enter** for ids it has not seen,
//! - **Update** for ids whose payload, z-index, or interaction changed,
//! - **Exit** for ids that disappeared.
//!
//! Renderers (the SVG writer, a test harness) apply those diffs to their own retained
//! state. Hover and click are declarative [`Interaction`] bindings on marks; the scene
//! resolves pointer positions against its retained marks, so handlers never capture
//! chart state.

#![no_std]

extern crate alloc;

mod id;
mod interaction;
mod mark;
mod scene;

pub use id::MarkId;
pub use interaction::{Action, HoverState, HoverStyle, Interaction};
pub use mark::{
    Mark, MarkBuilder, MarkKind, MarkPayload, PathPayload, RectPayload, TextAnchor, TextBaseline,
    TextPayload,
};
pub use scene::{MarkDiff, PointerUpdate, Scene};
