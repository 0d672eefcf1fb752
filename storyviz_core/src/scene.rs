// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed reconciliation of mark lists and pointer resolution.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect};

use crate::interaction::{Action, HoverState, Interaction};
use crate::mark::{Mark, MarkKind, MarkPayload};
use crate::MarkId;

/// A change produced by [`Scene::tick`] or by pointer hover.
///
/// Payloads are the *displayed* payloads: a hovered mark carries its hover style.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark appeared.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Paint order.
        z_index: i32,
        /// Approximate bounds.
        bounds: Option<Rect>,
        /// Displayed payload.
        new: Box<MarkPayload>,
        /// Pointer bindings.
        interaction: Box<Interaction>,
    },
    /// A mark changed.
    Update {
        /// Mark id.
        id: MarkId,
        /// Mark kind (of the new payload).
        kind: MarkKind,
        /// Previous paint order.
        old_z_index: i32,
        /// New paint order.
        new_z_index: i32,
        /// Previous bounds.
        old_bounds: Option<Rect>,
        /// New bounds.
        new_bounds: Option<Rect>,
        /// Previously displayed payload.
        old: Box<MarkPayload>,
        /// Displayed payload.
        new: Box<MarkPayload>,
        /// Pointer bindings.
        interaction: Box<Interaction>,
    },
    /// A mark disappeared.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Last bounds.
        bounds: Option<Rect>,
        /// Last displayed payload.
        old: Box<MarkPayload>,
    },
}

impl MarkDiff {
    /// Returns the id of the affected mark.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

/// Result of [`Scene::pointer_move`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerUpdate {
    /// The hovered mark and its tooltip, if the pointer is over an interactive mark.
    pub hover: Option<HoverState>,
    /// Hover style changes to apply (restore the old target, style the new one).
    pub diffs: Vec<MarkDiff>,
}

#[derive(Clone, Debug)]
struct Entry {
    seq: u64,
    mark: Mark,
}

/// A retained set of marks.
#[derive(Debug, Default)]
pub struct Scene {
    entries: HashMap<MarkId, Entry>,
    next_seq: u64,
    hovered: Option<MarkId>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained marks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no marks are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a retained mark (without hover styling).
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.entries.get(&id).map(|e| &e.mark)
    }

    /// Returns the currently hovered mark.
    pub fn hovered(&self) -> Option<MarkId> {
        self.hovered
    }

    /// Returns retained marks sorted by `(z_index, id)`.
    pub fn paint_order(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.entries.values().map(|e| &e.mark).collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Reconciles `marks` against the retained set.
    ///
    /// If the same id appears more than once, the last occurrence wins.
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut order: Vec<MarkId> = Vec::new();
        let mut incoming: HashMap<MarkId, Mark> = HashMap::new();
        for mark in marks {
            if incoming.insert(mark.id, mark.clone()).is_none() {
                order.push(mark.id);
            }
        }

        let mut diffs = Vec::new();

        let mut gone: Vec<(u64, MarkId)> = self
            .entries
            .iter()
            .filter(|(id, _)| !incoming.contains_key(*id))
            .map(|(id, e)| (e.seq, *id))
            .collect();
        gone.sort_unstable();

        for id in order {
            let Some(mark) = incoming.remove(&id) else {
                continue;
            };
            match self.entries.get_mut(&id) {
                Some(entry) => {
                    if entry.mark == mark {
                        continue;
                    }
                    let hovered = self.hovered == Some(id);
                    let old = displayed(&entry.mark, hovered);
                    let new = displayed(&mark, hovered);
                    diffs.push(MarkDiff::Update {
                        id,
                        kind: mark.kind(),
                        old_z_index: entry.mark.z_index,
                        new_z_index: mark.z_index,
                        old_bounds: old.bounds(),
                        new_bounds: new.bounds(),
                        old: Box::new(old),
                        new: Box::new(new),
                        interaction: Box::new(mark.interaction.clone()),
                    });
                    entry.mark = mark;
                }
                None => {
                    diffs.push(MarkDiff::Enter {
                        id,
                        kind: mark.kind(),
                        z_index: mark.z_index,
                        bounds: mark.payload.bounds(),
                        new: Box::new(mark.payload.clone()),
                        interaction: Box::new(mark.interaction.clone()),
                    });
                    let seq = self.next_seq;
                    self.next_seq += 1;
                    self.entries.insert(id, Entry { seq, mark });
                }
            }
        }

        for (_, id) in gone {
            if let Some(entry) = self.entries.remove(&id) {
                let old = displayed(&entry.mark, self.hovered == Some(id));
                diffs.push(MarkDiff::Exit {
                    id,
                    kind: entry.mark.kind(),
                    bounds: old.bounds(),
                    old: Box::new(old),
                });
                if self.hovered == Some(id) {
                    self.hovered = None;
                }
            }
        }

        diffs
    }

    /// Removes every retained mark.
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        self.tick(core::iter::empty())
    }

    /// Returns the interactive mark under `pt`.
    ///
    /// Higher `z_index` wins; among equal `z_index` the mark that entered first wins.
    pub fn hit_test(&self, pt: Point) -> Option<MarkId> {
        self.hit_test_where(pt, |_| true)
    }

    fn hit_test_where(&self, pt: Point, accept: impl Fn(&Interaction) -> bool) -> Option<MarkId> {
        self.entries
            .iter()
            .filter(|(_, e)| !e.mark.interaction.is_inert() && accept(&e.mark.interaction))
            .filter(|(_, e)| e.mark.payload.contains(pt))
            .min_by_key(|(_, e)| (core::cmp::Reverse(e.mark.z_index), e.seq))
            .map(|(id, _)| *id)
    }

    /// Moves the pointer to `pt`, resolving hover target, tooltip, and hover styling.
    pub fn pointer_move(&mut self, pt: Point) -> PointerUpdate {
        let target = self.hit_test_where(pt, |i| i.tooltip.is_some() || i.hover.is_some());
        let diffs = self.set_hovered(target);
        let hover = target.and_then(|id| self.entries.get(&id)).map(|e| HoverState {
            mark: e.mark.id,
            tooltip: e.mark.interaction.tooltip.clone(),
            anchor: Point::new(pt.x, pt.y - 28.0),
        });
        PointerUpdate { hover, diffs }
    }

    /// The pointer left the scene.
    pub fn pointer_leave(&mut self) -> Vec<MarkDiff> {
        self.set_hovered(None)
    }

    /// Resolves a click at `pt` to the action of the topmost mark that has one.
    pub fn click(&self, pt: Point) -> Option<Action> {
        let id = self.hit_test_where(pt, |i| i.action.is_some())?;
        self.entries.get(&id)?.mark.interaction.action
    }

    fn set_hovered(&mut self, target: Option<MarkId>) -> Vec<MarkDiff> {
        if target == self.hovered {
            return Vec::new();
        }
        let mut diffs = Vec::new();
        let mut touched: HashSet<MarkId> = HashSet::new();
        if let Some(prev) = self.hovered {
            if let Some(e) = self.entries.get(&prev) {
                if let Some(d) = hover_diff(&e.mark, true, false) {
                    diffs.push(d);
                    touched.insert(prev);
                }
            }
        }
        if let Some(next) = target {
            if let Some(e) = self.entries.get(&next) {
                if !touched.contains(&next) {
                    if let Some(d) = hover_diff(&e.mark, false, true) {
                        diffs.push(d);
                    }
                }
            }
        }
        self.hovered = target;
        diffs
    }
}

fn displayed(mark: &Mark, hovered: bool) -> MarkPayload {
    match (&mark.interaction.hover, hovered) {
        (Some(style), true) => style.apply(&mark.payload),
        _ => mark.payload.clone(),
    }
}

fn hover_diff(mark: &Mark, was: bool, now: bool) -> Option<MarkDiff> {
    mark.interaction.hover.as_ref()?;
    let old = displayed(mark, was);
    let new = displayed(mark, now);
    if old == new {
        return None;
    }
    Some(MarkDiff::Update {
        id: mark.id,
        kind: mark.kind(),
        old_z_index: mark.z_index,
        new_z_index: mark.z_index,
        old_bounds: old.bounds(),
        new_bounds: new.bounds(),
        old: Box::new(old),
        new: Box::new(new),
        interaction: Box::new(mark.interaction.clone()),
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::Color;

    use super::*;
    use crate::interaction::HoverStyle;

    fn bar(id: u64, x: f64, h: f64) -> Mark {
        Mark::builder(MarkId(id))
            .rect()
            .x(x)
            .y(0.0)
            .w(10.0)
            .h(h)
            .tooltip("bar")
            .build()
    }

    #[test]
    fn tick_emits_enter_update_exit_by_identity() {
        let mut scene = Scene::new();
        let diffs = scene.tick(vec![bar(1, 0.0, 5.0), bar(2, 10.0, 5.0)]);
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));

        let diffs = scene.tick(vec![bar(2, 10.0, 8.0), bar(3, 20.0, 5.0)]);
        assert_eq!(diffs.len(), 3);
        assert!(matches!(diffs[0], MarkDiff::Update { id: MarkId(2), .. }));
        assert!(matches!(diffs[1], MarkDiff::Enter { id: MarkId(3), .. }));
        assert!(matches!(diffs[2], MarkDiff::Exit { id: MarkId(1), .. }));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn unchanged_marks_produce_no_diffs() {
        let mut scene = Scene::new();
        scene.tick(vec![bar(1, 0.0, 5.0)]);
        assert!(scene.tick(vec![bar(1, 0.0, 5.0)]).is_empty());
    }

    #[test]
    fn overlapping_equal_z_marks_resolve_to_first_entered() {
        let mut scene = Scene::new();
        scene.tick(vec![bar(7, 0.0, 10.0), bar(3, 0.0, 10.0)]);
        assert_eq!(scene.hit_test(Point::new(5.0, 5.0)), Some(MarkId(7)));
    }

    #[test]
    fn higher_z_index_wins_hit_test() {
        let mut scene = Scene::new();
        let low = bar(1, 0.0, 10.0);
        let mut high = bar(2, 0.0, 10.0);
        high.z_index = 5;
        scene.tick(vec![low, high]);
        assert_eq!(scene.hit_test(Point::new(5.0, 5.0)), Some(MarkId(2)));
    }

    #[test]
    fn inert_marks_are_not_hit() {
        let mut scene = Scene::new();
        scene.tick(vec![
            Mark::builder(MarkId(1))
                .rect()
                .w(10.0)
                .h(10.0)
                .build(),
        ]);
        assert_eq!(scene.hit_test(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn hover_styles_and_restores_through_diffs() {
        let mut scene = Scene::new();
        let point = Mark::builder(MarkId(1))
            .rect()
            .x(0.0)
            .y(0.0)
            .w(6.0)
            .h(6.0)
            .fill(Color::from_rgb8(0, 0, 255))
            .tooltip("Price: $10")
            .hover(HoverStyle::default().with_fill(Color::from_rgb8(255, 0, 0)).with_grow(2.0))
            .build();
        scene.tick(vec![point]);

        let update = scene.pointer_move(Point::new(3.0, 3.0));
        let hover = update.hover.expect("hovered");
        assert_eq!(hover.tooltip.as_deref(), Some("Price: $10"));
        assert_eq!(hover.anchor, Point::new(3.0, -25.0));
        assert_eq!(update.diffs.len(), 1);
        let MarkDiff::Update { new, .. } = &update.diffs[0] else {
            panic!("expected update");
        };
        assert_eq!(new.bounds(), Some(Rect::new(-3.0, -3.0, 9.0, 9.0)));

        // Staying on the same mark is a no-op.
        assert!(scene.pointer_move(Point::new(4.0, 4.0)).diffs.is_empty());

        let restore = scene.pointer_leave();
        assert_eq!(restore.len(), 1);
        assert_eq!(scene.hovered(), None);
    }

    #[test]
    fn click_resolves_action_of_button() {
        let mut scene = Scene::new();
        scene.tick(vec![
            Mark::builder(MarkId(1))
                .rect()
                .w(40.0)
                .h(20.0)
                .action(Action(9))
                .build(),
        ]);
        assert_eq!(scene.click(Point::new(10.0, 10.0)), Some(Action(9)));
        assert_eq!(scene.click(Point::new(100.0, 10.0)), None);
    }

    #[test]
    fn exiting_hovered_mark_clears_hover() {
        let mut scene = Scene::new();
        scene.tick(vec![bar(1, 0.0, 10.0)]);
        scene.pointer_move(Point::new(5.0, 5.0));
        assert_eq!(scene.hovered(), Some(MarkId(1)));
        scene.clear();
        assert_eq!(scene.hovered(), None);
        assert!(scene.is_empty());
    }
}
