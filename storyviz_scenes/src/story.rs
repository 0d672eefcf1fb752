// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene identity and navigation.
//!
//! The active scene is a single [`SceneId`]; which scene is visible is derived from it, never
//! stored separately.

use std::fmt;

use storyviz_core::Action;

/// One of the seven scenes, in story order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SceneId {
    /// Scene 1: introduction.
    #[default]
    Intro,
    /// Scene 2: listings per state on a map.
    Map,
    /// Scene 3: average price per state.
    AveragePrice,
    /// Scene 4: price against number of reviews.
    PriceVsReviews,
    /// Scene 5: listings per room type.
    RoomTypes,
    /// Scene 6: listings and hosts per year.
    YearlyActivity,
    /// Scene 7: price distribution per state.
    PriceDistribution,
}

impl SceneId {
    /// All scenes in story order.
    pub const ALL: [Self; 7] = [
        Self::Intro,
        Self::Map,
        Self::AveragePrice,
        Self::PriceVsReviews,
        Self::RoomTypes,
        Self::YearlyActivity,
        Self::PriceDistribution,
    ];

    /// 1-based position in the story.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// The scene at 1-based position `n`.
    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// The container id used in the HTML report (`scene1` … `scene7`).
    pub fn element_id(self) -> String {
        format!("scene{}", self.number())
    }

    /// The following scene, if any.
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding scene, if any.
    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    /// Whether the scene renders data (everything but the introduction).
    pub fn needs_data(self) -> bool {
        self != Self::Intro
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene{}", self.number())
    }
}

/// A user command, carried by button marks as an [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Go to the next scene.
    Next,
    /// Go to the previous scene.
    Previous,
    /// Scene 7: show the previous state.
    PreviousCategory,
    /// Scene 7: show the next state.
    NextCategory,
}

impl Command {
    /// The action code a button carries for this command.
    pub fn action(self) -> Action {
        Action(match self {
            Self::Next => 1,
            Self::Previous => 2,
            Self::PreviousCategory => 3,
            Self::NextCategory => 4,
        })
    }

    /// Decodes a clicked action.
    pub fn from_action(action: Action) -> Option<Self> {
        match action.0 {
            1 => Some(Self::Next),
            2 => Some(Self::Previous),
            3 => Some(Self::PreviousCategory),
            4 => Some(Self::NextCategory),
            _ => None,
        }
    }
}

/// A keyboard key the story listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// The right arrow.
    ArrowRight,
    /// Anything else.
    Other,
}

/// Navigation state: the active scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Story {
    active: SceneId,
}

impl Story {
    /// A story showing scene 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active scene.
    pub fn active(&self) -> SceneId {
        self.active
    }

    /// Whether `id` is visible. Exactly one scene is.
    pub fn visible(&self, id: SceneId) -> bool {
        self.active == id
    }

    /// Applies a navigation command, returning the newly active scene if it changed.
    ///
    /// Next and Previous stop at the ends of the story. Category commands do not navigate.
    pub fn navigate(&mut self, command: Command) -> Option<SceneId> {
        let target = match command {
            Command::Next => self.active.next(),
            Command::Previous => self.active.previous(),
            Command::PreviousCategory | Command::NextCategory => None,
        }?;
        self.active = target;
        Some(target)
    }

    /// Maps a key press to a command. The right arrow advances from scene 1 only.
    pub fn key_command(&self, key: Key) -> Option<Command> {
        match (key, self.active) {
            (Key::ArrowRight, SceneId::Intro) => Some(Command::Next),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut story = Story::new();
        assert_eq!(story.active(), SceneId::Intro);
        assert_eq!(story.navigate(Command::Previous), None);
        assert_eq!(story.active(), SceneId::Intro);
        for _ in 0..6 {
            assert!(story.navigate(Command::Next).is_some());
        }
        assert_eq!(story.active(), SceneId::PriceDistribution);
        assert_eq!(story.navigate(Command::Next), None);
        assert_eq!(story.navigate(Command::Previous), Some(SceneId::YearlyActivity));
    }

    #[test]
    fn exactly_one_scene_is_visible() {
        let mut story = Story::new();
        story.navigate(Command::Next);
        let visible: Vec<_> = SceneId::ALL
            .into_iter()
            .filter(|id| story.visible(*id))
            .collect();
        assert_eq!(visible, vec![SceneId::Map]);
    }

    #[test]
    fn arrow_right_only_from_the_introduction() {
        let mut story = Story::new();
        assert_eq!(story.key_command(Key::ArrowRight), Some(Command::Next));
        assert_eq!(story.key_command(Key::Other), None);
        story.navigate(Command::Next);
        assert_eq!(story.key_command(Key::ArrowRight), None);
    }

    #[test]
    fn commands_round_trip_through_actions() {
        for c in [
            Command::Next,
            Command::Previous,
            Command::PreviousCategory,
            Command::NextCategory,
        ] {
            assert_eq!(Command::from_action(c.action()), Some(c));
        }
        assert_eq!(Command::from_action(Action(99)), None);
        assert_eq!(SceneId::from_number(0), None);
        assert_eq!(SceneId::from_number(7), Some(SceneId::PriceDistribution));
        assert_eq!(SceneId::Map.element_id(), "scene2");
    }
}
