// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A seven-scene narrative visualization of US Airbnb listings.
//!
//! The story opens on an introduction and steps through six charts:
//! 1. the introduction,
//! 2. listings per state on a map,
//! 3. average price for the top states,
//! 4. price against reviews,
//! 5. listings per room type,
//! 6. listings and hosts per year,
//! 7. the price distribution of one state at a time.
//!
//! A [`SceneController`] owns navigation. Each activation shows the scene shell (title and
//! buttons), loads the data through [`storyviz_data`], and renders the scene's marks into a
//! retained [`storyviz_core::Scene`]. Results that arrive after the user moved on are
//! dropped. Output is SVG per scene plus an HTML page holding the whole story.

pub mod config;
mod controller;
mod cursor;
mod error;
mod html;
mod output;
pub mod scenes;
mod story;
mod svg;

pub use config::{CanvasSize, ConfigError, StoryConfig};
pub use controller::{RenderOutcome, RenderTicket, SceneController, SceneData};
pub use cursor::CategoryCursor;
pub use error::StoryError;
pub use html::{Section, render_report};
pub use output::{render_story, write_file, write_story};
pub use story::{Command, Key, SceneId, Story};
pub use svg::{SvgDocument, escape_xml};
