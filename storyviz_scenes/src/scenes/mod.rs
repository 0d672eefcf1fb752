// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene builders.
//!
//! Each builder turns listing records into the complete mark list of one scene: its chart,
//! its title, and its navigation buttons. [`shell`] is what a scene shows before (or
//! instead of) its data: the title and the navigation only.

mod average_price;
mod intro;
mod map;
mod price_distribution;
mod price_reviews;
mod room_types;
mod yearly_activity;

pub use average_price::average_price;
pub use intro::intro;
pub use map::map;
pub use price_distribution::{price_distribution, price_states};
pub use price_reviews::price_vs_reviews;
pub use room_types::{ROOM_TYPE_ORDER, room_types};
pub use yearly_activity::yearly_activity;

use storyviz_charts::{
    ButtonSpec, ChartLayout, ChartSpec, HeuristicTextMeasurer, Size, TitleSpec,
};
use storyviz_core::{Mark, MarkId};

use crate::config::StoryConfig;
use crate::story::{Command, SceneId};

/// Scene title.
pub(crate) const TITLE: MarkId = MarkId::from_raw(1);
const NAV_PREVIOUS: u64 = 10;
const NAV_NEXT: u64 = 12;
pub(crate) const CATEGORY_PREVIOUS: u64 = 14;
pub(crate) const CATEGORY_NEXT: u64 = 16;
pub(crate) const AXIS_X: u64 = 100_000;
pub(crate) const AXIS_Y: u64 = 200_000;
pub(crate) const LEGEND: u64 = 300_000;

const CONTROLS_X: f64 = 20.0;
const CONTROLS_GAP: f64 = 8.0;

/// Layout inputs shared by all scenes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParams {
    /// Canvas of the chart scenes.
    pub chart_size: Size,
    /// Canvas of the map scene.
    pub map_size: Size,
    /// States shown by the average price scene.
    pub top_n: usize,
    /// Requested histogram threshold count.
    pub histogram_thresholds: usize,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self::from(&StoryConfig::default())
    }
}

impl From<&StoryConfig> for SceneParams {
    fn from(config: &StoryConfig) -> Self {
        Self {
            chart_size: config.chart_size.size(),
            map_size: config.map_size.size(),
            top_n: config.top_n,
            histogram_thresholds: config.histogram_thresholds,
        }
    }
}

impl SceneParams {
    /// The canvas of `id`.
    pub fn view_size(&self, id: SceneId) -> Size {
        match id {
            SceneId::Map => self.map_size,
            _ => self.chart_size,
        }
    }
}

/// The static title of a scene.
pub fn title_text(id: SceneId) -> &'static str {
    match id {
        SceneId::Intro => "Airbnb Listing Analysis and Trends",
        SceneId::Map => "Geographic distribution of Listings",
        SceneId::AveragePrice => "State-wise Average Price of Listings",
        SceneId::PriceVsReviews => "Relationship between Price and Number of Reviews",
        SceneId::RoomTypes => "Breakdown of Listings by Room Type",
        SceneId::YearlyActivity => "Yearly Airbnb Listings and Hosts",
        SceneId::PriceDistribution => "Price Distribution",
    }
}

/// The scene before its data arrives: title and navigation.
pub fn shell(id: SceneId, params: &SceneParams) -> Vec<Mark> {
    if id == SceneId::Intro {
        return intro(params);
    }
    let chart = base_chart(id, params, title_text(id));
    let layout = chart.layout(&MEASURER);
    let mut marks = chart.guide_marks(&MEASURER, &layout);
    marks.extend(controls(id, &layout, &[]));
    marks
}

pub(crate) const MEASURER: HeuristicTextMeasurer = HeuristicTextMeasurer;

/// A chart with the scene's title and a control strip below it.
pub(crate) fn base_chart(id: SceneId, params: &SceneParams, title: impl Into<String>) -> ChartSpec {
    let title = TitleSpec::new(TITLE, title);
    let title = if id == SceneId::Map {
        title.with_font_size(22.0)
    } else {
        title
    };
    ChartSpec::new(params.view_size(id))
        .with_title(title)
        .with_header(header_height())
}

fn header_height() -> f64 {
    let (_, h) = ButtonSpec::new(0, "Next", Command::Next.action()).measure(&MEASURER);
    h + 2.0 * CONTROLS_GAP
}

/// Navigation buttons in the layout's header strip, followed by `extra` buttons.
pub(crate) fn controls(id: SceneId, layout: &ChartLayout, extra: &[ButtonSpec]) -> Vec<Mark> {
    let mut buttons = Vec::new();
    if id.previous().is_some() {
        buttons.push(ButtonSpec::new(
            NAV_PREVIOUS,
            "Previous",
            Command::Previous.action(),
        ));
    }
    if id.next().is_some() {
        buttons.push(ButtonSpec::new(NAV_NEXT, "Next", Command::Next.action()));
    }
    buttons.extend(extra.iter().cloned());
    button_row(&buttons, CONTROLS_X, layout.header.y0 + CONTROLS_GAP)
}

/// Lays buttons out left to right starting at `(x, y)`.
pub(crate) fn button_row(buttons: &[ButtonSpec], x: f64, y: f64) -> Vec<Mark> {
    let mut out = Vec::new();
    let mut x = x;
    for button in buttons {
        out.extend(button.marks(&MEASURER, x, y));
        x += button.measure(&MEASURER).0 + CONTROLS_GAP;
    }
    out
}

#[cfg(test)]
pub(crate) mod test_data {
    use storyviz_data::ListingRecord;

    pub(crate) fn listing(
        state: &str,
        price: f64,
        reviews: f64,
        room_type: &str,
        host: &str,
        year: Option<i32>,
    ) -> ListingRecord {
        ListingRecord {
            state: Some(state.to_string()),
            price: Some(price),
            number_of_reviews: Some(reviews),
            room_type: Some(room_type.to_string()),
            host_id: Some(host.to_string()),
            last_review: year.and_then(|y| chrono::NaiveDate::from_ymd_opt(y, 6, 1)),
        }
    }

    pub(crate) fn sample() -> Vec<ListingRecord> {
        vec![
            listing("California", 100.0, 3.0, "Entire home/apt", "h1", Some(2019)),
            listing("California", 300.0, 0.0, "Private room", "h2", None),
            listing("New York", 200.0, 12.0, "Private room", "h1", Some(2020)),
            listing("New York", 150.0, 4.0, "Shared room", "h3", Some(2020)),
            listing("Texas", 50.0, 1.0, "Entire home/apt", "h4", Some(2019)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use storyviz_core::MarkPayload;

    use super::*;

    fn text_of(marks: &[Mark], id: MarkId) -> Option<String> {
        marks.iter().find(|m| m.id == id).and_then(|m| match &m.payload {
            MarkPayload::Text(t) => Some(t.text.clone()),
            _ => None,
        })
    }

    #[test]
    fn shell_is_title_and_navigation() {
        let params = SceneParams::default();
        let marks = shell(SceneId::AveragePrice, &params);
        assert_eq!(
            text_of(&marks, TITLE).as_deref(),
            Some("State-wise Average Price of Listings")
        );
        let actions: Vec<_> = marks.iter().filter_map(|m| m.interaction.action).collect();
        assert_eq!(
            actions,
            vec![Command::Previous.action(), Command::Next.action()]
        );
    }

    #[test]
    fn last_scene_has_no_next_button() {
        let marks = shell(SceneId::PriceDistribution, &SceneParams::default());
        assert!(
            marks
                .iter()
                .all(|m| m.interaction.action != Some(Command::Next.action()))
        );
    }
}
