// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene 7: price histogram of one state at a time.

use kurbo::Rect;
use storyviz_charts::{
    AxisSpec, ButtonSpec, RectMarkSpec, ScaleLinearSpec, format_count, format_fixed, rgb_hex,
};
use storyviz_core::{Mark, MarkId};
use storyviz_data::ListingRecord;
use storyviz_transforms::histogram;

use super::{
    AXIS_X, AXIS_Y, CATEGORY_NEXT, CATEGORY_PREVIOUS, MEASURER, SceneParams, base_chart,
    controls, title_text,
};
use crate::cursor::CategoryCursor;
use crate::story::{Command, SceneId};

const BINS: u64 = 7_000;

/// The states of `listings` in first-seen order, with the cursor on the first.
pub fn price_states(listings: &[ListingRecord]) -> CategoryCursor {
    CategoryCursor::new(listings.iter().filter_map(|r| r.state.clone()))
}

/// The histogram of prices in `state`.
///
/// The x domain spans `[0, max price]` over all listings, so it does not move while stepping
/// through states; the y domain follows the current bins. Bars keep their id per bin index.
pub fn price_distribution(
    params: &SceneParams,
    listings: &[ListingRecord],
    state: Option<&str>,
) -> Vec<Mark> {
    let id = SceneId::PriceDistribution;
    let max_price = listings
        .iter()
        .filter_map(|r| r.price)
        .fold(0.0_f64, f64::max);
    let in_state: Vec<&ListingRecord> = listings
        .iter()
        .filter(|r| state.is_some() && r.state.as_deref() == state)
        .collect();
    let bins = histogram(
        &in_state,
        |r| r.price,
        (0.0, max_price),
        params.histogram_thresholds,
    );

    let title = match state {
        Some(s) => format!("{} in {s}", title_text(id)),
        None => title_text(id).to_string(),
    };
    let chart = base_chart(id, params, title)
        .with_axis_bottom(
            AxisSpec::bottom(AXIS_X, ScaleLinearSpec::new((0.0, max_price)))
                .with_tick_formatter(|v, _| if v > 0.0 { format!("{v}") } else { String::new() })
                .with_title("Price"),
        )
        .with_axis_left(
            AxisSpec::left(AXIS_Y, ScaleLinearSpec::new((0.0, bins.max_count() as f64)))
                .with_title("Count"),
        );

    let (layout, mut marks) = chart.marks(&MEASURER, |chart, layout| {
        let x = chart
            .axis_bottom
            .as_ref()
            .and_then(|a| a.scale_linear(layout.plot));
        let y = chart
            .axis_left
            .as_ref()
            .and_then(|a| a.scale_linear(layout.plot));
        let (Some(x), Some(y)) = (x, y) else {
            return Vec::new();
        };
        let floor = y.map(0.0);
        bins.bins()
            .iter()
            .enumerate()
            .map(|(i, bin)| {
                let x0 = x.map(bin.lower) + 1.0;
                let top = y.map(bin.count as f64);
                let width = x.map(bin.upper) - x.map(bin.lower);
                RectMarkSpec::new(
                    MarkId::for_row(BINS, i as u64),
                    Rect::new(x0, top, x0 + width, floor),
                )
                .with_fill(rgb_hex(0x69b3a2))
                .with_tooltip(format!(
                    "Price range: ${} - ${}\nCount: {}",
                    format_fixed(bin.lower, 2),
                    format_fixed(bin.upper, 2),
                    format_count(bin.count)
                ))
                .mark()
            })
            .collect()
    });
    let stepping = if state.is_some() {
        vec![
            ButtonSpec::new(
                CATEGORY_PREVIOUS,
                "Previous State",
                Command::PreviousCategory.action(),
            ),
            ButtonSpec::new(CATEGORY_NEXT, "Next State", Command::NextCategory.action()),
        ]
    } else {
        Vec::new()
    };
    marks.extend(controls(id, &layout, &stepping));
    marks
}

#[cfg(test)]
mod tests {
    use storyviz_core::{MarkDiff, MarkPayload, Scene};

    use super::*;
    use crate::scenes::TITLE;
    use crate::scenes::test_data::sample;

    fn title(marks: &[Mark]) -> String {
        marks
            .iter()
            .find(|m| m.id == TITLE)
            .and_then(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .unwrap()
    }

    fn bin_tooltips(marks: &[Mark]) -> Vec<String> {
        (0..200)
            .filter_map(|i| marks.iter().find(|m| m.id == MarkId::for_row(BINS, i)))
            .filter_map(|m| m.interaction.tooltip.clone())
            .collect()
    }

    #[test]
    fn bins_cover_the_whole_price_range() {
        let listings = sample();
        let cursor = price_states(&listings);
        assert_eq!(cursor.current(), Some("California"));
        let marks = price_distribution(&SceneParams::default(), &listings, cursor.current());
        assert_eq!(title(&marks), "Price Distribution in California");
        let tips = bin_tooltips(&marks);
        // ticks(0, 300, 70) steps by 5: 59 thresholds strictly inside, 60 bins.
        assert_eq!(tips.len(), 60);
        assert_eq!(tips[0], "Price range: $0.00 - $5.00\nCount: 0");
        assert_eq!(tips[20], "Price range: $100.00 - $105.00\nCount: 1");
        assert_eq!(tips[59], "Price range: $295.00 - $300.00\nCount: 1");
    }

    #[test]
    fn stepping_states_updates_bars_in_place() {
        let listings = sample();
        let params = SceneParams::default();
        let mut cursor = price_states(&listings);
        let mut scene = Scene::new();
        scene.tick(price_distribution(&params, &listings, cursor.current()));

        assert!(cursor.next());
        let diffs = scene.tick(price_distribution(&params, &listings, cursor.current()));
        assert!(!diffs.iter().any(|d| matches!(d, MarkDiff::Enter { .. })));
        assert!(!diffs.iter().any(|d| matches!(d, MarkDiff::Exit { .. })));
        assert!(diffs.iter().any(|d| d.id() == TITLE));
        assert!(diffs.iter().any(|d| d.id() == MarkId::for_row(BINS, 40)));
    }

    #[test]
    fn zero_price_tick_is_unlabelled() {
        let marks = price_distribution(&SceneParams::default(), &sample(), Some("Texas"));
        let labels: Vec<String> = marks
            .iter()
            .filter(|m| (AXIS_X + 1000..AXIS_X + 2000).contains(&m.id.0))
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect();
        assert!(!labels.is_empty());
        assert!(!labels.iter().any(|l| l == "0"));
        assert!(labels.iter().any(|l| l == "300"));
    }
}
