// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene 6: listings and distinct hosts per year of last review.

use peniko::color::palette::css;
use storyviz_charts::{
    AxisSpec, BarDatum, BarMarkSpec, BarOrient, LegendItem, LegendOrient, LegendPlacement,
    LegendSwatchesSpec, ScaleCategorySpec, ScaleLinearSpec,
};
use storyviz_core::Mark;
use storyviz_data::ListingRecord;
use storyviz_transforms::rollup_by_year;

use super::{AXIS_X, AXIS_Y, LEGEND, MEASURER, SceneParams, base_chart, controls, title_text};
use crate::story::SceneId;

const HOST_BARS: u64 = 6_000;
const LISTING_BARS: u64 = 6_001;

/// Grouped bars per year: hosts in the left half of the band, listings in the right half.
///
/// Only listings with a price, a review count, and a last review date are counted.
pub fn yearly_activity(params: &SceneParams, listings: &[ListingRecord]) -> Vec<Mark> {
    let id = SceneId::YearlyActivity;
    let years = rollup_by_year(
        listings,
        |r| r.price.and(r.number_of_reviews).and(r.review_year()),
        |r| r.host_id.clone(),
    );
    let max = years
        .values()
        .map(|a| a.max_count())
        .max()
        .unwrap_or_default();

    let legend = LegendSwatchesSpec::new(
        LEGEND,
        vec![
            LegendItem::solid("Listings", css::ORANGE),
            LegendItem::solid("Hosts", css::GREEN),
        ],
    );
    let chart = base_chart(id, params, title_text(id))
        .with_axis_bottom(
            AxisSpec::bottom(
                AXIS_X,
                ScaleCategorySpec::new(years.keys().map(i32::to_string)).with_padding(0.2),
            )
            .with_title("Year"),
        )
        .with_axis_left(
            AxisSpec::left(AXIS_Y, ScaleLinearSpec::new((0.0, max as f64))).with_title("Count"),
        )
        .with_legend(legend, LegendPlacement::new(LegendOrient::TopRight));

    let (layout, mut marks) = chart.marks(&MEASURER, |chart, layout| {
        let x = chart
            .axis_bottom
            .as_ref()
            .and_then(|a| a.scale_category(layout.plot));
        let y = chart
            .axis_left
            .as_ref()
            .and_then(|a| a.scale_linear(layout.plot));
        let (Some(x), Some(y)) = (x, y) else {
            return Vec::new();
        };
        let mut hosts = Vec::new();
        let mut listings = Vec::new();
        for (year, activity) in years.iter() {
            let Some((start, width)) = x.band(&year.to_string()) else {
                continue;
            };
            let half = 0.5 * width;
            let row_key = u64::from(year.unsigned_abs());
            hosts.push(BarDatum {
                row_key,
                band_start: start,
                band_width: half,
                value: activity.hosts as f64,
                fill: css::GREEN.into(),
                tooltip: Some(format!("Year: {year} - Hosts: {}", activity.hosts)),
            });
            listings.push(BarDatum {
                row_key,
                band_start: start + half,
                band_width: half,
                value: activity.listings as f64,
                fill: css::ORANGE.into(),
                tooltip: Some(format!("Year: {year} - Listings: {}", activity.listings)),
            });
        }
        let mut out = BarMarkSpec::new(HOST_BARS, BarOrient::Vertical, y).marks(&hosts);
        out.extend(BarMarkSpec::new(LISTING_BARS, BarOrient::Vertical, y).marks(&listings));
        out
    });
    marks.extend(controls(id, &layout, &[]));
    marks
}

#[cfg(test)]
mod tests {
    use storyviz_core::{MarkId, MarkPayload};

    use super::*;
    use crate::scenes::test_data::{listing, sample};

    #[test]
    fn hosts_and_listings_share_a_band() {
        let mut listings = sample();
        listings.push(listing("Ohio", 80.0, 1.0, "Private room", "h1", Some(2020)));
        let mut no_price = listing("Ohio", 0.0, 1.0, "Private room", "h7", Some(2021));
        no_price.price = None;
        listings.push(no_price);

        let marks = yearly_activity(&SceneParams::default(), &listings);
        let find = |ns: u64, year: u64| {
            marks
                .iter()
                .find(|m| m.id == MarkId::for_row(ns, year))
                .unwrap()
        };
        assert_eq!(
            find(LISTING_BARS, 2020).interaction.tooltip.as_deref(),
            Some("Year: 2020 - Listings: 3")
        );
        assert_eq!(
            find(HOST_BARS, 2020).interaction.tooltip.as_deref(),
            Some("Year: 2020 - Hosts: 2")
        );
        assert!(
            !marks
                .iter()
                .any(|m| m.id == MarkId::for_row(LISTING_BARS, 2021))
        );

        let rect = |m: &Mark| match &m.payload {
            MarkPayload::Rect(r) => r.rect,
            _ => panic!("bar is not a rect"),
        };
        let h = rect(find(HOST_BARS, 2020));
        let l = rect(find(LISTING_BARS, 2020));
        assert!((h.x1 - l.x0).abs() < 1e-9);
        assert!((h.width() - l.width()).abs() < 1e-9);
        assert!(l.height() > h.height());
    }
}
