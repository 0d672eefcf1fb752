// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene 4: price against number of reviews.

use peniko::color::palette::css;
use storyviz_charts::{
    AxisSpec, LegendItem, LegendOrient, LegendPlacement, LegendSwatchesSpec, PointDatum,
    PointMarkSpec, ScaleLinearSpec, ScaleOrdinal, rgb_hex,
};
use storyviz_core::{HoverStyle, Mark};
use storyviz_data::ListingRecord;

use super::{AXIS_X, AXIS_Y, LEGEND, MEASURER, SceneParams, base_chart, controls, title_text};
use crate::story::SceneId;

const POINTS: u64 = 4_000;

/// One point per listing with both a price and a review count, colored by room type.
pub fn price_vs_reviews(params: &SceneParams, listings: &[ListingRecord]) -> Vec<Mark> {
    let id = SceneId::PriceVsReviews;
    let rows: Vec<(usize, f64, f64, Option<&str>)> = listings
        .iter()
        .enumerate()
        .filter_map(|(i, r)| Some((i, r.price?, r.number_of_reviews?, r.room_type.as_deref())))
        .collect();
    let max_price = rows.iter().map(|r| r.1).fold(0.0_f64, f64::max);
    let max_reviews = rows.iter().map(|r| r.2).fold(0.0_f64, f64::max);
    let color = ScaleOrdinal::category10(rows.iter().filter_map(|r| r.3));

    let legend = LegendSwatchesSpec::new(
        LEGEND,
        color
            .domain()
            .iter()
            .filter_map(|t| Some(LegendItem::solid(t.clone(), color.color(t)?)))
            .collect(),
    )
    .with_labels_left();

    let chart = base_chart(id, params, title_text(id))
        .with_axis_bottom(
            AxisSpec::bottom(AXIS_X, ScaleLinearSpec::new((0.0, max_price))).with_title("Price"),
        )
        .with_axis_left(
            AxisSpec::left(AXIS_Y, ScaleLinearSpec::new((0.0, max_reviews)))
                .with_title("Number of Reviews"),
        )
        .with_legend(legend, LegendPlacement::new(LegendOrient::TopRight));

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
        let data: Vec<PointDatum> = rows
            .iter()
            .map(|&(i, price, reviews, room_type)| PointDatum {
                row_key: i as u64,
                x: price,
                y: reviews,
                fill: room_type
                    .and_then(|t| color.color(t))
                    .unwrap_or(rgb_hex(0x999999))
                    .into(),
                tooltip: Some(format!(
                    "Price: ${price}\nReviews: {reviews}\nRoom Type: {}",
                    room_type.unwrap_or("N/A")
                )),
            })
            .collect();
        PointMarkSpec::new(POINTS, x, y)
            .with_size(6.0)
            .with_hover(HoverStyle::default().with_fill(css::RED).with_grow(2.0))
            .marks(&data)
    });
    marks.extend(controls(id, &layout, &[]));
    marks
}
