// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene 5: listings per room type.

use storyviz_charts::{
    AxisSpec, BarDatum, BarMarkSpec, BarOrient, LegendItem, LegendOrient, LegendPlacement,
    LegendSwatchesSpec, ScaleCategorySpec, ScaleLinearSpec, ScaleOrdinal, format_count,
};
use storyviz_core::Mark;
use storyviz_data::ListingRecord;
use storyviz_transforms::{AggregatedSummary, group_count};

use super::{AXIS_X, AXIS_Y, LEGEND, MEASURER, SceneParams, base_chart, controls, title_text};
use crate::story::SceneId;

const BARS: u64 = 5_000;

/// Room types in presentation order; other types follow in first-seen order.
pub const ROOM_TYPE_ORDER: [&str; 4] = [
    "Entire home/apt",
    "Private room",
    "Shared room",
    "Hotel room",
];

fn order_rank(room_type: &str) -> usize {
    ROOM_TYPE_ORDER
        .iter()
        .position(|t| *t == room_type)
        .unwrap_or(ROOM_TYPE_ORDER.len())
}

/// Vertical bars of listing count per room type.
pub fn room_types(params: &SceneParams, listings: &[ListingRecord]) -> Vec<Mark> {
    let id = SceneId::RoomTypes;
    let mut counts = group_count(listings, |r| r.room_type.clone()).into_vec();
    counts.sort_by_key(|(t, _)| order_rank(t));
    let counts = AggregatedSummary::from_pairs(counts);
    let max = counts.max_value().unwrap_or(0.0);

    let color = ScaleOrdinal::category10(
        ROOM_TYPE_ORDER
            .iter()
            .map(|t| (*t).to_string())
            .chain(counts.keys().cloned()),
    );
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
            AxisSpec::bottom(
                AXIS_X,
                ScaleCategorySpec::new(counts.keys().cloned()).with_padding(0.5),
            )
            .with_title("Room Type"),
        )
        .with_axis_left(
            AxisSpec::left(AXIS_Y, ScaleLinearSpec::new((0.0, max)))
                .with_title("Number of Listings"),
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
        let data: Vec<BarDatum> = counts
            .iter()
            .enumerate()
            .filter_map(|(i, (room_type, n))| {
                let (band_start, band_width) = x.band(room_type)?;
                Some(BarDatum {
                    row_key: i as u64,
                    band_start,
                    band_width,
                    value: *n as f64,
                    fill: color.color(room_type)?.into(),
                    tooltip: Some(format!(
                        "{room_type}\nNumber of listings: {}",
                        format_count(*n)
                    )),
                })
            })
            .collect();
        BarMarkSpec::new(BARS, BarOrient::Vertical, y).marks(&data)
    });
    marks.extend(controls(id, &layout, &[]));
    marks
}
