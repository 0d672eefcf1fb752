// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene 3: average price of the most expensive states.

use storyviz_charts::{
    AxisSpec, BarDatum, BarMarkSpec, BarOrient, Interpolator, ScaleCategorySpec,
    ScaleLinearSpec, ScaleSequential, format_fixed,
};
use storyviz_core::Mark;
use storyviz_data::ListingRecord;
use storyviz_transforms::{group_mean, top_n};

use super::{AXIS_X, AXIS_Y, MEASURER, SceneParams, base_chart, controls, title_text};
use crate::story::SceneId;

const BARS: u64 = 3_000;

/// Horizontal bars of mean price per state, highest first, limited to `params.top_n`.
pub fn average_price(params: &SceneParams, listings: &[ListingRecord]) -> Vec<Mark> {
    let id = SceneId::AveragePrice;
    let means = top_n(
        group_mean(listings, |r| r.state.clone(), |r| r.price),
        params.top_n,
    );
    let max = means.max_value().unwrap_or(0.0);
    let color = ScaleSequential::new((0.0, max), Interpolator::Blues);

    let chart = base_chart(id, params, title_text(id))
        .with_axis_bottom(
            AxisSpec::bottom(AXIS_X, ScaleLinearSpec::new((0.0, max))).with_title("Average Price"),
        )
        .with_axis_left(
            AxisSpec::left(
                AXIS_Y,
                ScaleCategorySpec::new(means.keys().cloned()).with_padding(0.1),
            )
            .with_title("State"),
        );

    let (layout, mut marks) = chart.marks(&MEASURER, |chart, layout| {
        let x = chart
            .axis_bottom
            .as_ref()
            .and_then(|a| a.scale_linear(layout.plot));
        let y = chart
            .axis_left
            .as_ref()
            .and_then(|a| a.scale_category(layout.plot));
        let (Some(x), Some(y)) = (x, y) else {
            return Vec::new();
        };
        let data: Vec<BarDatum> = means
            .iter()
            .enumerate()
            .filter_map(|(i, (state, mean))| {
                let (band_start, band_width) = y.band(state)?;
                Some(BarDatum {
                    row_key: i as u64,
                    band_start,
                    band_width,
                    value: *mean,
                    fill: color.map(*mean).into(),
                    tooltip: Some(format!("{state}\nAverage price: {}", format_fixed(*mean, 2))),
                })
            })
            .collect();
        BarMarkSpec::new(BARS, BarOrient::Horizontal, x).marks(&data)
    });
    marks.extend(controls(id, &layout, &[]));
    marks
}
