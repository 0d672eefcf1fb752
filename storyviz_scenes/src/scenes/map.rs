// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene 2: listings per state on a choropleth.

use storyviz_charts::{
    AlbersUsa, GradientLegendSpec, LegendPlacement, RegionDatum, RegionMarkSpec,
    ScaleLinearColor, rgb_hex,
};
use storyviz_core::Mark;
use storyviz_data::{BoundaryFeature, ListingRecord};
use storyviz_transforms::group_count;

use super::{LEGEND, MEASURER, SceneParams, base_chart, controls, title_text};
use crate::story::SceneId;

const REGIONS: u64 = 2_000;

/// Canvas the reference projection scale is tuned for.
const REFERENCE: (f64, f64) = (960.0, 600.0);
const REFERENCE_SCALE: f64 = 1280.0;

/// Listing count per state, colored from light cyan to blue; states without listings are
/// grey.
pub fn map(
    params: &SceneParams,
    listings: &[ListingRecord],
    boundaries: &[BoundaryFeature],
) -> Vec<Mark> {
    let counts = group_count(listings, |r| r.state.clone());
    let max = counts.max_value().unwrap_or(0.0);
    let color = ScaleLinearColor::new((0.0, max), rgb_hex(0xe0f7fa), rgb_hex(0x0077c2));

    let base = base_chart(SceneId::Map, params, title_text(SceneId::Map));
    let plot = base.plot(&MEASURER);
    let chart = base.with_legend(
        GradientLegendSpec::new(LEGEND, color),
        LegendPlacement::at(20.0, plot.y0 + 10.0),
    );

    let regions: Vec<RegionDatum> = boundaries
        .iter()
        .map(|feature| {
            let count = counts.get(&feature.name).copied();
            RegionDatum {
                name: feature.name.clone(),
                polygons: feature.polygons.clone(),
                fill: count
                    .map_or(rgb_hex(0xcccccc), |c| color.map(c as f64))
                    .into(),
                tooltip: Some(format!(
                    "{}\nListings: {}",
                    feature.name,
                    count.map_or_else(|| "N/A".to_string(), |c| c.to_string())
                )),
            }
        })
        .collect();

    let (layout, mut marks) = chart.marks(&MEASURER, |_, layout| {
        let plot = layout.plot;
        let k = REFERENCE_SCALE
            * (plot.width() / REFERENCE.0).min(plot.height() / REFERENCE.1);
        let center = plot.center();
        RegionMarkSpec::new(REGIONS, AlbersUsa::new(k, (center.x, center.y))).marks(&regions)
    });
    marks.extend(controls(SceneId::Map, &layout, &[]));
    marks
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use peniko::Brush;
    use storyviz_core::{MarkId, MarkPayload, Scene};

    use super::*;
    use crate::scenes::test_data::sample;

    fn square(name: &str, lon: f64, lat: f64) -> BoundaryFeature {
        BoundaryFeature {
            name: name.to_string(),
            polygons: vec![vec![vec![
                (lon - 1.0, lat - 1.0),
                (lon + 1.0, lat - 1.0),
                (lon + 1.0, lat + 1.0),
                (lon - 1.0, lat + 1.0),
            ]]],
        }
    }

    #[test]
    fn states_are_colored_by_count() {
        let boundaries = vec![
            square("California", -120.0, 37.0),
            square("Texas", -99.0, 31.0),
            square("Kansas", -98.0, 38.5),
        ];
        let marks = map(&SceneParams::default(), &sample(), &boundaries);
        let region = |name: &str| {
            marks
                .iter()
                .find(|m| m.id == MarkId::for_key(REGIONS, name))
                .unwrap()
        };
        let fill = |m: &Mark| match &m.payload {
            MarkPayload::Path(p) => p.fill.clone(),
            _ => panic!("region is not a path"),
        };
        assert_eq!(fill(region("California")), Brush::from(rgb_hex(0x0077c2)));
        assert_eq!(fill(region("Kansas")), Brush::from(rgb_hex(0xcccccc)));
        assert_eq!(
            region("Kansas").interaction.tooltip.as_deref(),
            Some("Kansas\nListings: N/A")
        );
        assert_eq!(
            region("Texas").interaction.tooltip.as_deref(),
            Some("Texas\nListings: 1")
        );
    }

    #[test]
    fn hovering_a_state_shows_its_tooltip() {
        let boundaries = vec![square("California", -120.0, 37.0)];
        let marks = map(&SceneParams::default(), &sample(), &boundaries);
        let center: Point = marks
            .iter()
            .find(|m| m.id == MarkId::for_key(REGIONS, "California"))
            .and_then(|m| m.payload.bounds())
            .unwrap()
            .center();
        let mut scene = Scene::new();
        scene.tick(marks);
        let hover = scene.pointer_move(center).hover.unwrap();
        assert_eq!(hover.tooltip.as_deref(), Some("California\nListings: 2"));
    }
}
