// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State boundary features from GeoJSON.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::LoadError;

/// A ring of `(longitude, latitude)` positions.
pub type Ring = Vec<(f64, f64)>;

/// A named region with its polygons.
///
/// Each polygon is an outer ring followed by its holes.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryFeature {
    /// Region name, from the `NAME` property.
    pub name: String,
    /// Polygons in source order.
    pub polygons: Vec<Vec<Ring>>,
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Properties>,
    #[serde(default)]
    geometry: Option<Value>,
}

#[derive(Deserialize)]
struct Properties {
    #[serde(default, rename = "NAME", alias = "name")]
    name: Option<String>,
}

/// Positions may carry an altitude; only the first two coordinates are kept.
type RawRing = Vec<Vec<f64>>;

/// Parses a GeoJSON `FeatureCollection` of `Polygon` and `MultiPolygon` features.
///
/// Features without a name or with another geometry type are skipped with a warning.
pub fn parse_boundaries(bytes: &[u8]) -> Result<Vec<BoundaryFeature>, LoadError> {
    let collection: FeatureCollection = serde_json::from_slice(bytes)?;
    let mut out = Vec::with_capacity(collection.features.len());
    for (i, feature) in collection.features.into_iter().enumerate() {
        let Some(name) = feature.properties.and_then(|p| p.name) else {
            warn!(feature = i, "boundary feature has no name, skipped");
            continue;
        };
        let Some(mut geometry) = feature.geometry else {
            warn!(%name, "boundary feature has no geometry, skipped");
            continue;
        };
        let kind = geometry
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let coordinates = geometry
            .get_mut("coordinates")
            .map(Value::take)
            .unwrap_or(Value::Null);
        let polygons = match kind.as_str() {
            "Polygon" => {
                let rings: Vec<RawRing> = serde_json::from_value(coordinates)?;
                vec![convert_polygon(rings)]
            }
            "MultiPolygon" => {
                let polys: Vec<Vec<RawRing>> = serde_json::from_value(coordinates)?;
                polys.into_iter().map(convert_polygon).collect()
            }
            other => {
                warn!(%name, geometry = other, "unsupported boundary geometry, skipped");
                continue;
            }
        };
        out.push(BoundaryFeature { name, polygons });
    }
    Ok(out)
}

fn convert_polygon(rings: Vec<RawRing>) -> Vec<Ring> {
    rings
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .filter_map(|pos| match pos.as_slice() {
                    [lon, lat, ..] => Some((*lon, *lat)),
                    _ => None,
                })
                .collect()
        })
        .collect()
}
