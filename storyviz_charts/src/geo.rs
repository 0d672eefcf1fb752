// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geographic regions: an Albers USA composite projection and region (choropleth) marks.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use core::f64::consts::PI;

use kurbo::{BezPath, Point};
use peniko::Brush;
use peniko::color::palette::css;
use storyviz_core::{HoverStyle, Mark, MarkId};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::z_order;

/// A polygon: an outer ring followed by any holes, as `(longitude, latitude)` degrees.
pub type Polygon = Vec<Vec<(f64, f64)>>;

/// Conic equal-area projection with a rotation, center, scale, and translation.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ConicEqualArea {
    n: f64,
    c: f64,
    r0: f64,
    rotate: f64,
    k: f64,
    tx: f64,
    ty: f64,
    cx: f64,
    cy: f64,
}

impl ConicEqualArea {
    /// `parallels`, `rotate`, and `center` are in degrees.
    fn new(
        parallels: (f64, f64),
        rotate: f64,
        center: (f64, f64),
        k: f64,
        translate: (f64, f64),
    ) -> Self {
        let sy0 = parallels.0.to_radians().sin();
        let n = 0.5 * (sy0 + parallels.1.to_radians().sin());
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;
        let mut p = Self {
            n,
            c,
            r0,
            rotate: rotate.to_radians(),
            k,
            tx: translate.0,
            ty: translate.1,
            cx: 0.0,
            cy: 0.0,
        };
        let (cx, cy) = p.raw(center.0.to_radians(), center.1.to_radians());
        p.cx = cx;
        p.cy = cy;
        p
    }

    fn raw(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let r = (self.c - 2.0 * self.n * phi.sin()).max(0.0).sqrt() / self.n;
        let a = lambda * self.n;
        (r * a.sin(), self.r0 - r * a.cos())
    }

    fn project(&self, lon: f64, lat: f64) -> Point {
        let mut lambda = lon.to_radians() + self.rotate;
        if lambda > PI {
            lambda -= 2.0 * PI;
        } else if lambda < -PI {
            lambda += 2.0 * PI;
        }
        let (x, y) = self.raw(lambda, lat.to_radians());
        Point::new(
            self.tx + self.k * (x - self.cx),
            self.ty - self.k * (y - self.cy),
        )
    }
}

/// Which panel of the composite a polygon is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UsaPanel {
    /// The contiguous United States.
    Lower48,
    /// Alaska inset.
    Alaska,
    /// Hawaii inset.
    Hawaii,
}

/// The Albers USA composite: the lower 48 in a conic equal-area projection, with Alaska
/// and Hawaii moved into insets below it.
///
/// Polygons are routed to a panel by the mean position of their outer ring; polygons
/// outside all three panels (territories, far-off islands) are dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlbersUsa {
    lower48: ConicEqualArea,
    alaska: ConicEqualArea,
    hawaii: ConicEqualArea,
}

impl AlbersUsa {
    /// Creates the projection with scale `k`, the lower 48 centered at `translate`.
    pub fn new(k: f64, translate: (f64, f64)) -> Self {
        let (x, y) = translate;
        Self {
            lower48: ConicEqualArea::new((29.5, 45.5), 96.0, (-0.6, 38.7), k, (x, y)),
            alaska: ConicEqualArea::new(
                (55.0, 65.0),
                154.0,
                (-2.0, 58.5),
                0.35 * k,
                (x - 0.307 * k, y + 0.201 * k),
            ),
            hawaii: ConicEqualArea::new(
                (8.0, 18.0),
                157.0,
                (-3.0, 19.9),
                k,
                (x - 0.205 * k, y + 0.212 * k),
            ),
        }
    }

    /// Returns the panel a location falls in, if any.
    pub fn panel(lon: f64, lat: f64) -> Option<UsaPanel> {
        if lat > 50.0 && (lon < -129.0 || lon > 170.0) {
            Some(UsaPanel::Alaska)
        } else if (-161.0..=-154.0).contains(&lon) && (18.0..=23.0).contains(&lat) {
            Some(UsaPanel::Hawaii)
        } else if (-125.0..=-66.0).contains(&lon) && (24.0..=50.0).contains(&lat) {
            Some(UsaPanel::Lower48)
        } else {
            None
        }
    }

    /// Projects a point through the given panel.
    pub fn project_in(&self, panel: UsaPanel, lon: f64, lat: f64) -> Point {
        match panel {
            UsaPanel::Lower48 => self.lower48.project(lon, lat),
            UsaPanel::Alaska => self.alaska.project(lon, lat),
            UsaPanel::Hawaii => self.hawaii.project(lon, lat),
        }
    }

    /// Projects a single location, or `None` if it lies outside all panels.
    pub fn project(&self, lon: f64, lat: f64) -> Option<Point> {
        Self::panel(lon, lat).map(|panel| self.project_in(panel, lon, lat))
    }

    /// Projects polygons into one path; dropped polygons contribute nothing.
    pub fn path(&self, polygons: &[Polygon]) -> BezPath {
        let mut path = BezPath::new();
        for polygon in polygons {
            let Some(outer) = polygon.first() else {
                continue;
            };
            let Some((lon, lat)) = mean_position(outer) else {
                continue;
            };
            let Some(panel) = Self::panel(lon, lat) else {
                continue;
            };
            for ring in polygon {
                let mut points = ring.iter().map(|(lon, lat)| self.project_in(panel, *lon, *lat));
                let Some(first) = points.next() else {
                    continue;
                };
                path.move_to(first);
                for p in points {
                    path.line_to(p);
                }
                path.close_path();
            }
        }
        path
    }
}

fn mean_position(ring: &[(f64, f64)]) -> Option<(f64, f64)> {
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let (sx, sy) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    Some((sx / n, sy / n))
}

/// One named region to draw.
#[derive(Clone, Debug)]
pub struct RegionDatum {
    /// Region name; also the identity key of its mark.
    pub name: String,
    /// Region geometry.
    pub polygons: Vec<Polygon>,
    /// Fill paint.
    pub fill: Brush,
    /// Tooltip shown on hover.
    pub tooltip: Option<String>,
}

/// Filled region outlines projected through [`AlbersUsa`].
#[derive(Clone, Debug)]
pub struct RegionMarkSpec {
    /// Id namespace for the generated marks.
    pub namespace: u64,
    /// The projection.
    pub projection: AlbersUsa,
    /// Outline paint.
    pub stroke: Brush,
    /// Outline width.
    pub stroke_width: f64,
    /// Optional hover style for every region.
    pub hover: Option<HoverStyle>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl RegionMarkSpec {
    /// Creates a region spec with white outlines.
    pub fn new(namespace: u64, projection: AlbersUsa) -> Self {
        Self {
            namespace,
            projection,
            stroke: css::WHITE.into(),
            stroke_width: 1.0,
            hover: None,
            z_index: z_order::REGIONS,
        }
    }

    /// Sets the outline paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = width;
        self
    }

    /// Sets a hover style for every region.
    pub fn with_hover(mut self, hover: HoverStyle) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Generates one path mark per region; regions that project to nothing are skipped.
    pub fn marks(&self, regions: &[RegionDatum]) -> Vec<Mark> {
        regions
            .iter()
            .filter_map(|region| {
                let path = self.projection.path(&region.polygons);
                if path.elements().is_empty() {
                    return None;
                }
                let mut b = Mark::builder(MarkId::for_key(self.namespace, &region.name))
                    .path()
                    .z_index(self.z_index)
                    .geometry(path)
                    .fill(region.fill.clone())
                    .stroke(self.stroke.clone())
                    .stroke_width(self.stroke_width);
                if let Some(t) = &region.tooltip {
                    b = b.tooltip(t.clone());
                }
                if let Some(h) = &self.hover {
                    b = b.hover(h.clone());
                }
                Some(b.build())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn close(a: Point, b: (f64, f64)) -> bool {
        (a.x - b.0).abs() < 1e-6 && (a.y - b.1).abs() < 1e-6
    }

    #[test]
    fn panel_centers_land_on_their_translations() {
        let p = AlbersUsa::new(1280.0, (480.0, 300.0));
        let lower = p.project(-96.6, 38.7).expect("lower 48");
        assert!(close(lower, (480.0, 300.0)), "{lower:?}");
        let alaska = p.project(-156.0, 58.5).expect("alaska");
        assert!(close(alaska, (480.0 - 0.307 * 1280.0, 300.0 + 0.201 * 1280.0)));
        let hawaii = p.project(-160.0, 19.9).expect("hawaii");
        assert!(close(hawaii, (480.0 - 0.205 * 1280.0, 300.0 + 0.212 * 1280.0)));
    }

    #[test]
    fn east_is_right_and_north_is_up() {
        let p = AlbersUsa::new(1280.0, (480.0, 300.0));
        let west = p.project(-110.0, 40.0).expect("in panel");
        let east = p.project(-80.0, 40.0).expect("in panel");
        let north = p.project(-96.0, 47.0).expect("in panel");
        let south = p.project(-96.0, 30.0).expect("in panel");
        assert!(east.x > west.x);
        assert!(north.y < south.y);
        assert_eq!(p.project(-66.5, 18.2), None);
    }

    #[test]
    fn regions_outside_panels_emit_no_marks() {
        let p = AlbersUsa::new(1280.0, (480.0, 300.0));
        let square = |lon: f64, lat: f64| {
            vec![vec![
                (lon, lat),
                (lon + 1.0, lat),
                (lon + 1.0, lat + 1.0),
                (lon, lat + 1.0),
            ]]
        };
        let regions = vec![
            RegionDatum {
                name: "Kansas".into(),
                polygons: vec![square(-99.0, 38.0)],
                fill: css::STEEL_BLUE.into(),
                tooltip: Some("Kansas\nListings: 3".into()),
            },
            RegionDatum {
                name: "Puerto Rico".into(),
                polygons: vec![square(-67.0, 18.0)],
                fill: css::STEEL_BLUE.into(),
                tooltip: None,
            },
        ];
        let marks = RegionMarkSpec::new(2, p).marks(&regions);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].id, MarkId::for_key(2, "Kansas"));
        let center = p.project(-98.5, 38.5).expect("in panel");
        assert!(marks[0].payload.contains(center));
    }
}
