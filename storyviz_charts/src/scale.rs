// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positional scales.
//!
//! Each scale comes in two halves: a `*Spec` (domain and options, no range yet) that guides
//! can measure, and the concrete scale that a spec instantiates once layout has produced a
//! plot rectangle.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use storyviz_transforms::{nice, ticks};

/// A scale specification (domain + options, no range yet).
#[derive(Clone, Debug)]
pub enum ScaleSpec {
    /// Continuous linear scale.
    Linear(ScaleLinearSpec),
    /// Band scale over named categories.
    Category(ScaleCategorySpec),
}

impl From<ScaleLinearSpec> for ScaleSpec {
    fn from(value: ScaleLinearSpec) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleCategorySpec> for ScaleSpec {
    fn from(value: ScaleCategorySpec) -> Self {
        Self::Category(value)
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to extend the domain to round tick values.
    pub nice: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// Values outside the domain extrapolate. A zero-span domain maps everything to the
    /// range start.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into the domain.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        d0 + (y - r0) / denom * (d1 - d0)
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns nicely rounded tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if self.nice {
            nice(self.domain.0, self.domain.1, tick_count)
        } else {
            self.domain
        }
    }

    /// Instantiates a concrete scale using the resolved domain.
    pub fn instantiate(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

/// A discrete band scale.
///
/// Padding follows d3's `scaleBand`: both paddings are fractions of the step (band plus
/// gap), and leftover space is split evenly on both ends. Band `0` sits at the low end of
/// the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

/// Specification for a band scale (count + padding, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBandSpec {
    /// Number of bands.
    pub count: usize,
    /// Inner padding as a fraction of the step.
    pub padding_inner: f64,
    /// Outer padding as a fraction of the step.
    pub padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`, without padding.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Sets inner and outer padding.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        (r1 - r0).abs() / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    fn start(&self) -> f64 {
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 >= r0 { (r0, r1) } else { (r1, r0) };
        let step = self.step();
        let n = self.count as f64;
        lo + (hi - lo - step * (n - self.padding_inner)) * 0.5
    }

    /// Returns the band width.
    pub fn band_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the start position of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        self.start() + self.step() * index as f64
    }
}

impl ScaleBandSpec {
    /// Creates a new band scale spec without padding.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Sets inner and outer padding.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleBand {
        ScaleBand::new(range, self.count).with_padding(self.padding_inner, self.padding_outer)
    }
}

/// A band scale keyed by category name.
#[derive(Clone, Debug)]
pub struct ScaleCategory {
    categories: Vec<String>,
    index: HashMap<String, usize>,
    band: ScaleBand,
}

/// Specification for a category scale (ordered categories + padding, no range yet).
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleCategorySpec {
    /// Categories in band order.
    pub categories: Vec<String>,
    /// Inner padding as a fraction of the step.
    pub padding_inner: f64,
    /// Outer padding as a fraction of the step.
    pub padding_outer: f64,
}

impl ScaleCategory {
    /// Returns `(start, width)` of the band for `category`, or `None` if it is unknown.
    pub fn band(&self, category: &str) -> Option<(f64, f64)> {
        let i = *self.index.get(category)?;
        Some((self.band.x(i), self.band.band_width()))
    }

    /// Returns the position of `category` in band order.
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.index.get(category).copied()
    }

    /// Returns the categories in band order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns the band width.
    pub fn band_width(&self) -> f64 {
        self.band.band_width()
    }
}

impl ScaleCategorySpec {
    /// Creates a spec over `categories`; repeated categories keep their first position.
    pub fn new<S: Into<String>>(categories: impl IntoIterator<Item = S>) -> Self {
        let mut out: Vec<String> = Vec::new();
        for c in categories {
            let c = c.into();
            if !out.contains(&c) {
                out.push(c);
            }
        }
        Self {
            categories: out,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Sets inner and outer padding to the same value (d3's `band.padding`).
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleCategory {
        let index = self
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        ScaleCategory {
            categories: self.categories.clone(),
            index,
            band: ScaleBandSpec::new(self.categories.len())
                .with_padding(self.padding_inner, self.padding_outer)
                .instantiate(range),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn linear_extrapolates_and_handles_zero_span() {
        let s = ScaleLinear::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(s.map(5.0), 50.0);
        assert_eq!(s.map(20.0), 200.0);
        assert_eq!(s.invert(50.0), 5.0);
        let flat = ScaleLinear::new((3.0, 3.0), (10.0, 20.0));
        assert_eq!(flat.map(42.0), 10.0);
    }

    #[test]
    fn nice_spec_rounds_domain_outward() {
        let spec = ScaleLinearSpec::new((0.0, 287.0)).with_nice(true);
        assert_eq!(spec.resolved_domain(10), (0.0, 300.0));
        assert_eq!(ScaleLinearSpec::new((0.0, 287.0)).resolved_domain(10), (0.0, 287.0));
    }

    #[test]
    fn band_matches_d3_padding() {
        // d3.scaleBand().domain([a, b, c, d]).range([0, 100]).padding(0.5):
        // step = 100 / (4 - 0.5 + 1) = 22.22.., bandwidth = 11.11..
        let band = ScaleBandSpec::new(4).with_padding(0.5, 0.5).instantiate((0.0, 100.0));
        let step = 100.0 / 4.5;
        assert!((band.band_width() - 0.5 * step).abs() < 1e-9);
        assert!((band.x(0) - 0.5 * step).abs() < 1e-9);
        assert!((band.x(3) + band.band_width() - (100.0 - 0.5 * step)).abs() < 1e-9);
    }

    #[test]
    fn category_lookup_and_unknown() {
        let spec = ScaleCategorySpec::new(vec!["CA", "NY", "CA", "TX"]).with_padding(0.1);
        assert_eq!(spec.categories.len(), 3);
        let scale = spec.instantiate((0.0, 300.0));
        let (x_ca, w) = scale.band("CA").expect("known category");
        let (x_ny, _) = scale.band("NY").expect("known category");
        assert!(x_ny > x_ca);
        assert!(w > 0.0);
        assert_eq!(scale.band("WA"), None);
        assert_eq!(scale.index_of("TX"), Some(2));
    }

    #[test]
    fn reversed_range_keeps_band_zero_at_low_end() {
        let band = ScaleBandSpec::new(2).instantiate((100.0, 0.0));
        assert_eq!(band.x(0), 0.0);
        assert_eq!(band.x(1), 50.0);
    }
}
