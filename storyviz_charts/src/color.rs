// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color encodings: two-stop linear color, sequential ramps, and ordinal schemes.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::Color;

/// The d3 `schemeCategory10` palette.
pub const CATEGORY10: [u32; 10] = [
    0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b, 0xe377c2, 0x7f7f7f, 0xbcbd22,
    0x17becf,
];

/// The nine-class ColorBrewer "Blues" ramp used by d3's `interpolateBlues`.
pub const BLUES: [u32; 9] = [
    0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
];

/// Builds an opaque color from a `0xRRGGBB` literal.
pub fn rgb_hex(hex: u32) -> Color {
    let [_, r, g, b] = hex.to_be_bytes();
    Color::from_rgb8(r, g, b)
}

fn channels(c: Color) -> [f64; 3] {
    let rgba = c.to_rgba8();
    [f64::from(rgba.r), f64::from(rgba.g), f64::from(rgba.b)]
}

fn from_channels(ch: [f64; 3]) -> Color {
    let q = |v: f64| {
        let v = v.clamp(0.0, 255.0) + 0.5;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "clamped to [0.5, 255.5] before truncation"
        )]
        {
            v as u8
        }
    };
    Color::from_rgb8(q(ch[0]), q(ch[1]), q(ch[2]))
}

/// Maps a numeric domain onto an RGB interpolation between two colors.
///
/// `t` is not clamped (values outside the domain extrapolate), but each channel is clamped to
/// the displayable range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearColor {
    domain: (f64, f64),
    from: Color,
    to: Color,
}

impl ScaleLinearColor {
    /// Creates a linear color scale.
    pub fn new(domain: (f64, f64), from: Color, to: Color) -> Self {
        Self { domain, from, to }
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Maps `v` to a color.
    pub fn map(&self, v: f64) -> Color {
        let (d0, d1) = self.domain;
        let t = if d1 == d0 { 0.0 } else { (v - d0) / (d1 - d0) };
        let a = channels(self.from);
        let b = channels(self.to);
        from_channels([
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
        ])
    }
}

/// A color interpolator over `t ∈ [0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolator {
    /// Uniform B-spline through [`BLUES`] (d3's `interpolateBlues`).
    Blues,
}

impl Interpolator {
    /// Evaluates the interpolator; `t` is clamped to `[0, 1]`.
    pub fn eval(self, t: f64) -> Color {
        match self {
            Self::Blues => rgb_basis(&BLUES, t),
        }
    }
}

fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

fn rgb_basis(stops: &[u32], t: f64) -> Color {
    let values: Vec<[f64; 3]> = stops.iter().map(|h| channels(rgb_hex(*h))).collect();
    let n = values.len().saturating_sub(1);
    if n == 0 {
        return values.first().map_or(Color::BLACK, |c| from_channels(*c));
    }
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let nf = n as f64;
    let i = if t >= 1.0 {
        n - 1
    } else {
        let scaled = t * nf;
        // `scaled` is in `[0, n)`.
        #[allow(
            clippy::cast_possible_truncation,
            reason = "t is clamped to [0, 1) so t * n is a small non-negative value"
        )]
        {
            scaled as usize
        }
    };
    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 {
        values[i - 1]
    } else {
        [2.0 * v1[0] - v2[0], 2.0 * v1[1] - v2[1], 2.0 * v1[2] - v2[2]]
    };
    let v3 = if i + 2 <= n {
        values[i + 2]
    } else {
        [2.0 * v2[0] - v1[0], 2.0 * v2[1] - v1[1], 2.0 * v2[2] - v1[2]]
    };
    let local = (t - i as f64 / nf) * nf;
    from_channels([
        basis(local, v0[0], v1[0], v2[0], v3[0]),
        basis(local, v0[1], v1[1], v2[1], v3[1]),
        basis(local, v0[2], v1[2], v2[2], v3[2]),
    ])
}

/// Maps a numeric domain through an [`Interpolator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleSequential {
    domain: (f64, f64),
    interpolator: Interpolator,
}

impl ScaleSequential {
    /// Creates a sequential color scale.
    pub fn new(domain: (f64, f64), interpolator: Interpolator) -> Self {
        Self {
            domain,
            interpolator,
        }
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Maps `v` to a color. A zero-span domain maps everything to the middle of the ramp.
    pub fn map(&self, v: f64) -> Color {
        let (d0, d1) = self.domain;
        let t = if d1 == d0 { 0.5 } else { (v - d0) / (d1 - d0) };
        self.interpolator.eval(t)
    }
}

/// Maps categories to colors from a scheme.
///
/// The domain is fixed at construction (first-seen order); unknown categories map to
/// `None`. Colors cycle when the domain is longer than the scheme.
#[derive(Clone, Debug)]
pub struct ScaleOrdinal {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    scheme: Vec<Color>,
}

impl ScaleOrdinal {
    /// Creates an ordinal scale over `domain` using [`CATEGORY10`].
    pub fn category10<S: Into<String>>(domain: impl IntoIterator<Item = S>) -> Self {
        Self::new(domain, CATEGORY10.iter().map(|h| rgb_hex(*h)).collect())
    }

    /// Creates an ordinal scale over `domain` with an explicit scheme.
    pub fn new<S: Into<String>>(domain: impl IntoIterator<Item = S>, scheme: Vec<Color>) -> Self {
        let mut out = Vec::new();
        let mut index = HashMap::new();
        for d in domain {
            let d: String = d.into();
            if !index.contains_key(&d) {
                index.insert(d.clone(), out.len());
                out.push(d);
            }
        }
        Self {
            domain: out,
            index,
            scheme,
        }
    }

    /// Returns the domain in first-seen order.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Returns the color for `category`.
    pub fn color(&self, category: &str) -> Option<Color> {
        let i = *self.index.get(category)?;
        if self.scheme.is_empty() {
            return None;
        }
        Some(self.scheme[i % self.scheme.len()])
    }
}
