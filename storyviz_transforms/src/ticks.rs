// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nice tick generation compatible with d3-array's `ticks`.
//!
//! Steps are 1, 2, or 5 times a power of ten. The step is chosen by comparing the raw step
//! against √50, √10 and √2, and ticks are computed as integers over a power-of-ten
//! increment so that values like `0.3` come out exact.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

const E10: f64 = 7.071_067_811_865_476;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = core::f64::consts::SQRT_2;

/// Upper bound on the number of ticks one call produces.
const MAX_TICKS: f64 = 1_000_000.0;

/// `Math.round` semantics: halves round toward positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10_f64.powf(-power) / factor;
        i1 = round_half_up(start * scale);
        i2 = round_half_up(stop * scale);
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        inc = -scale;
    } else {
        let step = 10_f64.powf(power) * factor;
        i1 = round_half_up(start / step);
        i2 = round_half_up(stop / step);
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Approximately `count` evenly spaced, nicely rounded values in `[start, stop]`.
///
/// Returns `[start]` when `start == stop`, nothing when `count == 0` or an input is not
/// finite. A reversed interval yields descending ticks.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return alloc::vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }
    // Tick indices past 2^53 are no longer exact integers.
    let n = i2 - i1 + 1.0;
    if !(n.is_finite() && n <= MAX_TICKS) {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "n is finite, positive, and at most MAX_TICKS"
    )]
    let n = n as usize;
    let value = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    let mut out: Vec<f64> = Vec::with_capacity(n);
    for k in 0..n {
        let v = value(i1 + k as f64);
        // Rounding at large magnitudes can repeat a value or step past the interval.
        if !(lo <= v && v <= hi) || out.last().is_some_and(|last| v <= *last) {
            continue;
        }
        out.push(v);
    }
    if reverse {
        out.reverse();
    }
    out
}

/// The tick increment for `[start, stop]`: positive for steps ≥ 1, otherwise the negated
/// inverse of the step (so `-10` means a step of `0.1`).
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// The signed step between ticks for `[start, stop]`.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Extends `[start, stop]` outward to round tick values, like d3's `linear.nice`.
pub fn nice(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return (start, stop);
    }
    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    let mut prestep = None;
    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if prestep == Some(step) {
            break;
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        prestep = Some(step);
    }
    if reverse { (hi, lo) } else { (lo, hi) }
}
