// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels and tooltips.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Number of decimals needed to tell ticks `step` apart (d3's `precisionFixed`).
pub fn precision_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let p = -step.abs().log10().floor();
    if p <= 0.0 {
        0
    } else {
        // Bounded by the f64 exponent range.
        #[allow(
            clippy::cast_possible_truncation,
            reason = "p is a small positive integer-valued float"
        )]
        {
            p as usize
        }
    }
}

/// Formats a tick value with a thousands separator and the precision implied by `step`.
///
/// `format_tick_with_step(1500.0, 500.0) == "1,500"`, `format_tick_with_step(0.5, 0.1) ==
/// "0.5"`.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    format_grouped(v, precision_for_step(step))
}

/// Fixed-point formatting without grouping (`toFixed`).
pub fn format_fixed(v: f64, decimals: usize) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v:.decimals$}")
}

/// Fixed-point formatting with `,` thousands separators.
pub fn format_grouped(v: f64, decimals: usize) -> String {
    let fixed = format_fixed(v, decimals);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    out.push_str(sign);
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Formats a count or other integral value (`12,345`).
pub fn format_count(n: usize) -> String {
    format_grouped(n as f64, 0)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn tick_labels_follow_step_precision() {
        assert_eq!(format_tick_with_step(1500.0, 500.0), "1,500");
        assert_eq!(format_tick_with_step(0.5, 0.1), "0.5");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
        assert_eq!(format_tick_with_step(1_000_000.0, 200_000.0), "1,000,000");
        assert_eq!(format_tick_with_step(-2000.0, 1000.0), "-2,000");
    }

    #[test]
    fn fixed_normalizes_negative_zero() {
        assert_eq!(format_fixed(-0.0, 2), "0.00");
        assert_eq!(format_fixed(123.456, 2), "123.46");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1234), "1,234");
    }
}
