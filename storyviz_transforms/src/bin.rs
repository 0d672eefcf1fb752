// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold binning.

extern crate alloc;

use alloc::vec::Vec;

use crate::ticks::ticks;

/// One histogram bin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Upper bound; exclusive except for the last bin of a histogram.
    pub upper: f64,
    /// Number of values in the bin.
    pub count: usize,
}

impl Bin {
    /// `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Contiguous bins covering a fixed domain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistogramBins {
    bins: Vec<Bin>,
}

impl HistogramBins {
    /// Bins in ascending order.
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns `true` if there are no bins (invalid domain).
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Largest bin count, `0` for an empty histogram.
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Bins `value` over `domain` using `ticks(domain.0, domain.1, threshold_count)` as
/// thresholds.
///
/// Thresholds at or outside the domain bounds are dropped, so the bins are
/// `[x0, t0), [t0, t1), …, [tn, x1]`. Unlike d3's `bin`, a threshold equal to `x1` does not
/// open a zero-width last bin: values at the maximum land in the closed last bin.
///
/// Missing values and values outside the domain are not counted. A reversed or non-finite
/// domain yields no bins.
pub fn histogram<T, F>(
    records: &[T],
    mut value: F,
    domain: (f64, f64),
    threshold_count: usize,
) -> HistogramBins
where
    F: FnMut(&T) -> Option<f64>,
{
    let (x0, x1) = domain;
    if !x0.is_finite() || !x1.is_finite() || x1 < x0 {
        return HistogramBins::default();
    }
    let thresholds: Vec<f64> = ticks(x0, x1, threshold_count)
        .into_iter()
        .filter(|t| *t > x0 && *t < x1)
        .collect();

    let mut bins: Vec<Bin> = Vec::with_capacity(thresholds.len() + 1);
    let mut lower = x0;
    for &t in &thresholds {
        bins.push(Bin {
            lower,
            upper: t,
            count: 0,
        });
        lower = t;
    }
    bins.push(Bin {
        lower,
        upper: x1,
        count: 0,
    });

    for record in records {
        let Some(v) = value(record) else {
            continue;
        };
        if !(x0 <= v && v <= x1) {
            continue;
        }
        let i = thresholds.partition_point(|t| *t <= v);
        bins[i].count += 1;
    }

    HistogramBins { bins }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn bins_are_half_open_with_closed_last_bin() {
        let prices = vec![Some(0.0), Some(9.9), Some(10.0), Some(25.0), Some(50.0), None];
        let h = histogram(&prices, |p| *p, (0.0, 50.0), 5);
        // ticks(0, 50, 5) = 0, 10, ..., 50 → interior thresholds 10..40.
        assert_eq!(h.len(), 5);
        assert_eq!(
            h.bins()[0],
            Bin {
                lower: 0.0,
                upper: 10.0,
                count: 2
            }
        );
        assert_eq!(h.bins()[1].count, 1);
        assert_eq!(h.bins()[2].count, 1);
        assert_eq!(
            h.bins()[4],
            Bin {
                lower: 40.0,
                upper: 50.0,
                count: 1
            }
        );
        assert_eq!(h.total(), 5);
        assert_eq!(h.max_count(), 2);
    }

    #[test]
    fn out_of_domain_values_are_ignored() {
        let prices = vec![-1.0, 5.0, 101.0, f64::NAN];
        let h = histogram(&prices, |p| Some(*p), (0.0, 100.0), 10);
        assert_eq!(h.total(), 1);
    }

    #[test]
    fn invalid_domains_have_no_bins() {
        let prices = vec![1.0];
        assert!(histogram(&prices, |p| Some(*p), (10.0, 0.0), 10).is_empty());
        assert!(histogram(&prices, |p| Some(*p), (0.0, f64::INFINITY), 10).is_empty());
    }

    #[test]
    fn zero_width_domain_is_a_single_bin() {
        let prices = vec![3.0, 3.0, 4.0];
        let h = histogram(&prices, |p| Some(*p), (3.0, 3.0), 10);
        assert_eq!(
            h.bins(),
            &[Bin {
                lower: 3.0,
                upper: 3.0,
                count: 2
            }]
        );
    }

    #[test]
    fn huge_domains_still_bin() {
        let values = vec![1e17, 1e17 + 16.0];
        let h = histogram(&values, |v| Some(*v), (1e17, 1e17 + 16.0), 70);
        assert!(!h.is_empty());
        assert_eq!(h.bins()[0].lower, 1e17);
        assert_eq!(h.bins()[h.len() - 1].upper, 1e17 + 16.0);
        assert_eq!(h.total(), 2);
    }
}
