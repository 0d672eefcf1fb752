// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the aggregation functions.

use proptest::prelude::*;
use storyviz_transforms::{
    AggregatedSummary, group_count, group_mean, histogram, rollup_by_year, ticks, top_n,
};

const STATES: [&str; 5] = ["CA", "NY", "TX", "WA", "HI"];

#[derive(Clone, Debug)]
struct Row {
    state: Option<&'static str>,
    price: Option<f64>,
    year: Option<i32>,
    host: Option<u8>,
}

fn row() -> impl Strategy<Value = Row> {
    (
        prop::option::weighted(0.9, prop::sample::select(STATES.to_vec())),
        prop::option::weighted(0.85, 0.0..5_000.0_f64),
        prop::option::weighted(0.8, 2010..2024_i32),
        prop::option::weighted(0.9, any::<u8>()),
    )
        .prop_map(|(state, price, year, host)| Row {
            state,
            price,
            year,
            host,
        })
}

proptest! {
    #[test]
    fn group_count_partitions_defined_keys(rows in prop::collection::vec(row(), 0..200)) {
        let counts = group_count(&rows, |r| r.state);
        let total: usize = counts.values().sum();
        let defined = rows.iter().filter(|r| r.state.is_some()).count();
        prop_assert_eq!(total, defined);
    }

    #[test]
    fn group_mean_within_partition_extent(rows in prop::collection::vec(row(), 0..200)) {
        let means = group_mean(&rows, |r| r.state, |r| r.price);
        for (state, mean) in means.iter() {
            let values: Vec<f64> = rows
                .iter()
                .filter(|r| r.state == Some(*state))
                .filter_map(|r| r.price)
                .collect();
            let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(*mean >= lo - 1e-6 && *mean <= hi + 1e-6);
        }
    }

    #[test]
    fn top_n_is_non_increasing_and_bounded(
        values in prop::collection::vec(0_usize..50, 0..20),
        n in 0_usize..25,
    ) {
        let summary = AggregatedSummary::from_pairs(values.iter().copied().enumerate());
        let len = summary.len();
        let top = top_n(summary, n);
        prop_assert_eq!(top.len(), n.min(len));
        let vals: Vec<usize> = top.values().copied().collect();
        prop_assert!(vals.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn rollup_never_double_counts_hosts(rows in prop::collection::vec(row(), 0..200)) {
        let rollup = rollup_by_year(&rows, |r| r.year, |r| r.host);
        for (year, activity) in rollup.iter() {
            let mut hosts: Vec<u8> = rows
                .iter()
                .filter(|r| r.year == Some(*year))
                .filter_map(|r| r.host)
                .collect();
            hosts.sort_unstable();
            hosts.dedup();
            prop_assert_eq!(activity.hosts, hosts.len());
            prop_assert!(activity.hosts <= activity.listings);
        }
        let years: Vec<i32> = rollup.keys().copied().collect();
        prop_assert!(years.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn histogram_bins_are_contiguous_and_complete(
        rows in prop::collection::vec(row(), 0..200),
        max in 1.0..6_000.0_f64,
        count in 1_usize..100,
    ) {
        let h = histogram(&rows, |r| r.price, (0.0, max), count);
        let bins = h.bins();
        prop_assert!(!bins.is_empty());
        prop_assert_eq!(bins[0].lower, 0.0);
        prop_assert_eq!(bins[bins.len() - 1].upper, max);
        prop_assert!(
            bins.windows(2)
                .all(|w| w[0].upper == w[1].lower && w[0].lower < w[0].upper)
        );
        let in_domain = rows
            .iter()
            .filter_map(|r| r.price)
            .filter(|p| (0.0..=max).contains(p))
            .count();
        prop_assert_eq!(h.total(), in_domain);
    }

    #[test]
    fn ticks_stay_inside_interval(
        start in prop_oneof![-1e6..1e6_f64, -1e18..1e18_f64],
        span in prop_oneof![1e-3..1e6_f64, 1.0..1e3_f64],
        count in 1_usize..100,
    ) {
        let stop = start + span;
        let t = ticks(start, stop, count);
        prop_assert!(t.iter().all(|v| *v >= start && *v <= stop));
        prop_assert!(t.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn histogram_over_large_magnitudes_finishes(
        start in 1e15..1e18_f64,
        span in 1.0..1e3_f64,
        count in 1_usize..100,
    ) {
        let stop = start + span;
        let values = [start, stop, 0.5 * (start + stop)];
        let h = histogram(&values, |v| Some(*v), (start, stop), count);
        let bins = h.bins();
        prop_assert!(!bins.is_empty());
        prop_assert!(bins.windows(2).all(|w| w[0].upper == w[1].lower));
        prop_assert_eq!(h.total(), 3);
    }
}
