// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Group-by reductions and top-N selection.

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::summary::{AggregatedSummary, SummaryValue};

/// Counts records per key.
///
/// Records for which `key` returns `None` are skipped. Keys appear in order of first
/// occurrence.
pub fn group_count<T, K, F>(records: &[T], mut key: F) -> AggregatedSummary<K, usize>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> Option<K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut entries: Vec<(K, usize)> = Vec::new();
    for record in records {
        let Some(k) = key(record) else {
            continue;
        };
        match index.get(&k) {
            Some(&i) => entries[i].1 += 1,
            None => {
                index.insert(k.clone(), entries.len());
                entries.push((k, 1));
            }
        }
    }
    AggregatedSummary::from_ordered(entries)
}

/// Arithmetic mean of `value` per key.
///
/// Records with a missing key, or a missing or non-finite value, are excluded before
/// grouping: a key whose values are all missing does not appear in the result.
pub fn group_mean<T, K, F, G>(records: &[T], mut key: F, mut value: G) -> AggregatedSummary<K, f64>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> Option<K>,
    G: FnMut(&T) -> Option<f64>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut sums: Vec<(K, f64, usize)> = Vec::new();
    for record in records {
        let Some(v) = value(record).filter(|v| v.is_finite()) else {
            continue;
        };
        let Some(k) = key(record) else {
            continue;
        };
        match index.get(&k) {
            Some(&i) => {
                sums[i].1 += v;
                sums[i].2 += 1;
            }
            None => {
                index.insert(k.clone(), sums.len());
                sums.push((k, v, 1));
            }
        }
    }
    AggregatedSummary::from_ordered(
        sums.into_iter()
            .map(|(k, sum, n)| (k, sum / n as f64))
            .collect(),
    )
}

/// The `n` largest entries, in descending value order.
///
/// The sort is stable: entries with equal values keep their order in `summary`, so the
/// first-seen key wins a tie at the cut-off. Non-finite values sort last.
pub fn top_n<K, V: SummaryValue>(
    summary: AggregatedSummary<K, V>,
    n: usize,
) -> AggregatedSummary<K, V> {
    top_n_by(summary, n, |a, b| {
        let (a, b) = (a.to_f64(), b.to_f64());
        match (a.is_finite(), b.is_finite()) {
            (true, true) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => Ordering::Equal,
        }
    })
}

/// Like [`top_n`], with `cmp` giving the ascending order of values.
pub fn top_n_by<K, V, C>(
    summary: AggregatedSummary<K, V>,
    n: usize,
    mut cmp: C,
) -> AggregatedSummary<K, V>
where
    C: FnMut(&V, &V) -> Ordering,
{
    let mut entries = summary.into_vec();
    entries.sort_by(|(_, a), (_, b)| cmp(b, a));
    entries.truncate(n);
    AggregatedSummary::from_ordered(entries)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    struct Row {
        state: Option<&'static str>,
        price: Option<f64>,
    }

    fn row(state: &'static str, price: f64) -> Row {
        Row {
            state: Some(state),
            price: Some(price),
        }
    }

    #[test]
    fn mean_by_state() {
        let rows = vec![row("CA", 100.0), row("CA", 300.0), row("NY", 200.0)];
        let means = group_mean(&rows, |r| r.state, |r| r.price);
        assert_eq!(means.as_slice(), &[("CA", 200.0), ("NY", 200.0)]);
    }

    #[test]
    fn mean_excludes_missing_values_before_grouping() {
        let rows = vec![
            row("CA", 100.0),
            Row {
                state: Some("CA"),
                price: None,
            },
            Row {
                state: Some("WA"),
                price: None,
            },
            Row {
                state: Some("OR"),
                price: Some(f64::NAN),
            },
        ];
        let means = group_mean(&rows, |r| r.state, |r| r.price);
        assert_eq!(means.as_slice(), &[("CA", 100.0)]);
    }

    #[test]
    fn count_skips_missing_keys_and_keeps_first_seen_order() {
        let rows = vec![
            row("TX", 1.0),
            Row {
                state: None,
                price: Some(2.0),
            },
            row("CA", 3.0),
            row("TX", 4.0),
        ];
        let counts = group_count(&rows, |r| r.state);
        let keys: Vec<_> = counts.keys().copied().collect();
        assert_eq!(keys, vec!["TX", "CA"]);
        assert_eq!(counts.get(&"TX"), Some(&2));
    }

    #[test]
    fn top_n_ties_keep_first_seen() {
        let s = AggregatedSummary::from_pairs([("CA", 200_usize), ("NY", 200), ("TX", 50)]);
        let top = top_n(s, 2);
        let keys: Vec<_> = top.keys().copied().collect();
        assert_eq!(keys, vec!["CA", "NY"]);
    }

    #[test]
    fn top_n_sorts_descending_and_handles_short_input() {
        let s = AggregatedSummary::from_pairs([("a", 1.0), ("b", f64::NAN), ("c", 3.0)]);
        let top = top_n(s, 13);
        let keys: Vec<_> = top.keys().copied().collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn top_n_by_custom_order() {
        let s = AggregatedSummary::from_pairs([("a", 1_u32), ("b", 3), ("c", 2)]);
        // Reverse comparison selects the smallest values.
        let bottom = top_n_by(s, 2, |a, b| b.cmp(a));
        let keys: Vec<_> = bottom.keys().copied().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
