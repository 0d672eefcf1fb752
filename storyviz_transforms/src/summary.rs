// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered key/value summaries.

extern crate alloc;

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// An ordered sequence of `(key, value)` pairs with unique keys.
///
/// Order is insertion order unless the summary was produced by a sorting operation such as
/// [`crate::top_n`].
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedSummary<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for AggregatedSummary<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> AggregatedSummary<K, V> {
    /// Builds a summary from pairs, keeping the first occurrence of a repeated key.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut seen: HashMap<K, ()> = HashMap::new();
        let mut entries = Vec::new();
        for (k, v) in pairs {
            if seen.insert(k.clone(), ()).is_none() {
                entries.push((k, v));
            }
        }
        Self { entries }
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the position of `key` in the summary order.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<K, V> AggregatedSummary<K, V> {
    pub(crate) fn from_ordered(entries: Vec<(K, V)>) -> Self {
        Self { entries }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the summary has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in summary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Keys in summary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Values in summary order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Borrows the underlying pairs.
    pub fn as_slice(&self) -> &[(K, V)] {
        &self.entries
    }

    /// Consumes the summary into its pairs.
    pub fn into_vec(self) -> Vec<(K, V)> {
        self.entries
    }
}

/// Summary values that can be measured on a continuous axis.
pub trait SummaryValue: Copy {
    /// The value as `f64`.
    fn to_f64(self) -> f64;
}

impl SummaryValue for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl SummaryValue for usize {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl SummaryValue for u32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl<K, V: SummaryValue> AggregatedSummary<K, V> {
    /// Largest value as `f64`, ignoring non-finite values.
    pub fn max_value(&self) -> Option<f64> {
        self.extent().map(|(_, hi)| hi)
    }

    /// `(min, max)` over the values as `f64`, ignoring non-finite values.
    pub fn extent(&self) -> Option<(f64, f64)> {
        let mut out: Option<(f64, f64)> = None;
        for (_, v) in &self.entries {
            let v = v.to_f64();
            if !v.is_finite() {
                continue;
            }
            out = Some(match out {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
        out
    }
}

impl<K, V> IntoIterator for AggregatedSummary<K, V> {
    type Item = (K, V);
    type IntoIter = alloc::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
