// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-year listing and host activity.

extern crate alloc;

use alloc::collections::BTreeMap;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::summary::AggregatedSummary;

/// Listing and distinct-host counts for one year.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct YearActivity {
    /// Records in the year.
    pub listings: usize,
    /// Distinct host ids among those records.
    pub hosts: usize,
}

impl YearActivity {
    /// The larger of the two counts.
    pub fn max_count(&self) -> usize {
        self.listings.max(self.hosts)
    }
}

/// Rolls records up by year, ascending.
///
/// Records without a year are dropped. Records without a host id count as listings but not
/// as hosts; a host appearing several times in one year is counted once.
pub fn rollup_by_year<T, H, Y, G>(
    records: &[T],
    mut year: Y,
    mut host: G,
) -> AggregatedSummary<i32, YearActivity>
where
    H: Eq + Hash,
    Y: FnMut(&T) -> Option<i32>,
    G: FnMut(&T) -> Option<H>,
{
    let mut years: BTreeMap<i32, (usize, HashSet<H>)> = BTreeMap::new();
    for record in records {
        let Some(y) = year(record) else {
            continue;
        };
        let (listings, hosts) = years.entry(y).or_default();
        *listings += 1;
        if let Some(h) = host(record) {
            hosts.insert(h);
        }
    }
    AggregatedSummary::from_ordered(
        years
            .into_iter()
            .map(|(y, (listings, hosts))| {
                (
                    y,
                    YearActivity {
                        listings,
                        hosts: hosts.len(),
                    },
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn counts_listings_and_distinct_hosts_ascending() {
        let rows: Vec<(Option<i32>, Option<u64>)> = vec![
            (Some(2019), Some(7)),
            (Some(2018), Some(1)),
            (Some(2019), Some(7)),
            (Some(2019), Some(8)),
            (Some(2019), None),
            (None, Some(9)),
        ];
        let r = rollup_by_year(&rows, |r| r.0, |r| r.1);
        assert_eq!(
            r.as_slice(),
            &[
                (
                    2018,
                    YearActivity {
                        listings: 1,
                        hosts: 1
                    }
                ),
                (
                    2019,
                    YearActivity {
                        listings: 4,
                        hosts: 2
                    }
                ),
            ]
        );
        assert_eq!(r.get(&2019).map(YearActivity::max_count), Some(4));
    }
}
