// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure reductions over listing-like records.
//!
//! Every function here takes a record slice plus key/value closures and returns a fresh
//! summary; nothing is cached between calls, so a scene that re-renders always derives its
//! domains from the data it is showing.
//!
//! - [`group_count`] and [`group_mean`] partition records by a key into an
//!   [`AggregatedSummary`] that keeps first-seen key order.
//! - [`top_n`] sorts a summary by value, descending, keeping ties in first-seen order.
//! - [`rollup_by_year`] counts listings and distinct hosts per year.
//! - [`histogram`] bins values between [`ticks`] thresholds, with a closed last bin.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod aggregate;
mod bin;
#[cfg(not(feature = "std"))]
mod float;
mod rollup;
mod summary;
mod ticks;

pub use aggregate::{group_count, group_mean, top_n, top_n_by};
pub use bin::{Bin, HistogramBins, histogram};
pub use rollup::{YearActivity, rollup_by_year};
pub use summary::{AggregatedSummary, SummaryValue};
pub use ticks::{nice, tick_increment, tick_step, ticks};
