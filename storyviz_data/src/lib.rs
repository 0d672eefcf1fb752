// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset loading for `storyviz`.
//!
//! A [`DatasetLoader`] fetches bytes from a [`Location`] (an `http(s)` URL or a local file)
//! and decodes them: the listings table into [`RawRecord`]s, the boundary file into
//! [`BoundaryFeature`]s. [`parse_listings`] turns raw rows into typed [`ListingRecord`]s,
//! leaving malformed fields missing.

mod boundary;
mod error;
mod loader;
mod location;
mod record;

pub use boundary::{BoundaryFeature, Ring, parse_boundaries};
pub use error::{DataQualityError, LoadError};
pub use loader::{DatasetLoader, DatasetPolicy, parse_table};
pub use location::Location;
pub use record::{ListingRecord, RawRecord, parse_listings};
