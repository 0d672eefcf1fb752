// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw rows and typed listing records.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::DataQualityError;

/// One row of the source table, exactly as read.
///
/// Column names are shared between all rows of a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl RawRecord {
    /// Creates a row; `values` pairs up with `headers` by position.
    pub fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self { headers, values }
    }

    /// Returns the value of `column`, or `None` if the table has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        let i = self.headers.iter().position(|h| h == column)?;
        self.values.get(i).map(String::as_str)
    }

    /// Iterates `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

/// A typed listing.
///
/// Every field is optional: a value that is absent, empty, or unparsable is `None`, and
/// each aggregation filters on the fields it needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingRecord {
    /// Two-letter or full state name, as in the source.
    pub state: Option<String>,
    /// Nightly price.
    pub price: Option<f64>,
    /// Review count.
    pub number_of_reviews: Option<f64>,
    /// Room type category.
    pub room_type: Option<String>,
    /// Host identifier.
    pub host_id: Option<String>,
    /// Date of the most recent review.
    pub last_review: Option<NaiveDate>,
}

impl ListingRecord {
    /// Parses a raw row, reporting fields that are present but malformed.
    pub fn parse(raw: &RawRecord) -> (Self, Vec<DataQualityError>) {
        let mut errors = Vec::new();
        let mut number = |field: &'static str| match raw.get(field).map(parse_number) {
            Some(Err(value)) => {
                errors.push(DataQualityError::InvalidNumber { field, value });
                None
            }
            Some(Ok(v)) => v,
            None => None,
        };
        let price = number("price");
        let number_of_reviews = number("number_of_reviews");
        let last_review = match raw.get("last_review").map(parse_date) {
            Some(Err(value)) => {
                errors.push(DataQualityError::InvalidDate {
                    field: "last_review",
                    value,
                });
                None
            }
            Some(Ok(d)) => d,
            None => None,
        };
        let record = Self {
            state: category(raw.get("state")),
            price,
            number_of_reviews,
            room_type: category(raw.get("room_type")),
            host_id: category(raw.get("host_id")),
            last_review,
        };
        (record, errors)
    }

    /// Year of the last review.
    pub fn review_year(&self) -> Option<i32> {
        self.last_review.map(|d| d.year())
    }
}

/// Parses a batch of rows, logging a summary of quality errors per field.
pub fn parse_listings(rows: &[RawRecord]) -> Vec<ListingRecord> {
    let mut by_field: BTreeMap<&'static str, usize> = BTreeMap::new();
    let records = rows
        .iter()
        .map(|row| {
            let (record, errors) = ListingRecord::parse(row);
            for e in &errors {
                *by_field.entry(e.field()).or_default() += 1;
            }
            record
        })
        .collect();
    if !by_field.is_empty() {
        debug!(rows = rows.len(), errors = ?by_field, "listing fields failed to parse");
    }
    records
}

fn category(value: Option<&str>) -> Option<String> {
    let v = value?.trim();
    (!v.is_empty()).then(|| v.to_string())
}

/// Parses a numeric cell: `Ok(None)` if empty, `Err(raw)` if unparsable.
///
/// Accepts a leading `$` and `,` thousands separators.
pub(crate) fn parse_number(raw: &str) -> Result<Option<f64>, String> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let unsigned = s.strip_prefix('$').unwrap_or(s);
    let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(raw.to_string()),
    }
}

/// Parses a date cell: `Ok(None)` if empty, `Err(raw)` if unrecognized.
pub(crate) fn parse_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Some(d));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y/%m/%d") {
        return Ok(Some(d));
    }
    if let Some(year) = s.rsplit('/').next().filter(|_| s.contains('/')) {
        let format = if year.len() == 2 { "%m/%d/%y" } else { "%m/%d/%Y" };
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return Ok(Some(d));
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(dt.date_naive()));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(Some(dt.date()));
    }
    Err(raw.to_string())
}
