// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loader and record-quality errors.

use std::path::PathBuf;

/// A dataset could not be fetched or decoded.
///
/// Nothing is retried; the caller decides what to show instead.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The HTTP request failed or returned an error status.
    #[error("request to {url} failed")]
    Http {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// A local file could not be read.
    #[error("cannot read {}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A CSV row is malformed (for example, it has the wrong number of fields).
    #[error("malformed CSV at line {line}: {message}")]
    Csv {
        /// 1-based line number of the offending row, `0` if unknown.
        line: u64,
        /// Parser message.
        message: String,
    },

    /// The boundary file is not valid GeoJSON.
    #[error("malformed GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, csv::Position::line);
        Self::Csv {
            line,
            message: err.to_string(),
        }
    }
}

/// A field of a listing row that is present but does not parse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DataQualityError {
    /// A numeric column holds something that is not a finite number.
    #[error("{field}: {value:?} is not a number")]
    InvalidNumber {
        /// Column name.
        field: &'static str,
        /// Raw value.
        value: String,
    },

    /// A date column holds something that is not a recognized date.
    #[error("{field}: {value:?} is not a date")]
    InvalidDate {
        /// Column name.
        field: &'static str,
        /// Raw value.
        value: String,
    },
}

impl DataQualityError {
    /// The column the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidNumber { field, .. } | Self::InvalidDate { field, .. } => field,
        }
    }
}
