// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Async dataset fetching.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;
use tracing::{debug, info};

use crate::boundary::{BoundaryFeature, parse_boundaries};
use crate::error::LoadError;
use crate::location::Location;
use crate::record::RawRecord;

/// Whether repeated fetches of the same location hit the source again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetPolicy {
    /// Every fetch reads the source. One fetch per scene activation.
    #[default]
    Refetch,
    /// The first successful fetch of a location is kept for the loader's lifetime.
    Memoize,
}

/// Fetches the listings table and the boundary file.
///
/// Failures are returned as-is; nothing is retried.
#[derive(Debug)]
pub struct DatasetLoader {
    client: reqwest::Client,
    policy: DatasetPolicy,
    cache: Mutex<HashMap<Location, Arc<[u8]>>>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(DatasetPolicy::default())
    }
}

impl DatasetLoader {
    /// Creates a loader with a default HTTP client.
    pub fn new(policy: DatasetPolicy) -> Self {
        Self::with_client(reqwest::Client::new(), policy)
    }

    /// Creates a loader around an existing HTTP client.
    pub fn with_client(client: reqwest::Client, policy: DatasetPolicy) -> Self {
        Self {
            client,
            policy,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The loader's caching policy.
    pub fn policy(&self) -> DatasetPolicy {
        self.policy
    }

    /// Reads the raw bytes at `location`.
    pub async fn fetch_bytes(&self, location: &Location) -> Result<Arc<[u8]>, LoadError> {
        if self.policy == DatasetPolicy::Memoize {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(bytes) = cache.get(location) {
                debug!(%location, "dataset served from memo");
                return Ok(bytes.clone());
            }
        }
        info!(%location, "fetching dataset");
        let bytes: Arc<[u8]> = match location {
            Location::Remote(url) => {
                let http = |source| LoadError::Http {
                    url: url.clone(),
                    source,
                };
                let response = self
                    .client
                    .get(url.as_str())
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(http)?;
                response.bytes().await.map_err(http)?.to_vec().into()
            }
            Location::Local(path) => tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?
                .into(),
        };
        if self.policy == DatasetPolicy::Memoize {
            self.cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(location.clone(), bytes.clone());
        }
        Ok(bytes)
    }

    /// Fetches the listings table: a CSV file with a header row.
    pub async fn fetch_listings(&self, location: &Location) -> Result<Vec<RawRecord>, LoadError> {
        let bytes = self.fetch_bytes(location).await?;
        let rows = parse_table(&bytes)?;
        info!(%location, rows = rows.len(), "listings loaded");
        Ok(rows)
    }

    /// Fetches the boundary file: a GeoJSON feature collection.
    pub async fn fetch_boundaries(
        &self,
        location: &Location,
    ) -> Result<Vec<BoundaryFeature>, LoadError> {
        let bytes = self.fetch_bytes(location).await?;
        let features = parse_boundaries(&bytes)?;
        info!(%location, features = features.len(), "boundaries loaded");
        Ok(features)
    }
}

/// Parses CSV bytes with a header row into raw records.
///
/// A row whose field count differs from the header is an error.
pub fn parse_table(bytes: &[u8]) -> Result<Vec<RawRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    let headers: Arc<[String]> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(RawRecord::new(
            headers.clone(),
            record.iter().map(str::to_string).collect(),
        ));
    }
    Ok(rows)
}
