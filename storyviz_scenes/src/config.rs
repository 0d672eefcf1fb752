// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Story configuration, read from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use storyviz_charts::Size;
use storyviz_data::{DatasetPolicy, Location};

/// Default listings table.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/tamimuiuc/airbnb-narrative-vis/main/data/USA-Airbnb-dataset.csv";
/// Default state boundaries.
pub const DEFAULT_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/tamimuiuc/airbnb-narrative-vis/main/data/state.json";

/// The configuration file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {}", path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unknown keys.
    #[error("invalid config {}", path.display())]
    Parse {
        /// File path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: toml::de::Error,
    },
    /// A value is out of range.
    #[error("invalid config value `{key}`: {reason}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// A canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct CanvasSize {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl CanvasSize {
    /// The size as a chart layout input.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Everything the story needs besides the data itself.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoryConfig {
    /// Listings CSV location (URL or path).
    pub dataset: String,
    /// State boundaries GeoJSON location (URL or path).
    pub boundaries: String,
    /// Where SVG and HTML output is written.
    pub output_dir: PathBuf,
    /// Whether scene activations re-fetch the data.
    pub policy: DatasetPolicy,
    /// How many states the average price scene shows.
    pub top_n: usize,
    /// Requested threshold count for the price histogram.
    pub histogram_thresholds: usize,
    /// Canvas of the chart scenes.
    pub chart_size: CanvasSize,
    /// Canvas of the map scene.
    pub map_size: CanvasSize,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_DATASET_URL.to_string(),
            boundaries: DEFAULT_BOUNDARIES_URL.to_string(),
            output_dir: PathBuf::from("storyviz-out"),
            policy: DatasetPolicy::Refetch,
            top_n: 13,
            histogram_thresholds: 70,
            chart_size: CanvasSize {
                width: 800.0,
                height: 600.0,
            },
            map_size: CanvasSize {
                width: 960.0,
                height: 600.0,
            },
        }
    }
}

impl StoryConfig {
    /// Parses a TOML document; missing keys take their defaults.
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &text)
    }

    /// Checks values that would make a scene meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.histogram_thresholds == 0 {
            return Err(ConfigError::Invalid {
                key: "histogram_thresholds",
                reason: "must be at least 1",
            });
        }
        for (key, canvas) in [("chart_size", self.chart_size), ("map_size", self.map_size)] {
            if !(canvas.width > 0.0 && canvas.height > 0.0) {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "width and height must be positive",
                });
            }
        }
        Ok(())
    }

    /// Listings location.
    pub fn dataset_location(&self) -> Location {
        Location::parse(&self.dataset)
    }

    /// Boundaries location.
    pub fn boundaries_location(&self) -> Location {
        Location::parse(&self.boundaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = StoryConfig::from_toml(
            Path::new("story.toml"),
            "dataset = \"data/listings.csv\"\npolicy = \"memoize\"\n[map_size]\nwidth = 480\nheight = 300\n",
        )
        .unwrap();
        assert_eq!(config.dataset_location(), Location::parse("data/listings.csv"));
        assert_eq!(config.policy, DatasetPolicy::Memoize);
        assert_eq!(config.top_n, 13);
        assert_eq!(config.histogram_thresholds, 70);
        assert_eq!(config.map_size.width, 480.0);
        assert_eq!(config.chart_size.width, 800.0);
    }

    #[test]
    fn unknown_keys_and_bad_values_are_rejected() {
        let path = Path::new("story.toml");
        assert!(matches!(
            StoryConfig::from_toml(path, "datset = \"typo.csv\"\n"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            StoryConfig::from_toml(path, "histogram_thresholds = 0\n"),
            Err(ConfigError::Invalid {
                key: "histogram_thresholds",
                ..
            })
        ));
    }
}
