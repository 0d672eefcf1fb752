// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where a dataset lives.

use std::fmt;
use std::path::PathBuf;

/// A dataset location: a remote URL or a local file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// An `http://` or `https://` URL.
    Remote(String),
    /// A local file path.
    Local(PathBuf),
}

impl Location {
    /// Parses a location string.
    ///
    /// - `http://...` or `https://...` is remote.
    /// - `file:///path` is the local `/path`.
    /// - Anything else is treated as a local path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Self::Remote(s.to_string())
        } else if let Some(path) = s.strip_prefix("file://") {
            Self::Local(PathBuf::from(path))
        } else {
            Self::Local(PathBuf::from(s))
        }
    }
}

impl From<&str> for Location {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes_pick_the_source() {
        assert_eq!(
            Location::parse("https://example.com/a.csv"),
            Location::Remote("https://example.com/a.csv".into())
        );
        assert_eq!(
            Location::parse("file:///tmp/a.csv"),
            Location::Local(PathBuf::from("/tmp/a.csv"))
        );
        assert_eq!(
            Location::parse(" data/a.csv "),
            Location::Local(PathBuf::from("data/a.csv"))
        );
    }
}
