// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use crate::config::ConfigError;

/// The story could not be configured or written out.
///
/// Data loading failures are not here: a scene whose data fails to load stays in its shell
/// state and navigation goes on.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An output file could not be written.
    #[error("cannot write {}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
