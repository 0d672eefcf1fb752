// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering scenes to files.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::controller::{RenderOutcome, SceneController};
use crate::error::StoryError;
use crate::html::{Section, render_report};
use crate::story::{Command, SceneId};

/// Walks the story from the active scene to the last one with `Next`, capturing each scene.
///
/// Scenes whose data failed to load are captured in their shell state. The first captured
/// section is the visible one.
pub async fn render_story(controller: &mut SceneController) -> Vec<Section> {
    let first = controller.active();
    let mut sections = Vec::with_capacity(SceneId::ALL.len());
    let mut outcome = controller.start().await;
    loop {
        let id = controller.active();
        report(id, &outcome);
        sections.push(Section {
            id,
            visible: id == first,
            svg: controller.svg(),
        });
        match controller.dispatch(Command::Next).await {
            Some(next) => outcome = next,
            None => break,
        }
    }
    sections
}

fn report(id: SceneId, outcome: &RenderOutcome) {
    if let RenderOutcome::Failed(err) = outcome {
        warn!(scene = %id, error = %err, "writing scene without its data");
    }
}

/// Writes `contents` to `dir/name`, creating `dir` if needed.
pub async fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, StoryError> {
    let path = dir.join(name);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| StoryError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| StoryError::Write {
            path: path.clone(),
            source,
        })?;
    info!(path = %path.display(), bytes = contents.len(), "wrote");
    Ok(path)
}

/// Writes one `sceneN.svg` per section plus `index.html` with all of them.
pub async fn write_story(dir: &Path, sections: &[Section]) -> Result<Vec<PathBuf>, StoryError> {
    let mut written = Vec::with_capacity(sections.len() + 1);
    for section in sections {
        let name = format!("{}.svg", section.id.element_id());
        written.push(write_file(dir, &name, &section.svg).await?);
    }
    let html = render_report("Airbnb listings in the United States", sections);
    written.push(write_file(dir, "index.html", &html).await?);
    Ok(written)
}
