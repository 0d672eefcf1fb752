// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene controller: navigation, per-activation pipelines, and pointer input.

use kurbo::{Point, Rect};
use storyviz_core::{HoverState, Scene};
use storyviz_data::{
    BoundaryFeature, DatasetLoader, ListingRecord, LoadError, Location, parse_listings,
};
use tracing::{debug, error, info};

use crate::config::StoryConfig;
use crate::cursor::CategoryCursor;
use crate::scenes::{self, SceneParams};
use crate::story::{Command, Key, SceneId, Story};
use crate::svg::SvgDocument;

/// Identifies one activation of a scene.
///
/// A render result is applied only while its ticket is the latest one issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderTicket {
    /// The activated scene.
    pub scene: SceneId,
    /// Activation counter at the time of issue.
    pub generation: u64,
}

/// What a scene needs to render.
#[derive(Clone, Debug, Default)]
pub struct SceneData {
    /// Parsed listings.
    pub listings: Vec<ListingRecord>,
    /// State boundaries; only fetched for the map.
    pub boundaries: Vec<BoundaryFeature>,
}

/// How an activation ended.
#[derive(Debug)]
pub enum RenderOutcome {
    /// The scene's marks were rendered.
    Rendered,
    /// The user moved on before the data arrived; the result was dropped.
    Stale,
    /// The data failed to load; the scene keeps its title and navigation only.
    Failed(LoadError),
}

impl RenderOutcome {
    /// Whether the scene was rendered.
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered)
    }
}

#[derive(Debug)]
struct Distribution {
    listings: Vec<ListingRecord>,
    cursor: CategoryCursor,
}

/// Drives the story.
///
/// The controller owns the active scene id, one retained mark [`Scene`] for whatever is on
/// screen, and its SVG mirror. Every activation clears the marks, shows the scene shell,
/// fetches data, and renders from scratch.
#[derive(Debug)]
pub struct SceneController {
    story: Story,
    params: SceneParams,
    loader: DatasetLoader,
    dataset: Location,
    boundaries: Location,
    generation: u64,
    scene: Scene,
    document: SvgDocument,
    distribution: Option<Distribution>,
}

impl SceneController {
    /// A controller on scene 1, with nothing rendered yet.
    pub fn new(config: &StoryConfig) -> Self {
        Self::with_loader(config, DatasetLoader::new(config.policy))
    }

    /// Like [`SceneController::new`], with an existing loader.
    pub fn with_loader(config: &StoryConfig, loader: DatasetLoader) -> Self {
        Self {
            story: Story::new(),
            params: SceneParams::from(config),
            loader,
            dataset: config.dataset_location(),
            boundaries: config.boundaries_location(),
            generation: 0,
            scene: Scene::new(),
            document: SvgDocument::new(),
            distribution: None,
        }
    }

    /// The active scene.
    pub fn active(&self) -> SceneId {
        self.story.active()
    }

    /// Whether `id` is the visible scene.
    pub fn visible(&self, id: SceneId) -> bool {
        self.story.visible(id)
    }

    /// The retained marks of the active scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The active scene as SVG.
    pub fn svg(&self) -> String {
        self.document.to_svg_string()
    }

    /// The active state of scene 7, once its data has loaded.
    pub fn current_category(&self) -> Option<&str> {
        self.distribution.as_ref()?.cursor.current()
    }

    /// Starts an activation of `id`: clears the marks and shows the scene shell.
    ///
    /// Any earlier ticket becomes stale.
    pub fn activate(&mut self, id: SceneId) -> RenderTicket {
        self.generation += 1;
        self.distribution = None;
        info!(scene = %id, generation = self.generation, "scene activated");

        let size = self.params.view_size(id);
        self.document
            .set_view_box(Rect::new(0.0, 0.0, size.width, size.height));
        let exits = self.scene.clear();
        self.document.apply_diffs(&exits);
        let diffs = self.scene.tick(scenes::shell(id, &self.params));
        self.document.apply_diffs(&diffs);
        RenderTicket {
            scene: id,
            generation: self.generation,
        }
    }

    /// Fetches the data `scene` renders from.
    pub async fn fetch(&self, scene: SceneId) -> Result<SceneData, LoadError> {
        let rows = self.loader.fetch_listings(&self.dataset).await?;
        let listings = parse_listings(&rows);
        let boundaries = if scene == SceneId::Map {
            self.loader.fetch_boundaries(&self.boundaries).await?
        } else {
            Vec::new()
        };
        Ok(SceneData {
            listings,
            boundaries,
        })
    }

    /// Applies the result of a fetch issued for `ticket`.
    pub fn complete(
        &mut self,
        ticket: RenderTicket,
        result: Result<SceneData, LoadError>,
    ) -> RenderOutcome {
        if ticket.generation != self.generation {
            debug!(
                scene = %ticket.scene,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale render"
            );
            return RenderOutcome::Stale;
        }
        let data = match result {
            Ok(data) => data,
            Err(err) => {
                error!(scene = %ticket.scene, error = %err, "scene data failed to load");
                return RenderOutcome::Failed(err);
            }
        };
        let params = &self.params;
        let marks = match ticket.scene {
            SceneId::Intro => scenes::intro(params),
            SceneId::Map => scenes::map(params, &data.listings, &data.boundaries),
            SceneId::AveragePrice => scenes::average_price(params, &data.listings),
            SceneId::PriceVsReviews => scenes::price_vs_reviews(params, &data.listings),
            SceneId::RoomTypes => scenes::room_types(params, &data.listings),
            SceneId::YearlyActivity => scenes::yearly_activity(params, &data.listings),
            SceneId::PriceDistribution => {
                let cursor = scenes::price_states(&data.listings);
                let marks =
                    scenes::price_distribution(params, &data.listings, cursor.current());
                self.distribution = Some(Distribution {
                    listings: data.listings,
                    cursor,
                });
                marks
            }
        };
        let diffs = self.scene.tick(marks);
        self.document.apply_diffs(&diffs);
        info!(scene = %ticket.scene, marks = self.scene.len(), "scene rendered");
        RenderOutcome::Rendered
    }

    /// Runs the full pipeline of `id`: shell, fetch, render.
    pub async fn run(&mut self, id: SceneId) -> RenderOutcome {
        let ticket = self.activate(id);
        if !id.needs_data() {
            return RenderOutcome::Rendered;
        }
        let result = self.fetch(id).await;
        self.complete(ticket, result)
    }

    /// Renders the active scene.
    pub async fn start(&mut self) -> RenderOutcome {
        self.run(self.story.active()).await
    }

    /// Applies a command. Returns the outcome of the re-render it caused, if any.
    pub async fn dispatch(&mut self, command: Command) -> Option<RenderOutcome> {
        match command {
            Command::Next | Command::Previous => {
                let target = self.story.navigate(command)?;
                Some(self.run(target).await)
            }
            Command::PreviousCategory | Command::NextCategory => {
                self.step_category(command).then_some(RenderOutcome::Rendered)
            }
        }
    }

    /// Scene 7: moves the state cursor and re-renders the histogram in place.
    ///
    /// Returns `false` if nothing changed (not on scene 7, no data yet, or at an end).
    fn step_category(&mut self, command: Command) -> bool {
        if self.story.active() != SceneId::PriceDistribution {
            return false;
        }
        let Some(dist) = self.distribution.as_mut() else {
            return false;
        };
        let moved = match command {
            Command::PreviousCategory => dist.cursor.previous(),
            Command::NextCategory => dist.cursor.next(),
            Command::Next | Command::Previous => false,
        };
        if !moved {
            return false;
        }
        debug!(state = ?dist.cursor.current(), "state changed");
        let marks =
            scenes::price_distribution(&self.params, &dist.listings, dist.cursor.current());
        let diffs = self.scene.tick(marks);
        self.document.apply_diffs(&diffs);
        true
    }

    /// Resolves a click at `pt` on the active scene and applies its command.
    pub async fn click(&mut self, pt: Point) -> Option<RenderOutcome> {
        let command = Command::from_action(self.scene.click(pt)?)?;
        self.dispatch(command).await
    }

    /// Applies a key press.
    pub async fn key(&mut self, key: Key) -> Option<RenderOutcome> {
        let command = self.story.key_command(key)?;
        self.dispatch(command).await
    }

    /// Moves the pointer, updating hover styling; returns the hovered mark and its tooltip.
    pub fn pointer_move(&mut self, pt: Point) -> Option<HoverState> {
        let update = self.scene.pointer_move(pt);
        self.document.apply_diffs(&update.diffs);
        update.hover
    }

    /// The pointer left the canvas.
    pub fn pointer_leave(&mut self) {
        let diffs = self.scene.pointer_leave();
        self.document.apply_diffs(&diffs);
    }
}
