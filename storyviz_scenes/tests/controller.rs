// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller scenarios over temporary data files.

use std::io::Write;

use kurbo::Point;
use storyviz_scenes::scenes::{SceneParams, shell, title_text};
use storyviz_scenes::{
    Command, Key, RenderOutcome, SceneController, SceneId, StoryConfig, render_story, write_story,
};

const LISTINGS: &str = "\
state,price,room_type,number_of_reviews,host_id,last_review
California,100,Entire home/apt,3,h1,2019-06-01
California,300,Private room,0,h2,
New York,200,Private room,12,h1,2020-01-15
New York,150,Shared room,4,h3,2020-03-02
Texas,50,Entire home/apt,1,h4,2019-11-30
";

const BOUNDARIES: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"NAME":"Texas"},
   "geometry":{"type":"Polygon","coordinates":[[[-106,36],[-94,36],[-94,26],[-106,26],[-106,36]]]}},
  {"type":"Feature","properties":{"NAME":"Utah"},
   "geometry":{"type":"Polygon","coordinates":[[[-114,42],[-111,42],[-111,37],[-114,37],[-114,42]]]}}
]}"#;

struct Fixture {
    _dir: tempfile::TempDir,
    config: StoryConfig,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let listings = dir.path().join("listings.csv");
    let boundaries = dir.path().join("states.json");
    std::fs::File::create(&listings)
        .unwrap()
        .write_all(LISTINGS.as_bytes())
        .unwrap();
    std::fs::write(&boundaries, BOUNDARIES).unwrap();
    let config = StoryConfig {
        dataset: listings.display().to_string(),
        boundaries: boundaries.display().to_string(),
        output_dir: dir.path().join("out"),
        ..StoryConfig::default()
    };
    Fixture { _dir: dir, config }
}

fn shell_len(id: SceneId) -> usize {
    shell(id, &SceneParams::default()).len()
}

#[tokio::test]
async fn navigation_walks_the_story_in_order() {
    let fx = fixture();
    let mut controller = SceneController::new(&fx.config);
    assert!(controller.start().await.is_rendered());
    assert_eq!(controller.active(), SceneId::Intro);

    assert!(controller.key(Key::ArrowRight).await.unwrap().is_rendered());
    assert_eq!(controller.active(), SceneId::Map);
    // The arrow key only works on the introduction.
    assert!(controller.key(Key::ArrowRight).await.is_none());

    for expected in &SceneId::ALL[2..] {
        let outcome = controller.dispatch(Command::Next).await.unwrap();
        assert!(outcome.is_rendered(), "{expected} did not render");
        assert_eq!(controller.active(), *expected);
        assert!(controller.scene().len() > shell_len(*expected));
    }
    assert!(controller.dispatch(Command::Next).await.is_none());
    for id in SceneId::ALL {
        assert_eq!(controller.visible(id), id == SceneId::PriceDistribution);
    }
}

#[tokio::test]
async fn late_results_for_a_left_scene_are_dropped() {
    let fx = fixture();
    let mut controller = SceneController::new(&fx.config);

    let map = controller.activate(SceneId::Map);
    let map_data = controller.fetch(SceneId::Map).await;
    let rooms = controller.activate(SceneId::RoomTypes);

    assert!(matches!(
        controller.complete(map, map_data),
        RenderOutcome::Stale
    ));
    assert_eq!(controller.scene().len(), shell_len(SceneId::RoomTypes));

    let rooms_data = controller.fetch(SceneId::RoomTypes).await;
    assert!(controller.complete(rooms, rooms_data).is_rendered());
    assert!(controller.svg().contains(title_text(SceneId::RoomTypes)));
    assert!(!controller.svg().contains(title_text(SceneId::Map)));
}

#[tokio::test]
async fn activation_removes_the_previous_scene() {
    let fx = fixture();
    let mut controller = SceneController::new(&fx.config);
    assert!(controller.run(SceneId::Map).await.is_rendered());
    assert!(controller.svg().contains("Texas"));

    controller.activate(SceneId::RoomTypes);
    assert_eq!(controller.scene().len(), shell_len(SceneId::RoomTypes));
    let svg = controller.svg();
    assert!(!svg.contains("Texas"));
    assert!(svg.contains(title_text(SceneId::RoomTypes)));
}

#[tokio::test]
async fn failed_load_keeps_the_shell() {
    let fx = fixture();
    let config = StoryConfig {
        dataset: fx.config.output_dir.join("absent.csv").display().to_string(),
        ..fx.config.clone()
    };
    let mut controller = SceneController::new(&config);
    let outcome = controller.run(SceneId::AveragePrice).await;
    assert!(matches!(outcome, RenderOutcome::Failed(_)));
    assert_eq!(controller.scene().len(), shell_len(SceneId::AveragePrice));
    assert!(controller.svg().contains(title_text(SceneId::AveragePrice)));

    // Navigation still works.
    let outcome = controller.dispatch(Command::Previous).await.unwrap();
    assert!(matches!(outcome, RenderOutcome::Failed(_)));
    assert_eq!(controller.active(), SceneId::Map);
}

fn button_center(controller: &SceneController, command: Command) -> Option<Point> {
    controller
        .scene()
        .paint_order()
        .into_iter()
        .find(|m| m.interaction.action == Some(command.action()))
        .and_then(|m| m.payload.bounds())
        .map(|b| b.center())
}

#[tokio::test]
async fn state_buttons_step_through_states() {
    let fx = fixture();
    let mut controller = SceneController::new(&fx.config);
    assert!(controller.run(SceneId::PriceDistribution).await.is_rendered());
    assert_eq!(controller.current_category(), Some("California"));
    assert!(controller.svg().contains("Price Distribution in California"));

    // Already on the first state.
    assert!(
        controller
            .dispatch(Command::PreviousCategory)
            .await
            .is_none()
    );

    let next = button_center(&controller, Command::NextCategory).unwrap();
    assert!(controller.click(next).await.unwrap().is_rendered());
    assert_eq!(controller.current_category(), Some("New York"));
    assert!(controller.svg().contains("Price Distribution in New York"));

    controller.dispatch(Command::NextCategory).await.unwrap();
    assert_eq!(controller.current_category(), Some("Texas"));
    assert!(controller.dispatch(Command::NextCategory).await.is_none());

    // Leaving and coming back starts over at the first state.
    controller.dispatch(Command::Previous).await.unwrap();
    assert_eq!(controller.current_category(), None);
    controller.dispatch(Command::Next).await.unwrap();
    assert_eq!(controller.current_category(), Some("California"));
}

#[tokio::test]
async fn clicking_next_navigates() {
    let fx = fixture();
    let mut controller = SceneController::new(&fx.config);
    controller.run(SceneId::RoomTypes).await;
    let next = button_center(&controller, Command::Next).unwrap();
    assert!(controller.click(next).await.unwrap().is_rendered());
    assert_eq!(controller.active(), SceneId::YearlyActivity);
    assert!(controller.click(Point::new(-50.0, -50.0)).await.is_none());
}

#[tokio::test]
async fn story_is_written_as_svg_and_html() {
    let fx = fixture();
    let mut controller = SceneController::new(&fx.config);
    let sections = render_story(&mut controller).await;
    assert_eq!(sections.len(), SceneId::ALL.len());
    assert!(sections[0].visible);
    assert!(sections[1..].iter().all(|s| !s.visible));

    let written = write_story(&fx.config.output_dir, &sections).await.unwrap();
    assert_eq!(written.len(), SceneId::ALL.len() + 1);
    let html = std::fs::read_to_string(fx.config.output_dir.join("index.html")).unwrap();
    assert!(html.contains(r#"<div id="scene7" class="scene" style="display: none">"#));
    assert!(fx.config.output_dir.join("scene2.svg").exists());
}
