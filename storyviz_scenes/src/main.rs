// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `storyviz`: renders the listings story to SVG and HTML, or drives it from stdin.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use kurbo::Point;
use storyviz_core::HoverState;
use storyviz_scenes::{
    Command, Key, RenderOutcome, SceneController, SceneId, StoryConfig, render_story,
    write_file, write_story,
};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "storyviz",
    version,
    about = "A narrative visualization of US Airbnb listings"
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory; overrides `output_dir` from the configuration.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Render every scene and an HTML page holding the story.
    Story,
    /// Render a single scene (1-7).
    Scene {
        /// Scene number.
        number: usize,
    },
    /// Read navigation commands from stdin and rewrite `current.svg` after each one.
    Interactive,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => StoryConfig::load(path)?,
        None => StoryConfig::default(),
    };
    if let Some(out) = cli.out {
        config.output_dir = out;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the runtime")?;
    runtime.block_on(run(cli.command, config))
}

async fn run(mode: Mode, config: StoryConfig) -> anyhow::Result<()> {
    let mut controller = SceneController::new(&config);
    let dir = config.output_dir.as_path();
    match mode {
        Mode::Story => {
            let sections = render_story(&mut controller).await;
            let written = write_story(dir, &sections).await?;
            info!(files = written.len(), dir = %dir.display(), "story written");
        }
        Mode::Scene { number } => {
            let Some(id) = SceneId::from_number(number) else {
                bail!(
                    "no scene {number}; scenes are numbered 1 to {}",
                    SceneId::ALL.len()
                );
            };
            let outcome = controller.run(id).await;
            if let RenderOutcome::Failed(err) = &outcome {
                warn!(scene = %id, error = %err, "writing scene without its data");
            }
            write_file(dir, &format!("{}.svg", id.element_id()), &controller.svg()).await?;
        }
        Mode::Interactive => interactive(&mut controller, dir).await?,
    }
    Ok(())
}

/// One line of interactive input.
#[derive(Debug, PartialEq)]
enum Input {
    Command(Command),
    Key(Key),
    Click(Point),
    Hover(Point),
    Quit,
}

const USAGE: &str =
    "expected next, prev, state-next, state-prev, right, click X Y, hover X Y, or quit";

fn parse_input(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let input = match words.next()? {
        "next" | "n" => Input::Command(Command::Next),
        "prev" | "p" => Input::Command(Command::Previous),
        "state-next" => Input::Command(Command::NextCategory),
        "state-prev" => Input::Command(Command::PreviousCategory),
        "right" => Input::Key(Key::ArrowRight),
        verb @ ("click" | "hover") => {
            let x = words.next()?.parse().ok()?;
            let y = words.next()?.parse().ok()?;
            let pt = Point::new(x, y);
            if verb == "click" {
                Input::Click(pt)
            } else {
                Input::Hover(pt)
            }
        }
        "quit" | "q" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

async fn interactive(controller: &mut SceneController, dir: &Path) -> anyhow::Result<()> {
    controller.start().await;
    write_file(dir, "current.svg", &controller.svg()).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let Some(input) = parse_input(&line) else {
            warn!(input = line.trim(), "unrecognized input; {USAGE}");
            continue;
        };
        match input {
            Input::Command(command) => {
                controller.dispatch(command).await;
            }
            Input::Key(key) => {
                controller.key(key).await;
            }
            Input::Click(pt) => {
                controller.click(pt).await;
            }
            Input::Hover(pt) => {
                if let Some(HoverState {
                    tooltip: Some(tooltip),
                    anchor,
                    ..
                }) = controller.pointer_move(pt)
                {
                    info!(x = anchor.x, y = anchor.y, "{}", tooltip.replace('\n', " | "));
                }
            }
            Input::Quit => break,
        }
        info!(scene = %controller.active(), state = ?controller.current_category(), "now showing");
        write_file(dir, "current.svg", &controller.svg()).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_interactive_input() {
        assert_eq!(parse_input("next"), Some(Input::Command(Command::Next)));
        assert_eq!(
            parse_input(" state-prev "),
            Some(Input::Command(Command::PreviousCategory))
        );
        assert_eq!(parse_input("right"), Some(Input::Key(Key::ArrowRight)));
        assert_eq!(
            parse_input("click 30 42.5"),
            Some(Input::Click(Point::new(30.0, 42.5)))
        );
        assert_eq!(parse_input("click 30"), None);
        assert_eq!(parse_input("jump"), None);
    }
}
