// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene 1: introduction.

use storyviz_charts::{ButtonSpec, TextMarkSpec, rgb_hex, wrap_text};
use storyviz_core::{Mark, MarkId, TextBaseline};

use super::{MEASURER, NAV_NEXT, SceneParams, TITLE, button_row, title_text};
use crate::story::{Command, SceneId};

const WELCOME: &str = "Welcome to our Airbnb data analysis. In this interactive exploration, \
you'll learn about Airbnb listings in the United States and uncover interesting patterns and \
insights. Use the navigation buttons placed on top of the page to move between different scenes.";
const KEY_POINT: &str = "Key Point: This project uses Airbnb data to provide insights into the \
Airbnb market in the United States.";

const MARGIN: f64 = 40.0;
const HEADING_SIZE: f64 = 32.0;
const BODY_SIZE: f64 = 16.0;
const LINE_HEIGHT: f64 = 1.5 * BODY_SIZE;
const PARAGRAPH_GAP: f64 = BODY_SIZE;

const WELCOME_LINES: u64 = 20;
const KEY_POINT_LINES: u64 = 60;

/// The introduction: heading, welcome text, key point, and a Next button.
pub fn intro(params: &SceneParams) -> Vec<Mark> {
    let size = params.view_size(SceneId::Intro);
    let width = (size.width - 2.0 * MARGIN).max(0.0);
    let mut out = Vec::new();

    let mut y = MARGIN;
    out.push(
        TextMarkSpec::new(TITLE, (MARGIN, y).into(), title_text(SceneId::Intro))
            .with_font_size(HEADING_SIZE)
            .bold()
            .with_baseline(TextBaseline::Hanging)
            .mark(),
    );
    y += HEADING_SIZE + PARAGRAPH_GAP;

    for (base, text, bold) in [
        (WELCOME_LINES, WELCOME, false),
        (KEY_POINT_LINES, KEY_POINT, true),
    ] {
        for (i, line) in wrap_text(&MEASURER, text, BODY_SIZE, width)
            .into_iter()
            .enumerate()
        {
            let mut spec = TextMarkSpec::new(
                MarkId::from_raw(base + i as u64),
                (MARGIN, y).into(),
                line,
            )
            .with_font_size(BODY_SIZE)
            .with_fill(rgb_hex(0x222222))
            .with_baseline(TextBaseline::Hanging);
            if bold {
                spec = spec.bold();
            }
            out.push(spec.mark());
            y += LINE_HEIGHT;
        }
        y += PARAGRAPH_GAP;
    }

    let next = ButtonSpec::new(NAV_NEXT, "Next", Command::Next.action());
    out.extend(button_row(&[next], MARGIN, y));
    out
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use storyviz_core::{MarkPayload, Scene};

    use super::*;

    #[test]
    fn text_wraps_inside_the_canvas() {
        let params = SceneParams::default();
        let marks = intro(&params);
        let texts: Vec<_> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t),
                _ => None,
            })
            .collect();
        assert!(texts.iter().any(|t| t.text.starts_with("Key Point:") && t.font_weight == 700));
        for t in texts {
            let b = MarkPayload::Text(t.clone()).bounds().unwrap();
            assert!(b.x1 <= params.chart_size.width, "{} overflows", t.text);
        }
    }

    #[test]
    fn next_button_is_clickable() {
        let marks = intro(&SceneParams::default());
        let button = marks
            .iter()
            .find(|m| m.interaction.action.is_some())
            .unwrap();
        let center: Point = button.payload.bounds().unwrap().center();
        let mut scene = Scene::new();
        scene.tick(marks);
        assert_eq!(scene.click(center), Some(Command::Next.action()));
    }
}
