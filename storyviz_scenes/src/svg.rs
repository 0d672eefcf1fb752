// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG output for a retained scene.
//!
//! [`SvgDocument`] applies [`MarkDiff`]s to its own copy of the marks and serializes them in
//! paint order. Tooltips become `<title>` children, hover styles become `:hover` CSS rules,
//! and click actions become `data-action` attributes.

use std::collections::HashMap;
use std::fmt::Write as _;

use kurbo::Rect;
use peniko::Brush;
use storyviz_core::{
    HoverStyle, Interaction, MarkDiff, MarkId, MarkPayload, TextAnchor, TextBaseline,
};

#[derive(Clone, Debug)]
struct Entry {
    z_index: i32,
    payload: MarkPayload,
    interaction: Interaction,
}

/// A retained SVG document fed by mark diffs.
#[derive(Debug, Default)]
pub struct SvgDocument {
    marks: HashMap<MarkId, Entry>,
    view_box: Option<Rect>,
}

impl SvgDocument {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the view box; marks outside it extend it.
    pub fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    /// Number of retained marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether the document has no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Applies diffs from [`storyviz_core::Scene::tick`] or pointer updates.
    pub fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id,
                    z_index,
                    new,
                    interaction,
                    ..
                } => {
                    self.marks.insert(
                        *id,
                        Entry {
                            z_index: *z_index,
                            payload: (**new).clone(),
                            interaction: (**interaction).clone(),
                        },
                    );
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    new,
                    interaction,
                    ..
                } => {
                    self.marks.insert(
                        *id,
                        Entry {
                            z_index: *new_z_index,
                            payload: (**new).clone(),
                            interaction: (**interaction).clone(),
                        },
                    );
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    /// Serializes the document.
    pub fn to_svg_string(&self) -> String {
        let view_box = match (self.view_box, self.content_bounds()) {
            (Some(a), Some(b)) => a.union(b),
            (Some(a), None) => a,
            (None, Some(b)) => b.inflate(10.0, 10.0),
            (None, None) => Rect::new(0.0, 0.0, 100.0, 100.0),
        };
        let mut ids: Vec<_> = self.marks.iter().map(|(id, e)| (e.z_index, *id)).collect();
        ids.sort_by_key(|(z, id)| (*z, id.0));

        let mut style = String::new();
        let mut body = String::new();
        for (_, id) in ids {
            let Some(entry) = self.marks.get(&id) else {
                continue;
            };
            let class = entry.interaction.hover.as_ref().map(|hover| {
                let class = format!("m{:x}", id.0);
                write_hover_rule(&mut style, &class, hover);
                class
            });
            write_mark(&mut body, entry, class.as_deref());
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" "#,
                r#"width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            ),
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );
        out.push_str("<style>\n[data-action] { cursor: pointer; }\n");
        out.push_str(&style);
        out.push_str("</style>\n");
        out.push_str(&body);
        out.push_str("</svg>\n");
        out
    }

    fn content_bounds(&self) -> Option<Rect> {
        self.marks
            .values()
            .filter_map(|e| e.payload.bounds())
            .reduce(|a, b| a.union(b))
    }
}

fn write_mark(out: &mut String, entry: &Entry, class: Option<&str>) {
    let mut attrs = String::new();
    if let Some(class) = class {
        let _ = write!(attrs, r#" class="{class}""#);
    }
    if let Some(action) = entry.interaction.action {
        let _ = write!(attrs, r#" data-action="{}""#, action.0);
    }
    let (tag, inner) = match &entry.payload {
        MarkPayload::Rect(r) => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.rect.x0,
                r.rect.y0,
                r.rect.width(),
                r.rect.height(),
            );
            write_paint_attr(out, "fill", &r.fill);
            if r.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &r.stroke);
                let _ = write!(out, r#" stroke-width="{}""#, r.stroke_width);
            }
            ("rect", None)
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
                TextBaseline::Ideographic => "ideographic",
            };
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                t.pos.x, t.pos.y, t.font_size, baseline
            );
            if t.font_weight != 400 {
                let _ = write!(out, r#" font-weight="{}""#, t.font_weight);
            }
            if t.angle != 0.0 {
                let _ = write!(
                    out,
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                );
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_paint_attr(out, "fill", &t.fill);
            ("text", Some(escape_xml(&t.text)))
        }
        MarkPayload::Path(p) => {
            let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
            write_paint_attr(out, "fill", &p.fill);
            if p.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &p.stroke);
                let _ = write!(out, r#" stroke-width="{}""#, p.stroke_width);
            }
            ("path", None)
        }
    };
    out.push_str(&attrs);
    let tooltip = entry.interaction.tooltip.as_deref();
    if inner.is_none() && tooltip.is_none() {
        out.push_str("/>\n");
        return;
    }
    out.push('>');
    if let Some(tooltip) = tooltip {
        let _ = write!(out, "<title>{}</title>", escape_xml(tooltip));
    }
    if let Some(inner) = inner {
        out.push_str(&inner);
    }
    let _ = writeln!(out, "</{tag}>");
}

fn write_hover_rule(out: &mut String, class: &str, hover: &HoverStyle) {
    let _ = write!(out, ".{class}:hover {{");
    if let Some(fill) = &hover.fill {
        let (value, opacity) = svg_paint(fill);
        let _ = write!(out, " fill: {value};");
        if let Some(o) = opacity {
            let _ = write!(out, " fill-opacity: {o};");
        }
    }
    if hover.grow != 1.0 {
        let _ = write!(
            out,
            " transform-box: fill-box; transform-origin: center; transform: scale({});",
            hover.grow
        );
    }
    out.push_str(" }\n");
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (fill, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

/// Escapes text for XML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
