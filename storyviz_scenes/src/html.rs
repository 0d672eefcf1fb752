// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The whole story as one HTML page.

use std::fmt::Write as _;

use crate::story::SceneId;
use crate::svg::escape_xml;

/// One scene container of the report.
#[derive(Clone, Debug)]
pub struct Section {
    /// The scene.
    pub id: SceneId,
    /// Whether the container is displayed.
    pub visible: bool,
    /// The rendered scene.
    pub svg: String,
}

/// Renders a page with one `<div id="sceneN" class="scene">` per section.
///
/// Hidden sections get `display: none`. A small script follows `data-action` clicks on the
/// navigation buttons so the page can be browsed without the controller.
pub fn render_report(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{}</title>", escape_xml(title));
    out.push_str(STYLE);
    out.push_str("</head>\n<body>\n");
    for section in sections {
        let display = if section.visible { "block" } else { "none" };
        let _ = writeln!(
            out,
            "<div id=\"{}\" class=\"scene\" style=\"display: {display}\">",
            section.id.element_id()
        );
        out.push_str(&section.svg);
        out.push_str("</div>\n");
    }
    out.push_str(SCRIPT);
    out.push_str("</body>\n</html>\n");
    out
}

const STYLE: &str = "<style>
body { font-family: sans-serif; margin: 24px; }
.scene svg { max-width: 100%; height: auto; }
</style>
";

// Actions 1 and 2 are Next and Previous; state stepping needs the controller.
const SCRIPT: &str = "<script>
const scenes = Array.from(document.querySelectorAll('.scene'));
let active = Math.max(0, scenes.findIndex(s => s.style.display !== 'none'));
function show(i) {
  active = Math.min(scenes.length - 1, Math.max(0, i));
  scenes.forEach((s, j) => { s.style.display = j === active ? 'block' : 'none'; });
}
document.addEventListener('click', e => {
  const el = e.target.closest('[data-action]');
  if (!el) return;
  if (el.dataset.action === '1') show(active + 1);
  if (el.dataset.action === '2') show(active - 1);
});
document.addEventListener('keydown', e => {
  if (e.key === 'ArrowRight' && active === 0) show(1);
});
</script>
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_active_scene_is_displayed() {
        let sections: Vec<_> = SceneId::ALL
            .into_iter()
            .map(|id| Section {
                id,
                visible: id == SceneId::RoomTypes,
                svg: format!("<svg><!-- {id} --></svg>\n"),
            })
            .collect();
        let html = render_report("Listings & hosts", &sections);
        assert!(html.contains("<title>Listings &amp; hosts</title>"));
        assert!(html.contains(r#"<div id="scene5" class="scene" style="display: block">"#));
        assert_eq!(html.matches("display: block\"").count(), 1);
        assert_eq!(html.matches("display: none\"").count(), 6);
    }
}
