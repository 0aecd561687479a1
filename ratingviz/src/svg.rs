// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of chart scenes.

use peniko::Brush;
use ratingviz_charts::{MarkPayload, Scene, Size, TextAnchor, TextBaseline};

/// Serializes `scene` as a standalone `<svg>` element of the given size.
///
/// Marks are written in paint order. Rectangles carrying tooltip text become
/// `<rect class="bar" data-tooltip="...">` so page scripts can attach hover behavior.
pub fn scene_to_svg(scene: &Scene, view: Size) -> String {
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = view.width,
        h = view.height,
    ));
    out.push('\n');

    for mark in scene.paint_order() {
        match &mark.payload {
            MarkPayload::Rect(r) => {
                out.push_str("<rect");
                if r.tooltip.is_some() {
                    out.push_str(r#" class="bar""#);
                }
                out.push_str(&format!(
                    r#" x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                ));
                write_paint_attr(&mut out, "fill", &r.fill);
                if let Some(tip) = &r.tooltip {
                    out.push_str(&format!(r#" data-tooltip="{}""#, escape_xml(tip)));
                }
                out.push_str("/>\n");
            }
            MarkPayload::Rule(l) => {
                out.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                    l.p0.x, l.p0.y, l.p1.x, l.p1.y
                ));
                write_paint_attr(&mut out, "stroke", &l.stroke);
                out.push_str(&format!(r#" stroke-width="{}"/>"#, l.stroke_width));
                out.push('\n');
            }
            MarkPayload::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                };
                let anchor = match t.anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                    TextAnchor::End => "end",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{baseline}" text-anchor="{anchor}""#,
                    t.pos.x, t.pos.y, t.font_size
                ));
                write_paint_attr(&mut out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, opacity)
        }
        _ => ("none".to_owned(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

/// Escapes text for use in XML content and attribute values.
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
