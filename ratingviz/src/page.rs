// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal document model: id'd containers, one tooltip element and a console.

use ratingviz_charts::Tooltip;

use crate::error::{RenderError, RenderResult};
use crate::svg::escape_xml;

/// A `<div id=...>` that rendered SVG is appended to.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    id: String,
    children: Vec<String>,
}

impl Container {
    /// Element id (without `#`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Appended markup, in append order.
    pub fn children(&self) -> &[String] {
        &self.children
    }
}

/// A diagnostic recorded on the page console.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleEntry {
    /// Severity.
    pub level: tracing::Level,
    /// Message text.
    pub message: String,
}

/// The document a chart is drawn into.
#[derive(Clone, Debug, Default)]
pub struct Page {
    title: String,
    containers: Vec<Container>,
    tooltip: Option<Tooltip>,
    console: Vec<ConsoleEntry>,
}

/// Returns the element id named by an id selector such as `#visualization`.
pub fn selector_id(selector: &str) -> RenderResult<&str> {
    let id = selector
        .strip_prefix('#')
        .filter(|id| {
            !id.is_empty()
                && id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
        .ok_or_else(|| RenderError::InvalidSelector(selector.to_owned()))?;
    Ok(id)
}

impl Page {
    /// Creates an empty page.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Adds an empty container with the given id.
    pub fn with_container(mut self, id: impl Into<String>) -> Self {
        self.containers.push(Container {
            id: id.into(),
            children: Vec::new(),
        });
        self
    }

    /// Finds the container matching an id selector.
    pub fn select(&self, selector: &str) -> RenderResult<&Container> {
        let id = selector_id(selector)?;
        self.containers
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| RenderError::ContainerNotFound(selector.to_owned()))
    }

    pub(crate) fn append(&mut self, selector: &str, markup: String) -> RenderResult<()> {
        let id = selector_id(selector)?;
        let container = self
            .containers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RenderError::ContainerNotFound(selector.to_owned()))?;
        container.children.push(markup);
        Ok(())
    }

    /// Returns the tooltip element, creating it on first use.
    pub fn ensure_tooltip(&mut self) -> &mut Tooltip {
        self.tooltip.get_or_insert_with(Tooltip::default)
    }

    /// Returns the tooltip element if it has been created.
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Returns the tooltip element mutably if it has been created.
    pub fn tooltip_mut(&mut self) -> Option<&mut Tooltip> {
        self.tooltip.as_mut()
    }

    /// Containers in document order.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Console entries in the order they were recorded.
    pub fn console(&self) -> &[ConsoleEntry] {
        &self.console
    }

    /// Records an error on the console.
    pub fn console_error(&mut self, message: impl Into<String>) {
        self.console.push(ConsoleEntry {
            level: tracing::Level::ERROR,
            message: message.into(),
        });
    }

    /// Serializes the page as a standalone HTML document with hover behavior for bars.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape_xml(&self.title)));
        out.push_str(STYLE);
        out.push_str("</head>\n<body>\n");
        for c in &self.containers {
            out.push_str(&format!("<div id=\"{}\">\n", escape_xml(&c.id)));
            for child in &c.children {
                out.push_str(child);
            }
            out.push_str("</div>\n");
        }
        if let Some(tooltip) = &self.tooltip {
            let style = tooltip.style();
            out.push_str("<div class=\"tooltip\" style=\"opacity: 0\"></div>\n");
            out.push_str("<script>\n");
            out.push_str(&format!(
                "const FADE_IN_MS = {};\nconst FADE_OUT_MS = {};\nconst OFFSET_X = {};\nconst OFFSET_Y = {};\n",
                style.fade_in_ms, style.fade_out_ms, style.offset.x, style.offset.y
            ));
            out.push_str(HOVER_SCRIPT);
            out.push_str("</script>\n");
        }
        out.push_str("</body>\n</html>\n");
        out
    }
}

const STYLE: &str = r#"<style>
body { font-family: sans-serif; }
.tooltip {
  position: absolute;
  pointer-events: none;
  padding: 4px 8px;
  background: rgba(255, 255, 255, 0.95);
  border: 1px solid #999;
  border-radius: 4px;
  font-size: 12px;
}
.bar:hover { stroke: #333; stroke-width: 1; }
</style>
"#;

const HOVER_SCRIPT: &str = r#"const tip = document.querySelector("div.tooltip");
document.querySelectorAll("rect.bar").forEach((bar) => {
  bar.addEventListener("mouseover", (event) => {
    tip.style.transition = `opacity ${FADE_IN_MS}ms`;
    tip.style.opacity = 1;
    tip.textContent = bar.dataset.tooltip;
    tip.style.left = `${event.pageX + OFFSET_X}px`;
    tip.style.top = `${event.pageY + OFFSET_Y}px`;
  });
  bar.addEventListener("mouseout", () => {
    tip.style.transition = `opacity ${FADE_OUT_MS}ms`;
    tip.style.opacity = 0;
  });
});
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_id_selectors_are_accepted() {
        assert_eq!(selector_id("#visualization").unwrap(), "visualization");
        for bad in ["visualization", "#", ".chart", "#a b", "div#x"] {
            assert!(
                matches!(selector_id(bad), Err(RenderError::InvalidSelector(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn missing_container_is_reported() {
        let mut page = Page::new("t").with_container("visualization");
        assert!(page.select("#visualization").is_ok());
        let err = page.append("#other", String::from("<svg/>")).unwrap_err();
        assert!(matches!(err, RenderError::ContainerNotFound(_)), "{err}");
    }

    #[test]
    fn tooltip_is_created_once() {
        let mut page = Page::new("t");
        assert!(page.tooltip().is_none());
        page.ensure_tooltip().show("30.0%", kurbo::Point::new(1.0, 1.0), 0.0);
        page.ensure_tooltip();
        assert_eq!(page.tooltip().unwrap().text(), "30.0%");
        let html = page.to_html();
        assert_eq!(html.matches("class=\"tooltip\"").count(), 1);
        assert!(html.contains("const FADE_IN_MS = 100;"), "{html}");
        assert!(html.contains("const OFFSET_Y = -25;"), "{html}");
    }

    #[test]
    fn html_embeds_container_children() {
        let mut page = Page::new("Ratings & genres").with_container("visualization");
        page.append("#visualization", String::from("<svg></svg>\n"))
            .unwrap();
        let html = page.to_html();
        assert!(html.contains("<title>Ratings &amp; genres</title>"), "{html}");
        assert!(
            html.contains("<div id=\"visualization\">\n<svg></svg>\n</div>"),
            "{html}"
        );
    }
}
