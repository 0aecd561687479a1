// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! A vertical list of color swatches with text labels, one row per item, in item order.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::color::palette::css;
use peniko::{Brush, Color};

use crate::mark::{LABEL_ID_OFFSET, Mark, MarkId, TextAnchor, TextBaseline, TextMark};
use crate::z_order;

/// A simple legend row item.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// A positioned legend: swatch squares with labels to their right.
#[derive(Clone, Debug)]
pub struct LegendSwatches {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// Legend origin (top-left of the first swatch).
    pub origin: Point,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Distance between the tops of consecutive rows.
    pub row_step: f64,
    /// Label x offset from the row origin.
    pub label_dx: f64,
    /// Label baseline y offset from the row origin.
    pub label_dy: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatches {
    /// Creates a legend with 18px swatches on a 25px row step and labels at `(24, 13)`.
    pub fn new(id_base: u64, origin: Point, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            origin,
            swatch_size: 18.0,
            row_step: 25.0,
            label_dx: 24.0,
            label_dy: 13.0,
            font_size: 10.0,
            text_fill: css::BLACK.into(),
            items,
        }
    }

    /// Set the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the label text paint.
    pub fn with_text_fill(mut self, text_fill: impl Into<Brush>) -> Self {
        self.text_fill = text_fill.into();
        self
    }

    /// Returns the swatch rectangle of item `i`.
    pub fn swatch_rect(&self, i: usize) -> Rect {
        let y = self.origin.y + i as f64 * self.row_step;
        Rect::new(
            self.origin.x,
            y,
            self.origin.x + self.swatch_size,
            y + self.swatch_size,
        )
    }

    /// Generate legend marks (swatch rect + label text per item).
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::with_capacity(2 * self.items.len());
        for (i, item) in self.items.iter().enumerate() {
            let swatch = self.swatch_rect(i);
            out.push(Mark::rect(
                MarkId::from_raw(self.id_base + i as u64),
                z_order::LEGEND_SWATCHES,
                swatch,
                item.fill.clone(),
            ));
            out.push(Mark::text(
                MarkId::from_raw(self.id_base + LABEL_ID_OFFSET + i as u64),
                z_order::LEGEND_LABELS,
                TextMark {
                    pos: Point::new(swatch.x0 + self.label_dx, swatch.y0 + self.label_dy),
                    text: item.label.clone(),
                    font_size: self.font_size,
                    anchor: TextAnchor::Start,
                    baseline: TextBaseline::Alphabetic,
                    fill: self.text_fill.clone(),
                },
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::mark::MarkPayload;

    #[test]
    fn rows_step_down_from_origin() {
        let legend = LegendSwatches::new(
            1,
            Point::new(670.0, 0.0),
            vec![
                LegendItem::solid("a", css::RED),
                LegendItem::solid("b", css::BLUE),
            ],
        );
        assert_eq!(legend.swatch_rect(0), Rect::new(670.0, 0.0, 688.0, 18.0));
        assert_eq!(legend.swatch_rect(1), Rect::new(670.0, 25.0, 688.0, 43.0));

        let marks = legend.marks();
        assert_eq!(marks.len(), 4);
        let MarkPayload::Text(label) = &marks[3].payload else {
            panic!("expected label text");
        };
        assert_eq!(label.text, "b");
        assert_eq!(label.pos, Point::new(694.0, 38.0));
    }

    #[test]
    fn ids_stay_unique_for_many_items() {
        let items = (0..1500)
            .map(|i| LegendItem::solid(alloc::format!("item {i}"), css::RED))
            .collect();
        let marks = LegendSwatches::new(0, Point::ZERO, items).marks();
        let ids: alloc::collections::BTreeSet<MarkId> = marks.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 3000, "duplicate legend mark ids");
    }
}
