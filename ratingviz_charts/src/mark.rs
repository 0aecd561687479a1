// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer-agnostic marks.
//!
//! A [`Mark`] is a fully resolved visual primitive (rectangle, text run, or rule) with a stable
//! [`MarkId`] and a `z_index`. Chart builders emit marks; renderers only have to paint them.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;

/// Id distance between a guide's rules/swatches and their labels.
pub(crate) const LABEL_ID_OFFSET: u64 = 1 << 24;

/// Stable identity of a mark.
///
/// Guides allocate ids from an `id_base` plus a deterministic offset, so ids stay stable across
/// renders of the same chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Id for the segment of `series` in data row `row`, offset from `id_base`.
    pub fn for_segment(id_base: u64, series: usize, row: usize) -> Self {
        Self(id_base + ((series as u64) << 32) + row as u64)
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor position.
    Start,
    /// Text is centered on the anchor position.
    Middle,
    /// Text ends at the anchor position.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// The anchor `y` is the vertical middle of the text.
    Middle,
    /// The anchor `y` is the alphabetic baseline.
    Alphabetic,
    /// The anchor `y` is the top (hanging baseline).
    Hanging,
}

/// A filled rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Optional text to show in a hover tooltip.
    pub tooltip: Option<String>,
}

/// A single line of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// A stroked line segment (axis domains, ticks).
#[derive(Clone, Debug, PartialEq)]
pub struct RuleMark {
    /// Start point.
    pub p0: Point,
    /// End point.
    pub p1: Point,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

/// The resolved geometry and paint of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A filled rectangle.
    Rect(RectMark),
    /// A text run.
    Text(TextMark),
    /// A line segment.
    Rule(RuleMark),
}

/// A positioned visual primitive with stable identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable id.
    pub id: MarkId,
    /// Render ordering hint (see the `z_order` constants such as [`crate::SERIES_FILL`]).
    pub z_index: i32,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a rectangle mark.
    pub fn rect(id: MarkId, z_index: i32, rect: Rect, fill: impl Into<Brush>) -> Self {
        Self {
            id,
            z_index,
            payload: MarkPayload::Rect(RectMark {
                rect,
                fill: fill.into(),
                tooltip: None,
            }),
        }
    }

    /// Creates a rule mark.
    pub fn rule(
        id: MarkId,
        z_index: i32,
        p0: Point,
        p1: Point,
        stroke: impl Into<Brush>,
        stroke_width: f64,
    ) -> Self {
        Self {
            id,
            z_index,
            payload: MarkPayload::Rule(RuleMark {
                p0,
                p1,
                stroke: stroke.into(),
                stroke_width,
            }),
        }
    }

    /// Creates a text mark.
    pub fn text(id: MarkId, z_index: i32, text: TextMark) -> Self {
        Self {
            id,
            z_index,
            payload: MarkPayload::Text(text),
        }
    }

    /// Attaches tooltip text. No-op for non-rectangle marks.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        if let MarkPayload::Rect(r) = &mut self.payload {
            r.tooltip = Some(tooltip.into());
        }
        self
    }
}

/// An ordered collection of marks ready for painting.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    marks: Vec<Mark>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds marks to the scene.
    pub fn extend(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.marks.extend(marks);
    }

    /// Returns the number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns marks in paint order: by `z_index`, then by id.
    pub fn paint_order(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.iter().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Iterates over all text marks (in insertion order).
    pub fn texts(&self) -> impl Iterator<Item = &TextMark> {
        self.marks.iter().filter_map(|m| match &m.payload {
            MarkPayload::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Iterates over all rectangle marks (in insertion order).
    pub fn rects(&self) -> impl Iterator<Item = &RectMark> {
        self.marks.iter().filter_map(|m| match &m.payload {
            MarkPayload::Rect(r) => Some(r),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn paint_order_sorts_by_z_then_id() {
        let mut scene = Scene::new();
        scene.extend(vec![
            Mark::rect(MarkId(5), 10, Rect::ZERO, css::BLACK),
            Mark::rect(MarkId(9), 0, Rect::ZERO, css::BLACK),
            Mark::rect(MarkId(1), 10, Rect::ZERO, css::BLACK),
        ]);
        let ids: Vec<u64> = scene.paint_order().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![9, 1, 5]);
    }

    #[test]
    fn segment_ids_do_not_collide_across_series() {
        assert_ne!(MarkId::for_segment(0, 0, 1), MarkId::for_segment(0, 1, 0));
    }

    #[test]
    fn tooltip_only_attaches_to_rects() {
        let r = Mark::rect(MarkId(1), 0, Rect::ZERO, css::BLACK).with_tooltip("x");
        let MarkPayload::Rect(r) = r.payload else {
            panic!("expected rect payload");
        };
        assert_eq!(r.tooltip.as_deref(), Some("x"));

        let rule = Mark::rule(MarkId(2), 0, Point::ZERO, Point::ZERO, css::BLACK, 1.0)
            .with_tooltip("x");
        assert!(matches!(rule.payload, MarkPayload::Rule(_)), "rule stays a rule");
    }
}
