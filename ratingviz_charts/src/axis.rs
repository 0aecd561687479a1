// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! A single [`AxisSpec`] with an `orient` of top, bottom, left or right. Scales are expressed in
//! plot-local coordinates; [`AxisSpec::marks`] offsets everything by the plot origin.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use crate::format::format_tick_with_step;
use crate::mark::{LABEL_ID_OFFSET, Mark, MarkId, TextAnchor, TextBaseline, TextMark};
use crate::scale::{ScaleBand, ScaleLinear};
use crate::z_order;

/// A paint + width pair for stroked rules (domain lines, ticks).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            label_fill: rule.brush.clone(),
            rule,
            label_font_size: 10.0,
        }
    }
}

/// Axis orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed above the plot area.
    Top,
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
    /// A vertical axis placed to the right of the plot area.
    Right,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// The scale an axis describes, in plot-local coordinates.
#[derive(Clone, Debug)]
pub enum AxisScale {
    /// Continuous ticks from a linear scale.
    Linear(ScaleLinear),
    /// One tick per band, centered, labelled with the band's category.
    Band {
        /// The band scale.
        scale: ScaleBand,
        /// Labels in band order.
        labels: Vec<String>,
    },
}

/// An axis specification.
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks for continuous scales.
    pub tick_count: usize,
    /// Tick line length in pixels, pointing away from the plot.
    pub tick_size: f64,
    /// Gap between the tick end and the tick label.
    pub tick_padding: f64,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional tick label formatter for continuous scales.
    ///
    /// The second argument is the tick step, which can be used for consistent decimals.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("show_domain", &self.show_domain)
            .field("style", &self.style)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis with `tick_count = 10`, `tick_size = 6` and `tick_padding = 3`.
    pub fn new(id_base: u64, orient: AxisOrient) -> Self {
        Self {
            id_base,
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            show_domain: true,
            style: AxisStyle::default(),
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64) -> Self {
        Self::new(id_base, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64) -> Self {
        Self::new(id_base, AxisOrient::Left)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Enable or disable the axis domain line.
    pub fn with_domain(mut self, domain: bool) -> Self {
        self.show_domain = domain;
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Returns `(position, label)` pairs in plot-local coordinates along the axis.
    pub fn ticks(&self, scale: &AxisScale) -> Vec<(f64, String)> {
        match scale {
            AxisScale::Linear(s) => {
                let values = s.ticks(self.tick_count);
                let step = tick_step(&values);
                values
                    .into_iter()
                    .map(|v| (s.map(v), self.format_tick(v, step)))
                    .collect()
            }
            AxisScale::Band { scale, labels } => {
                let half = 0.5 * scale.band_width();
                labels
                    .iter()
                    .take(scale.count())
                    .enumerate()
                    .map(|(i, label)| (scale.x(i) + half, label.clone()))
                    .collect()
            }
        }
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    /// Generates axis marks (domain line, ticks, labels) along the given plot rectangle.
    pub fn marks(&self, scale: &AxisScale, plot: Rect) -> Vec<Mark> {
        let horizontal = self.orient.is_horizontal();
        // Base line the axis hangs off, and the direction ticks point in.
        let (base, dir) = match self.orient {
            AxisOrient::Top => (plot.y0, -1.0),
            AxisOrient::Bottom => (plot.y1, 1.0),
            AxisOrient::Left => (plot.x0, -1.0),
            AxisOrient::Right => (plot.x1, 1.0),
        };
        let origin = if horizontal { plot.x0 } else { plot.y0 };
        let point = |along: f64, across: f64| {
            if horizontal {
                Point::new(origin + along, base + dir * across)
            } else {
                Point::new(base + dir * across, origin + along)
            }
        };

        let mut out = Vec::new();
        let rule = &self.style.rule;

        if self.show_domain {
            let (p0, p1) = if horizontal {
                (Point::new(plot.x0, base), Point::new(plot.x1, base))
            } else {
                (Point::new(base, plot.y0), Point::new(base, plot.y1))
            };
            out.push(Mark::rule(
                MarkId::from_raw(self.id_base),
                z_order::AXIS_RULES,
                p0,
                p1,
                rule.brush.clone(),
                rule.stroke_width,
            ));
        }

        let (anchor, baseline) = match self.orient {
            AxisOrient::Top => (TextAnchor::Middle, TextBaseline::Alphabetic),
            AxisOrient::Bottom => (TextAnchor::Middle, TextBaseline::Hanging),
            AxisOrient::Left => (TextAnchor::End, TextBaseline::Middle),
            AxisOrient::Right => (TextAnchor::Start, TextBaseline::Middle),
        };
        let tick_size = self.tick_size.max(0.0);
        let label_offset = tick_size + self.tick_padding.max(0.0);

        for (i, (pos, label)) in self.ticks(scale).into_iter().enumerate() {
            out.push(Mark::rule(
                MarkId::from_raw(self.id_base + 1 + i as u64),
                z_order::AXIS_RULES,
                point(pos, 0.0),
                point(pos, tick_size),
                rule.brush.clone(),
                rule.stroke_width,
            ));
            out.push(Mark::text(
                MarkId::from_raw(self.id_base + LABEL_ID_OFFSET + i as u64),
                z_order::AXIS_LABELS,
                TextMark {
                    pos: point(pos, label_offset),
                    text: label,
                    font_size: self.style.label_font_size,
                    anchor,
                    baseline,
                    fill: self.style.label_fill.clone(),
                },
            ));
        }
        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::mark::MarkPayload;

    fn labels(marks: &[Mark]) -> Vec<(Point, String)> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some((t.pos, t.text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bottom_axis_places_percent_labels_below_plot() {
        let plot = Rect::new(150.0, 40.0, 800.0, 560.0);
        let scale = AxisScale::Linear(ScaleLinear::new((0.0, 1.0), (0.0, plot.width())));
        let axis = AxisSpec::bottom(0x100)
            .with_tick_formatter(|v, _| crate::format::format_percent(v, 0));
        let marks = axis.marks(&scale, plot);

        let texts = labels(&marks);
        assert_eq!(texts.len(), 11);
        assert_eq!(texts[0].1, "0%");
        assert_eq!(texts[5].1, "50%");
        assert_eq!(texts[10].1, "100%");
        assert_eq!(texts[0].0, Point::new(150.0, 560.0 + 9.0));
        assert!((texts[10].0.x - 800.0).abs() < 1e-9);
    }

    #[test]
    fn left_band_axis_labels_sit_at_band_centers() {
        let plot = Rect::new(150.0, 40.0, 800.0, 560.0);
        let band = ScaleBand::new((0.0, plot.height()), 2).with_padding(0.1);
        let scale = AxisScale::Band {
            scale: band,
            labels: vec!["Action".to_string(), "Drama".to_string()],
        };
        let marks = AxisSpec::left(0x200).marks(&scale, plot);
        let texts = labels(&marks);
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].1, "Action");
        let center = 40.0 + band.x(0) + 0.5 * band.band_width();
        assert!((texts[0].0.y - center).abs() < 1e-9);
        assert_eq!(texts[0].0.x, 150.0 - 9.0);
    }

    #[test]
    fn domain_line_can_be_disabled() {
        let plot = Rect::new(0.0, 0.0, 10.0, 10.0);
        let scale = AxisScale::Linear(ScaleLinear::new((0.0, 1.0), (0.0, 10.0)));
        let with = AxisSpec::bottom(0).with_tick_count(2).marks(&scale, plot);
        let without = AxisSpec::bottom(0)
            .with_tick_count(2)
            .with_domain(false)
            .marks(&scale, plot);
        assert_eq!(with.len(), without.len() + 1);
    }

    #[test]
    fn ids_stay_unique_for_many_bands() {
        let plot = Rect::new(0.0, 0.0, 100.0, 10_000.0);
        let labels: Vec<String> = (0..1500).map(|i| alloc::format!("g{i}")).collect();
        let scale = AxisScale::Band {
            scale: ScaleBand::new((0.0, plot.height()), labels.len()),
            labels,
        };
        let marks = AxisSpec::left(0).marks(&scale, plot);
        let ids: alloc::collections::BTreeSet<MarkId> = marks.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), marks.len(), "duplicate axis mark ids");
    }
}
