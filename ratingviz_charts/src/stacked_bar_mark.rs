// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal stacked bar mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;

use crate::mark::{Mark, MarkId};
use crate::scale::{ScaleBand, ScaleLinear};
use crate::stack::{StackLayout, StackSegment};

/// Horizontal stacked bars read from a [`StackLayout`].
///
/// This generates one rectangle per `(row, series)` span: the band scale places the row
/// vertically, the linear scale maps `[start, end)` horizontally. Both scales are plot-local;
/// `origin` is the plot's top-left corner in scene coordinates.
#[derive(Clone)]
pub struct StackedBarMarkSpec {
    /// Stable-id base; see [`MarkId::for_segment`].
    pub id_base: u64,
    /// Band scale used for bar positions along y.
    pub band: ScaleBand,
    /// Linear scale used for stacked values along x.
    pub x_scale: ScaleLinear,
    /// Plot origin in scene coordinates.
    pub origin: Point,
    /// Mapping from data rows to band indices.
    ///
    /// By default, row `i` is drawn in band `i` (clamped to the last band).
    pub band_index: Arc<dyn Fn(usize) -> usize>,
    /// Per-series fill palette; series past the end repeat the palette.
    pub series_fills: Vec<Brush>,
    /// Optional tooltip text per segment.
    pub tooltip: Option<Arc<dyn Fn(&StackSegment) -> String>>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl core::fmt::Debug for StackedBarMarkSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StackedBarMarkSpec")
            .field("id_base", &self.id_base)
            .field("band", &self.band)
            .field("x_scale", &self.x_scale)
            .field("origin", &self.origin)
            .field("band_index", &"<fn>")
            .field("series_fills", &self.series_fills.len())
            .field("tooltip", &self.tooltip.is_some())
            .field("z_index", &self.z_index)
            .finish()
    }
}

impl StackedBarMarkSpec {
    /// Creates a stacked bar mark spec with an identity row-to-band mapping.
    pub fn new(band: ScaleBand, x_scale: ScaleLinear, origin: Point) -> Self {
        let count = band.count();
        Self {
            id_base: 0,
            band,
            x_scale,
            origin,
            band_index: Arc::new(move |row| row.min(count.saturating_sub(1))),
            series_fills: Vec::new(),
            tooltip: None,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the row-to-band mapping.
    pub fn with_band_index(mut self, f: impl Fn(usize) -> usize + 'static) -> Self {
        self.band_index = Arc::new(f);
        self
    }

    /// Uses a per-series fill palette.
    pub fn with_series_fills(mut self, fills: Vec<Brush>) -> Self {
        self.series_fills = fills;
        self
    }

    /// Attaches tooltip text produced from each segment.
    pub fn with_tooltip(mut self, f: impl Fn(&StackSegment) -> String + 'static) -> Self {
        self.tooltip = Some(Arc::new(f));
        self
    }

    /// Sets the mark id base.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.id_base = id_base;
        self
    }

    /// Returns the scene-space rectangle of a segment.
    pub fn segment_rect(&self, seg: &StackSegment) -> Rect {
        let a = self.x_scale.map(seg.start);
        let b = self.x_scale.map(seg.end);
        let y = self.band.x((self.band_index)(seg.row));
        Rect::new(
            self.origin.x + a.min(b),
            self.origin.y + y,
            self.origin.x + a.max(b),
            self.origin.y + y + self.band.band_width(),
        )
    }

    fn fill(&self, series: usize) -> Brush {
        if self.series_fills.is_empty() {
            return Brush::default();
        }
        self.series_fills[series % self.series_fills.len()].clone()
    }

    /// Generates marks for every span, series-major.
    pub fn marks(&self, layout: &StackLayout) -> Vec<Mark> {
        layout
            .segments()
            .map(|seg| {
                let mark = Mark::rect(
                    MarkId::for_segment(self.id_base, seg.series, seg.row),
                    self.z_index,
                    self.segment_rect(seg),
                    self.fill(seg.series),
                );
                match &self.tooltip {
                    Some(f) => mark.with_tooltip(f(seg)),
                    None => mark,
                }
            })
            .collect()
    }
}
