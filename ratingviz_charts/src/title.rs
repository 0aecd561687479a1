// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart titles.

extern crate alloc;

use alloc::string::String;

use kurbo::{Point, Rect};
use peniko::Brush;

use crate::mark::{Mark, MarkId, TextAnchor, TextBaseline, TextMark};
use crate::z_order;

/// A chart-level title, centered above the plot.
#[derive(Clone, Debug)]
pub struct TitleSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Title text (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Distance from the plot top edge to the title baseline.
    pub offset: f64,
}

impl TitleSpec {
    /// Creates a title spec with default styling.
    pub fn new(id: MarkId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            font_size: 18.0,
            fill: Brush::default(),
            offset: 10.0,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the baseline distance above the plot.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Emits the title mark for the given plot rectangle.
    pub fn mark(&self, plot: Rect) -> Mark {
        Mark::text(
            self.id,
            z_order::TITLES,
            TextMark {
                pos: Point::new(0.5 * (plot.x0 + plot.x1), plot.y0 - self.offset),
                text: self.text.clone(),
                font_size: self.font_size,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Alphabetic,
                fill: self.fill.clone(),
            },
        )
    }
}
