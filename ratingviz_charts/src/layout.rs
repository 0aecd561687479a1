// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Margin-based chart layout.
//!
//! The chart view is a fixed-size rectangle; the plot (data rectangle) is what remains after
//! subtracting per-side margins. Axes hang off the plot edges into the margins, the title sits
//! in the top margin and the legend in the right margin.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Per-side margins around the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot.
    pub bottom: f64,
    /// Space left of the plot.
    pub left: f64,
}

impl Margins {
    /// Creates margins in CSS order (top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds, with the origin at the top-left.
    pub view: Rect,
    /// The plot (data) rectangle.
    pub plot: Rect,
}

impl ChartLayout {
    /// Arranges a plot inside `view` leaving `margins` on each side.
    ///
    /// Negative margins are treated as zero; the plot never has a negative size.
    pub fn from_margins(view: Size, margins: Margins) -> Self {
        let left = margins.left.max(0.0);
        let top = margins.top.max(0.0);
        let plot_w = (view.width.max(0.0) - left - margins.right.max(0.0)).max(0.0);
        let plot_h = (view.height.max(0.0) - top - margins.bottom.max(0.0)).max(0.0);
        Self {
            view: Rect::new(0.0, 0.0, view.width.max(0.0), view.height.max(0.0)),
            plot: Rect::new(left, top, left + plot_w, top + plot_h),
        }
    }

    /// Plot width in chart units.
    pub fn plot_width(&self) -> f64 {
        self.plot.width()
    }

    /// Plot height in chart units.
    pub fn plot_height(&self) -> f64 {
        self.plot.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chart_margins_leave_a_650_by_520_plot() {
        let layout = ChartLayout::from_margins(
            Size::new(1000.0, 600.0),
            Margins::new(40.0, 200.0, 40.0, 150.0),
        );
        assert_eq!(layout.plot, Rect::new(150.0, 40.0, 800.0, 560.0));
        assert_eq!(layout.plot_width(), 650.0);
        assert_eq!(layout.plot_height(), 520.0);
        assert_eq!(layout.view, Rect::new(0.0, 0.0, 1000.0, 600.0));
    }

    #[test]
    fn oversized_margins_collapse_the_plot() {
        let layout =
            ChartLayout::from_margins(Size::new(100.0, 50.0), Margins::new(40.0, 80.0, 40.0, 80.0));
        assert_eq!(layout.plot_width(), 0.0);
        assert_eq!(layout.plot_height(), 0.0);
    }
}
