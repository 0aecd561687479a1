// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Convenience builder for horizontal stacked bar charts.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::{AxisScale, AxisSpec};
use crate::format::format_percent;
use crate::layout::{ChartLayout, Margins, Size};
use crate::legend::{LegendItem, LegendSwatches};
use crate::mark::Scene;
use crate::scale::{BandDomain, ScaleBand, ScaleLinear};
use crate::stack::{Stack, StackError, StackLayout, StackOffset, StackSegment};
use crate::stacked_bar_mark::StackedBarMarkSpec;
use crate::title::TitleSpec;

const BAR_ID_BASE: u64 = 0;
const X_AXIS_ID_BASE: u64 = 1 << 48;
const Y_AXIS_ID_BASE: u64 = 2 << 48;
const LEGEND_ID_BASE: u64 = 3 << 48;

/// Errors returned when building a [`StackedBarChart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackedBarChartError {
    /// No series were configured.
    NoSeries,
    /// Series labels and fills have different lengths.
    SeriesMismatch {
        /// Number of labels.
        labels: usize,
        /// Number of fills.
        fills: usize,
    },
    /// Category labels and value rows have different lengths.
    RowCountMismatch {
        /// Number of category labels.
        categories: usize,
        /// Number of value rows.
        rows: usize,
    },
    /// The stack layout rejected the input.
    Stack(StackError),
}

impl core::fmt::Display for StackedBarChartError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoSeries => write!(f, "chart has no series"),
            Self::SeriesMismatch { labels, fills } => {
                write!(f, "{labels} series labels but {fills} series fills")
            }
            Self::RowCountMismatch { categories, rows } => {
                write!(f, "{categories} category labels but {rows} value rows")
            }
            Self::Stack(err) => write!(f, "stack layout failed: {err}"),
        }
    }
}

impl core::error::Error for StackedBarChartError {}

impl From<StackError> for StackedBarChartError {
    fn from(value: StackError) -> Self {
        Self::Stack(value)
    }
}

/// A horizontal stacked-bar chart description.
///
/// Rows are categories along y (one band per distinct category), series are stacked along x.
#[derive(Clone, Debug)]
pub struct StackedBarChartSpec {
    /// Outer chart size.
    pub view: Size,
    /// Margins around the plot.
    pub margins: Margins,
    /// Series labels in stacking order (also the legend order).
    pub series_labels: Vec<String>,
    /// Series fills, parallel to `series_labels`.
    pub series_fills: Vec<Brush>,
    /// Optional title centered above the plot.
    pub title: Option<TitleSpec>,
    /// Band padding (inner and outer) as a fraction of the band step.
    pub band_padding: f64,
    /// Domain of the stacked value axis.
    pub x_domain: (f64, f64),
    /// Approximate tick count of the value axis.
    pub tick_count: usize,
    /// Decimals of value axis tick labels (percent).
    pub tick_decimals: usize,
    /// Decimals of tooltip text (percent).
    pub tooltip_decimals: usize,
    /// Horizontal gap between the plot's right edge and the legend.
    pub legend_offset: f64,
    /// Stack baseline mode.
    pub offset: StackOffset,
}

impl StackedBarChartSpec {
    /// Creates a chart spec with a 1000x600 view, margins `40/200/40/150`, band padding `0.1`,
    /// a `[0, 1]` value domain and percent ticks.
    pub fn new(
        series_labels: Vec<String>,
        series_fills: Vec<Brush>,
    ) -> Result<Self, StackedBarChartError> {
        if series_labels.is_empty() {
            return Err(StackedBarChartError::NoSeries);
        }
        if series_labels.len() != series_fills.len() {
            return Err(StackedBarChartError::SeriesMismatch {
                labels: series_labels.len(),
                fills: series_fills.len(),
            });
        }
        Ok(Self {
            view: Size::new(1000.0, 600.0),
            margins: Margins::new(40.0, 200.0, 40.0, 150.0),
            series_labels,
            series_fills,
            title: None,
            band_padding: 0.1,
            x_domain: (0.0, 1.0),
            tick_count: 10,
            tick_decimals: 0,
            tooltip_decimals: 1,
            legend_offset: 20.0,
            offset: StackOffset::Zero,
        })
    }

    /// Sets the title.
    pub fn with_title(mut self, title: TitleSpec) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the outer size and margins.
    pub fn with_view(mut self, view: Size, margins: Margins) -> Self {
        self.view = view;
        self.margins = margins;
        self
    }

    /// Sets the band padding.
    pub fn with_band_padding(mut self, padding: f64) -> Self {
        self.band_padding = padding;
        self
    }

    /// Sets the stack baseline mode.
    pub fn with_offset(mut self, offset: StackOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the value axis tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Returns the legend items in series order.
    pub fn legend_items(&self) -> Vec<LegendItem> {
        self.series_labels
            .iter()
            .zip(&self.series_fills)
            .map(|(label, fill)| LegendItem {
                label: label.clone(),
                fill: fill.clone(),
            })
            .collect()
    }

    /// Lays out and generates all marks for `categories` (one per row) and their `rows` of
    /// per-series values.
    pub fn build<C, R>(
        &self,
        categories: &[C],
        rows: &[R],
    ) -> Result<StackedBarChart, StackedBarChartError>
    where
        C: AsRef<str>,
        R: AsRef<[f64]>,
    {
        if categories.len() != rows.len() {
            return Err(StackedBarChartError::RowCountMismatch {
                categories: categories.len(),
                rows: rows.len(),
            });
        }

        let stack = Stack::new(self.series_labels.len())
            .with_offset(self.offset)
            .layout(rows)?;

        let layout = ChartLayout::from_margins(self.view, self.margins);
        let plot = layout.plot;

        let domain = BandDomain::new(categories.iter().map(|c| String::from(c.as_ref())));
        let band =
            ScaleBand::new((0.0, plot.height()), domain.len()).with_padding(self.band_padding);
        let x_scale = ScaleLinear::new(self.x_domain, (0.0, plot.width()));

        // Row -> band, collapsing repeated categories onto their first band.
        let row_band: Vec<usize> = categories
            .iter()
            .map(|c| domain.index_of(c.as_ref()).unwrap_or(0))
            .collect();

        let tooltip_decimals = self.tooltip_decimals;
        let bars = StackedBarMarkSpec::new(band, x_scale, plot.origin())
            .with_id_base(BAR_ID_BASE)
            .with_band_index(move |row| row_band.get(row).copied().unwrap_or(0))
            .with_series_fills(self.series_fills.clone())
            .with_tooltip(move |seg| format_percent(seg.span(), tooltip_decimals));

        let mut scene = Scene::new();
        let bar_marks = bars.marks(&stack);
        let segment_rects = stack
            .segments()
            .map(|seg| (*seg, bars.segment_rect(seg)))
            .collect();
        scene.extend(bar_marks);

        let tick_decimals = self.tick_decimals;
        let x_axis = AxisSpec::bottom(X_AXIS_ID_BASE)
            .with_tick_count(self.tick_count)
            .with_tick_formatter(move |v, _step| format_percent(v, tick_decimals));
        scene.extend(x_axis.marks(&AxisScale::Linear(x_scale), plot));

        let y_axis = AxisSpec::left(Y_AXIS_ID_BASE);
        scene.extend(y_axis.marks(
            &AxisScale::Band {
                scale: band,
                labels: domain.labels().to_vec(),
            },
            plot,
        ));

        if let Some(title) = &self.title {
            scene.extend([title.mark(plot)]);
        }

        let legend = LegendSwatches::new(
            LEGEND_ID_BASE,
            Point::new(plot.x1 + self.legend_offset, plot.y0),
            self.legend_items(),
        )
        .with_text_fill(css::BLACK);
        scene.extend(legend.marks());

        Ok(StackedBarChart {
            layout,
            band,
            x_scale,
            domain,
            stack,
            segment_rects,
            legend,
            tooltip_decimals,
            scene,
        })
    }
}

/// A laid-out stacked bar chart: scales, stacked spans, and the marks to paint.
#[derive(Clone, Debug)]
pub struct StackedBarChart {
    layout: ChartLayout,
    band: ScaleBand,
    x_scale: ScaleLinear,
    domain: BandDomain,
    stack: StackLayout,
    segment_rects: Vec<(StackSegment, Rect)>,
    legend: LegendSwatches,
    tooltip_decimals: usize,
    scene: Scene,
}

impl StackedBarChart {
    /// Returns the arranged view/plot rectangles.
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Returns the category band scale (plot-local).
    pub fn band(&self) -> &ScaleBand {
        &self.band
    }

    /// Returns the value scale (plot-local).
    pub fn x_scale(&self) -> &ScaleLinear {
        &self.x_scale
    }

    /// Returns the distinct categories in band order.
    pub fn categories(&self) -> &BandDomain {
        &self.domain
    }

    /// Returns the stacked spans.
    pub fn stack(&self) -> &StackLayout {
        &self.stack
    }

    /// Returns the legend.
    pub fn legend(&self) -> &LegendSwatches {
        &self.legend
    }

    /// Returns all marks.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the scene-space rectangle of every segment, series-major.
    pub fn segment_rects(&self) -> &[(StackSegment, Rect)] {
        &self.segment_rects
    }

    /// Returns the topmost segment under `point` (scene coordinates).
    pub fn segment_at(&self, point: Point) -> Option<&StackSegment> {
        self.segment_rects
            .iter()
            .rev()
            .find(|(_, r)| r.contains(point))
            .map(|(seg, _)| seg)
    }

    /// Tooltip text for a segment: its share as a percentage.
    pub fn tooltip_text(&self, seg: &StackSegment) -> String {
        format_percent(seg.span(), self.tooltip_decimals)
    }
}
