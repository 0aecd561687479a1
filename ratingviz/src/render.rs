// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart renderer: CSV in, SVG appended to a page.

use std::path::Path;

use kurbo::Point;
use peniko::Brush;
use ratingviz_charts::{
    MarkId, StackOffset, StackSegment, StackedBarChart, StackedBarChartSpec, TitleSpec,
};

use crate::bucket::{BucketTable, parse_fill};
use crate::config::ChartConfig;
use crate::data::{GenreRow, TotalPolicy, apply_total_policy, load_rows, read_rows};
use crate::error::{RenderError, RenderResult};
use crate::page::{Page, selector_id};
use crate::svg::scene_to_svg;

const TITLE_ID: MarkId = MarkId(4 << 48);

/// A chart that has been laid out and serialized.
#[derive(Clone, Debug)]
pub struct RenderedChart {
    rows: Vec<GenreRow>,
    chart: StackedBarChart,
    svg: String,
}

impl RenderedChart {
    /// Rows as loaded. Under [`TotalPolicy::Normalize`] the stack layout rescales them.
    pub fn rows(&self) -> &[GenreRow] {
        &self.rows
    }

    /// Scales, stack layout and marks.
    pub fn chart(&self) -> &StackedBarChart {
        &self.chart
    }

    /// The `<svg>` markup.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Legend labels in display order.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.chart
            .legend()
            .items
            .iter()
            .map(|item| item.label.as_str())
            .collect()
    }

    /// The segment under `point` in SVG coordinates.
    pub fn segment_at(&self, point: Point) -> Option<&StackSegment> {
        self.chart.segment_at(point)
    }

    /// Tooltip text for the segment under `point`.
    pub fn tooltip_at(&self, point: Point) -> Option<String> {
        self.segment_at(point).map(|seg| self.chart.tooltip_text(seg))
    }
}

/// Draws genre rating charts into a [`Page`].
#[derive(Debug)]
pub struct ChartRenderer {
    config: ChartConfig,
    buckets: BucketTable,
    page: Page,
}

impl ChartRenderer {
    /// Creates a renderer drawing into `page`.
    pub fn new(config: ChartConfig, page: Page) -> RenderResult<Self> {
        config.validate()?;
        let buckets = BucketTable::with_colors(&config.colors)?;
        Ok(Self {
            config,
            buckets,
            page,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The stacked series.
    pub fn buckets(&self) -> &BucketTable {
        &self.buckets
    }

    /// The page being drawn into.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Consumes the renderer, returning its page.
    pub fn into_page(self) -> Page {
        self.page
    }

    /// Loads the CSV at `source` and appends the chart to the container matching `selector`.
    ///
    /// Any failure aborts the render before the page is touched: it is logged, recorded once on
    /// the page console and returned. No retry is attempted.
    #[tracing::instrument(skip(self, source), fields(source = %source.display()))]
    pub fn render(&mut self, source: &Path, selector: &str) -> RenderResult<RenderedChart> {
        let result = load_rows(source).and_then(|rows| self.draw(rows, selector));
        self.report(result)
    }

    /// Like [`ChartRenderer::render`], reading CSV text from memory.
    #[tracing::instrument(skip(self, csv))]
    pub fn render_str(&mut self, csv: &str, selector: &str) -> RenderResult<RenderedChart> {
        let result = read_rows(csv.as_bytes()).and_then(|rows| self.draw(rows, selector));
        self.report(result)
    }

    /// Lays out `rows` and serializes them without touching the page.
    pub fn build(&self, rows: Vec<GenreRow>) -> RenderResult<RenderedChart> {
        if rows.is_empty() {
            return Err(RenderError::EmptyDataset);
        }
        apply_total_policy(
            &rows,
            self.config.total_policy,
            self.config.total_tolerance,
        )?;
        let offset = match self.config.total_policy {
            TotalPolicy::Normalize => StackOffset::Normalize,
            TotalPolicy::Reject | TotalPolicy::Accept => StackOffset::Zero,
        };

        let fills: Vec<Brush> = self.buckets.fills().into_iter().map(Brush::from).collect();
        let title = TitleSpec::new(TITLE_ID, self.config.title.clone())
            .with_font_size(self.config.title_font_size)
            .with_fill(parse_fill(&self.config.title_color)?);
        let spec = StackedBarChartSpec::new(self.buckets.labels(), fills)?
            .with_view(self.config.view(), self.config.margins())
            .with_band_padding(self.config.band_padding)
            .with_tick_count(self.config.tick_count)
            .with_offset(offset)
            .with_title(title);

        let genres: Vec<&str> = rows.iter().map(|r| r.genre.as_str()).collect();
        let values: Vec<&[f64]> = rows.iter().map(|r| r.values.as_slice()).collect();
        let chart = spec.build(&genres, &values)?;
        let svg = scene_to_svg(chart.scene(), self.config.view());

        tracing::debug!(
            rows = rows.len(),
            bands = chart.band().count(),
            marks = chart.scene().len(),
            "laid out chart"
        );
        Ok(RenderedChart { rows, chart, svg })
    }

    /// Simulates the pointer entering the chart at `point` (SVG coordinates) at `now_ms`.
    ///
    /// Returns the tooltip text when the pointer is over a bar.
    pub fn pointer_over(
        &mut self,
        chart: &RenderedChart,
        point: Point,
        now_ms: f64,
    ) -> Option<String> {
        let text = chart.tooltip_at(point)?;
        self.page
            .ensure_tooltip()
            .show(text.clone(), point, now_ms);
        Some(text)
    }

    /// Simulates the pointer leaving a bar at `now_ms`.
    pub fn pointer_out(&mut self, now_ms: f64) {
        if let Some(tooltip) = self.page.tooltip_mut() {
            tooltip.hide(now_ms);
        }
    }

    fn draw(&mut self, rows: Vec<GenreRow>, selector: &str) -> RenderResult<RenderedChart> {
        selector_id(selector)?;
        let rendered = self.build(rows)?;
        self.page.select(selector)?;
        self.page.ensure_tooltip();
        self.page.append(selector, rendered.svg.clone())?;
        tracing::info!(
            genres = rendered.chart.band().count(),
            selector,
            "chart drawn"
        );
        Ok(rendered)
    }

    fn report(&mut self, result: RenderResult<RenderedChart>) -> RenderResult<RenderedChart> {
        if let Err(err) = &result {
            tracing::error!(error = %err, "error drawing chart");
            self.page.console_error(format!("Error drawing chart: {err}"));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Genre,below_5_5,5_to_6_5,6_5_to_7_5,7_5_to_8_5,above_8_5\n";
    const CSV: &str = "Genre,below_5_5,5_to_6_5,6_5_to_7_5,7_5_to_8_5,above_8_5\n\
                       Action,0.2,0.3,0.3,0.1,0.1\n\
                       Drama,0.1,0.2,0.4,0.2,0.1\n";

    fn renderer() -> ChartRenderer {
        ChartRenderer::new(
            ChartConfig::default(),
            Page::new("ratings").with_container("visualization"),
        )
        .unwrap()
    }

    #[test]
    fn build_does_not_touch_the_page() {
        let r = renderer();
        let rows = read_rows(CSV.as_bytes()).unwrap();
        let chart = r.build(rows).unwrap();
        assert!(chart.svg().contains("Rating according to genres"));
        assert!(r.page().tooltip().is_none());
        assert!(r.page().containers()[0].children().is_empty());
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let mut r = renderer();
        let err = r.render_str(HEADER, "#visualization").unwrap_err();
        assert!(matches!(err, RenderError::EmptyDataset), "{err}");
        assert_eq!(r.page().console().len(), 1);
    }

    #[test]
    fn hover_fades_tooltip_in_and_out() {
        let mut r = renderer();
        let chart = r.render_str(CSV, "#visualization").unwrap();
        let (_, rect) = chart
            .chart()
            .segment_rects()
            .iter()
            .find(|(s, _)| s.row == 0 && s.series == 2)
            .copied()
            .unwrap();

        let text = r.pointer_over(&chart, rect.center(), 1000.0).unwrap();
        assert_eq!(text, "30.0%");
        let tip = r.page().tooltip().unwrap();
        assert_eq!(tip.position(), rect.center() + kurbo::Vec2::new(10.0, -25.0));
        assert_eq!(tip.opacity_at(1050.0), 0.5);
        assert_eq!(tip.opacity_at(1100.0), 1.0);

        r.pointer_out(1200.0);
        let tip = r.page().tooltip().unwrap();
        assert_eq!(tip.opacity_at(1300.0), 0.5);
        assert_eq!(tip.opacity_at(1400.0), 0.0);
    }

    #[test]
    fn normalize_policy_stacks_rows_to_full_width() {
        let config = ChartConfig {
            total_policy: TotalPolicy::Normalize,
            ..ChartConfig::default()
        };
        let r = ChartRenderer::new(config, Page::new("ratings")).unwrap();
        let rows = read_rows(format!("{HEADER}Action,2,3,3,1,1\n").as_bytes()).unwrap();
        let chart = r.build(rows).unwrap();
        assert_eq!(chart.rows()[0].values, [2.0, 3.0, 3.0, 1.0, 1.0]);
        let total = chart.chart().stack().row_total(0).unwrap();
        assert!((total - 1.0).abs() < 1e-12, "row total {total}");
        assert!(chart.svg().contains(r#"data-tooltip="30.0%""#));
    }

    #[test]
    fn ties_in_tooltips_round_up() {
        let r = renderer();
        let rows =
            read_rows(format!("{HEADER}Action,0.0625,0.3125,0.3,0.2,0.125\n").as_bytes()).unwrap();
        let chart = r.build(rows).unwrap();
        let texts: Vec<String> = chart
            .chart()
            .stack()
            .row(0)
            .unwrap()
            .iter()
            .map(|seg| chart.chart().tooltip_text(seg))
            .collect();
        assert_eq!(texts, vec!["6.3%", "31.3%", "30.0%", "20.0%", "12.5%"]);
    }

    #[test]
    fn pointer_outside_bars_shows_nothing() {
        let mut r = renderer();
        let chart = r.render_str(CSV, "#visualization").unwrap();
        assert!(r.pointer_over(&chart, Point::new(1.0, 1.0), 0.0).is_none());
        assert_eq!(r.page().tooltip().unwrap().opacity_at(10.0), 0.0);
    }
}
