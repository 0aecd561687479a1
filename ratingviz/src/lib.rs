// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Genre rating charts.
//!
//! `ratingviz` reads a CSV of genres and the share of their titles falling into five rating
//! buckets, and draws it as a horizontal stacked bar chart:
//!
//! - one band per genre along y, the five buckets stacked left to right along x;
//! - a percent value axis, a genre axis, a title and a five-entry legend;
//! - hover tooltips showing each segment's share.
//!
//! The chart is appended as SVG to a container of a small [`Page`] model, which can be written
//! out as a standalone HTML document. Layout and marks come from [`ratingviz_charts`].
//!
//! ```no_run
//! use std::path::Path;
//! use ratingviz::{ChartConfig, ChartRenderer, Page};
//!
//! let page = Page::new("Ratings").with_container("visualization");
//! let mut renderer = ChartRenderer::new(ChartConfig::default(), page)?;
//! renderer.render(Path::new("data.csv"), "#visualization")?;
//! std::fs::write("chart.html", renderer.page().to_html())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod bucket;
mod config;
mod data;
mod error;
mod page;
mod render;
mod svg;

pub use bucket::{BUCKET_COUNT, Bucket, BucketTable, DEFAULT_BUCKET_COLORS, RATING_BUCKETS};
pub use config::{ChartConfig, MarginsConfig};
pub use data::{GENRE_COLUMN, GenreRow, TotalPolicy, apply_total_policy, load_rows, read_rows};
pub use error::{RenderError, RenderResult};
pub use page::{ConsoleEntry, Container, Page, selector_id};
pub use render::{ChartRenderer, RenderedChart};
pub use svg::{escape_xml, scene_to_svg};
