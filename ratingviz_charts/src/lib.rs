// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `ratingviz`.
//!
//! This crate is a small, renderer-agnostic layer:
//! - **Scales** map data values into screen coordinates.
//! - **Layouts** (stacking, margins) turn rows into positioned spans.
//! - **Guides** (axes, legends, titles) and series are emitted as [`Mark`]s that a renderer
//!   (SVG, canvas, ...) paints in `(z_index, id)` order.
//! - **Interaction** state (hover tooltips) is kept as plain data so it can be driven by any
//!   event source and tested without a browser.
//!
//! Text shaping and layout are out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod legend;
mod mark;
mod scale;
mod stack;
mod stacked_bar_chart;
mod stacked_bar_mark;
mod title;
mod tooltip;
mod z_order;

pub use axis::{AxisOrient, AxisScale, AxisSpec, AxisStyle, StrokeStyle};
pub use format::{format_percent, format_tick_with_step};
pub use layout::{ChartLayout, Margins, Size};
pub use legend::{LegendItem, LegendSwatches};
pub use mark::{
    Mark, MarkId, MarkPayload, RectMark, RuleMark, Scene, TextAnchor, TextBaseline, TextMark,
};
pub use scale::{BandDomain, ScaleBand, ScaleLinear};
pub use stack::{Stack, StackError, StackLayout, StackOffset, StackSegment};
pub use stacked_bar_chart::{StackedBarChart, StackedBarChartSpec, StackedBarChartError};
pub use stacked_bar_mark::StackedBarMarkSpec;
pub use title::TitleSpec;
pub use tooltip::{Tooltip, TooltipStyle};
pub use z_order::*;
