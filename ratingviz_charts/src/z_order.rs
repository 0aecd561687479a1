// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Marks carry an explicit `z_index` for render ordering. The chart layer sets z-indexes
//! consistently so renderers can paint in `(z_index, MarkId)` order with a deterministic
//! tie-break.

/// Filled series marks (bars).
pub const SERIES_FILL: i32 = 0;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;

/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
/// Chart-level titles.
pub const TITLES: i32 = 80;
