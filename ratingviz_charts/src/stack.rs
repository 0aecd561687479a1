// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack layout.
//!
//! Given rows of per-series values, compute for every `(row, series)` pair a contiguous
//! `[start, end)` span. Series are always stacked in the order given by the caller; the order is
//! never derived from the data.

extern crate alloc;

use alloc::vec::Vec;

use smallvec::SmallVec;

/// Stack baseline offset mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackOffset {
    /// Accumulate raw values from a zero baseline.
    #[default]
    Zero,
    /// Scale each row so its total spans `[0, 1]`.
    ///
    /// Rows with a zero total keep zero-width spans.
    Normalize,
}

/// One stacked span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackSegment {
    /// Source row index.
    pub row: usize,
    /// Series (category) index.
    pub series: usize,
    /// Stack start offset.
    pub start: f64,
    /// Stack end offset.
    pub end: f64,
}

impl StackSegment {
    /// Returns `end - start`.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// Errors returned by [`Stack::layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    /// A row did not carry exactly one value per series.
    SeriesCountMismatch {
        /// Offending row.
        row: usize,
        /// Configured series count.
        expected: usize,
        /// Values found in the row.
        found: usize,
    },
}

impl core::fmt::Display for StackError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SeriesCountMismatch {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} values, expected {expected}"),
        }
    }
}

impl core::error::Error for StackError {}

/// A stack layout configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack {
    series_count: usize,
    offset: StackOffset,
}

impl Stack {
    /// Creates a zero-offset stack over `series_count` series.
    pub fn new(series_count: usize) -> Self {
        Self {
            series_count,
            offset: StackOffset::Zero,
        }
    }

    /// Sets the baseline offset mode.
    pub fn with_offset(mut self, offset: StackOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the configured series count.
    pub fn series_count(&self) -> usize {
        self.series_count
    }

    /// Computes the stacked spans for `rows`.
    ///
    /// Values are accumulated in series order. Negative values are not special-cased: they
    /// produce spans with `end < start`, so callers should validate inputs upstream.
    pub fn layout<R>(&self, rows: impl IntoIterator<Item = R>) -> Result<StackLayout, StackError>
    where
        R: AsRef<[f64]>,
    {
        let mut out = Vec::new();
        for (row, values) in rows.into_iter().enumerate() {
            let values = values.as_ref();
            if values.len() != self.series_count {
                return Err(StackError::SeriesCountMismatch {
                    row,
                    expected: self.series_count,
                    found: values.len(),
                });
            }

            let scale = match self.offset {
                StackOffset::Zero => 1.0,
                StackOffset::Normalize => {
                    let total: f64 = values.iter().sum();
                    if total == 0.0 { 0.0 } else { 1.0 / total }
                }
            };

            let mut acc = 0.0;
            let segments: SmallVec<[StackSegment; 8]> = values
                .iter()
                .enumerate()
                .map(|(series, v)| {
                    let start = acc;
                    acc += v * scale;
                    StackSegment {
                        row,
                        series,
                        start,
                        end: acc,
                    }
                })
                .collect();
            out.push(segments);
        }
        Ok(StackLayout {
            series_count: self.series_count,
            rows: out,
        })
    }
}

/// The result of a stack layout: per-row, per-series spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackLayout {
    series_count: usize,
    rows: Vec<SmallVec<[StackSegment; 8]>>,
}

impl StackLayout {
    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of series.
    pub fn series_count(&self) -> usize {
        self.series_count
    }

    /// Returns the spans of `row` in series order.
    pub fn row(&self, row: usize) -> Option<&[StackSegment]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    /// Returns the stacked total (end of the last span) of `row`.
    pub fn row_total(&self, row: usize) -> Option<f64> {
        let r = self.rows.get(row)?;
        Some(r.last().map_or(0.0, |s| s.end))
    }

    /// Iterates over the spans of one series across all rows.
    pub fn series(&self, series: usize) -> impl Iterator<Item = &StackSegment> {
        self.rows.iter().filter_map(move |r| r.get(series))
    }

    /// Iterates over all spans, series-major (all rows of series 0 first).
    ///
    /// This is the order in which stacked series are painted.
    pub fn segments(&self) -> impl Iterator<Item = &StackSegment> {
        (0..self.series_count).flat_map(move |s| self.series(s))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn series_count_mismatch_is_reported() {
        let err = Stack::new(3).layout([vec![1.0, 2.0]]).unwrap_err();
        assert_eq!(
            err,
            StackError::SeriesCountMismatch {
                row: 0,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn normalize_scales_rows_to_unit_total() {
        let layout = Stack::new(2)
            .with_offset(StackOffset::Normalize)
            .layout([vec![30.0, 10.0], vec![0.0, 0.0]])
            .unwrap();
        let r0 = layout.row(0).unwrap();
        assert!((r0[0].end - 0.75).abs() < 1e-12);
        assert!((r0[1].end - 1.0).abs() < 1e-12);
        assert_eq!(layout.row_total(1), Some(0.0));
    }

    #[test]
    fn segments_iterate_series_major() {
        let layout = Stack::new(2)
            .layout([vec![1.0, 2.0], vec![3.0, 4.0]])
            .unwrap();
        let order: Vec<(usize, usize)> = layout.segments().map(|s| (s.series, s.row)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        let layout = Stack::new(5).layout(Vec::<Vec<f64>>::new()).unwrap();
        assert_eq!(layout.row_count(), 0);
        assert_eq!(layout.segments().count(), 0);
    }
}
