// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rating buckets: the five stacked series, their CSV keys, legend labels and colors.

use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::error::{RenderError, RenderResult};

/// Number of rating buckets per row.
pub const BUCKET_COUNT: usize = 5;

/// `(csv key, legend label)` in stacking order.
pub const RATING_BUCKETS: [(&str, &str); BUCKET_COUNT] = [
    ("below_5_5", "below 5.0"),
    ("5_to_6_5", "5.0–6.5"),
    ("6_5_to_7_5", "6.5–7.5"),
    ("7_5_to_8_5", "7.5–8.5"),
    ("above_8_5", "above 8.5"),
];

/// Bucket fill colors, parallel to [`RATING_BUCKETS`].
pub const DEFAULT_BUCKET_COLORS: [&str; BUCKET_COUNT] =
    ["#a3d5ff", "#ffe680", "#a1e3a1", "#ff9eb3", "#b0a8b9"];

/// One stacked series.
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    /// CSV column name.
    pub key: String,
    /// Legend label.
    pub label: String,
    /// Fill color.
    pub fill: Color,
}

/// The validated, ordered set of buckets a chart stacks.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketTable {
    buckets: Vec<Bucket>,
}

impl BucketTable {
    /// Builds a table from `(key, label)` entries and parallel CSS colors.
    ///
    /// Fails unless there are exactly [`BUCKET_COUNT`] distinct, non-empty keys, one label and
    /// one parseable color each.
    pub fn new<S: AsRef<str>>(entries: &[(&str, &str)], colors: &[S]) -> RenderResult<Self> {
        if entries.len() != BUCKET_COUNT {
            return Err(RenderError::config(format!(
                "expected {BUCKET_COUNT} rating buckets, got {}",
                entries.len()
            )));
        }
        if colors.len() != entries.len() {
            return Err(RenderError::config(format!(
                "expected {} bucket colors, got {}",
                entries.len(),
                colors.len()
            )));
        }

        let mut buckets: Vec<Bucket> = Vec::with_capacity(entries.len());
        for (&(key, label), color) in entries.iter().zip(colors) {
            if key.is_empty() || label.is_empty() {
                return Err(RenderError::config("bucket keys and labels must be non-empty"));
            }
            if buckets.iter().any(|b| b.key == key) {
                return Err(RenderError::config(format!("duplicate bucket key '{key}'")));
            }
            buckets.push(Bucket {
                key: key.to_owned(),
                label: label.to_owned(),
                fill: parse_fill(color.as_ref())?,
            });
        }
        Ok(Self { buckets })
    }

    /// The five rating buckets with their default colors.
    pub fn standard() -> RenderResult<Self> {
        Self::new(&RATING_BUCKETS, &DEFAULT_BUCKET_COLORS)
    }

    /// The five rating buckets with custom colors.
    pub fn with_colors<S: AsRef<str>>(colors: &[S]) -> RenderResult<Self> {
        Self::new(&RATING_BUCKETS, colors)
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always `false` for a validated table.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in stacking order.
    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    /// CSV keys in stacking order.
    pub fn keys(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.key.as_str()).collect()
    }

    /// Legend labels in stacking order.
    pub fn labels(&self) -> Vec<String> {
        self.buckets.iter().map(|b| b.label.clone()).collect()
    }

    /// Fill colors in stacking order.
    pub fn fills(&self) -> Vec<Color> {
        self.buckets.iter().map(|b| b.fill).collect()
    }
}

pub(crate) fn parse_fill(text: &str) -> RenderResult<Color> {
    parse_color(text)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|e| RenderError::config(format!("invalid color {text:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_fixed_order_labels_and_colors() {
        let table = BucketTable::standard().unwrap();
        assert_eq!(
            table.keys(),
            vec!["below_5_5", "5_to_6_5", "6_5_to_7_5", "7_5_to_8_5", "above_8_5"]
        );
        assert_eq!(
            table.labels(),
            vec!["below 5.0", "5.0–6.5", "6.5–7.5", "7.5–8.5", "above 8.5"]
        );
        let first = table.fills()[0].to_rgba8();
        assert_eq!((first.r, first.g, first.b, first.a), (0xa3, 0xd5, 0xff, 0xff));
    }

    #[test]
    fn incomplete_tables_are_rejected() {
        let err = BucketTable::new(&RATING_BUCKETS[..4], &DEFAULT_BUCKET_COLORS[..4]).unwrap_err();
        assert!(err.to_string().contains("expected 5 rating buckets"), "{err}");

        let err = BucketTable::with_colors(&["#fff"]).unwrap_err();
        assert!(err.to_string().contains("bucket colors"), "{err}");

        let mut dup = RATING_BUCKETS;
        dup[4] = dup[0];
        let err = BucketTable::new(&dup, &DEFAULT_BUCKET_COLORS).unwrap_err();
        assert!(err.to_string().contains("duplicate bucket key"), "{err}");
    }

    #[test]
    fn unparseable_color_is_a_config_error() {
        let mut colors = DEFAULT_BUCKET_COLORS;
        colors[2] = "not-a-color";
        let err = BucketTable::with_colors(&colors).unwrap_err();
        assert!(matches!(err, RenderError::Config(_)), "{err}");
    }
}
