// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration, loadable from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ratingviz_charts::{Margins, Size};
use serde::{Deserialize, Serialize};

use crate::bucket::DEFAULT_BUCKET_COLORS;
use crate::data::TotalPolicy;
use crate::error::{RenderError, RenderResult};

/// Space around the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarginsConfig {
    /// Top margin.
    pub top: f64,
    /// Right margin (holds the legend).
    pub right: f64,
    /// Bottom margin (holds the value axis).
    pub bottom: f64,
    /// Left margin (holds the genre labels).
    pub left: f64,
}

impl Default for MarginsConfig {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 200.0,
            bottom: 40.0,
            left: 150.0,
        }
    }
}

/// Everything that shapes the rendered chart.
///
/// Any subset of fields may be given in JSON; the rest keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Outer SVG width.
    pub width: f64,
    /// Outer SVG height.
    pub height: f64,
    /// Plot margins.
    pub margins: MarginsConfig,
    /// Title text.
    pub title: String,
    /// Title font size.
    pub title_font_size: f64,
    /// Title color (CSS syntax).
    pub title_color: String,
    /// One CSS color per rating bucket.
    pub colors: Vec<String>,
    /// Band padding as a fraction of the band step.
    pub band_padding: f64,
    /// Approximate number of value axis ticks.
    pub tick_count: usize,
    /// Handling of rows that do not sum to 1.
    pub total_policy: TotalPolicy,
    /// Allowed deviation of a row total from 1 under [`TotalPolicy::Reject`].
    pub total_tolerance: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margins: MarginsConfig::default(),
            title: "Rating according to genres".to_owned(),
            title_font_size: 18.0,
            title_color: "#333".to_owned(),
            colors: DEFAULT_BUCKET_COLORS.iter().map(|c| (*c).to_owned()).collect(),
            band_padding: 0.1,
            tick_count: 10,
            total_policy: TotalPolicy::Reject,
            total_tolerance: 0.01,
        }
    }
}

impl ChartConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> RenderResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RenderError::config(format!("parse config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the JSON config at `path`.
    pub fn load(path: &Path) -> RenderResult<Self> {
        let file = File::open(path).map_err(|source| RenderError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| RenderError::config(format!("parse '{}': {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that sizes leave a non-empty plot and that numeric settings are in range.
    pub fn validate(&self) -> RenderResult<()> {
        let m = &self.margins;
        let all_finite = [
            self.width,
            self.height,
            m.top,
            m.right,
            m.bottom,
            m.left,
            self.title_font_size,
            self.band_padding,
            self.total_tolerance,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(RenderError::config("sizes must be finite"));
        }
        if [m.top, m.right, m.bottom, m.left].iter().any(|v| *v < 0.0) {
            return Err(RenderError::config("margins must be non-negative"));
        }
        if self.width - m.left - m.right <= 0.0 || self.height - m.top - m.bottom <= 0.0 {
            return Err(RenderError::config(format!(
                "margins leave no plot area in a {}x{} view",
                self.width, self.height
            )));
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(RenderError::config("band_padding must be in [0, 1)"));
        }
        if self.total_tolerance < 0.0 {
            return Err(RenderError::config("total_tolerance must be non-negative"));
        }
        Ok(())
    }

    /// Outer size.
    pub fn view(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Plot margins.
    pub fn margins(&self) -> Margins {
        let m = &self.margins;
        Margins::new(m.top, m.right, m.bottom, m.left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_chart() {
        let c = ChartConfig::default();
        c.validate().unwrap();
        assert_eq!((c.width, c.height), (1000.0, 600.0));
        assert_eq!(c.margins, MarginsConfig::default());
        assert_eq!(c.title, "Rating according to genres");
        assert_eq!(c.colors.len(), 5);
        assert_eq!(c.total_policy, TotalPolicy::Reject);
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let c = ChartConfig::from_json_str(
            r#"{ "title": "Ratings", "margins": { "left": 120 }, "total_policy": "normalize" }"#,
        )
        .unwrap();
        assert_eq!(c.title, "Ratings");
        assert_eq!(c.margins.left, 120.0);
        assert_eq!(c.margins.right, 200.0);
        assert_eq!(c.total_policy, TotalPolicy::Normalize);
        assert_eq!(c.width, 1000.0);
    }

    #[test]
    fn unknown_fields_and_bad_values_are_rejected() {
        let err = ChartConfig::from_json_str(r#"{ "widht": 10 }"#).unwrap_err();
        assert!(err.to_string().starts_with("config error:"), "{err}");

        let err = ChartConfig::from_json_str(r#"{ "width": 300 }"#).unwrap_err();
        assert!(err.to_string().contains("no plot area"), "{err}");

        let err = ChartConfig::from_json_str(r#"{ "band_padding": 1.5 }"#).unwrap_err();
        assert!(err.to_string().contains("band_padding"), "{err}");
    }
}
