// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use ratingviz_charts::StackedBarChartError;

/// Result alias used throughout `ratingviz`.
pub type RenderResult<T> = Result<T, RenderError>;

/// Everything that can stop a chart from being drawn.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// The data source could not be read.
    #[error("io error: cannot read '{}': {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV is malformed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header.
    #[error("missing column '{0}'")]
    MissingColumn(String),

    /// A bucket field is empty, non-numeric or non-finite.
    #[error("invalid number in row {row}, column '{column}': {text:?}")]
    InvalidNumber {
        /// Zero-based data row.
        row: usize,
        /// Column name.
        column: String,
        /// Raw field text.
        text: String,
    },

    /// A bucket field is negative.
    #[error("negative value in row {row}, column '{column}': {value}")]
    NegativeValue {
        /// Zero-based data row.
        row: usize,
        /// Column name.
        column: String,
        /// Parsed value.
        value: f64,
    },

    /// A row's bucket proportions do not sum to 1.
    #[error("row {row} ({genre}) sums to {total}, expected 1 within {tolerance}")]
    RowTotal {
        /// Zero-based data row.
        row: usize,
        /// Genre of the row.
        genre: String,
        /// Sum of the row's values.
        total: f64,
        /// Allowed deviation from 1.
        tolerance: f64,
    },

    /// A row cannot be normalized because all of its values are zero.
    #[error("row {row} ({genre}) has a zero total")]
    ZeroTotal {
        /// Zero-based data row.
        row: usize,
        /// Genre of the row.
        genre: String,
    },

    /// The CSV has a header but no data rows.
    #[error("dataset has no rows")]
    EmptyDataset,

    /// The container selector is not an id selector.
    #[error("invalid selector {0:?}, expected '#id'")]
    InvalidSelector(String),

    /// No container matches the selector.
    #[error("no container matches '{0}'")]
    ContainerNotFound(String),

    /// Configuration is invalid or could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Chart layout rejected the data.
    #[error("chart error: {0}")]
    Chart(#[from] StackedBarChartError),
}

impl RenderError {
    /// Builds a [`RenderError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        let io = RenderError::Io {
            path: PathBuf::from("data.csv"),
            source: std::io::Error::other("boom"),
        };
        assert!(
            io.to_string().starts_with("io error: cannot read 'data.csv'"),
            "{io}"
        );
        assert!(io.to_string().contains("boom"), "{io}");
        assert!(
            RenderError::config("x")
                .to_string()
                .starts_with("config error:"),
            "config prefix"
        );
        assert_eq!(
            RenderError::MissingColumn("Genre".into()).to_string(),
            "missing column 'Genre'"
        );
    }

    #[test]
    fn number_errors_name_row_column_and_text() {
        let err = RenderError::InvalidNumber {
            row: 3,
            column: "above_8_5".into(),
            text: "abc".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid number in row 3, column 'above_8_5': \"abc\""
        );
    }
}
