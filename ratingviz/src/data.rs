// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading and validating the genre rating CSV.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bucket::{BUCKET_COUNT, RATING_BUCKETS};
use crate::error::{RenderError, RenderResult};

/// Name of the category column.
pub const GENRE_COLUMN: &str = "Genre";

/// One CSV row: a genre and its share of titles per rating bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct GenreRow {
    /// Category label.
    pub genre: String,
    /// Non-negative bucket values in [`RATING_BUCKETS`] order.
    pub values: [f64; BUCKET_COUNT],
}

impl GenreRow {
    /// Sum of the bucket values.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// What to do with rows whose bucket values do not sum to 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalPolicy {
    /// Fail the render when a row total is outside the tolerance.
    #[default]
    Reject,
    /// Stack each row scaled to its total, so every bar spans 100%.
    Normalize,
    /// Draw values as given, even if bars overrun or fall short of 100%.
    Accept,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Genre")]
    genre: String,
    #[serde(rename = "below_5_5")]
    below_5_5: String,
    #[serde(rename = "5_to_6_5")]
    from_5_to_6_5: String,
    #[serde(rename = "6_5_to_7_5")]
    from_6_5_to_7_5: String,
    #[serde(rename = "7_5_to_8_5")]
    from_7_5_to_8_5: String,
    #[serde(rename = "above_8_5")]
    above_8_5: String,
}

impl RawRow {
    fn fields(&self) -> [&str; BUCKET_COUNT] {
        [
            &self.below_5_5,
            &self.from_5_to_6_5,
            &self.from_6_5_to_7_5,
            &self.from_7_5_to_8_5,
            &self.above_8_5,
        ]
    }

    fn coerce(self, row: usize) -> RenderResult<GenreRow> {
        let mut values = [0.0; BUCKET_COUNT];
        for ((slot, text), (column, _)) in values.iter_mut().zip(self.fields()).zip(RATING_BUCKETS)
        {
            *slot = parse_value(row, column, text)?;
        }
        Ok(GenreRow {
            genre: self.genre,
            values,
        })
    }
}

fn parse_value(row: usize, column: &str, text: &str) -> RenderResult<f64> {
    let invalid = || RenderError::InvalidNumber {
        row,
        column: column.to_owned(),
        text: text.to_owned(),
    };
    let value: f64 = text.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    if value < 0.0 {
        return Err(RenderError::NegativeValue {
            row,
            column: column.to_owned(),
            value,
        });
    }
    Ok(value)
}

/// Reads rows from the CSV file at `path`.
pub fn load_rows(path: &Path) -> RenderResult<Vec<GenreRow>> {
    let file = File::open(path).map_err(|source| RenderError::Io {
        path: path.to_owned(),
        source,
    })?;
    read_rows(BufReader::new(file))
}

/// Reads rows from CSV text: a header naming [`GENRE_COLUMN`] and every bucket key, then one
/// row per genre. Fields are trimmed; extra columns are ignored.
pub fn read_rows<R: Read>(reader: R) -> RenderResult<Vec<GenreRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let required = std::iter::once(GENRE_COLUMN).chain(RATING_BUCKETS.iter().map(|(k, _)| *k));
    for column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(RenderError::MissingColumn(column.to_owned()));
        }
    }

    let mut rows = Vec::new();
    for (row, record) in rdr.deserialize::<RawRow>().enumerate() {
        rows.push(record?.coerce(row)?);
    }
    tracing::debug!(rows = rows.len(), "parsed csv");
    Ok(rows)
}

/// Checks every row against `policy`.
///
/// `tolerance` is the allowed absolute deviation of a row total from 1 under
/// [`TotalPolicy::Reject`]. Under [`TotalPolicy::Normalize`] rows are left as loaded (the
/// stack layout rescales them) but an all-zero row is an error.
pub fn apply_total_policy(
    rows: &[GenreRow],
    policy: TotalPolicy,
    tolerance: f64,
) -> RenderResult<()> {
    for (row, r) in rows.iter().enumerate() {
        let total = r.total();
        match policy {
            TotalPolicy::Accept => {}
            TotalPolicy::Reject => {
                if (total - 1.0).abs() > tolerance {
                    return Err(RenderError::RowTotal {
                        row,
                        genre: r.genre.clone(),
                        total,
                        tolerance,
                    });
                }
            }
            TotalPolicy::Normalize => {
                if total == 0.0 {
                    return Err(RenderError::ZeroTotal {
                        row,
                        genre: r.genre.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Genre,below_5_5,5_to_6_5,6_5_to_7_5,7_5_to_8_5,above_8_5\n";

    fn parse(body: &str) -> RenderResult<Vec<GenreRow>> {
        read_rows(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn parses_and_trims_fields() {
        let rows = parse(" Action , 0.2,0.3 ,0.3,0.1,0.1\nDrama,0,0,0.5,0.5,0\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].genre, "Action");
        assert_eq!(rows[0].values, [0.2, 0.3, 0.3, 0.1, 0.1]);
        assert!((rows[0].total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn column_order_and_extra_columns_do_not_matter() {
        let csv = "above_8_5,Genre,Notes,below_5_5,5_to_6_5,6_5_to_7_5,7_5_to_8_5\n\
                   0.5,Horror,x,0.5,0,0,0\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].genre, "Horror");
        assert_eq!(rows[0].values, [0.5, 0.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let err = read_rows("Genre,below_5_5\nAction,1\n".as_bytes()).unwrap_err();
        assert!(
            matches!(&err, RenderError::MissingColumn(c) if c == "5_to_6_5"),
            "{err}"
        );
    }

    #[test]
    fn empty_and_non_numeric_fields_are_errors() {
        let err = parse("Action,0.2,,0.3,0.1,0.1\n").unwrap_err();
        assert!(
            matches!(&err, RenderError::InvalidNumber { row: 0, column, .. } if column == "5_to_6_5"),
            "{err}"
        );

        let err = parse("Action,0.2,0.3,abc,0.1,0.1\n").unwrap_err();
        assert!(
            matches!(&err, RenderError::InvalidNumber { text, .. } if text == "abc"),
            "{err}"
        );

        let err = parse("Action,0.2,0.3,0.3,0.1,inf\n").unwrap_err();
        assert!(matches!(err, RenderError::InvalidNumber { .. }), "{err}");
    }

    #[test]
    fn negative_values_are_errors() {
        let err = parse("Action,0.2,0.3,0.3,-0.1,0.3\n").unwrap_err();
        assert!(
            matches!(err, RenderError::NegativeValue { row: 0, value, .. } if value == -0.1),
            "{err}"
        );
    }

    #[test]
    fn ragged_rows_are_csv_errors() {
        let err = parse("Action,0.2,0.3\n").unwrap_err();
        assert!(matches!(err, RenderError::Csv(_)), "{err}");
    }

    #[test]
    fn reject_policy_enforces_tolerance() {
        let rows = parse("A,0.2,0.2,0.2,0.2,0.205\nB,0.5,0.5,0.5,0,0\n").unwrap();
        let err = apply_total_policy(&rows, TotalPolicy::Reject, 0.01).unwrap_err();
        assert!(
            matches!(&err, RenderError::RowTotal { row: 1, genre, .. } if genre == "B"),
            "{err}"
        );
    }

    #[test]
    fn normalize_policy_only_rejects_zero_totals() {
        let rows = parse("A,2,2,2,2,2\n").unwrap();
        apply_total_policy(&rows, TotalPolicy::Normalize, 0.0).unwrap();
        assert_eq!(rows[0].values, [2.0; 5]);

        let rows = parse("Z,0,0,0,0,0\n").unwrap();
        let err = apply_total_policy(&rows, TotalPolicy::Normalize, 0.0).unwrap_err();
        assert!(matches!(err, RenderError::ZeroTotal { row: 0, .. }), "{err}");
    }

    #[test]
    fn accept_policy_keeps_values() {
        let rows = parse("A,0.5,0.5,0.5,0,0\n").unwrap();
        apply_total_policy(&rows, TotalPolicy::Accept, 0.01).unwrap();
        assert_eq!(rows[0].values, [0.5, 0.5, 0.5, 0.0, 0.0]);
    }
}
