//! Labelled decision tables backed by a Polars DataFrame.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use topsis_traits::types::describe_column;
use topsis_traits::{RankVector, RawMatrix, ScoreVector, TopsisError};

use crate::{Result, TableError};

/// Name of the appended closeness score column.
pub const SCORE_COLUMN: &str = "Score";

/// Name of the appended rank column.
pub const RANK_COLUMN: &str = "Rank";

/// Minimum number of columns: one label plus two criteria.
pub const MIN_COLUMNS: usize = 3;

/// Cell values read as missing in text columns.
const MISSING_MARKERS: &[&str] = &["", "na", "nan", "null", "none"];

/// An input table: a label column followed by numeric criterion columns.
///
/// # Expected Schema
///
/// - first column: alternative label (any type, rendered as text)
/// - remaining columns: criterion values; empty cells are missing
///
/// The original DataFrame is kept so results can be written back with every
/// input column intact.
#[derive(Debug, Clone)]
pub struct DecisionTable {
    frame: DataFrame,
    labels: Vec<String>,
    criteria: Vec<String>,
    matrix: RawMatrix,
}

impl DecisionTable {
    /// Validate a DataFrame and extract its decision matrix.
    ///
    /// # Errors
    ///
    /// - [`TopsisError::Schema`] if there are fewer than three columns or no rows
    /// - [`TopsisError::InvalidData`] if a criterion cell is not numeric
    pub fn from_frame(frame: DataFrame) -> Result<Self> {
        let columns = frame.get_columns();
        if columns.len() < MIN_COLUMNS {
            return Err(TopsisError::Schema(format!(
                "input must have at least {MIN_COLUMNS} columns (a label and two or more criteria), found {}",
                columns.len()
            ))
            .into());
        }

        let labels: Vec<String> = columns[0]
            .as_materialized_series()
            .cast(&DataType::String)?
            .str()?
            .into_iter()
            .map(|label| label.unwrap_or_default().to_string())
            .collect();

        let criteria: Vec<String> = columns[1..].iter().map(|c| c.name().to_string()).collect();

        let numeric = columns[1..]
            .iter()
            .enumerate()
            .map(|(j, column)| numeric_column(column, j, &criteria))
            .collect::<Result<Vec<_>>>()?;

        let rows = (0..frame.height())
            .map(|i| numeric.iter().map(|column| column[i]).collect())
            .collect();
        let matrix = RawMatrix::from_rows(rows)?.with_criteria(criteria.clone())?;

        tracing::debug!(
            alternatives = matrix.n_alternatives(),
            criteria = matrix.n_criteria(),
            missing = matrix.missing_count(),
            "loaded decision table"
        );

        Ok(Self {
            frame,
            labels,
            criteria,
            matrix,
        })
    }

    /// Returns the original DataFrame.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Alternative labels, in row order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Criterion column names, in column order.
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// The criterion values, possibly with missing entries.
    pub const fn matrix(&self) -> &RawMatrix {
        &self.matrix
    }

    /// The original table with [`SCORE_COLUMN`] and [`RANK_COLUMN`] appended.
    ///
    /// # Errors
    ///
    /// [`TopsisError::DimensionMismatch`] if scores or ranks are not row-aligned.
    pub fn augment(&self, scores: &ScoreVector, ranks: &RankVector) -> Result<DataFrame> {
        let rows = self.frame.height();
        if scores.len() != rows {
            return Err(TopsisError::dimension_mismatch("scores", rows, scores.len()).into());
        }
        if ranks.len() != rows {
            return Err(TopsisError::dimension_mismatch("ranks", rows, ranks.len()).into());
        }

        let score_values: Vec<f64> = scores.iter().collect();
        let rank_values: Vec<u32> = ranks.as_slice().iter().map(|&r| r as u32).collect();

        let mut out = self.frame.clone();
        out.with_column(Series::new(SCORE_COLUMN.into(), score_values))?;
        out.with_column(Series::new(RANK_COLUMN.into(), rank_values))?;
        Ok(out)
    }
}

fn numeric_column(column: &Column, j: usize, names: &[String]) -> Result<Vec<Option<f64>>> {
    let series = column.as_materialized_series();

    if let Ok(text) = series.str() {
        return text
            .into_iter()
            .enumerate()
            .map(|(i, cell)| parse_cell(cell, i, j, names))
            .collect();
    }

    match series.dtype() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64
        | DataType::Null => {
            let values = series.cast(&DataType::Float64)?;
            Ok(values.f64()?.into_iter().collect())
        }
        other => Err(TopsisError::InvalidData(format!(
            "all criteria values must be numeric: {} has type {other}",
            describe_column(j, Some(names))
        ))
        .into()),
    }
}

fn parse_cell(cell: Option<&str>, i: usize, j: usize, names: &[String]) -> Result<Option<f64>> {
    let Some(raw) = cell.map(str::trim) else {
        return Ok(None);
    };
    if MISSING_MARKERS.contains(&raw.to_ascii_lowercase().as_str()) {
        return Ok(None);
    }
    raw.parse::<f64>().map(Some).map_err(|_| {
        TableError::Topsis(TopsisError::InvalidData(format!(
            "all criteria values must be numeric: '{raw}' at row {}, {}",
            i + 1,
            describe_column(j, Some(names))
        )))
    })
}

/// Read a CSV file with a header row into a [`DecisionTable`].
///
/// # Errors
///
/// [`TableError::FileNotFound`] if `path` does not exist, otherwise any
/// parse or validation error from [`DecisionTable::from_frame`].
pub fn read_table(path: &Path) -> Result<DecisionTable> {
    if !path.is_file() {
        return Err(TableError::FileNotFound(path.to_path_buf()));
    }

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    tracing::debug!(path = %path.display(), rows = frame.height(), "read csv");
    DecisionTable::from_frame(frame)
}

/// Write a DataFrame as CSV with a header row.
pub fn write_table(frame: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(frame)?;

    tracing::debug!(path = %path.display(), rows = frame.height(), "wrote csv");
    Ok(())
}

/// Append scores and ranks to `table` and write it to `path`.
pub fn write_result(
    table: &DecisionTable,
    scores: &ScoreVector,
    ranks: &RankVector,
    path: &Path,
) -> Result<()> {
    let mut out = table.augment(scores, ranks)?;
    write_table(&mut out, path)
}
