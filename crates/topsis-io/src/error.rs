//! Error types for table I/O.

use std::path::PathBuf;

use thiserror::Error;
use topsis_traits::TopsisError;

/// Errors that can occur reading or writing decision tables.
#[derive(Debug, Error)]
pub enum TableError {
    /// The input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or DataFrame error.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// The table content failed validation.
    #[error(transparent)]
    Topsis(#[from] TopsisError),
}
