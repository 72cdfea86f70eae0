//! Tabular input and output for the TOPSIS engine.
//!
//! The engine itself only sees numbers. This crate handles the table around
//! them: reading a CSV whose first column labels each alternative and whose
//! remaining columns hold criterion values, and writing the same table back
//! with `Score` and `Rank` columns appended.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use topsis_io::{read_table, write_result};
//! use topsis_engine::{RankOptions, rank};
//! use topsis_traits::{ImpactVector, WeightVector};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = read_table(Path::new("data.csv"))?;
//! let weights = WeightVector::parse("1,1,1,1")?;
//! let impacts = ImpactVector::from_symbols(&["+", "+", "-", "+"], Some(table.criteria()))?;
//!
//! let (scores, ranks) = rank(table.matrix(), &weights, &impacts, RankOptions::default())?;
//! write_result(&table, &scores, &ranks, Path::new("result.csv"))?;
//! # Ok(())
//! # }
//! ```

mod error;
mod table;

pub use error::TableError;
pub use table::{
    DecisionTable, MIN_COLUMNS, RANK_COLUMN, SCORE_COLUMN, read_table, write_result, write_table,
};

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
