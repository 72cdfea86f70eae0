//! Error types for the TOPSIS engine.
//!
//! Every failure the numeric pipeline can produce is a deterministic
//! validation failure, detected before any partial output exists. The variants
//! below cover dimension checks, impact and metric parsing, metric parameters,
//! data quality and table schema.

use thiserror::Error;

/// The main error type for TOPSIS operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopsisError {
    /// A vector's length does not match the number of criteria.
    #[error("{what} has {found} entries, expected {expected} (one per criterion)")]
    DimensionMismatch {
        /// What was being checked (e.g. "weights").
        what: String,
        /// The required length.
        expected: usize,
        /// The length actually supplied.
        found: usize,
    },

    /// An impact symbol is neither benefit (`+`) nor cost (`-`).
    #[error("Invalid impact '{symbol}' for {column}: expected '+' (benefit) or '-' (cost)")]
    InvalidImpact {
        /// Human-readable column reference (index and, when known, name).
        column: String,
        /// The offending symbol.
        symbol: String,
    },

    /// Unrecognized distance metric name.
    #[error("Invalid distance metric '{0}': expected one of euclidean, manhattan, chebyshev, minkowski, cosine")]
    InvalidMetric(String),

    /// A metric or weight parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Non-numeric, non-finite, or unrecoverable missing data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The table does not have the required shape.
    #[error("Schema error: {0}")]
    Schema(String),
}

impl TopsisError {
    /// Build a [`TopsisError::DimensionMismatch`].
    pub fn dimension_mismatch(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            what: what.into(),
            expected,
            found,
        }
    }

    /// Build a [`TopsisError::InvalidImpact`].
    pub fn invalid_impact(column: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::InvalidImpact {
            column: column.into(),
            symbol: symbol.into(),
        }
    }
}

/// A specialized Result type for TOPSIS operations.
pub type Result<T> = std::result::Result<T, TopsisError>;
