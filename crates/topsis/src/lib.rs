#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/topsis/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Crate Organization
//!
//! - [`traits`] - Value types, errors and the [`Distance`] trait
//! - [`engine`] - The four pipeline stages and the [`TopsisEngine`] entry point
//! - [`io`] - CSV ingestion and result tables
//!
//! ## Architecture
//!
//! Data flows strictly forward through pure stages:
//!
//! 1. **Preprocessor** imputes missing values
//! 2. **Normalizer** scales columns to unit norm and applies weights
//! 3. **IdealSolver** derives ideal-best and ideal-worst vectors
//! 4. **Scorer** measures distances, computes closeness scores and ranks
//!
//! No stage keeps state between calls, so independent rankings can run
//! concurrently without coordination.

/// Version information for the topsis crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Value types, errors and the [`Distance`] trait.
pub mod traits {
    pub use topsis_traits::*;
}

pub use topsis_traits::{
    DecisionMatrix, Distance, IdealVectors, Impact, ImpactVector, NormalizedMatrix, RankVector,
    RawMatrix, Result, ScoreVector, TopsisError, WeightVector,
};

// ============================================================================
// Pipeline
// ============================================================================

/// The ranking pipeline.
///
/// ## Distance Metrics
///
/// ```text
/// euclidean  sqrt(sum((a - b)^2))
/// manhattan  sum(|a - b|)
/// chebyshev  max(|a - b|)
/// minkowski  sum(|a - b|^p)^(1/p), p = 3 unless configured
/// cosine     1 - (a . b) / (|a| |b|)
/// ```
///
/// ## Closeness
///
/// ```text
/// score_i = d_worst_i / (d_best_i + d_worst_i)
/// ```
///
/// An alternative at zero distance from both ideals scores 0.5.
pub mod engine {
    pub use topsis_engine::*;
}

pub use topsis_engine::{
    DistanceMetric, Evaluation, MissingDataStrategy, RankOptions, TopsisEngine, rank,
};

// ============================================================================
// Table I/O
// ============================================================================

/// CSV ingestion and result tables.
pub mod io {
    pub use topsis_io::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust
/// use topsis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        DecisionMatrix, DistanceMetric, Evaluation, Impact, ImpactVector, MissingDataStrategy,
        RankOptions, RankVector, RawMatrix, Result, ScoreVector, TopsisEngine, TopsisError,
        WeightVector, rank,
    };
}

// ============================================================================
// Tests
// ============================================================================
