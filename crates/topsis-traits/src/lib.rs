#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/topsis/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the TOPSIS engine.
//!
//! This crate provides the value types that flow through the ranking
//! pipeline, the error taxonomy, and the [`Distance`] abstraction.

/// The version of the topsis-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod distance;
pub mod error;
pub mod stats;
pub mod types;

// Re-exports
pub use distance::Distance;
pub use error::{Result, TopsisError};
pub use types::{
    DecisionMatrix, IdealVectors, Impact, ImpactVector, NormalizedMatrix, RankVector, RawMatrix,
    ScoreVector, WeightVector,
};
