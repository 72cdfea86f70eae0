//! The TOPSIS ranking pipeline.
//!
//! Four pure stages chained in sequence:
//!
//! 1. [`Preprocessor`] imputes missing values ([`MissingDataStrategy`])
//! 2. [`normalize`] scales each column to unit norm and applies weights
//! 3. [`ideal_vectors`] derives ideal-best and ideal-worst per criterion
//! 4. [`Scorer`] measures distances ([`DistanceMetric`]), synthesizes
//!    closeness scores, and [`rank_scores`] orders the alternatives
//!
//! [`TopsisEngine`] runs them end to end.
//!
//! # Examples
//!
//! ```rust
//! use topsis_engine::{DistanceMetric, RankOptions, rank};
//! use topsis_traits::{DecisionMatrix, ImpactVector, WeightVector};
//!
//! let matrix = DecisionMatrix::from_rows(vec![
//!     vec![1.0, 7.0, 9.0, 9.0],
//!     vec![4.0, 3.0, 6.0, 7.0],
//!     vec![3.0, 8.0, 6.0, 8.0],
//!     vec![6.0, 7.0, 7.0, 6.0],
//! ])
//! .unwrap();
//!
//! let options = RankOptions::default().with_distance_metric(DistanceMetric::Manhattan);
//! let (scores, ranks) = rank(
//!     &matrix.into(),
//!     &WeightVector::uniform(4),
//!     &ImpactVector::parse("+,+,+,+").unwrap(),
//!     options,
//! )
//! .unwrap();
//! assert_eq!(scores.len(), ranks.len());
//! ```

mod engine;
mod ideal;
mod metric;
mod normalize;
mod preprocess;
mod score;

pub use engine::{Evaluation, RankOptions, TopsisEngine, rank};
pub use ideal::ideal_vectors;
pub use metric::{
    Chebyshev, Cosine, DEFAULT_MINKOWSKI_P, DistanceMetric, Euclidean, MAX_COSINE_DISTANCE,
    Manhattan, Minkowski,
};
pub use normalize::normalize;
pub use preprocess::{MissingDataStrategy, Preprocessor};
pub use score::{Distances, NEUTRAL_SCORE, Scorer, closeness, rank_scores};
