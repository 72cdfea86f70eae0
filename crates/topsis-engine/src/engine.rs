//! The TOPSIS pipeline: preprocess, normalize, derive ideals, score, rank.

use serde::{Deserialize, Serialize};
use topsis_traits::{
    DecisionMatrix, IdealVectors, ImpactVector, NormalizedMatrix, RankVector, RawMatrix, Result,
    ScoreVector, WeightVector,
};

use crate::ideal::ideal_vectors;
use crate::metric::{DEFAULT_MINKOWSKI_P, DistanceMetric};
use crate::normalize::normalize;
use crate::preprocess::{MissingDataStrategy, Preprocessor};
use crate::score::{Distances, Scorer, rank_scores};

/// Configuration for a ranking run.
///
/// Defaults: `mean` imputation, `euclidean` distance, Minkowski exponent
/// [`DEFAULT_MINKOWSKI_P`] (3), highest score ranked first.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    /// How missing entries are imputed.
    pub missing_data_strategy: MissingDataStrategy,
    /// Distance used against the ideal vectors.
    pub distance_metric: DistanceMetric,
    /// Minkowski exponent; `None` means [`DEFAULT_MINKOWSKI_P`]. Ignored by other metrics.
    pub minkowski_p: Option<f64>,
    /// Rank the lowest score first.
    pub reverse_rank: bool,
}

impl RankOptions {
    /// Set the missing-data strategy.
    #[must_use]
    pub const fn with_missing_data_strategy(mut self, strategy: MissingDataStrategy) -> Self {
        self.missing_data_strategy = strategy;
        self
    }

    /// Set the distance metric.
    #[must_use]
    pub const fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    /// Set the Minkowski exponent.
    #[must_use]
    pub const fn with_minkowski_p(mut self, p: f64) -> Self {
        self.minkowski_p = Some(p);
        self
    }

    /// Set whether ranks are reversed.
    #[must_use]
    pub const fn with_reverse_rank(mut self, reverse: bool) -> Self {
        self.reverse_rank = reverse;
        self
    }

    /// The Minkowski exponent that will be used.
    pub fn effective_minkowski_p(&self) -> f64 {
        self.minkowski_p.unwrap_or(DEFAULT_MINKOWSKI_P)
    }
}

/// Every intermediate artifact of one ranking run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// The matrix after missing-value imputation.
    pub matrix: DecisionMatrix,
    /// The normalized, weighted matrix.
    pub normalized: NormalizedMatrix,
    /// Ideal-best and ideal-worst vectors.
    pub ideal: IdealVectors,
    /// Distances to both ideal vectors.
    pub distances: Distances,
    /// Closeness scores.
    pub scores: ScoreVector,
    /// Ranks (1 = best unless reversed).
    pub ranks: RankVector,
}

/// Runs the four-stage TOPSIS pipeline.
///
/// The engine holds only configuration and may be shared across threads;
/// every call is independent.
///
/// # Examples
///
/// ```rust
/// use topsis_engine::{RankOptions, TopsisEngine};
/// use topsis_traits::{DecisionMatrix, ImpactVector, WeightVector};
///
/// let matrix = DecisionMatrix::from_rows(vec![
///     vec![250.0, 16.0, 12.0, 5.0],
///     vec![200.0, 16.0, 8.0, 3.0],
///     vec![300.0, 32.0, 16.0, 4.0],
///     vec![275.0, 32.0, 8.0, 4.0],
///     vec![225.0, 16.0, 16.0, 2.0],
/// ])
/// .unwrap();
/// let weights = WeightVector::uniform(4);
/// let impacts = ImpactVector::parse("-,+,+,+").unwrap();
///
/// let engine = TopsisEngine::new(RankOptions::default());
/// let (scores, ranks) = engine.rank(&matrix.into(), &weights, &impacts).unwrap();
/// assert_eq!(scores.len(), 5);
/// assert_eq!(ranks.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TopsisEngine {
    options: RankOptions,
}

impl TopsisEngine {
    /// Create an engine with the given options.
    pub const fn new(options: RankOptions) -> Self {
        Self { options }
    }

    /// The configured options.
    pub const fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Run the pipeline and return every intermediate artifact.
    ///
    /// All validation (weight and impact counts, metric parameters) happens
    /// before any computation; on error nothing is produced.
    pub fn evaluate(
        &self,
        matrix: &RawMatrix,
        weights: &WeightVector,
        impacts: &ImpactVector,
    ) -> Result<Evaluation> {
        let criteria = matrix.n_criteria();
        weights.check_len(criteria)?;
        impacts.check_len(criteria)?;
        let metric = self
            .options
            .distance_metric
            .build(self.options.minkowski_p)?;
        let scorer = Scorer::new(metric);

        tracing::debug!(
            alternatives = matrix.n_alternatives(),
            criteria,
            strategy = %self.options.missing_data_strategy,
            metric = scorer.metric_name(),
            reverse = self.options.reverse_rank,
            "starting topsis evaluation"
        );

        let clean = Preprocessor::new(self.options.missing_data_strategy).process(matrix)?;
        let normalized = normalize(&clean, weights)?;
        let ideal = ideal_vectors(&normalized, impacts)?;
        let distances = scorer.distances(&normalized, &ideal);
        let scores = scorer.score(&distances);
        let ranks = rank_scores(&scores, self.options.reverse_rank);

        tracing::debug!(best = ?ideal.best, worst = ?ideal.worst, "ideal vectors");
        let first = scores.get(0);
        if scores.len() > 1 && scores.iter().all(|s| Some(s) == first) {
            tracing::warn!("all alternatives received the same score; ranks follow row order");
        }
        tracing::info!(
            alternatives = scores.len(),
            metric = scorer.metric_name(),
            "topsis evaluation complete"
        );

        Ok(Evaluation {
            matrix: clean,
            normalized,
            ideal,
            distances,
            scores,
            ranks,
        })
    }

    /// Run the pipeline and return `(scores, ranks)`, index-aligned with the input rows.
    pub fn rank(
        &self,
        matrix: &RawMatrix,
        weights: &WeightVector,
        impacts: &ImpactVector,
    ) -> Result<(ScoreVector, RankVector)> {
        let evaluation = self.evaluate(matrix, weights, impacts)?;
        Ok((evaluation.scores, evaluation.ranks))
    }
}

/// Rank alternatives in one call. Equivalent to
/// `TopsisEngine::new(options).rank(matrix, weights, impacts)`.
pub fn rank(
    matrix: &RawMatrix,
    weights: &WeightVector,
    impacts: &ImpactVector,
    options: RankOptions,
) -> Result<(ScoreVector, RankVector)> {
    TopsisEngine::new(options).rank(matrix, weights, impacts)
}
