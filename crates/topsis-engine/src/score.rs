//! Distance synthesis, closeness scores and ranking.

use ndarray::Array1;
use serde::Serialize;
use topsis_traits::{Distance, IdealVectors, NormalizedMatrix, RankVector, ScoreVector};

/// Score given to an alternative that is equally far from (i.e. on top of)
/// both ideal vectors.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Per-alternative distances to the ideal vectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distances {
    /// Distance from each alternative to the ideal-best vector.
    pub to_best: Array1<f64>,
    /// Distance from each alternative to the ideal-worst vector.
    pub to_worst: Array1<f64>,
}

/// Computes distances and closeness scores under a chosen metric.
pub struct Scorer {
    metric: Box<dyn Distance>,
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("metric", &self.metric.name())
            .finish()
    }
}

impl Scorer {
    /// Create a scorer using `metric`.
    pub fn new(metric: Box<dyn Distance>) -> Self {
        Self { metric }
    }

    /// Name of the metric in use.
    pub fn metric_name(&self) -> &str {
        self.metric.name()
    }

    /// Distances from every alternative to both ideal vectors.
    pub fn distances(&self, normalized: &NormalizedMatrix, ideal: &IdealVectors) -> Distances {
        let (to_best, to_worst): (Vec<f64>, Vec<f64>) = normalized
            .rows()
            .map(|row| {
                (
                    self.metric.distance(row, ideal.best.view()),
                    self.metric.distance(row, ideal.worst.view()),
                )
            })
            .unzip();

        Distances {
            to_best: Array1::from_vec(to_best),
            to_worst: Array1::from_vec(to_worst),
        }
    }

    /// Closeness scores `d_worst / (d_best + d_worst)`.
    pub fn score(&self, distances: &Distances) -> ScoreVector {
        let scores = distances
            .to_best
            .iter()
            .zip(&distances.to_worst)
            .map(|(&best, &worst)| closeness(best, worst))
            .collect();
        ScoreVector::new(scores)
    }
}

/// Relative closeness to the ideal-best vector.
///
/// When both distances are zero the alternative coincides with both ideals
/// and scores [`NEUTRAL_SCORE`]. An infinite distance dominates a finite one;
/// two infinite distances also score [`NEUTRAL_SCORE`].
pub fn closeness(to_best: f64, to_worst: f64) -> f64 {
    match (to_best.is_infinite(), to_worst.is_infinite()) {
        (true, true) => return NEUTRAL_SCORE,
        (true, false) => return 0.0,
        (false, true) => return 1.0,
        (false, false) => {}
    }

    let total = to_best + to_worst;
    if total == 0.0 {
        return NEUTRAL_SCORE;
    }
    if !total.is_finite() {
        let peak = to_best.max(to_worst);
        return (to_worst / peak) / (to_best / peak + to_worst / peak);
    }
    to_worst / total
}

/// Rank alternatives by score, highest first.
///
/// Ties keep original row order: the earlier row gets the lower rank number.
/// With `reverse` the assignment is exactly reversed (rank `r` becomes
/// `N + 1 - r`), so the lowest score ranks first.
///
/// # Examples
///
/// ```rust
/// use ndarray::array;
/// use topsis_engine::rank_scores;
/// use topsis_traits::ScoreVector;
///
/// let scores = ScoreVector::new(array![0.3, 0.8, 0.3, 0.5]);
/// assert_eq!(rank_scores(&scores, false).as_slice(), &[3, 1, 4, 2]);
/// assert_eq!(rank_scores(&scores, true).as_slice(), &[2, 4, 1, 3]);
/// ```
pub fn rank_scores(scores: &ScoreVector, reverse: bool) -> RankVector {
    let ranks = RankVector::from_scores(scores);
    if reverse { ranks.reversed() } else { ranks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{Euclidean, Manhattan};
    use approx::assert_relative_eq;
    use ndarray::array;

    fn ideal() -> IdealVectors {
        IdealVectors {
            best: array![1.0, 1.0],
            worst: array![0.0, 0.0],
        }
    }

    #[test]
    fn test_distances_and_scores() {
        let normalized = NormalizedMatrix::new(array![[1.0, 1.0], [0.0, 0.0], [1.0, 0.0]]);
        let scorer = Scorer::new(Box::new(Euclidean));
        let distances = scorer.distances(&normalized, &ideal());

        assert_relative_eq!(distances.to_best[0], 0.0);
        assert_relative_eq!(distances.to_worst[1], 0.0);
        assert_relative_eq!(distances.to_best[2], 1.0);

        let scores = scorer.score(&distances);
        assert_eq!(scores.as_array().to_vec(), vec![1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_metric_changes_distances() {
        let normalized = NormalizedMatrix::new(array![[0.0, 0.0]]);
        let euclid = Scorer::new(Box::new(Euclidean)).distances(&normalized, &ideal());
        let manhattan = Scorer::new(Box::new(Manhattan)).distances(&normalized, &ideal());
        assert_relative_eq!(euclid.to_best[0], 2.0_f64.sqrt());
        assert_relative_eq!(manhattan.to_best[0], 2.0);
    }

    #[test]
    fn test_closeness_degenerate() {
        assert_eq!(closeness(0.0, 0.0), NEUTRAL_SCORE);
        assert_eq!(closeness(0.0, 3.0), 1.0);
        assert_eq!(closeness(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_closeness_infinite_distances() {
        assert_eq!(closeness(f64::INFINITY, f64::INFINITY), NEUTRAL_SCORE);
        assert_eq!(closeness(f64::INFINITY, 1.0), 0.0);
        assert_eq!(closeness(1.0, f64::INFINITY), 1.0);
        // the sum overflows even though both terms are finite
        assert_relative_eq!(closeness(f64::MAX, f64::MAX), 0.5);
    }

    #[test]
    fn test_rank_is_permutation() {
        let scores = ScoreVector::new(array![0.2, 0.9, 0.4, 0.7, 0.1]);
        let ranks = rank_scores(&scores, false);
        assert_eq!(ranks.as_slice(), &[4, 1, 3, 2, 5]);

        let mut sorted = ranks.as_slice().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ties_break_by_row_order() {
        let scores = ScoreVector::new(array![0.5, 0.5, 0.5]);
        assert_eq!(rank_scores(&scores, false).as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_reverse_is_exact_inversion() {
        let scores = ScoreVector::new(array![0.2, 0.9, 0.4]);
        let forward = rank_scores(&scores, false);
        let reverse = rank_scores(&scores, true);
        assert_eq!(reverse.as_slice(), &[1, 3, 2]);
        assert_eq!(reverse, forward.reversed());
        assert_eq!(reverse.reversed(), forward);
    }
}
