//! Distance metrics between an alternative and an ideal vector.

use std::fmt;
use std::str::FromStr;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use topsis_traits::stats::{MIN_NORM_THRESHOLD, column_norm};
use topsis_traits::{Distance, Result, TopsisError};

/// Minkowski exponent used when none is configured.
pub const DEFAULT_MINKOWSKI_P: f64 = 3.0;

/// Largest value of the cosine distance `1 - cos(theta)`.
pub const MAX_COSINE_DISTANCE: f64 = 2.0;

/// Selectable distance metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// `sqrt(sum((a - b)^2))`
    #[default]
    Euclidean,
    /// `sum(|a - b|)`
    Manhattan,
    /// `max(|a - b|)`
    Chebyshev,
    /// `sum(|a - b|^p)^(1/p)`, p defaults to [`DEFAULT_MINKOWSKI_P`].
    Minkowski,
    /// `1 - cos(a, b)`
    Cosine,
}

impl DistanceMetric {
    /// All metrics, in documentation order.
    pub const ALL: [Self; 5] = [
        Self::Euclidean,
        Self::Manhattan,
        Self::Chebyshev,
        Self::Minkowski,
        Self::Cosine,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
            Self::Minkowski => "minkowski",
            Self::Cosine => "cosine",
        }
    }

    /// Instantiate the metric. `minkowski_p` is only consulted for
    /// [`DistanceMetric::Minkowski`].
    ///
    /// # Errors
    ///
    /// [`TopsisError::InvalidParameter`] if the Minkowski exponent is not a
    /// positive finite number.
    pub fn build(&self, minkowski_p: Option<f64>) -> Result<Box<dyn Distance>> {
        Ok(match self {
            Self::Euclidean => Box::new(Euclidean),
            Self::Manhattan => Box::new(Manhattan),
            Self::Chebyshev => Box::new(Chebyshev),
            Self::Minkowski => Box::new(Minkowski::new(minkowski_p.unwrap_or(DEFAULT_MINKOWSKI_P))?),
            Self::Cosine => Box::new(Cosine),
        })
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = TopsisError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|metric| metric.name() == key)
            .ok_or_else(|| TopsisError::InvalidMetric(s.to_string()))
    }
}

fn abs_diffs<'a, 'b>(
    row: ArrayView1<'a, f64>,
    reference: ArrayView1<'b, f64>,
) -> impl Iterator<Item = f64> {
    row.into_iter().zip(reference).map(|(a, b)| (a - b).abs())
}

/// `(sum(|a - b|^p))^(1/p)`, computed on differences rescaled by the largest
/// one so that no intermediate power overflows.
fn scaled_p_norm(row: ArrayView1<'_, f64>, reference: ArrayView1<'_, f64>, p: f64) -> f64 {
    let peak = abs_diffs(row, reference).fold(0.0, f64::max);
    if peak == 0.0 || !peak.is_finite() {
        return peak;
    }
    let sum: f64 = abs_diffs(row, reference).map(|d| (d / peak).powf(p)).sum();
    peak * sum.powf(p.recip())
}

/// Straight-line distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Distance for Euclidean {
    fn distance(&self, row: ArrayView1<'_, f64>, reference: ArrayView1<'_, f64>) -> f64 {
        scaled_p_norm(row, reference, 2.0)
    }

    fn name(&self) -> &str {
        "euclidean"
    }
}

/// Sum of absolute differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Distance for Manhattan {
    fn distance(&self, row: ArrayView1<'_, f64>, reference: ArrayView1<'_, f64>) -> f64 {
        abs_diffs(row, reference).sum()
    }

    fn name(&self) -> &str {
        "manhattan"
    }
}

/// Largest absolute difference across criteria.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chebyshev;

impl Distance for Chebyshev {
    fn distance(&self, row: ArrayView1<'_, f64>, reference: ArrayView1<'_, f64>) -> f64 {
        abs_diffs(row, reference).fold(0.0, f64::max)
    }

    fn name(&self) -> &str {
        "chebyshev"
    }
}

/// Generalized p-norm distance.
#[derive(Debug, Clone, Copy)]
pub struct Minkowski {
    p: f64,
}

impl Minkowski {
    /// Create a Minkowski metric with exponent `p`.
    ///
    /// # Errors
    ///
    /// [`TopsisError::InvalidParameter`] unless `p` is finite and `> 0`.
    pub fn new(p: f64) -> Result<Self> {
        if !p.is_finite() || p <= 0.0 {
            return Err(TopsisError::InvalidParameter(format!(
                "minkowski exponent p must be a positive finite number, got {p}"
            )));
        }
        Ok(Self { p })
    }

    /// The exponent.
    pub const fn p(&self) -> f64 {
        self.p
    }
}

impl Default for Minkowski {
    fn default() -> Self {
        Self {
            p: DEFAULT_MINKOWSKI_P,
        }
    }
}

impl Distance for Minkowski {
    fn distance(&self, row: ArrayView1<'_, f64>, reference: ArrayView1<'_, f64>) -> f64 {
        scaled_p_norm(row, reference, self.p)
    }

    fn name(&self) -> &str {
        "minkowski"
    }
}

/// One minus cosine similarity.
///
/// A zero-magnitude vector has no direction; it is treated as fully
/// dissimilar and gets [`MAX_COSINE_DISTANCE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl Distance for Cosine {
    fn distance(&self, row: ArrayView1<'_, f64>, reference: ArrayView1<'_, f64>) -> f64 {
        let row_norm = column_norm(row);
        let ref_norm = column_norm(reference);
        if row_norm < MIN_NORM_THRESHOLD || ref_norm < MIN_NORM_THRESHOLD {
            return MAX_COSINE_DISTANCE;
        }
        let similarity = row
            .iter()
            .zip(reference)
            .map(|(a, b)| (a / row_norm) * (b / ref_norm))
            .sum::<f64>()
            .clamp(-1.0, 1.0);
        1.0 - similarity
    }

    fn name(&self) -> &str {
        "cosine"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_metric_names_round_trip() {
        for metric in DistanceMetric::ALL {
            assert_eq!(metric.to_string().parse::<DistanceMetric>().unwrap(), metric);
            assert_eq!(metric.build(None).unwrap().name(), metric.name());
        }
        assert_eq!(
            " Chebyshev ".parse::<DistanceMetric>().unwrap(),
            DistanceMetric::Chebyshev
        );
    }

    #[test]
    fn test_unknown_metric() {
        let err = "hamming".parse::<DistanceMetric>().unwrap_err();
        assert_eq!(err, TopsisError::InvalidMetric("hamming".to_string()));
    }

    #[test]
    fn test_default_metric_is_euclidean() {
        assert_eq!(DistanceMetric::default(), DistanceMetric::Euclidean);
    }

    #[test]
    fn test_known_distances() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![4.0, 6.0, 3.0];
        assert_relative_eq!(Euclidean.distance(a.view(), b.view()), 5.0);
        assert_relative_eq!(Manhattan.distance(a.view(), b.view()), 7.0);
        assert_relative_eq!(Chebyshev.distance(a.view(), b.view()), 4.0);
        assert_relative_eq!(
            Minkowski::default().distance(a.view(), b.view()),
            91.0_f64.cbrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_minkowski_generalizes() {
        let a = array![0.2, 0.9, 0.4];
        let b = array![0.5, 0.1, 0.3];
        let p1 = Minkowski::new(1.0).unwrap();
        let p2 = Minkowski::new(2.0).unwrap();
        assert_relative_eq!(
            p1.distance(a.view(), b.view()),
            Manhattan.distance(a.view(), b.view()),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            p2.distance(a.view(), b.view()),
            Euclidean.distance(a.view(), b.view()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_minkowski_rejects_bad_exponent() {
        for p in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                DistanceMetric::Minkowski.build(Some(p)),
                Err(TopsisError::InvalidParameter(_))
            ));
        }
        // p is ignored by other metrics
        assert!(DistanceMetric::Euclidean.build(Some(-1.0)).is_ok());
    }

    #[test]
    fn test_cosine() {
        let a = array![1.0, 0.0];
        let b = array![0.0, 2.0];
        let c = array![3.0, 0.0];
        assert_relative_eq!(Cosine.distance(a.view(), b.view()), 1.0);
        assert_relative_eq!(Cosine.distance(a.view(), c.view()), 0.0);
        assert_relative_eq!(Cosine.distance(a.view(), (-&c).view()), 2.0);
    }

    #[test]
    fn test_large_differences_stay_finite() {
        let a = array![1e300, -1e300, 5e299];
        let b = array![-1e300, 1e300, 0.0];
        for metric in DistanceMetric::ALL {
            let d = metric.build(None).unwrap().distance(a.view(), b.view());
            assert!(d.is_finite(), "{metric} overflowed: {d}");
        }
        assert_relative_eq!(
            Euclidean.distance(a.view(), b.view()),
            (8.0_f64 + 0.25).sqrt() * 1e300,
            max_relative = 1e-12
        );
        // cos = -2 / (1.5 * sqrt(2))
        assert_relative_eq!(
            Cosine.distance(a.view(), b.view()),
            1.0 + 2.0 / (1.5 * 2.0_f64.sqrt()),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_cosine_zero_magnitude_is_max_distance() {
        let zero = array![0.0, 0.0];
        let b = array![1.0, 1.0];
        assert_eq!(Cosine.distance(zero.view(), b.view()), MAX_COSINE_DISTANCE);
        assert_eq!(Cosine.distance(b.view(), zero.view()), MAX_COSINE_DISTANCE);
    }
}
