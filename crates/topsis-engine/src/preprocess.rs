//! Missing-value imputation.
//!
//! The preprocessor turns a [`RawMatrix`] into a complete [`DecisionMatrix`]
//! column by column. Each column is imputed independently from its own
//! present values; row order matters for the fill and interpolation
//! strategies.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use topsis_traits::{DecisionMatrix, RawMatrix, Result, TopsisError, stats};

/// How missing entries are replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataStrategy {
    /// Column mean over present values.
    #[default]
    Mean,
    /// Column median over present values.
    Median,
    /// Nearest preceding present value. Fails if the first row is missing.
    Ffill,
    /// Nearest following present value. Fails if the last row is missing.
    Bfill,
    /// Linear interpolation by row index between the nearest present values.
    InterpolateLinear,
    /// Quadratic interpolation through the nearest present values.
    InterpolatePolynomial,
}

impl MissingDataStrategy {
    /// All strategies, in documentation order.
    pub const ALL: [Self; 6] = [
        Self::Mean,
        Self::Median,
        Self::Ffill,
        Self::Bfill,
        Self::InterpolateLinear,
        Self::InterpolatePolynomial,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Ffill => "ffill",
            Self::Bfill => "bfill",
            Self::InterpolateLinear => "interpolate_linear",
            Self::InterpolatePolynomial => "interpolate_polynomial",
        }
    }
}

impl fmt::Display for MissingDataStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MissingDataStrategy {
    type Err = TopsisError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == key)
            .ok_or_else(|| {
                TopsisError::InvalidData(format!(
                    "unknown missing-data strategy '{s}': expected one of mean, median, ffill, \
                     bfill, interpolate_linear, interpolate_polynomial"
                ))
            })
    }
}

/// Replaces missing entries according to a [`MissingDataStrategy`].
///
/// # Examples
///
/// ```rust
/// use topsis_engine::{MissingDataStrategy, Preprocessor};
/// use topsis_traits::RawMatrix;
///
/// let raw = RawMatrix::from_rows(vec![
///     vec![Some(1.0), Some(4.0)],
///     vec![None, Some(5.0)],
///     vec![Some(3.0), None],
/// ])
/// .unwrap();
///
/// let clean = Preprocessor::new(MissingDataStrategy::Mean).process(&raw).unwrap();
/// assert_eq!(clean.values()[[1, 0]], 2.0);
/// assert_eq!(clean.values()[[2, 1]], 4.5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor {
    strategy: MissingDataStrategy,
}

impl Preprocessor {
    /// Create a preprocessor for the given strategy.
    pub const fn new(strategy: MissingDataStrategy) -> Self {
        Self { strategy }
    }

    /// The configured strategy.
    pub const fn strategy(&self) -> MissingDataStrategy {
        self.strategy
    }

    /// Impute every missing entry, or fail without partial output.
    pub fn process(&self, raw: &RawMatrix) -> Result<DecisionMatrix> {
        let (rows, cols) = (raw.n_alternatives(), raw.n_criteria());
        let missing = raw.missing_count();

        if missing == 0 {
            return DecisionMatrix::new(raw.values().mapv(|v| v.unwrap_or_default()));
        }

        tracing::debug!(
            strategy = %self.strategy,
            missing,
            rows,
            cols,
            "imputing missing values"
        );

        let mut filled = Array2::<f64>::zeros((rows, cols));
        for j in 0..cols {
            let column = self.impute_column(&raw.column(j), &raw.describe_column(j))?;
            filled.column_mut(j).assign(&Array1::from_vec(column));
        }

        DecisionMatrix::new(filled)
    }

    fn impute_column(&self, column: &[Option<f64>], label: &str) -> Result<Vec<f64>> {
        let present: Vec<usize> = column
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|_| i))
            .collect();

        if present.is_empty() {
            return Err(TopsisError::InvalidData(format!(
                "{label} has no values to impute from"
            )));
        }
        if present.len() == column.len() {
            return Ok(column.iter().flatten().copied().collect());
        }

        match self.strategy {
            MissingDataStrategy::Mean => Ok(fill_constant(column, stats::mean(column))),
            MissingDataStrategy::Median => Ok(fill_constant(column, stats::median(column))),
            MissingDataStrategy::Ffill => forward_fill(column, label),
            MissingDataStrategy::Bfill => backward_fill(column, label),
            MissingDataStrategy::InterpolateLinear => Ok(interpolate(column, &present, false)),
            MissingDataStrategy::InterpolatePolynomial => Ok(interpolate(column, &present, true)),
        }
    }
}

fn fill_constant(column: &[Option<f64>], value: Option<f64>) -> Vec<f64> {
    let value = value.unwrap_or_default();
    column.iter().map(|v| v.unwrap_or(value)).collect()
}

fn forward_fill(column: &[Option<f64>], label: &str) -> Result<Vec<f64>> {
    let mut last = None;
    column
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if v.is_some() {
                last = *v;
            }
            last.ok_or_else(|| {
                TopsisError::InvalidData(format!(
                    "ffill cannot resolve row {} of {label}: no preceding value",
                    i + 1
                ))
            })
        })
        .collect()
}

fn backward_fill(column: &[Option<f64>], label: &str) -> Result<Vec<f64>> {
    let mut next = None;
    let mut filled = vec![0.0; column.len()];
    for (i, v) in column.iter().enumerate().rev() {
        if v.is_some() {
            next = *v;
        }
        filled[i] = next.ok_or_else(|| {
            TopsisError::InvalidData(format!(
                "bfill cannot resolve row {} of {label}: no following value",
                i + 1
            ))
        })?;
    }
    Ok(filled)
}

/// Interpolate missing rows from `present` (sorted row indices with values).
///
/// Rows outside the first/last present value take that nearest value.
fn interpolate(column: &[Option<f64>], present: &[usize], quadratic: bool) -> Vec<f64> {
    let value = |k: usize| column[k].unwrap_or_default();
    let first = present[0];
    let last = present[present.len() - 1];

    column
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if let Some(x) = v {
                return *x;
            }
            if i < first {
                return value(first);
            }
            if i > last {
                return value(last);
            }

            // `next` is the first present row after i; `prev` the one before it.
            let next = present.partition_point(|&k| k < i);
            let prev = next - 1;
            let (p, n) = (present[prev], present[next]);

            if quadratic {
                let before = prev.checked_sub(1).map(|a| present[a]);
                let after = present.get(next + 1).copied();
                let third = match (before, after) {
                    (Some(b), Some(a)) if a - i < i - b => Some(a),
                    (Some(b), _) => Some(b),
                    (None, a) => a,
                };
                if let Some(t) = third {
                    let points = [p, n, t].map(|k| (k as f64, value(k)));
                    return lagrange(&points, i as f64);
                }
            }

            let t = (i - p) as f64 / (n - p) as f64;
            value(p) + (value(n) - value(p)) * t
        })
        .collect()
}

fn lagrange(points: &[(f64, f64)], x: f64) -> f64 {
    points
        .iter()
        .enumerate()
        .map(|(a, &(xa, ya))| {
            let basis: f64 = points
                .iter()
                .enumerate()
                .filter(|&(b, _)| b != a)
                .map(|(_, &(xb, _))| (x - xb) / (xa - xb))
                .product();
            ya * basis
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn raw(column: Vec<Option<f64>>) -> RawMatrix {
        // Pair the column under test with a complete second criterion.
        let rows = column
            .into_iter()
            .enumerate()
            .map(|(i, v)| vec![v, Some(i as f64)])
            .collect();
        RawMatrix::from_rows(rows).unwrap()
    }

    fn first_column(strategy: MissingDataStrategy, column: Vec<Option<f64>>) -> Result<Vec<f64>> {
        Preprocessor::new(strategy)
            .process(&raw(column))
            .map(|m| m.column(0).to_vec())
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in MissingDataStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<MissingDataStrategy>().unwrap(), strategy);
        }
        assert_eq!(
            "Interpolate-Linear".parse::<MissingDataStrategy>().unwrap(),
            MissingDataStrategy::InterpolateLinear
        );
        assert!(matches!(
            "zero".parse::<MissingDataStrategy>(),
            Err(TopsisError::InvalidData(_))
        ));
    }

    #[test]
    fn test_default_strategy_is_mean() {
        assert_eq!(MissingDataStrategy::default(), MissingDataStrategy::Mean);
    }

    #[test]
    fn test_complete_matrix_passes_through() {
        let col = vec![Some(1.0), Some(2.0), Some(3.0)];
        for strategy in MissingDataStrategy::ALL {
            assert_eq!(first_column(strategy, col.clone()).unwrap(), vec![1.0, 2.0, 3.0]);
        }
    }

    #[test]
    fn test_mean_and_median() {
        let col = vec![Some(1.0), None, Some(2.0), Some(9.0)];
        assert_eq!(
            first_column(MissingDataStrategy::Mean, col.clone()).unwrap(),
            vec![1.0, 4.0, 2.0, 9.0]
        );
        assert_eq!(
            first_column(MissingDataStrategy::Median, col).unwrap(),
            vec![1.0, 2.0, 2.0, 9.0]
        );
    }

    #[test]
    fn test_ffill_and_bfill() {
        let col = vec![Some(1.0), None, None, Some(4.0)];
        assert_eq!(
            first_column(MissingDataStrategy::Ffill, col.clone()).unwrap(),
            vec![1.0, 1.0, 1.0, 4.0]
        );
        assert_eq!(
            first_column(MissingDataStrategy::Bfill, col).unwrap(),
            vec![1.0, 4.0, 4.0, 4.0]
        );
    }

    #[test]
    fn test_fill_boundaries_fail() {
        let leading = vec![None, Some(2.0), Some(3.0)];
        assert!(matches!(
            first_column(MissingDataStrategy::Ffill, leading.clone()),
            Err(TopsisError::InvalidData(_))
        ));
        assert!(first_column(MissingDataStrategy::Bfill, leading).is_ok());

        let trailing = vec![Some(1.0), Some(2.0), None];
        assert!(matches!(
            first_column(MissingDataStrategy::Bfill, trailing.clone()),
            Err(TopsisError::InvalidData(_))
        ));
        assert!(first_column(MissingDataStrategy::Ffill, trailing).is_ok());
    }

    #[test]
    fn test_all_missing_column_fails_for_every_strategy() {
        for strategy in MissingDataStrategy::ALL {
            let err = first_column(strategy, vec![None, None, None]).unwrap_err();
            assert!(err.to_string().contains("column 1"), "{strategy}: {err}");
        }
    }

    #[test]
    fn test_errors_name_the_criterion() {
        let named = raw(vec![None, Some(2.0), Some(3.0)])
            .with_criteria(vec!["price".to_string(), "storage".to_string()])
            .unwrap();
        let err = Preprocessor::new(MissingDataStrategy::Ffill)
            .process(&named)
            .unwrap_err();
        assert!(err.to_string().contains("column 1 (price)"), "{err}");

        let named = raw(vec![None, None])
            .with_criteria(vec!["price".to_string(), "storage".to_string()])
            .unwrap();
        let err = Preprocessor::default().process(&named).unwrap_err();
        assert!(err.to_string().contains("column 1 (price)"), "{err}");
    }

    #[test]
    fn test_interpolate_linear() {
        let col = vec![None, Some(2.0), None, None, Some(8.0), None];
        let filled = first_column(MissingDataStrategy::InterpolateLinear, col).unwrap();
        assert_eq!(filled, vec![2.0, 2.0, 4.0, 6.0, 8.0, 8.0]);
    }

    #[test]
    fn test_interpolate_polynomial_recovers_quadratic() {
        // y = x^2 sampled at 0, 1, 3, 4 with row 2 missing
        let col = vec![Some(0.0), Some(1.0), None, Some(9.0), Some(16.0)];
        let filled = first_column(MissingDataStrategy::InterpolatePolynomial, col).unwrap();
        assert_relative_eq!(filled[2], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_polynomial_falls_back_to_linear() {
        let col = vec![Some(1.0), None, Some(3.0)];
        let filled = first_column(MissingDataStrategy::InterpolatePolynomial, col).unwrap();
        assert_relative_eq!(filled[1], 2.0);
    }

    #[test]
    fn test_interpolate_polynomial_equidistant_prefers_earlier_row() {
        // Row 2 sits between rows 1 and 3; rows 0 and 4 are both two rows away.
        // Through rows 0, 1, 3 (y = x^2) the value is 4; through rows 1, 3, 4 it is -24.
        let col = vec![Some(0.0), Some(1.0), None, Some(9.0), Some(100.0)];
        let filled = first_column(MissingDataStrategy::InterpolatePolynomial, col).unwrap();
        assert_relative_eq!(filled[2], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_polynomial_uses_nearer_third_point() {
        // Row 4 sits between rows 3 and 5; row 6 (two away) beats row 1 (three away).
        let col = vec![
            Some(50.0),
            Some(1.0),
            None,
            Some(9.0),
            None,
            Some(25.0),
            Some(36.0),
        ];
        let filled = first_column(MissingDataStrategy::InterpolatePolynomial, col).unwrap();
        assert_relative_eq!(filled[4], 16.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_polynomial_flat_edges() {
        let col = vec![None, None, Some(1.0), Some(4.0), Some(9.0), None];
        let filled = first_column(MissingDataStrategy::InterpolatePolynomial, col).unwrap();
        assert_eq!(filled, vec![1.0, 1.0, 1.0, 4.0, 9.0, 9.0]);
    }

    #[test]
    fn test_lagrange_through_points() {
        let points = [(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
        // y = x^2 + x + 1
        assert_relative_eq!(lagrange(&points, 3.0), 13.0, epsilon = 1e-12);
    }
}
