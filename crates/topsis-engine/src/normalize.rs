//! Vector normalization and weighting.

use ndarray::{Array2, Axis};
use topsis_traits::stats::{MIN_NORM_THRESHOLD, column_norm, max_abs};
use topsis_traits::types::describe_column;
use topsis_traits::{DecisionMatrix, NormalizedMatrix, Result, WeightVector};

/// Scale each column to unit Euclidean norm, then multiply by its weight.
///
/// An all-zero column has no direction to normalize along; it normalizes to
/// zeros instead of NaN.
///
/// # Errors
///
/// [`TopsisError::DimensionMismatch`](topsis_traits::TopsisError::DimensionMismatch)
/// if there is not exactly one weight per criterion.
///
/// # Examples
///
/// ```rust
/// use topsis_engine::normalize;
/// use topsis_traits::{DecisionMatrix, WeightVector};
///
/// let matrix = DecisionMatrix::from_rows(vec![vec![3.0, 1.0], vec![4.0, 0.0]]).unwrap();
/// let weights = WeightVector::new(vec![2.0, 1.0]).unwrap();
///
/// let normalized = normalize(&matrix, &weights).unwrap();
/// assert!((normalized.values()[[0, 0]] - 1.2).abs() < 1e-12);
/// assert!((normalized.values()[[1, 0]] - 1.6).abs() < 1e-12);
/// ```
pub fn normalize(matrix: &DecisionMatrix, weights: &WeightVector) -> Result<NormalizedMatrix> {
    weights.check_len(matrix.n_criteria())?;

    let mut normalized: Array2<f64> = matrix.values().clone();
    for ((j, mut column), &weight) in normalized
        .axis_iter_mut(Axis(1))
        .enumerate()
        .zip(weights.as_array())
    {
        if column_norm(column.view()) < MIN_NORM_THRESHOLD {
            tracing::warn!(column = %describe_column(j, None), "all-zero column normalizes to zero");
            column.fill(0.0);
            continue;
        }

        // Divide by the peak first so the norm of the rescaled column lies in [1, sqrt(n)].
        let peak = max_abs(column.view());
        column.mapv_inplace(|x| x / peak);
        let norm = column_norm(column.view());
        column.mapv_inplace(|x| x / norm * weight);
    }

    Ok(NormalizedMatrix::new(normalized))
}
