//! Ideal-best and ideal-worst reference vectors.

use ndarray::{Array1, Axis};
use topsis_traits::{IdealVectors, Impact, ImpactVector, NormalizedMatrix, Result};

/// Derive the per-criterion ideal vectors from a normalized matrix.
///
/// For a benefit criterion the best value is the column maximum and the worst
/// the minimum; a cost criterion swaps them.
///
/// # Errors
///
/// [`TopsisError::DimensionMismatch`](topsis_traits::TopsisError::DimensionMismatch)
/// if there is not exactly one impact per criterion. Unrecognized impact
/// symbols are rejected earlier, when the [`ImpactVector`] is parsed.
pub fn ideal_vectors(normalized: &NormalizedMatrix, impacts: &ImpactVector) -> Result<IdealVectors> {
    impacts.check_len(normalized.n_criteria())?;

    let columns = normalized.values().axis_iter(Axis(1));
    let (best, worst): (Vec<f64>, Vec<f64>) = columns
        .zip(impacts.as_slice())
        .map(|(column, impact)| {
            let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = column.iter().copied().fold(f64::INFINITY, f64::min);
            match impact {
                Impact::Benefit => (max, min),
                Impact::Cost => (min, max),
            }
        })
        .unzip();

    Ok(IdealVectors {
        best: Array1::from_vec(best),
        worst: Array1::from_vec(worst),
    })
}
