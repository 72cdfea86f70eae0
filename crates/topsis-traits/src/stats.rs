//! Column statistics used by imputation and normalization.
//!
//! These helpers work on plain slices so they can be shared by stages that
//! hold columns as `Vec<Option<f64>>` or as ndarray views.

use ndarray::ArrayView1;

/// Norms below this threshold are treated as zero.
pub const MIN_NORM_THRESHOLD: f64 = 1e-12;

/// Present values of a column, in row order.
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}

/// Arithmetic mean of the present values, or `None` if all are missing.
///
/// # Examples
///
/// ```
/// use topsis_traits::stats::mean;
///
/// assert_eq!(mean(&[Some(1.0), None, Some(3.0)]), Some(2.0));
/// assert_eq!(mean(&[None, None]), None);
/// ```
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let present = present(values);
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}

/// Median of the present values, or `None` if all are missing.
///
/// An even count yields the mean of the two middle values.
///
/// # Examples
///
/// ```
/// use topsis_traits::stats::median;
///
/// assert_eq!(median(&[Some(4.0), None, Some(1.0), Some(3.0)]), Some(3.0));
/// assert_eq!(median(&[Some(4.0), Some(1.0)]), Some(2.5));
/// ```
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut sorted = present(values);
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Largest absolute value in a column, `0.0` for an empty column.
pub fn max_abs(column: ArrayView1<'_, f64>) -> f64 {
    column.iter().fold(0.0, |peak, x| peak.max(x.abs()))
}

/// Euclidean norm of a column: `sqrt(sum(x^2))`.
///
/// Values are rescaled by the column's largest magnitude before squaring, so
/// any finite column whose norm is representable yields a finite norm.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use topsis_traits::stats::column_norm;
///
/// assert_eq!(column_norm(array![3.0, 4.0].view()), 5.0);
/// let large = column_norm(array![3e200, 4e200].view());
/// assert!((large / 5e200 - 1.0).abs() < 1e-12);
/// ```
pub fn column_norm(column: ArrayView1<'_, f64>) -> f64 {
    let peak = max_abs(column);
    if peak == 0.0 || !peak.is_finite() {
        return peak;
    }
    peak * column.iter().map(|x| (x / peak).powi(2)).sum::<f64>().sqrt()
}
