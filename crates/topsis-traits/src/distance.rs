//! Distance trait used by the scorer.
//!
//! A distance measures how far an alternative's weighted row lies from an
//! ideal reference vector. Implementations live in `topsis-engine`; this
//! trait is the seam that lets callers plug in their own.

use ndarray::ArrayView1;

/// Distance between an alternative's row and a reference vector.
///
/// Implementations must be pure and thread-safe (`Send + Sync`) so that
/// independent rankings can run concurrently.
///
/// # Examples
///
/// ```rust
/// use ndarray::{array, ArrayView1};
/// use topsis_traits::Distance;
///
/// struct Hamming;
///
/// impl Distance for Hamming {
///     fn distance(&self, row: ArrayView1<'_, f64>, reference: ArrayView1<'_, f64>) -> f64 {
///         row.iter().zip(reference.iter()).filter(|(a, b)| a != b).count() as f64
///     }
///
///     fn name(&self) -> &str {
///         "hamming"
///     }
/// }
///
/// let a = array![1.0, 2.0, 3.0];
/// let b = array![1.0, 0.0, 3.0];
/// assert_eq!(Hamming.distance(a.view(), b.view()), 1.0);
/// ```
pub trait Distance: Send + Sync {
    /// Distance from `row` to `reference`. Both views have the same length.
    ///
    /// Must return a finite, non-negative value for finite inputs.
    fn distance(&self, row: ArrayView1<'_, f64>, reference: ArrayView1<'_, f64>) -> f64;

    /// Name of this metric, used in logs and reports.
    fn name(&self) -> &str;
}
