//! Value types passed between the pipeline stages.
//!
//! All types here are immutable once built. Shape invariants (rectangular
//! rows, at least one alternative, at least two criteria, finite values) are
//! checked once at construction so downstream stages can index freely.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::{Result, TopsisError};

/// Minimum number of criterion columns a decision matrix must carry.
pub const MIN_CRITERIA: usize = 2;

/// Describe column `index` for error messages, including its header name when known.
pub fn describe_column(index: usize, names: Option<&[String]>) -> String {
    match names.and_then(|n| n.get(index)) {
        Some(name) => format!("column {} ({})", index + 1, name),
        None => format!("column {}", index + 1),
    }
}

fn check_shape(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 {
        return Err(TopsisError::Schema(
            "decision matrix has no alternatives".to_string(),
        ));
    }
    if cols < MIN_CRITERIA {
        return Err(TopsisError::Schema(format!(
            "decision matrix needs at least {MIN_CRITERIA} criteria, found {cols}"
        )));
    }
    Ok(())
}

fn rectangular<T: Clone>(rows: Vec<Vec<T>>) -> Result<Array2<T>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    check_shape(n_rows, n_cols)?;

    let mut flat = Vec::with_capacity(n_rows * n_cols);
    for (i, row) in rows.into_iter().enumerate() {
        if row.len() != n_cols {
            return Err(TopsisError::dimension_mismatch(
                format!("row {}", i + 1),
                n_cols,
                row.len(),
            ));
        }
        flat.extend(row);
    }

    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| TopsisError::InvalidData(format!("cannot shape matrix: {e}")))
}

/// A decision matrix as ingested, possibly with missing entries.
///
/// `None` marks a missing value. NaN inputs are treated as missing; infinite
/// inputs are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMatrix {
    values: Array2<Option<f64>>,
    criteria: Option<Vec<String>>,
}

impl RawMatrix {
    /// Build a raw matrix from rows of optional values.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        let values = rectangular(rows)?;
        Self::from_array(values)
    }

    /// Build a raw matrix from an array of optional values.
    pub fn from_array(mut values: Array2<Option<f64>>) -> Result<Self> {
        let (rows, cols) = values.dim();
        check_shape(rows, cols)?;

        for ((i, j), v) in values.indexed_iter_mut() {
            match *v {
                Some(x) if x.is_nan() => *v = None,
                Some(x) if x.is_infinite() => {
                    return Err(TopsisError::InvalidData(format!(
                        "non-finite value {x} at row {}, {}",
                        i + 1,
                        describe_column(j, None)
                    )));
                }
                _ => {}
            }
        }
        Ok(Self {
            values,
            criteria: None,
        })
    }

    /// Attach criterion names, used to name columns in error messages.
    ///
    /// # Errors
    ///
    /// [`TopsisError::DimensionMismatch`] unless there is one name per criterion.
    pub fn with_criteria(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.n_criteria() {
            return Err(TopsisError::dimension_mismatch(
                "criterion names",
                self.n_criteria(),
                names.len(),
            ));
        }
        self.criteria = Some(names);
        Ok(self)
    }

    /// Criterion names, if attached.
    pub fn criteria(&self) -> Option<&[String]> {
        self.criteria.as_deref()
    }

    /// Describe column `j` for error messages, by name when one is attached.
    pub fn describe_column(&self, j: usize) -> String {
        describe_column(j, self.criteria())
    }

    /// Returns the underlying array.
    pub const fn values(&self) -> &Array2<Option<f64>> {
        &self.values
    }

    /// Number of alternatives (rows).
    pub fn n_alternatives(&self) -> usize {
        self.values.nrows()
    }

    /// Number of criteria (columns).
    pub fn n_criteria(&self) -> usize {
        self.values.ncols()
    }

    /// Column `j` as a vector of optional values in row order.
    pub fn column(&self, j: usize) -> Vec<Option<f64>> {
        self.values.column(j).to_vec()
    }

    /// Total number of missing entries.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Whether no entry is missing.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }
}

impl From<DecisionMatrix> for RawMatrix {
    fn from(matrix: DecisionMatrix) -> Self {
        Self {
            values: matrix.values.mapv(Some),
            criteria: None,
        }
    }
}

/// A complete decision matrix: alternatives by criteria, every value finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionMatrix {
    values: Array2<f64>,
}

impl DecisionMatrix {
    /// Build a decision matrix from an array, checking shape and finiteness.
    pub fn new(values: Array2<f64>) -> Result<Self> {
        let (rows, cols) = values.dim();
        check_shape(rows, cols)?;

        if let Some(((i, j), x)) = values.indexed_iter().find(|(_, x)| !x.is_finite()) {
            return Err(TopsisError::InvalidData(format!(
                "non-finite value {x} at row {}, {}",
                i + 1,
                describe_column(j, None)
            )));
        }
        Ok(Self { values })
    }

    /// Build a decision matrix from rows of values.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rectangular(rows)?)
    }

    /// Returns the underlying array.
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Consumes self and returns the underlying array.
    pub fn into_inner(self) -> Array2<f64> {
        self.values
    }

    /// Number of alternatives (rows).
    pub fn n_alternatives(&self) -> usize {
        self.values.nrows()
    }

    /// Number of criteria (columns).
    pub fn n_criteria(&self) -> usize {
        self.values.ncols()
    }

    /// Row `i`.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.values.row(i)
    }

    /// Column `j`.
    pub fn column(&self, j: usize) -> ArrayView1<'_, f64> {
        self.values.column(j)
    }
}

/// One non-negative weight per criterion.
///
/// Weights need not sum to one; scaling all weights by a positive constant
/// leaves the ranking unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightVector(Array1<f64>);

impl WeightVector {
    /// Build a weight vector. Every weight must be finite and non-negative.
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        for (j, w) in weights.iter().enumerate() {
            if !w.is_finite() || *w < 0.0 {
                return Err(TopsisError::InvalidParameter(format!(
                    "weight {w} for {} must be a finite non-negative number",
                    describe_column(j, None)
                )));
            }
        }
        Ok(Self(Array1::from_vec(weights)))
    }

    /// Uniform weights of 1.0 for `n` criteria.
    pub fn uniform(n: usize) -> Self {
        Self(Array1::ones(n))
    }

    /// Parse a comma-separated list such as `"1,1,0.5,2"`.
    pub fn parse(list: &str) -> Result<Self> {
        let weights = list
            .split(',')
            .map(str::trim)
            .enumerate()
            .map(|(j, token)| {
                token.parse::<f64>().map_err(|_| {
                    TopsisError::InvalidData(format!(
                        "weight '{token}' for {} is not a number",
                        describe_column(j, None)
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(weights)
    }

    /// Fail with [`TopsisError::DimensionMismatch`] unless there are `n` weights.
    pub fn check_len(&self, n: usize) -> Result<()> {
        if self.0.len() != n {
            return Err(TopsisError::dimension_mismatch("weights", n, self.0.len()));
        }
        Ok(())
    }

    /// Returns the weights as an array.
    pub const fn as_array(&self) -> &Array1<f64> {
        &self.0
    }

    /// Number of weights.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no weights.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Direction of preference for a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Higher values are better (`+`).
    Benefit,
    /// Lower values are better (`-`).
    Cost,
}

impl Impact {
    /// Parse `+`/`benefit` or `-`/`cost`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_ascii_lowercase().as_str() {
            "+" | "benefit" => Some(Self::Benefit),
            "-" | "cost" => Some(Self::Cost),
            _ => None,
        }
    }

    /// The short symbol used on the command line.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Benefit => "+",
            Self::Cost => "-",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Benefit => "benefit",
            Self::Cost => "cost",
        })
    }
}

impl FromStr for Impact {
    type Err = TopsisError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_symbol(s).ok_or_else(|| TopsisError::invalid_impact("impact", s))
    }
}

/// One impact per criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactVector(Vec<Impact>);

impl ImpactVector {
    /// Wrap already-parsed impacts.
    pub const fn new(impacts: Vec<Impact>) -> Self {
        Self(impacts)
    }

    /// Parse symbols, naming the offending column on failure.
    pub fn from_symbols<S: AsRef<str>>(symbols: &[S], names: Option<&[String]>) -> Result<Self> {
        symbols
            .iter()
            .enumerate()
            .map(|(j, s)| {
                Impact::from_symbol(s.as_ref()).ok_or_else(|| {
                    TopsisError::invalid_impact(describe_column(j, names), s.as_ref().trim())
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Parse a comma-separated list such as `"+,+,-,+"`.
    pub fn parse(list: &str) -> Result<Self> {
        let symbols: Vec<&str> = list.split(',').collect();
        Self::from_symbols(&symbols, None)
    }

    /// Fail with [`TopsisError::DimensionMismatch`] unless there are `n` impacts.
    pub fn check_len(&self, n: usize) -> Result<()> {
        if self.0.len() != n {
            return Err(TopsisError::dimension_mismatch("impacts", n, self.0.len()));
        }
        Ok(())
    }

    /// Returns the impacts as a slice.
    pub fn as_slice(&self) -> &[Impact] {
        &self.0
    }

    /// Number of impacts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no impacts.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Column-normalized, weighted decision matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedMatrix(Array2<f64>);

impl NormalizedMatrix {
    /// Wrap a normalized array.
    pub const fn new(values: Array2<f64>) -> Self {
        Self(values)
    }

    /// Returns the underlying array.
    pub const fn values(&self) -> &Array2<f64> {
        &self.0
    }

    /// Row `i`.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.0.row(i)
    }

    /// Iterate rows in alternative order.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.0.axis_iter(Axis(0))
    }

    /// Number of alternatives (rows).
    pub fn n_alternatives(&self) -> usize {
        self.0.nrows()
    }

    /// Number of criteria (columns).
    pub fn n_criteria(&self) -> usize {
        self.0.ncols()
    }
}

/// Per-criterion ideal-best and ideal-worst reference values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdealVectors {
    /// Best value per criterion.
    pub best: Array1<f64>,
    /// Worst value per criterion.
    pub worst: Array1<f64>,
}

/// One closeness score per alternative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreVector(Array1<f64>);

impl ScoreVector {
    /// Wrap scores.
    pub const fn new(scores: Array1<f64>) -> Self {
        Self(scores)
    }

    /// Returns the scores as an array.
    pub const fn as_array(&self) -> &Array1<f64> {
        &self.0
    }

    /// Score of alternative `i`.
    pub fn get(&self, i: usize) -> Option<f64> {
        self.0.get(i).copied()
    }

    /// Number of scores.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no scores.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate scores in alternative order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

/// One rank per alternative, 1 being best.
///
/// Always a permutation of `1..=N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankVector(Vec<usize>);

impl RankVector {
    /// Wrap ranks.
    ///
    /// # Errors
    ///
    /// [`TopsisError::InvalidData`] unless `ranks` is a permutation of `1..=N`.
    pub fn new(ranks: Vec<usize>) -> Result<Self> {
        let n = ranks.len();
        let mut seen = vec![false; n];
        for &r in &ranks {
            if r == 0 || r > n || std::mem::replace(&mut seen[r - 1], true) {
                return Err(TopsisError::InvalidData(format!(
                    "ranks must be a permutation of 1..={n}, found {r}"
                )));
            }
        }
        Ok(Self(ranks))
    }

    /// Rank scores highest first. Ties keep row order.
    pub fn from_scores(scores: &ScoreVector) -> Self {
        let values = scores.as_array();
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

        let mut ranks = vec![0; values.len()];
        for (position, &i) in order.iter().enumerate() {
            ranks[i] = position + 1;
        }
        Self(ranks)
    }

    /// Exact reversal of the assignment: rank `r` becomes `N + 1 - r`.
    ///
    /// Applying it twice restores the original ranks.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let n = self.0.len();
        Self(self.0.iter().map(|r| n + 1 - r).collect())
    }

    /// Returns the ranks as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Rank of alternative `i`.
    pub fn get(&self, i: usize) -> Option<usize> {
        self.0.get(i).copied()
    }

    /// Number of ranks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no ranks.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
