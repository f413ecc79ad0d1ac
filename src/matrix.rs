//! Pairwise-comparison matrices.
//!
//! Entry `(i, j)` says how much more important criterion `i` is than
//! criterion `j`. A well-formed matrix is positive, has a unit diagonal and is
//! reciprocal (`a[j][i] == 1 / a[i][j]`). Only positivity and finiteness are
//! enforced at construction: raw grids pasted by a user are allowed to break
//! reciprocity, and the solver copes with that.

use std::fmt;

use nalgebra::DMatrix;

use crate::error::{AhpError, Result};

/// Smallest number of criteria accepted.
pub const MIN_CRITERIA: usize = 2;
/// Largest number of criteria accepted.
pub const MAX_CRITERIA: usize = 10;

/// Lower end of Saaty's 1-9 scale ("extremely less important").
pub const MIN_JUDGMENT: f64 = 1.0 / 9.0;
/// Upper end of Saaty's 1-9 scale ("extremely more important").
pub const MAX_JUDGMENT: f64 = 9.0;

const JUDGMENT_SLACK: f64 = 1e-12;

/// A validated `n x n` pairwise-comparison matrix, stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonMatrix {
    n: usize,
    values: Vec<f64>,
}

fn check_size(n: usize) -> Result<()> {
    if (MIN_CRITERIA..=MAX_CRITERIA).contains(&n) {
        Ok(())
    } else {
        Err(AhpError::UnsupportedSize { n })
    }
}

impl ComparisonMatrix {
    /// Build a matrix from a raw grid of rows.
    ///
    /// Shape is checked before anything else. The reported column count is
    /// the length of the first row that is not `n` long.
    ///
    /// ```rust
    /// use ahp_weights::{AhpError, ComparisonMatrix};
    ///
    /// let rows = vec![vec![1.0, 2.0], vec![0.5, 1.0], vec![1.0, 1.0]];
    /// let err = ComparisonMatrix::from_rows(&rows, 3).unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     AhpError::ShapeMismatch { expected: (3, 3), actual: (3, 2) }
    /// );
    /// ```
    pub fn from_rows(rows: &[Vec<f64>], n: usize) -> Result<Self> {
        check_size(n)?;

        let bad_cols = rows.iter().map(Vec::len).find(|&len| len != n);
        if rows.len() != n || bad_cols.is_some() {
            return Err(AhpError::ShapeMismatch {
                expected: (n, n),
                actual: (rows.len(), bad_cols.unwrap_or(n)),
            });
        }

        let mut values = Vec::with_capacity(n * n);
        for (row, r) in rows.iter().enumerate() {
            for (col, &value) in r.iter().enumerate() {
                if !value.is_finite() {
                    return Err(AhpError::NonFinite { row, col });
                }
                if value <= 0.0 {
                    return Err(AhpError::NonPositiveEntry { row, col, value });
                }
                values.push(value);
            }
        }
        Ok(Self { n, values })
    }

    /// The "no preference" matrix: every entry is 1.
    pub fn identity_judgments(n: usize) -> Result<Self> {
        check_size(n)?;
        Ok(Self {
            n,
            values: vec![1.0; n * n],
        })
    }

    /// Number of criteria.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Entry `(i, j)`. Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of range");
        self.values[i * self.n + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// All entries, row-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Copy out as a `Vec` of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values.chunks(self.n).map(<[f64]>::to_vec).collect()
    }

    pub(crate) fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.n, self.n, &self.values)
    }

    /// Largest `|a[i][j] * a[j][i] - 1|` over all pairs, diagonal included.
    ///
    /// Zero for a matrix built by [`build_reciprocal_matrix`] (up to rounding).
    pub fn max_reciprocal_error(&self) -> f64 {
        let mut worst = 0.0_f64;
        for i in 0..self.n {
            for j in i..self.n {
                let err = (self.get(i, j) * self.get(j, i) - 1.0).abs();
                worst = worst.max(err);
            }
        }
        worst
    }

    /// True if every pair is reciprocal within `tol`.
    pub fn is_reciprocal(&self, tol: f64) -> bool {
        self.max_reciprocal_error() <= tol
    }
}

/// Build a fully reciprocal matrix from upper-triangle judgments.
///
/// `upper` holds `a[i][j]` for every `i < j` in row-major order:
/// `(0,1), (0,2), ..., (0,n-1), (1,2), ...`. Each value must lie on the
/// `[1/9, 9]` scale. The lower triangle is filled with reciprocals and the
/// diagonal with ones.
///
/// ```rust
/// use ahp_weights::build_reciprocal_matrix;
///
/// let m = build_reciprocal_matrix(3, &[3.0, 5.0, 2.0]).unwrap();
/// assert_eq!(m.get(0, 2), 5.0);
/// assert_eq!(m.get(2, 0), 0.2);
/// assert_eq!(m.get(1, 1), 1.0);
/// ```
pub fn build_reciprocal_matrix(n: usize, upper: &[f64]) -> Result<ComparisonMatrix> {
    check_size(n)?;
    let expected = n * (n - 1) / 2;
    if upper.len() != expected {
        return Err(AhpError::JudgmentCountMismatch {
            expected,
            got: upper.len(),
        });
    }

    let mut values = vec![1.0; n * n];
    let mut judgments = upper.iter().copied();
    for i in 0..n {
        for j in (i + 1)..n {
            // Length was checked above.
            let value = judgments.next().unwrap_or(1.0);
            if !value.is_finite()
                || value < MIN_JUDGMENT - JUDGMENT_SLACK
                || value > MAX_JUDGMENT + JUDGMENT_SLACK
            {
                return Err(AhpError::JudgmentOutOfRange {
                    row: i,
                    col: j,
                    value,
                });
            }
            values[i * n + j] = value;
            values[j * n + i] = 1.0 / value;
        }
    }
    Ok(ComparisonMatrix { n, values })
}

impl fmt::Display for ComparisonMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            let cells: Vec<String> = self.row(i).iter().map(|v| format!("{v:>8.3}")).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
