//! Analytic Hierarchy Process (AHP) priority weights from pairwise comparisons.
//!
//! Given an `n x n` matrix where entry `(i, j)` says how much more important
//! criterion `i` is than criterion `j`, the solver returns the normalized
//! dominant eigenvector as the weight vector, plus Saaty's consistency index
//! and ratio for judging whether the comparisons hang together.
//!
//! Two ways in:
//!
//! - guided entry: collect the upper triangle and call
//!   [`build_reciprocal_matrix`], which fills in exact reciprocals;
//! - raw paste: [`parse_grid`] free-form text, then [`solve`] against the
//!   expected size. Reciprocity is not enforced on this path.
//!
//! ```rust
//! use ahp_weights::{build_reciprocal_matrix, AhpReport, CriterionLabels, Solver};
//!
//! // Cost vs comfort: 3, cost vs safety: 5, comfort vs safety: 2.
//! let m = build_reciprocal_matrix(3, &[3.0, 5.0, 2.0]).unwrap();
//! let p = Solver::default().solve(&m).unwrap();
//!
//! let sum: f64 = p.weights.iter().sum();
//! assert!((sum - 1.0).abs() < 1e-9);
//! assert!(p.consistency.consistency_ratio < 0.10);
//!
//! let labels = CriterionLabels::new(["cost", "comfort", "safety"], 3).unwrap();
//! let report = AhpReport::new(labels, p).unwrap();
//! assert_eq!(report.ranked()[0].label, "cost");
//! ```
//!
//! Everything is stateless; each call is an independent computation.

pub mod error;
pub mod matrix;
pub mod parse;
pub mod random_index;
pub mod report;
pub mod solver;

pub use error::{AhpError, Result};
pub use matrix::{build_reciprocal_matrix, ComparisonMatrix, MAX_CRITERIA, MIN_CRITERIA};
pub use parse::{parse_grid, parse_matrix};
pub use random_index::random_index;
pub use report::{AhpReport, CriterionLabels, RankedCriterion};
pub use solver::{ConsistencyReport, Priorities, Solver, SolverConfig, WeightVector};

/// Check that `rows` is `n x n` and solve it with the default settings.
///
/// ```rust
/// use ahp_weights::{solve, AhpError};
///
/// let ones = vec![vec![1.0; 3]; 3];
/// let p = solve(&ones, 3).unwrap();
/// assert!((p.weights[0] - 1.0 / 3.0).abs() < 1e-9);
///
/// let narrow = vec![vec![1.0; 2]; 3];
/// assert_eq!(
///     solve(&narrow, 3).unwrap_err(),
///     AhpError::ShapeMismatch { expected: (3, 3), actual: (3, 2) }
/// );
/// ```
pub fn solve(rows: &[Vec<f64>], n: usize) -> Result<Priorities> {
    Solver::default().solve_rows(rows, n)
}
