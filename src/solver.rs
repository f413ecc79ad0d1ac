//! Priority weights and consistency from a pairwise-comparison matrix.
//!
//! # Method
//!
//! For a positive reciprocal matrix `A`, Perron-Frobenius guarantees a real,
//! simple, dominant eigenvalue `lambda_max` whose eigenvector can be chosen
//! strictly positive. Saaty's AHP takes that eigenvector, scaled to sum to
//! one, as the priority vector.
//!
//! The solver:
//!
//! 1. rewrites `A` as `shift * I + scale * B`, where `shift` is the mean of
//!    the diagonal and `B` has entries in `[-1, 1]`. `B` has the same
//!    eigenvectors as `A`, and its spectrum is spread over a unit range even
//!    when the eigenvalues of `A` sit within `1e-12` of each other,
//! 2. computes the full (complex) spectrum of `B` from a real Schur
//!    decomposition and picks the eigenvalue with the largest real part,
//! 3. takes the eigenvector as the null vector of `B - mu * I`, the right
//!    singular vector of its smallest singular value, and checks the residual
//!    `|B v - mu v|` so an inaccurate vector is an error, never a result,
//! 4. divides by the component sum, which also fixes the arbitrary sign.
//!
//! # Consistency
//!
//! A perfectly consistent matrix (`a[i][k] == a[i][j] * a[j][k]`) has
//! `lambda_max == n`. The excess is the consistency index
//!
//! ```text
//!   CI = (lambda_max - n) / (n - 1)
//! ```
//!
//! and the consistency ratio `CR = CI / RI(n)` normalizes it by the average CI
//! of random matrices of the same size (see [`crate::random_index`]). Saaty's
//! rule of thumb accepts `CR < 0.10`.
//!
//! Raw grids need not be reciprocal. The spectrum is then not guaranteed to be
//! well behaved, so the normalized eigenvector is checked: negative weights
//! are reported as [`AhpError::DegenerateEigenvector`] rather than returned.

use std::cmp::Ordering;
use std::ops::Index;

use nalgebra::{DMatrix, DVector, Schur};
use tracing::{debug, warn};

use crate::error::{AhpError, Result};
use crate::matrix::ComparisonMatrix;
use crate::random_index::random_index;

/// Conventional acceptance threshold for the consistency ratio.
pub const DEFAULT_COHERENCE_THRESHOLD: f64 = 0.10;

/// Deflation threshold for the Schur QR sweeps on the balanced matrix.
const SCHUR_EPS: f64 = 1e-14;

/// Inputs further than this from reciprocal get a warning.
const RECIPROCAL_WARN_TOL: f64 = 1e-6;

/// Solver settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// `CR` strictly below this is reported as coherent.
    pub coherence_threshold: f64,
    /// Zero-sum and negative-weight tolerance; also the largest accepted
    /// eigenvector residual, relative to the balanced matrix norm.
    pub tolerance: f64,
    /// Cap on SVD iterations when extracting the eigenvector.
    pub max_iterations: usize,
    /// Cap on Schur QR sweeps.
    pub schur_max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            coherence_threshold: DEFAULT_COHERENCE_THRESHOLD,
            tolerance: 1e-9,
            max_iterations: 1000,
            schur_max_iterations: 1000,
        }
    }
}

impl SolverConfig {
    pub fn with_coherence_threshold(mut self, threshold: f64) -> Self {
        self.coherence_threshold = threshold;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_schur_max_iterations(mut self, max_iterations: usize) -> Self {
        self.schur_max_iterations = max_iterations;
        self
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(AhpError::InvalidConfig { reason });
        if !(self.coherence_threshold.is_finite() && self.coherence_threshold > 0.0) {
            return invalid(format!(
                "coherence_threshold must be positive and finite, got {}",
                self.coherence_threshold
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return invalid(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            ));
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations must be at least 1".to_string());
        }
        if self.schur_max_iterations == 0 {
            return invalid("schur_max_iterations must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Normalized priority weights, one per criterion, summing to 1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightVector(pub(crate) Vec<f64>);

impl WeightVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Index of the heaviest criterion (first one on ties).
    pub fn argmax(&self) -> Option<usize> {
        self.0
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &w)| match best {
                Some((_, bw)) if bw >= w => best,
                _ => Some((i, w)),
            })
            .map(|(i, _)| i)
    }
}

impl Index<usize> for WeightVector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

/// Consistency measures derived from `lambda_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsistencyReport {
    /// Dominant eigenvalue.
    pub lambda_max: f64,
    /// `(lambda_max - n) / (n - 1)`.
    pub consistency_index: f64,
    /// Random index for this size.
    pub random_index: f64,
    /// `CI / RI`, or 0 when `RI == 0`.
    pub consistency_ratio: f64,
    /// `consistency_ratio < threshold`.
    pub coherent: bool,
}

impl ConsistencyReport {
    /// Derive the report for an `n x n` matrix with dominant eigenvalue `lambda_max`.
    ///
    /// A matrix with fewer than two criteria has nothing to be inconsistent
    /// about: CI and CR are both 0 for `n < 2`, and the report is coherent for
    /// any positive threshold.
    pub fn from_lambda_max(lambda_max: f64, n: usize, threshold: f64) -> Self {
        let nf = n as f64;
        let consistency_index = if n < 2 {
            0.0
        } else {
            (lambda_max - nf) / (nf - 1.0)
        };
        let ri = random_index(n);
        // RI is 0 only for n <= 2, where any reciprocal matrix is consistent.
        let consistency_ratio = if ri != 0.0 {
            consistency_index / ri
        } else {
            0.0
        };
        Self {
            lambda_max,
            consistency_index,
            random_index: ri,
            consistency_ratio,
            coherent: consistency_ratio < threshold,
        }
    }
}

/// Output of one solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priorities {
    pub weights: WeightVector,
    pub consistency: ConsistencyReport,
}

/// Stateless AHP solver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Create a solver, rejecting out-of-range settings.
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Validate a raw grid against `n` and solve it.
    pub fn solve_rows(&self, rows: &[Vec<f64>], n: usize) -> Result<Priorities> {
        let matrix = ComparisonMatrix::from_rows(rows, n)?;
        self.solve(&matrix)
    }

    /// Compute priority weights and the consistency report.
    ///
    /// ```rust
    /// use ahp_weights::{build_reciprocal_matrix, Solver};
    ///
    /// let m = build_reciprocal_matrix(3, &[3.0, 5.0, 2.0]).unwrap();
    /// let p = Solver::default().solve(&m).unwrap();
    ///
    /// assert_eq!(p.weights.argmax(), Some(0));
    /// assert!(p.consistency.coherent);
    /// ```
    pub fn solve(&self, matrix: &ComparisonMatrix) -> Result<Priorities> {
        let n = matrix.n();
        let reciprocal_error = matrix.max_reciprocal_error();
        if reciprocal_error > RECIPROCAL_WARN_TOL {
            warn!(
                n,
                reciprocal_error,
                "comparison matrix is not reciprocal; weights may be unreliable"
            );
        }

        let balanced = Balanced::new(&matrix.to_dmatrix())?;
        let mu = dominant_eigenvalue(&balanced.b, &self.config)?;
        let lambda_max = balanced.shift + balanced.scale * mu;
        if !lambda_max.is_finite() {
            return Err(AhpError::numeric(format!(
                "dominant eigenvalue is not finite ({lambda_max})"
            )));
        }
        let (vector, residual) = dominant_eigenvector(&balanced.b, mu, &self.config)?;
        let weights = normalize(&vector, self.config.tolerance)?;
        let consistency =
            ConsistencyReport::from_lambda_max(lambda_max, n, self.config.coherence_threshold);

        debug!(
            n,
            lambda_max,
            ci = consistency.consistency_index,
            cr = consistency.consistency_ratio,
            coherent = consistency.coherent,
            residual,
            "solved comparison matrix"
        );

        Ok(Priorities {
            weights: WeightVector(weights),
            consistency,
        })
    }
}

/// `A = shift * I + scale * b`, with `b` scaled so its largest entry has
/// magnitude 1.
struct Balanced {
    shift: f64,
    scale: f64,
    b: DMatrix<f64>,
}

impl Balanced {
    fn new(a: &DMatrix<f64>) -> Result<Self> {
        let n = a.nrows();
        let nf = n as f64;
        let trace = a.trace();
        let shift = if trace.is_finite() {
            trace / nf
        } else {
            a.diagonal().iter().map(|d| d / nf).sum::<f64>()
        };

        let mut b = a - DMatrix::<f64>::identity(n, n) * shift;
        let scale = b.amax();
        if !(scale.is_finite() && scale > 0.0) {
            return Err(AhpError::numeric(format!(
                "cannot balance matrix (spread {scale})"
            )));
        }
        b /= scale;
        Ok(Self { shift, scale, b })
    }
}

/// Real part of the eigenvalue with the largest real part.
fn dominant_eigenvalue(b: &DMatrix<f64>, config: &SolverConfig) -> Result<f64> {
    let schur = Schur::try_new(b.clone(), SCHUR_EPS, config.schur_max_iterations)
        .ok_or_else(|| AhpError::numeric("Schur decomposition did not converge"))?;
    let spectrum = schur.complex_eigenvalues();

    let dominant = spectrum
        .iter()
        .copied()
        .max_by(|x, y| x.re.partial_cmp(&y.re).unwrap_or(Ordering::Equal))
        .ok_or_else(|| AhpError::numeric("empty spectrum"))?;

    if !(dominant.re.is_finite() && dominant.im.is_finite()) {
        return Err(AhpError::numeric(format!(
            "dominant eigenvalue is not finite ({} + {}i)",
            dominant.re, dominant.im
        )));
    }
    if dominant.im.abs() > config.tolerance * dominant.re.abs().max(1.0) {
        warn!(
            re = dominant.re,
            im = dominant.im,
            "dominant eigenvalue is complex; using its real part"
        );
    }
    Ok(dominant.re)
}

/// Unit-norm null vector of `b - mu * I` and its residual `|b v - mu v|`.
///
/// The vector is the right singular vector of the smallest singular value,
/// so its accuracy does not depend on the gap to the next eigenvalue. A
/// residual above `tolerance * max(1, |b|)` is a `NumericFailure`.
fn dominant_eigenvector(
    b: &DMatrix<f64>,
    mu: f64,
    config: &SolverConfig,
) -> Result<(DVector<f64>, f64)> {
    let n = b.nrows();
    let shifted = b - DMatrix::<f64>::identity(n, n) * mu;
    let svd = shifted
        .try_svd(false, true, f64::EPSILON, config.max_iterations)
        .ok_or_else(|| AhpError::numeric("SVD did not converge"))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| AhpError::numeric("SVD returned no right singular vectors"))?;

    let (smallest, _) = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|(_, x), (_, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
        .ok_or_else(|| AhpError::numeric("empty singular value set"))?;
    let v: DVector<f64> = v_t.row(smallest).transpose();

    let residual = (b * &v - &v * mu).norm();
    let limit = config.tolerance * b.norm().max(1.0);
    if residual.is_nan() || residual > limit {
        return Err(AhpError::numeric(format!(
            "eigenvector residual {residual:e} exceeds {limit:e}"
        )));
    }
    Ok((v, residual))
}

/// Scale to unit sum, orienting the vector so the sum is positive.
fn normalize(v: &DVector<f64>, tol: f64) -> Result<Vec<f64>> {
    let sum: f64 = v.iter().sum();
    if !sum.is_finite() {
        return Err(AhpError::numeric("eigenvector sum is not finite"));
    }
    if sum.abs() <= tol {
        return Err(AhpError::degenerate(format!(
            "eigenvector components sum to {sum:e}"
        )));
    }

    let mut weights: Vec<f64> = v.iter().map(|&x| x / sum).collect();
    if let Some((i, &w)) = weights.iter().enumerate().find(|&(_, &w)| w < -tol) {
        return Err(AhpError::degenerate(format!(
            "weight for criterion {i} is negative ({w})"
        )));
    }

    // Clamp rounding noise, then renormalize.
    for w in &mut weights {
        if *w < 0.0 {
            *w = 0.0;
        }
    }
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    Ok(weights)
}
