use thiserror::Error;

/// Errors returned while building, parsing, or solving a comparison matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    /// The grid is not `n x n`.
    #[error("matrix shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Only 2 to 10 criteria are supported.
    #[error("unsupported number of criteria: {n} (must be between 2 and 10)")]
    UnsupportedSize { n: usize },
    /// A token in raw text could not be read as a real number.
    #[error("line {line}, value {column}: cannot parse {token:?} as a number")]
    ParseFailure {
        line: usize,
        column: usize,
        token: String,
    },
    /// A matrix entry was NaN or infinite.
    #[error("entry [{row}][{col}] is not finite")]
    NonFinite { row: usize, col: usize },
    /// A matrix entry was zero or negative.
    #[error("entry [{row}][{col}] = {value} must be strictly positive")]
    NonPositiveEntry { row: usize, col: usize, value: f64 },
    /// Wrong number of upper-triangle judgments for `n` criteria.
    #[error("expected {expected} pairwise judgments, got {got}")]
    JudgmentCountMismatch { expected: usize, got: usize },
    /// A pairwise judgment fell outside the [1/9, 9] scale.
    #[error("judgment for ({row}, {col}) = {value} is outside [1/9, 9]")]
    JudgmentOutOfRange { row: usize, col: usize, value: f64 },
    /// Label count does not match the number of criteria.
    #[error("expected {expected} criterion labels, got {got}")]
    LabelCountMismatch { expected: usize, got: usize },
    /// The dominant eigenvector cannot be turned into a weight vector.
    #[error("degenerate dominant eigenvector: {reason}")]
    DegenerateEigenvector { reason: String },
    /// Eigen-decomposition failed or produced non-finite values.
    #[error("numeric failure: {reason}")]
    NumericFailure { reason: String },
    /// A solver setting is out of range.
    #[error("invalid solver config: {reason}")]
    InvalidConfig { reason: String },
}

impl AhpError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateEigenvector {
            reason: reason.into(),
        }
    }

    pub(crate) fn numeric(reason: impl Into<String>) -> Self {
        Self::NumericFailure {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AhpError>;
