//! Free-form text to a grid of reals.
//!
//! One row per line, values separated by commas and/or whitespace. Blank lines
//! are skipped. No shape checking happens here: hand the grid to
//! [`ComparisonMatrix::from_rows`] or [`crate::solve`] for that.

use crate::error::{AhpError, Result};
use crate::matrix::ComparisonMatrix;

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

/// Parse pasted text into rows of `f64`.
///
/// Line and column numbers in [`AhpError::ParseFailure`] are 1-based; the
/// column counts values, not characters.
///
/// ```rust
/// use ahp_weights::parse_grid;
///
/// let rows = parse_grid("1, 3 5\n0.3333 1 2\n\n0.2,0.5,1\n").unwrap();
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[0], vec![1.0, 3.0, 5.0]);
/// ```
pub fn parse_grid(text: &str) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for (line_idx, line) in text.lines().enumerate() {
        let mut row = Vec::new();
        for (col_idx, token) in line
            .split(is_separator)
            .filter(|t| !t.is_empty())
            .enumerate()
        {
            let value = token
                .parse::<f64>()
                .map_err(|_| AhpError::ParseFailure {
                    line: line_idx + 1,
                    column: col_idx + 1,
                    token: token.to_string(),
                })?;
            row.push(value);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// [`parse_grid`] followed by shape and entry validation against `n`.
pub fn parse_matrix(text: &str, n: usize) -> Result<ComparisonMatrix> {
    let rows = parse_grid(text)?;
    ComparisonMatrix::from_rows(&rows, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_separators() {
        let rows = parse_grid("  1 ,2\t3  \n4,5,6").unwrap();
        assert_eq!(rows, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let rows = parse_grid("\n1 1\n   \n1 1\n\n").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn empty_text_gives_empty_grid() {
        assert!(parse_grid("").unwrap().is_empty());
    }

    #[test]
    fn scientific_notation() {
        let rows = parse_grid("1e0 2.5E-1").unwrap();
        assert_eq!(rows, vec![vec![1.0, 0.25]]);
    }

    #[test]
    fn bad_token_reports_position() {
        let err = parse_grid("1 2 3\n\n4 five 6").unwrap_err();
        assert_eq!(
            err,
            AhpError::ParseFailure {
                line: 3,
                column: 2,
                token: "five".to_string(),
            }
        );
    }

    #[test]
    fn fractions_are_not_numbers() {
        let err = parse_grid("1 1/3").unwrap_err();
        assert!(matches!(err, AhpError::ParseFailure { column: 2, .. }), "{err:?}");
    }

    #[test]
    fn parse_matrix_checks_shape() {
        let err = parse_matrix("1 1\n1 1\n1 1", 3).unwrap_err();
        assert_eq!(
            err,
            AhpError::ShapeMismatch {
                expected: (3, 3),
                actual: (3, 2)
            }
        );
        let m = parse_matrix("1 4\n0.25 1", 2).unwrap();
        assert_eq!(m.get(0, 1), 4.0);
    }
}
