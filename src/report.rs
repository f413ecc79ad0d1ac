//! Labelled, ranked results for display.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{AhpError, Result};
use crate::matrix::ComparisonMatrix;
use crate::solver::Priorities;

/// Display names for the criteria, one per matrix row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriterionLabels(Vec<String>);

fn default_label(i: usize) -> String {
    format!("Criterion {}", i + 1)
}

impl CriterionLabels {
    /// `"Criterion 1"` through `"Criterion n"`.
    pub fn default_for(n: usize) -> Self {
        Self((0..n).map(default_label).collect())
    }

    /// Custom names. Blank names fall back to the default label for that slot.
    pub fn new<I, S>(names: I, n: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = names
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                let s: String = s.into();
                if s.trim().is_empty() {
                    default_label(i)
                } else {
                    s.trim().to_string()
                }
            })
            .collect();
        if labels.len() != n {
            return Err(AhpError::LabelCountMismatch {
                expected: n,
                got: labels.len(),
            });
        }
        Ok(Self(labels))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.0.get(i).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// One row of the ranked weight table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCriterion<'a> {
    /// Position in the original matrix.
    pub index: usize,
    pub label: &'a str,
    pub weight: f64,
}

/// Solve output paired with criterion labels and, optionally, the matrix it
/// came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AhpReport {
    labels: CriterionLabels,
    priorities: Priorities,
    matrix: Option<ComparisonMatrix>,
}

impl AhpReport {
    pub fn new(labels: CriterionLabels, priorities: Priorities) -> Result<Self> {
        let n = priorities.weights.len();
        if labels.len() != n {
            return Err(AhpError::LabelCountMismatch {
                expected: n,
                got: labels.len(),
            });
        }
        Ok(Self {
            labels,
            priorities,
            matrix: None,
        })
    }

    /// Attach the comparison matrix, shown with criterion names as row and
    /// column headers.
    pub fn with_matrix(mut self, matrix: ComparisonMatrix) -> Result<Self> {
        let n = self.labels.len();
        if matrix.n() != n {
            return Err(AhpError::ShapeMismatch {
                expected: (n, n),
                actual: (matrix.n(), matrix.n()),
            });
        }
        self.matrix = Some(matrix);
        Ok(self)
    }

    pub fn matrix(&self) -> Option<&ComparisonMatrix> {
        self.matrix.as_ref()
    }

    pub fn labels(&self) -> &CriterionLabels {
        &self.labels
    }

    pub fn priorities(&self) -> &Priorities {
        &self.priorities
    }

    /// Criteria by descending weight; equal weights keep matrix order.
    pub fn ranked(&self) -> Vec<RankedCriterion<'_>> {
        let mut rows: Vec<RankedCriterion<'_>> = self
            .labels
            .as_slice()
            .iter()
            .zip(self.priorities.weights.iter())
            .enumerate()
            .map(|(index, (label, &weight))| RankedCriterion {
                index,
                label,
                weight,
            })
            .collect();
        rows.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
        rows
    }
}

impl fmt::Display for AhpReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .labels
            .as_slice()
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max("Criterion".len());

        if let Some(matrix) = &self.matrix {
            let cell = width.max(8);
            write!(f, "{:<width$}", "")?;
            for label in self.labels.as_slice() {
                write!(f, "  {label:>cell$}")?;
            }
            writeln!(f)?;
            for (i, label) in self.labels.as_slice().iter().enumerate() {
                write!(f, "{label:<width$}")?;
                for v in matrix.row(i) {
                    write!(f, "  {v:>cell$.3}")?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{:<width$}  {:>8}", "Criterion", "Weight")?;
        for row in self.ranked() {
            writeln!(f, "{:<width$}  {:>8.4}", row.label, row.weight)?;
        }
        writeln!(f)?;

        let c = &self.priorities.consistency;
        writeln!(f, "lambda_max: {:.4}", c.lambda_max)?;
        writeln!(f, "CI: {:.4}", c.consistency_index)?;
        writeln!(f, "CR: {:.4}", c.consistency_ratio)?;
        if c.coherent {
            write!(f, "The matrix is consistent.")
        } else {
            write!(f, "The matrix is inconsistent; revise the comparisons.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::build_reciprocal_matrix;
    use crate::solver::{Solver, WeightVector};

    fn solved(upper: &[f64], n: usize) -> Priorities {
        let m = build_reciprocal_matrix(n, upper).unwrap();
        Solver::default().solve(&m).unwrap()
    }

    #[test]
    fn default_labels_are_one_based() {
        let labels = CriterionLabels::default_for(3);
        assert_eq!(labels.get(0), Some("Criterion 1"));
        assert_eq!(labels.get(2), Some("Criterion 3"));
        assert_eq!(labels.get(3), None);
    }

    #[test]
    fn blank_labels_fall_back() {
        let labels = CriterionLabels::new(["Cost", "  ", " Safety "], 3).unwrap();
        assert_eq!(labels.as_slice(), &["Cost", "Criterion 2", "Safety"]);
    }

    #[test]
    fn label_count_must_match() {
        let err = CriterionLabels::new(["a", "b"], 3).unwrap_err();
        assert_eq!(err, AhpError::LabelCountMismatch { expected: 3, got: 2 });

        let err = AhpReport::new(CriterionLabels::default_for(2), solved(&[1.0; 3], 3))
            .unwrap_err();
        assert_eq!(err, AhpError::LabelCountMismatch { expected: 3, got: 2 });
    }

    #[test]
    fn ranked_sorts_descending() {
        // Criterion 3 dominates, criterion 1 is weakest.
        let p = solved(&[1.0 / 3.0, 1.0 / 5.0, 1.0 / 2.0], 3);
        let labels = CriterionLabels::new(["price", "comfort", "safety"], 3).unwrap();
        let report = AhpReport::new(labels, p).unwrap();
        let order: Vec<&str> = report.ranked().iter().map(|r| r.label).collect();
        assert_eq!(order, vec!["safety", "comfort", "price"]);
        assert_eq!(report.ranked()[0].index, 2);
    }

    #[test]
    fn ranked_is_stable_on_ties() {
        let mut p = solved(&[1.0; 6], 4);
        p.weights = WeightVector(vec![0.2, 0.3, 0.2, 0.3]);
        let report = AhpReport::new(CriterionLabels::default_for(4), p).unwrap();
        let idx: Vec<usize> = report.ranked().iter().map(|r| r.index).collect();
        assert_eq!(idx, vec![1, 3, 0, 2]);
    }

    #[test]
    fn display_uses_four_decimals() {
        let p = solved(&[3.0, 5.0, 2.0], 3);
        let report = AhpReport::new(CriterionLabels::default_for(3), p).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("Criterion"), "{text}");
        assert!(text.contains("lambda_max: 3.0037"), "{text}");
        assert!(text.contains("CR: 0.0032"), "{text}");
        assert!(text.contains("0.6483"), "{text}");
        assert!(text.ends_with("The matrix is consistent."), "{text}");
    }

    #[test]
    fn display_shows_labelled_matrix() {
        let m = build_reciprocal_matrix(2, &[3.0]).unwrap();
        let p = Solver::default().solve(&m).unwrap();
        let labels = CriterionLabels::new(["cost", "comfort"], 2).unwrap();
        let report = AhpReport::new(labels, p).unwrap().with_matrix(m).unwrap();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), ["cost", "comfort"]);
        assert_eq!(
            lines[1].split_whitespace().collect::<Vec<_>>(),
            ["cost", "1.000", "3.000"]
        );
        assert_eq!(
            lines[2].split_whitespace().collect::<Vec<_>>(),
            ["comfort", "0.333", "1.000"]
        );
        assert_eq!(lines[3], "");
        assert!(lines[4].starts_with("Criterion"), "{text}");
    }

    #[test]
    fn attached_matrix_must_match_labels() {
        let p = solved(&[2.0], 2);
        let m = build_reciprocal_matrix(3, &[1.0; 3]).unwrap();
        let err = AhpReport::new(CriterionLabels::default_for(2), p)
            .unwrap()
            .with_matrix(m)
            .unwrap_err();
        assert_eq!(
            err,
            AhpError::ShapeMismatch {
                expected: (2, 2),
                actual: (3, 3)
            }
        );
    }

    #[test]
    fn display_flags_inconsistency() {
        let m = crate::matrix::ComparisonMatrix::from_rows(
            &[
                vec![1.0, 9.0, 1.0],
                vec![1.0 / 9.0, 1.0, 9.0],
                vec![1.0, 1.0 / 9.0, 1.0],
            ],
            3,
        )
        .unwrap();
        let p = Solver::default().solve(&m).unwrap();
        let report = AhpReport::new(CriterionLabels::default_for(3), p).unwrap();
        assert!(report
            .to_string()
            .ends_with("The matrix is inconsistent; revise the comparisons."));
    }
}
