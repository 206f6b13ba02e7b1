//! Concordance and discordance matrices.

use crate::criteria::{Criteria, NormalizedMatrix};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Denominator used to scale a single-criterion disagreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiscordanceScaling {
    /// Divide by the normalized range (max - min) of the same criterion.
    ///
    /// Keeps every discordance in [0, 1] even for clipped columns whose
    /// range is below 1.
    #[default]
    PerCriterion,

    /// Divide by the largest normalized range over all criteria
    /// (the textbook ELECTRE I denominator).
    Global,
}

/// A square matrix over alternatives, labelled by category on both axes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutrankingMatrix {
    labels: Vec<String>,
    cells: Vec<Vec<f64>>,
}

impl OutrankingMatrix {
    /// Wraps precomputed cells, e.g. matrices loaded from a previous run.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is not square with one row per label.
    pub fn from_rows(labels: Vec<String>, cells: Vec<Vec<f64>>) -> Self {
        assert_eq!(cells.len(), labels.len(), "one row per label");
        assert!(
            cells.iter().all(|row| row.len() == labels.len()),
            "matrix must be square"
        );
        Self { labels, cells }
    }

    /// Number of alternatives (rows = columns).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row/column labels (categories) in alternative order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i][j]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }
}

/// Concordance: weighted share of criteria where `i` is at least as good as `j`.
///
/// `C[i][j] = Σ { w_k : v_ik >= v_jk } / Σ w_k`. The diagonal is 1 and
/// carries no meaning for the outranking test.
pub fn concordance(matrix: &NormalizedMatrix, criteria: &Criteria, parallel: bool) -> OutrankingMatrix {
    let rows = matrix.dense_rows();
    let weights: Vec<f64> = criteria.iter().map(|c| c.weight()).collect();
    let total = criteria.total_weight();

    let row_fn = |a: &Vec<f64>| -> Vec<f64> {
        rows.iter()
            .map(|b| {
                let agree: f64 = a
                    .iter()
                    .zip(b)
                    .zip(&weights)
                    .filter(|((va, vb), _)| va >= vb)
                    .map(|(_, w)| w)
                    .sum();
                (agree / total).clamp(0.0, 1.0)
            })
            .collect()
    };

    OutrankingMatrix::from_rows(matrix.categories().to_vec(), map_rows(rows, parallel, row_fn))
}

/// Discordance: worst single-criterion disagreement against `i` outranking `j`.
///
/// `D[i][j] = max { (v_jk - v_ik) / range_k : v_jk > v_ik }`, or 0 when
/// `j` beats `i` nowhere. `range_k` follows `scaling`. A criterion with
/// zero range never produces a beat, so no division by zero occurs.
pub fn discordance(
    matrix: &NormalizedMatrix,
    scaling: DiscordanceScaling,
    parallel: bool,
) -> OutrankingMatrix {
    let rows = matrix.dense_rows();
    let ranges = scaling_ranges(rows, matrix.criteria().len(), scaling);

    let row_fn = |a: &Vec<f64>| -> Vec<f64> {
        rows.iter()
            .map(|b| {
                a.iter()
                    .zip(b)
                    .zip(&ranges)
                    .filter(|((va, vb), range)| vb > va && **range > 0.0)
                    .map(|((va, vb), range)| (vb - va) / range)
                    .fold(0.0_f64, f64::max)
                    .clamp(0.0, 1.0)
            })
            .collect()
    };

    OutrankingMatrix::from_rows(matrix.categories().to_vec(), map_rows(rows, parallel, row_fn))
}

fn scaling_ranges(rows: &[Vec<f64>], m: usize, scaling: DiscordanceScaling) -> Vec<f64> {
    let per_criterion: Vec<f64> = (0..m)
        .map(|k| {
            let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r[k]), hi.max(r[k]))
            });
            if hi >= lo {
                hi - lo
            } else {
                0.0
            }
        })
        .collect();

    match scaling {
        DiscordanceScaling::PerCriterion => per_criterion,
        DiscordanceScaling::Global => {
            let widest = per_criterion.iter().copied().fold(0.0_f64, f64::max);
            vec![widest; m]
        }
    }
}

#[cfg(feature = "parallel")]
fn map_rows<F>(rows: &[Vec<f64>], parallel: bool, f: F) -> Vec<Vec<f64>>
where
    F: Fn(&Vec<f64>) -> Vec<f64> + Sync + Send,
{
    if parallel {
        rows.par_iter().map(f).collect()
    } else {
        rows.iter().map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn map_rows<F>(rows: &[Vec<f64>], _parallel: bool, f: F) -> Vec<Vec<f64>>
where
    F: Fn(&Vec<f64>) -> Vec<f64>,
{
    rows.iter().map(f).collect()
}
