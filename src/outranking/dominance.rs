//! Boolean outranking relation and the ELECTRE I threshold test.

use super::matrices::OutrankingMatrix;

/// Square adjacency matrix: `edge(i, j)` means "i outranks j".
///
/// Self-edges are never set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DominanceRelation {
    adjacency: Vec<Vec<bool>>,
}

impl DominanceRelation {
    /// An edgeless relation over `n` alternatives.
    pub fn empty(n: usize) -> Self {
        Self {
            adjacency: vec![vec![false; n]; n],
        }
    }

    /// Builds a relation from explicit edges; self-edges are dropped.
    ///
    /// # Panics
    ///
    /// Panics if an edge index is `>= n`.
    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut relation = Self::empty(n);
        for (i, j) in edges {
            relation.insert(i, j);
        }
        relation
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adjacency[i][j]
    }

    pub(crate) fn insert(&mut self, i: usize, j: usize) {
        if i != j {
            self.adjacency[i][j] = true;
        }
    }

    pub(crate) fn remove(&mut self, i: usize, j: usize) {
        self.adjacency[i][j] = false;
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .iter()
            .map(|row| row.iter().filter(|&&e| e).count())
            .sum()
    }

    /// All edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &e)| e)
                .map(move |(j, _)| (i, j))
        })
    }

    /// Successors of `i`.
    pub fn successors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[i]
            .iter()
            .enumerate()
            .filter(|(_, &e)| e)
            .map(|(j, _)| j)
    }

    /// Number of alternatives outranking `j`.
    pub fn in_degree(&self, j: usize) -> usize {
        self.adjacency.iter().filter(|row| row[j]).count()
    }

    /// Pairs `(i, j)`, `i < j`, that outrank each other.
    pub fn mutual_pairs(&self) -> Vec<(usize, usize)> {
        let n = self.len();
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.adjacency[i][j] && self.adjacency[j][i] {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

/// Applies the ELECTRE I outranking test to every ordered pair.
///
/// `edge(i, j)` iff `C[i][j] >= c_hat` and `D[i][j] <= d_hat`, each within
/// `epsilon`. The diagonal is always false.
///
/// # Examples
///
/// ```
/// use u_outrank::outranking::{build_dominance, OutrankingMatrix};
///
/// let c = OutrankingMatrix::from_rows(vec!["x".into(), "y".into()], vec![vec![1.0, 0.8], vec![0.2, 1.0]]);
/// let d = OutrankingMatrix::from_rows(vec!["x".into(), "y".into()], vec![vec![0.0, 0.1], vec![0.9, 0.0]]);
///
/// let dom = build_dominance(&c, &d, 0.7, 0.3, 1e-9);
/// assert!(dom.has_edge(0, 1));
/// assert!(!dom.has_edge(1, 0));
/// assert!(!dom.has_edge(0, 0));
/// ```
pub fn build_dominance(
    concordance: &OutrankingMatrix,
    discordance: &OutrankingMatrix,
    c_hat: f64,
    d_hat: f64,
    epsilon: f64,
) -> DominanceRelation {
    let n = concordance.len();
    debug_assert_eq!(n, discordance.len());

    let mut relation = DominanceRelation::empty(n);
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            if concordance.get(i, j) >= c_hat - epsilon && discordance.get(i, j) <= d_hat + epsilon {
                relation.insert(i, j);
            }
        }
    }
    relation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("x{i}")).collect()
    }

    #[test]
    fn test_threshold_boundaries_inclusive() {
        let c = OutrankingMatrix::from_rows(labels(2), vec![vec![1.0, 0.6], vec![0.4, 1.0]]);
        let d = OutrankingMatrix::from_rows(labels(2), vec![vec![0.0, 0.3], vec![0.3, 0.0]]);
        let dom = build_dominance(&c, &d, 0.6, 0.3, 1e-9);
        assert!(dom.has_edge(0, 1));
        assert!(!dom.has_edge(1, 0));
    }

    #[test]
    fn test_epsilon_absorbs_weight_rounding() {
        // 0.2 + 0.15 + 0.2 + 0.2 + 0.25 does not sum to exactly 1.0 in f64.
        let share = (0.2 + 0.15 + 0.2) / (0.2 + 0.15 + 0.2 + 0.2 + 0.25);
        let c = OutrankingMatrix::from_rows(labels(2), vec![vec![1.0, share], vec![0.0, 1.0]]);
        let d = OutrankingMatrix::from_rows(labels(2), vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
        let dom = build_dominance(&c, &d, 0.55, 0.0, 1e-9);
        assert!(dom.has_edge(0, 1));
    }

    #[test]
    fn test_no_self_edges_even_at_loosest_thresholds() {
        let c = OutrankingMatrix::from_rows(labels(3), vec![vec![1.0; 3]; 3]);
        let d = OutrankingMatrix::from_rows(labels(3), vec![vec![0.0; 3]; 3]);
        let dom = build_dominance(&c, &d, 0.0, 1.0, 1e-9);
        for i in 0..3 {
            assert!(!dom.has_edge(i, i));
        }
        assert_eq!(dom.edge_count(), 6);
        assert_eq!(dom.mutual_pairs(), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_relation_queries() {
        let dom = DominanceRelation::from_edges(3, [(0, 1), (2, 1), (1, 1)]);
        assert_eq!(dom.edge_count(), 2);
        assert_eq!(dom.in_degree(1), 2);
        assert_eq!(dom.in_degree(0), 0);
        assert_eq!(dom.edges().collect::<Vec<_>>(), vec![(0, 1), (2, 1)]);
        assert_eq!(dom.successors(0).collect::<Vec<_>>(), vec![1]);
        assert!(dom.mutual_pairs().is_empty());
    }
}
