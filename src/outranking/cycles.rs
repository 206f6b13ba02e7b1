//! Cycle elimination in the outranking relation.
//!
//! The pairwise pass breaks every mutual (2-cycle) outranking with a
//! deterministic tie-break. Cycles through three or more alternatives are
//! left alone unless [`CycleStrategy::Full`] is selected.

use super::dominance::DominanceRelation;
use super::matrices::OutrankingMatrix;
use std::cmp::Ordering;

/// How far cycle elimination goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CycleStrategy {
    /// Break 2-cycles only. Longer cycles may remain.
    #[default]
    PairwiseOnly,

    /// Break 2-cycles, then repeatedly remove the weakest edge of any
    /// remaining directed cycle until the relation is acyclic.
    ///
    /// The weakest edge has the lowest net score `C - D`; ties go to the
    /// lowest `(i, j)` in row-major order.
    Full,
}

/// Outcome of cycle elimination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The relation after elimination.
    pub relation: DominanceRelation,

    /// Mutual pairs broken by the pairwise pass.
    pub resolved_pairs: usize,

    /// Edges removed by the general pass (always 0 for `PairwiseOnly`).
    pub removed_cycle_edges: usize,
}

/// Breaks every 2-cycle.
///
/// For each pair `i < j` with both `edge(i, j)` and `edge(j, i)`:
///
/// 1. keep the direction with strictly higher concordance
///    (differences within `epsilon` count as ties);
/// 2. on a tie, keep `i -> j` if `D[i][j] <= D[j][i]`, else keep `j -> i`.
///
/// Exactly one direction survives per mutual pair. One-directional
/// pairs are untouched. The input relation is not modified.
pub fn resolve_two_cycles(
    dominance: &DominanceRelation,
    concordance: &OutrankingMatrix,
    discordance: &OutrankingMatrix,
    epsilon: f64,
) -> DominanceRelation {
    let mut resolved = dominance.clone();
    for (i, j) in dominance.mutual_pairs() {
        let (cij, cji) = (concordance.get(i, j), concordance.get(j, i));
        let keep_forward = if cij > cji + epsilon {
            true
        } else if cji > cij + epsilon {
            false
        } else {
            discordance.get(i, j) <= discordance.get(j, i)
        };

        if keep_forward {
            resolved.remove(j, i);
        } else {
            resolved.remove(i, j);
        }
    }
    resolved
}

/// Runs cycle elimination under `strategy`.
pub fn resolve_cycles(
    dominance: &DominanceRelation,
    concordance: &OutrankingMatrix,
    discordance: &OutrankingMatrix,
    strategy: CycleStrategy,
    epsilon: f64,
) -> Resolution {
    let resolved_pairs = dominance.mutual_pairs().len();
    let mut relation = resolve_two_cycles(dominance, concordance, discordance, epsilon);
    let mut removed_cycle_edges = 0;

    if strategy == CycleStrategy::Full {
        while let Some(cycle) = find_cycle(&relation) {
            let Some(weakest) = cycle_edges(&cycle)
                .min_by(|&(a, b), &(c, d)| {
                    let net_ab = concordance.get(a, b) - discordance.get(a, b);
                    let net_cd = concordance.get(c, d) - discordance.get(c, d);
                    net_ab
                        .partial_cmp(&net_cd)
                        .unwrap_or(Ordering::Equal)
                        .then((a, b).cmp(&(c, d)))
                })
            else {
                break;
            };
            relation.remove(weakest.0, weakest.1);
            removed_cycle_edges += 1;
        }
    }

    Resolution {
        relation,
        resolved_pairs,
        removed_cycle_edges,
    }
}

/// Finds one directed cycle, if any.
///
/// Returns the vertices in traversal order; the cycle closes from the
/// last vertex back to the first. The search visits vertices and
/// successors in ascending order, so the result is deterministic.
pub fn find_cycle(relation: &DominanceRelation) -> Option<Vec<usize>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnStack,
        Done,
    }

    let n = relation.len();
    let mut mark = vec![Mark::Unvisited; n];

    for root in 0..n {
        if mark[root] != Mark::Unvisited {
            continue;
        }

        // (vertex, successors not yet explored)
        let mut stack: Vec<(usize, Vec<usize>)> = vec![(root, pending(relation, root))];
        mark[root] = Mark::OnStack;

        while let Some(top) = stack.last_mut() {
            let v = top.0;
            match top.1.pop() {
                Some(w) => match mark[w] {
                    Mark::OnStack => {
                        let start = stack.iter().position(|(u, _)| *u == w).unwrap_or(0);
                        return Some(stack[start..].iter().map(|(u, _)| *u).collect());
                    }
                    Mark::Unvisited => {
                        mark[w] = Mark::OnStack;
                        stack.push((w, pending(relation, w)));
                    }
                    Mark::Done => {}
                },
                None => {
                    mark[v] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }

    None
}

/// Successors of `v`, reversed so that popping yields ascending order.
fn pending(relation: &DominanceRelation, v: usize) -> Vec<usize> {
    let mut next: Vec<usize> = relation.successors(v).collect();
    next.reverse();
    next
}

fn cycle_edges(cycle: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    cycle
        .iter()
        .enumerate()
        .map(move |(k, &u)| (u, cycle[(k + 1) % cycle.len()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(cells: Vec<Vec<f64>>) -> OutrankingMatrix {
        let labels = (0..cells.len()).map(|i| format!("x{i}")).collect();
        OutrankingMatrix::from_rows(labels, cells)
    }

    #[test]
    fn test_higher_concordance_wins() {
        let dom = DominanceRelation::from_edges(2, [(0, 1), (1, 0)]);
        let c = matrix(vec![vec![1.0, 0.4], vec![0.7, 1.0]]);
        let d = matrix(vec![vec![0.0, 0.0], vec![0.9, 0.0]]);
        let out = resolve_two_cycles(&dom, &c, &d, 1e-9);
        assert!(!out.has_edge(0, 1));
        assert!(out.has_edge(1, 0));
    }

    #[test]
    fn test_concordance_tie_goes_to_lower_discordance() {
        let dom = DominanceRelation::from_edges(2, [(0, 1), (1, 0)]);
        let c = matrix(vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
        let d = matrix(vec![vec![0.0, 0.6], vec![0.2, 0.0]]);
        let out = resolve_two_cycles(&dom, &c, &d, 1e-9);
        assert!(!out.has_edge(0, 1));
        assert!(out.has_edge(1, 0));
    }

    #[test]
    fn test_full_tie_keeps_lower_index_direction() {
        let dom = DominanceRelation::from_edges(2, [(0, 1), (1, 0)]);
        let c = matrix(vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
        let d = matrix(vec![vec![0.0, 0.3], vec![0.3, 0.0]]);
        let out = resolve_two_cycles(&dom, &c, &d, 1e-9);
        assert!(out.has_edge(0, 1));
        assert!(!out.has_edge(1, 0));
    }

    #[test]
    fn test_one_directional_pairs_untouched() {
        let dom = DominanceRelation::from_edges(3, [(0, 1), (1, 2)]);
        let c = matrix(vec![vec![1.0, 0.1, 0.1], vec![0.9, 1.0, 0.1], vec![0.9, 0.9, 1.0]]);
        let d = matrix(vec![vec![0.0; 3]; 3]);
        let out = resolve_two_cycles(&dom, &c, &d, 1e-9);
        assert_eq!(out, dom);
    }

    #[test]
    fn test_input_not_mutated() {
        let dom = DominanceRelation::from_edges(2, [(0, 1), (1, 0)]);
        let c = matrix(vec![vec![1.0, 0.9], vec![0.1, 1.0]]);
        let d = matrix(vec![vec![0.0; 2]; 2]);
        let _ = resolve_two_cycles(&dom, &c, &d, 1e-9);
        assert_eq!(dom.edge_count(), 2);
    }

    #[test]
    fn test_three_cycle_survives_pairwise() {
        let dom = DominanceRelation::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        let c = matrix(vec![vec![1.0, 0.7, 0.3], vec![0.3, 1.0, 0.8], vec![0.6, 0.2, 1.0]]);
        let d = matrix(vec![vec![0.0; 3]; 3]);

        let res = resolve_cycles(&dom, &c, &d, CycleStrategy::PairwiseOnly, 1e-9);
        assert_eq!(res.relation, dom);
        assert_eq!(res.resolved_pairs, 0);
        assert_eq!(find_cycle(&res.relation), Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_full_strategy_removes_weakest_edge() {
        let dom = DominanceRelation::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        // Net scores: 0->1 = 0.7, 1->2 = 0.8, 2->0 = 0.6 - 0.1 = 0.5.
        let c = matrix(vec![vec![1.0, 0.7, 0.3], vec![0.3, 1.0, 0.8], vec![0.6, 0.2, 1.0]]);
        let d = matrix(vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 0.0], vec![0.1, 0.0, 0.0]]);

        let res = resolve_cycles(&dom, &c, &d, CycleStrategy::Full, 1e-9);
        assert_eq!(res.removed_cycle_edges, 1);
        assert!(!res.relation.has_edge(2, 0));
        assert!(res.relation.has_edge(0, 1));
        assert!(res.relation.has_edge(1, 2));
        assert_eq!(find_cycle(&res.relation), None);
    }

    #[test]
    fn test_full_strategy_counts_pairwise_too() {
        let dom = DominanceRelation::from_edges(
            4,
            [(0, 1), (1, 0), (1, 2), (2, 3), (3, 1)],
        );
        let c = matrix(vec![
            vec![1.0, 0.9, 0.0, 0.0],
            vec![0.5, 1.0, 0.6, 0.0],
            vec![0.0, 0.0, 1.0, 0.7],
            vec![0.0, 0.8, 0.0, 1.0],
        ]);
        let d = matrix(vec![vec![0.0; 4]; 4]);

        let res = resolve_cycles(&dom, &c, &d, CycleStrategy::Full, 1e-9);
        assert_eq!(res.resolved_pairs, 1);
        assert_eq!(res.removed_cycle_edges, 1);
        assert!(res.relation.has_edge(0, 1));
        assert!(!res.relation.has_edge(1, 0));
        assert!(!res.relation.has_edge(1, 2));
        assert_eq!(find_cycle(&res.relation), None);
    }

    #[test]
    fn test_find_cycle_acyclic() {
        let dom = DominanceRelation::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]);
        assert_eq!(find_cycle(&dom), None);
        assert_eq!(find_cycle(&DominanceRelation::empty(0)), None);
    }
}
