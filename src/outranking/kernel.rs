//! Kernel extraction: alternatives no one outranks.

use super::dominance::DominanceRelation;
use crate::table::AlternativeId;

/// The kernel of a relation and its complement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kernel {
    /// Zero in-degree alternatives, in row order. May be empty.
    pub members: Vec<AlternativeId>,

    /// Alternatives outranked by at least one other, in row order.
    pub dominated: Vec<AlternativeId>,

    /// In-degree of every alternative.
    pub in_degrees: Vec<usize>,
}

impl Kernel {
    pub fn contains(&self, id: AlternativeId) -> bool {
        self.in_degrees.get(id.0).is_some_and(|&d| d == 0)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Membership flag per alternative, in row order.
    pub fn membership(&self) -> Vec<bool> {
        self.in_degrees.iter().map(|&d| d == 0).collect()
    }
}

/// Computes in-degrees and returns the zero in-degree set.
///
/// # Examples
///
/// ```
/// use u_outrank::outranking::{extract_kernel, DominanceRelation};
/// use u_outrank::table::AlternativeId;
///
/// let dom = DominanceRelation::from_edges(3, [(0, 1), (2, 1)]);
/// let kernel = extract_kernel(&dom);
///
/// assert_eq!(kernel.members, vec![AlternativeId(0), AlternativeId(2)]);
/// assert_eq!(kernel.dominated, vec![AlternativeId(1)]);
/// ```
pub fn extract_kernel(relation: &DominanceRelation) -> Kernel {
    let in_degrees: Vec<usize> = (0..relation.len()).map(|j| relation.in_degree(j)).collect();

    let (members, dominated): (Vec<_>, Vec<_>) = in_degrees
        .iter()
        .enumerate()
        .map(|(j, &d)| (AlternativeId(j), d))
        .partition(|&(_, d)| d == 0);

    Kernel {
        members: members.into_iter().map(|(id, _)| id).collect(),
        dominated: dominated.into_iter().map(|(id, _)| id).collect(),
        in_degrees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_relation_everyone_in_kernel() {
        let kernel = extract_kernel(&DominanceRelation::empty(3));
        assert_eq!(kernel.len(), 3);
        assert!(kernel.dominated.is_empty());
        assert_eq!(kernel.membership(), vec![true, true, true]);
    }

    #[test]
    fn test_empty_kernel_is_representable() {
        // A 3-cycle leaves everyone with an incoming edge.
        let dom = DominanceRelation::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        let kernel = extract_kernel(&dom);
        assert!(kernel.is_empty());
        assert_eq!(kernel.dominated.len(), 3);
        assert!(!kernel.contains(AlternativeId(0)));
    }

    #[test]
    fn test_in_degrees() {
        let dom = DominanceRelation::from_edges(4, [(0, 1), (0, 2), (3, 2), (1, 2)]);
        let kernel = extract_kernel(&dom);
        assert_eq!(kernel.in_degrees, vec![0, 1, 3, 0]);
        assert_eq!(kernel.members, vec![AlternativeId(0), AlternativeId(3)]);
        assert!(kernel.contains(AlternativeId(3)));
        assert!(!kernel.contains(AlternativeId(9)));
    }

    #[test]
    fn test_no_alternatives() {
        let kernel = extract_kernel(&DominanceRelation::empty(0));
        assert!(kernel.is_empty());
        assert!(kernel.in_degrees.is_empty());
    }
}
