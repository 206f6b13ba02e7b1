//! Consolidated kernel membership across experiments.

use crate::table::AlternativeId;
use std::collections::HashSet;

/// One row per alternative, one boolean column per experiment.
///
/// Columns appear in experiment declaration order; rows follow the
/// decision table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultsTable {
    categories: Vec<String>,
    experiments: Vec<String>,
    columns: Vec<Vec<bool>>,
}

/// A borrowed view of one results row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsRow<'a> {
    pub id: AlternativeId,
    pub category: &'a str,
    /// Kernel membership per experiment, in column order.
    pub membership: Vec<bool>,
}

impl ResultsTable {
    pub(crate) fn new(categories: Vec<String>) -> Self {
        Self {
            categories,
            experiments: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub(crate) fn push_column(&mut self, experiment: String, membership: Vec<bool>) {
        debug_assert_eq!(membership.len(), self.categories.len());
        self.experiments.push(experiment);
        self.columns.push(membership);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Experiment names, in column order.
    pub fn experiments(&self) -> &[String] {
        &self.experiments
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Membership flags of one experiment, in row order.
    pub fn column(&self, experiment: &str) -> Option<&[bool]> {
        let k = self.experiments.iter().position(|e| e == experiment)?;
        Some(&self.columns[k])
    }

    pub fn is_member(&self, id: AlternativeId, experiment: &str) -> Option<bool> {
        self.column(experiment)?.get(id.0).copied()
    }

    /// Kernel of one experiment as identifiers.
    pub fn kernel(&self, experiment: &str) -> Option<Vec<AlternativeId>> {
        let column = self.column(experiment)?;
        Some(
            column
                .iter()
                .enumerate()
                .filter(|(_, &m)| m)
                .map(|(i, _)| AlternativeId(i))
                .collect(),
        )
    }

    /// Membership keyed by category: a row is flagged when any
    /// alternative sharing its category is in the kernel.
    ///
    /// Identical to [`column`](Self::column) when categories are unique.
    pub fn category_membership(&self, experiment: &str) -> Option<Vec<bool>> {
        let column = self.column(experiment)?;
        let in_kernel: HashSet<&str> = self
            .categories
            .iter()
            .zip(column)
            .filter(|(_, &m)| m)
            .map(|(c, _)| c.as_str())
            .collect();
        Some(
            self.categories
                .iter()
                .map(|c| in_kernel.contains(c.as_str()))
                .collect(),
        )
    }

    /// Rows in table order.
    pub fn rows(&self) -> impl Iterator<Item = ResultsRow<'_>> {
        self.categories.iter().enumerate().map(move |(i, category)| ResultsRow {
            id: AlternativeId(i),
            category,
            membership: self.columns.iter().map(|col| col[i]).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ResultsTable {
        let mut t = ResultsTable::new(vec!["Dairy".into(), "Bakery".into(), "Dairy".into()]);
        t.push_column("e1".into(), vec![true, false, false]);
        t.push_column("e2".into(), vec![false, true, true]);
        t
    }

    #[test]
    fn test_columns_in_declaration_order() {
        let t = table();
        assert_eq!(t.experiments(), &["e1", "e2"]);
        assert_eq!(t.column("e2"), Some(&[false, true, true][..]));
        assert_eq!(t.column("e3"), None);
    }

    #[test]
    fn test_membership_queries() {
        let t = table();
        assert_eq!(t.is_member(AlternativeId(0), "e1"), Some(true));
        assert_eq!(t.is_member(AlternativeId(5), "e1"), None);
        assert_eq!(t.kernel("e2"), Some(vec![AlternativeId(1), AlternativeId(2)]));
    }

    #[test]
    fn test_category_membership_spreads_over_shared_labels() {
        let t = table();
        assert_eq!(t.category_membership("e1"), Some(vec![true, false, true]));
    }

    #[test]
    fn test_rows() {
        let t = table();
        let rows: Vec<_> = t.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].category, "Bakery");
        assert_eq!(rows[1].membership, vec![false, true]);
        assert_eq!(rows[2].id.to_string(), "a3");
    }
}
