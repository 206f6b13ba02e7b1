//! Decision table: alternatives and their raw criterion cells.
//!
//! Row order defines alternative identity. The table is immutable once
//! built; normalization reads from it and produces a separate matrix.

use crate::error::DataError;
use std::collections::BTreeMap;

/// Stable identifier of an alternative, assigned by row order.
///
/// Displays as `a1`, `a2`, ... (one-based), the labelling used in
/// outranking literature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlternativeId(pub usize);

impl AlternativeId {
    /// Zero-based row index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for AlternativeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a{}", self.0 + 1)
    }
}

/// A raw table cell as delivered by the loading layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Number(f64),
    /// Unparsed text; converted on demand with the same rules a
    /// spreadsheet reader would apply to a numeric column.
    Text(String),
    Empty,
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// One row of the decision table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alternative {
    id: AlternativeId,
    category: String,
    cells: BTreeMap<String, Cell>,
}

impl Alternative {
    pub fn id(&self) -> AlternativeId {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Raw cell for a column, if present.
    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Numeric value of a criterion column.
    ///
    /// # Errors
    ///
    /// - [`DataError::MissingValue`] if the column is absent or empty
    /// - [`DataError::NonNumeric`] if the cell is unparseable text or a
    ///   non-finite number
    pub fn value(&self, criterion: &str) -> Result<f64, DataError> {
        let non_numeric = |value: String| DataError::NonNumeric {
            alternative: self.id.to_string(),
            criterion: criterion.to_string(),
            value,
        };

        match self.cells.get(criterion) {
            None | Some(Cell::Empty) => Err(DataError::MissingValue {
                alternative: self.id.to_string(),
                criterion: criterion.to_string(),
            }),
            Some(Cell::Number(v)) if v.is_finite() => Ok(*v),
            Some(Cell::Number(v)) => Err(non_numeric(v.to_string())),
            Some(Cell::Text(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DataError::MissingValue {
                        alternative: self.id.to_string(),
                        criterion: criterion.to_string(),
                    });
                }
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    _ => Err(non_numeric(s.clone())),
                }
            }
        }
    }
}

/// The input table: one row per alternative.
///
/// # Examples
///
/// ```
/// use u_outrank::table::DecisionTable;
///
/// let mut table = DecisionTable::new();
/// let dairy = table.push("Dairy", [("k1", 10.0), ("k2", 1.0)]);
/// table.push("Bakery", [("k1", 5.0), ("k2", 5.0)]);
///
/// assert_eq!(dairy.to_string(), "a1");
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get(dairy).unwrap().value("k1").unwrap(), 10.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionTable {
    alternatives: Vec<Alternative>,
}

impl DecisionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row and returns its identifier.
    ///
    /// Columns that are not declared criteria are carried but ignored by
    /// the analysis.
    pub fn push<K, C, I>(&mut self, category: impl Into<String>, cells: I) -> AlternativeId
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: Into<Cell>,
    {
        let id = AlternativeId(self.alternatives.len());
        self.alternatives.push(Alternative {
            id,
            category: category.into(),
            cells: cells
                .into_iter()
                .map(|(k, c)| (k.into(), c.into()))
                .collect(),
        });
        id
    }

    /// Builder form of [`push`](Self::push).
    pub fn with_row<K, C, I>(mut self, category: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: Into<Cell>,
    {
        self.push(category, cells);
        self
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn get(&self, id: AlternativeId) -> Option<&Alternative> {
        self.alternatives.get(id.0)
    }

    /// Rows in input order.
    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Category labels in row order.
    pub fn categories(&self) -> Vec<String> {
        self.alternatives.iter().map(|a| a.category.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_row_order() {
        let table = DecisionTable::new()
            .with_row("A", [("k1", 1.0)])
            .with_row("B", [("k1", 2.0)])
            .with_row("C", [("k1", 3.0)]);
        let ids: Vec<String> = table.alternatives().iter().map(|a| a.id().to_string()).collect();
        assert_eq!(ids, vec!["a1", "a2", "a3"]);
        assert_eq!(table.categories(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_text_cells_parse() {
        let table = DecisionTable::new().with_row("A", [("k1", " 2.50 "), ("k2", "n/a")]);
        let alt = &table.alternatives()[0];
        assert!((alt.value("k1").unwrap() - 2.5).abs() < 1e-10);
        assert_eq!(
            alt.value("k2").unwrap_err(),
            DataError::NonNumeric {
                alternative: "a1".into(),
                criterion: "k2".into(),
                value: "n/a".into(),
            }
        );
    }

    #[test]
    fn test_missing_and_empty_cells() {
        let mut table = DecisionTable::new();
        table.push("A", [("k1", Cell::Empty), ("k2", Cell::Text("  ".into()))]);
        let alt = &table.alternatives()[0];
        assert!(matches!(alt.value("k1"), Err(DataError::MissingValue { .. })));
        assert!(matches!(alt.value("k2"), Err(DataError::MissingValue { .. })));
        assert!(matches!(alt.value("k3"), Err(DataError::MissingValue { .. })));
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        let table = DecisionTable::new().with_row("A", [("k1", f64::NAN), ("k2", f64::INFINITY)]);
        let alt = &table.alternatives()[0];
        assert!(matches!(alt.value("k1"), Err(DataError::NonNumeric { .. })));
        assert!(matches!(alt.value("k2"), Err(DataError::NonNumeric { .. })));
    }
}
