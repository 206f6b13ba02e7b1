//! Column normalization rules.
//!
//! One pure function per [`CriterionType`]; [`normalize`] selects the rule
//! for each declared criterion and assembles the [`NormalizedMatrix`].

use super::types::{Criteria, CriterionType};
use crate::error::{ConfigurationError, ElectreError, NormalizationError};
use crate::table::{AlternativeId, DecisionTable};
use tracing::debug;

/// Linear min-max scaling: `(x - min) / (max - min)`.
///
/// When `max - min` overflows, values are halved before subtracting so
/// the result stays finite.
///
/// # Errors
///
/// [`NormalizationError::DegenerateColumn`] if every value is equal.
pub fn benefit(criterion: &str, column: &[f64]) -> Result<Vec<f64>, NormalizationError> {
    let Some((min, max)) = bounds(column) else {
        return Ok(Vec::new());
    };
    let range = max - min;
    if range <= 0.0 {
        return Err(degenerate(criterion, CriterionType::Benefit, min));
    }
    let (scale, lo, span) = if range.is_finite() {
        (1.0, min, range)
    } else {
        (0.5, min * 0.5, max * 0.5 - min * 0.5)
    };
    Ok(column
        .iter()
        .map(|&x| ((x * scale - lo) / span).clamp(0.0, 1.0))
        .collect())
}

/// Inverted min-max scaling of magnitudes: `(max_abs - |x|) / (max_abs - min_abs)`.
///
/// # Errors
///
/// [`NormalizationError::DegenerateColumn`] if every magnitude is equal.
pub fn cost(criterion: &str, column: &[f64]) -> Result<Vec<f64>, NormalizationError> {
    let magnitudes: Vec<f64> = column.iter().map(|x| x.abs()).collect();
    let Some((min_abs, max_abs)) = bounds(&magnitudes) else {
        return Ok(Vec::new());
    };
    let range = max_abs - min_abs;
    if range <= 0.0 {
        return Err(degenerate(criterion, CriterionType::Cost, min_abs));
    }
    Ok(magnitudes.iter().map(|&a| (max_abs - a) / range).collect())
}

/// Clamp negatives to 0, then divide by the column maximum.
///
/// An all-non-positive column stays all zeros. Never fails.
pub fn custom_clipped(column: &[f64]) -> Vec<f64> {
    let clipped: Vec<f64> = column.iter().map(|&x| x.max(0.0)).collect();
    let max = clipped.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 {
        clipped.into_iter().map(|x| x / max).collect()
    } else {
        clipped
    }
}

/// Applies the rule for `kind` to a raw column.
pub fn normalize_column(
    criterion: &str,
    kind: CriterionType,
    column: &[f64],
) -> Result<Vec<f64>, NormalizationError> {
    match kind {
        CriterionType::Benefit => benefit(criterion, column),
        CriterionType::Cost => cost(criterion, column),
        CriterionType::CustomClipped => Ok(custom_clipped(column)),
    }
}

fn bounds(column: &[f64]) -> Option<(f64, f64)> {
    let first = *column.first()?;
    Some(
        column
            .iter()
            .fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x))),
    )
}

fn degenerate(criterion: &str, kind: CriterionType, value: f64) -> NormalizationError {
    NormalizationError::DegenerateColumn {
        criterion: criterion.to_string(),
        kind: kind.as_str(),
        value,
    }
}

/// Normalized criteria, keyed by alternative and criterion name.
///
/// Every value is in [0, 1] and benefit-oriented. Rows follow the
/// decision table's order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedMatrix {
    categories: Vec<String>,
    criteria: Vec<String>,
    /// Row-major; `rows[alt][k]` follows `criteria` order.
    rows: Vec<Vec<f64>>,
}

impl NormalizedMatrix {
    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Criterion names in declaration order.
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Category labels in row order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn ids(&self) -> impl Iterator<Item = AlternativeId> {
        (0..self.rows.len()).map(AlternativeId)
    }

    /// Normalized value of one alternative on one criterion.
    pub fn get(&self, id: AlternativeId, criterion: &str) -> Option<f64> {
        let k = self.criterion_index(criterion)?;
        self.rows.get(id.0).map(|row| row[k])
    }

    /// `(criterion, value)` pairs of one alternative.
    pub fn row(&self, id: AlternativeId) -> Option<impl Iterator<Item = (&str, f64)> + '_> {
        let row = self.rows.get(id.0)?;
        Some(
            self.criteria
                .iter()
                .map(String::as_str)
                .zip(row.iter().copied()),
        )
    }

    /// One criterion's normalized values in row order.
    pub fn column(&self, criterion: &str) -> Option<Vec<f64>> {
        let k = self.criterion_index(criterion)?;
        Some(self.rows.iter().map(|row| row[k]).collect())
    }

    /// Dense rows for the pairwise kernels.
    pub(crate) fn dense_rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    fn criterion_index(&self, criterion: &str) -> Option<usize> {
        self.criteria.iter().position(|c| c == criterion)
    }
}

/// Normalizes every declared criterion column of `table`.
///
/// All raw cells are read and checked before any scaling, so a data
/// error in any column is reported ahead of normalization errors.
///
/// # Errors
///
/// - [`ConfigurationError::NoAlternatives`] if the table is empty
/// - [`crate::error::DataError`] on a missing or non-numeric cell
/// - [`NormalizationError::DegenerateColumn`] on a constant benefit or cost column
///
/// # Examples
///
/// ```
/// use u_outrank::criteria::{normalize, Criteria, CriterionSpec, CriterionType};
/// use u_outrank::table::{AlternativeId, DecisionTable};
///
/// let table = DecisionTable::new()
///     .with_row("A", [("price", 10.0)])
///     .with_row("B", [("price", 30.0)]);
/// let criteria = Criteria::new(&[CriterionSpec::new("price", CriterionType::Cost)], &[1.0]).unwrap();
///
/// let m = normalize(&table, &criteria).unwrap();
/// assert_eq!(m.get(AlternativeId(0), "price"), Some(1.0));
/// assert_eq!(m.get(AlternativeId(1), "price"), Some(0.0));
/// ```
pub fn normalize(table: &DecisionTable, criteria: &Criteria) -> Result<NormalizedMatrix, ElectreError> {
    if table.is_empty() {
        return Err(ConfigurationError::NoAlternatives.into());
    }

    let mut raw_columns: Vec<Vec<f64>> = Vec::with_capacity(criteria.len());
    for criterion in criteria.iter() {
        let column = table
            .alternatives()
            .iter()
            .map(|alt| alt.value(criterion.name()))
            .collect::<Result<Vec<f64>, _>>()?;
        raw_columns.push(column);
    }

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(criteria.len());
    for (criterion, raw) in criteria.iter().zip(&raw_columns) {
        let column = normalize_column(criterion.name(), criterion.kind(), raw)?;
        debug!(
            criterion = criterion.name(),
            kind = %criterion.kind(),
            "normalized column"
        );
        columns.push(column);
    }

    let rows = (0..table.len())
        .map(|i| columns.iter().map(|col| col[i]).collect())
        .collect();

    Ok(NormalizedMatrix {
        categories: table.categories(),
        criteria: criteria.names().map(str::to_string).collect(),
        rows,
    })
}
