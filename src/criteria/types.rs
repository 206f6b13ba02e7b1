//! Criterion declarations and the validated, name-keyed criteria set.

use crate::error::ConfigurationError;

/// Direction of preference for a criterion.
///
/// Every type maps raw values onto a benefit-oriented [0, 1] scale, so
/// after normalization "better" always means "greater".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CriterionType {
    /// Larger raw values are better. Linear min-max scaling.
    Benefit,

    /// Larger raw magnitudes are worse. Inverted min-max scaling of `|x|`.
    Cost,

    /// Negative raw values are an undesirable deviation and clamp to 0;
    /// the remainder is scaled by the column maximum.
    CustomClipped,
}

impl CriterionType {
    /// Parses a type label as written in criterion-type mappings.
    ///
    /// Accepts `benefit`, `cost`, `custom`, and `custom-clipped`
    /// (case-insensitive).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "benefit" => Some(CriterionType::Benefit),
            "cost" => Some(CriterionType::Cost),
            "custom" | "custom-clipped" | "custom_clipped" => Some(CriterionType::CustomClipped),
            _ => None,
        }
    }

    /// Canonical lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionType::Benefit => "benefit",
            CriterionType::Cost => "cost",
            CriterionType::CustomClipped => "custom",
        }
    }
}

impl std::fmt::Display for CriterionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A criterion as declared by the caller, before weights are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriterionSpec {
    /// Column name in the decision table.
    pub name: String,

    /// Normalization rule for the column.
    pub kind: CriterionType,
}

impl CriterionSpec {
    pub fn new(name: impl Into<String>, kind: CriterionType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Builds a spec from a textual type label.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::UnknownCriterionType`] if the label is not
    /// recognized.
    pub fn parse(name: impl Into<String>, kind: &str) -> Result<Self, ConfigurationError> {
        let name = name.into();
        match CriterionType::parse(kind) {
            Some(kind) => Ok(Self { name, kind }),
            None => Err(ConfigurationError::UnknownCriterionType {
                criterion: name,
                kind: kind.to_string(),
            }),
        }
    }
}

/// A validated criterion carrying its own weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Criterion {
    name: String,
    kind: CriterionType,
    weight: f64,
}

impl Criterion {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CriterionType {
        self.kind
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// The validated criteria set.
///
/// Weights arrive as a positional vector but are bound to their criterion
/// exactly once, here; everything downstream looks weights up by name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Criteria {
    items: Vec<Criterion>,
    total_weight: f64,
}

impl Criteria {
    /// Binds `weights` to `specs` in declaration order.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::NoCriteria`] if `specs` is empty
    /// - [`ConfigurationError::WeightCountMismatch`] if the lengths differ
    /// - [`ConfigurationError::DuplicateCriterion`] on a repeated name
    /// - [`ConfigurationError::InvalidWeight`] on a negative or non-finite weight
    /// - [`ConfigurationError::ZeroTotalWeight`] if all weights are zero
    pub fn new(specs: &[CriterionSpec], weights: &[f64]) -> Result<Self, ConfigurationError> {
        if specs.is_empty() {
            return Err(ConfigurationError::NoCriteria);
        }
        if specs.len() != weights.len() {
            return Err(ConfigurationError::WeightCountMismatch {
                criteria: specs.len(),
                weights: weights.len(),
            });
        }

        let mut items: Vec<Criterion> = Vec::with_capacity(specs.len());
        for (spec, &weight) in specs.iter().zip(weights) {
            if items.iter().any(|c| c.name == spec.name) {
                return Err(ConfigurationError::DuplicateCriterion {
                    criterion: spec.name.clone(),
                });
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigurationError::InvalidWeight {
                    criterion: spec.name.clone(),
                    weight,
                });
            }
            items.push(Criterion {
                name: spec.name.clone(),
                kind: spec.kind,
                weight,
            });
        }

        let total_weight: f64 = items.iter().map(|c| c.weight).sum();
        if total_weight <= 0.0 {
            return Err(ConfigurationError::ZeroTotalWeight);
        }

        Ok(Self {
            items,
            total_weight,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Criteria in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.items.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Criterion> {
        self.items.iter().find(|c| c.name == name)
    }

    pub fn weight(&self, name: &str) -> Option<f64> {
        self.get(name).map(|c| c.weight)
    }

    /// Sum of all weights. Always positive.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|c| c.name.as_str())
    }
}
