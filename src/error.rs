//! Error taxonomy for outranking analysis.
//!
//! Every failure is detected before the first experiment runs, so a
//! returned error means no matrix or kernel was produced for the input.

use thiserror::Error;

/// Invalid criteria, weights, thresholds, or experiment declarations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("weight vector has {weights} entries but {criteria} criteria are declared")]
    WeightCountMismatch { criteria: usize, weights: usize },

    #[error("criterion '{criterion}' has unknown type '{kind}' (expected benefit, cost, or custom)")]
    UnknownCriterionType { criterion: String, kind: String },

    #[error("no criteria declared")]
    NoCriteria,

    #[error("criterion '{criterion}' is declared more than once")]
    DuplicateCriterion { criterion: String },

    #[error("criterion '{criterion}' has weight {weight}; weights must be finite and non-negative")]
    InvalidWeight { criterion: String, weight: f64 },

    #[error("criterion weights sum to zero")]
    ZeroTotalWeight,

    #[error("decision table contains no alternatives")]
    NoAlternatives,

    #[error("no experiments declared")]
    NoExperiments,

    #[error("experiment '{name}' is declared more than once")]
    DuplicateExperiment { name: String },

    #[error("experiment '{experiment}': {threshold} threshold must be in [0, 1], got {value}")]
    InvalidThreshold {
        experiment: String,
        threshold: &'static str,
        value: f64,
    },

    #[error("epsilon must be finite and non-negative, got {value}")]
    InvalidEpsilon { value: f64 },
}

/// A criterion column that cannot be scaled under its declared type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizationError {
    #[error("degenerate column: criterion '{criterion}' ({kind}) has every value equal to {value}, min-max scaling is undefined")]
    DegenerateColumn {
        criterion: String,
        kind: &'static str,
        value: f64,
    },
}

/// A raw cell that is absent or not a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("alternative {alternative} has no value for criterion '{criterion}'")]
    MissingValue {
        alternative: String,
        criterion: String,
    },

    #[error("alternative {alternative} has non-numeric value '{value}' for criterion '{criterion}'")]
    NonNumeric {
        alternative: String,
        criterion: String,
        value: String,
    },
}

/// Top-level error returned by the analysis entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElectreError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("normalization error: {0}")]
    Normalization(#[from] NormalizationError),

    #[error("data error: {0}")]
    Data(#[from] DataError),
}
