//! Criterion declarations and normalization.
//!
//! Raw criterion columns are mapped onto a common benefit-oriented
//! [0, 1] scale before any pairwise comparison:
//!
//! - **Benefit**: min-max scaling.
//! - **Cost**: inverted min-max scaling of magnitudes.
//! - **CustomClipped**: negatives clamp to zero, then scale by the maximum.
//!
//! Constant benefit and cost columns are rejected rather than turned
//! into NaN.

mod normalize;
mod types;

pub use normalize::{
    benefit, cost, custom_clipped, normalize, normalize_column, NormalizedMatrix,
};
pub use types::{Criteria, Criterion, CriterionSpec, CriterionType};
