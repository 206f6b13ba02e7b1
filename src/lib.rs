//! Domain-agnostic outranking decision analysis.
//!
//! Implements the ELECTRE I method for choosing among alternatives scored
//! on several conflicting criteria:
//!
//! - **Criteria**: declaration, weighting, and normalization of raw
//!   criterion columns onto a benefit-oriented [0, 1] scale.
//! - **Outranking**: concordance and discordance matrices, the
//!   two-threshold dominance test, cycle elimination, and kernel
//!   extraction.
//! - **Experiments**: repeated evaluation under several threshold
//!   configurations, consolidated into a kernel membership table.
//!
//! # Architecture
//!
//! The decision core has no I/O. Loading spreadsheets and persisting
//! results belong to the host program; it hands a [`table::DecisionTable`]
//! and an [`experiment::ElectreConfig`] to
//! [`experiment::ExperimentRunner::run`] and receives every matrix and
//! table the analysis produces.
//!
//! # Features
//!
//! - `parallel`: compute matrix rows and experiments with rayon.
//! - `serde`: derive `Serialize`/`Deserialize` on configuration and results.

pub mod criteria;
pub mod error;
pub mod experiment;
pub mod outranking;
pub mod table;

pub use error::{ConfigurationError, DataError, ElectreError, NormalizationError};
