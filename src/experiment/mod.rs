//! Threshold experiments.
//!
//! An experiment is one `(c_hat, d_hat)` configuration. The runner
//! normalizes the decision table and computes concordance and discordance
//! once, then evaluates every experiment against those shared matrices and
//! records kernel membership as one column of a [`ResultsTable`].
//!
//! Experiments are independent of each other; with the `parallel` feature
//! they are evaluated concurrently and still reported in declaration order.

mod config;
mod results;
mod runner;

pub use config::{ElectreConfig, Experiment};
pub use results::{ResultsRow, ResultsTable};
pub use runner::{ElectreResult, ExperimentOutcome, ExperimentRunner, PreparedAnalysis};
