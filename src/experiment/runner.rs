//! Experiment execution.
//!
//! [`ExperimentRunner`] drives the full analysis:
//! validation → normalization → concordance/discordance (once) →
//! per experiment: dominance → cycle elimination → kernel.

use super::config::{ElectreConfig, Experiment};
use super::results::ResultsTable;
use crate::criteria::{normalize, Criteria, NormalizedMatrix};
use crate::error::{ConfigurationError, ElectreError};
use crate::outranking::{
    build_dominance, concordance, discordance, extract_kernel, find_cycle, resolve_cycles,
    CycleStrategy, DiscordanceScaling, Kernel, OutrankingMatrix,
};
use crate::table::DecisionTable;
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Summary of one experiment.
///
/// The dominance relation itself is discarded once the kernel is known.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentOutcome {
    pub name: String,
    pub c_hat: f64,
    pub d_hat: f64,

    /// Edges passing the threshold test, before cycle elimination.
    pub raw_edges: usize,

    /// Edges remaining after cycle elimination.
    pub resolved_edges: usize,

    /// Mutual pairs broken by the pairwise pass.
    pub resolved_pairs: usize,

    /// Edges removed by [`CycleStrategy::Full`].
    pub removed_cycle_edges: usize,

    /// Whether a cycle of length >= 3 survived elimination.
    pub residual_cycle: bool,

    /// Kernel of the resolved relation.
    pub kernel: Kernel,

    /// Kernel of the relation before cycle elimination.
    pub raw_kernel: Kernel,
}

/// Full output of an analysis run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElectreResult {
    pub normalized: NormalizedMatrix,
    pub concordance: OutrankingMatrix,
    pub discordance: OutrankingMatrix,

    /// One entry per experiment, in declaration order.
    pub outcomes: Vec<ExperimentOutcome>,

    pub results: ResultsTable,
}

impl ElectreResult {
    pub fn outcome(&self, experiment: &str) -> Option<&ExperimentOutcome> {
        self.outcomes.iter().find(|o| o.name == experiment)
    }
}

/// Threshold-independent state shared by every experiment.
#[derive(Debug, Clone)]
pub struct PreparedAnalysis {
    criteria: Criteria,
    normalized: NormalizedMatrix,
    concordance: OutrankingMatrix,
    discordance: OutrankingMatrix,
    cycle_strategy: CycleStrategy,
    epsilon: f64,
}

impl PreparedAnalysis {
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn normalized(&self) -> &NormalizedMatrix {
        &self.normalized
    }

    pub fn concordance(&self) -> &OutrankingMatrix {
        &self.concordance
    }

    pub fn discordance(&self) -> &OutrankingMatrix {
        &self.discordance
    }

    /// Evaluates a single experiment against the shared matrices.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidThreshold`] if a threshold is outside [0, 1].
    pub fn run_experiment(&self, experiment: &Experiment) -> Result<ExperimentOutcome, ConfigurationError> {
        experiment.validate()?;
        Ok(self.evaluate(experiment))
    }

    fn evaluate(&self, experiment: &Experiment) -> ExperimentOutcome {
        let dominance = build_dominance(
            &self.concordance,
            &self.discordance,
            experiment.c_hat,
            experiment.d_hat,
            self.epsilon,
        );
        let resolution = resolve_cycles(
            &dominance,
            &self.concordance,
            &self.discordance,
            self.cycle_strategy,
            self.epsilon,
        );

        let residual_cycle = match self.cycle_strategy {
            CycleStrategy::Full => false,
            CycleStrategy::PairwiseOnly => find_cycle(&resolution.relation).is_some(),
        };
        if residual_cycle {
            warn!(
                experiment = %experiment.name,
                "outranking relation still contains a cycle of length >= 3 after pairwise resolution"
            );
        }

        let kernel = extract_kernel(&resolution.relation);
        debug!(
            experiment = %experiment.name,
            c_hat = experiment.c_hat,
            d_hat = experiment.d_hat,
            raw_edges = dominance.edge_count(),
            resolved_pairs = resolution.resolved_pairs,
            kernel_size = kernel.len(),
            "experiment evaluated"
        );

        ExperimentOutcome {
            name: experiment.name.clone(),
            c_hat: experiment.c_hat,
            d_hat: experiment.d_hat,
            raw_edges: dominance.edge_count(),
            resolved_edges: resolution.relation.edge_count(),
            resolved_pairs: resolution.resolved_pairs,
            removed_cycle_edges: resolution.removed_cycle_edges,
            residual_cycle,
            kernel,
            raw_kernel: extract_kernel(&dominance),
        }
    }
}

/// Executes ELECTRE I analyses.
pub struct ExperimentRunner;

impl ExperimentRunner {
    /// Runs every configured experiment on `table`.
    ///
    /// All configuration and data errors are reported before any
    /// experiment is evaluated.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_outrank::criteria::{CriterionSpec, CriterionType};
    /// use u_outrank::experiment::{ElectreConfig, Experiment, ExperimentRunner};
    /// use u_outrank::table::{AlternativeId, DecisionTable};
    ///
    /// let table = DecisionTable::new()
    ///     .with_row("a1", [("k1", 10.0), ("k2", 1.0)])
    ///     .with_row("a2", [("k1", 5.0), ("k2", 5.0)])
    ///     .with_row("a3", [("k1", 1.0), ("k2", 10.0)]);
    /// let config = ElectreConfig::new(
    ///     vec![
    ///         CriterionSpec::new("k1", CriterionType::Benefit),
    ///         CriterionSpec::new("k2", CriterionType::Benefit),
    ///     ],
    ///     vec![0.5, 0.5],
    /// )
    /// .with_experiment(Experiment::new("baseline", 0.5, 0.5));
    ///
    /// let result = ExperimentRunner::run(&table, &config).unwrap();
    /// assert_eq!(
    ///     result.results.kernel("baseline"),
    ///     Some(vec![AlternativeId(0), AlternativeId(2)])
    /// );
    /// ```
    pub fn run(table: &DecisionTable, config: &ElectreConfig) -> Result<ElectreResult, ElectreError> {
        config.validate_experiments()?;
        let prepared = Self::prepare(table, config)?;

        info!(
            alternatives = prepared.normalized.len(),
            criteria = prepared.criteria.len(),
            experiments = config.experiments.len(),
            "running ELECTRE I analysis"
        );

        let outcomes = evaluate_all(&prepared, &config.experiments, config.parallel);

        let mut results = ResultsTable::new(prepared.normalized.categories().to_vec());
        for outcome in &outcomes {
            results.push_column(outcome.name.clone(), outcome.kernel.membership());
        }

        let PreparedAnalysis {
            normalized,
            concordance,
            discordance,
            ..
        } = prepared;

        Ok(ElectreResult {
            normalized,
            concordance,
            discordance,
            outcomes,
            results,
        })
    }

    /// Validates criteria, normalizes, and computes the
    /// threshold-independent matrices.
    ///
    /// # Errors
    ///
    /// Any [`ConfigurationError`] on criteria or epsilon, and every
    /// normalization or data error.
    pub fn prepare(table: &DecisionTable, config: &ElectreConfig) -> Result<PreparedAnalysis, ElectreError> {
        let criteria = config.build_criteria()?;
        config.validate_epsilon()?;

        let normalized = normalize(table, &criteria)?;
        let concordance = concordance(&normalized, &criteria, config.parallel);
        let discordance = discordance(&normalized, config.discordance_scaling, config.parallel);

        if config.discordance_scaling == DiscordanceScaling::Global {
            debug!("discordance scaled by the widest criterion range");
        }

        Ok(PreparedAnalysis {
            criteria,
            normalized,
            concordance,
            discordance,
            cycle_strategy: config.cycle_strategy,
            epsilon: config.epsilon,
        })
    }
}

#[cfg(feature = "parallel")]
fn evaluate_all(prepared: &PreparedAnalysis, experiments: &[Experiment], parallel: bool) -> Vec<ExperimentOutcome> {
    if parallel {
        experiments.par_iter().map(|e| prepared.evaluate(e)).collect()
    } else {
        experiments.iter().map(|e| prepared.evaluate(e)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(prepared: &PreparedAnalysis, experiments: &[Experiment], _parallel: bool) -> Vec<ExperimentOutcome> {
    experiments.iter().map(|e| prepared.evaluate(e)).collect()
}
