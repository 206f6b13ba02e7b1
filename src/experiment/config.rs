//! Analysis configuration and threshold experiments.

use crate::criteria::{Criteria, CriterionSpec};
use crate::error::ConfigurationError;
use crate::outranking::{CycleStrategy, DiscordanceScaling};

/// One threshold configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Experiment {
    /// Column name in the results table.
    pub name: String,

    /// Concordance threshold `c_hat` in [0, 1]. Higher is stricter.
    pub c_hat: f64,

    /// Discordance threshold `d_hat` in [0, 1]. Lower is stricter.
    pub d_hat: f64,
}

impl Experiment {
    pub fn new(name: impl Into<String>, c_hat: f64, d_hat: f64) -> Self {
        Self {
            name: name.into(),
            c_hat,
            d_hat,
        }
    }

    /// Checks that both thresholds are finite and within [0, 1].
    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        for (threshold, value) in [("concordance", self.c_hat), ("discordance", self.d_hat)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::InvalidThreshold {
                    experiment: self.name.clone(),
                    threshold,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Configuration for an ELECTRE I analysis.
///
/// # Examples
///
/// ```
/// use u_outrank::criteria::{CriterionSpec, CriterionType};
/// use u_outrank::experiment::{ElectreConfig, Experiment};
/// use u_outrank::outranking::CycleStrategy;
///
/// let config = ElectreConfig::new(
///     vec![
///         CriterionSpec::new("k1_stock", CriterionType::Benefit),
///         CriterionSpec::new("k2_seasonality", CriterionType::Benefit),
///         CriterionSpec::new("k3_competitiveness", CriterionType::Benefit),
///         CriterionSpec::new("k4_preference", CriterionType::Benefit),
///         CriterionSpec::new("k5_margin", CriterionType::CustomClipped),
///     ],
///     vec![0.20, 0.15, 0.20, 0.20, 0.25],
/// )
/// .with_experiment(Experiment::new("experiment_1", 0.6, 0.3))
/// .with_experiment(Experiment::new("experiment_2", 0.7, 0.3))
/// .with_experiment(Experiment::new("experiment_3", 0.8, 0.2))
/// .with_cycle_strategy(CycleStrategy::PairwiseOnly);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElectreConfig {
    /// Criterion declarations in column order.
    pub criteria: Vec<CriterionSpec>,

    /// Weights aligned positionally with `criteria`. Need not sum to 1.
    pub weights: Vec<f64>,

    /// Threshold configurations, evaluated in declaration order.
    pub experiments: Vec<Experiment>,

    /// Denominator for discordance.
    pub discordance_scaling: DiscordanceScaling,

    /// How far cycle elimination goes.
    pub cycle_strategy: CycleStrategy,

    /// Tolerance for threshold tests and concordance ties.
    pub epsilon: f64,

    /// Whether to compute matrix rows and experiments in parallel.
    ///
    /// Only takes effect with the `parallel` cargo feature.
    pub parallel: bool,
}

impl Default for ElectreConfig {
    fn default() -> Self {
        Self {
            criteria: Vec::new(),
            weights: Vec::new(),
            experiments: Vec::new(),
            discordance_scaling: DiscordanceScaling::default(),
            cycle_strategy: CycleStrategy::default(),
            epsilon: 1e-9,
            parallel: false,
        }
    }
}

impl ElectreConfig {
    /// Creates a configuration with the given criteria and weights.
    pub fn new(criteria: Vec<CriterionSpec>, weights: Vec<f64>) -> Self {
        Self {
            criteria,
            weights,
            ..Self::default()
        }
    }

    pub fn with_experiment(mut self, experiment: Experiment) -> Self {
        self.experiments.push(experiment);
        self
    }

    pub fn with_experiments(mut self, experiments: impl IntoIterator<Item = Experiment>) -> Self {
        self.experiments.extend(experiments);
        self
    }

    pub fn with_discordance_scaling(mut self, scaling: DiscordanceScaling) -> Self {
        self.discordance_scaling = scaling;
        self
    }

    pub fn with_cycle_strategy(mut self, strategy: CycleStrategy) -> Self {
        self.cycle_strategy = strategy;
        self
    }

    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Binds weights to criteria. See [`Criteria::new`].
    pub fn build_criteria(&self) -> Result<Criteria, ConfigurationError> {
        Criteria::new(&self.criteria, &self.weights)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.build_criteria()?;
        self.validate_experiments()
    }

    pub(crate) fn validate_epsilon(&self) -> Result<(), ConfigurationError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigurationError::InvalidEpsilon {
                value: self.epsilon,
            });
        }
        Ok(())
    }

    pub(crate) fn validate_experiments(&self) -> Result<(), ConfigurationError> {
        self.validate_epsilon()?;
        if self.experiments.is_empty() {
            return Err(ConfigurationError::NoExperiments);
        }
        for (k, experiment) in self.experiments.iter().enumerate() {
            experiment.validate()?;
            if self.experiments[..k].iter().any(|e| e.name == experiment.name) {
                return Err(ConfigurationError::DuplicateExperiment {
                    name: experiment.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CriterionType;

    fn base() -> ElectreConfig {
        ElectreConfig::new(
            vec![
                CriterionSpec::new("k1", CriterionType::Benefit),
                CriterionSpec::new("k2", CriterionType::Cost),
            ],
            vec![0.5, 0.5],
        )
        .with_experiment(Experiment::new("e1", 0.6, 0.3))
    }

    #[test]
    fn test_default_config() {
        let config = ElectreConfig::default();
        assert!((config.epsilon - 1e-9).abs() < 1e-15);
        assert_eq!(config.cycle_strategy, CycleStrategy::PairwiseOnly);
        assert_eq!(config.discordance_scaling, DiscordanceScaling::PerCriterion);
        assert!(!config.parallel);
    }

    #[test]
    fn test_validate_ok() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn test_validate_no_experiments() {
        let mut config = base();
        config.experiments.clear();
        assert_eq!(config.validate(), Err(ConfigurationError::NoExperiments));
    }

    #[test]
    fn test_validate_weight_mismatch() {
        let mut config = base();
        config.weights.push(0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::WeightCountMismatch { criteria: 2, weights: 3 })
        ));
    }

    #[test]
    fn test_validate_threshold_range() {
        let config = base().with_experiment(Experiment::new("bad", 1.2, 0.3));
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidThreshold {
                experiment: "bad".into(),
                threshold: "concordance",
                value: 1.2,
            })
        );

        let config = base().with_experiment(Experiment::new("nan", 0.5, f64::NAN));
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidThreshold { threshold: "discordance", .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_experiment() {
        let config = base().with_experiment(Experiment::new("e1", 0.7, 0.2));
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::DuplicateExperiment { .. })
        ));
    }

    #[test]
    fn test_validate_bad_epsilon() {
        let config = base().with_epsilon(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidEpsilon { .. })
        ));
    }

    #[test]
    fn test_boundary_thresholds_accepted() {
        let config = base().with_experiments([Experiment::new("loose", 0.0, 1.0)]);
        assert!(config.validate().is_ok());
    }
}
