//! Orchestrator configuration.

use crate::error::ConfigError;
use crate::exact::ExactConfig;
use crate::metaheuristic::MetaheuristicConfig;

/// Configuration for the [`Optimizer`](super::Optimizer).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tour::exact::ExactConfig;
/// use u_tour::metaheuristic::MetaheuristicConfig;
/// use u_tour::optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_exact(ExactConfig::default().with_max_points(9))
///     .with_metaheuristic(MetaheuristicConfig::default().with_time_limit(Duration::from_secs(2)))
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizerConfig {
    pub exact: ExactConfig,
    pub metaheuristic: MetaheuristicConfig,

    /// Run applicable strategies concurrently.
    ///
    /// Only takes effect when the crate is built with the `parallel`
    /// feature; otherwise strategies always run one after another.
    pub parallel: bool,
}

impl OptimizerConfig {
    pub fn with_exact(mut self, exact: ExactConfig) -> Self {
        self.exact = exact;
        self
    }

    pub fn with_metaheuristic(mut self, metaheuristic: MetaheuristicConfig) -> Self {
        self.metaheuristic = metaheuristic;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates every nested configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.exact.validate()?;
        self.metaheuristic.validate()
    }
}
