//! Metaheuristic adapter configuration.

use crate::error::ConfigError;
use std::time::Duration;

/// Configuration for the bounded metaheuristic strategy.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tour::metaheuristic::MetaheuristicConfig;
///
/// let config = MetaheuristicConfig::default()
///     .with_time_limit(Duration::from_secs(5))
///     .with_seed(42);
/// assert_eq!(config.cost_scale, 1000.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MetaheuristicConfig {
    /// Hard wall-clock budget for one backend call.
    pub time_limit: Duration,

    /// Factor applied to matrix costs before rounding to integers.
    ///
    /// 1000 keeps three decimal places.
    pub cost_scale: f64,

    /// Upper bound on improvement iterations. 0 = bounded by time only.
    pub max_iterations: usize,

    /// Random seed. `None` makes repeated runs free to differ.
    pub seed: Option<u64>,
}

impl Default for MetaheuristicConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
            cost_scale: 1000.0,
            max_iterations: 200_000,
            seed: None,
        }
    }
}

impl MetaheuristicConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_cost_scale(mut self, scale: f64) -> Self {
        self.cost_scale = scale;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cost_scale.is_finite() || self.cost_scale < 1.0 {
            return Err(ConfigError::CostScale(self.cost_scale));
        }
        Ok(())
    }

    /// Converts a matrix cost into the backend's integer domain.
    pub fn scale(&self, cost: f64) -> i64 {
        (cost * self.cost_scale).round() as i64
    }

    /// Converts an integer objective back into matrix units.
    pub fn unscale(&self, objective: i64) -> f64 {
        objective as f64 / self.cost_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MetaheuristicConfig::default();
        assert_eq!(config.time_limit, Duration::from_secs(30));
        assert_eq!(config.cost_scale, 1000.0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_scale_round_trip() {
        let config = MetaheuristicConfig::default();
        assert_eq!(config.scale(5.2), 5200);
        assert_eq!(config.scale(2.3456), 2346);
        assert!((config.unscale(13400) - 13.4).abs() < 1e-12);
    }

    #[test]
    fn test_validate_scale() {
        assert!(MetaheuristicConfig::default()
            .with_cost_scale(0.5)
            .validate()
            .is_err());
        assert!(MetaheuristicConfig::default()
            .with_cost_scale(f64::INFINITY)
            .validate()
            .is_err());
        assert!(MetaheuristicConfig::default()
            .with_cost_scale(1.0)
            .validate()
            .is_ok());
    }
}
