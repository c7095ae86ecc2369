//! Exact solver configuration.

use crate::error::ConfigError;

/// Configuration for the brute-force solver.
///
/// # Examples
///
/// ```
/// use u_tour::exact::ExactConfig;
///
/// let config = ExactConfig::default().with_max_points(8);
/// assert_eq!(config.max_points, 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExactConfig {
    /// Largest instance (depot included) the solver accepts.
    ///
    /// The search visits `(max_points - 1)!` permutations at the limit;
    /// the default of 10 means 9! = 362,880.
    pub max_points: usize,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self { max_points: 10 }
    }
}

impl ExactConfig {
    /// Sets the instance size limit.
    pub fn with_max_points(mut self, n: usize) -> Self {
        self.max_points = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_points == 0 {
            return Err(ConfigError::ExactLimit(self.max_points));
        }
        Ok(())
    }
}
