//! MCTS configuration parameters.

use connectn_core::{ConnectNError, Result};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// Number of select/rollout/backpropagate iterations per search.
    pub iterations: usize,

    /// UCB1 exploration constant used while descending the tree.
    pub exploration: f64,

    /// UCB1 exploration constant used to pick the final move at the root.
    /// 0 means pure exploitation: the child with the best mean score wins.
    pub final_exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: 1.0,
            final_exploration: 0.0,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Check that a search with this config can produce a move.
    ///
    /// # Errors
    /// Returns `ConnectNError::InvalidConfig` for zero iterations, more
    /// iterations than a visit counter can hold, or a negative or non-finite
    /// exploration constant.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(ConnectNError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        if u32::try_from(self.iterations).is_err() {
            return Err(ConnectNError::InvalidConfig(format!(
                "iterations must be at most {}, got {}",
                u32::MAX,
                self.iterations
            )));
        }
        for (name, value) in [
            ("exploration", self.exploration),
            ("final_exploration", self.final_exploration),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConnectNError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.exploration, 1.0);
        assert_eq!(config.final_exploration, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_iterations() {
        let config = MctsConfig::with_iterations(250);
        assert_eq!(config.iterations, 250);
        // Other values should be default
        assert_eq!(config.exploration, 1.0);
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let config = MctsConfig::with_iterations(0);
        assert!(matches!(
            config.validate(),
            Err(ConnectNError::InvalidConfig(_))
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_validate_rejects_iterations_beyond_visit_counter() {
        let at_limit = MctsConfig::with_iterations(u32::MAX as usize);
        assert!(at_limit.validate().is_ok());

        let over = MctsConfig::with_iterations(u32::MAX as usize + 1);
        assert!(matches!(
            over.validate(),
            Err(ConnectNError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_exploration() {
        let mut config = MctsConfig::default();
        config.exploration = -0.5;
        assert!(config.validate().is_err());

        config.exploration = 1.0;
        config.final_exploration = f64::NAN;
        assert!(config.validate().is_err());
    }
}
