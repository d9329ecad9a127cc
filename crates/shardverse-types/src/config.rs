//! World configuration types

use crate::errors::{WorldError, WorldResult};
use serde::{Deserialize, Serialize};

/// Configuration for a world instance
///
/// One config per world; independent worlds can run side by side with
/// different settings, which the tests lean on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Name of this world instance
    pub world_name: String,

    /// Progression curve parameters
    pub progression: ProgressionConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_name: "Shardverse".to_string(),
            progression: ProgressionConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Create a configuration with default progression settings
    pub fn new(world_name: impl Into<String>) -> Self {
        Self {
            world_name: world_name.into(),
            ..Default::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> WorldResult<()> {
        if self.world_name.is_empty() {
            return Err(WorldError::InvalidConfiguration {
                reason: "world_name must not be empty".to_string(),
            });
        }
        self.progression.validate()?;
        Ok(())
    }
}

/// Parameters of the level/experience curve
///
/// Level N requires `N * experience_per_level` cumulative experience to reach
/// level N+1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Per-level step of the experience curve
    pub experience_per_level: u64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            experience_per_level: 100,
        }
    }
}

impl ProgressionConfig {
    /// Validate the progression parameters
    pub fn validate(&self) -> WorldResult<()> {
        if self.experience_per_level == 0 {
            return Err(WorldError::InvalidConfiguration {
                reason: "experience_per_level must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.progression.experience_per_level, 100);
    }

    #[test]
    fn test_rejects_zero_experience_step() {
        let mut config = WorldConfig::new("TestWorld");
        config.progression.experience_per_level = 0;
        assert!(matches!(
            config.validate(),
            Err(WorldError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_world_name() {
        let config = WorldConfig::new("");
        assert!(config.validate().is_err());
    }
}
