//! Arena configuration loaded from TOML

use crate::autoplay::DEFAULT_MAX_TURNS;
use crate::manager::VALID_SIZES;
use combat_core::config::{load_toml, parse_toml};
use combat_core::{CombatConstants, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level arena configuration
///
/// ```toml
/// [combat.damage]
/// crit_multiplier = 2.0
///
/// [simulation]
/// tournament_size = 16
/// seed = 42
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Fixed RNG seed; a random one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_max_turns")]
    pub max_turns_per_match: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            tournament_size: default_tournament_size(),
            seed: None,
            max_turns_per_match: default_max_turns(),
        }
    }
}

fn default_tournament_size() -> usize {
    8
}
fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

impl ArenaConfig {
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let config: ArenaConfig = load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: ArenaConfig = parse_toml(toml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.combat.validate()?;
        if !VALID_SIZES.contains(&self.simulation.tournament_size) {
            return Err(ConfigError::Validation(format!(
                "simulation.tournament_size must be one of {:?} (got {})",
                VALID_SIZES, self.simulation.tournament_size
            )));
        }
        if self.simulation.max_turns_per_match == 0 {
            return Err(ConfigError::Validation(
                "simulation.max_turns_per_match must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
