//! Combat tuning constants

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ConfigError;

/// Tunable combat constants
///
/// Defaults are the standard arena rules; a TOML file may override any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub attack: AttackConstants,
    #[serde(default)]
    pub special: SpecialConstants,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            damage: DamageConstants::default(),
            attack: AttackConstants::default(),
            special: SpecialConstants::default(),
        }
    }
}

impl CombatConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let constants: CombatConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a TOML string
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let constants: CombatConstants = super::parse_toml(toml)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Reject values that would break the damage formulas
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.damage.base_min > self.damage.base_max {
            return Err(ConfigError::Validation(format!(
                "damage.base_min ({}) exceeds damage.base_max ({})",
                self.damage.base_min, self.damage.base_max
            )));
        }
        if self.damage.crit_multiplier < 1.0 {
            return Err(ConfigError::Validation(format!(
                "damage.crit_multiplier must be at least 1.0 (got {})",
                self.damage.crit_multiplier
            )));
        }
        let profiles = [
            ("attack", self.attack_profile()),
            ("special", self.special_profile()),
        ];
        for (name, profile) in profiles {
            profile
                .validate()
                .map_err(|msg| ConfigError::Validation(format!("{}.{}", name, msg)))?;
        }
        Ok(())
    }

    pub fn attack_profile(&self) -> HitProfile {
        self.attack.profile()
    }

    pub fn special_profile(&self) -> HitProfile {
        self.special.profile()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageConstants {
    /// Lowest base damage roll (inclusive)
    #[serde(default = "default_base_min")]
    pub base_min: u32,
    /// Highest base damage roll (inclusive)
    #[serde(default = "default_base_max")]
    pub base_max: u32,
    /// Damage multiplier on a critical hit
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f64,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            base_min: 5,
            base_max: 15,
            crit_multiplier: 1.5,
        }
    }
}

fn default_base_min() -> u32 {
    5
}
fn default_base_max() -> u32 {
    15
}
fn default_crit_multiplier() -> f64 {
    1.5
}

/// How a damaging move interacts with dodge, crit and defense
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitProfile {
    /// Scales the defender's dodge chance
    pub dodge_factor: f64,
    /// Scales the strength-adjusted base roll
    pub damage_multiplier: f64,
    /// Scales the attacker's crit chance
    pub crit_chance_factor: f64,
    /// Damage kept when the defender is defending
    pub defend_multiplier: f64,
    /// Scales the defender's defense percentage when not defending
    pub defense_effectiveness: f64,
    /// Damage floor after mitigation
    pub min_damage: u32,
}

impl HitProfile {
    fn validate(&self) -> Result<(), String> {
        let unit = |name: &str, v: f64| {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(format!("{} must be within 0.0-1.0 (got {})", name, v))
            }
        };
        unit("defend_multiplier", self.defend_multiplier)?;
        unit("defense_effectiveness", self.defense_effectiveness)?;
        if self.dodge_factor < 0.0
            || self.crit_chance_factor < 0.0
            || self.damage_multiplier < 0.0
        {
            return Err("factors and multipliers cannot be negative".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackConstants {
    #[serde(default = "default_one")]
    pub dodge_factor: f64,
    #[serde(default = "default_one")]
    pub damage_multiplier: f64,
    #[serde(default = "default_one")]
    pub crit_chance_factor: f64,
    /// 70% reduction when defending
    #[serde(default = "default_attack_defend_multiplier")]
    pub defend_multiplier: f64,
    #[serde(default = "default_one")]
    pub defense_effectiveness: f64,
    #[serde(default = "default_attack_min_damage")]
    pub min_damage: u32,
}

impl Default for AttackConstants {
    fn default() -> Self {
        AttackConstants {
            dodge_factor: 1.0,
            damage_multiplier: 1.0,
            crit_chance_factor: 1.0,
            defend_multiplier: 0.3,
            defense_effectiveness: 1.0,
            min_damage: 1,
        }
    }
}

impl AttackConstants {
    pub fn profile(&self) -> HitProfile {
        HitProfile {
            dodge_factor: self.dodge_factor,
            damage_multiplier: self.damage_multiplier,
            crit_chance_factor: self.crit_chance_factor,
            defend_multiplier: self.defend_multiplier,
            defense_effectiveness: self.defense_effectiveness,
            min_damage: self.min_damage,
        }
    }
}

fn default_one() -> f64 {
    1.0
}
fn default_attack_defend_multiplier() -> f64 {
    0.3
}
fn default_attack_min_damage() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialConstants {
    /// Specials are harder to dodge
    #[serde(default = "default_special_dodge_factor")]
    pub dodge_factor: f64,
    #[serde(default = "default_special_damage_multiplier")]
    pub damage_multiplier: f64,
    #[serde(default = "default_special_crit_chance_factor")]
    pub crit_chance_factor: f64,
    /// Defending only halves a special
    #[serde(default = "default_special_defend_multiplier")]
    pub defend_multiplier: f64,
    /// Defense is less effective against specials
    #[serde(default = "default_special_defense_effectiveness")]
    pub defense_effectiveness: f64,
    #[serde(default = "default_special_min_damage")]
    pub min_damage: u32,
}

impl Default for SpecialConstants {
    fn default() -> Self {
        SpecialConstants {
            dodge_factor: 0.7,
            damage_multiplier: 1.75,
            crit_chance_factor: 1.2,
            defend_multiplier: 0.5,
            defense_effectiveness: 0.7,
            min_damage: 2,
        }
    }
}

impl SpecialConstants {
    pub fn profile(&self) -> HitProfile {
        HitProfile {
            dodge_factor: self.dodge_factor,
            damage_multiplier: self.damage_multiplier,
            crit_chance_factor: self.crit_chance_factor,
            defend_multiplier: self.defend_multiplier,
            defense_effectiveness: self.defense_effectiveness,
            min_damage: self.min_damage,
        }
    }
}

fn default_special_dodge_factor() -> f64 {
    0.7
}
fn default_special_damage_multiplier() -> f64 {
    1.75
}
fn default_special_crit_chance_factor() -> f64 {
    1.2
}
fn default_special_defend_multiplier() -> f64 {
    0.5
}
fn default_special_defense_effectiveness() -> f64 {
    0.7
}
fn default_special_min_damage() -> u32 {
    2
}
