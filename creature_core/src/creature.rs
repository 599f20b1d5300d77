//! Creature - a battle participant with stats, HP and per-round resources

use crate::stats::{
    allocation_total, CreatureStats, StatAllocation, CREATION_POINTS, LEVEL_UP_POINTS,
};
use crate::types::{CreatureType, Stat};
use crate::CreatureError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Defend uses available each bracket round
pub const DEFEND_USES_PER_ROUND: u32 = 3;
/// Special uses available each bracket round
pub const SPECIAL_USES_PER_ROUND: u32 = 1;
/// Longest allowed creature name, in characters
pub const MAX_NAME_LEN: usize = 50;

/// Speed of 20 gives a 40% dodge chance
const DODGE_COEFFICIENT: f64 = 0.4;
/// Defense of 20 gives a 50% damage reduction
const DEFENSE_COEFFICIENT: f64 = 0.5;
/// Luck of 20 gives a 30% crit chance
const CRIT_COEFFICIENT: f64 = 0.3;

/// Opaque, stable creature identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(Uuid);

impl CreatureId {
    /// Fresh random id from the OS-seeded generator
    pub fn new() -> Self {
        CreatureId(Uuid::new_v4())
    }

    /// Fresh v4 id drawn from the supplied RNG (reproducible under a seed)
    pub fn from_rng(rng: &mut impl Rng) -> Self {
        CreatureId(uuid::Builder::from_random_bytes(rng.gen()).into_uuid())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CreatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CreatureId {
    fn from(id: Uuid) -> Self {
        CreatureId(id)
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A battle creature with stats and state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    pub creature_type: CreatureType,
    /// Stats used by AI decisions and combat formulas; never reduced by damage
    pub base_stats: CreatureStats,
    pub current_hp: u32,
    pub max_hp: u32,
    pub is_ai: bool,
    pub defend_uses_remaining: u32,
    pub special_uses_remaining: u32,
}

impl Creature {
    /// Create a creature with type biases and optional player allocations
    ///
    /// The id is drawn from the OS-seeded generator.
    pub fn create_with_biases(
        name: impl Into<String>,
        creature_type: CreatureType,
        stat_allocations: Option<&StatAllocation>,
        is_ai: bool,
    ) -> Result<Self, CreatureError> {
        Self::create_with_id(
            CreatureId::new(),
            name,
            creature_type,
            stat_allocations,
            is_ai,
        )
    }

    /// Create a creature with an explicit id
    ///
    /// 1. Start from the baseline stats
    /// 2. Apply the type's bias table, clamped per stat
    /// 3. Apply the allocation (total must not exceed 6), clamped per stat
    /// 4. Max HP is the resulting health stat, and the creature starts full
    pub fn create_with_id(
        id: CreatureId,
        name: impl Into<String>,
        creature_type: CreatureType,
        stat_allocations: Option<&StatAllocation>,
        is_ai: bool,
    ) -> Result<Self, CreatureError> {
        let name = validate_name(name.into())?;

        let mut stats = CreatureStats::baseline();
        for &(stat, bias) in creature_type.stat_biases() {
            stats.apply_delta(stat, bias as i64);
        }

        if let Some(allocation) = stat_allocations {
            let total = allocation_total(allocation);
            if total > i64::from(CREATION_POINTS) {
                return Err(CreatureError::AllocationOverBudget {
                    total,
                    max: CREATION_POINTS,
                });
            }
            for (&stat, &points) in allocation {
                stats.apply_delta(stat, points as i64);
            }
        }

        let max_hp = stats.health();

        Ok(Creature {
            id,
            name,
            creature_type,
            base_stats: stats,
            current_hp: max_hp,
            max_hp,
            is_ai,
            defend_uses_remaining: DEFEND_USES_PER_ROUND,
            special_uses_remaining: SPECIAL_USES_PER_ROUND,
        })
    }

    /// Restore defend and special uses for a new bracket round
    pub fn reset_round_resources(&mut self) {
        self.defend_uses_remaining = DEFEND_USES_PER_ROUND;
        self.special_uses_remaining = SPECIAL_USES_PER_ROUND;
    }

    /// Restore HP to maximum
    pub fn full_heal(&mut self) {
        self.current_hp = self.max_hp;
    }

    /// Apply damage and return the damage actually taken
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current_hp);
        self.current_hp -= actual;
        actual
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Fraction of max HP remaining
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp as f64
    }

    /// Dodge chance from speed (0.0 - 0.4)
    pub fn dodge_chance(&self) -> f64 {
        (self.base_stats.speed() as f64 / 20.0) * DODGE_COEFFICIENT
    }

    /// Damage reduction from defense (0.0 - 0.5)
    pub fn defense_percentage(&self) -> f64 {
        (self.base_stats.defense() as f64 / 20.0) * DEFENSE_COEFFICIENT
    }

    /// Critical hit chance from luck (0.0 - 0.3)
    pub fn crit_chance(&self) -> f64 {
        (self.base_stats.luck() as f64 / 20.0) * CRIT_COEFFICIENT
    }

    /// Spend post-victory stat points
    ///
    /// The allocation must total exactly `LEVEL_UP_POINTS` with no negative
    /// entries. Health gains raise max and current HP by the applied amount.
    pub fn apply_level_up(&mut self, allocation: &StatAllocation) -> Result<(), CreatureError> {
        if let Some((&stat, &points)) = allocation.iter().find(|(_, points)| **points < 0) {
            return Err(CreatureError::NegativeAllocation { stat, points });
        }
        let total = allocation_total(allocation);
        if total != i64::from(LEVEL_UP_POINTS) {
            return Err(CreatureError::LevelUpTotal {
                total,
                expected: LEVEL_UP_POINTS,
            });
        }

        for (&stat, &points) in allocation {
            let applied = self.base_stats.apply_delta(stat, points as i64);
            if stat == Stat::Health && applied > 0 {
                self.max_hp += applied as u32;
                self.current_hp += applied as u32;
            }
        }
        Ok(())
    }
}

fn validate_name(name: String) -> Result<String, CreatureError> {
    let len = name.chars().count();
    if name.is_empty() || len > MAX_NAME_LEN {
        return Err(CreatureError::InvalidName { len, max: MAX_NAME_LEN });
    }
    Ok(name)
}
