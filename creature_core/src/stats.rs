//! Creature attribute block and stat point allocations

use crate::types::Stat;
use crate::CreatureError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest value any stat may hold
pub const MIN_STAT: u32 = 1;
/// Highest value any stat may hold
pub const MAX_STAT: u32 = 20;

/// Bonus points a player may spread at creation
pub const CREATION_POINTS: i32 = 6;
/// Points awarded after each match win
pub const LEVEL_UP_POINTS: i32 = 3;

/// Requested stat point deltas, keyed by stat
pub type StatAllocation = BTreeMap<Stat, i32>;

/// Parse an allocation from name/points pairs (e.g. a decoded request body)
pub fn parse_allocation<'a, I>(entries: I) -> Result<StatAllocation, CreatureError>
where
    I: IntoIterator<Item = (&'a str, i32)>,
{
    let mut allocation = StatAllocation::new();
    for (name, points) in entries {
        let stat: Stat = name.parse()?;
        let entry = allocation.entry(stat).or_insert(0);
        *entry = entry.saturating_add(points);
    }
    Ok(allocation)
}

/// Sum of all points in an allocation, widened so any mix of entries fits
pub fn allocation_total(allocation: &StatAllocation) -> i64 {
    allocation.values().map(|&points| i64::from(points)).sum()
}

/// Base statistics for a creature, each kept within [MIN_STAT, MAX_STAT]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureStats {
    pub(crate) speed: u32,
    pub(crate) health: u32,
    pub(crate) defense: u32,
    pub(crate) strength: u32,
    pub(crate) luck: u32,
}

impl CreatureStats {
    /// Stats every creature starts from before type biases
    pub fn baseline() -> Self {
        CreatureStats {
            speed: 10,
            health: 20,
            defense: 15,
            strength: 8,
            luck: 10,
        }
    }

    /// Build a stat block, clamping every value into range
    pub fn new(speed: i64, health: i64, defense: i64, strength: i64, luck: i64) -> Self {
        CreatureStats {
            speed: clamp_stat(speed),
            health: clamp_stat(health),
            defense: clamp_stat(defense),
            strength: clamp_stat(strength),
            luck: clamp_stat(luck),
        }
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn luck(&self) -> u32 {
        self.luck
    }

    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Speed => self.speed,
            Stat::Health => self.health,
            Stat::Defense => self.defense,
            Stat::Strength => self.strength,
            Stat::Luck => self.luck,
        }
    }

    /// Set a stat, clamped into range
    pub fn set(&mut self, stat: Stat, value: i64) {
        let value = clamp_stat(value);
        match stat {
            Stat::Speed => self.speed = value,
            Stat::Health => self.health = value,
            Stat::Defense => self.defense = value,
            Stat::Strength => self.strength = value,
            Stat::Luck => self.luck = value,
        }
    }

    /// Add `delta` to a stat, clamped into range
    ///
    /// Returns the change that was actually applied.
    pub fn apply_delta(&mut self, stat: Stat, delta: i64) -> i64 {
        let before = self.get(stat) as i64;
        self.set(stat, before + delta);
        self.get(stat) as i64 - before
    }
}

fn clamp_stat(value: i64) -> u32 {
    value.clamp(MIN_STAT as i64, MAX_STAT as i64) as u32
}
