//! AI creature generation

use crate::TournamentError;
use creature_core::stats::CREATION_POINTS;
use creature_core::{Creature, CreatureId, CreatureType, Stat, StatAllocation};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How carefully an AI spends its creation points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Up to 2 points per stat in fixed order, remainder into luck
    Easy,
    /// All points spread over 2-3 random stats
    Medium,
    /// Strength 3, defense or health 2, speed 1
    Hard,
}

impl Difficulty {
    /// Map a numeric level; anything other than 1 or 2 is hard
    pub fn from_level(level: u32) -> Self {
        match level {
            1 => Difficulty::Easy,
            2 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    pub fn level(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// Generate a random AI creature (uses thread_rng)
pub fn generate_ai_creature(
    difficulty: Difficulty,
    exclude_types: &[CreatureType],
) -> Result<Creature, TournamentError> {
    let mut rng = rand::thread_rng();
    generate_ai_creature_with_rng(difficulty, exclude_types, &mut rng)
}

/// Generate a random AI creature with a provided RNG
///
/// Picks a type outside `exclude_types`, allocates the six creation points
/// according to `difficulty` and names it after the type's prefixes.
pub fn generate_ai_creature_with_rng(
    difficulty: Difficulty,
    exclude_types: &[CreatureType],
    rng: &mut impl Rng,
) -> Result<Creature, TournamentError> {
    let available: Vec<CreatureType> = CreatureType::all()
        .iter()
        .copied()
        .filter(|t| !exclude_types.contains(t))
        .collect();
    let creature_type = *available
        .choose(rng)
        .ok_or(TournamentError::NoCreatureTypesAvailable)?;

    let allocation = generate_stat_allocations(difficulty, rng);
    let name = generate_ai_name(creature_type, rng);
    let id = CreatureId::from_rng(rng);

    debug!(%name, %creature_type, ?difficulty, "generated AI creature");
    let creature = Creature::create_with_id(id, name, creature_type, Some(&allocation), true)?;
    Ok(creature)
}

/// Spend exactly the creation budget according to `difficulty`
pub fn generate_stat_allocations(difficulty: Difficulty, rng: &mut impl Rng) -> StatAllocation {
    let mut allocation = StatAllocation::new();
    match difficulty {
        Difficulty::Easy => {
            let (last, rest) = match Stat::all().split_last() {
                Some(split) => split,
                None => return allocation,
            };
            let mut remaining = CREATION_POINTS;
            for &stat in rest {
                let points = rng.gen_range(0..=remaining.min(2));
                if points > 0 {
                    allocation.insert(stat, points);
                }
                remaining -= points;
            }
            if remaining > 0 {
                allocation.insert(*last, remaining);
            }
        }
        Difficulty::Medium => {
            let focus_count = rng.gen_range(2..=3);
            let focus: Vec<Stat> = Stat::all()
                .choose_multiple(rng, focus_count)
                .copied()
                .collect();
            let mut remaining = CREATION_POINTS;
            for (i, &stat) in focus.iter().enumerate() {
                if i + 1 == focus.len() {
                    allocation.insert(stat, remaining);
                } else {
                    // leave at least one point for each later stat
                    let max = 3.min(remaining - focus.len() as i32 + 1);
                    let points = rng.gen_range(1..=max);
                    allocation.insert(stat, points);
                    remaining -= points;
                }
            }
        }
        Difficulty::Hard => {
            let secondary = if rng.gen_bool(0.5) {
                Stat::Defense
            } else {
                Stat::Health
            };
            allocation.insert(Stat::Strength, 3);
            allocation.insert(secondary, 2);
            allocation.insert(Stat::Speed, 1);
        }
    }
    allocation
}

/// Themed AI name: a type prefix followed by a number in 1..=999
pub fn generate_ai_name(creature_type: CreatureType, rng: &mut impl Rng) -> String {
    let prefix = creature_type
        .name_prefixes()
        .choose(rng)
        .copied()
        .unwrap_or("AI");
    let number: u32 = rng.gen_range(1..=999);
    format!("{}{}", prefix, number)
}
