//! Damage calculation - turning rolls and stats into a final hit

use crate::config::{CombatConstants, HitProfile};
use rand::Rng;

/// Everything a hit needs once the random rolls are known
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInput {
    /// Uniform base damage roll
    pub base_roll: u32,
    pub attacker_strength: u32,
    pub is_critical: bool,
    /// Defender declared Defend and still has a use left
    pub defender_defending: bool,
    pub defender_defense_percentage: f64,
}

/// Roll the uniform base damage
pub fn roll_base_damage(constants: &CombatConstants, rng: &mut impl Rng) -> u32 {
    let damage = &constants.damage;
    if damage.base_min >= damage.base_max {
        return damage.base_max;
    }
    rng.gen_range(damage.base_min..=damage.base_max)
}

/// Calculate the damage of a landed hit
///
/// Every multiplication truncates toward zero before the next step:
/// 1. base roll * (strength / 10) * move multiplier
/// 2. crit multiplier
/// 3. defend multiplier, or (1 - defense% * effectiveness)
/// 4. clamp to the move's damage floor
pub fn calculate_hit_damage(input: &HitInput, profile: &HitProfile, crit_multiplier: f64) -> u32 {
    let strength_modifier = input.attacker_strength as f64 / 10.0;
    let mut damage =
        truncate(input.base_roll as f64 * strength_modifier * profile.damage_multiplier);

    if input.is_critical {
        damage = truncate(damage as f64 * crit_multiplier);
    }

    damage = if input.defender_defending {
        truncate(damage as f64 * profile.defend_multiplier)
    } else {
        let reduction = input.defender_defense_percentage * profile.defense_effectiveness;
        truncate(damage as f64 * (1.0 - reduction))
    };

    damage.max(profile.min_damage)
}

fn truncate(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        value as u32
    }
}
