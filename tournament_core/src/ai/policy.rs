//! AI move selection

use combat_core::MoveType;
use creature_core::Creature;
use rand::Rng;
use tracing::debug;

const ATTACK_WEIGHT: u32 = 10;

/// Candidate moves and their weights for the current situation
///
/// Attack is always present. Defend and Special appear only while the
/// creature has uses left, and a zero-weight Defend is left out entirely.
pub fn move_weights(
    creature: &Creature,
    opponent: &Creature,
    round_num: u32,
) -> Vec<(MoveType, u32)> {
    let own_hp = creature.hp_fraction();
    let opponent_hp = opponent.hp_fraction();

    let mut weights = vec![(MoveType::Attack, ATTACK_WEIGHT)];

    if creature.defend_uses_remaining > 0 {
        let defend_weight = if own_hp < 0.3 {
            15
        } else if own_hp < 0.5 {
            8
        } else if opponent.base_stats.strength() > 15 {
            5
        } else {
            0
        };
        if defend_weight > 0 {
            weights.push((MoveType::Defend, defend_weight));
        }
    }

    if creature.special_uses_remaining > 0 {
        let special_weight = if opponent_hp < 0.4 {
            20
        } else if round_num == 1 {
            12
        } else {
            6
        };
        weights.push((MoveType::Special, special_weight));
    }

    weights
}

/// Choose a move for an AI creature (uses thread_rng)
pub fn decide_move(creature: &Creature, opponent: &Creature, round_num: u32) -> MoveType {
    let mut rng = rand::thread_rng();
    decide_move_with_rng(creature, opponent, round_num, &mut rng)
}

/// Choose a move for an AI creature with a provided RNG
///
/// Draws uniformly from `[0, total weight]` and returns the first candidate
/// whose cumulative weight reaches the draw.
pub fn decide_move_with_rng(
    creature: &Creature,
    opponent: &Creature,
    round_num: u32,
    rng: &mut impl Rng,
) -> MoveType {
    let weights = move_weights(creature, opponent, round_num);
    let total: u32 = weights.iter().map(|&(_, w)| w).sum();
    let roll = rng.gen::<f64>() * total as f64;

    let mut cumulative = 0.0;
    for &(move_type, weight) in &weights {
        cumulative += weight as f64;
        if roll <= cumulative {
            debug!(creature = %creature.name, %move_type, roll, total, "AI chose move");
            return move_type;
        }
    }

    MoveType::Attack
}
