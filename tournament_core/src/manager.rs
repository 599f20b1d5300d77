//! Tournament lifecycle: create, advance, crown

use crate::ai::{generate_ai_creature_with_rng, Difficulty};
use crate::bracket::{Match, TournamentBracket};
use crate::{BracketId, MatchId, TournamentError};
use creature_core::{Creature, CreatureId};
use rand::Rng;
use std::collections::HashSet;
use tracing::{info, warn};

/// Bracket sizes a tournament may be created with
pub const VALID_SIZES: [usize; 3] = [4, 8, 16];

/// Create a tournament, filling empty slots with AI (uses thread_rng)
pub fn create_tournament(
    players: Vec<Creature>,
    size: usize,
) -> Result<TournamentBracket, TournamentError> {
    let mut rng = rand::thread_rng();
    create_tournament_with_rng(players, size, &mut rng)
}

/// Create a tournament with a provided RNG
///
/// 1. Validate the size and the player count
/// 2. Fill the remaining slots with AI: the first half easy, the rest medium
/// 3. Fully heal every participant and restore round resources
/// 4. Pair creatures in order (1v2, 3v4, ...) into round 0
pub fn create_tournament_with_rng(
    players: Vec<Creature>,
    size: usize,
    rng: &mut impl Rng,
) -> Result<TournamentBracket, TournamentError> {
    if !VALID_SIZES.contains(&size) {
        return Err(TournamentError::InvalidSize(size));
    }
    if players.len() > size {
        return Err(TournamentError::TooManyPlayers {
            players: players.len(),
            size,
        });
    }
    let mut seen = HashSet::new();
    if let Some(duplicate) = players.iter().find(|c| !seen.insert(c.id)) {
        return Err(TournamentError::DuplicateCreature(duplicate.id));
    }

    let num_ai = size - players.len();
    let mut creatures = players;
    for i in 0..num_ai {
        let difficulty = if i < num_ai / 2 {
            Difficulty::Easy
        } else {
            Difficulty::Medium
        };
        creatures.push(generate_ai_creature_with_rng(difficulty, &[], rng)?);
    }

    for creature in &mut creatures {
        creature.reset_round_resources();
        creature.full_heal();
    }

    let ids: Vec<CreatureId> = creatures.iter().map(|c| c.id).collect();
    let total_rounds = size.trailing_zeros();
    let mut bracket = TournamentBracket::new(BracketId::from_rng(rng), total_rounds, creatures);
    bracket.add_matches(pair_round(&ids, 0, rng));

    info!(
        bracket = %bracket.id(),
        size,
        ai = num_ai,
        total_rounds,
        "created tournament"
    );
    Ok(bracket)
}

/// Move the bracket forward once the current round is finished (uses thread_rng)
pub fn advance_tournament(bracket: &mut TournamentBracket) -> bool {
    let mut rng = rand::thread_rng();
    advance_tournament_with_rng(bracket, &mut rng)
}

/// Move the bracket forward with a provided RNG (match ids)
///
/// Returns `true` while the tournament continues: either the current round
/// still has undecided matches, or a new round was just paired. Returns
/// `false` once a single winner remains.
///
/// Winners are paired in order, so a round yields `floor(winners / 2)`
/// matches. Brackets from `create_tournament` always have an even count; a
/// hand-built bracket with an odd count leaves the last winner unscheduled
/// and logs a warning.
pub fn advance_tournament_with_rng(bracket: &mut TournamentBracket, rng: &mut impl Rng) -> bool {
    if bracket.current_round_matches().any(|m| !m.is_complete()) {
        return true;
    }

    let winners: Vec<CreatureId> = bracket
        .current_round_matches()
        .filter_map(Match::winner_id)
        .collect();

    for &winner in &winners {
        if let Some(creature) = bracket.creature_mut(winner) {
            creature.reset_round_resources();
            creature.full_heal();
        }
    }

    if winners.len() <= 1 {
        if let Some(champion) = winners.first().and_then(|&id| bracket.creature(id)) {
            info!(bracket = %bracket.id(), champion = %champion.name, "tournament finished");
        }
        return false;
    }

    let next_round = bracket.current_round() + 1;
    let matches = pair_round(&winners, next_round, rng);
    bracket.add_matches(matches);
    bracket.advance_bracket_round();
    true
}

/// The winner of the final match
pub fn get_tournament_winner(bracket: &TournamentBracket) -> Result<&Creature, TournamentError> {
    let final_round = bracket.total_rounds().saturating_sub(1);
    let winner_id = bracket
        .matches()
        .iter()
        .filter(|m| m.bracket_round() == final_round)
        .find_map(Match::winner_id)
        .ok_or(TournamentError::NotComplete)?;
    bracket
        .creature(winner_id)
        .ok_or(TournamentError::UnknownCreature(winner_id))
}

/// Pair creatures in order; an odd creature out is not scheduled
fn pair_round(ids: &[CreatureId], bracket_round: u32, rng: &mut impl Rng) -> Vec<Match> {
    let pairs = ids.chunks_exact(2);
    if let [left_out] = pairs.remainder() {
        warn!(creature = %left_out, bracket_round, "odd winner count, creature left unscheduled");
    }
    pairs
        .map(|pair| Match::new(MatchId::from_rng(rng), pair[0], pair[1], bracket_round))
        .collect()
}
