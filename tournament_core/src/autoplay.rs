//! Playing matches without a human at the controls

use crate::ai::decide_move_with_rng;
use crate::bracket::{Match, TournamentBracket};
use crate::manager::{advance_tournament_with_rng, get_tournament_winner};
use crate::{MatchId, TournamentError};
use combat_core::{CombatEngine, Move};
use creature_core::CreatureId;
use rand::Rng;

/// Turn cap used when none is configured
pub const DEFAULT_MAX_TURNS: u32 = 500;

/// Play a match to completion with the AI policy choosing both sides
///
/// Fails with `MatchStalled` if no one has fallen after `max_turns` turns.
pub fn play_match_with_rng(
    bracket: &mut TournamentBracket,
    match_id: MatchId,
    engine: &CombatEngine,
    max_turns: u32,
    rng: &mut impl Rng,
) -> Result<CreatureId, TournamentError> {
    loop {
        let m = bracket
            .get_match(match_id)
            .ok_or(TournamentError::UnknownMatch(match_id))?;
        if let Some(winner) = m.winner_id() {
            return Ok(winner);
        }
        if m.turn_number() >= max_turns {
            return Err(TournamentError::MatchStalled {
                match_id,
                turns: m.turn_number(),
            });
        }

        let (id1, id2) = (m.creature1_id(), m.creature2_id());
        let turn = m.turn_number();
        let creature1 = bracket
            .creature(id1)
            .ok_or(TournamentError::UnknownCreature(id1))?;
        let creature2 = bracket
            .creature(id2)
            .ok_or(TournamentError::UnknownCreature(id2))?;
        let move1 = decide_move_with_rng(creature1, creature2, turn, rng);
        let move2 = decide_move_with_rng(creature2, creature1, turn, rng);

        bracket.queue_move(match_id, Move::new(move1, id1).with_target(id2))?;
        bracket.submit_move(match_id, Move::new(move2, id2).with_target(id1), engine, rng)?;
    }
}

/// Play every open match of the current round
pub fn play_round_with_rng(
    bracket: &mut TournamentBracket,
    engine: &CombatEngine,
    max_turns: u32,
    rng: &mut impl Rng,
) -> Result<(), TournamentError> {
    let open: Vec<MatchId> = bracket
        .current_round_matches()
        .filter(|m| !m.is_complete())
        .map(Match::id)
        .collect();
    for match_id in open {
        play_match_with_rng(bracket, match_id, engine, max_turns, rng)?;
    }
    Ok(())
}

/// Run a whole bracket to its champion
pub fn run_tournament_with_rng(
    bracket: &mut TournamentBracket,
    engine: &CombatEngine,
    max_turns: u32,
    rng: &mut impl Rng,
) -> Result<CreatureId, TournamentError> {
    loop {
        play_round_with_rng(bracket, engine, max_turns, rng)?;
        if !advance_tournament_with_rng(bracket, rng) {
            break;
        }
    }
    get_tournament_winner(bracket).map(|champion| champion.id)
}
