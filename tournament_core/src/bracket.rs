//! Matches and the single-elimination bracket

use crate::{BracketId, MatchId, TournamentError};
use combat_core::{CombatEngine, Move, MoveResult};
use creature_core::{Creature, CreatureId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// A pairing of two creatures within one bracket round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    id: MatchId,
    creature1_id: CreatureId,
    creature2_id: CreatureId,
    /// Combat turns resolved so far
    turn_number: u32,
    /// Which bracket round this match belongs to (0-based)
    bracket_round: u32,
    pending_moves: HashMap<CreatureId, Move>,
    move_history: Vec<MoveResult>,
    winner_id: Option<CreatureId>,
}

impl Match {
    pub fn new(
        id: MatchId,
        creature1_id: CreatureId,
        creature2_id: CreatureId,
        bracket_round: u32,
    ) -> Self {
        Match {
            id,
            creature1_id,
            creature2_id,
            turn_number: 0,
            bracket_round,
            pending_moves: HashMap::new(),
            move_history: Vec::new(),
            winner_id: None,
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn creature1_id(&self) -> CreatureId {
        self.creature1_id
    }

    pub fn creature2_id(&self) -> CreatureId {
        self.creature2_id
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn bracket_round(&self) -> u32 {
        self.bracket_round
    }

    pub fn pending_moves(&self) -> &HashMap<CreatureId, Move> {
        &self.pending_moves
    }

    pub fn move_history(&self) -> &[MoveResult] {
        &self.move_history
    }

    pub fn winner_id(&self) -> Option<CreatureId> {
        self.winner_id
    }

    /// A match is complete exactly when it has a winner
    pub fn is_complete(&self) -> bool {
        self.winner_id.is_some()
    }

    pub fn involves(&self, creature_id: CreatureId) -> bool {
        self.creature1_id == creature_id || self.creature2_id == creature_id
    }

    /// The other participant, if `creature_id` is in this match
    pub fn opponent_of(&self, creature_id: CreatureId) -> Option<CreatureId> {
        if creature_id == self.creature1_id {
            Some(self.creature2_id)
        } else if creature_id == self.creature2_id {
            Some(self.creature1_id)
        } else {
            None
        }
    }

    /// The participant that did not win, once decided
    pub fn loser_id(&self) -> Option<CreatureId> {
        self.winner_id.and_then(|winner| self.opponent_of(winner))
    }

    /// Queue a move for one participant, replacing any earlier pending move
    pub fn add_move(&mut self, mv: Move) -> Result<(), TournamentError> {
        if self.is_complete() {
            return Err(TournamentError::MatchComplete(self.id));
        }
        if !self.involves(mv.user_id()) {
            return Err(TournamentError::NotInMatch {
                creature_id: mv.user_id(),
                match_id: self.id,
            });
        }
        self.pending_moves.insert(mv.user_id(), mv);
        Ok(())
    }

    pub fn both_moves_submitted(&self) -> bool {
        self.pending_moves.contains_key(&self.creature1_id)
            && self.pending_moves.contains_key(&self.creature2_id)
    }

    pub fn clear_pending_moves(&mut self) {
        self.pending_moves.clear();
    }

    pub fn set_winner(&mut self, winner_id: CreatureId) -> Result<(), TournamentError> {
        if !self.involves(winner_id) {
            return Err(TournamentError::NotInMatch {
                creature_id: winner_id,
                match_id: self.id,
            });
        }
        self.winner_id = Some(winner_id);
        Ok(())
    }

    /// Both pending moves in creature1/creature2 order
    fn pending_pair(&self) -> Option<(Move, Move)> {
        let move1 = self.pending_moves.get(&self.creature1_id)?;
        let move2 = self.pending_moves.get(&self.creature2_id)?;
        Some((move1.clone(), move2.clone()))
    }

    fn record_turn(&mut self, result1: MoveResult, result2: MoveResult) {
        self.move_history.push(result1);
        self.move_history.push(result2);
        self.clear_pending_moves();
        self.turn_number += 1;
    }
}

/// The outcome of one resolved combat turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Result for creature 1 of the match
    pub result1: MoveResult,
    /// Result for creature 2 of the match
    pub result2: MoveResult,
    /// Set when this turn decided the match
    pub winner_id: Option<CreatureId>,
}

/// A single-elimination bracket and the creatures competing in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentBracket {
    id: BracketId,
    /// log2 of the bracket size
    total_rounds: u32,
    current_round: u32,
    matches: Vec<Match>,
    roster: HashMap<CreatureId, Creature>,
}

impl TournamentBracket {
    pub fn new(id: BracketId, total_rounds: u32, creatures: Vec<Creature>) -> Self {
        let roster = creatures.into_iter().map(|c| (c.id, c)).collect();
        TournamentBracket {
            id,
            total_rounds,
            current_round: 0,
            matches: Vec::new(),
            roster,
        }
    }

    pub fn id(&self) -> BracketId {
        self.id
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Every match played or scheduled, in creation order
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn get_match(&self, match_id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn get_match_mut(&mut self, match_id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    /// Matches belonging to the current bracket round
    pub fn current_round_matches(&self) -> impl Iterator<Item = &Match> {
        let round = self.current_round;
        self.matches.iter().filter(move |m| m.bracket_round == round)
    }

    /// First incomplete match of the current round
    pub fn get_current_match(&self) -> Option<&Match> {
        self.current_round_matches().find(|m| !m.is_complete())
    }

    pub fn add_matches(&mut self, matches: impl IntoIterator<Item = Match>) {
        self.matches.extend(matches);
    }

    pub fn advance_bracket_round(&mut self) {
        self.current_round += 1;
        info!(bracket = %self.id, round = self.current_round, "advanced bracket round");
    }

    /// True once every match has a winner
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Match::is_complete)
    }

    pub fn creature(&self, creature_id: CreatureId) -> Option<&Creature> {
        self.roster.get(&creature_id)
    }

    pub fn creature_mut(&mut self, creature_id: CreatureId) -> Option<&mut Creature> {
        self.roster.get_mut(&creature_id)
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.roster.values()
    }

    /// Queue a move without resolving
    pub fn queue_move(&mut self, match_id: MatchId, mv: Move) -> Result<(), TournamentError> {
        let m = self
            .get_match_mut(match_id)
            .ok_or(TournamentError::UnknownMatch(match_id))?;
        m.add_move(mv)
    }

    /// Queue a move and resolve the turn once both sides have submitted
    ///
    /// Returns `None` while waiting for the other participant.
    pub fn submit_move(
        &mut self,
        match_id: MatchId,
        mv: Move,
        engine: &CombatEngine,
        rng: &mut impl Rng,
    ) -> Result<Option<RoundOutcome>, TournamentError> {
        self.queue_move(match_id, mv)?;
        self.resolve_pending(match_id, engine, rng)
    }

    /// Resolve the queued turn of a match if both moves are in
    ///
    /// 1. Run both moves through the engine
    /// 2. Append both results to the history, clear pending, advance the turn
    /// 3. Creature 2 wins if creature 1 is down, else creature 1 wins if
    ///    creature 2 is down
    pub fn resolve_pending(
        &mut self,
        match_id: MatchId,
        engine: &CombatEngine,
        rng: &mut impl Rng,
    ) -> Result<Option<RoundOutcome>, TournamentError> {
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(TournamentError::UnknownMatch(match_id))?;
        if m.is_complete() {
            return Err(TournamentError::MatchComplete(match_id));
        }
        let (move1, move2) = match m.pending_pair() {
            Some(pair) => pair,
            None => return Ok(None),
        };

        let (id1, id2) = (m.creature1_id, m.creature2_id);
        let mut creature1 = self
            .roster
            .remove(&id1)
            .ok_or(TournamentError::UnknownCreature(id1))?;
        let mut creature2 = match self.roster.remove(&id2) {
            Some(c) => c,
            None => {
                self.roster.insert(id1, creature1);
                return Err(TournamentError::UnknownCreature(id2));
            }
        };

        let (result1, result2) =
            engine.execute_moves_with_rng(&mut creature1, &move1, &mut creature2, &move2, rng);
        m.record_turn(result1.clone(), result2.clone());

        let winner_id = if !creature1.is_alive() {
            Some(id2)
        } else if !creature2.is_alive() {
            Some(id1)
        } else {
            None
        };
        if let Some(winner) = winner_id {
            m.set_winner(winner)?;
            let winner_name = if winner == id1 {
                &creature1.name
            } else {
                &creature2.name
            };
            info!(
                match_id = %match_id,
                winner = %winner_name,
                turns = m.turn_number,
                "match decided"
            );
        } else {
            debug!(
                match_id = %match_id,
                turn = m.turn_number,
                hp1 = creature1.current_hp,
                hp2 = creature2.current_hp,
                "turn resolved"
            );
        }

        self.roster.insert(id1, creature1);
        self.roster.insert(id2, creature2);

        Ok(Some(RoundOutcome {
            result1,
            result2,
            winner_id,
        }))
    }
}
