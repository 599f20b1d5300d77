//! Game sessions: a player's run through one tournament

use crate::ai::decide_move_with_rng;
use crate::autoplay::{play_match_with_rng, DEFAULT_MAX_TURNS};
use crate::bracket::{Match, TournamentBracket};
use crate::manager::{
    advance_tournament_with_rng, create_tournament_with_rng, get_tournament_winner,
};
use crate::repository::{InMemoryRepository, Repository};
use crate::{GameId, MatchId, TournamentError};
use combat_core::{CombatEngine, Move, MoveResult, MoveType};
use creature_core::{
    Creature, CreatureId, CreatureStats, CreatureType, Stat, StatAllocation, LEVEL_UP_POINTS,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

/// One game: the player creatures and the bracket they entered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: GameId,
    pub num_players: usize,
    pub player_creature_ids: Vec<CreatureId>,
    pub tournament: TournamentBracket,
    pub is_complete: bool,
    pub champion_id: Option<CreatureId>,
    /// Player creatures knocked out of the bracket
    #[serde(default)]
    pub eliminated: Vec<CreatureId>,
    /// Level-ups earned by match wins and not yet spent
    #[serde(default)]
    pub pending_level_ups: HashMap<CreatureId, u32>,
}

impl GameState {
    pub fn new(
        game_id: GameId,
        num_players: usize,
        player_creature_ids: Vec<CreatureId>,
        tournament: TournamentBracket,
    ) -> Result<Self, TournamentError> {
        if !(1..=2).contains(&num_players) {
            return Err(TournamentError::InvalidPlayerCount(num_players));
        }
        Ok(GameState {
            game_id,
            num_players,
            player_creature_ids,
            tournament,
            is_complete: false,
            champion_id: None,
            eliminated: Vec::new(),
            pending_level_ups: HashMap::new(),
        })
    }

    pub fn is_player_creature(&self, creature_id: CreatureId) -> bool {
        self.player_creature_ids.contains(&creature_id)
    }

    /// Player creatures still in the bracket
    pub fn active_players(&self) -> impl Iterator<Item = CreatureId> + '_ {
        self.player_creature_ids
            .iter()
            .copied()
            .filter(|id| !self.eliminated.contains(id))
    }

    /// The match the players should look at next
    ///
    /// The first undecided match involving a player creature, otherwise the
    /// first undecided match of the bracket.
    pub fn get_current_match(&self) -> Option<&Match> {
        let mut open = self.tournament.matches().iter().filter(|m| !m.is_complete());
        let with_player = open
            .clone()
            .find(|m| self.player_creature_ids.iter().any(|&id| m.involves(id)));
        with_player.or_else(|| open.next())
    }

    pub fn set_champion(&mut self, champion_id: CreatureId) {
        self.champion_id = Some(champion_id);
        self.is_complete = true;
    }

    fn is_ai_only(&self, m: &Match) -> bool {
        !self.is_player_creature(m.creature1_id()) && !self.is_player_creature(m.creature2_id())
    }
}

/// One side of a match, as shown to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterSnapshot {
    pub id: CreatureId,
    pub name: String,
    pub creature_type: CreatureType,
    pub hp: u32,
    pub max_hp: u32,
}

impl From<&Creature> for FighterSnapshot {
    fn from(creature: &Creature) -> Self {
        FighterSnapshot {
            id: creature.id,
            name: creature.name.clone(),
            creature_type: creature.creature_type,
            hp: creature.current_hp,
            max_hp: creature.max_hp,
        }
    }
}

/// Read-only view of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub match_id: MatchId,
    pub creature1: FighterSnapshot,
    pub creature2: FighterSnapshot,
    pub turn_number: u32,
    pub bracket_round: u32,
    pub is_complete: bool,
    pub winner_name: Option<String>,
}

impl MatchSnapshot {
    fn capture(bracket: &TournamentBracket, m: &Match) -> Result<Self, TournamentError> {
        let lookup = |id: CreatureId| {
            bracket
                .creature(id)
                .ok_or(TournamentError::UnknownCreature(id))
        };
        let creature1 = lookup(m.creature1_id())?;
        let creature2 = lookup(m.creature2_id())?;
        let winner_name = m
            .winner_id()
            .and_then(|id| bracket.creature(id))
            .map(|c| c.name.clone());
        Ok(MatchSnapshot {
            match_id: m.id(),
            creature1: creature1.into(),
            creature2: creature2.into(),
            turn_number: m.turn_number(),
            bracket_round: m.bracket_round(),
            is_complete: m.is_complete(),
            winner_name,
        })
    }
}

/// Read-only view of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_id: GameId,
    pub current_match: Option<MatchSnapshot>,
    pub tournament_complete: bool,
    pub champion_name: Option<String>,
}

/// What happened after a move submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub game_id: GameId,
    /// Both results of the resolved turn, in creature1/creature2 order
    pub results: Vec<MoveResult>,
    /// Narration of the turn and anything it triggered
    pub latest_results: Vec<String>,
    /// The submission was queued and the other player has not moved yet
    pub waiting_for_opponent: bool,
    pub match_just_completed: bool,
    pub player_won_match: bool,
    pub stat_points_available: i32,
    pub current_stats: Option<CreatureStats>,
    pub eliminated: bool,
    pub tournament_complete: bool,
    pub champion_name: Option<String>,
    pub current_match: Option<MatchSnapshot>,
}

impl MoveOutcome {
    fn new(game_id: GameId) -> Self {
        MoveOutcome {
            game_id,
            results: Vec::new(),
            latest_results: Vec::new(),
            waiting_for_opponent: false,
            match_just_completed: false,
            player_won_match: false,
            stat_points_available: 0,
            current_stats: None,
            eliminated: false,
            tournament_complete: false,
            champion_name: None,
            current_match: None,
        }
    }
}

/// A creature type as offered to players choosing a fighter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatureTypeInfo {
    pub creature_type: CreatureType,
    pub description: &'static str,
    pub stat_biases: Vec<(Stat, i32)>,
}

impl From<CreatureType> for CreatureTypeInfo {
    fn from(creature_type: CreatureType) -> Self {
        CreatureTypeInfo {
            creature_type,
            description: creature_type.description(),
            stat_biases: creature_type.stat_biases().to_vec(),
        }
    }
}

/// The arena service: creatures, games and the combat engine behind them
pub struct Arena<
    C = InMemoryRepository<CreatureId, Creature>,
    G = InMemoryRepository<GameId, GameState>,
> {
    engine: CombatEngine,
    max_turns: u32,
    creatures: C,
    games: G,
}

impl Arena {
    /// An arena backed by in-memory repositories
    pub fn in_memory(engine: CombatEngine) -> Self {
        Arena::new(engine, InMemoryRepository::new(), InMemoryRepository::new())
    }
}

impl<C, G> Arena<C, G>
where
    C: Repository<CreatureId, Creature>,
    G: Repository<GameId, GameState>,
{
    pub fn new(engine: CombatEngine, creatures: C, games: G) -> Self {
        Arena {
            engine,
            max_turns: DEFAULT_MAX_TURNS,
            creatures,
            games,
        }
    }

    /// Cap on turns for matches the arena plays out by itself
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn engine(&self) -> &CombatEngine {
        &self.engine
    }

    pub fn creature(&self, creature_id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&creature_id)
    }

    /// Every stored creature, ordered by name
    pub fn list_creatures(&self) -> Vec<&Creature> {
        let mut creatures = self.creatures.list();
        creatures.sort_by(|a, b| a.name.cmp(&b.name));
        creatures
    }

    /// The selectable creature types with their descriptions and biases
    pub fn creature_types(&self) -> Vec<CreatureTypeInfo> {
        CreatureType::all().iter().copied().map(CreatureTypeInfo::from).collect()
    }

    pub fn game(&self, game_id: GameId) -> Option<&GameState> {
        self.games.get(&game_id)
    }

    /// Create and store a player creature
    pub fn create_creature(
        &mut self,
        name: &str,
        creature_type: CreatureType,
        allocation: Option<&StatAllocation>,
        rng: &mut impl Rng,
    ) -> Result<Creature, TournamentError> {
        let id = CreatureId::from_rng(rng);
        let creature = Creature::create_with_id(id, name, creature_type, allocation, false)?;
        info!(id = %creature.id, name = %creature.name, %creature_type, "created creature");
        self.creatures.put(creature.id, creature.clone());
        Ok(creature)
    }

    /// Enter stored creatures into a new tournament
    pub fn start_game(
        &mut self,
        creature_ids: &[CreatureId],
        num_players: usize,
        tournament_size: usize,
        rng: &mut impl Rng,
    ) -> Result<GameId, TournamentError> {
        if !(1..=2).contains(&num_players) {
            return Err(TournamentError::InvalidPlayerCount(num_players));
        }
        if creature_ids.len() != num_players {
            return Err(TournamentError::InvalidPlayerCount(creature_ids.len()));
        }
        let players = creature_ids
            .iter()
            .map(|&id| {
                self.creatures
                    .get(&id)
                    .cloned()
                    .ok_or(TournamentError::UnknownCreature(id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tournament = create_tournament_with_rng(players, tournament_size, rng)?;
        let game_id = GameId::from_rng(rng);
        let game = GameState::new(game_id, num_players, creature_ids.to_vec(), tournament)?;
        info!(game = %game_id, players = num_players, size = tournament_size, "started game");
        self.games.put(game_id, game);
        Ok(game_id)
    }

    /// Submit a player's move for the current match
    ///
    /// 1. Validate the game, the current match, participation and the tag
    /// 2. Let an AI opponent choose its move if it has not yet
    /// 3. Resolve the turn once both sides are in
    /// 4. On a decided match: eliminate a losing player, otherwise play out the
    ///    AI-only matches of the round, advance the bracket and crown a champion
    ///    when it ends
    pub fn submit_move(
        &mut self,
        game_id: GameId,
        creature_id: CreatureId,
        move_tag: &str,
        rng: &mut impl Rng,
    ) -> Result<MoveOutcome, TournamentError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(TournamentError::UnknownGame(game_id))?;
        if game.is_complete {
            return Err(TournamentError::GameOver);
        }
        let current = game.get_current_match().ok_or(TournamentError::NoActiveMatch)?;
        let match_id = current.id();
        let opponent_id = current.opponent_of(creature_id).ok_or_else(|| {
            warn!(creature = %creature_id, match_id = %match_id, "creature not in current match");
            TournamentError::NotInMatch {
                creature_id,
                match_id,
            }
        })?;
        let move_type: MoveType = move_tag.parse().map_err(|err| {
            warn!(tag = move_tag, "rejected move tag");
            TournamentError::InvalidMove(err)
        })?;
        let turn = current.turn_number();
        let opponent_pending = current.pending_moves().contains_key(&opponent_id);

        game.tournament
            .queue_move(match_id, Move::new(move_type, creature_id).with_target(opponent_id))?;

        let opponent = game
            .tournament
            .creature(opponent_id)
            .ok_or(TournamentError::UnknownCreature(opponent_id))?;
        if opponent.is_ai && !opponent_pending {
            let player = game
                .tournament
                .creature(creature_id)
                .ok_or(TournamentError::UnknownCreature(creature_id))?;
            let ai_move = decide_move_with_rng(opponent, player, turn, rng);
            game.tournament
                .queue_move(match_id, Move::new(ai_move, opponent_id).with_target(creature_id))?;
        }

        let mut outcome = MoveOutcome::new(game_id);
        match game.tournament.resolve_pending(match_id, &self.engine, rng)? {
            None => outcome.waiting_for_opponent = true,
            Some(round) => {
                outcome.latest_results = vec![
                    round.result1.message.clone(),
                    round.result2.message.clone(),
                ];
                outcome.results = vec![round.result1, round.result2];
                if let Some(winner_id) = round.winner_id {
                    conclude_match(
                        game,
                        match_id,
                        winner_id,
                        &self.engine,
                        self.max_turns,
                        rng,
                        &mut outcome,
                    )?;
                }
            }
        }

        outcome.tournament_complete = game.is_complete;
        outcome.champion_name = champion_name(game);
        outcome.current_match = game
            .get_current_match()
            .map(|m| MatchSnapshot::capture(&game.tournament, m))
            .transpose()?;
        Ok(outcome)
    }

    /// Spend an earned level-up on a player creature
    ///
    /// The creature in the bracket is updated and mirrored back into the
    /// creature repository.
    pub fn allocate_stats(
        &mut self,
        game_id: GameId,
        creature_id: CreatureId,
        allocation: &StatAllocation,
    ) -> Result<CreatureStats, TournamentError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(TournamentError::UnknownGame(game_id))?;
        if !game.is_player_creature(creature_id) {
            return Err(TournamentError::NotPlayerCreature(creature_id));
        }
        let earned = game.pending_level_ups.get(&creature_id).copied().unwrap_or(0);
        if earned == 0 {
            return Err(TournamentError::NoStatPointsAvailable(creature_id));
        }

        let creature = game
            .tournament
            .creature_mut(creature_id)
            .ok_or(TournamentError::UnknownCreature(creature_id))?;
        creature.apply_level_up(allocation)?;
        let updated = creature.clone();

        game.pending_level_ups.insert(creature_id, earned - 1);
        info!(creature = %updated.name, ?allocation, "applied level-up");
        let stats = updated.base_stats;
        self.creatures.put(creature_id, updated);
        Ok(stats)
    }

    pub fn game_snapshot(&self, game_id: GameId) -> Result<GameSnapshot, TournamentError> {
        let game = self
            .games
            .get(&game_id)
            .ok_or(TournamentError::UnknownGame(game_id))?;
        let current_match = game
            .get_current_match()
            .map(|m| MatchSnapshot::capture(&game.tournament, m))
            .transpose()?;
        Ok(GameSnapshot {
            game_id,
            current_match,
            tournament_complete: game.is_complete,
            champion_name: champion_name(game),
        })
    }
}

/// Bookkeeping after a submission decided its match
fn conclude_match(
    game: &mut GameState,
    match_id: MatchId,
    winner_id: CreatureId,
    engine: &CombatEngine,
    max_turns: u32,
    rng: &mut impl Rng,
    outcome: &mut MoveOutcome,
) -> Result<(), TournamentError> {
    outcome.match_just_completed = true;
    let loser_id = game
        .tournament
        .get_match(match_id)
        .and_then(Match::loser_id)
        .ok_or(TournamentError::UnknownMatch(match_id))?;
    if let Some(winner) = game.tournament.creature(winner_id) {
        outcome.latest_results.push(format!("{} wins the match!", winner.name));
    }

    if game.is_player_creature(loser_id) {
        game.eliminated.push(loser_id);
        if game.active_players().next().is_none() {
            game.is_complete = true;
            outcome.eliminated = true;
            outcome
                .latest_results
                .push("Game Over - You have been eliminated from the tournament!".to_string());
            info!(game = %game.game_id, "all players eliminated");
            return Ok(());
        }
    }

    let ai_only: Vec<MatchId> = game
        .tournament
        .current_round_matches()
        .filter(|m| !m.is_complete() && game.is_ai_only(m))
        .map(Match::id)
        .collect();
    for id in ai_only {
        play_match_with_rng(&mut game.tournament, id, engine, max_turns, rng)?;
    }

    if !advance_tournament_with_rng(&mut game.tournament, rng) {
        let champion = get_tournament_winner(&game.tournament)?;
        outcome
            .latest_results
            .push(format!("{} is the tournament champion!", champion.name));
        let champion_id = champion.id;
        game.set_champion(champion_id);
        info!(game = %game.game_id, champion = %champion_id, "game finished");
    }

    if game.is_player_creature(winner_id) {
        outcome.player_won_match = true;
        if !game.is_complete {
            *game.pending_level_ups.entry(winner_id).or_insert(0) += 1;
            outcome.stat_points_available = LEVEL_UP_POINTS;
            outcome.current_stats = game.tournament.creature(winner_id).map(|c| c.base_stats);
        }
    }
    Ok(())
}

fn champion_name(game: &GameState) -> Option<String> {
    game.champion_id
        .and_then(|id| game.tournament.creature(id))
        .map(|c| c.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BracketId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn arena_with_player(
        creature_type: CreatureType,
        rng: &mut ChaCha8Rng,
    ) -> (Arena, CreatureId) {
        let mut arena = Arena::in_memory(CombatEngine::default());
        let hero = arena.create_creature("Hero", creature_type, None, rng).unwrap();
        (arena, hero.id)
    }

    fn current_opponent(arena: &Arena, game_id: GameId, player: CreatureId) -> CreatureId {
        arena
            .game(game_id)
            .unwrap()
            .get_current_match()
            .unwrap()
            .opponent_of(player)
            .unwrap()
    }

    fn fighter(arena: &mut Arena, game_id: GameId, id: CreatureId) -> &mut Creature {
        arena
            .games
            .get_mut(&game_id)
            .unwrap()
            .tournament
            .creature_mut(id)
            .unwrap()
    }

    #[test]
    fn test_create_creature_is_stored() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut arena = Arena::in_memory(CombatEngine::default());
        let mut allocation = StatAllocation::new();
        allocation.insert(Stat::Speed, 2);
        let creature = arena
            .create_creature("Zippy", CreatureType::Beyblade, Some(&allocation), &mut rng)
            .unwrap();
        assert!(!creature.is_ai);
        assert_eq!(arena.creature(creature.id), Some(&creature));

        allocation.insert(Stat::Luck, 5);
        let result =
            arena.create_creature("Greedy", CreatureType::Gnome, Some(&allocation), &mut rng);
        assert!(matches!(result, Err(TournamentError::Creature(_))));
    }

    #[test]
    fn test_list_creatures_and_types() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut arena = Arena::in_memory(CombatEngine::default());
        assert!(arena.list_creatures().is_empty());

        let zed = arena.create_creature("Zed", CreatureType::Robot, None, &mut rng).unwrap();
        let amy = arena.create_creature("Amy", CreatureType::Kraken, None, &mut rng).unwrap();
        let names: Vec<&str> = arena.list_creatures().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Amy", "Zed"]);
        assert_eq!(arena.list_creatures(), [&amy, &zed]);

        let types = arena.creature_types();
        assert_eq!(types.len(), CreatureType::all().len());
        let robot = types
            .iter()
            .find(|info| info.creature_type == CreatureType::Robot)
            .unwrap();
        assert_eq!(robot.description, CreatureType::Robot.description());
        assert_eq!(robot.stat_biases, CreatureType::Robot.stat_biases());
    }

    #[test]
    fn test_start_game_validation() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let (mut arena, hero) = arena_with_player(CreatureType::Dragon, &mut rng);

        assert!(matches!(
            arena.start_game(&[hero], 3, 8, &mut rng),
            Err(TournamentError::InvalidPlayerCount(3))
        ));
        assert!(matches!(
            arena.start_game(&[CreatureId::new()], 1, 8, &mut rng),
            Err(TournamentError::UnknownCreature(_))
        ));
        assert!(matches!(
            arena.start_game(&[hero], 1, 10, &mut rng),
            Err(TournamentError::InvalidSize(10))
        ));

        let game_id = arena.start_game(&[hero], 1, 8, &mut rng).unwrap();
        let snapshot = arena.game_snapshot(game_id).unwrap();
        let current = snapshot.current_match.unwrap();
        assert_eq!(current.creature1.id, hero);
        assert_eq!(current.creature1.name, "Hero");
        assert_eq!(current.turn_number, 0);
        assert!(!snapshot.tournament_complete);
        assert!(snapshot.champion_name.is_none());
    }

    #[test]
    fn test_submit_move_rejections() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (mut arena, hero) = arena_with_player(CreatureType::Robot, &mut rng);
        let game_id = arena.start_game(&[hero], 1, 4, &mut rng).unwrap();

        assert!(matches!(
            arena.submit_move(GameId::new(), hero, "attack", &mut rng),
            Err(TournamentError::UnknownGame(_))
        ));
        assert!(matches!(
            arena.submit_move(game_id, CreatureId::new(), "attack", &mut rng),
            Err(TournamentError::NotInMatch { .. })
        ));
        assert!(matches!(
            arena.submit_move(game_id, hero, "fireball", &mut rng),
            Err(TournamentError::InvalidMove(_))
        ));
        // nothing was queued by the rejected submissions
        let current = arena.game(game_id).unwrap().get_current_match().unwrap();
        assert!(current.pending_moves().is_empty());
    }

    #[test]
    fn test_ai_opponent_moves_automatically() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let (mut arena, hero) = arena_with_player(CreatureType::Owlbear, &mut rng);
        let game_id = arena.start_game(&[hero], 1, 4, &mut rng).unwrap();

        let outcome = arena.submit_move(game_id, hero, "Defend", &mut rng).unwrap();
        assert!(!outcome.waiting_for_opponent);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].mv.user_id(), hero);
        assert_eq!(outcome.results[0].mv.move_type(), MoveType::Defend);
        assert!(outcome.latest_results.len() >= 2);

        let current = arena.game(game_id).unwrap().get_current_match().unwrap();
        if !current.is_complete() {
            assert_eq!(current.turn_number(), 1);
            assert_eq!(current.move_history().len(), 2);
        }
    }

    #[test]
    fn test_winning_player_advances_and_levels_up() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let (mut arena, hero) = arena_with_player(CreatureType::Robot, &mut rng);
        let game_id = arena.start_game(&[hero], 1, 4, &mut rng).unwrap();

        let opponent = current_opponent(&arena, game_id, hero);
        fighter(&mut arena, game_id, opponent).current_hp = 1;
        fighter(&mut arena, game_id, hero).current_hp = 10_000;

        let mut outcome = None;
        for _ in 0..200 {
            let result = arena.submit_move(game_id, hero, "attack", &mut rng).unwrap();
            if result.match_just_completed {
                outcome = Some(result);
                break;
            }
        }
        let outcome = outcome.expect("match should finish");
        assert!(outcome.player_won_match);
        assert_eq!(outcome.stat_points_available, 3);
        assert!(outcome.current_stats.is_some());
        assert!(outcome.latest_results.iter().any(|m| m == "Hero wins the match!"));

        // the other first-round match was played out and the bracket advanced
        let game = arena.game(game_id).unwrap();
        assert_eq!(game.tournament.current_round(), 1);
        let next = game.get_current_match().unwrap();
        assert!(next.involves(hero));
        assert_eq!(next.bracket_round(), 1);
        let healed = game.tournament.creature(hero).unwrap();
        assert_eq!(healed.current_hp, healed.max_hp);

        let before = healed.base_stats.strength();
        let mut allocation = StatAllocation::new();
        allocation.insert(Stat::Strength, 3);
        let stats = arena.allocate_stats(game_id, hero, &allocation).unwrap();
        assert_eq!(stats.strength(), before + 3);
        assert_eq!(arena.creature(hero).unwrap().base_stats.strength(), before + 3);

        assert!(matches!(
            arena.allocate_stats(game_id, hero, &allocation),
            Err(TournamentError::NoStatPointsAvailable(_))
        ));
    }

    #[test]
    fn test_allocate_stats_rejections() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let (mut arena, hero) = arena_with_player(CreatureType::Jacob, &mut rng);
        let game_id = arena.start_game(&[hero], 1, 4, &mut rng).unwrap();
        let opponent = current_opponent(&arena, game_id, hero);
        let mut allocation = StatAllocation::new();
        allocation.insert(Stat::Luck, 3);

        assert!(matches!(
            arena.allocate_stats(game_id, opponent, &allocation),
            Err(TournamentError::NotPlayerCreature(_))
        ));
        assert!(matches!(
            arena.allocate_stats(game_id, hero, &allocation),
            Err(TournamentError::NoStatPointsAvailable(_))
        ));

        arena
            .games
            .get_mut(&game_id)
            .unwrap()
            .pending_level_ups
            .insert(hero, 1);
        allocation.insert(Stat::Luck, 2);
        assert!(matches!(
            arena.allocate_stats(game_id, hero, &allocation),
            Err(TournamentError::Creature(_))
        ));
    }

    #[test]
    fn test_losing_player_is_eliminated() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (mut arena, hero) = arena_with_player(CreatureType::Gnome, &mut rng);
        let game_id = arena.start_game(&[hero], 1, 8, &mut rng).unwrap();

        let opponent = current_opponent(&arena, game_id, hero);
        fighter(&mut arena, game_id, opponent).current_hp = 10_000;
        fighter(&mut arena, game_id, hero).current_hp = 1;

        let mut outcome = None;
        for _ in 0..200 {
            let result = arena.submit_move(game_id, hero, "attack", &mut rng).unwrap();
            if result.match_just_completed {
                outcome = Some(result);
                break;
            }
        }
        let outcome = outcome.expect("match should finish");
        assert!(outcome.eliminated);
        assert!(outcome.tournament_complete);
        assert!(!outcome.player_won_match);
        assert_eq!(
            outcome.latest_results.last().map(String::as_str),
            Some("Game Over - You have been eliminated from the tournament!")
        );

        assert!(matches!(
            arena.submit_move(game_id, hero, "attack", &mut rng),
            Err(TournamentError::GameOver)
        ));
    }

    #[test]
    fn test_two_players_wait_for_each_other() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut arena = Arena::in_memory(CombatEngine::default());
        let p1 = arena.create_creature("One", CreatureType::Medusa, None, &mut rng).unwrap().id;
        let p2 = arena.create_creature("Two", CreatureType::Kraken, None, &mut rng).unwrap().id;
        let game_id = arena.start_game(&[p1, p2], 2, 4, &mut rng).unwrap();

        let first = arena.submit_move(game_id, p1, "attack", &mut rng).unwrap();
        assert!(first.waiting_for_opponent);
        assert!(first.results.is_empty());

        let second = arena.submit_move(game_id, p2, "defend", &mut rng).unwrap();
        assert!(!second.waiting_for_opponent);
        assert_eq!(second.results.len(), 2);
        assert_eq!(second.results[1].mv.move_type(), MoveType::Defend);
    }

    #[test]
    fn test_full_single_player_game_finishes() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let (mut arena, hero) = arena_with_player(CreatureType::Minotaur, &mut rng);
        let game_id = arena.start_game(&[hero], 1, 4, &mut rng).unwrap();

        let mut allocation = StatAllocation::new();
        allocation.insert(Stat::Health, 3);
        for _ in 0..10_000 {
            let outcome = arena.submit_move(game_id, hero, "attack", &mut rng).unwrap();
            if outcome.stat_points_available > 0 {
                arena.allocate_stats(game_id, hero, &allocation).unwrap();
            }
            if outcome.tournament_complete {
                break;
            }
        }

        let game = arena.game(game_id).unwrap();
        assert!(game.is_complete);
        let snapshot = arena.game_snapshot(game_id).unwrap();
        assert!(snapshot.tournament_complete);
        if game.eliminated.contains(&hero) {
            assert!(game.champion_id.is_none());
        } else {
            assert_eq!(game.champion_id, Some(hero));
            assert_eq!(snapshot.champion_name.as_deref(), Some("Hero"));
        }
    }

    #[test]
    fn test_current_match_prefers_player_match() {
        let player = CreatureId::new();
        let ids: Vec<CreatureId> = (0..3).map(|_| CreatureId::new()).collect();
        let mut bracket = TournamentBracket::new(BracketId::new(), 2, Vec::new());
        let ai_match = Match::new(MatchId::new(), ids[0], ids[1], 0);
        let player_match = Match::new(MatchId::new(), ids[2], player, 0);
        let player_match_id = player_match.id();
        let ai_match_id = ai_match.id();
        bracket.add_matches([ai_match, player_match]);

        let mut game = GameState::new(GameId::new(), 1, vec![player], bracket).unwrap();
        assert_eq!(game.get_current_match().map(Match::id), Some(player_match_id));

        let m = game.tournament.get_match_mut(player_match_id).unwrap();
        m.set_winner(player).unwrap();
        assert_eq!(game.get_current_match().map(Match::id), Some(ai_match_id));
    }

    #[test]
    fn test_game_state_player_count() {
        let bracket = TournamentBracket::new(BracketId::new(), 2, Vec::new());
        assert!(matches!(
            GameState::new(GameId::new(), 0, Vec::new(), bracket),
            Err(TournamentError::InvalidPlayerCount(0))
        ));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let (mut arena, hero) = arena_with_player(CreatureType::Cerberus, &mut rng);
        let game_id = arena.start_game(&[hero], 1, 4, &mut rng).unwrap();
        let snapshot = arena.game_snapshot(game_id).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["current_match"]["creature1"]["name"], "Hero");
        assert_eq!(json["current_match"]["creature1"]["creature_type"], "cerberus");
        assert_eq!(json["tournament_complete"], false);
    }
}
