//! tournament_core - AI opponents, brackets and game sessions
//!
//! This library provides:
//! - AI policy: opponent generation and weighted move selection
//! - Match / TournamentBracket: single-elimination bracket state
//! - Tournament manager: bracket creation, advancement and champion lookup
//! - Arena: a game session service over injected repositories

pub mod ai;
pub mod autoplay;
pub mod bracket;
pub mod config;
pub mod ids;
pub mod manager;
pub mod repository;
pub mod session;

pub use ai::{decide_move, generate_ai_creature, Difficulty};
pub use bracket::{Match, RoundOutcome, TournamentBracket};
pub use config::ArenaConfig;
pub use ids::{BracketId, GameId, MatchId};
pub use manager::{advance_tournament, create_tournament, get_tournament_winner};
pub use repository::{InMemoryRepository, Repository};
pub use session::{Arena, CreatureTypeInfo, GameSnapshot, GameState, MatchSnapshot, MoveOutcome};

use combat_core::ParseMoveTypeError;
use creature_core::{CreatureError, CreatureId};
use thiserror::Error;

/// Error running a tournament or game session
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Tournament size must be 4, 8, or 16 (got {0})")]
    InvalidSize(usize),
    #[error("Too many player creatures for tournament size ({players} > {size})")]
    TooManyPlayers { players: usize, size: usize },
    #[error("Creature {0} entered more than once")]
    DuplicateCreature(CreatureId),
    #[error("Number of players must be 1 or 2 (got {0})")]
    InvalidPlayerCount(usize),
    #[error("No creature types left to choose from")]
    NoCreatureTypesAvailable,
    #[error("Match not found: {0}")]
    UnknownMatch(MatchId),
    #[error("Creature not found: {0}")]
    UnknownCreature(CreatureId),
    #[error("Game not found: {0}")]
    UnknownGame(GameId),
    #[error("Creature {creature_id} not in match {match_id}")]
    NotInMatch {
        creature_id: CreatureId,
        match_id: MatchId,
    },
    #[error("Match {0} is already complete")]
    MatchComplete(MatchId),
    #[error("Match {match_id} still undecided after {turns} turns")]
    MatchStalled { match_id: MatchId, turns: u32 },
    #[error("No active match")]
    NoActiveMatch,
    #[error("Tournament not complete")]
    NotComplete,
    #[error("Game is already over")]
    GameOver,
    #[error("Can only allocate stats to player creatures")]
    NotPlayerCreature(CreatureId),
    #[error("No stat points available for creature {0}")]
    NoStatPointsAvailable(CreatureId),
    #[error(transparent)]
    InvalidMove(#[from] ParseMoveTypeError),
    #[error(transparent)]
    Creature(#[from] CreatureError),
}
